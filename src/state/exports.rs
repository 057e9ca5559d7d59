//! Export-job state for the exports page.
//!
//! Jobs requested during this page visit are tracked by id, newest first.
//! The backend has no list endpoint, so a reload starts empty.

#[cfg(test)]
#[path = "exports_test.rs"]
mod exports_test;

use crate::net::error::ApiError;
use crate::net::types::ExportJob;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportsState {
    pub jobs: Vec<ExportJob>,
    pub request_pending: bool,
    /// Job ids with a status check or download in flight.
    pub busy: Vec<i64>,
    pub error: Option<String>,
}

impl ExportsState {
    pub fn begin_request(&mut self) {
        self.request_pending = true;
        self.error = None;
    }

    pub fn finish_request(&mut self, result: Result<ExportJob, ApiError>) {
        self.request_pending = false;
        match result {
            Ok(job) => self.upsert(job),
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    pub fn begin_job(&mut self, id: i64) {
        if !self.busy.contains(&id) {
            self.busy.push(id);
        }
        self.error = None;
    }

    pub fn is_busy(&self, id: i64) -> bool {
        self.busy.contains(&id)
    }

    /// Apply a status poll. The reported label replaces the old one verbatim.
    pub fn finish_status(&mut self, id: i64, result: Result<ExportJob, ApiError>) {
        self.busy.retain(|busy| *busy != id);
        match result {
            Ok(job) => self.upsert(job),
            Err(e) => self.error = Some(format!("export {id}: {e}")),
        }
    }

    pub fn finish_download(&mut self, id: i64, result: Result<(), String>) {
        self.busy.retain(|busy| *busy != id);
        if let Err(e) = result {
            self.error = Some(format!("export {id}: {e}"));
        }
    }

    #[cfg(test)]
    pub(crate) fn job(&self, id: i64) -> Option<&ExportJob> {
        self.jobs.iter().find(|job| job.id == id)
    }

    fn upsert(&mut self, job: ExportJob) {
        match self.jobs.iter_mut().find(|existing| existing.id == job.id) {
            Some(existing) => *existing = job,
            None => self.jobs.insert(0, job),
        }
    }
}
