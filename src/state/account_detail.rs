//! Monthly summary and balance state for the account detail page.
//!
//! The summary and the balance load independently; one failing does not hide
//! the other.

#[cfg(test)]
#[path = "account_detail_test.rs"]
mod account_detail_test;

use crate::net::error::ApiError;
use crate::net::types::{AccountBalance, MonthlySummary};
use crate::util::month::YearMonth;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountDetailState {
    pub account_id: i64,
    pub month: YearMonth,
    pub summary: Option<MonthlySummary>,
    pub balance: Option<AccountBalance>,
    pub summary_loading: bool,
    pub balance_loading: bool,
    pub summary_error: Option<String>,
    pub balance_error: Option<String>,
}

impl AccountDetailState {
    pub fn new(account_id: i64, month: YearMonth) -> Self {
        Self {
            account_id,
            month,
            summary: None,
            balance: None,
            summary_loading: false,
            balance_loading: false,
            summary_error: None,
            balance_error: None,
        }
    }

    /// Switch months. The old summary is dropped so it is never shown under
    /// the new month's heading.
    pub fn select_month(&mut self, month: YearMonth) {
        if self.month != month {
            self.month = month;
            self.summary = None;
        }
    }

    pub fn begin_summary(&mut self) {
        self.summary_loading = true;
        self.summary_error = None;
    }

    /// Apply a summary response, ignoring one for a month no longer selected.
    pub fn finish_summary(&mut self, month: YearMonth, result: Result<MonthlySummary, ApiError>) {
        if month != self.month {
            log::debug!("dropping summary for {month}; {} is selected", self.month);
            return;
        }
        self.summary_loading = false;
        match result {
            Ok(summary) => {
                if !summary.is_balanced() {
                    log::warn!("summary for account {} {month} does not balance: {summary:?}", self.account_id);
                }
                self.summary = Some(summary);
            }
            Err(e) => {
                self.summary = None;
                self.summary_error = Some(e.to_string());
            }
        }
    }

    pub fn begin_balance(&mut self) {
        self.balance_loading = true;
        self.balance_error = None;
    }

    pub fn finish_balance(&mut self, result: Result<AccountBalance, ApiError>) {
        self.balance_loading = false;
        match result {
            Ok(balance) => self.balance = Some(balance),
            Err(e) => self.balance_error = Some(e.to_string()),
        }
    }
}
