//! CSV exports page: request a month, poll status, download.
//!
//! SYSTEM CONTEXT
//! ==============
//! Status is checked on demand, never on a timer. The download goes through
//! the API client so the bearer header is attached, then is handed to the
//! browser as a file.

#[cfg(test)]
#[path = "exports_test.rs"]
mod exports_test;

use leptos::prelude::*;

use crate::app::AppApi;
use crate::components::error_notice::ErrorNotice;
use crate::components::export_row::ExportRow;
use crate::net::error::ApiError;
use crate::state::exports::ExportsState;
use crate::util::download;
use crate::util::month::YearMonth;

/// Month to request; an untouched input means the current month.
pub(crate) fn requested_month(raw: &str) -> Result<YearMonth, ApiError> {
    if raw.trim().is_empty() { Ok(YearMonth::current()) } else { YearMonth::parse(raw) }
}

#[component]
pub fn ExportsPage() -> impl IntoView {
    let api = expect_context::<AppApi>();
    let exports = RwSignal::new(ExportsState::default());
    let month_input = RwSignal::new(YearMonth::current().to_string());

    let on_request = {
        let api = api.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if exports.with(|s| s.request_pending) {
                return;
            }
            let month = match requested_month(&month_input.get()) {
                Ok(month) => month,
                Err(e) => {
                    exports.update(|s| s.error = Some(e.to_string()));
                    return;
                }
            };
            exports.update(ExportsState::begin_request);
            let api = api.clone();
            leptos::task::spawn_local(async move {
                let result = api.request_export(month).await;
                exports.update(|s| s.finish_request(result));
            });
        }
    };

    let on_check = {
        let api = api.clone();
        Callback::new(move |id: i64| {
            exports.update(|s| s.begin_job(id));
            let api = api.clone();
            leptos::task::spawn_local(async move {
                let result = api.get_export_status(id).await;
                exports.update(|s| s.finish_status(id, result));
            });
        })
    };

    let on_download = Callback::new(move |id: i64| {
        exports.update(|s| s.begin_job(id));
        let api = api.clone();
        leptos::task::spawn_local(async move {
            let result = match api.download_export(id).await {
                Ok(csv) => download::save_csv(&download::export_file_name(id), &csv).map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            };
            exports.update(|s| s.finish_download(id, result));
        });
    });

    view! {
        <div class="exports-page">
            <h1>"Exports"</h1>
            <form class="export-form" on:submit=on_request>
                <label>
                    "Month "
                    <input
                        type="month"
                        prop:value=move || month_input.get()
                        on:input=move |ev| month_input.set(event_target_value(&ev))
                    />
                </label>
                <button type="submit" disabled=move || exports.with(|s| s.request_pending)>
                    "Request export"
                </button>
            </form>
            <ErrorNotice message=Signal::derive(move || exports.with(|s| s.error.clone()))/>
            <ul class="export-list">
                <For
                    each=move || exports.with(|s| s.jobs.clone())
                    key=|job| (job.id, job.status.clone(), job.file_path.clone())
                    children=move |job| {
                        let id = job.id;
                        view! {
                            <ExportRow
                                job=job
                                busy=Signal::derive(move || exports.with(|s| s.is_busy(id)))
                                on_check=on_check
                                on_download=on_download
                            />
                        }
                    }
                />
            </ul>
        </div>
    }
}
