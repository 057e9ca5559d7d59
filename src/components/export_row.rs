//! One export job with its status and actions.

use leptos::prelude::*;

use crate::net::types::ExportJob;

#[component]
pub fn ExportRow(
    job: ExportJob,
    #[prop(into)] busy: Signal<bool>,
    on_check: Callback<i64>,
    on_download: Callback<i64>,
) -> impl IntoView {
    let id = job.id;
    let downloadable = job.is_downloadable();
    view! {
        <li class="export-row">
            <span class="export-row__id">{format!("#{id}")}</span>
            <span class="export-row__status">{job.status}</span>
            <button type="button" disabled=move || busy.get() on:click=move |_| on_check.run(id)>
                "Check status"
            </button>
            <Show when=move || downloadable>
                <button type="button" disabled=move || busy.get() on:click=move |_| on_download.run(id)>
                    "Download CSV"
                </button>
            </Show>
        </li>
    }
}
