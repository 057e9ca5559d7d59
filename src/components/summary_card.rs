//! Monthly inflow / outflow / net card.

#[cfg(test)]
#[path = "summary_card_test.rs"]
mod summary_card_test;

use leptos::prelude::*;

use crate::net::types::MonthlySummary;
use crate::util::money::format_amount;
use crate::util::month::YearMonth;

/// Label/value rows in display order.
pub fn summary_rows(summary: &MonthlySummary, currency: Option<&str>) -> [(&'static str, String); 3] {
    [
        ("Inflow", format_amount(summary.inflow, currency)),
        ("Outflow", format_amount(summary.outflow, currency)),
        ("Net", format_amount(summary.net, currency)),
    ]
}

#[component]
pub fn SummaryCard(month: YearMonth, summary: MonthlySummary, #[prop(optional)] currency: Option<String>) -> impl IntoView {
    let rows = summary_rows(&summary, currency.as_deref());
    view! {
        <section class="summary-card">
            <h3>{format!("Summary for {month}")}</h3>
            <dl>
                {rows
                    .into_iter()
                    .map(|(label, value)| {
                        view! {
                            <dt>{label}</dt>
                            <dd>{value}</dd>
                        }
                    })
                    .collect_view()}
            </dl>
        </section>
    }
}
