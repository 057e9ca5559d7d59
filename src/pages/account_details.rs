//! Account detail page: monthly summary, balance, and new transactions.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted at `/accounts/:id`. The id segment is parsed before anything is
//! requested; a change of id remounts the detail view. A created transaction
//! refreshes the summary and balance.

#[cfg(test)]
#[path = "account_details_test.rs"]
mod account_details_test;

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::hooks::use_params_map;

use crate::app::AppApi;
use crate::components::error_notice::ErrorNotice;
use crate::components::summary_card::SummaryCard;
use crate::net::error::ApiError;
use crate::net::types::{DEFAULT_CURRENCY, NewTransaction};
use crate::state::account_detail::AccountDetailState;
use crate::state::session::SessionSignal;
use crate::state::transaction_form::TransactionFormState;
use crate::util::money::format_minor;
use crate::util::month::YearMonth;
use crate::util::validate;

/// Raw form fields for a new transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct TransactionInput {
    pub amount: String,
    pub currency: String,
    pub occurred_at: String,
    pub note: String,
}

/// Parse the `:id` route segment.
pub(crate) fn parse_account_id(raw: Option<&str>) -> Result<i64, ApiError> {
    let invalid = || ApiError::validation("account_id", "not an account id");
    let id = raw.ok_or_else(invalid)?.trim().parse::<i64>().map_err(|_| invalid())?;
    validate::positive_id("account_id", id)
}

/// Turn form input into a transaction body. `user_id` comes from the session
/// token's claims.
pub(crate) fn build_transaction(
    user_id: Option<i64>,
    account_id: i64,
    input: &TransactionInput,
) -> Result<NewTransaction, ApiError> {
    let user_id = user_id.ok_or_else(|| ApiError::validation("user_id", "session has no user id; log in again"))?;
    let note = input.note.trim();
    Ok(NewTransaction {
        user_id,
        account_id,
        amount_minor: validate::amount_minor(&input.amount)?,
        currency: validate::currency(&input.currency)?,
        occurred_at: validate::occurred_at(&input.occurred_at)?,
        note: (!note.is_empty()).then(|| note.to_owned()),
    })
}

fn load_summary(api: AppApi, state: RwSignal<AccountDetailState>) {
    let (account_id, month) = state.with_untracked(|s| (s.account_id, s.month));
    state.update(AccountDetailState::begin_summary);
    leptos::task::spawn_local(async move {
        let result = api.get_monthly_summary(account_id, month).await;
        state.update(|s| s.finish_summary(month, result));
    });
}

fn load_balance(api: AppApi, state: RwSignal<AccountDetailState>) {
    let account_id = state.with_untracked(|s| s.account_id);
    state.update(AccountDetailState::begin_balance);
    leptos::task::spawn_local(async move {
        let result = api.get_account_balance(account_id).await;
        state.update(|s| s.finish_balance(result));
    });
}

#[component]
pub fn AccountDetailsPage() -> impl IntoView {
    let params = use_params_map();
    let account_id = move || params.with(|p| parse_account_id(p.get("id").as_deref()));

    move || match account_id() {
        Ok(id) => view! { <AccountDetail account_id=id/> }.into_any(),
        Err(e) => view! { <p class="error-notice">{e.to_string()}</p> }.into_any(),
    }
}

#[component]
fn AccountDetail(account_id: i64) -> impl IntoView {
    let api = expect_context::<AppApi>();
    let session = expect_context::<SessionSignal>();
    let state = RwSignal::new(AccountDetailState::new(account_id, YearMonth::current()));
    let month_input = RwSignal::new(YearMonth::current().to_string());
    let form = RwSignal::new(TransactionFormState::default());
    let input = RwSignal::new(TransactionInput { currency: DEFAULT_CURRENCY.to_owned(), ..TransactionInput::default() });
    let form_error = RwSignal::new(None::<String>);

    load_summary(api.clone(), state);
    load_balance(api.clone(), state);

    let on_month = {
        let api = api.clone();
        move |ev: leptos::ev::Event| {
            let raw = event_target_value(&ev);
            month_input.set(raw.clone());
            match YearMonth::parse(&raw) {
                Ok(month) => {
                    state.update(|s| s.select_month(month));
                    load_summary(api.clone(), state);
                }
                Err(e) => state.update(|s| s.summary_error = Some(e.to_string())),
            }
        }
    };

    let send = {
        let api = api.clone();
        move |retry: bool| {
            let pending = if retry {
                let mut pending = None;
                form.update(|f| pending = f.retry());
                pending
            } else {
                let draft = match build_transaction(session.session().user_id(), account_id, &input.get_untracked()) {
                    Ok(draft) => draft,
                    Err(e) => {
                        form_error.set(Some(e.to_string()));
                        return;
                    }
                };
                let mut pending = None;
                form.update(|f| pending = Some(f.submit(draft)));
                pending
            };
            let Some(pending) = pending else {
                return;
            };
            form_error.set(None);
            let api = api.clone();
            leptos::task::spawn_local(async move {
                let result = api.create_transaction_with_key(&pending.draft, pending.key).await;
                let mut reset = false;
                form.update(|f| reset = f.finish(result));
                if reset {
                    input.update(|i| {
                        i.amount.clear();
                        i.note.clear();
                    });
                    load_summary(api.clone(), state);
                    load_balance(api, state);
                }
            });
        }
    };
    let send_retry = send.clone();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if form.with(|f| f.submitting) {
            return;
        }
        send(false);
    };

    let summary_view = move || {
        state.with(|s| {
            s.summary.map(|summary| {
                view! { <SummaryCard month=s.month summary=summary/> }
            })
        })
    };
    let balance_view = move || {
        state.with(|s| {
            s.balance.as_ref().map(|balance| {
                format!("Balance {} as of {}", format_minor(balance.balance_minor), balance.as_of)
            })
        })
    };

    view! {
        <div class="account-detail">
            <h1>{format!("Account {account_id}")}</h1>
            <p class="account-detail__balance">{balance_view}</p>
            <ErrorNotice message=Signal::derive(move || state.with(|s| s.balance_error.clone()))/>

            <label>
                "Month "
                <input type="month" prop:value=move || month_input.get() on:change=on_month/>
            </label>
            <Show when=move || state.with(|s| s.summary_loading)>
                <p class="loading">"Loading summary..."</p>
            </Show>
            {summary_view}
            <ErrorNotice message=Signal::derive(move || state.with(|s| s.summary_error.clone()))/>

            <form class="transaction-form" on:submit=on_submit>
                <h2>"New transaction"</h2>
                <input
                    type="number"
                    step="1"
                    placeholder="Amount in minor units, e.g. -1250"
                    prop:value=move || input.with(|i| i.amount.clone())
                    on:input=move |ev| input.update(|i| i.amount = event_target_value(&ev))
                />
                <input
                    type="text"
                    maxlength="3"
                    placeholder=DEFAULT_CURRENCY
                    prop:value=move || input.with(|i| i.currency.clone())
                    on:input=move |ev| input.update(|i| i.currency = event_target_value(&ev))
                />
                <input
                    type="datetime-local"
                    prop:value=move || input.with(|i| i.occurred_at.clone())
                    on:input=move |ev| input.update(|i| i.occurred_at = event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Note (optional)"
                    prop:value=move || input.with(|i| i.note.clone())
                    on:input=move |ev| input.update(|i| i.note = event_target_value(&ev))
                />
                <button type="submit" disabled=move || form.with(|f| f.submitting)>
                    "Add transaction"
                </button>
                <Show when=move || form.with(TransactionFormState::can_retry)>
                    <button type="button" on:click={
                        let send_retry = send_retry.clone();
                        move |_| send_retry(true)
                    }>
                        "Retry"
                    </button>
                </Show>
                <ErrorNotice message=form_error/>
                <ErrorNotice message=Signal::derive(move || form.with(|f| f.error.clone()))/>
                {move || {
                    form.with(|f| {
                        f.last_created.as_ref().map(|tx| {
                            view! { <p class="notice">{format!("Recorded {}", format_minor(tx.amount_minor))}</p> }
                        })
                    })
                }}
            </form>
        </div>
    }
}
