//! Accounts page: the authenticated landing route.
//!
//! SYSTEM CONTEXT
//! ==============
//! Lists the user's accounts in backend order and creates new ones. The list
//! loads once on mount; a created account is appended locally.

#[cfg(test)]
#[path = "accounts_test.rs"]
mod accounts_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::app::AppApi;
use crate::components::error_notice::ErrorNotice;
use crate::net::types::{Account, DEFAULT_CURRENCY};
use crate::state::accounts::AccountsState;
use crate::util::money::format_amount;

pub(crate) fn account_href(id: i64) -> String {
    format!("/accounts/{id}")
}

/// Balance column text; accounts listed without a balance show a dash.
pub(crate) fn balance_label(account: &Account) -> String {
    match account.balance_minor {
        Some(minor) => format_amount(minor, account.currency.as_deref()),
        None => "-".to_owned(),
    }
}

#[component]
pub fn AccountsPage() -> impl IntoView {
    let api = expect_context::<AppApi>();
    let accounts = RwSignal::new(AccountsState::default());
    let name = RwSignal::new(String::new());
    let currency = RwSignal::new(DEFAULT_CURRENCY.to_owned());

    {
        let api = api.clone();
        accounts.update(AccountsState::begin_load);
        leptos::task::spawn_local(async move {
            let result = api.list_accounts().await;
            accounts.update(|s| s.finish_load(result));
        });
    }

    let on_create = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if accounts.with(|s| s.create_pending) {
            return;
        }
        accounts.update(AccountsState::begin_create);
        let api = api.clone();
        let name_value = name.get();
        let currency_value = currency.get();
        leptos::task::spawn_local(async move {
            let result = api.create_account(&name_value, &currency_value).await;
            let mut reset = false;
            accounts.update(|s| reset = s.finish_create(result));
            if reset {
                name.set(String::new());
            }
        });
    };

    view! {
        <div class="accounts-page">
            <h1>"Accounts"</h1>
            <Show when=move || accounts.with(|s| s.loading)>
                <p class="loading">"Loading accounts..."</p>
            </Show>
            <ErrorNotice message=Signal::derive(move || accounts.with(|s| s.error.clone()))/>
            <table class="accounts-table">
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"Currency"</th>
                        <th>"Balance"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || accounts.with(|s| s.items.clone())
                        key=|account| account.id
                        children=|account| {
                            let balance = balance_label(&account);
                            view! {
                                <tr>
                                    <td>
                                        <A href=account_href(account.id)>{account.name}</A>
                                    </td>
                                    <td>{account.currency.unwrap_or_default()}</td>
                                    <td>{balance}</td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
            <Show when=move || accounts.with(|s| !s.loading && s.items.is_empty())>
                <p class="empty">"No accounts yet."</p>
            </Show>
            <form class="account-form" on:submit=on_create>
                <h2>"New account"</h2>
                <input
                    type="text"
                    placeholder="Name"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    maxlength="3"
                    placeholder=DEFAULT_CURRENCY
                    prop:value=move || currency.get()
                    on:input=move |ev| currency.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || accounts.with(|s| s.create_pending)>
                    "Create"
                </button>
            </form>
        </div>
    }
}
