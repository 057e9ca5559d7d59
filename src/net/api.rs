//! Typed REST client for the LedgerX backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Views call [`LedgerApi`] operations; each one validates its input, builds
//! an [`HttpRequest`], and passes it through [`LedgerApi::execute`], the single
//! chokepoint that attaches the bearer token and classifies responses.
//!
//! ERROR HANDLING
//! ==============
//! Protected calls without a session fail with [`ApiError::NotAuthenticated`]
//! and send nothing. An authentication failure on a request that carried a
//! token expires the session, which makes the route guard redirect to
//! `/login`. The client never retries.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::error::ApiError;
use super::idempotency::IdempotencyKey;
use super::transport::{HEADER_ACCEPT, HEADER_IDEMPOTENCY_KEY, HttpRequest, HttpResponse, Transport};
use super::types::{
    Account, AccountBalance, ExportJob, MonthlySummary, NewAccount, NewTransaction, TokenResponse, Transaction,
};
use crate::config::ApiConfig;
use crate::state::session::SessionHandle;
use crate::util::claims;
use crate::util::month::YearMonth;
use crate::util::validate;

const REGISTER_PATH: &str = "/auth/register";
const LOGIN_PATH: &str = "/auth/login";
const ACCOUNTS_PATH: &str = "/v1/accounts";
const TRANSACTIONS_PATH: &str = "/v1/transactions";
const EXPORTS_PATH: &str = "/exports";

fn account_summary_path(account_id: i64) -> String {
    format!("{ACCOUNTS_PATH}/{account_id}/summary")
}

fn account_balance_path(account_id: i64) -> String {
    format!("{ACCOUNTS_PATH}/{account_id}/balance")
}

fn export_status_path(id: i64) -> String {
    format!("{EXPORTS_PATH}/{id}/status")
}

fn export_download_path(id: i64) -> String {
    format!("{EXPORTS_PATH}/{id}/download")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Access {
    Public,
    Protected,
}

/// Client for the LedgerX REST API.
#[derive(Clone)]
pub struct LedgerApi<T, H> {
    transport: T,
    session: H,
    config: ApiConfig,
}

impl<T: Transport, H: SessionHandle> LedgerApi<T, H> {
    pub fn new(transport: T, session: H, config: ApiConfig) -> Self {
        Self { transport, session, config }
    }

    fn claimed_user_id(&self) -> Option<i64> {
        self.session.current_token().as_deref().and_then(claims::user_id_from_token)
    }

    /// `POST /auth/register`.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] for a malformed email or a password under six
    /// characters (nothing is sent); `Conflict`/`BadRequest` from the backend.
    pub async fn register(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let credentials = validate::registration(email, password)?;
        let request = HttpRequest::post(self.config.url(REGISTER_PATH)).json(&credentials)?;
        self.execute(request, Access::Public).await?.json()
    }

    /// `POST /auth/login`.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] for empty fields; [`ApiError::Unauthorized`]
    /// for bad credentials.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let credentials = validate::login(email, password)?;
        let request = HttpRequest::post(self.config.url(LOGIN_PATH)).json(&credentials)?;
        self.execute(request, Access::Public).await?.json()
    }

    /// `GET /v1/accounts?user_id=N`, in backend order. The `user_id` query
    /// comes from the session token's claim and is omitted without one.
    ///
    /// # Errors
    ///
    /// Authentication errors when the session is missing or rejected.
    pub async fn list_accounts(&self) -> Result<Vec<Account>, ApiError> {
        let mut request = HttpRequest::get(self.config.url(ACCOUNTS_PATH));
        if let Some(user_id) = self.claimed_user_id() {
            request = request.query(&[("user_id", user_id.to_string().as_str())])?;
        }
        self.execute(request, Access::Protected).await?.json()
    }

    /// `POST /v1/accounts`. A blank currency means USD. The `user_id` claim
    /// of the session token is included when present.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] for a blank name or non-ISO currency.
    pub async fn create_account(&self, name: &str, currency: &str) -> Result<Account, ApiError> {
        let body = NewAccount {
            user_id: self.claimed_user_id(),
            name: validate::account_name(name)?,
            currency: validate::currency(currency)?,
        };
        let request = HttpRequest::post(self.config.url(ACCOUNTS_PATH)).json(&body)?;
        self.execute(request, Access::Protected).await?.json()
    }

    /// `POST /v1/transactions` under a freshly generated idempotency key.
    /// Two calls always send two distinct keys, even for identical bodies.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] for bad ids or currency.
    pub async fn create_transaction(&self, tx: &NewTransaction) -> Result<Transaction, ApiError> {
        self.create_transaction_with_key(tx, IdempotencyKey::generate()).await
    }

    /// `POST /v1/transactions` under a caller-held key, for re-sending a
    /// submission whose outcome is unknown.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] for bad ids or currency.
    pub async fn create_transaction_with_key(
        &self,
        tx: &NewTransaction,
        key: IdempotencyKey,
    ) -> Result<Transaction, ApiError> {
        let body = validate::transaction(tx)?;
        let request = HttpRequest::post(self.config.url(TRANSACTIONS_PATH))
            .header(HEADER_IDEMPOTENCY_KEY, key.to_string())
            .json(&body)?;
        self.execute(request, Access::Protected).await?.json()
    }

    /// `GET /v1/accounts/{id}/summary?month=YYYY-MM`.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] for an unknown account.
    pub async fn get_monthly_summary(&self, account_id: i64, month: YearMonth) -> Result<MonthlySummary, ApiError> {
        let account_id = validate::positive_id("account_id", account_id)?;
        let month = month.to_string();
        let request =
            HttpRequest::get(self.config.url(&account_summary_path(account_id))).query(&[("month", month.as_str())])?;
        self.execute(request, Access::Protected).await?.json()
    }

    /// `GET /v1/accounts/{id}/balance`.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] or [`ApiError::BadRequest`] for unknown ids.
    pub async fn get_account_balance(&self, account_id: i64) -> Result<AccountBalance, ApiError> {
        let account_id = validate::positive_id("account_id", account_id)?;
        let request = HttpRequest::get(self.config.url(&account_balance_path(account_id)));
        self.execute(request, Access::Protected).await?.json()
    }

    /// `POST /exports?month=YYYY-MM`.
    ///
    /// # Errors
    ///
    /// [`ApiError::BadRequest`] if the backend rejects the month.
    pub async fn request_export(&self, month: YearMonth) -> Result<ExportJob, ApiError> {
        let month = month.to_string();
        let request = HttpRequest::post(self.config.url(EXPORTS_PATH)).query(&[("month", month.as_str())])?;
        self.execute(request, Access::Protected).await?.json()
    }

    /// `GET /exports/{id}/status`. Safe to poll at any point in the job's
    /// life; the status label is returned as-is.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] for an unknown job.
    pub async fn get_export_status(&self, id: i64) -> Result<ExportJob, ApiError> {
        let request = HttpRequest::get(self.config.url(&export_status_path(id)));
        self.execute(request, Access::Protected).await?.json()
    }

    /// `GET /exports/{id}/download`, returning the CSV text.
    ///
    /// # Errors
    ///
    /// [`ApiError::BadRequest`] while the file is not ready,
    /// [`ApiError::NotFound`] for an unknown job.
    pub async fn download_export(&self, id: i64) -> Result<String, ApiError> {
        let request = HttpRequest::get(self.config.url(&export_download_path(id))).header(HEADER_ACCEPT, "text/csv");
        Ok(self.execute(request, Access::Protected).await?.body)
    }

    /// Send `request` and classify the response.
    async fn execute(&self, request: HttpRequest, access: Access) -> Result<HttpResponse, ApiError> {
        let (request, sent_token) = match access {
            Access::Public => (request, None),
            Access::Protected => match self.session.current_token() {
                Some(token) => (request.bearer(&token), Some(token)),
                None => {
                    log::debug!("{} {}: no session, not sent", request.method, request.url);
                    return Err(ApiError::NotAuthenticated);
                }
            },
        };

        let method = request.method;
        let url = request.url.clone();
        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("{method} {url}: {e}");
                return Err(e);
            }
        };

        if response.is_success() {
            log::debug!("{method} {url} -> {}", response.status);
            return Ok(response);
        }

        let error = ApiError::from_status(response.status, &response.body);
        log::warn!("{method} {url} -> {}: {error}", response.status);
        if let Some(token) = sent_token.as_deref()
            && error.is_authentication()
        {
            log::info!("backend rejected the session token; signing out");
            self.session.expire(token);
        }
        Err(error)
    }
}
