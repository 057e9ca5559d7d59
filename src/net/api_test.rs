use std::sync::Mutex;

use time::Month;
use time::macros::datetime;

use super::*;
use crate::net::transport::{HEADER_AUTHORIZATION, Method};
use crate::state::session::{SharedSession, SessionStore, shared};
use crate::state::storage::MemoryTokenStorage;

// {"user_id":5}
const TOKEN_USER_5: &str = "h.eyJ1c2VyX2lkIjo1fQ.s";

/// Replays canned responses in order and records every request it sees.
#[derive(Default)]
struct RecordingTransport {
    responses: Mutex<Vec<HttpResponse>>,
    sent: Mutex<Vec<HttpRequest>>,
}

impl RecordingTransport {
    fn new(responses: Vec<HttpResponse>) -> Self {
        Self { responses: Mutex::new(responses), sent: Mutex::new(Vec::new()) }
    }

    fn sent(&self) -> Vec<HttpRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait(?Send)]
impl<'a> Transport for &'a RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.sent.lock().unwrap().push(request);
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Err(ApiError::Network("no canned response".into()))
        } else {
            Ok(responses.remove(0))
        }
    }
}

fn signed_in(token: &str) -> (MemoryTokenStorage, SharedSession<MemoryTokenStorage>) {
    let storage = MemoryTokenStorage::with_token(token);
    let session = shared(SessionStore::init(storage.clone()));
    (storage, session)
}

fn signed_out() -> (MemoryTokenStorage, SharedSession<MemoryTokenStorage>) {
    let storage = MemoryTokenStorage::default();
    let session = shared(SessionStore::init(storage.clone()));
    (storage, session)
}

fn api<'a>(
    transport: &'a RecordingTransport,
    session: &SharedSession<MemoryTokenStorage>,
) -> LedgerApi<&'a RecordingTransport, SharedSession<MemoryTokenStorage>> {
    LedgerApi::new(transport, session.clone(), ApiConfig::new("http://ledger.test").unwrap())
}

fn draft() -> NewTransaction {
    NewTransaction {
        user_id: 5,
        account_id: 7,
        amount_minor: -1250,
        currency: "usd".into(),
        occurred_at: datetime!(2024-03-05 12:00 UTC),
        note: Some("  groceries ".into()),
    }
}

fn echoed(tx: &NewTransaction) -> HttpResponse {
    let body = serde_json::json!({
        "id": 99,
        "user_id": tx.user_id,
        "account_id": tx.account_id,
        "amount_minor": tx.amount_minor,
        "currency": "USD",
        "occurred_at": "2024-03-05T12:00:00Z",
    });
    HttpResponse::new(201, body.to_string())
}

fn march_2024() -> YearMonth {
    YearMonth::new(2024, Month::March).unwrap()
}

// =============================================================
// paths
// =============================================================

#[test]
fn paths_embed_ids() {
    assert_eq!(account_summary_path(7), "/v1/accounts/7/summary");
    assert_eq!(account_balance_path(7), "/v1/accounts/7/balance");
    assert_eq!(export_status_path(3), "/exports/3/status");
    assert_eq!(export_download_path(3), "/exports/3/download");
}

// =============================================================
// register / login
// =============================================================

#[tokio::test]
async fn register_rejects_bad_email_without_sending() {
    let transport = RecordingTransport::default();
    let (storage, session) = signed_out();
    let err = api(&transport, &session).register("not-an-email", "secret1").await.unwrap_err();
    assert_eq!(err.field(), Some("email"));
    assert!(transport.sent().is_empty());
    assert_eq!(storage.peek(), None);
}

#[tokio::test]
async fn register_rejects_short_password_without_sending() {
    let transport = RecordingTransport::default();
    let (_, session) = signed_out();
    let err = api(&transport, &session).register("a@b.co", "12345").await.unwrap_err();
    assert_eq!(err.field(), Some("password"));
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn register_posts_credentials_without_bearer() {
    let transport = RecordingTransport::new(vec![HttpResponse::new(201, r#"{"token":"t1"}"#)]);
    let (_, session) = signed_in("stale");
    let token = api(&transport, &session).register(" a@b.co ", "secret1").await.unwrap();
    assert_eq!(token.token, "t1");

    let sent = transport.sent();
    assert_eq!(sent[0].method, Method::Post);
    assert_eq!(sent[0].url, "http://ledger.test/auth/register");
    assert_eq!(sent[0].header_value(HEADER_AUTHORIZATION), None);
    let body: serde_json::Value = serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["email"], "a@b.co");
}

#[tokio::test]
async fn register_duplicate_email_is_conflict() {
    let transport = RecordingTransport::new(vec![HttpResponse::new(400, "duplicate key value")]);
    let (_, session) = signed_out();
    let err = api(&transport, &session).register("a@b.co", "secret1").await.unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));
}

#[tokio::test]
async fn login_does_not_touch_the_session() {
    let transport = RecordingTransport::new(vec![HttpResponse::new(200, r#"{"token":"fresh"}"#)]);
    let (storage, session) = signed_out();
    let token = api(&transport, &session).login("a@b.co", "pw").await.unwrap();
    assert_eq!(token.token, "fresh");
    assert_eq!(storage.peek(), None);
}

#[tokio::test]
async fn login_401_leaves_existing_session_alone() {
    let transport = RecordingTransport::new(vec![HttpResponse::new(401, "invalid credentials")]);
    let (storage, session) = signed_in("keep-me");
    let err = api(&transport, &session).login("a@b.co", "wrong").await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized(_)));
    assert_eq!(storage.peek().as_deref(), Some("keep-me"));
}

#[tokio::test]
async fn login_requires_both_fields() {
    let transport = RecordingTransport::default();
    let (_, session) = signed_out();
    let err = api(&transport, &session).login("", "pw").await.unwrap_err();
    assert_eq!(err.field(), Some("email"));
    assert!(transport.sent().is_empty());
}

// =============================================================
// protected requests
// =============================================================

#[tokio::test]
async fn protected_call_without_session_is_not_sent() {
    let transport = RecordingTransport::default();
    let (_, session) = signed_out();
    let err = api(&transport, &session).list_accounts().await.unwrap_err();
    assert_eq!(err, ApiError::NotAuthenticated);
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn list_accounts_attaches_bearer_and_keeps_order() {
    let body = r#"[{"id":2,"name":"Savings"},{"id":1,"name":"Checking","balance_minor":500}]"#;
    let transport = RecordingTransport::new(vec![HttpResponse::new(200, body)]);
    let (_, session) = signed_in("tok");
    let accounts = api(&transport, &session).list_accounts().await.unwrap();
    assert_eq!(accounts.iter().map(|a| a.id).collect::<Vec<_>>(), vec![2, 1]);
    assert_eq!(transport.sent()[0].header_value(HEADER_AUTHORIZATION), Some("Bearer tok"));
    assert_eq!(transport.sent()[0].url, "http://ledger.test/v1/accounts");
}

#[tokio::test]
async fn list_accounts_scopes_to_claimed_user() {
    let transport = RecordingTransport::new(vec![HttpResponse::new(200, "[]")]);
    let (_, session) = signed_in(TOKEN_USER_5);
    api(&transport, &session).list_accounts().await.unwrap();
    assert_eq!(transport.sent()[0].url, "http://ledger.test/v1/accounts?user_id=5");
}

#[tokio::test]
async fn token_is_read_at_send_time() {
    let transport = RecordingTransport::new(vec![HttpResponse::new(200, "[]")]);
    let (_, session) = signed_out();
    let client = api(&transport, &session);
    session.lock().unwrap().login("late").unwrap();
    client.list_accounts().await.unwrap();
    assert_eq!(transport.sent()[0].header_value(HEADER_AUTHORIZATION), Some("Bearer late"));
}

#[tokio::test]
async fn unauthorized_on_protected_call_logs_out() {
    let transport = RecordingTransport::new(vec![HttpResponse::new(401, "token expired")]);
    let (storage, session) = signed_in("expired");
    let err = api(&transport, &session).list_accounts().await.unwrap_err();
    assert!(err.is_authentication());
    assert_eq!(session.current_token(), None);
    assert_eq!(storage.peek(), None);
}

/// Signs in as a different user while the request is in flight, then
/// rejects the token the request carried.
struct ReloginTransport {
    session: SharedSession<MemoryTokenStorage>,
}

#[async_trait::async_trait(?Send)]
impl Transport for ReloginTransport {
    async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut store = self.session.lock().unwrap();
        store.logout();
        store.login("fresh").unwrap();
        Ok(HttpResponse::new(401, "invalid token"))
    }
}

#[tokio::test]
async fn late_unauthorized_keeps_newer_session() {
    let (storage, session) = signed_in("stale");
    let transport = ReloginTransport { session: session.clone() };
    let client = LedgerApi::new(transport, session.clone(), ApiConfig::new("http://ledger.test").unwrap());
    let err = client.list_accounts().await.unwrap_err();
    assert_eq!(err, ApiError::Unauthorized("invalid token".into()));
    assert_eq!(session.current_token().as_deref(), Some("fresh"));
    assert_eq!(storage.peek().as_deref(), Some("fresh"));
}

#[tokio::test]
async fn other_failures_keep_the_session() {
    let transport = RecordingTransport::new(vec![HttpResponse::new(500, "boom")]);
    let (_, session) = signed_in("tok");
    let err = api(&transport, &session).list_accounts().await.unwrap_err();
    assert_eq!(err, ApiError::Server { status: 500, body: "boom".into() });
    assert_eq!(session.current_token().as_deref(), Some("tok"));
}

#[tokio::test]
async fn transport_failure_is_network_error() {
    let transport = RecordingTransport::default();
    let (_, session) = signed_in("tok");
    let err = api(&transport, &session).list_accounts().await.unwrap_err();
    assert_eq!(err.kind(), crate::net::error::ErrorKind::Network);
    assert_eq!(session.current_token().as_deref(), Some("tok"));
}

#[tokio::test]
async fn malformed_success_body_is_decode_error() {
    let transport = RecordingTransport::new(vec![HttpResponse::new(200, "<html>")]);
    let (_, session) = signed_in("tok");
    let err = api(&transport, &session).list_accounts().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

// =============================================================
// accounts
// =============================================================

#[tokio::test]
async fn create_account_defaults_currency_and_reads_user_claim() {
    let transport = RecordingTransport::new(vec![HttpResponse::new(201, r#"{"id":4,"name":"Cash"}"#)]);
    let (_, session) = signed_in(TOKEN_USER_5);
    let account = api(&transport, &session).create_account(" Cash ", "").await.unwrap();
    assert_eq!(account.id, 4);

    let body: serde_json::Value = serde_json::from_str(transport.sent()[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body, serde_json::json!({"user_id": 5, "name": "Cash", "currency": "USD"}));
}

#[tokio::test]
async fn create_account_without_claim_omits_user_id() {
    let transport = RecordingTransport::new(vec![HttpResponse::new(201, r#"{"id":4,"name":"Cash"}"#)]);
    let (_, session) = signed_in("opaque");
    api(&transport, &session).create_account("Cash", "eur").await.unwrap();
    let body: serde_json::Value = serde_json::from_str(transport.sent()[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body, serde_json::json!({"name": "Cash", "currency": "EUR"}));
}

#[tokio::test]
async fn create_account_rejects_blank_name() {
    let transport = RecordingTransport::default();
    let (_, session) = signed_in("tok");
    let err = api(&transport, &session).create_account("  ", "USD").await.unwrap_err();
    assert_eq!(err.field(), Some("name"));
    assert!(transport.sent().is_empty());
}

// =============================================================
// transactions
// =============================================================

#[tokio::test]
async fn each_create_transaction_sends_a_distinct_key() {
    let tx = draft();
    let transport = RecordingTransport::new(vec![echoed(&tx), echoed(&tx), echoed(&tx)]);
    let (_, session) = signed_in("tok");
    let client = api(&transport, &session);
    for _ in 0..3 {
        client.create_transaction(&tx).await.unwrap();
    }

    let keys: Vec<String> = transport
        .sent()
        .iter()
        .map(|request| request.header_value(HEADER_IDEMPOTENCY_KEY).unwrap().to_owned())
        .collect();
    assert_eq!(keys.len(), 3);
    assert_ne!(keys[0], keys[1]);
    assert_ne!(keys[1], keys[2]);
    assert_ne!(keys[0], keys[2]);
    for key in &keys {
        assert!(uuid::Uuid::parse_str(key).is_ok(), "{key}");
    }
}

#[tokio::test]
async fn retry_with_key_reuses_it() {
    let tx = draft();
    let transport = RecordingTransport::new(vec![HttpResponse::new(503, "unavailable"), echoed(&tx)]);
    let (_, session) = signed_in("tok");
    let client = api(&transport, &session);
    let key = IdempotencyKey::generate();

    assert!(client.create_transaction_with_key(&tx, key).await.is_err());
    client.create_transaction_with_key(&tx, key).await.unwrap();

    let sent = transport.sent();
    assert_eq!(sent.len(), 2);
    let expected = key.to_string();
    assert_eq!(sent[0].header_value(HEADER_IDEMPOTENCY_KEY), Some(expected.as_str()));
    assert_eq!(sent[1].header_value(HEADER_IDEMPOTENCY_KEY), Some(expected.as_str()));
}

#[tokio::test]
async fn create_transaction_normalizes_body() {
    let tx = draft();
    let transport = RecordingTransport::new(vec![echoed(&tx)]);
    let (_, session) = signed_in("tok");
    let created = api(&transport, &session).create_transaction(&tx).await.unwrap();
    assert_eq!(created.id, Some(99));

    let sent = transport.sent();
    assert_eq!(sent[0].url, "http://ledger.test/v1/transactions");
    let body: serde_json::Value = serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["currency"], "USD");
    assert_eq!(body["note"], "groceries");
    assert_eq!(body["occurred_at"], "2024-03-05T12:00:00Z");
    assert_eq!(body["amount_minor"], -1250);
}

#[tokio::test]
async fn create_transaction_rejects_bad_account_id() {
    let transport = RecordingTransport::default();
    let (_, session) = signed_in("tok");
    let tx = NewTransaction { account_id: 0, ..draft() };
    let err = api(&transport, &session).create_transaction(&tx).await.unwrap_err();
    assert_eq!(err.field(), Some("account_id"));
    assert!(transport.sent().is_empty());
}

// =============================================================
// summaries and balances
// =============================================================

#[tokio::test]
async fn monthly_summary_queries_month_and_balances() {
    let body = r#"{"inflow":5000,"outflow":1250,"net":3750}"#;
    let transport = RecordingTransport::new(vec![HttpResponse::new(200, body)]);
    let (_, session) = signed_in("tok");
    let summary = api(&transport, &session).get_monthly_summary(7, march_2024()).await.unwrap();
    assert_eq!(summary.net, summary.inflow - summary.outflow);
    assert_eq!(transport.sent()[0].url, "http://ledger.test/v1/accounts/7/summary?month=2024-03");
}

#[tokio::test]
async fn monthly_summary_unknown_account_is_not_found() {
    let transport = RecordingTransport::new(vec![HttpResponse::new(404, "account not found")]);
    let (_, session) = signed_in("tok");
    let err = api(&transport, &session).get_monthly_summary(404, march_2024()).await.unwrap_err();
    assert_eq!(err, ApiError::NotFound("account not found".into()));
}

#[tokio::test]
async fn account_balance_decodes() {
    let body = r#"{"account_id":7,"as_of":"2024-03-31T00:00:00Z","balance_minor":-300}"#;
    let transport = RecordingTransport::new(vec![HttpResponse::new(200, body)]);
    let (_, session) = signed_in("tok");
    let balance = api(&transport, &session).get_account_balance(7).await.unwrap();
    assert_eq!(balance.balance_minor, -300);
    assert_eq!(transport.sent()[0].url, "http://ledger.test/v1/accounts/7/balance");
}

// =============================================================
// exports
// =============================================================

#[tokio::test]
async fn export_request_then_status() {
    let transport = RecordingTransport::new(vec![
        HttpResponse::new(202, r#"{"id":11,"status":"queued"}"#),
        HttpResponse::new(200, r#"{"id":11,"status":"running"}"#),
    ]);
    let (_, session) = signed_in("tok");
    let client = api(&transport, &session);

    let job = client.request_export(march_2024()).await.unwrap();
    let status = client.get_export_status(job.id).await.unwrap();
    assert_eq!(status.id, 11);
    assert!(!status.status.is_empty());
    assert!(!status.is_downloadable());

    let sent = transport.sent();
    assert_eq!(sent[0].method, Method::Post);
    assert_eq!(sent[0].url, "http://ledger.test/exports?month=2024-03");
    assert_eq!(sent[1].url, "http://ledger.test/exports/11/status");
}

#[tokio::test]
async fn unfamiliar_export_status_is_passed_through() {
    let body = r#"{"id":11,"status":"archived-cold","file_path":"/tmp/x.csv"}"#;
    let transport = RecordingTransport::new(vec![HttpResponse::new(200, body)]);
    let (_, session) = signed_in("tok");
    let job = api(&transport, &session).get_export_status(11).await.unwrap();
    assert_eq!(job.status, "archived-cold");
    assert!(job.is_downloadable());
}

#[tokio::test]
async fn download_export_returns_csv_text() {
    let csv = "id,amount_minor\n1,-1250\n";
    let transport = RecordingTransport::new(vec![HttpResponse::new(200, csv)]);
    let (_, session) = signed_in("tok");
    let text = api(&transport, &session).download_export(11).await.unwrap();
    assert_eq!(text, csv);
    assert_eq!(transport.sent()[0].header_value("accept"), Some("text/csv"));
}

#[tokio::test]
async fn download_before_ready_is_bad_request() {
    let transport = RecordingTransport::new(vec![HttpResponse::new(400, "export not ready")]);
    let (_, session) = signed_in("tok");
    let err = api(&transport, &session).download_export(11).await.unwrap_err();
    assert_eq!(err, ApiError::BadRequest("export not ready".into()));
}
