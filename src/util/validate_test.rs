use super::*;
use time::macros::datetime;

fn draft() -> NewTransaction {
    NewTransaction {
        user_id: 1,
        account_id: 7,
        amount_minor: 2500,
        currency: "usd".to_owned(),
        occurred_at: datetime!(2024-03-01 09:00:00 UTC),
        note: Some("  salary ".to_owned()),
    }
}

// =============================================================
// registration / login
// =============================================================

#[test]
fn registration_rejects_malformed_email() {
    let err = registration("not-an-email", "secret123").unwrap_err();
    assert_eq!(err.field(), Some("email"));
}

#[test]
fn registration_rejects_short_password() {
    let err = registration("ada@example.com", "12345").unwrap_err();
    assert_eq!(err.field(), Some("password"));
}

#[test]
fn registration_accepts_minimum_password_and_trims_email() {
    let creds = registration("  ada@example.com ", "123456").unwrap();
    assert_eq!(creds.email, "ada@example.com");
    assert_eq!(creds.password, "123456");
}

#[test]
fn registration_counts_characters_not_bytes() {
    assert!(registration("ada@example.com", "ééééé").is_err());
    assert!(registration("ada@example.com", "éééééé").is_ok());
}

#[test]
fn login_requires_both_fields() {
    assert_eq!(login("   ", "pw").unwrap_err().field(), Some("email"));
    assert_eq!(login("ada@example.com", "").unwrap_err().field(), Some("password"));
    assert!(login("ada@example.com", "pw").is_ok());
}

// =============================================================
// account fields
// =============================================================

#[test]
fn account_name_trims_and_requires_value() {
    assert_eq!(account_name("  Checking "), Ok("Checking".to_owned()));
    assert_eq!(account_name(" ").unwrap_err().field(), Some("name"));
}

#[test]
fn currency_defaults_and_uppercases() {
    assert_eq!(currency(""), Ok("USD".to_owned()));
    assert_eq!(currency(" eur "), Ok("EUR".to_owned()));
}

#[test]
fn currency_rejects_non_iso_shapes() {
    assert!(currency("US").is_err());
    assert!(currency("USDX").is_err());
    assert!(currency("U5D").is_err());
}

#[test]
fn positive_id_rejects_zero() {
    assert!(positive_id("account_id", 0).is_err());
    assert!(positive_id("account_id", -3).is_err());
    assert_eq!(positive_id("account_id", 7), Ok(7));
}

#[test]
fn amount_minor_parses_signed_integers() {
    assert_eq!(amount_minor(" -1250 "), Ok(-1250));
    assert_eq!(amount_minor("0"), Ok(0));
    assert!(amount_minor("12.50").is_err());
    assert!(amount_minor("").is_err());
}

// =============================================================
// transaction
// =============================================================

#[test]
fn transaction_normalizes_currency_and_note() {
    let tx = transaction(&draft()).unwrap();
    assert_eq!(tx.currency, "USD");
    assert_eq!(tx.note.as_deref(), Some("salary"));
    assert_eq!(tx.amount_minor, 2500);
}

#[test]
fn transaction_drops_blank_note() {
    let tx = transaction(&NewTransaction { note: Some("   ".to_owned()), ..draft() }).unwrap();
    assert_eq!(tx.note, None);
}

#[test]
fn transaction_rejects_missing_account() {
    let err = transaction(&NewTransaction { account_id: 0, ..draft() }).unwrap_err();
    assert_eq!(err.field(), Some("account_id"));
}

// =============================================================
// occurred_at
// =============================================================

#[test]
fn occurred_at_accepts_rfc3339() {
    assert_eq!(occurred_at("2024-03-05T12:00:00+02:00"), Ok(datetime!(2024-03-05 10:00 UTC)));
}

#[test]
fn occurred_at_reads_datetime_local_as_utc() {
    assert_eq!(occurred_at("2024-03-05T12:30"), Ok(datetime!(2024-03-05 12:30 UTC)));
    assert_eq!(occurred_at("2024-03-05T12:30:15"), Ok(datetime!(2024-03-05 12:30:15 UTC)));
}

#[test]
fn occurred_at_rejects_other_shapes() {
    for raw in ["", "2024-03-05", "yesterday", "2024-13-05T12:00"] {
        assert_eq!(occurred_at(raw).unwrap_err().field(), Some("occurred_at"), "{raw}");
    }
}
