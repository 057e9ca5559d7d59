use super::*;

#[test]
fn format_minor_places_decimal_point() {
    assert_eq!(format_minor(0), "0.00");
    assert_eq!(format_minor(5), "0.05");
    assert_eq!(format_minor(123_456), "1234.56");
}

#[test]
fn format_minor_keeps_sign_for_outflows() {
    assert_eq!(format_minor(-1250), "-12.50");
    assert_eq!(format_minor(-7), "-0.07");
}

#[test]
fn format_minor_handles_extremes() {
    assert_eq!(format_minor(i64::MIN), "-92233720368547758.08");
}

#[test]
fn format_amount_appends_currency() {
    assert_eq!(format_amount(1000, Some("EUR")), "10.00 EUR");
    assert_eq!(format_amount(1000, Some("")), "10.00");
    assert_eq!(format_amount(1000, None), "10.00");
}
