use lumen_common::diagnostics::{
    DIAGNOSTIC_MESSAGES, diagnostic_codes, diagnostic_messages, get_diagnostic_category,
    get_message_template,
};
use lumen_common::tracing_config::{LogFormat, install};
use tracing_subscriber::EnvFilter;
use lumen_common::{Diagnostic, DiagnosticCategory, Span, format_message};

#[test]
fn test_format_message_replaces_positional_args() {
    let text = format_message(
        diagnostic_messages::INHERITANCE_IS_CIRCULAR_IN_SUPERTYPE,
        &["A", "B and A", "B<A>"],
    );
    assert_eq!(
        text,
        "inheritance is circular: definition of A is recursive, involving B and A in supertype B<A>"
    );
}

#[test]
fn test_every_code_has_a_unique_template() {
    let mut codes: Vec<u32> = DIAGNOSTIC_MESSAGES.iter().map(|m| m.code).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), DIAGNOSTIC_MESSAGES.len());

    assert_eq!(
        get_message_template(diagnostic_codes::NOT_YET_DECLARED),
        Some("not yet declared: {0}")
    );
    assert_eq!(
        get_diagnostic_category(diagnostic_codes::NOT_DEFINITELY_UNASSIGNED),
        Some(DiagnosticCategory::Error)
    );
    assert_eq!(get_message_template(9999), None);
}

#[test]
fn test_error_at_uses_span_length() {
    let diag = Diagnostic::error_at(
        "unit.lm",
        Span::new(10, 14),
        "not definitely assigned: x".to_string(),
        diagnostic_codes::NOT_DEFINITELY_ASSIGNED,
    )
    .with_related("unit.lm".to_string(), 2, 1, "declared here".to_string());

    assert_eq!(diag.start, 10);
    assert_eq!(diag.length, 4);
    assert_eq!(diag.category, DiagnosticCategory::Error);
    assert_eq!(diag.related_information.len(), 1);
    assert_eq!(diag.related_information[0].category, DiagnosticCategory::Message);
}

#[test]
fn test_diagnostic_serializes_without_empty_related_info() {
    let diag = Diagnostic::error(
        "unit.lm".to_string(),
        0,
        1,
        "not yet declared: x".to_string(),
        diagnostic_codes::NOT_YET_DECLARED,
    );
    let json = serde_json::to_value(&diag).expect("diagnostic serializes");
    assert_eq!(json["code"], 3001);
    assert_eq!(json["category"], "Error");
    assert!(json.get("related_information").is_none());
}

#[test]
fn test_span_cover_ignores_empty_spans() {
    let a = Span::new(4, 8);
    assert_eq!(a.cover(Span::DUMMY), a);
    assert_eq!(Span::DUMMY.cover(a), a);
    assert_eq!(a.cover(Span::new(2, 5)), Span::new(2, 8));
    assert!(Span::new(0, 10).contains(a));
}

#[test]
fn test_log_format_parse() {
    assert_eq!(LogFormat::parse("tree"), LogFormat::Tree);
    assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
    assert_eq!(LogFormat::parse("anything"), LogFormat::Text);
}

#[test]
fn test_second_install_reports_existing_subscriber() {
    install(EnvFilter::new("off"), LogFormat::Text);
    assert!(!install(EnvFilter::new("off"), LogFormat::Json));
}
