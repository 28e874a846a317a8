use super::*;

#[test]
fn test_defaults_exempt_core_packages() {
    let options = CheckerOptions::default();
    assert_eq!(options.exempt_core_packages, vec!["lumen".to_string()]);
    assert!(options.check_definite_assignment);
    assert!(options.check_decidability);
}

#[test]
fn test_from_json_fills_missing_fields() {
    let options = CheckerOptions::from_json(r#"{ "checkDecidability": false }"#).unwrap();
    assert!(!options.check_decidability);
    assert!(options.check_definite_assignment);
    assert_eq!(options.exempt_core_packages, vec!["lumen".to_string()]);

    let options = CheckerOptions::from_json(r#"{ "exemptCorePackages": [] }"#).unwrap();
    assert!(options.exempt_core_packages.is_empty());
}

#[test]
fn test_from_json_reports_malformed_input() {
    let err = CheckerOptions::from_json(r#"{ "checkDecidability": "yes" }"#).unwrap_err();
    assert!(err.to_string().starts_with("invalid checker options:"));
}

#[test]
fn test_json_round_trip_preserves_options() {
    let options = CheckerOptions {
        exempt_core_packages: vec!["lumen.lang".to_string(), "vendor".to_string()],
        check_definite_assignment: false,
        check_decidability: true,
    };
    let json = options.to_json().unwrap();
    assert!(json.contains("exemptCorePackages"));
    assert_eq!(CheckerOptions::from_json(&json).unwrap(), options);
}
