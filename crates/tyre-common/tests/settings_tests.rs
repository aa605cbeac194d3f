use super::*;

#[test]
fn test_settings_default_is_permissive() {
    let settings = CompilationSettings::default();
    assert!(!settings.no_implicit_any);
}

#[test]
fn test_settings_from_camel_case_json() {
    let settings = CompilationSettings::from_json(r#"{"noImplicitAny": true}"#)
        .expect("valid settings json");
    assert!(settings.no_implicit_any);
}

#[test]
fn test_settings_missing_fields_default() {
    let settings = CompilationSettings::from_json("{}").expect("empty object is valid");
    assert_eq!(settings, CompilationSettings::default());
}

#[test]
fn test_settings_reject_malformed_json() {
    assert!(CompilationSettings::from_json("{noImplicitAny: }").is_err());
}

#[test]
fn test_with_no_implicit_any_builder() {
    let settings = CompilationSettings::default().with_no_implicit_any(true);
    assert!(settings.no_implicit_any);
}
