use fitform_core::models::{FieldValue, FormState};

#[test]
fn number_passes_through() {
    assert_eq!(FieldValue::Number(72.5).as_number(), Some(72.5));
}

#[test]
fn nan_is_not_a_number() {
    assert_eq!(FieldValue::Number(f64::NAN).as_number(), None);
}

#[test]
fn text_parses_leading_float_prefix() {
    assert_eq!(FieldValue::text("72.5 kg").as_number(), Some(72.5));
    assert_eq!(FieldValue::text("  .5").as_number(), Some(0.5));
    assert_eq!(FieldValue::text("-3").as_number(), Some(-3.0));
    assert_eq!(FieldValue::text("1e3").as_number(), Some(1000.0));
}

#[test]
fn text_without_digits_does_not_parse() {
    assert_eq!(FieldValue::text("abc").as_number(), None);
    assert_eq!(FieldValue::text("").as_number(), None);
    assert_eq!(FieldValue::text(".").as_number(), None);
    assert_eq!(FieldValue::text("-").as_number(), None);
}

#[test]
fn dangling_exponent_is_dropped() {
    assert_eq!(FieldValue::text("3e").as_number(), Some(3.0));
    assert_eq!(FieldValue::text("3e+").as_number(), Some(3.0));
}

#[test]
fn bool_never_parses_as_number() {
    assert_eq!(FieldValue::Bool(true).as_number(), None);
}

#[test]
fn only_empty_string_is_unanswered() {
    assert!(!FieldValue::text("").is_answered());
    assert!(FieldValue::text("No").is_answered());
    assert!(FieldValue::Bool(false).is_answered());
    assert!(FieldValue::Number(0.0).is_answered());
}

#[test]
fn missing_field_is_unanswered() {
    let state = FormState::new();
    assert!(!state.is_answered("anything"));
}

#[test]
fn form_state_round_trips_as_flat_json_object() {
    let mut state = FormState::new();
    state.set("age", 40.0);
    state.set("chest_pain", "Yes");
    state.set("declaration_consent", true);

    let json = serde_json::to_string(&state).unwrap();
    assert_eq!(
        json,
        r#"{"age":40.0,"chest_pain":"Yes","declaration_consent":true}"#
    );

    let back: FormState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, state);
    assert_eq!(back.number("age"), Some(40.0));
    assert_eq!(back.text("chest_pain"), Some("Yes"));
}

#[test]
fn text_accessor_ignores_non_text_values() {
    let mut state = FormState::new();
    state.set("n", 5.0);
    assert_eq!(state.text("n"), None);
}
