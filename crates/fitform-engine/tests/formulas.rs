use fitform_core::models::FormState;
use fitform_engine::evaluate;
use fitform_templates::Formula;

fn state(pairs: &[(&str, f64)]) -> FormState {
    let mut state = FormState::new();
    for (id, value) in pairs {
        state.set(*id, *value);
    }
    state
}

#[test]
fn bmi_rounds_to_one_decimal() {
    let state = state(&[("weight", 70.0), ("height", 175.0)]);
    // 70 / 1.75² = 22.857…
    assert_eq!(evaluate(Formula::BodyMassIndex, &state), Some(22.9));
}

#[test]
fn bmi_accepts_text_inputs() {
    let mut state = FormState::new();
    state.set("weight", "70");
    state.set("height", "175");
    assert_eq!(evaluate(Formula::BodyMassIndex, &state), Some(22.9));
}

#[test]
fn bmi_requires_both_inputs() {
    assert_eq!(
        evaluate(Formula::BodyMassIndex, &state(&[("weight", 70.0)])),
        None
    );
    assert_eq!(
        evaluate(Formula::BodyMassIndex, &state(&[("height", 175.0)])),
        None
    );
}

#[test]
fn bmi_zero_height_is_not_calculable() {
    let state = state(&[("weight", 70.0), ("height", 0.0)]);
    assert_eq!(evaluate(Formula::BodyMassIndex, &state), None);
}

#[test]
fn waist_hip_ratio_averages_both_readings() {
    let state = state(&[
        ("waist_1", 80.0),
        ("waist_2", 82.0),
        ("hips_1", 100.0),
        ("hips_2", 100.0),
    ]);
    // avg(80, 82) / avg(100, 100) = 81 / 100
    assert_eq!(evaluate(Formula::WaistHipRatio, &state), Some(0.81));
}

#[test]
fn waist_hip_ratio_defaults_missing_readings_to_zero() {
    let state = state(&[("waist_1", 80.0), ("hips_1", 100.0), ("hips_2", 100.0)]);
    // avg(80, 0) / avg(100, 100) = 40 / 100
    assert_eq!(evaluate(Formula::WaistHipRatio, &state), Some(0.4));
}

#[test]
fn waist_hip_ratio_needs_a_nonzero_denominator() {
    let state = state(&[("waist_1", 80.0), ("waist_2", 82.0)]);
    assert_eq!(evaluate(Formula::WaistHipRatio, &state), None);
}

#[test]
fn waist_hip_ratio_rounds_to_two_decimals() {
    let state = state(&[
        ("waist_1", 77.0),
        ("waist_2", 78.0),
        ("hips_1", 93.0),
        ("hips_2", 94.0),
    ]);
    // 77.5 / 93.5 = 0.82887…
    assert_eq!(evaluate(Formula::WaistHipRatio, &state), Some(0.83));
}

#[test]
fn max_hr_is_220_minus_age() {
    assert_eq!(
        evaluate(Formula::MaxHeartRate, &state(&[("age", 30.0)])),
        Some(190.0)
    );
}

#[test]
fn max_hr_parses_text_age() {
    let mut state = FormState::new();
    state.set("age", "40");
    assert_eq!(evaluate(Formula::MaxHeartRate, &state), Some(180.0));
}

#[test]
fn missing_input_yields_none_not_a_panic() {
    assert_eq!(evaluate(Formula::MaxHeartRate, &FormState::new()), None);
}

#[test]
fn unparseable_input_yields_none() {
    let mut state = FormState::new();
    state.set("age", "forty");
    assert_eq!(evaluate(Formula::MaxHeartRate, &state), None);
}

#[test]
fn boolean_input_yields_none() {
    let mut state = FormState::new();
    state.set("age", true);
    assert_eq!(evaluate(Formula::MaxHeartRate, &state), None);
}
