use fitform_core::models::AssessmentKey;
use fitform_core::store_keys;

#[test]
fn assessment_path_is_one_file_per_triple() {
    let key = AssessmentKey::new("trainer-1", "client-9", "par_q_plus");
    assert_eq!(
        store_keys::assessment(&key),
        "assessments/trainer-1/client-9/par_q_plus.json"
    );
}

#[test]
fn path_separators_in_identifiers_are_neutralized() {
    let key = AssessmentKey::new("../evil", "a/b", "par_q_plus");
    assert_eq!(
        store_keys::assessment(&key),
        "assessments/___evil/a_b/par_q_plus.json"
    );
}

#[test]
fn trainer_prefix_matches_assessment_paths() {
    let key = AssessmentKey::new("t1", "c1", "fitness_assessment");
    assert!(store_keys::assessment(&key).starts_with(&store_keys::trainer_prefix("t1")));
}
