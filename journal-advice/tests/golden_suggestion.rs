use std::fs;

use journal_advice::generate_suggestion;
use journal_core::{HealthRecord, UserProfile};
use serde_json::Value;

fn fixture_path(name: &str) -> String {
    format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn fever_checkin_matches_golden() {
    let record: HealthRecord = serde_json::from_str(
        &fs::read_to_string(fixture_path("fever_checkin.json")).expect("Could not read fixture"),
    )
    .expect("Fixture record is invalid");

    let profile: UserProfile = serde_json::from_str(
        &fs::read_to_string(fixture_path("fever_profile.json")).expect("Could not read fixture"),
    )
    .expect("Fixture profile is invalid");

    let suggestion = generate_suggestion(&record, &[], Some(&profile));

    let mut actual = serde_json::to_value(suggestion).expect("Could not serialize suggestion");
    normalize_dynamic_fields(&mut actual);

    let expected = fs::read_to_string(fixture_path("fever_suggestion.json"))
        .expect("Could not read golden suggestion");
    let mut expected_value: Value = serde_json::from_str(&expected).expect("Golden is invalid");
    normalize_dynamic_fields(&mut expected_value);

    assert_eq!(actual, expected_value);
}

fn normalize_dynamic_fields(value: &mut Value) {
    if let Some(obj) = value.as_object_mut() {
        if obj.contains_key("generated_at") {
            obj.insert(
                "generated_at".to_string(),
                Value::String("__DYNAMIC_TIMESTAMP__".to_string()),
            );
        }
    }
}
