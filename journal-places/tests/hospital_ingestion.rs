use std::fs;

use journal_core::DiseaseCategory;
use journal_places::ingest_candidates;
use serde_json::{json, Value};

fn fixture() -> Value {
    let data = fs::read_to_string(format!(
        "{}/tests/data/hospital_candidates.json",
        env!("CARGO_MANIFEST_DIR")
    ))
    .expect("Could not read candidate fixture");
    serde_json::from_str(&data).expect("Fixture is invalid JSON")
}

#[test]
fn candidates_are_extracted_permissively() {
    let hospitals = ingest_candidates(&fixture()).expect("ingestion failed");

    // Five entries, one duplicate name dropped.
    assert_eq!(hospitals.len(), 4);

    let heart = &hospitals[0];
    assert_eq!(heart.name, "City Heart Institute");
    assert_eq!(heart.category, DiseaseCategory::Heart);
    assert_eq!(heart.phone, "028-3930-1111");
    assert!(heart.emergency);
    assert_eq!(heart.distance_km, None);

    // Detection reads name/description/tags, not the specialty list, so the
    // "Heart Surgery" specialty does not reclassify this one.
    let riverside = &hospitals[1];
    assert_eq!(riverside.phone, "N/A");
    assert_eq!(riverside.category, DiseaseCategory::General);
    assert!(!riverside.emergency);

    let unnamed = &hospitals[2];
    assert_eq!(unnamed.name, "Unnamed");
    assert_eq!(unnamed.category, DiseaseCategory::Child);
    assert_eq!(unnamed.specialties, vec!["General"]);

    let dental = &hospitals[3];
    assert_eq!(dental.category, DiseaseCategory::Dental);
    assert_eq!(dental.latitude, None);
    assert_eq!(dental.longitude, Some(106.62));
}

#[test]
fn duplicate_names_keep_the_first_occurrence() {
    let hospitals = ingest_candidates(&fixture()).expect("ingestion failed");
    let riverside: Vec<_> = hospitals
        .iter()
        .filter(|h| h.name == "Riverside General")
        .collect();

    assert_eq!(riverside.len(), 1);
    assert_eq!(riverside[0].latitude, Some(10.78));
}

#[test]
fn non_list_payload_is_the_only_hard_failure() {
    assert!(ingest_candidates(&json!({"results": []})).is_err());
    assert!(ingest_candidates(&json!([])).expect("empty list is fine").is_empty());
}

#[test]
fn blank_fields_fall_back_to_placeholders() {
    let payload = json!([{ "name": "   ", "phone": "" }]);
    let hospitals = ingest_candidates(&payload).expect("ingestion failed");

    assert_eq!(hospitals[0].name, "Unnamed");
    assert_eq!(hospitals[0].phone, "N/A");
    assert_eq!(hospitals[0].category, DiseaseCategory::General);
    assert_eq!(hospitals[0].specialties, vec!["General"]);
}
