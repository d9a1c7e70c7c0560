use chrono::{TimeZone, Utc};
use journal_advice::{generate_suggestion, EMERGENCY_SUGGESTIONS};
use journal_core::{HealthRecord, Suggestion, UserProfile};

fn record(id: &str, hour: u32) -> HealthRecord {
    HealthRecord::empty(id, Utc.with_ymd_and_hms(2026, 2, 11, hour, 0, 0).unwrap())
}

fn profile_with_lists(medications: &[&str], allergies: &[&str]) -> UserProfile {
    UserProfile {
        name: "Linh".to_string(),
        medications: medications.iter().map(|s| s.to_string()).collect(),
        allergies: allergies.iter().map(|s| s.to_string()).collect(),
        ..UserProfile::default()
    }
}

#[test]
fn chest_pain_short_circuits_everything_else() {
    let mut current = record("rec-9", 8);
    current.temperature = Some(104.5);
    current.symptoms = vec!["chest pain".to_string(), "headache".to_string()];
    let profile = profile_with_lists(&["Metformin"], &["Penicillin"]);

    let suggestion = generate_suggestion(&current, &[], Some(&profile));

    assert_eq!(suggestion.items.len(), 2);
    assert_eq!(suggestion.items[0], EMERGENCY_SUGGESTIONS[0]);
    assert_eq!(suggestion.items[1], EMERGENCY_SUGGESTIONS[1]);
    assert_eq!(suggestion.summary, EMERGENCY_SUGGESTIONS[0]);
    assert_eq!(suggestion.record_id, "rec-9");
}

#[test]
fn breathlessness_also_short_circuits() {
    let mut current = record("rec-9", 8);
    current.symptoms = vec!["breathlessness".to_string()];

    let suggestion = generate_suggestion(&current, &[], None);
    assert_eq!(suggestion.items.len(), 2);
    assert_eq!(suggestion.items[0], EMERGENCY_SUGGESTIONS[0]);
}

#[test]
fn celsius_fever_gets_the_fever_message_not_the_low_grade_one() {
    let mut current = record("rec-3", 8);
    current.temperature = Some(39.0); // 102.2 F

    let suggestion = generate_suggestion(&current, &[], None);

    assert!(suggestion.items.iter().any(|item| item.contains("Fever detected")));
    assert!(!suggestion.items.iter().any(|item| item.contains("Low-grade")));
}

#[test]
fn low_grade_band_is_distinct() {
    let mut current = record("rec-3", 8);
    current.temperature = Some(37.5); // 99.5 F

    let suggestion = generate_suggestion(&current, &[], None);
    assert!(suggestion.items.iter().any(|item| item.contains("Low-grade")));
}

#[test]
fn very_low_reading_suggests_remeasuring() {
    let mut current = record("rec-3", 8);
    current.temperature = Some(34.0); // 93.2 F

    let suggestion = generate_suggestion(&current, &[], None);
    assert!(suggestion
        .items
        .iter()
        .any(|item| item.contains("unusually low")));
}

#[test]
fn reported_fever_without_measurement_asks_for_one() {
    let mut current = record("rec-3", 8);
    current.symptoms = vec!["fever".to_string()];

    let suggestion = generate_suggestion(&current, &[], None);
    assert!(suggestion
        .items
        .iter()
        .any(|item| item.contains("take a temperature measurement")));
}

#[test]
fn moderate_pain_gets_guidance() {
    let mut current = record("rec-3", 8);
    current.symptoms = vec!["headache".to_string(), "fatigue".to_string()];

    let suggestion = generate_suggestion(&current, &[], None);
    assert!(suggestion.items.iter().any(|item| item.contains("Moderate pain")));
}

#[test]
fn rising_fever_appends_a_trend_item() {
    let mut previous = record("rec-1", 8);
    previous.temperature = Some(98.6);
    let mut current = record("rec-2", 20);
    current.temperature = Some(100.4);

    let suggestion = generate_suggestion(&current, &[previous], None);
    assert!(suggestion
        .items
        .iter()
        .any(|item| item.contains("fever is trending upward")));
}

#[test]
fn profile_lists_are_named_in_the_reminders() {
    let current = record("rec-3", 8);
    let profile = profile_with_lists(&["Metformin", "Lisinopril"], &["Penicillin"]);

    let suggestion = generate_suggestion(&current, &[], Some(&profile));

    assert!(suggestion
        .items
        .iter()
        .any(|item| item.contains("Metformin, Lisinopril")));
    assert!(suggestion.items.iter().any(|item| item.contains("Penicillin")));
}

#[test]
fn empty_checkin_falls_back_to_a_single_generic_item() {
    let current = record("rec-3", 8);

    let suggestion = generate_suggestion(&current, &[], None);

    assert_eq!(suggestion.items.len(), 1);
    assert!(suggestion.items[0].contains("No urgent issues"));
    assert_eq!(suggestion.summary, suggestion.items[0]);
}

#[test]
fn regeneration_is_idempotent_apart_from_the_timestamp() {
    let mut previous = record("rec-1", 8);
    previous.temperature = Some(99.0);
    let mut current = record("rec-2", 20);
    current.temperature = Some(38.5);
    current.symptoms = vec!["headache".to_string(), "fatigue".to_string()];
    let profile = profile_with_lists(&["Ibuprofen"], &[]);

    let history = vec![previous];
    let first = generate_suggestion(&current, &history, Some(&profile));
    let second = generate_suggestion(&current, &history, Some(&profile));

    assert_eq!(first.record_id, second.record_id);
    assert_eq!(first.summary, second.summary);
    assert_eq!(first.items, second.items);
    assert_eq!(first.reasons, second.reasons);
}

#[test]
fn items_deduplicate_keeping_first_occurrence() {
    let suggestion = Suggestion::new(
        "rec-7".to_string(),
        vec![
            "Rest today.".to_string(),
            "Drink water.".to_string(),
            "Rest today.".to_string(),
        ],
        vec!["rule a".to_string(), "rule a".to_string()],
    );

    assert_eq!(suggestion.items, vec!["Rest today.", "Drink water."]);
    assert_eq!(suggestion.summary, "Rest today.");
    // Reasons are kept verbatim, duplicates included.
    assert_eq!(suggestion.reasons.len(), 2);
}
