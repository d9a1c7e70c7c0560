//! Deterministic risk and advisory engine over journal check-ins.
//!
//! Every function here is pure and total: absent vitals are skipped, not
//! errors, and identical inputs always produce identical output (the
//! suggestion generation timestamp aside).

use journal_core::{HealthRecord, RiskAssessment, RiskLevel, Suggestion, UserProfile};

/// Raw readings at or below this are taken as Celsius, above as Fahrenheit.
/// A genuine Fahrenheit reading this low cannot be told apart from Celsius;
/// the boundary is fixed and callers must not reinterpret it.
pub const CELSIUS_CUTOFF: f64 = 45.0;

/// Symptom labels that demand immediate escalation wherever they appear.
const EMERGENCY_SYMPTOMS: [&str; 3] = ["chest pain", "shortness of breath", "breathlessness"];

/// The fixed advisory pair returned whenever an emergency symptom is present.
pub const EMERGENCY_SUGGESTIONS: [&str; 2] = [
    "Call your local emergency number or have someone take you to emergency care immediately.",
    "Do not wait for further measurements; chest pain or breathlessness needs urgent evaluation.",
];

/// Converts a raw reading to Fahrenheit, rounded to one decimal. Non-finite
/// input yields `None`, which downstream checks treat as "no measurement",
/// never as zero.
pub fn normalize_temperature(raw: f64) -> Option<f64> {
    if !raw.is_finite() {
        return None;
    }
    let fahrenheit = if raw <= CELSIUS_CUTOFF {
        raw * 9.0 / 5.0 + 32.0
    } else {
        raw
    };
    Some((fahrenheit * 10.0).round() / 10.0)
}

/// Form inputs arrive as text; trims and parses before normalizing.
pub fn normalize_temperature_text(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().and_then(normalize_temperature)
}

/// The record's temperature in normalized Fahrenheit, when one was entered.
pub fn record_temperature_f(record: &HealthRecord) -> Option<f64> {
    record.temperature.and_then(normalize_temperature)
}

/// Coarse 0..=9 fever score from fixed Fahrenheit bands. Falls back to 5 when
/// the user reported "fever" without a measurement.
pub fn fever_severity(record: &HealthRecord) -> u8 {
    match record_temperature_f(record) {
        Some(f) if f < 98.0 => 0,
        Some(f) if f < 99.5 => 2,
        Some(f) if f < 100.4 => 4,
        Some(f) if f < 102.0 => 7,
        Some(_) => 9,
        None if has_symptom(record, "fever") => 5,
        None => 0,
    }
}

/// Additive 0..=9 pain score: chest pain 6, headache 3, fatigue 1, capped.
/// Intentionally coarse; symptoms outside this short list contribute nothing.
pub fn pain_severity(record: &HealthRecord) -> u8 {
    let mut score: u8 = 0;
    if has_symptom(record, "chest pain") {
        score += 6;
    }
    if has_symptom(record, "headache") {
        score += 3;
    }
    if has_symptom(record, "fatigue") {
        score += 1;
    }
    score.min(9)
}

/// Classifies the current check-in against the prior history (chronological,
/// most recent first). The final level is the maximum severity reached across
/// all checks; the message depends only on that level and the accumulated
/// issue labels.
pub fn assess_risk(current: &HealthRecord, history: &[HealthRecord]) -> RiskAssessment {
    let mut level = RiskLevel::Normal;
    let mut issues: Vec<&'static str> = Vec::new();
    let mut recommendations: Vec<String> = Vec::new();

    if has_any_symptom(current, &EMERGENCY_SYMPTOMS) {
        level = level.max(RiskLevel::Emergency);
        issues.push("emergency symptoms");
        recommendations
            .push("Call emergency services or get to the nearest emergency department.".to_string());
    }

    if let Some(fahrenheit) = record_temperature_f(current) {
        if !(95.0..=100.4).contains(&fahrenheit) {
            issues.push("abnormal temperature");
            // First matching range wins. The >120 and <50 fault branches are
            // shadowed by the >103 and <92 checks in front of them; do not
            // reorder without product sign-off (see DESIGN.md).
            if fahrenheit > 103.0 {
                level = level.max(RiskLevel::Urgent);
                recommendations.push("High fever: seek medical care today.".to_string());
            } else if fahrenheit > 120.0 {
                level = RiskLevel::Emergency;
                issues.push("sensor fault");
                recommendations.push(
                    "Reading is above any survivable range; check the thermometer and re-measure."
                        .to_string(),
                );
            } else if fahrenheit < 92.0 {
                level = level.max(RiskLevel::Urgent);
                recommendations
                    .push("Possible hypothermia: warm up and seek medical care.".to_string());
            } else if fahrenheit < 50.0 {
                level = RiskLevel::Emergency;
                issues.push("sensor fault");
                recommendations.push(
                    "Reading is below any survivable range; check the thermometer and re-measure."
                        .to_string(),
                );
            } else {
                level = level.max(RiskLevel::Warning);
                recommendations
                    .push("Mild temperature deviation: hydrate and keep monitoring.".to_string());
            }
        }
    }

    if worsened_since_previous(current, history) {
        level = level.max(RiskLevel::Warning);
        issues.push("worsening trend");
        recommendations.push(
            "Readings are trending worse than your previous check-in; re-check within a few hours."
                .to_string(),
        );
    }

    if level == RiskLevel::Normal {
        recommendations
            .push("All readings look ordinary; continue monitoring daily.".to_string());
    }

    RiskAssessment {
        level,
        message: risk_message(level, &issues),
        recommendations,
    }
}

/// Richer advisory pipeline. An emergency symptom short-circuits everything
/// else; otherwise rules run in a fixed order and the output is deduplicated
/// by [`Suggestion::new`]. Stateless: callers regenerate whenever the latest
/// record id or the profile changes.
pub fn generate_suggestion(
    current: &HealthRecord,
    history: &[HealthRecord],
    profile: Option<&UserProfile>,
) -> Suggestion {
    if has_any_symptom(current, &EMERGENCY_SYMPTOMS) {
        return Suggestion::new(
            current.id.clone(),
            EMERGENCY_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
            vec!["emergency symptom reported".to_string()],
        );
    }

    let mut items: Vec<String> = Vec::new();
    let mut reasons: Vec<String> = Vec::new();

    match record_temperature_f(current) {
        Some(f) if f >= 104.0 => {
            items.push("Very high fever: seek urgent care now.".to_string());
            reasons.push(format!("temperature {f:.1} F at or above 104.0 F"));
        }
        Some(f) if f >= 100.4 => {
            items.push(
                "Fever detected: rest, take fluids, and use an antipyretic if appropriate."
                    .to_string(),
            );
            reasons.push(format!("temperature {f:.1} F at or above 100.4 F"));
        }
        Some(f) if f >= 99.5 => {
            items.push("Low-grade fever: monitor and re-measure in a few hours.".to_string());
            reasons.push(format!("temperature {f:.1} F at or above 99.5 F"));
        }
        Some(f) if f < 95.0 => {
            items.push(
                "Reading is unusually low: re-measure, the thermometer may be at fault."
                    .to_string(),
            );
            reasons.push(format!("temperature {f:.1} F below 95.0 F"));
        }
        Some(_) => {}
        None if has_symptom(current, "fever") => {
            items.push(
                "You reported fever: take a temperature measurement to confirm.".to_string(),
            );
            reasons.push("fever symptom without a measurement".to_string());
        }
        None => {}
    }

    let pain = pain_severity(current);
    if pain >= 8 {
        items.push("Severe pain score: arrange a clinical assessment today.".to_string());
        reasons.push(format!("pain severity {pain}/9"));
    } else if pain >= 4 {
        items.push(
            "Moderate pain: limit exertion, use your usual relief, and see a doctor if it persists."
                .to_string(),
        );
        reasons.push(format!("pain severity {pain}/9"));
    }

    if let Some(previous) = history.first() {
        let fever_now = fever_severity(current);
        if fever_now > fever_severity(previous) && fever_now >= 4 {
            items.push(
                "Your fever is trending upward compared to the last check-in.".to_string(),
            );
            reasons.push("fever severity rose since the previous record".to_string());
        }
        if pain > pain_severity(previous) && pain >= 4 {
            items
                .push("Your pain is trending upward compared to the last check-in.".to_string());
            reasons.push("pain severity rose since the previous record".to_string());
        }
    }

    if let Some(profile) = profile {
        if !profile.medications.is_empty() {
            items.push(format!(
                "Continue your current medications as prescribed: {}.",
                profile.medications.join(", ")
            ));
            reasons.push("active medication list on profile".to_string());
        }
        if !profile.allergies.is_empty() {
            items.push(format!(
                "Tell any treating clinician about your allergies: {}.",
                profile.allergies.join(", ")
            ));
            reasons.push("allergy list on profile".to_string());
        }
    }

    if items.is_empty() {
        items.push(
            "No urgent issues detected; continue your normal monitoring routine.".to_string(),
        );
        reasons.push("no rule produced an advisory".to_string());
    }

    Suggestion::new(current.id.clone(), items, reasons)
}

fn risk_message(level: RiskLevel, issues: &[&'static str]) -> String {
    let headline = match level {
        RiskLevel::Normal => "No concerning findings in this check-in.",
        RiskLevel::Warning => "Some readings deserve closer monitoring.",
        RiskLevel::Urgent => "This check-in needs medical attention soon.",
        RiskLevel::Emergency => "This check-in indicates a possible emergency.",
    };

    if issues.is_empty() {
        headline.to_string()
    } else {
        format!("{headline} Flagged: {}.", issues.join(", "))
    }
}

fn worsened_since_previous(current: &HealthRecord, history: &[HealthRecord]) -> bool {
    let Some(previous) = history.first() else {
        return false;
    };

    let fever_now = fever_severity(current);
    let pain_now = pain_severity(current);

    (fever_now > fever_severity(previous) && fever_now >= 4)
        || (pain_now > pain_severity(previous) && pain_now >= 4)
}

fn has_symptom(record: &HealthRecord, label: &str) -> bool {
    record
        .symptoms
        .iter()
        .any(|symptom| symptom.trim().eq_ignore_ascii_case(label))
}

fn has_any_symptom(record: &HealthRecord, labels: &[&str]) -> bool {
    labels.iter().any(|label| has_symptom(record, label))
}
