//! Shared data model for the personal health journal core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tuning knobs shared by the matching and session layers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Result cap for a nearest-by-disease hospital search.
    pub nearest_limit: usize,
    /// Seconds to wait for geolocation before proceeding without coordinates.
    pub geolocation_wait_secs: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            nearest_limit: 3,
            geolocation_wait_secs: 5,
        }
    }
}

/// Four-level classification, ordered from calm to critical.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Normal,
    Warning,
    Urgent,
    Emergency,
}

impl RiskLevel {
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Normal => "normal",
            RiskLevel::Warning => "warning",
            RiskLevel::Urgent => "urgent",
            RiskLevel::Emergency => "emergency",
        }
    }
}

/// One daily check-in. Records are append-only; a correction is a new record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthRecord {
    pub id: String,
    pub recorded_at: DateTime<Utc>,
    /// Raw reading as entered; unit is resolved by the normalizer.
    pub temperature: Option<f64>,
    pub heart_rate: Option<f64>,
    pub systolic: Option<f64>,
    pub diastolic: Option<f64>,
    pub oxygen_level: Option<f64>,
    pub glucose_level: Option<f64>,
    pub urine: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub symptoms: Vec<String>,
}

impl HealthRecord {
    /// A record carrying only an id and timestamp, vitals unset.
    pub fn empty(id: impl Into<String>, recorded_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            recorded_at,
            temperature: None,
            heart_rate: None,
            systolic: None,
            diastolic: None,
            oxygen_level: None,
            glucose_level: None,
            urine: None,
            notes: None,
            symptoms: Vec::new(),
        }
    }
}

/// Newest first; the sort is stable, so check-ins sharing a timestamp keep
/// their insertion order.
pub fn sort_records_for_display(records: &mut [HealthRecord]) {
    records.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
}

/// Singleton per user, replaced wholesale on edit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub name: String,
    pub date_of_birth: Option<String>,
    pub blood_type: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub contact: Option<String>,
    pub emergency_contact: Option<String>,
    pub doctor_contact: Option<String>,
    #[serde(default)]
    pub medical_conditions: Vec<String>,
    #[serde(default)]
    pub medications: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
}

/// Measurement fields rejected by the plausibility checks during intake.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileValidation {
    pub invalid_height: bool,
    pub invalid_weight: bool,
}

impl ProfileValidation {
    pub fn is_clean(self) -> bool {
        !self.invalid_height && !self.invalid_weight
    }
}

const HEIGHT_RANGE_CM: (f64, f64) = (30.0, 275.0);
const WEIGHT_RANGE_KG: (f64, f64) = (1.0, 650.0);

impl UserProfile {
    /// Drops implausible measurements to "not recorded" and reports which
    /// fields were rejected. Tag lists pass through untouched, duplicates
    /// included.
    pub fn sanitize(mut self) -> (Self, ProfileValidation) {
        let mut validation = ProfileValidation::default();

        if let Some(height) = self.height_cm {
            if !in_range(height, HEIGHT_RANGE_CM) {
                self.height_cm = None;
                validation.invalid_height = true;
            }
        }

        if let Some(weight) = self.weight_kg {
            if !in_range(weight, WEIGHT_RANGE_KG) {
                self.weight_kg = None;
                validation.invalid_weight = true;
            }
        }

        (self, validation)
    }
}

fn in_range(value: f64, (low, high): (f64, f64)) -> bool {
    value.is_finite() && value >= low && value <= high
}

/// A latitude/longitude pair supplied by the location collaborator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Closed disease-type taxonomy; every hospital carries exactly one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiseaseCategory {
    Heart,
    Bone,
    Cancer,
    Neuro,
    Dental,
    Eye,
    Skin,
    Child,
    Women,
    General,
}

impl DiseaseCategory {
    pub fn label(self) -> &'static str {
        match self {
            DiseaseCategory::Heart => "heart",
            DiseaseCategory::Bone => "bone",
            DiseaseCategory::Cancer => "cancer",
            DiseaseCategory::Neuro => "neuro",
            DiseaseCategory::Dental => "dental",
            DiseaseCategory::Eye => "eye",
            DiseaseCategory::Skin => "skin",
            DiseaseCategory::Child => "child",
            DiseaseCategory::Women => "women",
            DiseaseCategory::General => "general",
        }
    }
}

/// A candidate facility after ingestion. `name` doubles as the dedup key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hospital {
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone: String,
    pub category: DiseaseCategory,
    pub specialties: Vec<String>,
    pub emergency: bool,
    /// Cache for the current session location only, never authoritative
    /// across a reload.
    #[serde(default)]
    pub distance_km: Option<f64>,
}

/// Derived from the latest record plus history; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub message: String,
    pub recommendations: Vec<String>,
}

/// Advisory output tied to one source record so staleness can be detected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Suggestion {
    pub record_id: String,
    pub summary: String,
    pub items: Vec<String>,
    pub reasons: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl Suggestion {
    /// Builds the advisory from raw rule output: items are deduplicated by
    /// exact text keeping the first occurrence, which also becomes the
    /// summary. Reasons are kept verbatim.
    pub fn new(record_id: String, items: Vec<String>, reasons: Vec<String>) -> Self {
        let mut deduped: Vec<String> = Vec::with_capacity(items.len());
        for item in items {
            if !deduped.contains(&item) {
                deduped.push(item);
            }
        }
        let summary = deduped.first().cloned().unwrap_or_default();

        Self {
            record_id,
            summary,
            items: deduped,
            reasons,
            generated_at: Utc::now(),
        }
    }
}

/// Errors surfaced at the parse and persistence boundaries. The scoring and
/// matching functions themselves are total and never return these.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("input is missing required data")]
    MissingData,
    #[error("could not parse input: {0}")]
    Parse(String),
    #[error("store operation failed: {0}")]
    Store(String),
    #[error("unexpected error: {0}")]
    Other(String),
}
