//! Hospital candidate ingestion, specialty detection, and distance ranking.
//!
//! Candidate data arrives as an opaque JSON list from the network
//! collaborator; extraction is permissive, degrading field by field instead
//! of rejecting an entry.

use journal_core::{Coordinates, DiseaseCategory, EngineConfig, Hospital, JournalError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine great-circle distance in kilometers. Any missing or NaN
/// coordinate yields `f64::INFINITY`, a sentinel that sorts after every
/// finite distance and never collapses into "zero kilometers away".
pub fn distance_km(
    lat1: Option<f64>,
    lon1: Option<f64>,
    lat2: Option<f64>,
    lon2: Option<f64>,
) -> f64 {
    let (Some(lat1), Some(lon1), Some(lat2), Some(lon2)) = (lat1, lon1, lat2, lon2) else {
        return f64::INFINITY;
    };
    if !(lat1.is_finite() && lon1.is_finite() && lat2.is_finite() && lon2.is_finite()) {
        return f64::INFINITY;
    }

    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Meters below one kilometer, kilometers to two decimals above, and an
/// explicit marker for the infinity sentinel.
pub fn format_distance(km: f64) -> String {
    if km.is_nan() || km.is_infinite() {
        return "Unknown".to_string();
    }
    if km < 1.0 {
        format!("{:.0} m", (km * 1000.0).round())
    } else {
        format!("{km:.2} km")
    }
}

/// Ordered keyword table for disease-type detection; earlier rows win.
const CATEGORY_KEYWORDS: [(DiseaseCategory, &[&str]); 9] = [
    (DiseaseCategory::Heart, &["heart", "cardiac", "cardio"]),
    (DiseaseCategory::Bone, &["bone", "ortho", "fracture", "joint"]),
    (DiseaseCategory::Cancer, &["cancer", "onco", "tumor", "tumour"]),
    (DiseaseCategory::Neuro, &["neuro", "brain", "stroke"]),
    (DiseaseCategory::Dental, &["dental", "tooth", "teeth"]),
    (DiseaseCategory::Eye, &["eye", "vision", "ophthal", "optic"]),
    (DiseaseCategory::Skin, &["skin", "derma"]),
    (
        DiseaseCategory::Child,
        &["child", "pediatric", "paediatric", "kids"],
    ),
    (
        DiseaseCategory::Women,
        &["women", "maternity", "gynec", "obstetric"],
    ),
];

/// Classifies free text into exactly one category, first matching keyword
/// wins. Runs once per hospital at ingestion, never per query.
pub fn detect_category(text: &str) -> DiseaseCategory {
    let haystack = text.to_lowercase();
    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|keyword| haystack.contains(keyword)) {
            return category;
        }
    }
    DiseaseCategory::General
}

/// Parses the raw candidate payload. Entries are deduplicated by name,
/// keeping the first occurrence; a payload that is not a list is the only
/// hard failure.
pub fn ingest_candidates(raw: &Value) -> Result<Vec<Hospital>, JournalError> {
    let entries = raw
        .as_array()
        .ok_or_else(|| JournalError::Parse("hospital payload is not a list".to_string()))?;

    let mut hospitals: Vec<Hospital> = Vec::new();
    let mut duplicates = 0usize;
    for entry in entries {
        let candidate = candidate_from_value(entry);
        if hospitals.iter().any(|existing| existing.name == candidate.name) {
            duplicates += 1;
            continue;
        }
        hospitals.push(candidate);
    }

    log::debug!(
        "Ingested {} hospital candidates, dropped {duplicates} duplicate names",
        hospitals.len()
    );
    Ok(hospitals)
}

fn candidate_from_value(entry: &Value) -> Hospital {
    let name = extract_text(entry, &["name"]).unwrap_or_else(|| "Unnamed".to_string());
    let phone = extract_text(entry, &["phone", "contact"]).unwrap_or_else(|| "N/A".to_string());
    let latitude = extract_coordinate(entry, &["latitude", "lat"]);
    let longitude = extract_coordinate(entry, &["longitude", "lng", "lon"]);

    let mut specialties = extract_text_list(entry, "specialties");
    if specialties.is_empty() {
        specialties.push("General".to_string());
    }

    let tags = extract_text_list(entry, "tags");
    let description = extract_text(entry, &["description"]).unwrap_or_default();
    let detection_text = format!("{name} {description} {}", tags.join(" "));

    Hospital {
        category: detect_category(&detection_text),
        name,
        latitude,
        longitude,
        phone,
        specialties,
        emergency: entry
            .get("emergency")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        distance_km: None,
    }
}

fn extract_text(entry: &Value, fields: &[&str]) -> Option<String> {
    for field in fields {
        if let Some(text) = entry.get(*field).and_then(Value::as_str) {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}

fn extract_coordinate(entry: &Value, fields: &[&str]) -> Option<f64> {
    for field in fields {
        if let Some(value) = entry.get(*field).and_then(Value::as_f64) {
            if value.is_finite() {
                return Some(value);
            }
        }
    }
    None
}

fn extract_text_list(entry: &Value, field: &str) -> Vec<String> {
    entry
        .get(field)
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Browse-mode filters from the UI filter panel.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HospitalFilter {
    pub emergency_only: bool,
    /// Exact specialty to require; `None` or "all" keeps every specialty.
    pub specialty: Option<String>,
}

impl HospitalFilter {
    fn accepts(&self, hospital: &Hospital) -> bool {
        if self.emergency_only && !hospital.emergency {
            return false;
        }
        match self.specialty.as_deref() {
            None => true,
            Some(wanted) if wanted.eq_ignore_ascii_case("all") => true,
            Some(wanted) => hospital
                .specialties
                .iter()
                .any(|specialty| specialty.eq_ignore_ascii_case(wanted)),
        }
    }
}

/// Session context owning the hospital cache and the current location.
/// An explicit value passed around instead of ambient globals, so the
/// matching functions stay pure and independently testable. Last writer
/// wins; there is a single logical actor driving one session.
#[derive(Debug, Clone, Default)]
pub struct HospitalDirectory {
    hospitals: Vec<Hospital>,
    location: Option<Coordinates>,
}

impl HospitalDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swaps in a freshly ingested list. On fetch failure callers simply do
    /// not call this, keeping the prior cached list in use. Incoming cached
    /// distances survive only when no location is known; a known location
    /// owns the cache.
    pub fn replace_hospitals(&mut self, hospitals: Vec<Hospital>) {
        self.hospitals = hospitals;
        if self.location.is_some() {
            self.refresh_distances();
        }
    }

    pub fn hospitals(&self) -> &[Hospital] {
        &self.hospitals
    }

    pub fn location(&self) -> Option<Coordinates> {
        self.location
    }

    /// Updates the session location and recomputes every cached distance;
    /// the cache is only meaningful for the location it was computed from.
    pub fn set_location(&mut self, location: Option<Coordinates>) {
        self.location = location;
        self.refresh_distances();
    }

    /// "Nearest by disease type": a trimmed, case-insensitive query matches a
    /// hospital when it equals the detected category, or is a substring of a
    /// specialty tag or of the name. Results are sorted by ascending distance
    /// (unknown distances last) and truncated to `config.nearest_limit`.
    pub fn nearest_by_query(&self, query: &str, config: &EngineConfig) -> Vec<Hospital> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<Hospital> = self
            .hospitals
            .iter()
            .filter(|hospital| hospital_matches_query(hospital, &needle))
            .cloned()
            .collect();

        self.rank_by_distance(&mut matches);
        matches.truncate(config.nearest_limit);
        matches
    }

    /// Filter-panel listing: same distance ordering, full set, no cap.
    pub fn filtered(&self, filter: &HospitalFilter) -> Vec<Hospital> {
        let mut results: Vec<Hospital> = self
            .hospitals
            .iter()
            .filter(|hospital| filter.accepts(hospital))
            .cloned()
            .collect();

        self.rank_by_distance(&mut results);
        results
    }

    fn refresh_distances(&mut self) {
        for hospital in &mut self.hospitals {
            hospital.distance_km = self
                .location
                .map(|location| hospital_distance(&location, hospital));
        }
    }

    /// Missing or invalid cached distances are recomputed before sorting.
    fn rank_by_distance(&self, hospitals: &mut Vec<Hospital>) {
        for hospital in hospitals.iter_mut() {
            let stale = !matches!(hospital.distance_km, Some(d) if !d.is_nan());
            if stale {
                hospital.distance_km = Some(match self.location {
                    Some(location) => hospital_distance(&location, hospital),
                    None => f64::INFINITY,
                });
            }
        }

        hospitals.sort_by(|a, b| sort_distance(a).total_cmp(&sort_distance(b)));
    }
}

fn hospital_distance(location: &Coordinates, hospital: &Hospital) -> f64 {
    distance_km(
        Some(location.latitude),
        Some(location.longitude),
        hospital.latitude,
        hospital.longitude,
    )
}

fn sort_distance(hospital: &Hospital) -> f64 {
    match hospital.distance_km {
        Some(d) if !d.is_nan() => d,
        _ => f64::INFINITY,
    }
}

fn hospital_matches_query(hospital: &Hospital, needle: &str) -> bool {
    hospital.category.label() == needle
        || hospital
            .specialties
            .iter()
            .any(|specialty| specialty.to_lowercase().contains(needle))
        || hospital.name.to_lowercase().contains(needle)
}
