//! Framework-neutral WASM <-> JavaScript bridge.
//!
//! The rendering collaborator sends plain data in and receives structured
//! values back; no markup is produced here.

use journal_advice::{assess_risk, generate_suggestion};
use journal_core::{Coordinates, EngineConfig, HealthRecord, UserProfile};
use journal_places::{ingest_candidates, HospitalDirectory, HospitalFilter};
use serde::Deserialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[derive(Deserialize)]
struct JsEngineConfig {
    #[serde(default)]
    nearest_limit: Option<usize>,
    #[serde(default)]
    geolocation_wait_secs: Option<u32>,
}

impl From<JsEngineConfig> for EngineConfig {
    fn from(cfg: JsEngineConfig) -> Self {
        let mut base = EngineConfig::default();
        if let Some(limit) = cfg.nearest_limit {
            base.nearest_limit = limit;
        }
        if let Some(seconds) = cfg.geolocation_wait_secs {
            base.geolocation_wait_secs = seconds;
        }
        base
    }
}

fn install_panic_hook() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

fn resolve_config(config: Option<JsValue>) -> Result<EngineConfig, JsValue> {
    match config {
        Some(js_cfg) => {
            let cfg: JsEngineConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Could not read config: {err}")))?;
            Ok(EngineConfig::from(cfg))
        }
        None => Ok(EngineConfig::default()),
    }
}

fn resolve_location(latitude: Option<f64>, longitude: Option<f64>) -> Option<Coordinates> {
    match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Some(Coordinates {
            latitude,
            longitude,
        }),
        _ => None,
    }
}

fn directory_from(
    candidates: JsValue,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<HospitalDirectory, JsValue> {
    let raw = from_value::<serde_json::Value>(candidates)
        .map_err(|err| JsValue::from_str(&format!("Could not read hospital payload: {err}")))?;
    let hospitals =
        ingest_candidates(&raw).map_err(|err| JsValue::from_str(&err.to_string()))?;

    let mut directory = HospitalDirectory::new();
    directory.replace_hospitals(hospitals);
    directory.set_location(resolve_location(latitude, longitude));
    Ok(directory)
}

/// The engine defaults, exposed so the location collaborator can honor the
/// geolocation wait bound instead of hanging indefinitely.
#[wasm_bindgen]
pub fn default_config() -> Result<JsValue, JsValue> {
    install_panic_hook();

    to_value(&EngineConfig::default())
        .map_err(|err| JsValue::from_str(&format!("Could not serialize config: {err}")))
}

/// Risk classification for the latest check-in against prior history.
#[wasm_bindgen]
pub fn assess_health(record: JsValue, history: JsValue) -> Result<JsValue, JsValue> {
    install_panic_hook();

    let record: HealthRecord = from_value(record)
        .map_err(|err| JsValue::from_str(&format!("Could not read record: {err}")))?;
    let history: Vec<HealthRecord> = from_value(history)
        .map_err(|err| JsValue::from_str(&format!("Could not read history: {err}")))?;

    let assessment = assess_risk(&record, &history);
    to_value(&assessment)
        .map_err(|err| JsValue::from_str(&format!("Could not serialize assessment: {err}")))
}

/// Full advisory pipeline; regenerate whenever the latest record or the
/// profile changes.
#[wasm_bindgen]
pub fn advise(
    record: JsValue,
    history: JsValue,
    profile: Option<JsValue>,
) -> Result<JsValue, JsValue> {
    install_panic_hook();

    let record: HealthRecord = from_value(record)
        .map_err(|err| JsValue::from_str(&format!("Could not read record: {err}")))?;
    let history: Vec<HealthRecord> = from_value(history)
        .map_err(|err| JsValue::from_str(&format!("Could not read history: {err}")))?;
    let profile: Option<UserProfile> = match profile {
        Some(js_profile) => Some(
            from_value(js_profile)
                .map_err(|err| JsValue::from_str(&format!("Could not read profile: {err}")))?,
        ),
        None => None,
    };

    let suggestion = generate_suggestion(&record, &history, profile.as_ref());
    to_value(&suggestion)
        .map_err(|err| JsValue::from_str(&format!("Could not serialize suggestion: {err}")))
}

/// Nearest hospitals for a disease/specialty query.
#[wasm_bindgen]
pub fn rank_hospitals(
    candidates: JsValue,
    latitude: Option<f64>,
    longitude: Option<f64>,
    query: &str,
    config: Option<JsValue>,
) -> Result<JsValue, JsValue> {
    install_panic_hook();

    let directory = directory_from(candidates, latitude, longitude)?;
    let cfg = resolve_config(config)?;

    to_value(&directory.nearest_by_query(query, &cfg))
        .map_err(|err| JsValue::from_str(&format!("Could not serialize hospitals: {err}")))
}

/// Unbounded filter-panel listing.
#[wasm_bindgen]
pub fn list_hospitals(
    candidates: JsValue,
    latitude: Option<f64>,
    longitude: Option<f64>,
    emergency_only: bool,
    specialty: Option<String>,
) -> Result<JsValue, JsValue> {
    install_panic_hook();

    let directory = directory_from(candidates, latitude, longitude)?;
    let filter = HospitalFilter {
        emergency_only,
        specialty,
    };

    to_value(&directory.filtered(&filter))
        .map_err(|err| JsValue::from_str(&format!("Could not serialize hospitals: {err}")))
}
