//! WebAssembly module for Route Safety Commander
//!
//! Provides client-side computation for:
//! - Scoring a single forecast hour
//! - Wind chill
//! - Tier and mission-status labels
//! - Reading wind speeds from forecast text

use rust_decimal::Decimal;
use serde::Deserialize;
use shared::analysis;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str("route-safety-wasm ready"));
}

/// Hour evaluation request from the page
#[derive(Debug, Deserialize)]
struct HourRequest {
    observation: HourlyObservation,
    heading: Heading,
    #[serde(default)]
    crosswind_sensitive: bool,
    #[serde(default)]
    sun_glare: Vec<GlareExposure>,
    #[serde(default)]
    thresholds: HazardThresholds,
}

fn assess_request(request_json: &str) -> Result<HazardAssessment, String> {
    let request: HourRequest =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid hour JSON: {}", e))?;

    let mut waypoint = Waypoint::new(
        "browser",
        GpsCoordinates::new(Decimal::ZERO, Decimal::ZERO),
        String::new(),
    );
    waypoint.crosswind_sensitive = request.crosswind_sensitive;
    waypoint.sun_glare = request.sun_glare;

    Ok(analysis::evaluate_with(
        &request.observation,
        &waypoint,
        request.heading,
        &request.thresholds,
    ))
}

fn to_js_error(message: String) -> JsValue {
    web_sys::console::error_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

/// Score one forecast hour; returns the assessment as JSON
#[wasm_bindgen]
pub fn evaluate_hour(request_json: &str) -> Result<String, JsValue> {
    let assessment = assess_request(request_json).map_err(to_js_error)?;
    serde_json::to_string(&assessment).map_err(|e| to_js_error(e.to_string()))
}

/// Display labels of the hazards found in one forecast hour
#[wasm_bindgen]
pub fn hazard_labels(request_json: &str) -> Result<js_sys::Array, JsValue> {
    let assessment = assess_request(request_json).map_err(to_js_error)?;
    Ok(assessment
        .tags
        .iter()
        .map(|tag| JsValue::from_str(&tag.label()))
        .collect())
}

/// Wind chill in °F, or the air temperature outside the formula's range
#[wasm_bindgen]
pub fn wind_chill(temperature_f: f64, wind_mph: f64) -> f64 {
    analysis::calculate_wind_chill(temperature_f, wind_mph)
}

/// Tier name for a risk score
#[wasm_bindgen]
pub fn tier_for_score(score: u32) -> String {
    SeverityTier::from_score(score).to_string()
}

/// Dashboard wording for a risk score
#[wasm_bindgen]
pub fn mission_status_for_score(score: u32) -> String {
    SeverityTier::from_score(score).mission_status().to_string()
}

/// Leading number in a wind text such as "10 to 15 mph"
#[wasm_bindgen]
pub fn extract_wind_speed(text: &str) -> u32 {
    analysis::extract_magnitude(&FieldValue::text(text))
}
