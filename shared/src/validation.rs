//! Validation of route configuration
//!
//! Routes are loaded once at startup; a route that fails here is rejected
//! before any forecast is fetched for it.

use thiserror::Error;

use crate::models::{ReturnStop, Route, Waypoint};
use crate::types::HourWindow;

/// A configuration field that failed validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validate a route id for use in URLs (lowercase alphanumeric and dashes)
pub fn validate_route_id(id: &str) -> Result<(), ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::new("id", "Route id must not be empty"));
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(ValidationError::new(
            "id",
            "Route id must be lowercase alphanumeric or '-' only",
        ));
    }
    Ok(())
}

/// Validate an hour window: non-empty, every hour in 0-23
pub fn validate_hour_window(field: &str, window: &HourWindow) -> Result<(), ValidationError> {
    if window.is_empty() {
        return Err(ValidationError::new(field, "Hour window must not be empty"));
    }
    if let Some(hour) = window.hours().iter().find(|h| **h > 23) {
        return Err(ValidationError::new(
            field,
            format!("Hour {} is outside 0-23", hour),
        ));
    }
    Ok(())
}

/// Names are matched exactly everywhere, so padded names are rejected
/// rather than trimmed.
fn validate_waypoint<'a>(
    section: &str,
    waypoint: &'a Waypoint,
    names: &mut Vec<&'a str>,
) -> Result<(), ValidationError> {
    let name = waypoint.name.as_str();
    let field = format!("{}.name", section);
    if name.trim().is_empty() {
        return Err(ValidationError::new(field, "Waypoint name must not be empty"));
    }
    if name.trim() != name {
        return Err(ValidationError::new(
            field,
            format!("Waypoint name has surrounding whitespace: {:?}", name),
        ));
    }
    if names.contains(&name) {
        return Err(ValidationError::new(
            field,
            format!("Duplicate waypoint name: {}", name),
        ));
    }
    names.push(name);

    if waypoint.forecast_url.trim().is_empty() {
        return Err(ValidationError::new(
            format!("{}.forecast_url", section),
            format!("Waypoint {} has no forecast source", name),
        ));
    }
    for glare in &waypoint.sun_glare {
        validate_hour_window(&format!("{}.sun_glare.hours", section), &glare.hours)?;
    }
    Ok(())
}

/// Validate a whole route definition
pub fn validate_route(route: &Route) -> Result<(), ValidationError> {
    validate_route_id(&route.id)?;

    if route.outbound.is_empty() {
        return Err(ValidationError::new("outbound", "Route needs at least one waypoint"));
    }

    let mut names: Vec<&str> = Vec::new();
    for waypoint in &route.outbound {
        validate_waypoint("outbound", waypoint, &mut names)?;
    }
    for waypoint in route.return_only() {
        validate_waypoint("return_via", waypoint, &mut names)?;
    }

    for stop in &route.return_via {
        if let ReturnStop::Outbound(name) = stop {
            if !route.outbound.iter().any(|w| &w.name == name) {
                return Err(ValidationError::new(
                    "return_via",
                    format!("Unknown outbound waypoint: {}", name),
                ));
            }
        }
    }

    if let Some(reference) = &route.reference_waypoint {
        if route.waypoint(reference).is_none() {
            return Err(ValidationError::new(
                "reference_waypoint",
                format!("Unknown waypoint: {}", reference),
            ));
        }
    }

    validate_hour_window("outbound_hours", &route.outbound_hours)?;
    validate_hour_window("return_hours", &route.return_hours)?;

    let t = &route.thresholds;
    if t.black_ice_ceiling_f < t.freezing_f {
        return Err(ValidationError::new(
            "thresholds.black_ice_ceiling_f",
            "Black-ice ceiling must not be below the freezing point",
        ));
    }
    if t.windy_mph > t.severe_gust_mph {
        return Err(ValidationError::new(
            "thresholds.windy_mph",
            "Windy threshold must not exceed the severe gust threshold",
        ));
    }

    if let Some(check) = &route.late_return {
        if route.waypoint(&check.waypoint).is_none() {
            return Err(ValidationError::new(
                "late_return.waypoint",
                format!("Unknown waypoint: {}", check.waypoint),
            ));
        }
        validate_hour_window("late_return.hours", &check.hours)?;
    }

    Ok(())
}
