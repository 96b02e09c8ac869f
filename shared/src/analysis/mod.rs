//! Route risk analysis: hour scoring, trip aggregation and alert handling

pub mod alerts;
pub mod evaluator;
pub mod extract;
pub mod trip;
pub mod wind_chill;

use chrono::NaiveDate;
use thiserror::Error;

pub use alerts::{classify_alerts, classify_event, is_relevant_event};
pub use evaluator::{evaluate, evaluate_with};
pub use extract::{extract_magnitude, extract_signed};
pub use trip::{assess_trip, available_dates, hourly_rows, DEFAULT_MAX_REASONS, DEFAULT_PLANNING_DAYS};
pub use wind_chill::calculate_wind_chill;

/// Conditions under which no verdict can be produced
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("No forecast data is available for any waypoint")]
    NoForecastData,

    #[error("Forecast contains no usable timestamps")]
    NoParseableDates,

    #[error("No waypoint has forecast hours on {0}")]
    DateNotForecast(NaiveDate),
}
