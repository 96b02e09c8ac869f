//! Trip verdict models

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use super::alert::ActiveAlert;
use super::hazard::{HazardAssessment, HazardTag, SeverityTier};
use super::weather::HourlyObservation;
use crate::types::TravelDirection;

/// Forecast hours per waypoint name. A waypoint missing from the map had
/// no data available and is left out of aggregation.
pub type ForecastFeeds = BTreeMap<String, Vec<HourlyObservation>>;

/// Worst hour of one waypoint within one direction's travel window
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LegRisk {
    pub waypoint: String,
    pub direction: TravelDirection,
    pub max_score: u32,
    pub tier: SeverityTier,
    /// Any hour in the window at Elevated or worse
    pub flagged: bool,
    pub hours_considered: usize,
}

/// A hazard worth telling the driver about
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HazardReason {
    pub waypoint: String,
    pub tag: HazardTag,
    pub label: String,
    /// Score of the worst hour the tag appeared in
    pub score: u32,
    pub direction: TravelDirection,
    pub hour: u32,
}

/// Cold warning for a late return through an exposed waypoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LateReturnAdvisory {
    pub waypoint: String,
    pub hour: u32,
    pub temperature_f: i32,
    pub message: String,
}

/// Go/no-go outcome for one route on one date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TripVerdict {
    pub route_id: String,
    pub date: NaiveDate,
    pub overall_tier: SeverityTier,
    pub mission_status: String,
    /// Worst leg tier before alerts are merged in
    pub forecast_tier: SeverityTier,
    pub outbound_legs: Vec<LegRisk>,
    pub return_legs: Vec<LegRisk>,
    pub reasons: Vec<HazardReason>,
    pub alerts: Vec<ActiveAlert>,
    pub late_return: Option<LateReturnAdvisory>,
    /// Waypoints that had no forecast hours for the date
    pub missing_waypoints: Vec<String>,
}

impl TripVerdict {
    pub fn legs(&self, direction: TravelDirection) -> &[LegRisk] {
        match direction {
            TravelDirection::Outbound => &self.outbound_legs,
            TravelDirection::Return => &self.return_legs,
        }
    }

    /// Max tier for a waypoint within one direction's window
    pub fn leg_tier(&self, waypoint: &str, direction: TravelDirection) -> Option<SeverityTier> {
        self.legs(direction)
            .iter()
            .find(|l| l.waypoint == waypoint)
            .map(|l| l.tier)
    }
}

/// One row of the per-hour breakdown for a waypoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HourlyRow {
    pub waypoint: String,
    pub start_time: DateTime<FixedOffset>,
    pub hour: u32,
    /// Window the hour was evaluated for; `None` outside both windows
    pub window: Option<TravelDirection>,
    pub temperature_f: i32,
    pub wind: String,
    pub short_forecast: String,
    pub precipitation_probability: u32,
    pub assessment: HazardAssessment,
}
