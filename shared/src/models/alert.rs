//! Official hazard alert models

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use super::hazard::SeverityTier;

/// An alert as reported by the hazard service, before classification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawAlert {
    pub event: String,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub onset: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub ends: Option<DateTime<FixedOffset>>,
}

impl RawAlert {
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            headline: None,
            onset: None,
            ends: None,
        }
    }
}

/// Severity class of an official alert
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AlertClass {
    WatchOrAdvisory,
    Warning,
}

impl AlertClass {
    /// Score contribution to the trip verdict
    pub fn score(&self) -> u32 {
        match self {
            AlertClass::Warning => 3,
            AlertClass::WatchOrAdvisory => 2,
        }
    }

    /// Lowest tier the trip verdict may take while this alert is active
    pub fn tier_floor(&self) -> SeverityTier {
        SeverityTier::from_score(self.score())
    }
}

/// A classified alert in force at a waypoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActiveAlert {
    pub waypoint: String,
    pub event: String,
    pub class: AlertClass,
    #[serde(default)]
    pub onset: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub ends: Option<DateTime<FixedOffset>>,
}

impl ActiveAlert {
    /// Whether the alert is in force at any time on `date`
    ///
    /// Bounds are compared as local calendar dates; a missing bound is open.
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        let after_onset = self.onset.map(|o| o.date_naive() <= date).unwrap_or(true);
        let before_end = self.ends.map(|e| date <= e.date_naive()).unwrap_or(true);
        after_onset && before_end
    }
}
