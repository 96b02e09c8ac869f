//! Hazard assessment models

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordinal severity bucket derived from a risk score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum SeverityTier {
    #[default]
    Clear,
    Caution,
    Elevated,
    Severe,
}

impl SeverityTier {
    /// Fixed thresholds: 0 Clear, 1 Caution, 2 Elevated, 3+ Severe
    pub fn from_score(score: u32) -> Self {
        match score {
            0 => SeverityTier::Clear,
            1 => SeverityTier::Caution,
            2 => SeverityTier::Elevated,
            _ => SeverityTier::Severe,
        }
    }

    /// Trip dashboard wording
    pub fn mission_status(&self) -> &'static str {
        match self {
            SeverityTier::Clear => "GO",
            SeverityTier::Caution => "CAUTION",
            SeverityTier::Elevated => "HIGH RISK",
            SeverityTier::Severe => "NO-GO",
        }
    }

    /// Whether a leg at this tier should be called out to the driver
    pub fn is_flagged(&self) -> bool {
        *self >= SeverityTier::Elevated
    }
}

impl fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SeverityTier::Clear => "Clear",
            SeverityTier::Caution => "Caution",
            SeverityTier::Elevated => "Elevated",
            SeverityTier::Severe => "Severe",
        };
        f.write_str(label)
    }
}

/// A single detected hazard
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum HazardTag {
    IcyRoads,
    Slush,
    FreezingRain,
    PossibleBlackIce,
    HeavySnow,
    /// Effective wind in mph
    Gusts(u32),
    /// Effective wind in mph
    Windy(u32),
    Breezy,
    Crosswind,
    SunGlare,
    /// Wind chill in °F
    WindChill(i32),
}

/// Value-free identity of a tag, used to deduplicate reasons
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum HazardKind {
    IcyRoads,
    Slush,
    FreezingRain,
    PossibleBlackIce,
    HeavySnow,
    Gusts,
    Windy,
    Breezy,
    Crosswind,
    SunGlare,
    WindChill,
}

impl HazardTag {
    pub fn kind(&self) -> HazardKind {
        match self {
            HazardTag::IcyRoads => HazardKind::IcyRoads,
            HazardTag::Slush => HazardKind::Slush,
            HazardTag::FreezingRain => HazardKind::FreezingRain,
            HazardTag::PossibleBlackIce => HazardKind::PossibleBlackIce,
            HazardTag::HeavySnow => HazardKind::HeavySnow,
            HazardTag::Gusts(_) => HazardKind::Gusts,
            HazardTag::Windy(_) => HazardKind::Windy,
            HazardTag::Breezy => HazardKind::Breezy,
            HazardTag::Crosswind => HazardKind::Crosswind,
            HazardTag::SunGlare => HazardKind::SunGlare,
            HazardTag::WindChill(_) => HazardKind::WindChill,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for HazardTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HazardTag::IcyRoads => f.write_str("icy roads"),
            HazardTag::Slush => f.write_str("slush"),
            HazardTag::FreezingRain => f.write_str("freezing rain"),
            HazardTag::PossibleBlackIce => f.write_str("possible black ice"),
            HazardTag::HeavySnow => f.write_str("heavy snow"),
            HazardTag::Gusts(mph) => write!(f, "gusts {} mph", mph),
            HazardTag::Windy(mph) => write!(f, "windy ({})", mph),
            HazardTag::Breezy => f.write_str("breezy"),
            HazardTag::Crosswind => f.write_str("crosswind"),
            HazardTag::SunGlare => f.write_str("sun glare"),
            HazardTag::WindChill(deg) => write!(f, "chill {}°", deg),
        }
    }
}

/// Result of evaluating one forecast hour for one waypoint and direction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct HazardAssessment {
    pub risk_score: u32,
    pub severity_tier: SeverityTier,
    /// Distinct tags in rule order
    pub tags: Vec<HazardTag>,
}

impl HazardAssessment {
    pub fn from_parts(risk_score: u32, tags: Vec<HazardTag>) -> Self {
        Self {
            risk_score,
            severity_tier: SeverityTier::from_score(risk_score),
            tags,
        }
    }
}
