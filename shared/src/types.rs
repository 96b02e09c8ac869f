//! Common types used across the platform

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// GPS coordinates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: Decimal,
    pub longitude: Decimal,
}

impl GpsCoordinates {
    pub fn new(latitude: Decimal, longitude: Decimal) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format as the `lat,lon` point string used by alert lookups
    pub fn as_point(&self) -> String {
        format!("{},{}", self.latitude.normalize(), self.longitude.normalize())
    }
}

/// 16-point compass rose
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum CompassPoint {
    #[default]
    N,
    Nne,
    Ne,
    Ene,
    E,
    Ese,
    Se,
    Sse,
    S,
    Ssw,
    Sw,
    Wsw,
    W,
    Wnw,
    Nw,
    Nnw,
}

impl CompassPoint {
    pub const ALL: [CompassPoint; 16] = [
        CompassPoint::N,
        CompassPoint::Nne,
        CompassPoint::Ne,
        CompassPoint::Ene,
        CompassPoint::E,
        CompassPoint::Ese,
        CompassPoint::Se,
        CompassPoint::Sse,
        CompassPoint::S,
        CompassPoint::Ssw,
        CompassPoint::Sw,
        CompassPoint::Wsw,
        CompassPoint::W,
        CompassPoint::Wnw,
        CompassPoint::Nw,
        CompassPoint::Nnw,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            CompassPoint::N => "N",
            CompassPoint::Nne => "NNE",
            CompassPoint::Ne => "NE",
            CompassPoint::Ene => "ENE",
            CompassPoint::E => "E",
            CompassPoint::Ese => "ESE",
            CompassPoint::Se => "SE",
            CompassPoint::Sse => "SSE",
            CompassPoint::S => "S",
            CompassPoint::Ssw => "SSW",
            CompassPoint::Sw => "SW",
            CompassPoint::Wsw => "WSW",
            CompassPoint::W => "W",
            CompassPoint::Wnw => "WNW",
            CompassPoint::Nw => "NW",
            CompassPoint::Nnw => "NNW",
        }
    }

    /// Parse a compass code, falling back to north for anything unrecognised
    pub fn parse_or_north(text: Option<&str>) -> Self {
        text.and_then(|t| t.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for CompassPoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        CompassPoint::ALL
            .iter()
            .copied()
            .find(|p| p.code() == code)
            .ok_or_else(|| format!("Unknown compass point: {}", s))
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Direction of travel over the ground
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Heading {
    Eastbound,
    Westbound,
    Northbound,
    Southbound,
}

impl Heading {
    pub fn opposite(&self) -> Heading {
        match self {
            Heading::Eastbound => Heading::Westbound,
            Heading::Westbound => Heading::Eastbound,
            Heading::Northbound => Heading::Southbound,
            Heading::Southbound => Heading::Northbound,
        }
    }

    pub fn orientation(&self) -> RouteOrientation {
        match self {
            Heading::Eastbound | Heading::Westbound => RouteOrientation::EastWest,
            Heading::Northbound | Heading::Southbound => RouteOrientation::NorthSouth,
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Heading::Eastbound => "Eastbound",
            Heading::Westbound => "Westbound",
            Heading::Northbound => "Northbound",
            Heading::Southbound => "Southbound",
        };
        f.write_str(label)
    }
}

/// Axis a route corridor runs along
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RouteOrientation {
    EastWest,
    NorthSouth,
}

impl RouteOrientation {
    /// Wind directions that blow across the corridor
    pub fn crosswind_axis(&self) -> &'static [CompassPoint] {
        match self {
            RouteOrientation::EastWest => &[
                CompassPoint::N,
                CompassPoint::Nne,
                CompassPoint::Nnw,
                CompassPoint::S,
                CompassPoint::Sse,
                CompassPoint::Ssw,
            ],
            RouteOrientation::NorthSouth => &[
                CompassPoint::E,
                CompassPoint::Ene,
                CompassPoint::Ese,
                CompassPoint::W,
                CompassPoint::Wnw,
                CompassPoint::Wsw,
            ],
        }
    }

    pub fn is_crosswind(&self, direction: CompassPoint) -> bool {
        self.crosswind_axis().contains(&direction)
    }
}

/// Which leg of the round trip is being driven
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum TravelDirection {
    Outbound,
    Return,
}

impl TravelDirection {
    pub const BOTH: [TravelDirection; 2] = [TravelDirection::Outbound, TravelDirection::Return];
}

impl fmt::Display for TravelDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TravelDirection::Outbound => f.write_str("outbound"),
            TravelDirection::Return => f.write_str("return"),
        }
    }
}

/// Set of local hours-of-day (0-23)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct HourWindow(Vec<u32>);

impl HourWindow {
    pub fn new(hours: impl IntoIterator<Item = u32>) -> Self {
        let mut hours: Vec<u32> = hours.into_iter().collect();
        hours.sort_unstable();
        hours.dedup();
        Self(hours)
    }

    /// Inclusive range of hours, e.g. `HourWindow::span(7, 10)` is 7,8,9,10
    pub fn span(first: u32, last: u32) -> Self {
        Self::new(first..=last)
    }

    pub fn contains(&self, hour: u32) -> bool {
        self.0.contains(&hour)
    }

    pub fn hours(&self) -> &[u32] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
