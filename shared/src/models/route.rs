//! Route and waypoint configuration

use serde::{Deserialize, Serialize};

use crate::types::{GpsCoordinates, Heading, HourWindow, TravelDirection};

/// A forecast point along a route (a mountain pass, a valley town)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Waypoint {
    /// Unique key within a route
    pub name: String,
    pub coordinates: GpsCoordinates,
    /// Hourly forecast endpoint for this point
    pub forecast_url: String,
    #[serde(default)]
    pub crosswind_sensitive: bool,
    /// Hours during which low sun is in the driver's eyes, by heading.
    /// Empty means the defaults from [`default_glare_hours`] apply.
    #[serde(default)]
    pub sun_glare: Vec<GlareExposure>,
}

impl Waypoint {
    pub fn new(name: impl Into<String>, coordinates: GpsCoordinates, forecast_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            coordinates,
            forecast_url: forecast_url.into(),
            crosswind_sensitive: false,
            sun_glare: Vec::new(),
        }
    }

    pub fn with_crosswind(mut self) -> Self {
        self.crosswind_sensitive = true;
        self
    }

    /// Glare hours for travel on `heading` at this waypoint
    pub fn glare_hours(&self, heading: Heading) -> HourWindow {
        if self.sun_glare.is_empty() {
            return default_glare_hours(heading);
        }
        self.sun_glare
            .iter()
            .find(|g| g.heading == heading)
            .map(|g| g.hours.clone())
            .unwrap_or_default()
    }
}

/// Glare exposure for one heading
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GlareExposure {
    pub heading: Heading,
    pub hours: HourWindow,
}

/// Low-sun hours by heading for a waypoint with no explicit exposure
pub fn default_glare_hours(heading: Heading) -> HourWindow {
    match heading {
        Heading::Eastbound => HourWindow::span(7, 10),
        Heading::Westbound => HourWindow::span(15, 18),
        Heading::Southbound => HourWindow::span(11, 14),
        Heading::Northbound => HourWindow::default(),
    }
}

/// Tunable scoring thresholds, per route
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HazardThresholds {
    /// At or below this, precipitation freezes on the road (°F)
    pub freezing_f: i32,
    /// Upper bound of the black-ice band above freezing (°F)
    pub black_ice_ceiling_f: i32,
    /// Effective wind at which gusts score +2 (mph)
    pub severe_gust_mph: u32,
    /// Effective wind at which conditions score +1 (mph)
    pub windy_mph: u32,
    /// "Breezy" wording is only tagged below this wind (mph)
    pub breezy_ceiling_mph: u32,
    /// Crosswind scores only when effective wind exceeds this (mph)
    pub crosswind_mph: u32,
    /// Wind chill below this scores +1 (°F)
    pub wind_chill_f: i32,
    /// Extra points for "heavy snow" wording; 0 disables the rule
    pub heavy_snow_points: u32,
}

impl Default for HazardThresholds {
    fn default() -> Self {
        Self {
            freezing_f: 32,
            black_ice_ceiling_f: 37,
            severe_gust_mph: 45,
            windy_mph: 30,
            breezy_ceiling_mph: 20,
            crosswind_mph: 25,
            wind_chill_f: 0,
            heavy_snow_points: 0,
        }
    }
}

/// Cold check on a late return through an exposed waypoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LateReturnCheck {
    pub waypoint: String,
    #[serde(default = "default_late_return_hours")]
    pub hours: HourWindow,
    #[serde(default = "default_late_return_threshold")]
    pub threshold_f: i32,
}

fn default_late_return_hours() -> HourWindow {
    HourWindow::span(16, 20)
}

fn default_late_return_threshold() -> i32 {
    20
}

/// One stop on the return leg
///
/// Either an outbound waypoint referenced by name, or a waypoint that is
/// only driven on the way back (a different pass, a detour).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ReturnStop {
    Outbound(String),
    Waypoint(Waypoint),
}

impl ReturnStop {
    pub fn name(&self) -> &str {
        match self {
            ReturnStop::Outbound(name) => name,
            ReturnStop::Waypoint(waypoint) => &waypoint.name,
        }
    }
}

/// A round trip: outbound waypoints, return waypoints and travel windows
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Route {
    /// Stable identifier used in URLs
    pub id: String,
    pub name: String,
    pub outbound_heading: Heading,
    /// Waypoints in outbound driving order
    pub outbound: Vec<Waypoint>,
    /// Return stops in driving order; empty means the reverse of `outbound`
    #[serde(default)]
    pub return_via: Vec<ReturnStop>,
    pub outbound_hours: HourWindow,
    pub return_hours: HourWindow,
    /// Waypoint whose forecast decides the plannable dates; defaults to
    /// the first outbound waypoint
    #[serde(default)]
    pub reference_waypoint: Option<String>,
    #[serde(default)]
    pub thresholds: HazardThresholds,
    #[serde(default)]
    pub late_return: Option<LateReturnCheck>,
}

impl Route {
    pub fn heading(&self, direction: TravelDirection) -> Heading {
        match direction {
            TravelDirection::Outbound => self.outbound_heading,
            TravelDirection::Return => self.outbound_heading.opposite(),
        }
    }

    pub fn hours(&self, direction: TravelDirection) -> &HourWindow {
        match direction {
            TravelDirection::Outbound => &self.outbound_hours,
            TravelDirection::Return => &self.return_hours,
        }
    }

    pub fn waypoint(&self, name: &str) -> Option<&Waypoint> {
        self.all_waypoints().into_iter().find(|w| w.name == name)
    }

    /// Waypoints driven only on the return leg
    pub fn return_only(&self) -> impl Iterator<Item = &Waypoint> {
        self.return_via.iter().filter_map(|stop| match stop {
            ReturnStop::Waypoint(waypoint) => Some(waypoint),
            ReturnStop::Outbound(_) => None,
        })
    }

    /// Every waypoint on the route: outbound order, then return-only stops
    pub fn all_waypoints(&self) -> Vec<&Waypoint> {
        self.outbound.iter().chain(self.return_only()).collect()
    }

    /// Waypoints in driving order for `direction`
    pub fn waypoints(&self, direction: TravelDirection) -> Vec<&Waypoint> {
        match direction {
            TravelDirection::Outbound => self.outbound.iter().collect(),
            TravelDirection::Return if self.return_via.is_empty() => {
                self.outbound.iter().rev().collect()
            }
            TravelDirection::Return => self
                .return_via
                .iter()
                .filter_map(|stop| match stop {
                    ReturnStop::Outbound(name) => self.outbound.iter().find(|w| &w.name == name),
                    ReturnStop::Waypoint(waypoint) => Some(waypoint),
                })
                .collect(),
        }
    }

    /// Directions in which the named waypoint is driven
    pub fn directions(&self, name: &str) -> Vec<TravelDirection> {
        TravelDirection::BOTH
            .into_iter()
            .filter(|d| self.waypoints(*d).iter().any(|w| w.name == name))
            .collect()
    }

    pub fn reference_waypoint(&self) -> Option<&Waypoint> {
        match &self.reference_waypoint {
            Some(name) => self.waypoint(name),
            None => self.outbound.first(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords() -> GpsCoordinates {
        GpsCoordinates::new("47.0".parse().unwrap(), "-114.0".parse().unwrap())
    }

    fn route() -> Route {
        Route {
            id: "i90".into(),
            name: "I-90 corridor".into(),
            outbound_heading: Heading::Eastbound,
            outbound: vec![
                Waypoint::new("A", coords(), "https://example.test/a"),
                Waypoint::new("B", coords(), "https://example.test/b"),
                Waypoint::new("C", coords(), "https://example.test/c").with_crosswind(),
            ],
            return_via: Vec::new(),
            outbound_hours: HourWindow::span(7, 12),
            return_hours: HourWindow::span(13, 18),
            reference_waypoint: None,
            thresholds: HazardThresholds::default(),
            late_return: None,
        }
    }

    #[test]
    fn test_return_defaults_to_reverse() {
        let r = route();
        let names: Vec<_> = r.waypoints(TravelDirection::Return).iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, ["C", "B", "A"]);
    }

    #[test]
    fn test_distinct_return_list() {
        let mut r = route();
        r.return_via = vec![ReturnStop::Outbound("C".into()), ReturnStop::Outbound("A".into())];
        let names: Vec<_> = r.waypoints(TravelDirection::Return).iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, ["C", "A"]);
        assert_eq!(r.directions("B"), vec![TravelDirection::Outbound]);
    }

    #[test]
    fn test_return_only_waypoint() {
        let mut r = route();
        r.return_via = vec![
            ReturnStop::Outbound("C".into()),
            ReturnStop::Waypoint(Waypoint::new("D", coords(), "https://example.test/d")),
            ReturnStop::Outbound("A".into()),
        ];
        let names: Vec<_> = r.waypoints(TravelDirection::Return).iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, ["C", "D", "A"]);

        let all: Vec<_> = r.all_waypoints().iter().map(|w| w.name.as_str()).collect();
        assert_eq!(all, ["A", "B", "C", "D"]);
        assert_eq!(r.waypoint("D").unwrap().forecast_url, "https://example.test/d");
        assert_eq!(r.directions("D"), vec![TravelDirection::Return]);
        assert_eq!(r.directions("A"), TravelDirection::BOTH.to_vec());
    }

    #[test]
    fn test_return_stop_shapes() {
        let stops: Vec<ReturnStop> = serde_json::from_str(
            r#"["C", { "name": "D", "coordinates": { "latitude": "46.6", "longitude": "-112.3" },
                      "forecast_url": "https://example.test/d" }]"#,
        )
        .unwrap();
        assert_eq!(stops[0], ReturnStop::Outbound("C".into()));
        assert_eq!(stops[1].name(), "D");
    }

    #[test]
    fn test_heading_per_direction() {
        let r = route();
        assert_eq!(r.heading(TravelDirection::Outbound), Heading::Eastbound);
        assert_eq!(r.heading(TravelDirection::Return), Heading::Westbound);
    }

    #[test]
    fn test_reference_waypoint() {
        let mut r = route();
        assert_eq!(r.reference_waypoint().unwrap().name, "A");
        r.reference_waypoint = Some("C".into());
        assert_eq!(r.reference_waypoint().unwrap().name, "C");
    }

    #[test]
    fn test_glare_hours_defaults_and_override() {
        let mut wp = Waypoint::new("A", coords(), "u");
        assert_eq!(wp.glare_hours(Heading::Eastbound), HourWindow::span(7, 10));
        assert!(wp.glare_hours(Heading::Northbound).is_empty());

        wp.sun_glare = vec![GlareExposure {
            heading: Heading::Westbound,
            hours: HourWindow::span(16, 17),
        }];
        assert_eq!(wp.glare_hours(Heading::Westbound), HourWindow::span(16, 17));
        assert!(wp.glare_hours(Heading::Eastbound).is_empty());
    }
}
