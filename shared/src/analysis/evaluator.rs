//! Per-hour hazard scoring
//!
//! Rules run in a fixed order and only ever add to the score. Every rule
//! reads through the observation's defaulting accessors, so a partial
//! record yields a low-information assessment instead of an error.

use crate::analysis::wind_chill::calculate_wind_chill;
use crate::models::{HazardAssessment, HazardTag, HazardThresholds, HourlyObservation, Route, Waypoint};
use crate::types::{CompassPoint, Heading, TravelDirection};

/// Evaluate one forecast hour at `waypoint` for travel in `direction`
pub fn evaluate(
    observation: &HourlyObservation,
    waypoint: &Waypoint,
    route: &Route,
    direction: TravelDirection,
) -> HazardAssessment {
    evaluate_with(observation, waypoint, route.heading(direction), &route.thresholds)
}

/// Evaluate with an explicit heading and thresholds
pub fn evaluate_with(
    observation: &HourlyObservation,
    waypoint: &Waypoint,
    heading: Heading,
    thresholds: &HazardThresholds,
) -> HazardAssessment {
    let conditions = Conditions::read(observation);
    let mut scorer = Scorer::default();

    road_surface(&conditions, thresholds, &mut scorer);
    wind(&conditions, thresholds, &mut scorer);
    crosswind(&conditions, waypoint, heading, thresholds, &mut scorer);
    sun_glare(&conditions, waypoint, heading, &mut scorer);
    wind_chill(&conditions, thresholds, &mut scorer);

    HazardAssessment::from_parts(scorer.score, scorer.tags)
}

/// Observation fields resolved to plain values with defaults applied
struct Conditions {
    text: String,
    temperature_f: i32,
    sustained_mph: u32,
    effective_mph: u32,
    direction: CompassPoint,
    hour: u32,
    is_daytime: bool,
}

impl Conditions {
    fn read(observation: &HourlyObservation) -> Self {
        Self {
            text: observation.forecast_text().to_lowercase(),
            temperature_f: observation.temperature_f(),
            sustained_mph: observation.sustained_wind_mph(),
            effective_mph: observation.effective_wind_mph(),
            direction: observation.wind_direction(),
            hour: observation.local_hour(),
            is_daytime: observation.is_daytime,
        }
    }

    fn mentions(&self, words: &[&str]) -> bool {
        words.iter().any(|w| self.text.contains(w))
    }
}

#[derive(Default)]
struct Scorer {
    score: u32,
    tags: Vec<HazardTag>,
}

impl Scorer {
    fn add(&mut self, points: u32, tag: HazardTag) {
        self.score = self.score.saturating_add(points);
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    fn note(&mut self, tag: HazardTag) {
        self.add(0, tag);
    }
}

fn road_surface(c: &Conditions, t: &HazardThresholds, scorer: &mut Scorer) {
    // Frozen precipitation takes precedence over rain in mixed forecasts
    if c.mentions(&["snow", "ice"]) {
        if c.temperature_f <= t.freezing_f {
            scorer.add(2, HazardTag::IcyRoads);
        } else {
            scorer.add(1, HazardTag::Slush);
        }
        if t.heavy_snow_points > 0 && c.mentions(&["heavy snow"]) {
            scorer.add(t.heavy_snow_points, HazardTag::HeavySnow);
        }
    } else if c.mentions(&["rain", "drizzle"]) {
        if c.temperature_f <= t.freezing_f {
            scorer.add(3, HazardTag::FreezingRain);
        } else if c.temperature_f <= t.black_ice_ceiling_f {
            scorer.add(1, HazardTag::PossibleBlackIce);
        }
    }
}

fn wind(c: &Conditions, t: &HazardThresholds, scorer: &mut Scorer) {
    let mph = c.effective_mph;
    if mph >= t.severe_gust_mph {
        scorer.add(2, HazardTag::Gusts(mph));
    } else if mph >= t.windy_mph {
        scorer.add(1, HazardTag::Windy(mph));
    } else if c.mentions(&["breezy", "windy"]) && mph < t.breezy_ceiling_mph {
        scorer.note(HazardTag::Breezy);
    }
}

fn crosswind(
    c: &Conditions,
    waypoint: &Waypoint,
    heading: Heading,
    t: &HazardThresholds,
    scorer: &mut Scorer,
) {
    if waypoint.crosswind_sensitive
        && c.effective_mph > t.crosswind_mph
        && heading.orientation().is_crosswind(c.direction)
    {
        scorer.add(1, HazardTag::Crosswind);
    }
}

fn sun_glare(c: &Conditions, waypoint: &Waypoint, heading: Heading, scorer: &mut Scorer) {
    if c.is_daytime && c.mentions(&["sunny", "clear"]) && waypoint.glare_hours(heading).contains(c.hour) {
        scorer.note(HazardTag::SunGlare);
    }
}

fn wind_chill(c: &Conditions, t: &HazardThresholds, scorer: &mut Scorer) {
    let chill = calculate_wind_chill(c.temperature_f as f64, c.sustained_mph as f64);
    if chill < t.wind_chill_f as f64 {
        scorer.add(1, HazardTag::WindChill(chill.trunc() as i32));
    }
}
