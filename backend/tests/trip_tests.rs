//! Trip verdict integration tests
//!
//! Tests for trip aggregation including:
//! - Leg risk is the worst hour in the travel window
//! - Official warnings force a Severe verdict
//! - Alerts raise but never lower the forecast tier
//! - No forecast data at all ends the request as unavailable

use chrono::{DateTime, NaiveDate};
use proptest::prelude::*;
use shared::analysis::{assess_trip, available_dates, evaluate};
use shared::{
    ActiveAlert, AlertClass, AnalysisError, FieldValue, ForecastFeeds, GpsCoordinates,
    HazardThresholds, Heading, HourWindow, HourlyObservation, Route, SeverityTier,
    TravelDirection, Waypoint,
};

const WAYPOINTS: [&str; 3] = ["4th of July Pass", "Lookout Pass", "McDonald Pass"];

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
}

fn route() -> Route {
    let outbound = WAYPOINTS
        .iter()
        .map(|name| {
            Waypoint::new(
                *name,
                GpsCoordinates::new("47.0".parse().unwrap(), "-114.0".parse().unwrap()),
                format!("https://api.weather.gov/gridpoints/{}", name.replace(' ', "_")),
            )
        })
        .collect();

    Route {
        id: "i90-passes".into(),
        name: "I-90 / US-12 passes".into(),
        outbound_heading: Heading::Eastbound,
        outbound,
        return_via: Vec::new(),
        outbound_hours: HourWindow::span(7, 12),
        return_hours: HourWindow::span(13, 18),
        reference_waypoint: Some("McDonald Pass".into()),
        thresholds: HazardThresholds::default(),
        late_return: None,
    }
}

fn hour(h: u32, temperature: i64, wind_mph: u32, forecast: &str) -> HourlyObservation {
    HourlyObservation {
        start_time: DateTime::parse_from_rfc3339(&format!("2026-01-15T{:02}:00:00-07:00", h)).unwrap(),
        temperature: FieldValue::Scalar(temperature),
        wind_speed: FieldValue::text(format!("{} mph", wind_mph)),
        wind_direction: Some("N".into()),
        wind_gust: FieldValue::Missing,
        short_forecast: Some(forecast.into()),
        probability_of_precipitation: FieldValue::Missing,
        is_daytime: h >= 7 && h < 17,
    }
}

fn warning(waypoint: &str) -> ActiveAlert {
    ActiveAlert {
        waypoint: waypoint.into(),
        event: "Winter Storm Warning".into(),
        class: AlertClass::Warning,
        onset: None,
        ends: None,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    fn calm_feeds() -> ForecastFeeds {
        WAYPOINTS
            .iter()
            .map(|name| {
                (
                    name.to_string(),
                    (0..24).map(|h| hour(h, 40, 5, "Cloudy")).collect(),
                )
            })
            .collect()
    }

    /// No data for any waypoint: no partial verdict
    #[test]
    fn test_no_forecast_data_is_unavailable() {
        let empty = ForecastFeeds::new();
        assert_eq!(
            assess_trip(&route(), &empty, &[], date(), 5),
            Err(AnalysisError::NoForecastData)
        );

        let hollow: ForecastFeeds = WAYPOINTS.iter().map(|n| (n.to_string(), Vec::new())).collect();
        assert_eq!(
            assess_trip(&route(), &hollow, &[], date(), 5),
            Err(AnalysisError::NoForecastData)
        );
        assert_eq!(available_dates(&[], 5), Err(AnalysisError::NoParseableDates));
    }

    /// A waypoint without data is left out rather than failing the trip
    #[test]
    fn test_missing_waypoint_degrades() {
        let mut feeds = calm_feeds();
        feeds.remove("Lookout Pass");
        let verdict = assess_trip(&route(), &feeds, &[], date(), 5).unwrap();

        assert_eq!(verdict.missing_waypoints, vec!["Lookout Pass".to_string()]);
        assert_eq!(verdict.outbound_legs.len(), 2);
        assert_eq!(verdict.overall_tier, SeverityTier::Clear);
    }

    /// A single warning anywhere is a no-go
    #[test]
    fn test_warning_forces_no_go() {
        let verdict = assess_trip(&route(), &calm_feeds(), &[warning("Lookout Pass")], date(), 5).unwrap();
        assert_eq!(verdict.forecast_tier, SeverityTier::Clear);
        assert_eq!(verdict.overall_tier, SeverityTier::Severe);
        assert_eq!(verdict.mission_status, "NO-GO");
        assert_eq!(verdict.alerts.len(), 1);
    }

    /// Advisories lift a calm day to Elevated
    #[test]
    fn test_advisory_floor() {
        let advisory = ActiveAlert {
            class: AlertClass::WatchOrAdvisory,
            event: "Winter Weather Advisory".into(),
            ..warning("McDonald Pass")
        };
        let verdict = assess_trip(&route(), &calm_feeds(), &[advisory], date(), 5).unwrap();
        assert_eq!(verdict.overall_tier, SeverityTier::Elevated);
    }

    /// Alerts that ended before the date do not apply
    #[test]
    fn test_expired_alert_ignored() {
        let expired = ActiveAlert {
            ends: Some(DateTime::parse_from_rfc3339("2026-01-14T18:00:00-07:00").unwrap()),
            ..warning("McDonald Pass")
        };
        let verdict = assess_trip(&route(), &calm_feeds(), &[expired], date(), 5).unwrap();
        assert_eq!(verdict.overall_tier, SeverityTier::Clear);
        assert!(verdict.alerts.is_empty());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn day_strategy() -> impl Strategy<Value = Vec<HourlyObservation>> {
        prop::collection::vec(
            (
                -10i64..=50i64,
                0u32..=70u32,
                prop::sample::select(vec!["Cloudy", "Snow", "Rain", "Sunny", "Breezy"]),
            ),
            24,
        )
        .prop_map(|hours| {
            hours
                .into_iter()
                .enumerate()
                .map(|(h, (temp, wind, text))| hour(h as u32, temp, wind, text))
                .collect()
        })
    }

    fn feeds_strategy() -> impl Strategy<Value = ForecastFeeds> {
        (day_strategy(), day_strategy(), day_strategy()).prop_map(|(a, b, c)| {
            WAYPOINTS
                .iter()
                .map(|n| n.to_string())
                .zip([a, b, c])
                .collect()
        })
    }

    /// Worst hour of any waypoint in its direction's window
    fn expected_tier(route: &Route, feeds: &ForecastFeeds) -> SeverityTier {
        let mut worst = 0;
        for direction in TravelDirection::BOTH {
            for waypoint in &route.outbound {
                for obs in &feeds[&waypoint.name] {
                    if route.hours(direction).contains(obs.local_hour()) {
                        worst = worst.max(evaluate(obs, waypoint, route, direction).risk_score);
                    }
                }
            }
        }
        SeverityTier::from_score(worst)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Forecast tier is the single worst in-window hour
        #[test]
        fn prop_forecast_tier_is_worst_hour(feeds in feeds_strategy()) {
            let route = route();
            let verdict = assess_trip(&route, &feeds, &[], date(), 5).unwrap();

            prop_assert_eq!(verdict.forecast_tier, expected_tier(&route, &feeds));
            prop_assert_eq!(verdict.overall_tier, verdict.forecast_tier);
            prop_assert!(verdict.reasons.len() <= 5);
        }

        /// Any warning on the date forces Severe
        #[test]
        fn prop_warning_dominates(feeds in feeds_strategy(), at in 0usize..3) {
            let alerts = vec![warning(WAYPOINTS[at])];
            let verdict = assess_trip(&route(), &feeds, &alerts, date(), 5).unwrap();

            prop_assert_eq!(verdict.overall_tier, SeverityTier::Severe);
        }

        /// Alerts only ever raise the verdict
        #[test]
        fn prop_alerts_never_lower(feeds in feeds_strategy(), warn in any::<bool>()) {
            let route = route();
            let quiet = assess_trip(&route, &feeds, &[], date(), 5).unwrap();
            let class = if warn { AlertClass::Warning } else { AlertClass::WatchOrAdvisory };
            let alert = ActiveAlert { class, ..warning("McDonald Pass") };
            let alerted = assess_trip(&route, &feeds, &[alert], date(), 5).unwrap();

            prop_assert!(alerted.overall_tier >= quiet.overall_tier);
            prop_assert!(alerted.overall_tier >= class.tier_floor());
            prop_assert_eq!(alerted.forecast_tier, quiet.forecast_tier);
        }
    }
}
