//! Hourly forecast models

use chrono::{DateTime, FixedOffset, NaiveDate, Timelike};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::analysis::extract::{extract_magnitude, extract_signed};
use crate::types::CompassPoint;

/// Temperature assumed when a forecast hour carries none
pub const DEFAULT_TEMPERATURE_F: i32 = 32;

/// An upstream magnitude in whatever shape the provider sent it
///
/// Forecast feeds mix plain numbers, unit-suffixed strings ("15 mph",
/// "10 to 20 mph") and structured `{ "value": .., "unitCode": .. }`
/// objects, sometimes for the same field across endpoints. Any other
/// shape is kept as `Other` and reads as no value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Missing,
    Scalar(i64),
    Real(f64),
    Text(String),
    Quantity {
        value: Option<f64>,
        #[serde(rename = "unitCode", default, skip_serializing_if = "Option::is_none")]
        unit_code: Option<String>,
    },
    Other(Value),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn quantity(value: f64, unit_code: &str) -> Self {
        FieldValue::Quantity {
            value: Some(value),
            unit_code: Some(unit_code.to_string()),
        }
    }

    /// True when the field carries nothing readable
    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing | FieldValue::Other(_))
    }
}

// Only the start time may reject a period; the remaining fields degrade to
// their defaults when the provider sends an unexpected shape.
fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

/// One forecast hour at one waypoint
///
/// Field names follow the hourly period records of api.weather.gov so a
/// period deserialises directly into this type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HourlyObservation {
    pub start_time: DateTime<FixedOffset>,
    #[serde(default)]
    pub temperature: FieldValue,
    #[serde(default)]
    pub wind_speed: FieldValue,
    #[serde(default, deserialize_with = "lenient_text")]
    pub wind_direction: Option<String>,
    #[serde(default)]
    pub wind_gust: FieldValue,
    #[serde(default, deserialize_with = "lenient_text")]
    pub short_forecast: Option<String>,
    #[serde(default)]
    pub probability_of_precipitation: FieldValue,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub is_daytime: bool,
}

impl HourlyObservation {
    /// Hour-of-day in the waypoint's local time
    pub fn local_hour(&self) -> u32 {
        self.start_time.hour()
    }

    /// Calendar date in the waypoint's local time
    pub fn local_date(&self) -> NaiveDate {
        self.start_time.date_naive()
    }

    pub fn temperature_f(&self) -> i32 {
        extract_signed(&self.temperature)
            .map(|t| t.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
            .unwrap_or(DEFAULT_TEMPERATURE_F)
    }

    pub fn sustained_wind_mph(&self) -> u32 {
        extract_magnitude(&self.wind_speed)
    }

    /// Gust speed, absent when the feed reports none
    pub fn gust_mph(&self) -> Option<u32> {
        if self.wind_gust.is_missing() {
            None
        } else {
            Some(extract_magnitude(&self.wind_gust))
        }
    }

    /// The greater of sustained wind and gust
    pub fn effective_wind_mph(&self) -> u32 {
        self.sustained_wind_mph().max(self.gust_mph().unwrap_or(0))
    }

    pub fn wind_direction(&self) -> CompassPoint {
        CompassPoint::parse_or_north(self.wind_direction.as_deref())
    }

    pub fn forecast_text(&self) -> &str {
        self.short_forecast.as_deref().unwrap_or("")
    }

    pub fn precipitation_probability(&self) -> u32 {
        extract_magnitude(&self.probability_of_precipitation).min(100)
    }

    /// Wind as displayed in hourly tables, e.g. "15 mph NNW"
    pub fn wind_summary(&self) -> String {
        let speed = match &self.wind_speed {
            FieldValue::Text(text) => text.clone(),
            other => format!("{} mph", extract_magnitude(other)),
        };
        match self.wind_gust_summary() {
            Some(gust) => format!("{} {} (gusts {})", speed, self.wind_direction(), gust),
            None => format!("{} {}", speed, self.wind_direction()),
        }
    }

    fn wind_gust_summary(&self) -> Option<String> {
        self.gust_mph().filter(|g| *g > 0).map(|g| format!("{} mph", g))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period_json() -> &'static str {
        r#"{
            "number": 1,
            "startTime": "2026-01-15T07:00:00-07:00",
            "endTime": "2026-01-15T08:00:00-07:00",
            "isDaytime": true,
            "temperature": 28,
            "temperatureUnit": "F",
            "probabilityOfPrecipitation": { "unitCode": "wmoUnit:percent", "value": 40 },
            "windSpeed": "10 to 15 mph",
            "windDirection": "NNW",
            "shortForecast": "Light Snow Likely"
        }"#
    }

    #[test]
    fn test_deserialize_nws_period() {
        let obs: HourlyObservation = serde_json::from_str(period_json()).unwrap();
        assert_eq!(obs.temperature_f(), 28);
        assert_eq!(obs.sustained_wind_mph(), 10);
        assert_eq!(obs.gust_mph(), None);
        assert_eq!(obs.effective_wind_mph(), 10);
        assert_eq!(obs.wind_direction(), CompassPoint::Nnw);
        assert_eq!(obs.precipitation_probability(), 40);
        assert_eq!(obs.local_hour(), 7);
        assert_eq!(obs.local_date(), NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
        assert!(obs.is_daytime);
    }

    #[test]
    fn test_missing_fields_degrade_to_defaults() {
        let obs: HourlyObservation =
            serde_json::from_str(r#"{ "startTime": "2026-01-15T23:00:00-07:00" }"#).unwrap();
        assert_eq!(obs.temperature_f(), DEFAULT_TEMPERATURE_F);
        assert_eq!(obs.sustained_wind_mph(), 0);
        assert_eq!(obs.wind_direction(), CompassPoint::N);
        assert_eq!(obs.forecast_text(), "");
        assert!(!obs.is_daytime);
    }

    #[test]
    fn test_gust_raises_effective_wind() {
        let mut obs: HourlyObservation = serde_json::from_str(period_json()).unwrap();
        obs.wind_gust = FieldValue::text("35 mph");
        assert_eq!(obs.effective_wind_mph(), 35);
        assert_eq!(obs.wind_summary(), "10 to 15 mph NNW (gusts 35 mph)");
    }

    #[test]
    fn test_null_gust_is_missing() {
        let obs: HourlyObservation = serde_json::from_str(
            r#"{ "startTime": "2026-01-15T07:00:00-07:00", "windGust": null }"#,
        )
        .unwrap();
        assert_eq!(obs.gust_mph(), None);
    }

    #[test]
    fn test_field_value_shapes() {
        let scalar: FieldValue = serde_json::from_str("12").unwrap();
        assert_eq!(scalar, FieldValue::Scalar(12));

        let real: FieldValue = serde_json::from_str("12.5").unwrap();
        assert_eq!(real, FieldValue::Real(12.5));

        let quantity: FieldValue =
            serde_json::from_str(r#"{ "unitCode": "wmoUnit:km_h-1", "value": 24.1 }"#).unwrap();
        assert_eq!(quantity, FieldValue::quantity(24.1, "wmoUnit:km_h-1"));

        let flag: FieldValue = serde_json::from_str("true").unwrap();
        assert!(matches!(flag, FieldValue::Other(_)));
        assert!(flag.is_missing());
    }

    #[test]
    fn test_irregular_fields_keep_the_hour() {
        let obs: HourlyObservation = serde_json::from_str(
            r#"{
                "startTime": "2026-01-15T09:00:00-07:00",
                "isDaytime": null,
                "temperature": true,
                "windSpeed": { "value": "fast" },
                "windDirection": 270,
                "windGust": false,
                "shortForecast": { "text": "Snow" }
            }"#,
        )
        .unwrap();
        assert!(!obs.is_daytime);
        assert_eq!(obs.temperature_f(), DEFAULT_TEMPERATURE_F);
        assert_eq!(obs.sustained_wind_mph(), 0);
        assert_eq!(obs.gust_mph(), None);
        assert_eq!(obs.wind_direction(), CompassPoint::N);
        assert_eq!(obs.forecast_text(), "");
    }
}
