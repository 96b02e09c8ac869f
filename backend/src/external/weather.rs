//! National Weather Service API client
//!
//! Fetches hourly gridpoint forecasts and active alerts from api.weather.gov

use std::time::Duration;

use chrono::{DateTime, FixedOffset};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use shared::{GpsCoordinates, HourlyObservation, RawAlert};

use crate::config::NwsConfig;
use crate::error::{AppError, AppResult};

/// NWS API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
}

/// NWS hourly forecast response (GeoJSON feature)
#[derive(Debug, Deserialize)]
struct NwsForecastResponse {
    properties: NwsForecastProperties,
}

#[derive(Debug, Deserialize)]
struct NwsForecastProperties {
    #[serde(default)]
    periods: Vec<serde_json::Value>,
}

/// NWS active alerts response (GeoJSON feature collection)
#[derive(Debug, Deserialize)]
struct NwsAlertResponse {
    #[serde(default)]
    features: Vec<NwsAlertFeature>,
}

#[derive(Debug, Deserialize)]
struct NwsAlertFeature {
    properties: NwsAlertProperties,
}

#[derive(Debug, Deserialize)]
struct NwsAlertProperties {
    event: Option<String>,
    headline: Option<String>,
    onset: Option<DateTime<FixedOffset>>,
    ends: Option<DateTime<FixedOffset>>,
    expires: Option<DateTime<FixedOffset>>,
}

impl WeatherClient {
    /// Create a new WeatherClient
    pub fn new(config: &NwsConfig) -> AppResult<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the hourly forecast from a gridpoint forecast URL
    pub async fn get_hourly_forecast(&self, forecast_url: &str) -> AppResult<Vec<HourlyObservation>> {
        let body = self.get_text(forecast_url, "application/geo+json").await?;
        parse_hourly_forecast(&body)
    }

    /// Fetch alerts currently active at a point
    pub async fn get_active_alerts(&self, coordinates: &GpsCoordinates) -> AppResult<Vec<RawAlert>> {
        let url = format!(
            "{}/alerts/active?point={}",
            self.base_url,
            coordinates.as_point()
        );
        let body = self.get_text(&url, "application/geo+json").await?;
        parse_alerts(&body)
    }

    async fn get_text(&self, url: &str, accept: &str) -> AppResult<String> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, accept)
            .send()
            .await
            .map_err(|e| AppError::UpstreamUnavailable(format!("Weather API request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::UpstreamUnavailable(format!("Failed to read weather response: {}", e)))
    }
}

fn status_error(status: StatusCode, body: &str) -> AppError {
    let message = format!("Weather API error: {} - {}", status, body);
    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        AppError::UpstreamUnavailable(message)
    } else {
        AppError::ExternalService(message)
    }
}

/// Parse an hourly forecast body, skipping individual periods that cannot
/// be read. Fails only when periods exist and none of them parse.
pub fn parse_hourly_forecast(body: &str) -> AppResult<Vec<HourlyObservation>> {
    let data: NwsForecastResponse = serde_json::from_str(body)
        .map_err(|e| AppError::MalformedPayload(format!("Failed to parse forecast response: {}", e)))?;

    let total = data.properties.periods.len();
    let observations: Vec<HourlyObservation> = data
        .properties
        .periods
        .into_iter()
        .filter_map(|period| match serde_json::from_value(period) {
            Ok(obs) => Some(obs),
            Err(e) => {
                tracing::debug!("Skipping unreadable forecast period: {}", e);
                None
            }
        })
        .collect();

    if total > 0 && observations.is_empty() {
        return Err(AppError::MalformedPayload(
            "Forecast contains no usable timestamps".to_string(),
        ));
    }
    if observations.len() < total {
        tracing::warn!(
            "Dropped {} of {} forecast periods",
            total - observations.len(),
            total
        );
    }

    Ok(observations)
}

/// Parse an active-alerts body into raw alerts
pub fn parse_alerts(body: &str) -> AppResult<Vec<RawAlert>> {
    let data: NwsAlertResponse = serde_json::from_str(body)
        .map_err(|e| AppError::MalformedPayload(format!("Failed to parse alert response: {}", e)))?;

    Ok(data
        .features
        .into_iter()
        .filter_map(|feature| {
            let props = feature.properties;
            props.event.map(|event| RawAlert {
                event,
                headline: props.headline,
                onset: props.onset,
                ends: props.ends.or(props.expires),
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORECAST: &str = r#"{
        "type": "Feature",
        "properties": {
            "units": "us",
            "periods": [
                {
                    "number": 1,
                    "startTime": "2026-01-15T07:00:00-07:00",
                    "isDaytime": true,
                    "temperature": 24,
                    "windSpeed": "20 mph",
                    "windDirection": "NNW",
                    "shortForecast": "Snow Showers"
                },
                {
                    "number": 2,
                    "startTime": "not a time",
                    "temperature": 25
                },
                {
                    "number": 3,
                    "startTime": "2026-01-15T08:00:00-07:00",
                    "isDaytime": true,
                    "temperature": { "unitCode": "wmoUnit:degF", "value": 26 },
                    "windSpeed": { "unitCode": "wmoUnit:mi_h-1", "value": 22 },
                    "windGust": { "unitCode": "wmoUnit:mi_h-1", "value": 41 },
                    "windDirection": "N",
                    "shortForecast": "Snow Showers"
                }
            ]
        }
    }"#;

    #[test]
    fn test_parse_forecast_skips_bad_periods() {
        let hours = parse_hourly_forecast(FORECAST).unwrap();
        assert_eq!(hours.len(), 2);
        assert_eq!(hours[0].temperature_f(), 24);
        assert_eq!(hours[1].temperature_f(), 26);
        assert_eq!(hours[1].effective_wind_mph(), 41);
    }

    #[test]
    fn test_parse_forecast_keeps_periods_with_irregular_fields() {
        use shared::analysis::evaluate_with;
        use shared::{HazardTag, HazardThresholds, Heading, SeverityTier, Waypoint};

        let body = r#"{ "properties": { "periods": [
            { "startTime": "2026-01-15T07:00:00-07:00", "isDaytime": true,
              "temperature": 30, "windSpeed": "5 mph", "windDirection": "W",
              "shortForecast": "Cloudy" },
            { "startTime": "2026-01-15T08:00:00-07:00", "isDaytime": null,
              "temperature": 29, "windSpeed": "5 mph", "windDirection": "W",
              "shortForecast": "Cloudy" },
            { "startTime": "2026-01-15T09:00:00-07:00", "isDaytime": true,
              "temperature": true, "windSpeed": "5 mph", "windDirection": "W",
              "shortForecast": "Cloudy" },
            { "startTime": "2026-01-15T10:00:00-07:00", "isDaytime": true,
              "temperature": 20, "windSpeed": "10 mph", "windDirection": 270,
              "shortForecast": "Freezing Rain" }
        ] } }"#;

        let hours = parse_hourly_forecast(body).unwrap();
        let local: Vec<u32> = hours.iter().map(|h| h.local_hour()).collect();
        assert_eq!(local, vec![7, 8, 9, 10]);
        assert!(!hours[1].is_daytime);
        assert_eq!(hours[2].temperature_f(), shared::DEFAULT_TEMPERATURE_F);

        let waypoint = Waypoint::new(
            "Lookout Pass",
            GpsCoordinates::new("47.4563".parse().unwrap(), "-115.6969".parse().unwrap()),
            "https://api.weather.gov/gridpoints/MSO/56,102/forecast/hourly",
        );
        let icy = evaluate_with(&hours[3], &waypoint, Heading::Westbound, &HazardThresholds::default());
        assert!(icy.tags.contains(&HazardTag::FreezingRain));
        assert_eq!(icy.severity_tier, SeverityTier::Severe);
    }

    #[test]
    fn test_parse_forecast_with_no_usable_periods() {
        let body = r#"{ "properties": { "periods": [ { "startTime": "garbage" } ] } }"#;
        assert!(matches!(
            parse_hourly_forecast(body),
            Err(AppError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_parse_forecast_empty_is_ok() {
        let body = r#"{ "properties": { "periods": [] } }"#;
        assert!(parse_hourly_forecast(body).unwrap().is_empty());
    }

    #[test]
    fn test_parse_forecast_rejects_non_json() {
        assert!(matches!(
            parse_hourly_forecast("<html>503</html>"),
            Err(AppError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_parse_alerts() {
        let body = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "properties": {
                        "event": "Winter Storm Warning",
                        "headline": "Winter Storm Warning issued January 14",
                        "onset": "2026-01-15T05:00:00-07:00",
                        "ends": null,
                        "expires": "2026-01-16T17:00:00-07:00"
                    }
                },
                { "properties": { "headline": "no event name" } }
            ]
        }"#;
        let alerts = parse_alerts(body).unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].event, "Winter Storm Warning");
        assert!(alerts[0].onset.is_some());
        assert_eq!(
            alerts[0].ends.map(|e| e.to_rfc3339()),
            Some("2026-01-16T17:00:00-07:00".to_string())
        );
    }

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            status_error(StatusCode::BAD_GATEWAY, ""),
            AppError::UpstreamUnavailable(_)
        ));
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, ""),
            AppError::ExternalService(_)
        ));
    }
}
