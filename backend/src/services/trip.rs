//! Trip planning service: gathers per-waypoint feeds and runs the analysis

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use shared::{
    analysis::{assess_trip, available_dates, classify_alerts, hourly_rows},
    ActiveAlert, AnalysisError, ForecastFeeds, HourlyRow, Route, TripVerdict,
};

use super::forecast::{FetchOutcome, ForecastService, Freshness};
use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Where one waypoint's forecast or alert data came from, or why it is
/// missing
#[derive(Debug, Clone, Serialize)]
pub struct WaypointSource {
    pub waypoint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freshness: Option<Freshness>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WaypointSource {
    pub fn from_result<T>(waypoint: &str, result: &AppResult<FetchOutcome<T>>) -> Self {
        match result {
            Ok(outcome) => Self {
                waypoint: waypoint.to_string(),
                freshness: Some(outcome.freshness),
                fetched_at: Some(outcome.fetched_at),
                error: None,
            },
            Err(e) => Self {
                waypoint: waypoint.to_string(),
                freshness: None,
                fetched_at: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Verdict plus the provenance of the data behind it
///
/// A failed alert lookup shows up in `alert_sources`, so an empty alert
/// list is only "no alerts" when every lookup succeeded.
#[derive(Debug, Clone, Serialize)]
pub struct VerdictReport {
    #[serde(flatten)]
    pub verdict: TripVerdict,
    pub sources: Vec<WaypointSource>,
    pub alert_sources: Vec<WaypointSource>,
}

/// Trip service
#[derive(Clone)]
pub struct TripService {
    config: Arc<Config>,
    forecasts: ForecastService,
}

impl TripService {
    /// Create a new TripService instance
    pub fn new(config: Arc<Config>, forecasts: ForecastService) -> Self {
        Self { config, forecasts }
    }

    pub fn routes(&self) -> &[Route] {
        &self.config.routes
    }

    fn route(&self, route_id: &str) -> AppResult<&Route> {
        self.config
            .route(route_id)
            .ok_or_else(|| AppError::NotFound(format!("Route {}", route_id)))
    }

    /// Plannable dates from the route's reference waypoint
    pub async fn available_dates(&self, route_id: &str) -> AppResult<Vec<NaiveDate>> {
        let route = self.route(route_id)?;
        let reference = route
            .reference_waypoint()
            .ok_or_else(|| AppError::Configuration(format!("route {} has no waypoints", route.id)))?;

        let outcome = self.forecasts.hourly(reference).await.map_err(|e| {
            tracing::warn!("Reference forecast for {} unavailable: {}", reference.name, e);
            AppError::ForecastUnavailable(format!("no forecast for {}", reference.name))
        })?;

        Ok(available_dates(&outcome.value, self.config.planning.planning_days)?)
    }

    /// Go/no-go verdict for a route on a date (first plannable date if none)
    pub async fn verdict(
        &self,
        route_id: &str,
        date: Option<NaiveDate>,
        max_reasons: Option<usize>,
    ) -> AppResult<VerdictReport> {
        let route = self.route(route_id)?;
        let (feeds, sources) = self.gather_feeds(route).await;
        let date = self.resolve_date(route, &feeds, date)?;
        let (alerts, alert_sources) = self.gather_alerts(route).await;
        let max_reasons = max_reasons.unwrap_or(self.config.planning.max_reasons);

        let verdict = assess_trip(route, &feeds, &alerts, date, max_reasons)?;

        tracing::info!(
            "Verdict for {} on {}: {} ({} reasons, {} alerts, {} missing)",
            route.id,
            date,
            verdict.mission_status,
            verdict.reasons.len(),
            verdict.alerts.len(),
            verdict.missing_waypoints.len()
        );

        Ok(VerdictReport {
            verdict,
            sources,
            alert_sources,
        })
    }

    /// Hour-by-hour breakdown for a route on a date, optionally one waypoint
    pub async fn hours(
        &self,
        route_id: &str,
        date: Option<NaiveDate>,
        waypoint: Option<&str>,
    ) -> AppResult<Vec<HourlyRow>> {
        let route = self.route(route_id)?;
        if let Some(name) = waypoint {
            if route.waypoint(name).is_none() {
                return Err(AppError::NotFound(format!("Waypoint {}", name)));
            }
        }

        let (feeds, _) = self.gather_feeds(route).await;
        if feeds.values().all(|hours| hours.is_empty()) {
            return Err(AnalysisError::NoForecastData.into());
        }
        let date = self.resolve_date(route, &feeds, date)?;

        Ok(hourly_rows(route, &feeds, date, waypoint))
    }

    fn resolve_date(
        &self,
        route: &Route,
        feeds: &ForecastFeeds,
        date: Option<NaiveDate>,
    ) -> AppResult<NaiveDate> {
        if let Some(date) = date {
            return Ok(date);
        }

        let reference = route
            .reference_waypoint()
            .and_then(|w| feeds.get(&w.name))
            .ok_or_else(|| AppError::ForecastUnavailable("reference waypoint has no forecast".into()))?;
        let dates = available_dates(reference, 1)?;
        dates
            .first()
            .copied()
            .ok_or_else(|| AnalysisError::NoParseableDates.into())
    }

    /// Forecasts for every waypoint; failed waypoints are left out
    async fn gather_feeds(&self, route: &Route) -> (ForecastFeeds, Vec<WaypointSource>) {
        let waypoints = route.all_waypoints();
        let mut feeds = ForecastFeeds::new();
        let mut sources = Vec::with_capacity(waypoints.len());

        for waypoint in waypoints {
            let result = self.forecasts.hourly(waypoint).await;
            sources.push(WaypointSource::from_result(&waypoint.name, &result));
            match result {
                Ok(outcome) => {
                    feeds.insert(waypoint.name.clone(), outcome.value);
                }
                Err(e) => tracing::warn!("No forecast for {}: {}", waypoint.name, e),
            }
        }

        (feeds, sources)
    }

    /// Classified alerts for every waypoint, with per-waypoint provenance
    async fn gather_alerts(&self, route: &Route) -> (Vec<ActiveAlert>, Vec<WaypointSource>) {
        let mut alerts = Vec::new();
        let mut sources = Vec::new();

        for waypoint in route.all_waypoints() {
            let result = self.forecasts.alerts(waypoint).await;
            sources.push(WaypointSource::from_result(&waypoint.name, &result));
            match result {
                Ok(outcome) => alerts.extend(classify_alerts(&waypoint.name, &outcome.value)),
                Err(e) => tracing::warn!("No alerts for {}: {}", waypoint.name, e),
            }
        }

        (alerts, sources)
    }
}
