//! HTTP handlers for trip planning endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::HourlyRow;
use validator::Validate;

use crate::error::AppResult;
use crate::services::trip::VerdictReport;
use crate::AppState;

/// Plannable dates for a route
#[derive(Debug, Serialize)]
pub struct DatesResponse {
    pub route_id: String,
    pub dates: Vec<NaiveDate>,
}

/// Get the dates a route can be planned for
pub async fn get_available_dates(
    State(state): State<AppState>,
    Path(route_id): Path<String>,
) -> AppResult<Json<DatesResponse>> {
    let dates = state.trips.available_dates(&route_id).await?;
    Ok(Json(DatesResponse { route_id, dates }))
}

/// Query parameters for a verdict
#[derive(Debug, Deserialize, Validate)]
pub struct VerdictQuery {
    pub date: Option<NaiveDate>,
    #[validate(range(min = 1, max = 20))]
    pub max_reasons: Option<usize>,
}

/// Get the go/no-go verdict for a route
pub async fn get_verdict(
    State(state): State<AppState>,
    Path(route_id): Path<String>,
    Query(query): Query<VerdictQuery>,
) -> AppResult<Json<VerdictReport>> {
    query.validate()?;
    let report = state
        .trips
        .verdict(&route_id, query.date, query.max_reasons)
        .await?;
    Ok(Json(report))
}

/// Query parameters for the hourly breakdown
#[derive(Debug, Deserialize, Validate)]
pub struct HoursQuery {
    pub date: Option<NaiveDate>,
    #[validate(length(min = 1, max = 100))]
    pub waypoint: Option<String>,
}

/// Get the hour-by-hour breakdown for a route
pub async fn get_hourly_breakdown(
    State(state): State<AppState>,
    Path(route_id): Path<String>,
    Query(query): Query<HoursQuery>,
) -> AppResult<Json<Vec<HourlyRow>>> {
    query.validate()?;
    let rows = state
        .trips
        .hours(&route_id, query.date, query.waypoint.as_deref())
        .await?;
    Ok(Json(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_reasons_range() {
        let ok = VerdictQuery { date: None, max_reasons: Some(5) };
        assert!(ok.validate().is_ok());

        let zero = VerdictQuery { date: None, max_reasons: Some(0) };
        assert!(zero.validate().is_err());

        let absent = VerdictQuery { date: None, max_reasons: None };
        assert!(absent.validate().is_ok());
    }

    #[test]
    fn test_empty_waypoint_rejected() {
        let query = HoursQuery { date: None, waypoint: Some(String::new()) };
        assert!(query.validate().is_err());
    }
}
