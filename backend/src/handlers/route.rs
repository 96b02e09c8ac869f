//! Route listing handlers

use axum::{extract::State, Json};
use serde::Serialize;
use shared::{Heading, HourWindow, Route};

use crate::AppState;

/// Configured route as shown to clients
#[derive(Debug, Serialize)]
pub struct RouteSummary {
    pub id: String,
    pub name: String,
    pub outbound_heading: Heading,
    pub waypoints: Vec<String>,
    pub return_waypoints: Vec<String>,
    pub outbound_hours: HourWindow,
    pub return_hours: HourWindow,
}

impl From<&Route> for RouteSummary {
    fn from(route: &Route) -> Self {
        use shared::TravelDirection;

        let names = |direction: TravelDirection| {
            route
                .waypoints(direction)
                .into_iter()
                .map(|w| w.name.clone())
                .collect::<Vec<String>>()
        };
        Self {
            id: route.id.clone(),
            name: route.name.clone(),
            outbound_heading: route.outbound_heading,
            waypoints: names(TravelDirection::Outbound),
            return_waypoints: names(TravelDirection::Return),
            outbound_hours: route.outbound_hours.clone(),
            return_hours: route.return_hours.clone(),
        }
    }
}

/// List configured routes
pub async fn list_routes(State(state): State<AppState>) -> Json<Vec<RouteSummary>> {
    Json(state.trips.routes().iter().map(RouteSummary::from).collect())
}
