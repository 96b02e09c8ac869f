//! Trip-level aggregation of hourly hazard assessments

use chrono::NaiveDate;

use super::evaluator::evaluate;
use super::AnalysisError;
use crate::models::{
    ActiveAlert, ForecastFeeds, HazardAssessment, HazardReason, HourlyObservation, HourlyRow,
    LateReturnAdvisory, LegRisk, Route, SeverityTier, TripVerdict,
};
use crate::types::TravelDirection;

/// Dates offered for planning
pub const DEFAULT_PLANNING_DAYS: usize = 5;

/// Reasons kept in a verdict summary
pub const DEFAULT_MAX_REASONS: usize = 5;

/// Distinct local dates in forecast order, at most `limit` of them
pub fn available_dates(
    observations: &[HourlyObservation],
    limit: usize,
) -> Result<Vec<NaiveDate>, AnalysisError> {
    let mut dates: Vec<NaiveDate> = Vec::new();
    for obs in observations {
        let date = obs.local_date();
        if !dates.contains(&date) {
            dates.push(date);
        }
    }

    if dates.is_empty() {
        return Err(AnalysisError::NoParseableDates);
    }
    dates.truncate(limit);
    Ok(dates)
}

/// Roll every waypoint's hours on `date` up into a go/no-go verdict
///
/// A leg's risk is its single worst hour inside the direction's travel
/// window. The trip takes the worst leg, then active alerts can raise
/// (never lower) the result.
pub fn assess_trip(
    route: &Route,
    feeds: &ForecastFeeds,
    alerts: &[ActiveAlert],
    date: NaiveDate,
    max_reasons: usize,
) -> Result<TripVerdict, AnalysisError> {
    if feeds.values().all(|hours| hours.is_empty()) {
        return Err(AnalysisError::NoForecastData);
    }

    let waypoints = route.all_waypoints();
    let missing_waypoints: Vec<String> = waypoints
        .iter()
        .filter(|w| day_hours(feeds, &w.name, date).is_empty())
        .map(|w| w.name.clone())
        .collect();
    if missing_waypoints.len() == waypoints.len() {
        return Err(AnalysisError::DateNotForecast(date));
    }

    let mut reasons = ReasonBook::default();
    let mut outbound_legs = Vec::new();
    let mut return_legs = Vec::new();

    for direction in TravelDirection::BOTH {
        let window = route.hours(direction);
        let legs = match direction {
            TravelDirection::Outbound => &mut outbound_legs,
            TravelDirection::Return => &mut return_legs,
        };

        for waypoint in route.waypoints(direction) {
            let hours: Vec<&HourlyObservation> = day_hours(feeds, &waypoint.name, date)
                .into_iter()
                .filter(|obs| window.contains(obs.local_hour()))
                .collect();
            if hours.is_empty() {
                continue;
            }

            let mut max_score = 0;
            for obs in &hours {
                let assessment = evaluate(obs, waypoint, route, direction);
                max_score = max_score.max(assessment.risk_score);
                reasons.record(&waypoint.name, direction, obs.local_hour(), &assessment);
            }

            let tier = SeverityTier::from_score(max_score);
            legs.push(LegRisk {
                waypoint: waypoint.name.clone(),
                direction,
                max_score,
                tier,
                flagged: tier.is_flagged(),
                hours_considered: hours.len(),
            });
        }
    }

    let forecast_tier = outbound_legs
        .iter()
        .chain(return_legs.iter())
        .map(|leg| leg.tier)
        .max()
        .unwrap_or_default();

    let applicable: Vec<ActiveAlert> = alerts
        .iter()
        .filter(|a| a.applies_on(date))
        .cloned()
        .collect();
    let overall_tier = applicable
        .iter()
        .map(|a| a.class.tier_floor())
        .fold(forecast_tier, SeverityTier::max);

    Ok(TripVerdict {
        route_id: route.id.clone(),
        date,
        overall_tier,
        mission_status: overall_tier.mission_status().to_string(),
        forecast_tier,
        outbound_legs,
        return_legs,
        reasons: reasons.finish(max_reasons),
        alerts: applicable,
        late_return: late_return_advisory(route, feeds, date),
        missing_waypoints,
    })
}

/// Every hour on `date` for the route's waypoints, optionally one waypoint
///
/// Each hour is scored for the travel window containing it, among the
/// directions the waypoint is driven in. Outbound wins where the windows
/// overlap; hours outside every window are scored for the waypoint's first
/// direction.
pub fn hourly_rows(
    route: &Route,
    feeds: &ForecastFeeds,
    date: NaiveDate,
    waypoint: Option<&str>,
) -> Vec<HourlyRow> {
    route
        .all_waypoints()
        .into_iter()
        .filter(|w| waypoint.map_or(true, |name| w.name == name))
        .flat_map(|w| {
            let directions = route.directions(&w.name);
            let fallback = directions.first().copied().unwrap_or(TravelDirection::Outbound);
            day_hours(feeds, &w.name, date).into_iter().map(move |obs| {
                let hour = obs.local_hour();
                let window = directions
                    .iter()
                    .copied()
                    .find(|d| route.hours(*d).contains(hour));
                let assessment = evaluate(obs, w, route, window.unwrap_or(fallback));
                HourlyRow {
                    waypoint: w.name.clone(),
                    start_time: obs.start_time,
                    hour,
                    window,
                    temperature_f: obs.temperature_f(),
                    wind: obs.wind_summary(),
                    short_forecast: obs.forecast_text().to_string(),
                    precipitation_probability: obs.precipitation_probability(),
                    assessment,
                }
            })
        })
        .collect()
}

fn day_hours<'a>(feeds: &'a ForecastFeeds, waypoint: &str, date: NaiveDate) -> Vec<&'a HourlyObservation> {
    feeds
        .get(waypoint)
        .map(|hours| hours.iter().filter(|obs| obs.local_date() == date).collect())
        .unwrap_or_default()
}

fn late_return_advisory(
    route: &Route,
    feeds: &ForecastFeeds,
    date: NaiveDate,
) -> Option<LateReturnAdvisory> {
    let check = route.late_return.as_ref()?;
    let coldest = day_hours(feeds, &check.waypoint, date)
        .into_iter()
        .filter(|obs| check.hours.contains(obs.local_hour()))
        .min_by_key(|obs| obs.temperature_f())?;

    let temperature_f = coldest.temperature_f();
    if temperature_f >= check.threshold_f {
        return None;
    }
    let hour = coldest.local_hour();
    Some(LateReturnAdvisory {
        waypoint: check.waypoint.clone(),
        hour,
        temperature_f,
        message: format!(
            "{} drops to {}°F by {:02}:00 on a late return",
            check.waypoint, temperature_f, hour
        ),
    })
}

/// Hazard reasons deduplicated by (waypoint, hazard kind), keeping the
/// occurrence from the worst-scoring hour
#[derive(Default)]
struct ReasonBook {
    reasons: Vec<HazardReason>,
}

impl ReasonBook {
    fn record(
        &mut self,
        waypoint: &str,
        direction: TravelDirection,
        hour: u32,
        assessment: &HazardAssessment,
    ) {
        if assessment.risk_score == 0 {
            return;
        }
        for tag in &assessment.tags {
            let reason = HazardReason {
                waypoint: waypoint.to_string(),
                tag: *tag,
                label: tag.label(),
                score: assessment.risk_score,
                direction,
                hour,
            };
            match self
                .reasons
                .iter_mut()
                .find(|r| r.waypoint == waypoint && r.tag.kind() == tag.kind())
            {
                Some(existing) if reason.score > existing.score => *existing = reason,
                Some(_) => {}
                None => self.reasons.push(reason),
            }
        }
    }

    fn finish(mut self, max_reasons: usize) -> Vec<HazardReason> {
        self.reasons.sort_by(|a, b| b.score.cmp(&a.score));
        self.reasons.truncate(max_reasons);
        self.reasons
    }
}
