//! Classification of official hazard alerts

use crate::models::{ActiveAlert, AlertClass, RawAlert};

/// Event-name fragments that matter to road travel
pub const RELEVANT_EVENT_KEYWORDS: [&str; 6] = ["winter", "wind", "ice", "blizzard", "snow", "flood"];

/// Whether an event name concerns road travel
pub fn is_relevant_event(event: &str) -> bool {
    let event = event.to_lowercase();
    RELEVANT_EVENT_KEYWORDS.iter().any(|k| event.contains(k))
}

/// Warning vs watch/advisory, by the event name's wording
///
/// Statements, outlooks and anything else without one of the three
/// words are not classified.
pub fn classify_event(event: &str) -> Option<AlertClass> {
    let event = event.to_uppercase();
    if event.contains("WARNING") {
        Some(AlertClass::Warning)
    } else if event.contains("ADVISORY") || event.contains("WATCH") {
        Some(AlertClass::WatchOrAdvisory)
    } else {
        None
    }
}

/// Filter, deduplicate and classify the alerts active at `waypoint`
///
/// Overlapping or superseded alerts are not reconciled; every distinct
/// relevant event is reported once, keeping its first occurrence.
pub fn classify_alerts(waypoint: &str, alerts: &[RawAlert]) -> Vec<ActiveAlert> {
    let mut seen: Vec<String> = Vec::new();
    let mut active = Vec::new();

    for alert in alerts {
        let event = alert.event.trim();
        if !is_relevant_event(event) {
            continue;
        }
        let key = event.to_uppercase();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);

        if let Some(class) = classify_event(event) {
            active.push(ActiveAlert {
                waypoint: waypoint.to_string(),
                event: event.to_string(),
                class,
                onset: alert.onset,
                ends: alert.ends,
            });
        }
    }

    active
}
