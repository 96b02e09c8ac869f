//! Time-boxed forecast and alert cache in front of the NWS client

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use shared::{HourlyObservation, RawAlert, Waypoint};
use tokio::sync::RwLock;

use crate::error::AppResult;
use crate::external::WeatherClient;

/// Where a fetched value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Freshness {
    /// Fetched from upstream on this request
    Live,
    /// Served from cache inside its validity window
    Cached,
    /// Upstream failed; served from an expired cache entry
    Stale,
}

/// Result of a cache-fronted fetch
#[derive(Debug, Clone)]
pub struct FetchOutcome<T> {
    pub value: T,
    pub freshness: Freshness,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: T,
    fetched_at: DateTime<Utc>,
}

/// Keyed cache with a fixed time-to-live; expired entries are kept so they
/// can be served when upstream is down.
#[derive(Debug)]
pub struct TtlCache<T> {
    ttl: Duration,
    entries: HashMap<String, CacheEntry<T>>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Entry for `key` if it is still inside the validity window at `now`
    pub fn fresh(&self, key: &str, now: DateTime<Utc>) -> Option<FetchOutcome<T>> {
        self.entries
            .get(key)
            .filter(|entry| now - entry.fetched_at < self.ttl)
            .map(|entry| FetchOutcome {
                value: entry.value.clone(),
                freshness: Freshness::Cached,
                fetched_at: entry.fetched_at,
            })
    }

    /// Entry for `key` regardless of age
    pub fn stale(&self, key: &str) -> Option<FetchOutcome<T>> {
        self.entries.get(key).map(|entry| FetchOutcome {
            value: entry.value.clone(),
            freshness: Freshness::Stale,
            fetched_at: entry.fetched_at,
        })
    }

    pub fn insert(&mut self, key: impl Into<String>, value: T, now: DateTime<Utc>) {
        self.entries.insert(
            key.into(),
            CacheEntry {
                value,
                fetched_at: now,
            },
        );
    }
}

/// Cache-fronted access to hourly forecasts and active alerts
#[derive(Clone)]
pub struct ForecastService {
    client: WeatherClient,
    forecasts: Arc<RwLock<TtlCache<Vec<HourlyObservation>>>>,
    alerts: Arc<RwLock<TtlCache<Vec<RawAlert>>>>,
}

impl ForecastService {
    /// Create a new ForecastService instance
    pub fn new(client: WeatherClient, ttl_secs: u64) -> Self {
        let ttl = Duration::seconds(ttl_secs.min(u64::from(u32::MAX)) as i64);
        Self {
            client,
            forecasts: Arc::new(RwLock::new(TtlCache::new(ttl))),
            alerts: Arc::new(RwLock::new(TtlCache::new(ttl))),
        }
    }

    /// Hourly forecast for a waypoint
    pub async fn hourly(&self, waypoint: &Waypoint) -> AppResult<FetchOutcome<Vec<HourlyObservation>>> {
        let key = waypoint.forecast_url.as_str();
        if let Some(hit) = self.forecasts.read().await.fresh(key, Utc::now()) {
            tracing::debug!("Forecast cache hit for {}", waypoint.name);
            return Ok(hit);
        }

        match self.client.get_hourly_forecast(key).await {
            Ok(hours) => {
                let now = Utc::now();
                self.forecasts.write().await.insert(key, hours.clone(), now);
                Ok(FetchOutcome {
                    value: hours,
                    freshness: Freshness::Live,
                    fetched_at: now,
                })
            }
            Err(e) => match self.forecasts.read().await.stale(key) {
                Some(stale) => {
                    tracing::warn!(
                        "Serving stale forecast for {} from {}: {}",
                        waypoint.name,
                        stale.fetched_at,
                        e
                    );
                    Ok(stale)
                }
                None => Err(e),
            },
        }
    }

    /// Active alerts at a waypoint
    pub async fn alerts(&self, waypoint: &Waypoint) -> AppResult<FetchOutcome<Vec<RawAlert>>> {
        let key = waypoint.coordinates.as_point();
        if let Some(hit) = self.alerts.read().await.fresh(&key, Utc::now()) {
            tracing::debug!("Alert cache hit for {}", waypoint.name);
            return Ok(hit);
        }

        match self.client.get_active_alerts(&waypoint.coordinates).await {
            Ok(alerts) => {
                let now = Utc::now();
                self.alerts.write().await.insert(key, alerts.clone(), now);
                Ok(FetchOutcome {
                    value: alerts,
                    freshness: Freshness::Live,
                    fetched_at: now,
                })
            }
            Err(e) => match self.alerts.read().await.stale(&key) {
                Some(stale) => {
                    tracing::warn!("Serving stale alerts for {}: {}", waypoint.name, e);
                    Ok(stale)
                }
                None => Err(e),
            },
        }
    }
}
