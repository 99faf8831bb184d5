//! In-memory response cache with a fixed time-to-live.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::types::{CurrentWeather, DailyForecast, ForecastKind, HourlyForecast};

/// Default freshness window for cached responses
pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

/// A parsed response of any kind
#[derive(Debug, Clone, PartialEq)]
pub enum CachedWeather {
    Current(CurrentWeather),
    Hourly(Vec<HourlyForecast>),
    Daily(Vec<DailyForecast>),
}

/// Records that can be stored in and recovered from [`WeatherCache`].
pub trait Cacheable: Sized + Clone {
    const KIND: ForecastKind;

    fn from_cached(cached: &CachedWeather) -> Option<Self>;
    fn into_cached(self) -> CachedWeather;
}

impl Cacheable for CurrentWeather {
    const KIND: ForecastKind = ForecastKind::Current;

    fn from_cached(cached: &CachedWeather) -> Option<Self> {
        match cached {
            CachedWeather::Current(c) => Some(c.clone()),
            _ => None,
        }
    }

    fn into_cached(self) -> CachedWeather {
        CachedWeather::Current(self)
    }
}

impl Cacheable for Vec<HourlyForecast> {
    const KIND: ForecastKind = ForecastKind::Hourly;

    fn from_cached(cached: &CachedWeather) -> Option<Self> {
        match cached {
            CachedWeather::Hourly(h) => Some(h.clone()),
            _ => None,
        }
    }

    fn into_cached(self) -> CachedWeather {
        CachedWeather::Hourly(self)
    }
}

impl Cacheable for Vec<DailyForecast> {
    const KIND: ForecastKind = ForecastKind::Daily;

    fn from_cached(cached: &CachedWeather) -> Option<Self> {
        match cached {
            CachedWeather::Daily(d) => Some(d.clone()),
            _ => None,
        }
    }

    fn into_cached(self) -> CachedWeather {
        CachedWeather::Daily(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    kind: ForecastKind,
    location: String,
}

impl CacheKey {
    fn new(kind: ForecastKind, location: &str) -> Self {
        Self {
            kind,
            location: location.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    data: CachedWeather,
    stored_at: Instant,
}

/// Responses keyed by `(kind, location)`. An entry is served while it is
/// younger than the TTL and replaced on the next store.
#[derive(Debug)]
pub struct WeatherCache {
    ttl: Duration,
    entries: HashMap<CacheKey, CacheEntry>,
}

impl Default for WeatherCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl WeatherCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fresh record for `location`, if any.
    pub fn get<T: Cacheable>(&self, location: &str) -> Option<T> {
        self.get_at(location, Instant::now())
    }

    pub fn get_at<T: Cacheable>(&self, location: &str, now: Instant) -> Option<T> {
        let entry = self.entries.get(&CacheKey::new(T::KIND, location))?;
        if now.saturating_duration_since(entry.stored_at) >= self.ttl {
            return None;
        }
        T::from_cached(&entry.data)
    }

    pub fn insert<T: Cacheable>(&mut self, location: &str, data: T) {
        self.insert_at(location, data, Instant::now());
    }

    pub fn insert_at<T: Cacheable>(&mut self, location: &str, data: T, now: Instant) {
        self.entries.insert(
            CacheKey::new(T::KIND, location),
            CacheEntry {
                data: data.into_cached(),
                stored_at: now,
            },
        );
    }

    /// Drop one entry. Returns true if it existed.
    pub fn invalidate(&mut self, kind: ForecastKind, location: &str) -> bool {
        self.entries.remove(&CacheKey::new(kind, location)).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
