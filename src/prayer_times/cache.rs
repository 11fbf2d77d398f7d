use anyhow::Result;
use chrono::{NaiveDate, Utc};
use log::{debug, warn};

use crate::models::{City, PrayerCacheRecord, PrayerTimeSet};
use crate::prayer_times::calculator::estimate;

/// Cache entries are scoped to one city on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub city: String,
    pub date: String,
}

impl CacheKey {
    pub fn new(city: &str, date: NaiveDate) -> Self {
        Self {
            city: city.to_string(),
            date: date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Store consulted before computing a city's prayer times.
pub trait PrayerCache {
    fn get(&self, key: &CacheKey) -> Result<Option<PrayerCacheRecord>>;
    fn put(&self, key: &CacheKey, record: &PrayerCacheRecord) -> Result<()>;
}

/// Used when caching is switched off in config.
pub struct NoCache;

impl PrayerCache for NoCache {
    fn get(&self, _key: &CacheKey) -> Result<Option<PrayerCacheRecord>> {
        Ok(None)
    }

    fn put(&self, _key: &CacheKey, _record: &PrayerCacheRecord) -> Result<()> {
        Ok(())
    }
}

/// Get a city's times from cache, or compute and store them.
/// Cache failures are logged and never fail the lookup.
pub fn times_for_city(cache: &dyn PrayerCache, city: &City, date: NaiveDate) -> PrayerTimeSet {
    let key = CacheKey::new(&city.name, date);

    match cache.get(&key) {
        Ok(Some(record)) => {
            debug!("prayer cache hit for {} on {}", key.city, key.date);
            return record.to_time_set();
        }
        Ok(None) => debug!("prayer cache miss for {} on {}", key.city, key.date),
        Err(e) => warn!("prayer cache read failed for {} on {}: {:#}", key.city, key.date, e),
    }

    let record = PrayerCacheRecord {
        city: city.name.clone(),
        date: key.date.clone(),
        times: estimate(city.coordinate(), date),
        coordinates: city.coordinate(),
        created_at: Utc::now(),
    };

    if let Err(e) = cache.put(&key, &record) {
        warn!("prayer cache write failed for {} on {}: {:#}", key.city, key.date, e);
    }

    record.to_time_set()
}
