use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::GeoCoordinate;

/// The six daily time slots. Sunrise is not a prayer but is reported alongside them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrayerType {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl PrayerType {
    pub fn all() -> [PrayerType; 6] {
        [
            PrayerType::Fajr,
            PrayerType::Sunrise,
            PrayerType::Dhuhr,
            PrayerType::Asr,
            PrayerType::Maghrib,
            PrayerType::Isha,
        ]
    }

    pub fn is_prayer(&self) -> bool {
        !matches!(self, PrayerType::Sunrise)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PrayerType::Fajr => "Fajr",
            PrayerType::Sunrise => "Sunrise",
            PrayerType::Dhuhr => "Dhuhr",
            PrayerType::Asr => "Asr",
            PrayerType::Maghrib => "Maghrib",
            PrayerType::Isha => "Isha",
        }
    }
}

impl std::fmt::Display for PrayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Six "HH:MM" clock times for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerTimes {
    pub fajr: String,
    pub sunrise: String,
    pub dhuhr: String,
    pub asr: String,
    pub maghrib: String,
    pub isha: String,
}

impl PrayerTimes {
    pub fn get(&self, prayer: PrayerType) -> &str {
        match prayer {
            PrayerType::Fajr => &self.fajr,
            PrayerType::Sunrise => &self.sunrise,
            PrayerType::Dhuhr => &self.dhuhr,
            PrayerType::Asr => &self.asr,
            PrayerType::Maghrib => &self.maghrib,
            PrayerType::Isha => &self.isha,
        }
    }

    /// All six slots in display order.
    pub fn schedule(&self) -> Vec<(PrayerType, &str)> {
        PrayerType::all()
            .into_iter()
            .map(|p| (p, self.get(p)))
            .collect()
    }
}

/// What callers serialize: the times plus the day and place they belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrayerTimeSet {
    #[serde(flatten)]
    pub times: PrayerTimes,
    pub date: String,
    pub city: String,
}

/// A stored cache entry, one per (city, date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrayerCacheRecord {
    pub city: String,
    pub date: String,
    pub times: PrayerTimes,
    pub coordinates: GeoCoordinate,
    pub created_at: DateTime<Utc>,
}

impl PrayerCacheRecord {
    pub fn to_time_set(&self) -> PrayerTimeSet {
        PrayerTimeSet {
            times: self.times.clone(),
            date: self.date.clone(),
            city: self.city.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_set_serializes_flat() {
        let set = PrayerTimeSet {
            times: PrayerTimes {
                fajr: "04:10".into(),
                sunrise: "05:40".into(),
                dhuhr: "12:00".into(),
                asr: "16:00".into(),
                maghrib: "18:26".into(),
                isha: "19:56".into(),
            },
            date: "2025-03-30".into(),
            city: "Mecca".into(),
        };
        let value = serde_json::to_value(&set).unwrap();
        assert_eq!(value["fajr"], "04:10");
        assert_eq!(value["city"], "Mecca");
        assert!(value.get("times").is_none());
    }
}
