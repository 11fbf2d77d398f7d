pub mod cache;
pub mod calculator;

pub use cache::{times_for_city, CacheKey, NoCache, PrayerCache};
pub use calculator::{estimate, next_prayer, times_for_coordinates};
