//! Built-in tables: the default city list, the 2025 event list and quotes.

use crate::models::{City, IslamicEvent};

const CITIES: &[(&str, f64, f64)] = &[
    ("Mecca", 21.4225, 39.8262),
    ("Medina", 24.4686, 39.6142),
    ("New York", 40.7128, -74.0060),
    ("London", 51.5074, -0.1278),
    ("Dubai", 25.2048, 55.2708),
    ("Istanbul", 41.0082, 28.9784),
    ("Cairo", 30.0444, 31.2357),
    ("Jakarta", -6.2088, 106.8456),
    ("Karachi", 24.8607, 67.0011),
    ("Riyadh", 24.7136, 46.6753),
];

const EVENTS: &[(&str, &str, &str)] = &[
    ("2025-01-29", "Rajab Begins", "Start of the sacred month of Rajab"),
    ("2025-02-27", "Isra and Mi'raj", "Night Journey of Prophet Muhammad (PBUH)"),
    ("2025-02-28", "Sha'ban Begins", "Start of the month of Sha'ban"),
    ("2025-03-14", "Laylat al-Bara'ah", "Night of Forgiveness (15th Sha'ban)"),
    ("2025-03-30", "Ramadan Begins", "Start of the holy month of Ramadan"),
    ("2025-04-28", "Eid al-Fitr", "Festival of Breaking the Fast"),
];

pub const QUOTES: &[&str] = &[
    "And Allah is the best of planners. - Quran 8:30",
    "So remember Me; I will remember you. - Quran 2:152",
    "And it is He who created the heavens and earth in truth. - Quran 6:73",
    "Allah does not burden a soul beyond that it can bear. - Quran 2:286",
    "And whoever relies upon Allah - then He is sufficient for him. - Quran 65:3",
    "And give good tidings to the patient. - Quran 2:155",
    "So verily, with hardship, there is relief. - Quran 94:5",
    "And Allah loves those who are constantly repentant. - Quran 2:222",
];

pub fn default_cities() -> Vec<City> {
    CITIES
        .iter()
        .map(|(name, lat, lng)| City::new(name, *lat, *lng))
        .collect()
}

pub fn islamic_events() -> Vec<IslamicEvent> {
    EVENTS
        .iter()
        .map(|(date, event, description)| IslamicEvent {
            date: date.to_string(),
            event: event.to_string(),
            description: description.to_string(),
        })
        .collect()
}

/// One quote picked uniformly at random.
pub fn random_quote<R: rand::Rng + ?Sized>(rng: &mut R) -> &'static str {
    use rand::seq::SliceRandom;
    QUOTES.choose(rng).copied().unwrap_or(QUOTES[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::parse_iso_date;

    #[test]
    fn default_cities_have_valid_coordinates() {
        let cities = default_cities();
        assert_eq!(cities.len(), 10);
        for city in &cities {
            assert!(crate::models::GeoCoordinate::new(city.latitude, city.longitude).is_ok());
        }
        assert_eq!(cities[0].name, "Mecca");
    }

    #[test]
    fn events_are_dated_and_ordered() {
        let events = islamic_events();
        assert_eq!(events.len(), 6);
        let dates: Vec<_> = events.iter().map(|e| parse_iso_date(&e.date).unwrap()).collect();
        assert!(dates.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(events[4].event, "Ramadan Begins");
    }

    #[test]
    fn quote_comes_from_the_list() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            assert!(QUOTES.contains(&random_quote(&mut rng)));
        }
    }
}
