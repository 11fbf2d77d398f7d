use anyhow::{anyhow, Result};
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

use crate::models::{GeoCoordinate, PrayerTimeSet, PrayerTimes, PrayerType};
use crate::utils::format::format_decimal_hours;

/// Maximum solar declination (obliquity) used by the declination approximation.
const AXIAL_TILT_DEG: f64 = 23.45;

/// Decimal-hour times before formatting. Values may fall outside [0, 24).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarTimes {
    pub fajr: f64,
    pub sunrise: f64,
    pub dhuhr: f64,
    pub asr: f64,
    pub maghrib: f64,
    pub isha: f64,
}

/// Approximate solar declination in degrees for a day of the year.
pub fn solar_declination(day_of_year: u32) -> f64 {
    AXIAL_TILT_DEG * (360.0 * (284.0 + day_of_year as f64) / 365.0).to_radians().sin()
}

/// Offset of the longitude inside its 15° band, in hours.
pub fn longitude_correction(lng: f64) -> f64 {
    (lng - 15.0 * (lng / 15.0).floor()) / 15.0
}

/// Sunrise hour angle in degrees. The cosine is clamped so polar day and
/// polar night give 180° and 0° instead of NaN.
pub fn hour_angle(lat: f64, declination: f64) -> f64 {
    let cos_h = -lat.to_radians().tan() * declination.to_radians().tan();
    cos_h.clamp(-1.0, 1.0).acos().to_degrees()
}

pub fn solar_times(coord: GeoCoordinate, date: NaiveDate) -> SolarTimes {
    let declination = solar_declination(date.ordinal());
    let correction = longitude_correction(coord.lng);
    let half_day = hour_angle(coord.lat, declination) / 15.0;

    let sunrise = 12.0 - half_day - correction;
    let sunset = 12.0 + half_day - correction;
    let dhuhr = 12.0 - correction;
    let maghrib = sunset + 0.1;

    SolarTimes {
        fajr: sunrise - 1.5,
        sunrise,
        dhuhr,
        asr: dhuhr + 4.0,
        maghrib,
        isha: maghrib + 1.5,
    }
}

/// Simplified six-slot prayer schedule for a location and day.
pub fn estimate(coord: GeoCoordinate, date: NaiveDate) -> PrayerTimes {
    let t = solar_times(coord, date);
    PrayerTimes {
        fajr: format_decimal_hours(t.fajr),
        sunrise: format_decimal_hours(t.sunrise),
        dhuhr: format_decimal_hours(t.dhuhr),
        asr: format_decimal_hours(t.asr),
        maghrib: format_decimal_hours(t.maghrib),
        isha: format_decimal_hours(t.isha),
    }
}

/// Uncached estimate labelled with the raw coordinates.
pub fn times_for_coordinates(coord: GeoCoordinate, date: NaiveDate) -> PrayerTimeSet {
    PrayerTimeSet {
        times: estimate(coord, date),
        date: date.format("%Y-%m-%d").to_string(),
        city: coord.label(),
    }
}

pub fn parse_clock(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|e| anyhow!("Bad time '{}': {}", s, e))
}

/// Returns (next PrayerType, seconds until it).
/// The simplified model does not keep prayers in order, so the earliest
/// prayer strictly after `now` wins; once all have passed, tomorrow's Fajr.
pub fn next_prayer(
    today: &PrayerTimes,
    tomorrow: &PrayerTimes,
    now: NaiveTime,
) -> Result<(PrayerType, i64)> {
    let mut best: Option<(PrayerType, NaiveTime)> = None;
    for (prayer, time) in today.schedule() {
        if !prayer.is_prayer() {
            continue;
        }
        let time = parse_clock(time)?;
        if time > now && best.is_none_or(|(_, t)| time < t) {
            best = Some((prayer, time));
        }
    }

    if let Some((prayer, time)) = best {
        return Ok((prayer, (time - now).num_seconds()));
    }

    let fajr = parse_clock(&tomorrow.fajr)?;
    let until_midnight = 86_400 - now.num_seconds_from_midnight() as i64;
    Ok((
        PrayerType::Fajr,
        until_midnight + fajr.num_seconds_from_midnight() as i64,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn is_clock(s: &str) -> bool {
        let bytes = s.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return false;
        }
        match (s[..2].parse::<u32>(), s[3..].parse::<u32>()) {
            (Ok(h), Ok(m)) => h < 24 && m < 60,
            _ => false,
        }
    }

    #[test]
    fn declination_peaks_near_solstices() {
        // June 21 is day 172, December 21 is day 355
        assert!((solar_declination(172) - 23.45).abs() < 0.1);
        assert!((solar_declination(355) + 23.45).abs() < 0.1);
        assert!(solar_declination(81).abs() < 1.0);
    }

    #[test]
    fn longitude_correction_uses_floor() {
        assert!((longitude_correction(39.8262) - 0.6551).abs() < 1e-3);
        // floor(-74.006 / 15) = -5
        assert!((longitude_correction(-74.006) - 0.06627).abs() < 1e-4);
        assert_eq!(longitude_correction(0.0), 0.0);
        assert_eq!(longitude_correction(45.0), 0.0);
    }

    #[test]
    fn fixed_offsets_between_slots() {
        let t = solar_times(GeoCoordinate { lat: 24.8607, lng: 67.0011 }, ymd(2025, 3, 30));
        assert!((t.sunrise - t.fajr - 1.5).abs() < 1e-9);
        assert!((t.asr - t.dhuhr - 4.0).abs() < 1e-9);
        assert!((t.isha - t.maghrib - 1.5).abs() < 1e-9);
        assert!((t.dhuhr - (12.0 - longitude_correction(67.0011))).abs() < 1e-9);
        // Noon sits halfway between sunrise and sunset
        let sunset = t.maghrib - 0.1;
        assert!(((t.sunrise + sunset) / 2.0 - t.dhuhr).abs() < 1e-9);
    }

    #[test]
    fn equator_has_twelve_hour_day() {
        let t = solar_times(GeoCoordinate { lat: 0.0, lng: 0.0 }, ymd(2025, 6, 21));
        assert!((t.sunrise - 6.0).abs() < 1e-9);
        assert!((t.maghrib - 18.1).abs() < 1e-9);
        let p = estimate(GeoCoordinate { lat: 0.0, lng: 0.0 }, ymd(2025, 6, 21));
        assert_eq!(p.fajr, "04:30");
        assert_eq!(p.sunrise, "06:00");
        assert_eq!(p.dhuhr, "12:00");
        assert_eq!(p.asr, "16:00");
        assert_eq!(p.maghrib, "18:06");
        assert_eq!(p.isha, "19:36");
    }

    #[test]
    fn all_slots_are_valid_clock_strings() {
        let start = ymd(2025, 1, 1);
        let mut lat = -60.0;
        while lat <= 60.0 {
            let mut lng = -180.0;
            while lng <= 180.0 {
                for offset in (0..366).step_by(11) {
                    let date = start + chrono::Duration::days(offset);
                    let p = estimate(GeoCoordinate { lat, lng }, date);
                    for (slot, value) in p.schedule() {
                        assert!(is_clock(value), "{} = {:?} at ({}, {}) on {}", slot, value, lat, lng, date);
                    }
                }
                lng += 22.5;
            }
            lat += 5.0;
        }
    }

    #[test]
    fn polar_latitudes_are_clamped_not_nan() {
        let midsummer = ymd(2025, 6, 21);
        let midwinter = ymd(2025, 12, 21);
        for lat in [70.0, 80.0, 89.9, -75.0, 90.0, -90.0] {
            for date in [midsummer, midwinter] {
                let t = solar_times(GeoCoordinate { lat, lng: 18.9 }, date);
                assert!(t.sunrise.is_finite() && t.isha.is_finite());
                let p = estimate(GeoCoordinate { lat, lng: 18.9 }, date);
                for (_, value) in p.schedule() {
                    assert!(is_clock(value));
                }
            }
        }
        assert_eq!(hour_angle(80.0, 23.0), 180.0);
        assert_eq!(hour_angle(80.0, -23.0), 0.0);
    }

    #[test]
    fn coordinate_sets_are_labelled() {
        let set = times_for_coordinates(GeoCoordinate { lat: 51.5074, lng: -0.1278 }, ymd(2025, 4, 28));
        assert_eq!(set.date, "2025-04-28");
        assert_eq!(set.city, "51.5074, -0.1278");
    }

    fn sample(fajr: &str, dhuhr: &str, asr: &str, maghrib: &str, isha: &str) -> PrayerTimes {
        PrayerTimes {
            fajr: fajr.into(),
            sunrise: "06:00".into(),
            dhuhr: dhuhr.into(),
            asr: asr.into(),
            maghrib: maghrib.into(),
            isha: isha.into(),
        }
    }

    #[test]
    fn next_prayer_later_today() {
        let today = sample("04:30", "12:00", "16:00", "18:06", "19:36");
        let (p, secs) = next_prayer(&today, &today, hm(13, 0)).unwrap();
        assert_eq!(p, PrayerType::Asr);
        assert_eq!(secs, 3 * 3600);

        // Sunrise is never reported as the next prayer
        let (p, _) = next_prayer(&today, &today, hm(5, 0)).unwrap();
        assert_eq!(p, PrayerType::Dhuhr);
    }

    #[test]
    fn next_prayer_picks_earliest_when_out_of_order() {
        // isha wrapped past midnight to 00:40 and sorts before fajr
        let today = sample("04:30", "12:00", "16:00", "22:50", "00:40");
        let (p, secs) = next_prayer(&today, &today, hm(0, 10)).unwrap();
        assert_eq!(p, PrayerType::Isha);
        assert_eq!(secs, 30 * 60);
    }

    #[test]
    fn next_prayer_rolls_to_tomorrow() {
        let today = sample("04:30", "12:00", "16:00", "18:06", "19:36");
        let tomorrow = sample("04:29", "12:00", "16:00", "18:07", "19:37");
        let (p, secs) = next_prayer(&today, &tomorrow, hm(22, 0)).unwrap();
        assert_eq!(p, PrayerType::Fajr);
        assert_eq!(secs, 2 * 3600 + 4 * 3600 + 29 * 60);
    }

    #[test]
    fn bad_cached_clock_is_an_error() {
        let today = sample("4h30", "12:00", "16:00", "18:06", "19:36");
        assert!(next_prayer(&today, &today, hm(1, 0)).is_err());
    }
}
