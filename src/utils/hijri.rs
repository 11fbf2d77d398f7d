//! Approximate Gregorian → Hijri conversion.
//!
//! Uses a fixed epoch, an average year length and a fixed table of
//! alternating 30/29-day months. Good to within a day or two for display;
//! it is not a sighting-based or Umm al-Qura calendar.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::models::HijriDate;

/// Islamic month names in English with their tabular lengths (index 0 = Muharram = month 1)
const HIJRI_MONTHS: &[(&str, u32)] = &[
    ("Muharram", 30),
    ("Safar", 29),
    ("Rabi al-Awwal", 30),
    ("Rabi al-Thani", 29),
    ("Jumada al-Awwal", 30),
    ("Jumada al-Thani", 29),
    ("Rajab", 30),
    ("Sha'ban", 29),
    ("Ramadan", 30),
    ("Shawwal", 29),
    ("Dhu al-Qi'dah", 30),
    ("Dhu al-Hijjah", 29),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HijriMonth {
    pub name: String,
    pub days: u32,
}

/// Calendar parameters for [`approximate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HijriCalendar {
    /// 1 Muharram 1 AH, proleptic Gregorian.
    pub epoch: NaiveDate,
    pub year_length: f64,
    pub months: Vec<HijriMonth>,
}

impl Default for HijriCalendar {
    fn default() -> Self {
        Self {
            epoch: NaiveDate::from_ymd_opt(622, 7, 16).unwrap_or(NaiveDate::MIN),
            year_length: 354.37,
            months: HIJRI_MONTHS
                .iter()
                .map(|(name, days)| HijriMonth {
                    name: name.to_string(),
                    days: *days,
                })
                .collect(),
        }
    }
}

pub fn approximate(date: NaiveDate, calendar: &HijriCalendar) -> Result<HijriDate, InputError> {
    let days = (date - calendar.epoch).num_days();
    if days < 0 {
        return Err(InputError::BeforeHijriEpoch(date));
    }

    let elapsed = days as f64;
    let year = (elapsed / calendar.year_length).floor() as i64 + 1;
    let remaining = (elapsed % calendar.year_length).floor() as i64;

    let mut month = 1usize;
    let mut day = remaining;
    for m in &calendar.months {
        if day <= m.days as i64 {
            break;
        }
        day -= m.days as i64;
        month += 1;
    }

    // The averaged year can outrun the month table; pin to the first day of the year.
    if month > calendar.months.len() {
        month = 1;
        day = 1;
    }

    let month_name = calendar
        .months
        .get(month - 1)
        .map(|m| m.name.clone())
        .unwrap_or_else(|| "Unknown".to_string());

    Ok(HijriDate {
        day: day.max(0) as u32,
        month: month as u32,
        month_name,
        year,
        gregorian_label: date.format("%A, %B %d, %Y").to_string(),
        weekday: date.format("%A").to_string(),
    })
}

/// Hijri date for `today` shifted by `offset_days`.
/// The offset lets users adjust for local moon sighting differences
/// (e.g., -1 if your country is one day behind Saudi Arabia).
pub fn hijri_with_offset(
    today: NaiveDate,
    offset_days: i32,
    calendar: &HijriCalendar,
) -> Result<HijriDate, InputError> {
    let adjusted = today + Duration::days(offset_days as i64);
    let mut hijri = approximate(adjusted, calendar)?;
    // The Gregorian side always describes the real day, not the shifted one.
    hijri.gregorian_label = today.format("%A, %B %d, %Y").to_string();
    hijri.weekday = today.format("%A").to_string();
    Ok(hijri)
}
