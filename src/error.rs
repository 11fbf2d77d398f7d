use chrono::NaiveDate;

/// Rejections raised by the command layer before any calculation runs.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("City not found: {0}")]
    UnknownCity(String),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Invalid amount for {field}: {value} (must be a non-negative number)")]
    NegativeAmount { field: &'static str, value: f64 },

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("{0} is before the Hijri epoch and cannot be converted")]
    BeforeHijriEpoch(NaiveDate),
}

/// Parse a `YYYY-MM-DD` string.
pub fn parse_iso_date(s: &str) -> Result<NaiveDate, InputError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| InputError::InvalidDate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        let d = parse_iso_date("2025-03-30").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2025, 3, 30).unwrap());
        assert!(matches!(
            parse_iso_date("30/03/2025"),
            Err(InputError::InvalidDate(_))
        ));
    }
}
