use unicode_width::UnicodeWidthStr;

/// Format a duration in seconds to "Xh Ym" or "Ym" string
pub fn format_duration_secs(secs: i64) -> String {
    if secs <= 0 {
        return "now".to_string();
    }
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// Format decimal hours as "HH:MM".
/// Values outside [0, 24) wrap around the clock rather than failing.
pub fn format_decimal_hours(value: f64) -> String {
    let whole = value.floor();
    let hours = (whole as i64).rem_euclid(24);
    let minutes = (((value - whole) * 60.0).floor() as i64).clamp(0, 59);
    format!("{:02}:{:02}", hours, minutes)
}

/// Round to the nearest integer and insert thousands separators: 10306.6 -> "10,307"
pub fn format_thousands(value: f64) -> String {
    let rounded = format!("{:.0}", value.abs());
    let mut out = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, ch) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0.0 && rounded != "0" {
        out.insert(0, '-');
    }
    out
}

/// Format a money amount with two decimals and thousands separators.
pub fn format_amount(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = format_thousands((cents / 100) as f64);
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, whole, cents % 100)
}

/// Pad `s` with spaces to `width` terminal columns.
pub fn pad_right(s: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(used)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_hours_wrap_into_clock() {
        assert_eq!(format_decimal_hours(5.5), "05:30");
        assert_eq!(format_decimal_hours(12.0), "12:00");
        assert_eq!(format_decimal_hours(23.999), "23:59");
        assert_eq!(format_decimal_hours(25.25), "01:15");
        // floor(-0.5) = -1 -> 23, fraction 0.5 -> 30
        assert_eq!(format_decimal_hours(-0.5), "23:30");
    }

    #[test]
    fn thousands_separators() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.4), "999");
        assert_eq!(format_thousands(10306.6), "10,307");
        assert_eq!(format_thousands(1234567.0), "1,234,567");
    }

    #[test]
    fn amounts_have_two_decimals() {
        assert_eq!(format_amount(1425.0), "1,425.00");
        assert_eq!(format_amount(489.888), "489.89");
        assert_eq!(format_amount(-3000.5), "-3,000.50");
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration_secs(0), "now");
        assert_eq!(format_duration_secs(59 * 60), "59m");
        assert_eq!(format_duration_secs(3 * 3600 + 5 * 60), "3h 5m");
    }

    #[test]
    fn pads_by_display_width() {
        assert_eq!(pad_right("Cairo", 8), "Cairo   ");
        assert_eq!(pad_right("Istanbul", 4), "Istanbul");
    }
}
