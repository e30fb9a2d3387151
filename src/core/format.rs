//! Text formatting helpers for reply bodies

use chrono::{DateTime, Utc};

/// Group digits in threes with commas: `1234567` → `"1,234,567"`
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let lead = match digits.len() % 3 {
        0 => 3,
        r => r,
    };
    let mut grouped = String::from(&digits[..lead]);
    for start in (lead..digits.len()).step_by(3) {
        grouped.push(',');
        grouped.push_str(&digits[start..start + 3]);
    }
    grouped
}

/// `YYYY-MM-DD HH:MM UTC`
pub fn format_utc_minute(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// `YYYY-MM-DD`
pub fn format_date(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(42), "42");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(12345), "12,345");
        assert_eq!(format_number(1234567), "1,234,567");
        assert_eq!(format_number(100_000), "100,000");
        assert_eq!(format_number(u64::MAX), "18,446,744,073,709,551,615");
    }

    #[test]
    fn test_format_utc_minute() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 59).unwrap();
        assert_eq!(format_utc_minute(instant), "2024-03-07 09:05 UTC");
    }

    #[test]
    fn test_format_date() {
        let instant = Utc.with_ymd_and_hms(2016, 12, 31, 23, 59, 0).unwrap();
        assert_eq!(format_date(instant), "2016-12-31");
    }
}
