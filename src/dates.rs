//! Excel date helpers
//!
//! Spreadsheet dates arrive as serial numbers (days since 1899-12-30 in the
//! 1900 date system), as ISO strings from ODS files, or as free text typed by
//! whoever filled in the template.

use crate::types::CellValue;
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Serial 0 in the 1900 date system
fn excel_epoch() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(1899, 12, 30).and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Convert an Excel serial (fractional days) to a timestamp
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 || serial > 2_958_465.0 {
        return None;
    }
    let millis = (serial * 86_400_000.0).round() as i64;
    excel_epoch()?.checked_add_signed(Duration::milliseconds(millis))
}

/// Parse the date (and optional time) formats seen in task templates
pub fn parse_datetime_str(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    const DATETIME_FORMATS: [&str; 5] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%SZ",
        "%Y-%m-%dT%H:%M:%S%.fZ",
        "%Y-%m-%d %H:%M:%S",
    ];
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    // RFC 3339 with an offset
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.naive_utc())
}

/// Calendar date of a cell, if it looks like one
pub fn cell_to_date(value: &CellValue) -> Option<NaiveDate> {
    match value {
        CellValue::Date(dt) => Some(dt.date()),
        CellValue::Number(n) => excel_serial_to_datetime(*n).map(|dt| dt.date()),
        CellValue::Text(s) => parse_datetime_str(s).map(|dt| dt.date()),
        CellValue::Empty | CellValue::Bool(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_excel_serial_dates() {
        assert_eq!(excel_serial_to_datetime(45292.0).unwrap().date(), ymd(2024, 1, 1));
        assert_eq!(excel_serial_to_datetime(1.0).unwrap().date(), ymd(1899, 12, 31));

        let noon = excel_serial_to_datetime(45292.5).unwrap();
        assert_eq!(noon.format("%H:%M").to_string(), "12:00");
    }

    #[test]
    fn test_excel_serial_out_of_range() {
        assert!(excel_serial_to_datetime(-1.0).is_none());
        assert!(excel_serial_to_datetime(f64::NAN).is_none());
        assert!(excel_serial_to_datetime(1e12).is_none());
    }

    #[test]
    fn test_parse_datetime_strings() {
        assert_eq!(parse_datetime_str("2024-02-01").unwrap().date(), ymd(2024, 2, 1));
        assert_eq!(parse_datetime_str(" 2024/02/01 ").unwrap().date(), ymd(2024, 2, 1));
        assert_eq!(parse_datetime_str("15/03/2024").unwrap().date(), ymd(2024, 3, 15));
        assert_eq!(
            parse_datetime_str("2024-02-01T10:30:00").unwrap().date(),
            ymd(2024, 2, 1)
        );
        assert_eq!(
            parse_datetime_str("2024-02-01T23:30:00-05:00").unwrap().date(),
            ymd(2024, 2, 2)
        );
        assert!(parse_datetime_str("pending").is_none());
        assert!(parse_datetime_str("").is_none());
    }

    #[test]
    fn test_cell_to_date() {
        assert_eq!(cell_to_date(&CellValue::Number(45292.0)), Some(ymd(2024, 1, 1)));
        assert_eq!(cell_to_date(&CellValue::from("2024-01-01")), Some(ymd(2024, 1, 1)));
        assert_eq!(cell_to_date(&CellValue::Empty), None);
        assert_eq!(cell_to_date(&CellValue::Bool(true)), None);
        assert_eq!(cell_to_date(&CellValue::from("n/a")), None);
    }
}
