/// Utilities for date and time formatting
///
/// Provides consistent date formatting across the application
use chrono::{Local, NaiveDate};
use contracts::shared::series::DATE_FORMAT;

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `YYYY-MM-DD` for `<input type="date">` defaults
pub fn today_str() -> String {
    today().format(DATE_FORMAT).to_string()
}

/// Milliseconds since epoch, as carried by in-page events
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Format ISO date string to DD/MM/YYYY format
/// Example: "2024-03-15" or "2024-03-15T14:02:26Z" -> "15/03/2024"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    match NaiveDate::parse_from_str(date_part, DATE_FORMAT) {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => date_str.to_string(),
    }
}

/// "Senin, 15 Januari 2024" for page headers
pub fn format_long_date(date: NaiveDate) -> String {
    use chrono::Datelike;
    const DAYS: [&str; 7] = ["Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu", "Minggu"];
    const MONTHS: [&str; 12] = [
        "Januari", "Februari", "Maret", "April", "Mei", "Juni", "Juli", "Agustus", "September",
        "Oktober", "November", "Desember",
    ];
    format!(
        "{}, {} {} {}",
        DAYS[date.weekday().num_days_from_monday() as usize],
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15/03/2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15/03/2024");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_date("invalid"), "invalid");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn test_format_long_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(format_long_date(date), "Senin, 15 Januari 2024");
    }
}
