//! Date-range series for the chart views.
//!
//! The backend only returns days that have data. [`fill_daily`] expands that
//! into one point per calendar day of the requested range (zero-filled) and
//! [`bucket`] rolls the daily points up into weeks or months.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::api::ValidationError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DAY_LABEL_FORMAT: &str = "%d %b %Y";
pub const MONTH_LABEL_FORMAT: &str = "%b %Y";

/// Inclusive calendar range, start never after end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvertedDateRange);
        }
        Ok(Self { start, end })
    }

    /// Parses two `YYYY-MM-DD` form values
    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        let (start, end) = (start.trim(), end.trim());
        if start.is_empty() || end.is_empty() {
            return Err(ValidationError::MissingDateRange);
        }
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of calendar days, both ends included
    pub fn day_count(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    pub fn start_str(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    // Backend timestamps ("2024-01-05T00:00:00Z") carry the date in the first 10 chars
    let date_part = raw.trim().get(..10).unwrap_or(raw.trim());
    NaiveDate::parse_from_str(date_part, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(raw.trim().to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Day,
    Week,
    Month,
}

impl Granularity {
    pub fn display_name(&self) -> &'static str {
        match self {
            Granularity::Day => "Harian",
            Granularity::Week => "Mingguan",
            Granularity::Month => "Bulanan",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
        }
    }

    pub fn all() -> Vec<Granularity> {
        vec![Granularity::Day, Granularity::Week, Granularity::Month]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|g| g.code() == code)
    }
}

/// One source value on a date
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatedValue {
    pub date: NaiveDate,
    pub value: f64,
}

/// One chart point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

/// One value per day of `range`; same-day values are summed, days without
/// data are zero, values outside the range are ignored.
pub fn fill_daily(range: &DateRange, points: &[DatedValue]) -> Vec<DatedValue> {
    let mut daily: Vec<DatedValue> = range
        .days()
        .map(|date| DatedValue { date, value: 0.0 })
        .collect();
    for point in points.iter().filter(|p| range.contains(p.date)) {
        let offset = (point.date - range.start).num_days() as usize;
        daily[offset].value += point.value;
    }
    daily
}

/// Rolls daily points up. Day passes through; week (ISO, Monday start,
/// clipped to the data) and month average every day in the bucket.
pub fn bucket(daily: &[DatedValue], granularity: Granularity) -> Vec<SeriesPoint> {
    match granularity {
        Granularity::Day => daily
            .iter()
            .map(|p| SeriesPoint {
                label: p.date.format(DAY_LABEL_FORMAT).to_string(),
                value: p.value,
            })
            .collect(),
        Granularity::Week => roll_up(
            daily,
            |d| {
                let week = d.iso_week();
                (week.year(), week.week())
            },
            |first, last| {
                format!(
                    "{} - {}",
                    first.format(DAY_LABEL_FORMAT),
                    last.format(DAY_LABEL_FORMAT)
                )
            },
        ),
        Granularity::Month => roll_up(
            daily,
            |d| (d.year(), d.month()),
            |first, _| first.format(MONTH_LABEL_FORMAT).to_string(),
        ),
    }
}

fn roll_up<K, FK, FL>(daily: &[DatedValue], key_of: FK, label_of: FL) -> Vec<SeriesPoint>
where
    K: PartialEq,
    FK: Fn(NaiveDate) -> K,
    FL: Fn(NaiveDate, NaiveDate) -> String,
{
    let mut out = Vec::new();
    let mut start = 0;
    while start < daily.len() {
        let key = key_of(daily[start].date);
        let mut end = start;
        while end + 1 < daily.len() && key_of(daily[end + 1].date) == key {
            end += 1;
        }
        let slice = &daily[start..=end];
        let sum: f64 = slice.iter().map(|p| p.value).sum();
        out.push(SeriesPoint {
            label: label_of(slice[0].date, slice[slice.len() - 1].date),
            value: sum / slice.len() as f64,
        });
        start = end + 1;
    }
    out
}

/// `fill_daily` followed by `bucket`
pub fn build_series(
    range: &DateRange,
    points: &[DatedValue],
    granularity: Granularity,
) -> Vec<SeriesPoint> {
    bucket(&fill_daily(range, points), granularity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_fill_daily_zero_fills_missing_days() {
        let range = DateRange::parse("2024-01-01", "2024-01-03").unwrap();
        let points = vec![DatedValue { date: d("2024-01-01"), value: 10.0 }];
        let series = build_series(&range, &points, Granularity::Day);
        assert_eq!(
            series,
            vec![
                SeriesPoint { label: "01 Jan 2024".into(), value: 10.0 },
                SeriesPoint { label: "02 Jan 2024".into(), value: 0.0 },
                SeriesPoint { label: "03 Jan 2024".into(), value: 0.0 },
            ]
        );
    }

    #[test]
    fn test_day_count_matches_point_count() {
        let range = DateRange::parse("2024-02-20", "2024-03-05").unwrap();
        assert_eq!(range.day_count(), 15);
        assert_eq!(fill_daily(&range, &[]).len(), 15);
    }

    #[test]
    fn test_same_day_values_sum_and_outside_values_drop() {
        let range = DateRange::parse("2024-01-01", "2024-01-02").unwrap();
        let points = vec![
            DatedValue { date: d("2024-01-02"), value: 1.5 },
            DatedValue { date: d("2024-01-02"), value: 2.5 },
            DatedValue { date: d("2023-12-31"), value: 99.0 },
        ];
        let daily = fill_daily(&range, &points);
        assert_eq!(daily[0].value, 0.0);
        assert_eq!(daily[1].value, 4.0);
    }

    #[test]
    fn test_week_buckets_clip_to_range_and_average() {
        // 2024-01-05 is a Friday; ISO week 1 of 2024 ends Sunday 2024-01-07
        let range = DateRange::parse("2024-01-05", "2024-01-09").unwrap();
        let points = vec![
            DatedValue { date: d("2024-01-05"), value: 30.0 },
            DatedValue { date: d("2024-01-08"), value: 10.0 },
        ];
        let series = build_series(&range, &points, Granularity::Week);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label, "05 Jan 2024 - 07 Jan 2024");
        assert_eq!(series[0].value, 10.0);
        assert_eq!(series[1].label, "08 Jan 2024 - 09 Jan 2024");
        assert_eq!(series[1].value, 5.0);
    }

    #[test]
    fn test_month_buckets_are_chronological() {
        let range = DateRange::parse("2024-01-31", "2024-02-02").unwrap();
        let points = vec![
            DatedValue { date: d("2024-01-31"), value: 8.0 },
            DatedValue { date: d("2024-02-01"), value: 6.0 },
        ];
        let series = build_series(&range, &points, Granularity::Month);
        let labels: Vec<&str> = series.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Jan 2024", "Feb 2024"]);
        assert_eq!(series[0].value, 8.0);
        assert_eq!(series[1].value, 3.0);
    }

    #[test]
    fn test_range_validation() {
        assert_eq!(
            DateRange::parse("", "2024-01-01"),
            Err(ValidationError::MissingDateRange)
        );
        assert_eq!(
            DateRange::parse("2024-02-01", "2024-01-01"),
            Err(ValidationError::InvertedDateRange)
        );
        assert!(matches!(
            DateRange::parse("01/02/2024", "2024-03-01"),
            Err(ValidationError::InvalidDate(_))
        ));
        let single = DateRange::parse("2024-01-01", "2024-01-01").unwrap();
        assert_eq!(single.day_count(), 1);
    }

    #[test]
    fn test_parse_date_accepts_timestamps() {
        assert_eq!(parse_date("2024-01-05T00:00:00Z").unwrap(), d("2024-01-05"));
    }
}
