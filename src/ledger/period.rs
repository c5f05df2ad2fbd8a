//! Billing periods anchored on a custom day of the month.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

pub const MIN_START_DAY: u32 = 1;
pub const MAX_START_DAY: u32 = 31;

/// Which billing period is being viewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodSelector {
    #[default]
    Current,
    Previous,
}

impl PeriodSelector {
    fn month_offset(self) -> i32 {
        match self {
            PeriodSelector::Current => 0,
            PeriodSelector::Previous => -1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PeriodSelector::Current => "current",
            PeriodSelector::Previous => "previous",
        }
    }
}

impl fmt::Display for PeriodSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PeriodSelector {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "current" | "cur" | "this" => Ok(PeriodSelector::Current),
            "previous" | "prev" | "last" => Ok(PeriodSelector::Previous),
            other => Err(LedgerError::validation(format!(
                "unknown period `{other}` (use current or previous)"
            ))),
        }
    }
}

/// Half-open interval `[start, end)` of wall-clock time covered by one
/// billing period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub start_day: u32,
}

impl PeriodRange {
    /// Period that opens in `month` (1-based, any integer; out-of-range
    /// values roll into neighbouring years). `None` when the period falls
    /// outside the representable calendar.
    pub fn for_month(year: i32, month: i32, start_day: u32) -> Option<Self> {
        let (start, end) = compute_period_range(year, month, start_day)?;
        Some(Self {
            start,
            end,
            start_day,
        })
    }

    /// Range that contains nothing, anchored at midnight of `day`.
    pub fn empty_at(day: NaiveDate, start_day: u32) -> Self {
        let midnight = day.and_time(NaiveTime::MIN);
        Self {
            start: midnight,
            end: midnight,
            start_day,
        }
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        at >= self.start && at < self.end
    }

    pub fn year(&self) -> i32 {
        self.start.year()
    }

    pub fn month(&self) -> u32 {
        self.start.month()
    }

    pub fn label(&self) -> String {
        format!(
            "{}-{:02} (settles on day {})",
            self.year(),
            self.month(),
            self.start_day
        )
    }
}

impl fmt::Display for PeriodRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} → {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// Start opens on `start_day` of `month` at midnight; end closes on the same
/// day of the following month at 23:59:59.999. A start day past the end of
/// a month is clamped to that month's last day. Returns `None` when either
/// bound lies outside the calendar chrono can represent.
pub fn compute_period_range(
    year: i32,
    month: i32,
    start_day: u32,
) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let (start_year, start_month) = normalize_month(year, month)?;
    let (end_year, end_month) = normalize_month(year, month.checked_add(1)?)?;
    let start = clamped_date(start_year, start_month, start_day)?.and_time(NaiveTime::MIN);
    let end = clamped_date(end_year, end_month, start_day)?.and_hms_milli_opt(23, 59, 59, 999)?;
    Some((start, end))
}

/// Period selected relative to the calendar month of `today`.
pub fn period_for(
    selector: PeriodSelector,
    today: NaiveDate,
    start_day: u32,
) -> Option<PeriodRange> {
    PeriodRange::for_month(
        today.year(),
        today.month() as i32 + selector.month_offset(),
        start_day,
    )
}

/// The last `count` periods anchored on `today`'s month, oldest first. The
/// walk stops early at the oldest representable period.
pub fn recent_periods(today: NaiveDate, start_day: u32, count: usize) -> Vec<PeriodRange> {
    let mut periods: Vec<PeriodRange> = (0..count)
        .map_while(|back| {
            let month = (today.month() as i32).checked_sub(i32::try_from(back).ok()?)?;
            PeriodRange::for_month(today.year(), month, start_day)
        })
        .collect();
    periods.reverse();
    periods
}

pub fn validate_start_day(day: u32) -> Result<u32, LedgerError> {
    if (MIN_START_DAY..=MAX_START_DAY).contains(&day) {
        Ok(day)
    } else {
        Err(LedgerError::validation(format!(
            "period start day must be between {MIN_START_DAY} and {MAX_START_DAY}, got {day}"
        )))
    }
}

fn normalize_month(year: i32, month: i32) -> Option<(i32, u32)> {
    let index = year.checked_mul(12)?.checked_add(month.checked_sub(1)?)?;
    Some((index.div_euclid(12), index.rem_euclid(12) as u32 + 1))
}

fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let day = day.clamp(1, days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if NaiveDate::from_ymd_opt(year, 2, 29).is_some() => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn range_spans_two_calendar_months() {
        let range = PeriodRange::for_month(2024, 1, 25).unwrap();
        assert_eq!(range.start, at(2024, 1, 25, 0, 0, 0));
        assert_eq!(
            range.end,
            NaiveDate::from_ymd_opt(2024, 2, 25)
                .unwrap()
                .and_hms_milli_opt(23, 59, 59, 999)
                .unwrap()
        );
        assert!(range.contains(at(2024, 1, 25, 0, 0, 0)));
        assert!(range.contains(at(2024, 2, 24, 23, 59, 59)));
        assert!(!range.contains(at(2024, 1, 24, 23, 59, 59)));
    }

    #[test]
    fn day_before_start_belongs_to_previous_period() {
        let january = PeriodRange::for_month(2024, 1, 25).unwrap();
        let december = PeriodRange::for_month(2024, 0, 25).unwrap();
        let on_24th = at(2024, 1, 24, 12, 0, 0);
        assert!(!january.contains(on_24th));
        assert!(december.contains(on_24th));
        assert_eq!(december.start, at(2023, 12, 25, 0, 0, 0));
    }

    #[test]
    fn start_day_past_month_end_is_clamped() {
        let april = PeriodRange::for_month(2024, 4, 31).unwrap();
        assert_eq!(april.start, at(2024, 4, 30, 0, 0, 0));
        assert_eq!(april.end.date(), NaiveDate::from_ymd_opt(2024, 5, 31).unwrap());

        let leap_feb = PeriodRange::for_month(2024, 2, 30).unwrap();
        assert_eq!(leap_feb.start.date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        let feb = PeriodRange::for_month(2023, 2, 31).unwrap();
        assert_eq!(feb.start.date(), NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());

        let january = PeriodRange::for_month(2023, 1, 31).unwrap();
        assert_eq!(january.end.date(), NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());
    }

    #[test]
    fn previous_selector_rolls_back_across_years() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let previous = period_for(PeriodSelector::Previous, today, 1).unwrap();
        assert_eq!(previous.year(), 2023);
        assert_eq!(previous.month(), 12);

        let current = period_for(PeriodSelector::Current, today, 1).unwrap();
        assert_eq!(current.start, at(2024, 1, 1, 0, 0, 0));
    }

    #[test]
    fn recent_periods_are_oldest_first() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let periods = recent_periods(today, 25, 12);
        assert_eq!(periods.len(), 12);
        assert_eq!((periods[0].year(), periods[0].month()), (2023, 4));
        assert_eq!((periods[11].year(), periods[11].month()), (2024, 3));
        assert_eq!(periods[11].label(), "2024-03 (settles on day 25)");
    }

    #[test]
    fn history_stops_at_calendar_limit() {
        let first_year = NaiveDate::MIN.year();
        let today = NaiveDate::from_ymd_opt(first_year + 1, 3, 10).unwrap();
        let periods = recent_periods(today, 25, 1_000);
        assert!(periods.len() < 1_000);
        assert_eq!(periods[0].year(), first_year);
        let newest = periods.last().unwrap();
        assert_eq!((newest.year(), newest.month()), (first_year + 1, 3));
        assert!(periods.windows(2).all(|pair| pair[0].start < pair[1].start));
    }

    #[test]
    fn unrepresentable_months_yield_none() {
        assert!(PeriodRange::for_month(i32::MAX, 1, 1).is_none());
        assert!(PeriodRange::for_month(2024, i32::MIN, 1).is_none());
        assert!(compute_period_range(2024, i32::MAX, 25).is_none());
    }

    #[test]
    fn empty_range_contains_nothing() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let range = PeriodRange::empty_at(day, 25);
        assert!(!range.contains(at(2024, 5, 10, 0, 0, 0)));
    }

    #[test]
    fn start_day_validation() {
        assert_eq!(validate_start_day(1).unwrap(), 1);
        assert_eq!(validate_start_day(31).unwrap(), 31);
        assert!(validate_start_day(0).unwrap_err().is_validation());
        assert!(validate_start_day(32).is_err());
    }

    #[test]
    fn selector_parses_aliases() {
        assert_eq!("prev".parse::<PeriodSelector>().unwrap(), PeriodSelector::Previous);
        assert_eq!("Current".parse::<PeriodSelector>().unwrap(), PeriodSelector::Current);
        assert!("next".parse::<PeriodSelector>().is_err());
    }
}
