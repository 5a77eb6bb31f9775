//! Calendar-month windows.
//!
//! Budgets and statistics are always computed over the month that contains
//! "now" in the user's time zone: from the first day at 00:00 local time up
//! to, but excluding, the first day of the next month.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

/// Half-open time range `[start, end)` stored as UTC instants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Period {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Period {
    /// The calendar month containing `instant`, as seen from `timezone`.
    #[must_use]
    pub fn month_of(instant: DateTime<Utc>, timezone: Tz) -> Self {
        let local = instant.with_timezone(&timezone).date_naive();
        let first = local - Days::new(u64::from(local.day0()));
        let next = first + Months::new(1);

        Self {
            start: local_midnight(timezone, first),
            end: local_midnight(timezone, next),
        }
    }
}

fn local_midnight(timezone: Tz, date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    // When a DST jump skips midnight the day starts right after the gap.
    (0..=2)
        .find_map(|hours| {
            timezone
                .from_local_datetime(&(midnight + TimeDelta::hours(hours)))
                .earliest()
        })
        .unwrap_or_else(|| timezone.from_utc_datetime(&midnight))
        .with_timezone(&Utc)
}

#[cfg(test)]
mod tests {
    use chrono_tz::{
        America::{Argentina::Buenos_Aires, Asuncion},
        Europe::Rome,
        UTC,
    };

    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn month_in_buenos_aires_starts_at_local_midnight() {
        let period = Period::month_of(utc("2024-03-15T12:00:00Z"), Buenos_Aires);
        assert_eq!(period.start, utc("2024-03-01T03:00:00Z"));
        assert_eq!(period.end, utc("2024-04-01T03:00:00Z"));
    }

    #[test]
    fn late_evening_local_time_belongs_to_the_local_month() {
        // 23:30 on March 31st in Buenos Aires is already April in UTC.
        let period = Period::month_of(utc("2024-04-01T02:30:00Z"), Buenos_Aires);
        assert_eq!(period.start, utc("2024-03-01T03:00:00Z"));
    }

    #[test]
    fn december_rolls_over_to_next_year() {
        let period = Period::month_of(utc("2023-12-31T10:00:00Z"), UTC);
        assert_eq!(period.start, utc("2023-12-01T00:00:00Z"));
        assert_eq!(period.end, utc("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn window_follows_dst_offsets() {
        let period = Period::month_of(utc("2024-03-20T12:00:00Z"), Rome);
        assert_eq!(period.start, utc("2024-02-29T23:00:00Z"));
        assert_eq!(period.end, utc("2024-03-31T22:00:00Z"));
    }

    #[test]
    fn leap_february_ends_with_march() {
        let period = Period::month_of(utc("2024-02-10T00:00:00Z"), UTC);
        assert_eq!(period.start, utc("2024-02-01T00:00:00Z"));
        assert_eq!(period.end, utc("2024-03-01T00:00:00Z"));
    }

    #[test]
    fn skipped_midnight_starts_the_month_after_the_gap() {
        // Paraguay moved clocks from 00:00 to 01:00 on 2017-10-01.
        let october = Period::month_of(utc("2017-10-15T12:00:00Z"), Asuncion);
        assert_eq!(october.start, utc("2017-10-01T04:00:00Z"));
        assert_eq!(october.end, utc("2017-11-01T03:00:00Z"));

        let september = Period::month_of(utc("2017-09-15T12:00:00Z"), Asuncion);
        assert_eq!(september.end, october.start);
    }
}
