//! Date-range arithmetic behind the pipeline statistics.
//!
//! A [`RangeKey`] resolves to a half-open `[start, end)` window anchored at
//! "now" together with the immediately preceding window of equal length,
//! which the statistics compare against.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::Serialize;

use crate::domain::types::{CompanyId, ContactId, ManagerId};

string_enum!(
    /// Named relative time window used to scope aggregate queries.
    RangeKey {
        ThisWeek => "this_week",
        ThisMonth => "this_month",
        ThisYear => "this_year",
        Last7Days => "last_7_days",
        Last28Days => "last_28_days",
        Last365Days => "last_365_days",
        All => "all",
    }
);

impl Default for RangeKey {
    fn default() -> Self {
        RangeKey::ThisMonth
    }
}

impl RangeKey {
    /// Parses the `range` query parameter, falling back to `this_month` when
    /// the value is missing or unknown.
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.parse().ok()).unwrap_or_default()
    }
}

/// Half-open `[start, end)` interval in UTC.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateWindow {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// The window of equal duration ending where this one starts.
    pub fn previous(&self) -> Self {
        Self {
            start: self.start - self.duration(),
            end: self.start,
        }
    }

    /// Bounds as naive UTC timestamps, the form stored in the database.
    pub fn naive_bounds(&self) -> (NaiveDateTime, NaiveDateTime) {
        (self.start.naive_utc(), self.end.naive_utc())
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }
}

/// Current and comparison windows; both `None` for [`RangeKey::All`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatsWindows {
    pub current: Option<DateWindow>,
    pub previous: Option<DateWindow>,
}

/// Resolves `range` relative to `now`; calendar ranges follow the local
/// calendar of `now`'s time zone.
pub fn resolve_windows<Tz: TimeZone>(range: RangeKey, now: &DateTime<Tz>) -> StatsWindows {
    let current = current_window(range, now);
    StatsWindows {
        current,
        previous: current.map(|window| window.previous()),
    }
}

fn current_window<Tz: TimeZone>(range: RangeKey, now: &DateTime<Tz>) -> Option<DateWindow> {
    let tz = now.timezone();
    let today = now.date_naive();

    let (start, end) = match range {
        RangeKey::All => return None,
        RangeKey::ThisWeek => {
            let monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
            (
                local_midnight(&tz, monday),
                local_midnight(&tz, monday + Duration::days(7)),
            )
        }
        RangeKey::ThisMonth => {
            let first = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)?;
            let next = if today.month() == 12 {
                NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)?
            } else {
                NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)?
            };
            (local_midnight(&tz, first), local_midnight(&tz, next))
        }
        RangeKey::ThisYear => {
            let first = NaiveDate::from_ymd_opt(today.year(), 1, 1)?;
            let next = NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)?;
            (local_midnight(&tz, first), local_midnight(&tz, next))
        }
        RangeKey::Last7Days => trailing_days(now, 7),
        RangeKey::Last28Days => trailing_days(now, 28),
        RangeKey::Last365Days => trailing_days(now, 365),
    };

    Some(DateWindow { start, end })
}

fn trailing_days<Tz: TimeZone>(now: &DateTime<Tz>, days: i64) -> (DateTime<Utc>, DateTime<Utc>) {
    let end = now.with_timezone(&Utc);
    (end - Duration::days(days), end)
}

/// Midnight of `date` in `tz`, as UTC. When midnight falls into a DST gap
/// the date is interpreted as UTC midnight instead.
fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}

/// Rounds half-up to two decimals.
fn round2(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

/// Percentage change between the previous and current value.
///
/// Always `0` for [`RangeKey::All`]. A zero baseline yields `±100` following
/// the sign of the current value.
pub fn pct_change(range: RangeKey, previous: f64, current: f64) -> f64 {
    if range == RangeKey::All {
        return 0.0;
    }
    if previous == 0.0 {
        return if current > 0.0 {
            100.0
        } else if current < 0.0 {
            -100.0
        } else {
            0.0
        };
    }
    if current == 0.0 && previous > 0.0 {
        return -100.0;
    }
    round2((current - previous) / previous * 100.0)
}

/// Share of won deals among all deals, in percent.
pub fn conversion_rate(won: i64, total: i64) -> f64 {
    if total == 0 {
        0.0
    } else {
        won as f64 / total as f64 * 100.0
    }
}

/// Optional narrowing of the statistics to one owner, company or contact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<ManagerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<CompanyId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<ContactId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn utc_plus_one() -> FixedOffset {
        FixedOffset::east_opt(3600).unwrap()
    }

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<FixedOffset> {
        utc_plus_one().with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn range_key_falls_back_to_this_month() {
        assert_eq!(RangeKey::parse_or_default(None), RangeKey::ThisMonth);
        assert_eq!(RangeKey::parse_or_default(Some("decade")), RangeKey::ThisMonth);
        assert_eq!(RangeKey::parse_or_default(Some("LAST_7_DAYS")), RangeKey::Last7Days);
        assert_eq!(RangeKey::parse_or_default(Some("all")), RangeKey::All);
    }

    #[test]
    fn previous_window_has_equal_duration_for_every_bounded_range() {
        let now = local(2024, 3, 13, 15, 30);
        for range in RangeKey::ALL.iter().copied().filter(|r| *r != RangeKey::All) {
            let windows = resolve_windows(range, &now);
            let current = windows.current.expect("bounded range");
            let previous = windows.previous.expect("bounded range");
            assert_eq!(current.duration(), previous.duration(), "{range}");
            assert_eq!(previous.end, current.start, "{range}");
        }
    }

    #[test]
    fn all_range_is_unbounded() {
        let windows = resolve_windows(RangeKey::All, &local(2024, 3, 13, 15, 30));
        assert_eq!(windows.current, None);
        assert_eq!(windows.previous, None);
    }

    #[test]
    fn this_week_starts_on_local_monday_midnight() {
        let expected_start = local(2025, 3, 10, 0, 0).with_timezone(&Utc);
        for day in [10, 12, 16] {
            let windows = resolve_windows(RangeKey::ThisWeek, &local(2025, 3, day, 23, 59));
            let current = windows.current.unwrap();
            assert_eq!(current.start, expected_start, "day {day}");
            assert_eq!(current.duration(), Duration::days(7));
        }
    }

    #[test]
    fn this_month_spans_calendar_month() {
        let now = local(2024, 12, 20, 8, 0);
        let current = resolve_windows(RangeKey::ThisMonth, &now).current.unwrap();
        assert_eq!(current.start, local(2024, 12, 1, 0, 0).with_timezone(&Utc));
        assert_eq!(current.end, local(2025, 1, 1, 0, 0).with_timezone(&Utc));
        assert!(current.contains(now.with_timezone(&Utc)));
    }

    #[test]
    fn this_year_spans_calendar_year() {
        let current = resolve_windows(RangeKey::ThisYear, &local(2024, 6, 1, 12, 0))
            .current
            .unwrap();
        assert_eq!(current.start, local(2024, 1, 1, 0, 0).with_timezone(&Utc));
        assert_eq!(current.end, local(2025, 1, 1, 0, 0).with_timezone(&Utc));
        assert_eq!(current.duration(), Duration::days(366));
    }

    #[test]
    fn trailing_ranges_end_now() {
        let now = local(2024, 3, 13, 15, 30);
        let current = resolve_windows(RangeKey::Last28Days, &now).current.unwrap();
        assert_eq!(current.end, now.with_timezone(&Utc));
        assert_eq!(current.duration(), Duration::days(28));
    }

    #[test]
    fn pct_change_edge_cases() {
        assert_eq!(pct_change(RangeKey::ThisMonth, 0.0, 0.0), 0.0);
        assert_eq!(pct_change(RangeKey::ThisMonth, 0.0, 3.0), 100.0);
        assert_eq!(pct_change(RangeKey::ThisMonth, 4.0, 0.0), -100.0);
        assert_eq!(pct_change(RangeKey::ThisMonth, 50.0, 75.0), 50.0);
        assert_eq!(pct_change(RangeKey::ThisMonth, 200.0, 100.0), -50.0);
    }

    #[test]
    fn pct_change_is_zero_for_all_range() {
        assert_eq!(pct_change(RangeKey::All, 0.0, 10.0), 0.0);
        assert_eq!(pct_change(RangeKey::All, 10.0, 0.0), 0.0);
        assert_eq!(pct_change(RangeKey::All, 50.0, 75.0), 0.0);
    }

    #[test]
    fn pct_change_rounds_to_two_decimals() {
        assert_eq!(pct_change(RangeKey::Last7Days, 3.0, 4.0), 33.33);
        assert_eq!(pct_change(RangeKey::Last7Days, 3.0, 5.0), 66.67);
        assert_eq!(pct_change(RangeKey::Last7Days, 3.0, 2.0), -33.33);
    }

    #[test]
    fn conversion_rate_handles_empty_pipeline() {
        assert_eq!(conversion_rate(0, 0), 0.0);
        assert_eq!(conversion_rate(1, 4), 25.0);
    }
}
