/*!
Date arithmetic that rules are evaluated against.

Interval rules need the number of whole units elapsed between two dates, and
calendar rules need the position of a date within a calendar cycle. Both are
computed here on top of `jiff::civil::Date`.
*/

use jiff::{
    Span, Unit,
    civil::{Date, Weekday},
};

use crate::{measure::Measure, weekdate::WeekDate};

/// The position of a date for a single calendar measure.
///
/// Most measures have two conventions: counting forward from the start of
/// the enclosing period (`1` is the first day, week or occurrence) and
/// counting backward from its end (`-1` is the last one).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Position {
    /// The position counted from the start of the enclosing period.
    pub forward: i64,
    /// The position counted from the end of the enclosing period, when the
    /// measure supports it. This is always negative.
    pub backward: Option<i64>,
}

impl Position {
    fn forward(forward: i64) -> Position {
        Position { forward, backward: None }
    }

    fn both(forward: i64, backward: i64) -> Position {
        Position { forward, backward: Some(backward) }
    }

    /// Returns true when `unit` names this position.
    ///
    /// Positive units are compared against the forward position and
    /// negative units against the backward position. A positive unit never
    /// matches a backward position and vice versa.
    pub fn contains(&self, unit: i64) -> bool {
        if unit < 0 { self.backward == Some(unit) } else { self.forward == unit }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.backward {
            None => write!(f, "{}", self.forward),
            Some(backward) => write!(f, "{}/{}", self.forward, backward),
        }
    }
}

/// Returns the position of `date` for the given calendar measure.
///
/// `week_start` is the first day of the week. It is used by
/// `weeksOfMonth` and `weeksOfYear`.
///
/// This returns `None` for interval measures, and for `weeksOfYear` when the
/// week year of `date` can't be represented (only possible at the very
/// boundaries of Jiff's supported range).
pub fn position_of(
    date: Date,
    measure: Measure,
    week_start: Weekday,
) -> Option<Position> {
    let day = i64::from(date.day());
    let days_in_month = i64::from(date.days_in_month());
    let position = match measure {
        Measure::Days | Measure::Weeks | Measure::Months | Measure::Years => {
            return None;
        }
        Measure::DaysOfWeek => {
            Position::forward(i64::from(date.weekday().to_sunday_zero_offset()))
        }
        Measure::DaysOfMonth => Position::both(day, day - days_in_month - 1),
        Measure::WeeksOfMonth => {
            // How far into its week the first of the month falls.
            let lead =
                i64::from(date.first_of_month().weekday().since(week_start));
            let forward = (day - 1 + lead) / 7 + 1;
            let total = (days_in_month - 1 + lead) / 7 + 1;
            Position::both(forward, forward - total - 1)
        }
        Measure::WeeksOfMonthByDay => {
            let forward = (day - 1) / 7 + 1;
            let backward = -((days_in_month - day) / 7) - 1;
            Position::both(forward, backward)
        }
        Measure::WeeksOfYear => {
            let wd = match WeekDate::from_date(week_start, date) {
                Ok(wd) => wd,
                Err(err) => {
                    log::debug!("no week of year for {date}: {err:#}");
                    return None;
                }
            };
            let forward = i64::from(wd.week());
            let total = i64::from(wd.weeks_in_year());
            Position::both(forward, forward - total - 1)
        }
        Measure::MonthsOfYear => Position::forward(i64::from(date.month() - 1)),
    };
    Some(position)
}

/// Returns the number of whole units of the given interval measure that
/// have elapsed from `start` to `date`.
///
/// The count is truncated toward zero and is negative when `date` comes
/// before `start`. Months and years count as elapsed once `start` plus that
/// many units, clamped to the end of the month, has been reached. So from
/// `2024-01-31`, `2024-02-29` is one whole month, `2024-03-30` is still one
/// and `2024-04-30` is three.
///
/// This returns `None` for calendar measures, or if Jiff can't compute the
/// difference.
pub fn difference(date: Date, start: Date, measure: Measure) -> Option<i64> {
    let unit = unit_of(measure)?;
    let span = match date.since((unit, start)) {
        Ok(span) => span,
        Err(err) => {
            log::debug!(
                "failed to compute {measure} between {start} and {date}: {err}",
            );
            return None;
        }
    };
    let mut elapsed = match unit {
        Unit::Year => i64::from(span.get_years()),
        Unit::Month => i64::from(span.get_months()),
        Unit::Week => i64::from(span.get_weeks()),
        _ => i64::from(span.get_days()),
    };
    // Jiff doesn't count a step that was clamped to the end of the month,
    // e.g., 2024-01-31 to 2024-02-29, as a whole month.
    if matches!(unit, Unit::Year | Unit::Month) && elapsed >= 0 {
        let next = elapsed + 1;
        if advance(start, measure, next).is_some_and(|landed| landed <= date) {
            elapsed = next;
        }
    }
    Some(elapsed)
}

/// Returns `start` plus `count` units of the given interval measure.
///
/// Month and year steps are clamped to the end of the month. This returns
/// `None` for calendar measures, or when the result is out of Jiff's range.
pub(crate) fn advance(start: Date, measure: Measure, count: i64) -> Option<Date> {
    let span = match measure {
        Measure::Days => Span::new().try_days(count),
        Measure::Weeks => Span::new().try_weeks(count),
        Measure::Months => Span::new().try_months(count),
        Measure::Years => Span::new().try_years(count),
        _ => return None,
    };
    match span.and_then(|span| start.checked_add(span)) {
        Ok(landed) => Some(landed),
        Err(err) => {
            log::debug!("failed to add {count} {measure} to {start}: {err}");
            None
        }
    }
}

/// Returns the Jiff unit corresponding to an interval measure.
pub(crate) fn unit_of(measure: Measure) -> Option<Unit> {
    let unit = match measure {
        Measure::Days => Unit::Day,
        Measure::Weeks => Unit::Week,
        Measure::Months => Unit::Month,
        Measure::Years => Unit::Year,
        _ => return None,
    };
    Some(unit)
}
