use jiff::civil::{Date, Weekday};

use crate::{
    error::Error,
    measure::Measure,
    position::{Position, position_of},
    units::UnitValue,
};

/// Matches dates by their position within a calendar cycle.
///
/// The start date plays no part in matching. Only the position of the
/// candidate date (its weekday, day of the month, week of the year and so
/// on) is compared against the units.
#[derive(Clone, Debug)]
pub(crate) struct CalendarMatcher {
    measure: Measure,
    /// Always non-empty. Labels have been resolved to integers.
    positions: Box<[i64]>,
    week_start: Weekday,
}

impl CalendarMatcher {
    /// Build a matcher for a calendar measure from normalized units.
    ///
    /// Integers are taken as is. No range checking is done, so a unit that
    /// can never occur (e.g., `40` for `daysOfMonth`) simply never matches.
    /// Labels are resolved according to the measure: weekday names for
    /// `daysOfWeek`, month names for `monthsOfYear` and integral strings for
    /// every measure.
    pub(crate) fn new(
        measure: Measure,
        units: &[UnitValue],
        week_start: Weekday,
    ) -> Result<CalendarMatcher, Error> {
        let positions = units
            .iter()
            .map(|unit| {
                resolve(measure, unit).ok_or_else(|| Error::InvalidUnit {
                    unit: unit.clone(),
                    measure,
                })
            })
            .collect::<Result<Box<[i64]>, Error>>()?;
        Ok(CalendarMatcher { measure, positions, week_start })
    }

    pub(crate) fn matches(&self, date: Date) -> bool {
        let Some(position) = self.position(date) else { return false };
        self.positions.iter().any(|&unit| position.contains(unit))
    }

    fn position(&self, date: Date) -> Option<Position> {
        position_of(date, self.measure, self.week_start)
    }
}

/// Resolves a single unit to the integer position it names.
fn resolve(measure: Measure, unit: &UnitValue) -> Option<i64> {
    if let Some(n) = unit.to_integer() {
        return Some(n);
    }
    let UnitValue::Label(ref label) = *unit else { return None };
    match measure {
        Measure::DaysOfWeek => weekday_index(label),
        Measure::MonthsOfYear => month_index(label),
        _ => None,
    }
}

/// Returns the index of the named weekday, where Sunday is `0`.
fn weekday_index(name: &str) -> Option<i64> {
    let weekday = weekday_from_name(name)?;
    Some(i64::from(weekday.to_sunday_zero_offset()))
}

/// Parses the name of a weekday, without regard for case.
///
/// Full names (`Monday`), three letter abbreviations (`Mon`) and two letter
/// abbreviations (`MO`) are accepted, along with `Tues` and `Thurs`. These
/// are the names a `daysOfWeek` rule accepts as units.
pub fn weekday_from_name(name: &str) -> Option<Weekday> {
    use jiff::civil::Weekday::*;

    let weekday = match &*name.trim().to_ascii_lowercase() {
        "sunday" | "sun" | "su" => Sunday,
        "monday" | "mon" | "mo" => Monday,
        "tuesday" | "tues" | "tue" | "tu" => Tuesday,
        "wednesday" | "wed" | "we" => Wednesday,
        "thursday" | "thurs" | "thu" | "th" => Thursday,
        "friday" | "fri" | "fr" => Friday,
        "saturday" | "sat" | "sa" => Saturday,
        _ => return None,
    };
    Some(weekday)
}

/// Returns the index of the named month, where January is `0`.
fn month_index(name: &str) -> Option<i64> {
    let month = match &*name.trim().to_ascii_lowercase() {
        "january" | "jan" => 0,
        "february" | "feb" => 1,
        "march" | "mar" => 2,
        "april" | "apr" => 3,
        "may" => 4,
        "june" | "jun" => 5,
        "july" | "jul" => 6,
        "august" | "aug" => 7,
        "september" | "sept" | "sep" => 8,
        "october" | "oct" => 9,
        "november" | "nov" => 10,
        "december" | "dec" => 11,
        _ => return None,
    };
    Some(month)
}
