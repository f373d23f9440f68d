use jiff::civil::Date;

use crate::{
    error::Error,
    measure::Measure,
    position::{advance, difference},
    units::UnitValue,
};

/// How an interval rule treats dates that fall between two whole units.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Alignment {
    /// Only the number of whole units elapsed since the start matters.
    ///
    /// So for "every 2 weeks" starting on `2024-01-01`, every day from
    /// `2024-01-15` through `2024-01-21` matches, since 2 whole weeks have
    /// elapsed for all of them.
    #[default]
    Elapsed,
    /// The date must also land exactly on a whole number of units after the
    /// start.
    ///
    /// So for "every 2 weeks" starting on `2024-01-01`, only `2024-01-15`
    /// matches in the third week. Month and year steps are clamped to the
    /// end of the month, so "every month" starting on `2024-01-31` matches
    /// `2024-02-29`.
    Exact,
}

/// Matches dates by counting whole units elapsed since a start date.
#[derive(Clone, Debug)]
pub(crate) struct IntervalMatcher {
    measure: Measure,
    /// Always non-empty and strictly positive.
    periods: Box<[i64]>,
    alignment: Alignment,
}

impl IntervalMatcher {
    /// Build a matcher for an interval measure from normalized units.
    ///
    /// Every unit must be a positive integer (or a label that parses as
    /// one). Zero would divide by zero, and negative periods don't mean
    /// anything since dates before the start never match.
    pub(crate) fn new(
        measure: Measure,
        units: &[UnitValue],
        alignment: Alignment,
    ) -> Result<IntervalMatcher, Error> {
        let periods = units
            .iter()
            .map(|unit| match unit.to_integer() {
                Some(n) if n >= 1 => Ok(n),
                _ => Err(Error::InvalidPeriod { unit: unit.clone() }),
            })
            .collect::<Result<Box<[i64]>, Error>>()?;
        Ok(IntervalMatcher { measure, periods, alignment })
    }

    pub(crate) fn matches(&self, date: Date, start: Date) -> bool {
        // Whole units are truncated toward zero, so a date less than one
        // unit before the start still has zero elapsed units.
        if date < start {
            return false;
        }
        let Some(elapsed) = difference(date, start, self.measure) else {
            return false;
        };
        if elapsed < 0 {
            return false;
        }
        if !self.periods.iter().any(|&period| elapsed % period == 0) {
            return false;
        }
        match self.alignment {
            Alignment::Elapsed => true,
            Alignment::Exact => self.lands_on(date, start, elapsed),
        }
    }

    /// Returns true when `start` plus `elapsed` units is exactly `date`.
    fn lands_on(&self, date: Date, start: Date, elapsed: i64) -> bool {
        advance(start, self.measure, elapsed) == Some(date)
    }
}
