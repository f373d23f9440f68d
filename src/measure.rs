use crate::error::Error;

/// The unit of recurrence of a rule.
///
/// Every measure has a singular name (e.g., `dayOfWeek`) and a plural name
/// (e.g., `daysOfWeek`). Both are accepted when parsing a measure, but the
/// plural name is the canonical one. It's what is used when a measure is
/// displayed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Measure {
    Days,
    Weeks,
    Months,
    Years,
    DaysOfWeek,
    DaysOfMonth,
    WeeksOfMonth,
    WeeksOfMonthByDay,
    WeeksOfYear,
    MonthsOfYear,
}

/// The two strategies a rule may use to match dates.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MeasureFamily {
    /// Rules that count whole elapsed units since an anchor date.
    Interval,
    /// Rules that match a date's position within a calendar cycle.
    Calendar,
}

/// The singular and plural name of every measure.
const NAMES: [(Measure, &str, &str); 10] = [
    (Measure::Days, "day", "days"),
    (Measure::Weeks, "week", "weeks"),
    (Measure::Months, "month", "months"),
    (Measure::Years, "year", "years"),
    (Measure::DaysOfWeek, "dayOfWeek", "daysOfWeek"),
    (Measure::DaysOfMonth, "dayOfMonth", "daysOfMonth"),
    (Measure::WeeksOfMonth, "weekOfMonth", "weeksOfMonth"),
    (Measure::WeeksOfMonthByDay, "weekOfMonthByDay", "weeksOfMonthByDay"),
    (Measure::WeeksOfYear, "weekOfYear", "weeksOfYear"),
    (Measure::MonthsOfYear, "monthOfYear", "monthsOfYear"),
];

impl Measure {
    /// Every measure, in canonical order.
    pub const ALL: [Measure; 10] = [
        Measure::Days,
        Measure::Weeks,
        Measure::Months,
        Measure::Years,
        Measure::DaysOfWeek,
        Measure::DaysOfMonth,
        Measure::WeeksOfMonth,
        Measure::WeeksOfMonthByDay,
        Measure::WeeksOfYear,
        Measure::MonthsOfYear,
    ];

    /// Resolve a singular or plural measure name to its measure.
    ///
    /// Plural names resolve to themselves. An absent or empty name returns
    /// a [`Error::MissingMeasure`] error, and a name that isn't one of the
    /// twenty recognized names returns an [`Error::InvalidMeasure`] error.
    pub fn to_plural(measure: Option<&str>) -> Result<Measure, Error> {
        let name = match measure {
            None | Some("") => return Err(Error::MissingMeasure),
            Some(name) => name,
        };
        NAMES
            .iter()
            .find(|&&(_, singular, plural)| name == singular || name == plural)
            .map(|&(measure, _, _)| measure)
            .ok_or_else(|| Error::InvalidMeasure { name: name.to_string() })
    }

    /// Returns the singular name of this measure, e.g., `weekOfMonth`.
    pub fn singular(self) -> &'static str {
        NAMES[self.index()].1
    }

    /// Returns the plural name of this measure, e.g., `weeksOfMonth`.
    ///
    /// This is the canonical name.
    pub fn plural(self) -> &'static str {
        NAMES[self.index()].2
    }

    /// Returns the family of this measure, which determines how rules with
    /// this measure match dates.
    pub fn family(self) -> MeasureFamily {
        match self {
            Measure::Days | Measure::Weeks | Measure::Months | Measure::Years => {
                MeasureFamily::Interval
            }
            Measure::DaysOfWeek
            | Measure::DaysOfMonth
            | Measure::WeeksOfMonth
            | Measure::WeeksOfMonthByDay
            | Measure::WeeksOfYear
            | Measure::MonthsOfYear => MeasureFamily::Calendar,
        }
    }

    fn index(self) -> usize {
        // OK because `NAMES` is in the same order as the variants.
        self as usize
    }
}

impl std::str::FromStr for Measure {
    type Err = Error;

    fn from_str(s: &str) -> Result<Measure, Error> {
        Measure::to_plural(Some(s))
    }
}

impl std::fmt::Display for Measure {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.plural())
    }
}

impl std::fmt::Display for MeasureFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let label = match *self {
            MeasureFamily::Interval => "interval",
            MeasureFamily::Calendar => "calendar",
        };
        f.write_str(label)
    }
}
