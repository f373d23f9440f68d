use std::sync::Arc;

use jiff::civil::{Date, Weekday};

use crate::{
    calendar::CalendarMatcher,
    error::Error,
    interval::{Alignment, IntervalMatcher},
    measure::{Measure, MeasureFamily},
    units::{self, UnitValue, UnitsInput},
};

/// Create a recurrence rule from raw units and a measure name.
///
/// The measure may be given by its singular or plural name, e.g., `week` or
/// `weeks`. The units may be a single number or label, a list of them or a
/// label set. See [`normalize`](crate::normalize) for details.
///
/// This uses the default configuration. Use [`Rule::builder`] to start weeks
/// on a day other than Monday, or to require interval rules to land exactly
/// on a whole number of units.
///
/// # Errors
///
/// This returns an error when the measure or units are absent, when the
/// measure isn't recognized, when the units are empty or when a unit isn't
/// valid for the measure.
pub fn create_rule(
    units: Option<UnitsInput>,
    measure: Option<&str>,
) -> Result<Rule, Error> {
    let measure = Measure::to_plural(measure)?;
    let units = units::normalize(units)?;
    Rule::builder(measure).units(units).build()
}

/// A recurrence rule.
///
/// A rule pairs a [`Measure`] with a set of units, and answers one question:
/// does a given date satisfy the rule, relative to a start date?
///
/// Rules are immutable and cheap to clone.
#[derive(Clone, Debug)]
pub struct Rule {
    inner: Arc<RuleInner>,
}

#[derive(Debug)]
struct RuleInner {
    measure: Measure,
    units: Box<[UnitValue]>,
    kind: RuleKind,
}

#[derive(Debug)]
enum RuleKind {
    Interval(IntervalMatcher),
    Calendar(CalendarMatcher),
}

impl Rule {
    /// Returns a builder for a rule with the given measure.
    pub fn builder(measure: Measure) -> RuleBuilder {
        RuleBuilder::new(measure)
    }

    /// Returns true when `date` satisfies this rule.
    ///
    /// For interval rules, `start` is the anchor that elapsed units are
    /// counted from, and dates before it never match. For calendar rules,
    /// `start` is ignored.
    pub fn matches(&self, date: Date, start: Date) -> bool {
        match self.inner.kind {
            RuleKind::Interval(ref m) => m.matches(date, start),
            RuleKind::Calendar(ref m) => m.matches(date),
        }
    }

    /// Returns the normalized units of this rule, in the order given.
    pub fn units(&self) -> &[UnitValue] {
        &self.inner.units
    }

    /// Returns the measure of this rule.
    pub fn measure(&self) -> Measure {
        self.inner.measure
    }

    /// Returns the family of this rule's measure.
    pub fn family(&self) -> MeasureFamily {
        self.inner.measure.family()
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}: ", self.measure())?;
        for (i, unit) in self.units().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{unit}")?;
        }
        Ok(())
    }
}

/// A builder for a [`Rule`].
#[derive(Clone, Debug)]
pub struct RuleBuilder {
    measure: Measure,
    units: Vec<UnitValue>,
    week_start: Weekday,
    alignment: Alignment,
}

impl RuleBuilder {
    fn new(measure: Measure) -> RuleBuilder {
        RuleBuilder {
            measure,
            units: vec![],
            week_start: Weekday::Monday,
            alignment: Alignment::Elapsed,
        }
    }

    /// Build the rule.
    ///
    /// This fails when no units were added, or when a unit isn't valid for
    /// the measure.
    pub fn build(&self) -> Result<Rule, Error> {
        if self.units.is_empty() {
            return Err(Error::EmptyUnits { measure: self.measure });
        }
        let kind = match self.measure.family() {
            MeasureFamily::Interval => RuleKind::Interval(
                IntervalMatcher::new(
                    self.measure,
                    &self.units,
                    self.alignment,
                )?,
            ),
            MeasureFamily::Calendar => RuleKind::Calendar(
                CalendarMatcher::new(
                    self.measure,
                    &self.units,
                    self.week_start,
                )?,
            ),
        };
        log::debug!(
            "built {family} rule for {measure} with units {units:?}",
            family = self.measure.family(),
            measure = self.measure,
            units = self.units,
        );
        let inner = RuleInner {
            measure: self.measure,
            units: self.units.clone().into_boxed_slice(),
            kind,
        };
        Ok(Rule { inner: Arc::new(inner) })
    }

    /// Add units to this rule.
    ///
    /// This may be called multiple times. Units accumulate in the order
    /// given.
    pub fn units<I: Into<UnitsInput>>(&mut self, units: I) -> &mut RuleBuilder {
        // OK because `normalize` only fails on absent units.
        if let Ok(units) = units::normalize(Some(units.into())) {
            self.units.extend(units);
        }
        self
    }

    /// Set the first day of the week.
    ///
    /// This is used by `weeksOfMonth` and `weeksOfYear` rules to determine
    /// where one week ends and the next begins. The default is Monday, which
    /// makes `weeksOfYear` agree with ISO 8601 week numbers.
    pub fn week_start(&mut self, weekday: Weekday) -> &mut RuleBuilder {
        self.week_start = weekday;
        self
    }

    /// Set how interval rules treat dates between whole units.
    ///
    /// The default is [`Alignment::Elapsed`]. This has no effect on calendar
    /// rules.
    pub fn alignment(&mut self, alignment: Alignment) -> &mut RuleBuilder {
        self.alignment = alignment;
        self
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn rule(units: impl Into<UnitsInput>, measure: &str) -> Rule {
        create_rule(Some(units.into()), Some(measure)).unwrap()
    }

    #[test]
    fn every_two_weeks() {
        let r = rule(2i64, "week");
        assert_eq!(r.family(), MeasureFamily::Interval);
        assert_eq!(r.measure(), Measure::Weeks);
        let start = date(2024, 1, 1);
        assert!(r.matches(date(2024, 1, 1), start));
        assert!(!r.matches(date(2024, 1, 8), start));
        assert!(r.matches(date(2024, 1, 15), start));
        assert!(!r.matches(date(2023, 12, 25), start));
    }

    #[test]
    fn mondays_and_fridays() {
        let units: UnitsInput = ["mon", "fri"].into_iter().collect();
        let r = rule(units, "dayOfWeek");
        assert_eq!(r.family(), MeasureFamily::Calendar);
        // The start date is irrelevant.
        for start in [date(1999, 1, 1), date(2024, 1, 1), date(2030, 6, 1)] {
            assert!(r.matches(date(2024, 1, 1), start));
            assert!(!r.matches(date(2024, 1, 2), start));
        }
    }

    #[test]
    fn last_day_of_month_regardless_of_length() {
        let r = rule(-1i64, "dayOfMonth");
        let start = date(2024, 1, 1);
        for d in [
            date(2023, 2, 28),
            date(2024, 2, 29),
            date(2024, 4, 30),
            date(2024, 12, 31),
        ] {
            assert!(r.matches(d, start), "{d} should match");
        }
        assert!(!r.matches(date(2024, 2, 28), start));
    }

    #[test]
    fn label_set_units() {
        let units = UnitsInput::label_set([("jan", true), ("jul", false)]);
        let r = rule(units, "monthsOfYear");
        let start = date(2024, 1, 1);
        assert!(r.matches(date(2024, 1, 20), start));
        assert!(r.matches(date(2024, 7, 20), start));
        assert!(!r.matches(date(2024, 2, 20), start));
    }

    #[test]
    fn introspection_is_stable() {
        let units: UnitsInput = [1i64, 15].into_iter().collect();
        let r = rule(units, "daysOfMonth");
        let clone = r.clone();
        assert_eq!(r.units(), clone.units());
        assert_eq!(r.units(), r.units());
        assert_eq!(r.units(), &[UnitValue::Int(1), UnitValue::Int(15)]);
        assert_eq!(r.measure().plural(), "daysOfMonth");
        assert_eq!(r.to_string(), "daysOfMonth: 1, 15");
    }

    #[test]
    fn measure_is_always_plural() {
        for measure in Measure::ALL {
            let units: UnitsInput = 1i64.into();
            let from_singular = rule(units.clone(), measure.singular());
            let from_plural = rule(units, measure.plural());
            assert_eq!(from_singular.measure(), measure);
            assert_eq!(from_plural.measure(), measure);
            assert_eq!(from_singular.measure().to_string(), measure.plural());
        }
    }

    #[test]
    fn errors() {
        assert_eq!(
            create_rule(None, Some("week")).unwrap_err(),
            Error::MissingUnits,
        );
        assert_eq!(
            create_rule(Some(1i64.into()), None).unwrap_err(),
            Error::MissingMeasure,
        );
        assert_eq!(
            create_rule(Some(1i64.into()), Some("fortnight")).unwrap_err(),
            Error::InvalidMeasure { name: "fortnight".to_string() },
        );
        assert_eq!(
            create_rule(Some(0i64.into()), Some("days")).unwrap_err(),
            Error::InvalidPeriod { unit: UnitValue::Int(0) },
        );
        assert_eq!(
            create_rule(Some(UnitsInput::LabelSet(vec![])), Some("day"))
                .unwrap_err(),
            Error::EmptyUnits { measure: Measure::Days },
        );
        // The measure is checked before the units.
        assert_eq!(create_rule(None, None).unwrap_err(), Error::MissingMeasure);
    }

    #[test]
    fn builder_configuration() {
        let r = Rule::builder(Measure::Weeks)
            .units(2i64)
            .alignment(Alignment::Exact)
            .build()
            .unwrap();
        let start = date(2024, 1, 1);
        assert!(r.matches(date(2024, 1, 15), start));
        assert!(!r.matches(date(2024, 1, 16), start));

        // March 2024 begins on a Friday. With Sunday weeks, the 3rd is in
        // the second week. With Monday weeks, the 4th is.
        let sunday = Rule::builder(Measure::WeeksOfMonth)
            .units(2i64)
            .week_start(Weekday::Sunday)
            .build()
            .unwrap();
        let monday =
            Rule::builder(Measure::WeeksOfMonth).units(2i64).build().unwrap();
        assert!(sunday.matches(date(2024, 3, 3), start));
        assert!(!monday.matches(date(2024, 3, 3), start));
        assert!(monday.matches(date(2024, 3, 4), start));
    }

    #[test]
    fn builder_accumulates_units() {
        let r = Rule::builder(Measure::DaysOfWeek)
            .units("sat")
            .units(vec![UnitValue::from("sun")])
            .build()
            .unwrap();
        assert_eq!(r.units().len(), 2);
        assert!(r.matches(date(2024, 1, 6), date(2024, 1, 1)));
        assert!(r.matches(date(2024, 1, 7), date(2024, 1, 1)));
        assert_eq!(
            Rule::builder(Measure::Days).build().unwrap_err(),
            Error::EmptyUnits { measure: Measure::Days },
        );
    }

    #[test]
    fn rules_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Rule>();
    }
}
