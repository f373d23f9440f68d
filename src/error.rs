use crate::{measure::Measure, units::UnitValue};

/// An error that can occur when building a recurrence rule.
///
/// Every error is reported at construction time. Once a [`Rule`] exists,
/// asking it whether a date matches can never fail.
///
/// [`Rule`]: crate::Rule
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// No units were given for a recurrence rule.
    #[error("units not defined for recurrence rule")]
    MissingUnits,
    /// The units were given in a shape that can't be turned into a list of
    /// units. For example, a boolean.
    #[error(
        "provide a list, set, string or integer when passing units, \
         but got {found}"
    )]
    InvalidUnitsShape {
        /// A short description of what was given instead.
        found: String,
    },
    /// No measure (or an empty one) was given for a recurrence rule.
    #[error("measure for recurrence rule undefined")]
    MissingMeasure,
    /// A measure was given, but it isn't one of the recognized names.
    #[error("unrecognized measure `{name}`")]
    InvalidMeasure {
        /// The name that was given.
        name: String,
    },
    /// An interval rule was given a period that can't divide an elapsed
    /// count, e.g., zero, a negative number or a non-numeric label.
    #[error(
        "invalid period `{unit}` (periods must be integers greater \
         than or equal to 1)"
    )]
    InvalidPeriod {
        /// The offending unit.
        unit: UnitValue,
    },
    /// A calendar rule was given a label that doesn't correspond to any
    /// position for its measure.
    #[error("invalid unit `{unit}` for measure `{measure}`")]
    InvalidUnit {
        /// The offending unit.
        unit: UnitValue,
        /// The measure the unit was given for.
        measure: Measure,
    },
    /// A rule was built with an empty set of units.
    #[error("at least one unit is required for measure `{measure}`")]
    EmptyUnits {
        /// The measure the rule was being built for.
        measure: Measure,
    },
}
