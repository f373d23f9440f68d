use jiff::civil;

use crate::args::Usage;

/// Provides parsing for Jiff's civil `Weekday` type.
#[derive(Clone, Debug)]
pub struct Weekday {
    weekday: civil::Weekday,
}

impl Weekday {
    pub const USAGE_WEEK_START: Usage = Usage::flag(
        "--week-start <weekday>",
        "The weekday on which weeks start (defaults to Monday).",
        r#"
The weekday on which weeks start (defaults to Monday).

This determines the boundaries of weeks for the weeksOfMonth and weeksOfYear
measures. With Monday, weeksOfYear agrees with ISO 8601 week numbers.

Any day of the week may be given. They can be specified in the following way
(without regard for case):

Sunday, Sun, SU

Monday, Mon, MO

Tuesday, Tues, Tue, TU

Wednesday, Wed, WE

Thursday, Thurs, Thu, TH

Friday, Fri, FR

Saturday, Sat, SA
"#,
    );

    /// Return the parsed weekday.
    pub fn get(&self) -> civil::Weekday {
        self.weekday
    }
}

impl Default for Weekday {
    fn default() -> Weekday {
        Weekday { weekday: civil::Weekday::Monday }
    }
}

impl std::str::FromStr for Weekday {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Weekday> {
        let Some(weekday) = recur::weekday_from_name(s) else {
            anyhow::bail!("unrecognized weekday: `{s}`")
        };
        Ok(Weekday { weekday })
    }
}

/// Provides parsing for the units of a recurrence rule.
///
/// Units are parsed as JSON when possible, which permits every shape a rule
/// accepts: `2`, `"mon"`, `[1, -1]` or `{"jan": true, "jul": true}`.
/// Otherwise, the value is split on commas, and each item becomes an integer
/// unit if it parses as one or a label if not. So `mon,fri` and `1,-1` work
/// without any quoting.
#[derive(Clone, Debug)]
pub struct Units {
    units: recur::UnitsInput,
}

impl Units {
    pub const USAGE: Usage = Usage::arg(
        "<units>",
        "The units of the rule, e.g., `2`, `mon,fri` or `-1`.",
        r#"
The units of the rule, e.g., `2`, `mon,fri` or `-1`.

For interval measures, units are periods. `2` with `weeks` means "every 2
weeks." Multiple periods match when any of them do.

For calendar measures, units are positions. Negative positions count
backwards from the end, so `-1` with `daysOfMonth` is the last day of every
month. Weekday names may be used with daysOfWeek (where Sunday is 0) and month
names with monthsOfYear (where January is 0).

Units may be given as JSON, e.g., `[1,15]` or `{"mon":true,"fri":true}`, or as
a comma separated list, e.g., `1,15` or `mon,fri`.
"#,
    );

    /// Return the parsed units.
    pub fn get(&self) -> recur::UnitsInput {
        self.units.clone()
    }
}

impl std::str::FromStr for Units {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Units> {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(s) {
            let units = recur::UnitsInput::from_json(&value)?;
            return Ok(Units { units });
        }
        let mut units = vec![];
        for item in s.split(",").map(|item| item.trim()) {
            anyhow::ensure!(
                !item.is_empty(),
                "empty units are not allowed in sequence `{s}`",
            );
            units.push(match item.parse::<i64>() {
                Ok(n) => recur::UnitValue::Int(n),
                Err(_) => recur::UnitValue::from(item),
            });
        }
        Ok(Units { units: recur::UnitsInput::Sequence(units) })
    }
}
