/*!
Match dates against recurrence rules.

A recurrence rule is a statement like "every 2 weeks", "on Mondays and
Fridays" or "on the last day of the month". This crate turns such statements
into a [`Rule`], which can then be asked whether a particular date satisfies
it relative to a start date.

Rules come in two families, determined by their [`Measure`]:

* **Interval** rules (`days`, `weeks`, `months` and `years`) count the number
of whole units elapsed since the start date. A date matches when that count
is a multiple of one of the rule's units. Dates before the start never match.
* **Calendar** rules (`daysOfWeek`, `daysOfMonth`, `weeksOfMonth`,
`weeksOfMonthByDay`, `weeksOfYear` and `monthsOfYear`) match a date's
position within a calendar cycle. The start date is irrelevant. Negative
units count backwards from the end, so `-1` with `daysOfMonth` is the last
day of every month.

Generating occurrences and combining rules is left to the caller. This crate
only provides the matching kernel.

# Example

```
use jiff::civil::date;

let every_other_week = recur::create_rule(Some(2i64.into()), Some("week"))?;
let start = date(2024, 1, 1);
assert!(every_other_week.matches(date(2024, 1, 15), start));
assert!(!every_other_week.matches(date(2024, 1, 8), start));

let weekends: recur::UnitsInput = ["sat", "sun"].into_iter().collect();
let weekends = recur::create_rule(Some(weekends), Some("daysOfWeek"))?;
assert!(weekends.matches(date(2024, 1, 6), start));
assert!(!weekends.matches(date(2024, 1, 8), start));

# Ok::<(), recur::Error>(())
```
*/

pub use crate::{
    calendar::weekday_from_name,
    error::Error,
    interval::Alignment,
    measure::{Measure, MeasureFamily},
    position::{Position, difference, position_of},
    rule::{Rule, RuleBuilder, create_rule},
    units::{UnitValue, UnitsInput, normalize},
};

mod calendar;
mod error;
mod interval;
mod measure;
mod position;
mod rule;
mod units;
mod weekdate;
