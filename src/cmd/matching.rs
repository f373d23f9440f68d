use std::io::Write;

use {
    anyhow::Context,
    jiff::civil::Date,
    recur::{Alignment, Measure, MeasureFamily, Rule},
};

use crate::args::{
    self, Usage,
    flags::{self, Units},
    positional::Dates,
};

const USAGE: &'static str = r#"
Print the dates that satisfy a recurrence rule.

A rule is made of a measure and units. Interval measures (days, weeks, months
and years) count whole units elapsed since a start date given by -s/--start.
Calendar measures (daysOfWeek, daysOfMonth, weeksOfMonth, weeksOfMonthByDay,
weeksOfYear and monthsOfYear) match a date's position within the calendar.

Measures may be given in their singular or plural form, e.g., `week` or
`weeks`. Use `recur measures` to list them all.

USAGE:
    recur match <measure> <units> <date>...
    recur match <measure> <units> < line delimited dates

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    Print every other Monday, starting from the first Monday of 2024:

        $ recur match weeks 2 -s 2024-01-01 2024-01-01 2024-01-08 2024-01-15
        2024-01-01
        2024-01-15

    %snip-start%

    Filter a list of dates down to those on a weekend:

        $ cat dates
        2024-01-05
        2024-01-06
        2024-01-07
        2024-01-08
        $ recur match dayOfWeek sat,sun < dates
        2024-01-06
        2024-01-07

    Print the dates that are the last day of their month:

        $ recur match daysOfMonth -1 2024-02-28 2024-02-29 2024-04-30
        2024-02-29
        2024-04-30

    Print the dates that are *not* in January or July:

        $ recur match monthsOfYear '{"jan":true,"jul":true}' -v 2024-01-09 2024-03-09
        2024-03-09

    %snip-end%
REQUIRED ARGUMENTS:
%args%
OPTIONS:
%flags%
"#;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let mut config = Config::default();
    let mut dates = Dates::default();
    args::configure(p, USAGE, &mut [&mut config, &mut dates])?;

    let rule = config.rule()?;
    let start = config.start(&rule)?;
    let mut wtr = std::io::stdout().lock();
    dates.try_map(|date| {
        if rule.matches(date, start) != config.invert {
            writeln!(wtr, "{date}")?;
        }
        Ok(true)
    })?;
    Ok(())
}

#[derive(Debug, Default)]
struct Config {
    measure: Option<Measure>,
    units: Option<Units>,
    start: Option<Date>,
    week_start: flags::Weekday,
    exact: bool,
    invert: bool,
}

impl Config {
    fn rule(&self) -> anyhow::Result<Rule> {
        let measure = self.measure.context("missing required <measure>")?;
        let units = self.units.as_ref().context("missing required <units>")?;
        let rule = Rule::builder(measure)
            .units(units.get())
            .week_start(self.week_start.get())
            .alignment(if self.exact {
                Alignment::Exact
            } else {
                Alignment::Elapsed
            })
            .build()
            .with_context(|| format!("invalid rule for measure `{measure}`"))?;
        log::debug!("matching dates against rule `{rule}`");
        Ok(rule)
    }

    /// Returns the start date to match against.
    ///
    /// Calendar rules ignore the start date, so when it's missing, any date
    /// will do.
    fn start(&self, rule: &Rule) -> anyhow::Result<Date> {
        match (self.start, rule.family()) {
            (Some(start), _) => Ok(start),
            (None, MeasureFamily::Calendar) => Ok(jiff::civil::date(1970, 1, 1)),
            (None, MeasureFamily::Interval) => anyhow::bail!(
                "the -s/--start flag is required for interval measure `{}`",
                rule.measure(),
            ),
        }
    }
}

impl args::Configurable for Config {
    fn configure(
        &mut self,
        p: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        use lexopt::Arg::*;

        match *arg {
            Value(ref v) => {
                if self.measure.is_none() {
                    let v = v.to_str().context("<measure> must be UTF-8")?;
                    self.measure = Some(v.parse()?);
                    return Ok(true);
                }
                if self.units.is_none() {
                    let v = v.to_str().context("<units> must be UTF-8")?;
                    let units = v
                        .parse()
                        .with_context(|| format!("invalid units `{v}`"))?;
                    self.units = Some(units);
                    return Ok(true);
                }
                return Ok(false);
            }
            Short('s') | Long("start") => {
                self.start = Some(args::flag_value(p, "-s/--start")?);
            }
            Long("week-start") => {
                self.week_start = args::flag_value(p, "--week-start")?;
            }
            Long("exact") => {
                self.exact = true;
            }
            Short('v') | Long("invert") => {
                self.invert = true;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        const MEASURE: Usage = Usage::arg(
            "<measure>",
            "The measure of the rule, e.g., `weeks` or `dayOfMonth`.",
            r#"
The measure of the rule, e.g., `weeks` or `dayOfMonth`.

Both singular and plural names are accepted. Use `recur measures` to list
every measure.
"#,
        );
        const START: Usage = Usage::flag(
            "-s/--start <date>",
            "The date interval rules count from.",
            r#"
The date interval rules count from.

This is required for interval measures (days, weeks, months and years). Dates
before the start never match. Calendar measures ignore it.
"#,
        );
        const EXACT: Usage = Usage::flag(
            "--exact",
            "Require interval rules to land exactly on a whole unit.",
            r#"
Require interval rules to land exactly on a whole unit.

By default, an interval rule matches every date for which the number of whole
units elapsed since the start is a multiple of one of its units. So with
`weeks 2` starting on a Monday, every day of every other week matches. With
this flag, only the date that is exactly a whole number of units after the
start matches: every other Monday.
"#,
        );
        const INVERT: Usage = Usage::flag(
            "-v/--invert",
            "Print the dates that don't match instead.",
            r#"
Print the dates that don't match instead.
"#,
        );
        &[
            MEASURE,
            Units::USAGE,
            START,
            flags::Weekday::USAGE_WEEK_START,
            EXACT,
            INVERT,
        ]
    }
}
