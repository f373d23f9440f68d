use std::io::Write;

use recur::{Measure, MeasureFamily};

use crate::args::{self, Usage, flags, positional::Dates};

const USAGE: &'static str = r#"
Print the calendar positions of dates.

For each date, this prints one line with the date followed by its position
for every calendar measure. This is what a calendar rule compares its units
against. Positions that can also be counted from the end of their enclosing
period are printed as `forward/backward`. For example, `31/-1` for
daysOfMonth means the date is both the 31st and the last day of its month.

USAGE:
    recur position <date>...
    recur position < line delimited dates

TIP:
    use -h for short docs and --help for long docs

EXAMPLES:
    Show the positions of the last day of February in a leap year:

        $ recur position 2024-02-29
        2024-02-29 daysOfWeek=4 daysOfMonth=29/-1 weeksOfMonth=5/-1 weeksOfMonthByDay=5/-1 weeksOfYear=9/-44 monthsOfYear=1

    %snip-start%

    Weeks may start on a day other than Monday:

        $ recur position --week-start sun 2024-03-03
        2024-03-03 daysOfWeek=0 daysOfMonth=3/-29 weeksOfMonth=2/-5 weeksOfMonthByDay=1/-5 weeksOfYear=10/-43 monthsOfYear=2

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

    let week_start = config.week_start.get();
    let mut wtr = std::io::stdout().lock();
    dates.try_map(|date| {
        write!(wtr, "{date}")?;
        for measure in Measure::ALL {
            if measure.family() != MeasureFamily::Calendar {
                continue;
            }
            match recur::position_of(date, measure, week_start) {
                Some(position) => write!(wtr, " {measure}={position}")?,
                None => write!(wtr, " {measure}=?")?,
            }
        }
        writeln!(wtr)?;
        Ok(true)
    })?;
    Ok(())
}

#[derive(Debug, Default)]
struct Config {
    week_start: flags::Weekday,
}

impl args::Configurable for Config {
    fn configure(
        &mut self,
        p: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        use lexopt::Arg::*;

        match *arg {
            Long("week-start") => {
                self.week_start = args::flag_value(p, "--week-start")?;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        &[flags::Weekday::USAGE_WEEK_START]
    }
}
