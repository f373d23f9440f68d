use std::io::Write;

use recur::Measure;

use crate::args;

const USAGE: &'static str = r#"
List every measure a rule may use.

Each line has the singular name of a measure, its plural name and its family,
separated by tabs. Either name may be used when creating a rule. The plural
name is the canonical one.

Interval measures count whole units elapsed since a start date. Calendar
measures match a date's position within a calendar cycle.

USAGE:
    recur measures

TIP:
    use -h for short docs and --help for long docs

OPTIONS:
%flags%
"#;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    args::configure(p, USAGE, &mut [])?;

    let mut wtr = std::io::stdout().lock();
    for measure in Measure::ALL {
        writeln!(
            wtr,
            "{}\t{}\t{}",
            measure.singular(),
            measure.plural(),
            measure.family(),
        )?;
    }
    Ok(())
}
