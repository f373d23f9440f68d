use lexopt::{Arg, ValueExt};

use crate::args::{Help, Version};

mod matching;
mod measures;
mod position;

type Run = fn(&mut lexopt::Parser) -> anyhow::Result<()>;

/// Every subcommand, with a one line summary.
const COMMANDS: &[(&str, &str, Run)] = &[
    ("match", "Print the dates that satisfy a recurrence rule", matching::run),
    ("measures", "List every measure a rule may use", measures::run),
    ("position", "Print the calendar positions of dates", position::run),
];

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let name = match p.next()? {
        Some(Arg::Value(name)) => name.string()?,
        Some(Arg::Short('h') | Arg::Long("help")) => {
            return Err(Help::new(usage()).into());
        }
        Some(Arg::Long("version")) => return Err(Version.into()),
        Some(arg) => return Err(arg.unexpected().into()),
        None => anyhow::bail!("{}", usage()),
    };
    let Some(&(_, _, run)) = COMMANDS.iter().find(|c| c.0 == name) else {
        anyhow::bail!("unrecognized command '{name}'")
    };
    run(p)
}

fn usage() -> String {
    let width = COMMANDS.iter().map(|c| c.0.len()).max().unwrap_or(0);
    let commands: String = COMMANDS
        .iter()
        .map(|&(name, summary, _)| format!("    {name:width$}  {summary}\n"))
        .collect();
    format!(
        "A simple utility for matching dates against recurrence rules.\n\
         \n\
         USAGE:\n    recur <command> ...\n\
         \n\
         COMMANDS:\n{}",
        commands.trim_end(),
    )
}
