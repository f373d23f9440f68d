use std::io::BufRead;

use {anyhow::Context, jiff::civil::Date};

use crate::args::{Configurable, Usage};

/// The CLI parsing configuration for reading dates.
///
/// This will greedily consume all remaining positional arguments as dates.
///
/// When there are no positional arguments to consume, then this will read
/// dates from `stdin` in a line delimited fashion. Blank lines are skipped.
#[derive(Clone, Debug, Default)]
pub struct Dates {
    positional: Vec<String>,
}

impl Dates {
    pub const USAGE: Usage = Usage::arg(
        "<date>...",
        "Dates in `YYYY-MM-DD` format. Read from stdin when absent.",
        r#"
Dates in `YYYY-MM-DD` format. Read from stdin when absent.

Any number of dates may be given as positional arguments. When none are given,
dates are read from stdin, one per line.
"#,
    );

    /// Run the given function over each date read from the CLI.
    ///
    /// If there were no positional dates, then this tries to read them
    /// from stdin, one per line.
    ///
    /// Iteration stops when the closure returns false or returns an error.
    pub fn try_map(
        self,
        mut f: impl FnMut(Date) -> anyhow::Result<bool>,
    ) -> anyhow::Result<()> {
        if !self.positional.is_empty() {
            for arg in self.positional {
                if !f(parse_date(&arg)?)? {
                    return Ok(());
                }
            }
            return Ok(());
        }
        for (i, line) in std::io::stdin().lock().lines().enumerate() {
            let line = line.context("failed to read from <stdin>")?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let date = parse_date(line)
                .with_context(|| format!("line {} of <stdin>", i + 1))?;
            if !f(date)? {
                break;
            }
        }
        Ok(())
    }
}

impl Configurable for Dates {
    fn configure(
        &mut self,
        _: &mut lexopt::Parser,
        arg: &mut lexopt::Arg,
    ) -> anyhow::Result<bool> {
        match *arg {
            lexopt::Arg::Value(ref mut v) => {
                let v = std::mem::take(v);
                let v = v.into_string().map_err(|arg| {
                    anyhow::anyhow!(
                        "recur requires that positional arguments \
                         be valid UTF-8, but `{arg:?}` is not valid UTF-8",
                    )
                })?;
                self.positional.push(v);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        &[Dates::USAGE]
    }
}

/// Parses a civil date, e.g., `2024-01-15`.
pub fn parse_date(s: &str) -> anyhow::Result<Date> {
    s.parse::<Date>().with_context(|| format!("invalid date `{s}`"))
}
