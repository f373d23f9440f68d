/*!
Command line plumbing shared by the `recur` subcommands.

A subcommand describes itself with a usage template and a list of
[`Configurable`] targets. [`configure`] hands every argument to the targets
until one claims it, and renders the template into short (`-h`) or long
(`--help`) docs from the [`Usage`] entries of the targets.

Templates may contain three kinds of markers:

* `%args%` is replaced with the docs of the positional arguments.
* `%flags%` is replaced with the docs of the flags.
* Anything between `%snip-start%` and `%snip-end%` only appears in the long
docs.
*/

use std::{ffi::OsString, str::FromStr, sync::LazyLock};

use {
    anyhow::Context,
    lexopt::{Arg, Parser, ValueExt},
    regex::{Captures, Regex},
};

pub mod flags;
pub mod positional;

/// Something that claims command line arguments.
pub trait Configurable: std::fmt::Debug {
    /// Handle `arg`, or return `false` if it isn't recognized.
    ///
    /// Flags that take a value read it from `p`.
    fn configure(
        &mut self,
        p: &mut Parser,
        arg: &mut Arg,
    ) -> anyhow::Result<bool>;

    /// Docs for everything `configure` recognizes.
    ///
    /// Positional arguments are listed in the order they're claimed.
    fn usage(&self) -> &[Usage] {
        &[]
    }
}

/// Hand all remaining arguments in `p` to `targets`.
///
/// Targets are tried in order, and every argument must be claimed by one of
/// them. `-h/--help` and `--version` stop parsing with a [`Help`] or
/// [`Version`] error.
pub fn configure(
    p: &mut Parser,
    template: &str,
    targets: &mut [&mut dyn Configurable],
) -> anyhow::Result<()> {
    while let Some(arg) = next_arg(p)? {
        let long_name: String;
        let mut arg = match arg {
            Arg::Short('h') => {
                return Err(Help::new(render(template, targets, false)).into());
            }
            Arg::Long("help") => {
                return Err(Help::new(render(template, targets, true)).into());
            }
            Arg::Long("version") => return Err(Version.into()),
            // The name borrows from `p`, which targets need for values.
            Arg::Long(name) => {
                long_name = name.to_string();
                Arg::Long(&long_name)
            }
            Arg::Short(c) => Arg::Short(c),
            Arg::Value(value) => Arg::Value(value),
        };
        let mut claimed = false;
        for target in targets.iter_mut() {
            if target.configure(p, &mut arg)? {
                claimed = true;
                break;
            }
        }
        anyhow::ensure!(claimed, arg.unexpected());
    }
    Ok(())
}

/// Read the value of a flag and parse it.
///
/// `flag` names the flag in error messages, e.g. `-s/--start`.
pub fn flag_value<T>(p: &mut Parser, flag: &'static str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Into<anyhow::Error>,
{
    let value = p.value().and_then(|v| v.string()).context(flag)?;
    let parsed: anyhow::Result<T> = value.parse().map_err(Into::into);
    parsed.with_context(|| format!("{flag}: invalid value `{value}`"))
}

/// Returns the next argument.
///
/// Negative numbers like `-1` (a common calendar unit) are returned as
/// positional values rather than short flags. So no short flag may be a
/// digit.
fn next_arg(p: &mut Parser) -> Result<Option<Arg<'_>>, lexopt::Error> {
    let negative: Option<OsString> =
        p.try_raw_args().and_then(|mut raw| raw.next_if(is_negative_number));
    if let Some(value) = negative {
        return Ok(Some(Arg::Value(value)));
    }
    p.next()
}

fn is_negative_number(arg: &std::ffi::OsStr) -> bool {
    arg.to_str()
        .and_then(|s| s.strip_prefix('-'))
        .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
}

/// Render a usage template for the given targets.
fn render(
    template: &str,
    targets: &[&mut dyn Configurable],
    long: bool,
) -> String {
    static SNIP: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?ms)^\s*%snip-start%(.*?)%snip-end%\s*$").unwrap()
    });

    let usages: Vec<Usage> =
        targets.iter().flat_map(|t| t.usage().iter().copied()).collect();
    let (mut flags, args): (Vec<Usage>, Vec<Usage>) =
        usages.into_iter().partition(|u| u.flag);
    flags.extend([Help::USAGE, Version::USAGE]);

    let text = SNIP.replace_all(template, |caps: &Captures| {
        if !long {
            return String::new();
        }
        format!("\n{}\n", caps[1].trim_end().trim_start_matches('\n'))
    });
    text.replace("%args%", &Usage::render(&args, long))
        .replace("%flags%", &Usage::render(&flags, long))
        .trim()
        .to_string()
}

/// The docs for a single flag or positional argument.
#[derive(Clone, Copy, Debug)]
pub struct Usage {
    /// Whether this is an optional flag or a positional argument.
    flag: bool,
    /// How the flag or argument is written, e.g. `-s/--start <date>`.
    format: &'static str,
    /// A description that fits on one line next to `format`.
    short: &'static str,
    /// The complete description, in paragraphs separated by blank lines.
    long: &'static str,
}

impl Usage {
    /// Docs for an optional flag.
    pub const fn flag(
        format: &'static str,
        short: &'static str,
        long: &'static str,
    ) -> Usage {
        Usage { flag: true, format, short, long }
    }

    /// Docs for a positional argument.
    pub const fn arg(
        format: &'static str,
        short: &'static str,
        long: &'static str,
    ) -> Usage {
        Usage { flag: false, format, short, long }
    }

    /// Render a list of usages for a section of a usage template.
    ///
    /// Short docs are a two column table of formats and short descriptions.
    /// Long docs put every format on its own line, followed by its long
    /// description, indented and wrapped.
    fn render(usages: &[Usage], long: bool) -> String {
        if long {
            usages.iter().map(Usage::render_long).collect::<Vec<_>>().join("\n")
        } else {
            let width =
                usages.iter().map(|u| u.format.len()).max().unwrap_or(0);
            usages
                .iter()
                .map(|u| format!("    {:width$}  {}\n", u.format, u.short))
                .collect()
        }
    }

    fn render_long(&self) -> String {
        let wrap = textwrap::Options::new(79)
            .initial_indent("        ")
            .subsequent_indent("        ");
        let paragraphs: Vec<String> = self
            .long
            .trim()
            .split("\n\n")
            .map(|paragraph| textwrap::fill(&paragraph.replace('\n', " "), &wrap))
            .collect();
        format!("    {}\n{}\n", self.format, paragraphs.join("\n\n"))
    }
}

/// Help text to print to stdout with a successful exit code.
///
/// `main` finds this by downcasting the error returned from a command.
#[derive(Debug)]
pub struct Help(String);

impl Help {
    const USAGE: Usage = Usage::flag(
        "-h/--help",
        "Print help. Use -h for short docs and --help for long docs.",
        r#"
Print help. Use -h for short docs and --help for long docs.

The short docs list every flag and argument on a single line. The long docs
also include examples.
"#,
    );

    pub fn new(text: impl Into<String>) -> Help {
        Help(text.into())
    }
}

impl std::fmt::Display for Help {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for Help {}

/// A request to print the version of `recur`.
///
/// Like [`Help`], `main` prints this to stdout and exits successfully.
#[derive(Debug)]
pub struct Version;

impl Version {
    const USAGE: Usage = Usage::flag(
        "--version",
        "Print the version of recur.",
        "Print the version of recur.",
    );
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "recur {}", env!("CARGO_PKG_VERSION"))
    }
}

impl std::error::Error for Version {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Words {
        words: Vec<String>,
        loud: bool,
    }

    impl Configurable for Words {
        fn configure(
            &mut self,
            _: &mut Parser,
            arg: &mut Arg,
        ) -> anyhow::Result<bool> {
            match *arg {
                Arg::Long("loud") => self.loud = true,
                Arg::Value(ref v) => {
                    self.words.push(v.to_string_lossy().into_owned());
                }
                _ => return Ok(false),
            }
            Ok(true)
        }

        fn usage(&self) -> &[Usage] {
            const WORDS: Usage = Usage::arg(
                "<word>...",
                "Some words.",
                "Some words.\n\nAny number of them.",
            );
            const LOUD: Usage =
                Usage::flag("--loud", "Shout.", "Shout the words.");
            &[WORDS, LOUD]
        }
    }

    const TEMPLATE: &str = "
Say words.

EXAMPLES:
    $ say hi

    %snip-start%

    $ say --loud hi

    %snip-end%
ARGS:
%args%
OPTIONS:
%flags%
";

    fn parse(args: &[&str]) -> anyhow::Result<Words> {
        let mut words = Words::default();
        let mut p = Parser::from_args(args.iter().copied());
        configure(&mut p, TEMPLATE, &mut [&mut words])?;
        Ok(words)
    }

    #[test]
    fn negative_numbers_are_values() {
        let words = parse(&["-1", "--loud", "-15", "x"]).unwrap();
        assert_eq!(words.words, vec!["-1", "-15", "x"]);
        assert!(words.loud);
        assert!(parse(&["-x"]).is_err());
        assert!(parse(&["--quiet"]).is_err());
    }

    #[test]
    fn short_help() {
        let err = parse(&["-h"]).unwrap_err();
        let help = err.downcast_ref::<Help>().unwrap();
        insta::assert_snapshot!(help, @r"
        Say words.

        EXAMPLES:
            $ say hi

        ARGS:
            <word>...  Some words.

        OPTIONS:
            --loud     Shout.
            -h/--help  Print help. Use -h for short docs and --help for long docs.
            --version  Print the version of recur.
        ");
    }

    #[test]
    fn long_help() {
        let err = parse(&["--help"]).unwrap_err();
        let help = err.downcast_ref::<Help>().unwrap().to_string();
        assert!(help.contains("    $ say hi\n\n    $ say --loud hi\n\nARGS:"));
        assert!(help.contains("    <word>...\n        Some words.\n\n        Any number of them.\n"));
        assert!(!help.contains("%snip"));
    }

    #[test]
    fn version() {
        let err = parse(&["x", "--version"]).unwrap_err();
        assert!(err.downcast_ref::<Version>().is_some());
    }
}
