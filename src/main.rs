use std::{io::Write, process::ExitCode};

mod args;
mod cmd;
mod logger;

/// Again and again, on schedule.
fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(err),
    }
}

fn run() -> anyhow::Result<()> {
    logger::init()?;
    cmd::run(&mut lexopt::Parser::from_env())
}

/// Print an error from `run` and return the exit code for it.
///
/// Help and version output also travel as errors, but they go to stdout and
/// aren't failures. Neither is a broken pipe, e.g. from `recur ... | head`.
fn report(err: anyhow::Error) -> ExitCode {
    let root = err.root_cause();
    if root.is::<args::Help>() || root.is::<args::Version>() {
        // Nothing sensible to do if stdout is gone too.
        let _ = writeln!(std::io::stdout(), "{root}");
        return ExitCode::SUCCESS;
    }
    let broken_pipe = err.chain().any(|cause| {
        cause
            .downcast_ref::<std::io::Error>()
            .is_some_and(|e| e.kind() == std::io::ErrorKind::BrokenPipe)
    });
    if broken_pipe {
        return ExitCode::SUCCESS;
    }
    if std::env::var_os("RUST_BACKTRACE").is_some_and(|v| v == "1") {
        let _ = writeln!(std::io::stderr(), "{err:?}");
    } else {
        let _ = writeln!(std::io::stderr(), "{err:#}");
    }
    ExitCode::FAILURE
}
