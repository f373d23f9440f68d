/*!
Runs the `recur` binary and snapshots what it did.

A snapshot records whether the command succeeded, its exit code and
everything it wrote to stdout and stderr. The command line, environment and
stdin are attached as `insta` info, so they show up in `cargo insta review`
without being part of the snapshot itself.

Commands are built with an owned builder. Since `recur` reads dates from
stdin, a command can be given stdin directly, or it can be fed the stdout of
another `recur` command with `pipe`.
*/

use std::{
    env::consts::EXE_SUFFIX,
    ffi::{OsStr, OsString},
    io::Write,
    path::PathBuf,
    process, thread,
};

macro_rules! assert_cmd_snapshot {
    ($cmd:expr, @$snapshot:literal $(,)?) => {{
        let snap = $cmd.snapshot();
        let mut settings = insta::Settings::clone_current();
        settings.set_info(&snap.info);
        settings.set_omit_expression(true);
        settings.bind(|| insta::assert_snapshot!(snap.text, @$snapshot));
    }};
}

pub(crate) use assert_cmd_snapshot;

/// The outcome of running a command.
pub struct Snapshot {
    pub info: Info,
    pub text: String,
}

/// What was run, for the `cargo insta review` user interface.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Info {
    args: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    env: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stdin: Option<String>,
    /// Commands whose output was piped into this one, first to last.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    piped_from: Vec<Vec<String>>,
}

/// A `recur` invocation.
#[derive(Clone, Debug)]
pub struct Command {
    program: PathBuf,
    args: Vec<OsString>,
    envs: Vec<(OsString, OsString)>,
    stdin: Option<Vec<u8>>,
    /// The command whose stdout becomes this command's stdin.
    upstream: Option<Box<Command>>,
}

impl Command {
    /// A command for the `recur` binary built alongside these tests.
    pub fn recur() -> Command {
        let program = std::env::current_exe()
            .unwrap()
            .parent()
            .expect("executable's directory")
            .parent()
            .expect("target profile directory")
            .join(format!("recur{EXE_SUFFIX}"));
        Command {
            program,
            args: vec![],
            envs: vec![],
            stdin: None,
            upstream: None,
        }
    }

    pub fn args(
        mut self,
        args: impl IntoIterator<Item = impl AsRef<OsStr>>,
    ) -> Command {
        self.args.extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn env(mut self, key: &str, val: &str) -> Command {
        self.envs.push((key.into(), val.into()));
        self
    }

    /// Feed the given bytes to this command's stdin.
    pub fn stdin(mut self, stdin: impl Into<Vec<u8>>) -> Command {
        self.stdin = Some(stdin.into());
        self
    }

    /// Returns `next` with its stdin set to the stdout of this command.
    ///
    /// This command must succeed when the pipeline runs.
    pub fn pipe(self, mut next: Command) -> Command {
        next.upstream = Some(Box::new(self));
        next
    }

    /// Runs this command, and everything piped into it, and snapshots the
    /// output of this command.
    pub fn snapshot(&self) -> Snapshot {
        let mut piped_from = vec![];
        let stdin = self.resolve_stdin(&mut piped_from);
        let output = self.run(stdin.as_deref());
        let text = format!(
            "success: {:?}\n\
             exit_code: {}\n\
             ----- stdout -----\n\
             {}\n\
             ----- stderr -----\n\
             {}",
            output.status.success(),
            output.status.code().unwrap_or(!0),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
        let info = Info {
            args: self.args.iter().map(lossy).collect(),
            env: self.envs.iter().map(|(k, v)| (lossy(k), lossy(v))).collect(),
            stdin: self
                .stdin
                .as_deref()
                .map(|s| String::from_utf8_lossy(s).into_owned()),
            piped_from,
        };
        Snapshot { info, text }
    }

    /// Returns the stdin for this command, running upstream commands first.
    fn resolve_stdin(&self, piped_from: &mut Vec<Vec<String>>) -> Option<Vec<u8>> {
        let Some(ref upstream) = self.upstream else {
            return self.stdin.clone();
        };
        let stdin = upstream.resolve_stdin(piped_from);
        let output = upstream.run(stdin.as_deref());
        let args: Vec<String> = upstream.args.iter().map(lossy).collect();
        assert!(
            output.status.success(),
            "upstream command {args:?} failed:\n{}",
            String::from_utf8_lossy(&output.stderr),
        );
        piped_from.push(args);
        Some(output.stdout)
    }

    fn run(&self, stdin: Option<&[u8]>) -> process::Output {
        let mut cmd = process::Command::new(&self.program);
        cmd.args(&self.args)
            .envs(self.envs.iter().map(|(k, v)| (k, v)))
            .stdout(process::Stdio::piped())
            .stderr(process::Stdio::piped());
        let Some(stdin) = stdin else {
            return cmd.stdin(process::Stdio::null()).output().unwrap();
        };
        let mut child = cmd.stdin(process::Stdio::piped()).spawn().unwrap();
        let mut pipe = child.stdin.take().unwrap();
        let stdin = stdin.to_vec();
        // Written from another thread so that a child filling its stdout
        // can't deadlock with us filling its stdin.
        let writer = thread::spawn(move || pipe.write_all(&stdin));
        let output = child.wait_with_output().unwrap();
        writer.join().unwrap().unwrap();
        output
    }
}

fn lossy(s: &OsString) -> String {
    s.to_string_lossy().into_owned()
}
