//! Process spawning
//!
//! Every command line runs through bash so quoting, globbing and expansion
//! behave the way they do at a prompt. Where the child's output goes is up to
//! the [`ProcessRunner`] in use.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command as StdCommand, ExitStatus, Stdio};

/// Shell used for `exec` lines and `from_command` captures
pub const SHELL: &str = "/bin/bash";

/// A shell line together with the directory to run it in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellLine {
    pub line: String,
    pub dir: Option<PathBuf>,
}

impl ShellLine {
    pub fn new(line: impl Into<String>) -> Self {
        ShellLine {
            line: line.into(),
            dir: None,
        }
    }

    /// Run in `dir` instead of the current directory
    pub fn in_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.dir = Some(dir.as_ref().to_path_buf());
        self
    }

    fn to_command(&self) -> StdCommand {
        let mut command = StdCommand::new(SHELL);
        command.arg("-c").arg(&self.line);
        if let Some(dir) = &self.dir {
            command.current_dir(dir);
        }
        command
    }
}

/// Spawns shell lines and prints diagnostic text
pub trait ProcessRunner {
    /// Run a shell line to completion
    fn run(&mut self, shell_line: &ShellLine) -> io::Result<ExitStatus>;

    /// Print `text` followed by a newline, without interpreting it
    fn echo(&mut self, text: &str) -> io::Result<()>;
}

/// Runner wired to the caller's own stdin, stdout and stderr
#[derive(Debug, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&mut self, shell_line: &ShellLine) -> io::Result<ExitStatus> {
        shell_line
            .to_command()
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
    }

    fn echo(&mut self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", text)?;
        stdout.flush()
    }
}

/// Runner that collects everything written to stdout and stderr
///
/// Children get a null stdin. `echo` text lands in `stdout` in order with the
/// output of the commands around it.
#[derive(Debug, Default)]
pub struct CaptureRunner {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CaptureRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured stdout as text
    pub fn stdout_str(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// Captured stderr as text
    pub fn stderr_str(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

impl ProcessRunner for CaptureRunner {
    fn run(&mut self, shell_line: &ShellLine) -> io::Result<ExitStatus> {
        let output = shell_line.to_command().stdin(Stdio::null()).output()?;
        self.stdout.extend_from_slice(&output.stdout);
        self.stderr.extend_from_slice(&output.stderr);
        Ok(output.status)
    }

    fn echo(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.stdout, "{}", text)
    }
}

/// Run a shell line and return its stdout, or `None` if it did not succeed
///
/// Stderr is discarded.
pub fn capture_stdout(shell_line: &ShellLine) -> io::Result<Option<String>> {
    let output = shell_line
        .to_command()
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()?;

    if !output.status.success() {
        return Ok(None);
    }

    Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()))
}
