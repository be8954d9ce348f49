//! Block execution
//!
//! Runs one selected block: resolves its variables, types its commands, and
//! runs every command once per for-vars element. A failing command is reported
//! and the rest of the block keeps going.

use crate::config::{resolve_block, Block, Config};
use crate::error::{is_recoverable, DexError, ExecutionError, ExecutionResult};
use crate::runner::interpolate::{placeholders, render};
use crate::runner::process::{ProcessRunner, ShellLine};
use crate::runner::scope::VarLookup;
use crate::runner::{normalize_commands, Command, Context, VariableScope};
use std::env;
use std::path::{Path, PathBuf};

/// What happened while a block ran
#[derive(Debug, Default)]
pub struct BlockReport {
    /// Number of `exec` lines started
    pub executed: usize,

    /// Per-command failures, in the order they happened
    pub failures: Vec<ExecutionError>,
}

impl BlockReport {
    pub fn succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run the block at `path`
///
/// Builds a fresh scope from the global declarations, then hands the block to
/// [`execute_block`]. Globals are resolved only once the path is known to exist.
pub fn run_path<S, R>(config: &Config, path: &[S], ctx: &Context, runner: &mut R) -> Result<BlockReport, DexError>
where
    S: AsRef<str>,
    R: ProcessRunner,
{
    let block = resolve_block(&config.blocks, path)?;
    ctx.print_debug(&format!("Selected block: {}", block.name));

    let mut scope = VariableScope::new();
    scope.resolve(&config.vars, ctx);

    Ok(execute_block(block, &mut scope, ctx, runner)?)
}

/// Run a block against a scope that already holds the global variables
///
/// Block-local declarations are resolved into `scope`, replacing globals of the
/// same name. Only an unavailable working directory stops the block.
pub fn execute_block<R: ProcessRunner>(
    block: &Block,
    scope: &mut VariableScope,
    ctx: &Context,
    runner: &mut R,
) -> ExecutionResult<BlockReport> {
    scope.resolve(&block.vars, ctx);

    let commands = normalize_commands(&block.commands, scope, ctx);

    // An empty dir means "not set", here and per command
    let block_dir = match block.dir.as_deref().filter(|d| !d.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => env::current_dir().map_err(ExecutionError::WorkingDirectoryUnavailable)?,
    };

    let mut report = BlockReport::default();
    let scope: &VariableScope = scope;

    for command in &commands {
        for (index, value) in command.for_vars.iter().enumerate() {
            let iteration = scope.iteration(index, value);
            if let Err(e) = run_iteration(command, &iteration, &block_dir, ctx, runner, &mut report) {
                if !is_recoverable(&e) {
                    return Err(e);
                }
                ctx.print_error(&e.to_string());
                report.failures.push(e);
            }
        }
    }

    if !report.succeeded() {
        ctx.print_info(&format!(
            "{}: {} of {} commands failed",
            block.name,
            report.failures.len(),
            report.executed
        ));
    }

    Ok(report)
}

/// One pass of one command: echo `diag`, then run `exec`
fn run_iteration<R: ProcessRunner>(
    command: &Command,
    scope: &impl VarLookup,
    block_dir: &Path,
    ctx: &Context,
    runner: &mut R,
    report: &mut BlockReport,
) -> ExecutionResult<()> {
    let dir = match command.dir.as_deref().map(|d| render(d, scope)) {
        Some(rendered) if !rendered.is_empty() => PathBuf::from(rendered),
        _ => block_dir.to_path_buf(),
    };

    if !command.diag.is_empty() {
        let text = render(&command.diag, scope);
        if let Err(e) = runner.echo(&text) {
            ctx.print_debug(&format!("diag output failed: {}", e));
        }
    }

    if command.exec.is_empty() {
        return Ok(());
    }

    for name in placeholders(&command.exec) {
        if scope.lookup(name).is_none() {
            ctx.print_debug(&format!("[% {} %] is not defined, rendering it empty", name));
        }
    }

    let line = render(&command.exec, scope);
    ctx.print_run(&line);
    report.executed += 1;

    let status = runner
        .run(&ShellLine::new(line.as_str()).in_dir(&dir))
        .map_err(|source| ExecutionError::Spawn {
            command: line.clone(),
            source,
        })?;

    if !status.success() {
        return Err(ExecutionError::CommandFailed {
            command: line,
            code: status.code(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::runner::CaptureRunner;

    fn run(yaml: &str, path: &[&str]) -> (BlockReport, CaptureRunner) {
        let config = parse_config(yaml).unwrap();
        let mut runner = CaptureRunner::new();
        let report = run_path(&config, path, &Context::new(), &mut runner).unwrap();
        (report, runner)
    }

    #[test]
    fn test_hello_world() {
        let yaml = r#"
version: 2
blocks:
  - name: hello_world
    desc: this is a command description
    commands:
       - exec: echo "hello world"
"#;
        let (report, runner) = run(yaml, &["hello_world"]);
        assert!(report.succeeded());
        assert_eq!(report.executed, 1);
        assert_eq!(runner.stdout_str(), "hello world\n");
    }

    #[test]
    fn test_diag_and_exec_both_run() {
        let yaml = r#"
version: 2
blocks:
  - name: both
    commands:
       - diag: "about to say hi"
         exec: echo hi
"#;
        let (_, runner) = run(yaml, &["both"]);
        assert_eq!(runner.stdout_str(), "about to say hi\nhi\n");
    }

    #[test]
    fn test_for_vars_index_and_var() {
        let yaml = r#"
version: 2
blocks:
  - name: loop
    commands:
       - diag: "diag [% index %] [% var %]"
         exec: echo "exec [% index %] [% var %]"
         for-vars: [a, b, c]
"#;
        let (report, runner) = run(yaml, &["loop"]);
        assert_eq!(report.executed, 3);
        assert_eq!(
            runner.stdout_str(),
            "diag 0 a\nexec 0 a\ndiag 1 b\nexec 1 b\ndiag 2 c\nexec 2 c\n"
        );
    }

    #[test]
    fn test_single_pass_without_for_vars() {
        let yaml = r#"
version: 2
blocks:
  - name: once
    commands:
       - exec: echo "[% index %] [% var %]"
"#;
        let (_, runner) = run(yaml, &["once"]);
        assert_eq!(runner.stdout_str(), "0 1\n");
    }

    #[test]
    fn test_failure_does_not_stop_block() {
        let yaml = r#"
version: 2
blocks:
  - name: flaky
    commands:
       - exec: "false"
       - exec: echo still running
"#;
        let (report, runner) = run(yaml, &["flaky"]);
        assert_eq!(report.executed, 2);
        assert_eq!(report.failures.len(), 1);
        assert!(matches!(
            report.failures[0],
            ExecutionError::CommandFailed { code: Some(1), .. }
        ));
        assert_eq!(runner.stdout_str(), "still running\n");
    }

    #[test]
    fn test_missing_dir_is_recoverable() {
        let yaml = r#"
version: 2
blocks:
  - name: lost
    commands:
       - exec: echo never
         dir: /no/such/dex/dir
       - exec: echo after
"#;
        let (report, runner) = run(yaml, &["lost"]);
        assert!(matches!(report.failures[0], ExecutionError::Spawn { .. }));
        assert_eq!(runner.stdout_str(), "after\n");
    }

    #[test]
    fn test_local_vars_do_not_leak_between_runs() {
        let yaml = r#"
version: 2
vars:
  name: global
blocks:
  - name: local
    vars:
      name: local
    commands:
       - exec: echo "[% name %]"
  - name: plain
    commands:
       - exec: echo "[% name %]"
"#;
        let config = parse_config(yaml).unwrap();
        let ctx = Context::new();

        let mut first = CaptureRunner::new();
        run_path(&config, &["local"], &ctx, &mut first).unwrap();
        let mut second = CaptureRunner::new();
        run_path(&config, &["plain"], &ctx, &mut second).unwrap();

        assert_eq!(first.stdout_str(), "local\n");
        assert_eq!(second.stdout_str(), "global\n");
    }

    #[test]
    fn test_unknown_path() {
        let config = parse_config("version: 2\nblocks:\n  - name: a\n").unwrap();
        let mut runner = CaptureRunner::new();
        let result = run_path(&config, &["b"], &Context::new(), &mut runner);
        assert!(matches!(
            result,
            Err(DexError::Config(crate::error::ConfigError::PathNotFound(_)))
        ));
    }
}
