//! Main CLI application

use crate::config::{find_config_file, parse_config_file, split_path, validate_config, Config};
use crate::error::{ConfigError, DexError};
use crate::runner::{run_path, Context, SystemRunner, Verbosity};
use crate::ui::{display_menu, render_menu};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

/// CLI application
pub struct App {
    /// Parsed configuration
    config: Config,
    /// Config file path
    config_path: PathBuf,
}

impl App {
    /// Create app with a specific config file
    pub fn with_config_file(path: PathBuf) -> Result<Self, DexError> {
        let config = parse_config_file(&path)?;
        validate_config(&config)?;

        Ok(App {
            config,
            config_path: path,
        })
    }

    /// Create a new app from the discovered configuration file
    pub fn discover() -> Result<Self, DexError> {
        Self::with_config_file(find_config_file()?)
    }

    /// Show the menu, or run the block the path segments select
    pub fn run<S: AsRef<str>>(&self, segments: &[S], ctx: &Context) -> Result<ExitCode, DexError> {
        let path = split_path(segments);

        if path.is_empty() {
            display_menu(&mut io::stdout().lock(), &self.config.blocks, 0)?;
            return Ok(ExitCode::SUCCESS);
        }

        ctx.print_debug(&format!("Using config file {}", self.config_path.display()));

        match run_path(&self.config, &path, ctx, &mut SystemRunner) {
            Ok(_) => Ok(ExitCode::SUCCESS),
            Err(DexError::Config(ConfigError::PathNotFound(_))) => {
                // Report the path as typed, before dotted segments were split
                let err = ConfigError::PathNotFound(
                    segments.iter().map(|s| s.as_ref().to_string()).collect(),
                );
                eprint!(
                    "Error: {}\n\nSee the menu:\n{}",
                    err,
                    render_menu(&self.config.blocks)
                );
                Ok(ExitCode::FAILURE)
            }
            Err(e) => Err(e),
        }
    }
}

/// Build the clap command
pub fn build_command() -> Command {
    Command::new("dex")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Run named blocks of commands from a dex.yaml file")
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Path to the dex file (default: $DEX_FILE, then ./dex.yaml)"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only print command output and errors")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("silent")
                .short('s')
                .long("silent")
                .help("Print no diagnostics")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("path")
                .value_name("BLOCK")
                .help("Block to run, as `a b c` or `a.b.c`; omit to show the menu")
                .num_args(0..),
        )
}

/// Get verbosity level from matches
fn get_verbosity(matches: &ArgMatches) -> Verbosity {
    if matches.get_flag("silent") {
        Verbosity::Silent
    } else if matches.get_flag("quiet") {
        Verbosity::Quiet
    } else if matches.get_flag("verbose") {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    }
}

/// Path segments given on the command line
fn get_segments(matches: &ArgMatches) -> Vec<String> {
    matches
        .get_many::<String>("path")
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

/// Run the CLI application with the process arguments
pub fn run() -> anyhow::Result<ExitCode> {
    let matches = build_command().get_matches();
    let ctx = Context::new().with_verbosity(get_verbosity(&matches));

    let app = match matches.get_one::<PathBuf>("file") {
        Some(path) => App::with_config_file(path.clone())?,
        None => App::discover()?,
    };

    Ok(app.run(&get_segments(&matches), &ctx)?)
}
