//! Typed commands
//!
//! A block's raw command records become [`Command`] values right before the
//! block runs, once its variables are known, because `for-vars` may name a
//! list variable.

use crate::config::{RawCommand, RawValue};
use crate::error::VariableError;
use crate::runner::{Context, VariableScope};

/// Value of `var` when a command has no `for-vars`
pub const SINGLE_PASS: &str = "1";

/// A command ready to run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    /// Shell line to run; empty means nothing to run
    pub exec: String,

    /// Text to echo; empty means nothing to echo
    pub diag: String,

    /// Working directory override, rendered per iteration
    pub dir: Option<String>,

    /// One pass per element
    pub for_vars: Vec<String>,

    /// Reserved
    pub condition: Option<String>,
}

impl Command {
    /// Type one raw record against the scope
    pub fn from_raw(raw: &RawCommand, scope: &VariableScope, ctx: &Context) -> Self {
        let for_vars = match &raw.for_vars {
            None => vec![SINGLE_PASS.to_string()],
            Some(RawValue::List(items)) => items.clone(),
            Some(RawValue::String(name)) => match scope.list(name) {
                Some(items) => items.to_vec(),
                None => {
                    ctx.print_debug(&format!("for-vars: {} is not a list variable, skipping", name));
                    Vec::new()
                }
            },
            Some(other) => {
                let err = VariableError::UnsupportedForVars { kind: other.kind() };
                ctx.print_error(&err.to_string());
                Vec::new()
            }
        };

        Command {
            exec: raw.exec.clone().unwrap_or_default(),
            diag: raw.diag.clone().unwrap_or_default(),
            dir: raw.dir.clone(),
            for_vars,
            condition: raw.condition.clone(),
        }
    }
}

/// Type every raw record of a block, keeping their order
pub fn normalize_commands(raw: &[RawCommand], scope: &VariableScope, ctx: &Context) -> Vec<Command> {
    raw.iter()
        .map(|command| Command::from_raw(command, scope, ctx))
        .collect()
}
