//! Variable resolution
//!
//! Declarations from the config are turned into [`VarConfig`] values held in a
//! [`VariableScope`]. A fresh scope is built for every invocation: global
//! declarations go in first, then the selected block's, so block-local names
//! win.

use crate::config::{RawValue, VarSource};
use crate::error::VariableError;
use crate::runner::process::{capture_stdout, ShellLine};
use crate::runner::Context;
use std::collections::HashMap;
use std::env;

/// A resolved variable
///
/// Holds either a scalar `value` or a `list_value`. The source fields record
/// where the value came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VarConfig {
    pub value: String,
    pub list_value: Vec<String>,
    pub from_command: Option<String>,
    pub from_env: Option<String>,
    pub default: Option<String>,
}

impl VarConfig {
    pub fn scalar(value: impl Into<String>) -> Self {
        VarConfig {
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn list(values: Vec<String>) -> Self {
        VarConfig {
            list_value: values,
            ..Self::default()
        }
    }

    /// Resolve one declaration
    pub fn resolve(name: &str, raw: &RawValue, ctx: &Context) -> Result<Self, VariableError> {
        match raw {
            RawValue::String(s) => Ok(Self::scalar(s.clone())),
            RawValue::List(items) => Ok(Self::list(items.clone())),
            RawValue::Integer(i) => Ok(Self::scalar(i.to_string())),
            RawValue::Source(source) => Ok(Self::from_source(name, source, ctx)),
            RawValue::Unsupported(_) => Err(VariableError::UnsupportedShape {
                name: name.to_string(),
                kind: raw.kind(),
            }),
        }
    }

    /// Environment first, then a successful command overrides it, then the default fills any gap
    fn from_source(name: &str, source: &VarSource, ctx: &Context) -> Self {
        let mut var = VarConfig {
            from_env: source.from_env.clone(),
            from_command: source.from_command.clone(),
            default: source.default.clone(),
            ..Self::default()
        };

        if let Some(env_name) = &source.from_env {
            match env::var(env_name) {
                Ok(value) if !value.is_empty() => {
                    ctx.print_debug(&format!("{} set from environment variable {}", name, env_name));
                    var.value = value;
                }
                _ => ctx.print_debug(&format!("{}: environment variable {} is not set", name, env_name)),
            }
        }

        if let Some(command) = &source.from_command {
            match capture_stdout(&ShellLine::new(command.as_str())) {
                Ok(Some(output)) => {
                    ctx.print_debug(&format!("{} set from command `{}`", name, command));
                    let trimmed = output.strip_suffix('\n').unwrap_or(&output);
                    let lines: Vec<String> = trimmed.split('\n').map(str::to_string).collect();
                    if lines.len() > 1 {
                        var.value.clear();
                        var.list_value = lines;
                    } else {
                        var.value = lines.into_iter().next().unwrap_or_default();
                    }
                }
                Ok(None) => ctx.print_debug(&format!("{}: command `{}` failed, ignoring", name, command)),
                Err(e) => ctx.print_debug(&format!("{}: could not run `{}`: {}", name, command, e)),
            }
        }

        if var.value.is_empty() && var.list_value.is_empty() {
            if let Some(default) = &source.default {
                ctx.print_debug(&format!("{} set from default", name));
                var.value = default.clone();
            }
        }

        var
    }

    /// Whether this variable resolved to a list
    pub fn is_list(&self) -> bool {
        !self.list_value.is_empty()
    }
}

/// Read access to variables, shared by whole scopes and per-iteration overlays
pub trait VarLookup {
    fn lookup(&self, name: &str) -> Option<&VarConfig>;
}

/// Variables in effect for one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableScope {
    vars: HashMap<String, VarConfig>,
}

impl VariableScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every declaration into the scope, replacing existing entries
    ///
    /// Unsupported declarations are reported and skipped; the rest still resolve.
    pub fn resolve(&mut self, decls: &HashMap<String, RawValue>, ctx: &Context) {
        for (name, raw) in decls {
            match VarConfig::resolve(name, raw, ctx) {
                Ok(var) => {
                    self.vars.insert(name.clone(), var);
                }
                Err(e) => ctx.print_error(&e.to_string()),
            }
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, var: VarConfig) {
        self.vars.insert(name.into(), var);
    }

    pub fn get(&self, name: &str) -> Option<&VarConfig> {
        self.vars.get(name)
    }

    /// The list held by `name`, if it resolved to one
    pub fn list(&self, name: &str) -> Option<&[String]> {
        self.get(name)
            .filter(|var| var.is_list())
            .map(|var| var.list_value.as_slice())
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Overlay the `index` and `var` entries of one for-vars iteration
    pub fn iteration(&self, index: usize, value: &str) -> IterationScope<'_> {
        IterationScope {
            base: self,
            index: VarConfig::scalar(index.to_string()),
            var: VarConfig::scalar(value),
        }
    }
}

impl VarLookup for VariableScope {
    fn lookup(&self, name: &str) -> Option<&VarConfig> {
        self.get(name)
    }
}

/// A scope plus the synthetic `index` and `var` entries, which shadow the base
#[derive(Debug)]
pub struct IterationScope<'a> {
    base: &'a VariableScope,
    index: VarConfig,
    var: VarConfig,
}

impl VarLookup for IterationScope<'_> {
    fn lookup(&self, name: &str) -> Option<&VarConfig> {
        match name {
            "index" => Some(&self.index),
            "var" => Some(&self.var),
            _ => self.base.lookup(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(raw: RawValue) -> VarConfig {
        VarConfig::resolve("test", &raw, &Context::new()).unwrap()
    }

    fn source(from_env: Option<&str>, from_command: Option<&str>, default: Option<&str>) -> RawValue {
        RawValue::Source(VarSource {
            from_env: from_env.map(str::to_string),
            from_command: from_command.map(str::to_string),
            default: default.map(str::to_string),
        })
    }

    #[test]
    fn test_literal_values() {
        assert_eq!(resolve(RawValue::String("hi there".into())), VarConfig::scalar("hi there"));
        assert_eq!(resolve(RawValue::Integer(2)), VarConfig::scalar("2"));
        assert_eq!(
            resolve(RawValue::List(vec!["these".into(), "those".into()])),
            VarConfig::list(vec!["these".into(), "those".into()])
        );
    }

    #[test]
    fn test_unsupported_shape() {
        let raw = RawValue::Unsupported(serde_yaml::Value::Bool(true));
        let err = VarConfig::resolve("flag", &raw, &Context::new()).unwrap_err();
        assert_eq!(
            err,
            VariableError::UnsupportedShape {
                name: "flag".to_string(),
                kind: "bool"
            }
        );
    }

    #[test]
    fn test_from_env() {
        env::set_var("DEX_SCOPE_TEST_ENV", "from env!");
        let var = resolve(source(Some("DEX_SCOPE_TEST_ENV"), None, None));
        assert_eq!(var.value, "from env!");
        assert_eq!(var.from_env.as_deref(), Some("DEX_SCOPE_TEST_ENV"));
    }

    #[test]
    fn test_default_when_env_unset() {
        let var = resolve(source(Some("DEX_SCOPE_TEST_UNSET"), None, Some("fizzbizz")));
        assert_eq!(var.value, "fizzbizz");
        assert_eq!(var.default.as_deref(), Some("fizzbizz"));
    }

    #[test]
    fn test_default_when_command_fails() {
        let var = resolve(source(None, Some("false"), Some("fizzbizz")));
        assert_eq!(var.value, "fizzbizz");
    }

    #[test]
    fn test_env_survives_failed_command() {
        env::set_var("DEX_SCOPE_TEST_FALLBACK", "kept");
        let var = resolve(source(Some("DEX_SCOPE_TEST_FALLBACK"), Some("exit 1"), Some("unused")));
        assert_eq!(var.value, "kept");
    }

    #[test]
    fn test_command_beats_env() {
        env::set_var("DEX_SCOPE_TEST_OVERRIDE", "from env");
        let var = resolve(source(Some("DEX_SCOPE_TEST_OVERRIDE"), Some("echo from command"), None));
        assert_eq!(var.value, "from command");
    }

    #[test]
    fn test_command_single_line() {
        let var = resolve(source(None, Some("echo \"c var\""), None));
        assert_eq!(var.value, "c var");
        assert!(var.list_value.is_empty());
        assert_eq!(var.from_command.as_deref(), Some("echo \"c var\""));
    }

    #[test]
    fn test_command_multi_line() {
        let var = resolve(source(None, Some("printf 'foo\\nbar\\nbazz'"), None));
        assert_eq!(var.list_value, vec!["foo", "bar", "bazz"]);
        assert!(var.value.is_empty());
    }

    #[test]
    fn test_command_list_replaces_env_value() {
        env::set_var("DEX_SCOPE_TEST_LIST", "scalar");
        let var = resolve(source(Some("DEX_SCOPE_TEST_LIST"), Some("printf 'a\\nb\\n'"), None));
        assert!(var.value.is_empty());
        assert_eq!(var.list_value, vec!["a", "b"]);
    }

    #[test]
    fn test_nothing_set() {
        let var = resolve(source(Some("DEX_SCOPE_TEST_NOTHING"), None, None));
        assert!(var.value.is_empty());
        assert!(!var.is_list());
    }

    #[test]
    fn test_scope_resolve_shadows() {
        let ctx = Context::new();
        let mut scope = VariableScope::new();

        let mut globals = HashMap::new();
        globals.insert("shared".to_string(), RawValue::String("global".into()));
        globals.insert("global_only".to_string(), RawValue::Integer(1));
        scope.resolve(&globals, &ctx);

        let mut locals = HashMap::new();
        locals.insert("shared".to_string(), RawValue::String("local".into()));
        locals.insert("bad".to_string(), RawValue::Unsupported(serde_yaml::Value::Null));
        scope.resolve(&locals, &ctx);

        assert_eq!(scope.get("shared").unwrap().value, "local");
        assert_eq!(scope.get("global_only").unwrap().value, "1");
        assert!(scope.get("bad").is_none());
        assert_eq!(scope.len(), 2);
    }

    #[test]
    fn test_iteration_overlay() {
        let mut scope = VariableScope::new();
        scope.insert("var", VarConfig::scalar("shadowed"));
        scope.insert("name", VarConfig::scalar("kept"));

        let overlay = scope.iteration(2, "c");
        assert_eq!(overlay.lookup("index").unwrap().value, "2");
        assert_eq!(overlay.lookup("var").unwrap().value, "c");
        assert_eq!(overlay.lookup("name").unwrap().value, "kept");

        // The base scope is untouched
        assert_eq!(scope.get("var").unwrap().value, "shadowed");
    }

    #[test]
    fn test_list_lookup() {
        let mut scope = VariableScope::new();
        scope.insert("hosts", VarConfig::list(vec!["a".into(), "b".into()]));
        scope.insert("name", VarConfig::scalar("x"));

        assert_eq!(scope.list("hosts"), Some(&["a".to_string(), "b".to_string()][..]));
        assert_eq!(scope.list("name"), None);
        assert_eq!(scope.list("missing"), None);
    }
}
