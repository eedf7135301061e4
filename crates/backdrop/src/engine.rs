//! Template execution engine abstraction.
//!
//! This module defines the [`TemplateEngine`] trait which decouples the
//! rendering surface from the execution backend. The default implementation
//! is [`MiniJinjaEngine`].
//!
//! The engine never resolves anything itself: it receives an already
//! resolved source, its modification time, and an opaque compile identity.
//! The identity partitions the engine's compiled-template cache so that the
//! same logical name rendered under different themes or variants never
//! shares compiled output.

use std::collections::HashMap;
use std::time::SystemTime;

use minijinja::{AutoEscape, Environment, Value};

use crate::error::TemplateError;

/// Executes resolved template sources with a variable mapping.
pub trait TemplateEngine: Send + Sync {
    /// Renders `source` with `variables` and returns the output.
    ///
    /// `name` is the logical resource name. `compile_identity` is an opaque
    /// cache-partitioning key: calls with distinct identities must never
    /// share compiled state, even for the same `name`. `modified` is the
    /// source's modification time; an engine that caches compiled templates
    /// uses it to recompile when the source changes.
    fn execute(
        &mut self,
        name: &str,
        source: &str,
        modified: SystemTime,
        compile_identity: Option<&str>,
        variables: &serde_json::Value,
    ) -> Result<String, TemplateError>;
}

/// MiniJinja-based template engine.
///
/// Compiled templates are kept in the wrapped [`Environment`], keyed by
/// `identity@name` (or the bare name when no identity is set), and
/// recompiled when the source's modification time changes.
pub struct MiniJinjaEngine {
    env: Environment<'static>,
    compiled: HashMap<String, SystemTime>,
}

impl MiniJinjaEngine {
    /// Name of this engine.
    pub const NAME: &'static str = "minijinja";

    /// Tag opening a block comment in this engine's syntax.
    pub const COMMENT_OPEN: &'static str = "{#";

    /// Tag closing a block comment in this engine's syntax.
    pub const COMMENT_CLOSE: &'static str = "#}";

    /// Creates an engine with a default environment.
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
            compiled: HashMap::new(),
        }
    }

    /// Creates an engine that HTML-escapes every rendered variable.
    pub fn with_html_escaping() -> Self {
        let mut engine = Self::new();
        engine.env.set_auto_escape_callback(|_| AutoEscape::Html);
        engine
    }

    /// Returns a reference to the underlying MiniJinja environment.
    pub fn environment(&self) -> &Environment<'static> {
        &self.env
    }

    /// Returns a mutable reference to the underlying MiniJinja environment.
    ///
    /// Use this to register custom filters, tests, or globals.
    pub fn environment_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }

    fn cache_key(name: &str, compile_identity: Option<&str>) -> String {
        match compile_identity {
            Some(identity) => format!("{identity}@{name}"),
            None => name.to_string(),
        }
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn execute(
        &mut self,
        name: &str,
        source: &str,
        modified: SystemTime,
        compile_identity: Option<&str>,
        variables: &serde_json::Value,
    ) -> Result<String, TemplateError> {
        let key = Self::cache_key(name, compile_identity);

        let stale = self.compiled.get(&key) != Some(&modified);
        if stale {
            self.env.add_template_owned(key.clone(), source.to_string())?;
            self.compiled.insert(key.clone(), modified);
        }

        let template = self.env.get_template(&key)?;
        Ok(template.render(Value::from_serialize(variables))?)
    }
}
