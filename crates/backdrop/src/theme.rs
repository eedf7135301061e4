//! Theme registry and fallback-chain computation.
//!
//! A theme may declare a parent it falls back to; resolution walks the
//! parent chain most-specific first, then the unthemed base location.
//! [`ThemeSet`] is an explicit registry populated from static configuration
//! (builder calls or YAML), so chain computation is deterministic and does
//! no I/O.

use std::collections::{HashMap, HashSet};

use crate::error::TemplateError;

/// Resolves a theme name into its fallback chain.
pub trait ThemeProvider: Send + Sync {
    /// The fallback chain for `name`, most specific first.
    ///
    /// The first element is the requested theme itself.
    fn theme_chain(&self, name: &str) -> Vec<String>;
}

/// Static theme registry mapping each theme to an optional parent.
///
/// # Example
///
/// ```rust
/// use backdrop::{ThemeProvider, ThemeSet};
///
/// let themes = ThemeSet::new()
///     .add("default", None)
///     .add("dark", Some("default"))
///     .add("dark-contrast", Some("dark"));
///
/// assert_eq!(
///     themes.theme_chain("dark-contrast"),
///     vec!["dark-contrast", "dark", "default"],
/// );
/// ```
///
/// # From YAML
///
/// A theme set is a map of theme name to parent name (or null):
///
/// ```rust
/// use backdrop::ThemeSet;
///
/// let themes = ThemeSet::from_yaml(r#"
/// default: ~
/// dark: default
/// "#).unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct ThemeSet {
    parents: HashMap<String, Option<String>>,
}

impl ThemeSet {
    /// Creates an empty theme set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a theme with an optional parent.
    ///
    /// Forward references are allowed; call [`validate`](Self::validate)
    /// once the set is complete.
    pub fn add(mut self, name: impl Into<String>, parent: Option<&str>) -> Self {
        self.parents.insert(name.into(), parent.map(str::to_string));
        self
    }

    /// Loads and validates a theme set from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, TemplateError> {
        let parents: HashMap<String, Option<String>> = serde_yaml::from_str(yaml)?;
        let set = Self { parents };
        set.validate()?;
        Ok(set)
    }

    /// Checks every parent reference for dangling targets and cycles.
    pub fn validate(&self) -> Result<(), TemplateError> {
        for (name, parent) in &self.parents {
            if let Some(parent) = parent {
                if !self.parents.contains_key(parent) {
                    return Err(TemplateError::ThemeConfig(format!(
                        "theme \"{name}\" references unknown parent \"{parent}\""
                    )));
                }
            }

            let mut visited = HashSet::new();
            let mut current = name.as_str();
            loop {
                if !visited.insert(current) {
                    return Err(TemplateError::ThemeConfig(format!(
                        "theme \"{name}\" has a cyclic parent chain"
                    )));
                }
                match self.parents.get(current) {
                    Some(Some(next)) => current = next.as_str(),
                    _ => break,
                }
            }
        }
        Ok(())
    }

    /// True when `name` is a registered theme.
    pub fn contains(&self, name: &str) -> bool {
        self.parents.contains_key(name)
    }
}

impl ThemeProvider for ThemeSet {
    /// Walks the parent chain. Unknown themes yield a single-entry chain
    /// (the name itself), so lookups degrade to the base fallback instead
    /// of erroring. Revisiting a theme ends the walk.
    fn theme_chain(&self, name: &str) -> Vec<String> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = Some(name.to_string());
        while let Some(theme) = current {
            if !seen.insert(theme.clone()) {
                break;
            }
            current = self.parents.get(&theme).cloned().flatten();
            chain.push(theme);
        }
        chain
    }
}
