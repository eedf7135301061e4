//! Per-operation resolution scope.
//!
//! A [`RenderScope`] carries everything resolution needs to know about the
//! current operation: the theme fallback chain, the variant, and the
//! derived compile identity. It is built at the start of an operation and
//! dropped at the end, so no theme or variant state can survive into the
//! next operation — on any exit path, including errors.

use crate::theme::ThemeProvider;

/// Request-scoped resolution context.
///
/// The compile identity is `theme` or `theme-variant`, derived from the
/// head of the theme chain (the requested theme). It is present exactly
/// when the operation carries a theme, and is handed opaquely to the
/// execution engine to partition its compiled-template cache.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderScope {
    themes: Vec<String>,
    variant: Option<String>,
    compile_identity: Option<String>,
}

impl RenderScope {
    /// Scope with no theming and no variant.
    pub fn unthemed() -> Self {
        Self::default()
    }

    /// Scope for an explicit theme chain and optional variant.
    ///
    /// `themes` is the full fallback chain, most specific first; the chain
    /// head supplies the compile identity.
    pub fn new(themes: Vec<String>, variant: Option<String>) -> Self {
        let compile_identity = themes.first().map(|theme| match &variant {
            Some(variant) => format!("{theme}-{variant}"),
            None => theme.clone(),
        });
        Self {
            themes,
            variant,
            compile_identity,
        }
    }

    /// Builds the scope for a request.
    ///
    /// When a theme is given its declared parent chain is walked through
    /// `provider`; otherwise the scope is unthemed and the compile identity
    /// stays absent (a variant alone does not produce one).
    pub fn for_request(
        provider: &dyn ThemeProvider,
        theme: Option<&str>,
        variant: Option<&str>,
    ) -> Self {
        let themes = match theme {
            Some(theme) => provider.theme_chain(theme),
            None => Vec::new(),
        };
        Self::new(themes, variant.map(str::to_string))
    }

    /// The theme fallback chain, most specific first. Empty when unthemed.
    pub fn themes(&self) -> &[String] {
        &self.themes
    }

    /// The variant suffix, if one is set.
    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    /// The compile identity, present iff the operation carries a theme.
    pub fn compile_identity(&self) -> Option<&str> {
        self.compile_identity.as_deref()
    }

    /// True when a theme fallback chain is configured.
    pub fn is_themed(&self) -> bool {
        !self.themes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeSet;

    #[test]
    fn test_unthemed_scope_has_no_identity() {
        let scope = RenderScope::unthemed();
        assert!(scope.themes().is_empty());
        assert!(scope.variant().is_none());
        assert!(scope.compile_identity().is_none());
    }

    #[test]
    fn test_identity_from_theme() {
        let scope = RenderScope::new(vec!["dark".into(), "default".into()], None);
        assert_eq!(scope.compile_identity(), Some("dark"));
    }

    #[test]
    fn test_identity_from_theme_and_variant() {
        let scope = RenderScope::new(vec!["dark".into()], Some("mobile".into()));
        assert_eq!(scope.compile_identity(), Some("dark-mobile"));
    }

    #[test]
    fn test_variant_without_theme_has_no_identity() {
        let scope = RenderScope::new(Vec::new(), Some("mobile".into()));
        assert_eq!(scope.variant(), Some("mobile"));
        assert!(scope.compile_identity().is_none());
    }

    #[test]
    fn test_for_request_walks_theme_chain() {
        let themes = ThemeSet::new()
            .add("default", None)
            .add("dark", Some("default"));
        let scope = RenderScope::for_request(&themes, Some("dark"), Some("mobile"));
        assert_eq!(scope.themes(), ["dark", "default"]);
        assert_eq!(scope.compile_identity(), Some("dark-mobile"));
    }

    #[test]
    fn test_for_request_without_theme() {
        let themes = ThemeSet::new();
        let scope = RenderScope::for_request(&themes, None, None);
        assert_eq!(scope, RenderScope::unthemed());
    }
}
