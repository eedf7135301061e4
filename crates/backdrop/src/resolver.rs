//! Theme-aware resource resolution and namespace listing.
//!
//! This is the heart of the crate: turning a logical resource name plus a
//! [`RenderScope`] into one physical file, with deterministic fallback.
//!
//! # Fallback order
//!
//! Resolution builds an explicit ordered candidate list and walks it
//! through the lookup; the first hit wins. For a scope with theme chain
//! `[dark, default]` and variant `mobile`, the candidates for
//! `pages/home` are:
//!
//! | # | Path |
//! |---|------|
//! | 1 | `dark/pages/home.mobile.tpl` |
//! | 2 | `dark/pages/home.tpl` |
//! | 3 | `default/pages/home.mobile.tpl` |
//! | 4 | `default/pages/home.tpl` |
//! | 5 | `pages/home.mobile.tpl` |
//! | 6 | `pages/home.tpl` |
//!
//! (all under the resolver's base path, when one is set). The
//! variant-before-bare and theme-before-base ordering forms a two-axis
//! override system: a theme does not have to ship every file, and a file
//! does not have to ship every variant — missing combinations fall through
//! to the nearest ancestor.
//!
//! A miss anywhere in the list is "try the next candidate", never an
//! error; only exhausting the whole list raises
//! [`TemplateError::ResourceNotFound`], carrying the last attempted path
//! for diagnostics.

use std::collections::HashMap;

use crate::error::TemplateError;
use crate::lookup::{FileLookup, ResolvedFile};
use crate::scope::RenderScope;

/// Extension for template resources.
pub const EXTENSION: &str = "tpl";

/// Resolves logical resource names to physical files across a theme
/// fallback chain, and enumerates namespaces across the same chain.
///
/// The resolver holds configuration only (lookup, base path, extension);
/// all per-operation state travels in the [`RenderScope`] argument, so one
/// resolver can serve any number of concurrent operations.
pub struct ResourceResolver {
    lookup: Box<dyn FileLookup>,
    base_path: Option<String>,
    extension: String,
}

impl ResourceResolver {
    /// Creates a resolver over `lookup` with no base path and the default
    /// [`EXTENSION`].
    pub fn new(lookup: Box<dyn FileLookup>) -> Self {
        Self {
            lookup,
            base_path: None,
            extension: EXTENSION.to_string(),
        }
    }

    /// Scopes every lookup under `path`.
    ///
    /// Separators are normalized; an empty or slash-only path means no
    /// base path.
    pub fn with_base_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        let trimmed = path.trim_matches('/');
        self.base_path = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    /// Overrides the resource extension (without the dot).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// The configured base path, if any.
    pub fn base_path(&self) -> Option<&str> {
        self.base_path.as_deref()
    }

    /// The resource extension in use.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// The ordered candidate paths for `name` under `scope`.
    ///
    /// Pure: no I/O. Each theme in the chain contributes its
    /// variant-qualified candidate (when a variant is set) followed by its
    /// bare candidate; the unthemed pair comes last.
    pub fn candidate_paths(&self, name: &str, scope: &RenderScope) -> Vec<String> {
        let mut paths = Vec::new();
        for theme in scope.themes() {
            self.push_scope_candidates(&mut paths, name, Some(theme), scope.variant());
        }
        self.push_scope_candidates(&mut paths, name, None, scope.variant());
        paths
    }

    fn push_scope_candidates(
        &self,
        paths: &mut Vec<String>,
        name: &str,
        theme: Option<&str>,
        variant: Option<&str>,
    ) {
        let prefix = self.prefix(theme);
        if let Some(variant) = variant {
            paths.push(format!("{prefix}{name}.{variant}.{}", self.extension));
        }
        paths.push(format!("{prefix}{name}.{}", self.extension));
    }

    /// Path prefix for a scope: optional base path, then optional theme
    /// segment, with a single trailing separator.
    fn prefix(&self, theme: Option<&str>) -> String {
        let mut prefix = String::new();
        if let Some(base) = &self.base_path {
            prefix.push_str(base);
            prefix.push('/');
        }
        if let Some(theme) = theme {
            prefix.push_str(theme);
            prefix.push('/');
        }
        prefix
    }

    /// Resolves `name` to a single file.
    ///
    /// Walks [`candidate_paths`](Self::candidate_paths) through the lookup
    /// and returns the first hit. Fails with
    /// [`TemplateError::ResourceNotFound`] only after every candidate in
    /// every scope has missed.
    pub fn resolve(&self, name: &str, scope: &RenderScope) -> Result<ResolvedFile, TemplateError> {
        let mut attempted = String::new();
        for path in self.candidate_paths(name, scope) {
            match self.lookup.find_file(&path) {
                Some(file) => return Ok(file),
                None => attempted = path,
            }
        }
        Err(TemplateError::ResourceNotFound {
            name: name.to_string(),
            attempted,
        })
    }

    /// Lists the resources under `namespace` across the scope's themes.
    ///
    /// Each theme in chain order is enumerated first, then the unthemed
    /// base location; a key provided by an earlier (more specific) scope is
    /// never overwritten. Keys are file stems (namespace-relative, no
    /// extension); values are `namespace/stem` — resource names that
    /// resolve through [`resolve`](Self::resolve).
    ///
    /// A namespace that exists nowhere yields an empty map, not an error;
    /// only I/O failures while reading an existing directory surface.
    pub fn list(
        &self,
        namespace: &str,
        scope: &RenderScope,
    ) -> Result<HashMap<String, String>, TemplateError> {
        let mut files = HashMap::new();
        for theme in scope.themes() {
            let dir = format!("{}{namespace}", self.prefix(Some(theme)));
            self.collect(&dir, namespace, &mut files)?;
        }
        let dir = format!("{}{namespace}", self.prefix(None));
        self.collect(&dir, namespace, &mut files)?;
        Ok(files)
    }

    /// Merges matching entries of `dir` into `files`. Existing keys win.
    fn collect(
        &self,
        dir: &str,
        namespace: &str,
        files: &mut HashMap<String, String>,
    ) -> Result<(), TemplateError> {
        let suffix = format!(".{}", self.extension);
        for directory in self.lookup.find_directories(dir) {
            for entry in directory.entries()? {
                if entry.is_directory() {
                    continue;
                }
                let Some(file_name) = entry.file_name() else {
                    continue;
                };
                let Some(stem) = file_name.strip_suffix(&suffix) else {
                    continue;
                };
                files
                    .entry(stem.to_string())
                    .or_insert_with(|| format!("{namespace}/{stem}"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::DirectoryHandle;
    use std::sync::{Arc, Mutex};

    /// Lookup over synthetic data: a fixed set of relative paths, plus a
    /// probe log for asserting walk order.
    struct StubLookup {
        files: Vec<String>,
        probes: Arc<Mutex<Vec<String>>>,
    }

    impl StubLookup {
        fn new(files: &[&str]) -> Self {
            Self {
                files: files.iter().map(|f| f.to_string()).collect(),
                probes: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn empty() -> Self {
            Self::new(&[])
        }
    }

    impl FileLookup for StubLookup {
        fn find_file(&self, relative: &str) -> Option<ResolvedFile> {
            self.probes.lock().unwrap().push(relative.to_string());
            self.files
                .iter()
                .find(|f| f.as_str() == relative)
                .map(ResolvedFile::new)
        }

        fn find_directories(&self, _relative: &str) -> Vec<DirectoryHandle> {
            Vec::new()
        }
    }

    fn themed_scope() -> RenderScope {
        RenderScope::new(vec!["dark".into(), "default".into()], Some("mobile".into()))
    }

    // =========================================================================
    // Candidate ordering
    // =========================================================================

    #[test]
    fn test_candidates_bare_unthemed() {
        let resolver = ResourceResolver::new(Box::new(StubLookup::empty()));
        let paths = resolver.candidate_paths("pages/home", &RenderScope::unthemed());
        assert_eq!(paths, ["pages/home.tpl"]);
    }

    #[test]
    fn test_candidates_full_matrix() {
        let resolver = ResourceResolver::new(Box::new(StubLookup::empty()));
        let paths = resolver.candidate_paths("pages/home", &themed_scope());
        assert_eq!(
            paths,
            [
                "dark/pages/home.mobile.tpl",
                "dark/pages/home.tpl",
                "default/pages/home.mobile.tpl",
                "default/pages/home.tpl",
                "pages/home.mobile.tpl",
                "pages/home.tpl",
            ]
        );
    }

    #[test]
    fn test_candidates_under_base_path() {
        let resolver =
            ResourceResolver::new(Box::new(StubLookup::empty())).with_base_path("views/");
        let scope = RenderScope::new(vec!["dark".into()], None);
        let paths = resolver.candidate_paths("home", &scope);
        assert_eq!(paths, ["views/dark/home.tpl", "views/home.tpl"]);
    }

    #[test]
    fn test_empty_base_path_is_unset() {
        let resolver = ResourceResolver::new(Box::new(StubLookup::empty())).with_base_path("/");
        assert_eq!(resolver.base_path(), None);
        let paths = resolver.candidate_paths("home", &RenderScope::unthemed());
        assert_eq!(paths, ["home.tpl"]);
    }

    #[test]
    fn test_custom_extension() {
        let resolver = ResourceResolver::new(Box::new(StubLookup::empty())).with_extension("html");
        let paths = resolver.candidate_paths("home", &RenderScope::unthemed());
        assert_eq!(paths, ["home.html"]);
    }

    // =========================================================================
    // Resolution walk
    // =========================================================================

    #[test]
    fn test_resolve_probes_every_candidate_in_order() {
        let stub = StubLookup::empty();
        let probes = Arc::clone(&stub.probes);
        let resolver = ResourceResolver::new(Box::new(stub));
        let scope = themed_scope();
        let expected = resolver.candidate_paths("pages/home", &scope);

        let err = resolver.resolve("pages/home", &scope).unwrap_err();
        assert!(matches!(err, TemplateError::ResourceNotFound { .. }));

        // the walk never raises mid-fallback; every candidate gets probed
        assert_eq!(*probes.lock().unwrap(), expected);
    }

    #[test]
    fn test_resolve_stops_at_first_hit() {
        let resolver =
            ResourceResolver::new(Box::new(StubLookup::new(&["default/pages/home.tpl"])));
        let scope = themed_scope();
        let file = resolver.resolve("pages/home", &scope).unwrap();
        assert!(file.path().ends_with("default/pages/home.tpl"));
    }

    #[test]
    fn test_resolve_exhaustion_reports_last_attempt() {
        let resolver = ResourceResolver::new(Box::new(StubLookup::empty()));
        let err = resolver.resolve("pages/home", &themed_scope()).unwrap_err();
        match err {
            TemplateError::ResourceNotFound { name, attempted } => {
                assert_eq!(name, "pages/home");
                assert_eq!(attempted, "pages/home.tpl");
            }
            other => panic!("expected ResourceNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_prefers_variant_over_bare() {
        let resolver = ResourceResolver::new(Box::new(StubLookup::new(&[
            "dark/pages/home.mobile.tpl",
            "dark/pages/home.tpl",
        ])));
        let file = resolver.resolve("pages/home", &themed_scope()).unwrap();
        assert!(file.path().ends_with("dark/pages/home.mobile.tpl"));
    }
}
