//! The themed rendering surface.
//!
//! [`Renderer`] ties the pieces together: a [`ResourceResolver`] to locate
//! template sources, a [`ThemeProvider`] to expand a requested theme into
//! its fallback chain, and a [`TemplateEngine`] to execute the resolved
//! source.
//!
//! Every public operation follows the same bracket: validate the request,
//! build a [`RenderScope`] for it, run the body against that scope, and let
//! the scope drop. Because theme, variant, and compile identity live only
//! in the scope value, no operation can observe leftovers from a previous
//! one — on success, on error, or on panic.

use std::collections::HashMap;

use serde_json::Value;

use crate::engine::{MiniJinjaEngine, TemplateEngine};
use crate::error::TemplateError;
use crate::lookup::ResolvedFile;
use crate::request::RenderRequest;
use crate::resolver::ResourceResolver;
use crate::scope::RenderScope;
use crate::theme::ThemeProvider;

/// Themed template renderer.
///
/// # Example
///
/// ```rust,ignore
/// use backdrop::{RenderRequest, Renderer, ResourceResolver, SearchPaths, ThemeSet};
///
/// let lookup = SearchPaths::new(["./views"]);
/// let resolver = ResourceResolver::new(Box::new(lookup));
/// let themes = ThemeSet::new()
///     .add("default", None)
///     .add("dark", Some("default"));
///
/// let mut renderer = Renderer::new(resolver, Box::new(themes));
/// let output = renderer.render(
///     &RenderRequest::new("pages/home")
///         .with_theme("dark")
///         .assign("title", "Welcome"),
/// )?;
/// ```
pub struct Renderer {
    engine: Box<dyn TemplateEngine>,
    resolver: ResourceResolver,
    themes: Box<dyn ThemeProvider>,
}

impl Renderer {
    /// Creates a renderer with the default [`MiniJinjaEngine`].
    pub fn new(resolver: ResourceResolver, themes: Box<dyn ThemeProvider>) -> Self {
        Self::with_engine(resolver, themes, Box::new(MiniJinjaEngine::new()))
    }

    /// Creates a renderer with an injected engine implementation.
    pub fn with_engine(
        resolver: ResourceResolver,
        themes: Box<dyn ThemeProvider>,
        engine: Box<dyn TemplateEngine>,
    ) -> Self {
        Self {
            engine,
            resolver,
            themes,
        }
    }

    /// The resolver in use.
    pub fn resolver(&self) -> &ResourceResolver {
        &self.resolver
    }

    /// Renders a template.
    ///
    /// The resource is resolved through the request's theme chain and
    /// variant, then executed with the request's variables. Engine failures
    /// during execution (including reading the resolved source) are wrapped
    /// into [`TemplateError::Render`]; resolution failures propagate as
    /// [`TemplateError::ResourceNotFound`].
    ///
    /// # Errors
    ///
    /// [`TemplateError::ResourceNotSet`] when the request has an empty
    /// resource name.
    pub fn render(&mut self, request: &RenderRequest) -> Result<String, TemplateError> {
        let resource = request.resource();
        if resource.is_empty() {
            return Err(TemplateError::ResourceNotSet);
        }

        let scope = RenderScope::for_request(self.themes.as_ref(), request.theme(), request.variant());
        let file = self.resolver.resolve(resource, &scope)?;

        let attempt = (|| {
            let source = file.read()?;
            let modified = file.modified()?;
            let variables = Value::Object(request.variables().clone());
            self.engine
                .execute(resource, &source, modified, scope.compile_identity(), &variables)
        })();

        attempt.map_err(|cause| TemplateError::Render {
            name: resource.to_string(),
            source: Box::new(cause),
        })
    }

    /// Resolves the physical source file for a request without rendering.
    ///
    /// # Errors
    ///
    /// [`TemplateError::ResourceNotSet`] when the request has an empty
    /// resource name; [`TemplateError::ResourceNotFound`] when resolution
    /// exhausts every candidate.
    pub fn source_file(&self, request: &RenderRequest) -> Result<ResolvedFile, TemplateError> {
        let resource = request.resource();
        if resource.is_empty() {
            return Err(TemplateError::ResourceNotSet);
        }

        let scope = RenderScope::for_request(self.themes.as_ref(), request.theme(), request.variant());
        self.resolver.resolve(resource, &scope)
    }

    /// Lists the resources available under `namespace`.
    ///
    /// With a theme, the theme's chain is enumerated most-specific first
    /// and merged first-wins, then the unthemed base location. Returns an
    /// empty map when the namespace exists nowhere.
    pub fn list_files(
        &self,
        namespace: &str,
        theme: Option<&str>,
    ) -> Result<HashMap<String, String>, TemplateError> {
        let scope = RenderScope::for_request(self.themes.as_ref(), theme, None);
        self.resolver.list(namespace, &scope)
    }
}
