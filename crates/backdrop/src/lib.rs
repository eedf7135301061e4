//! # Backdrop — themed template resolution and rendering
//!
//! `backdrop` locates the right physical template among overlapping search
//! roots when an application supports themes: given a logical name, an
//! optional variant, and a theme, it walks the theme's fallback chain and
//! the variant/bare filename pair in a deterministic order, then hands the
//! resolved source to a template engine (MiniJinja by default) under a
//! compile identity that keeps per-theme compiled output apart.
//!
//! ## Core Concepts
//!
//! - [`SearchPaths`]: ordered search roots; the first root with a matching
//!   file wins
//! - [`ThemeSet`]: static theme registry; each theme may declare a parent
//!   it falls back to
//! - [`RenderRequest`]: resource name + theme + variant + variables
//! - [`RenderScope`]: the per-operation resolution context (fallback
//!   chain, variant, compile identity) — built per call, dropped per call
//! - [`ResourceResolver`]: candidate construction and the fallback walk
//! - [`Renderer`]: the operation surface — render, resolve, list
//!
//! ## Fallback Order
//!
//! For theme chain `[dark, default]` and variant `mobile`, resource
//! `pages/home` probes, in order:
//!
//! ```text
//! dark/pages/home.mobile.tpl
//! dark/pages/home.tpl
//! default/pages/home.mobile.tpl
//! default/pages/home.tpl
//! pages/home.mobile.tpl
//! pages/home.tpl
//! ```
//!
//! The first existing file wins; a theme does not need to ship every file,
//! and a file does not need to ship every variant.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use backdrop::{RenderRequest, Renderer, ResourceResolver, SearchPaths, ThemeSet};
//!
//! let lookup = SearchPaths::new(["./app/views", "./vendor/views"]);
//! let resolver = ResourceResolver::new(Box::new(lookup)).with_base_path("templates");
//! let themes = ThemeSet::from_yaml(r#"
//! default: ~
//! dark: default
//! "#)?;
//!
//! let mut renderer = Renderer::new(resolver, Box::new(themes));
//!
//! let output = renderer.render(
//!     &RenderRequest::new("pages/home")
//!         .with_theme("dark")
//!         .with_variant("mobile")
//!         .assign("title", "Welcome"),
//! )?;
//! ```
//!
//! ## Candidate Inspection
//!
//! The candidate list is a pure function of the resolver configuration and
//! the scope, which makes the fallback order easy to check:
//!
//! ```rust
//! use backdrop::{RenderScope, ResourceResolver, SearchPaths, ThemeSet};
//!
//! let themes = ThemeSet::new()
//!     .add("default", None)
//!     .add("dark", Some("default"));
//! let resolver = ResourceResolver::new(Box::new(SearchPaths::new(["views"])));
//!
//! let scope = RenderScope::for_request(&themes, Some("dark"), Some("mobile"));
//! let paths = resolver.candidate_paths("pages/home", &scope);
//! assert_eq!(paths[0], "dark/pages/home.mobile.tpl");
//! assert_eq!(paths.last().unwrap(), "pages/home.tpl");
//! ```
//!
//! ## State Hygiene
//!
//! Theme, variant, and compile identity never live on the resolver or the
//! renderer; they travel in a [`RenderScope`] value created per operation.
//! Whatever an operation does — succeed, fail to resolve, fail inside the
//! engine — the next operation starts from a clean slate.

pub mod engine;
mod error;
pub mod lookup;
pub mod renderer;
pub mod request;
pub mod resolver;
pub mod scope;
pub mod theme;

// Error type
pub use error::TemplateError;

// Engine exports
pub use engine::{MiniJinjaEngine, TemplateEngine};

// Lookup exports
pub use lookup::{DirectoryHandle, FileEntry, FileLookup, ResolvedFile, SearchPaths};

// Resolution exports
pub use resolver::{ResourceResolver, EXTENSION};
pub use scope::RenderScope;

// Theme exports
pub use theme::{ThemeProvider, ThemeSet};

// Rendering surface exports
pub use renderer::Renderer;
pub use request::RenderRequest;
