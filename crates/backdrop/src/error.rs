//! Error types for template resolution and rendering.
//!
//! [`TemplateError`] is the single error type for all public operations. It
//! abstracts over the underlying template engine's errors, providing a
//! stable public API regardless of the engine backend in use.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for template resolution, listing, and rendering operations.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// A public operation was invoked on a request without a resource name.
    ///
    /// This is a caller-contract violation, raised before any resolution
    /// work happens.
    #[error("no template resource set on the request")]
    ResourceNotSet,

    /// No file matched after exhausting variant and theme fallback.
    ///
    /// `attempted` is the last path tried, carried for diagnostics only.
    #[error("template resource \"{name}\" not found (last tried \"{attempted}\")")]
    ResourceNotFound { name: String, attempted: String },

    /// The execution engine failed while rendering a resolved template.
    ///
    /// Wraps the underlying cause; the cause is reachable through
    /// [`std::error::Error::source`].
    #[error("could not render \"{name}\"")]
    Render {
        name: String,
        #[source]
        source: Box<TemplateError>,
    },

    /// Template syntax or evaluation error reported by the engine.
    #[error("template error: {0}")]
    Template(String),

    /// A variable mapping could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The theme registry configuration is invalid.
    #[error("theme configuration error: {0}")]
    ThemeConfig(String),

    /// Reading a resolved file or listing a directory failed.
    #[error("failed to read \"{}\"", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Other operational error from the engine.
    #[error("{0}")]
    Operation(String),
}

// Conversion from minijinja::Error keeps engine internals out of the public API.
impl From<minijinja::Error> for TemplateError {
    fn from(err: minijinja::Error) -> Self {
        use minijinja::ErrorKind;

        match err.kind() {
            ErrorKind::SyntaxError
            | ErrorKind::BadEscape
            | ErrorKind::UndefinedError
            | ErrorKind::UnknownTest
            | ErrorKind::UnknownFunction
            | ErrorKind::UnknownFilter
            | ErrorKind::UnknownMethod => TemplateError::Template(err.to_string()),
            ErrorKind::BadSerialization => TemplateError::Serialization(err.to_string()),
            _ => TemplateError::Operation(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for TemplateError {
    fn from(err: serde_json::Error) -> Self {
        TemplateError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for TemplateError {
    fn from(err: serde_yaml::Error) -> Self {
        TemplateError::ThemeConfig(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = TemplateError::ResourceNotFound {
            name: "pages/home".to_string(),
            attempted: "pages/home.tpl".to_string(),
        };
        assert!(err.to_string().contains("pages/home"));
        assert!(err.to_string().contains("pages/home.tpl"));
    }

    #[test]
    fn test_render_wraps_cause() {
        use std::error::Error;

        let err = TemplateError::Render {
            name: "broken".to_string(),
            source: Box::new(TemplateError::Template("unexpected end".to_string())),
        };
        assert!(err.to_string().contains("broken"));
        let cause = err.source().expect("cause should be chained");
        assert!(cause.to_string().contains("unexpected end"));
    }

    #[test]
    fn test_from_minijinja_syntax_error() {
        let mj_err = minijinja::Error::new(
            minijinja::ErrorKind::SyntaxError,
            "unexpected end of template",
        );
        let err: TemplateError = mj_err.into();
        assert!(matches!(err, TemplateError::Template(_)));
    }

    #[test]
    fn test_from_minijinja_other_error() {
        let mj_err = minijinja::Error::new(minijinja::ErrorKind::InvalidOperation, "nope");
        let err: TemplateError = mj_err.into();
        assert!(matches!(err, TemplateError::Operation(_)));
    }
}
