//! Render request value.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::TemplateError;

/// A single template operation: which resource, under which theme and
/// variant, with which variables.
///
/// ```rust
/// use backdrop::RenderRequest;
///
/// let request = RenderRequest::new("pages/home")
///     .with_theme("dark")
///     .with_variant("mobile")
///     .assign("title", "Welcome");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RenderRequest {
    resource: String,
    theme: Option<String>,
    variant: Option<String>,
    variables: Map<String, Value>,
}

impl RenderRequest {
    /// Creates a request for a logical resource name (no extension).
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            ..Self::default()
        }
    }

    /// Theme to resolve against; its declared parent chain becomes the
    /// fallback stack.
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    /// Variant suffix selecting an alternate physical file for the same
    /// logical name.
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    /// Assigns one variable.
    pub fn assign(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Replaces the variable mapping wholesale.
    ///
    /// `data` must serialize to a map.
    pub fn with_variables<T: Serialize>(mut self, data: &T) -> Result<Self, TemplateError> {
        match serde_json::to_value(data)? {
            Value::Object(map) => {
                self.variables = map;
                Ok(self)
            }
            _ => Err(TemplateError::Serialization(
                "render variables must serialize to a map".to_string(),
            )),
        }
    }

    /// The logical resource name.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// The requested theme, if any.
    pub fn theme(&self) -> Option<&str> {
        self.theme.as_deref()
    }

    /// The requested variant, if any.
    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    /// The assigned variables.
    pub fn variables(&self) -> &Map<String, Value> {
        &self.variables
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_builds_variable_map() {
        let request = RenderRequest::new("page").assign("a", 1).assign("b", "two");
        assert_eq!(request.variables().len(), 2);
        assert_eq!(request.variables()["a"], Value::from(1));
    }

    #[test]
    fn test_with_variables_from_struct() {
        #[derive(Serialize)]
        struct Data {
            title: String,
            count: usize,
        }

        let request = RenderRequest::new("page")
            .with_variables(&Data {
                title: "Report".into(),
                count: 3,
            })
            .unwrap();
        assert_eq!(request.variables()["title"], Value::from("Report"));
        assert_eq!(request.variables()["count"], Value::from(3));
    }

    #[test]
    fn test_with_variables_rejects_non_map() {
        let result = RenderRequest::new("page").with_variables(&42);
        assert!(matches!(result, Err(TemplateError::Serialization(_))));
    }

    #[test]
    fn test_defaults() {
        let request = RenderRequest::new("page");
        assert_eq!(request.resource(), "page");
        assert!(request.theme().is_none());
        assert!(request.variant().is_none());
        assert!(request.variables().is_empty());
    }
}
