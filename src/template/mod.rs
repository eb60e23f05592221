//! Templating capability and a reference engine
//!
//! Controllers render views through whatever service is registered under
//! [`TEMPLATING_SERVICE`], as long as it was registered as a
//! [`TemplateEngine`] (see [`Service::template_engine`](crate::container::Service::template_engine)).
//!
//! # Example
//!
//! ```rust
//! use podium::template::{SimpleTemplateEngine, TemplateEngine, TemplateRegistry, Variables};
//!
//! let mut registry = TemplateRegistry::new();
//! registry.register("hello", "Hello {{ name }}!").unwrap();
//!
//! let engine = SimpleTemplateEngine::new(registry);
//! let mut variables = Variables::new();
//! variables.insert("name".into(), "Alice".into());
//!
//! assert_eq!(engine.render("hello", &variables).unwrap(), "Hello Alice!");
//! ```

mod engine;
mod registry;

pub use engine::SimpleTemplateEngine;
pub use registry::{TemplateError, TemplateRegistry, DEFAULT_EXTENSION};

/// Service id under which controllers look up the template engine
pub const TEMPLATING_SERVICE: &str = "templating";

/// Variables passed to a template
pub type Variables = serde_json::Map<String, serde_json::Value>;

/// Renders named templates with a set of variables
pub trait TemplateEngine: Send + Sync {
    /// Render the template `name` with `variables`
    fn render(&self, name: &str, variables: &Variables) -> Result<String, TemplateError>;
}
