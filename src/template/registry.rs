//! Template registry for storing and locating template sources

use std::borrow::Cow;
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Extension appended to template names without one
pub const DEFAULT_EXTENSION: &str = "tpl";

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template not found in registry or on disk
    #[error("template not found: {name}")]
    NotFound { name: String },

    /// Duplicate template definition
    #[error("duplicate template definition: {name}")]
    Duplicate { name: String },

    /// Error reading template file
    #[error("error reading template file {path}: {message}")]
    FileReadError { path: PathBuf, message: String },

    /// Malformed template source
    #[error("syntax error in template {template}: {message}")]
    Syntax { template: String, message: String },

    /// Variable referenced by the template but not provided
    #[error("missing variable '{variable}' in template {template}")]
    MissingVariable { template: String, variable: String },
}

/// Registry for template sources
///
/// Templates registered in memory take precedence; other names are looked up
/// as files under the base path, if one is set.
#[derive(Debug)]
pub struct TemplateRegistry {
    templates: HashMap<String, String>,
    /// Base path for resolving template files
    base_path: Option<PathBuf>,
    extension: String,
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self {
            templates: HashMap::new(),
            base_path: None,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl TemplateRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new registry with a base path for file resolution
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: Some(base_path.into()),
            ..Self::default()
        }
    }

    /// Set the extension appended to template names
    ///
    /// Names already ending in this extension are used as-is; any other dot in
    /// a name is part of the name (`emails.welcome` -> `emails.welcome.tpl`).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Register an in-memory template
    pub fn register(
        &mut self,
        name: impl Into<String>,
        source: impl Into<String>,
    ) -> Result<(), TemplateError> {
        let name = name.into();
        if self.templates.contains_key(&name) {
            return Err(TemplateError::Duplicate { name });
        }
        self.templates.insert(name, source.into());
        Ok(())
    }

    /// Get an in-memory template by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.templates.get(name).map(|s| s.as_str())
    }

    /// Check if a template is registered in memory
    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Get all in-memory template names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(|s| s.as_str())
    }

    /// Resolve a template name to a file path
    ///
    /// Returns None without a base path, or unless the name is made of plain
    /// path segments only (no `.`, `..`, root or empty name).
    pub fn resolve_path(&self, name: &str) -> Option<PathBuf> {
        let base = self.base_path.as_ref()?;
        let relative = Path::new(name);
        let mut components = relative.components().peekable();
        components.peek()?;
        if !components.all(|c| matches!(c, Component::Normal(_))) {
            return None;
        }

        let path = base.join(relative);
        let has_extension = path
            .extension()
            .is_some_and(|ext| ext == self.extension.as_str());
        if has_extension || self.extension.is_empty() {
            return Some(path);
        }

        let mut file: OsString = path.into_os_string();
        file.push(".");
        file.push(&self.extension);
        Some(PathBuf::from(file))
    }

    /// Load the source of a template, from memory or from disk
    pub fn load(&self, name: &str) -> Result<Cow<'_, str>, TemplateError> {
        if let Some(source) = self.get(name) {
            return Ok(Cow::Borrowed(source));
        }

        let path = self.resolve_path(name).ok_or_else(|| TemplateError::NotFound {
            name: name.to_string(),
        })?;
        if !path.is_file() {
            return Err(TemplateError::NotFound {
                name: name.to_string(),
            });
        }

        std::fs::read_to_string(&path)
            .map(Cow::Owned)
            .map_err(|e| TemplateError::FileReadError {
                path,
                message: e.to_string(),
            })
    }
}
