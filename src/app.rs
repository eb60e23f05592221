//! Applications and the application-context accessor

use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::config::AppConfig;
use crate::container::{Container, Service, ServiceContainer};
use crate::error::{PodiumError, Result};
use crate::template::{SimpleTemplateEngine, TemplateRegistry, TEMPLATING_SERVICE};

/// Prefix of the service ids under which config parameters are registered
pub const PARAMETER_PREFIX: &str = "param.";

/// An application as seen by controllers
pub trait Application: Send + Sync {
    /// The container services are resolved from, if one is bound
    fn service_container(&self) -> Option<&dyn Container>;
}

/// Components bound to the application that owns them
///
/// The binding is fixed when the component is constructed; implementors expose
/// no way to replace it.
pub trait AppAware<'app> {
    /// The bound application
    fn app(&self) -> &'app dyn Application;
}

/// Default application implementation
pub struct App {
    name: String,
    debug: bool,
    container: Option<Box<dyn Container>>,
}

impl App {
    /// Create an application without a service container
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            debug: false,
            container: None,
        }
    }

    /// Bind a service container
    pub fn with_container(mut self, container: impl Container + 'static) -> Self {
        self.container = Some(Box::new(container));
        self
    }

    /// Enable or disable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Build an application from its configuration
    ///
    /// Relative template directories are resolved against `base_dir`,
    /// normally the directory holding the config file.
    pub fn from_config(config: &AppConfig, base_dir: &Path) -> Result<Self> {
        let mut container = ServiceContainer::new();

        if let Some(templating) = &config.templating {
            let registry = TemplateRegistry::with_base_path(base_dir.join(&templating.directory))
                .with_extension(templating.extension.clone());
            debug!(
                directory = %base_dir.join(&templating.directory).display(),
                "registering template engine"
            );
            container
                .register(
                    TEMPLATING_SERVICE,
                    Service::template_engine(SimpleTemplateEngine::new(registry)),
                )
                .map_err(|e| PodiumError::configuration(e.to_string()))?;
        }

        for (key, value) in &config.parameters {
            container
                .register(
                    format!("{}{}", PARAMETER_PREFIX, key),
                    Service::new(value.clone()),
                )
                .map_err(|e| PodiumError::configuration(e.to_string()))?;
        }

        Ok(Self::new(config.app.name.clone())
            .with_debug(config.app.debug)
            .with_container(container))
    }

    /// Application name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if debug mode is enabled
    pub fn debug(&self) -> bool {
        self.debug
    }
}

impl Application for App {
    fn service_container(&self) -> Option<&dyn Container> {
        self.container.as_deref()
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("name", &self.name)
            .field("debug", &self.debug)
            .field("has_container", &self.container.is_some())
            .finish()
    }
}
