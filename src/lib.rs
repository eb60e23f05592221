//! Podium - controller core of a small web framework
//!
//! Controllers are bound to an [`Application`], resolve named services from its
//! service container, and render views through the `templating` service.
//! Container failures are wrapped into [`PodiumError`] so dispatch layers
//! only deal with one error type.
//!
//! # Example
//!
//! ```rust
//! use podium::container::{Service, ServiceContainer};
//! use podium::template::{SimpleTemplateEngine, TemplateRegistry, TEMPLATING_SERVICE};
//! use podium::{App, BaseController, Controller, Variables};
//!
//! let mut templates = TemplateRegistry::new();
//! templates.register("home", "Welcome, {{ user }}").unwrap();
//!
//! let mut container = ServiceContainer::new();
//! container
//!     .register(
//!         TEMPLATING_SERVICE,
//!         Service::template_engine(SimpleTemplateEngine::new(templates)),
//!     )
//!     .unwrap();
//!
//! let app = App::new("demo").with_container(container);
//! let controller = BaseController::new(&app);
//!
//! let mut variables = Variables::new();
//! variables.insert("user".into(), "Alice".into());
//! assert_eq!(controller.render("home", &variables).unwrap(), "Welcome, Alice");
//! ```

pub mod app;
pub mod config;
pub mod container;
pub mod controller;
pub mod error;
pub mod template;

pub use app::{App, AppAware, Application};
pub use config::{AppConfig, ConfigError, TemplatingConfig};
pub use container::{Container, LookupError, Service, ServiceContainer};
pub use controller::{forbid_snapshot, resolve_service, BaseController, Controller};
pub use error::{PodiumError, Result};
pub use template::{TemplateEngine, TemplateError, Variables, TEMPLATING_SERVICE};
