//! Controller base abstraction
//!
//! A controller is bound to one application for its whole life and reaches
//! everything else through that application's service container. Concrete
//! controllers implement [`AppAware`] and get the [`Controller`] operations
//! for free:
//!
//! ```rust
//! use podium::{AppAware, Application, Controller, Result, Variables};
//!
//! struct HomeController<'app> {
//!     app: &'app dyn Application,
//! }
//!
//! impl<'app> AppAware<'app> for HomeController<'app> {
//!     fn app(&self) -> &'app dyn Application {
//!         self.app
//!     }
//! }
//!
//! impl<'app> Controller<'app> for HomeController<'app> {}
//!
//! impl HomeController<'_> {
//!     fn index(&self) -> Result<String> {
//!         self.render("home", &Variables::new())
//!     }
//! }
//! ```

use std::convert::Infallible;
use std::fmt;

use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use crate::app::{AppAware, Application};
use crate::container::Service;
use crate::error::{PodiumError, Result, SNAPSHOT_MESSAGE};
use crate::template::{Variables, TEMPLATING_SERVICE};

/// Operations available to every controller
pub trait Controller<'app>: AppAware<'app> {
    /// Resolve a service from the application's container
    ///
    /// Fails with a configuration error if no container is bound, and with a
    /// container error (keeping the lookup failure as its source) if the
    /// container cannot provide the service.
    fn get_service(&self, id: &str) -> Result<Service> {
        resolve_service(self.app(), id)
    }

    /// Render a template through the `templating` service
    fn render(&self, name: &str, variables: &Variables) -> Result<String> {
        let service = self.get_service(TEMPLATING_SERVICE)?;
        let engine = service.as_template_engine().ok_or_else(|| {
            warn!(
                service = TEMPLATING_SERVICE,
                found = service.type_name(),
                "service is not a template engine"
            );
            PodiumError::configuration(format!(
                "Service \"{}\" must implement the TemplateEngine capability, found {}",
                TEMPLATING_SERVICE,
                service.type_name()
            ))
        })?;

        let output = engine.render(name, variables)?;
        debug!(template = name, bytes = output.len(), "rendered template");
        Ok(output)
    }

    /// Render a template without variables
    fn render_empty(&self, name: &str) -> Result<String> {
        self.render(name, &Variables::new())
    }

    /// Capture the controller's state; always fails
    ///
    /// A controller only holds a live reference to its application, which
    /// cannot be rebuilt from a snapshot.
    fn snapshot(&self) -> Result<Infallible> {
        Err(PodiumError::usage(SNAPSHOT_MESSAGE))
    }
}

/// Resolve a service from an application's container
pub fn resolve_service(app: &dyn Application, id: &str) -> Result<Service> {
    let container = app.service_container().ok_or_else(PodiumError::no_container)?;

    match container.get(id) {
        Ok(Some(service)) => {
            debug!(service = id, service_type = service.type_name(), "resolved service");
            Ok(service)
        }
        Ok(None) => Err(PodiumError::configuration(format!(
            "Service \"{}\" is registered but resolved to nothing",
            id
        ))),
        Err(source) => {
            warn!(service = id, error = %source, "service container error");
            Err(PodiumError::container(id, source))
        }
    }
}

/// `Serialize` body for controllers: always fails with the snapshot message
pub fn forbid_snapshot<S: Serializer>(_serializer: S) -> std::result::Result<S::Ok, S::Error> {
    Err(S::Error::custom(SNAPSHOT_MESSAGE))
}

/// Plain controller bound to an application
///
/// Useful on its own for dispatch layers that only need service access, and as
/// a field for concrete controllers that prefer composition.
#[derive(Clone, Copy)]
pub struct BaseController<'app> {
    app: &'app dyn Application,
}

impl<'app> BaseController<'app> {
    /// Bind a controller to its application
    pub fn new(app: &'app dyn Application) -> Self {
        Self { app }
    }
}

impl<'app> AppAware<'app> for BaseController<'app> {
    fn app(&self) -> &'app dyn Application {
        self.app
    }
}

impl<'app> Controller<'app> for BaseController<'app> {}

impl Serialize for BaseController<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        forbid_snapshot(serializer)
    }
}

impl fmt::Debug for BaseController<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseController")
            .field("has_container", &self.app.service_container().is_some())
            .finish()
    }
}
