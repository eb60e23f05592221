//! In-memory service container

use std::collections::HashMap;
use std::fmt;

use parking_lot::{Mutex, MutexGuard, ReentrantMutex};
use tracing::debug;

use super::error::LookupError;
use super::service::Service;
use super::Container;

/// Builds a service on first lookup
pub type Factory = Box<dyn Fn(&mut Resolution<'_>) -> Result<Service, LookupError> + Send + Sync>;

enum Definition {
    Instance(Service),
    Factory(Factory),
}

/// Context handed to factories for resolving their own dependencies
///
/// Tracks the ids currently being built in this lookup so that factories
/// depending on each other in a loop fail instead of recursing forever.
pub struct Resolution<'a> {
    container: &'a ServiceContainer,
    resolving: &'a mut Vec<String>,
}

impl Resolution<'_> {
    /// Resolve a dependency from the same container
    pub fn get(&mut self, id: &str) -> Result<Service, LookupError> {
        self.container.resolve(id, self.resolving)
    }
}

/// Container holding eager instances and lazily built services
///
/// Factory results are cached, so every lookup after the first returns the
/// same instance. Factories run under a reentrant build lock: each one runs at
/// most once even when several threads look it up concurrently, and a factory
/// can still resolve its own dependencies on the same thread.
pub struct ServiceContainer {
    definitions: HashMap<String, Definition>,
    resolved: Mutex<HashMap<String, Service>>,
    building: ReentrantMutex<()>,
}

impl Default for ServiceContainer {
    fn default() -> Self {
        Self {
            definitions: HashMap::new(),
            resolved: Mutex::new(HashMap::new()),
            building: ReentrantMutex::new(()),
        }
    }
}

impl ServiceContainer {
    /// Create a new empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an already built service
    pub fn register(&mut self, id: impl Into<String>, service: Service) -> Result<(), LookupError> {
        self.define(id.into(), Definition::Instance(service))
    }

    /// Register a factory building the service on first lookup
    pub fn register_factory<F>(&mut self, id: impl Into<String>, factory: F) -> Result<(), LookupError>
    where
        F: Fn(&mut Resolution<'_>) -> Result<Service, LookupError> + Send + Sync + 'static,
    {
        self.define(id.into(), Definition::Factory(Box::new(factory)))
    }

    /// Get all registered ids
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(|s| s.as_str())
    }

    fn define(&mut self, id: String, definition: Definition) -> Result<(), LookupError> {
        if self.definitions.contains_key(&id) {
            return Err(LookupError::duplicate(id));
        }
        self.definitions.insert(id, definition);
        Ok(())
    }

    fn resolve(&self, id: &str, resolving: &mut Vec<String>) -> Result<Service, LookupError> {
        let factory = match self.definitions.get(id) {
            Some(Definition::Instance(service)) => return Ok(service.clone()),
            Some(Definition::Factory(factory)) => factory,
            None => return Err(LookupError::not_found(id)),
        };

        if let Some(service) = self.cache().get(id) {
            return Ok(service.clone());
        }

        if resolving.iter().any(|r| r == id) {
            return Err(LookupError::circular(resolving, id));
        }

        let _build = self.building.lock();
        // Built by another thread while we waited for the lock.
        if let Some(service) = self.cache().get(id) {
            return Ok(service.clone());
        }

        debug!(service = id, "building service");
        resolving.push(id.to_string());
        let built = factory(&mut Resolution {
            container: self,
            resolving: &mut *resolving,
        });
        resolving.pop();

        let service = built?;
        self.cache().insert(id.to_string(), service.clone());
        Ok(service)
    }

    fn cache(&self) -> MutexGuard<'_, HashMap<String, Service>> {
        self.resolved.lock()
    }
}

impl Container for ServiceContainer {
    fn get(&self, id: &str) -> Result<Option<Service>, LookupError> {
        self.resolve(id, &mut Vec::new()).map(Some)
    }

    fn has(&self, id: &str) -> bool {
        self.definitions.contains_key(id)
    }
}

impl fmt::Debug for ServiceContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&str> = self.ids().collect();
        ids.sort_unstable();
        f.debug_struct("ServiceContainer")
            .field("services", &ids)
            .finish()
    }
}
