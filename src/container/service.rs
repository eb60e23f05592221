//! Type-erased service handles

use std::any::{self, Any};
use std::fmt;
use std::sync::Arc;

use crate::template::TemplateEngine;

/// A shared, type-erased service instance
///
/// Cloning is cheap and keeps the identity of the underlying instance, so a
/// service handed out twice by a caching container compares equal with
/// [`Service::ptr_eq`].
#[derive(Clone)]
pub struct Service {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Service {
    /// Wrap a value as a service
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Wrap an already shared value as a service
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            value,
            type_name: any::type_name::<T>(),
        }
    }

    /// Wrap a template engine so it satisfies the templating capability check
    pub fn template_engine<E: TemplateEngine + 'static>(engine: E) -> Self {
        let engine: Arc<dyn TemplateEngine> = Arc::new(engine);
        Self::new(engine)
    }

    /// Borrow the instance as a concrete type
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Get a shared handle to the instance as a concrete type
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.value).downcast::<T>().ok()
    }

    /// Check if the instance has the given concrete type
    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Get the instance as a template engine, if it was registered as one
    pub fn as_template_engine(&self) -> Option<Arc<dyn TemplateEngine>> {
        self.downcast_ref::<Arc<dyn TemplateEngine>>().cloned()
    }

    /// Name of the concrete type the service was created from
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Check if two handles point to the same instance
    pub fn ptr_eq(&self, other: &Service) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Service")
            .field("type", &self.type_name)
            .finish()
    }
}
