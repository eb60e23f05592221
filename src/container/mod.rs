//! Service containers
//!
//! A container maps string identifiers to shared service instances. The
//! framework only consumes the [`Container`] trait; [`ServiceContainer`] is a
//! small in-memory implementation supporting eager instances and lazily built,
//! cached factories.
//!
//! # Example
//!
//! ```rust
//! use podium::container::{Container, Service, ServiceContainer};
//!
//! let mut container = ServiceContainer::new();
//! container.register("greeting", Service::new(String::from("hello"))).unwrap();
//!
//! let service = container.get("greeting").unwrap().unwrap();
//! assert_eq!(service.downcast_ref::<String>().unwrap(), "hello");
//! ```

mod error;
mod registry;
mod service;

pub use error::LookupError;
pub use registry::{Factory, Resolution, ServiceContainer};
pub use service::Service;

/// Registry resolving service identifiers to instances
///
/// Unknown identifiers must be reported as [`LookupError::NotFound`].
/// `Ok(None)` means the identifier is known but produced no instance, which
/// callers treat as a misregistered service.
pub trait Container: Send + Sync {
    /// Resolve a service by identifier
    fn get(&self, id: &str) -> Result<Option<Service>, LookupError>;

    /// Check if an identifier is known to this container
    fn has(&self, id: &str) -> bool;
}
