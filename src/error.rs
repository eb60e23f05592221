//! Root error type of the framework
//!
//! Every fallible framework operation returns [`PodiumError`], so dispatch
//! layers only need to recognize one type. Collaborator failures (container
//! lookups, template rendering, config loading) are wrapped, never flattened:
//! the wrapped error stays reachable through [`std::error::Error::source`].

use thiserror::Error;

use crate::config::ConfigError;
use crate::container::LookupError;
use crate::template::TemplateError;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, PodiumError>;

/// Message used when an application has no container bound.
pub const NO_CONTAINER_MESSAGE: &str = "No service container defined in application";

/// Message used by the controller snapshot guard.
pub const SNAPSHOT_MESSAGE: &str = "Unable to serialize a Controller object";

/// Errors raised by the framework
#[derive(Debug, Error)]
pub enum PodiumError {
    /// Wiring or setup defect: missing container, misregistered service,
    /// service lacking a required capability
    #[error("{0}")]
    Configuration(String),

    /// The container failed to provide a service
    #[error("service container error while resolving '{id}'")]
    Container {
        id: String,
        #[source]
        source: LookupError,
    },

    /// Programmer misuse
    #[error("{0}")]
    Usage(String),

    /// Failure reported by the templating service
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// Application configuration could not be loaded
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl PodiumError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a usage error
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    /// Wrap a container lookup failure for the given service id
    pub fn container(id: impl Into<String>, source: LookupError) -> Self {
        Self::Container {
            id: id.into(),
            source,
        }
    }

    /// The error raised when an application has no container
    pub fn no_container() -> Self {
        Self::configuration(NO_CONTAINER_MESSAGE)
    }

    /// Check if this is a configuration error
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Check if this is a container error
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Container { .. })
    }

    /// Check if this is a usage error
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }

    /// Get the wrapped lookup failure, if this is a container error
    pub fn lookup_error(&self) -> Option<&LookupError> {
        match self {
            Self::Container { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_no_container_display() {
        let err = PodiumError::no_container();
        assert!(err.is_configuration());
        assert_eq!(err.to_string(), NO_CONTAINER_MESSAGE);
    }

    #[test]
    fn test_container_error_keeps_source() {
        let err = PodiumError::container("db", LookupError::not_found("db"));
        assert!(err.is_container());
        let source = err.source().expect("container error has a source");
        let lookup = source
            .downcast_ref::<LookupError>()
            .expect("source is the lookup error");
        assert!(matches!(lookup, LookupError::NotFound { id } if id == "db"));
    }

    #[test]
    fn test_container_error_display() {
        let err = PodiumError::container("mailer", LookupError::not_found("mailer"));
        insta::assert_snapshot!(err.to_string(), @"service container error while resolving 'mailer'");
    }

    #[test]
    fn test_usage_error() {
        let err = PodiumError::usage(SNAPSHOT_MESSAGE);
        assert!(err.is_usage());
        assert!(err.lookup_error().is_none());
        assert!(err.source().is_none());
    }
}
