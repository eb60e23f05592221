//! Lookup failures reported by containers

use thiserror::Error;

/// Boxed cause of a failed service construction
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors a container can report while resolving a service
#[derive(Debug, Error)]
pub enum LookupError {
    /// No service registered under this id
    #[error("service not found: {id}")]
    NotFound { id: String },

    /// A service was registered twice under the same id
    #[error("duplicate service definition: {id}")]
    Duplicate { id: String },

    /// Factories depend on each other in a loop
    #[error("circular service reference detected: {chain}")]
    CircularDependency { chain: String },

    /// A factory failed to build its service
    #[error("failed to construct service '{id}'")]
    Construction {
        id: String,
        #[source]
        source: BoxError,
    },
}

impl LookupError {
    /// Create a not found error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create a duplicate definition error
    pub fn duplicate(id: impl Into<String>) -> Self {
        Self::Duplicate { id: id.into() }
    }

    /// Create a circular dependency error from the ids being resolved
    pub fn circular(chain: &[String], id: &str) -> Self {
        let mut ids: Vec<&str> = chain.iter().map(String::as_str).collect();
        ids.push(id);
        Self::CircularDependency {
            chain: ids.join(" -> "),
        }
    }

    /// Create a construction error wrapping the factory's failure
    pub fn construction(id: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Construction {
            id: id.into(),
            source: source.into(),
        }
    }

    /// The service id this error is about, if it names exactly one
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::NotFound { id } | Self::Duplicate { id } | Self::Construction { id, .. } => {
                Some(id)
            }
            Self::CircularDependency { .. } => None,
        }
    }
}
