//! Generation configuration shared by every pass of a run.
//!
//! The configuration is read-only during refinement. It is loaded from JSON (every field optional, unknown fields
//! rejected) or built in code with the `with_*` methods.
//!
//! ## Examples
//! ```rust
//! use refinery::config::GenerationConfiguration;
//!
//! let config: GenerationConfiguration = serde_json::from_str(r#"{"uses_backing_store": true}"#).unwrap();
//! assert!(config.uses_backing_store);
//! assert_eq!(config.namespace_separator, ".");
//! assert_eq!(config.serializers.len(), 2);
//! ```

use std::fs;
use std::path::Path;

use indexmap::IndexSet;
use miette::Diagnostic;
use refinery_core::lang::modules::{DEFAULT_DESERIALIZERS, DEFAULT_SERIALIZERS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Settings of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationConfiguration {
    /// Separator between namespace segments in module paths. Targets may override it.
    pub namespace_separator: String,
    /// Whether models keep their state in a backing store.
    pub uses_backing_store: bool,
    /// Serialization writer factories, `module.Symbol`, in registration order.
    pub serializers: IndexSet<String>,
    /// Parse node factories, `module.Symbol`, in registration order.
    pub deserializers: IndexSet<String>,
}

impl Default for GenerationConfiguration {
    fn default() -> Self {
        Self {
            namespace_separator: ".".to_string(),
            uses_backing_store: false,
            serializers: DEFAULT_SERIALIZERS.iter().map(|s| s.to_string()).collect(),
            deserializers: DEFAULT_DESERIALIZERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl GenerationConfiguration {
    pub fn with_namespace_separator(mut self, separator: impl Into<String>) -> Self {
        self.namespace_separator = separator.into();
        self
    }

    pub fn with_backing_store(mut self, uses_backing_store: bool) -> Self {
        self.uses_backing_store = uses_backing_store;
        self
    }

    pub fn with_serializers<I, S>(mut self, serializers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.serializers = serializers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_deserializers<I, S>(mut self, deserializers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.deserializers = deserializers.into_iter().map(Into::into).collect();
        self
    }

    /// Load a configuration file.
    ///
    /// ## Errors
    /// - [`ConfigError::Read`] when the file cannot be read.
    /// - [`ConfigError::Parse`] when it is not valid JSON or contains unknown fields.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Failure to load a configuration file.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("cannot read configuration `{path}`")]
    #[diagnostic(code(refinery::config::read))]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration `{path}`: {source}")]
    #[diagnostic(
        code(refinery::config::parse),
        help("known fields: namespace_separator, uses_backing_store, serializers, deserializers")
    )]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
