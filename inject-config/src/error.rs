//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::resolve::ResolutionError;
use crate::types::TypeName;

/// Errors raised while loading configuration or applying it to a container.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("{line}:{column}: unexpected element <{element}> inside <{parent}>")]
    UnexpectedElement {
        element: String,
        parent: String,
        line: u32,
        column: u32,
    },

    #[error("{line}:{column}: <{element}> is missing required attribute `{attribute}`")]
    MissingAttribute {
        element: String,
        attribute: String,
        line: u32,
        column: u32,
    },

    #[error("{line}:{column}: parameter `{parameter}` has more than one value element")]
    MultipleValues {
        parameter: String,
        line: u32,
        column: u32,
    },

    #[error("method specification requires a non-empty name")]
    MissingMethodName,

    #[error("registration for `{registration}` already contains a member with key `{key}`")]
    DuplicateMemberKey { registration: TypeName, key: String },

    #[error("type `{0}` is defined more than once")]
    DuplicateType(TypeName),

    #[error("no type descriptor registered for `{0}`")]
    UnknownType(TypeName),

    #[error("registry file {path} has unsupported extension (expected .toml or .json)")]
    UnsupportedRegistryFormat { path: PathBuf },

    #[error("invalid TOML registry: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON registry: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}

/// Configuration result type.
pub type ConfigResult<T> = Result<T, ConfigError>;
