//! Checker Configuration
//!
//! Settings read from an optional TOML file; command-line flags override
//! them.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use inject_config::TypeResolver;
use serde::{Deserialize, Serialize};

use crate::CheckError;

/// Configuration for the checker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Type registry files (`.toml` or `.json`), loaded in order.
    pub registries: Vec<PathBuf>,

    /// Aliases available to every configuration document.
    pub aliases: IndexMap<String, String>,

    /// How the report is printed.
    pub output: OutputFormat,

    /// Stop at the first registration that fails to resolve.
    pub fail_fast: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registries: Vec::new(),
            aliases: IndexMap::new(),
            output: OutputFormat::Text,
            fail_fast: false,
        }
    }
}

/// Report format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One line per registration and directive.
    Text,
    /// The whole report as JSON.
    Json,
}

impl Config {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self, CheckError> {
        let text = fs::read_to_string(path).map_err(|source| CheckError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| CheckError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Renders this configuration as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// The configured aliases as a resolver.
    pub fn type_resolver(&self) -> TypeResolver {
        let mut types = TypeResolver::new();
        for (alias, ty) in &self.aliases {
            types.add_alias(alias.as_str(), ty.as_str());
        }
        types
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inject_config::TypeName;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            registries = ["types/core.toml"]

            [aliases]
            int = "System.Int32"
            "#,
        )
        .unwrap();

        assert_eq!(config.registries, vec![PathBuf::from("types/core.toml")]);
        assert_eq!(config.output, OutputFormat::Text);
        assert!(!config.fail_fast);
        assert_eq!(
            config.type_resolver().resolve("int"),
            TypeName::new("System.Int32")
        );
    }

    #[test]
    fn test_default_round_trips_through_toml() {
        let config = Config::default();
        let text = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("check.toml");
        fs::write(&path, "output = \"yaml\"").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, CheckError::ConfigParse { .. }));
        assert!(err.to_string().contains("check.toml"));
    }
}
