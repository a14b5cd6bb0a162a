//! Injection configuration checker.
//!
//! Loads type registries and a container configuration, resolves the
//! constructor and method members of every registration, and reports the
//! directives each one produces or why it could not be applied.

pub mod config;
pub mod report;

use std::path::PathBuf;

use inject_config::{ConfigError, Container, ContainerConfig, TypeRegistry};
use thiserror::Error;
use tracing::debug;

pub use config::{Config, OutputFormat};
pub use report::{RegistrationReport, Report};

/// Checker errors.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("registry {path}: {source}")]
    Registry {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    #[error("type aliases: {0}")]
    Aliases(#[source] ConfigError),
}

/// Builds the container context from the configured registry files.
pub fn load_container(config: &Config) -> Result<Container, CheckError> {
    let mut registry = TypeRegistry::new();
    for path in &config.registries {
        registry
            .load_file(path)
            .map_err(|source| CheckError::Registry {
                path: path.clone(),
                source,
            })?;
    }
    debug!("registry holds {} type(s)", registry.len());
    Container::with_aliases(registry, config.type_resolver()).map_err(CheckError::Aliases)
}

/// Applies `document` to `container` and collects the report.
///
/// With `fail_fast`, registrations after the first failure are not resolved.
pub fn check(config: &Config, container: &Container, document: &ContainerConfig) -> Report {
    let mut registrations = Vec::new();
    for outcome in document.outcomes(container) {
        let failed = !outcome.is_ok();
        registrations.push(RegistrationReport::from(outcome));
        if failed && config.fail_fast {
            break;
        }
    }
    Report { registrations }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inject_config::LoadSession;

    const CONFIG: &str = r#"
        <container>
          <register type="Widget" name="bad"><method name="Missing"/></register>
          <register type="Widget"><constructor/></register>
        </container>
    "#;

    fn container() -> Container {
        let mut registry = TypeRegistry::new();
        registry
            .load_toml_str(
                r#"
                [[types]]
                name = "Widget"
                constructors = [ { params = [] } ]
                "#,
            )
            .unwrap();
        Container::new(registry)
    }

    #[test]
    fn test_check_reports_every_registration() {
        let document = LoadSession::new().parse_config(CONFIG).unwrap();
        let report = check(&Config::default(), &container(), &document);

        assert_eq!(report.registrations.len(), 2);
        assert_eq!(report.failures(), 1);
        assert!(!report.is_success());
    }

    #[test]
    fn test_fail_fast_stops_at_first_failure() {
        let document = LoadSession::new().parse_config(CONFIG).unwrap();
        let config = Config {
            fail_fast: true,
            ..Config::default()
        };
        let report = check(&config, &container(), &document);

        assert_eq!(report.registrations.len(), 1);
        assert_eq!(report.failures(), 1);
    }

    #[test]
    fn test_container_uses_configured_aliases() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("types.toml");
        std::fs::write(
            &path,
            r#"
            [[types]]
            name = "Shop.Widget"
            constructors = [ { params = [ { name = "size", type = "int" } ] } ]
            "#,
        )
        .unwrap();
        let mut config = Config {
            registries: vec![path],
            ..Config::default()
        };
        config.aliases.insert("int".to_string(), "System.Int32".to_string());
        config.aliases.insert("Widget".to_string(), "Shop.Widget".to_string());

        let container = load_container(&config).unwrap();
        let widget = container
            .descriptor(&inject_config::TypeName::new("Widget"))
            .unwrap();
        assert_eq!(widget.constructors()[0].params[0].ty.as_str(), "System.Int32");
    }

    #[test]
    fn test_registry_error_names_file() {
        let config = Config {
            registries: vec![PathBuf::from("does/not/exist.toml")],
            ..Config::default()
        };
        let err = load_container(&config).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.toml"));
    }
}
