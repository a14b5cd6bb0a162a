//! Configuration-loading sessions.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::container::TypeResolver;
use crate::error::ConfigResult;
use crate::key::KeySequencer;
use crate::member::{MemberSpec, MethodSpec};
use crate::param::ParameterElement;
use crate::registration::ContainerConfig;
use crate::xml;

/// One configuration-loading session.
///
/// Owns the [`KeySequencer`] that numbers method specifications, so method
/// keys are unique across everything loaded through the same session, and
/// the base aliases every document loaded through it can use.
///
/// Sessions are `Sync`; several threads may load documents through one
/// session at the same time.
#[derive(Debug, Default)]
pub struct LoadSession {
    keys: KeySequencer,
    types: TypeResolver,
}

impl LoadSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session whose documents start with `types` as their aliases.
    pub fn with_aliases(types: TypeResolver) -> Self {
        Self {
            keys: KeySequencer::new(),
            types,
        }
    }

    pub fn keys(&self) -> &KeySequencer {
        &self.keys
    }

    /// Base aliases.
    pub fn types(&self) -> &TypeResolver {
        &self.types
    }

    /// Creates a method spec numbered by this session.
    pub fn method(
        &self,
        name: impl Into<String>,
        parameters: Vec<ParameterElement>,
    ) -> ConfigResult<MethodSpec> {
        MethodSpec::new(&self.keys, name, parameters)
    }

    /// Parses a `<container>` document.
    pub fn parse_config(&self, text: &str) -> ConfigResult<ContainerConfig> {
        xml::parse_config(self, text)
    }

    /// Parses a single `<constructor>` or `<method>` element.
    pub fn parse_member(&self, text: &str) -> ConfigResult<MemberSpec> {
        xml::parse_member(self, text)
    }

    /// Reads and parses a configuration file.
    pub fn load_config_file(&self, path: &Path) -> ConfigResult<ContainerConfig> {
        let text = fs::read_to_string(path)?;
        let config = self.parse_config(&text)?;
        info!(
            "loaded {} registration(s) from {}",
            config.registrations.len(),
            path.display()
        );
        Ok(config)
    }
}
