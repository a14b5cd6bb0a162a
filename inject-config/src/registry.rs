//! Type registry.
//!
//! Holds the [`TypeDescriptor`]s the resolver works against. A registry is
//! populated before any configuration is applied, either in code or from
//! TOML/JSON sources of the form
//!
//! ```toml
//! [[types]]
//! name = "Widget"
//! constructors = [ { params = [ { name = "logger", type = "ILogger" } ] } ]
//! methods = [ { name = "Init", params = [] } ]
//! ```
//!
//! Members keep the order they are written in; that order is the resolver's
//! enumeration order.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::container::TypeResolver;
use crate::error::{ConfigError, ConfigResult};
use crate::types::{ParamDescriptor, TypeDescriptor, TypeName};

/// On-disk form of a registry file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrySource {
    pub types: Vec<TypeSource>,
}

/// On-disk form of one type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeSource {
    pub name: TypeName,
    #[serde(default)]
    pub constructors: Vec<ConstructorSource>,
    #[serde(default)]
    pub methods: Vec<MethodSource>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConstructorSource {
    #[serde(default)]
    pub params: Vec<ParamDescriptor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodSource {
    pub name: String,
    #[serde(default)]
    pub params: Vec<ParamDescriptor>,
}

impl From<TypeSource> for TypeDescriptor {
    fn from(source: TypeSource) -> Self {
        let ty = source
            .constructors
            .into_iter()
            .fold(TypeDescriptor::new(source.name), |ty, ctor| {
                ty.with_constructor(ctor.params)
            });
        source
            .methods
            .into_iter()
            .fold(ty, |ty, method| ty.with_method(method.name, method.params))
    }
}

/// All type descriptors known to a container.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: IndexMap<TypeName, TypeDescriptor>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a descriptor. A type may only be described once.
    pub fn insert(&mut self, ty: TypeDescriptor) -> ConfigResult<()> {
        if self.types.contains_key(ty.name()) {
            return Err(ConfigError::DuplicateType(ty.name().clone()));
        }
        self.types.insert(ty.name().clone(), ty);
        Ok(())
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_type(mut self, ty: TypeDescriptor) -> ConfigResult<Self> {
        self.insert(ty)?;
        Ok(self)
    }

    pub fn get(&self, name: &TypeName) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Descriptors in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.values()
    }

    /// Rewrites every descriptor through `types`.
    ///
    /// Fails with [`ConfigError::DuplicateType`] when two types resolve to the
    /// same name.
    pub fn resolve_aliases(self, types: &TypeResolver) -> ConfigResult<Self> {
        if types.is_empty() {
            return Ok(self);
        }
        let mut resolved = Self::new();
        for ty in self.types.into_values() {
            resolved.insert(ty.map_types(|name| types.resolve(name.as_str())))?;
        }
        Ok(resolved)
    }

    /// Adds every type of a parsed source.
    pub fn extend_from_source(&mut self, source: RegistrySource) -> ConfigResult<()> {
        for ty in source.types {
            self.insert(ty.into())?;
        }
        Ok(())
    }

    /// Adds the types described by a TOML document.
    pub fn load_toml_str(&mut self, text: &str) -> ConfigResult<()> {
        let source: RegistrySource = toml::from_str(text)?;
        self.extend_from_source(source)
    }

    /// Adds the types described by a JSON document.
    pub fn load_json_str(&mut self, text: &str) -> ConfigResult<()> {
        let source: RegistrySource = serde_json::from_str(text)?;
        self.extend_from_source(source)
    }

    /// Adds the types described by a `.toml` or `.json` file.
    pub fn load_file(&mut self, path: &Path) -> ConfigResult<()> {
        let extension = path.extension().and_then(|e| e.to_str());
        let before = self.len();
        match extension {
            Some("toml") => self.load_toml_str(&fs::read_to_string(path)?)?,
            Some("json") => self.load_json_str(&fs::read_to_string(path)?)?,
            _ => {
                return Err(ConfigError::UnsupportedRegistryFormat {
                    path: path.to_path_buf(),
                })
            }
        }
        debug!(
            "loaded {} type descriptors from {}",
            self.len() - before,
            path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const WIDGET_TOML: &str = r#"
        [[types]]
        name = "Widget"
        constructors = [
            { params = [] },
            { params = [ { name = "logger", type = "ILogger" } ] },
        ]

        [[types.methods]]
        name = "Init"

        [[types.methods]]
        name = "Init"
        params = [ { name = "count", type = "System.Int32" } ]
    "#;

    #[test]
    fn test_load_toml_preserves_order() {
        let mut registry = TypeRegistry::new();
        registry.load_toml_str(WIDGET_TOML).unwrap();

        let widget = registry.get(&TypeName::new("Widget")).unwrap();
        assert_eq!(widget.constructors().len(), 2);
        assert_eq!(widget.constructors()[0].arity(), 0);
        assert_eq!(widget.constructors()[1].arity(), 1);

        let arities: Vec<_> = widget.methods().iter().map(|m| m.arity()).collect();
        assert_eq!(arities, vec![0, 1]);
        assert_eq!(
            widget.methods()[1].params[0],
            ParamDescriptor::new("count", "System.Int32")
        );
    }

    #[test]
    fn test_load_json() {
        let mut registry = TypeRegistry::new();
        registry
            .load_json_str(
                r#"{ "types": [ { "name": "Gadget", "methods": [ { "name": "Start" } ] } ] }"#,
            )
            .unwrap();

        let gadget = registry.get(&TypeName::new("Gadget")).unwrap();
        assert!(gadget.constructors().is_empty());
        assert_eq!(gadget.methods()[0].name.as_deref(), Some("Start"));
    }

    #[test]
    fn test_duplicate_type_rejected() {
        let mut registry = TypeRegistry::new();
        registry.insert(TypeDescriptor::new("Widget")).unwrap();

        let err = registry.insert(TypeDescriptor::new("Widget")).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateType(name) if name.as_str() == "Widget"));
    }

    #[test]
    fn test_load_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("widgets.toml");
        fs::write(&toml_path, WIDGET_TOML).unwrap();
        let yaml_path = dir.path().join("widgets.yaml");
        fs::write(&yaml_path, "types: []").unwrap();

        let mut registry = TypeRegistry::new();
        registry.load_file(&toml_path).unwrap();
        assert_eq!(registry.len(), 1);

        let err = registry.load_file(&yaml_path).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedRegistryFormat { .. }));
    }
}
