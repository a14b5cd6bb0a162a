//! Container-side context and type aliases.

use indexmap::IndexMap;

use crate::error::{ConfigError, ConfigResult};
use crate::registry::TypeRegistry;
use crate::types::{TypeDescriptor, TypeName};

/// What the container knows while configuration is applied to it: the type
/// registry and the alias table.
///
/// Handed to [`ParameterSpec::build_provider`](crate::ParameterSpec::build_provider)
/// and used to look up the descriptor of each registration's target type.
#[derive(Debug, Clone, Default)]
pub struct Container {
    registry: TypeRegistry,
    types: TypeResolver,
}

impl Container {
    pub fn new(registry: TypeRegistry) -> Self {
        Self {
            registry,
            types: TypeResolver::new(),
        }
    }

    /// A container whose registry is rewritten through `types`.
    ///
    /// Descriptor type names are resolved once here, so they compare equal to
    /// configuration names resolved through the same aliases.
    pub fn with_aliases(registry: TypeRegistry, types: TypeResolver) -> ConfigResult<Self> {
        let registry = registry.resolve_aliases(&types)?;
        Ok(Self { registry, types })
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn types(&self) -> &TypeResolver {
        &self.types
    }

    /// `name` with its alias applied.
    pub fn resolve(&self, name: &TypeName) -> TypeName {
        self.types.resolve(name.as_str())
    }

    /// The descriptor for `name`, or [`ConfigError::UnknownType`].
    pub fn descriptor(&self, name: &TypeName) -> ConfigResult<&TypeDescriptor> {
        self.registry
            .get(&self.resolve(name))
            .ok_or_else(|| ConfigError::UnknownType(name.clone()))
    }
}

/// Maps short type aliases to full type names.
///
/// Names without an alias pass through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeResolver {
    aliases: IndexMap<String, TypeName>,
}

impl TypeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an alias.
    pub fn add_alias(&mut self, alias: impl Into<String>, ty: impl Into<TypeName>) {
        self.aliases.insert(alias.into(), ty.into());
    }

    pub fn resolve(&self, name: &str) -> TypeName {
        match self.aliases.get(name) {
            Some(ty) => ty.clone(),
            None => TypeName::new(name),
        }
    }

    /// Aliases in the order they were added.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &TypeName)> {
        self.aliases.iter().map(|(alias, ty)| (alias.as_str(), ty))
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
