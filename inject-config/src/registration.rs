//! Registrations and applying them to a container.
//!
//! A registration names a type (optionally mapped to an implementation type
//! and optionally named) and carries the members to apply when the container
//! builds it. Applying a configuration resolves every member of every
//! registration. A member that fails to resolve aborts its own registration
//! only; the other registrations are still applied.

use std::fmt;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::container::{Container, TypeResolver};
use crate::directive::Directive;
use crate::error::{ConfigError, ConfigResult};
use crate::member::MemberSpec;
use crate::types::TypeName;

/// The members of one registration, keyed by [`MemberSpec::key`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberCollection {
    members: IndexMap<String, MemberSpec>,
}

impl MemberCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a member. Returns the rejected key if one with the same key exists.
    pub fn insert(&mut self, member: MemberSpec) -> Result<(), String> {
        let key = member.key().to_string();
        if self.members.contains_key(&key) {
            return Err(key);
        }
        self.members.insert(key, member);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&MemberSpec> {
        self.members.get(key)
    }

    /// Members in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &MemberSpec> {
        self.members.values()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// A `<register>` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationSpec {
    /// The registered type.
    pub ty: TypeName,
    /// The implementation type, when it differs from `ty`.
    pub map_to: Option<TypeName>,
    /// The registration name, for named registrations.
    pub name: Option<String>,
    members: MemberCollection,
}

impl RegistrationSpec {
    pub fn new(ty: impl Into<TypeName>) -> Self {
        Self {
            ty: ty.into(),
            map_to: None,
            name: None,
            members: MemberCollection::new(),
        }
    }

    pub fn with_map_to(mut self, map_to: impl Into<TypeName>) -> Self {
        self.map_to = Some(map_to.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The type whose members are resolved: `map_to` if set, else `ty`.
    pub fn target(&self) -> &TypeName {
        self.map_to.as_ref().unwrap_or(&self.ty)
    }

    pub fn members(&self) -> &MemberCollection {
        &self.members
    }

    /// Adds a member, rejecting a second member with the same key.
    pub fn add_member(&mut self, member: impl Into<MemberSpec>) -> ConfigResult<()> {
        self.members
            .insert(member.into())
            .map_err(|key| ConfigError::DuplicateMemberKey {
                registration: self.ty.clone(),
                key,
            })
    }

    /// Resolves every member against the target type, in order.
    ///
    /// Stops at the first member that fails.
    pub fn directives(&self, container: &Container) -> ConfigResult<Vec<Directive>> {
        let target = container.descriptor(self.target())?;
        let directives = self
            .members
            .iter()
            .map(|member| member.directive(container, target))
            .collect::<Result<Vec<_>, _>>()?;
        debug!("{}: built {} directive(s)", self, directives.len());
        Ok(directives)
    }
}

impl fmt::Display for RegistrationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ty)?;
        if let Some(map_to) = &self.map_to {
            write!(f, " -> {}", map_to)?;
        }
        if let Some(name) = &self.name {
            write!(f, " ({})", name)?;
        }
        Ok(())
    }
}

/// A parsed container configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerConfig {
    /// Aliases declared by the document itself.
    pub aliases: TypeResolver,
    pub registrations: Vec<RegistrationSpec>,
}

/// The result of applying one registration.
#[derive(Debug)]
pub struct RegistrationOutcome<'c> {
    pub registration: &'c RegistrationSpec,
    pub result: ConfigResult<Vec<Directive>>,
}

impl RegistrationOutcome<'_> {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

impl ContainerConfig {
    /// Applies every registration independently.
    pub fn apply(&self, container: &Container) -> Vec<RegistrationOutcome<'_>> {
        self.outcomes(container).collect()
    }

    /// Applies registrations one at a time as the iterator is advanced.
    pub fn outcomes<'c: 'a, 'a>(
        &'c self,
        container: &'a Container,
    ) -> impl Iterator<Item = RegistrationOutcome<'c>> + 'a {
        self.registrations.iter().map(move |registration| {
            let result = registration.directives(container);
            if let Err(err) = &result {
                warn!("registration {} not applied: {}", registration, err);
            }
            RegistrationOutcome {
                registration,
                result,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeySequencer;
    use crate::member::{ConstructorSpec, MethodSpec};
    use crate::param::ParameterElement;
    use crate::registry::TypeRegistry;
    use crate::resolve::ResolutionError;
    use crate::types::{ParamDescriptor, TypeDescriptor};

    fn container() -> Container {
        let registry = TypeRegistry::new()
            .with_type(
                TypeDescriptor::new("Widget")
                    .with_constructor(vec![])
                    .with_method("Init", vec![])
                    .with_method("Init", vec![ParamDescriptor::new("count", "int")]),
            )
            .and_then(|r| r.with_type(TypeDescriptor::new("Gadget").with_constructor(vec![])))
            .unwrap();
        Container::new(registry)
    }

    #[test]
    fn test_second_constructor_rejected() {
        let mut registration = RegistrationSpec::new("Widget");
        registration.add_member(ConstructorSpec::default()).unwrap();

        let err = registration.add_member(ConstructorSpec::default()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DuplicateMemberKey { ref key, .. } if key == "constructor"
        ));
    }

    #[test]
    fn test_repeated_method_names_coexist() {
        let keys = KeySequencer::new();
        let mut registration = RegistrationSpec::new("Widget");
        registration
            .add_member(MethodSpec::new(&keys, "Init", vec![]).unwrap())
            .unwrap();
        registration
            .add_member(MethodSpec::new(&keys, "Init", vec![ParameterElement::new("count")]).unwrap())
            .unwrap();

        assert_eq!(registration.members().len(), 2);
        assert!(registration.members().get("method:Init:1").is_some());
        assert!(registration.members().get("method:Init:2").is_some());

        let directives = registration.directives(&container()).unwrap();
        assert_eq!(directives[0].providers().len(), 0);
        assert_eq!(directives[1].providers().len(), 1);
    }

    #[test]
    fn test_map_to_is_the_target() {
        let registration = RegistrationSpec::new("IWidget").with_map_to("Widget");
        assert_eq!(registration.target().as_str(), "Widget");
        assert_eq!(registration.to_string(), "IWidget -> Widget");
    }

    #[test]
    fn test_failure_is_isolated_to_its_registration() {
        let keys = KeySequencer::new();
        let mut broken = RegistrationSpec::new("Widget").with_name("broken");
        broken
            .add_member(MethodSpec::new(&keys, "Missing", vec![]).unwrap())
            .unwrap();
        let mut fine = RegistrationSpec::new("Gadget");
        fine.add_member(ConstructorSpec::default()).unwrap();
        let unknown = RegistrationSpec::new("Nowhere");

        let config = ContainerConfig {
            aliases: TypeResolver::new(),
            registrations: vec![broken, fine, unknown],
        };
        let outcomes = config.apply(&container());

        assert_eq!(outcomes.len(), 3);
        assert!(matches!(
            outcomes[0].result,
            Err(ConfigError::Resolution(ResolutionError::NoMatchingMethod { .. }))
        ));
        assert!(outcomes[1].is_ok());
        assert!(matches!(outcomes[2].result, Err(ConfigError::UnknownType(_))));
    }

    #[test]
    fn test_outcomes_follow_registration_order() {
        let config = ContainerConfig {
            aliases: TypeResolver::new(),
            registrations: vec![
                RegistrationSpec::new("Nowhere"),
                RegistrationSpec::new("Gadget"),
            ],
        };
        let container = container();
        let mut outcomes = config.outcomes(&container);

        let first = outcomes.next().unwrap();
        assert_eq!(first.registration.ty.as_str(), "Nowhere");
        assert!(!first.is_ok());
        let second = outcomes.next().unwrap();
        assert_eq!(second.registration.ty.as_str(), "Gadget");
        assert!(second.is_ok());
        assert!(outcomes.next().is_none());
    }
}
