//! Constructor and method specifications.

use crate::container::Container;
use crate::directive::{build_directive, Directive};
use crate::error::{ConfigError, ConfigResult};
use crate::key::{method_key, KeySequencer, CONSTRUCTOR_KEY};
use crate::param::ParameterElement;
use crate::resolve::{MemberResolver, MemberSelector, ResolutionError};
use crate::types::{MemberDescriptor, MemberKind, TypeDescriptor};

/// Selects the constructor used to build an instance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConstructorSpec {
    parameters: Vec<ParameterElement>,
}

impl ConstructorSpec {
    pub fn new(parameters: Vec<ParameterElement>) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &[ParameterElement] {
        &self.parameters
    }
}

/// Selects a method called on an instance after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSpec {
    name: String,
    parameters: Vec<ParameterElement>,
    ordinal: u64,
    key: String,
}

impl MethodSpec {
    /// Creates a method spec, taking the next ordinal from `keys`.
    pub fn new(
        keys: &KeySequencer,
        name: impl Into<String>,
        parameters: Vec<ParameterElement>,
    ) -> ConfigResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConfigError::MissingMethodName);
        }
        let ordinal = keys.next_ordinal();
        Ok(Self {
            key: method_key(&name, ordinal),
            name,
            parameters,
            ordinal,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[ParameterElement] {
        &self.parameters
    }

    pub fn ordinal(&self) -> u64 {
        self.ordinal
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

/// A constructor or method specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberSpec {
    Constructor(ConstructorSpec),
    Method(MethodSpec),
}

impl MemberSpec {
    pub fn kind(&self) -> MemberKind {
        match self {
            MemberSpec::Constructor(_) => MemberKind::Constructor,
            MemberSpec::Method(_) => MemberKind::Method,
        }
    }

    /// The configured method name; `None` for constructors.
    pub fn name(&self) -> Option<&str> {
        match self {
            MemberSpec::Constructor(_) => None,
            MemberSpec::Method(method) => Some(method.name()),
        }
    }

    pub fn parameters(&self) -> &[ParameterElement] {
        match self {
            MemberSpec::Constructor(ctor) => ctor.parameters(),
            MemberSpec::Method(method) => method.parameters(),
        }
    }

    /// Identity within a registration's member list.
    pub fn key(&self) -> &str {
        match self {
            MemberSpec::Constructor(_) => CONSTRUCTOR_KEY,
            MemberSpec::Method(method) => method.key(),
        }
    }

    pub fn selector(&self) -> MemberSelector<'_> {
        match self {
            MemberSpec::Constructor(_) => MemberSelector::Constructor,
            MemberSpec::Method(method) => MemberSelector::Method(method.name()),
        }
    }

    /// Finds the member of `target` this spec refers to.
    pub fn resolve<'t>(
        &self,
        target: &'t TypeDescriptor,
    ) -> Result<&'t MemberDescriptor, ResolutionError> {
        MemberResolver::new(target).resolve(self.selector(), self.parameters())
    }

    /// Resolves against `target` and builds the directive for the container.
    pub fn directive(
        &self,
        container: &Container,
        target: &TypeDescriptor,
    ) -> Result<Directive, ResolutionError> {
        let candidate = self.resolve(target)?;
        Ok(build_directive(
            container,
            self.selector(),
            candidate,
            self.parameters(),
        ))
    }
}

impl From<ConstructorSpec> for MemberSpec {
    fn from(spec: ConstructorSpec) -> Self {
        MemberSpec::Constructor(spec)
    }
}

impl From<MethodSpec> for MemberSpec {
    fn from(spec: MethodSpec) -> Self {
        MemberSpec::Method(spec)
    }
}
