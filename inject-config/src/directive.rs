//! Directives handed to the container.
//!
//! A [`Directive`] is the resolved, ready-to-run form of a member
//! specification: which member to call and, position by position, how to
//! obtain each argument. Providers are applied positionally, so provider `i`
//! always belongs to the member's parameter `i`.

use std::fmt;

use serde::Serialize;

use crate::container::Container;
use crate::param::ParameterSpec;
use crate::resolve::MemberSelector;
use crate::types::{MemberDescriptor, TypeName};

/// Yields one argument when the container runs a directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueProvider {
    /// Resolve `ty` from the container, optionally by registration name.
    Resolve { ty: TypeName, name: Option<String> },
    /// Convert `value` to `ty`.
    Literal { ty: TypeName, value: String },
    /// Resolve `ty` if it is registered, otherwise supply nothing.
    Optional { ty: TypeName, name: Option<String> },
}

impl ValueProvider {
    /// The type this provider produces.
    pub fn ty(&self) -> &TypeName {
        match self {
            ValueProvider::Resolve { ty, .. }
            | ValueProvider::Literal { ty, .. }
            | ValueProvider::Optional { ty, .. } => ty,
        }
    }
}

/// A construction or post-initialization step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Directive {
    /// Construct the instance through the resolved constructor.
    Construct { providers: Vec<ValueProvider> },
    /// Call `name` on the constructed instance.
    Invoke {
        name: String,
        providers: Vec<ValueProvider>,
    },
}

impl Directive {
    pub fn providers(&self) -> &[ValueProvider] {
        match self {
            Directive::Construct { providers } | Directive::Invoke { providers, .. } => providers,
        }
    }

    /// The invoked method name; `None` for constructors.
    pub fn method_name(&self) -> Option<&str> {
        match self {
            Directive::Construct { .. } => None,
            Directive::Invoke { name, .. } => Some(name),
        }
    }
}

impl fmt::Display for ValueProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueProvider::Resolve { ty, name } => {
                write!(f, "resolve {}", ty)?;
                if let Some(name) = name {
                    write!(f, " {:?}", name)?;
                }
                Ok(())
            }
            ValueProvider::Literal { ty, value } => write!(f, "literal {} = {:?}", ty, value),
            ValueProvider::Optional { ty, name } => {
                write!(f, "optional {}", ty)?;
                if let Some(name) = name {
                    write!(f, " {:?}", name)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::Construct { .. } => f.write_str("construct(")?,
            Directive::Invoke { name, .. } => write!(f, "invoke {}(", name)?,
        }
        for (i, provider) in self.providers().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", provider)?;
        }
        f.write_str(")")
    }
}

/// Builds the directive for a candidate the resolver has already accepted.
///
/// `specs` must have been matched against `candidate`; arity and
/// compatibility are not checked again here.
pub fn build_directive<P: ParameterSpec>(
    container: &Container,
    selector: MemberSelector<'_>,
    candidate: &MemberDescriptor,
    specs: &[P],
) -> Directive {
    debug_assert_eq!(candidate.arity(), specs.len());

    let providers = specs
        .iter()
        .zip(&candidate.params)
        .map(|(spec, declared)| spec.build_provider(container, declared))
        .collect();

    match selector {
        MemberSelector::Constructor => Directive::Construct { providers },
        MemberSelector::Method(name) => Directive::Invoke {
            name: name.to_string(),
            providers,
        },
    }
}
