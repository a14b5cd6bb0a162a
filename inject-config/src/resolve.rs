//! Member resolution.
//!
//! Picks the constructor or method of a target type that a member
//! specification refers to.
//!
//! # Algorithm Overview
//!
//! 1. **Enumerate candidates**: constructors, or methods with the exact name,
//!    in declaration order
//! 2. **Match signatures**: same arity, and every parameter spec compatible
//!    with the declared parameter at the same position
//! 3. **Select first**: the first matching candidate wins
//!
//! Selection is first-match, not best-match. When two overloads both accept
//! the configured parameters, the one declared first is chosen and later
//! candidates are never looked at. Callers who need a particular overload
//! either order the descriptor accordingly or give parameter types
//! explicitly.

use std::fmt;

use thiserror::Error;
use tracing::{debug, trace};

use crate::enumerate::candidates;
use crate::param::ParameterSpec;
use crate::types::{MemberDescriptor, MemberKind, TypeDescriptor, TypeName};

/// Which member of a type a specification refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberSelector<'n> {
    Constructor,
    Method(&'n str),
}

impl<'n> MemberSelector<'n> {
    pub fn kind(&self) -> MemberKind {
        match self {
            MemberSelector::Constructor => MemberKind::Constructor,
            MemberSelector::Method(_) => MemberKind::Method,
        }
    }

    /// Whether `member` is a candidate for this selector.
    pub fn admits(&self, member: &MemberDescriptor) -> bool {
        match self {
            MemberSelector::Constructor => member.kind == MemberKind::Constructor,
            MemberSelector::Method(name) => {
                member.kind == MemberKind::Method && member.name.as_deref() == Some(*name)
            }
        }
    }
}

impl fmt::Display for MemberSelector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberSelector::Constructor => f.write_str("constructor"),
            MemberSelector::Method(name) => write!(f, "method `{}`", name),
        }
    }
}

/// No candidate accepted the configured parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("no constructor of `{target}` matches parameters ({parameters})")]
    NoMatchingConstructor {
        /// The type that was searched.
        target: TypeName,
        /// Display names of the configured parameters, comma-joined.
        parameters: String,
    },

    #[error("no method `{method}` of `{target}` matches parameters ({parameters})")]
    NoMatchingMethod {
        /// The type that was searched.
        target: TypeName,
        /// The configured method name.
        method: String,
        /// Display names of the configured parameters, comma-joined.
        parameters: String,
    },
}

impl ResolutionError {
    pub fn target(&self) -> &TypeName {
        match self {
            ResolutionError::NoMatchingConstructor { target, .. }
            | ResolutionError::NoMatchingMethod { target, .. } => target,
        }
    }
}

/// Whether `candidate` can be called with `specs`.
///
/// The arity must match exactly, and every spec must be compatible with the
/// declared parameter at its position.
pub fn signature_matches<P: ParameterSpec>(candidate: &MemberDescriptor, specs: &[P]) -> bool {
    if candidate.arity() != specs.len() {
        return false;
    }

    specs
        .iter()
        .zip(&candidate.params)
        .all(|(spec, declared)| spec.is_compatible(declared))
}

/// Resolves member specifications against one target type.
pub struct MemberResolver<'a> {
    target: &'a TypeDescriptor,
}

impl<'a> MemberResolver<'a> {
    pub fn new(target: &'a TypeDescriptor) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &'a TypeDescriptor {
        self.target
    }

    /// Returns the first candidate selected by `selector` that accepts
    /// `specs`, or the matching [`ResolutionError`].
    pub fn resolve<P: ParameterSpec>(
        &self,
        selector: MemberSelector<'_>,
        specs: &[P],
    ) -> Result<&'a MemberDescriptor, ResolutionError> {
        let target = self.target;
        let mut considered = 0usize;

        for candidate in candidates(target, selector) {
            considered += 1;
            if self.is_applicable(candidate, specs) {
                debug!(
                    "resolved {} of `{}` to {}",
                    selector,
                    target.name(),
                    candidate.signature()
                );
                return Ok(candidate);
            }
            trace!("rejected {} for {} parameter(s)", candidate.signature(), specs.len());
        }

        debug!(
            "no {} of `{}` among {} candidate(s) accepts {} parameter(s)",
            selector,
            target.name(),
            considered,
            specs.len()
        );
        Err(self.no_match(selector, specs))
    }

    /// Check if a candidate accepts the parameter specs.
    pub fn is_applicable<P: ParameterSpec>(&self, candidate: &MemberDescriptor, specs: &[P]) -> bool {
        signature_matches(candidate, specs)
    }

    fn no_match<P: ParameterSpec>(&self, selector: MemberSelector<'_>, specs: &[P]) -> ResolutionError {
        let parameters = specs
            .iter()
            .map(|s| s.display_name())
            .collect::<Vec<_>>()
            .join(", ");
        let target = self.target.name().clone();

        match selector {
            MemberSelector::Constructor => ResolutionError::NoMatchingConstructor { target, parameters },
            MemberSelector::Method(name) => ResolutionError::NoMatchingMethod {
                target,
                method: name.to_string(),
                parameters,
            },
        }
    }
}
