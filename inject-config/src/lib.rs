//! Constructor and method resolution for configuration-driven dependency
//! injection.
//!
//! A container configuration names, per registration, which constructor to
//! build an instance with and which methods to call on it afterwards, each
//! with an ordered list of parameters. This crate finds the member of the
//! target type each of those specifications refers to and turns it into a
//! [`Directive`] the container can run.
//!
//! # Pipeline
//!
//! ```text
//! XML ──► LoadSession ──► ContainerConfig ──► MemberResolver ──► Directive
//!              │                                    ▲
//!         KeySequencer                        TypeRegistry
//! ```
//!
//! Type information comes from a [`TypeRegistry`] of [`TypeDescriptor`]s
//! built ahead of time. Resolution is first-match over the descriptor's
//! declaration order; see [`resolve`] for the details.

pub mod container;
pub mod directive;
pub mod enumerate;
pub mod error;
pub mod key;
pub mod member;
pub mod param;
pub mod registration;
pub mod registry;
pub mod resolve;
pub mod session;
pub mod types;
pub mod xml;

pub use container::{Container, TypeResolver};
pub use directive::{build_directive, Directive, ValueProvider};
pub use error::{ConfigError, ConfigResult};
pub use key::{KeySequencer, CONSTRUCTOR_KEY};
pub use member::{ConstructorSpec, MemberSpec, MethodSpec};
pub use param::{ParameterElement, ParameterSpec, ValueElement};
pub use registration::{ContainerConfig, MemberCollection, RegistrationOutcome, RegistrationSpec};
pub use registry::TypeRegistry;
pub use resolve::{signature_matches, MemberResolver, MemberSelector, ResolutionError};
pub use session::LoadSession;
pub use types::{MemberDescriptor, MemberKind, ParamDescriptor, TypeDescriptor, TypeName};
