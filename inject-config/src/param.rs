//! Parameter specifications.
//!
//! The resolver and the directive builder only talk to parameters through
//! [`ParameterSpec`]. [`ParameterElement`] is the implementation produced by
//! the XML reader; other callers may supply their own.

use crate::container::Container;
use crate::directive::ValueProvider;
use crate::types::{ParamDescriptor, TypeName};

/// Configuration-side description of one argument.
pub trait ParameterSpec {
    /// Whether this spec can be supplied to a parameter declared as `declared`.
    fn is_compatible(&self, declared: &ParamDescriptor) -> bool;

    /// Builds the provider that yields this argument at call time.
    fn build_provider(&self, container: &Container, declared: &ParamDescriptor) -> ValueProvider;

    /// Name used when reporting a failed resolution.
    fn display_name(&self) -> &str;
}

/// Where a configured parameter's value comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueElement {
    /// Resolve from the container, optionally named and with an overriding type.
    Dependency {
        name: Option<String>,
        ty: Option<TypeName>,
    },
    /// A literal converted to the parameter type, or to `ty` when given,
    /// when the directive runs.
    Value {
        value: String,
        ty: Option<TypeName>,
    },
    /// Resolve from the container if registered, otherwise pass nothing.
    Optional {
        name: Option<String>,
        ty: Option<TypeName>,
    },
}

/// A `<param>` entry of a constructor or method specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterElement {
    /// Must equal the declared parameter name.
    pub name: String,
    /// When present, must equal the declared parameter type.
    pub ty: Option<TypeName>,
    /// When absent the declared type is resolved from the container.
    pub value: Option<ValueElement>,
}

impl ParameterElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            value: None,
        }
    }

    pub fn with_type(mut self, ty: impl Into<TypeName>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    pub fn with_value(mut self, value: ValueElement) -> Self {
        self.value = Some(value);
        self
    }
}

impl ParameterSpec for ParameterElement {
    fn is_compatible(&self, declared: &ParamDescriptor) -> bool {
        if self.name != declared.name {
            return false;
        }
        match &self.ty {
            Some(ty) => *ty == declared.ty,
            None => true,
        }
    }

    fn build_provider(&self, container: &Container, declared: &ParamDescriptor) -> ValueProvider {
        let provided_type = |ty: &Option<TypeName>| match ty {
            Some(ty) => container.resolve(ty),
            None => container.resolve(&declared.ty),
        };
        match &self.value {
            None => ValueProvider::Resolve {
                ty: container.resolve(&declared.ty),
                name: None,
            },
            Some(ValueElement::Dependency { name, ty }) => ValueProvider::Resolve {
                ty: provided_type(ty),
                name: name.clone(),
            },
            Some(ValueElement::Value { value, ty }) => ValueProvider::Literal {
                ty: provided_type(ty),
                value: value.clone(),
            },
            Some(ValueElement::Optional { name, ty }) => ValueProvider::Optional {
                ty: provided_type(ty),
                name: name.clone(),
            },
        }
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::TypeResolver;
    use crate::registry::TypeRegistry;

    fn container() -> Container {
        Container::new(TypeRegistry::new())
    }

    #[test]
    fn test_name_must_match() {
        let declared = ParamDescriptor::new("logger", "ILogger");
        assert!(ParameterElement::new("logger").is_compatible(&declared));
        assert!(!ParameterElement::new("log").is_compatible(&declared));
    }

    #[test]
    fn test_explicit_type_must_match() {
        let declared = ParamDescriptor::new("count", "System.Int32");
        let exact = ParameterElement::new("count").with_type("System.Int32");
        let other = ParameterElement::new("count").with_type("System.Int64");

        assert!(exact.is_compatible(&declared));
        assert!(!other.is_compatible(&declared));
    }

    #[test]
    fn test_default_provider_resolves_declared_type() {
        let declared = ParamDescriptor::new("logger", "ILogger");
        let provider = ParameterElement::new("logger").build_provider(&container(), &declared);

        assert_eq!(
            provider,
            ValueProvider::Resolve {
                ty: TypeName::new("ILogger"),
                name: None,
            }
        );
    }

    #[test]
    fn test_dependency_overrides() {
        let declared = ParamDescriptor::new("logger", "ILogger");
        let param = ParameterElement::new("logger").with_value(ValueElement::Dependency {
            name: Some("audit".to_string()),
            ty: Some(TypeName::new("FileLogger")),
        });

        assert_eq!(
            param.build_provider(&container(), &declared),
            ValueProvider::Resolve {
                ty: TypeName::new("FileLogger"),
                name: Some("audit".to_string()),
            }
        );
    }

    #[test]
    fn test_literal_uses_declared_type() {
        let declared = ParamDescriptor::new("size", "System.Int32");
        let param = ParameterElement::new("size").with_value(ValueElement::Value {
            value: "3".to_string(),
            ty: None,
        });

        assert_eq!(
            param.build_provider(&container(), &declared),
            ValueProvider::Literal {
                ty: TypeName::new("System.Int32"),
                value: "3".to_string(),
            }
        );
    }

    #[test]
    fn test_literal_type_overrides_declared_type() {
        let declared = ParamDescriptor::new("size", "System.Object");
        let param = ParameterElement::new("size").with_value(ValueElement::Value {
            value: "3".to_string(),
            ty: Some(TypeName::new("System.Int64")),
        });

        assert_eq!(
            param.build_provider(&container(), &declared),
            ValueProvider::Literal {
                ty: TypeName::new("System.Int64"),
                value: "3".to_string(),
            }
        );
    }

    #[test]
    fn test_provider_types_resolve_through_container_aliases() {
        let mut types = TypeResolver::new();
        types.add_alias("long", "System.Int64");
        let container = Container::with_aliases(TypeRegistry::new(), types).unwrap();

        let declared = ParamDescriptor::new("size", "long");
        assert_eq!(
            ParameterElement::new("size").build_provider(&container, &declared),
            ValueProvider::Resolve {
                ty: TypeName::new("System.Int64"),
                name: None,
            }
        );

        let literal = ParameterElement::new("size").with_value(ValueElement::Value {
            value: "3".to_string(),
            ty: Some(TypeName::new("long")),
        });
        assert_eq!(
            literal.build_provider(&container, &ParamDescriptor::new("size", "System.Object")),
            ValueProvider::Literal {
                ty: TypeName::new("System.Int64"),
                value: "3".to_string(),
            }
        );
    }

    #[test]
    fn test_optional_provider() {
        let declared = ParamDescriptor::new("cache", "ICache");
        let param = ParameterElement::new("cache").with_value(ValueElement::Optional {
            name: None,
            ty: None,
        });

        assert_eq!(
            param.build_provider(&container(), &declared),
            ValueProvider::Optional {
                ty: TypeName::new("ICache"),
                name: None,
            }
        );
    }
}
