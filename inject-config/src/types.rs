//! Type descriptors.
//!
//! A [`TypeDescriptor`] describes the constructors and methods a type exposes
//! to the container, as plain data. Descriptors are built ahead of time (in
//! code or from a registry file) and are never mutated while members are
//! being resolved against them.
//!
//! The order members are listed in is significant: it is the enumeration
//! order the resolver walks, and the resolver takes the first member that
//! fits.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The identity of a type, e.g. `MyApp.Services.Widget`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    /// Creates a type name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the last dot-separated segment.
    pub fn short(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeName({})", self.0)
    }
}

impl From<&str> for TypeName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TypeName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Which kind of member a descriptor or spec refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Constructor,
    Method,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberKind::Constructor => f.write_str("constructor"),
            MemberKind::Method => f.write_str("method"),
        }
    }
}

/// One declared parameter of a constructor or method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDescriptor {
    /// The parameter's declared name.
    pub name: String,
    /// The parameter's declared type.
    #[serde(rename = "type")]
    pub ty: TypeName,
}

impl ParamDescriptor {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// A constructor or method declared on a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDescriptor {
    /// Constructor or method.
    pub kind: MemberKind,
    /// The method name. Always `None` for constructors.
    pub name: Option<String>,
    /// Declared parameters, in positional order.
    pub params: Vec<ParamDescriptor>,
}

impl MemberDescriptor {
    /// Describes a constructor.
    pub fn constructor(params: Vec<ParamDescriptor>) -> Self {
        Self {
            kind: MemberKind::Constructor,
            name: None,
            params,
        }
    }

    /// Describes a method.
    pub fn method(name: impl Into<String>, params: Vec<ParamDescriptor>) -> Self {
        Self {
            kind: MemberKind::Method,
            name: Some(name.into()),
            params,
        }
    }

    fn map_types(mut self, f: &impl Fn(&TypeName) -> TypeName) -> Self {
        for param in &mut self.params {
            param.ty = f(&param.ty);
        }
        self
    }

    /// Number of declared parameters.
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Declared parameter types, in order.
    pub fn param_types(&self) -> impl Iterator<Item = &TypeName> {
        self.params.iter().map(|p| &p.ty)
    }

    /// A readable signature such as `Init(System.Int32 count)`.
    pub fn signature(&self) -> String {
        let params = self
            .params
            .iter()
            .map(|p| format!("{} {}", p.ty, p.name))
            .collect::<Vec<_>>()
            .join(", ");
        match &self.name {
            Some(name) => format!("{}({})", name, params),
            None => format!(".ctor({})", params),
        }
    }
}

/// The injectable surface of one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    name: TypeName,
    constructors: Vec<MemberDescriptor>,
    methods: Vec<MemberDescriptor>,
}

impl TypeDescriptor {
    /// Creates a descriptor with no members.
    pub fn new(name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            constructors: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Appends a constructor after the ones already declared.
    pub fn with_constructor(mut self, params: Vec<ParamDescriptor>) -> Self {
        self.constructors.push(MemberDescriptor::constructor(params));
        self
    }

    /// Appends a method after the ones already declared.
    pub fn with_method(mut self, name: impl Into<String>, params: Vec<ParamDescriptor>) -> Self {
        self.methods.push(MemberDescriptor::method(name, params));
        self
    }

    pub fn name(&self) -> &TypeName {
        &self.name
    }

    /// Rewrites the type's own name and every parameter type through `f`.
    pub fn map_types(self, f: impl Fn(&TypeName) -> TypeName) -> Self {
        Self {
            name: f(&self.name),
            constructors: self
                .constructors
                .into_iter()
                .map(|member| member.map_types(&f))
                .collect(),
            methods: self
                .methods
                .into_iter()
                .map(|member| member.map_types(&f))
                .collect(),
        }
    }

    /// Constructors in declaration order.
    pub fn constructors(&self) -> &[MemberDescriptor] {
        &self.constructors
    }

    /// Methods in declaration order.
    pub fn methods(&self) -> &[MemberDescriptor] {
        &self.methods
    }
}
