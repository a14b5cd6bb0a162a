//! XML reader.

use roxmltree::{Document, Node};

use crate::container::TypeResolver;
use crate::error::{ConfigError, ConfigResult};
use crate::key::KeySequencer;
use crate::member::{ConstructorSpec, MemberSpec, MethodSpec};
use crate::param::{ParameterElement, ValueElement};
use crate::registration::{ContainerConfig, RegistrationSpec};
use crate::session::LoadSession;

use super::names::*;

/// Parses a `<container>` document.
///
/// `<alias>` entries apply to the whole document regardless of where they
/// appear, layered over the session's base aliases. Type names are stored
/// resolved.
pub fn parse_config(session: &LoadSession, text: &str) -> ConfigResult<ContainerConfig> {
    let doc = Document::parse(text)?;
    let root = doc.root_element();
    let mut reader = Reader::new(&doc, session);

    if root.tag_name().name() != CONTAINER {
        return Err(reader.unexpected(root, "document"));
    }

    let mut aliases = TypeResolver::new();
    for alias in elements(root).filter(|n| n.tag_name().name() == ALIAS) {
        let name = reader.required(alias, ALIAS)?;
        let ty = reader.required(alias, TYPE)?;
        aliases.add_alias(name, ty);
        reader.types.add_alias(name, ty);
    }

    let mut registrations = Vec::new();
    for child in elements(root) {
        match child.tag_name().name() {
            ALIAS => {}
            REGISTER => registrations.push(reader.registration(child)?),
            _ => return Err(reader.unexpected(child, CONTAINER)),
        }
    }

    Ok(ContainerConfig {
        aliases,
        registrations,
    })
}

/// Parses a document whose root is a single `<constructor>` or `<method>`.
pub fn parse_member(session: &LoadSession, text: &str) -> ConfigResult<MemberSpec> {
    let doc = Document::parse(text)?;
    let reader = Reader::new(&doc, session);
    reader.member(doc.root_element(), "document")
}

fn elements<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|n| n.is_element())
}

struct Reader<'a, 'input> {
    doc: &'a Document<'input>,
    keys: &'a KeySequencer,
    types: TypeResolver,
}

impl<'a, 'input> Reader<'a, 'input> {
    fn new(doc: &'a Document<'input>, session: &'a LoadSession) -> Self {
        Self {
            doc,
            keys: session.keys(),
            types: session.types().clone(),
        }
    }

    fn position(&self, node: Node<'_, '_>) -> (u32, u32) {
        let pos = self.doc.text_pos_at(node.range().start);
        (pos.row, pos.col)
    }

    fn unexpected(&self, node: Node<'_, '_>, parent: &str) -> ConfigError {
        let (line, column) = self.position(node);
        ConfigError::UnexpectedElement {
            element: node.tag_name().name().to_string(),
            parent: parent.to_string(),
            line,
            column,
        }
    }

    fn required<'n>(&self, node: Node<'n, 'input>, attribute: &str) -> ConfigResult<&'n str> {
        node.attribute(attribute).ok_or_else(|| {
            let (line, column) = self.position(node);
            ConfigError::MissingAttribute {
                element: node.tag_name().name().to_string(),
                attribute: attribute.to_string(),
                line,
                column,
            }
        })
    }

    fn registration(&self, node: Node<'_, 'input>) -> ConfigResult<RegistrationSpec> {
        let mut registration = RegistrationSpec::new(self.types.resolve(self.required(node, TYPE)?));
        if let Some(map_to) = node.attribute(MAP_TO) {
            registration = registration.with_map_to(self.types.resolve(map_to));
        }
        if let Some(name) = node.attribute(NAME) {
            registration = registration.with_name(name);
        }

        for child in elements(node) {
            let member = self.member(child, REGISTER)?;
            registration.add_member(member)?;
        }
        Ok(registration)
    }

    fn member(&self, node: Node<'_, 'input>, parent: &str) -> ConfigResult<MemberSpec> {
        match node.tag_name().name() {
            CONSTRUCTOR => Ok(ConstructorSpec::new(self.parameters(node)?).into()),
            METHOD => {
                let name = self.required(node, NAME)?;
                Ok(MethodSpec::new(self.keys, name, self.parameters(node)?)?.into())
            }
            _ => Err(self.unexpected(node, parent)),
        }
    }

    fn parameters(&self, member: Node<'_, 'input>) -> ConfigResult<Vec<ParameterElement>> {
        let parent = member.tag_name().name();
        elements(member)
            .map(|child| match child.tag_name().name() {
                PARAM => self.parameter(child),
                _ => Err(self.unexpected(child, parent)),
            })
            .collect()
    }

    fn parameter(&self, node: Node<'_, 'input>) -> ConfigResult<ParameterElement> {
        let name = self.required(node, NAME)?;
        let mut param = ParameterElement::new(name);
        if let Some(ty) = node.attribute(TYPE) {
            param = param.with_type(self.types.resolve(ty));
        }

        let mut values = Vec::new();
        if let Some(value) = node.attribute(VALUE) {
            values.push(ValueElement::Value {
                value: value.to_string(),
                ty: None,
            });
        }
        let dependency_name = node.attribute(DEPENDENCY_NAME);
        let dependency_type = node.attribute(DEPENDENCY_TYPE);
        if dependency_name.is_some() || dependency_type.is_some() {
            values.push(ValueElement::Dependency {
                name: dependency_name.map(str::to_string),
                ty: dependency_type.map(|ty| self.types.resolve(ty)),
            });
        }
        for child in elements(node) {
            values.push(self.value(child)?);
        }

        if values.len() > 1 {
            let (line, column) = self.position(node);
            return Err(ConfigError::MultipleValues {
                parameter: name.to_string(),
                line,
                column,
            });
        }
        if let Some(value) = values.pop() {
            param = param.with_value(value);
        }
        Ok(param)
    }

    fn value(&self, node: Node<'_, 'input>) -> ConfigResult<ValueElement> {
        let name = node.attribute(NAME).map(str::to_string);
        let ty = node.attribute(TYPE).map(|ty| self.types.resolve(ty));
        match node.tag_name().name() {
            DEPENDENCY => Ok(ValueElement::Dependency { name, ty }),
            OPTIONAL => Ok(ValueElement::Optional { name, ty }),
            VALUE => Ok(ValueElement::Value {
                value: self.required(node, VALUE)?.to_string(),
                ty,
            }),
            _ => Err(self.unexpected(node, PARAM)),
        }
    }
}
