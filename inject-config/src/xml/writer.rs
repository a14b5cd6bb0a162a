//! XML writer.

use crate::member::MemberSpec;
use crate::param::{ParameterElement, ValueElement};
use crate::registration::{ContainerConfig, RegistrationSpec};

use super::names::*;

const INDENT: &str = "  ";

impl MemberSpec {
    /// Serializes this member as a `<constructor>` or `<method>` element.
    pub fn to_xml(&self) -> String {
        let mut out = XmlWriter::default();
        out.member(self);
        out.finish()
    }
}

impl ContainerConfig {
    /// Serializes the whole configuration as a `<container>` document.
    pub fn to_xml(&self) -> String {
        let mut out = XmlWriter::default();
        if self.aliases.is_empty() && self.registrations.is_empty() {
            out.empty(CONTAINER, &[]);
            return out.finish();
        }

        out.open(CONTAINER, &[]);
        for (alias, ty) in self.aliases.aliases() {
            out.empty(ALIAS, &[(ALIAS, Some(alias)), (TYPE, Some(ty.as_str()))]);
        }
        for registration in &self.registrations {
            out.registration(registration);
        }
        out.close(CONTAINER);
        out.finish()
    }
}

#[derive(Default)]
struct XmlWriter {
    out: String,
    depth: usize,
}

type Attrs<'a> = [(&'a str, Option<&'a str>)];

impl XmlWriter {
    fn finish(self) -> String {
        self.out
    }

    fn start(&mut self, tag: &str, attrs: &Attrs<'_>) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push('<');
        self.out.push_str(tag);
        for (name, value) in attrs {
            if let Some(value) = value {
                self.out.push(' ');
                self.out.push_str(name);
                self.out.push_str("=\"");
                escape_into(&mut self.out, value);
                self.out.push('"');
            }
        }
    }

    fn empty(&mut self, tag: &str, attrs: &Attrs<'_>) {
        self.start(tag, attrs);
        self.out.push_str("/>\n");
    }

    fn open(&mut self, tag: &str, attrs: &Attrs<'_>) {
        self.start(tag, attrs);
        self.out.push_str(">\n");
        self.depth += 1;
    }

    fn close(&mut self, tag: &str) {
        self.depth -= 1;
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push_str(">\n");
    }

    fn registration(&mut self, registration: &RegistrationSpec) {
        let attrs = [
            (TYPE, Some(registration.ty.as_str())),
            (MAP_TO, registration.map_to.as_ref().map(|t| t.as_str())),
            (NAME, registration.name.as_deref()),
        ];
        if registration.members().is_empty() {
            self.empty(REGISTER, &attrs);
            return;
        }
        self.open(REGISTER, &attrs);
        for member in registration.members().iter() {
            self.member(member);
        }
        self.close(REGISTER);
    }

    fn member(&mut self, member: &MemberSpec) {
        let tag = match member {
            MemberSpec::Constructor(_) => CONSTRUCTOR,
            MemberSpec::Method(_) => METHOD,
        };
        let attrs = [(NAME, member.name())];
        if member.parameters().is_empty() {
            self.empty(tag, &attrs);
            return;
        }
        self.open(tag, &attrs);
        for param in member.parameters() {
            self.parameter(param);
        }
        self.close(tag);
    }

    fn parameter(&mut self, param: &ParameterElement) {
        let attrs = [
            (NAME, Some(param.name.as_str())),
            (TYPE, param.ty.as_ref().map(|t| t.as_str())),
        ];
        let Some(value) = &param.value else {
            self.empty(PARAM, &attrs);
            return;
        };

        self.open(PARAM, &attrs);
        match value {
            ValueElement::Dependency { name, ty } => self.empty(
                DEPENDENCY,
                &[(NAME, name.as_deref()), (TYPE, ty.as_ref().map(|t| t.as_str()))],
            ),
            ValueElement::Optional { name, ty } => self.empty(
                OPTIONAL,
                &[(NAME, name.as_deref()), (TYPE, ty.as_ref().map(|t| t.as_str()))],
            ),
            ValueElement::Value { value, ty } => self.empty(
                VALUE,
                &[(VALUE, Some(value.as_str())), (TYPE, ty.as_ref().map(|t| t.as_str()))],
            ),
        }
        self.close(PARAM);
    }
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            // attribute value normalization would turn these into spaces
            '\n' => out.push_str("&#10;"),
            '\t' => out.push_str("&#9;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(c),
        }
    }
}
