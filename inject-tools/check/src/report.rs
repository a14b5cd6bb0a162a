//! Check reports.

use std::fmt::Write as _;

use inject_config::{Directive, RegistrationOutcome, TypeName};
use serde::Serialize;

/// What applying one registration produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationReport {
    /// The registration as written, e.g. `IWidget -> Widget (primary)`.
    pub registration: String,
    /// The type whose members were resolved.
    pub target: TypeName,
    pub directives: Vec<Directive>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<RegistrationOutcome<'_>> for RegistrationReport {
    fn from(outcome: RegistrationOutcome<'_>) -> Self {
        let (directives, error) = match outcome.result {
            Ok(directives) => (directives, None),
            Err(err) => (Vec::new(), Some(err.to_string())),
        };
        Self {
            registration: outcome.registration.to_string(),
            target: outcome.registration.target().clone(),
            directives,
            error,
        }
    }
}

/// The result of checking one configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub registrations: Vec<RegistrationReport>,
}

impl Report {
    /// Number of registrations that could not be applied.
    pub fn failures(&self) -> usize {
        self.registrations.iter().filter(|r| r.error.is_some()).count()
    }

    pub fn is_success(&self) -> bool {
        self.failures() == 0
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for registration in &self.registrations {
            match &registration.error {
                None => {
                    let _ = writeln!(out, "ok   {}", registration.registration);
                    for directive in &registration.directives {
                        let _ = writeln!(out, "       {}", directive);
                    }
                }
                Some(error) => {
                    let _ = writeln!(out, "FAIL {}: {}", registration.registration, error);
                }
            }
        }
        let _ = writeln!(
            out,
            "{} registration(s), {} failed",
            self.registrations.len(),
            self.failures()
        );
        out
    }

    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inject_config::ValueProvider;
    use pretty_assertions::assert_eq;

    fn report() -> Report {
        Report {
            registrations: vec![
                RegistrationReport {
                    registration: "IWidget -> Widget".to_string(),
                    target: TypeName::new("Widget"),
                    directives: vec![
                        Directive::Construct {
                            providers: vec![ValueProvider::Resolve {
                                ty: TypeName::new("ILogger"),
                                name: None,
                            }],
                        },
                        Directive::Invoke {
                            name: "Init".to_string(),
                            providers: vec![],
                        },
                    ],
                    error: None,
                },
                RegistrationReport {
                    registration: "Gadget".to_string(),
                    target: TypeName::new("Gadget"),
                    directives: vec![],
                    error: Some("no type descriptor registered for `Gadget`".to_string()),
                },
            ],
        }
    }

    #[test]
    fn test_render_text() {
        assert_eq!(
            report().render_text(),
            "ok   IWidget -> Widget\n\
             \x20      construct(resolve ILogger)\n\
             \x20      invoke Init()\n\
             FAIL Gadget: no type descriptor registered for `Gadget`\n\
             2 registration(s), 1 failed\n"
        );
    }

    #[test]
    fn test_render_json_omits_missing_error() {
        let json: serde_json::Value =
            serde_json::from_str(&report().render_json().unwrap()).unwrap();

        assert!(json["registrations"][0].get("error").is_none());
        assert_eq!(json["registrations"][0]["directives"][1]["kind"], "invoke");
        assert_eq!(json["registrations"][1]["target"], "Gadget");
    }
}
