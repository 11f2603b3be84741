use std::fmt;

use bindsmith_ty::TypeError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("cannot bind `{function}`: {source}")]
    MalformedDeclarator {
        function: String,
        #[source]
        source: TypeError,
    },

    #[error("{entity}: unresolved {what} `{reference}`")]
    UnresolvedReference {
        entity: String,
        reference: String,
        what: &'static str,
    },

    #[error("invalid binding directive on class {class}: {reason}")]
    MalformedDirective { class: String, reason: String },

    #[error("{class}: cannot read override file {path}: {reason}")]
    MissingBindingDirectiveFile {
        class: String,
        path: String,
        reason: String,
    },

    #[error("unknown namespace `{0}`")]
    UnknownNamespace(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A recovered problem, kept so callers can report it after the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Dotted id of the entity the problem was found on.
    pub entity: String,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(entity: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            entity: entity.into(),
            message: message.into(),
        }
    }

    pub fn error(entity: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            entity: entity.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.entity, self.message)
    }
}
