use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("malformed declarator `{text}`: {reason}")]
    MalformedDeclarator { text: String, reason: String },
}

impl TypeError {
    pub fn malformed(text: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedDeclarator {
            text: text.into(),
            reason: reason.into(),
        }
    }
}
