// src/domain/errors.rs
use std::fmt;

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("unique constraint violated: {0}")]
    UniqueViolation(UniqueViolation),
    #[error("could not allocate a unique slug after {attempts} attempts (last candidate `{candidate}`)")]
    SlugExhausted { candidate: String, attempts: u32 },
}

impl DomainError {
    /// Returns the violation when this error is a uniqueness rejection that
    /// names `field`.
    pub fn unique_violation_on(&self, field: &str) -> Option<&UniqueViolation> {
        match self {
            Self::UniqueViolation(violation) if violation.involves(field) => Some(violation),
            _ => None,
        }
    }
}

/// A write rejected by a unique index. `fields` lists every field the store
/// reported as duplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueViolation {
    fields: Vec<String>,
    message: String,
}

impl UniqueViolation {
    pub fn new(fields: Vec<String>, message: impl Into<String>) -> Self {
        Self {
            fields,
            message: message.into(),
        }
    }

    pub fn on_field(field: impl Into<String>) -> Self {
        let field = field.into();
        let message = format!("duplicate value for {field}");
        Self::new(vec![field], message)
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn involves(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }
}

impl fmt::Display for UniqueViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fields.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{} ({})", self.message, self.fields.join(", "))
        }
    }
}
