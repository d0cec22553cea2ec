use std::fmt;
use std::fmt::{Display, Formatter};

use serde_yaml::Value;
use thiserror::Error;

/// One offending front-matter field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidationError {
    pub field: String,
    pub expected: String,
    pub received: String,
}

impl FieldValidationError {
    pub fn new(field: impl Into<String>, expected: impl Into<String>, received: impl Into<String>) -> Self {
        FieldValidationError {
            field: field.into(),
            expected: expected.into(),
            received: received.into(),
        }
    }
}

impl Display for FieldValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: expected {}, received {}", self.field, self.expected, self.received)
    }
}

/// Every field error found in a single document, in field declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrorList {
    errors: Vec<FieldValidationError>,
}

impl ValidationErrorList {
    pub(crate) fn new(errors: Vec<FieldValidationError>) -> Self {
        ValidationErrorList { errors }
    }

    pub fn errors(&self) -> &[FieldValidationError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn find(&self, field: &str) -> Option<&FieldValidationError> {
        self.errors.iter().find(|e| e.field == field)
    }
}

impl Display for ValidationErrorList {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrorList {}

impl IntoIterator for ValidationErrorList {
    type Item = FieldValidationError;
    type IntoIter = std::vec::IntoIter<FieldValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("front-matter must be a mapping, received {received}")]
    NotAMapping { received: String },
    #[error("{0}")]
    Fields(#[from] ValidationErrorList),
}

impl SchemaError {
    pub fn field_errors(&self) -> Option<&ValidationErrorList> {
        match self {
            SchemaError::Fields(list) => Some(list),
            SchemaError::NotAMapping { .. } => None,
        }
    }
}

/// Short, author-readable description of a YAML value for error messages.
pub fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) if s.is_empty() => "empty string".to_string(),
        Value::String(s) => format!("{:?}", s),
        Value::Sequence(seq) => format!("sequence of {} item(s)", seq.len()),
        Value::Mapping(_) => "mapping".to_string(),
        Value::Tagged(tagged) => format!("tagged value {}", tagged.tag),
    }
}
