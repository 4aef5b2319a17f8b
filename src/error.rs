use thiserror::Error;

/// A label that does not belong to the enumeration it was parsed into.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown value `{0}`")]
pub struct UnknownLabel(pub String);

/// One offending form field, keyed by the field name the form uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every problem found in a submitted form. The form stays open and each message is
/// shown next to its field, so validation collects all of them instead of stopping early.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("invalid input for {}", .errors.iter().map(|e| e.field).collect::<Vec<_>>().join(", "))]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut error = Self::new();
        error.push(field, message);
        error
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// First message recorded for `field`, if any.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// `Ok(())` when nothing was recorded.
    pub fn finish(self) -> Result<(), ValidationError> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{0}` already exists")]
pub struct DuplicateError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Duplicate(#[from] DuplicateError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("the dashboard editor is already open")]
    AlreadyEditing,
    #[error("the dashboard editor is not open")]
    NotEditing,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
}
