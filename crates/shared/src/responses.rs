//! Uniform result envelope returned by every engine operation.

use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

// =============================================================================
// Error Codes
// =============================================================================

/// Error classification codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Referenced entity does not exist
    NotFound,
    /// Operation is illegal for the entity's current status
    InvalidState,
    /// Actor lacks the required party or ownership relationship
    Forbidden,
    /// Exclusivity violated (e.g. quest already claimed)
    Conflict,
    /// Request data failed field validation
    ValidationFailure,
    /// Storage or serialization failure
    InternalError,
    /// Unknown variant for forward compatibility
    #[serde(other)]
    Unknown,
}

/// A validation failure scoped to one input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

// =============================================================================
// Result Envelope
// =============================================================================

/// Outcome of an operation: success flag, optional payload, domain errors,
/// field errors and an optional human-readable message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppResult<T> {
    pub is_success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ErrorCode>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub validation_errors: Vec<FieldError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> AppResult<T> {
    /// Create a success response with data
    pub fn success(data: T) -> Self {
        Self {
            is_success: true,
            data: Some(data),
            error_code: None,
            errors: Vec::new(),
            validation_errors: Vec::new(),
            message: None,
        }
    }

    /// Attach a human-readable message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Create a failure with a single domain error
    pub fn failure(code: ErrorCode, error: impl Into<String>) -> Self {
        Self::failures(code, vec![error.into()])
    }

    /// Create a failure with several domain errors
    pub fn failures(code: ErrorCode, errors: Vec<String>) -> Self {
        Self {
            is_success: false,
            data: None,
            error_code: Some(code),
            errors,
            validation_errors: Vec::new(),
            message: None,
        }
    }

    /// Create a failure from field-level validation errors
    pub fn validation_failure(validation_errors: Vec<FieldError>) -> Self {
        Self {
            is_success: false,
            data: None,
            error_code: Some(ErrorCode::ValidationFailure),
            errors: Vec::new(),
            validation_errors,
            message: None,
        }
    }

    /// Check if this is a success response
    pub fn is_success(&self) -> bool {
        self.is_success
    }

    /// Check if this is an error response
    pub fn is_error(&self) -> bool {
        !self.is_success
    }

    /// Convert into a `Result`, keeping the whole envelope on failure.
    pub fn into_result(self) -> Result<Option<T>, Self> {
        if self.is_success {
            Ok(self.data)
        } else {
            Err(self)
        }
    }
}

impl<T> From<ValidationErrors> for AppResult<T> {
    fn from(errors: ValidationErrors) -> Self {
        Self::validation_failure(field_errors(&errors))
    }
}

/// Flatten `validator` errors into `FieldError`s sorted by field name.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                FieldError::new(field.clone(), message)
            })
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}
