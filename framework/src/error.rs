//! Framework-wide error types
//!
//! Provides a unified error type that can be used throughout the framework
//! and automatically converts to appropriate HTTP responses.

use std::collections::BTreeMap;
use thiserror::Error;

/// Field-level validation errors
///
/// Keeps two views of the same failures: a map of field name to messages
/// (for rendering next to each input) and the aggregate list of messages in
/// the order they were reported (for a summary above the form).
///
/// # Example
///
/// ```rust
/// use substation_web::ValidationErrors;
///
/// let mut errors = ValidationErrors::new();
/// errors.add("bay_name", "Bay name is required.");
///
/// assert_eq!(errors.first("bay_name"), Some("Bay name is required."));
/// assert_eq!(errors.messages(), ["Bay name is required.".to_string()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
    messages: Vec<String>,
}

impl ValidationErrors {
    /// Create a new empty ValidationErrors
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an error for a specific field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let message = message.into();
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.clone());
        self.messages.push(message);
    }

    /// Check if there are any errors
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of reported messages across all fields
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the given field has at least one error
    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// All messages reported for a field
    pub fn field(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First message reported for a field
    pub fn first(&self, field: &str) -> Option<&str> {
        self.field(field).first().map(String::as_str)
    }

    /// Aggregate message list in report order
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Append every error from `other`
    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.fields {
            self.fields.entry(field).or_default().extend(messages);
        }
        self.messages.extend(other.messages);
    }

    /// Convert from validator crate's ValidationErrors
    ///
    /// `validator` reports failures in a hash map, so the aggregate order is
    /// reconstructed from `field_order`. Fields not listed there follow in
    /// name order.
    pub fn from_validator(errors: validator::ValidationErrors, field_order: &[&str]) -> Self {
        let rank = |name: &str| {
            field_order
                .iter()
                .position(|f| *f == name)
                .unwrap_or(field_order.len())
        };

        let mut by_field: Vec<(String, &Vec<validator::ValidationError>)> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| (field.to_string(), errs))
            .collect();
        by_field.sort_by(|(a, _), (b, _)| {
            rank(a.as_str())
                .cmp(&rank(b.as_str()))
                .then_with(|| a.cmp(b))
        });

        let mut result = Self::new();
        for (field, field_errors) in by_field {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Validation failed for field '{}'", field));
                result.add(field.clone(), message);
            }
        }
        result
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Validation failed: {}", self.messages.join(" "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Framework-wide error type
///
/// This enum represents all possible errors that can occur in the framework.
/// It converts into an [`HttpResponse`](crate::HttpResponse) so errors can be
/// propagated using the `?` operator in controller handlers.
///
/// # Example
///
/// ```rust,ignore
/// use web::{FrameworkError, Request, Response};
///
/// pub async fn show(req: Request, state: AppState) -> Response {
///     let id: i32 = req.param_as("id")?;  // 400 on a malformed id
///     // ...
/// }
/// ```
#[derive(Debug, Clone, Error)]
pub enum FrameworkError {
    /// Route parameter missing from the matched path
    #[error("Missing required parameter: {param_name}")]
    ParamError {
        /// The name of the parameter that failed extraction
        param_name: String,
    },

    /// Parameter parse error (400 Bad Request)
    ///
    /// Used when a path parameter cannot be parsed to the expected type.
    #[error("Invalid parameter '{param}': expected {expected_type}")]
    ParamParse {
        /// The parameter value that failed to parse
        param: String,
        /// The expected type (e.g., "i32")
        expected_type: &'static str,
    },

    /// Request body could not be decoded
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Request body exceeded the configured limit
    #[error("Request body exceeds the {limit} byte limit")]
    PayloadTooLarge {
        /// Configured maximum body size in bytes
        limit: usize,
    },

    /// Form validation errors (422 Unprocessable Entity)
    #[error("{0}")]
    Validation(ValidationErrors),

    /// Model not found (404 Not Found)
    #[error("{model_name} not found")]
    ModelNotFound {
        /// Human readable description of what was looked up
        model_name: String,
    },

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic internal server error
    #[error("Internal server error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl FrameworkError {
    /// Create a ParamError for a missing parameter
    pub fn param(name: impl Into<String>) -> Self {
        Self::ParamError {
            param_name: name.into(),
        }
    }

    /// Create a ParamParse error (400)
    pub fn param_parse(param: impl Into<String>, expected_type: &'static str) -> Self {
        Self::ParamParse {
            param: param.into(),
            expected_type,
        }
    }

    /// Create a BadRequest error (400)
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Create a ModelNotFound error (404)
    pub fn model_not_found(name: impl Into<String>) -> Self {
        Self::ModelNotFound {
            model_name: name.into(),
        }
    }

    /// Create a DatabaseError
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    /// Create a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::ParamError { .. } => 400,
            Self::ParamParse { .. } => 400,
            Self::BadRequest(_) => 400,
            Self::PayloadTooLarge { .. } => 413,
            Self::Validation(_) => 422,
            Self::ModelNotFound { .. } => 404,
            Self::Database(_) => 500,
            Self::Config(_) => 500,
            Self::Internal { .. } => 500,
        }
    }

    /// Whether the error is the server's fault rather than the client's
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}

// Implement From<DbErr> for automatic error conversion with ?
impl From<sea_orm::DbErr> for FrameworkError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::Database(e.to_string())
    }
}

impl From<ValidationErrors> for FrameworkError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use validator::Validate;

    #[derive(Validate)]
    struct Signup {
        #[validate(length(min = 1, message = "Name is required."))]
        name: String,
        #[validate(length(min = 1, message = "Bay is required."))]
        bay: String,
        #[validate(length(min = 1))]
        zone: String,
    }

    #[test]
    fn test_add_keeps_field_map_and_aggregate_list() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "first");
        errors.add("bay", "second");
        errors.add("name", "third");

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.field("name"), ["first".to_string(), "third".to_string()]);
        assert_eq!(errors.first("bay"), Some("second"));
        assert_eq!(errors.first("zone"), None);
        assert_eq!(
            errors.messages(),
            ["first".to_string(), "second".to_string(), "third".to_string()]
        );
    }

    #[test]
    fn test_from_validator_orders_by_field_order() {
        let signup = Signup {
            name: String::new(),
            bay: String::new(),
            zone: String::new(),
        };
        let errors = ValidationErrors::from_validator(
            signup.validate().unwrap_err(),
            &["bay", "name"],
        );

        assert_eq!(
            errors.messages(),
            [
                "Bay is required.".to_string(),
                "Name is required.".to_string(),
                "Validation failed for field 'zone'".to_string(),
            ]
        );
        assert!(errors.has("zone"));
    }

    #[test]
    fn test_merge_appends_in_order() {
        let mut left = ValidationErrors::new();
        left.add("a", "one");
        let mut right = ValidationErrors::new();
        right.add("a", "two");
        right.add("b", "three");

        left.merge(right);

        assert_eq!(left.field("a"), ["one".to_string(), "two".to_string()]);
        assert_eq!(left.len(), 3);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(FrameworkError::param("id").status_code(), 400);
        assert_eq!(FrameworkError::param_parse("x", "i32").status_code(), 400);
        assert_eq!(FrameworkError::model_not_found("Substation").status_code(), 404);
        assert_eq!(FrameworkError::PayloadTooLarge { limit: 1 }.status_code(), 413);
        assert_eq!(FrameworkError::Validation(ValidationErrors::new()).status_code(), 422);
        assert!(FrameworkError::database("down").is_server_error());
        assert!(!FrameworkError::bad_request("nope").is_server_error());
    }
}
