//! FormRequest trait for validated request data
//!
//! Provides a Laravel-like FormRequest pattern: body parsing, declarative
//! validation with the `validator` crate, and an `after_validation` hook for
//! rules that do not fit an attribute.

use super::Request;
use crate::error::{FrameworkError, ValidationErrors};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Outcome of submitting a form
///
/// An invalid submission keeps the parsed input so the form can be shown
/// again with what the user typed.
#[derive(Debug)]
pub enum Submission<T> {
    Valid(T),
    Invalid { input: T, errors: ValidationErrors },
}

/// Trait for validated form/JSON request data
///
/// # Example
///
/// ```rust,ignore
/// use serde::Deserialize;
/// use validator::Validate;
/// use web::{FormRequest, Submission};
///
/// #[derive(Deserialize, Validate)]
/// pub struct RenameRequest {
///     #[validate(length(min = 1, message = "Name is required."))]
///     pub name: String,
/// }
///
/// impl FormRequest for RenameRequest {}
///
/// pub async fn rename(req: Request, state: AppState) -> Response {
///     match RenameRequest::submit(&req)? {
///         Submission::Valid(form) => { /* ... */ }
///         Submission::Invalid { input, errors } => { /* re-render */ }
///     }
/// }
/// ```
pub trait FormRequest: Sized + DeserializeOwned + Validate {
    /// Field names in display order, used to order the aggregate error list
    fn field_order() -> &'static [&'static str] {
        &[]
    }

    /// Extra checks run after the declarative rules
    fn after_validation(&self, _errors: &mut ValidationErrors) {}

    /// Run every rule and collect all failures
    fn validation_errors(&self) -> ValidationErrors {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => ValidationErrors::from_validator(errors, Self::field_order()),
        };
        self.after_validation(&mut errors);
        errors
    }

    /// Parse the request body (JSON or form based on Content-Type)
    fn parse(req: &Request) -> Result<Self, FrameworkError> {
        req.input()
    }

    /// Parse and validate, keeping the input on failure
    ///
    /// Returns `Err` only when the body cannot be decoded at all.
    fn submit(req: &Request) -> Result<Submission<Self>, FrameworkError> {
        let data = Self::parse(req)?;
        let errors = data.validation_errors();
        if errors.is_empty() {
            Ok(Submission::Valid(data))
        } else {
            Ok(Submission::Invalid {
                input: data,
                errors,
            })
        }
    }

    /// Parse and validate, turning failures into a 422 error
    fn extract(req: &Request) -> Result<Self, FrameworkError> {
        match Self::submit(req)? {
            Submission::Valid(data) => Ok(data),
            Submission::Invalid { errors, .. } => Err(FrameworkError::Validation(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Rename {
        #[serde(default)]
        #[validate(length(min = 1, message = "Name is required."))]
        name: String,
        #[serde(default)]
        code: String,
    }

    impl FormRequest for Rename {
        fn after_validation(&self, errors: &mut ValidationErrors) {
            if self.code.len() > 3 {
                errors.add("code", "Code is too long.");
            }
        }
    }

    #[test]
    fn test_submit_keeps_input_when_invalid() {
        let req = Request::builder()
            .post("/rename")
            .form(&[("code", "ABCD")])
            .build();

        match Rename::submit(&req).unwrap() {
            Submission::Invalid { input, errors } => {
                assert_eq!(input.code, "ABCD");
                assert_eq!(
                    errors.messages(),
                    ["Name is required.".to_string(), "Code is too long.".to_string()]
                );
            }
            Submission::Valid(_) => panic!("expected invalid submission"),
        }
    }

    #[test]
    fn test_extract_valid_and_invalid() {
        let ok = Request::builder()
            .post("/rename")
            .form(&[("name", "North"), ("code", "N1")])
            .build();
        assert_eq!(Rename::extract(&ok).unwrap().name, "North");

        let bad = Request::builder().post("/rename").form(&[("name", "")]).build();
        assert_eq!(Rename::extract(&bad).unwrap_err().status_code(), 422);
    }

    #[test]
    fn test_malformed_json_is_bad_request() {
        let req = Request::builder()
            .post("/rename")
            .header("content-type", "application/json")
            .body("{")
            .build();

        assert_eq!(Rename::submit(&req).unwrap_err().status_code(), 400);
    }
}
