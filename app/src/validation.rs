//! Checks run before any write
//!
//! Required fields and length limits are checked on the form alone. The
//! breaker-name uniqueness check needs the database and must run on the
//! connection of the write transaction that follows it.

use sea_orm::ConnectionTrait;
use validator::Validate;
use web::ValidationErrors;

use crate::models::substations::Model;
use crate::requests::SubstationForm;
use crate::store::StoreError;

/// Form fields in display order
pub const FIELD_ORDER: &[&str] = &[
    "substation_name",
    "full_name",
    "p_number",
    "breaker_name",
    "feeding_station_details",
    "bay_name",
];

pub const BREAKER_TAKEN: &str = "Breaker Name already exists! Please use a different one.";

/// Every missing required field, one error each
pub fn validate_required(form: &SubstationForm) -> ValidationErrors {
    match form.validate() {
        Ok(()) => ValidationErrors::new(),
        Err(errors) => ValidationErrors::from_validator(errors, FIELD_ORDER),
    }
}

/// Column width limits
pub fn validate_lengths(form: &SubstationForm) -> ValidationErrors {
    let checks: [(&str, &str, Option<&str>, usize); 6] = [
        (
            "substation_name",
            "Substation name",
            Some(form.substation_name.as_str()),
            100,
        ),
        ("full_name", "Full name", form.full_name.as_deref(), 100),
        ("p_number", "Project number", form.project_number.as_deref(), 50),
        ("breaker_name", "Breaker name", Some(form.breaker_name.as_str()), 50),
        (
            "feeding_station_details",
            "Feeding station details",
            Some(form.feeding_station_details.as_str()),
            150,
        ),
        ("bay_name", "Bay name", Some(form.bay_name.as_str()), 50),
    ];

    let mut errors = ValidationErrors::new();
    for (field, label, value, max) in checks {
        if value.map_or(0, |v| v.chars().count()) > max {
            errors.add(field, format!("{} must be at most {} characters.", label, max));
        }
    }
    errors
}

/// Reject `breaker_name` when a record other than `exclude` already uses it
pub async fn validate_unique_breaker<C: ConnectionTrait>(
    db: &C,
    breaker_name: &str,
    exclude: Option<i32>,
) -> Result<ValidationErrors, StoreError> {
    let mut errors = ValidationErrors::new();
    if let Some(existing) = Model::find_by_breaker_name(db, breaker_name, exclude).await? {
        tracing::debug!(existing = existing.id, breaker_name, "breaker name taken");
        errors.add("breaker_name", BREAKER_TAKEN);
    }
    Ok(errors)
}
