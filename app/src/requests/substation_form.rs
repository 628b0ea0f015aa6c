//! The create/edit form

use serde::Deserialize;
use validator::Validate;
use web::http::input::{blank_as_none, trimmed};
use web::{FormRequest, ValidationErrors};

use crate::models::substations::{Model, SubstationInput};
use crate::validation;

/// Submitted breaker record
///
/// Strings arrive trimmed and blank optional fields become `None`, so a
/// whitespace-only required field fails the same way a missing one does.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SubstationForm {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "Substation name is required."))]
    pub substation_name: String,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub full_name: Option<String>,

    #[serde(default, rename = "p_number", deserialize_with = "blank_as_none")]
    pub project_number: Option<String>,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "Breaker name is required."))]
    pub breaker_name: String,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "Feeding station details are required."))]
    pub feeding_station_details: String,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "Bay name is required."))]
    pub bay_name: String,
}

impl SubstationForm {
    /// Prefill from a stored record
    pub fn from_record(record: &Model) -> Self {
        Self {
            substation_name: record.substation_name.clone(),
            full_name: record.full_name.clone(),
            project_number: record.project_number.clone(),
            breaker_name: record.breaker_name.clone(),
            feeding_station_details: record.feeding_station_details.clone(),
            bay_name: record.bay_name.clone(),
        }
    }

    pub fn into_input(self) -> SubstationInput {
        SubstationInput {
            substation_name: self.substation_name,
            full_name: self.full_name,
            project_number: self.project_number,
            breaker_name: self.breaker_name,
            feeding_station_details: self.feeding_station_details,
            bay_name: self.bay_name,
        }
    }
}

impl FormRequest for SubstationForm {
    fn field_order() -> &'static [&'static str] {
        validation::FIELD_ORDER
    }

    fn after_validation(&self, errors: &mut ValidationErrors) {
        errors.merge(validation::validate_lengths(self));
    }
}
