//! Substations model
//!
//! Custom behavior for the breaker records. The base entity lives in
//! src/models/entities/substations.rs.

// Re-export the entity
pub use super::entities::substations::*;

use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, ConnectionTrait, QueryFilter, Set};

impl ActiveModelBehavior for ActiveModel {}

/// A breaker record without its id
///
/// This is what gets written: handlers build one from the submitted form and
/// hand the whole value to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstationInput {
    pub substation_name: String,
    pub full_name: Option<String>,
    pub project_number: Option<String>,
    pub breaker_name: String,
    pub feeding_station_details: String,
    pub bay_name: String,
}

// ============================================================================
// READ OPERATIONS
// ============================================================================

impl Model {
    /// Find the record using `breaker_name`, ignoring the record `exclude`
    pub async fn find_by_breaker_name<C: ConnectionTrait>(
        db: &C,
        breaker_name: &str,
        exclude: Option<i32>,
    ) -> Result<Option<Self>, DbErr> {
        let mut query = Entity::find().filter(Column::BreakerName.eq(breaker_name));
        if let Some(id) = exclude {
            query = query.filter(Column::Id.ne(id));
        }
        query.one(db).await
    }

    /// The record's fields without its id
    pub fn to_input(&self) -> SubstationInput {
        SubstationInput {
            substation_name: self.substation_name.clone(),
            full_name: self.full_name.clone(),
            project_number: self.project_number.clone(),
            breaker_name: self.breaker_name.clone(),
            feeding_station_details: self.feeding_station_details.clone(),
            bay_name: self.bay_name.clone(),
        }
    }
}

// ============================================================================
// WRITE OPERATIONS
// ============================================================================

impl ActiveModel {
    /// New row; the id is left for the database to assign
    pub fn from_input(input: SubstationInput) -> Self {
        let mut model = <Self as ActiveModelTrait>::default();
        model.apply(input);
        model
    }

    /// Overwrite every data column with `input`
    pub fn apply(&mut self, input: SubstationInput) {
        self.substation_name = Set(input.substation_name);
        self.full_name = Set(input.full_name);
        self.project_number = Set(input.project_number);
        self.breaker_name = Set(input.breaker_name);
        self.feeding_station_details = Set(input.feeding_station_details);
        self.bay_name = Set(input.bay_name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sea_orm::ActiveValue;

    #[test]
    fn test_from_input_leaves_id_unset() {
        let model = ActiveModel::from_input(SubstationInput {
            substation_name: "North Yard".into(),
            breaker_name: "B1".into(),
            ..Default::default()
        });

        assert_eq!(model.id, ActiveValue::NotSet);
        assert_eq!(model.breaker_name, Set("B1".to_string()));
        assert_eq!(model.full_name, Set(None));
    }

    #[test]
    fn test_to_input_drops_id() {
        let model = Model {
            id: 4,
            substation_name: "North Yard".into(),
            full_name: Some("North Yard 132kV".into()),
            project_number: None,
            breaker_name: "B4".into(),
            feeding_station_details: "Line 4".into(),
            bay_name: "Bay 4".into(),
        };

        let input = model.to_input();
        assert_eq!(input.full_name.as_deref(), Some("North Yard 132kV"));
        assert_eq!(input.breaker_name, "B4");
    }
}
