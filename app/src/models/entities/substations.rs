//! SeaORM entity for the `substations` table

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "substations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub substation_name: String,
    #[sea_orm(nullable)]
    pub full_name: Option<String>,
    #[sea_orm(column_name = "p_number", nullable)]
    pub project_number: Option<String>,
    #[sea_orm(unique)]
    pub breaker_name: String,
    pub feeding_station_details: String,
    pub bay_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}
