//! SeaORM entities
//!
//! One module per table. Custom behavior lives next door in `models/`.

pub mod substations;
