pub mod entities;
pub mod substations;
