pub mod bootstrap;
pub mod config;
pub mod controllers;
pub mod migrations;
pub mod models;
pub mod query;
pub mod requests;
pub mod routes;
pub mod store;
pub mod validation;
pub mod views;

pub use bootstrap::AppState;
