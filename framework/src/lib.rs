pub mod app;
pub mod config;
pub mod database;
pub mod error;
pub mod http;
pub mod logging;
pub mod routing;
pub mod server;
pub mod testing;

pub use app::{Application, Context, NoMigrator};
pub use config::{AppConfig, Config, Environment, ServerConfig};
pub use database::{DatabaseConfig, DbConnection};
pub use error::{FrameworkError, ValidationErrors};
pub use http::{
    Flash, FlashKey, FlashLevel, FormRequest, HttpResponse, Redirect, Request, Response,
    Submission, FLASH_COOKIE,
};
pub use routing::Router;
pub use server::Server;

// Re-exported so apps depend on the exact versions the framework uses
pub use sea_orm;
pub use validator;
