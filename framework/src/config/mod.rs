//! Configuration module
//!
//! Loads `.env` files with environment-based precedence and builds the typed
//! configuration structs the rest of the framework consumes. Nothing is
//! stored globally: [`Config::load`] returns the structs and the caller
//! passes them where they are needed.
//!
//! # Example
//!
//! ```rust,no_run
//! use substation_web::Config;
//!
//! let config = Config::load(std::path::Path::new(".")).unwrap();
//! println!("Server port: {}", config.server.port);
//! ```

pub mod env;
pub mod providers;

pub use env::{env, env_optional, load_dotenv, Environment};
pub use providers::{AppConfig, ServerConfig};

use crate::database::DatabaseConfig;
use crate::error::FrameworkError;
use std::path::Path;

/// Every framework-level config struct
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

impl Config {
    /// Load `.env` files from `project_root` and build every config struct
    pub fn load(project_root: &Path) -> Result<Self, FrameworkError> {
        load_dotenv(project_root);
        let config = Self::from_env();
        config.app.validate()?;
        Ok(config)
    }

    /// Build every config struct from the current process environment
    pub fn from_env() -> Self {
        Self {
            app: AppConfig::from_env(),
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
        }
    }

    /// Get the current environment
    pub fn environment(&self) -> &Environment {
        &self.app.environment
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.environment().is_production()
    }
}
