//! Application entry point
//!
//! Parses the command line, loads configuration, connects to the database
//! and either serves HTTP or runs a migration command.
//!
//! # Example
//!
//! ```rust,ignore
//! use web::Application;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), web::FrameworkError> {
//!     Application::new()
//!         .migrations::<migrations::Migrator>()
//!         .run(bootstrap::boot)
//!         .await
//! }
//! ```

use crate::config::Config;
use crate::database::{self, DbConnection};
use crate::error::FrameworkError;
use crate::logging;
use crate::routing::Router;
use crate::server::Server;
use clap::{Parser, Subcommand};
use sea_orm_migration::{MigrationTrait, MigratorTrait};
use std::future::Future;
use std::marker::PhantomData;
use std::path::PathBuf;

/// CLI structure for the application binary
#[derive(Parser)]
#[command(name = "app")]
#[command(about = "Application server and utilities")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Run the web server (default command)
    Serve {
        /// Skip running migrations on startup
        #[arg(long)]
        no_migrate: bool,
    },
    /// Run pending database migrations
    Migrate,
    /// Show migration status
    #[command(name = "migrate:status")]
    MigrateStatus,
    /// Rollback the last migration(s)
    #[command(name = "migrate:rollback")]
    MigrateRollback {
        /// Number of migrations to rollback
        #[arg(default_value = "1")]
        steps: u32,
    },
    /// Drop all tables and re-run all migrations
    #[command(name = "migrate:fresh")]
    MigrateFresh,
}

/// Everything the application needs to build its router and state
pub struct Context {
    pub config: Config,
    pub connection: DbConnection,
}

/// Placeholder type for when no migrator is configured
pub struct NoMigrator;

impl MigratorTrait for NoMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![]
    }
}

/// Application builder
pub struct Application<M = NoMigrator>
where
    M: MigratorTrait,
{
    root: PathBuf,
    log_directives: String,
    _migrator: PhantomData<M>,
}

impl Application<NoMigrator> {
    /// Create a new application builder
    pub fn new() -> Self {
        Application {
            root: PathBuf::from("."),
            log_directives: "info".to_string(),
            _migrator: PhantomData,
        }
    }
}

impl Default for Application<NoMigrator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Application<M>
where
    M: MigratorTrait,
{
    /// Configure the migrator type for database migrations
    pub fn migrations<NewM>(self) -> Application<NewM>
    where
        NewM: MigratorTrait,
    {
        Application {
            root: self.root,
            log_directives: self.log_directives,
            _migrator: PhantomData,
        }
    }

    /// Log filter used when `RUST_LOG` is not set
    pub fn log_directives(mut self, directives: impl Into<String>) -> Self {
        self.log_directives = directives.into();
        self
    }

    /// Run the application
    ///
    /// This parses CLI arguments and executes the appropriate command:
    /// - `serve` (default): migrate, then run the web server
    /// - `migrate`: Run pending migrations
    /// - `migrate:status`: Show migration status
    /// - `migrate:rollback`: Rollback migrations
    /// - `migrate:fresh`: Drop and re-run all migrations
    ///
    /// `boot` receives the loaded configuration and database connection and
    /// returns the router together with the state handed to every handler.
    pub async fn run<S, F, Fut>(self, boot: F) -> Result<(), FrameworkError>
    where
        S: Clone + Send + Sync + 'static,
        F: FnOnce(Context) -> Fut,
        Fut: Future<Output = Result<(Router<S>, S), FrameworkError>>,
    {
        let cli = Cli::parse();

        // `.env` may carry RUST_LOG, so the subscriber starts after it is read
        let config = Config::load(&self.root)?;
        logging::init(&self.log_directives);
        tracing::info!(environment = %config.environment(), "configuration loaded");

        let connection = DbConnection::connect(&config.database).await?;

        match cli.command.unwrap_or(Commands::Serve { no_migrate: false }) {
            Commands::Serve { no_migrate } => {
                if !no_migrate {
                    // A failed auto-migration should not keep the server down
                    if let Err(e) = database::migrate::<M>(&connection).await {
                        tracing::warn!(error = %e, "migration failed");
                    }
                }

                let server_config = config.server.clone();
                let (router, state) = boot(Context { config, connection }).await?;
                Server::from_config(router, state, &server_config).run().await
            }
            Commands::Migrate => {
                tracing::info!("running migrations");
                database::migrate::<M>(&connection).await?;
                tracing::info!("migrations completed");
                Ok(())
            }
            Commands::MigrateStatus => database::status::<M>(&connection).await,
            Commands::MigrateRollback { steps } => {
                tracing::info!(steps, "rolling back migrations");
                database::rollback::<M>(&connection, steps).await?;
                tracing::info!("rollback completed");
                Ok(())
            }
            Commands::MigrateFresh => {
                tracing::warn!("dropping all tables and re-running migrations");
                database::fresh::<M>(&connection).await?;
                tracing::info!("database refreshed");
                Ok(())
            }
        }
    }
}
