//! Database connection management

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::database::config::{DatabaseConfig, DatabaseType};
use crate::error::FrameworkError;

/// Wrapper around SeaORM's DatabaseConnection
///
/// This provides a clonable, thread-safe connection that is created once at
/// startup and handed to whatever needs it.
///
/// # Example
///
/// ```rust,ignore
/// let conn = DbConnection::connect(&config).await?;
///
/// // Use with SeaORM queries
/// let rows = substations::Entity::find().all(conn.inner()).await?;
/// ```
#[derive(Clone)]
pub struct DbConnection {
    inner: Arc<DatabaseConnection>,
}

impl DbConnection {
    /// Create a new database connection from config
    ///
    /// For SQLite file databases the file and its parent directories are
    /// created if they don't exist.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, FrameworkError> {
        let url = match config.database_type() {
            Some(DatabaseType::Sqlite) => prepare_sqlite_url(&config.url)?,
            Some(DatabaseType::Postgres) => config.url.clone(),
            None => {
                return Err(FrameworkError::config(format!(
                    "Unsupported DATABASE_URL scheme: {}",
                    config.url
                )))
            }
        };

        let mut opt = ConnectOptions::new(&url);
        opt.max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .sqlx_logging(config.logging);

        let conn = Database::connect(opt)
            .await
            .map_err(|e| FrameworkError::database(e.to_string()))?;

        tracing::info!(backend = ?config.database_type(), "database connected");

        Ok(Self {
            inner: Arc::new(conn),
        })
    }

    /// Get a reference to the underlying SeaORM connection
    pub fn inner(&self) -> &DatabaseConnection {
        &self.inner
    }
}

/// Turn `sqlite://path` into the `sqlite:path?mode=rwc` form and make sure
/// the file can be created. Other SQLite URLs (e.g. `sqlite::memory:`) pass
/// through untouched.
fn prepare_sqlite_url(url: &str) -> Result<String, FrameworkError> {
    let Some(path) = url.strip_prefix("sqlite://") else {
        return Ok(url.to_string());
    };
    let path = path.trim_start_matches("./");

    if path.starts_with(":memory:") {
        return Ok(format!("sqlite:{}", path));
    }

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                FrameworkError::database(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(format!("sqlite:{}?mode=rwc", path))
}

impl AsRef<DatabaseConnection> for DbConnection {
    fn as_ref(&self) -> &DatabaseConnection {
        &self.inner
    }
}

impl std::ops::Deref for DbConnection {
    type Target = DatabaseConnection;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
