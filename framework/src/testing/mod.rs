//! Testing utilities
//!
//! `TestDatabase` gives every test its own in-memory SQLite database with
//! the application's migrations applied.
//!
//! # Example
//!
//! ```rust,ignore
//! use web::testing::TestDatabase;
//!
//! #[tokio::test]
//! async fn lists_nothing_on_a_fresh_database() {
//!     let db = TestDatabase::fresh::<Migrator>().await.unwrap();
//!     let store = SubstationStore::new(db.connection().clone());
//!     assert!(store.list_filtered(&QuerySpec::All).await.unwrap().is_empty());
//! }
//! ```

use crate::database::{DatabaseConfig, DbConnection};
use crate::error::FrameworkError;
use sea_orm_migration::MigratorTrait;

/// Isolated in-memory database for a single test
///
/// The pool holds exactly one connection: each SQLite `:memory:` connection
/// is a separate database, so a larger pool would see empty schemas.
pub struct TestDatabase {
    conn: DbConnection,
}

impl TestDatabase {
    /// Create a new database and run every migration of `M`
    pub async fn fresh<M: MigratorTrait>() -> Result<Self, FrameworkError> {
        let config = DatabaseConfig::builder()
            .url("sqlite::memory:")
            .max_connections(1)
            .min_connections(1)
            .connect_timeout(5)
            .logging(false)
            .build();

        let conn = DbConnection::connect(&config).await?;
        M::up(conn.inner(), None).await?;

        Ok(Self { conn })
    }

    /// Connection to the test database
    pub fn connection(&self) -> &DbConnection {
        &self.conn
    }
}
