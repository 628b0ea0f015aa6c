//! Record store for breaker records
//!
//! Reads go straight to the pool. Writes go through a [`WriteTransaction`],
//! which holds the store-wide writer lock and a database transaction, so a
//! uniqueness check followed by an insert or update cannot interleave with
//! another writer.

use sea_orm::{
    ActiveModelTrait, DatabaseTransaction, DbErr, EntityTrait, IntoActiveModel, PaginatorTrait,
    SqlErr, TransactionTrait,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, OwnedMutexGuard};
use web::{DbConnection, FrameworkError, HttpResponse};

use crate::models::substations::{ActiveModel, Entity, Model, SubstationInput};
use crate::query::{NameMatch, QuerySpec};

/// Store failures
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Substation {id} not found")]
    NotFound { id: i32 },

    /// The unique index on `breaker_name` rejected a write
    #[error("Constraint violated: {0}")]
    Constraint(String),

    #[error("Database error: {0}")]
    Database(DbErr),
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => StoreError::Constraint(detail),
            _ if err.to_string().contains("UNIQUE constraint failed") => {
                StoreError::Constraint(err.to_string())
            }
            _ => StoreError::Database(err),
        }
    }
}

impl From<StoreError> for FrameworkError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id } => {
                FrameworkError::model_not_found(format!("Substation {}", id))
            }
            StoreError::Constraint(detail) => {
                tracing::error!(%detail, "unique constraint rejected a checked write");
                FrameworkError::internal(format!("Constraint violated: {}", detail))
            }
            StoreError::Database(e) => FrameworkError::from(e),
        }
    }
}

impl From<StoreError> for HttpResponse {
    fn from(err: StoreError) -> Self {
        FrameworkError::from(err).into()
    }
}

/// Handle to the `substations` table
#[derive(Clone)]
pub struct SubstationStore {
    conn: DbConnection,
    writer: Arc<Mutex<()>>,
    name_match: NameMatch,
}

impl SubstationStore {
    pub fn new(conn: DbConnection) -> Self {
        Self {
            conn,
            writer: Arc::new(Mutex::new(())),
            name_match: NameMatch::default(),
        }
    }

    /// Set how the substation-name filter compares text
    pub fn with_name_match(mut self, name_match: NameMatch) -> Self {
        self.name_match = name_match;
        self
    }

    pub fn connection(&self) -> &DbConnection {
        &self.conn
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Model, StoreError> {
        Entity::find_by_id(id)
            .one(self.conn.inner())
            .await?
            .ok_or(StoreError::NotFound { id })
    }

    /// Records matching `spec`, in insertion order
    pub async fn list_filtered(&self, spec: &QuerySpec) -> Result<Vec<Model>, StoreError> {
        let mut records = spec.select(self.name_match).all(self.conn.inner()).await?;
        records.retain(|record| spec.matches(record, self.name_match));
        Ok(records)
    }

    pub async fn count(&self) -> Result<u64, StoreError> {
        Ok(Entity::find().count(self.conn.inner()).await?)
    }

    /// Take the writer lock and open a transaction
    ///
    /// While the returned value is alive no other writer can start.
    /// Dropping it without [`commit`](WriteTransaction::commit) rolls back.
    pub async fn begin_write(&self) -> Result<WriteTransaction, StoreError> {
        let writer = self.writer.clone().lock_owned().await;
        let txn = self.conn.inner().begin().await?;
        Ok(WriteTransaction {
            txn,
            _writer: writer,
        })
    }

    /// Insert in a transaction of its own
    pub async fn insert(&self, input: SubstationInput) -> Result<Model, StoreError> {
        let tx = self.begin_write().await?;
        let record = tx.insert(input).await?;
        tx.commit().await?;
        Ok(record)
    }

    /// Update in a transaction of its own
    pub async fn update(&self, id: i32, input: SubstationInput) -> Result<Model, StoreError> {
        let tx = self.begin_write().await?;
        let record = tx.update(id, input).await?;
        tx.commit().await?;
        Ok(record)
    }

    /// Delete in a transaction of its own
    pub async fn delete(&self, id: i32) -> Result<(), StoreError> {
        let tx = self.begin_write().await?;
        tx.delete(id).await?;
        tx.commit().await
    }
}

/// An open write: the writer lock plus a database transaction
pub struct WriteTransaction {
    // Declared before the guard so the transaction ends before the lock is released
    txn: DatabaseTransaction,
    _writer: OwnedMutexGuard<()>,
}

impl WriteTransaction {
    /// Connection for reads that must see this transaction's view
    pub fn connection(&self) -> &DatabaseTransaction {
        &self.txn
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Model, StoreError> {
        Entity::find_by_id(id)
            .one(&self.txn)
            .await?
            .ok_or(StoreError::NotFound { id })
    }

    pub async fn insert(&self, input: SubstationInput) -> Result<Model, StoreError> {
        let record = ActiveModel::from_input(input).insert(&self.txn).await?;
        tracing::info!(id = record.id, breaker = %record.breaker_name, "substation inserted");
        Ok(record)
    }

    pub async fn update(&self, id: i32, input: SubstationInput) -> Result<Model, StoreError> {
        let mut active = self.get_by_id(id).await?.into_active_model();
        active.apply(input);
        let record = active.update(&self.txn).await?;
        tracing::info!(id, breaker = %record.breaker_name, "substation updated");
        Ok(record)
    }

    pub async fn delete(&self, id: i32) -> Result<(), StoreError> {
        let result = Entity::delete_by_id(id).exec(&self.txn).await?;
        if result.rows_affected == 0 {
            return Err(StoreError::NotFound { id });
        }
        tracing::info!(id, "substation deleted");
        Ok(())
    }

    pub async fn commit(self) -> Result<(), StoreError> {
        let WriteTransaction { txn, _writer } = self;
        txn.commit().await?;
        Ok(())
    }

    pub async fn rollback(self) -> Result<(), StoreError> {
        let WriteTransaction { txn, _writer } = self;
        txn.rollback().await?;
        Ok(())
    }
}
