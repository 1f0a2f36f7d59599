use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::firs::models::{Fir, NewFir, Priority, DEFAULT_STATUS};

/// Persistence contract for FIRs.
///
/// The store owns every persisted record; reads hand out owned copies and
/// never modify stored values.
#[async_trait]
pub trait FirStore: Send + Sync {
    /// Persist a new FIR, assigning id, filing time and default status
    async fn create(&self, data: &NewFir) -> Result<Fir>;

    /// FIRs filed by one submitter, most recent first
    async fn find_by_submitter(&self, submitter_id: &str) -> Result<Vec<Fir>>;

    /// Every FIR, most urgent first (ties: most recent first)
    async fn find_all(&self) -> Result<Vec<Fir>>;

    /// FIRs of a single priority tier, most recent first
    async fn find_by_priority(&self, priority: Priority) -> Result<Vec<Fir>>;
}

const FIR_COLUMNS: &str =
    "id, submitter_id, category, description, location, filed_at, status, priority";

// Ids are UUID v7, so `id DESC` breaks filed_at ties in insertion order
const ORDER_NEWEST_FIRST: &str = "filed_at DESC, id DESC";
const ORDER_MOST_URGENT_FIRST: &str = "priority ASC, filed_at DESC, id DESC";

fn select_sql(filter: Option<&str>, order_by: &str) -> String {
    match filter {
        Some(filter) => {
            format!("SELECT {FIR_COLUMNS} FROM firs WHERE {filter} ORDER BY {order_by}")
        }
        None => format!("SELECT {FIR_COLUMNS} FROM firs ORDER BY {order_by}"),
    }
}

/// Postgres-backed store over the `firs` table
pub struct PgFirStore {
    pool: PgPool,
}

impl PgFirStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FirStore for PgFirStore {
    async fn create(&self, data: &NewFir) -> Result<Fir> {
        let fir = sqlx::query_as::<_, Fir>(&format!(
            r#"
            INSERT INTO firs (id, submitter_id, category, description, location, status, priority)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {FIR_COLUMNS}
            "#
        ))
        .bind(Uuid::now_v7())
        .bind(&data.submitter_id)
        .bind(&data.category)
        .bind(&data.description)
        .bind(&data.location)
        .bind(DEFAULT_STATUS)
        .bind(data.priority)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create FIR: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(fir)
    }

    async fn find_by_submitter(&self, submitter_id: &str) -> Result<Vec<Fir>> {
        sqlx::query_as::<_, Fir>(&select_sql(Some("submitter_id = $1"), ORDER_NEWEST_FIRST))
        .bind(submitter_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list FIRs for submitter: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_all(&self) -> Result<Vec<Fir>> {
        sqlx::query_as::<_, Fir>(&select_sql(None, ORDER_MOST_URGENT_FIRST))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list FIRs: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_by_priority(&self, priority: Priority) -> Result<Vec<Fir>> {
        sqlx::query_as::<_, Fir>(&select_sql(Some("priority = $1"), ORDER_NEWEST_FIRST))
        .bind(priority)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list FIRs by priority: {:?}", e);
            AppError::Database(e)
        })
    }
}

#[cfg(test)]
pub use memory::InMemoryFirStore;
