// Document store for contact submissions
// Insert-only: records are never updated or deleted by the site

use crate::models::contact::ContactSubmission;
use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn insert(&self, submission: &ContactSubmission) -> Result<(), StoreError>;

    /// Connectivity check for the status endpoint.
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

pub struct PgContactStore {
    pool: PgPool,
}

impl PgContactStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactStore for PgContactStore {
    async fn insert(&self, submission: &ContactSubmission) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO contact_submissions (id, name, email, company, message, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(submission.id)
        .bind(&submission.name)
        .bind(&submission.email)
        .bind(&submission.company)
        .bind(&submission.message)
        .bind(submission.created_at)
        .execute(&self.pool)
        .await?;

        tracing::info!("Stored contact submission {}", submission.id);
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
