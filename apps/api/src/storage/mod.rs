//! Storage collaborators consumed by the generation pipeline.
//!
//! Each concern is a trait so the pipeline can run against Postgres in
//! production and an in-memory store in tests. `AppState` carries them as
//! `Arc<dyn …>`.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::experience::ExperienceRecord;
use crate::models::job_application::{
    DocumentKind, DocumentRow, JobApplication, JobApplicationRow, JobPosting,
};
use crate::models::user::CandidateProfile;

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[cfg(test)]
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find_by_id(&self, user_id: Uuid) -> StoreResult<Option<CandidateProfile>>;
}

#[async_trait]
pub trait ExperienceStore: Send + Sync {
    /// Returns the user's history in storage order.
    async fn find_all_by_user(&self, user_id: Uuid) -> StoreResult<Vec<ExperienceRecord>>;
}

#[async_trait]
pub trait JobApplicationStore: Send + Sync {
    /// Writes the application and its description atomically: if the description
    /// insert fails, no application row survives.
    async fn create_with_description(
        &self,
        user_id: Uuid,
        posting: &JobPosting,
    ) -> StoreResult<JobApplication>;

    /// Returns the application only when it exists and belongs to `user_id`.
    async fn find_by_id_for_owner(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> StoreResult<Option<JobApplicationRow>>;
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn create(
        &self,
        job_application_id: Uuid,
        kind: DocumentKind,
        body: &str,
    ) -> StoreResult<DocumentRow>;
}
