use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::auth::TokenVerifier;
use crate::models::experience::{ExperienceRecord, ExperienceRow};
use crate::models::job_application::{
    DocumentKind, DocumentRow, JobApplication, JobApplicationRow, JobDescriptionRow, JobPosting,
};
use crate::models::user::CandidateProfile;
use crate::storage::{
    DocumentStore, ExperienceStore, JobApplicationStore, ProfileStore, StoreError, StoreResult,
};

/// Postgres-backed implementation of every storage collaborator.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgStore {
    async fn find_by_id(&self, user_id: Uuid) -> StoreResult<Option<CandidateProfile>> {
        Ok(sqlx::query_as::<_, CandidateProfile>(
            "SELECT id, first_name, last_name, email, phone, created_at FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?)
    }
}

#[async_trait]
impl ExperienceStore for PgStore {
    async fn find_all_by_user(&self, user_id: Uuid) -> StoreResult<Vec<ExperienceRecord>> {
        let rows = sqlx::query_as::<_, ExperienceRow>(
            r#"
            SELECT e.id, e.kind, e.organization, e.start_date, e.end_date,
                   emp.job_title, emp.description,
                   edu.degree, edu.field_of_study, edu.grade
            FROM experiences e
            LEFT JOIN employments emp ON emp.experience_id = e.id
            LEFT JOIN educations edu ON edu.experience_id = e.id
            WHERE e.user_id = $1
            ORDER BY e.created_at ASC, e.id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        debug!("Loaded {} experience rows for user {user_id}", rows.len());

        rows.into_iter()
            .map(|row| ExperienceRecord::try_from(row).map_err(StoreError::InvalidRecord))
            .collect()
    }
}

#[async_trait]
impl JobApplicationStore for PgStore {
    async fn create_with_description(
        &self,
        user_id: Uuid,
        posting: &JobPosting,
    ) -> StoreResult<JobApplication> {
        // Dropping `tx` on an early return rolls both inserts back.
        let mut tx = self.pool.begin().await?;

        let application = sqlx::query_as::<_, JobApplicationRow>(
            r#"
            INSERT INTO job_applications (id, user_id)
            VALUES ($1, $2)
            RETURNING id, user_id, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        let description = sqlx::query_as::<_, JobDescriptionRow>(
            r#"
            INSERT INTO job_descriptions (id, job_application_id, title, company, body)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, job_application_id, title, company, body, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(application.id)
        .bind(&posting.title)
        .bind(&posting.company)
        .bind(&posting.description)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            warn!(
                "Job description insert failed, rolling back application {}: {e}",
                application.id
            );
            StoreError::Database(e)
        })?;

        tx.commit().await?;

        Ok(JobApplication {
            application,
            description,
        })
    }

    async fn find_by_id_for_owner(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> StoreResult<Option<JobApplicationRow>> {
        Ok(sqlx::query_as::<_, JobApplicationRow>(
            "SELECT id, user_id, created_at FROM job_applications WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?)
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn create(
        &self,
        job_application_id: Uuid,
        kind: DocumentKind,
        body: &str,
    ) -> StoreResult<DocumentRow> {
        Ok(sqlx::query_as::<_, DocumentRow>(
            r#"
            INSERT INTO documents (id, job_application_id, kind, body)
            VALUES ($1, $2, $3, $4)
            RETURNING id, job_application_id, kind, body, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(job_application_id)
        .bind(kind.as_str())
        .bind(body)
        .fetch_one(&self.pool)
        .await?)
    }
}

#[async_trait]
impl TokenVerifier for PgStore {
    async fn resolve(&self, token: &str) -> StoreResult<Option<Uuid>> {
        Ok(sqlx::query_scalar::<_, Uuid>(
            "SELECT user_id FROM auth_tokens WHERE token = $1 AND expires_at > NOW()",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?)
    }
}
