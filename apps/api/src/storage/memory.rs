//! In-memory storage used by tests, with switches to inject failures at
//! specific writes.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::auth::TokenVerifier;
use crate::models::experience::ExperienceRecord;
use crate::models::job_application::{
    DocumentKind, DocumentRow, JobApplication, JobApplicationRow, JobDescriptionRow, JobPosting,
};
use crate::models::user::CandidateProfile;
use crate::storage::{
    DocumentStore, ExperienceStore, JobApplicationStore, ProfileStore, StoreError, StoreResult,
};

#[derive(Default)]
struct Inner {
    profiles: HashMap<Uuid, CandidateProfile>,
    experiences: HashMap<Uuid, Vec<ExperienceRecord>>,
    applications: Vec<JobApplicationRow>,
    descriptions: Vec<JobDescriptionRow>,
    documents: Vec<DocumentRow>,
    tokens: HashMap<String, Uuid>,
    fail_description_insert: bool,
    fail_document_kind: Option<DocumentKind>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn insert_profile(&self, profile: CandidateProfile) {
        self.lock().profiles.insert(profile.id, profile);
    }

    pub fn insert_experience(&self, user_id: Uuid, record: ExperienceRecord) {
        self.lock().experiences.entry(user_id).or_default().push(record);
    }

    pub fn insert_token(&self, token: &str, user_id: Uuid) {
        self.lock().tokens.insert(token.to_string(), user_id);
    }

    pub fn fail_description_insert(&self) {
        self.lock().fail_description_insert = true;
    }

    pub fn fail_document_insert(&self, kind: DocumentKind) {
        self.lock().fail_document_kind = Some(kind);
    }

    pub fn applications(&self) -> Vec<JobApplicationRow> {
        self.lock().applications.clone()
    }

    pub fn descriptions(&self) -> Vec<JobDescriptionRow> {
        self.lock().descriptions.clone()
    }

    pub fn documents(&self) -> Vec<DocumentRow> {
        self.lock().documents.clone()
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn find_by_id(&self, user_id: Uuid) -> StoreResult<Option<CandidateProfile>> {
        Ok(self.lock().profiles.get(&user_id).cloned())
    }
}

#[async_trait]
impl ExperienceStore for MemoryStore {
    async fn find_all_by_user(&self, user_id: Uuid) -> StoreResult<Vec<ExperienceRecord>> {
        Ok(self
            .lock()
            .experiences
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl JobApplicationStore for MemoryStore {
    async fn create_with_description(
        &self,
        user_id: Uuid,
        posting: &JobPosting,
    ) -> StoreResult<JobApplication> {
        let mut inner = self.lock();

        let application = JobApplicationRow {
            id: Uuid::new_v4(),
            user_id,
            created_at: Utc::now(),
        };

        inner.applications.push(application.clone());

        // Undo the application row, as dropping the Postgres transaction would.
        if inner.fail_description_insert {
            inner.applications.retain(|a| a.id != application.id);
            return Err(StoreError::Unavailable(
                "job description insert failed".to_string(),
            ));
        }

        let description = JobDescriptionRow {
            id: Uuid::new_v4(),
            job_application_id: application.id,
            title: posting.title.clone(),
            company: posting.company.clone(),
            body: posting.description.clone(),
            created_at: Utc::now(),
        };
        inner.descriptions.push(description.clone());

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
        Ok(self
            .lock()
            .applications
            .iter()
            .find(|a| a.id == id && a.user_id == user_id)
            .cloned())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create(
        &self,
        job_application_id: Uuid,
        kind: DocumentKind,
        body: &str,
    ) -> StoreResult<DocumentRow> {
        let mut inner = self.lock();

        if inner.fail_document_kind == Some(kind) {
            return Err(StoreError::Unavailable(format!("{kind} insert failed")));
        }

        let row = DocumentRow {
            id: Uuid::new_v4(),
            job_application_id,
            kind: kind.as_str().to_string(),
            body: body.to_string(),
            created_at: Utc::now(),
        };
        inner.documents.push(row.clone());
        Ok(row)
    }
}

#[async_trait]
impl TokenVerifier for MemoryStore {
    async fn resolve(&self, token: &str) -> StoreResult<Option<Uuid>> {
        Ok(self.lock().tokens.get(token).copied())
    }
}
