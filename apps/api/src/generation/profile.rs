//! Profile Reader.

use std::sync::Arc;

use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::CandidateProfile;
use crate::storage::ProfileStore;

pub struct ProfileReader {
    store: Arc<dyn ProfileStore>,
}

impl ProfileReader {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    /// A missing profile is fatal for the run: there is no owner to write for.
    pub async fn fetch(&self, user_id: Uuid) -> Result<CandidateProfile, AppError> {
        self.store
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))
    }
}
