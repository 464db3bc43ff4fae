//! Store traits consumed by the generation pipeline and HTTP handlers.
//!
//! [`PgStore`] delegates to the repositories. [`MemoryStore`] keeps
//! everything in process memory; it backs deployments started without
//! `DATABASE_URL` and the HTTP integration tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tryon_core::pagination::{PageRequest, Pagination};
use tryon_core::types::DbId;

use crate::models::garment::GarmentSnapshot;
use crate::models::tryon_history::{CreateTryOnHistory, TryOnHistory};
use crate::models::status::TryOnStatus;
use crate::repositories::{GarmentRepo, TryOnHistoryRepo};
use crate::DbPool;

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Read-only access to the external garment store.
#[async_trait]
pub trait GarmentStore: Send + Sync {
    /// Find a garment owned by `user_id` with its preferred image.
    async fn find_owned_garment_with_images(
        &self,
        user_id: DbId,
        garment_id: DbId,
    ) -> Result<Option<GarmentSnapshot>, sqlx::Error>;
}

/// One page of completed history records.
#[derive(Debug, Clone)]
pub struct HistoryPage {
    pub records: Vec<TryOnHistory>,
    pub pagination: Pagination,
}

/// Persistence and query surface for try-on history, scoped per user.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn create(&self, input: &CreateTryOnHistory) -> Result<TryOnHistory, sqlx::Error>;

    /// Completed records only, newest first. A page past the end is empty.
    async fn list_completed(
        &self,
        user_id: DbId,
        page: PageRequest,
    ) -> Result<HistoryPage, sqlx::Error>;

    async fn find_for_user(
        &self,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<TryOnHistory>, sqlx::Error>;

    /// Returns `false` if the record does not exist or is not owned by `user_id`.
    async fn delete_for_user(&self, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error>;

    /// Whether the backing storage is reachable.
    async fn is_healthy(&self) -> bool;
}

// ---------------------------------------------------------------------------
// PostgreSQL
// ---------------------------------------------------------------------------

/// Store backed by PostgreSQL via the repository layer.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GarmentStore for PgStore {
    async fn find_owned_garment_with_images(
        &self,
        user_id: DbId,
        garment_id: DbId,
    ) -> Result<Option<GarmentSnapshot>, sqlx::Error> {
        GarmentRepo::find_owned_with_image(&self.pool, user_id, garment_id).await
    }
}

#[async_trait]
impl HistoryStore for PgStore {
    async fn create(&self, input: &CreateTryOnHistory) -> Result<TryOnHistory, sqlx::Error> {
        TryOnHistoryRepo::create(&self.pool, input).await
    }

    async fn list_completed(
        &self,
        user_id: DbId,
        page: PageRequest,
    ) -> Result<HistoryPage, sqlx::Error> {
        let total = TryOnHistoryRepo::count_completed(&self.pool, user_id).await?;
        let records =
            TryOnHistoryRepo::list_completed(&self.pool, user_id, page.limit, page.offset())
                .await?;
        Ok(HistoryPage {
            records,
            pagination: Pagination::new(page, total),
        })
    }

    async fn find_for_user(
        &self,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<TryOnHistory>, sqlx::Error> {
        TryOnHistoryRepo::find_for_user(&self.pool, user_id, id).await
    }

    async fn delete_for_user(&self, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        TryOnHistoryRepo::delete_for_user(&self.pool, user_id, id).await
    }

    async fn is_healthy(&self) -> bool {
        crate::health_check(&self.pool).await.is_ok()
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MemoryState {
    next_history_id: DbId,
    /// Keyed by `(owner user id, garment id)`.
    garments: HashMap<(DbId, DbId), GarmentSnapshot>,
    history: Vec<TryOnHistory>,
}

/// Process-local store. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a garment as owned by `user_id`.
    pub async fn insert_garment(&self, user_id: DbId, garment: GarmentSnapshot) {
        let mut state = self.state.write().await;
        state.garments.insert((user_id, garment.id), garment);
    }

    /// Number of history rows of any status, across all users.
    pub async fn history_len(&self) -> usize {
        self.state.read().await.history.len()
    }
}

#[async_trait]
impl GarmentStore for MemoryStore {
    async fn find_owned_garment_with_images(
        &self,
        user_id: DbId,
        garment_id: DbId,
    ) -> Result<Option<GarmentSnapshot>, sqlx::Error> {
        let state = self.state.read().await;
        Ok(state.garments.get(&(user_id, garment_id)).cloned())
    }
}

#[async_trait]
impl HistoryStore for MemoryStore {
    async fn create(&self, input: &CreateTryOnHistory) -> Result<TryOnHistory, sqlx::Error> {
        let mut state = self.state.write().await;
        state.next_history_id += 1;
        let now = chrono::Utc::now();
        let record = TryOnHistory {
            id: state.next_history_id,
            user_id: input.user_id,
            garment_id: input.garment_id,
            subject_image_url: input.subject_image_url.clone(),
            subject_source: input.subject_source.as_str().to_string(),
            preset_subject_id: input.preset_subject_id.clone(),
            garment_image_url: input.garment_image_url.clone(),
            result_image_url: input.result_image_url.clone(),
            category: input.category.clone(),
            scene_id: input.scene_id.clone(),
            is_mock: input.is_mock,
            status: input.status.name().to_string(),
            error_message: input.error_message.clone(),
            created_at: now,
            updated_at: now,
        };
        state.history.push(record.clone());
        Ok(record)
    }

    async fn list_completed(
        &self,
        user_id: DbId,
        page: PageRequest,
    ) -> Result<HistoryPage, sqlx::Error> {
        let state = self.state.read().await;
        let mut completed: Vec<&TryOnHistory> = state
            .history
            .iter()
            .filter(|r| r.user_id == user_id && r.status == TryOnStatus::Completed.name())
            .collect();
        completed.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = completed.len() as i64;
        let records = completed
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit).unwrap_or(0))
            .cloned()
            .collect();

        Ok(HistoryPage {
            records,
            pagination: Pagination::new(page, total),
        })
    }

    async fn find_for_user(
        &self,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<TryOnHistory>, sqlx::Error> {
        let state = self.state.read().await;
        Ok(state
            .history
            .iter()
            .find(|r| r.id == id && r.user_id == user_id)
            .cloned())
    }

    async fn delete_for_user(&self, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let mut state = self.state.write().await;
        let before = state.history.len();
        state.history.retain(|r| !(r.id == id && r.user_id == user_id));
        Ok(state.history.len() < before)
    }

    async fn is_healthy(&self) -> bool {
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
