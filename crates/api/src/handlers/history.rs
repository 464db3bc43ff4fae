//! Handlers for the caller's try-on history.
//!
//! Every lookup is scoped to the authenticated user; another user's record
//! is indistinguishable from a missing one.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;
use tryon_core::error::CoreError;
use tryon_core::pagination::Pagination;
use tryon_core::types::DbId;
use tryon_db::models::tryon_history::TryOnHistory;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::response::Success;
use crate::state::AppState;

pub const MSG_HISTORY_NOT_FOUND: &str = "history record not found";
pub const MSG_HISTORY_DELETED: &str = "history record deleted";

#[derive(Debug, Serialize)]
pub struct HistoryListBody {
    pub data: Vec<TryOnHistory>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct HistoryBody {
    pub data: TryOnHistory,
}

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

/// GET /api/v1/tryon/history?page=&limit=
///
/// Completed records only, newest first. A page past the end is empty.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> AppResult<Json<Success<HistoryListBody>>> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let page = state
        .history
        .list_completed(auth.user_id, params.resolve())
        .await?;

    Ok(Json(Success::new(HistoryListBody {
        data: page.records,
        pagination: page.pagination,
    })))
}

/// GET /api/v1/tryon/history/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<Success<HistoryBody>>> {
    let id = history_id(id)?;
    let record = state
        .history
        .find_for_user(auth.user_id, id)
        .await?
        .ok_or_else(|| CoreError::NotFound(MSG_HISTORY_NOT_FOUND.into()))?;
    Ok(Json(Success::new(HistoryBody { data: record })))
}

/// DELETE /api/v1/tryon/history/{id}
///
/// Hard delete.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<Success<MessageBody>>> {
    let id = history_id(id)?;
    if !state.history.delete_for_user(auth.user_id, id).await? {
        return Err(CoreError::NotFound(MSG_HISTORY_NOT_FOUND.into()).into());
    }
    tracing::info!(user_id = auth.user_id, history_id = id, "History record deleted");
    Ok(Json(Success::new(MessageBody {
        message: MSG_HISTORY_DELETED,
    })))
}

fn history_id(path: Result<Path<DbId>, PathRejection>) -> AppResult<DbId> {
    let Path(id) = path.map_err(|e| AppError::BadRequest(e.body_text()))?;
    Ok(id)
}
