//! JWT bearer authentication extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tryon_core::error::CoreError;
use tryon_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

pub const MSG_NO_TOKEN: &str = "no auth token";
pub const MSG_INVALID_TOKEN: &str = "invalid or expired token";

/// The caller, resolved from `Authorization: Bearer <token>`.
///
/// Every try-on, history and generation handler takes this as a parameter,
/// which keeps all per-user data scoped to `user_id`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized(MSG_NO_TOKEN.into())))?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| AppError::Core(CoreError::Unauthorized(MSG_INVALID_TOKEN.into())))?;

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}
