use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::{error::AppError, state::AppState};

/// Caller identity resolved by the active token verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub i64);

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>().copied() {
            return Ok(user);
        }

        let authorization = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

        let user_id = state.verifiers.active()?.verify(authorization).await?;
        if user_id <= 0 {
            return Err(AppError::unauthorized("User verification failed"));
        }

        let user = AuthUser(user_id);
        parts.extensions.insert(user);
        Ok(user)
    }
}
