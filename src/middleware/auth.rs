use axum::{extract::FromRequestParts, http::header};

use crate::{
    dto::auth::AdminSession, error::AppError, services::auth_service::decode_session,
    state::AppState,
};

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub session: AdminSession,
}

impl AuthUser {
    pub fn email(&self) -> &str {
        &self.session.email
    }
}

pub fn ensure_role(user: &AuthUser, role: &str) -> Result<(), AppError> {
    if user.session.role != role {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    ensure_role(user, "admin")
}

pub fn ensure_permission(user: &AuthUser, permission: &str) -> Result<(), AppError> {
    ensure_admin(user)?;
    if !user.session.permissions.iter().any(|p| p == permission) {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AppError::Unauthorized)?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::BadRequest("Invalid Authorization header".into()))?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::BadRequest("Invalid Authorization scheme".into()))?
            .trim();

        let session = decode_session(&state.config.jwt_secret, token)?;
        Ok(AuthUser { session })
    }
}
