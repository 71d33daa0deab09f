use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use password_hash::rand_core::OsRng;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::auth::{AdminSession, Claims, LoginRequest, LoginResponse},
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub const ORDERS_WRITE: &str = "orders:write";

/// The single back-office account. Only the argon2 hash of its password
/// is kept.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub permissions: Vec<String>,
    password_hash: String,
}

/// Argon2 PHC string for `password` with a fresh salt.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string())
}

impl AdminAccount {
    /// `password_hash` must be a PHC string, see [`hash_password`].
    pub fn new(email: &str, password_hash: &str) -> AppResult<Self> {
        PasswordHash::new(password_hash)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

        Ok(Self {
            id: Uuid::new_v4(),
            name: "Store Admin".into(),
            email: email.to_string(),
            role: "admin".into(),
            permissions: vec![
                "orders:read".into(),
                ORDERS_WRITE.into(),
                "customers:read".into(),
                "products:read".into(),
            ],
            password_hash: password_hash.to_string(),
        })
    }

    fn verify(&self, email: &str, password: &str) -> AppResult<bool> {
        if !self.email.eq_ignore_ascii_case(email.trim()) {
            return Ok(false);
        }
        let parsed_hash = PasswordHash::new(&self.password_hash)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

pub async fn login_admin(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { email, password } = payload;
    let admin = &state.admin;

    if !admin.verify(&email, &password)? {
        tracing::info!(email = %email, "admin login rejected");
        return Err(AppError::BadRequest("Invalid email or password".into()));
    }

    let now = Utc::now();
    let expiration = now
        .checked_add_signed(Duration::hours(24))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: admin.id.to_string(),
        name: admin.name.clone(),
        email: admin.email.clone(),
        role: admin.role.clone(),
        permissions: admin.permissions.clone(),
        last_login: now,
        exp: expiration.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?;

    log_audit(
        Some(&admin.email),
        "admin_login",
        Some("sessions"),
        Some(serde_json::json!({ "admin_id": admin.id })),
    );

    Ok(ApiResponse::success(
        "Logged in",
        LoginResponse {
            token: format!("Bearer {}", token),
            session: claims.into(),
        },
        Some(Meta::empty()),
    ))
}

pub fn decode_session(secret: &str, token: &str) -> AppResult<AdminSession> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized)?;
    Ok(decoded.claims.into())
}
