use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use jobdeck_db::Database;
use jobdeck_types::api::{AuthResponse, Claims, LoginRequest, RegisterRequest};
use jobdeck_types::models::Role;

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub jwt_secret: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // Validate input
    if req.username.len() < 3 || req.username.len() > 32 {
        return Err(ApiError::InvalidRequest("username must be 3-32 characters"));
    }
    if req.password.len() < 8 {
        return Err(ApiError::InvalidRequest("password must be at least 8 characters"));
    }

    // Check if username is taken
    if state.db.get_user_by_username(&req.username)?.is_some() {
        return Err(ApiError::UsernameTaken);
    }

    let password_hash = hash_password(&req.password)?;
    let user_id = Uuid::new_v4();
    let profile_id = Uuid::new_v4();

    state
        .db
        .create_user(&user_id.to_string(), &req.username, &password_hash)?;
    state
        .db
        .create_profile(&profile_id.to_string(), &user_id.to_string(), req.role)?;

    match req.role {
        Role::Recruiter => state.db.create_recruiter_profile(
            &Uuid::new_v4().to_string(),
            &profile_id.to_string(),
            req.company_name.as_deref().unwrap_or_default(),
            req.position.as_deref().unwrap_or_default(),
        )?,
        Role::JobSeeker => state.db.create_job_seeker_profile(
            &Uuid::new_v4().to_string(),
            &profile_id.to_string(),
            req.skills.as_deref().unwrap_or_default(),
            req.experience_years.unwrap_or(0),
        )?,
    }

    let token = create_token(&state.jwt_secret, user_id, &req.username)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user_id,
            username: req.username,
            role: req.role,
            token,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .db
        .get_user_by_username(&req.username)?
        .ok_or(ApiError::InvalidCredentials)?;

    if !verify_password(&user.password, &req.password)? {
        return Err(ApiError::InvalidCredentials);
    }

    let profile = state
        .db
        .get_profile_by_user(&user.id)?
        .ok_or(ApiError::NotFound("profile not found"))?;
    let role = Role::from_db(&profile.role)
        .ok_or_else(|| anyhow::anyhow!("corrupt role '{}' on profile {}", profile.role, profile.id))?;

    let user_id: Uuid = user
        .id
        .parse()
        .map_err(|_| anyhow::anyhow!("corrupt user id '{}'", user.id))?;

    let token = create_token(&state.jwt_secret, user_id, &user.username)?;

    Ok(Json(AuthResponse {
        user_id,
        username: user.username,
        role,
        token,
    }))
}

pub(crate) fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("password hashing failed: {}", e))?;
    Ok(hash.to_string())
}

pub(crate) fn verify_password(stored_hash: &str, password: &str) -> anyhow::Result<bool> {
    let parsed =
        PasswordHash::new(stored_hash).map_err(|e| anyhow::anyhow!("corrupt password hash: {}", e))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

fn create_token(secret: &str, user_id: Uuid, username: &str) -> anyhow::Result<String> {
    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        exp: (chrono::Utc::now() + chrono::Duration::days(30)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{DecodingKey, Validation, decode};

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("hunter2hunter2").unwrap();
        assert!(verify_password(&hash, "hunter2hunter2").unwrap());
        assert!(!verify_password(&hash, "wrong-password").unwrap());
    }

    #[test]
    fn token_round_trip() {
        let user_id = Uuid::new_v4();
        let token = create_token("test-secret", user_id, "alice").unwrap();

        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::default(),
        )
        .unwrap();
        assert_eq!(decoded.claims.sub, user_id);
        assert_eq!(decoded.claims.username, "alice");
    }
}
