use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::password::{hash_password, verify_password, verify_unknown_account};
use crate::errors::AppError;
use crate::extract::{ApiForm, ApiJson};
use crate::models::user::{NewUser, UserRow};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub full_name: String,
    pub password: String,
}

/// OAuth2 password-flow form: `username` carries the email.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// POST /auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<Json<UserRow>, AppError> {
    let email = normalize_email(&req.email)?;
    let full_name = req.full_name.trim();
    if full_name.is_empty() {
        return Err(AppError::Validation("full_name cannot be empty".to_string()));
    }
    if req.password.is_empty() {
        return Err(AppError::Validation("password cannot be empty".to_string()));
    }

    if state.store.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let user = state
        .store
        .insert_user(NewUser {
            email,
            full_name: full_name.to_string(),
            hashed_password: hash_password(&req.password)?,
        })
        .await?;

    info!("Registered user {}", user.id);
    Ok(Json(user))
}

/// POST /auth/login (form-encoded)
pub async fn handle_login(
    State(state): State<AppState>,
    ApiForm(form): ApiForm<LoginForm>,
) -> Result<Json<TokenResponse>, AppError> {
    let invalid = || AppError::Unauthorized("Incorrect credentials".to_string());

    let Some(user) = state.store.find_user_by_email(form.username.trim()).await? else {
        verify_unknown_account(&form.password);
        return Err(invalid());
    };

    if !verify_password(&form.password, &user.hashed_password)? {
        warn!("Failed login attempt for user {}", user.id);
        return Err(invalid());
    }

    Ok(Json(TokenResponse {
        access_token: state.tokens.issue(user.id)?,
        token_type: "bearer".to_string(),
    }))
}

/// Trims and lowercases; requires a non-empty local part and a dotted domain.
fn normalize_email(raw: &str) -> Result<String, AppError> {
    let email = raw.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(AppError::Validation(format!("'{}' is not a valid email", raw.trim())));
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email_lowercases_and_trims() {
        assert_eq!(
            normalize_email("  Ada@Example.COM ").unwrap(),
            "ada@example.com"
        );
    }

    #[test]
    fn test_normalize_email_rejects_malformed() {
        for bad in ["", "plain", "@example.com", "a@b", "a@.com", "a@b.", "a b@c.com", "a@b@c.com"] {
            assert!(normalize_email(bad).is_err(), "{bad} should be rejected");
        }
    }
}
