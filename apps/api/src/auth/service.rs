use serde::Deserialize;
use tracing::{info, warn};

use crate::auth::password::{hash_password, verify_against_dummy, verify_password};
use crate::auth::token::TokenIssuer;
use crate::errors::AppError;
use crate::models::user::UserRow;
use crate::store::{NewUser, UserStore};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// A user together with a freshly issued bearer token.
#[derive(Debug)]
pub struct Session {
    pub user: UserRow,
    pub token: String,
}

/// Emails are compared case-insensitively and without surrounding whitespace.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub async fn register(
    users: &dyn UserStore,
    tokens: &TokenIssuer,
    bcrypt_cost: u32,
    req: RegisterRequest,
) -> Result<Session, AppError> {
    let full_name = req.full_name.trim();
    let email = normalize_email(&req.email);
    if full_name.is_empty() || email.is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "fullName, email and password are required".to_string(),
        ));
    }
    if !email.contains('@') {
        return Err(AppError::Validation("email is not valid".to_string()));
    }

    if users.find_user_by_email(&email).await?.is_some() {
        warn!("Registration rejected: email already registered");
        return Err(AppError::Conflict("User already exists".to_string()));
    }

    let password_hash = hash_password(req.password, bcrypt_cost).await?;
    // The unique index still guards a concurrent registration with the same email.
    let user = users
        .insert_user(NewUser {
            full_name,
            email: &email,
            password_hash: &password_hash,
        })
        .await?;

    let token = issue(tokens, &user)?;
    info!("Registered user {}", user.id);
    Ok(Session { user, token })
}

/// Unknown email and wrong password fail identically, in body and in bcrypt work.
pub async fn login(
    users: &dyn UserStore,
    tokens: &TokenIssuer,
    bcrypt_cost: u32,
    req: LoginRequest,
) -> Result<Session, AppError> {
    let email = normalize_email(&req.email);
    if email.is_empty() || req.password.is_empty() {
        return Err(AppError::InvalidCredentials);
    }

    let Some(user) = users.find_user_by_email(&email).await? else {
        verify_against_dummy(req.password, bcrypt_cost).await?;
        warn!("Login failed");
        return Err(AppError::InvalidCredentials);
    };
    if !verify_password(req.password, user.password_hash.clone()).await? {
        warn!("Login failed");
        return Err(AppError::InvalidCredentials);
    }

    let token = issue(tokens, &user)?;
    info!("User {} logged in", user.id);
    Ok(Session { user, token })
}

fn issue(tokens: &TokenIssuer, user: &UserRow) -> Result<String, AppError> {
    tokens
        .issue(user.id)
        .map_err(|e| AppError::Internal(anyhow::Error::new(e)))
}
