//! Account business logic
//!
//! Signup, signin and account lifecycle, independent of the HTTP/CLI surface.

use chrono::Utc;
use uuid::Uuid;

use super::repository::{NewUser, UserRepository, USERNAME_TAKEN, USER_NOT_FOUND};
use crate::auth::{hash_password, verify_against_dummy, verify_password, Identity, TokenService};
use crate::error::{AuthFailure, Error, Result};
use crate::models::{AuthResponse, SigninRequest, SignupRequest, User, UserResponse};

const USERNAME_MIN_LEN: usize = 3;
const USERNAME_MAX_LEN: usize = 30;
const PASSWORD_MIN_LEN: usize = 6;

/// Usernames compare trimmed and lower-cased
pub fn normalize_username(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn validate_signup(username: &str, password: &str) -> Result<()> {
    let len = username.chars().count();
    if len < USERNAME_MIN_LEN {
        return Err(Error::validation("Username must be at least 3 characters"));
    }
    if len > USERNAME_MAX_LEN {
        return Err(Error::validation("Username must be at most 30 characters"));
    }
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(Error::validation("Password must be at least 6 characters"));
    }
    Ok(())
}

fn validate_signin(username: &str, password: &str) -> Result<()> {
    if username.is_empty() {
        return Err(Error::validation("Username is required"));
    }
    if password.is_empty() {
        return Err(Error::validation("Password is required"));
    }
    Ok(())
}

/// Store a new user with a salted password hash
pub async fn register<R: UserRepository>(repo: &R, username: &str, password: &str) -> Result<User> {
    let username = normalize_username(username);
    validate_signup(&username, password)?;

    if repo.username_exists(&username).await? {
        return Err(Error::conflict(USERNAME_TAKEN));
    }

    let new_user = NewUser {
        id: Uuid::new_v4().to_string(),
        username,
        password_hash: hash_password(password)?,
        created_at: Utc::now(),
    };

    let user = repo.create_user(new_user).await?;
    log::info!("Registered user {}", user.username);
    Ok(user)
}

/// Check a username/password pair.
///
/// Unknown user and wrong password are the same `InvalidCredentials` failure.
pub async fn verify_credentials<R: UserRepository>(
    repo: &R,
    username: &str,
    password: &str,
) -> Result<User> {
    let username = normalize_username(username);
    validate_signin(&username, password)?;

    let invalid = || Error::unauthorized(AuthFailure::InvalidCredentials);

    let Some(user) = repo.find_by_username(&username).await? else {
        verify_against_dummy(password);
        return Err(invalid());
    };

    // A corrupt stored hash is treated like a mismatch rather than surfaced
    let valid = verify_password(password, &user.password_hash).unwrap_or_else(|e| {
        log::error!("Stored password hash for user {} is unreadable: {}", user.id, e);
        false
    });
    if !valid {
        return Err(invalid());
    }

    Ok(user)
}

/// Signup - register and hand back a token
pub async fn signup<R: UserRepository>(
    repo: &R,
    tokens: &TokenService,
    request: SignupRequest,
) -> Result<AuthResponse> {
    let user = register(repo, &request.username, &request.password).await?;
    let token = tokens.issue(&user.id)?;

    Ok(AuthResponse {
        message: "User created successfully".to_string(),
        token,
        user: UserResponse::from(user),
    })
}

/// Signin - verify credentials and hand back a token
pub async fn signin<R: UserRepository>(
    repo: &R,
    tokens: &TokenService,
    request: SigninRequest,
) -> Result<AuthResponse> {
    let user = verify_credentials(repo, &request.username, &request.password).await?;
    let token = tokens.issue(&user.id)?;

    Ok(AuthResponse {
        message: "Signed in successfully".to_string(),
        token,
        user: UserResponse::from(user),
    })
}

/// The account behind a verified identity
pub async fn current_user<R: UserRepository>(repo: &R, identity: &Identity) -> Result<UserResponse> {
    repo.find_by_id(identity.user_id())
        .await?
        .map(UserResponse::from)
        .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
}

/// Delete the caller's account, cascading to their content and share link
pub async fn delete_account<R: UserRepository>(repo: &R, identity: &Identity) -> Result<()> {
    if !repo.delete_user_cascade(identity.user_id()).await? {
        return Err(Error::not_found(USER_NOT_FOUND));
    }
    log::info!("Deleted account {} with its content and share link", identity.user_id());
    Ok(())
}
