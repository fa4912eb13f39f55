//! Account API routes

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use linkvault_core::services::accounts;
use linkvault_core::{ApiResponse, AuthResponse, SigninRequest, SignupRequest, VaultServices};
use serde::Serialize;

use crate::error::ApiResult;
use crate::extract::{json_body, AuthUser};

/// Account routes
pub fn routes() -> Router<VaultServices> {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .route("/me", get(me))
        .route("/account", delete(delete_account))
}

/// Signup / signin body: the session plus the usual success flag
#[derive(Debug, Serialize)]
struct SessionBody {
    success: bool,
    #[serde(flatten)]
    session: AuthResponse,
}

impl From<AuthResponse> for SessionBody {
    fn from(session: AuthResponse) -> Self {
        Self {
            success: true,
            session,
        }
    }
}

async fn signup(
    State(services): State<VaultServices>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let req = json_body(payload)?;
    let session = accounts::signup(&services.users, services.tokens(), req).await?;
    log::info!("New account {}", session.user.username);
    Ok((StatusCode::CREATED, Json(SessionBody::from(session))))
}

async fn signin(
    State(services): State<VaultServices>,
    payload: Result<Json<SigninRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let req = json_body(payload)?;
    let session = accounts::signin(&services.users, services.tokens(), req).await?;
    Ok(Json(SessionBody::from(session)))
}

/// Current identity
async fn me(
    State(services): State<VaultServices>,
    AuthUser(identity): AuthUser,
) -> ApiResult<impl IntoResponse> {
    let user = accounts::current_user(&services.users, &identity).await?;
    Ok(Json(ApiResponse::ok("User retrieved successfully", user)))
}

/// Delete the caller's account, content and share link
async fn delete_account(
    State(services): State<VaultServices>,
    AuthUser(identity): AuthUser,
) -> ApiResult<impl IntoResponse> {
    accounts::delete_account(&services.users, &identity).await?;
    Ok(Json(ApiResponse::<()>::message("Account deleted successfully")))
}
