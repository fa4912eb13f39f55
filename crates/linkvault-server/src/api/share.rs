//! Share link API routes

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use linkvault_core::services::sharing;
use linkvault_core::{ApiResponse, ShareGrant, SharedVault, VaultServices};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::extract::{json_body, AuthUser};

/// Resolved vaults may be cached by intermediaries for this long
const SHARE_CACHE_CONTROL: &str = "public, max-age=300";

/// Share routes
pub fn routes() -> Router<VaultServices> {
    Router::new()
        .route("/brain/share", post(toggle_sharing))
        .route("/brain/:hash", get(resolve_share))
}

#[derive(Debug, Deserialize)]
pub struct ShareToggle {
    pub share: bool,
}

#[derive(Debug, Serialize)]
struct SharedVaultBody {
    success: bool,
    #[serde(flatten)]
    vault: SharedVault,
}

async fn toggle_sharing(
    State(services): State<VaultServices>,
    AuthUser(identity): AuthUser,
    payload: Result<Json<ShareToggle>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let req = json_body(payload)?;

    if !req.share {
        sharing::disable_sharing(&services.shares, &identity).await?;
        return Ok((
            StatusCode::OK,
            Json(ApiResponse::<ShareGrant>::message("Sharing disabled successfully")),
        ));
    }

    let grant = sharing::enable_sharing(&services.shares, &identity).await?;
    let (code, message) = if grant.created {
        (StatusCode::CREATED, "Sharing enabled successfully")
    } else {
        (StatusCode::OK, "Using existing share link")
    };
    Ok((code, Json(ApiResponse::ok(message, grant))))
}

/// Public: no identity required
async fn resolve_share(
    State(services): State<VaultServices>,
    Path(hash): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let vault =
        sharing::resolve_share(&services.shares, &services.users, &services.contents, &hash).await?;

    Ok((
        [(header::CACHE_CONTROL, SHARE_CACHE_CONTROL)],
        Json(SharedVaultBody {
            success: true,
            vault,
        }),
    ))
}
