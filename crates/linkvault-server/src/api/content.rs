//! Content API routes

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch},
    Json, Router,
};
use linkvault_core::services::content;
use linkvault_core::{ApiResponse, CreateContent, VaultServices};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::extract::{json_body, AuthUser};

/// Content routes
pub fn routes() -> Router<VaultServices> {
    Router::new()
        .route("/content", get(list_content).post(create_content))
        .route("/content/title", get(search_content))
        .route("/content/:id", delete(delete_content))
        .route("/content/:id/visibility", patch(set_visibility))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(rename = "searchValue", default)]
    pub search_value: String,
}

#[derive(Debug, Deserialize)]
pub struct VisibilityRequest {
    #[serde(rename = "isPublic", alias = "is_public")]
    pub is_public: bool,
}

async fn create_content(
    State(services): State<VaultServices>,
    AuthUser(identity): AuthUser,
    payload: Result<Json<CreateContent>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let req = json_body(payload)?;
    let item = content::create_content(&services.contents, &identity, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Content added successfully", item)),
    ))
}

async fn list_content(
    State(services): State<VaultServices>,
    AuthUser(identity): AuthUser,
) -> ApiResult<impl IntoResponse> {
    let items = content::list_content(&services.contents, &identity).await?;
    Ok(Json(ApiResponse::ok("Content retrieved successfully", items)))
}

async fn search_content(
    State(services): State<VaultServices>,
    AuthUser(identity): AuthUser,
    Query(query): Query<SearchQuery>,
) -> ApiResult<impl IntoResponse> {
    let items = content::search_content(&services.contents, &identity, &query.search_value).await?;
    Ok(Json(ApiResponse::ok("Content retrieved successfully", items)))
}

async fn delete_content(
    State(services): State<VaultServices>,
    AuthUser(identity): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let title = content::delete_content(&services.contents, &identity, &id).await?;
    Ok(Json(ApiResponse::<()>::message(format!(
        "Content '{}' deleted successfully",
        title
    ))))
}

async fn set_visibility(
    State(services): State<VaultServices>,
    AuthUser(identity): AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<VisibilityRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let req = json_body(payload)?;
    let item = content::set_visibility(&services.contents, &identity, &id, req.is_public).await?;
    Ok(Json(ApiResponse::ok("Visibility updated successfully", item)))
}
