//! Content business logic
//!
//! All operations take the caller's [`Identity`] and act only on items it owns.

use chrono::Utc;
use uuid::Uuid;

use super::repository::ContentRepository;
use super::tags::normalize_tags;
use crate::auth::Identity;
use crate::error::{Error, Result};
use crate::models::{ContentItem, ContentType, CreateContent};

const REQUIRED_FIELDS: &str = "Link, type, and title are required.";
const NOT_OWNED: &str = "Content not found or not owned by user.";

fn required(field: Option<String>) -> Result<String> {
    field
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| Error::validation(REQUIRED_FIELDS))
}

/// Save a new link for the caller
pub async fn create_content<R: ContentRepository>(
    repo: &R,
    identity: &Identity,
    request: CreateContent,
) -> Result<ContentItem> {
    let link = required(request.link)?;
    let title = required(request.title)?;
    let raw_type = required(request.content_type)?;
    let content_type = ContentType::parse(&raw_type).ok_or_else(|| {
        Error::validation(format!(
            "Unknown content type '{}'. Expected one of: twitter, youtube, image, video, audio, pdf, link",
            raw_type
        ))
    })?;

    let now = Utc::now();
    let item = ContentItem {
        id: Uuid::new_v4().to_string(),
        user_id: identity.user_id().to_string(),
        link,
        title,
        content_type,
        tags: normalize_tags(&request.tags),
        is_public: true,
        created_at: now,
        updated_at: now,
    };

    repo.insert(&item).await?;
    log::debug!("User {} saved content {}", item.user_id, item.id);
    Ok(item)
}

/// Every item the caller owns
pub async fn list_content<R: ContentRepository>(
    repo: &R,
    identity: &Identity,
) -> Result<Vec<ContentItem>> {
    repo.list_by_owner(identity.user_id()).await
}

/// Caller's items whose title contains `query`; an empty query matches everything
pub async fn search_content<R: ContentRepository>(
    repo: &R,
    identity: &Identity,
    query: &str,
) -> Result<Vec<ContentItem>> {
    repo.search_by_title(identity.user_id(), query).await
}

/// Delete one of the caller's items and return its title.
///
/// Find-then-delete, both scoped by owner: a missing item and someone else's
/// item are the same `NotFound`.
pub async fn delete_content<R: ContentRepository>(
    repo: &R,
    identity: &Identity,
    content_id: &str,
) -> Result<String> {
    let content_id = content_id.trim();
    if content_id.is_empty() {
        return Err(Error::validation("Content ID is required."));
    }

    let item = repo
        .find_owned(identity.user_id(), content_id)
        .await?
        .ok_or_else(|| Error::not_found(NOT_OWNED))?;

    if !repo.delete_owned(identity.user_id(), content_id).await? {
        // Removed between the lookup and the delete
        return Err(Error::not_found(NOT_OWNED));
    }

    log::debug!("User {} deleted content {}", identity.user_id(), content_id);
    Ok(item.title)
}

/// Show or hide one of the caller's items on their shared vault
pub async fn set_visibility<R: ContentRepository>(
    repo: &R,
    identity: &Identity,
    content_id: &str,
    is_public: bool,
) -> Result<ContentItem> {
    let owner = identity.user_id();
    if !repo
        .set_visibility(owner, content_id, is_public, Utc::now())
        .await?
    {
        return Err(Error::not_found(NOT_OWNED));
    }

    repo.find_owned(owner, content_id)
        .await?
        .ok_or_else(|| Error::not_found(NOT_OWNED))
}
