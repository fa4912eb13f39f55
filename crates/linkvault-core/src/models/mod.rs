//! Data models for Link Vault

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::{Error, Status};
use crate::services::content::RawTags;

/// User model
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User response (without the password hash)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            created_at: user.created_at,
        }
    }
}

/// JWT Claims
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub iat: i64,
    pub exp: i64,
}

/// Declared media type of a saved link; a rendering hint only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Twitter,
    Youtube,
    Image,
    Video,
    Audio,
    Pdf,
    Link,
}

impl ContentType {
    pub const ALL: [ContentType; 7] = [
        ContentType::Twitter,
        ContentType::Youtube,
        ContentType::Image,
        ContentType::Video,
        ContentType::Audio,
        ContentType::Pdf,
        ContentType::Link,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Twitter => "twitter",
            ContentType::Youtube => "youtube",
            ContentType::Image => "image",
            ContentType::Video => "video",
            ContentType::Audio => "audio",
            ContentType::Pdf => "pdf",
            ContentType::Link => "link",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Saved link owned by exactly one user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentItem {
    pub id: String,
    pub user_id: String,
    pub link: String,
    pub title: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub tags: Vec<String>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row shape of the `contents` table
#[derive(Debug, FromRow)]
pub struct ContentRow {
    pub id: String,
    pub user_id: String,
    pub link: String,
    pub title: String,
    pub content_type: String,
    pub tags: String, // JSON array
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ContentRow> for ContentItem {
    fn from(row: ContentRow) -> Self {
        let content_type = ContentType::parse(&row.content_type).unwrap_or_else(|| {
            log::warn!(
                "Content {} has unknown type '{}', treating as link",
                row.id,
                row.content_type
            );
            ContentType::Link
        });
        let tags = serde_json::from_str(&row.tags).unwrap_or_default();

        Self {
            id: row.id,
            user_id: row.user_id,
            link: row.link,
            title: row.title,
            content_type,
            tags,
            is_public: row.is_public,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Create content request, as received from a client
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateContent {
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "type")]
    pub content_type: Option<String>,
    #[serde(default)]
    pub tags: RawTags,
}

/// Share link: a capability token granting read access to one user's vault
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ShareLink {
    pub id: String,
    pub hash: String,
    pub user_id: String,
    /// Reserved for single-item sharing; never populated by current operations
    pub content_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Result of enabling sharing
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ShareGrant {
    pub hash: String,
    /// false when an existing link was returned unchanged
    pub created: bool,
}

/// Public projection of a content item on a shared vault
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SharedItem {
    pub id: String,
    pub title: String,
    pub link: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub created_at: DateTime<Utc>,
}

impl From<ContentItem> for SharedItem {
    fn from(item: ContentItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            link: item.link,
            content_type: item.content_type,
            created_at: item.created_at,
        }
    }
}

/// A resolved share link: whose vault, what is visible, since when
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SharedVault {
    pub username: String,
    pub content: Vec<SharedItem>,
    pub shared_at: DateTime<Utc>,
}

/// Signup request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Signin request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SigninRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Response to signup / signin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: UserResponse,
}

/// Structured result returned at every boundary
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub status: Status,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            status: Status::Success,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            status: Status::Success,
            message: message.into(),
            data: None,
        }
    }

    pub fn from_error(err: &Error) -> Self {
        Self {
            success: false,
            status: err.status(),
            message: err.public_message(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_roundtrip_names() {
        for t in ContentType::ALL {
            assert_eq!(ContentType::parse(t.as_str()), Some(t));
        }
        assert_eq!(ContentType::parse("YouTube"), Some(ContentType::Youtube));
        assert_eq!(ContentType::parse("podcast"), None);
    }

    #[test]
    fn test_content_row_conversion() {
        let now = Utc::now();
        let row = ContentRow {
            id: "c-1".to_string(),
            user_id: "u-1".to_string(),
            link: "https://youtu.be/x".to_string(),
            title: "Talk".to_string(),
            content_type: "youtube".to_string(),
            tags: r#"["rust","talks"]"#.to_string(),
            is_public: true,
            created_at: now,
            updated_at: now,
        };

        let item = ContentItem::from(row);
        assert_eq!(item.content_type, ContentType::Youtube);
        assert_eq!(item.tags, vec!["rust", "talks"]);
    }

    #[test]
    fn test_user_response_omits_password_hash() {
        let now = Utc::now();
        let user = User {
            id: "u-1".to_string(),
            username: "alice".to_string(),
            password_hash: "$2b$10$abcdef".to_string(),
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_string(&UserResponse::from(user)).unwrap();
        assert!(!json.contains("$2b$"));
        assert!(json.contains("alice"));
    }

    #[test]
    fn test_shared_vault_uses_camel_case() {
        let vault = SharedVault {
            username: "alice".to_string(),
            content: vec![],
            shared_at: Utc::now(),
        };
        let json = serde_json::to_value(&vault).unwrap();
        assert!(json.get("sharedAt").is_some());
    }

    #[test]
    fn test_create_content_accepts_any_tag_shape() {
        let req: CreateContent =
            serde_json::from_str(r#"{"link":"http://x","title":"T","type":"link","tags":42}"#)
                .unwrap();
        assert_eq!(req.tags, RawTags::Other);

        let req: CreateContent = serde_json::from_str(r#"{"link":"http://x"}"#).unwrap();
        assert_eq!(req.tags, RawTags::Other);
        assert!(req.title.is_none());
    }

    #[test]
    fn test_api_response_from_error() {
        let err = Error::not_found("Content not found or not owned by user.");
        let response: ApiResponse<()> = ApiResponse::from_error(&err);
        assert!(!response.success);
        assert_eq!(response.status, Status::NotFound);
        assert_eq!(response.message, "Content not found or not owned by user.");
    }
}
