//! Unified error handling for linkvault-core

use serde::Serialize;
use thiserror::Error;

/// Outcome classification shared by every boundary (HTTP, CLI)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    InvalidInput,
    Unauthorized,
    NotFound,
    Conflict,
    Internal,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::InvalidInput => "invalid_input",
            Status::Unauthorized => "unauthorized",
            Status::NotFound => "not_found",
            Status::Conflict => "conflict",
            Status::Internal => "internal",
        }
    }

    /// HTTP status code for this classification
    pub fn http_code(&self) -> u16 {
        match self {
            Status::Success => 200,
            Status::InvalidInput => 400,
            Status::Unauthorized => 401,
            Status::NotFound => 404,
            Status::Conflict => 409,
            Status::Internal => 500,
        }
    }
}

/// Why a caller was rejected as unauthorized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// No bearer credential in the request
    MissingCredential,
    /// Unknown username or wrong password; the two are never distinguished
    InvalidCredentials,
    /// Token could not be parsed or its signature did not verify
    Malformed,
    /// Token verified but is past its expiry
    Expired,
}

impl AuthFailure {
    pub fn message(&self) -> &'static str {
        match self {
            AuthFailure::MissingCredential => "Authorization header missing.",
            AuthFailure::InvalidCredentials => "Invalid credentials",
            AuthFailure::Malformed => "Invalid token.",
            AuthFailure::Expired => "Token expired.",
        }
    }
}

impl std::fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Core error type for linkvault-core
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Unauthorized: {0}")]
    Unauthorized(AuthFailure),

    #[error("Token signing error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Password hashing error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for linkvault-core
pub type Result<T> = std::result::Result<T, Error>;

const INTERNAL_MESSAGE: &str = "Internal server error";

impl Error {
    /// Create an unauthorized error
    pub fn unauthorized(failure: AuthFailure) -> Self {
        Error::Unauthorized(failure)
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Error::Conflict(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Error::Internal(msg.into())
    }

    /// Classify this error for the caller
    pub fn status(&self) -> Status {
        match self {
            Error::Validation(_) => Status::InvalidInput,
            Error::Unauthorized(_) => Status::Unauthorized,
            Error::NotFound(_) => Status::NotFound,
            Error::Conflict(_) => Status::Conflict,
            Error::Database(_)
            | Error::Jwt(_)
            | Error::Bcrypt(_)
            | Error::Io(_)
            | Error::Json(_)
            | Error::Config(_)
            | Error::Internal(_) => Status::Internal,
        }
    }

    /// The message a caller is allowed to see.
    ///
    /// Store, hashing and configuration faults collapse to a generic message; their
    /// detail stays in `Display` for the logs.
    pub fn public_message(&self) -> String {
        match self {
            Error::Validation(msg) | Error::NotFound(msg) | Error::Conflict(msg) => msg.clone(),
            Error::Unauthorized(failure) => failure.message().to_string(),
            _ => INTERNAL_MESSAGE.to_string(),
        }
    }

    /// The auth failure kind, if this is an unauthorized error
    pub fn auth_failure(&self) -> Option<AuthFailure> {
        match self {
            Error::Unauthorized(failure) => Some(*failure),
            _ => None,
        }
    }
}
