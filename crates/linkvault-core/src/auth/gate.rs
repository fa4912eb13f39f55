//! Auth gate - turns request authorization metadata into a verified identity

use serde::Serialize;

use super::token::TokenService;
use crate::error::{AuthFailure, Error, Result};

/// Proof that the caller presented a valid identity token.
///
/// Only [`AuthGate::authenticate`] constructs one, so any owner-scoped
/// operation taking an `&Identity` has passed the gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    user_id: String,
}

impl Identity {
    pub(crate) fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` value
pub fn extract_bearer(authorization: Option<&str>) -> Result<&str> {
    let missing = || Error::unauthorized(AuthFailure::MissingCredential);

    let value = authorization.map(str::trim).filter(|v| !v.is_empty()).ok_or_else(missing)?;
    let (scheme, token) = value.split_once(' ').ok_or_else(missing)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(missing());
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(missing());
    }
    Ok(token)
}

/// Request-boundary guard in front of every owner-scoped operation
#[derive(Clone)]
pub struct AuthGate {
    tokens: TokenService,
}

impl AuthGate {
    pub fn new(tokens: TokenService) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Check the authorization value and bind the caller's identity
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<Identity> {
        let token = extract_bearer(authorization)?;
        let user_id = self.tokens.verify(token)?;
        Ok(Identity::new(user_id))
    }
}
