//! CLI commands module
//!
//! Contains all CLI command implementations.

pub mod account;
pub mod content;
pub mod share;

use anyhow::{bail, Result};
use linkvault_core::{AuthFailure, Database, Identity, TokenConfig, TokenService, VaultServices};

use crate::output::OutputFormat;

/// Shared context for all commands
pub struct Context {
    pub db: Database,
    pub format: OutputFormat,
    pub quiet: bool,
    pub token: Option<String>,
}

impl Context {
    /// Services for commands that issue or check tokens; fails without a signing secret
    pub fn services(&self) -> Result<VaultServices> {
        let tokens = TokenService::new(&TokenConfig::from_env()?);
        Ok(VaultServices::new(&self.db, tokens))
    }

    /// Run the auth gate over `--token`, as the server does over the Authorization header
    pub fn identity(&self, services: &VaultServices) -> Result<Identity> {
        let header = self
            .token
            .as_deref()
            .map(|token| format!("Bearer {}", token.trim()));

        match services.gate.authenticate(header.as_deref()) {
            Ok(identity) => Ok(identity),
            Err(err) if err.auth_failure() == Some(AuthFailure::MissingCredential) => {
                bail!("Not signed in. Pass --token or set LINKVAULT_TOKEN (see `linkvault account signin`)")
            }
            Err(err) => Err(err.into()),
        }
    }
}
