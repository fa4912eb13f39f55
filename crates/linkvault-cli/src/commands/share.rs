//! Share commands
//!
//! Turn the share link on or off, and view a shared vault by its hash.

use anyhow::Result;
use clap::Subcommand;
use linkvault_core::services::sharing;
use linkvault_core::{
    SharedItem, SqliteContentRepository, SqliteShareLinkRepository, SqliteUserRepository,
};
use serde::Serialize;
use tabled::Tabled;

use super::Context;
use crate::output::{
    print_info, print_json, print_rows, print_success, print_warning, truncate, OutputFormat,
};

#[derive(Subcommand)]
pub enum ShareAction {
    /// Create a share link for your vault, or print the existing one
    Enable,

    /// Revoke your share link
    Disable,

    /// Show the public links behind a share hash (no sign-in needed)
    Show {
        /// The 10-character share hash
        hash: String,
    },
}

/// Shared item row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct SharedRow {
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Type")]
    pub content_type: String,
    #[tabled(rename = "Link")]
    pub link: String,
    #[tabled(rename = "Saved")]
    pub created_at: String,
}

impl From<&SharedItem> for SharedRow {
    fn from(item: &SharedItem) -> Self {
        Self {
            title: truncate(&item.title, 40),
            content_type: item.content_type.to_string(),
            link: truncate(&item.link, 56),
            created_at: item.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

pub async fn execute(ctx: &Context, action: ShareAction) -> Result<()> {
    match action {
        ShareAction::Enable => {
            let services = ctx.services()?;
            let identity = ctx.identity(&services)?;
            let grant = sharing::enable_sharing(&services.shares, &identity).await?;

            if ctx.format == OutputFormat::Json {
                return print_json(&grant);
            }
            if ctx.quiet {
                println!("{}", grant.hash);
                return Ok(());
            }

            let message = if grant.created {
                "Sharing enabled successfully"
            } else {
                "Using existing share link"
            };
            print_success(message, false);
            print_info(&format!("Share hash: {}", grant.hash), false);
            print_warning("Anyone holding this hash can read your public links.");
            Ok(())
        }
        ShareAction::Disable => {
            let services = ctx.services()?;
            let identity = ctx.identity(&services)?;
            sharing::disable_sharing(&services.shares, &identity).await?;
            print_success("Sharing disabled successfully", ctx.quiet);
            Ok(())
        }
        ShareAction::Show { hash } => {
            // Public read: no token service, so no signing secret required
            let pool = &ctx.db.pool;
            let vault = sharing::resolve_share(
                &SqliteShareLinkRepository::new(pool.clone()),
                &SqliteUserRepository::new(pool.clone()),
                &SqliteContentRepository::new(pool.clone()),
                hash.trim(),
            )
            .await?;

            if ctx.format == OutputFormat::Table {
                print_info(
                    &format!(
                        "Shared by {} since {}",
                        vault.username,
                        vault.shared_at.format("%Y-%m-%d")
                    ),
                    ctx.quiet,
                );
            }
            let rows: Vec<SharedRow> = vault.content.iter().map(SharedRow::from).collect();
            print_rows(&vault, &rows, ctx.format)
        }
    }
}
