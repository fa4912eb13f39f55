//! Account commands
//!
//! Signup, signin, whoami and account deletion.

use anyhow::{bail, Result};
use clap::Subcommand;
use linkvault_core::services::accounts;
use linkvault_core::{AuthResponse, SigninRequest, SignupRequest, UserResponse};
use serde::Serialize;
use tabled::Tabled;

use super::Context;
use crate::output::{print_info, print_json, print_single, print_success, OutputFormat};

#[derive(Subcommand)]
pub enum AccountAction {
    /// Create an account and print an identity token
    Signup {
        /// Username (3-30 characters, case-insensitive)
        username: String,

        /// Password (at least 6 characters)
        password: String,
    },

    /// Sign in and print an identity token
    Signin {
        username: String,
        password: String,
    },

    /// Show the account the token belongs to
    Whoami,

    /// Delete the account with all its links and its share link
    Delete {
        /// Skip the confirmation guard
        #[arg(short, long)]
        force: bool,
    },
}

/// User row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct UserRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Username")]
    pub username: String,
    #[tabled(rename = "Created")]
    pub created_at: String,
}

impl From<&UserResponse> for UserRow {
    fn from(user: &UserResponse) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            created_at: user.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

pub async fn execute(ctx: &Context, action: AccountAction) -> Result<()> {
    match action {
        AccountAction::Signup { username, password } => {
            let services = ctx.services()?;
            let response = accounts::signup(
                &services.users,
                services.tokens(),
                SignupRequest { username, password },
            )
            .await?;
            print_session(ctx, &response, services.tokens().expires_in())
        }
        AccountAction::Signin { username, password } => {
            let services = ctx.services()?;
            let response = accounts::signin(
                &services.users,
                services.tokens(),
                SigninRequest { username, password },
            )
            .await?;
            print_session(ctx, &response, services.tokens().expires_in())
        }
        AccountAction::Whoami => {
            let services = ctx.services()?;
            let identity = ctx.identity(&services)?;
            let me = accounts::current_user(&services.users, &identity).await?;
            print_single(&me, UserRow::from(&me), ctx.format)
        }
        AccountAction::Delete { force } => {
            if !force {
                bail!("Deleting an account removes all of its links. Re-run with --force to confirm");
            }
            let services = ctx.services()?;
            let identity = ctx.identity(&services)?;
            accounts::delete_account(&services.users, &identity).await?;
            print_success("Account deleted", ctx.quiet);
            Ok(())
        }
    }
}

fn print_session(ctx: &Context, response: &AuthResponse, expires_in: i64) -> Result<()> {
    if ctx.format == OutputFormat::Json {
        return print_json(response);
    }

    // Quiet mode prints the bare token so it can be captured by a shell
    if ctx.quiet {
        println!("{}", response.token);
        return Ok(());
    }

    print_success(&response.message, false);
    print_single(&response.user, UserRow::from(&response.user), ctx.format)?;
    print_info(
        &format!(
            "\nToken (valid {}s):\n  export LINKVAULT_TOKEN={}",
            expires_in, response.token
        ),
        false,
    );
    Ok(())
}
