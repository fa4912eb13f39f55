//! Content commands
//!
//! Add, list, search, delete and hide/show saved links.

use anyhow::Result;
use clap::{ArgGroup, Subcommand};
use linkvault_core::services::content;
use linkvault_core::{ContentItem, CreateContent, RawTags};
use serde::Serialize;
use tabled::Tabled;

use super::Context;
use crate::output::{print_rows, print_single, print_success, truncate};

#[derive(Subcommand)]
pub enum ContentAction {
    /// Save a link
    Add {
        /// The URL to save
        #[arg(short, long)]
        link: String,

        /// Display title
        #[arg(short, long)]
        title: String,

        /// twitter, youtube, image, video, audio, pdf or link
        #[arg(long = "type", value_name = "TYPE")]
        content_type: String,

        /// Comma-separated tags, or a JSON array of strings
        #[arg(long)]
        tags: Option<String>,
    },

    /// List every saved link
    List,

    /// Find saved links whose title contains QUERY (case-sensitive)
    Search {
        #[arg(default_value = "")]
        query: String,
    },

    /// Delete a saved link
    Delete {
        /// Content ID
        id: String,
    },

    /// Show or hide a link on your shared vault
    #[command(group(ArgGroup::new("state").required(true).args(["public", "private"])))]
    Visibility {
        /// Content ID
        id: String,

        /// Show on the shared vault
        #[arg(long)]
        public: bool,

        /// Hide from the shared vault
        #[arg(long)]
        private: bool,
    },
}

/// Content row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct ContentRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Type")]
    pub content_type: String,
    #[tabled(rename = "Link")]
    pub link: String,
    #[tabled(rename = "Tags")]
    pub tags: String,
    #[tabled(rename = "Public")]
    pub public: String,
    #[tabled(rename = "Saved")]
    pub created_at: String,
}

impl From<&ContentItem> for ContentRow {
    fn from(item: &ContentItem) -> Self {
        Self {
            id: item.id.clone(),
            title: truncate(&item.title, 40),
            content_type: item.content_type.to_string(),
            link: truncate(&item.link, 48),
            tags: item.tags.join(", "),
            public: if item.is_public { "yes" } else { "no" }.to_string(),
            created_at: item.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

pub async fn execute(ctx: &Context, action: ContentAction) -> Result<()> {
    let services = ctx.services()?;
    let identity = ctx.identity(&services)?;
    let repo = &services.contents;

    match action {
        ContentAction::Add { link, title, content_type, tags } => {
            let request = CreateContent {
                link: Some(link),
                title: Some(title),
                content_type: Some(content_type),
                tags: tags.map(RawTags::Text).unwrap_or_default(),
            };
            let item = content::create_content(repo, &identity, request).await?;
            print_success("Content added successfully", ctx.quiet);
            if !ctx.quiet {
                print_single(&item, ContentRow::from(&item), ctx.format)?;
            }
            Ok(())
        }
        ContentAction::List => {
            let items = content::list_content(repo, &identity).await?;
            print_items(ctx, &items)
        }
        ContentAction::Search { query } => {
            let items = content::search_content(repo, &identity, &query).await?;
            print_items(ctx, &items)
        }
        ContentAction::Delete { id } => {
            let title = content::delete_content(repo, &identity, &id).await?;
            print_success(&format!("Deleted \"{}\"", title), ctx.quiet);
            Ok(())
        }
        ContentAction::Visibility { id, public, .. } => {
            let item = content::set_visibility(repo, &identity, &id, public).await?;
            let state = if item.is_public { "public" } else { "private" };
            print_success(&format!("\"{}\" is now {}", item.title, state), ctx.quiet);
            Ok(())
        }
    }
}

fn print_items(ctx: &Context, items: &[ContentItem]) -> Result<()> {
    let rows: Vec<ContentRow> = items.iter().map(ContentRow::from).collect();
    print_rows(items, &rows, ctx.format)
}
