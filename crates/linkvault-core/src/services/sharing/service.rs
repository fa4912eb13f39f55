//! Share link business logic
//!
//! A user is either unshared or has exactly one whole-vault link. The hash is
//! drawn from the thread RNG; it guards a low-value read-only view by being
//! hard to guess, not by being a password.

use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

use super::repository::ShareLinkRepository;
use crate::auth::Identity;
use crate::error::{Error, Result};
use crate::models::{ShareGrant, ShareLink, SharedItem, SharedVault};
use crate::services::accounts::UserRepository;
use crate::services::content::ContentRepository;

/// Length of a share hash
pub const SHARE_HASH_LEN: usize = 10;

const SHARE_HASH_ALPHABET: &[u8] = b"1234567890qwertyuiopasdfghjklzxcvbnm";

const INVALID_LINK: &str = "The share link is invalid or has expired";
const OWNER_MISSING: &str = "The owner of this content could not be found";

/// Draw a random share hash of `len` characters
pub fn generate_share_hash(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| SHARE_HASH_ALPHABET[rng.gen_range(0..SHARE_HASH_ALPHABET.len())] as char)
        .collect()
}

fn is_well_formed_hash(hash: &str) -> bool {
    hash.len() == SHARE_HASH_LEN && hash.bytes().all(|b| SHARE_HASH_ALPHABET.contains(&b))
}

/// Turn sharing on; reuses the caller's existing link if there is one
pub async fn enable_sharing<S: ShareLinkRepository>(
    repo: &S,
    identity: &Identity,
) -> Result<ShareGrant> {
    let owner = identity.user_id();

    if let Some(existing) = repo.find_by_owner(owner).await? {
        return Ok(ShareGrant {
            hash: existing.hash,
            created: false,
        });
    }

    let candidate = ShareLink {
        id: Uuid::new_v4().to_string(),
        hash: generate_share_hash(SHARE_HASH_LEN),
        user_id: owner.to_string(),
        content_id: None,
        created_at: Utc::now(),
    };

    // A concurrent enable may have won the race; then its link is returned instead
    let (link, created) = repo.insert_if_absent(&candidate).await?;
    if created {
        log::info!("Sharing enabled for user {}", owner);
        log::debug!("Share hash for user {}: {}", owner, link.hash);
    }

    Ok(ShareGrant {
        hash: link.hash,
        created,
    })
}

/// Turn sharing off; `NotFound` when there was nothing to disable
pub async fn disable_sharing<S: ShareLinkRepository>(repo: &S, identity: &Identity) -> Result<()> {
    if !repo.delete_by_owner(identity.user_id()).await? {
        return Err(Error::not_found("No active share link found to disable"));
    }
    log::info!("Sharing disabled for user {}", identity.user_id());
    Ok(())
}

/// Resolve a share hash to the owner's public items, newest first.
///
/// Needs no identity. Malformed and unregistered hashes fail identically.
pub async fn resolve_share<S, U, C>(
    shares: &S,
    users: &U,
    contents: &C,
    hash: &str,
) -> Result<SharedVault>
where
    S: ShareLinkRepository,
    U: UserRepository,
    C: ContentRepository,
{
    if !is_well_formed_hash(hash) {
        return Err(Error::not_found(INVALID_LINK));
    }

    let link = shares
        .find_by_hash(hash)
        .await?
        .ok_or_else(|| Error::not_found(INVALID_LINK))?;

    let owner = users.find_by_id(&link.user_id).await?.ok_or_else(|| {
        log::warn!("Share link {} points at missing user {}", link.id, link.user_id);
        Error::not_found(OWNER_MISSING)
    })?;

    let content = contents
        .list_public_by_owner(&link.user_id)
        .await?
        .into_iter()
        .map(SharedItem::from)
        .collect();

    Ok(SharedVault {
        username: owner.username,
        content,
        shared_at: link.created_at,
    })
}
