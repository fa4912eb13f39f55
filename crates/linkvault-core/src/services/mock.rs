//! In-memory repositories for unit tests

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use super::accounts::repository::{NewUser, USERNAME_TAKEN};
use super::accounts::UserRepository;
use super::content::ContentRepository;
use super::sharing::ShareLinkRepository;
use crate::auth::Identity;
use crate::error::{Error, Result};
use crate::models::{ContentItem, ShareLink, User};

/// One mock standing in for all three tables
#[derive(Default)]
pub struct MockStore {
    users: Mutex<HashMap<String, User>>,
    contents: Mutex<Vec<ContentItem>>,
    shares: Mutex<Vec<ShareLink>>,
    failing: AtomicBool,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following call fail like a dropped connection
    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn with_user(self, id: &str, username: &str) -> Self {
        let now = Utc::now();
        self.users.lock().unwrap().insert(
            id.to_string(),
            User {
                id: id.to_string(),
                username: username.to_string(),
                password_hash: "unused".to_string(),
                created_at: now,
                updated_at: now,
            },
        );
        self
    }

    pub fn share_count(&self, owner: &str) -> usize {
        self.shares
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.user_id == owner)
            .count()
    }

    pub fn content_count(&self) -> usize {
        self.contents.lock().unwrap().len()
    }

    pub fn remove_user(&self, id: &str) {
        self.users.lock().unwrap().remove(id);
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

/// Identity for a user id, as the gate would produce it
pub fn identity(user_id: &str) -> Identity {
    Identity::new(user_id)
}

#[async_trait]
impl UserRepository for MockStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        self.check()?;
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        self.check()?;
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn username_exists(&self, username: &str) -> Result<bool> {
        self.check()?;
        let users = self.users.lock().unwrap();
        Ok(users.values().any(|u| u.username == username))
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.username == new_user.username) {
            return Err(Error::conflict(USERNAME_TAKEN));
        }
        let user = User {
            id: new_user.id.clone(),
            username: new_user.username,
            password_hash: new_user.password_hash,
            created_at: new_user.created_at,
            updated_at: new_user.created_at,
        };
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn delete_user_cascade(&self, id: &str) -> Result<bool> {
        self.check()?;
        self.shares.lock().unwrap().retain(|l| l.user_id != id);
        self.contents.lock().unwrap().retain(|c| c.user_id != id);
        Ok(self.users.lock().unwrap().remove(id).is_some())
    }
}

#[async_trait]
impl ContentRepository for MockStore {
    async fn insert(&self, item: &ContentItem) -> Result<()> {
        self.check()?;
        self.contents.lock().unwrap().push(item.clone());
        Ok(())
    }

    async fn list_by_owner(&self, owner: &str) -> Result<Vec<ContentItem>> {
        self.check()?;
        let contents = self.contents.lock().unwrap();
        Ok(contents.iter().filter(|c| c.user_id == owner).cloned().collect())
    }

    async fn search_by_title(&self, owner: &str, needle: &str) -> Result<Vec<ContentItem>> {
        self.check()?;
        let contents = self.contents.lock().unwrap();
        Ok(contents
            .iter()
            .filter(|c| c.user_id == owner && c.title.contains(needle))
            .cloned()
            .collect())
    }

    async fn list_public_by_owner(&self, owner: &str) -> Result<Vec<ContentItem>> {
        self.check()?;
        let contents = self.contents.lock().unwrap();
        let mut items: Vec<ContentItem> = contents
            .iter()
            .filter(|c| c.user_id == owner && c.is_public)
            .cloned()
            .collect();
        items.reverse();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn find_owned(&self, owner: &str, id: &str) -> Result<Option<ContentItem>> {
        self.check()?;
        let contents = self.contents.lock().unwrap();
        Ok(contents
            .iter()
            .find(|c| c.id == id && c.user_id == owner)
            .cloned())
    }

    async fn delete_owned(&self, owner: &str, id: &str) -> Result<bool> {
        self.check()?;
        let mut contents = self.contents.lock().unwrap();
        let before = contents.len();
        contents.retain(|c| !(c.id == id && c.user_id == owner));
        Ok(contents.len() < before)
    }

    async fn set_visibility(
        &self,
        owner: &str,
        id: &str,
        is_public: bool,
        updated_at: DateTime<Utc>,
    ) -> Result<bool> {
        self.check()?;
        let mut contents = self.contents.lock().unwrap();
        match contents
            .iter_mut()
            .find(|c| c.id == id && c.user_id == owner)
        {
            Some(item) => {
                item.is_public = is_public;
                item.updated_at = updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl ShareLinkRepository for MockStore {
    async fn find_by_owner(&self, owner: &str) -> Result<Option<ShareLink>> {
        self.check()?;
        let shares = self.shares.lock().unwrap();
        Ok(shares.iter().find(|l| l.user_id == owner).cloned())
    }

    async fn find_by_hash(&self, hash: &str) -> Result<Option<ShareLink>> {
        self.check()?;
        let shares = self.shares.lock().unwrap();
        Ok(shares.iter().find(|l| l.hash == hash).cloned())
    }

    async fn insert_if_absent(&self, link: &ShareLink) -> Result<(ShareLink, bool)> {
        self.check()?;
        let mut shares = self.shares.lock().unwrap();
        if let Some(existing) = shares.iter().find(|l| l.user_id == link.user_id) {
            return Ok((existing.clone(), false));
        }
        shares.push(link.clone());
        Ok((link.clone(), true))
    }

    async fn delete_by_owner(&self, owner: &str) -> Result<bool> {
        self.check()?;
        let mut shares = self.shares.lock().unwrap();
        let before = shares.len();
        shares.retain(|l| l.user_id != owner);
        Ok(shares.len() < before)
    }
}
