use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

mod memory;
mod postgres;

pub use memory::MemStore;
pub use postgres::PgStore;

/// User record. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}

/// Blog post record. `author` holds whatever user reference the client sent at
/// creation; it is nullable at the store level and never validated against the
/// users table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: Option<String>,
    pub date: Date,
    #[serde(rename = "createdAt")]
    pub created_at: OffsetDateTime,
}

/// Fields the caller supplies at creation; the store assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewBlog {
    pub title: String,
    pub content: String,
    pub author: String,
    pub date: Date,
}

/// Partial update. A supplied value overrides the stored one, an absent value
/// leaves it untouched.
#[derive(Debug, Clone, Default)]
pub struct BlogPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub date: Option<Date>,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, email: &str, password_hash: &str) -> anyhow::Result<User>;
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
}

#[async_trait]
pub trait BlogStore: Send + Sync {
    /// All posts, store-native order. No pagination.
    async fn list_blogs(&self) -> anyhow::Result<Vec<Blog>>;
    async fn get_blog(&self, id: Uuid) -> anyhow::Result<Option<Blog>>;
    async fn create_blog(&self, new: NewBlog) -> anyhow::Result<Blog>;
    /// Returns `None` when no post has that id.
    async fn update_blog(&self, id: Uuid, patch: BlogPatch) -> anyhow::Result<Option<Blog>>;
    /// Returns `false` when no post had that id.
    async fn delete_blog(&self, id: Uuid) -> anyhow::Result<bool>;
}
