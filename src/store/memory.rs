use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Blog, BlogPatch, BlogStore, NewBlog, User, UserStore};

/// In-memory store with the same semantics as [`super::PgStore`], including the
/// unique-email constraint. Used by `AppState::fake()` and the test suite.
#[derive(Default)]
pub struct MemStore {
    users: RwLock<HashMap<Uuid, User>>,
    blogs: RwLock<HashMap<Uuid, Blog>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemStore {
    async fn create_user(&self, email: &str, password_hash: &str) -> anyhow::Result<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == email) {
            anyhow::bail!("duplicate email");
        }
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl BlogStore for MemStore {
    async fn list_blogs(&self) -> anyhow::Result<Vec<Blog>> {
        let blogs = self.blogs.read().await;
        Ok(blogs.values().cloned().collect())
    }

    async fn get_blog(&self, id: Uuid) -> anyhow::Result<Option<Blog>> {
        let blogs = self.blogs.read().await;
        Ok(blogs.get(&id).cloned())
    }

    async fn create_blog(&self, new: NewBlog) -> anyhow::Result<Blog> {
        let blog = Blog {
            id: Uuid::new_v4(),
            title: new.title,
            content: new.content,
            author: Some(new.author),
            date: new.date,
            created_at: OffsetDateTime::now_utc(),
        };
        self.blogs.write().await.insert(blog.id, blog.clone());
        Ok(blog)
    }

    async fn update_blog(&self, id: Uuid, patch: BlogPatch) -> anyhow::Result<Option<Blog>> {
        let mut blogs = self.blogs.write().await;
        let Some(blog) = blogs.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = patch.title {
            blog.title = title;
        }
        if let Some(content) = patch.content {
            blog.content = content;
        }
        if let Some(author) = patch.author {
            blog.author = Some(author);
        }
        if let Some(date) = patch.date {
            blog.date = date;
        }
        Ok(Some(blog.clone()))
    }

    async fn delete_blog(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.blogs.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn sample_blog() -> NewBlog {
        NewBlog {
            title: "Hi".into(),
            content: "Body".into(),
            author: "u1".into(),
            date: date!(2024 - 01 - 01),
        }
    }

    #[tokio::test]
    async fn create_then_get_roundtrip() {
        let store = MemStore::new();
        let created = store.create_blog(sample_blog()).await.unwrap();
        let fetched = store.get_blog(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "Hi");
        assert_eq!(fetched.content, "Body");
        assert_eq!(fetched.author.as_deref(), Some("u1"));
        assert_eq!(fetched.date, date!(2024 - 01 - 01));
    }

    #[tokio::test]
    async fn partial_update_preserves_unspecified_fields() {
        let store = MemStore::new();
        let created = store.create_blog(sample_blog()).await.unwrap();

        let patch = BlogPatch {
            title: Some("New title".into()),
            ..Default::default()
        };
        let updated = store.update_blog(created.id, patch).await.unwrap().unwrap();
        assert_eq!(updated.title, "New title");
        assert_eq!(updated.content, "Body");
        assert_eq!(updated.author.as_deref(), Some("u1"));
        assert_eq!(updated.date, created.date);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn update_unknown_id_is_none() {
        let store = MemStore::new();
        let result = store
            .update_blog(Uuid::new_v4(), BlogPatch::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_then_get_is_gone() {
        let store = MemStore::new();
        let created = store.create_blog(sample_blog()).await.unwrap();
        assert!(store.delete_blog(created.id).await.unwrap());
        assert!(store.get_blog(created.id).await.unwrap().is_none());
        assert!(!store.delete_blog(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = MemStore::new();
        store.create_user("a@x.com", "hash").await.unwrap();
        assert!(store.create_user("a@x.com", "hash").await.is_err());
    }
}
