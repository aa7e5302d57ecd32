use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{Blog, BlogPatch, BlogStore, NewBlog, User, UserStore};

/// Postgres-backed store for users and blog posts.
#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, email: &str, password_hash: &str) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }
}

#[async_trait]
impl BlogStore for PgStore {
    async fn list_blogs(&self) -> anyhow::Result<Vec<Blog>> {
        let rows = sqlx::query_as::<_, Blog>(
            r#"
            SELECT id, title, content, author, date, created_at
            FROM blogs
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn get_blog(&self, id: Uuid) -> anyhow::Result<Option<Blog>> {
        let blog = sqlx::query_as::<_, Blog>(
            r#"
            SELECT id, title, content, author, date, created_at
            FROM blogs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(blog)
    }

    async fn create_blog(&self, new: NewBlog) -> anyhow::Result<Blog> {
        let blog = sqlx::query_as::<_, Blog>(
            r#"
            INSERT INTO blogs (title, content, author, date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, content, author, date, created_at
            "#,
        )
        .bind(new.title)
        .bind(new.content)
        .bind(new.author)
        .bind(new.date)
        .fetch_one(&self.db)
        .await?;
        Ok(blog)
    }

    async fn update_blog(&self, id: Uuid, patch: BlogPatch) -> anyhow::Result<Option<Blog>> {
        // COALESCE keeps the stored value for every field the patch omits.
        let blog = sqlx::query_as::<_, Blog>(
            r#"
            UPDATE blogs
            SET title   = COALESCE($2, title),
                content = COALESCE($3, content),
                author  = COALESCE($4, author),
                date    = COALESCE($5, date)
            WHERE id = $1
            RETURNING id, title, content, author, date, created_at
            "#,
        )
        .bind(id)
        .bind(patch.title)
        .bind(patch.content)
        .bind(patch.author)
        .bind(patch.date)
        .fetch_optional(&self.db)
        .await?;
        Ok(blog)
    }

    async fn delete_blog(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
