use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use time::{macros::format_description, Date};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::extractors::AuthUser,
    blogs::dto::{CreateBlogRequest, MessageResponse, UpdateBlogRequest},
    error::ApiError,
    state::AppState,
    store::{Blog, NewBlog},
};

pub fn blog_routes() -> Router<AppState> {
    Router::new()
        .route("/blogs", get(list_blogs))
        .route("/blogs/create", post(create_blog))
        .route(
            "/blogs/:id",
            get(get_blog).put(update_blog).delete(delete_blog),
        )
}

/// Reads are public by design; only mutations require a token.
#[instrument(skip(state))]
pub async fn list_blogs(State(state): State<AppState>) -> Result<Json<Vec<Blog>>, ApiError> {
    let blogs = state.blogs.list_blogs().await?;
    Ok(Json(blogs))
}

#[instrument(skip(state))]
pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Blog>, ApiError> {
    let blog = state
        .blogs
        .get_blog(id)
        .await?
        .ok_or(ApiError::NotFound("Blog"))?;
    Ok(Json(blog))
}

#[instrument(skip(state, payload))]
pub async fn create_blog(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateBlogRequest>,
) -> Result<(StatusCode, Json<Blog>), ApiError> {
    let (title, content, author, date) =
        match (payload.title, payload.content, payload.author, payload.date) {
            (Some(title), Some(content), Some(author), Some(date))
                if !title.trim().is_empty()
                    && !content.trim().is_empty()
                    && !author.trim().is_empty()
                    && !date.trim().is_empty() =>
            {
                (title, content, author, date)
            }
            _ => return Err(ApiError::Validation("Missing required fields".into())),
        };

    let date_format = format_description!("[year]-[month]-[day]");
    let date = Date::parse(date.trim(), date_format)
        .map_err(|_| ApiError::Validation("Invalid date".into()))?;

    let new = NewBlog {
        title,
        content,
        author,
        date,
    };

    // author is stored as supplied and is not checked against the token
    // subject; any authenticated caller may name any author
    let blog = state
        .blogs
        .create_blog(new)
        .await
        .context("Failed to create blog")?;

    info!(blog_id = %blog.id, user_id = %user_id, "blog created");
    Ok((StatusCode::CREATED, Json(blog)))
}

#[instrument(skip(state, payload))]
pub async fn update_blog(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBlogRequest>,
) -> Result<Json<Blog>, ApiError> {
    // no ownership check: any authenticated user may update any post
    let blog = state
        .blogs
        .update_blog(id, payload.into())
        .await?
        .ok_or(ApiError::NotFound("Blog"))?;

    info!(blog_id = %blog.id, user_id = %user_id, "blog updated");
    Ok(Json(blog))
}

#[instrument(skip(state))]
pub async fn delete_blog(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    // no ownership check here either
    let deleted = state.blogs.delete_blog(id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Blog"));
    }

    info!(blog_id = %id, user_id = %user_id, "blog deleted");
    Ok(Json(MessageResponse {
        message: "Blog deleted successfully",
    }))
}
