use serde::{Deserialize, Serialize};
use time::Date;

use crate::store::BlogPatch;

/// Request body for blog creation. Every field is optional at the parse stage
/// so a missing one yields a 400 validation error instead of a body rejection.
/// `date` stays a raw string for the same reason: an empty or unparseable
/// value is a validation error, not a rejected body.
#[derive(Debug, Deserialize)]
pub struct CreateBlogRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
}

/// Request body for a partial update; absent fields keep their stored value.
#[derive(Debug, Deserialize)]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub date: Option<Date>,
}

impl From<UpdateBlogRequest> for BlogPatch {
    fn from(req: UpdateBlogRequest) -> Self {
        BlogPatch {
            title: req.title,
            content: req.content,
            author: req.author,
            date: req.date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
