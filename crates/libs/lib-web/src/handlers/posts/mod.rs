//! # Post Handlers
//!
//! Reading posts is public; writing and deleting need a token.
//! Ids in the path that are not well-formed answer like missing posts.

use crate::handlers::FieldChecks;
use crate::middleware::{AuthUser, JsonBody};
use crate::services::PostService;
use axum::extract::{Json, Path, State};
use lib_core::dto::{CreatePostRequest, MessageResponse, PostInfo};
use lib_core::{DbPool, Result};
use lib_utils::validate_not_empty;
use tracing::{debug, instrument};

/// Publish a post as the caller.
#[instrument(skip_all, fields(user_id = %auth.user_id))]
pub async fn create_post(
    State(pool): State<DbPool>,
    auth: AuthUser,
    JsonBody(req): JsonBody<CreatePostRequest>,
) -> Result<Json<PostInfo>> {
    let mut checks = FieldChecks::new();
    checks.check("text", &req.text, validate_not_empty(&req.text, "Text is required"));
    checks.finish()?;

    let post = PostService::new(pool).create(&auth.user_id, req.text).await?;

    Ok(Json(PostInfo::from(post)))
}

/// All posts, newest first.
pub async fn list_posts(State(pool): State<DbPool>) -> Result<Json<Vec<PostInfo>>> {
    let posts = PostService::new(pool).list().await?;
    debug!("[POSTS] Listing {} post(s)", posts.len());

    Ok(Json(posts.into_iter().map(PostInfo::from).collect()))
}

pub async fn get_post(State(pool): State<DbPool>, Path(id): Path<String>) -> Result<Json<PostInfo>> {
    let post = PostService::new(pool).get(&id).await?;

    Ok(Json(PostInfo::from(post)))
}

/// Delete one of the caller's own posts.
#[instrument(skip(pool), fields(user_id = %auth.user_id))]
pub async fn delete_post(
    State(pool): State<DbPool>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    PostService::new(pool).delete(&auth.user_id, &id).await?;

    Ok(Json(MessageResponse::new("Post removed")))
}
