//! # Post Data Transfer Objects
//!
//! - `POST /api/posts` - [`CreatePostRequest`] -> [`PostInfo`]
//! - `GET /api/posts` - [`PostInfo`] list, newest first
//! - `GET /api/posts/{id}` - [`PostInfo`]
//! - `DELETE /api/posts/{id}` - [`super::MessageResponse`]

use super::lenient_string;
use crate::model::store::Post;
use lib_utils::format_time;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CreatePostRequest {
    #[serde(deserialize_with = "lenient_string")]
    pub text: String,
}

/// Post as returned to clients. `user` is the author's id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostInfo {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: String,
    pub text: String,
    pub name: String,
    pub avatar: Option<String>,
    pub date: String,
}

impl From<Post> for PostInfo {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            user: post.user_id,
            text: post.text,
            name: post.name,
            avatar: post.avatar,
            date: format_time(post.date),
        }
    }
}
