//! # Post Repository
//!
//! Database access for posts. Listing is newest first; ties on the
//! creation time fall back to insertion order, newest first.

use super::models::{Post, PostForCreate};
use super::DbPool;
use crate::model::new_id;
use lib_utils::{format_time, now_utc};
use sqlx::query_as;

pub struct PostRepository;

impl PostRepository {
    /// Persist a new post and return it as stored.
    pub async fn create(pool: &DbPool, post_data: PostForCreate) -> Result<Post, sqlx::Error> {
        let id = new_id();
        let date = post_data.date.unwrap_or_else(now_utc);

        sqlx::query(
            "INSERT INTO posts (id, user_id, text, name, avatar, date) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&post_data.user_id)
        .bind(&post_data.text)
        .bind(&post_data.name)
        .bind(&post_data.avatar)
        .bind(format_time(date))
        .execute(pool)
        .await?;

        query_as::<_, Post>("SELECT * FROM posts WHERE id = ?")
            .bind(&id)
            .fetch_one(pool)
            .await
    }

    /// All posts, newest first.
    pub async fn list_newest_first(pool: &DbPool) -> Result<Vec<Post>, sqlx::Error> {
        query_as::<_, Post>("SELECT * FROM posts ORDER BY date DESC, rowid DESC")
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &DbPool, id: &str) -> Result<Option<Post>, sqlx::Error> {
        query_as::<_, Post>("SELECT * FROM posts WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a post. Returns `true` if a record was removed.
    pub async fn delete(pool: &DbPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
