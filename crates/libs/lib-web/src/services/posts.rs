//! # Post Service
//!
//! Posts carry a snapshot of the author's name and avatar taken when they
//! are written. Only the author may delete a post.

use crate::services::auth::USER_NOT_FOUND;
use lib_core::model::parse_id;
use lib_core::model::store::{Post, PostForCreate, PostRepository, UserRepository};
use lib_core::{AppError, DbPool, Result};
use tracing::{info, instrument, warn};

pub const POST_NOT_FOUND: &str = "Post Not Found";
pub const NOT_AUTHORIZED: &str = "User Not Authorized";

pub struct PostService {
    pool: DbPool,
}

impl PostService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Publish `text` as `user_id`. `text` must already be validated.
    #[instrument(skip(self, text))]
    pub async fn create(&self, user_id: &str, text: String) -> Result<Post> {
        let author = UserRepository::find_by_id(&self.pool, user_id)
            .await?
            .ok_or_else(|| {
                warn!("[POSTS] Author {} no longer exists", user_id);
                AppError::NotFound(USER_NOT_FOUND.to_string())
            })?;

        let post = PostRepository::create(&self.pool, PostForCreate::by(&author, text)).await?;
        info!("[POSTS] User {} created post {}", author.id, post.id);
        Ok(post)
    }

    pub async fn list(&self) -> Result<Vec<Post>> {
        Ok(PostRepository::list_newest_first(&self.pool).await?)
    }

    /// Look up a post by its raw path id.
    pub async fn get(&self, raw_id: &str) -> Result<Post> {
        let id = parse_id(raw_id).ok_or_else(|| AppError::InvalidId(POST_NOT_FOUND.to_string()))?;

        PostRepository::find_by_id(&self.pool, &id)
            .await?
            .ok_or_else(|| AppError::NotFound(POST_NOT_FOUND.to_string()))
    }

    /// Delete a post on behalf of `user_id`, who must be its author.
    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: &str, raw_id: &str) -> Result<()> {
        let post = self.get(raw_id).await?;
        self.remove_owned(user_id, &post).await
    }

    /// Remove an already loaded `post` if `user_id` wrote it.
    ///
    /// A post that vanished since it was loaded (a concurrent delete) is
    /// reported as not found.
    async fn remove_owned(&self, user_id: &str, post: &Post) -> Result<()> {
        if post.user_id != user_id {
            warn!("[POSTS] User {} tried to delete post {} by {}", user_id, post.id, post.user_id);
            return Err(AppError::Unauthorized(NOT_AUTHORIZED.to_string()));
        }

        if !PostRepository::delete(&self.pool, &post.id).await? {
            warn!("[POSTS] Post {} was already gone", post.id);
            return Err(AppError::NotFound(POST_NOT_FOUND.to_string()));
        }

        info!("[POSTS] Post {} removed", post.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{seed_user, setup_test_db};

    #[tokio::test]
    async fn test_create_snapshots_current_author() {
        let pool = setup_test_db().await;
        let author = seed_user(&pool, "Alice", "alice@example.com", "secret1").await;
        let service = PostService::new(pool);

        let post = service.create(&author.id, "hello".into()).await.unwrap();

        assert_eq!(post.user_id, author.id);
        assert_eq!(post.name, "Alice");
    }

    #[tokio::test]
    async fn test_create_for_missing_author() {
        let service = PostService::new(setup_test_db().await);

        let result = service
            .create("0b7e7dbe-6f53-4d0e-9d0a-3a3c51a0b1f2", "hello".into())
            .await;

        assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == USER_NOT_FOUND));
    }

    #[tokio::test]
    async fn test_get_malformed_id() {
        let service = PostService::new(setup_test_db().await);

        assert!(matches!(service.get("not-an-id").await, Err(AppError::InvalidId(_))));
    }

    #[tokio::test]
    async fn test_delete_by_non_author_keeps_post() {
        let pool = setup_test_db().await;
        let alice = seed_user(&pool, "Alice", "alice@example.com", "secret1").await;
        let bob = seed_user(&pool, "Bob", "bob@example.com", "secret2").await;
        let service = PostService::new(pool);
        let post = service.create(&alice.id, "mine".into()).await.unwrap();

        let result = service.delete(&bob.id, &post.id).await;

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
        assert!(service.get(&post.id).await.is_ok());

        service.delete(&alice.id, &post.id).await.unwrap();
        assert!(matches!(service.get(&post.id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_of_post_removed_meanwhile_is_not_found() {
        let pool = setup_test_db().await;
        let alice = seed_user(&pool, "Alice", "alice@example.com", "secret1").await;
        let service = PostService::new(pool.clone());
        let post = service.create(&alice.id, "racy".into()).await.unwrap();

        // Another request deletes the post after this one loaded it
        assert!(PostRepository::delete(&pool, &post.id).await.unwrap());
        let result = service.remove_owned(&alice.id, &post).await;

        assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == POST_NOT_FOUND));
    }
}
