use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// User record as stored, including the password hash.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub avatar: Option<String>,
    pub date: DateTime<Utc>,
}

/// Data structure for creating a new user.
///
/// Password should be hashed before creating.
#[derive(Debug, Clone)]
pub struct UserForCreate {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub avatar: Option<String>,
}

impl UserForCreate {
    /// Create a new `UserForCreate` instance.
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        Self {
            name,
            email,
            password_hash,
            avatar: None,
        }
    }

    /// Set the avatar reference.
    pub fn avatar(mut self, avatar: String) -> Self {
        self.avatar = Some(avatar);
        self
    }
}

/// Post record. `name` and `avatar` are the author's values at creation time.
#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub id: String,
    pub user_id: String,
    pub text: String,
    pub name: String,
    pub avatar: Option<String>,
    pub date: DateTime<Utc>,
}

/// Data structure for creating a new post.
#[derive(Debug, Clone)]
pub struct PostForCreate {
    pub user_id: String,
    pub text: String,
    pub name: String,
    pub avatar: Option<String>,
    /// Creation time; the repository uses "now" when unset.
    pub date: Option<DateTime<Utc>>,
}

impl PostForCreate {
    /// Post authored by `author`, snapshotting their name and avatar.
    pub fn by(author: &User, text: String) -> Self {
        Self {
            user_id: author.id.clone(),
            text,
            name: author.name.clone(),
            avatar: author.avatar.clone(),
            date: None,
        }
    }

    /// Override the creation time.
    pub fn dated(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }
}
