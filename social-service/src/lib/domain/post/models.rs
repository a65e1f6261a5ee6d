use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::post::errors::PostIdError;
use crate::domain::user::models::UserId;

/// Post unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostId(pub Uuid);

impl PostId {
    /// Generate a new random post ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a post ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, PostIdError> {
        Uuid::parse_str(s)
            .map(PostId)
            .map_err(|e| PostIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for PostId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Post aggregate.
///
/// `likers` behaves as a set: a user appears at most once.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: PostId,
    pub author: UserId,
    pub content: String,
    pub likers: Vec<UserId>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn is_authored_by(&self, user_id: &UserId) -> bool {
        self.author == *user_id
    }

    pub fn is_liked_by(&self, user_id: &UserId) -> bool {
        self.likers.contains(user_id)
    }

    pub fn like_count(&self) -> usize {
        self.likers.len()
    }
}

/// Command to publish a new post
#[derive(Debug)]
pub struct CreatePostCommand {
    pub author: UserId,
    pub content: String,
}

/// Command to overwrite a post's content
#[derive(Debug)]
pub struct EditPostCommand {
    pub post_id: PostId,
    pub editor: UserId,
    pub content: String,
}

/// Outcome of a like toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeState {
    Liked,
    Unliked,
}
