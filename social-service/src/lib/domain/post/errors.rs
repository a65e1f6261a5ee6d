use thiserror::Error;

/// Error for PostId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for all post-related operations
#[derive(Debug, Clone, Error)]
pub enum PostError {
    #[error("Invalid post ID: {0}")]
    InvalidPostId(#[from] PostIdError),

    #[error("Post not found: {0}")]
    NotFound(String),

    /// The acting user is not the post's author.
    #[error("User {user_id} is not the author of post {post_id}")]
    NotAuthor { post_id: String, user_id: String },

    /// The acting identity no longer resolves to a stored user.
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
