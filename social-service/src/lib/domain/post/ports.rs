use async_trait::async_trait;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::EditPostCommand;
use crate::domain::post::models::LikeState;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::user::models::UserId;

/// Port for post domain service operations.
#[async_trait]
pub trait PostServicePort: Send + Sync + 'static {
    /// Publish a post and append it to the author's post list.
    ///
    /// # Errors
    /// * `UnknownUser` - Author does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create_post(&self, command: CreatePostCommand) -> Result<Post, PostError>;

    /// Retrieve a post that `editor` is allowed to modify.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `NotAuthor` - `editor` did not write the post
    async fn get_editable_post(&self, id: &PostId, editor: &UserId) -> Result<Post, PostError>;

    /// Posts written by `author`, oldest first.
    async fn list_posts_by_author(&self, author: &UserId) -> Result<Vec<Post>, PostError>;

    /// Overwrite a post's content. Only the author may do this.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `NotAuthor` - Editor did not write the post; content is left unchanged
    async fn edit_post(&self, command: EditPostCommand) -> Result<(), PostError>;

    /// Like the post if `user` has not liked it yet, otherwise remove the like.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `UnknownUser` - User does not exist
    async fn toggle_like(&self, id: &PostId, user: &UserId) -> Result<LikeState, PostError>;
}

/// Persistence operations for post aggregate.
#[async_trait]
pub trait PostRepository: Send + Sync + 'static {
    /// Persist a new post and link it to its author.
    ///
    /// # Errors
    /// * `UnknownUser` - Author does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, post: Post) -> Result<Post, PostError>;

    /// Retrieve post by identifier, with its likers.
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostError>;

    /// Posts written by `author` in creation order.
    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Post>, PostError>;

    /// Replace a post's content.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    async fn update_content(&self, id: &PostId, content: &str) -> Result<(), PostError>;

    /// Atomically remove `user` from the likers if present, otherwise add it.
    ///
    /// Implementations must not read the liker set and write it back in two
    /// steps; concurrent toggles must never leave a duplicate entry.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `UnknownUser` - User does not exist
    async fn toggle_like(&self, id: &PostId, user: &UserId) -> Result<LikeState, PostError>;
}
