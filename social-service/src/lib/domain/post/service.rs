use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::EditPostCommand;
use crate::domain::post::models::LikeState;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::ports::PostRepository;
use crate::domain::post::ports::PostServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for post operations.
pub struct PostService<PR>
where
    PR: PostRepository,
{
    repository: Arc<PR>,
}

impl<PR> PostService<PR>
where
    PR: PostRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }

    async fn get_post(&self, id: &PostId) -> Result<Post, PostError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(PostError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl<PR> PostServicePort for PostService<PR>
where
    PR: PostRepository,
{
    async fn create_post(&self, command: CreatePostCommand) -> Result<Post, PostError> {
        let post = Post {
            id: PostId::new(),
            author: command.author,
            content: command.content,
            likers: Vec::new(),
            created_at: Utc::now(),
        };

        let created = self.repository.create(post).await?;
        tracing::info!(post_id = %created.id, author = %created.author, "Post created");

        Ok(created)
    }

    async fn get_editable_post(&self, id: &PostId, editor: &UserId) -> Result<Post, PostError> {
        let post = self.get_post(id).await?;

        if !post.is_authored_by(editor) {
            return Err(PostError::NotAuthor {
                post_id: id.to_string(),
                user_id: editor.to_string(),
            });
        }

        Ok(post)
    }

    async fn list_posts_by_author(&self, author: &UserId) -> Result<Vec<Post>, PostError> {
        self.repository.list_by_author(author).await
    }

    async fn edit_post(&self, command: EditPostCommand) -> Result<(), PostError> {
        let post = self
            .get_editable_post(&command.post_id, &command.editor)
            .await?;

        self.repository
            .update_content(&post.id, &command.content)
            .await?;
        tracing::info!(post_id = %post.id, editor = %command.editor, "Post edited");

        Ok(())
    }

    async fn toggle_like(&self, id: &PostId, user: &UserId) -> Result<LikeState, PostError> {
        let state = self.repository.toggle_like(id, user).await?;
        tracing::info!(post_id = %id, user_id = %user, state = ?state, "Like toggled");

        Ok(state)
    }
}
