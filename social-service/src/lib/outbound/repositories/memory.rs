use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::LikeState;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::ports::PostRepository;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// In-process store implementing both repository ports.
///
/// Users and posts share one lock so that linking a post to its author and
/// toggling a like are single critical sections. Clones share the same data.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<RwLock<State>>,
}

#[derive(Default)]
struct State {
    users: HashMap<UserId, User>,
    posts: HashMap<PostId, Post>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut state = self.state.write().await;

        let taken = state
            .users
            .values()
            .any(|u| u.username == user.username || u.email == user.email);
        if taken {
            return Err(UserError::AlreadyExists);
        }

        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.state.read().await.users.get(id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|u| u.username == *username)
            .cloned())
    }

    async fn find_by_username_or_email(
        &self,
        username: &Username,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|u| u.username == *username || u.email == *email)
            .cloned())
    }

    async fn set_profile_picture(&self, id: &UserId, file_name: &str) -> Result<(), UserError> {
        let mut state = self.state.write().await;
        let user = state
            .users
            .get_mut(id)
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;

        user.profile_picture = file_name.to_string();
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryRepository {
    async fn create(&self, post: Post) -> Result<Post, PostError> {
        let mut state = self.state.write().await;

        let author = state
            .users
            .get_mut(&post.author)
            .ok_or_else(|| PostError::UnknownUser(post.author.to_string()))?;
        author.posts.push(post.id);

        state.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostError> {
        Ok(self.state.read().await.posts.get(id).cloned())
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Post>, PostError> {
        let state = self.state.read().await;

        let Some(user) = state.users.get(author) else {
            return Ok(Vec::new());
        };

        Ok(user
            .posts
            .iter()
            .filter_map(|id| state.posts.get(id).cloned())
            .collect())
    }

    async fn update_content(&self, id: &PostId, content: &str) -> Result<(), PostError> {
        let mut state = self.state.write().await;
        let post = state
            .posts
            .get_mut(id)
            .ok_or_else(|| PostError::NotFound(id.to_string()))?;

        post.content = content.to_string();
        Ok(())
    }

    async fn toggle_like(&self, id: &PostId, user: &UserId) -> Result<LikeState, PostError> {
        let mut state = self.state.write().await;

        if !state.users.contains_key(user) {
            return Err(PostError::UnknownUser(user.to_string()));
        }
        let post = state
            .posts
            .get_mut(id)
            .ok_or_else(|| PostError::NotFound(id.to_string()))?;

        match post.likers.iter().position(|liker| liker == user) {
            Some(index) => {
                post.likers.remove(index);
                Ok(LikeState::Unliked)
            }
            None => {
                post.likers.push(*user);
                Ok(LikeState::Liked)
            }
        }
    }
}
