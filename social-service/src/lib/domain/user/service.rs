use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::PictureUpload;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::models::DEFAULT_PROFILE_PICTURE;
use crate::user::errors::UserError;
use crate::user::ports::PictureStorage;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR, PS>
where
    UR: UserRepository,
    PS: PictureStorage,
{
    repository: Arc<UR>,
    picture_storage: Arc<PS>,
    password_hasher: auth::PasswordHasher,
}

impl<UR, PS> UserService<UR, PS>
where
    UR: UserRepository,
    PS: PictureStorage,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `picture_storage` - Where uploaded pictures are written
    /// * `password_hasher` - Configured password hasher
    pub fn new(
        repository: Arc<UR>,
        picture_storage: Arc<PS>,
        password_hasher: auth::PasswordHasher,
    ) -> Self {
        Self {
            repository,
            picture_storage,
            password_hasher,
        }
    }
}

#[async_trait]
impl<UR, PS> UserServicePort for UserService<UR, PS>
where
    UR: UserRepository,
    PS: PictureStorage,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        if let Some(existing) = self
            .repository
            .find_by_username_or_email(&command.username, &command.email)
            .await?
        {
            tracing::info!(
                requested = %command.username,
                existing = %existing.username,
                "Signup rejected: username or email taken"
            );
            return Err(UserError::AlreadyExists);
        }

        let password_hash = self.password_hasher.hash(command.password.expose())?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            age: command.age,
            city: command.city,
            profile_picture: DEFAULT_PROFILE_PICTURE.to_string(),
            posts: Vec::new(),
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            "User created"
        );

        Ok(created_user)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserError> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or(UserError::NotFoundByUsername(username.to_string()))
    }

    async fn update_profile_picture(
        &self,
        id: &UserId,
        upload: PictureUpload,
    ) -> Result<User, UserError> {
        let mut user = self.get_user(id).await?;

        let file_name = self.picture_storage.store(&upload).await?;
        if let Err(err) = self.repository.set_profile_picture(id, &file_name).await {
            // Nothing references the new file once the update has failed.
            if let Err(cleanup) = self.picture_storage.remove(&file_name).await {
                tracing::warn!(
                    file_name = %file_name,
                    error = %cleanup,
                    "Failed to remove orphaned picture"
                );
            }
            return Err(err);
        }
        tracing::info!(user_id = %id, file_name = %file_name, "Profile picture updated");

        user.profile_picture = file_name;
        Ok(user)
    }
}
