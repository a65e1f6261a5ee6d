use async_trait::async_trait;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::PictureUpload;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::models::EmailAddress;
use crate::user::models::Username;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Arguments
    /// * `command` - Validated signup fields; the password is hashed here
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `AlreadyExists` - Username or email is already registered
    /// * `Password` - Hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Retrieve user by unique username.
    ///
    /// # Errors
    /// * `NotFoundByUsername` - No user with this username
    /// * `DatabaseError` - Database operation failed
    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserError>;

    /// Store an uploaded picture and make it the user's profile picture.
    ///
    /// # Returns
    /// Updated user entity
    ///
    /// # Errors
    /// * `StorageError` - Picture could not be written
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_profile_picture(
        &self,
        id: &UserId,
        upload: PictureUpload,
    ) -> Result<User, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `AlreadyExists` - Username or email collides with a stored user
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier, with its post list.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by username, with its post list.
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Retrieve any user whose username or email matches.
    async fn find_by_username_or_email(
        &self,
        username: &Username,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserError>;

    /// Replace the stored profile picture file name.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn set_profile_picture(&self, id: &UserId, file_name: &str) -> Result<(), UserError>;
}

/// Server-managed storage for uploaded profile pictures.
#[async_trait]
pub trait PictureStorage: Send + Sync + 'static {
    /// Persist the picture under a freshly generated file name.
    ///
    /// # Returns
    /// The generated file name
    ///
    /// # Errors
    /// * `StorageError` - Write failed
    async fn store(&self, upload: &PictureUpload) -> Result<String, UserError>;

    /// Delete a previously stored picture.
    ///
    /// # Errors
    /// * `StorageError` - Delete failed
    async fn remove(&self, file_name: &str) -> Result<(), UserError>;
}
