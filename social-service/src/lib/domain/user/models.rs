use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use email_address::Options;
use uuid::Uuid;

use crate::domain::post::models::PostId;
use crate::user::errors::AgeError;
use crate::user::errors::CityError;
use crate::user::errors::EmailError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::UserIdError;
use crate::user::errors::UsernameError;

/// Picture every account starts with until one is uploaded.
pub const DEFAULT_PROFILE_PICTURE: &str = "default.svg";

/// User aggregate entity.
///
/// Represents a registered account together with the ordered list of posts it
/// authored.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub age: Age,
    pub city: City,
    pub profile_picture: String,
    pub posts: Vec<PostId>,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Arguments
    /// * `s` - UUID string to parse
    ///
    /// # Returns
    /// Parsed UserId
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Ensures username is at least 3 characters long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        Ok(Self(username))
    }

    /// Get username as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Holds only the bare `local@domain` form: display text and domain literals
/// are rejected and the domain must carry a top-level part, so one mailbox
/// has a single stored spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Returns
    /// Validated EmailAddress value object
    ///
    /// # Errors
    /// * `InvalidFormat` - Not a bare `local@domain.tld` address
    pub fn new(email: String) -> Result<Self, EmailError> {
        let options = Options::default()
            .without_display_text()
            .without_domain_literal()
            .with_required_tld();

        email_address::EmailAddress::parse_with_options(&email, options)
            .map(|parsed| EmailAddress(parsed.email()))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Plaintext password that satisfies the signup policy.
///
/// Only lives for the duration of a request; never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 6;

    /// # Errors
    /// * `TooShort` - Password shorter than 6 characters
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        if password.chars().count() < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Age in whole years, strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Age(i32);

impl Age {
    /// # Errors
    /// * `NotPositive` - Zero or negative
    /// * `OutOfRange` - Does not fit the storage type
    pub fn new(age: i64) -> Result<Self, AgeError> {
        if age < 1 {
            return Err(AgeError::NotPositive(age));
        }
        i32::try_from(age)
            .map(Age)
            .map_err(|_| AgeError::OutOfRange(age))
    }

    /// Parse an age from form input.
    ///
    /// # Errors
    /// * `NotAnInteger` - Input is not a base-10 integer
    /// * `NotPositive` / `OutOfRange` - see [`Age::new`]
    pub fn parse(input: &str) -> Result<Self, AgeError> {
        let value = input
            .trim()
            .parse::<i64>()
            .map_err(|_| AgeError::NotAnInteger(input.to_string()))?;
        Self::new(value)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// City name, non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City(String);

impl City {
    pub fn new(city: String) -> Result<Self, CityError> {
        if city.trim().is_empty() {
            return Err(CityError::Empty);
        }
        Ok(Self(city))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to create a new user with domain types
#[derive(Debug)]
pub struct CreateUserCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: Password,
    pub age: Age,
    pub city: City,
}

/// Raw picture received from an upload, before it is stored.
#[derive(Debug, Clone)]
pub struct PictureUpload {
    /// File name as sent by the client, used only for its extension.
    pub original_name: Option<String>,
    pub bytes: Vec<u8>,
}

impl PictureUpload {
    /// Lowercased alphanumeric extension of the client file name, if any.
    pub fn extension(&self) -> Option<String> {
        let name = self.original_name.as_deref()?;
        let extension = std::path::Path::new(name).extension()?.to_str()?;

        if extension.is_empty() || !extension.chars().all(|c| c.is_ascii_alphanumeric()) {
            return None;
        }
        Some(extension.to_ascii_lowercase())
    }
}
