//! Authentication utilities library
//!
//! Provides the building blocks for session authentication:
//! - Password hashing (Argon2id)
//! - Session token issuance and verification (HS256 JWT)
//! - Authentication coordination
//!
//! The library knows nothing about HTTP or storage; services adapt it at their edges.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{Claims, JwtHandler};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::for_user("user123", "alice", 24);
//! let token = handler.encode(&claims).unwrap();
//! let decoded = handler.decode(&token).unwrap();
//! assert_eq!(decoded, claims);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Claims, PasswordHasher};
//!
//! let hasher = PasswordHasher::new();
//! let auth = Authenticator::with_password_hasher(
//!     b"secret_key_at_least_32_bytes_long!",
//!     hasher.clone(),
//! );
//!
//! // Signup: hash password
//! let hash = hasher.hash("password123").unwrap();
//!
//! // Login: verify and issue token
//! let claims = Claims::for_user("user123", "alice", 24);
//! let result = auth.authenticate("password123", &hash, &claims).unwrap();
//!
//! // Every later request: verify token
//! let decoded = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(decoded.username, "alice");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::DEFAULT_EXPIRATION_HOURS;
pub use password::PasswordError;
pub use password::PasswordHasher;
