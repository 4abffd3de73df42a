//! Authentication primitives for the account service.
//!
//! Provides the two cryptographic building blocks the service relies on:
//! - Password hashing (Argon2id, PHC string format)
//! - Signed access tokens (JWT with HS256)
//!
//! The service defines its own domain traits and adapts these implementations,
//! so this crate stays free of domain types and storage concerns.
//!
//! # Examples
//!
//! ## Password hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("wrong_guess", &hash));
//! ```
//!
//! ## Access tokens
//! ```
//! use auth::TokenIssuer;
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!", 24);
//! let token = issuer.issue("user123", "user@example.com").unwrap();
//! let claims = issuer.verify(&token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! assert_eq!(claims.email, "user@example.com");
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::TokenError;
pub use token::TokenIssuer;
