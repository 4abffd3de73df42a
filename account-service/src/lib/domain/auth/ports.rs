use async_trait::async_trait;

use crate::domain::auth::models::AuthResponse;
use crate::domain::auth::models::AuthenticatedUser;
use crate::domain::auth::models::Credentials;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::RegisterResponse;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserId;

/// Port for authentication operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Check credentials against the stored hash.
    ///
    /// Returns `None` for an unknown email as well as for a wrong
    /// password, so callers cannot tell which factor failed. Does not
    /// consider account activity; that is login's concern.
    ///
    /// # Arguments
    /// * `email` - Email address to look up
    /// * `password` - Plaintext password to verify
    ///
    /// # Returns
    /// The authenticated user on a match, None otherwise
    ///
    /// # Errors
    /// * `DatabaseError` - Store lookup failed
    async fn validate_user(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> Result<Option<AuthenticatedUser>, UserError>;

    /// Authenticate and issue an access token.
    ///
    /// # Arguments
    /// * `credentials` - Email and plaintext password, consumed by the call
    ///
    /// # Returns
    /// Access token plus a minimal user projection
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email, wrong password, or inactive
    ///   account; the caller cannot tell which
    /// * `TokenIssuance` - Token signing failed
    /// * `DatabaseError` - Store lookup failed
    async fn login(&self, credentials: Credentials) -> Result<AuthResponse, UserError>;

    /// Create a new account and issue its first access token.
    ///
    /// # Arguments
    /// * `command` - Validated name, email, and plaintext password
    ///
    /// # Returns
    /// Access token plus the full projection of the created account
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `PasswordHash` - Password hashing failed
    /// * `TokenIssuance` - Token signing failed
    /// * `DatabaseError` - Store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<RegisterResponse, UserError>;

    /// Re-resolve a token subject to its current account state.
    ///
    /// # Arguments
    /// * `id` - User ID taken from a verified token's subject
    ///
    /// # Returns
    /// Current projection of the account
    ///
    /// # Errors
    /// * `InvalidCredentials` - The id no longer resolves to a user; token
    ///   possession does not guarantee the account still exists
    /// * `DatabaseError` - Store lookup failed
    async fn get_profile(&self, id: &UserId) -> Result<AuthenticatedUser, UserError>;
}
