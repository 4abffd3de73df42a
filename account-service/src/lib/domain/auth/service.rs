use std::sync::Arc;

use async_trait::async_trait;
use auth::TokenIssuer;
use chrono::Utc;

use crate::domain::auth::models::AuthResponse;
use crate::domain::auth::models::AuthenticatedUser;
use crate::domain::auth::models::Credentials;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::RegisterResponse;
use crate::domain::auth::models::UserSummary;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Domain service implementation for authentication.
///
/// Orchestrates credential validation, login, registration, and profile
/// retrieval against the user store. The only component allowed to see
/// plaintext passwords, and it never lets one past hashing.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    token_issuer: Arc<TokenIssuer>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `token_issuer` - Access token signing and verification
    ///
    /// # Returns
    /// Configured authentication service instance
    pub fn new(repository: Arc<UR>, token_issuer: Arc<TokenIssuer>) -> Self {
        Self {
            repository,
            token_issuer,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn validate_user(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> Result<Option<AuthenticatedUser>, UserError> {
        let user = match self.repository.find_by_email(email).await? {
            Some(user) => user,
            // Unknown email and wrong password produce the same outcome
            None => return Ok(None),
        };

        if self.password_hasher.verify(password, &user.password_hash) {
            Ok(Some(AuthenticatedUser::from(&user)))
        } else {
            Ok(None)
        }
    }

    async fn login(&self, credentials: Credentials) -> Result<AuthResponse, UserError> {
        let user = self
            .validate_user(&credentials.email, &credentials.password)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        // Inactive accounts collapse into the same rejection as bad
        // credentials; the caller learns nothing about the account state.
        if !user.is_active {
            return Err(UserError::InvalidCredentials);
        }

        let access_token = self.token_issuer.issue(user.id, user.email.as_str())?;

        Ok(AuthResponse {
            access_token,
            user: UserSummary::from(&user),
        })
    }

    async fn register(&self, command: RegisterCommand) -> Result<RegisterResponse, UserError> {
        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self.password_hasher.hash(&command.password)?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email: command.email,
            name: command.name,
            password_hash,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let created_user = self.repository.create(user).await?;

        let access_token = self
            .token_issuer
            .issue(created_user.id, created_user.email.as_str())?;

        Ok(RegisterResponse {
            access_token,
            user: AuthenticatedUser::from(&created_user),
        })
    }

    async fn get_profile(&self, id: &UserId) -> Result<AuthenticatedUser, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .map(|user| AuthenticatedUser::from(&user))
            .ok_or(UserError::InvalidCredentials)
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::user::models::DisplayName;

    // Define mocks in the test module using mockall
    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
            async fn list_all(&self) -> Result<Vec<User>, UserError>;
            async fn update(&self, user: User) -> Result<User, UserError>;
            async fn delete(&self, id: &UserId) -> Result<(), UserError>;
        }
    }

    const SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

    fn issuer() -> Arc<TokenIssuer> {
        Arc::new(TokenIssuer::new(SECRET, 24))
    }

    fn stored_user(email: &str, password: &str) -> User {
        let now = Utc::now();
        User {
            id: UserId::new(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            name: DisplayName::new("Ana Costa".to_string()).unwrap(),
            password_hash: auth::PasswordHasher::new().hash(password).unwrap(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn email(s: &str) -> EmailAddress {
        EmailAddress::new(s.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_validate_user_success_strips_password() {
        let mut repository = MockTestUserRepository::new();

        let user = stored_user("ana@example.com", "secret1");
        let user_id = user.id;
        repository
            .expect_find_by_email()
            .withf(|email| email.as_str() == "ana@example.com")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(repository), issuer());

        let result = service
            .validate_user(&email("ana@example.com"), "secret1")
            .await;
        assert!(result.is_ok());

        let authenticated = result.unwrap().expect("Expected a validated user");
        assert_eq!(authenticated.id, user_id);
        assert_eq!(authenticated.email.as_str(), "ana@example.com");
    }

    #[tokio::test]
    async fn test_validate_user_wrong_password_is_none() {
        let mut repository = MockTestUserRepository::new();

        let user = stored_user("ana@example.com", "secret1");
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(repository), issuer());

        let result = service
            .validate_user(&email("ana@example.com"), "wrong")
            .await;
        assert!(result.is_ok());
        assert!(result.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_validate_user_unknown_email_is_none() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(repository), issuer());

        let result = service
            .validate_user(&email("ghost@example.com"), "whatever")
            .await;
        assert!(result.is_ok());
        assert!(result.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_success_issues_verifiable_token() {
        let mut repository = MockTestUserRepository::new();

        let user = stored_user("ana@example.com", "secret1");
        let user_id = user.id;
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let token_issuer = issuer();
        let service = AuthService::new(Arc::new(repository), Arc::clone(&token_issuer));

        let result = service
            .login(Credentials {
                email: email("ana@example.com"),
                password: "secret1".to_string(),
            })
            .await;
        assert!(result.is_ok());

        let response = result.unwrap();
        assert!(!response.access_token.is_empty());
        assert_eq!(response.user.id, user_id);
        assert_eq!(response.user.email.as_str(), "ana@example.com");

        // The token's subject must resolve back to the logged-in user
        let claims = token_issuer.verify(&response.access_token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "ana@example.com");
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        // Wrong password
        let mut repository = MockTestUserRepository::new();
        let user = stored_user("ana@example.com", "secret1");
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(repository), issuer());
        let wrong_password = service
            .login(Credentials {
                email: email("ana@example.com"),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();

        // Unknown email
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(repository), issuer());
        let unknown_email = service
            .login(Credentials {
                email: email("ghost@example.com"),
                password: "secret1".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, UserError::InvalidCredentials));
        assert!(matches!(unknown_email, UserError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_login_inactive_account_rejected_with_correct_password() {
        let mut repository = MockTestUserRepository::new();

        let mut user = stored_user("ana@example.com", "secret1");
        user.is_active = false;
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(repository), issuer());

        let result = service
            .login(Credentials {
                email: email("ana@example.com"),
                password: "secret1".to_string(),
            })
            .await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::InvalidCredentials
        ));
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .withf(|email| email.as_str() == "ana@example.com")
            .times(1)
            .returning(|_| Ok(None));

        repository
            .expect_create()
            .withf(|user| {
                user.email.as_str() == "ana@example.com"
                    && user.name.as_str() == "Ana Costa"
                    && user.is_active
                    && user.password_hash.starts_with("$argon2")
                    && user.created_at == user.updated_at
            })
            .times(1)
            .returning(|user| Ok(user));

        let token_issuer = issuer();
        let service = AuthService::new(Arc::new(repository), Arc::clone(&token_issuer));

        let command = RegisterCommand::new(
            DisplayName::new("Ana Costa".to_string()).unwrap(),
            email("ana@example.com"),
            "secret1".to_string(),
        );

        let result = service.register(command).await;
        assert!(result.is_ok());

        let response = result.unwrap();
        assert!(!response.access_token.is_empty());
        assert!(response.user.is_active);
        assert_eq!(response.user.email.as_str(), "ana@example.com");

        // Registration tokens carry the same claim shape as login tokens
        let claims = token_issuer.verify(&response.access_token).unwrap();
        assert_eq!(claims.sub, response.user.id.to_string());
        assert_eq!(claims.email, "ana@example.com");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        let existing = stored_user("ana@example.com", "other_password");
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        repository.expect_create().times(0);

        let service = AuthService::new(Arc::new(repository), issuer());

        let command = RegisterCommand::new(
            DisplayName::new("Ana Costa".to_string()).unwrap(),
            email("ana@example.com"),
            "secret1".to_string(),
        );

        let result = service.register(command).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::EmailAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_get_profile_success() {
        let mut repository = MockTestUserRepository::new();

        let user = stored_user("ana@example.com", "secret1");
        let user_id = user.id;
        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(repository), issuer());

        let result = service.get_profile(&user_id).await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap().id, user_id);
    }

    #[tokio::test]
    async fn test_get_profile_vanished_user_is_unauthorized() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(repository), issuer());

        let result = service.get_profile(&UserId::new()).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::InvalidCredentials
        ));
    }
}
