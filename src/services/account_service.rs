//! Account service - registration, authentication and listing.
//!
//! Mediates between the user repository and the password encoder.
//! Holds no state beyond the two collaborators injected at construction.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::domain::{CreateUserRequest, NewUser, PasswordEncoder, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// Account service trait for dependency injection.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Register a new user.
    ///
    /// Fails with `AppError::DuplicateEmail` if the email is taken.
    async fn register_user(&self, request: CreateUserRequest) -> AppResult<User>;

    /// Check an email/password pair.
    ///
    /// Unknown email and wrong password both yield `Ok(false)`.
    async fn authenticate(&self, email: &str, password: &str) -> AppResult<bool>;

    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;
}

/// Cleartext behind the stand-in hash verified for unknown emails.
const DUMMY_PASSWORD: &str = "lab10-unknown-account";

/// Concrete implementation of AccountService.
pub struct AccountManager<R, H>
where
    R: UserRepository + 'static,
    H: PasswordEncoder + 'static,
{
    users: Arc<R>,
    encoder: Arc<H>,
    dummy_hash: OnceCell<String>,
}

impl<R, H> AccountManager<R, H>
where
    R: UserRepository + 'static,
    H: PasswordEncoder + 'static,
{
    /// Create new account service with its collaborators
    pub fn new(users: Arc<R>, encoder: Arc<H>) -> Self {
        Self {
            users,
            encoder,
            dummy_hash: OnceCell::new(),
        }
    }

    // Argon2 is CPU-bound; keep it off the async workers.
    async fn hash_password(&self, password: String) -> AppResult<String> {
        let encoder = Arc::clone(&self.encoder);
        tokio::task::spawn_blocking(move || encoder.hash(&password))
            .await
            .map_err(|e| AppError::internal(format!("Hashing task failed: {}", e)))?
    }

    async fn verify_password(&self, password: String, hash: String) -> AppResult<bool> {
        let encoder = Arc::clone(&self.encoder);
        tokio::task::spawn_blocking(move || encoder.verify(&password, &hash))
            .await
            .map_err(|e| AppError::internal(format!("Verification task failed: {}", e)))?
    }

    // Unknown emails pay for one verify so their latency matches a wrong password.
    async fn verify_against_dummy(&self, password: &str) -> AppResult<()> {
        let dummy = self
            .dummy_hash
            .get_or_try_init(|| self.hash_password(DUMMY_PASSWORD.to_string()))
            .await?
            .clone();
        self.verify_password(password.to_string(), dummy).await?;
        Ok(())
    }
}

#[async_trait]
impl<R, H> AccountService for AccountManager<R, H>
where
    R: UserRepository + 'static,
    H: PasswordEncoder + 'static,
{
    async fn register_user(&self, request: CreateUserRequest) -> AppResult<User> {
        // Fast path only; the store's unique constraint is the real guard
        if self.users.find_by_email(&request.email).await?.is_some() {
            tracing::warn!(email = %request.email, "Registration rejected: email already exists");
            return Err(AppError::DuplicateEmail);
        }

        let CreateUserRequest {
            username,
            email,
            password,
        } = request;
        let password_hash = self.hash_password(password).await?;

        let user = self
            .users
            .save(NewUser {
                username,
                email,
                password_hash,
            })
            .await
            .inspect_err(|e| {
                if e.is_duplicate_email() {
                    tracing::warn!("Registration lost race on unique email");
                }
            })?;

        tracing::info!(user_id = %user.id, email = %user.email, "User registered");
        Ok(user)
    }

    async fn authenticate(&self, email: &str, password: &str) -> AppResult<bool> {
        let Some(user) = self.users.find_by_email(email).await? else {
            if let Err(e) = self.verify_against_dummy(password).await {
                tracing::debug!("Dummy verification failed: {}", e);
            }
            tracing::debug!("Authentication failed");
            return Ok(false);
        };

        let valid = self
            .verify_password(password.to_string(), user.password_hash)
            .await?;
        if !valid {
            tracing::debug!("Authentication failed");
        }
        Ok(valid)
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.users.find_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MockPasswordEncoder;
    use crate::infra::MockUserRepository;

    fn stored_user(email: &str, password_hash: &str) -> User {
        NewUser {
            username: "alice".to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        }
        .into_user()
    }

    fn service(
        repo: MockUserRepository,
        encoder: MockPasswordEncoder,
    ) -> AccountManager<MockUserRepository, MockPasswordEncoder> {
        AccountManager::new(Arc::new(repo), Arc::new(encoder))
    }

    fn alice() -> CreateUserRequest {
        CreateUserRequest::new("alice", "a@x.com", "secret123")
    }

    #[tokio::test]
    async fn test_register_hashes_and_saves() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .times(1)
            .returning(|email| {
                assert_eq!(email, "a@x.com");
                Ok(None)
            });
        repo.expect_save()
            .withf(|user: &NewUser| {
                user.username == "alice"
                    && user.email == "a@x.com"
                    && user.password_hash == "hashed:secret123"
            })
            .times(1)
            .returning(|user| Ok(user.into_user()));

        let mut encoder = MockPasswordEncoder::new();
        encoder
            .expect_hash()
            .times(1)
            .returning(|plain| Ok(format!("hashed:{}", plain)));

        let user = service(repo, encoder).register_user(alice()).await.unwrap();

        assert_eq!(user.email, "a@x.com");
        assert_ne!(user.password_hash, "secret123");
    }

    #[tokio::test]
    async fn test_register_existing_email_skips_hash_and_save() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|email| Ok(Some(stored_user(email, "hash"))));
        repo.expect_save().never();

        let mut encoder = MockPasswordEncoder::new();
        encoder.expect_hash().never();

        let result = service(repo, encoder).register_user(alice()).await;
        assert!(matches!(result, Err(AppError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_register_lost_race_reports_duplicate_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_save()
            .times(1)
            .returning(|_| Err(AppError::DuplicateEmail));

        let mut encoder = MockPasswordEncoder::new();
        encoder.expect_hash().returning(|_| Ok("hash".to_string()));

        let result = service(repo, encoder).register_user(alice()).await;
        assert!(matches!(result, Err(AppError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_register_propagates_persistence_failure() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_save()
            .times(1)
            .returning(|_| Err(sea_orm::DbErr::Custom("disk full".into()).into()));

        let mut encoder = MockPasswordEncoder::new();
        encoder.expect_hash().returning(|_| Ok("hash".to_string()));

        let result = service(repo, encoder).register_user(alice()).await;
        assert!(matches!(result, Err(AppError::Database(_))));
    }

    #[tokio::test]
    async fn test_register_propagates_lookup_failure() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .times(1)
            .returning(|_| Err(sea_orm::DbErr::Custom("timeout".into()).into()));
        repo.expect_save().never();

        let result = service(repo, MockPasswordEncoder::new())
            .register_user(alice())
            .await;
        assert!(matches!(result, Err(AppError::Database(_))));
    }

    #[tokio::test]
    async fn test_register_propagates_hashing_failure() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_save().never();

        let mut encoder = MockPasswordEncoder::new();
        encoder
            .expect_hash()
            .returning(|_| Err(AppError::hashing("rng unavailable")));

        let result = service(repo, encoder).register_user(alice()).await;
        assert!(matches!(result, Err(AppError::Hashing(_))));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email_is_false() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));

        let mut encoder = MockPasswordEncoder::new();
        encoder
            .expect_hash()
            .times(1)
            .returning(|_| Ok("dummy-hash".to_string()));
        // Even a matching dummy must not authenticate
        encoder
            .expect_verify()
            .withf(|_, hash| hash == "dummy-hash")
            .times(2)
            .returning(|_, _| Ok(true));

        let service = service(repo, encoder);
        assert!(!service.authenticate("nobody@x.com", "secret123").await.unwrap());
        assert!(!service.authenticate("ghost@x.com", "secret123").await.unwrap());
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email_ignores_dummy_failure() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));

        let mut encoder = MockPasswordEncoder::new();
        encoder
            .expect_hash()
            .returning(|_| Err(AppError::hashing("rng unavailable")));
        encoder.expect_verify().never();

        let result = service(repo, encoder)
            .authenticate("nobody@x.com", "secret123")
            .await;
        assert!(!result.unwrap());
    }

    #[tokio::test]
    async fn test_authenticate_checks_stored_hash() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|email| Ok(Some(stored_user(email, "hashed:secret123"))));

        let mut encoder = MockPasswordEncoder::new();
        encoder
            .expect_verify()
            .times(2)
            .returning(|plain, hash| Ok(hash == format!("hashed:{}", plain)));

        let service = service(repo, encoder);
        assert!(service.authenticate("a@x.com", "secret123").await.unwrap());
        assert!(!service.authenticate("a@x.com", "wrong").await.unwrap());
    }

    #[tokio::test]
    async fn test_authenticate_propagates_verify_failure() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|email| Ok(Some(stored_user(email, "garbage"))));

        let mut encoder = MockPasswordEncoder::new();
        encoder
            .expect_verify()
            .returning(|_, _| Err(AppError::hashing("Invalid hash format")));

        let result = service(repo, encoder)
            .authenticate("a@x.com", "secret123")
            .await;
        assert!(matches!(result, Err(AppError::Hashing(_))));
    }

    #[tokio::test]
    async fn test_list_users_passes_through() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_all().times(1).returning(|| {
            Ok(vec![
                stored_user("a@x.com", "h1"),
                stored_user("b@x.com", "h2"),
            ])
        });

        let users = service(repo, MockPasswordEncoder::new())
            .list_users()
            .await
            .unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].email, "a@x.com");
    }
}
