//! Users service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::users::{
        errors::UsersServiceError,
        models::{NewUser, User, UserId, UserProfile},
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

fn normalise_email(email: &str) -> Result<String, UsersServiceError> {
    let email = email.trim();

    if email.is_empty() || !email.contains('@') {
        return Err(UsersServiceError::InvalidEmail);
    }

    Ok(email.to_string())
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn create_user(&self, user: NewUser) -> Result<User, UsersServiceError> {
        let user = NewUser {
            email: normalise_email(&user.email)?,
            role: user.role,
        };

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_user(&mut tx, &user).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_user(&self, user: UserId) -> Result<User, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn get_profile(&self, user: UserId) -> Result<UserProfile, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let found = self.repository.get_user(&mut tx, user).await?;
        let addresses = self.repository.list_addresses(&mut tx, user).await?;

        tx.commit().await?;

        Ok(UserProfile {
            user: found,
            addresses,
        })
    }

    async fn update_email(&self, user: UserId, email: &str) -> Result<User, UsersServiceError> {
        let email = normalise_email(email)?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_email(&mut tx, user, &email)
            .await?
            .ok_or(UsersServiceError::NotFound)?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_user(&self, user: UserId) -> Result<(), UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_user(&mut tx, user).await?;

        if rows_affected == 0 {
            return Err(UsersServiceError::NotFound);
        }

        tx.commit().await?;

        info!(user_id = %user, "deleted user");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Creates a new user account.
    async fn create_user(&self, user: NewUser) -> Result<User, UsersServiceError>;

    /// Retrieve a single user.
    async fn get_user(&self, user: UserId) -> Result<User, UsersServiceError>;

    /// Retrieve a user with their saved addresses.
    async fn get_profile(&self, user: UserId) -> Result<UserProfile, UsersServiceError>;

    /// Change a user's email address.
    async fn update_email(&self, user: UserId, email: &str) -> Result<User, UsersServiceError>;

    /// Delete the account together with its tokens, carts and addresses.
    async fn delete_user(&self, user: UserId) -> Result<(), UsersServiceError>;
}
