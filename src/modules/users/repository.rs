//! User lookup.
//!
//! The token core only ever reads users. [`PgUserStore`] is the production
//! store; [`InMemoryUserStore`] backs tests and local experiments.

use std::sync::RwLock;
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use marquee_core::{AppError, hash_password};
use sqlx::PgPool;
use tracing::instrument;

use crate::modules::users::User;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError>;
}

const USER_COLUMNS: &str = "id, email, first_name, last_name, password, created_at, updated_at";

pub struct PgUserStore {
    pool: PgPool,
    query_timeout: Duration,
}

impl PgUserStore {
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    #[instrument(skip(self, password_hash))]
    pub async fn create_user(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        let query = format!(
            "INSERT INTO users (first_name, last_name, email, password, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, NOW(), NOW()) RETURNING {USER_COLUMNS}"
        );

        let insert = sqlx::query_as::<_, User>(&query)
            .bind(first_name)
            .bind(last_name)
            .bind(email)
            .bind(password_hash)
            .fetch_one(&self.pool);

        tokio::time::timeout(self.query_timeout, insert)
            .await
            .map_err(|_| AppError::database(anyhow!("insert into users timed out")))?
            .map_err(AppError::database)
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let lookup = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.pool);

        tokio::time::timeout(self.query_timeout, lookup)
            .await
            .map_err(|_| AppError::database(anyhow!("user lookup by email timed out")))?
            .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let lookup = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool);

        tokio::time::timeout(self.query_timeout, lookup)
            .await
            .map_err(|_| AppError::database(anyhow!("user lookup by id timed out")))?
            .map_err(AppError::database)
    }
}

#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a user with a freshly hashed password and the next free id.
    pub fn add_user(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| AppError::internal(anyhow!("user store lock poisoned")))?;

        let now = chrono::Utc::now().naive_utc();
        let user = User {
            id: users.iter().map(|u| u.id).max().unwrap_or(0) + 1,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            password: hash_password(password)?,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());

        Ok(user)
    }

    /// Inserts `user` as is, replacing any user with the same id.
    pub fn insert(&self, user: User) -> Result<(), AppError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| AppError::internal(anyhow!("user store lock poisoned")))?;
        users.retain(|u| u.id != user.id);
        users.push(user);
        Ok(())
    }

    pub fn remove(&self, id: i32) -> Result<(), AppError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| AppError::internal(anyhow!("user store lock poisoned")))?;
        users.retain(|u| u.id != id);
        Ok(())
    }

    fn find(&self, predicate: impl Fn(&User) -> bool) -> Result<Option<User>, AppError> {
        let users = self
            .users
            .read()
            .map_err(|_| AppError::internal(anyhow!("user store lock poisoned")))?;
        Ok(users.iter().find(|u| predicate(u)).cloned())
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.find(|u| u.email == email)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        self.find(|u| u.id == id)
    }
}
