//! Record store for user accounts.
//!
//! Handlers only talk to [`UserStore`]. The production backend is
//! [`postgres::PgStore`]; [`memory::MemoryStore`] keeps records in process and is
//! selected with a `memory://` DSN.
//!
//! Both backends enforce email uniqueness at write time and report a lost race
//! as [`StoreError::Duplicate`], so callers can treat it exactly like the
//! pre-insert existence check.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::{fmt, future::Future, time::Duration};
use thiserror::Error;
use uuid::Uuid;

pub use self::{memory::MemoryStore, postgres::PgStore};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("a user with email {email} already exists")]
    Duplicate { email: String },

    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// A persisted user record.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Fields required to create a user, already validated.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Exact-match lookup on `email`.
    async fn email_exists(&self, email: &str) -> Result<bool, StoreError>;

    /// Persist a new record. Fails with [`StoreError::Duplicate`] if the email
    /// is already taken.
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;

    /// Find the record matching both `email` and `password` exactly.
    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, StoreError>;

    /// Round-trip to the backend, used by the health probe.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Release the underlying connections. Called once after shutdown.
    async fn close(&self);
}

/// Outcome of the initial store connection, inspected by the entry point.
#[must_use]
pub enum Startup<S> {
    Ready(S),
    /// The store could not be reached yet; `store` reconnects lazily.
    Degraded { store: S, error: StoreError },
}

/// Bound a store operation by `limit`.
///
/// # Errors
/// Returns [`StoreError::Timeout`] if `limit` elapses first, otherwise the
/// operation's own result.
pub async fn with_timeout<T, F>(limit: Duration, operation: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    tokio::time::timeout(limit, operation)
        .await
        .map_err(|_| StoreError::Timeout(limit))?
}
