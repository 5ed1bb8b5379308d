pub mod health;
pub use self::health::health;

pub mod email_check;
pub use self::email_check::verify_email;

pub mod user_register;
pub use self::user_register::register;

pub mod user_login;
pub use self::user_login::login;

use crate::store::{with_timeout, StoreError, UserStore};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::{fmt, future::Future, sync::Arc, time::Duration};
use utoipa::ToSchema;

pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared handler context, injected as `Extension<Arc<AppState>>`.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn UserStore>,
    store_timeout: Duration,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            store,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_store_timeout(mut self, store_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self
    }

    #[must_use]
    pub fn store(&self) -> &dyn UserStore {
        self.store.as_ref()
    }

    /// Run a store operation under the configured timeout.
    ///
    /// # Errors
    /// Returns the operation's error, or [`StoreError::Timeout`].
    pub async fn bounded<T, F>(&self, operation: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        with_timeout(self.store_timeout, operation).await
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("store_timeout", &self.store_timeout)
            .finish_non_exhaustive()
    }
}

#[derive(ToSchema, Serialize, Debug)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Read one form field as text: numbers and booleans are stringified,
/// `null` and structured values become empty. A bad field never discards
/// the rest of the body.
pub(crate) fn form_field<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}
