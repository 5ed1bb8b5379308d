use super::{NewUser, StoreError, User, UserStore};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// In-process [`UserStore`]. Records live as long as the process.
///
/// The existence check and the push share one write lock, so concurrent
/// inserts of the same email cannot both succeed.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.users.read().await.iter().any(|user| user.email == email))
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        if users.iter().any(|existing| existing.email == user.email) {
            return Err(StoreError::Duplicate { email: user.email });
        }

        let record = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password: user.password,
            created_at: Utc::now(),
        };
        users.push(record.clone());
        debug!(id = %record.id, "stored user in memory");

        Ok(record)
    }

    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|user| user.email == email && user.password == password)
            .cloned())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn close(&self) {
        let records = self.users.read().await.len();
        debug!(records, "memory store closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn new_user(email: &str, password: &str) -> NewUser {
        NewUser {
            name: "Ana".to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn insert_then_exists() -> Result<(), StoreError> {
        let store = MemoryStore::new();
        assert!(!store.email_exists("ana@x.com").await?);

        let user = store.insert(new_user("ana@x.com", "abcdef")).await?;
        assert_eq!(user.email, "ana@x.com");
        assert_eq!(user.name, "Ana");

        assert!(store.email_exists("ana@x.com").await?);
        assert_eq!(store.len().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn email_match_is_exact() -> Result<(), StoreError> {
        let store = MemoryStore::new();
        store.insert(new_user("foo@x.com", "abcdef")).await?;

        assert!(!store.email_exists("Foo@x.com").await?);
        assert!(!store.email_exists(" foo@x.com").await?);
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected() -> Result<(), StoreError> {
        let store = MemoryStore::new();
        store.insert(new_user("ana@x.com", "abcdef")).await?;

        let result = store.insert(new_user("ana@x.com", "other1")).await;
        assert!(matches!(result, Err(StoreError::Duplicate { ref email }) if email == "ana@x.com"));
        assert_eq!(store.len().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn find_by_credentials_requires_both_fields() -> Result<(), StoreError> {
        let store = MemoryStore::new();
        store.insert(new_user("ana@x.com", "abcdef")).await?;

        assert!(store.find_by_credentials("ana@x.com", "abcdef").await?.is_some());
        assert!(store.find_by_credentials("ana@x.com", "wrong1").await?.is_none());
        assert!(store.find_by_credentials("bob@x.com", "abcdef").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_inserts_keep_one_record() {
        let store = Arc::new(MemoryStore::new());

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.insert(new_user("race@x.com", "abcdef")).await })
            })
            .collect();

        let mut created = 0;
        let mut duplicates = 0;
        for task in tasks {
            match task.await {
                Ok(Ok(_)) => created += 1,
                Ok(Err(StoreError::Duplicate { .. })) => duplicates += 1,
                other => panic!("unexpected outcome: {other:?}"),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(duplicates, 7);
        assert_eq!(store.len().await, 1);
    }
}
