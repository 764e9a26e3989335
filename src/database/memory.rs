use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::Mutex;

use super::{PinStore, Store, UserStore};
use crate::models::{Pin, User};
use crate::utils::AppError;

/// In-process store with the same uniqueness rules as the MongoDB indexes
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    pins: Mutex<Vec<Pin>>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose every operation fails like a lost connection
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().map(|u| u.len()).unwrap_or(0)
    }

    pub fn pin_count(&self) -> usize {
        self.pins.lock().map(|p| p.len()).unwrap_or(0)
    }

    pub fn users(&self) -> Vec<User> {
        self.users.lock().map(|u| u.clone()).unwrap_or_default()
    }

    fn check_available(&self) -> Result<(), AppError> {
        if self.unavailable {
            return Err(AppError::Storage("server selection timeout".to_string()));
        }
        Ok(())
    }
}

fn poisoned<T>(_: T) -> AppError {
    AppError::Storage("store lock poisoned".to_string())
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.check_available()?;
        let users = self.users.lock().map_err(poisoned)?;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.check_available()?;
        let users = self.users.lock().map_err(poisoned)?;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, mut user: User) -> Result<User, AppError> {
        self.check_available()?;
        let mut users = self.users.lock().map_err(poisoned)?;
        if users
            .iter()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(AppError::Validation(
                "Username or email already exists".to_string(),
            ));
        }
        user.id = Some(ObjectId::new());
        users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl PinStore for MemoryStore {
    async fn insert_pin(&self, mut pin: Pin) -> Result<Pin, AppError> {
        self.check_available()?;
        pin.id = Some(ObjectId::new());
        self.pins.lock().map_err(poisoned)?.push(pin.clone());
        Ok(pin)
    }

    async fn list_pins(&self) -> Result<Vec<Pin>, AppError> {
        self.check_available()?;
        Ok(self.pins.lock().map_err(poisoned)?.clone())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> bool {
        !self.unavailable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::DateTime as BsonDateTime;

    fn user(username: &str, email: &str) -> User {
        User {
            id: None,
            username: username.to_string(),
            email: email.to_string(),
            password: "$2b$04$hash".to_string(),
            created_at: BsonDateTime::now(),
            updated_at: BsonDateTime::now(),
        }
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_username() {
        let store = MemoryStore::new();
        store.insert_user(user("alice", "a@x.com")).await.unwrap();

        let result = store.insert_user(user("alice", "other@x.com")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(store.user_count(), 1);
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_email() {
        let store = MemoryStore::new();
        store.insert_user(user("alice", "a@x.com")).await.unwrap();

        let result = store.insert_user(user("bob", "a@x.com")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(store.user_count(), 1);
        assert_eq!(store.users()[0].username, "alice");
    }
}
