use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::error::{ErrorKind, WriteFailure};

use super::{MongoDB, PINS, USERS};
use crate::models::{Pin, User};
use crate::utils::AppError;

const DUPLICATE_KEY: i32 = 11000;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    /// Inserts a new user and returns it with its generated id. A duplicate
    /// username or email is reported as `AppError::Validation`.
    async fn insert_user(&self, user: User) -> Result<User, AppError>;
}

#[async_trait]
pub trait PinStore: Send + Sync {
    async fn insert_pin(&self, pin: Pin) -> Result<Pin, AppError>;
    /// Every pin, in natural (insertion) order
    async fn list_pins(&self) -> Result<Vec<Pin>, AppError>;
}

#[async_trait]
pub trait Store: UserStore + PinStore {
    async fn ping(&self) -> bool;
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}

#[async_trait]
impl UserStore for MongoDB {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .collection::<User>(USERS)
            .find_one(doc! { "username": username })
            .await?)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .collection::<User>(USERS)
            .find_one(doc! { "email": email })
            .await?)
    }

    async fn insert_user(&self, mut user: User) -> Result<User, AppError> {
        let result = self
            .collection::<User>(USERS)
            .insert_one(&user)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::Validation("Username or email already exists".to_string())
                } else {
                    AppError::from(e)
                }
            })?;

        user.id = result.inserted_id.as_object_id();
        Ok(user)
    }
}

#[async_trait]
impl PinStore for MongoDB {
    async fn insert_pin(&self, mut pin: Pin) -> Result<Pin, AppError> {
        let result = self.collection::<Pin>(PINS).insert_one(&pin).await?;
        pin.id = result.inserted_id.as_object_id();
        Ok(pin)
    }

    async fn list_pins(&self) -> Result<Vec<Pin>, AppError> {
        let cursor = self.collection::<Pin>(PINS).find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }
}

#[async_trait]
impl Store for MongoDB {
    async fn ping(&self) -> bool {
        self.health_check().await
    }
}
