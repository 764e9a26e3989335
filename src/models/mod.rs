pub mod pin;
pub mod user;

pub use pin::*;
pub use user::*;

use chrono::{DateTime, Utc};
use mongodb::bson::DateTime as BsonDateTime;

pub(crate) fn to_utc(dt: BsonDateTime) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(dt.timestamp_millis()).unwrap_or_default()
}
