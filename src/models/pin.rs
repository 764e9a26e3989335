use chrono::{DateTime, Utc};
use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

use crate::models::to_utc;
use crate::utils::AppError;

pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 5;

/// Map pin, stored in the `pins` collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pin {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Username of the author. Not checked against `users`.
    pub username: String,

    pub title: String,

    /// Review text
    pub desc: String,

    /// 1..=5 stars
    pub rating: i32,

    pub lat: f64,
    pub long: f64,

    #[serde(rename = "createdAt")]
    pub created_at: BsonDateTime,
    #[serde(rename = "updatedAt")]
    pub updated_at: BsonDateTime,
}

/// Rating as submitted. The web client posts the `<select>` value as a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RatingInput {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl RatingInput {
    fn to_rating(&self) -> Option<u8> {
        let value = match self {
            RatingInput::Integer(n) => *n,
            RatingInput::Float(f) if f.fract() == 0.0 && f.is_finite() => *f as i64,
            RatingInput::Float(_) => return None,
            RatingInput::Text(s) => s.trim().parse::<i64>().ok()?,
        };
        u8::try_from(value)
            .ok()
            .filter(|r| (RATING_MIN..=RATING_MAX).contains(r))
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreatePinRequest {
    #[schema(example = "alice")]
    pub username: Option<String>,
    #[schema(example = "Lake")]
    pub title: Option<String>,
    #[schema(example = "Nice view")]
    pub desc: Option<String>,
    #[schema(value_type = Option<i32>, example = 4)]
    pub rating: Option<RatingInput>,
    #[schema(example = 45.1)]
    pub lat: Option<f64>,
    #[schema(example = 15.2)]
    pub long: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPin {
    pub username: String,
    pub title: String,
    pub desc: String,
    pub rating: u8,
    pub lat: f64,
    pub long: f64,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PinResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub title: String,
    pub desc: String,
    pub rating: i32,
    pub lat: f64,
    pub long: f64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<Pin> for PinResponse {
    fn from(pin: Pin) -> Self {
        PinResponse {
            id: pin.id.map(|id| id.to_hex()).unwrap_or_default(),
            username: pin.username,
            title: pin.title,
            desc: pin.desc,
            rating: pin.rating,
            lat: pin.lat,
            long: pin.long,
            created_at: to_utc(pin.created_at),
            updated_at: to_utc(pin.updated_at),
        }
    }
}

impl NewPin {
    pub fn into_document(self, now: BsonDateTime) -> Pin {
        Pin {
            id: None,
            username: self.username,
            title: self.title,
            desc: self.desc,
            rating: i32::from(self.rating),
            lat: self.lat,
            long: self.long,
            created_at: now,
            updated_at: now,
        }
    }
}

fn required_text(value: Option<String>, field: &str) -> Result<String, AppError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation(format!("{} is required", field)))
}

fn coordinate(value: Option<f64>, field: &str, bound: f64) -> Result<f64, AppError> {
    let value = value.ok_or_else(|| AppError::Validation(format!("{} is required", field)))?;
    if !value.is_finite() || value.abs() > bound {
        return Err(AppError::Validation(format!(
            "{} must be between -{} and {}",
            field, bound, bound
        )));
    }
    Ok(value)
}

impl CreatePinRequest {
    pub fn validate(self) -> Result<NewPin, AppError> {
        let username = required_text(self.username, "username")?;
        let title = required_text(self.title, "title")?;
        let desc = required_text(self.desc, "desc")?;
        let rating = self
            .rating
            .ok_or_else(|| AppError::Validation("rating is required".to_string()))?
            .to_rating()
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "rating must be an integer between {} and {}",
                    RATING_MIN, RATING_MAX
                ))
            })?;
        let lat = coordinate(self.lat, "lat", 90.0)?;
        let long = coordinate(self.long, "long", 180.0)?;

        Ok(NewPin {
            username,
            title,
            desc,
            rating,
            lat,
            long,
        })
    }
}
