use crate::{
    config::{AuthConfig, JwtConfig},
    database::UserStore,
    models::{LoginRequest, LoginResponse, RegisterRequest, User, UserInfo},
    utils::AppError,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mongodb::bson::DateTime as BsonDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,           // user id (hex ObjectId)
    pub username: String,
    pub iat: usize,            // issued at
    pub exp: usize,            // expiration
    pub jti: String,           // JWT ID
    pub aud: String,           // audience
    pub iss: String,           // issuer
}

pub fn generate_jwt(user: &User, config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.id.map(|id| id.to_hex()).unwrap_or_default(),
        username: user.username.clone(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::hours(config.ttl_hours)).timestamp() as usize,
        jti: Uuid::new_v4().to_string(),
        aud: config.audience.clone(),
        iss: config.issuer.clone(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_ref()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
}

pub fn verify_token(token: &str, config: &JwtConfig) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[config.audience.as_str()]);
    validation.set_issuer(&[config.issuer.as_str()]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_ref()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        log::warn!("❌ Token rejected: {}", e);
        AppError::Unauthorized("Invalid or expired token".to_string())
    })
}

/// bcrypt is CPU bound, so it runs on the blocking pool
async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Password hashing error: {}", e)))
}

async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("Verification task failed: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Password verification error: {}", e)))
}

// User registration
pub async fn register<S: UserStore + ?Sized>(
    store: &S,
    config: &AuthConfig,
    request: RegisterRequest,
) -> Result<UserInfo, AppError> {
    let new_user = request.validate()?;

    // Friendly messages for the common case; the unique indexes still decide under races
    if store.find_user_by_username(&new_user.username).await?.is_some() {
        return Err(AppError::Validation("Username already taken".to_string()));
    }
    if store.find_user_by_email(&new_user.email).await?.is_some() {
        return Err(AppError::Validation("Email already registered".to_string()));
    }

    let password_hash = hash_password(new_user.password, config.bcrypt_cost).await?;
    let now = BsonDateTime::now();

    let user = store
        .insert_user(User {
            id: None,
            username: new_user.username,
            email: new_user.email,
            password: password_hash,
            created_at: now,
            updated_at: now,
        })
        .await?;

    Ok(UserInfo::from(user))
}

// User login
pub async fn login<S: UserStore + ?Sized>(
    store: &S,
    config: &AuthConfig,
    request: LoginRequest,
) -> Result<LoginResponse, AppError> {
    let credentials = request.validate()?;

    let user = store
        .find_user_by_username(&credentials.username)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if !verify_password(credentials.password, user.password.clone()).await? {
        return Err(AppError::Auth("Wrong username or password".to_string()));
    }

    let token = generate_jwt(&user, &config.jwt)?;

    Ok(LoginResponse {
        id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
        username: user.username,
        email: user.email,
        token,
    })
}

#[cfg(test)]
pub(crate) fn test_auth_config() -> AuthConfig {
    AuthConfig {
        jwt: JwtConfig {
            secret: "test-secret".to_string(),
            issuer: "pinmap-service".to_string(),
            audience: "pinmap-client".to_string(),
            ttl_hours: 1,
        },
        bcrypt_cost: 4,
        require_pin_auth: false,
    }
}
