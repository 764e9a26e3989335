use actix_web::{web, HttpResponse, ResponseError};

use crate::models::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};
use crate::services::auth_service;
use crate::state::AppState;
use crate::utils::AppError;

fn log_failure(action: &str, username: &str, e: &AppError) {
    match e {
        AppError::Storage(_) | AppError::Internal(_) => {
            log::error!("❌ {} failed: {} - {}", action, username, e)
        }
        _ => log::warn!("❌ {} failed: {} - {}", action, username, e),
    }
}

#[utoipa::path(
    post,
    path = "/api/users/register",
    tag = "Users",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User created", body = UserInfo),
        (status = 400, description = "Missing field or username/email already taken"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse {
    let username = request.username.clone().unwrap_or_else(|| "N/A".to_string());
    log::info!("📝 POST /users/register - username: {}", username);

    match auth_service::register(state.store.as_ref(), &state.auth, request.into_inner()).await {
        Ok(user) => {
            log::info!("✅ Registration successful: {}", user.username);
            HttpResponse::Ok().json(user)
        }
        Err(e) => {
            log_failure("Registration", &username, &e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/users/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Wrong password or missing field"),
        (status = 404, description = "User not found")
    )
)]
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> HttpResponse {
    let username = request.username.clone().unwrap_or_else(|| "N/A".to_string());
    log::info!("🔐 POST /users/login - username: {}", username);

    match auth_service::login(state.store.as_ref(), &state.auth, request.into_inner()).await {
        Ok(response) => {
            log::info!("✅ Login successful: {}", response.username);
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            log_failure("Login", &username, &e);
            e.error_response()
        }
    }
}
