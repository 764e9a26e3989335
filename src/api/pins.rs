use actix_web::{web, HttpResponse, ResponseError};

use crate::models::{CreatePinRequest, PinResponse};
use crate::services::auth_service::Claims;
use crate::services::pin_service;
use crate::state::AppState;
use crate::utils::AppError;

/// GET /api/pins - every pin, insertion order, no pagination
#[utoipa::path(
    get,
    path = "/api/pins",
    tag = "Pins",
    responses(
        (status = 200, description = "All pins", body = [PinResponse]),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn list_pins(state: web::Data<AppState>) -> HttpResponse {
    log::info!("📍 GET /pins");

    match pin_service::list_pins(state.store.as_ref()).await {
        Ok(pins) => {
            log::info!("✅ Returning {} pins", pins.len());
            HttpResponse::Ok().json(pins)
        }
        Err(e) => {
            log::error!("❌ Failed to list pins: {}", e);
            e.error_response()
        }
    }
}

/// POST /api/pins - create a pin
#[utoipa::path(
    post,
    path = "/api/pins",
    tag = "Pins",
    request_body = CreatePinRequest,
    responses(
        (status = 200, description = "Pin created", body = PinResponse),
        (status = 400, description = "Missing field, rating outside 1-5 or invalid coordinates"),
        (status = 401, description = "Invalid token, or no token while one is required"),
        (status = 403, description = "Token belongs to another user")
    ),
    security(
        (),
        ("bearer_auth" = [])
    )
)]
pub async fn create_pin(
    state: web::Data<AppState>,
    identity: Option<web::ReqData<Claims>>,
    request: web::Json<CreatePinRequest>,
) -> HttpResponse {
    let username = request.username.clone().unwrap_or_else(|| "N/A".to_string());
    log::info!("📍 POST /pins - username: {}", username);

    let claims = identity.map(|c| c.into_inner());

    match pin_service::create_pin(
        state.store.as_ref(),
        request.into_inner(),
        claims.as_ref(),
        state.auth.require_pin_auth,
    )
    .await
    {
        Ok(pin) => {
            log::info!("✅ Pin created: {} by {}", pin.id, pin.username);
            HttpResponse::Ok().json(pin)
        }
        Err(e @ (AppError::Storage(_) | AppError::Internal(_))) => {
            log::error!("❌ Failed to create pin for {}: {}", username, e);
            e.error_response()
        }
        Err(e) => {
            log::warn!("❌ Pin rejected for {}: {}", username, e);
            e.error_response()
        }
    }
}
