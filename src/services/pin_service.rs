use crate::{
    database::PinStore,
    models::{CreatePinRequest, PinResponse},
    services::auth_service::Claims,
    utils::AppError,
};
use mongodb::bson::DateTime as BsonDateTime;

/// Validates and stores a pin. `identity` is the verified bearer token, if the
/// request carried one; its username must match the pin's.
pub async fn create_pin<S: PinStore + ?Sized>(
    store: &S,
    request: CreatePinRequest,
    identity: Option<&Claims>,
    require_auth: bool,
) -> Result<PinResponse, AppError> {
    if identity.is_none() && require_auth {
        return Err(AppError::Unauthorized(
            "Missing authorization token".to_string(),
        ));
    }

    let new_pin = request.validate()?;

    if let Some(claims) = identity {
        if claims.username != new_pin.username {
            return Err(AppError::Forbidden(
                "Cannot create pins for another user".to_string(),
            ));
        }
    }

    let stored = store
        .insert_pin(new_pin.into_document(BsonDateTime::now()))
        .await?;

    Ok(PinResponse::from(stored))
}

pub async fn list_pins<S: PinStore + ?Sized>(store: &S) -> Result<Vec<PinResponse>, AppError> {
    let pins = store.list_pins().await?;
    Ok(pins.into_iter().map(PinResponse::from).collect())
}
