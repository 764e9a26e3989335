pub mod health;
pub mod pins;
pub mod swagger;
pub mod users;

#[cfg(test)]
pub mod test_support;

use actix_web::{guard, web};

use crate::middleware::AuthMiddleware;
use crate::utils::AppError;

/// Route table shared by `main` and the handler tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api/users")
                .route("/register", web::post().to(users::register))
                .route("/login", web::post().to(users::login)),
        )
        .service(
            web::scope("/api/pins")
                // Only submissions carry identity; listing ignores any Authorization header
                .service(
                    web::resource(["", "/"])
                        .guard(guard::Post())
                        .route(web::post().to(pins::create_pin))
                        .wrap(AuthMiddleware),
                )
                .service(web::resource(["", "/"]).route(web::get().to(pins::list_pins))),
        );
}

/// Malformed bodies get the same JSON error shape as validation failures
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        log::warn!("❌ {} {} - rejected body: {}", req.method(), req.path(), err);
        AppError::Validation(format!("Invalid request body: {}", err)).into()
    })
}
