use std::sync::Arc;

use crate::database::memory::MemoryStore;
use crate::database::Store;
use crate::services::auth_service::test_auth_config;
use crate::state::AppState;

pub fn memory_state(require_pin_auth: bool) -> (AppState, Arc<MemoryStore>) {
    state_with(MemoryStore::new(), require_pin_auth)
}

pub fn unavailable_state() -> (AppState, Arc<MemoryStore>) {
    state_with(MemoryStore::unavailable(), false)
}

fn state_with(store: MemoryStore, require_pin_auth: bool) -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(store);
    let mut auth = test_auth_config();
    auth.require_pin_auth = require_pin_auth;
    let state = AppState::new(store.clone() as Arc<dyn Store>, auth);
    (state, store)
}

/// Builds the same application `main` serves, minus CORS and access logs
macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state))
                .app_data($crate::api::json_config())
                .wrap($crate::middleware::SecurityHeaders)
                .configure($crate::api::configure),
        )
        .await
    };
}

/// Registers `username` with password `pw123` and returns the login token
macro_rules! issue_token {
    ($app:expr, $username:expr) => {{
        let username: &str = $username;
        let req = actix_web::test::TestRequest::post()
            .uri("/api/users/register")
            .set_json(serde_json::json!({
                "username": username,
                "email": format!("{}@x.com", username),
                "password": "pw123"
            }))
            .to_request();
        let resp = actix_web::test::call_service($app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::OK);

        let req = actix_web::test::TestRequest::post()
            .uri("/api/users/login")
            .set_json(serde_json::json!({ "username": username, "password": "pw123" }))
            .to_request();
        let body: serde_json::Value = actix_web::test::call_and_read_body_json($app, req).await;
        body["token"].as_str().unwrap_or_default().to_string()
    }};
}

pub(crate) use init_app;
pub(crate) use issue_token;
