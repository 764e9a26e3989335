pub mod auth_service;
pub mod pin_service;
