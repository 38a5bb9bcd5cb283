//! User route handlers
//!
//! - Login and registration (public)
//! - User listing and account unlock (bearer token with authority)

pub mod list;
pub mod login;
pub mod register;
pub mod unlock;

use std::sync::Arc;

use actix_web::{http::StatusCode, HttpResponse};
use um_core::repositories::AccountDirectory;
use um_core::services::auth::AuthService;
use um_core::services::notification::EmailDispatcher;
use um_shared::error_codes;
use validator::ValidationErrors;

use crate::dto::ValidationErrorResponse;

/// Application state that holds shared services
pub struct AppState<D, E>
where
    D: AccountDirectory,
    E: EmailDispatcher,
{
    pub auth_service: Arc<AuthService<D, E>>,
}

/// 400 response listing the failing fields
pub(crate) fn validation_failed(errors: ValidationErrors) -> HttpResponse {
    HttpResponse::build(StatusCode::BAD_REQUEST).json(ValidationErrorResponse {
        status: StatusCode::BAD_REQUEST.as_u16(),
        error: error_codes::VALIDATION_ERROR.to_string(),
        message: "Invalid request data".to_string(),
        details: serde_json::json!(errors),
    })
}
