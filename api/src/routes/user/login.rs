use actix_web::{web, HttpResponse};
use validator::Validate;

use um_core::domain::entities::token::JWT_TOKEN_HEADER;
use um_core::repositories::AccountDirectory;
use um_core::services::notification::EmailDispatcher;

use crate::dto::LoginRequest;
use crate::handlers::error::handle_login_error;

use super::{validation_failed, AppState};

/// Handler for POST /user/login
///
/// # Request Body
///
/// ```json
/// { "username": "ann", "password": "..." }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// The user snapshot as JSON, with the token in the `Jwt-Token` header as
/// `Bearer <token>`.
///
/// ## Errors
/// - 400 Bad Request: Missing username or password
/// - 401 Unauthorized: Bad credentials, locked or disabled account
pub async fn login<D, E>(
    state: web::Data<AppState<D, E>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    D: AccountDirectory + 'static,
    E: EmailDispatcher + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_failed(errors);
    }

    match state
        .auth_service
        .login(&request.username, &request.password)
        .await
    {
        Ok(outcome) => HttpResponse::Ok()
            .insert_header((JWT_TOKEN_HEADER, outcome.bearer_header_value()))
            .json(&outcome.user),
        Err(error) => handle_login_error(error),
    }
}
