use actix_web::{web, HttpResponse};
use validator::Validate;

use um_core::repositories::AccountDirectory;
use um_core::services::notification::EmailDispatcher;

use crate::dto::RegisterRequest;
use crate::handlers::error::handle_domain_error;

use super::{validation_failed, AppState};

/// Handler for POST /user/register
///
/// Creates a user with the default role; the generated password is sent by
/// email, never returned.
///
/// ## Errors
/// - 400 Bad Request: Invalid request data
/// - 409 Conflict: Username or email already taken
pub async fn register<D, E>(
    state: web::Data<AppState<D, E>>,
    request: web::Json<RegisterRequest>,
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
        .register(
            &request.first_name,
            &request.last_name,
            &request.username,
            &request.email,
        )
        .await
    {
        Ok(user) => HttpResponse::Ok().json(&user),
        Err(error) => handle_domain_error(error),
    }
}
