use actix_web::{web, HttpResponse};

use um_core::domain::entities::user::USER_READ;
use um_core::repositories::AccountDirectory;
use um_core::services::notification::EmailDispatcher;

use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

use super::AppState;

/// Handler for GET /user/list, requires `user:read`
pub async fn list_users<D, E>(
    auth: AuthContext,
    state: web::Data<AppState<D, E>>,
) -> HttpResponse
where
    D: AccountDirectory + 'static,
    E: EmailDispatcher + 'static,
{
    if let Err(error) = auth.require(USER_READ) {
        return handle_domain_error(error);
    }

    match state.auth_service.get_users().await {
        Ok(users) => HttpResponse::Ok().json(&users),
        Err(error) => handle_domain_error(error),
    }
}
