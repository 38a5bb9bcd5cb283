use actix_web::{web, HttpResponse};

use um_core::domain::entities::user::USER_UPDATE;
use um_core::repositories::AccountDirectory;
use um_core::services::notification::EmailDispatcher;

use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

use super::AppState;

/// Handler for POST /user/unlock/{username}, requires `user:update`
///
/// Clears failed login attempts and the locked flag.
pub async fn unlock_user<D, E>(
    auth: AuthContext,
    state: web::Data<AppState<D, E>>,
    path: web::Path<String>,
) -> HttpResponse
where
    D: AccountDirectory + 'static,
    E: EmailDispatcher + 'static,
{
    if let Err(error) = auth.require(USER_UPDATE) {
        return handle_domain_error(error);
    }

    let username = path.into_inner();
    log::info!("{} unlocking account {}", auth.username, username);

    match state.auth_service.unlock_account(&username).await {
        Ok(user) => HttpResponse::Ok().json(&user),
        Err(error) => handle_domain_error(error),
    }
}
