//! Application state and factory
//!
//! This module wires the core services to the infrastructure
//! implementations and provides the factory for the Actix-web application.

use std::sync::Arc;

use actix_web::{http::StatusCode, web, App, HttpResponse};

use um_core::errors::DomainError;
use um_core::repositories::AccountDirectory;
use um_core::services::notification::EmailDispatcher;
use um_core::services::{
    AuthService, AuthServiceConfig, BcryptPasswordEncoder, LoginAttemptGuard, TokenCodec,
    TokenCodecConfig,
};
use um_infra::{InMemoryAccountDirectory, LoggingEmailDispatcher};
use um_shared::{error_codes, AuthConfig};

use crate::handlers::error::error_response;
use crate::middleware::auth::JwtAuth;
use crate::routes::health::health_check;
use crate::routes::user::{
    list::list_users, login::login, register::register, unlock::unlock_user, AppState,
};

/// Services shared by every worker
pub struct AppServices<D, E>
where
    D: AccountDirectory,
    E: EmailDispatcher,
{
    pub state: web::Data<AppState<D, E>>,
    pub token_codec: Arc<TokenCodec>,
}

impl<D, E> Clone for AppServices<D, E>
where
    D: AccountDirectory,
    E: EmailDispatcher,
{
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            token_codec: self.token_codec.clone(),
        }
    }
}

/// Default wiring: in-memory directory and logging email dispatcher
pub type DefaultServices = AppServices<InMemoryAccountDirectory, LoggingEmailDispatcher>;

/// Build the services from configuration
pub fn build_services(
    auth: &AuthConfig,
    directory: Arc<InMemoryAccountDirectory>,
    dispatcher: Arc<LoggingEmailDispatcher>,
) -> Result<DefaultServices, DomainError> {
    let token_codec = Arc::new(TokenCodec::new(TokenCodecConfig::from(&auth.jwt)));
    let attempt_guard = Arc::new(LoginAttemptGuard::new(auth.login_attempts.clone()));
    let password_encoder = Arc::new(BcryptPasswordEncoder::new(auth.password.bcrypt_cost)?);

    let auth_service = AuthService::new(
        directory,
        dispatcher,
        token_codec.clone(),
        attempt_guard,
        password_encoder,
        AuthServiceConfig::default(),
    );

    Ok(AppServices {
        state: web::Data::new(AppState {
            auth_service: Arc::new(auth_service),
        }),
        token_codec,
    })
}

/// Create and configure the application with all dependencies
pub fn create_app<D, E>(
    services: AppServices<D, E>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    D: AccountDirectory + 'static,
    E: EmailDispatcher + 'static,
{
    let auth = JwtAuth::new(services.token_codec.clone());

    App::new()
        .app_data(services.state)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/user")
                // Public
                .route("/login", web::post().to(login::<D, E>))
                .route("/register", web::post().to(register::<D, E>))
                // Bearer token required
                .service(
                    web::resource("/list")
                        .wrap(auth.clone())
                        .route(web::get().to(list_users::<D, E>)),
                )
                .service(
                    web::resource("/unlock/{username}")
                        .wrap(auth)
                        .route(web::post().to(unlock_user::<D, E>)),
                ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    error_response(
        StatusCode::NOT_FOUND,
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    )
}
