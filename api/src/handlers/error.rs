//! Mapping of domain errors to HTTP responses
//!
//! Bad credentials and unknown usernames on login share one response so the
//! body cannot be used to enumerate accounts.

use actix_web::{http::StatusCode, HttpResponse};
use um_core::errors::{AuthError, DomainError, TokenError, ValidationError};
use um_shared::{error_codes, ErrorResponse};

pub const BAD_CREDENTIALS_MESSAGE: &str = "Username / password incorrect. Please try again";
pub const ACCOUNT_LOCKED_MESSAGE: &str = "Your account has been locked. Please contact administration";
pub const ACCOUNT_DISABLED_MESSAGE: &str = "Your account has been disabled. If this is an error, please contact administration";
pub const TOKEN_CANNOT_BE_VERIFIED: &str = "Token cannot be verified";
pub const FORBIDDEN_MESSAGE: &str = "You need to log in to access this page";
pub const ACCESS_DENIED_MESSAGE: &str = "You do not have permission to access this page";
pub const INTERNAL_ERROR_MESSAGE: &str = "An error occurred while processing the request";

/// JSON error body with the given status
pub fn error_response(status: StatusCode, error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse::new(status.as_u16(), error, message))
}

/// Handle errors raised by login
///
/// An unknown username is reported exactly like a wrong password.
pub fn handle_login_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Auth(AuthError::UserNotFound) => {
            handle_domain_error(DomainError::Auth(AuthError::AuthenticationFailed))
        }
        other => handle_domain_error(other),
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::AuthenticationFailed => error_response(
                StatusCode::UNAUTHORIZED,
                error_codes::BAD_CREDENTIALS,
                BAD_CREDENTIALS_MESSAGE,
            ),
            AuthError::AccountLocked => error_response(
                StatusCode::UNAUTHORIZED,
                error_codes::ACCOUNT_LOCKED,
                ACCOUNT_LOCKED_MESSAGE,
            ),
            AuthError::AccountDisabled => error_response(
                StatusCode::UNAUTHORIZED,
                error_codes::ACCOUNT_DISABLED,
                ACCOUNT_DISABLED_MESSAGE,
            ),
            AuthError::UserNotFound => error_response(
                StatusCode::NOT_FOUND,
                error_codes::NOT_FOUND,
                "No user found by username",
            ),
            AuthError::EmailNotFound => error_response(
                StatusCode::NOT_FOUND,
                error_codes::NOT_FOUND,
                "No user found for email",
            ),
            AuthError::UsernameExists => error_response(
                StatusCode::CONFLICT,
                error_codes::CONFLICT,
                "Username already exists",
            ),
            AuthError::EmailExists => error_response(
                StatusCode::CONFLICT,
                error_codes::CONFLICT,
                "Email already exists",
            ),
            AuthError::InsufficientPermissions => error_response(
                StatusCode::FORBIDDEN,
                error_codes::FORBIDDEN,
                ACCESS_DENIED_MESSAGE,
            ),
        },
        DomainError::Token(TokenError::InvalidToken(reason)) => {
            log::debug!("Token rejected: {}", reason);
            error_response(
                StatusCode::UNAUTHORIZED,
                error_codes::TOKEN_INVALID,
                TOKEN_CANNOT_BE_VERIFIED,
            )
        }
        DomainError::Validation(validation_error) => {
            let message = match &validation_error {
                ValidationError::RequiredField { field } => format!("{} is required", field),
                ValidationError::InvalidEmail => "Invalid email address".to_string(),
                ValidationError::UnknownRole { role } => format!("Unknown role: {}", role),
            };
            error_response(StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR, message)
        }
        DomainError::Token(TokenError::GenerationFailed) | DomainError::Internal { .. } => {
            log::error!("Internal error: {}", error);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::INTERNAL_ERROR,
                INTERNAL_ERROR_MESSAGE,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(response: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_rt::test]
    async fn test_unknown_user_and_bad_password_look_identical() {
        let unknown = handle_login_error(AuthError::UserNotFound.into());
        let wrong = handle_login_error(AuthError::AuthenticationFailed.into());

        assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(unknown.status(), wrong.status());

        let mut unknown = body_json(unknown).await;
        let mut wrong = body_json(wrong).await;
        unknown.as_object_mut().unwrap().remove("timestamp");
        wrong.as_object_mut().unwrap().remove("timestamp");
        assert_eq!(unknown, wrong);
        assert_eq!(unknown["message"], BAD_CREDENTIALS_MESSAGE);
    }

    #[test]
    fn test_status_mapping() {
        let cases: Vec<(DomainError, StatusCode)> = vec![
            (AuthError::AccountLocked.into(), StatusCode::UNAUTHORIZED),
            (AuthError::UserNotFound.into(), StatusCode::NOT_FOUND),
            (AuthError::EmailExists.into(), StatusCode::CONFLICT),
            (AuthError::InsufficientPermissions.into(), StatusCode::FORBIDDEN),
            (ValidationError::InvalidEmail.into(), StatusCode::BAD_REQUEST),
            (DomainError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, status) in cases {
            assert_eq!(handle_domain_error(error).status(), status);
        }
    }
}
