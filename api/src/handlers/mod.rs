pub mod error;

pub use error::{error_response, handle_domain_error, handle_login_error};
