mod error;
mod types;
mod validation;

pub use error::ValidationError;
pub use types::{Credentials, Registration};
pub use validation::{normalize_email, validate_login, validate_registration, MIN_PASSWORD_LEN};
