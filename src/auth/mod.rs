pub mod extractors;
pub mod password;
pub mod token;

use serde::Deserialize;
use validator::Validate;

use crate::validation::non_blank;

pub use extractors::AuthenticatedUser;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenService};

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address for the new account. Must be syntactically valid.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Desired username. At least 4 characters, not whitespace-only.
    #[validate(
        length(min = 4, message = "Username must be at least 4 characters long"),
        custom = "non_blank"
    )]
    pub username: String,
    /// Password for the new account. At least 6 characters, not
    /// whitespace-only.
    #[validate(
        length(min = 6, message = "Password must be at least 6 characters long"),
        custom = "non_blank"
    )]
    pub password: String,
}

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(
        length(min = 6, message = "Password must be at least 6 characters long"),
        custom = "non_blank"
    )]
    pub password: String,
}
