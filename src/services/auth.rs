use validator::Validate;

use crate::auth::{hash_password, verify_password, LoginRequest, RegisterRequest, TokenService};
use crate::error::AppError;
use crate::models::NewUser;
use crate::store::UserStore;

/// Registration and login over the user store, credential hashing, and
/// the token service.
#[derive(Clone)]
pub struct AuthService {
    users: UserStore,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(users: UserStore, tokens: TokenService) -> Self {
        Self { users, tokens }
    }

    /// Creates a new account.
    ///
    /// The `find_by_email` pre-check gives the common duplicate case a
    /// friendly answer; the unique index on `users.email` closes the
    /// race when two registrations for the same address interleave, and
    /// its violation surfaces as the same conflict error.
    pub async fn register(&self, request: RegisterRequest) -> Result<(), AppError> {
        request.validate()?;

        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::Conflict("User already exists".into()));
        }

        let password_hash = hash_password(&request.password)?;
        let user_id = self
            .users
            .insert(NewUser {
                email: request.email,
                username: request.username,
                password_hash,
            })
            .await?;

        log::info!("registered user {}", user_id);

        Ok(())
    }

    /// Authenticates a user and issues a bearer token carrying their id
    /// and email.
    ///
    /// An unknown email and a wrong password answer identically so the
    /// response never reveals whether an account exists.
    pub async fn login(&self, request: LoginRequest) -> Result<String, AppError> {
        request.validate()?;

        let user = self
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !verify_password(&request.password, &user.password_hash) {
            return Err(invalid_credentials());
        }

        self.tokens.issue(user.id, &user.email)
    }
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid credentials".into())
}
