use crate::error::AppError;
use chrono::Duration;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default lifetime of an issued token.
const TOKEN_TTL_HOURS: i64 = 2;

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's unique identifier.
    pub sub: Uuid,
    /// Email address of the user the token was issued to.
    pub email: String,
    /// Expiration timestamp (seconds since epoch) for the token.
    pub exp: usize,
}

/// Issues and verifies signed bearer tokens.
///
/// The HS256 keys are derived once from the configured secret at startup
/// and the service is shared immutably across requests via `web::Data`.
/// There is no refresh or revocation mechanism; a token is valid until
/// its embedded expiry.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self::with_ttl(secret, Duration::hours(TOKEN_TTL_HOURS))
    }

    pub fn with_ttl(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Signs a token for the given user, expiring `ttl` from now.
    pub fn issue(&self, user_id: Uuid, email: &str) -> Result<String, AppError> {
        let expiration = chrono::Utc::now()
            .checked_add_signed(self.ttl)
            .expect("valid timestamp")
            .timestamp() as usize;

        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            exp: expiration,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Decodes and verifies a token string.
    ///
    /// Returns `None` on expiry, signature mismatch, or malformed input:
    /// an unverifiable token means "caller is unauthenticated", not "the
    /// server hit a bug", so no error surfaces here.
    pub fn verify(&self, token: &str) -> Option<Claims> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_issue_and_verify() {
        let service = TokenService::new("test_secret_for_issue_verify");
        let user_id = Uuid::new_v4();

        let token = service.issue(user_id, "test@example.com").unwrap();
        let claims = service.verify(&token).expect("token should verify");

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "test@example.com");
    }

    #[test]
    fn test_expired_token_verifies_to_none() {
        let service =
            TokenService::with_ttl("test_secret_for_expiration", Duration::hours(-2));
        let token = service.issue(Uuid::new_v4(), "late@example.com").unwrap();

        assert!(service.verify(&token).is_none());
    }

    #[test]
    fn test_wrong_secret_verifies_to_none() {
        let issuer = TokenService::new("secret_one");
        let verifier = TokenService::new("a_completely_different_secret");

        let token = issuer.issue(Uuid::new_v4(), "test@example.com").unwrap();

        assert!(verifier.verify(&token).is_none());
    }

    #[test]
    fn test_garbage_token_verifies_to_none() {
        let service = TokenService::new("test_secret_for_garbage");

        assert!(service.verify("not-a-jwt").is_none());
        assert!(service.verify("").is_none());
        assert!(service.verify("a.b.c").is_none());
    }
}
