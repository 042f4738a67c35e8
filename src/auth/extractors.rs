use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, Error as ActixError, FromRequest, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::auth::token::TokenService;
use crate::error::AppError;

/// The identity resolved from a request's bearer token.
///
/// Using this extractor on a handler makes the route authenticated: the
/// `Authorization: Bearer <token>` header is parsed and verified against
/// the shared [`TokenService`] before the handler body runs, and any
/// missing, malformed, expired, or forged token answers 401.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(resolve_user(req).map_err(Into::into))
    }
}

fn resolve_user(req: &HttpRequest) -> Result<AuthenticatedUser, AppError> {
    let tokens = req
        .app_data::<web::Data<TokenService>>()
        .ok_or_else(|| AppError::Internal("TokenService not configured".to_string()))?;

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Missing token".to_string()))?;

    match tokens.verify(token) {
        Some(claims) => Ok(AuthenticatedUser {
            id: claims.sub,
            email: claims.email,
        }),
        None => Err(AppError::Unauthorized("Invalid token".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::dev::Payload;
    use actix_web::http::StatusCode;
    use actix_web::test;

    fn service() -> TokenService {
        TokenService::new("extractor_test_secret")
    }

    #[actix_rt::test]
    async fn test_extractor_accepts_valid_bearer() {
        let tokens = service();
        let user_id = Uuid::new_v4();
        let token = tokens.issue(user_id, "alice@example.com").unwrap();

        let req = test::TestRequest::default()
            .app_data(web::Data::new(tokens))
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_http_request();

        let mut payload = Payload::None;
        let user = AuthenticatedUser::from_request(&req, &mut payload)
            .await
            .expect("valid token should extract");
        assert_eq!(user.id, user_id);
        assert_eq!(user.email, "alice@example.com");
    }

    #[actix_rt::test]
    async fn test_extractor_rejects_missing_header() {
        let req = test::TestRequest::default()
            .app_data(web::Data::new(service()))
            .to_http_request();

        let mut payload = Payload::None;
        let err = AuthenticatedUser::from_request(&req, &mut payload)
            .await
            .expect_err("missing header should be rejected");
        assert_eq!(err.error_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_rt::test]
    async fn test_extractor_rejects_non_bearer_scheme() {
        let req = test::TestRequest::default()
            .app_data(web::Data::new(service()))
            .insert_header((header::AUTHORIZATION, "Basic dXNlcjpwYXNz"))
            .to_http_request();

        let mut payload = Payload::None;
        let err = AuthenticatedUser::from_request(&req, &mut payload)
            .await
            .expect_err("non-bearer scheme should be rejected");
        assert_eq!(err.error_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_rt::test]
    async fn test_extractor_rejects_garbage_token() {
        let req = test::TestRequest::default()
            .app_data(web::Data::new(service()))
            .insert_header((header::AUTHORIZATION, "Bearer not-a-jwt"))
            .to_http_request();

        let mut payload = Payload::None;
        let err = AuthenticatedUser::from_request(&req, &mut payload)
            .await
            .expect_err("garbage token should be rejected");
        assert_eq!(err.error_response().status(), StatusCode::UNAUTHORIZED);
    }
}
