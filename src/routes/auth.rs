use actix_web::{post, web, HttpResponse, Responder};
use serde_json::json;

use crate::auth::{LoginRequest, RegisterRequest};
use crate::error::AppError;
use crate::services::AuthService;

/// Register a new user.
///
/// ## Responses:
/// - `201 Created`: `{"message": "..."}` on success.
/// - `400 Bad Request`: structured validation details, or a duplicate
///   email.
#[post("/register")]
pub async fn register(
    service: web::Data<AuthService>,
    payload: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    service.register(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "User registered successfully"
    })))
}

/// Authenticate a user.
///
/// ## Responses:
/// - `200 OK`: `{"message": "...", "token": "<jwt>"}`.
/// - `400 Bad Request`: structured validation details.
/// - `401 Unauthorized`: unknown email or wrong password, reported
///   identically.
#[post("/login")]
pub async fn login(
    service: web::Data<AuthService>,
    payload: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let token = service.login(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Login successful",
        "token": token
    })))
}
