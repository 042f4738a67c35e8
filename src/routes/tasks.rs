use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::models::{TaskInput, TaskUpdate};
use crate::services::TaskService;

/// Path ids are taken as raw strings so malformed syntax answers 400
/// with the API's own message instead of actix's default path error.
fn parse_task_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest("Invalid task ID format".into()))
}

/// Creates a new task owned by the authenticated user.
///
/// ## Responses:
/// - `201 Created`: `{"id": "<uuid>"}`.
/// - `400 Bad Request`: validation failure (e.g. title under 4
///   characters after trimming).
/// - `401 Unauthorized`: missing or invalid bearer token.
#[post("")]
pub async fn create_task(
    service: web::Data<TaskService>,
    user: AuthenticatedUser,
    payload: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    let id = service.create(user.id, payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(json!({ "id": id })))
}

/// Lists the authenticated user's tasks, most recently created first.
///
/// ## Responses:
/// - `200 OK`: JSON array of tasks (ids serialized as strings).
/// - `401 Unauthorized`: missing or invalid bearer token.
#[get("")]
pub async fn get_tasks(
    service: web::Data<TaskService>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = service.list(user.id).await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Retrieves one of the authenticated user's tasks by id.
///
/// ## Responses:
/// - `200 OK`: the task.
/// - `400 Bad Request`: malformed id.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `404 Not Found`: no such task, or owned by someone else.
#[get("/{id}")]
pub async fn get_task(
    service: web::Data<TaskService>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let task_id = parse_task_id(&path)?;
    let task = service.get(user.id, task_id).await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Partially updates one of the authenticated user's tasks. Only the
/// provided fields are written; each must satisfy the creation
/// constraints.
///
/// ## Responses:
/// - `200 OK`: `{"message": "..."}`.
/// - `400 Bad Request`: malformed id, empty payload, or validation
///   failure.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `404 Not Found`: no such task, or owned by someone else.
/// - `500 Internal Server Error`: unexpected store failure.
#[put("/{id}")]
pub async fn update_task(
    service: web::Data<TaskService>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<TaskUpdate>,
) -> Result<impl Responder, AppError> {
    let task_id = parse_task_id(&path)?;
    service.update(user.id, task_id, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Task updated" })))
}

/// Deletes one of the authenticated user's tasks.
///
/// ## Responses:
/// - `200 OK`: `{"message": "..."}`.
/// - `400 Bad Request`: malformed id.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `404 Not Found`: no such task, or owned by someone else.
#[delete("/{id}")]
pub async fn delete_task(
    service: web::Data<TaskService>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let task_id = parse_task_id(&path)?;
    service.delete(user.id, task_id).await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Task deleted" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenService;
    use crate::store::TaskStore;
    use actix_web::http::header;
    use actix_web::test;
    use sqlx::postgres::PgPoolOptions;

    const TEST_SECRET: &str = "task_route_test_secret";

    // These tests cover the paths that reject before any query runs
    // (auth gate, id syntax, payload shape), so a lazy pool that never
    // dials Postgres is enough.
    async fn test_app() -> impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
    > {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/taskpad_test")
            .expect("lazy pool");

        test::init_service(
            actix_web::App::new()
                .app_data(web::Data::new(TokenService::new(TEST_SECRET)))
                .app_data(web::Data::new(TaskService::new(TaskStore::new(pool))))
                .service(
                    web::scope("/api/tasks")
                        .service(get_tasks)
                        .service(create_task)
                        .service(get_task)
                        .service(update_task)
                        .service(delete_task),
                ),
        )
        .await
    }

    fn bearer(user_id: Uuid) -> String {
        let token = TokenService::new(TEST_SECRET)
            .issue(user_id, "route@example.com")
            .unwrap();
        format!("Bearer {}", token)
    }

    #[actix_rt::test]
    async fn test_task_routes_require_token() {
        let app = test_app().await;

        let req = test::TestRequest::get().uri("/api/tasks").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);

        let req = test::TestRequest::post()
            .uri("/api/tasks")
            .set_json(json!({ "title": "Buy milk", "status": "pending" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);

        let req = test::TestRequest::get()
            .uri("/api/tasks")
            .insert_header((header::AUTHORIZATION, "Bearer garbage"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
    }

    #[actix_rt::test]
    async fn test_malformed_task_id_is_bad_request() {
        let app = test_app().await;
        let auth = bearer(Uuid::new_v4());

        for method in ["GET", "PUT", "DELETE"] {
            let mut req = match method {
                "GET" => test::TestRequest::get(),
                "PUT" => test::TestRequest::put().set_json(json!({ "status": "done" })),
                _ => test::TestRequest::delete(),
            };
            req = req
                .uri("/api/tasks/not-a-uuid")
                .insert_header((header::AUTHORIZATION, auth.clone()));

            let resp = test::call_service(&app, req.to_request()).await;
            assert_eq!(resp.status(), 400, "{} should reject a malformed id", method);
        }
    }

    #[actix_rt::test]
    async fn test_create_task_rejects_short_title() {
        let app = test_app().await;

        let req = test::TestRequest::post()
            .uri("/api/tasks")
            .insert_header((header::AUTHORIZATION, bearer(Uuid::new_v4())))
            .set_json(json!({ "title": "abc", "status": "pending" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Invalid input data");
        let details = body["details"].as_array().expect("details array");
        assert!(details
            .iter()
            .any(|d| d["message"].as_str().unwrap_or("").contains("at least 4")));
    }

    #[actix_rt::test]
    async fn test_update_rejects_empty_payload() {
        let app = test_app().await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/tasks/{}", Uuid::new_v4()))
            .insert_header((header::AUTHORIZATION, bearer(Uuid::new_v4())))
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "No data provided for update");
    }
}
