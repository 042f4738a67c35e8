use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use sqlx::PgPool;

use taskpad::auth::TokenService;
use taskpad::config::Config;
use taskpad::routes;
use taskpad::services::{AuthService, TaskService};
use taskpad::store::{TaskStore, UserStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    let tokens = TokenService::new(&config.jwt_secret);
    let auth_service = AuthService::new(UserStore::new(pool.clone()), tokens.clone());
    let task_service = TaskService::new(TaskStore::new(pool.clone()));

    log::info!("Starting taskpad server at {}", config.server_url());

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(tokens.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(task_service.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::health::health)
            .service(web::scope("/api").configure(routes::config))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
