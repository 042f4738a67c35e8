#![doc = "The `taskpad` library crate."]
#![doc = ""]
#![doc = "A minimal task-management web API: users register and log in, then"]
#![doc = "create, list, read, update, and delete personal tasks. This crate"]
#![doc = "holds the domain models, authentication mechanisms, stores,"]
#![doc = "services, routing configuration, and error handling; the binary"]
#![doc = "(`main.rs`) wires them into a running server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod validation;

pub use crate::auth::TokenService;
pub use crate::error::AppError;
