//! Clinic backend: generic CRUD over a static schema-mapping table, served with axum on PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod logging;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use model::ClinicModel;
pub use routes::{app, common_routes, entity_routes};
pub use service::{CrudService, EntityFacade};
pub use state::AppState;
pub use store::{connect, ensure_database_exists};
