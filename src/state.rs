//! Shared application state for all routes.

use crate::model::ClinicModel;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub model: Arc<ClinicModel>,
}

impl AppState {
    pub fn new(pool: PgPool, model: ClinicModel) -> Self {
        AppState {
            pool,
            model: Arc::new(model),
        }
    }
}
