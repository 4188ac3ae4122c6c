//! Clinic server: reads settings from env (and `.env`), creates the database and schema
//! if missing, then serves every clinic resource.

use clinic_backend::{
    app, apply_migrations, connect, ensure_database_exists, logging::init_tracing, AppState,
    ClinicModel, Settings,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;
    init_tracing();

    ensure_database_exists(&settings.database_url).await?;
    let pool = connect(&settings).await?;

    let model = ClinicModel::new(settings.schema.clone());
    apply_migrations(&pool, &model).await?;
    tracing::info!(
        schema = %model.schema(),
        entities = model.entities().len(),
        "schema ready"
    );

    let router = app(AppState::new(pool, model), settings.body_limit);

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
