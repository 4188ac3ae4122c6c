//! Tracing subscriber setup.

pub const DEFAULT_FILTER: &str = "clinic_backend=info,clinic_server=info,tower_http=info";

/// Install the global fmt subscriber. `RUST_LOG` overrides `DEFAULT_FILTER`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER)),
        )
        .init();
}
