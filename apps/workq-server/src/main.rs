use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};
use workq_core::{Expirer, Registry};
use workq_server::app_state::AppState;
use workq_server::config::Config;
use workq_server::router::build_router;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cfg = Config::from_env();
    let registry = Arc::new(Registry::new(cfg.default_lease.as_millis() as u64));
    // Keep the sweeper alive for the lifetime of the process; its Drop
    // signals shutdown, which matters for tests but not for this binary.
    let _expirer = Expirer::spawn(registry.clone(), cfg.sweep_interval);

    let state = AppState::new(registry);
    let app = build_router(state);

    let addr = SocketAddr::from((cfg.bind, cfg.port));
    tracing::info!(%addr, "workq-server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
