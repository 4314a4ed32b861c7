use std::net::SocketAddr;

use talentflow::{
    config::{get_config, init_config},
    database::{
        pool::{create_pool, run_migrations},
        seed::seed_demo_data,
    },
    routes, AppState,
};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_config()?;
    let config = get_config();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let pool = create_pool(config).await?;
    run_migrations(&pool).await?;

    if config.seed_demo_data {
        seed_demo_data(&pool, config).await?;
    }

    let app_state = AppState::new(pool, config);
    if app_state.faults.is_some() {
        info!(
            failure_rate = config.simulated_failure_rate,
            latency_min_ms = config.simulated_latency_min_ms,
            latency_max_ms = config.simulated_latency_max_ms,
            "simulated network faults enabled"
        );
    }

    let app = routes::router(app_state);

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
