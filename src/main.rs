use std::sync::{Arc, Once};
use tracing_subscriber::{EnvFilter, fmt};

use monthly_finance_server::config::Config;
use monthly_finance_server::database;
use monthly_finance_server::db_store::LibsqlStore;
use monthly_finance_server::handlers::{self, AppState};
use monthly_finance_server::month::SystemClock;
use monthly_finance_server::service::FinanceService;

static TRACING_INIT: Once = Once::new();

fn init_tracing(default_level: &str) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level));
        fmt().with_env_filter(filter).init();
    });
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // load environment variables
    dotenv::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(&config.log_level);

    let db = database::init_db(&config.data_path).await?;
    let service = FinanceService::new(
        LibsqlStore::new(db),
        SystemClock::new(config.business_offset),
    );
    let state = AppState {
        service: Arc::new(service),
    };

    let app = handlers::router(state, config.cors_allowed_origin.clone());

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!(
        address = %bind_address,
        utc_offset = %config.business_offset,
        "server running"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
