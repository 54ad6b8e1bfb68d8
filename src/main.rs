use std::time::Duration;

use product_service::config::{init_db, Config};
use product_service::modules::verification::sweeper;
use product_service::Core;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Maintenance daemon: periodically purges expired verification records.
#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "product_service=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().expect("Failed to load environment configuration");

    let db = init_db(&config.database_url)
        .await
        .expect("Failed to connect to MySQL");
    tracing::info!("Connected to MySQL");

    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .expect("Failed to run migrations");

    let core = Core::new(db, &config).expect("Failed to wire service core");

    tracing::info!(
        "Verification sweeper running every {}s (token TTL {}s)",
        config.sweep_interval_secs,
        config.verification_ttl_secs
    );

    sweeper::run_sweeper(
        core.verification,
        Duration::from_secs(config.sweep_interval_secs),
    )
    .await;
}
