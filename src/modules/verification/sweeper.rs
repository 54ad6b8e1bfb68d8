use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use super::service::VerificationService;

/// Background loop that periodically purges expired verification records.
pub async fn run_sweeper(service: Arc<VerificationService>, every: Duration) {
    let mut interval = tokio::time::interval(every);

    loop {
        interval.tick().await;

        match service.sweep_expired(Utc::now()).await {
            Ok(0) => {}
            Ok(deleted) => {
                tracing::info!("cleaned up {} expired verification tokens", deleted);
            }
            Err(e) => {
                tracing::warn!("verification sweep failed: {}", e);
            }
        }
    }
}
