use std::env;

/// Environment configuration
/// Loads and validates environment variables
pub struct Config {
    pub database_url: String,
    pub verification_ttl_secs: i64,
    pub sweep_interval_secs: u64,
    pub notification_topic: String,
    pub notification_endpoint: Option<String>,
    pub storage_endpoint: Option<String>,
    pub storage_bucket: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set".to_string())?;

        let verification_ttl_secs = env::var("VERIFICATION_TTL_SECS")
            .ok()
            .map(|v| {
                v.parse::<i64>()
                    .map_err(|_| "VERIFICATION_TTL_SECS must be an integer".to_string())
            })
            .transpose()?
            .unwrap_or(180);

        if verification_ttl_secs <= 0 {
            return Err("VERIFICATION_TTL_SECS must be positive".to_string());
        }

        let sweep_interval_secs = env::var("SWEEP_INTERVAL_SECS")
            .ok()
            .map(|v| {
                v.parse::<u64>()
                    .map_err(|_| "SWEEP_INTERVAL_SECS must be an integer".to_string())
            })
            .transpose()?
            .unwrap_or(60);

        let notification_topic =
            env::var("NOTIFICATION_TOPIC").unwrap_or_else(|_| "email-verification".to_string());

        // Absent endpoints select the no-op collaborators (local profile).
        let notification_endpoint = env::var("NOTIFICATION_ENDPOINT")
            .ok()
            .filter(|v| !v.trim().is_empty());
        let storage_endpoint = env::var("STORAGE_ENDPOINT")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let storage_bucket =
            env::var("STORAGE_BUCKET").unwrap_or_else(|_| "product-images".to_string());

        Ok(Self {
            database_url,
            verification_ttl_secs,
            sweep_interval_secs,
            notification_topic,
            notification_endpoint,
            storage_endpoint,
            storage_bucket,
        })
    }
}
