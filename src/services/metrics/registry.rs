use std::sync::Arc;

use prometheus::{CounterVec, Encoder, Opts, Registry, TextEncoder};

/// Central metrics registry for the product service core
pub struct MetricsRegistry {
    registry: Registry,

    // Verification lifecycle
    pub verification_issue_total: CounterVec,
    pub verification_check_total: CounterVec,
    pub verification_swept_total: CounterVec,

    // Notification dispatch
    pub notification_publish_total: CounterVec,

    // Object storage
    pub storage_operation_total: CounterVec,
}

impl MetricsRegistry {
    pub fn new() -> Result<Arc<Self>, prometheus::Error> {
        let registry = Registry::new();

        let verification_issue_total = CounterVec::new(
            Opts::new(
                "verification_issue_total",
                "Verification token issue attempts by outcome",
            ),
            &["outcome"],
        )?;

        let verification_check_total = CounterVec::new(
            Opts::new(
                "verification_check_total",
                "Verification attempts by outcome",
            ),
            &["outcome"],
        )?;

        let verification_swept_total = CounterVec::new(
            Opts::new(
                "verification_swept_total",
                "Expired verification records removed by the sweep",
            ),
            &["outcome"],
        )?;

        let notification_publish_total = CounterVec::new(
            Opts::new(
                "notification_publish_total",
                "Notification publishes by outcome",
            ),
            &["outcome"],
        )?;

        let storage_operation_total = CounterVec::new(
            Opts::new(
                "storage_operation_total",
                "Object storage operations by operation and outcome",
            ),
            &["operation", "outcome"],
        )?;

        registry.register(Box::new(verification_issue_total.clone()))?;
        registry.register(Box::new(verification_check_total.clone()))?;
        registry.register(Box::new(verification_swept_total.clone()))?;
        registry.register(Box::new(notification_publish_total.clone()))?;
        registry.register(Box::new(storage_operation_total.clone()))?;

        Ok(Arc::new(Self {
            registry,
            verification_issue_total,
            verification_check_total,
            verification_swept_total,
            notification_publish_total,
            storage_operation_total,
        }))
    }

    /// Export all metrics in the Prometheus text format
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&families, &mut buffer)?;
        Ok(String::from_utf8(buffer).unwrap_or_default())
    }
}
