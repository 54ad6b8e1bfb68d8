use std::sync::Arc;

use super::MetricsRegistry;

/// Collector for verification lifecycle metrics
#[derive(Clone)]
pub struct VerificationMetricsCollector {
    metrics: Arc<MetricsRegistry>,
}

impl VerificationMetricsCollector {
    pub fn new(metrics: Arc<MetricsRegistry>) -> Self {
        Self { metrics }
    }

    pub fn record_issued(&self) {
        self.metrics
            .verification_issue_total
            .with_label_values(&["issued"])
            .inc();
    }

    pub fn record_suppressed(&self) {
        self.metrics
            .verification_issue_total
            .with_label_values(&["suppressed"])
            .inc();
    }

    pub fn record_check(&self, outcome: &str) {
        self.metrics
            .verification_check_total
            .with_label_values(&[outcome])
            .inc();
    }

    pub fn record_swept(&self, deleted: u64) {
        self.metrics
            .verification_swept_total
            .with_label_values(&["deleted"])
            .inc_by(deleted as f64);
    }
}

/// Collector for notification dispatch metrics
#[derive(Clone)]
pub struct DispatchMetricsCollector {
    metrics: Arc<MetricsRegistry>,
}

impl DispatchMetricsCollector {
    pub fn new(metrics: Arc<MetricsRegistry>) -> Self {
        Self { metrics }
    }

    pub fn record_published(&self) {
        self.metrics
            .notification_publish_total
            .with_label_values(&["published"])
            .inc();
    }

    pub fn record_failed(&self) {
        self.metrics
            .notification_publish_total
            .with_label_values(&["failed"])
            .inc();
    }
}

/// Collector for object storage metrics
#[derive(Clone)]
pub struct StorageMetricsCollector {
    metrics: Arc<MetricsRegistry>,
}

impl StorageMetricsCollector {
    pub fn new(metrics: Arc<MetricsRegistry>) -> Self {
        Self { metrics }
    }

    pub fn record(&self, operation: &str, outcome: &str) {
        self.metrics
            .storage_operation_total
            .with_label_values(&[operation, outcome])
            .inc();
    }
}
