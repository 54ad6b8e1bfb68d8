pub mod collectors;
pub mod registry;

pub use collectors::*;
pub use registry::MetricsRegistry;
