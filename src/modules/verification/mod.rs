pub mod crud;
pub mod interface;
pub mod model;
pub mod service;
pub mod sweeper;

pub use interface::{VerificationError, VerificationStore};
pub use model::EmailVerification;
pub use service::{IssueOutcome, VerificationService};
