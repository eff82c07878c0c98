pub mod compare;
pub mod drift;
pub mod history;
pub mod init;

pub use compare::{execute_compare, CompareOutcome, CompareRequest};
pub use drift::{execute_drift, DriftStatus};
pub use history::execute_history;
pub use init::{execute_init, InitResult};

#[cfg(feature = "cli")]
pub use compare::print_compare_summary;
#[cfg(feature = "cli")]
pub use drift::print_drift_summary;
#[cfg(feature = "cli")]
pub use history::print_history_summary;
#[cfg(feature = "cli")]
pub use init::print_init_summary;
