//! Common test utilities for cds-bias-lab
//!
//! - CSV question bank fixtures written to temporary directories
//! - Scripted `CompletionService` implementations

pub mod fixtures;

pub use fixtures::{BankFixture, SAMPLE_BANK};
pub use services::{ScriptedService, UnreachableService};

/// Skip test if environment variable is not set
#[macro_export]
macro_rules! skip_without_env {
    ($var:expr) => {
        if std::env::var($var).is_err() {
            eprintln!("Skipping test: {} environment variable not set", $var);
            return;
        }
    };
}
