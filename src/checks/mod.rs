//! The individual diagnostic checks, in the order the runner invokes them.
//!
//! - `env`: required variables are present
//! - `connectivity`: the backend answers an authenticated read
//! - `tables`: each expected table is readable
//! - `allowlist`: at least one active allow-listed user exists
//! - `policies`: reminder for the manual RLS review

pub mod allowlist;
pub mod connectivity;
pub mod env;
pub mod policies;
pub mod tables;

pub use allowlist::{AllowlistReport, AllowlistStatus, check_allowlist};
pub use connectivity::check_connectivity;
pub use env::{EnvReport, check_environment, mask_value};
pub use policies::check_policies;
pub use tables::{TableReport, check_tables};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Passed,
    /// Reported problem that does not fail the run.
    Warning,
    Failed,
    /// Not attempted because an earlier check failed.
    Skipped,
    /// Nothing was verified; an operator has to look.
    Manual,
}

impl CheckStatus {
    pub fn from_ok(ok: bool) -> Self {
        if ok { Self::Passed } else { Self::Failed }
    }
}
