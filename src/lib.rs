pub mod checks;
pub mod config;
pub mod env_source;
pub mod error;
pub mod report;
pub mod runner;
pub mod supabase;
pub mod types;

pub use config::Config;
pub use error::DoctorError;
pub use runner::{RunSummary, run};
pub use supabase::SupabaseClient;
