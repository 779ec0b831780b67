use super::env::EnvReport;
use crate::config::{ALLOWLIST_TABLE, Config, SUPABASE_SERVICE_KEY_VAR, SUPABASE_URL_VAR};
use crate::error::DoctorError;
use crate::report::Reporter;
use crate::supabase::{Select, SupabaseClient};
use serde_json::Value;
use std::io::Write;
use tracing::{error, info};

/// Build a client from the configured URL and service key and prove it can
/// read from the backend. Returns the live client on success.
pub async fn check_connectivity<W: Write>(
    env: &EnvReport,
    cfg: &Config,
    out: &mut Reporter<W>,
) -> Option<SupabaseClient> {
    out.section("🔌", "Checking Supabase connection...");

    let (Some(url), Some(key)) = (env.value(SUPABASE_URL_VAR), env.value(SUPABASE_SERVICE_KEY_VAR))
    else {
        out.fail("Cannot verify Supabase credentials: URL or service key missing");
        return None;
    };

    match connect(url, key, cfg).await {
        Ok(client) => {
            out.ok("Supabase connection succeeded");
            Some(client)
        }
        Err(e) => {
            error!(url, error = %e, "Supabase connectivity probe failed");
            out.fail(format!("Error connecting to Supabase: {e}"));
            None
        }
    }
}

async fn connect(url: &str, key: &str, cfg: &Config) -> Result<SupabaseClient, DoctorError> {
    let client = SupabaseClient::new(url, key, cfg)?;
    let probe = Select::all().limit(1).exact_count();
    let selected = client
        .select_with_retry::<Value>(ALLOWLIST_TABLE, &probe, cfg.probe_retries)
        .await?;
    info!(
        rest_url = %client.rest_url(),
        table = ALLOWLIST_TABLE,
        rows = ?selected.total,
        "Supabase reachable"
    );
    Ok(client)
}
