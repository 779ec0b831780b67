use super::CheckStatus;
use crate::report::Reporter;
use crate::supabase::SupabaseClient;
use std::io::Write;
use tracing::info;

/// Row-level-security policies cannot be read through PostgREST with the
/// service key, so this only reminds the operator to review them.
pub fn check_policies<W: Write>(client: &SupabaseClient, out: &mut Reporter<W>) -> CheckStatus {
    out.section("🔒", "Checking RLS policies...");
    info!(rest_url = %client.rest_url(), "RLS policies not verified programmatically");
    out.info("RLS policies must be reviewed manually in the Supabase Dashboard");
    out.detail("Go to: Authentication > Policies");
    CheckStatus::Manual
}
