use crate::config::ALLOWLIST_TABLE;
use crate::report::Reporter;
use crate::supabase::{Select, SupabaseClient};
use crate::types::AllowedUser;
use std::io::Write;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowlistStatus {
    /// At least one active user.
    Populated,
    Empty,
    NoneActive,
    QueryFailed,
}

#[derive(Debug, Clone)]
pub struct AllowlistReport {
    pub status: AllowlistStatus,
    pub users: Vec<AllowedUser>,
}

impl AllowlistReport {
    pub fn is_ok(&self) -> bool {
        self.status == AllowlistStatus::Populated
    }

    pub fn active_count(&self) -> usize {
        self.users.iter().filter(|u| u.activo).count()
    }
}

/// List every allow-listed user. Problems here are warnings only.
pub async fn check_allowlist<W: Write>(
    client: &SupabaseClient,
    out: &mut Reporter<W>,
) -> AllowlistReport {
    out.section("👥", "Checking allow-listed users...");

    let users = match client
        .select::<AllowedUser>(ALLOWLIST_TABLE, &Select::all())
        .await
    {
        Ok(selected) => selected.rows,
        Err(e) => {
            warn!(table = ALLOWLIST_TABLE, error = %e, "allow-list query failed");
            out.fail(format!("Error checking allow-listed users: {e}"));
            return AllowlistReport {
                status: AllowlistStatus::QueryFailed,
                users: Vec::new(),
            };
        }
    };

    if users.is_empty() {
        out.warn("No allow-listed users in the database");
        return AllowlistReport {
            status: AllowlistStatus::Empty,
            users,
        };
    }

    out.ok(format!("Found {} allow-listed user(s):", users.len()));
    for user in &users {
        let state = if user.activo { "✅ ACTIVE" } else { "❌ INACTIVE" };
        out.detail(format!(
            "- {} ({}) - {state}",
            user.display_email(),
            user.display_name()
        ));
    }

    let active = users.iter().filter(|u| u.activo).count();
    info!(total = users.len(), active, "allow-list loaded");
    let status = if active == 0 {
        out.warn("No active users");
        AllowlistStatus::NoneActive
    } else {
        AllowlistStatus::Populated
    };
    AllowlistReport { status, users }
}
