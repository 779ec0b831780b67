use crate::report::Reporter;
use crate::supabase::{Select, SupabaseClient};
use serde_json::Value;
use std::io::Write;
use tracing::warn;

/// Accessibility of each probed table, in probe order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableReport {
    results: Vec<(String, bool)>,
}

impl TableReport {
    pub fn all_accessible(&self) -> bool {
        self.results.iter().all(|(_, ok)| *ok)
    }

    pub fn is_accessible(&self, table: &str) -> Option<bool> {
        self.results
            .iter()
            .find(|(name, _)| name == table)
            .map(|(_, ok)| *ok)
    }

    pub fn inaccessible(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|(_, ok)| !ok)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// Read at most one row from each table. A failing table does not stop the
/// others from being checked.
pub async fn check_tables<W: Write>(
    client: &SupabaseClient,
    tables: &[&str],
    out: &mut Reporter<W>,
) -> TableReport {
    out.section("📊", "Checking database tables...");

    let probe = Select::all().limit(1);
    let mut results = Vec::with_capacity(tables.len());
    for &table in tables {
        let ok = match client.select::<Value>(table, &probe).await {
            Ok(_) => {
                out.ok(format!("Table '{table}' exists and is accessible"));
                true
            }
            Err(e) => {
                warn!(table, error = %e, "table probe failed");
                out.fail(format!("Table '{table}' is missing or not accessible: {e}"));
                false
            }
        };
        results.push((table.to_string(), ok));
    }

    TableReport { results }
}
