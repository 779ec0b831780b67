use crate::checks::{
    AllowlistReport, AllowlistStatus, CheckStatus, TableReport, check_allowlist,
    check_connectivity, check_environment, check_policies, check_tables,
};
use crate::config::{ALLOWLIST_TABLE, Config, REQUIRED_TABLES};
use crate::env_source::EnvSource;
use crate::error::DoctorError;
use crate::report::Reporter;
use std::io::Write;
use tracing::error;

pub const TITLE: &str = "🔍 CONFIGURATION CHECK - Chat";

/// What each check concluded during one run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub environment: CheckStatus,
    pub connectivity: CheckStatus,
    pub tables: CheckStatus,
    pub allowlist: CheckStatus,
    pub policies: CheckStatus,
    pub missing_variables: Vec<String>,
    pub unreadable_variables: Vec<String>,
    pub table_report: TableReport,
    pub allowlist_report: Option<AllowlistReport>,
}

impl RunSummary {
    fn skipped_after(environment: CheckStatus, connectivity: CheckStatus) -> Self {
        Self {
            environment,
            connectivity,
            tables: CheckStatus::Skipped,
            allowlist: CheckStatus::Skipped,
            policies: CheckStatus::Skipped,
            missing_variables: Vec::new(),
            unreadable_variables: Vec::new(),
            table_report: TableReport::default(),
            allowlist_report: None,
        }
    }

    /// Environment, connectivity and tables gate the result; the allow-list
    /// and policy checks are advisory.
    pub fn required_passed(&self) -> bool {
        self.environment == CheckStatus::Passed
            && self.connectivity == CheckStatus::Passed
            && self.tables == CheckStatus::Passed
    }

    pub fn exit_code(&self) -> i32 {
        if self.required_passed() { 0 } else { 1 }
    }
}

/// Run every check in order against `env`, writing the report to `out`.
pub async fn run<E, W>(env: &E, cfg: &Config, out: &mut Reporter<W>) -> RunSummary
where
    E: EnvSource + ?Sized,
    W: Write,
{
    out.banner(TITLE);

    let env_report = check_environment(env, out);
    if !env_report.is_ok() {
        let missing = env_report.missing();
        let unreadable = env_report.unreadable();
        out.blank();
        if !missing.is_empty() {
            out.fail(format!("{} environment variable(s) missing", missing.len()));
            let names = missing.iter().map(|s| s.to_string()).collect();
            let err = DoctorError::MissingVariables(names);
            error!(error = %err, "environment check failed");
        }
        if !unreadable.is_empty() {
            out.fail(format!("{} environment variable(s) not valid UTF-8", unreadable.len()));
            error!(unreadable = ?unreadable, "environment check failed");
        }
        out.detail(format!("Set them in your {} file", cfg.env_file.display()));
        out.flush();
        let mut summary = RunSummary::skipped_after(CheckStatus::Failed, CheckStatus::Skipped);
        summary.missing_variables = missing.into_iter().map(String::from).collect();
        summary.unreadable_variables = unreadable.into_iter().map(String::from).collect();
        return summary;
    }

    let Some(client) = check_connectivity(&env_report, cfg, out).await else {
        out.blank();
        out.fail("Could not connect to Supabase");
        out.flush();
        return RunSummary::skipped_after(CheckStatus::Passed, CheckStatus::Failed);
    };

    let table_report = check_tables(&client, &REQUIRED_TABLES, out).await;
    let tables = CheckStatus::from_ok(table_report.all_accessible());
    if tables == CheckStatus::Failed {
        out.blank();
        out.fail(format!(
            "Some tables are missing or not accessible: {}",
            table_report.inaccessible().join(", ")
        ));
        out.detail("Run the SQL migrations from the Supabase Dashboard");
    }

    let allowlist_report = check_allowlist(&client, out).await;
    let allowlist = if allowlist_report.is_ok() {
        CheckStatus::Passed
    } else {
        out.blank();
        match allowlist_report.status {
            AllowlistStatus::QueryFailed => {
                out.warn("Could not read the allow-listed users");
                out.detail(format!(
                    "Check that the '{ALLOWLIST_TABLE}' table matches the expected columns"
                ));
            }
            AllowlistStatus::Empty => {
                out.warn("No allow-listed users");
                out.detail(format!("Add users to the '{ALLOWLIST_TABLE}' table"));
            }
            AllowlistStatus::NoneActive | AllowlistStatus::Populated => {
                out.warn("No active allow-listed users");
                out.detail(format!("Activate users in the '{ALLOWLIST_TABLE}' table"));
            }
        }
        CheckStatus::Warning
    };

    let policies = check_policies(&client, out);

    let summary = RunSummary {
        environment: CheckStatus::Passed,
        connectivity: CheckStatus::Passed,
        tables,
        allowlist,
        policies,
        missing_variables: Vec::new(),
        unreadable_variables: Vec::new(),
        table_report,
        allowlist_report: Some(allowlist_report),
    };
    print_summary(&summary, out);
    out.flush();
    summary
}

fn print_summary<W: Write>(summary: &RunSummary, out: &mut Reporter<W>) {
    out.blank();
    out.banner("📋 SUMMARY");

    if summary.required_passed() && summary.allowlist == CheckStatus::Passed {
        out.ok("All checks passed");
        out.blank();
        out.ok("The system is ready to use");
    } else if summary.required_passed() {
        out.warn("Required checks passed with warnings");
        out.blank();
        out.detail("Review the warnings above before going live");
    } else {
        out.warn("Some checks failed");
        out.blank();
        out.detail("📝 Review the errors above and fix the problems");
    }

    if summary.policies == CheckStatus::Manual {
        out.info("RLS policies: manual review required");
    }
}
