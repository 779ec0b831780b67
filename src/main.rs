use chat_doctor::config::{EnvFile, load_env_file};
use chat_doctor::{Config, env_source::ProcessEnv, report::Reporter};
use mimalloc::MiMalloc;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cfg = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("❌ {e}");
            return ExitCode::FAILURE;
        }
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match load_env_file(&cfg.env_file) {
        Ok(EnvFile::Loaded) => {
            info!(path = %cfg.env_file.display(), "loaded env file");
            if Config::load().is_ok_and(|reloaded| reloaded != cfg) {
                warn!(
                    path = %cfg.env_file.display(),
                    "CHAT_DOCTOR_* keys in the env file are ignored; export them instead"
                );
            }
        }
        Ok(EnvFile::NotFound) => {
            info!(path = %cfg.env_file.display(), "env file not found; using process environment");
        }
        Err(e) => warn!(path = %cfg.env_file.display(), error = %e, "failed to load env file"),
    }

    info!(
        env_file = %cfg.env_file.display(),
        proxy = %cfg.proxy.as_ref().map(|u| u.as_str()).unwrap_or("<none>"),
        timeout_secs = cfg.timeout_secs,
        probe_retries = cfg.probe_retries,
    );

    let stdout = std::io::stdout();
    let mut out = Reporter::new(stdout.lock());
    let summary = chat_doctor::run(&ProcessEnv, &cfg, &mut out).await;

    if summary.exit_code() == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
