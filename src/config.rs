use crate::error::DoctorError;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Prefix for the doctor's own settings in the process environment.
pub const ENV_PREFIX: &str = "CHAT_DOCTOR_";

pub const SUPABASE_URL_VAR: &str = "NEXT_PUBLIC_SUPABASE_URL";
pub const SUPABASE_ANON_KEY_VAR: &str = "NEXT_PUBLIC_SUPABASE_ANON_KEY";
pub const SUPABASE_SERVICE_KEY_VAR: &str = "SUPABASE_SERVICE_ROLE_KEY";
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const OPENAI_ASSISTANT_ID_VAR: &str = "OPENAI_ASSISTANT_ID";

/// Variables the chat application needs, in reporting order, with a
/// human-readable description shown when one is missing.
pub const REQUIRED_VARIABLES: [(&str, &str); 5] = [
    (SUPABASE_URL_VAR, "Supabase project URL"),
    (SUPABASE_ANON_KEY_VAR, "Supabase public (anon) key"),
    (SUPABASE_SERVICE_KEY_VAR, "Supabase service-role key"),
    (OPENAI_API_KEY_VAR, "OpenAI API key"),
    (OPENAI_ASSISTANT_ID_VAR, "OpenAI assistant ID"),
];

pub const PROFILES_TABLE: &str = "perfiles";
pub const CONVERSATIONS_TABLE: &str = "conversaciones";
pub const MESSAGES_TABLE: &str = "mensajes";
pub const ALLOWLIST_TABLE: &str = "usuarios_permitidos";

pub const REQUIRED_TABLES: [&str; 4] = [
    PROFILES_TABLE,
    CONVERSATIONS_TABLE,
    MESSAGES_TABLE,
    ALLOWLIST_TABLE,
];

/// Settings of the doctor itself, as opposed to the application variables
/// it inspects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub loglevel: String,
    /// Optional dotenv file merged into the process environment before checking.
    /// It is read after this config is extracted, so `CHAT_DOCTOR_*` keys
    /// inside it have no effect on the doctor's own settings.
    pub env_file: PathBuf,
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,
    pub proxy: Option<Url>,
    /// Extra attempts for the connectivity probe on transient failures.
    pub probe_retries: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            loglevel: "warn".to_string(),
            env_file: PathBuf::from(".env.local"),
            connect_timeout_secs: 5,
            timeout_secs: 15,
            proxy: None,
            probe_retries: 0,
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn load() -> Result<Self, DoctorError> {
        Ok(Self::figment().extract()?)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvFile {
    Loaded,
    NotFound,
}

/// Merge a dotenv file into the process environment. Variables that are
/// already set keep their value.
pub fn load_env_file(path: &Path) -> Result<EnvFile, DoctorError> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(EnvFile::Loaded),
        Err(e) if e.not_found() => Ok(EnvFile::NotFound),
        Err(e) => Err(e.into()),
    }
}
