use std::collections::HashMap;

/// Result of looking a variable up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvValue {
    Missing,
    Set(String),
    /// Present, but not valid UTF-8.
    NotUnicode,
}

/// Read-only view of environment variables.
pub trait EnvSource {
    fn lookup(&self, key: &str) -> EnvValue;
}

/// The real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn lookup(&self, key: &str) -> EnvValue {
        match std::env::var_os(key) {
            None => EnvValue::Missing,
            Some(os) => os.into_string().map_or(EnvValue::NotUnicode, EnvValue::Set),
        }
    }
}

impl EnvSource for HashMap<String, String> {
    fn lookup(&self, key: &str) -> EnvValue {
        self.get(key)
            .map_or(EnvValue::Missing, |v| EnvValue::Set(v.clone()))
    }
}

impl EnvSource for HashMap<&str, &str> {
    fn lookup(&self, key: &str) -> EnvValue {
        self.get(key)
            .map_or(EnvValue::Missing, |v| EnvValue::Set(v.to_string()))
    }
}
