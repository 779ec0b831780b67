use crate::config::REQUIRED_VARIABLES;
use crate::env_source::{EnvSource, EnvValue};
use crate::report::Reporter;
use std::io::Write;
use tracing::debug;

const MASK_PREFIX_CHARS: usize = 10;

/// Presence and value of each required variable, in reporting order.
/// Empty values are recorded as missing.
#[derive(Debug, Clone, Default)]
pub struct EnvReport {
    vars: Vec<(&'static str, EnvValue)>,
}

impl EnvReport {
    pub fn is_ok(&self) -> bool {
        self.vars.iter().all(|(_, v)| matches!(v, EnvValue::Set(_)))
    }

    pub fn missing(&self) -> Vec<&'static str> {
        self.names_where(|v| *v == EnvValue::Missing)
    }

    /// Set, but not readable as UTF-8.
    pub fn unreadable(&self) -> Vec<&'static str> {
        self.names_where(|v| *v == EnvValue::NotUnicode)
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(n, _)| *n == name)
            .and_then(|(_, v)| match v {
                EnvValue::Set(s) => Some(s.as_str()),
                _ => None,
            })
    }

    fn names_where(&self, pred: impl Fn(&EnvValue) -> bool) -> Vec<&'static str> {
        self.vars
            .iter()
            .filter(|(_, v)| pred(v))
            .map(|(name, _)| *name)
            .collect()
    }
}

/// Echo form of a configured value. Anything that looks like a credential
/// keeps only a short prefix.
pub fn mask_value(name: &str, value: &str) -> String {
    if !(name.contains("KEY") || name.contains("SECRET")) {
        return value.to_string();
    }
    if value.chars().count() > MASK_PREFIX_CHARS {
        let prefix: String = value.chars().take(MASK_PREFIX_CHARS).collect();
        format!("{prefix}...")
    } else {
        "***".to_string()
    }
}

/// Check that every required variable is set to a non-empty value.
pub fn check_environment<E, W>(env: &E, out: &mut Reporter<W>) -> EnvReport
where
    E: EnvSource + ?Sized,
    W: Write,
{
    out.section("📋", "Checking environment variables...");

    let mut vars = Vec::with_capacity(REQUIRED_VARIABLES.len());
    for (name, description) in REQUIRED_VARIABLES {
        let value = match env.lookup(name) {
            EnvValue::Set(v) if v.is_empty() => EnvValue::Missing,
            other => other,
        };
        match &value {
            EnvValue::Set(v) => out.ok(format!("{name}: {}", mask_value(name, v))),
            EnvValue::Missing => out.fail(format!("{name}: NOT SET - {description}")),
            EnvValue::NotUnicode => {
                out.fail(format!("{name}: SET BUT NOT VALID UTF-8 - {description}"))
            }
        }
        debug!(variable = name, present = value != EnvValue::Missing);
        vars.push((name, value));
    }

    EnvReport { vars }
}
