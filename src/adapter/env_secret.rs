//! Secret resolver backed by process environment, with Docker secrets support.
//!
//! A secret named `OMDbAPIKey` is looked up as `OMDBAPIKEY_FILE` (path to a
//! file holding the value) and then `OMDBAPIKEY`. Secret-manager style JSON
//! payloads such as `{"OMDbAPIKey": "abc"}` are unwrapped to the field named
//! after the secret.

use crate::port::SecretResolver;
use std::env;
use std::fs;
use tracing::warn;

#[derive(Clone, Debug, Default)]
pub struct EnvSecretResolver;

impl EnvSecretResolver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SecretResolver for EnvSecretResolver {
    fn get(&self, name: &str) -> Option<String> {
        resolve_with(name, |var| env::var(var).ok(), |path| {
            fs::read_to_string(path)
                .map_err(|e| warn!(path, error = %e, "Failed to read secret file"))
                .ok()
        })
    }
}

/// Environment variable name for a secret: upper-cased, with every
/// non-alphanumeric character replaced by `_`.
#[must_use]
pub fn env_var_name(secret_name: &str) -> String {
    secret_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

fn resolve_with(
    name: &str,
    lookup: impl Fn(&str) -> Option<String>,
    read_file: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    let var = env_var_name(name);
    let raw = match lookup(&format!("{var}_FILE")) {
        Some(path) => read_file(&path)?,
        None => lookup(&var)?,
    };
    unwrap_secret_payload(name, raw.trim())
}

fn unwrap_secret_payload(name: &str, raw: &str) -> Option<String> {
    let value = match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Object(fields)) => match fields.get(name) {
            Some(serde_json::Value::String(inner)) => inner.trim().to_string(),
            _ => return None,
        },
        _ => raw.to_string(),
    };
    (!value.is_empty()).then_some(value)
}
