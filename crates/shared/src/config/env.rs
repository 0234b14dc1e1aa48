use anyhow::{Context, Result, anyhow};
use std::str::FromStr;

/// Source of configuration values, `std::env::var` in production and a map in tests.
pub trait EnvLookup {
    fn lookup(&self, key: &str) -> Option<String>;
}

impl<F> EnvLookup for F
where
    F: Fn(&str) -> Option<String>,
{
    fn lookup(&self, key: &str) -> Option<String> {
        self(key)
    }
}

pub fn required(env: &impl EnvLookup, key: &str) -> Result<String> {
    env.lookup(key)
        .filter(|value| !value.trim().is_empty())
        .with_context(|| format!("Missing environment variable: {key}"))
}

pub fn parse_or_default<T>(env: &impl EnvLookup, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env.lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        None => Ok(default),
    }
}

pub fn parse_bool(env: &impl EnvLookup, key: &str, default: bool) -> Result<bool> {
    match env.lookup(key).as_deref().map(str::trim) {
        None => Ok(default),
        Some("true") | Some("1") => Ok(true),
        Some("false") | Some("0") => Ok(false),
        Some(other) => Err(anyhow!(
            "{key} must be 'true' or 'false', got '{other}'"
        )),
    }
}
