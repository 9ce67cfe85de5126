use anyhow::Error;
use dotenv::dotenv;
use std::env;
use std::str::FromStr;

pub fn get_env_var(key: &str) -> Result<String, Error> {
    dotenv().ok();
    Ok(env::var(key)?)
}

/// Reads `key`, falling back to `default` when unset or blank.
pub fn env_or_default(key: &str, default: &str) -> String {
    match get_env_var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw.trim().to_string(),
        _ => default.to_string(),
    }
}

pub fn env_parse_or<T: FromStr>(key: &str, default: T) -> T {
    get_env_var(key)
        .ok()
        .and_then(|raw| raw.trim().parse::<T>().ok())
        .unwrap_or(default)
}
