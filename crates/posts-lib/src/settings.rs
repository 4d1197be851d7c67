//! Store settings read from the environment at cold start.
//!
//! # Environment Variables
//!
//! - `POSTS_TABLE`: DynamoDB table name (default: `Posts`)
//! - `STORE_TIMEOUT_MS`: deadline applied to every store call (default: `10000`)

use std::time::Duration;

use crate::error::{Error, Result};

/// Table used when `POSTS_TABLE` is unset.
pub const DEFAULT_TABLE_NAME: &str = "Posts";

/// Per-call deadline used when `STORE_TIMEOUT_MS` is unset.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(10);

const TABLE_VAR: &str = "POSTS_TABLE";
const TIMEOUT_VAR: &str = "STORE_TIMEOUT_MS";

/// Where posts live and how long a single store call may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    pub table_name: String,
    pub timeout: Duration,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            timeout: DEFAULT_STORE_TIMEOUT,
        }
    }
}

impl StoreSettings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let table_name = match lookup(TABLE_VAR) {
            Some(name) if name.trim().is_empty() => {
                return Err(Error::Config {
                    message: format!("{TABLE_VAR} cannot be empty"),
                })
            }
            Some(name) => name,
            None => DEFAULT_TABLE_NAME.to_string(),
        };

        let timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) => parse_timeout(&raw)?,
            None => DEFAULT_STORE_TIMEOUT,
        };

        Ok(Self {
            table_name,
            timeout,
        })
    }
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    let millis: u64 = raw.trim().parse().map_err(|_| Error::Config {
        message: format!("{TIMEOUT_VAR} must be a whole number of milliseconds, got '{raw}'"),
    })?;
    if millis == 0 {
        return Err(Error::Config {
            message: format!("{TIMEOUT_VAR} must be greater than zero"),
        });
    }
    Ok(Duration::from_millis(millis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let settings = StoreSettings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, StoreSettings::default());
        assert_eq!(settings.table_name, "Posts");
        assert_eq!(settings.timeout, Duration::from_secs(10));
    }

    #[test]
    fn reads_overrides() {
        let settings = StoreSettings::from_lookup(lookup(&[
            ("POSTS_TABLE", "posts-staging"),
            ("STORE_TIMEOUT_MS", "2500"),
        ]))
        .unwrap();
        assert_eq!(settings.table_name, "posts-staging");
        assert_eq!(settings.timeout, Duration::from_millis(2500));
    }

    #[test]
    fn rejects_bad_timeout() {
        let err = StoreSettings::from_lookup(lookup(&[("STORE_TIMEOUT_MS", "soon")])).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));

        let err = StoreSettings::from_lookup(lookup(&[("STORE_TIMEOUT_MS", "0")])).unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn rejects_blank_table() {
        let err = StoreSettings::from_lookup(lookup(&[("POSTS_TABLE", "  ")])).unwrap_err();
        assert!(err.to_string().contains("POSTS_TABLE"));
    }
}
