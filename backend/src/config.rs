//! Runtime configuration.
//!
//! Read from the process environment, after loading `.env` if present:
//!
//! | Variable           | Default        |
//! |--------------------|----------------|
//! | `PL_DATA_PATH`     | `database.csv` |
//! | `PL_CLEANING_PLAN` | built-in plan  |
//! | `PL_SERVER_PORT`   | `3000`         |
//!
//! CLI flags override these values.

use std::env;
use std::path::PathBuf;

use crate::error::{ConfigError, ConfigResult, PlanResult};
use crate::transform::{default_plan, CleaningPlan};

pub const DEFAULT_DATA_PATH: &str = "database.csv";
pub const DEFAULT_PORT: u16 = 3000;

pub const ENV_DATA_PATH: &str = "PL_DATA_PATH";
pub const ENV_CLEANING_PLAN: &str = "PL_CLEANING_PLAN";
pub const ENV_SERVER_PORT: &str = "PL_SERVER_PORT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Statistics file to load
    pub data_path: PathBuf,
    /// JSON cleaning plan; the built-in plan when unset
    pub plan_path: Option<PathBuf>,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            plan_path: None,
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> ConfigResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build from any variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = get(ENV_DATA_PATH) {
            config.data_path = PathBuf::from(path);
        }
        config.plan_path = get(ENV_CLEANING_PLAN).map(PathBuf::from);
        if let Some(port) = get(ENV_SERVER_PORT) {
            config.port = port.trim().parse().map_err(|_| ConfigError::InvalidVar {
                var: ENV_SERVER_PORT,
                value: port.clone(),
            })?;
        }

        Ok(config)
    }

    /// The cleaning plan to apply.
    pub fn plan(&self) -> PlanResult<CleaningPlan> {
        match &self.plan_path {
            Some(path) => CleaningPlan::from_file(path),
            None => Ok(default_plan()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.data_path, PathBuf::from("database.csv"));
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("PL_DATA_PATH", "/data/epl.csv"),
            ("PL_SERVER_PORT", "8080"),
            ("PL_CLEANING_PLAN", "   "),
        ]))
        .unwrap();
        assert_eq!(config.data_path, PathBuf::from("/data/epl.csv"));
        assert_eq!(config.port, 8080);
        assert!(config.plan_path.is_none());
    }

    #[test]
    fn test_invalid_port() {
        let err = AppConfig::from_lookup(lookup(&[("PL_SERVER_PORT", "http")])).unwrap_err();
        assert!(err.to_string().contains("PL_SERVER_PORT"));
    }

    #[test]
    fn test_plan_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let plan = default_plan();
        file.write_all(plan.to_json().unwrap().as_bytes()).unwrap();

        let config = AppConfig {
            plan_path: Some(file.path().to_path_buf()),
            ..AppConfig::default()
        };
        assert_eq!(config.plan().unwrap(), plan);
    }
}
