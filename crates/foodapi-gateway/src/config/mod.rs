//! Service config loader (strict parsing).

pub mod schema;

use std::fs;
use std::io::ErrorKind;

use foodapi_core::error::{FoodApiError, Result};

pub use schema::{FoodApiConfig, MetricsSection, ServerSection};

pub fn load_from_file(path: &str) -> Result<FoodApiConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| FoodApiError::Config(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<FoodApiConfig> {
    let cfg: FoodApiConfig = serde_yaml::from_str(s)
        .map_err(|e| FoodApiError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load `path` if it exists, otherwise fall back to built-in defaults.
/// A file that exists but does not parse or validate is still an error.
pub fn load_or_default(path: &str) -> Result<FoodApiConfig> {
    match fs::metadata(path) {
        Ok(_) => load_from_file(path),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!(path, "config file not found, using defaults");
            Ok(FoodApiConfig::default())
        }
        Err(e) => Err(FoodApiError::Config(format!("stat config failed ({path}): {e}"))),
    }
}
