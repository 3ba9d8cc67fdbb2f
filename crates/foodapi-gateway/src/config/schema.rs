use std::net::SocketAddr;

use foodapi_core::error::{FoodApiError, Result};
use foodapi_core::metrics::BucketSpec;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FoodApiConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub metrics: MetricsSection,
}

impl Default for FoodApiConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            metrics: MetricsSection::default(),
        }
    }
}

impl FoodApiConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(FoodApiError::Config(format!(
                "unsupported config version {}",
                self.version
            )));
        }

        self.server.validate()?;
        self.metrics.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self { listen: default_listen() }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            FoodApiError::Config(format!("server.listen must be a socket address ({}): {e}", self.listen))
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsSection {
    #[serde(default = "default_metrics_path")]
    pub path: String,

    #[serde(default)]
    pub duration_buckets: BucketSpec,
}

impl Default for MetricsSection {
    fn default() -> Self {
        Self {
            path: default_metrics_path(),
            duration_buckets: BucketSpec::default(),
        }
    }
}

impl MetricsSection {
    pub fn validate(&self) -> Result<()> {
        if !self.path.starts_with('/') || self.path.len() < 2 {
            return Err(FoodApiError::Config(
                "metrics.path must start with '/' and name a path".into(),
            ));
        }
        if matches!(self.path.as_str(), "/health" | "/orders") {
            return Err(FoodApiError::Config(format!(
                "metrics.path {} collides with an API route",
                self.path
            )));
        }
        self.duration_buckets
            .buckets()
            .map_err(|e| FoodApiError::Config(format!("metrics.duration_buckets: {e}")))?;
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_metrics_path() -> String {
    "/metrics".into()
}
