//! Registry configuration.

use serde::{Deserialize, Serialize};

use crate::error::GatewayResult;
use crate::naming::DEFAULT_ROOT_NAMESPACE;

pub const ROOT_NAMESPACE_ENV: &str = "ARGENTUM_ROOT_NAMESPACE";
pub const GATEWAYS_ENV: &str = "ARGENTUM_GATEWAYS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Namespace short gateway names resolve under.
    pub root_namespace: String,
    /// Candidates probed by `GatewayFactory::find`.
    pub supported_gateways: Vec<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            root_namespace: DEFAULT_ROOT_NAMESPACE.to_string(),
            supported_gateways: vec!["Offline".to_string()],
        }
    }
}

impl RegistryConfig {
    /// Parse either a flat config object or a package manifest carrying the
    /// candidates under `extra.gateways`.
    pub fn from_json(input: &str) -> GatewayResult<Self> {
        let value: serde_json::Value = serde_json::from_str(input)?;

        if let Some(gateways) = value.pointer("/extra/gateways") {
            let supported_gateways = serde_json::from_value(gateways.clone())?;
            return Ok(Self {
                supported_gateways,
                ..Self::default()
            });
        }

        Ok(serde_json::from_value(value)?)
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an environment-like lookup; unset or empty values keep
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        match lookup(ROOT_NAMESPACE_ENV).map(|v| v.trim().trim_matches('\\').to_string()) {
            Some(root) if !root.is_empty() => config.root_namespace = root,
            _ => tracing::warn!(
                var = ROOT_NAMESPACE_ENV,
                default = %config.root_namespace,
                "root namespace not configured, using default"
            ),
        }

        let gateways: Vec<String> = lookup(GATEWAYS_ENV)
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::to_string)
            .collect();
        if gateways.is_empty() {
            tracing::warn!(
                var = GATEWAYS_ENV,
                default = ?config.supported_gateways,
                "supported gateways not configured, using default"
            );
        } else {
            config.supported_gateways = gateways;
        }

        config
    }
}
