//! Schedule configuration with per-namespace overrides.
//!
//! Limits are configured once cluster-wide and optionally overridden per
//! namespace. Accessors take the namespace explicitly; a namespace with no
//! override block (or with an unset field) falls back to the cluster-wide
//! value.
//!
//! ```toml
//! leader_schedule_limit = 8
//!
//! [namespace.tenant-a]
//! leader_schedule_limit = 2
//! max_replicas = 5
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// The namespace everything belongs to when no classifier policy says
/// otherwise.
pub const DEFAULT_NAMESPACE: &str = "global";

/// Result type alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading schedule configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Cluster-wide schedule limits plus per-namespace overrides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Concurrent leader transfers allowed.
    pub leader_schedule_limit: u64,
    /// Concurrent region movements allowed.
    pub region_schedule_limit: u64,
    /// Concurrent replica repairs allowed.
    pub replica_schedule_limit: u64,
    /// Concurrent region merges allowed.
    pub merge_schedule_limit: u64,
    /// Target replica count per region.
    pub max_replicas: usize,
    /// Per-namespace override blocks, keyed by namespace identifier.
    pub namespace: HashMap<String, NamespaceConfig>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            leader_schedule_limit: 4,
            region_schedule_limit: 4,
            replica_schedule_limit: 8,
            merge_schedule_limit: 8,
            max_replicas: 3,
            namespace: HashMap::new(),
        }
    }
}

/// Per-namespace override block. Unset fields fall back to the
/// cluster-wide value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct NamespaceConfig {
    pub leader_schedule_limit: Option<u64>,
    pub region_schedule_limit: Option<u64>,
    pub replica_schedule_limit: Option<u64>,
    pub merge_schedule_limit: Option<u64>,
    pub max_replicas: Option<usize>,
}

impl ScheduleConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    fn ns(&self, namespace: &str) -> Option<&NamespaceConfig> {
        self.namespace.get(namespace)
    }

    /// Leader transfer quota for `namespace`.
    pub fn leader_schedule_limit(&self, namespace: &str) -> u64 {
        self.ns(namespace)
            .and_then(|n| n.leader_schedule_limit)
            .unwrap_or(self.leader_schedule_limit)
    }

    /// Region movement quota for `namespace`.
    pub fn region_schedule_limit(&self, namespace: &str) -> u64 {
        self.ns(namespace)
            .and_then(|n| n.region_schedule_limit)
            .unwrap_or(self.region_schedule_limit)
    }

    /// Replica repair quota for `namespace`.
    pub fn replica_schedule_limit(&self, namespace: &str) -> u64 {
        self.ns(namespace)
            .and_then(|n| n.replica_schedule_limit)
            .unwrap_or(self.replica_schedule_limit)
    }

    /// Region merge quota for `namespace`.
    pub fn merge_schedule_limit(&self, namespace: &str) -> u64 {
        self.ns(namespace)
            .and_then(|n| n.merge_schedule_limit)
            .unwrap_or(self.merge_schedule_limit)
    }

    /// Target replica count for `namespace`.
    pub fn max_replicas(&self, namespace: &str) -> usize {
        self.ns(namespace)
            .and_then(|n| n.max_replicas)
            .unwrap_or(self.max_replicas)
    }
}
