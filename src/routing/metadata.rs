use crate::core::{HealthError, Result};
use serde::{Deserialize, Serialize};

/// Static configuration of an index, independent of where its shards currently live.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexMetadata {
    pub name: String,
    pub number_of_shards: u32,
    #[serde(default)]
    pub number_of_replicas: u32,
}

impl IndexMetadata {
    /// Creates metadata for `name` with one shard and no replicas.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(HealthError::InvalidMetadata(
                "index name must not be empty".to_string(),
            ));
        }
        Ok(Self {
            name,
            number_of_shards: 1,
            number_of_replicas: 0,
        })
    }

    /// Set the configured number of primary shards
    pub fn number_of_shards(mut self, shards: u32) -> Self {
        self.number_of_shards = shards;
        self
    }

    /// Set the configured number of replicas per shard
    pub fn number_of_replicas(mut self, replicas: u32) -> Self {
        self.number_of_replicas = replicas;
        self
    }

    /// Copies each shard is expected to have: one primary plus the replicas.
    pub fn copies_per_shard(&self) -> u32 {
        self.number_of_replicas.saturating_add(1)
    }

    /// Checks metadata loaded from an external source.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(HealthError::InvalidMetadata(
                "index name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
