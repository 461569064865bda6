use super::types::{ShardRouting, ShardRoutingState};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All physical copies of one logical shard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexShardRoutingTable {
    pub shard_id: u32,
    #[serde(default)]
    pub copies: Vec<ShardRouting>,
}

impl IndexShardRoutingTable {
    /// Creates an empty table for `shard_id`.
    pub fn new(shard_id: u32) -> Self {
        Self {
            shard_id,
            copies: Vec::new(),
        }
    }

    /// Appends a copy of this shard.
    pub fn with_copy(mut self, index: &str, primary: bool, state: ShardRoutingState) -> Self {
        self.copies
            .push(ShardRouting::new(index, self.shard_id, primary, state));
        self
    }

    /// Returns the copies of this shard.
    pub fn copies(&self) -> &[ShardRouting] {
        &self.copies
    }

    /// Number of copies routed for this shard.
    pub fn size(&self) -> usize {
        self.copies.len()
    }
}

/// Placement of every shard of one index, keyed by shard id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexRoutingTable {
    pub index: String,
    #[serde(default)]
    pub shards: HashMap<u32, IndexShardRoutingTable>,
}

impl IndexRoutingTable {
    /// Creates a routing table with no shards; the state right after index creation.
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            shards: HashMap::new(),
        }
    }

    /// Adds a shard table, replacing any existing table for the same shard id.
    pub fn with_shard(mut self, shard: IndexShardRoutingTable) -> Self {
        self.shards.insert(shard.shard_id, shard);
        self
    }

    /// Returns the table for `shard_id` if routing knows about it.
    pub fn shard(&self, shard_id: u32) -> Option<&IndexShardRoutingTable> {
        self.shards.get(&shard_id)
    }

    /// Iterates `(shard id, table)` pairs in ascending shard id.
    ///
    /// The id is the map key, which is authoritative when a table reports a different
    /// `shard_id`; `validate` flags that disagreement.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &IndexShardRoutingTable)> {
        let mut ids = self.shards.keys().copied().collect::<Vec<_>>();
        ids.sort_unstable();
        ids.into_iter()
            .filter_map(|id| self.shards.get(&id).map(|table| (id, table)))
    }

    pub fn len(&self) -> usize {
        self.shards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.is_empty()
    }
}
