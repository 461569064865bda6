// ============================================================================
// Cluster Health Library
// ============================================================================

//! Health of an index's shard set, derived from a routing snapshot.
//!
//! # Examples
//!
//! ```
//! use clusterhealth::{
//!     HealthStatus, IndexHealth, IndexMetadata, IndexRoutingTable, IndexShardRoutingTable,
//!     ShardRoutingState, decode_index_health, encode_index_health,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let metadata = IndexMetadata::new("logs")?
//!     .number_of_shards(1)
//!     .number_of_replicas(1);
//! let routing = IndexRoutingTable::new("logs").with_shard(
//!     IndexShardRoutingTable::new(0)
//!         .with_copy("logs", true, ShardRoutingState::Started)
//!         .with_copy("logs", false, ShardRoutingState::Initializing),
//! );
//!
//! let health = IndexHealth::from_routing(&metadata, &routing);
//! assert_eq!(health.status(), HealthStatus::Yellow);
//!
//! let decoded = decode_index_health(encode_index_health(&health))?;
//! assert_eq!(decoded, health);
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod core;
pub mod health;
pub mod routing;

// Re-export main types for convenience
pub use codec::{
    CodecLimits, StreamInput, StreamOutput, decode_index_health, decode_index_health_with_limits,
    decode_shard_health, encode_index_health, encode_shard_health,
};
pub use crate::core::{HealthError, Result};
pub use health::{HealthRollup, HealthStatus, IndexHealth, ShardHealth};
pub use routing::{
    IndexMetadata, IndexRoutingTable, IndexShardRoutingTable, ShardCopy, ShardRouting,
    ShardRoutingState,
};
