//! Read-only view of shard placement consumed by health derivation.
//!
//! Routing tables are built and mutated elsewhere in the cluster layer; this module only
//! carries the facts health needs: which copies exist for each shard and what state they are in.

mod metadata;
mod routing_table;
mod types;
mod validate;

pub use metadata::IndexMetadata;
pub use routing_table::{IndexRoutingTable, IndexShardRoutingTable};
pub use types::{ShardCopy, ShardRouting, ShardRoutingState};
