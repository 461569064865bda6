//! Shard- and index-level health derived from a routing snapshot.

mod index;
mod rollup;
mod shard;
mod status;

pub use index::IndexHealth;
pub use rollup::HealthRollup;
pub use shard::ShardHealth;
pub use status::HealthStatus;
