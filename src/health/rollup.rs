use super::shard::ShardHealth;
use super::status::HealthStatus;

/// Partial aggregate of shard health.
///
/// `combine` is commutative and associative with `identity` as its neutral element, so
/// folding shard snapshots in any order yields the same totals and status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthRollup {
    pub active_primary_shards: u32,
    pub active_shards: u32,
    pub relocating_shards: u32,
    pub initializing_shards: u32,
    pub unassigned_shards: u32,
    pub status: HealthStatus,
}

impl HealthRollup {
    /// The empty aggregate: zero totals and the weakest severity.
    pub const fn identity() -> Self {
        Self {
            active_primary_shards: 0,
            active_shards: 0,
            relocating_shards: 0,
            initializing_shards: 0,
            unassigned_shards: 0,
            status: HealthStatus::Green,
        }
    }

    /// The aggregate of a single shard.
    pub fn of_shard(shard: &ShardHealth) -> Self {
        Self {
            active_primary_shards: u32::from(shard.is_primary_active()),
            active_shards: shard.active_copies(),
            relocating_shards: shard.relocating_copies(),
            initializing_shards: shard.initializing_copies(),
            unassigned_shards: shard.unassigned_copies(),
            status: shard.status(),
        }
    }

    /// Merges two aggregates; totals add up and the more severe status wins.
    pub fn combine(self, other: Self) -> Self {
        Self {
            active_primary_shards: self
                .active_primary_shards
                .saturating_add(other.active_primary_shards),
            active_shards: self.active_shards.saturating_add(other.active_shards),
            relocating_shards: self.relocating_shards.saturating_add(other.relocating_shards),
            initializing_shards: self
                .initializing_shards
                .saturating_add(other.initializing_shards),
            unassigned_shards: self.unassigned_shards.saturating_add(other.unassigned_shards),
            status: self.status.worse(other.status),
        }
    }

    /// Folds any collection of shard snapshots.
    pub fn over<'a, I>(shards: I) -> Self
    where
        I: IntoIterator<Item = &'a ShardHealth>,
    {
        shards
            .into_iter()
            .map(HealthRollup::of_shard)
            .fold(HealthRollup::identity(), HealthRollup::combine)
    }
}

impl Default for HealthRollup {
    fn default() -> Self {
        Self::identity()
    }
}
