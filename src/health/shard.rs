use super::status::HealthStatus;
use crate::routing::ShardCopy;
use serde::{Deserialize, Serialize};

/// Aggregate state of every physical copy of one logical shard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardHealth {
    pub(crate) shard_id: u32,
    pub(crate) primary_active: bool,
    pub(crate) active_copies: u32,
    pub(crate) relocating_copies: u32,
    pub(crate) initializing_copies: u32,
    pub(crate) unassigned_copies: u32,
    pub(crate) status: HealthStatus,
}

impl ShardHealth {
    /// Derives shard health from one pass over the shard's copies.
    ///
    /// A relocating copy counts as active and additionally as relocating; its target is a
    /// separate initializing copy and is counted there. The shard is green only when every
    /// routed copy is active.
    pub fn from_copies<I>(shard_id: u32, copies: I) -> Self
    where
        I: IntoIterator,
        I::Item: ShardCopy,
    {
        let mut health = ShardHealth {
            shard_id,
            primary_active: false,
            active_copies: 0,
            relocating_copies: 0,
            initializing_copies: 0,
            unassigned_copies: 0,
            status: HealthStatus::Red,
        };

        let mut routed_copies = 0u32;
        for copy in copies {
            routed_copies = routed_copies.saturating_add(1);
            if copy.active() {
                health.active_copies += 1;
                if copy.relocating() {
                    health.relocating_copies += 1;
                }
                if copy.primary() {
                    health.primary_active = true;
                }
            } else if copy.initializing() {
                health.initializing_copies += 1;
            } else if copy.unassigned() {
                health.unassigned_copies += 1;
            }
        }

        health.status = if !health.primary_active {
            HealthStatus::Red
        } else if health.active_copies == routed_copies {
            HealthStatus::Green
        } else {
            HealthStatus::Yellow
        };
        health
    }

    pub fn shard_id(&self) -> u32 {
        self.shard_id
    }

    pub fn is_primary_active(&self) -> bool {
        self.primary_active
    }

    pub fn active_copies(&self) -> u32 {
        self.active_copies
    }

    pub fn relocating_copies(&self) -> u32 {
        self.relocating_copies
    }

    pub fn initializing_copies(&self) -> u32 {
        self.initializing_copies
    }

    pub fn unassigned_copies(&self) -> u32 {
        self.unassigned_copies
    }

    pub fn status(&self) -> HealthStatus {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{ShardRouting, ShardRoutingState};

    fn copy(primary: bool, state: ShardRoutingState) -> ShardRouting {
        ShardRouting::new("logs", 0, primary, state)
    }

    #[test]
    fn test_all_copies_active_is_green() {
        let copies = vec![
            copy(true, ShardRoutingState::Started),
            copy(false, ShardRoutingState::Started),
        ];
        let health = ShardHealth::from_copies(0, &copies);
        assert_eq!(health.status(), HealthStatus::Green);
        assert_eq!(health.active_copies(), 2);
        assert!(health.is_primary_active());
    }

    #[test]
    fn test_initializing_replica_is_yellow() {
        let copies = vec![
            copy(true, ShardRoutingState::Started),
            copy(false, ShardRoutingState::Initializing),
        ];
        let health = ShardHealth::from_copies(0, &copies);
        assert_eq!(health.status(), HealthStatus::Yellow);
        assert_eq!(health.active_copies(), 1);
        assert_eq!(health.initializing_copies(), 1);
    }

    #[test]
    fn test_missing_primary_is_red() {
        let copies = vec![
            copy(true, ShardRoutingState::Unassigned),
            copy(false, ShardRoutingState::Unassigned),
        ];
        let health = ShardHealth::from_copies(0, &copies);
        assert_eq!(health.status(), HealthStatus::Red);
        assert_eq!(health.unassigned_copies(), 2);
        assert!(!health.is_primary_active());
    }

    #[test]
    fn test_active_replica_without_primary_is_red() {
        let copies = vec![
            copy(true, ShardRoutingState::Initializing),
            copy(false, ShardRoutingState::Started),
        ];
        let health = ShardHealth::from_copies(0, &copies);
        assert_eq!(health.status(), HealthStatus::Red);
        assert_eq!(health.active_copies(), 1);
    }

    #[test]
    fn test_relocating_copy_counted_as_active_and_relocating() {
        let copies = vec![
            copy(true, ShardRoutingState::Relocating),
            copy(false, ShardRoutingState::Started),
        ];
        let health = ShardHealth::from_copies(0, &copies);
        assert_eq!(health.active_copies(), 2);
        assert_eq!(health.relocating_copies(), 1);
        assert_eq!(health.initializing_copies(), 0);
        assert_eq!(health.status(), HealthStatus::Green);
    }

    #[test]
    fn test_empty_copy_list_is_red() {
        let health = ShardHealth::from_copies(4, Vec::<ShardRouting>::new());
        assert_eq!(health.shard_id(), 4);
        assert!(!health.is_primary_active());
        assert_eq!(health.status(), HealthStatus::Red);
    }
}
