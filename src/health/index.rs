use super::rollup::HealthRollup;
use super::shard::ShardHealth;
use super::status::HealthStatus;
use crate::core::{HealthError, Result};
use crate::routing::{IndexMetadata, IndexRoutingTable};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{Level, event, info_span};

/// Point-in-time health of one index.
///
/// Built once from routing plus static configuration and never patched; a routing change
/// calls for a new snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexHealth {
    pub(crate) index: String,
    pub(crate) number_of_shards: u32,
    pub(crate) number_of_replicas: u32,
    pub(crate) active_primary_shards: u32,
    pub(crate) active_shards: u32,
    pub(crate) relocating_shards: u32,
    pub(crate) initializing_shards: u32,
    pub(crate) unassigned_shards: u32,
    pub(crate) status: HealthStatus,
    #[serde(with = "shards_as_list")]
    pub(crate) shards: HashMap<u32, ShardHealth>,
    #[serde(default)]
    pub(crate) validation_failures: Vec<String>,
}

impl IndexHealth {
    /// Derives index health from the current routing of the index.
    ///
    /// Validation failures of the routing against `metadata` are carried in the snapshot
    /// and force the index red.
    pub fn from_routing(metadata: &IndexMetadata, routing: &IndexRoutingTable) -> Self {
        let span = info_span!("cluster.health.index", index = %metadata.name);
        let _enter = span.enter();

        let validation_failures = routing.validate(metadata);
        if !validation_failures.is_empty() {
            event!(
                Level::WARN,
                failures = validation_failures.len(),
                first = %validation_failures[0],
                "index routing failed validation"
            );
        }

        let shards = routing
            .iter()
            .map(|(shard_id, table)| ShardHealth::from_copies(shard_id, table.copies()));

        let health = Self::new(
            metadata.name.clone(),
            metadata.number_of_shards,
            metadata.number_of_replicas,
            validation_failures,
            shards,
        );
        event!(
            Level::DEBUG,
            status = %health.status,
            shards = health.shards.len(),
            active_shards = health.active_shards,
            unassigned_shards = health.unassigned_shards,
            "index health derived"
        );
        health
    }

    /// Aggregates already derived shard snapshots into an index snapshot.
    ///
    /// When two snapshots share a shard id the later one is kept.
    pub fn new<I>(
        index: impl Into<String>,
        number_of_shards: u32,
        number_of_replicas: u32,
        validation_failures: Vec<String>,
        shards: I,
    ) -> Self
    where
        I: IntoIterator<Item = ShardHealth>,
    {
        let shards = shards
            .into_iter()
            .map(|shard| (shard.shard_id, shard))
            .collect::<HashMap<_, _>>();

        let rollup = HealthRollup::over(shards.values());
        let status = Self::overall_status(&rollup, shards.is_empty(), &validation_failures);

        Self {
            index: index.into(),
            number_of_shards,
            number_of_replicas,
            active_primary_shards: rollup.active_primary_shards,
            active_shards: rollup.active_shards,
            relocating_shards: rollup.relocating_shards,
            initializing_shards: rollup.initializing_shards,
            unassigned_shards: rollup.unassigned_shards,
            status,
            shards,
            validation_failures,
        }
    }

    // Validation failures and missing routing override whatever the shards report.
    fn overall_status(
        rollup: &HealthRollup,
        no_shards: bool,
        validation_failures: &[String],
    ) -> HealthStatus {
        if !validation_failures.is_empty() || no_shards {
            HealthStatus::Red
        } else {
            rollup.status
        }
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    pub fn number_of_shards(&self) -> u32 {
        self.number_of_shards
    }

    pub fn number_of_replicas(&self) -> u32 {
        self.number_of_replicas
    }

    pub fn active_primary_shards(&self) -> u32 {
        self.active_primary_shards
    }

    pub fn active_shards(&self) -> u32 {
        self.active_shards
    }

    pub fn relocating_shards(&self) -> u32 {
        self.relocating_shards
    }

    pub fn initializing_shards(&self) -> u32 {
        self.initializing_shards
    }

    pub fn unassigned_shards(&self) -> u32 {
        self.unassigned_shards
    }

    pub fn status(&self) -> HealthStatus {
        self.status
    }

    pub fn validation_failures(&self) -> &[String] {
        &self.validation_failures
    }

    pub fn shards(&self) -> &HashMap<u32, ShardHealth> {
        &self.shards
    }

    /// Returns the snapshot of `shard_id` if routing knew about it.
    pub fn shard(&self, shard_id: u32) -> Option<&ShardHealth> {
        self.shards.get(&shard_id)
    }

    /// Iterates shard snapshots in ascending shard id.
    pub fn iter(&self) -> impl Iterator<Item = &ShardHealth> {
        let mut ordered = self.shards.values().collect::<Vec<_>>();
        ordered.sort_by_key(|shard| shard.shard_id);
        ordered.into_iter()
    }

    /// Checks that totals and status agree with the shard map.
    ///
    /// Derived snapshots always pass. Snapshots decoded from the wire or deserialized from
    /// JSON carry their fields verbatim and may not.
    pub fn check_consistency(&self) -> Result<()> {
        for (id, shard) in &self.shards {
            if *id != shard.shard_id {
                return Err(HealthError::InconsistentSnapshot(format!(
                    "shard keyed as {} reports shard id {}",
                    id, shard.shard_id
                )));
            }
            if (shard.status == HealthStatus::Red) == shard.primary_active {
                return Err(HealthError::InconsistentSnapshot(format!(
                    "shard {} is {} with primary_active={}",
                    id, shard.status, shard.primary_active
                )));
            }
        }

        let rollup = HealthRollup::over(self.shards.values());
        let totals = [
            ("active_primary_shards", self.active_primary_shards, rollup.active_primary_shards),
            ("active_shards", self.active_shards, rollup.active_shards),
            ("relocating_shards", self.relocating_shards, rollup.relocating_shards),
            ("initializing_shards", self.initializing_shards, rollup.initializing_shards),
            ("unassigned_shards", self.unassigned_shards, rollup.unassigned_shards),
        ];
        for (name, recorded, expected) in totals {
            if recorded != expected {
                return Err(HealthError::InconsistentSnapshot(format!(
                    "{} is {} but shards add up to {}",
                    name, recorded, expected
                )));
            }
        }

        let expected =
            Self::overall_status(&rollup, self.shards.is_empty(), &self.validation_failures);
        if self.status != expected {
            return Err(HealthError::InconsistentSnapshot(format!(
                "status is {} but shards and validation imply {}",
                self.status, expected
            )));
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a IndexHealth {
    type Item = &'a ShardHealth;
    type IntoIter = std::vec::IntoIter<&'a ShardHealth>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter().collect::<Vec<_>>().into_iter()
    }
}

// JSON renders shards as a list ordered by shard id.
mod shards_as_list {
    use super::ShardHealth;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::HashMap;

    pub fn serialize<S: Serializer>(
        shards: &HashMap<u32, ShardHealth>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        let mut ordered = shards.values().collect::<Vec<_>>();
        ordered.sort_by_key(|shard| shard.shard_id);
        ordered.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<HashMap<u32, ShardHealth>, D::Error> {
        let list = Vec::<ShardHealth>::deserialize(deserializer)?;
        let mut shards = HashMap::with_capacity(list.len());
        for shard in list {
            let id = shard.shard_id;
            if shards.insert(id, shard).is_some() {
                return Err(D::Error::custom(format!("duplicate shard id {}", id)));
            }
        }
        Ok(shards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{IndexShardRoutingTable, ShardRoutingState};

    fn metadata(shards: u32, replicas: u32) -> IndexMetadata {
        IndexMetadata::new("logs")
            .unwrap()
            .number_of_shards(shards)
            .number_of_replicas(replicas)
    }

    fn shard(
        id: u32,
        primary: ShardRoutingState,
        replica: ShardRoutingState,
    ) -> IndexShardRoutingTable {
        IndexShardRoutingTable::new(id)
            .with_copy("logs", true, primary)
            .with_copy("logs", false, replica)
    }

    #[test]
    fn test_green_index() {
        let routing = IndexRoutingTable::new("logs")
            .with_shard(shard(0, ShardRoutingState::Started, ShardRoutingState::Started));
        let health = IndexHealth::from_routing(&metadata(1, 1), &routing);
        assert_eq!(health.status(), HealthStatus::Green);
        assert_eq!(health.active_shards(), 2);
        assert_eq!(health.active_primary_shards(), 1);
        assert!(health.validation_failures().is_empty());
        health.check_consistency().unwrap();
    }

    #[test]
    fn test_yellow_shard_makes_index_yellow() {
        let routing = IndexRoutingTable::new("logs")
            .with_shard(shard(0, ShardRoutingState::Started, ShardRoutingState::Started))
            .with_shard(shard(1, ShardRoutingState::Started, ShardRoutingState::Initializing));
        let health = IndexHealth::from_routing(&metadata(2, 1), &routing);
        assert_eq!(health.status(), HealthStatus::Yellow);
        assert_eq!(health.active_shards(), 3);
        assert_eq!(health.initializing_shards(), 1);
    }

    #[test]
    fn test_red_shard_is_not_overridden_by_yellow() {
        let routing = IndexRoutingTable::new("logs")
            .with_shard(shard(0, ShardRoutingState::Unassigned, ShardRoutingState::Unassigned))
            .with_shard(shard(1, ShardRoutingState::Started, ShardRoutingState::Initializing));
        let health = IndexHealth::from_routing(&metadata(2, 1), &routing);
        assert_eq!(health.status(), HealthStatus::Red);
        assert_eq!(health.active_primary_shards(), 1);
        assert_eq!(health.unassigned_shards(), 2);
    }

    #[test]
    fn test_relocation_counts() {
        let moving = IndexShardRoutingTable::new(0)
            .with_copy("logs", true, ShardRoutingState::Relocating)
            .with_copy("logs", false, ShardRoutingState::Started);
        let routing = IndexRoutingTable::new("logs").with_shard(moving);
        let health = IndexHealth::from_routing(&metadata(1, 1), &routing);
        assert_eq!(health.relocating_shards(), 1);
        assert_eq!(health.active_shards(), 2);
        assert_eq!(health.status(), HealthStatus::Green);
    }

    #[test]
    fn test_shards_derived_under_their_routing_key() {
        let mut routing = IndexRoutingTable::new("logs")
            .with_shard(shard(1, ShardRoutingState::Started, ShardRoutingState::Started));
        routing.shards.insert(
            0,
            shard(1, ShardRoutingState::Unassigned, ShardRoutingState::Unassigned),
        );
        let health = IndexHealth::from_routing(&metadata(2, 1), &routing);
        assert_eq!(health.shards().len(), 2);
        assert_eq!(health.shard(0).unwrap().shard_id(), 0);
        assert_eq!(health.shard(0).unwrap().status(), HealthStatus::Red);
        assert_eq!(health.shard(1).unwrap().status(), HealthStatus::Green);
        assert_eq!(health.status(), HealthStatus::Red);
        assert!(!health.validation_failures().is_empty());
    }

    #[test]
    fn test_empty_routing_is_red() {
        let health = IndexHealth::new("logs", 1, 1, Vec::new(), Vec::<ShardHealth>::new());
        assert_eq!(health.status(), HealthStatus::Red);
        assert_eq!(health.active_shards(), 0);
        health.check_consistency().unwrap();
    }

    #[test]
    fn test_validation_failure_forces_red() {
        let green = ShardHealth::from_copies(
            0,
            &shard(0, ShardRoutingState::Started, ShardRoutingState::Started).copies,
        );
        let health = IndexHealth::new(
            "logs",
            1,
            1,
            vec!["shard count mismatch".to_string()],
            vec![green],
        );
        assert_eq!(health.shard(0).unwrap().status(), HealthStatus::Green);
        assert_eq!(health.status(), HealthStatus::Red);
    }

    #[test]
    fn test_iter_is_ordered_by_shard_id() {
        let routing = IndexRoutingTable::new("logs")
            .with_shard(shard(2, ShardRoutingState::Started, ShardRoutingState::Started))
            .with_shard(shard(0, ShardRoutingState::Started, ShardRoutingState::Started))
            .with_shard(shard(1, ShardRoutingState::Started, ShardRoutingState::Started));
        let health = IndexHealth::from_routing(&metadata(3, 1), &routing);
        let ids = health.iter().map(|s| s.shard_id()).collect::<Vec<_>>();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_tampered_totals_are_inconsistent() {
        let routing = IndexRoutingTable::new("logs")
            .with_shard(shard(0, ShardRoutingState::Started, ShardRoutingState::Started));
        let mut health = IndexHealth::from_routing(&metadata(1, 1), &routing);
        health.active_shards = 5;
        assert!(matches!(
            health.check_consistency(),
            Err(HealthError::InconsistentSnapshot(_))
        ));
    }

    #[test]
    fn test_json_lists_shards_in_order() {
        let routing = IndexRoutingTable::new("logs")
            .with_shard(shard(1, ShardRoutingState::Started, ShardRoutingState::Started))
            .with_shard(shard(0, ShardRoutingState::Started, ShardRoutingState::Unassigned));
        let health = IndexHealth::from_routing(&metadata(2, 1), &routing);
        let json = serde_json::to_value(&health).unwrap();
        assert_eq!(json["status"], "yellow");
        assert_eq!(json["shards"][0]["shard_id"], 0);
        assert_eq!(json["shards"][1]["shard_id"], 1);

        let back: IndexHealth = serde_json::from_value(json).unwrap();
        assert_eq!(back, health);
    }
}
