use super::metadata::IndexMetadata;
use super::routing_table::IndexRoutingTable;

impl IndexRoutingTable {
    /// Validates the routing table against the index's static configuration.
    ///
    /// Reports, in order:
    /// - a routing table that belongs to a different index,
    /// - a shard count that differs from the configured one (with the missing shard ids),
    /// - shard tables whose `shard_id` differs from the id they are keyed under,
    /// - shards whose replica count differs from the configured one,
    /// - copies that carry a different index name or shard id than their table.
    ///
    /// An empty result means the routing is consistent with the metadata.
    pub fn validate(&self, metadata: &IndexMetadata) -> Vec<String> {
        let mut failures = Vec::new();

        if self.index != metadata.name {
            failures.push(format!(
                "routing table index [{}] does not match index metadata [{}]",
                self.index, metadata.name
            ));
        }

        if self.shards.len() != metadata.number_of_shards as usize {
            let missing = (0..metadata.number_of_shards)
                .filter(|id| !self.shards.contains_key(id))
                .map(|id| id.to_string())
                .collect::<Vec<_>>();
            failures.push(format!(
                "Wrong number of shards in routing table, missing: [{}]",
                missing.join(", ")
            ));
        }

        for (shard_id, shard) in self.iter() {
            if shard.shard_id != shard_id {
                failures.push(format!(
                    "Shard [{}] routing table reports shard id [{}]",
                    shard_id, shard.shard_id
                ));
            }
            let routed_replicas = shard.size() as i64 - 1;
            if routed_replicas != i64::from(metadata.number_of_replicas) {
                failures.push(format!(
                    "Shard [{}] routing table has wrong number of replicas, expected [{}], got [{}]",
                    shard_id, metadata.number_of_replicas, routed_replicas
                ));
            }
            for copy in shard.copies() {
                if copy.index != self.index {
                    failures.push(format!(
                        "shard routing has an index [{}] that is different than the routing table",
                        copy.index
                    ));
                }
                if copy.shard_id != shard_id {
                    failures.push(format!(
                        "shard routing for shard [{}] is listed under shard [{}]",
                        copy.shard_id, shard_id
                    ));
                }
            }
        }

        failures
    }
}
