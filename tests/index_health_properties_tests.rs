use clusterhealth::{
    HealthRollup, HealthStatus, IndexHealth, ShardHealth, ShardRouting, ShardRoutingState,
    decode_index_health, decode_shard_health, encode_index_health, encode_shard_health,
};
use proptest::prelude::*;

fn routing_state() -> impl Strategy<Value = ShardRoutingState> {
    prop_oneof![
        Just(ShardRoutingState::Unassigned),
        Just(ShardRoutingState::Initializing),
        Just(ShardRoutingState::Started),
        Just(ShardRoutingState::Relocating),
    ]
}

/// Copy states of one shard: the primary first, then up to three replicas.
fn shard_copies() -> impl Strategy<Value = Vec<ShardRoutingState>> {
    prop::collection::vec(routing_state(), 1..5)
}

fn shard_health(shard_id: u32, states: &[ShardRoutingState]) -> ShardHealth {
    let copies = states
        .iter()
        .enumerate()
        .map(|(i, state)| ShardRouting::new("events", shard_id, i == 0, *state))
        .collect::<Vec<_>>();
    ShardHealth::from_copies(shard_id, &copies)
}

fn shard_set() -> impl Strategy<Value = Vec<ShardHealth>> {
    prop::collection::vec(shard_copies(), 0..12).prop_map(|shards| {
        shards
            .iter()
            .enumerate()
            .map(|(id, states)| shard_health(id as u32, states))
            .collect()
    })
}

fn index_health() -> impl Strategy<Value = IndexHealth> {
    (
        "[a-z][a-z0-9_-]{0,15}",
        0u32..64,
        0u32..4,
        prop::collection::vec("[ -~]{0,40}", 0..3),
        shard_set(),
    )
        .prop_map(|(name, shards, replicas, failures, shard_healths)| {
            IndexHealth::new(name, shards, replicas, failures, shard_healths)
        })
}

proptest! {
    #[test]
    fn fold_order_does_not_change_result(
        (shards, shuffled) in shard_set().prop_flat_map(|shards| {
            let shuffled = Just(shards.clone()).prop_shuffle();
            (Just(shards), shuffled)
        })
    ) {
        prop_assert_eq!(HealthRollup::over(&shards), HealthRollup::over(&shuffled));

        let forward = IndexHealth::new("events", 12, 3, Vec::new(), shards);
        let permuted = IndexHealth::new("events", 12, 3, Vec::new(), shuffled);
        prop_assert_eq!(forward, permuted);
    }

    #[test]
    fn fold_never_lowers_severity(shards in shard_set()) {
        let mut running = HealthRollup::identity();
        let mut seen_red = false;
        for shard in &shards {
            let next = running.combine(HealthRollup::of_shard(shard));
            prop_assert!(next.status >= running.status);
            prop_assert!(next.status >= shard.status());
            if seen_red {
                prop_assert_eq!(next.status, HealthStatus::Red);
            }
            seen_red |= next.status == HealthStatus::Red;
            running = next;
        }
        prop_assert_eq!(running, HealthRollup::over(&shards));
    }

    #[test]
    fn totals_match_shard_sums(shards in shard_set()) {
        let health = IndexHealth::new("events", 12, 3, Vec::new(), shards.clone());
        let active: u32 = shards.iter().map(|s| s.active_copies()).sum();
        let relocating: u32 = shards.iter().map(|s| s.relocating_copies()).sum();
        let initializing: u32 = shards.iter().map(|s| s.initializing_copies()).sum();
        let unassigned: u32 = shards.iter().map(|s| s.unassigned_copies()).sum();
        let primaries = shards.iter().filter(|s| s.is_primary_active()).count() as u32;

        prop_assert_eq!(health.active_shards(), active);
        prop_assert_eq!(health.relocating_shards(), relocating);
        prop_assert_eq!(health.initializing_shards(), initializing);
        prop_assert_eq!(health.unassigned_shards(), unassigned);
        prop_assert_eq!(health.active_primary_shards(), primaries);
        prop_assert!(health.check_consistency().is_ok());
    }

    #[test]
    fn validation_failures_always_force_red(
        shards in shard_set(),
        failure in "[ -~]{1,40}",
    ) {
        let health = IndexHealth::new("events", 12, 3, vec![failure], shards);
        prop_assert_eq!(health.status(), HealthStatus::Red);
    }

    #[test]
    fn index_health_round_trips(health in index_health()) {
        let decoded = decode_index_health(encode_index_health(&health)).unwrap();
        prop_assert_eq!(decoded, health);
    }

    #[test]
    fn shard_health_round_trips(id in any::<u32>(), states in shard_copies()) {
        let shard = shard_health(id, &states);
        let decoded = decode_shard_health(encode_shard_health(&shard)).unwrap();
        prop_assert_eq!(decoded, shard);
    }
}
