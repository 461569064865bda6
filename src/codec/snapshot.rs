use super::limits::CodecLimits;
use super::stream::{StreamInput, StreamOutput};
use crate::core::{HealthError, Result};
use crate::health::{HealthStatus, IndexHealth, ShardHealth};
use bytes::Bytes;
use std::collections::HashMap;
use tracing::{Level, event};

// Smallest encodings: id, flag, four counts and status for a shard; a length byte for a string.
const MIN_SHARD_ENTRY_BYTES: usize = 7;
const MIN_STRING_BYTES: usize = 1;

impl ShardHealth {
    /// Writes the shard entry: id, primary flag, the four copy counts, status.
    pub fn write_to(&self, out: &mut StreamOutput) {
        out.write_vint(self.shard_id);
        out.write_bool(self.primary_active);
        out.write_vint(self.active_copies);
        out.write_vint(self.relocating_copies);
        out.write_vint(self.initializing_copies);
        out.write_vint(self.unassigned_copies);
        out.write_byte(self.status.value());
    }

    /// Reads a shard entry written by [`ShardHealth::write_to`].
    ///
    /// The status is carried as written, never re-derived.
    pub fn read_from(input: &mut StreamInput) -> Result<Self> {
        Ok(ShardHealth {
            shard_id: input.read_vint()?,
            primary_active: input.read_bool()?,
            active_copies: input.read_vint()?,
            relocating_copies: input.read_vint()?,
            initializing_copies: input.read_vint()?,
            unassigned_copies: input.read_vint()?,
            status: HealthStatus::from_value(input.read_byte()?)?,
        })
    }
}

impl IndexHealth {
    /// Writes the index snapshot. Shards go out in ascending shard id so equal snapshots
    /// produce identical bytes.
    pub fn write_to(&self, out: &mut StreamOutput) {
        out.write_string(&self.index);
        out.write_vint(self.number_of_shards);
        out.write_vint(self.number_of_replicas);
        out.write_vint(self.active_primary_shards);
        out.write_vint(self.active_shards);
        out.write_vint(self.relocating_shards);
        out.write_vint(self.initializing_shards);
        out.write_vint(self.unassigned_shards);
        out.write_byte(self.status.value());

        out.write_len(self.shards.len());
        for shard in self.iter() {
            shard.write_to(out);
        }

        out.write_len(self.validation_failures.len());
        for failure in &self.validation_failures {
            out.write_string(failure);
        }
    }

    /// Reads an index snapshot written by [`IndexHealth::write_to`].
    ///
    /// Totals and status are taken from the stream as-is; nothing is recomputed.
    pub fn read_from(input: &mut StreamInput) -> Result<Self> {
        let index = input.read_string()?;
        let number_of_shards = input.read_vint()?;
        let number_of_replicas = input.read_vint()?;
        let active_primary_shards = input.read_vint()?;
        let active_shards = input.read_vint()?;
        let relocating_shards = input.read_vint()?;
        let initializing_shards = input.read_vint()?;
        let unassigned_shards = input.read_vint()?;
        let status = HealthStatus::from_value(input.read_byte()?)?;

        let max_shards = input.limits().max_shards;
        let max_failures = input.limits().max_validation_failures;

        let shard_count = input.read_len(max_shards, MIN_SHARD_ENTRY_BYTES, "shard")?;
        let mut shards = HashMap::with_capacity(shard_count);
        for _ in 0..shard_count {
            let shard = ShardHealth::read_from(input)?;
            let id = shard.shard_id;
            if shards.insert(id, shard).is_some() {
                return Err(HealthError::corrupt(format!(
                    "duplicate shard id {} in index snapshot",
                    id
                )));
            }
        }

        let failure_count =
            input.read_len(max_failures, MIN_STRING_BYTES, "validation failure")?;
        let mut validation_failures = Vec::with_capacity(failure_count);
        for _ in 0..failure_count {
            validation_failures.push(input.read_string()?);
        }

        Ok(IndexHealth {
            index,
            number_of_shards,
            number_of_replicas,
            active_primary_shards,
            active_shards,
            relocating_shards,
            initializing_shards,
            unassigned_shards,
            status,
            shards,
            validation_failures,
        })
    }
}

pub fn encode_shard_health(shard: &ShardHealth) -> Bytes {
    let mut out = StreamOutput::with_capacity(16);
    shard.write_to(&mut out);
    out.freeze()
}

pub fn decode_shard_health(bytes: impl Into<Bytes>) -> Result<ShardHealth> {
    let mut input = StreamInput::new(bytes);
    let shard = ShardHealth::read_from(&mut input)?;
    input.finish()?;
    Ok(shard)
}

pub fn encode_index_health(health: &IndexHealth) -> Bytes {
    let mut out = StreamOutput::with_capacity(32 + health.shards.len() * 8);
    health.write_to(&mut out);
    out.freeze()
}

/// Decodes a whole buffer holding exactly one index snapshot.
///
/// Only the input length bounds what is read, so anything [`encode_index_health`] produced
/// decodes back to an equal snapshot.
pub fn decode_index_health(bytes: impl Into<Bytes>) -> Result<IndexHealth> {
    decode_index_health_with_limits(bytes, &CodecLimits::unbounded())
}

pub fn decode_index_health_with_limits(
    bytes: impl Into<Bytes>,
    limits: &CodecLimits,
) -> Result<IndexHealth> {
    let mut input = StreamInput::with_limits(bytes, limits.clone());
    let decoded = IndexHealth::read_from(&mut input).and_then(|health| {
        input.finish()?;
        Ok(health)
    });
    if let Err(err) = &decoded {
        event!(Level::WARN, error = %err, "index health decode failed");
    }
    decoded
}
