//! Binary wire format for health snapshots.
//!
//! Integers are variable-length (7 bits per byte, least significant group first), strings
//! are a byte-length prefix followed by UTF-8, and statuses are a single ordinal byte.

mod limits;
mod snapshot;
mod stream;

pub use limits::CodecLimits;
pub use snapshot::{
    decode_index_health, decode_index_health_with_limits, decode_shard_health,
    encode_index_health, encode_shard_health,
};
pub use stream::{StreamInput, StreamOutput};
