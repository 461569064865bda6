use serde::{Deserialize, Serialize};

/// Lifecycle state of a single physical shard copy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ShardRoutingState {
    /// Not allocated to any node.
    Unassigned,
    /// Allocated and recovering; not yet serving.
    Initializing,
    /// Allocated and serving.
    Started,
    /// Serving, while a copy of it initializes on another node.
    Relocating,
}

/// Flags health derivation reads from a shard copy.
///
/// A copy is exactly one of active, initializing or unassigned. An active copy may
/// additionally be relocating.
pub trait ShardCopy {
    fn primary(&self) -> bool;
    fn active(&self) -> bool;
    fn relocating(&self) -> bool;
    fn initializing(&self) -> bool;
    fn unassigned(&self) -> bool;
}

/// Placement of one physical copy of a shard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShardRouting {
    pub index: String,
    pub shard_id: u32,
    pub primary: bool,
    pub state: ShardRoutingState,
}

impl ShardRouting {
    /// Creates a copy of `index`/`shard_id` in the given state.
    pub fn new(
        index: impl Into<String>,
        shard_id: u32,
        primary: bool,
        state: ShardRoutingState,
    ) -> Self {
        Self {
            index: index.into(),
            shard_id,
            primary,
            state,
        }
    }
}

impl ShardCopy for ShardRouting {
    fn primary(&self) -> bool {
        self.primary
    }

    fn active(&self) -> bool {
        matches!(
            self.state,
            ShardRoutingState::Started | ShardRoutingState::Relocating
        )
    }

    fn relocating(&self) -> bool {
        self.state == ShardRoutingState::Relocating
    }

    fn initializing(&self) -> bool {
        self.state == ShardRoutingState::Initializing
    }

    fn unassigned(&self) -> bool {
        self.state == ShardRoutingState::Unassigned
    }
}

impl<T: ShardCopy + ?Sized> ShardCopy for &T {
    fn primary(&self) -> bool {
        (**self).primary()
    }

    fn active(&self) -> bool {
        (**self).active()
    }

    fn relocating(&self) -> bool {
        (**self).relocating()
    }

    fn initializing(&self) -> bool {
        (**self).initializing()
    }

    fn unassigned(&self) -> bool {
        (**self).unassigned()
    }
}
