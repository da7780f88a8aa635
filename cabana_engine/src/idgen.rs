//! ** idgen module **
//! Identity allocation for `GameObject`s.
//!
//! Ids are small integers handed out by an allocator owned by the world, so that key/lock matching
//! stays stable across save and load. Zero is never allocated.
use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Unique, never reused identity of a `GameObject`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

impl Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic id source. Serialized with the world so ids allocated after a reload don't collide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next id.
    pub fn allocate(&mut self) -> ObjectId {
        let id = ObjectId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }

    /// The id the next call to `allocate` will return.
    pub fn peek(&self) -> ObjectId {
        ObjectId(self.next)
    }
}
