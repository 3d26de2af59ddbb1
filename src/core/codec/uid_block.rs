use std::mem::size_of;

use serde::{Deserialize, Serialize};

use crate::common::MSB_MASK;

/// All uids sharing the same high 32 bits.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UidBlock {
    /// High-order bits shared by every uid in this block, low 32 bits are zero.
    pub base: u64,

    /// How many uids the block stores.
    pub num_uids: u32,

    /// Compressed set of `uid & !MSB_MASK` for every uid in this block.
    pub deltas: Vec<u8>,
}

impl UidBlock {
    /// Base of the block that `uid` belongs to.
    #[inline]
    pub fn base_of(uid: u64) -> u64 {
        uid & MSB_MASK
    }

    /// Offset of `uid` inside its block.
    #[inline]
    pub fn low_of(uid: u64) -> u32 {
        (uid & !MSB_MASK) as u32
    }

    pub fn storage_size(&self) -> usize {
        size_of::<u64>() + size_of::<u32>() + self.deltas.len()
    }
}
