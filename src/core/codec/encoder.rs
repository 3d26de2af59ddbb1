use std::collections::HashMap;

use log::{debug, error};
use roaring::RoaringBitmap;

use crate::common::CodecError;
use crate::config::EncoderConfig;
use crate::Result;

use super::{UidBlock, UidPack, UidSetCodec};

/// Turns uids, added in any order, into a `UidPack`.
///
/// Each uid is split into its base (high 32 bits) and its low 32 bits, the low
/// halves are collected into one compressed set per base. Duplicated uids collapse.
pub struct Encoder<C: UidSetCodec = RoaringBitmap> {
    block_size: u32,
    pending: HashMap<u64, C>,
}

impl Encoder<RoaringBitmap> {
    pub fn new(block_size: u32) -> Self {
        Self::with_codec(block_size)
    }

    pub fn from_config(config: &EncoderConfig) -> Self {
        Self::with_codec(config.block_size)
    }
}

impl<C: UidSetCodec> Encoder<C> {
    pub fn with_codec(block_size: u32) -> Self {
        Self { block_size, pending: HashMap::new() }
    }

    /// Add a uid to the list being encoded.
    pub fn add(&mut self, uid: u64) {
        let base = UidBlock::base_of(uid);
        self.pending.entry(base).or_default().add(UidBlock::low_of(uid));
    }

    /// Number of distinct bases seen so far.
    pub fn num_pending_blocks(&self) -> usize {
        self.pending.len()
    }

    /// Finishes the encoding, blocks are emitted by ascending base.
    pub fn done(self) -> Result<UidPack> {
        let mut pending: Vec<(u64, C)> = self.pending.into_iter().collect();
        pending.sort_unstable_by_key(|(base, _)| *base);

        let mut pack = UidPack { block_size: self.block_size, blocks: Vec::with_capacity(pending.len()) };
        for (base, set) in pending {
            let num_uids = u32::try_from(set.cardinality()).map_err(|_| {
                let error_msg = format!("Block with base {:#x} holds {} uids, more than a block can count", base, set.cardinality());
                error!("{}", error_msg);
                CodecError::InvalidPack(error_msg)
            })?;
            let deltas = set.serialize().map_err(|e| {
                error!("Failed to serialize block with base {:#x}: {}", base, e);
                e
            })?;
            pack.blocks.push(UidBlock { base, num_uids, deltas });
        }

        debug!("Encoded {}, compressed payload {} bytes", pack, pack.storage_size());
        Ok(pack)
    }
}
