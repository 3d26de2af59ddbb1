use crate::Result;

use super::{Decoder, Encoder, SeekPos, UidPack};

/// Encodes `uids` (any order, duplicates allowed) into a pack.
pub fn encode(uids: &[u64], block_size: u32) -> Result<UidPack> {
    let mut encoder = Encoder::new(block_size);
    for &uid in uids {
        encoder.add(uid);
    }
    encoder.done()
}

/// Decodes every uid `>= seek` in ascending order. Pass `0` to decode the whole pack.
pub fn decode(pack: Option<&UidPack>, seek: u64) -> Result<Vec<u64>> {
    let mut uids = Vec::with_capacity(approx_len(pack));
    let mut decoder: Decoder<'_> = Decoder::unpositioned(pack)?;

    let mut block = decoder.seek(seek, SeekPos::Start)?;
    while !block.is_empty() {
        uids.extend_from_slice(block);
        block = decoder.next()?;
    }
    Ok(uids)
}

/// Number of blocks times the block size hint, usable to size allocations.
pub fn approx_len(pack: Option<&UidPack>) -> usize {
    pack.map_or(0, |p| p.approx_len())
}

/// Total number of uids, read from the block headers without decoding.
pub fn exact_len(pack: Option<&UidPack>) -> usize {
    pack.map_or(0, |p| p.len())
}

/// Deep copy of `pack`, sharing no buffer with it.
pub fn copy_pack(pack: Option<&UidPack>) -> Option<UidPack> {
    pack.cloned()
}
