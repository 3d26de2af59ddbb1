use itertools::Itertools;
use log::debug;

use crate::Result;

use super::{decode, exact_len, Decoder, UidPack};

/// Uids of `pack` that also appear in `sorted_uids`.
///
/// `sorted_uids` must be ascending. The decoder only moves forward, one block at a time,
/// and a block is decoded at most once.
pub fn intersect_with(pack: Option<&UidPack>, sorted_uids: &[u64]) -> Result<Vec<u64>> {
    let mut result = Vec::with_capacity(sorted_uids.len().min(exact_len(pack)));
    let mut decoder = Decoder::new(pack)?;

    for &uid in sorted_uids {
        if !decoder.valid() {
            break;
        }
        if uid >= decoder.peek_next_base() {
            decoder.linear_seek(uid)?;
        }
        if decoder.uids().binary_search(&uid).is_ok() {
            result.push(uid);
        }
    }
    debug!("intersected {} uids with pack of {} uids, kept {}", sorted_uids.len(), exact_len(pack), result.len());
    Ok(result)
}

/// Sorted union of all `packs`, without duplicates.
pub fn merge_packs(packs: &[&UidPack]) -> Result<Vec<u64>> {
    let decoded = packs.iter().map(|p| decode(Some(*p), 0)).collect::<Result<Vec<Vec<u64>>>>()?;
    Ok(decoded.into_iter().kmerge().dedup().collect())
}
