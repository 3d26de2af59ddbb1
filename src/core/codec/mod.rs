mod decoder;
mod encoder;
mod pack_merge;
mod pack_ops;
mod set_codec;
mod uid_block;
mod uid_pack;

pub use decoder::{Decoder, SeekPos};
pub use encoder::Encoder;
pub use pack_merge::{intersect_with, merge_packs};
pub use pack_ops::{approx_len, copy_pack, decode, encode, exact_len};
pub use set_codec::UidSetCodec;
pub use uid_block::UidBlock;
pub use uid_pack::UidPack;

#[cfg(test)]
mod test {
    use std::collections::BTreeSet;

    use rand::Rng;
    use roaring::RoaringBitmap;

    use super::{UidBlock, UidSetCodec};

    pub(super) fn get_logger() {
        let _ = env_logger::Builder::from_default_env().filter(None, log::LevelFilter::Debug).is_test(true).try_init();
    }

    /// `count` distinct random uids in `1..max`, ascending.
    pub(super) fn mock_uids(count: usize, max: u64) -> Vec<u64> {
        let mut rng = rand::thread_rng();
        let mut uids = BTreeSet::new();
        while uids.len() < count {
            uids.insert(rng.gen_range(1..max));
        }
        uids.into_iter().collect()
    }

    /// A block built straight from its low values, bypassing the encoder.
    pub(super) fn mock_block(base: u64, lows: &[u32]) -> UidBlock {
        let mut set = RoaringBitmap::new();
        for &low in lows {
            UidSetCodec::add(&mut set, low);
        }
        UidBlock { base, num_uids: lows.len() as u32, deltas: UidSetCodec::serialize(&set).expect("serialize roaring block") }
    }
}
