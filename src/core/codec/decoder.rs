use std::marker::PhantomData;

use log::{error, trace};
use roaring::RoaringBitmap;

use crate::common::{CodecError, DataCorruption};
use crate::Result;

use super::{UidBlock, UidPack, UidSetCodec};

/// Where `Decoder::seek` places the sought uid.
#[derive(Default, Copy, Debug, Clone, PartialEq, Eq)]
pub enum SeekPos {
    /// Search the uid and keep it in the results.
    #[default]
    Start,
    /// Search the uid but only use it as an offset, it won't be part of the results.
    Current,
}

/// Cursor over the blocks of a `UidPack`.
///
/// Every traversal method returns a view into a buffer owned by the decoder.
/// The view is overwritten by the next traversal call, copy it if it has to outlive that call.
#[derive(Debug, Clone)]
pub struct Decoder<'a, C: UidSetCodec = RoaringBitmap> {
    pack: Option<&'a UidPack>,
    block_idx: usize,
    uids: Vec<u64>,
    _codec: PhantomData<C>,
}

impl<'a> Decoder<'a, RoaringBitmap> {
    /// Binds a decoder to `pack` and unpacks its first block.
    ///
    /// Construction validates the whole pack, so it costs time linear in the number of blocks.
    pub fn new(pack: Option<&'a UidPack>) -> Result<Self> {
        Self::with_codec(pack)
    }
}

impl<'a, C: UidSetCodec> Decoder<'a, C> {
    /// Same as `Decoder::new`, reading blocks with codec `C`. Also linear in the number of blocks.
    pub fn with_codec(pack: Option<&'a UidPack>) -> Result<Self> {
        let mut decoder = Self::unpositioned(pack)?;
        decoder.seek(0, SeekPos::Start)?;
        Ok(decoder)
    }

    /// Validated decoder whose buffer is still empty.
    pub(super) fn unpositioned(pack: Option<&'a UidPack>) -> Result<Self> {
        if let Some(pack) = pack {
            pack.validate()?;
        }
        Ok(Self { pack, block_idx: 0, uids: Vec::new(), _codec: PhantomData })
    }

    fn blocks(&self) -> &'a [UidBlock] {
        match self.pack {
            Some(pack) => &pack.blocks,
            None => &[],
        }
    }

    /// Refills `uids` with the content of the block at `block_idx`.
    fn unpack_current(&mut self) -> Result<()> {
        self.uids.clear();

        let block = match self.blocks().get(self.block_idx) {
            Some(block) => block,
            None => return Ok(()),
        };

        let set = C::deserialize(&block.deltas).map_err(|e| {
            let corruption = DataCorruption::new(self.block_idx, format!("can't read compressed uids of base {:#x}: {}", block.base, e));
            error!("{:?}", corruption);
            CodecError::DataCorruption(corruption)
        })?;
        self.uids.extend(set.iter().map(|low| block.base + low as u64));

        let num_uids = block.num_uids as usize;
        if self.uids.len() < num_uids {
            let corruption = DataCorruption::new(self.block_idx, format!("expected {} uids, found {}", num_uids, self.uids.len()));
            error!("{:?}", corruption);
            self.uids.clear();
            return Err(CodecError::DataCorruption(corruption));
        }
        self.uids.truncate(num_uids);
        Ok(())
    }

    /// Decompresses the current block. Empty once the decoder ran past the last block.
    pub fn unpack_block(&mut self) -> Result<&[u64]> {
        self.unpack_current()?;
        Ok(&self.uids)
    }

    /// `block_size` times the number of blocks left, counting the current one.
    pub fn approx_len(&self) -> usize {
        let block_size = self.pack.map_or(0, |p| p.block_size as usize);
        block_size * self.blocks().len().saturating_sub(self.block_idx)
    }

    /// Positions the decoder on `uid` and returns the uids from there to the end of that block.
    ///
    /// With `SeekPos::Start` the result begins at the first uid `>= uid`,
    /// with `SeekPos::Current` at the first uid `> uid`. Seeking `0` rewinds to the first block.
    pub fn seek(&mut self, uid: u64, whence: SeekPos) -> Result<&[u64]> {
        if self.pack.is_none() {
            self.uids.clear();
            return Ok(&self.uids);
        }
        self.block_idx = 0;
        if uid == 0 {
            return self.unpack_block();
        }

        let blocks = self.blocks();
        // First block whose base is >= uid (Start) or > uid (Current).
        let idx = match whence {
            SeekPos::Start => blocks.partition_point(|b| b.base < uid),
            SeekPos::Current => blocks.partition_point(|b| b.base <= uid),
        };
        trace!("seek uid {} ({:?}) landed on block {} of {}", uid, whence, idx, blocks.len());

        if idx == 0 {
            return self.unpack_block();
        }
        // The uid is the first entry of the block.
        if idx < blocks.len() && blocks[idx].base == uid {
            self.block_idx = idx;
            return self.unpack_block();
        }

        // Either no base is past the uid, or the block before `idx` may still contain it.
        self.block_idx = idx - 1;
        self.unpack_current()?;

        let uidx = match whence {
            SeekPos::Start => self.uids.partition_point(|&v| v < uid),
            SeekPos::Current => self.uids.partition_point(|&v| v <= uid),
        };
        if uidx < self.uids.len() {
            self.uids.drain(..uidx);
            return Ok(&self.uids);
        }
        // Every uid of this block is behind the target, the next block starts after it.
        self.next()
    }

    /// Last unpacked uids, without decoding again.
    pub fn uids(&self) -> &[u64] {
        &self.uids
    }

    /// Moves forward block by block while the next block's base is `<= seek`, then unpacks.
    ///
    /// Meant for callers walking targets in ascending order, it never moves backwards.
    pub fn linear_seek(&mut self, seek: u64) -> Result<&[u64]> {
        let blocks = self.blocks();
        while let Some(next) = blocks.get(self.block_idx + 1) {
            if seek < next.base {
                break;
            }
            self.block_idx += 1;
        }
        self.unpack_block()
    }

    /// Base of the block after the current one, `u64::MAX` if there is none.
    pub fn peek_next_base(&self) -> u64 {
        self.blocks().get(self.block_idx + 1).map_or(u64::MAX, |b| b.base)
    }

    /// True until the decoder moves past the last block.
    pub fn valid(&self) -> bool {
        self.block_idx < self.blocks().len()
    }

    /// Moves to the next block and unpacks it.
    pub fn next(&mut self) -> Result<&[u64]> {
        self.block_idx = (self.block_idx + 1).min(self.blocks().len());
        self.unpack_block()
    }

    pub fn block_idx(&self) -> usize {
        self.block_idx
    }
}
