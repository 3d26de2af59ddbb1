use roaring::RoaringBitmap;

use crate::Result;

/// Compressed set of `u32` values holding the low half of the uids in one block.
///
/// Implementations must deduplicate on `add` and iterate in ascending order,
/// the decoder relies on both when it rebuilds `base + value`.
pub trait UidSetCodec: Default + Sized {
    type Iter<'a>: Iterator<Item = u32>
    where
        Self: 'a;

    fn add(&mut self, value: u32);

    fn cardinality(&self) -> u64;

    fn serialize(&self) -> Result<Vec<u8>>;

    fn deserialize(bytes: &[u8]) -> Result<Self>;

    /// Values in ascending order.
    fn iter(&self) -> Self::Iter<'_>;
}

/// Blocks are stored in the portable roaring format, readable by any other roaring implementation.
impl UidSetCodec for RoaringBitmap {
    type Iter<'a> = roaring::bitmap::Iter<'a>;

    fn add(&mut self, value: u32) {
        self.insert(value);
    }

    fn cardinality(&self) -> u64 {
        self.len()
    }

    fn serialize(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(self.serialized_size());
        self.serialize_into(&mut bytes)?;
        Ok(bytes)
    }

    fn deserialize(bytes: &[u8]) -> Result<Self> {
        Ok(RoaringBitmap::deserialize_from(bytes)?)
    }

    fn iter(&self) -> Self::Iter<'_> {
        RoaringBitmap::iter(self)
    }
}
