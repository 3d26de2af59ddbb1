/// How many high-order bits of a uid form the base of its block.
pub const NUM_MSB: u32 = 32;

/// Keeps the top `NUM_MSB` bits of a uid, zeroing the rest.
pub const MSB_MASK: u64 = ((1u64 << NUM_MSB) - 1) << (u64::BITS - NUM_MSB);

/// Block size hint used when no config says otherwise.
pub const DEFAULT_BLOCK_SIZE: u32 = 256;
