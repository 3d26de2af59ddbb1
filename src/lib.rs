//! Seekable codec for sorted lists of 64-bit uids.
//!
//! Uids are grouped by their high 32 bits into blocks, the low 32 bits of each
//! group are stored as a roaring bitmap. A [`Decoder`] walks the blocks of a
//! [`UidPack`], binary searching bases and decoding at most a couple of blocks
//! per seek.
//!
//! ```rust
//! use uid_pack::{decode, encode, Decoder, SeekPos};
//!
//! fn main() -> uid_pack::Result<()> {
//!     let pack = encode(&[81, 9, 49], 2)?;
//!     assert_eq!(decode(Some(&pack), 0)?, vec![9, 49, 81]);
//!
//!     let mut decoder = Decoder::new(Some(&pack))?;
//!     assert_eq!(decoder.seek(49, SeekPos::Current)?, &[81]);
//!     Ok(())
//! }
//! ```

mod common;
mod config;
mod core;

pub use crate::common::{CodecError, DataCorruption, DEFAULT_BLOCK_SIZE, MSB_MASK, NUM_MSB};
pub use crate::config::EncoderConfig;
pub use crate::core::codec::*;

/// Result of every fallible operation of the crate.
pub type Result<T> = std::result::Result<T, CodecError>;
