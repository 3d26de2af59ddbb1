use std::fmt;
use std::io;
use thiserror::Error;

/// Represents a `DataCorruption` error.
///
/// Raised when a block's compressed payload can't be turned back into the uids it claims to hold.
#[derive(Clone, PartialEq, Eq)]
pub struct DataCorruption {
    block_idx: Option<usize>,
    comment: String,
}

impl DataCorruption {
    /// Creates a `DataCorruption` Error for the block at `block_idx`.
    pub fn new<TStr: ToString>(block_idx: usize, comment: TStr) -> DataCorruption {
        DataCorruption { block_idx: Some(block_idx), comment: comment.to_string() }
    }

    /// Creates a `DataCorruption` Error, when the block is irrelevant.
    pub fn comment_only<TStr: ToString>(comment: TStr) -> DataCorruption {
        DataCorruption { block_idx: None, comment: comment.to_string() }
    }

    pub fn block_idx(&self) -> Option<usize> {
        self.block_idx
    }
}

impl fmt::Debug for DataCorruption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "Data corruption")?;
        if let Some(block_idx) = self.block_idx {
            write!(f, " (in block `{block_idx}`)")?;
        }
        write!(f, ": {}.", self.comment)?;
        Ok(())
    }
}

/// The library's error enum
#[derive(Debug, Error)]
pub enum CodecError {
    /// A block's compressed uids are unreadable or disagree with its header.
    #[error("Data corrupted: '{0:?}'")]
    DataCorruption(DataCorruption),

    /// A `UidPack` breaks its structural invariants (ordering of bases, block headers).
    #[error("Invalid UidPack: '{0}'")]
    InvalidPack(String),

    #[error("Invalid EncoderConfig: '{0}'")]
    InvalidConfig(String),

    #[error(transparent)]
    IoError(#[from] io::Error),

    #[error(transparent)]
    BinCodeError(#[from] bincode::Error),

    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
}

impl From<DataCorruption> for CodecError {
    fn from(data_corruption: DataCorruption) -> CodecError {
        CodecError::DataCorruption(data_corruption)
    }
}
