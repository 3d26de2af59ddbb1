use log::error;
use serde::{Deserialize, Serialize};

use crate::common::{CodecError, MSB_MASK};
use crate::Result;

use super::UidBlock;

/// Encoded uid list: blocks sorted by strictly ascending `base`.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UidPack {
    /// Nominal uids per block. Advisory only, a block may hold any count.
    pub block_size: u32,

    pub blocks: Vec<UidBlock>,
}

impl std::fmt::Display for UidPack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UidPack[block_size={}, blocks={}, uids={}]", self.block_size, self.blocks.len(), self.len())
    }
}

impl UidPack {
    pub fn new(block_size: u32) -> Self {
        Self { block_size, blocks: vec![] }
    }

    /// Exact number of uids stored in the pack.
    pub fn len(&self) -> usize {
        self.blocks.iter().map(|b| b.num_uids as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(|b| b.num_uids == 0)
    }

    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// Upper-bound style estimate: every block counted as `block_size` uids.
    pub fn approx_len(&self) -> usize {
        self.blocks.len() * self.block_size as usize
    }

    /// Bytes taken by block headers and compressed payloads.
    pub fn storage_size(&self) -> usize {
        std::mem::size_of::<u32>() + self.blocks.iter().map(|b| b.storage_size()).sum::<usize>()
    }

    /// Checks the invariants seeking depends on.
    pub fn validate(&self) -> Result<()> {
        for (idx, block) in self.blocks.iter().enumerate() {
            if block.base & !MSB_MASK != 0 {
                let error_msg = format!("Block {} has base {:#x} with non-zero low bits", idx, block.base);
                error!("{}", error_msg);
                return Err(CodecError::InvalidPack(error_msg));
            }
            if block.num_uids == 0 {
                let error_msg = format!("Block {} (base {:#x}) holds no uids", idx, block.base);
                error!("{}", error_msg);
                return Err(CodecError::InvalidPack(error_msg));
            }
            if idx > 0 && self.blocks[idx - 1].base >= block.base {
                let error_msg = format!("Block bases must be strictly ascending, found {:#x} after {:#x} at block {}", block.base, self.blocks[idx - 1].base, idx);
                error!("{}", error_msg);
                return Err(CodecError::InvalidPack(error_msg));
            }
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let bytes = bincode::serialize(self).map_err(|e| {
            error!("Failed to serialize {}: {}", self, e);
            CodecError::BinCodeError(e)
        })?;
        Ok(bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let pack: UidPack = bincode::deserialize(bytes).map_err(|e| {
            error!("Failed to deserialize UidPack from {} bytes: {}", bytes.len(), e);
            CodecError::BinCodeError(e)
        })?;
        pack.validate()?;
        Ok(pack)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test::mock_block;
    use super::UidPack;
    use crate::common::CodecError;

    #[test]
    fn test_len_and_approx_len() {
        let pack = UidPack { block_size: 10, blocks: vec![mock_block(0, &[1, 2, 3]), mock_block(1u64 << 32, &[5])] };
        assert_eq!(pack.len(), 4);
        assert!(!pack.is_empty());
        assert_eq!(pack.num_blocks(), 2);
        assert_eq!(pack.approx_len(), 20);
        assert_eq!(pack.to_string(), "UidPack[block_size=10, blocks=2, uids=4]");

        let empty = UidPack::new(10);
        assert_eq!(empty.len(), 0);
        assert!(empty.is_empty());
        assert_eq!(empty.approx_len(), 0);
    }

    #[test]
    fn test_storage_size() {
        let pack = UidPack { block_size: 10, blocks: vec![mock_block(0, &[1, 2, 3]), mock_block(1u64 << 32, &[5])] };
        let expected = 4 + pack.blocks.iter().map(|b| 12 + b.deltas.len()).sum::<usize>();
        assert_eq!(pack.storage_size(), expected);
    }

    #[test]
    fn test_validate() {
        let ok = UidPack { block_size: 2, blocks: vec![mock_block(0, &[1]), mock_block(1u64 << 32, &[1]), mock_block(5u64 << 32, &[1])] };
        assert!(ok.validate().is_ok());

        let unordered = UidPack { block_size: 2, blocks: vec![mock_block(1u64 << 32, &[1]), mock_block(0, &[1])] };
        assert!(matches!(unordered.validate(), Err(CodecError::InvalidPack(_))));

        let repeated = UidPack { block_size: 2, blocks: vec![mock_block(1u64 << 32, &[1]), mock_block(1u64 << 32, &[2])] };
        assert!(matches!(repeated.validate(), Err(CodecError::InvalidPack(_))));

        let mut unmasked = mock_block(0, &[1]);
        unmasked.base = 17;
        let unmasked = UidPack { block_size: 2, blocks: vec![unmasked] };
        assert!(matches!(unmasked.validate(), Err(CodecError::InvalidPack(_))));

        let mut hollow = mock_block(0, &[1]);
        hollow.num_uids = 0;
        let hollow = UidPack { block_size: 2, blocks: vec![hollow] };
        assert!(matches!(hollow.validate(), Err(CodecError::InvalidPack(_))));
    }

    #[test]
    fn test_bytes_round_trip() {
        let pack = UidPack { block_size: 64, blocks: vec![mock_block(0, &[9, 49, 81]), mock_block(3u64 << 32, &[0, u32::MAX])] };
        let bytes = pack.to_bytes().unwrap();
        let restored = UidPack::from_bytes(&bytes).unwrap();
        assert_eq!(pack, restored);
    }

    #[test]
    fn test_from_bytes_rejects_invalid() {
        let truncated = UidPack { block_size: 64, blocks: vec![mock_block(0, &[9, 49, 81])] }.to_bytes().unwrap();
        let res = UidPack::from_bytes(&truncated[..truncated.len() - 4]);
        assert!(matches!(res, Err(CodecError::BinCodeError(_))));

        let unordered = UidPack { block_size: 64, blocks: vec![mock_block(2u64 << 32, &[1]), mock_block(1u64 << 32, &[1])] }.to_bytes().unwrap();
        let res = UidPack::from_bytes(&unordered);
        assert!(matches!(res, Err(CodecError::InvalidPack(_))));
    }
}
