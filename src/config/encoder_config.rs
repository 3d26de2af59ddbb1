use log::error;
use serde::{Deserialize, Serialize};

use crate::common::{CodecError, DEFAULT_BLOCK_SIZE};
use crate::Result;

fn default_block_size() -> u32 {
    DEFAULT_BLOCK_SIZE
}

#[derive(Serialize, Deserialize, Debug, Eq, PartialEq, Copy, Clone)]
#[serde(rename_all = "snake_case")]
pub struct EncoderConfig {
    /// Nominal number of uids per block. Only used to size buffers, blocks are never split by it.
    #[serde(default = "default_block_size")]
    #[serde(rename = "block_size")]
    pub block_size: u32,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        EncoderConfig { block_size: DEFAULT_BLOCK_SIZE }
    }
}

impl EncoderConfig {
    pub fn new(block_size: u32) -> Result<Self> {
        let config = EncoderConfig { block_size };
        config.is_valid()?;
        return Ok(config);
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: EncoderConfig = serde_json::from_str(json).map_err(|e| {
            error!("Failed to parse EncoderConfig from json: {}", e);
            CodecError::SerdeJsonError(e)
        })?;
        config.is_valid()?;
        Ok(config)
    }

    pub fn is_valid(&self) -> Result<bool> {
        if self.block_size == 0 {
            let error_msg = "`block_size` should be positive.";
            error!("{}", error_msg);
            return Err(CodecError::InvalidConfig(error_msg.to_string()));
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::EncoderConfig;
    use crate::common::{CodecError, DEFAULT_BLOCK_SIZE};

    #[test]
    fn test_new_encoder_config() {
        let config = EncoderConfig::new(64).unwrap();
        assert_eq!(config.block_size, 64);

        let res = EncoderConfig::new(0);
        assert!(matches!(res, Err(CodecError::InvalidConfig(_))));
    }

    #[test]
    fn test_default_encoder_config() {
        assert_eq!(EncoderConfig::default().block_size, DEFAULT_BLOCK_SIZE);
        assert!(EncoderConfig::default().is_valid().unwrap());
    }

    #[test]
    fn test_encoder_config_from_json() {
        let config = EncoderConfig::from_json(r#"{"block_size": 10}"#).unwrap();
        assert_eq!(config, EncoderConfig { block_size: 10 });

        // missing fields fall back to defaults.
        let config = EncoderConfig::from_json("{}").unwrap();
        assert_eq!(config, EncoderConfig::default());

        let res = EncoderConfig::from_json(r#"{"block_size": 0}"#);
        assert!(matches!(res, Err(CodecError::InvalidConfig(_))));

        let res = EncoderConfig::from_json(r#"{"block_size": "large"}"#);
        assert!(matches!(res, Err(CodecError::SerdeJsonError(_))));
    }

    #[test]
    fn test_encoder_config_to_json() {
        let json = serde_json::to_string(&EncoderConfig { block_size: 32 }).unwrap();
        assert_eq!(json, r#"{"block_size":32}"#);
    }
}
