mod encoder_config;

pub use encoder_config::EncoderConfig;
