//! Decoder configuration management
//!
//! This crate provides configuration loading and parsing for the TETRA downlink decoder:
//! - TOML configuration file parsing
//! - Decoder configuration structures (symbol input, report output, decoder options)

pub mod decoder_config;
pub mod toml_config;

pub use decoder_config::*;
pub use toml_config::*;
