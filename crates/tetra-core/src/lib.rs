//! Core utilities for the TETRA downlink decoder
//!
//! This crate provides fundamental types and utilities used across the decoding stack:
//! - BitBuffer, a bit cursor over byte-per-bit data
//! - TdmaTime for TDMA frame timing
//! - MAC address state
//! - PHY types (BurstType, PhyBlockType, etc.)
//! - Typed optional-field helpers and declarative field layouts
//! - Common macros and debug utilities

pub mod address;
pub mod bitbuffer;
pub mod debug;
pub mod freqs;
pub mod pdu_parse_error;
pub mod phy_types;
pub mod tdma_time;
pub mod tetra_common;
pub mod tetra_entities;
pub mod typed_pdu_fields;

// Re-export commonly used items
pub use address::*;
pub use bitbuffer::BitBuffer;
pub use pdu_parse_error::PduParseErr;
pub use phy_types::*;
pub use tdma_time::TdmaTime;
pub use tetra_common::*;

/// Crate version plus git revision, shown in the startup banner
pub const STACK_VERSION: &str = const_format::formatcp!(
    "{}-{}",
    env!("CARGO_PKG_VERSION"),
    git_version::git_version!(args = ["--always", "--dirty=-modified"], fallback = "unknown")
);
