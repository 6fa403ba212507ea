//! Downlink PDU parsers, one module per protocol layer.
//!
//! Parsers take a `BitBuffer` positioned at the start of their PDU, advance it past
//! the parsed header and return `Result<_, PduParseErr>`. They never touch decoder
//! state; entities decide what to do with the parsed values.

pub mod cmce;
pub mod llc;
pub mod mle;
pub mod mm;
pub mod umac;
