pub mod cmce;
pub mod context;
pub mod decoder;
pub mod entity_trait;
pub mod llc;
pub mod lmac;
pub mod messagerouter;
pub mod mle;
pub mod mm;
pub mod phy;
pub mod report;
pub mod sndcp;
pub mod umac;
pub mod uplane;

// Re-export commonly used items from router
pub use context::DecoderContext;
pub use decoder::TetraDecoder;
pub use entity_trait::TetraEntityTrait;
pub use messagerouter::{MessagePrio, MessageQueue, MessageRouter};
