use tetra_core::tetra_entities::TetraEntity;
use tetra_saps::SapMsg;

use crate::MessageQueue;
use crate::context::DecoderContext;

/// Trait for TETRA entities
/// Used by MessageRouter for passing messages between entities
pub trait TetraEntityTrait: Send {
    /// Returns the entity type identifier
    fn entity(&self) -> TetraEntity;

    /// Handle incoming SAP primitive
    fn rx_prim(&mut self, ctx: &mut DecoderContext, queue: &mut MessageQueue, message: SapMsg);

    /// Called once per burst, after the TDMA time was advanced and before its blocks are delivered
    fn tick_start(&mut self, _ctx: &mut DecoderContext, _queue: &mut MessageQueue) {}
}
