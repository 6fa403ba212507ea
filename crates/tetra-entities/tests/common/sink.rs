use crossbeam_channel::{Receiver, Sender, unbounded};
use tetra_core::tetra_entities::TetraEntity;
use tetra_entities::{DecoderContext, MessageQueue, TetraEntityTrait};
use tetra_saps::sapmsg::SapMsg;

/// A TETRA component sink for testing purposes
/// Forwards all received SapMsg messages to a channel for later inspection
pub struct Sink {
    component: TetraEntity,
    tx: Sender<SapMsg>,
}

impl Sink {
    pub fn new(component: TetraEntity) -> (Self, Receiver<SapMsg>) {
        let (tx, rx) = unbounded();
        (Self { component, tx }, rx)
    }
}

impl TetraEntityTrait for Sink {
    fn entity(&self) -> TetraEntity {
        self.component
    }

    fn rx_prim(&mut self, _ctx: &mut DecoderContext, _queue: &mut MessageQueue, message: SapMsg) {
        tracing::debug!("rx_prim: {:?} {}", message.sap, message.msg);
        let _ = self.tx.send(message);
    }
}
