use std::collections::{HashMap, VecDeque};

use tetra_core::tetra_entities::TetraEntity;
use tetra_saps::SapMsg;

use crate::TetraEntityTrait;
use crate::context::DecoderContext;

#[derive(Default)]
pub enum MessagePrio {
    Immediate,
    #[default]
    Normal,
}

#[derive(Default)]
pub struct MessageQueue {
    messages: VecDeque<SapMsg>,
}

impl MessageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_back(&mut self, message: SapMsg) {
        self.messages.push_back(message);
    }

    pub fn push_prio(&mut self, message: SapMsg, prio: MessagePrio) {
        match prio {
            // Delivered before anything already queued
            MessagePrio::Immediate => self.messages.push_front(message),
            MessagePrio::Normal => self.messages.push_back(message),
        }
    }

    pub fn pop_front(&mut self) -> Option<SapMsg> {
        self.messages.pop_front()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Delivers primitives between the registered entities, lending each of them the
/// shared DecoderContext in turn.
pub struct MessageRouter {
    entities: HashMap<TetraEntity, Box<dyn TetraEntityTrait>>,
    msg_queue: MessageQueue,
    ctx: DecoderContext,
}

impl MessageRouter {
    pub fn new(ctx: DecoderContext) -> Self {
        Self {
            entities: HashMap::new(),
            msg_queue: MessageQueue::new(),
            ctx,
        }
    }

    pub fn register_entity(&mut self, entity: Box<dyn TetraEntityTrait>) {
        let comp_type = entity.entity();
        tracing::debug!("register_entity {:?}", comp_type);
        self.entities.insert(comp_type, entity);
    }

    /// Returns a mut ref to a component of the requested type
    pub fn get_entity(&mut self, comp: TetraEntity) -> Option<&mut dyn TetraEntityTrait> {
        self.entities.get_mut(&comp).map(|entity| entity.as_mut() as &mut dyn TetraEntityTrait)
    }

    pub fn ctx(&self) -> &DecoderContext {
        &self.ctx
    }

    pub fn ctx_mut(&mut self) -> &mut DecoderContext {
        &mut self.ctx
    }

    /// Context and queue together, for the PHY that feeds the router from outside
    pub fn parts_mut(&mut self) -> (&mut DecoderContext, &mut MessageQueue) {
        (&mut self.ctx, &mut self.msg_queue)
    }

    pub fn submit_message(&mut self, message: SapMsg) {
        tracing::trace!("submit_message {:?}: {:?} -> {:?}", message.get_sap(), message.get_source(), message.get_dest());
        self.msg_queue.push_back(message);
    }

    pub fn deliver_message(&mut self) {
        let Some(message) = self.msg_queue.pop_front() else {
            return;
        };
        tracing::trace!("deliver_message: {} {:?}: {:?} -> {:?}", message.msg, message.get_sap(), message.get_source(), message.get_dest());

        let dest = *message.get_dest();
        if let Some(entity) = self.entities.get_mut(&dest) {
            entity.rx_prim(&mut self.ctx, &mut self.msg_queue, message);
        } else {
            tracing::debug!("deliver_message: entity {:?} not registered, {} dropped", dest, message.msg);
        }
    }

    pub fn deliver_all_messages(&mut self) {
        while !self.msg_queue.is_empty() {
            self.deliver_message();
        }
    }

    pub fn get_msgqueue_len(&self) -> usize {
        self.msg_queue.len()
    }

    pub fn tick_start(&mut self) {
        tracing::trace!("--- burst {} ----------------------------", self.ctx.time);
        for entity in self.entities.values_mut() {
            entity.tick_start(&mut self.ctx, &mut self.msg_queue);
        }
    }
}
