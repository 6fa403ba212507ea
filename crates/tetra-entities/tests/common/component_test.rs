use crossbeam_channel::Receiver;
use tetra_config::CfgDecoder;
use tetra_core::tetra_entities::TetraEntity;
use tetra_entities::report::{ChannelSink, Report};
use tetra_entities::{DecoderContext, MessageRouter, TetraEntityTrait};
use tetra_saps::sapmsg::SapMsg;

use tetra_entities::cmce::cmce_dl::CmceDl;
use tetra_entities::llc::llc_dl::LlcDl;
use tetra_entities::lmac::lmac_dl::LmacDl;
use tetra_entities::mle::mle_dl::MleDl;
use tetra_entities::mm::mm_dl::MmDl;
use tetra_entities::sndcp::sndcp_dl::SndcpDl;
use tetra_entities::umac::umac_dl::UmacDl;
use tetra_entities::uplane::uplane_dl::UplaneDl;

use super::sink::Sink;

/// Infrastructure for testing TETRA components
/// Quick setup of a partial downlink stack, with all reports collected on a channel.
/// Supports optional sinks for collecting primitives for later inspection
pub struct ComponentTest {
    pub router: MessageRouter,
    pub sinks: Vec<TetraEntity>,
    sink_rx: Vec<Receiver<SapMsg>>,
    reports: Receiver<Report>,
}

impl ComponentTest {
    pub fn new(config: CfgDecoder) -> Self {
        let (sink, reports) = ChannelSink::new();
        Self {
            router: MessageRouter::new(DecoderContext::new(config, Box::new(sink))),
            sinks: vec![],
            sink_rx: vec![],
            reports,
        }
    }

    pub fn populate_entities(&mut self, components: Vec<TetraEntity>, sinks: Vec<TetraEntity>) {
        for component in components.iter() {
            match component {
                TetraEntity::Lmac => self.register_entity(LmacDl::new()),
                TetraEntity::Umac => self.register_entity(UmacDl::new()),
                TetraEntity::Llc => self.register_entity(LlcDl::new()),
                TetraEntity::Mle => self.register_entity(MleDl::new()),
                TetraEntity::Mm => self.register_entity(MmDl::new()),
                TetraEntity::Cmce => self.register_entity(CmceDl::new()),
                TetraEntity::Sndcp => self.register_entity(SndcpDl::new()),
                TetraEntity::Uplane => self.register_entity(UplaneDl::new()),
                _ => panic!("Component not implemented: {:?}", component),
            }
        }

        // Setup any sinks
        for sink in sinks.iter() {
            assert!(!self.sinks.contains(sink), "Sink already exists: {:?}", sink);
            assert!(self.router.get_entity(*sink).is_none(), "Sink already registered as entity: {:?}", sink);

            let (entity, rx) = Sink::new(*sink);
            self.sinks.push(*sink);
            self.sink_rx.push(rx);
            self.register_entity(entity);
        }
    }

    pub fn register_entity<T: 'static + TetraEntityTrait>(&mut self, entity: T) {
        self.router.register_entity(Box::new(entity));
    }

    pub fn ctx(&self) -> &DecoderContext {
        self.router.ctx()
    }

    pub fn ctx_mut(&mut self) -> &mut DecoderContext {
        self.router.ctx_mut()
    }

    pub fn submit_message(&mut self, message: SapMsg) {
        self.router.submit_message(message);
    }

    pub fn deliver_all_messages(&mut self) {
        self.router.deliver_all_messages();
    }

    pub fn dump_sinks(&mut self) -> Vec<SapMsg> {
        self.sink_rx.iter().flat_map(|rx| rx.try_iter().collect::<Vec<_>>()).collect()
    }

    /// All reports sent since the last call, in order
    pub fn take_reports(&mut self) -> Vec<Report> {
        self.reports.try_iter().collect()
    }
}
