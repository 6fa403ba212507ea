use tetra_core::tetra_entities::TetraEntity;
use tetra_core::{MacAddress, Sap};
use tetra_saps::tmd::TmdCircuitDataInd;
use tetra_saps::tmv::enums::logical_chans::LogicalChannel;
use tetra_saps::{SapMsg, SapMsgInner};

use crate::context::DecoderContext;
use crate::uplane::tch_frame::{self, TCH_S_MIN_BITS};
use crate::{MessageQueue, TetraEntityTrait};

/// Downlink U-plane. Speech blocks are reported with the encryption mode of their
/// usage marker; no speech decoding is done.
#[derive(Default)]
pub struct UplaneDl;

impl UplaneDl {
    pub fn new() -> Self {
        Self
    }

    fn rx_tmd_circuit_data_ind(&mut self, ctx: &mut DecoderContext, prim: TmdCircuitDataInd) {
        let lchan = ctx.mac_state.logical_channel;
        tracing::trace!("rx_tmd_circuit_data_ind {} um {} encr {}: {}", lchan, prim.usage_marker, prim.encryption_mode, prim.data.dump_bin());

        // Circuit mode data on TCH/2.4 to TCH/7.2 is not decoded
        if lchan != LogicalChannel::TchS {
            tracing::debug!("rx_tmd_circuit_data_ind: ignoring {} block", lchan);
            return;
        }

        let address = MacAddress {
            usage_marker: prim.usage_marker,
            ..Default::default()
        };
        let mut report = ctx.new_report("UPLANE", "TCH_S", &address);

        let len = prim.data.get_len();
        if len < TCH_S_MIN_BITS {
            tracing::warn!("TCH_S block too short: {} bits", len);
            report.add("invalid pdu size", len as u32);
            report.add("pdu minimum size", TCH_S_MIN_BITS as u32);
            ctx.send_report(report);
            return;
        }

        report.add("downlink usage marker", prim.usage_marker);
        report.add("encryption mode", prim.encryption_mode);
        if ctx.config.uplane_frames {
            let frame = tch_frame::pack_speech_frame(&prim.data);
            report.add_compressed("frame", &tch_frame::frame_to_bytes(&frame));
        }
        ctx.send_report(report);
    }
}

impl TetraEntityTrait for UplaneDl {
    fn entity(&self) -> TetraEntity {
        TetraEntity::Uplane
    }

    fn rx_prim(&mut self, ctx: &mut DecoderContext, _queue: &mut MessageQueue, message: SapMsg) {
        match (message.sap, message.msg) {
            (Sap::TmdSap, SapMsgInner::TmdCircuitDataInd(prim)) => self.rx_tmd_circuit_data_ind(ctx, prim),
            (sap, msg) => tracing::warn!("rx_prim: unexpected {:?} {}", sap, msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ChannelSink, ReportValue};
    use tetra_config::CfgDecoder;
    use tetra_core::{BitBuffer, TdmaTime};

    fn tmd(bits: usize) -> SapMsg {
        SapMsg::new(
            Sap::TmdSap,
            TetraEntity::Umac,
            TetraEntity::Uplane,
            TdmaTime::default(),
            SapMsgInner::TmdCircuitDataInd(TmdCircuitDataInd {
                data: BitBuffer::from_bitstr(&"10".repeat(bits / 2)),
                usage_marker: 12,
                encryption_mode: 2,
            }),
        )
    }

    fn ctx_with(config: CfgDecoder, lchan: LogicalChannel) -> (DecoderContext, crossbeam_channel::Receiver<crate::report::Report>) {
        let (sink, rx) = ChannelSink::new();
        let mut ctx = DecoderContext::new(config, Box::new(sink));
        ctx.mac_state.logical_channel = lchan;
        (ctx, rx)
    }

    #[test]
    fn test_speech_frame_report() {
        let (mut ctx, rx) = ctx_with(CfgDecoder::default(), LogicalChannel::TchS);
        let mut queue = MessageQueue::new();
        UplaneDl::new().rx_prim(&mut ctx, &mut queue, tmd(432));

        let report = rx.try_recv().unwrap();
        assert_eq!(report.service(), "UPLANE");
        assert_eq!(report.pdu(), "TCH_S");
        assert_eq!(report.get("usage marker").and_then(ReportValue::as_u64), Some(12));
        assert_eq!(report.get("downlink usage marker").and_then(ReportValue::as_u64), Some(12));
        assert_eq!(report.get("encryption mode").and_then(ReportValue::as_u64), Some(2));
        assert_eq!(report.get("uzsize").and_then(ReportValue::as_u64), Some(1380));
        assert!(report.get("zsize").and_then(ReportValue::as_u64).is_some());
        assert!(!report.get("frame").and_then(ReportValue::as_str).unwrap_or("").is_empty());
    }

    #[test]
    fn test_frames_disabled() {
        let config = CfgDecoder {
            uplane_frames: false,
            ..Default::default()
        };
        let (mut ctx, rx) = ctx_with(config, LogicalChannel::TchS);
        let mut queue = MessageQueue::new();
        UplaneDl::new().rx_prim(&mut ctx, &mut queue, tmd(432));

        let report = rx.try_recv().unwrap();
        assert_eq!(report.get("encryption mode").and_then(ReportValue::as_u64), Some(2));
        assert!(report.get("frame").is_none());
        assert!(report.get("uzsize").is_none());
    }

    #[test]
    fn test_short_block() {
        let (mut ctx, rx) = ctx_with(CfgDecoder::default(), LogicalChannel::TchS);
        let mut queue = MessageQueue::new();
        UplaneDl::new().rx_prim(&mut ctx, &mut queue, tmd(216));

        let report = rx.try_recv().unwrap();
        assert_eq!(report.pdu(), "TCH_S");
        assert_eq!(report.get("invalid pdu size").and_then(ReportValue::as_u64), Some(216));
        assert!(report.get("encryption mode").is_none());
    }

    #[test]
    fn test_non_speech_traffic_ignored() {
        let (mut ctx, rx) = ctx_with(CfgDecoder::default(), LogicalChannel::Tch);
        let mut queue = MessageQueue::new();
        UplaneDl::new().rx_prim(&mut ctx, &mut queue, tmd(432));
        assert!(rx.try_recv().is_err());
    }
}
