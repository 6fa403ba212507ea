use tetra_core::tetra_entities::TetraEntity;
use tetra_core::{BitBuffer, Sap};
use tetra_pdus::llc::pdus::llc_header::{FCS_LEN_BITS, LlcHeader};
use tetra_saps::tla::TlaTlDataInd;
use tetra_saps::tma::TmaUnitdataInd;
use tetra_saps::{SapMsg, SapMsgInner};

use crate::context::DecoderContext;
use crate::llc::components::fcs;
use crate::{MessageQueue, TetraEntityTrait};

/// Downlink LLC. Strips the LLC header (and FCS, if present) of every TM-SDU and passes
/// the TL-SDU to the MLE. No link state is kept: acknowledgements are never sent.
#[derive(Default)]
pub struct LlcDl {
    fcs_failures: usize,
}

impl LlcDl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_fcs_failures(&self) -> usize {
        self.fcs_failures
    }

    fn rx_tma_unitdata_ind(&mut self, ctx: &mut DecoderContext, queue: &mut MessageQueue, prim: TmaUnitdataInd) {
        let mut pdu = prim.pdu;
        tracing::trace!("rx_tma_unitdata_ind: {}", pdu.dump_bin());

        let hdr = match LlcHeader::from_bitbuf(&mut pdu) {
            Ok(hdr) => hdr,
            Err(e) => {
                tracing::warn!("Failed parsing LLC header: {:?} {}", e, pdu.dump_bin());
                ctx.send_invalid("LLC", "LLC", &prim.address, e.to_string());
                return;
            }
        };
        tracing::debug!("<- {} {}", hdr, prim.address);

        if hdr.pdu_type.has_fcs() {
            if !fcs::check_fcs(&pdu) {
                self.fcs_failures += 1;
                tracing::warn!("{}: FCS mismatch, dropping {}", hdr.name(), pdu.dump_bin());
                return;
            }
            let end = pdu.get_raw_end() - FCS_LEN_BITS;
            pdu.set_raw_end(end);
        }

        if !hdr.carries_sdu() {
            tracing::debug!("{}: no TL-SDU", hdr.name());
            return;
        }
        if pdu.get_len_remaining() == 0 {
            tracing::debug!("{}: empty TL-SDU", hdr.name());
            return;
        }

        let tl_sdu = BitBuffer::from_bitbuffer_pos(&pdu);
        tracing::debug!("-> MLE {} sdu {}", hdr.name(), tl_sdu.dump_bin());
        queue.push_back(SapMsg::new(
            Sap::TlaSap,
            TetraEntity::Llc,
            TetraEntity::Mle,
            ctx.time,
            SapMsgInner::TlaTlDataInd(TlaTlDataInd {
                tl_sdu,
                address: prim.address,
                logical_channel: prim.logical_channel,
                llc_pdu: hdr.name(),
            }),
        ));
    }
}

impl TetraEntityTrait for LlcDl {
    fn entity(&self) -> TetraEntity {
        TetraEntity::Llc
    }

    fn rx_prim(&mut self, ctx: &mut DecoderContext, queue: &mut MessageQueue, message: SapMsg) {
        match (message.sap, message.msg) {
            (Sap::TmaSap, SapMsgInner::TmaUnitdataInd(prim)) => self.rx_tma_unitdata_ind(ctx, queue, prim),
            (sap, msg) => tracing::warn!("rx_prim: unexpected {:?} {}", sap, msg),
        }
    }
}
