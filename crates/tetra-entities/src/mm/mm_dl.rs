use tetra_core::tetra_entities::TetraEntity;
use tetra_core::{BitBuffer, MacAddress};
use tetra_pdus::mm::enums::mm_pdu_type_dl::MmPduTypeDl;
use tetra_saps::{SapMsg, SapMsgInner};

use crate::context::DecoderContext;
use crate::{MessageQueue, TetraEntityTrait};

/// Downlink MM. Only the PDU type is decoded and reported.
#[derive(Default)]
pub struct MmDl;

impl MmDl {
    pub fn new() -> Self {
        Self
    }

    fn rx_lmm_mle_unitdata_ind(&mut self, ctx: &mut DecoderContext, sdu: BitBuffer, address: MacAddress) {
        let Some(bits) = sdu.peek_bits(4) else {
            tracing::warn!("insufficient bits: {}", sdu.dump_bin());
            ctx.send_invalid("MM", "MM", &address, "missing pdu type");
            return;
        };
        let pdu_type = MmPduTypeDl::from_raw(bits);
        if let MmPduTypeDl::Reserved(x) = pdu_type {
            tracing::debug!("reserved MM PDU type {}: {}", x, sdu.dump_bin());
            return;
        }

        tracing::debug!("<- {} {} {}", pdu_type.name(), address, sdu.dump_bin());
        let report = ctx.new_report("MM", pdu_type.name(), &address);
        ctx.send_report(report);
    }
}

impl TetraEntityTrait for MmDl {
    fn entity(&self) -> TetraEntity {
        TetraEntity::Mm
    }

    fn rx_prim(&mut self, ctx: &mut DecoderContext, _queue: &mut MessageQueue, message: SapMsg) {
        match message.msg {
            SapMsgInner::LmmMleUnitdataInd(prim) => self.rx_lmm_mle_unitdata_ind(ctx, prim.sdu, prim.address),
            msg => tracing::warn!("rx_prim: unexpected {:?} {}", message.sap, msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ChannelSink;
    use tetra_core::{Sap, TdmaTime};
    use tetra_saps::lmm::LmmMleUnitdataInd;

    fn lmm(sdu: &str) -> SapMsg {
        SapMsg::new(
            Sap::LmmSap,
            TetraEntity::Mle,
            TetraEntity::Mm,
            TdmaTime::default(),
            SapMsgInner::LmmMleUnitdataInd(LmmMleUnitdataInd {
                sdu: BitBuffer::from_bitstr(sdu),
                address: MacAddress::default(),
            }),
        )
    }

    #[test]
    fn test_pdu_names() {
        let (sink, rx) = ChannelSink::new();
        let mut ctx = DecoderContext::new(Default::default(), Box::new(sink));
        let mut queue = MessageQueue::new();
        let mut mm = MmDl::new();

        mm.rx_prim(&mut ctx, &mut queue, lmm("0101 0000 1111"));
        mm.rx_prim(&mut ctx, &mut queue, lmm("1101"));
        mm.rx_prim(&mut ctx, &mut queue, lmm("1010 11"));

        assert_eq!(rx.try_recv().unwrap().pdu(), "D-LOCATION UPDATE ACCEPT");
        assert_eq!(rx.try_recv().unwrap().pdu(), "D-ATTACH/DETACH GROUP IDENTITY");
        assert!(rx.try_recv().is_err());
    }
}
