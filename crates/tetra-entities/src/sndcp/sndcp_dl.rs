use tetra_core::tetra_entities::TetraEntity;
use tetra_core::{BitBuffer, MacAddress};
use tetra_saps::{SapMsg, SapMsgInner};

use crate::context::DecoderContext;
use crate::{MessageQueue, TetraEntityTrait};

/// Downlink SNDCP. Packet data is not reassembled, each SN-PDU is reported as raw data.
#[derive(Default)]
pub struct SndcpDl;

impl SndcpDl {
    pub fn new() -> Self {
        Self
    }

    fn rx_ltpd_mle_unitdata_ind(&mut self, ctx: &mut DecoderContext, sdu: BitBuffer, address: MacAddress) {
        tracing::debug!("<- SN-PDU {} {}", address, sdu.dump_bin());
        let mut report = ctx.new_report("SNDCP", "RAW-DATA", &address);
        report.add_hex("data", &sdu);
        ctx.send_report(report);
    }
}

impl TetraEntityTrait for SndcpDl {
    fn entity(&self) -> TetraEntity {
        TetraEntity::Sndcp
    }

    fn rx_prim(&mut self, ctx: &mut DecoderContext, _queue: &mut MessageQueue, message: SapMsg) {
        match message.msg {
            SapMsgInner::LtpdMleUnitdataInd(prim) => self.rx_ltpd_mle_unitdata_ind(ctx, prim.sdu, prim.address),
            msg => tracing::warn!("rx_prim: unexpected {:?} {}", message.sap, msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ChannelSink, ReportValue};
    use tetra_core::{Sap, TdmaTime};
    use tetra_saps::ltpd::LtpdMleUnitdataInd;

    #[test]
    fn test_raw_data_report() {
        let (sink, rx) = ChannelSink::new();
        let mut ctx = DecoderContext::new(Default::default(), Box::new(sink));
        let mut queue = MessageQueue::new();
        let mut sndcp = SndcpDl::new();

        let msg = SapMsg::new(
            Sap::LtpdSap,
            TetraEntity::Mle,
            TetraEntity::Sndcp,
            TdmaTime::default(),
            SapMsgInner::LtpdMleUnitdataInd(LtpdMleUnitdataInd {
                sdu: BitBuffer::from_bitstr("0100 0101 0000 0001 101"),
                address: MacAddress { ssi: 5, ..Default::default() },
            }),
        );
        sndcp.rx_prim(&mut ctx, &mut queue, msg);

        let report = rx.try_recv().unwrap();
        assert_eq!(report.service(), "SNDCP");
        assert_eq!(report.pdu(), "RAW-DATA");
        assert_eq!(report.get("data").and_then(ReportValue::as_str), Some("45 01 a0"));
    }
}
