use tetra_core::tetra_entities::TetraEntity;
use tetra_core::{BitBuffer, MacAddress};
use tetra_pdus::cmce::enums::cmce_pdu_type_dl::CmcePduTypeDl;
use tetra_saps::SapMsg;
use tetra_saps::SapMsgInner;

use super::subentities::cc_dl::CcDlSubentity;
use super::subentities::sds_dl::SdsDlSubentity;
use crate::context::DecoderContext;
use crate::{MessageQueue, TetraEntityTrait};

/// Downlink CMCE. Dispatches on the 5-bit PDU type to the call control and SDS sub-entities.
#[derive(Default)]
pub struct CmceDl {
    cc: CcDlSubentity,
    sds: SdsDlSubentity,
}

impl CmceDl {
    pub fn new() -> Self {
        Self::default()
    }

    fn rx_lcmc_mle_unitdata_ind(&mut self, ctx: &mut DecoderContext, sdu: BitBuffer, address: MacAddress) {
        tracing::trace!("rx_lcmc_mle_unitdata_ind: {}", sdu.dump_bin());
        let Some(bits) = sdu.peek_bits(5) else {
            tracing::warn!("insufficient bits: {}", sdu.dump_bin());
            ctx.send_invalid("CMCE", "CMCE", &address, "missing pdu type");
            return;
        };
        let pdu_type = CmcePduTypeDl::from_raw(bits);
        tracing::debug!("<- {} {} len {}", pdu_type, address, sdu.get_len());

        match pdu_type {
            CmcePduTypeDl::DSdsData => self.sds.rx_sds_data(ctx, sdu, &address),
            CmcePduTypeDl::DStatus => self.sds.rx_status(ctx, sdu, &address),
            CmcePduTypeDl::DFacility | CmcePduTypeDl::CmceFunctionNotSupported => {
                // Supplementary services are not decoded
                let report = ctx.new_report("CMCE", pdu_type.name(), &address);
                ctx.send_report(report);
            }
            CmcePduTypeDl::Reserved(x) => {
                tracing::debug!("reserved CMCE PDU type {}: {}", x, sdu.dump_bin());
            }
            _ => self.cc.rx_call_control(ctx, sdu, &address, pdu_type.name()),
        }
    }
}

impl TetraEntityTrait for CmceDl {
    fn entity(&self) -> TetraEntity {
        TetraEntity::Cmce
    }

    fn rx_prim(&mut self, ctx: &mut DecoderContext, _queue: &mut MessageQueue, message: SapMsg) {
        match message.msg {
            SapMsgInner::LcmcMleUnitdataInd(prim) => self.rx_lcmc_mle_unitdata_ind(ctx, prim.sdu, prim.address),
            msg => tracing::warn!("rx_prim: unexpected {:?} {}", message.sap, msg),
        }
    }
}
