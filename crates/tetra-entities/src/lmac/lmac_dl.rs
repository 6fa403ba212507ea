use tetra_core::tetra_entities::TetraEntity;
use tetra_core::{BurstType, DownlinkUsage, PhyBlockNum, PhyBlockType, Sap};
use tetra_saps::tmv::TmvUnitdataInd;
use tetra_saps::tmv::enums::logical_chans::LogicalChannel;
use tetra_saps::tp::TpUnitdataInd;
use tetra_saps::{SapMsg, SapMsgInner};

use crate::context::DecoderContext;
use crate::lmac::components::{errorcontrol, scrambler};
use crate::{MessagePrio, MessageQueue, TetraEntityTrait};

/// Downlink lower MAC. Reverses the channel coding of the blocks cut by the PHY and
/// decides which logical channel each of them belongs to.
#[derive(Default)]
pub struct LmacDl {
    /// Blocks dropped because of a CRC failure
    crc_failures: u64,
}

impl LmacDl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_crc_failures(&self) -> u64 {
        self.crc_failures
    }

    /// True if the current slot carries a traffic channel, as signalled by the AACH.
    /// Frame 18 is always a control frame.
    fn is_traffic(ctx: &DecoderContext) -> bool {
        ctx.mac_state.downlink_usage == DownlinkUsage::Traffic && ctx.time.f <= 17
    }

    fn determine_logical_channel_dl(ctx: &DecoderContext, blk: &TpUnitdataInd) -> Option<LogicalChannel> {
        match (blk.burst_type, blk.block_type, blk.block_num) {
            (_, PhyBlockType::Bbk, _) => Some(LogicalChannel::Aach),
            (_, PhyBlockType::Sb, _) => Some(LogicalChannel::Bsch),
            (BurstType::Sb, _, _) => Some(LogicalChannel::SchHd),
            (BurstType::Ndb, _, _) => {
                if Self::is_traffic(ctx) {
                    Some(LogicalChannel::TchS)
                } else {
                    Some(LogicalChannel::SchF)
                }
            }
            (BurstType::NdbSf, _, PhyBlockNum::Block2) => {
                if Self::is_traffic(ctx) {
                    // Second half only carries signalling if the first half said so
                    ctx.second_slot_stolen.then_some(LogicalChannel::Stch)
                } else if ctx.time.is_bnch_slot() {
                    Some(LogicalChannel::Bnch)
                } else {
                    Some(LogicalChannel::SchHd)
                }
            }
            (BurstType::NdbSf, _, _) => {
                if Self::is_traffic(ctx) {
                    Some(LogicalChannel::Stch)
                } else {
                    Some(LogicalChannel::SchHd)
                }
            }
        }
    }

    fn send_to_umac(ctx: &DecoderContext, queue: &mut MessageQueue, pdu: tetra_core::BitBuffer, block_num: PhyBlockNum, lchan: LogicalChannel) {
        let m = SapMsg::new(
            Sap::TmvSap,
            TetraEntity::Lmac,
            TetraEntity::Umac,
            ctx.time,
            SapMsgInner::TmvUnitdataInd(TmvUnitdataInd {
                pdu,
                block_num,
                logical_channel: lchan,
            }),
        );

        // Must be handled before the next block of the slot is routed: the AACH decides about
        // traffic, the BSCH sets the scrambling code, and the first half-slot may steal the second.
        queue.push_prio(m, MessagePrio::Immediate);
    }

    fn rx_bbk(&mut self, ctx: &mut DecoderContext, queue: &mut MessageQueue, bbk: TpUnitdataInd) {
        tracing::trace!("rx_bbk type5: {}", bbk.block.dump_bin());

        let Some(type1) = errorcontrol::decode_aach(bbk.block, ctx.cell.scrambling_code, ctx.config.rm_single_error_correction) else {
            return;
        };
        Self::send_to_umac(ctx, queue, type1, PhyBlockNum::Both, LogicalChannel::Aach);
    }

    fn rx_blk_traffic(&mut self, ctx: &mut DecoderContext, queue: &mut MessageQueue, blk: TpUnitdataInd, lchan: LogicalChannel) {
        // Speech is only descrambled, the codec takes care of the rest
        let mut type4 = blk.block;
        type4.seek(0);
        scrambler::tetra_scramb_bits(ctx.cell.scrambling_code, &mut type4);
        tracing::trace!("rx_blk_traffic {} {}", lchan, type4.dump_bin());
        Self::send_to_umac(ctx, queue, type4, blk.block_num, lchan);
    }

    fn rx_blk_cp(&mut self, ctx: &mut DecoderContext, queue: &mut MessageQueue, blk: TpUnitdataInd, lchan: LogicalChannel) {
        let block_num = blk.block_num;
        let scrambling_code = if lchan == LogicalChannel::Bsch {
            scrambler::SCRAMB_INIT
        } else {
            ctx.cell.scrambling_code
        };

        let (type1bits, crc_pass) = errorcontrol::decode_cp(lchan, blk.block, scrambling_code);
        let Some(type1bits) = type1bits else {
            return;
        };

        if !crc_pass {
            self.crc_failures += 1;
            if ctx.config.report_crc_failures {
                tracing::debug!("rx_blk_cp {} {}: CRC failure", ctx.time, lchan);
            } else {
                tracing::trace!("rx_blk_cp {} {}: CRC failure", ctx.time, lchan);
            }
            return;
        }

        tracing::debug!("rx_blk_cp {} CRC: OK type1 {}", lchan, type1bits.dump_bin());
        Self::send_to_umac(ctx, queue, type1bits, block_num, lchan);
    }

    fn rx_tp_prim(&mut self, ctx: &mut DecoderContext, queue: &mut MessageQueue, message: SapMsg) {
        let SapMsgInner::TpUnitdataInd(prim) = message.msg else {
            tracing::warn!("rx_tp_prim: unexpected primitive {}", message.msg);
            return;
        };

        let Some(lchan) = Self::determine_logical_channel_dl(ctx, &prim) else {
            tracing::trace!("rx_tp_prim {}: second half-slot carries traffic, ignored", ctx.time);
            return;
        };

        match lchan {
            LogicalChannel::Aach => self.rx_bbk(ctx, queue, prim),
            LogicalChannel::TchS | LogicalChannel::Tch => self.rx_blk_traffic(ctx, queue, prim, lchan),
            _ => self.rx_blk_cp(ctx, queue, prim, lchan),
        }
    }
}

impl TetraEntityTrait for LmacDl {
    fn entity(&self) -> TetraEntity {
        TetraEntity::Lmac
    }

    fn rx_prim(&mut self, ctx: &mut DecoderContext, queue: &mut MessageQueue, message: SapMsg) {
        tracing::trace!("rx_prim: {:?}", message);

        match message.sap {
            Sap::TpSap => self.rx_tp_prim(ctx, queue, message),
            _ => tracing::warn!("rx_prim: unexpected SAP {:?}", message.sap),
        }
    }

    fn tick_start(&mut self, ctx: &mut DecoderContext, _queue: &mut MessageQueue) {
        // The stolen flag only ever applies to the burst it was signalled in
        ctx.second_slot_stolen = false;
    }
}
