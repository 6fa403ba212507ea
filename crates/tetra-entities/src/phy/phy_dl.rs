use tetra_core::tetra_entities::TetraEntity;
use tetra_core::{BitBuffer, BurstType, PhyBlockNum, PhyBlockType, Sap};
use tetra_saps::tp::TpUnitdataInd;
use tetra_saps::{SapMsg, SapMsgInner};

use crate::MessageQueue;
use crate::context::DecoderContext;
use crate::phy::burst_sync::{self, BurstSync, SyncedFrame};
use crate::phy::components::train_consts::*;

/// Downlink PHY. Cuts synchronized frames into their coded blocks for the LMAC.
///
/// The PHY is fed symbol by symbol from outside the MessageRouter, so unlike the other
/// layers it does not receive primitives itself.
#[derive(Default)]
pub struct PhyDl {
    sync: BurstSync,
    /// Bursts handed to the LMAC so far
    bursts: u64,
    /// Synchronized frames without a recognizable training sequence
    dropped: u64,
}

impl PhyDl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rx_symbol(&mut self, sym: u8) -> Option<SyncedFrame> {
        self.sync.rx_symbol(sym)
    }

    pub fn is_synchronized(&self) -> bool {
        self.sync.is_synchronized()
    }

    pub fn num_bursts(&self) -> u64 {
        self.bursts
    }

    pub fn num_dropped(&self) -> u64 {
        self.dropped
    }

    fn send_rxblock_to_lmac(
        queue: &mut MessageQueue,
        ctx: &DecoderContext,
        burst_type: BurstType,
        block_type: PhyBlockType,
        block_num: PhyBlockNum,
        block: BitBuffer,
    ) {
        let msg = SapMsg::new(
            Sap::TpSap,
            TetraEntity::Phy,
            TetraEntity::Lmac,
            ctx.time,
            SapMsgInner::TpUnitdataInd(TpUnitdataInd {
                burst_type,
                block_type,
                block_num,
                block,
            }),
        );
        queue.push_back(msg);
    }

    /// Advances the TDMA time, then splits the frame into its blocks, in the order the LMAC
    /// must decode them. Returns the burst type, or None if the frame was dropped.
    pub fn process_frame(&mut self, ctx: &mut DecoderContext, queue: &mut MessageQueue, frame: &SyncedFrame) -> Option<BurstType> {
        ctx.time = ctx.time.increment();

        let bits = &frame.bits;
        if bits.len() != tetra_core::BURST_LEN_BITS {
            tracing::warn!("process_frame: frame has {} bits, expected {}", bits.len(), tetra_core::BURST_LEN_BITS);
            self.dropped += 1;
            return None;
        }
        let Some(burst_type) = burst_sync::burst_type_of(bits) else {
            self.dropped += 1;
            return None;
        };
        self.bursts += 1;
        tracing::trace!("burst {} {}: {}", ctx.time, burst_type.name(), BitBuffer::from_bitarr(bits).dump_bin());

        let cut = |offset: usize, len: usize| BitBuffer::from_bitarr(&bits[offset..offset + len]);

        let join = |off1: usize, len1: usize, off2: usize, len2: usize| {
            let mut v = Vec::with_capacity(len1 + len2);
            v.extend_from_slice(&bits[off1..off1 + len1]);
            v.extend_from_slice(&bits[off2..off2 + len2]);
            BitBuffer::from_bitarr(&v)
        };

        match burst_type {
            BurstType::Sb => {
                // BSCH goes first, as it may change the scrambling code of the rest of the slot
                let blk1 = cut(SB_BLK1_OFFSET, SB_BLK1_BITS);
                let bbk = cut(SB_BBK_OFFSET, SB_BBK_BITS);
                let blk2 = cut(SB_BLK2_OFFSET, SB_BLK2_BITS);
                Self::send_rxblock_to_lmac(queue, ctx, burst_type, PhyBlockType::Sb, PhyBlockNum::Block1, blk1);
                Self::send_rxblock_to_lmac(queue, ctx, burst_type, PhyBlockType::Bbk, PhyBlockNum::Both, bbk);
                Self::send_rxblock_to_lmac(queue, ctx, burst_type, PhyBlockType::Ndb, PhyBlockNum::Block2, blk2);
            }
            BurstType::Ndb => {
                let bbk = join(NDB_BBK1_OFFSET, NDB_BBK1_BITS, NDB_BBK2_OFFSET, NDB_BBK2_BITS);
                let blk = join(NDB_BLK1_OFFSET, NDB_BLK_BITS, NDB_BLK2_OFFSET, NDB_BLK_BITS);
                Self::send_rxblock_to_lmac(queue, ctx, burst_type, PhyBlockType::Bbk, PhyBlockNum::Both, bbk);
                Self::send_rxblock_to_lmac(queue, ctx, burst_type, PhyBlockType::Ndb, PhyBlockNum::Both, blk);
            }
            BurstType::NdbSf => {
                let bbk = join(NDB_BBK1_OFFSET, NDB_BBK1_BITS, NDB_BBK2_OFFSET, NDB_BBK2_BITS);
                let blk1 = cut(NDB_BLK1_OFFSET, NDB_BLK_BITS);
                let blk2 = cut(NDB_BLK2_OFFSET, NDB_BLK_BITS);
                Self::send_rxblock_to_lmac(queue, ctx, burst_type, PhyBlockType::Bbk, PhyBlockNum::Both, bbk);
                Self::send_rxblock_to_lmac(queue, ctx, burst_type, PhyBlockType::Ndb, PhyBlockNum::Block1, blk1);
                Self::send_rxblock_to_lmac(queue, ctx, burst_type, PhyBlockType::Ndb, PhyBlockNum::Block2, blk2);
            }
        }
        Some(burst_type)
    }
}
