//! PHY-layer types that are used across multiple layers
//!
//! These types originate from the PHY layer but are referenced by LMAC, UMAC,
//! and SAP primitives, so they live in tetra-core to avoid circular dependencies.

/// Number of bits in one downlink burst
pub const BURST_LEN_BITS: usize = 510;

/// Identifies which block(s) within a timeslot
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PhyBlockNum {
    /// Both half-slots combined (full slot)
    Both,
    /// First half-slot only
    Block1,
    /// Second half-slot only
    Block2,
}

/// Physical block types within a continuous downlink burst
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PhyBlockType {
    /// Broadcast block, carries the AACH
    Bbk,
    /// Synchronization block (BKN1 of a synchronization burst)
    Sb,
    /// Normal block, half-slot (216 bits) or full slot (432 bits)
    Ndb,
}

/// Continuous downlink burst types (Clause 9.4.4.3)
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BurstType {
    /// Synchronization burst: BSCH + AACH + one half-slot
    Sb,
    /// Normal burst carrying a single logical channel over the full slot
    Ndb,
    /// Normal burst with slot flag: two half-slot logical channels
    NdbSf,
}

impl BurstType {
    pub fn name(self) -> &'static str {
        match self {
            BurstType::Sb => "SB",
            BurstType::Ndb => "NDB",
            BurstType::NdbSf => "NDB_SF",
        }
    }
}

/// Training sequences
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum TrainingSequence {
    /// 22 n bits
    NormalTrainSeq1 = 1,
    /// 22 p bits
    NormalTrainSeq2 = 2,
    /// 22 q bits, split over the burst edges
    NormalTrainSeq3 = 3,
    /// 38 y bits
    SyncTrainSeq = 5,
    /// Not found
    #[default]
    NotFound = 0,
}

impl TrainingSequence {
    /// Burst type signalled by the training sequence in the middle of the burst
    pub fn burst_type(self) -> Option<BurstType> {
        match self {
            TrainingSequence::SyncTrainSeq => Some(BurstType::Sb),
            TrainingSequence::NormalTrainSeq1 => Some(BurstType::Ndb),
            TrainingSequence::NormalTrainSeq2 => Some(BurstType::NdbSf),
            _ => None,
        }
    }
}
