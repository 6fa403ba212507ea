//! Training sequences and block positions of the continuous downlink bursts, Clause 9.4.4

/// 9.4.4.3.2 Normal training sequence 1, 22 n-bits
pub const SEQ_NORM1: [u8; 22] = [1, 1, 0, 1, 0, 0, 0, 0, 1, 1, 1, 0, 1, 0, 0, 1, 1, 1, 0, 1, 0, 0];
/// 9.4.4.3.2 Normal training sequence 2, 22 p-bits
pub const SEQ_NORM2: [u8; 22] = [0, 1, 1, 1, 1, 0, 1, 0, 0, 1, 0, 0, 0, 0, 1, 1, 0, 1, 1, 1, 1, 0];
/// q11..q22 of training sequence 3, which opens every downlink burst
pub const SEQ_NORM3_BEGIN: [u8; 12] = [0, 0, 0, 1, 1, 0, 1, 0, 1, 1, 0, 1];
/// q1..q10 of training sequence 3, which closes every downlink burst
pub const SEQ_NORM3_END: [u8; 10] = [1, 0, 1, 1, 0, 1, 1, 1, 0, 0];
/// 9.4.4.3.4 Synchronization training sequence, 38 y-bits
pub const SEQ_SYNC: [u8; 38] = [
    1, 1, 0, 0, 0, 0, 0, 1, 1, 0, 0, 1, 1, 1, 0, 0, 1, 1, 1, 0, 1, 0, 0, 1, 1, 1, 0, 0, 0, 0, 0, 1, 1, 0, 0, 1, 1, 1,
];

pub const SEQ_BEGIN_OFFSET: usize = 0;
pub const SEQ_END_OFFSET: usize = 500;
pub const SEQ_SYNC_OFFSET: usize = 214;
pub const SEQ_NORM_DL_OFFSET: usize = 244;

/// Synchronization burst: BKN1 (BSCH), BBK, BKN2
pub const SB_BLK1_OFFSET: usize = 94;
pub const SB_BLK1_BITS: usize = 120;
pub const SB_BBK_OFFSET: usize = 252;
pub const SB_BBK_BITS: usize = 30;
pub const SB_BLK2_OFFSET: usize = 282;
pub const SB_BLK2_BITS: usize = 216;

/// Normal burst: two half blocks around the training sequence, the BBK split in two
pub const NDB_BLK1_OFFSET: usize = 14;
pub const NDB_BLK2_OFFSET: usize = 282;
pub const NDB_BLK_BITS: usize = 216;
pub const NDB_BBK1_OFFSET: usize = 230;
pub const NDB_BBK1_BITS: usize = 14;
pub const NDB_BBK2_OFFSET: usize = 266;
pub const NDB_BBK2_BITS: usize = 16;
