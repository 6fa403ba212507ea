use tetra_saps::tmv::enums::logical_chans::LogicalChannel;

/// Block sizes and interleaving parameter of a coded control channel, Clause 8.3
#[derive(Debug, PartialEq, Eq)]
pub struct ErrorControlParams {
    /// Bits after puncturing (type3), interleaving (type4) and scrambling (type5)
    pub type345_bits: usize,
    /// Bits after CRC and tail addition
    pub type2_bits: usize,
    /// Bits handed to or received from the UMAC
    pub type1_bits: usize,
    /// Parameter `a` of the (K, a) block interleaver, K being type345_bits
    pub interleave_a: usize,
    pub have_crc16: bool,
}

pub const BSCH_PARAMS: ErrorControlParams = ErrorControlParams {
    type345_bits: 120,
    type2_bits: 80,
    type1_bits: 60,
    interleave_a: 11,
    have_crc16: true,
};

/// SCH/HD, also used for the STCH and the BNCH
pub const SCH_HD_PARAMS: ErrorControlParams = ErrorControlParams {
    type345_bits: 216,
    type2_bits: 144,
    type1_bits: 124,
    interleave_a: 101,
    have_crc16: true,
};

/// AACH: RM(30,14) coded, not interleaved
pub const AACH_PARAMS: ErrorControlParams = ErrorControlParams {
    type345_bits: 30,
    type2_bits: 30,
    type1_bits: 14,
    interleave_a: 0,
    have_crc16: false,
};

pub const SCH_F_PARAMS: ErrorControlParams = ErrorControlParams {
    type345_bits: 432,
    type2_bits: 288,
    type1_bits: 268,
    interleave_a: 103,
    have_crc16: true,
};

/// Error control parameters of a downlink control channel.
/// Traffic channels are not channel decoded here and yield None.
pub fn get_params(lchan: LogicalChannel) -> Option<&'static ErrorControlParams> {
    match lchan {
        LogicalChannel::Bsch => Some(&BSCH_PARAMS),
        LogicalChannel::SchHd | LogicalChannel::Stch | LogicalChannel::Bnch => Some(&SCH_HD_PARAMS),
        LogicalChannel::Aach => Some(&AACH_PARAMS),
        LogicalChannel::SchF => Some(&SCH_F_PARAMS),
        LogicalChannel::TchS | LogicalChannel::Tch => None,
    }
}
