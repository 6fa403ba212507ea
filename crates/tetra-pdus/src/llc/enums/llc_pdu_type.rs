/// Clause 21.2.1 LLC PDU types
/// Bits: 4
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LlcPduType {
    BlAdata = 0,
    BlData = 1,
    BlUdata = 2,
    BlAck = 3,
    BlAdataFcs = 4,
    BlDataFcs = 5,
    BlUdataFcs = 6,
    BlAckFcs = 7,
    AlSetup = 8,
    AlDataAlFinal = 9,
    AlUdataAlUfinal = 10,
    AlAckAlRnr = 11,
    AlReconnect = 12,
    SuppLlcPdu = 13,
    L2SigPdu = 14,
    AlDisc = 15,
}

impl LlcPduType {
    /// The type field is 4 bits wide, so every value maps to a PDU type
    pub fn from_raw(x: u64) -> Self {
        match x & 0xf {
            0 => LlcPduType::BlAdata,
            1 => LlcPduType::BlData,
            2 => LlcPduType::BlUdata,
            3 => LlcPduType::BlAck,
            4 => LlcPduType::BlAdataFcs,
            5 => LlcPduType::BlDataFcs,
            6 => LlcPduType::BlUdataFcs,
            7 => LlcPduType::BlAckFcs,
            8 => LlcPduType::AlSetup,
            9 => LlcPduType::AlDataAlFinal,
            10 => LlcPduType::AlUdataAlUfinal,
            11 => LlcPduType::AlAckAlRnr,
            12 => LlcPduType::AlReconnect,
            13 => LlcPduType::SuppLlcPdu,
            14 => LlcPduType::L2SigPdu,
            _ => LlcPduType::AlDisc,
        }
    }

    pub fn into_raw(self) -> u64 {
        self as u64
    }

    /// Basic link PDUs with a trailing 32-bit frame check sequence
    pub fn has_fcs(self) -> bool {
        matches!(
            self,
            LlcPduType::BlAdataFcs | LlcPduType::BlDataFcs | LlcPduType::BlUdataFcs | LlcPduType::BlAckFcs
        )
    }

    pub fn is_basic_link(self) -> bool {
        (self as u8) < 8
    }

    pub fn name(self) -> &'static str {
        match self {
            LlcPduType::BlAdata => "BL-ADATA",
            LlcPduType::BlData => "BL-DATA",
            LlcPduType::BlUdata => "BL-UDATA",
            LlcPduType::BlAck => "BL-ACK",
            LlcPduType::BlAdataFcs => "BL-ADATA + FCS",
            LlcPduType::BlDataFcs => "BL-DATA + FCS",
            LlcPduType::BlUdataFcs => "BL-UDATA + FCS",
            LlcPduType::BlAckFcs => "BL-ACK + FCS",
            LlcPduType::AlSetup => "AL-SETUP",
            LlcPduType::AlDataAlFinal => "AL-DATA/AL-FINAL",
            LlcPduType::AlUdataAlUfinal => "AL-UDATA/AL-UFINAL",
            LlcPduType::AlAckAlRnr => "AL-ACK/AL-RNR",
            LlcPduType::AlReconnect => "AL-RECONNECT",
            LlcPduType::SuppLlcPdu => "supplementary LLC PDU",
            LlcPduType::L2SigPdu => "layer 2 signalling PDU",
            LlcPduType::AlDisc => "AL-DISC",
        }
    }
}

impl From<LlcPduType> for u64 {
    fn from(e: LlcPduType) -> Self {
        e.into_raw()
    }
}

impl core::fmt::Display for LlcPduType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.name())
    }
}
