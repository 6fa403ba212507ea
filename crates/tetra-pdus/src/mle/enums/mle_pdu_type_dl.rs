/// Clause 18.5.20 MLE PDU types
/// Bits: 3
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MlePduTypeDl {
    DNewCell = 0,
    DPrepareFail = 1,
    DNwrkBroadcast = 2,
    DNwrkBroadcastExt = 3,
    DRestoreAck = 4,
    DRestoreFail = 5,
    DChannelResponse = 6,
    ExtPdu = 7,
}

impl MlePduTypeDl {
    pub fn from_raw(x: u64) -> Self {
        match x & 0b111 {
            0 => MlePduTypeDl::DNewCell,
            1 => MlePduTypeDl::DPrepareFail,
            2 => MlePduTypeDl::DNwrkBroadcast,
            3 => MlePduTypeDl::DNwrkBroadcastExt,
            4 => MlePduTypeDl::DRestoreAck,
            5 => MlePduTypeDl::DRestoreFail,
            6 => MlePduTypeDl::DChannelResponse,
            _ => MlePduTypeDl::ExtPdu,
        }
    }

    pub fn into_raw(self) -> u64 {
        self as u64
    }

    pub fn name(self) -> &'static str {
        match self {
            MlePduTypeDl::DNewCell => "D-NEW-CELL",
            MlePduTypeDl::DPrepareFail => "D-PREPARE-FAIL",
            MlePduTypeDl::DNwrkBroadcast => "D-NWRK-BROADCAST",
            MlePduTypeDl::DNwrkBroadcastExt => "D-NWRK-BROADCAST-EXTENSION",
            MlePduTypeDl::DRestoreAck => "D-RESTORE-ACK",
            MlePduTypeDl::DRestoreFail => "D-RESTORE-FAIL",
            MlePduTypeDl::DChannelResponse => "D-CHANNEL-RESPONSE",
            MlePduTypeDl::ExtPdu => "reserved",
        }
    }
}

impl From<MlePduTypeDl> for u64 {
    fn from(e: MlePduTypeDl) -> Self {
        e.into_raw()
    }
}

impl core::fmt::Display for MlePduTypeDl {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.name())
    }
}
