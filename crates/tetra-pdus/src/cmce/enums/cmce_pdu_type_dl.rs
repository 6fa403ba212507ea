/// Clause 14.8.28 PDU type, downlink direction
/// Bits: 5
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmcePduTypeDl {
    DAlert,
    DCallProceeding,
    DConnect,
    DConnectAcknowledge,
    DDisconnect,
    DInfo,
    DRelease,
    DSetup,
    DStatus,
    DTxCeased,
    DTxContinue,
    DTxGranted,
    DTxWait,
    DTxInterrupt,
    DCallRestore,
    DSdsData,
    DFacility,
    CmceFunctionNotSupported,
    /// 17..=30
    Reserved(u8),
}

impl CmcePduTypeDl {
    pub fn from_raw(x: u64) -> Self {
        match x & 0x1f {
            0 => CmcePduTypeDl::DAlert,
            1 => CmcePduTypeDl::DCallProceeding,
            2 => CmcePduTypeDl::DConnect,
            3 => CmcePduTypeDl::DConnectAcknowledge,
            4 => CmcePduTypeDl::DDisconnect,
            5 => CmcePduTypeDl::DInfo,
            6 => CmcePduTypeDl::DRelease,
            7 => CmcePduTypeDl::DSetup,
            8 => CmcePduTypeDl::DStatus,
            9 => CmcePduTypeDl::DTxCeased,
            10 => CmcePduTypeDl::DTxContinue,
            11 => CmcePduTypeDl::DTxGranted,
            12 => CmcePduTypeDl::DTxWait,
            13 => CmcePduTypeDl::DTxInterrupt,
            14 => CmcePduTypeDl::DCallRestore,
            15 => CmcePduTypeDl::DSdsData,
            16 => CmcePduTypeDl::DFacility,
            31 => CmcePduTypeDl::CmceFunctionNotSupported,
            other => CmcePduTypeDl::Reserved(other as u8),
        }
    }

    pub fn into_raw(self) -> u64 {
        match self {
            CmcePduTypeDl::DAlert => 0,
            CmcePduTypeDl::DCallProceeding => 1,
            CmcePduTypeDl::DConnect => 2,
            CmcePduTypeDl::DConnectAcknowledge => 3,
            CmcePduTypeDl::DDisconnect => 4,
            CmcePduTypeDl::DInfo => 5,
            CmcePduTypeDl::DRelease => 6,
            CmcePduTypeDl::DSetup => 7,
            CmcePduTypeDl::DStatus => 8,
            CmcePduTypeDl::DTxCeased => 9,
            CmcePduTypeDl::DTxContinue => 10,
            CmcePduTypeDl::DTxGranted => 11,
            CmcePduTypeDl::DTxWait => 12,
            CmcePduTypeDl::DTxInterrupt => 13,
            CmcePduTypeDl::DCallRestore => 14,
            CmcePduTypeDl::DSdsData => 15,
            CmcePduTypeDl::DFacility => 16,
            CmcePduTypeDl::CmceFunctionNotSupported => 31,
            CmcePduTypeDl::Reserved(x) => x as u64,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CmcePduTypeDl::DAlert => "D-ALERT",
            CmcePduTypeDl::DCallProceeding => "D-CALL-PROCEEDING",
            CmcePduTypeDl::DConnect => "D-CONNECT",
            CmcePduTypeDl::DConnectAcknowledge => "D-CONNECT ACKNOWLEDGE",
            CmcePduTypeDl::DDisconnect => "D-DISCONNECT",
            CmcePduTypeDl::DInfo => "D-INFO",
            CmcePduTypeDl::DRelease => "D-RELEASE",
            CmcePduTypeDl::DSetup => "D-SETUP",
            CmcePduTypeDl::DStatus => "D-STATUS",
            CmcePduTypeDl::DTxCeased => "D-TX CEASED",
            CmcePduTypeDl::DTxContinue => "D-TX CONTINUE",
            CmcePduTypeDl::DTxGranted => "D-TX GRANTED",
            CmcePduTypeDl::DTxWait => "D-TX WAIT",
            CmcePduTypeDl::DTxInterrupt => "D-TX INTERRUPT",
            CmcePduTypeDl::DCallRestore => "D-CALL RESTORE",
            CmcePduTypeDl::DSdsData => "D-SDS-DATA",
            CmcePduTypeDl::DFacility => "D-FACILITY",
            CmcePduTypeDl::CmceFunctionNotSupported => "CMCE FUNCTION NOT SUPPORTED",
            CmcePduTypeDl::Reserved(_) => "reserved",
        }
    }
}

impl From<CmcePduTypeDl> for u64 {
    fn from(e: CmcePduTypeDl) -> Self {
        e.into_raw()
    }
}

impl core::fmt::Display for CmcePduTypeDl {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.name())
    }
}
