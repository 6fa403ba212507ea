// SAPs as defined in the standard, restricted to the downlink receive path
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Sap {
    /// Phy/LMAC
    TpSap,

    /// LMAC/UMAC
    TmvSap,

    /// UMAC/LLC
    TmaSap,
    /// UMAC/U-plane
    TmdSap,

    /// LLC/MLE
    TlaSap,
    /// LLC/MLE broadcast, merged TMB-SAP and TLB-SAP
    TlmbSap,

    /// MLE/MM
    LmmSap,
    /// MLE/CMCE
    LcmcSap,
    /// MLE/SNDCP
    LtpdSap,
}

/// Downlink usage (clause 21.4.7.2, table 21.77)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum DownlinkUsage {
    Unallocated,
    AssignedControl,
    #[default]
    CommonControl,
    Reserved,
    /// Traffic, with the usage marker carried in the same AACH
    Traffic,
}

impl DownlinkUsage {
    pub fn name(self) -> &'static str {
        match self {
            DownlinkUsage::Unallocated => "unallocated",
            DownlinkUsage::AssignedControl => "assigned control",
            DownlinkUsage::CommonControl => "common control",
            DownlinkUsage::Reserved => "reserved",
            DownlinkUsage::Traffic => "traffic",
        }
    }
}
