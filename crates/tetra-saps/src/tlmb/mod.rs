use tetra_core::BitBuffer;

/// TL-SAP and TMB-SAP merged into TLMB-SAP
/// MLE part of the SYNC PDU, received on the BSCH
#[derive(Debug)]
pub struct TlmbSyncInd {
    pub tl_sdu: BitBuffer,
}

/// TL-SAP and TMB-SAP merged into TLMB-SAP
/// MLE part of the SYSINFO PDU, received on the BNCH
#[derive(Debug)]
pub struct TlmbSysinfoInd {
    pub tl_sdu: BitBuffer,
}
