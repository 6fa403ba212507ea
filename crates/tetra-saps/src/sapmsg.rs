use core::fmt::Display;

use tetra_core::tetra_entities::TetraEntity;
use tetra_core::{Sap, TdmaTime};

use super::lcmc::*;
use super::lmm::*;
use super::ltpd::*;
use super::tla::*;
use super::tlmb::*;
use super::tma::*;
use super::tmd::*;
use super::tmv::*;
use super::tp::*;

/// Exhaustive list of primitives for use in the SapMsg struct
/// See Clause 19.2.1 for an overview of all lower-layer SAPs
#[derive(Debug)]
pub enum SapMsgInner {
    /// TP-SAP (Contents not defined in standard)
    TpUnitdataInd(TpUnitdataInd),

    // TMV-SAP
    TmvUnitdataInd(TmvUnitdataInd),

    // TMA-SAP
    TmaUnitdataInd(TmaUnitdataInd),

    // TMB-SAP / TLB-SAP (merged to TLMB-SAP)
    TlmbSyncInd(TlmbSyncInd),
    TlmbSysinfoInd(TlmbSysinfoInd),

    // TMD-SAP (U-plane traffic)
    TmdCircuitDataInd(TmdCircuitDataInd),

    // TLA-SAP
    TlaTlDataInd(TlaTlDataInd),

    // LMM-SAP (MLE-MM)
    LmmMleUnitdataInd(LmmMleUnitdataInd),

    // LCMC-SAP (MLE-CMCE)
    LcmcMleUnitdataInd(LcmcMleUnitdataInd),

    // LTPD-SAP (MLE-SNDCP)
    LtpdMleUnitdataInd(LtpdMleUnitdataInd),
}

impl Display for SapMsgInner {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            SapMsgInner::TpUnitdataInd(_) => "TpUnitdataInd",
            SapMsgInner::TmvUnitdataInd(_) => "TmvUnitdataInd",
            SapMsgInner::TmaUnitdataInd(_) => "TmaUnitdataInd",
            SapMsgInner::TlmbSyncInd(_) => "TlmbSyncInd",
            SapMsgInner::TlmbSysinfoInd(_) => "TlmbSysinfoInd",
            SapMsgInner::TmdCircuitDataInd(_) => "TmdCircuitDataInd",
            SapMsgInner::TlaTlDataInd(_) => "TlaTlDataInd",
            SapMsgInner::LmmMleUnitdataInd(_) => "LmmMleUnitdataInd",
            SapMsgInner::LcmcMleUnitdataInd(_) => "LcmcMleUnitdataInd",
            SapMsgInner::LtpdMleUnitdataInd(_) => "LtpdMleUnitdataInd",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug)]
pub struct SapMsg {
    pub sap: Sap,
    pub src: TetraEntity,
    pub dest: TetraEntity,
    /// Downlink time at the time the message was created
    pub dltime: TdmaTime,
    pub msg: SapMsgInner,
}

impl SapMsg {
    pub fn new(sap: Sap, src: TetraEntity, dest: TetraEntity, dltime: TdmaTime, msg: SapMsgInner) -> Self {
        Self { sap, src, dest, dltime, msg }
    }

    pub fn get_source(&self) -> &TetraEntity {
        &self.src
    }

    pub fn get_dest(&self) -> &TetraEntity {
        &self.dest
    }

    pub fn get_sap(&self) -> &Sap {
        &self.sap
    }
}
