//! Field layouts of the downlink call control PDUs (clause 14.7.1).
//! Every table starts after the 5-bit PDU type.

use tetra_core::typed_pdu_fields::layout::FieldStep::{self, *};

use crate::cmce::enums::cmce_pdu_type_dl::CmcePduTypeDl;
use crate::cmce::enums::type3_elem_id::CMCE_TYPE3_NAMES;

const CALL_ID: FieldStep = Fixed { name: "call identifier", bits: 14 };
const NOTIFICATION: FieldStep = Type2 { name: "notification indicator", bits: 6 };
const TYPE3: FieldStep = Type3 { known: CMCE_TYPE3_NAMES };

/// 14.7.1.1
pub const D_ALERT: &[FieldStep] = &[
    CALL_ID,
    Fixed { name: "call timeout, setup phase", bits: 3 },
    Reserved { bits: 1 },
    Fixed { name: "simplex/duplex operation", bits: 1 },
    Fixed { name: "call queued", bits: 1 },
    Obit,
    Type2 { name: "basic service information", bits: 8 },
    NOTIFICATION,
    TYPE3,
];

/// 14.7.1.2
pub const D_CALL_PROCEEDING: &[FieldStep] = &[
    CALL_ID,
    Fixed { name: "call timeout, setup phase", bits: 3 },
    Fixed { name: "hook method selection", bits: 1 },
    Fixed { name: "simplex/duplex selection", bits: 1 },
    Obit,
    Type2 { name: "basic service information", bits: 8 },
    Type2 { name: "call status", bits: 3 },
    NOTIFICATION,
    TYPE3,
];

/// 14.7.1.3
pub const D_CALL_RESTORE: &[FieldStep] = &[
    CALL_ID,
    Fixed { name: "transmission grant", bits: 2 },
    Fixed { name: "transmission request permission", bits: 1 },
    Fixed { name: "reset call time-out timer T310", bits: 1 },
    Obit,
    Type2 { name: "new call identifier", bits: 14 },
    Type2 { name: "call time-out", bits: 4 },
    Type2 { name: "call status", bits: 3 },
    Type2 { name: "modify", bits: 9 },
    NOTIFICATION,
    TYPE3,
];

/// 14.7.1.4
pub const D_CONNECT: &[FieldStep] = &[
    CALL_ID,
    Fixed { name: "call timeout", bits: 4 },
    Fixed { name: "hook method selection", bits: 1 },
    Fixed { name: "simplex/duplex selection", bits: 1 },
    Fixed { name: "transmission grant", bits: 2 },
    Fixed { name: "transmission request permission", bits: 1 },
    Fixed { name: "call ownership", bits: 1 },
    Obit,
    Type2 { name: "call priority", bits: 4 },
    Type2 { name: "basic service information", bits: 8 },
    Type2 { name: "temporary address", bits: 24 },
    NOTIFICATION,
    TYPE3,
];

/// 14.7.1.5
pub const D_CONNECT_ACKNOWLEDGE: &[FieldStep] = &[
    CALL_ID,
    Fixed { name: "call timeout", bits: 4 },
    Fixed { name: "transmission grant", bits: 2 },
    Fixed { name: "transmission request permission", bits: 1 },
    Obit,
    NOTIFICATION,
    TYPE3,
];

/// 14.7.1.6
pub const D_DISCONNECT: &[FieldStep] = &[
    CALL_ID,
    Fixed { name: "disconnect cause", bits: 5 },
    Obit,
    NOTIFICATION,
    TYPE3,
];

/// 14.7.1.8
pub const D_INFO: &[FieldStep] = &[
    CALL_ID,
    Fixed { name: "reset call time-out timer (T310)", bits: 1 },
    Fixed { name: "poll request", bits: 1 },
    Obit,
    Type2 { name: "new call identifier", bits: 14 },
    Type2 { name: "call time-out", bits: 4 },
    Type2 { name: "call time-out setup phase (T301, T302)", bits: 3 },
    Type2 { name: "call ownership", bits: 1 },
    Type2 { name: "modify", bits: 9 },
    Type2 { name: "call status", bits: 3 },
    Type2 { name: "temporary address", bits: 24 },
    NOTIFICATION,
    Type2 { name: "poll response percentage", bits: 6 },
    Type2 { name: "poll response number", bits: 6 },
    TYPE3,
];

/// 14.7.1.9
pub const D_RELEASE: &[FieldStep] = &[
    CALL_ID,
    Fixed { name: "disconnect cause", bits: 5 },
    Obit,
    NOTIFICATION,
    TYPE3,
];

/// 14.7.1.12
pub const D_SETUP: &[FieldStep] = &[
    CALL_ID,
    Fixed { name: "call timeout", bits: 4 },
    Fixed { name: "hook method selection", bits: 1 },
    Fixed { name: "simplex/duplex selection", bits: 1 },
    Fixed { name: "basic service information", bits: 8 },
    Fixed { name: "transmission grant", bits: 2 },
    Fixed { name: "transmission request permission", bits: 1 },
    Fixed { name: "call priority", bits: 4 },
    Obit,
    NOTIFICATION,
    Type2 { name: "temporary address", bits: 24 },
    Type2Party {
        type_name: "calling party type identifier",
        ssi_name: "calling party ssi",
        ext_name: "calling party ext",
    },
    TYPE3,
];

/// 14.7.1.13
pub const D_TX_CEASED: &[FieldStep] = &[
    CALL_ID,
    Fixed { name: "transmission request permission", bits: 1 },
    Obit,
    NOTIFICATION,
    TYPE3,
];

/// 14.7.1.14
pub const D_TX_CONTINUE: &[FieldStep] = &[
    CALL_ID,
    Fixed { name: "continue", bits: 1 },
    Fixed { name: "transmission request permission", bits: 1 },
    Obit,
    NOTIFICATION,
    TYPE3,
];

const TRANSMITTING_PARTY: FieldStep = Type2Party {
    type_name: "transmission party type identifier",
    ssi_name: "transmitting party ssi",
    ext_name: "transmitting party ext",
};

/// 14.7.1.15
pub const D_TX_GRANTED: &[FieldStep] = &[
    CALL_ID,
    Fixed { name: "transmission grant", bits: 2 },
    Fixed { name: "transmission request permission", bits: 1 },
    Fixed { name: "encryption control", bits: 1 },
    Reserved { bits: 1 },
    Obit,
    NOTIFICATION,
    TRANSMITTING_PARTY,
    TYPE3,
];

/// 14.7.1.16
pub const D_TX_INTERRUPT: &[FieldStep] = D_TX_GRANTED;

/// 14.7.1.17
pub const D_TX_WAIT: &[FieldStep] = &[
    CALL_ID,
    Fixed { name: "transmission request permission", bits: 1 },
    Obit,
    NOTIFICATION,
    TYPE3,
];

/// Layout of a call control PDU, None for the PDUs decoded elsewhere or not at all
pub fn layout_for(pdu_type: CmcePduTypeDl) -> Option<&'static [FieldStep]> {
    match pdu_type {
        CmcePduTypeDl::DAlert => Some(D_ALERT),
        CmcePduTypeDl::DCallProceeding => Some(D_CALL_PROCEEDING),
        CmcePduTypeDl::DCallRestore => Some(D_CALL_RESTORE),
        CmcePduTypeDl::DConnect => Some(D_CONNECT),
        CmcePduTypeDl::DConnectAcknowledge => Some(D_CONNECT_ACKNOWLEDGE),
        CmcePduTypeDl::DDisconnect => Some(D_DISCONNECT),
        CmcePduTypeDl::DInfo => Some(D_INFO),
        CmcePduTypeDl::DRelease => Some(D_RELEASE),
        CmcePduTypeDl::DSetup => Some(D_SETUP),
        CmcePduTypeDl::DTxCeased => Some(D_TX_CEASED),
        CmcePduTypeDl::DTxContinue => Some(D_TX_CONTINUE),
        CmcePduTypeDl::DTxGranted => Some(D_TX_GRANTED),
        CmcePduTypeDl::DTxInterrupt => Some(D_TX_INTERRUPT),
        CmcePduTypeDl::DTxWait => Some(D_TX_WAIT),
        CmcePduTypeDl::DStatus
        | CmcePduTypeDl::DSdsData
        | CmcePduTypeDl::DFacility
        | CmcePduTypeDl::CmceFunctionNotSupported
        | CmcePduTypeDl::Reserved(_) => None,
    }
}
