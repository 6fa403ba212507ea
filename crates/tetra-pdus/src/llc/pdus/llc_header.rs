use tetra_core::pdu_parse_error::PduParseErr;
use tetra_core::{BitBuffer, let_field};

use crate::llc::enums::llc_pdu_type::LlcPduType;

/// Length of the frame check sequence trailing the BL-xxx + FCS PDUs
pub const FCS_LEN_BITS: usize = 32;

/// Clause 21.2.2, header of any LLC PDU.
/// After `from_bitbuf`, the buffer position is at the TL-SDU (if the PDU carries one).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlcHeader {
    pub pdu_type: LlcPduType,
    /// Receive sequence number (BL-ADATA, BL-ACK, AL-ACK)
    pub nr: Option<u8>,
    /// Send sequence number (BL-ADATA, BL-DATA, AL-DATA, AL-UDATA)
    pub ns: Option<u8>,
    /// Segment sequence number of an advanced link segment
    pub ss: Option<u8>,
    /// AL-FINAL / AL-UFINAL flag
    pub is_final: bool,
    /// AL-DATA-AR / AL-FINAL-AR: acknowledgement requested
    pub ack_request: bool,
    /// AL-SETUP: advanced link type, AL-ACK: flow control
    pub flag: Option<bool>,
}

impl LlcHeader {
    pub fn from_bitbuf(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let_field!(buf, pdu_type, 4);
        let pdu_type = LlcPduType::from_raw(pdu_type);
        let mut hdr = LlcHeader {
            pdu_type,
            nr: None,
            ns: None,
            ss: None,
            is_final: false,
            ack_request: false,
            flag: None,
        };

        match pdu_type {
            LlcPduType::BlAdata | LlcPduType::BlAdataFcs => {
                let_field!(buf, nr, 1);
                let_field!(buf, ns, 1);
                hdr.nr = Some(nr as u8);
                hdr.ns = Some(ns as u8);
            }
            LlcPduType::BlData | LlcPduType::BlDataFcs => {
                let_field!(buf, ns, 1);
                hdr.ns = Some(ns as u8);
            }
            LlcPduType::BlUdata | LlcPduType::BlUdataFcs => {}
            LlcPduType::BlAck | LlcPduType::BlAckFcs => {
                let_field!(buf, nr, 1);
                hdr.nr = Some(nr as u8);
            }
            LlcPduType::AlSetup => {
                // Setup parameters are not interpreted, no TL-SDU follows
                hdr.flag = Some(buf.read_flag("advanced_link")?);
            }
            LlcPduType::AlDataAlFinal => {
                hdr.is_final = buf.read_flag("final")?;
                hdr.ack_request = buf.read_flag("ar")?;
                let_field!(buf, ns, 3);
                let_field!(buf, ss, 8);
                hdr.ns = Some(ns as u8);
                hdr.ss = Some(ss as u8);
            }
            LlcPduType::AlUdataAlUfinal => {
                hdr.is_final = buf.read_flag("final")?;
                let_field!(buf, ns, 8);
                let_field!(buf, ss, 8);
                hdr.ns = Some(ns as u8);
                hdr.ss = Some(ss as u8);
            }
            LlcPduType::AlAckAlRnr => {
                hdr.flag = Some(buf.read_flag("flow_control")?);
                let_field!(buf, nr, 3);
                let_field!(buf, ack_length, 6);
                if (1..=0b111110).contains(&ack_length) {
                    let_field!(buf, sr, 8);
                    hdr.ss = Some(sr as u8);
                }
                hdr.nr = Some(nr as u8);
            }
            LlcPduType::AlReconnect | LlcPduType::SuppLlcPdu | LlcPduType::L2SigPdu | LlcPduType::AlDisc => {}
        }
        Ok(hdr)
    }

    /// True if the remainder of the PDU is a TL-SDU for the MLE
    pub fn carries_sdu(&self) -> bool {
        matches!(
            self.pdu_type,
            LlcPduType::BlAdata
                | LlcPduType::BlData
                | LlcPduType::BlUdata
                | LlcPduType::BlAck
                | LlcPduType::BlAdataFcs
                | LlcPduType::BlDataFcs
                | LlcPduType::BlUdataFcs
                | LlcPduType::BlAckFcs
                | LlcPduType::AlDataAlFinal
                | LlcPduType::AlUdataAlUfinal
        )
    }

    /// Name of the PDU, resolving the advanced link variants that share a type value
    pub fn name(&self) -> &'static str {
        match self.pdu_type {
            LlcPduType::AlDataAlFinal => match (self.is_final, self.ack_request) {
                (false, false) => "AL-DATA",
                (false, true) => "AL-DATA-AR",
                (true, false) => "AL-FINAL",
                (true, true) => "AL-FINAL-AR",
            },
            LlcPduType::AlUdataAlUfinal if self.is_final => "AL-UFINAL",
            LlcPduType::AlUdataAlUfinal => "AL-UDATA",
            other => other.name(),
        }
    }
}

impl core::fmt::Display for LlcHeader {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.name())?;
        if let Some(nr) = self.nr {
            write!(f, " nr: {}", nr)?;
        }
        if let Some(ns) = self.ns {
            write!(f, " ns: {}", ns)?;
        }
        if let Some(ss) = self.ss {
            write!(f, " ss: {}", ss)?;
        }
        Ok(())
    }
}
