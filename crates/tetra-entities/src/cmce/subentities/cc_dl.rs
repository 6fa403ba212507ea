use tetra_core::{BitBuffer, MacAddress};
use tetra_pdus::cmce::pdus::call_control::CallControlPdu;

use crate::context::DecoderContext;

/// Clause 14 call control CMCE sub-entity. Calls are not tracked, every PDU is
/// decoded through its field layout and reported.
#[derive(Default)]
pub struct CcDlSubentity;

impl CcDlSubentity {
    pub fn new() -> Self {
        Self
    }

    /// `pdu` starts at the CMCE PDU type
    pub fn rx_call_control(&mut self, ctx: &mut DecoderContext, mut pdu: BitBuffer, address: &MacAddress, name: &str) {
        let cc = match CallControlPdu::from_bitbuf(&mut pdu) {
            Ok(cc) => cc,
            Err(e) => {
                tracing::warn!("Failed parsing {}: {:?} {}", name, e, pdu.dump_bin());
                ctx.send_invalid("CMCE", name, address, e.to_string());
                return;
            }
        };
        tracing::debug!("<- {}", cc);
        if pdu.get_len_remaining() > 0 {
            tracing::trace!("{}: {} trailing bits", name, pdu.get_len_remaining());
        }

        let mut report = ctx.new_report("CMCE", cc.pdu_type.name(), address);
        for field in &cc.fields {
            report.add(field.name, field.value);
        }
        ctx.send_report(report);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ChannelSink, ReportValue};

    #[test]
    fn test_d_tx_granted_report() {
        let (sink, rx) = ChannelSink::new();
        let mut ctx = DecoderContext::new(Default::default(), Box::new(sink));
        let mut cc = CcDlSubentity::new();

        let pdu = BitBuffer::from_bitstr(concat!(
            "01011 00000100100011 00 1 0 0 1 ",
            "0 1 01 000000001010101111001101 0"
        ));
        let address = MacAddress { ssi: 9000, ..Default::default() };
        cc.rx_call_control(&mut ctx, pdu, &address, "D-TX GRANTED");

        let report = rx.try_recv().unwrap();
        assert_eq!(report.service(), "CMCE");
        assert_eq!(report.pdu(), "D-TX GRANTED");
        assert_eq!(report.get("ssi").and_then(ReportValue::as_u64), Some(9000));
        assert_eq!(report.get("call identifier").and_then(ReportValue::as_u64), Some(0x123));
        assert_eq!(report.get("transmitting party ssi").and_then(ReportValue::as_u64), Some(0xabcd));
        assert!(report.get("notification indicator").is_none());
    }

    #[test]
    fn test_truncated_pdu_is_invalid() {
        let (sink, rx) = ChannelSink::new();
        let mut ctx = DecoderContext::new(Default::default(), Box::new(sink));
        let mut cc = CcDlSubentity::new();

        cc.rx_call_control(&mut ctx, BitBuffer::from_bitstr("00110 0000000"), &MacAddress::default(), "D-RELEASE");
        let report = rx.try_recv().unwrap();
        assert_eq!(report.pdu(), "D-RELEASE");
        assert!(report.get("invalid pdu").is_some());
    }
}
