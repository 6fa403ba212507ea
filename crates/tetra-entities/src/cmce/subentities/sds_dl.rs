use tetra_core::{BitBuffer, MacAddress};
use tetra_pdus::cmce::fields::party_address::PartyAddress;
use tetra_pdus::cmce::pdus::d_sds_data::{DSdsData, SdsUserData};
use tetra_pdus::cmce::pdus::d_status::DStatus;
use tetra_pdus::cmce::sds::lip::{LipAdditionalData, LipPdu, LipPduType, ShortLocationReport};
use tetra_pdus::cmce::sds::location::LocationMessage;
use tetra_pdus::cmce::sds::sds_tl::{ForwardAddress, SdsTlMessageType, SdsTlPayload, SdsTransfer};
use tetra_pdus::cmce::sds::text::TextMessage;
use tetra_pdus::cmce::sds::type4::{Type4Data, Type4Payload};

use crate::context::DecoderContext;
use crate::report::Report;

/// Clause 13 Short Data Service CMCE sub-entity
#[derive(Default)]
pub struct SdsDlSubentity;

impl SdsDlSubentity {
    pub fn new() -> Self {
        Self
    }

    /// D-SDS-DATA. User defined data 4 produces a second report with the raw payload.
    pub fn rx_sds_data(&mut self, ctx: &mut DecoderContext, mut pdu: BitBuffer, address: &MacAddress) {
        let sds = match DSdsData::from_bitbuf(&mut pdu) {
            Ok(sds) => sds,
            Err(e) => {
                tracing::warn!("Failed parsing D-SDS-DATA: {:?} {}", e, pdu.dump_bin());
                ctx.send_invalid("CMCE", "D-SDS-DATA", address, e.to_string());
                return;
            }
        };
        tracing::debug!("<- D-SDS-DATA from {} sdti {:?}", sds.calling_party, sds.sds_type_identifier);

        let mut report = ctx.new_report("CMCE", "D-SDS-DATA", address);
        add_party(&mut report, "calling party", &sds.calling_party);
        let (Some(sdti), Some(user_data)) = (sds.sds_type_identifier, sds.user_data) else {
            ctx.send_report(report);
            return;
        };
        report.add("sds type identifier", sdti);

        match user_data {
            SdsUserData::Data4(sdu) => {
                add_type4(&mut report, &sdu);
                ctx.send_report(report);

                let mut dump = ctx.new_report("CMCE", "D-SDS-DATA", address);
                dump.add_hex("hex", &sdu);
                ctx.send_report(dump);
            }
            other => {
                report.add_hex("infos", &other.to_bitbuf());
                ctx.send_report(report);
            }
        }
    }

    /// D-STATUS: pre-coded status and optional external subscriber number
    pub fn rx_status(&mut self, ctx: &mut DecoderContext, mut pdu: BitBuffer, address: &MacAddress) {
        let status = match DStatus::from_bitbuf(&mut pdu) {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!("Failed parsing D-STATUS: {:?} {}", e, pdu.dump_bin());
                ctx.send_invalid("CMCE", "D-STATUS", address, e.to_string());
                return;
            }
        };
        tracing::debug!("<- D-STATUS from {} status {:?}", status.calling_party, status.pre_coded_status);

        let mut report = ctx.new_report("CMCE", "D-STATUS", address);
        add_party(&mut report, "calling party", &status.calling_party);
        if let Some(pre_coded_status) = status.pre_coded_status {
            report.add("pre-coded status", pre_coded_status);
        }
        if let Some(number) = status.external_subscriber_number {
            report.add("external subscriber number", number);
        }
        ctx.send_report(report);
    }
}

fn add_party(report: &mut Report, prefix: &str, party: &PartyAddress) {
    report.add(&format!("{} type identifier", prefix), party.type_identifier);
    if let Some(ssi) = party.ssi {
        report.add(&format!("{} ssi", prefix), ssi);
    }
    if let Some(ext) = party.ext {
        report.add(&format!("{} ext", prefix), ext);
    }
}

/// User defined data 4, dispatched on the protocol identifier
fn add_type4(report: &mut Report, sdu: &BitBuffer) {
    let mut buf = BitBuffer::from_bitbuffer(sdu);
    let data = match Type4Data::from_bitbuf(&mut buf) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!("Failed parsing SDS type 4 data: {:?} {}", e, sdu.dump_bin());
            report.add("invalid pdu", e.to_string());
            return;
        }
    };

    report.add("protocol id", data.protocol_id.into_raw() as u8);
    if let Some(info) = data.protocol_id.info() {
        report.add("protocol info", info);
    }

    match data.payload {
        Type4Payload::SimpleText(text) => add_text(report, &text, "infos"),
        Type4Payload::SimpleLocation(location) => add_location(report, &location, "infos"),
        Type4Payload::Lip(LipPdu::ShortLocationReport(lip)) => add_short_location_report(report, &lip),
        Type4Payload::Lip(LipPdu::Other(pdu_type)) => {
            let name = match pdu_type {
                LipPduType::WithExtension => "location protocol PDU with extension",
                _ => "reserved",
            };
            report.add("sds-lip", name);
        }
        Type4Payload::SdsTl { message_type, transfer } => {
            report.add("message type", message_type.into_raw() as u8);
            match message_type {
                SdsTlMessageType::ApplicationDefined(_) => report.add("protocol info", message_type.name()),
                _ => report.add("sds-pdu", message_type.name()),
            }
            if let Some(transfer) = transfer {
                add_sds_transfer(report, &transfer);
            }
        }
        Type4Payload::Undecoded => {}
    }
}

fn add_text(report: &mut Report, text: &TextMessage, field: &str) {
    report.add("text coding scheme", text.text_coding_scheme);
    if let Some(timestamp) = text.timestamp {
        report.add("timestamp", timestamp);
    }
    report.add(field, text.content.to_report_string());
}

fn add_location(report: &mut Report, location: &LocationMessage, field: &str) {
    report.add("location coding system", location.location_system_coding);
    report.add(field, location.content.to_report_string());
}

fn add_sds_transfer(report: &mut Report, transfer: &SdsTransfer) {
    report.add("delivery report request", transfer.delivery_report_request);
    report.add("service selection", transfer.service_selection as u8);
    report.add("service forward control", transfer.service_forward_control as u8);
    report.add("message reference", transfer.message_reference);
    if let Some(validity_period) = transfer.validity_period {
        report.add("validity period", validity_period);
    }
    if let Some(forward_address) = &transfer.forward_address {
        report.add("forward address type", forward_address.type_raw());
        match forward_address {
            ForwardAddress::Sna(sna) => report.add("forward address ssi", *sna),
            ForwardAddress::Ssi(ssi) => report.add("forward address ssi", *ssi),
            ForwardAddress::Tsi { ssi, ext } => {
                report.add("forward address ssi", *ssi);
                report.add("forward address ext", *ext);
            }
            ForwardAddress::ExternalNumber(number) => report.add("forward address external number", number.as_str()),
            ForwardAddress::NotPresent => report.add("forward address", "none"),
            ForwardAddress::Reserved(_) => report.add("forward address", "reserved"),
        }
    }

    // Raw SDS-TL user data, plus its decoded form when the protocol is known
    report.add_hex("infos", &transfer.user_data);
    match &transfer.payload {
        SdsTlPayload::Text(text) => add_text(report, text, "text"),
        SdsTlPayload::Location(location) => add_location(report, location, "location"),
        SdsTlPayload::Undecoded => {}
    }
}

fn add_short_location_report(report: &mut Report, lip: &ShortLocationReport) {
    report.add("sds-lip", "short location report");
    report.add("time elapsed", lip.time_elapsed);
    report.add("longitude uint32", lip.longitude_raw);
    report.add("longitude", lip.longitude());
    report.add("latitude uint32", lip.latitude_raw);
    report.add("latitude", lip.latitude());
    report.add("position error", lip.position_error);
    report.add("horizontal velocity", lip.horizontal_velocity);
    report.add("direction of travel", lip.direction_of_travel);
    match lip.additional_data {
        LipAdditionalData::ReasonForSending(v) => report.add("reason for sending", v),
        LipAdditionalData::UserDefined(v) => report.add("user-defined additional data", v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ChannelSink, ReportValue};
    use crossbeam_channel::Receiver;

    fn setup() -> (DecoderContext, Receiver<Report>, SdsDlSubentity) {
        let (sink, rx) = ChannelSink::new();
        (DecoderContext::new(Default::default(), Box::new(sink)), rx, SdsDlSubentity::new())
    }

    fn str_field<'a>(report: &'a Report, field: &str) -> Option<&'a str> {
        report.get(field).and_then(ReportValue::as_str)
    }

    fn u64_field(report: &Report, field: &str) -> Option<u64> {
        report.get(field).and_then(ReportValue::as_u64)
    }

    /// D-SDS-DATA from ssi 401101 carrying `data4`
    fn sds_data4(data4: &BitBuffer) -> BitBuffer {
        let mut buf = BitBuffer::new_autoexpand(64);
        buf.write_bits(0b01111, 5);
        buf.write_bits(1, 2);
        buf.write_bits(401101, 24);
        buf.write_bits(3, 2);
        buf.write_bits(data4.get_len() as u64, 11);
        buf.append(data4);
        buf.seek(0);
        buf
    }

    #[test]
    fn test_user_data_1() {
        let (mut ctx, rx, mut sds) = setup();
        let pdu = BitBuffer::from_bitstr("01111 01 000000000000000100000010 00 1011111011101111");
        sds.rx_sds_data(&mut ctx, pdu, &MacAddress::default());

        let report = rx.try_recv().unwrap();
        assert_eq!(u64_field(&report, "calling party type identifier"), Some(1));
        assert_eq!(u64_field(&report, "calling party ssi"), Some(0x102));
        assert_eq!(u64_field(&report, "sds type identifier"), Some(0));
        assert_eq!(str_field(&report, "infos"), Some("be ef"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_sds_tl_text_produces_two_reports() {
        let (mut ctx, rx, mut sds) = setup();
        let hex = "82 00 e3 01 f0 80 00 c2 0c 12 07 29 05 99 05 82 01 0e 00 00 00";
        let bytes: Vec<u8> = hex.split_whitespace().map(|b| u8::from_str_radix(b, 16).unwrap()).collect();
        let data4 = BitBuffer::from_bytes_msb(&bytes);
        sds.rx_sds_data(&mut ctx, sds_data4(&data4), &MacAddress { ssi: 299906, ..Default::default() });

        let report = rx.try_recv().unwrap();
        assert_eq!(report.pdu(), "D-SDS-DATA");
        assert_eq!(u64_field(&report, "ssi"), Some(299906));
        assert_eq!(u64_field(&report, "calling party ssi"), Some(401101));
        assert_eq!(u64_field(&report, "sds type identifier"), Some(3));
        assert_eq!(u64_field(&report, "protocol id"), Some(130));
        assert_eq!(u64_field(&report, "message type"), Some(0));
        assert_eq!(str_field(&report, "sds-pdu"), Some("SDS-TRANSFER"));
        assert_eq!(u64_field(&report, "message reference"), Some(227));
        assert_eq!(str_field(&report, "infos"), Some("01 f0 80 00 c2 0c 12 07 29 05 99 05 82 01 0e 00 00 00"));
        assert_eq!(u64_field(&report, "text coding scheme"), Some(1));
        assert!(str_field(&report, "text").is_some());

        let dump = rx.try_recv().unwrap();
        assert_eq!(dump.pdu(), "D-SDS-DATA");
        assert_eq!(str_field(&dump, "hex"), Some(hex));
    }

    #[test]
    fn test_simple_text() {
        let (mut ctx, rx, mut sds) = setup();
        let data4 = BitBuffer::from_bytes_msb(b"\x02\x01Hi!");
        sds.rx_sds_data(&mut ctx, sds_data4(&data4), &MacAddress::default());

        let report = rx.try_recv().unwrap();
        assert_eq!(str_field(&report, "protocol info"), Some("simple text messaging"));
        assert_eq!(str_field(&report, "infos"), Some("Hi!"));
    }

    #[test]
    fn test_lip_short_location_report() {
        let (mut ctx, rx, mut sds) = setup();
        let mut data4 = BitBuffer::new_autoexpand(92);
        data4.write_bits(10, 8);
        data4.write_bits(0, 2);
        data4.write_bits(1, 2);
        data4.write_bits(0x0CE6C98, 25);
        data4.write_bits(0xCA1959, 24);
        data4.write_bits(2, 3);
        data4.write_bits(17, 7);
        data4.write_bits(9, 4);
        data4.write_bits(0, 1);
        data4.write_bits(0x81, 8);
        data4.seek(0);
        sds.rx_sds_data(&mut ctx, sds_data4(&data4), &MacAddress::default());

        let report = rx.try_recv().unwrap();
        assert_eq!(str_field(&report, "sds-lip"), Some("short location report"));
        assert_eq!(u64_field(&report, "latitude uint32"), Some(0xCA1959));
        let Some(ReportValue::F64(lat)) = report.get("latitude") else {
            panic!("latitude missing");
        };
        assert!((lat - -37.899131).abs() < 1e-5);
        let Some(ReportValue::F64(lon)) = report.get("longitude") else {
            panic!("longitude missing");
        };
        assert!((lon - 145.142012).abs() < 1e-5);
        assert_eq!(u64_field(&report, "reason for sending"), Some(0x81));
    }

    #[test]
    fn test_reserved_calling_party() {
        let (mut ctx, rx, mut sds) = setup();
        sds.rx_sds_data(&mut ctx, BitBuffer::from_bitstr("01111 11 0101"), &MacAddress::default());
        let report = rx.try_recv().unwrap();
        assert_eq!(u64_field(&report, "calling party type identifier"), Some(3));
        assert!(report.get("sds type identifier").is_none());
    }

    #[test]
    fn test_length_overrun_is_invalid() {
        let (mut ctx, rx, mut sds) = setup();
        sds.rx_sds_data(&mut ctx, BitBuffer::from_bitstr("01111 00 00000111 11 00001000000 1010"), &MacAddress::default());
        let report = rx.try_recv().unwrap();
        assert!(report.get("invalid pdu").is_some());
    }

    #[test]
    fn test_d_status_with_external_number() {
        let (mut ctx, rx, mut sds) = setup();
        let pdu = BitBuffer::from_bitstr(
            "01000 01 000000000000000000000001 0000000000000001 1 1 0010 00000011000 00000011 0001 0010 1011 0000 0",
        );
        sds.rx_status(&mut ctx, pdu, &MacAddress::default());
        let report = rx.try_recv().unwrap();
        assert_eq!(report.pdu(), "D-STATUS");
        assert_eq!(u64_field(&report, "pre-coded status"), Some(1));
        assert_eq!(str_field(&report, "external subscriber number"), Some("12#"));
    }
}
