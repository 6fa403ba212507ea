mod common;

use tetra_config::CfgDecoder;
use tetra_core::tetra_entities::TetraEntity;
use tetra_core::{BitBuffer, PhyBlockNum, Sap, TdmaTime, debug};
use tetra_entities::report::{Report, ReportValue};
use tetra_saps::sapmsg::{SapMsg, SapMsgInner};
use tetra_saps::tmv::{TmvUnitdataInd, enums::logical_chans::LogicalChannel};

use common::{ComponentTest, padded_bitstr};

fn tmv(pdu: &str, lchan: LogicalChannel, block_num: PhyBlockNum) -> SapMsg {
    SapMsg::new(
        Sap::TmvSap,
        TetraEntity::Lmac,
        TetraEntity::Umac,
        TdmaTime::default(),
        SapMsgInner::TmvUnitdataInd(TmvUnitdataInd {
            pdu: BitBuffer::from_bitstr(pdu),
            block_num,
            logical_channel: lchan,
        }),
    )
}

fn find<'a>(reports: &'a [Report], service: &str, pdu: &str) -> &'a Report {
    reports
        .iter()
        .find(|r| r.service() == service && r.pdu() == pdu)
        .unwrap_or_else(|| panic!("no {service}/{pdu} report in {:?}", reports))
}

fn u64_field(report: &Report, field: &str) -> Option<u64> {
    report.get(field).and_then(ReportValue::as_u64)
}

fn str_field<'a>(report: &'a Report, field: &str) -> Option<&'a str> {
    report.get(field).and_then(ReportValue::as_str)
}

/// MAC-RESOURCE addressed to `ssi` with fill bits, carrying `sdu`, followed by a null PDU
fn mac_resource_block(ssi: u32, sdu: &BitBuffer, block_bits: usize) -> String {
    const HEADER_BITS: usize = 43;
    // Room for at least one fill bit
    let octets = (HEADER_BITS + sdu.get_len() + 1).div_ceil(8);

    let mut buf = BitBuffer::new_autoexpand(block_bits);
    buf.write_bits(0b00, 2); // MAC-RESOURCE
    buf.write_bits(1, 1); // fill bits
    buf.write_bits(0, 1); // position of grant
    buf.write_bits(0, 2); // not encrypted
    buf.write_bits(0, 1); // random access flag
    buf.write_bits(octets as u64, 6);
    buf.write_bits(0b001, 3); // SSI
    buf.write_bits(ssi as u64, 24);
    buf.write_bits(0, 3); // no power control, slot granting or channel allocation
    buf.append(sdu);
    buf.write_bit(1);
    while buf.get_len() < octets * 8 {
        buf.write_bit(0);
    }

    // Null PDU
    buf.write_bits(0b00, 2);
    buf.write_bits(0, 5);
    buf.write_bits(0b000010, 6);
    buf.write_bits(0b000, 3);
    padded_bitstr(&buf, block_bits)
}

/// BL-UDATA carrying a CMCE D-SDS-DATA from ssi 401101 with simple text "Hi!"
fn sds_simple_text_sdu() -> BitBuffer {
    let data4 = BitBuffer::from_bytes_msb(b"\x02\x01Hi!");
    let mut sdu = BitBuffer::new_autoexpand(128);
    sdu.write_bits(0b0010, 4); // BL-UDATA
    sdu.write_bits(0b010, 3); // CMCE
    sdu.write_bits(0b01111, 5); // D-SDS-DATA
    sdu.write_bits(1, 2); // calling party SSI
    sdu.write_bits(401101, 24);
    sdu.write_bits(3, 2); // type 4
    sdu.write_bits(data4.get_len() as u64, 11);
    sdu.append(&data4);
    sdu.seek(0);
    sdu
}

#[test]
/// A MAC-RESOURCE on SCH/F, with an SDS message that is passed through LLC and MLE
/// and decoded by the CMCE
fn test_sds_through_stack() {
    debug::setup_logging_verbose();
    let mut test = ComponentTest::new(CfgDecoder::default());
    let components = vec![TetraEntity::Umac, TetraEntity::Llc, TetraEntity::Mle, TetraEntity::Cmce];
    test.populate_entities(components, vec![]);

    let block = mac_resource_block(2065022, &sds_simple_text_sdu(), 268);
    test.submit_message(tmv(&block, LogicalChannel::SchF, PhyBlockNum::Both));
    test.deliver_all_messages();

    let reports = test.take_reports();
    assert_eq!(reports.len(), 2, "{:?}", reports);
    let sds = &reports[0];
    assert_eq!(sds.service(), "CMCE");
    assert_eq!(sds.pdu(), "D-SDS-DATA");
    assert_eq!(u64_field(sds, "ssi"), Some(2065022));
    assert_eq!(u64_field(sds, "calling party ssi"), Some(401101));
    assert_eq!(u64_field(sds, "protocol id"), Some(2));
    assert_eq!(str_field(sds, "infos"), Some("Hi!"));

    let dump = &reports[1];
    assert_eq!(dump.pdu(), "D-SDS-DATA");
    assert_eq!(str_field(dump, "hex"), Some("02 01 48 69 21"));
    // The null PDU closing the block is the last MAC-RESOURCE seen
    assert_eq!(test.ctx().mac_address.ssi, 0);
}

#[test]
/// LLC PDUs of other entities are routed by the MLE protocol discriminator
fn test_mle_routes_to_sink() {
    debug::setup_logging_verbose();
    let mut test = ComponentTest::new(CfgDecoder::default());
    test.populate_entities(vec![TetraEntity::Umac, TetraEntity::Llc, TetraEntity::Mle], vec![TetraEntity::Sndcp]);

    let mut sdu = BitBuffer::new_autoexpand(64);
    sdu.write_bits(0b0010, 4); // BL-UDATA
    sdu.write_bits(0b100, 3); // SNDCP
    sdu.write_bits(0xa5a5, 16);
    sdu.seek(0);
    let block = mac_resource_block(1234, &sdu, 124);
    test.submit_message(tmv(&block, LogicalChannel::SchHd, PhyBlockNum::Block1));
    test.deliver_all_messages();

    let msgs = test.dump_sinks();
    assert_eq!(msgs.len(), 1);
    assert_eq!(msgs[0].dest, TetraEntity::Sndcp);
    let SapMsgInner::LtpdMleUnitdataInd(prim) = &msgs[0].msg else {
        panic!("unexpected primitive {}", msgs[0].msg);
    };
    assert_eq!(prim.sdu.to_bitstr(), "1010010110100101");
    assert_eq!(prim.address.ssi, 1234);
}

#[test]
/// A SYSINFO on the BNCH, parsed by UMAC and MLE
fn test_sysinfo() {
    debug::setup_logging_verbose();
    let mut test = ComponentTest::new(CfgDecoder::default());
    test.populate_entities(vec![TetraEntity::Umac, TetraEntity::Llc, TetraEntity::Mle], vec![]);

    let bnch = "1000001111101001010000000000101001101110011000000000000000001010000101010100000000000000000000101111111111111111110100100000";
    test.submit_message(tmv(bnch, LogicalChannel::Bnch, PhyBlockNum::Block2));
    test.deliver_all_messages();

    let reports = test.take_reports();
    let sysinfo = find(&reports, "MAC", "SYSINFO");
    assert_eq!(u64_field(sysinfo, "main carrier"), Some(1001));
    assert_eq!(u64_field(sysinfo, "frequency band"), Some(4));
    assert_eq!(u64_field(sysinfo, "access parameter"), Some(7));
    assert_ne!(test.ctx().cell.downlink_frequency, 0);

    let mle = find(&reports, "MLE", "D-MLE-SYSINFO");
    assert_eq!(u64_field(mle, "location area"), Some(2));
    assert_eq!(u64_field(mle, "subscriber class"), Some(0xffff));
    assert_eq!(u64_field(mle, "BS service details"), Some(3360));
}

#[test]
/// A SYNC on the BSCH, parsed by UMAC and MLE
fn test_sync() {
    debug::setup_logging_verbose();
    let mut test = ComponentTest::new(CfgDecoder::default());
    test.populate_entities(vec![TetraEntity::Umac, TetraEntity::Mle], vec![]);

    // CC 000001(0x01) TN 11(4) FN 01011(11) MN 001001( 9) MCC 0110100100(420) MNC 00001000101011(555)
    let sync = "000100000111010110010010000000001101001000000100010101110011";
    test.submit_message(tmv(sync, LogicalChannel::Bsch, PhyBlockNum::Block1));
    test.deliver_all_messages();

    let reports = test.take_reports();
    assert_eq!(reports.len(), 2, "{:?}", reports);
    assert_eq!(reports[0].pdu(), "SYNC");
    assert_eq!(u64_field(&reports[0], "color code"), Some(1));

    let mle = &reports[1];
    assert_eq!(mle.pdu(), "D-MLE-SYNC");
    assert_eq!(u64_field(mle, "MCC"), Some(420));
    assert_eq!(u64_field(mle, "MNC"), Some(555));
    assert_eq!(u64_field(mle, "tn"), Some(4));
    assert_eq!(u64_field(mle, "fn"), Some(11));
    assert_eq!(u64_field(mle, "mn"), Some(9));
}
