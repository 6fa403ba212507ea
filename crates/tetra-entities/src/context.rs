use tetra_config::CfgDecoder;
use tetra_core::{DownlinkUsage, MacAddress, TdmaTime};
use tetra_saps::tmv::enums::logical_chans::LogicalChannel;

use crate::report::{NullSink, Report, ReportHeader, ReportSink};

/// Cell parameters learned from SYNC and SYSINFO. Never reset while the decoder runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellInfo {
    pub color_code: u8,
    pub mcc: u16,
    pub mnc: u16,
    /// Derived from colour code, MCC and MNC. Until a SYNC is received, equal to the BSCH code.
    pub scrambling_code: u32,
    /// Hz, 0 until a SYSINFO was decoded
    pub downlink_frequency: i64,
    /// Hz, 0 if unknown
    pub uplink_frequency: i64,
}

/// MAC state set by the AACH of the current slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacChannelState {
    pub downlink_usage: DownlinkUsage,
    pub downlink_usage_marker: u8,
    /// Logical channel of the last decoded signalling or traffic block
    pub logical_channel: LogicalChannel,
}

impl Default for MacChannelState {
    fn default() -> Self {
        Self {
            downlink_usage: DownlinkUsage::CommonControl,
            downlink_usage_marker: 0,
            logical_channel: LogicalChannel::Aach,
        }
    }
}

/// Number of distinct usage markers
pub const NUM_USAGE_MARKERS: usize = 64;

/// State shared by all entities of the decoder.
///
/// Owned by the MessageRouter and lent to exactly one entity at a time, so a burst is
/// processed by a single writer from start to end.
pub struct DecoderContext {
    pub config: CfgDecoder,
    /// Time of the burst currently being processed
    pub time: TdmaTime,
    pub cell: CellInfo,
    /// Addressing of the last MAC-RESOURCE
    pub mac_address: MacAddress,
    pub mac_state: MacChannelState,
    /// Set by a MAC-RESOURCE of the first half-slot, valid until the end of the burst
    pub second_slot_stolen: bool,
    /// Encryption mode last signalled for each usage marker
    pub encryption_modes: [u8; NUM_USAGE_MARKERS],
    sink: Box<dyn ReportSink>,
}

impl DecoderContext {
    pub fn new(config: CfgDecoder, sink: Box<dyn ReportSink>) -> Self {
        Self {
            config,
            time: TdmaTime::default(),
            cell: CellInfo {
                scrambling_code: crate::lmac::components::scrambler::SCRAMB_INIT,
                ..Default::default()
            },
            mac_address: MacAddress::default(),
            mac_state: MacChannelState::default(),
            second_slot_stolen: false,
            encryption_modes: [0; NUM_USAGE_MARKERS],
            sink,
        }
    }

    /// Context with default options and a sink that drops everything
    pub fn with_null_sink() -> Self {
        Self::new(CfgDecoder::default(), Box::new(NullSink))
    }

    /// Header for a report about a PDU received with `address`
    pub fn report_header(&self, address: &MacAddress) -> ReportHeader {
        ReportHeader {
            time: self.time,
            ssi: address.ssi,
            usage_marker: address.usage_marker,
        }
    }

    pub fn new_report(&self, service: &str, pdu: &str, address: &MacAddress) -> Report {
        Report::new(service, pdu, &self.report_header(address))
    }

    pub fn send_report(&mut self, report: Report) {
        self.sink.send(&report);
    }

    /// Report a PDU that could not be parsed
    pub fn send_invalid(&mut self, service: &str, pdu: &str, address: &MacAddress, reason: impl Into<String>) {
        let mut report = self.new_report(service, pdu, address);
        report.add("invalid pdu", reason.into());
        self.send_report(report);
    }

    pub fn encryption_mode(&self, usage_marker: u8) -> u8 {
        self.encryption_modes[usage_marker as usize % NUM_USAGE_MARKERS]
    }

    pub fn set_encryption_mode(&mut self, usage_marker: u8, mode: u8) {
        self.encryption_modes[usage_marker as usize % NUM_USAGE_MARKERS] = mode;
    }

    pub fn flush_sink(&mut self) {
        self.sink.flush();
    }
}
