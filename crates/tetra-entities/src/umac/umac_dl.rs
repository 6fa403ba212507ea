use tetra_core::tetra_entities::TetraEntity;
use tetra_core::{BitBuffer, MacAddress, MacAddressType, Sap};
use tetra_pdus::umac::enums::broadcast_type::BroadcastType;
use tetra_pdus::umac::enums::length_ind::LengthInd;
use tetra_pdus::umac::enums::mac_pdu_type::MacPduType;
use tetra_pdus::umac::fields::channel_allocation::ChanAllocElement;
use tetra_pdus::umac::pdus::access_assign::AccessAssign;
use tetra_pdus::umac::pdus::access_define::AccessDefine;
use tetra_pdus::umac::pdus::mac_d_blck::MacDBlck;
use tetra_pdus::umac::pdus::mac_end_dl::MacEndDl;
use tetra_pdus::umac::pdus::mac_frag_dl::MacFragDl;
use tetra_pdus::umac::pdus::mac_resource::MacResource;
use tetra_pdus::umac::pdus::mac_sync::MacSync;
use tetra_pdus::umac::pdus::mac_sysinfo::MacSysinfo;
use tetra_saps::tlmb::{TlmbSyncInd, TlmbSysinfoInd};
use tetra_saps::tma::TmaUnitdataInd;
use tetra_saps::tmd::TmdCircuitDataInd;
use tetra_saps::tmv::enums::logical_chans::LogicalChannel;
use tetra_saps::{SapMsg, SapMsgInner};

use crate::context::DecoderContext;
use crate::lmac::components::scrambler;
use crate::report::Report;
use crate::umac::subcomp::defrag::DefragBuffer;
use crate::umac::subcomp::fillbits;
use crate::{MessageQueue, TetraEntityTrait};

/// Offset of the MCC in the BSCH block. The MLE owns it, but the MAC needs it for the scrambling code.
const SYNC_MCC_OFFSET: usize = 31;
const SYNC_MNC_OFFSET: usize = 41;
/// Length of the D-MLE-SYNC TM-SDU
const SYNC_SDU_LEN_BITS: usize = 29;
/// Length of the D-MLE-SYSINFO TM-SDU
const SYSINFO_SDU_LEN_BITS: usize = 42;

/// Downlink upper MAC. Parses the MAC PDUs of every decoded block, maintains the cell and
/// MAC state in the context and hands TM-SDUs to the LLC (or the MLE for broadcast).
#[derive(Default)]
pub struct UmacDl {
    defrag: DefragBuffer,
}

impl UmacDl {
    pub fn new() -> Self {
        Self::default()
    }

    fn send_tma(ctx: &DecoderContext, queue: &mut MessageQueue, sdu: BitBuffer, address: MacAddress, lchan: LogicalChannel) {
        tracing::debug!("-> LLC {} {} sdu {}", lchan, address, sdu.dump_bin());
        queue.push_back(SapMsg::new(
            Sap::TmaSap,
            TetraEntity::Umac,
            TetraEntity::Llc,
            ctx.time,
            SapMsgInner::TmaUnitdataInd(TmaUnitdataInd {
                pdu: sdu,
                address,
                logical_channel: lchan,
            }),
        ));
    }

    fn rx_aach(&mut self, ctx: &mut DecoderContext, mut pdu: BitBuffer) {
        let aach = match AccessAssign::from_bitbuf(&mut pdu, ctx.time) {
            Ok(aach) => aach,
            Err(e) => {
                tracing::warn!("Failed parsing ACCESS-ASSIGN: {:?} {}", e, pdu.dump_bin());
                return;
            }
        };
        tracing::trace!("<- {}", aach);
        ctx.mac_state.downlink_usage = aach.dl_usage;
        ctx.mac_state.downlink_usage_marker = aach.dl_usage_marker;
    }

    fn rx_sync(&mut self, ctx: &mut DecoderContext, queue: &mut MessageQueue, mut pdu: BitBuffer) {
        let sync = match MacSync::from_bitbuf(&mut pdu) {
            Ok(sync) => {
                tracing::debug!("<- {}", sync);
                sync
            }
            Err(e) => {
                tracing::warn!("Failed parsing SYNC: {:?} {}", e, pdu.dump_bin());
                let address = ctx.mac_address;
                ctx.send_invalid("MAC", "SYNC", &address, e.to_string());
                return;
            }
        };

        let (Some(mcc), Some(mnc), Some(sdu)) = (
            pdu.peek_bits_startoffset(SYNC_MCC_OFFSET, 10),
            pdu.peek_bits_startoffset(SYNC_MNC_OFFSET, 14),
            pdu.slice(MacSync::MAC_LEN_BITS, SYNC_SDU_LEN_BITS),
        ) else {
            tracing::warn!("SYNC block too short: {}", pdu.dump_bin());
            return;
        };

        let (mcc, mnc) = (mcc as u16, mnc as u16);
        if ctx.cell.color_code != sync.colour_code || ctx.cell.mcc != mcc || ctx.cell.mnc != mnc {
            tracing::info!("cell: colour code {} MCC {} MNC {}", sync.colour_code, mcc, mnc);
        }
        ctx.cell.color_code = sync.colour_code;
        ctx.cell.mcc = mcc;
        ctx.cell.mnc = mnc;
        ctx.cell.scrambling_code = scrambler::tetra_scramb_get_init(mcc, mnc, sync.colour_code);
        if ctx.time != sync.time {
            tracing::debug!("rx_sync: time realigned from {} to {}", ctx.time, sync.time);
        }
        ctx.time = sync.time;

        let address = ctx.mac_address;
        let mut report = ctx.new_report("MAC", "SYNC", &address);
        report.add("system code", sync.system_code);
        report.add("color code", sync.colour_code);
        report.add("sharing mode", sync.sharing_mode);
        report.add("reserved frames", sync.ts_reserved_frames);
        report.add("u-plane dtx", sync.u_plane_dtx as u8);
        report.add("frame 18 extension", sync.frame_18_ext as u8);
        report.add("scrambling code", ctx.cell.scrambling_code);
        ctx.send_report(report);

        queue.push_back(SapMsg::new(
            Sap::TlmbSap,
            TetraEntity::Umac,
            TetraEntity::Mle,
            ctx.time,
            SapMsgInner::TlmbSyncInd(TlmbSyncInd { tl_sdu: sdu }),
        ));
    }

    fn rx_traffic(&mut self, ctx: &mut DecoderContext, queue: &mut MessageQueue, pdu: BitBuffer) {
        let usage_marker = ctx.mac_state.downlink_usage_marker;
        tracing::debug!("rx_traffic {} usage marker {}", ctx.time, usage_marker);
        queue.push_back(SapMsg::new(
            Sap::TmdSap,
            TetraEntity::Umac,
            TetraEntity::Uplane,
            ctx.time,
            SapMsgInner::TmdCircuitDataInd(TmdCircuitDataInd {
                data: pdu,
                usage_marker,
                encryption_mode: ctx.encryption_mode(usage_marker),
            }),
        ));
    }

    /// Parses all MAC PDUs of a signalling block
    fn rx_signalling(&mut self, ctx: &mut DecoderContext, queue: &mut MessageQueue, mut pdu: BitBuffer, lchan: LogicalChannel) {
        loop {
            // Each PDU is parsed relative to its own start
            let start = pdu.get_raw_pos();
            pdu.set_raw_start(start);

            let Some(pdu_type) = pdu.peek_bits(2) else {
                return;
            };
            let cont = match MacPduType::try_from(pdu_type) {
                Ok(MacPduType::MacResource) => self.rx_mac_resource(ctx, queue, &mut pdu, lchan),
                Ok(MacPduType::MacFragMacEnd) => match pdu.peek_bits_posoffset(2, 1) {
                    Some(0) => {
                        self.rx_mac_frag(ctx, &mut pdu);
                        false
                    }
                    Some(_) => self.rx_mac_end(ctx, queue, &mut pdu, lchan),
                    None => false,
                },
                Ok(MacPduType::Broadcast) => {
                    self.rx_broadcast(ctx, queue, &mut pdu);
                    false
                }
                Ok(MacPduType::Supplementary) => {
                    self.rx_mac_d_blck(ctx, &mut pdu, lchan);
                    false
                }
                Err(_) => false,
            };

            if !cont || pdu.get_raw_pos() <= start || pdu.get_len_remaining() < MacResource::MIN_LEN_BITS {
                return;
            }
            tracing::trace!("rx_signalling: next PDU in block, {} bits left", pdu.get_len_remaining());
        }
    }

    /// Window of `pdu` from its current position to `pdu_len_bits` from the window start,
    /// without fill bits if `fill_bits` is set. Afterwards `pdu` is positioned behind the PDU.
    fn extract_sdu(pdu: &mut BitBuffer, pdu_len_bits: usize, fill_bits: bool) -> BitBuffer {
        let start = pdu.get_raw_start();
        let orig_end = pdu.get_raw_end();
        pdu.set_raw_end(start + pdu_len_bits);
        if fill_bits {
            fillbits::strip(pdu);
        }
        let sdu = BitBuffer::from_bitbuffer_pos(pdu);

        pdu.set_raw_end(orig_end);
        pdu.set_raw_pos(start + pdu_len_bits);
        sdu
    }

    /// Returns true if another MAC PDU may follow in the same block
    fn rx_mac_resource(&mut self, ctx: &mut DecoderContext, queue: &mut MessageQueue, pdu: &mut BitBuffer, lchan: LogicalChannel) -> bool {
        let res = match MacResource::from_bitbuf(pdu) {
            Ok(res) => {
                tracing::debug!("<- {}", res);
                res
            }
            Err(e) => {
                tracing::warn!("Failed parsing MAC-RESOURCE: {:?} {}", e, pdu.dump_bin());
                ctx.send_invalid("MAC", "MAC-RESOURCE", &MacAddress::default(), e.to_string());
                return false;
            }
        };

        let length = res.length();
        if length.fills_block() {
            ctx.second_slot_stolen = true;
        }
        ctx.mac_address = res.addr;

        if res.is_null_pdu() {
            return false;
        }
        if res.addr.address_type == MacAddressType::SsiUsageMarker {
            ctx.set_encryption_mode(res.addr.usage_marker, res.encryption_mode);
        }

        let (sdu, cont) = match length {
            LengthInd::Octets(_) => {
                let len_bits = length.len_bits().unwrap_or(0);
                if len_bits < pdu.get_pos() || len_bits > pdu.get_len() {
                    tracing::warn!("MAC-RESOURCE: length {} does not fit header {} / block {}", length, pdu.get_pos(), pdu.get_len());
                    ctx.send_invalid("MAC", "MAC-RESOURCE", &res.addr, format!("length {} out of range", length));
                    return false;
                }
                (Self::extract_sdu(pdu, len_bits, res.fill_bits), true)
            }
            LengthInd::SecondSlotStolen => {
                let len = pdu.get_len();
                (Self::extract_sdu(pdu, len, res.fill_bits), false)
            }
            LengthInd::FragStart => {
                let len = pdu.get_len();
                let first = Self::extract_sdu(pdu, len, res.fill_bits);
                if res.is_encrypted() {
                    self.defrag.stop();
                    Self::report_encrypted(ctx, &res, &first);
                } else {
                    self.defrag.start(res.addr, ctx.time);
                    self.defrag.append(&first, &res.addr);
                }
                return false;
            }
            LengthInd::Invalid(raw) => {
                tracing::warn!("MAC-RESOURCE: reserved length indication {}", raw);
                ctx.send_invalid("MAC", "MAC-RESOURCE", &res.addr, format!("reserved length indication {}", raw));
                return false;
            }
        };

        if res.is_encrypted() {
            Self::report_encrypted(ctx, &res, &sdu);
        } else if sdu.get_len() > 0 {
            Self::send_tma(ctx, queue, sdu, res.addr, lchan);
        }
        cont
    }

    fn report_encrypted(ctx: &mut DecoderContext, res: &MacResource, sdu: &BitBuffer) {
        tracing::debug!("MAC-RESOURCE for {} is encrypted, mode {}", res.addr, res.encryption_mode);
        let mut report = ctx.new_report("MAC", "MAC-RESOURCE", &res.addr);
        report.add("encryption mode", res.encryption_mode);
        report.add("address type", res.addr.address_type.to_string());
        report.add("length indication", res.length().to_string());
        report.add_hex("encrypted sdu", sdu);
        ctx.send_report(report);
    }

    fn rx_mac_frag(&mut self, ctx: &mut DecoderContext, pdu: &mut BitBuffer) {
        let frag = match MacFragDl::from_bitbuf(pdu) {
            Ok(frag) => frag,
            Err(e) => {
                tracing::warn!("Failed parsing MAC-FRAG: {:?} {}", e, pdu.dump_bin());
                return;
            }
        };
        tracing::debug!("<- {}", frag);

        let len = pdu.get_len();
        let sdu = Self::extract_sdu(pdu, len, frag.fill_bits);
        let address = ctx.mac_address;
        self.defrag.append(&sdu, &address);
    }

    /// Returns true if another MAC PDU may follow in the same block
    fn rx_mac_end(&mut self, ctx: &mut DecoderContext, queue: &mut MessageQueue, pdu: &mut BitBuffer, lchan: LogicalChannel) -> bool {
        let end = match MacEndDl::from_bitbuf(pdu) {
            Ok(end) => {
                tracing::debug!("<- {}", end);
                end
            }
            Err(e) => {
                tracing::warn!("Failed parsing MAC-END: {:?} {}", e, pdu.dump_bin());
                ctx.send_invalid("MAC", "MAC-END", &self.defrag.addr, e.to_string());
                self.defrag.stop();
                return false;
            }
        };
        if let Some(chan_alloc) = &end.chan_alloc_element {
            Self::log_chan_alloc(ctx, chan_alloc);
        }

        let len_bits = end.len_bits();
        if len_bits < pdu.get_pos() || len_bits > pdu.get_len() {
            tracing::warn!("MAC-END: length {} does not fit header {} / block {}", len_bits, pdu.get_pos(), pdu.get_len());
            ctx.send_invalid("MAC", "MAC-END", &self.defrag.addr, format!("length {} bits out of range", len_bits));
            self.defrag.stop();
            return false;
        }

        let last = Self::extract_sdu(pdu, len_bits, end.fill_bits);
        let address = ctx.mac_address;
        self.defrag.append(&last, &address);

        let sdu = self.defrag.get_sdu();
        let sdu_addr = self.defrag.addr;
        if self.defrag.is_active() {
            tracing::debug!("MAC-END: reassembled {} bits from {} fragments", sdu.get_len(), self.defrag.num_frags);
        }
        self.defrag.stop();

        if sdu.get_len() > 0 {
            Self::send_tma(ctx, queue, sdu, sdu_addr, lchan);
        }
        true
    }

    fn log_chan_alloc(ctx: &DecoderContext, chan_alloc: &ChanAllocElement) {
        match chan_alloc.ext_dl_freq() {
            Some(freq) => tracing::debug!("{} channel allocation: {} ({} Hz)", ctx.time, chan_alloc, freq),
            None => tracing::debug!("{} channel allocation: {}", ctx.time, chan_alloc),
        }
    }

    fn rx_broadcast(&mut self, ctx: &mut DecoderContext, queue: &mut MessageQueue, pdu: &mut BitBuffer) {
        let Some(bcast_type) = pdu.peek_bits_posoffset(2, 2) else {
            return;
        };
        match BroadcastType::try_from(bcast_type) {
            Ok(BroadcastType::Sysinfo) => self.rx_sysinfo(ctx, queue, pdu),
            Ok(BroadcastType::AccessDefine) => self.rx_access_define(ctx, pdu),
            Err(_) => tracing::debug!("rx_broadcast: reserved broadcast type {}", bcast_type),
        }
    }

    fn rx_sysinfo(&mut self, ctx: &mut DecoderContext, queue: &mut MessageQueue, pdu: &mut BitBuffer) {
        let sysinfo = match MacSysinfo::from_bitbuf(pdu) {
            Ok(sysinfo) => {
                tracing::debug!("<- {}", sysinfo);
                sysinfo
            }
            Err(e) => {
                tracing::warn!("Failed parsing SYSINFO: {:?} {}", e, pdu.dump_bin());
                let address = ctx.mac_address;
                ctx.send_invalid("MAC", "SYSINFO", &address, e.to_string());
                return;
            }
        };

        match sysinfo.freq_info() {
            Ok(freq) => {
                let dl = freq.dl_freq();
                let ul = freq.ul_freq().unwrap_or(0);
                if ctx.cell.downlink_frequency != dl {
                    tracing::info!("cell: downlink frequency {} Hz, uplink frequency {} Hz", dl, ul);
                }
                ctx.cell.downlink_frequency = dl;
                ctx.cell.uplink_frequency = ul;
            }
            Err(e) => tracing::warn!("SYSINFO: cannot compute frequency: {}", e),
        }

        let address = ctx.mac_address;
        let mut report = ctx.new_report("MAC", "SYSINFO", &address);
        Self::add_sysinfo_fields(&mut report, &sysinfo);
        report.add("downlink frequency", ctx.cell.downlink_frequency as u64);
        report.add("uplink frequency", ctx.cell.uplink_frequency as u64);
        ctx.send_report(report);

        let Some(sdu) = pdu.slice(MacSysinfo::MAC_LEN_BITS, SYSINFO_SDU_LEN_BITS) else {
            tracing::warn!("SYSINFO block too short for its TM-SDU: {}", pdu.dump_bin());
            return;
        };
        queue.push_back(SapMsg::new(
            Sap::TlmbSap,
            TetraEntity::Umac,
            TetraEntity::Mle,
            ctx.time,
            SapMsgInner::TlmbSysinfoInd(TlmbSysinfoInd { tl_sdu: sdu }),
        ));
    }

    fn add_sysinfo_fields(report: &mut Report, sysinfo: &MacSysinfo) {
        report.add("main carrier", sysinfo.main_carrier);
        report.add("frequency band", sysinfo.freq_band);
        report.add("offset", sysinfo.freq_offset_index);
        report.add("duplex spacing", sysinfo.duplex_spacing);
        report.add("reverse operation", sysinfo.reverse_operation as u8);
        report.add("number of secondary control channels", sysinfo.num_of_csch);
        report.add("ms_txpwr_max_cell", sysinfo.ms_txpwr_max_cell);
        report.add("rxlev_access_min", sysinfo.rxlev_access_min);
        report.add("access parameter", sysinfo.access_parameter);
        report.add("radio downlink timeout", sysinfo.radio_dl_timeout);
        if let Some(cck_id) = sysinfo.cck_id {
            report.add("cck id", cck_id);
        }
        if let Some(hyperframe) = sysinfo.hyperframe_number {
            report.add("hyperframe number", hyperframe);
        }
        report.add("option field", sysinfo.option_field.name());
        report.add("option value", sysinfo.option_field.raw());
    }

    fn rx_access_define(&mut self, ctx: &mut DecoderContext, pdu: &mut BitBuffer) {
        let ad = match AccessDefine::from_bitbuf(pdu) {
            Ok(ad) => ad,
            Err(e) => {
                tracing::warn!("Failed parsing ACCESS-DEFINE: {:?} {}", e, pdu.dump_bin());
                return;
            }
        };
        tracing::debug!("<- {}", ad);

        let address = ctx.mac_address;
        let mut report = ctx.new_report("MAC", "ACCESS-DEFINE", &address);
        report.add("common or assigned control", ad.common_or_assigned_control as u8);
        report.add("access code", ad.access_code);
        report.add("imm", ad.imm);
        report.add("wt", ad.wt);
        report.add("nu", ad.nu);
        report.add("frame length factor", ad.frame_len_factor as u8);
        report.add("timeslot pointer", ad.ts_pointer);
        report.add("min pdu priority", ad.min_pdu_prio);
        if let Some(class) = ad.subscriber_class {
            report.add("subscriber class", class);
        }
        if let Some(gssi) = ad.gssi {
            report.add("gssi", gssi);
        }
        ctx.send_report(report);
    }

    fn rx_mac_d_blck(&mut self, ctx: &mut DecoderContext, pdu: &mut BitBuffer, lchan: LogicalChannel) {
        if matches!(lchan, LogicalChannel::Stch | LogicalChannel::SchHd) {
            // MAC-D-BLCK only fits a full slot
            tracing::error!("MAC error {}: supplementary block on channel {}", ctx.time, lchan);
            return;
        }

        let dblck = match MacDBlck::from_bitbuf(pdu) {
            Ok(dblck) => dblck,
            Err(e) => {
                tracing::warn!("Failed parsing MAC-D-BLCK: {:?} {}", e, pdu.dump_bin());
                return;
            }
        };
        tracing::debug!("<- {}", dblck);

        let address = MacAddress {
            address_type: MacAddressType::EventLabel,
            event_label: dblck.event_label,
            encryption_mode: dblck.encryption_mode,
            ..Default::default()
        };
        let mut report = ctx.new_report("MAC", "MAC-D-BLCK", &address);
        report.add("event label", dblck.event_label);
        report.add("encryption mode", dblck.encryption_mode);
        report.add("fill bits", dblck.fill_bits as u8);
        report.add("immediate napping permission", dblck.imm_napping_permission as u8);
        ctx.send_report(report);
    }

    fn rx_tmv_prim(&mut self, ctx: &mut DecoderContext, queue: &mut MessageQueue, message: SapMsg) {
        let SapMsgInner::TmvUnitdataInd(prim) = message.msg else {
            tracing::warn!("rx_tmv_prim: unexpected primitive {}", message.msg);
            return;
        };

        let lchan = prim.logical_channel;
        ctx.mac_state.logical_channel = lchan;
        tracing::trace!("rx_tmv_prim {} {}: {}", ctx.time, lchan, prim.pdu.dump_bin());

        match lchan {
            LogicalChannel::Aach => self.rx_aach(ctx, prim.pdu),
            LogicalChannel::Bsch => self.rx_sync(ctx, queue, prim.pdu),
            LogicalChannel::TchS | LogicalChannel::Tch => self.rx_traffic(ctx, queue, prim.pdu),
            LogicalChannel::Stch | LogicalChannel::Bnch | LogicalChannel::SchF | LogicalChannel::SchHd => {
                self.rx_signalling(ctx, queue, prim.pdu, lchan)
            }
        }
    }
}

impl TetraEntityTrait for UmacDl {
    fn entity(&self) -> TetraEntity {
        TetraEntity::Umac
    }

    fn rx_prim(&mut self, ctx: &mut DecoderContext, queue: &mut MessageQueue, message: SapMsg) {
        match message.sap {
            Sap::TmvSap => self.rx_tmv_prim(ctx, queue, message),
            _ => tracing::warn!("rx_prim: unexpected SAP {:?}", message.sap),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ChannelSink;
    use tetra_core::{DownlinkUsage, PhyBlockNum, TdmaTime};
    use tetra_saps::tmv::TmvUnitdataInd;

    fn tmv(pdu: &str, lchan: LogicalChannel) -> SapMsg {
        SapMsg::new(
            Sap::TmvSap,
            TetraEntity::Lmac,
            TetraEntity::Umac,
            TdmaTime::default(),
            SapMsgInner::TmvUnitdataInd(TmvUnitdataInd {
                pdu: BitBuffer::from_bitstr(pdu),
                block_num: PhyBlockNum::Both,
                logical_channel: lchan,
            }),
        )
    }

    #[test]
    fn test_aach_traffic() {
        let mut ctx = DecoderContext::with_null_sink();
        ctx.time = TdmaTime { t: 1, f: 4, m: 1 };
        let mut queue = MessageQueue::new();
        let mut umac = UmacDl::new();

        // header 01, field1 = usage marker 9
        umac.rx_prim(&mut ctx, &mut queue, tmv("01 001001 000000", LogicalChannel::Aach));
        assert_eq!(ctx.mac_state.downlink_usage, DownlinkUsage::Traffic);
        assert_eq!(ctx.mac_state.downlink_usage_marker, 9);

        // Same AACH on frame 18 is control
        ctx.time = TdmaTime { t: 1, f: 18, m: 1 };
        umac.rx_prim(&mut ctx, &mut queue, tmv("01 001001 000000", LogicalChannel::Aach));
        assert_eq!(ctx.mac_state.downlink_usage, DownlinkUsage::CommonControl);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_sync_updates_cell() {
        let (sink, rx) = ChannelSink::new();
        let mut ctx = DecoderContext::new(Default::default(), Box::new(sink));
        let mut queue = MessageQueue::new();
        let mut umac = UmacDl::new();

        umac.rx_prim(&mut ctx, &mut queue, tmv("000100000111010110010010000000001101001000000100010101110011", LogicalChannel::Bsch));
        assert_eq!(ctx.cell.color_code, 1);
        assert_eq!(ctx.cell.mcc, 420);
        assert_eq!(ctx.cell.mnc, 555);
        assert_eq!(ctx.cell.scrambling_code, scrambler::tetra_scramb_get_init(420, 555, 1));
        assert_eq!(ctx.time, TdmaTime { t: 4, f: 11, m: 9 });

        let report = rx.try_recv().unwrap();
        assert_eq!(report.service(), "MAC");
        assert_eq!(report.pdu(), "SYNC");

        let msg = queue.pop_front().unwrap();
        assert_eq!(msg.dest, TetraEntity::Mle);
        let SapMsgInner::TlmbSyncInd(prim) = msg.msg else { panic!() };
        assert_eq!(prim.tl_sdu.get_len(), 29);
    }

    #[test]
    fn test_resource_second_slot_stolen() {
        let mut ctx = DecoderContext::with_null_sink();
        let mut queue = MessageQueue::new();
        let mut umac = UmacDl::new();

        // MAC-RESOURCE, length 0b111110, SSI 1234, no optional elements, then the TM-SDU
        let mut bits = String::from("00 0 0 00 0 111110 001 000000000000010011010010 0 0 0");
        bits.push_str(&"0110".repeat(20));
        umac.rx_prim(&mut ctx, &mut queue, tmv(&bits, LogicalChannel::Stch));
        assert!(ctx.second_slot_stolen);
        assert_eq!(ctx.mac_address.ssi, 1234);

        let msg = queue.pop_front().unwrap();
        let SapMsgInner::TmaUnitdataInd(prim) = msg.msg else { panic!() };
        assert_eq!(prim.address.ssi, 1234);
        assert_eq!(prim.pdu.get_len(), 80);
        assert_eq!(prim.logical_channel, LogicalChannel::Stch);
    }

    #[test]
    fn test_null_pdu_stops_parsing() {
        let mut ctx = DecoderContext::with_null_sink();
        let mut queue = MessageQueue::new();
        let mut umac = UmacDl::new();

        let mut bits = String::from("00 0 0 00 0 000010 000");
        bits.push_str(&"0".repeat(108));
        umac.rx_prim(&mut ctx, &mut queue, tmv(&bits, LogicalChannel::SchHd));
        assert!(queue.is_empty());
        assert!(!ctx.second_slot_stolen);
    }

    #[test]
    fn test_encrypted_resource_not_forwarded() {
        let (sink, rx) = ChannelSink::new();
        let mut ctx = DecoderContext::new(Default::default(), Box::new(sink));
        let mut queue = MessageQueue::new();
        let mut umac = UmacDl::new();

        // Encryption mode 0b10, SSI + usage marker 12, length 8 octets
        let mut bits = String::from("00 0 0 10 0 001000 110 000000000000000000000111 001100 0 0 0");
        bits.push_str(&"1".repeat(124 - bits.replace(' ', "").len()));
        umac.rx_prim(&mut ctx, &mut queue, tmv(&bits, LogicalChannel::SchHd));
        assert!(queue.is_empty());
        assert_eq!(ctx.encryption_mode(12), 2);

        let report = rx.try_recv().unwrap();
        assert_eq!(report.pdu(), "MAC-RESOURCE");
        assert!(report.get("encrypted sdu").is_some());
    }

    #[test]
    fn test_fragmented_sdu() {
        let mut ctx = DecoderContext::with_null_sink();
        let mut queue = MessageQueue::new();
        let mut umac = UmacDl::new();

        // MAC-RESOURCE starting a fragmented TM-SDU, 124 bits on SCH/HD
        let hdr = "00 0 0 00 0 111111 001 000000000000000000101010 0 0 0";
        let hdr_len = hdr.replace(' ', "").len();
        let frag1 = "1".repeat(124 - hdr_len);
        umac.rx_prim(&mut ctx, &mut queue, tmv(&format!("{hdr}{frag1}"), LogicalChannel::SchHd));
        assert!(queue.is_empty());

        // MAC-FRAG with fill bits
        let frag2 = format!("01 0 1 {}1{}", "0".repeat(100), "0".repeat(19));
        umac.rx_prim(&mut ctx, &mut queue, tmv(&frag2, LogicalChannel::SchHd));
        assert!(queue.is_empty());

        // MAC-END, length 4 octets, no fill bits: 13 header bits, 19 SDU bits
        let end = format!("01 1 0 0 000100 0 0 {}{}", "0101010101010101010", "0".repeat(92));
        umac.rx_prim(&mut ctx, &mut queue, tmv(&end, LogicalChannel::SchHd));

        let msg = queue.pop_front().unwrap();
        let SapMsgInner::TmaUnitdataInd(prim) = msg.msg else { panic!() };
        assert_eq!(prim.address.ssi, 42);
        assert_eq!(prim.pdu.get_len(), (124 - hdr_len) + 100 + 19);
        assert!(queue.is_empty());
    }

    /// MAC-RESOURCE header addressed to `ssi`, without fill bits or optional elements
    fn resource_hdr(length_ind: u8, ssi: u32) -> String {
        format!("00 0 0 00 0 {:06b} 001 {:024b} 0 0 0", length_ind, ssi)
    }

    fn pad_to(mut bits: String, len: usize) -> String {
        let n = bits.replace(' ', "").len();
        bits.push_str(&"0".repeat(len - n));
        bits
    }

    #[test]
    fn test_two_resources_in_one_block() {
        let mut ctx = DecoderContext::with_null_sink();
        let mut queue = MessageQueue::new();
        let mut umac = UmacDl::new();

        // Two 8 octet MAC-RESOURCEs (43 header bits, 21 SDU bits each), then null padding
        let bits = format!(
            "{}{}{}{}",
            resource_hdr(8, 42),
            "101010101010101010101",
            resource_hdr(8, 7),
            "110011001100110011001"
        );
        umac.rx_prim(&mut ctx, &mut queue, tmv(&pad_to(bits, 268), LogicalChannel::SchF));

        let mut got = vec![];
        while let Some(msg) = queue.pop_front() {
            let SapMsgInner::TmaUnitdataInd(prim) = msg.msg else { panic!() };
            got.push((prim.address.ssi, prim.pdu.to_bitstr()));
        }
        assert_eq!(
            got,
            vec![
                (42, "101010101010101010101".to_string()),
                (7, "110011001100110011001".to_string()),
            ]
        );
    }

    #[test]
    fn test_reserved_length_reported() {
        let (sink, rx) = ChannelSink::new();
        let mut ctx = DecoderContext::new(Default::default(), Box::new(sink));
        let mut queue = MessageQueue::new();
        let mut umac = UmacDl::new();

        umac.rx_prim(&mut ctx, &mut queue, tmv(&pad_to(resource_hdr(0b111011, 42), 124), LogicalChannel::SchHd));
        assert!(queue.is_empty());

        let report = rx.try_recv().unwrap();
        assert_eq!(report.pdu(), "MAC-RESOURCE");
        assert_eq!(report.get("invalid pdu").and_then(|v| v.as_str()), Some("reserved length indication 59"));
    }

    #[test]
    fn test_length_shorter_than_header_reported() {
        let (sink, rx) = ChannelSink::new();
        let mut ctx = DecoderContext::new(Default::default(), Box::new(sink));
        let mut queue = MessageQueue::new();
        let mut umac = UmacDl::new();

        // 1 octet cannot hold the 43 bit header
        umac.rx_prim(&mut ctx, &mut queue, tmv(&pad_to(resource_hdr(1, 42), 124), LogicalChannel::SchHd));
        assert!(queue.is_empty());

        let report = rx.try_recv().unwrap();
        assert_eq!(report.pdu(), "MAC-RESOURCE");
        assert_eq!(report.get("invalid pdu").and_then(|v| v.as_str()), Some("length 1 octets out of range"));
        assert!(rx.try_recv().is_err());
    }

    /// MAC-D-BLCK, no fill bits, encryption mode 1, event label 42, napping permitted
    const D_BLCK: &str = "11 0 0 01 0000101010 1 0";

    #[test]
    fn test_d_blck_on_sch_f() {
        let (sink, rx) = ChannelSink::new();
        let mut ctx = DecoderContext::new(Default::default(), Box::new(sink));
        let mut queue = MessageQueue::new();
        let mut umac = UmacDl::new();

        umac.rx_prim(&mut ctx, &mut queue, tmv(&pad_to(D_BLCK.to_string(), 268), LogicalChannel::SchF));
        assert!(queue.is_empty());

        let report = rx.try_recv().unwrap();
        assert_eq!(report.pdu(), "MAC-D-BLCK");
        assert_eq!(report.get("event label").and_then(|v| v.as_u64()), Some(42));
        assert_eq!(report.get("encryption mode").and_then(|v| v.as_u64()), Some(1));
        assert_eq!(report.get("immediate napping permission").and_then(|v| v.as_u64()), Some(1));
    }

    #[test]
    fn test_d_blck_rejected_on_half_slot() {
        let (sink, rx) = ChannelSink::new();
        let mut ctx = DecoderContext::new(Default::default(), Box::new(sink));
        let mut queue = MessageQueue::new();
        let mut umac = UmacDl::new();

        for lchan in [LogicalChannel::Stch, LogicalChannel::SchHd] {
            umac.rx_prim(&mut ctx, &mut queue, tmv(&pad_to(D_BLCK.to_string(), 124), lchan));
        }
        assert!(queue.is_empty());
        assert!(rx.try_recv().is_err());
    }
}
