use tetra_core::tetra_entities::TetraEntity;
use tetra_core::{BitBuffer, MacAddress, Sap, unimplemented_log};
use tetra_pdus::mle::enums::mle_pdu_type_dl::MlePduTypeDl;
use tetra_pdus::mle::enums::mle_protocol_discriminator::MleProtocolDiscriminator;
use tetra_pdus::mle::fields::neighbour_cell_info::NeighbourCellInfo;
use tetra_pdus::mle::pdus::d_mle_sync::DMleSync;
use tetra_pdus::mle::pdus::d_mle_sysinfo::DMleSysinfo;
use tetra_pdus::mle::pdus::d_nwrk_broadcast::DNwrkBroadcast;
use tetra_pdus::mle::pdus::d_nwrk_broadcast_ext::DNwrkBroadcastExt;
use tetra_saps::lcmc::LcmcMleUnitdataInd;
use tetra_saps::lmm::LmmMleUnitdataInd;
use tetra_saps::ltpd::LtpdMleUnitdataInd;
use tetra_saps::tla::TlaTlDataInd;
use tetra_saps::{SapMsg, SapMsgInner};

use crate::context::DecoderContext;
use crate::report::Report;
use crate::{MessageQueue, TetraEntityTrait};

/// Downlink MLE. Reports the broadcast TM-SDUs of SYNC and SYSINFO, routes TL-SDUs on
/// their protocol discriminator and decodes the MLE subsystem PDUs itself.
#[derive(Default)]
pub struct MleDl;

impl MleDl {
    pub fn new() -> Self {
        Self
    }

    fn rx_sync_ind(&mut self, ctx: &mut DecoderContext, mut sdu: BitBuffer) {
        let address = ctx.mac_address;
        let pdu = match DMleSync::from_bitbuf(&mut sdu) {
            Ok(pdu) => pdu,
            Err(e) => {
                tracing::warn!("Failed parsing D-MLE-SYNC: {:?} {}", e, sdu.dump_bin());
                ctx.send_invalid("MLE", "D-MLE-SYNC", &address, e.to_string());
                return;
            }
        };
        tracing::debug!("<- {}", pdu);

        let mut report = ctx.new_report("MLE", "D-MLE-SYNC", &address);
        report.add("MCC", pdu.mcc);
        report.add("MNC", pdu.mnc);
        report.add("neighbour cell broadcast", pdu.neighbour_cell_broadcast);
        report.add("cell service level", pdu.cell_service_level);
        report.add("late entry supported", pdu.late_entry_supported as u8);
        ctx.send_report(report);
    }

    fn rx_sysinfo_ind(&mut self, ctx: &mut DecoderContext, mut sdu: BitBuffer) {
        let address = ctx.mac_address;
        let pdu = match DMleSysinfo::from_bitbuf(&mut sdu) {
            Ok(pdu) => pdu,
            Err(e) => {
                tracing::warn!("Failed parsing D-MLE-SYSINFO: {:?} {}", e, sdu.dump_bin());
                ctx.send_invalid("MLE", "D-MLE-SYSINFO", &address, e.to_string());
                return;
            }
        };
        tracing::debug!("<- {}", pdu);

        let mut report = ctx.new_report("MLE", "D-MLE-SYSINFO", &address);
        report.add("location area", pdu.location_area);
        report.add("subscriber class", pdu.subscriber_class);
        report.add("BS service details", pdu.bs_service_details.raw());
        ctx.send_report(report);
    }

    /// Clause 18.5.21, strips the protocol discriminator and hands the SDU to its entity
    fn rx_tl_data_ind(&mut self, ctx: &mut DecoderContext, queue: &mut MessageQueue, prim: TlaTlDataInd) {
        let mut sdu = prim.tl_sdu;
        let Some(bits) = sdu.read_bits(3) else {
            tracing::warn!("insufficient bits: {}", sdu.dump_bin());
            ctx.send_invalid("MLE", prim.llc_pdu, &prim.address, "missing protocol discriminator");
            return;
        };
        let disc = MleProtocolDiscriminator::from_raw(bits);
        tracing::debug!("<- {} via {} on {}", disc, prim.llc_pdu, prim.logical_channel);

        let sdu = BitBuffer::from_bitbuffer_pos(&sdu);
        let address = prim.address;
        let (sap, dest, msg) = match disc {
            MleProtocolDiscriminator::Mm => (
                Sap::LmmSap,
                TetraEntity::Mm,
                SapMsgInner::LmmMleUnitdataInd(LmmMleUnitdataInd { sdu, address }),
            ),
            MleProtocolDiscriminator::Cmce => (
                Sap::LcmcSap,
                TetraEntity::Cmce,
                SapMsgInner::LcmcMleUnitdataInd(LcmcMleUnitdataInd { sdu, address }),
            ),
            MleProtocolDiscriminator::Sndcp => (
                Sap::LtpdSap,
                TetraEntity::Sndcp,
                SapMsgInner::LtpdMleUnitdataInd(LtpdMleUnitdataInd { sdu, address }),
            ),
            MleProtocolDiscriminator::Mle => {
                self.rx_mle_subsystem(ctx, queue, sdu, &address);
                return;
            }
            MleProtocolDiscriminator::Reserved(x) => {
                tracing::debug!("reserved protocol discriminator {}, dropping {}", x, sdu.dump_bin());
                return;
            }
        };
        queue.push_back(SapMsg::new(sap, TetraEntity::Mle, dest, ctx.time, msg));
    }

    /// Clause 18.5.20, PDUs terminated in the MLE itself. The buffer starts at the PDU type.
    fn rx_mle_subsystem(&mut self, ctx: &mut DecoderContext, queue: &mut MessageQueue, mut pdu: BitBuffer, address: &MacAddress) {
        let Some(bits) = pdu.peek_bits(3) else {
            tracing::warn!("insufficient bits: {}", pdu.dump_bin());
            ctx.send_invalid("MLE", "MLE subsystem", address, "missing pdu type");
            return;
        };
        let pdu_type = MlePduTypeDl::from_raw(bits);

        match pdu_type {
            MlePduTypeDl::DNwrkBroadcast => self.rx_d_nwrk_broadcast(ctx, pdu, address),
            MlePduTypeDl::DNwrkBroadcastExt => self.rx_d_nwrk_broadcast_ext(ctx, pdu, address),
            MlePduTypeDl::DRestoreAck => {
                // The CMCE PDU restoring the call follows the type
                pdu.seek_rel(3);
                let sdu = BitBuffer::from_bitbuffer_pos(&pdu);
                let report = ctx.new_report("MLE", pdu_type.name(), address);
                ctx.send_report(report);
                queue.push_back(SapMsg::new(
                    Sap::LcmcSap,
                    TetraEntity::Mle,
                    TetraEntity::Cmce,
                    ctx.time,
                    SapMsgInner::LcmcMleUnitdataInd(LcmcMleUnitdataInd { sdu, address: *address }),
                ));
            }
            MlePduTypeDl::DNewCell | MlePduTypeDl::DPrepareFail | MlePduTypeDl::DRestoreFail | MlePduTypeDl::DChannelResponse => {
                unimplemented_log!("{} body", pdu_type);
                let report = ctx.new_report("MLE", pdu_type.name(), address);
                ctx.send_report(report);
            }
            MlePduTypeDl::ExtPdu => {
                tracing::debug!("reserved MLE PDU type: {}", pdu.dump_bin());
            }
        }
    }

    fn rx_d_nwrk_broadcast(&mut self, ctx: &mut DecoderContext, mut pdu: BitBuffer, address: &MacAddress) {
        let bcast = match DNwrkBroadcast::from_bitbuf(&mut pdu) {
            Ok(bcast) => bcast,
            Err(e) => {
                tracing::warn!("Failed parsing D-NWRK-BROADCAST: {:?} {}", e, pdu.dump_bin());
                ctx.send_invalid("MLE", "D-NWRK-BROADCAST", address, e.to_string());
                return;
            }
        };
        tracing::debug!("<- {}", bcast);

        let mut report = ctx.new_report("MLE", "D-NWRK-BROADCAST", address);
        report.add("cell re-select parameter", bcast.cell_re_select_parameters);
        report.add("cell service level", bcast.cell_service_level);
        if let Some(time) = bcast.tetra_network_time {
            report.add("tetra network time", time);
        }
        if let Some(count) = bcast.number_of_neighbour_cells {
            report.add("number of neighbour cells", count);
        }
        for (idx, cell) in bcast.neighbour_cells.iter().enumerate() {
            add_neighbour_cell(&mut report, idx, cell);
        }
        ctx.send_report(report);
    }

    fn rx_d_nwrk_broadcast_ext(&mut self, ctx: &mut DecoderContext, mut pdu: BitBuffer, address: &MacAddress) {
        let ext = match DNwrkBroadcastExt::from_bitbuf(&mut pdu) {
            Ok(ext) => ext,
            Err(e) => {
                tracing::warn!("Failed parsing D-NWRK-BROADCAST-EXTENSION: {:?} {}", e, pdu.dump_bin());
                ctx.send_invalid("MLE", "D-NWRK-BROADCAST-EXTENSION", address, e.to_string());
                return;
            }
        };
        tracing::debug!("<- {}", ext);

        let mut report = ctx.new_report("MLE", "D-NWRK-BROADCAST-EXTENSION", address);
        if let Some(count) = ext.number_of_channel_classes {
            report.add("number of channel classes", count);
        }
        ctx.send_report(report);
    }
}

fn add_neighbour_cell(report: &mut Report, idx: usize, cell: &NeighbourCellInfo) {
    let prefix = format!("cell{} ", idx);
    let key = |name: &str| format!("{}{}", prefix, name);

    report.add(&key("identifier"), cell.cell_identifier);
    report.add(&key("reselection types supported"), cell.reselection_types_supported);
    report.add(&key("neighbour cell synchronized"), cell.neighbour_cell_synchronized as u8);
    report.add(&key("service level"), cell.cell_service_level);
    report.add(&key("main carrier number"), cell.main_carrier_number);

    let optional: [(&str, Option<u64>); 10] = [
        ("main carrier number extension", cell.main_carrier_number_extension.map(u64::from)),
        ("MCC", cell.mcc.map(u64::from)),
        ("MNC", cell.mnc.map(u64::from)),
        ("LA", cell.location_area.map(u64::from)),
        ("max. MS tx power", cell.max_ms_tx_power.map(u64::from)),
        ("min. rx access level", cell.min_rx_access_level.map(u64::from)),
        ("subscriber class", cell.subscriber_class.map(u64::from)),
        ("BS service details", cell.bs_service_details.map(u64::from)),
        ("timeshare or security", cell.timeshare_or_security.map(u64::from)),
        ("TDMA frame offset", cell.tdma_frame_offset.map(u64::from)),
    ];
    for (name, value) in optional {
        if let Some(value) = value {
            report.add(&key(name), value);
        }
    }
}

impl TetraEntityTrait for MleDl {
    fn entity(&self) -> TetraEntity {
        TetraEntity::Mle
    }

    fn rx_prim(&mut self, ctx: &mut DecoderContext, queue: &mut MessageQueue, message: SapMsg) {
        match message.msg {
            SapMsgInner::TlmbSyncInd(prim) => self.rx_sync_ind(ctx, prim.tl_sdu),
            SapMsgInner::TlmbSysinfoInd(prim) => self.rx_sysinfo_ind(ctx, prim.tl_sdu),
            SapMsgInner::TlaTlDataInd(prim) => self.rx_tl_data_ind(ctx, queue, prim),
            msg => tracing::warn!("rx_prim: unexpected {:?} {}", message.sap, msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ChannelSink, ReportValue};
    use tetra_core::TdmaTime;
    use tetra_saps::tlmb::TlmbSyncInd;
    use tetra_saps::tmv::enums::logical_chans::LogicalChannel;

    fn tla(sdu: &str) -> SapMsg {
        SapMsg::new(
            Sap::TlaSap,
            TetraEntity::Llc,
            TetraEntity::Mle,
            TdmaTime::default(),
            SapMsgInner::TlaTlDataInd(TlaTlDataInd {
                tl_sdu: BitBuffer::from_bitstr(sdu),
                address: MacAddress { ssi: 77, ..Default::default() },
                logical_channel: LogicalChannel::SchF,
                llc_pdu: "BL-UDATA",
            }),
        )
    }

    #[test]
    fn test_discriminator_routing() {
        let mut ctx = DecoderContext::with_null_sink();
        let mut queue = MessageQueue::new();
        let mut mle = MleDl::new();

        mle.rx_prim(&mut ctx, &mut queue, tla("001 0101"));
        mle.rx_prim(&mut ctx, &mut queue, tla("010 01011"));
        mle.rx_prim(&mut ctx, &mut queue, tla("100 1"));
        // Reserved discriminator is dropped
        mle.rx_prim(&mut ctx, &mut queue, tla("011 1111"));

        let mm = queue.pop_front().unwrap();
        assert_eq!((mm.sap, mm.dest), (Sap::LmmSap, TetraEntity::Mm));
        let SapMsgInner::LmmMleUnitdataInd(prim) = mm.msg else { panic!() };
        assert_eq!(prim.sdu.to_bitstr(), "0101");

        let cmce = queue.pop_front().unwrap();
        assert_eq!((cmce.sap, cmce.dest), (Sap::LcmcSap, TetraEntity::Cmce));
        let SapMsgInner::LcmcMleUnitdataInd(prim) = cmce.msg else { panic!() };
        assert_eq!(prim.sdu.to_bitstr(), "01011");
        assert_eq!(prim.address.ssi, 77);

        let sndcp = queue.pop_front().unwrap();
        assert_eq!((sndcp.sap, sndcp.dest), (Sap::LtpdSap, TetraEntity::Sndcp));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_d_mle_sync_report() {
        let (sink, rx) = ChannelSink::new();
        let mut ctx = DecoderContext::new(Default::default(), Box::new(sink));
        let mut queue = MessageQueue::new();
        let mut mle = MleDl::new();

        let msg = SapMsg::new(
            Sap::TlmbSap,
            TetraEntity::Umac,
            TetraEntity::Mle,
            TdmaTime::default(),
            SapMsgInner::TlmbSyncInd(TlmbSyncInd {
                tl_sdu: BitBuffer::from_bitstr("0110100100 00001000101011 10 01 1"),
            }),
        );
        mle.rx_prim(&mut ctx, &mut queue, msg);

        let report = rx.try_recv().unwrap();
        assert_eq!(report.pdu(), "D-MLE-SYNC");
        assert_eq!(report.get("MCC").and_then(ReportValue::as_u64), Some(420));
        assert_eq!(report.get("MNC").and_then(ReportValue::as_u64), Some(555));
        assert_eq!(report.get("neighbour cell broadcast").and_then(ReportValue::as_u64), Some(2));
        assert_eq!(report.get("late entry supported").and_then(ReportValue::as_u64), Some(1));
    }

    #[test]
    fn test_d_nwrk_broadcast_with_neighbours() {
        let (sink, rx) = ChannelSink::new();
        let mut ctx = DecoderContext::new(Default::default(), Box::new(sink));
        let mut queue = MessageQueue::new();
        let mut mle = MleDl::new();

        let bits = concat!(
            "101 ",
            "010 0000000000000001 01 ",
            "1 0 1 001 ",
            "00011 01 1 10 001111101001 1 0 1 0011001100 0 0 0 0 0 0 0 0",
        );
        mle.rx_prim(&mut ctx, &mut queue, tla(bits));

        let report = rx.try_recv().unwrap();
        assert_eq!(report.pdu(), "D-NWRK-BROADCAST");
        assert_eq!(report.get("cell re-select parameter").and_then(ReportValue::as_u64), Some(1));
        assert_eq!(report.get("number of neighbour cells").and_then(ReportValue::as_u64), Some(1));
        assert_eq!(report.get("cell0 identifier").and_then(ReportValue::as_u64), Some(3));
        assert_eq!(report.get("cell0 main carrier number").and_then(ReportValue::as_u64), Some(1001));
        assert_eq!(report.get("cell0 MCC").and_then(ReportValue::as_u64), Some(204));
        assert!(report.get("cell0 MNC").is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_d_restore_ack_forwards_to_cmce() {
        let (sink, rx) = ChannelSink::new();
        let mut ctx = DecoderContext::new(Default::default(), Box::new(sink));
        let mut queue = MessageQueue::new();
        let mut mle = MleDl::new();

        mle.rx_prim(&mut ctx, &mut queue, tla("101 100 01110 00000000000101"));
        assert_eq!(rx.try_recv().unwrap().pdu(), "D-RESTORE-ACK");

        let cmce = queue.pop_front().unwrap();
        assert_eq!(cmce.dest, TetraEntity::Cmce);
        let SapMsgInner::LcmcMleUnitdataInd(prim) = cmce.msg else { panic!() };
        assert_eq!(prim.sdu.to_bitstr(), "0111000000000000101");
    }

    #[test]
    fn test_truncated_mle_sync_is_invalid() {
        let (sink, rx) = ChannelSink::new();
        let mut ctx = DecoderContext::new(Default::default(), Box::new(sink));
        let mut queue = MessageQueue::new();
        let mut mle = MleDl::new();

        let msg = SapMsg::new(
            Sap::TlmbSap,
            TetraEntity::Umac,
            TetraEntity::Mle,
            TdmaTime::default(),
            SapMsgInner::TlmbSyncInd(TlmbSyncInd { tl_sdu: BitBuffer::from_bitstr("0110100100") }),
        );
        mle.rx_prim(&mut ctx, &mut queue, msg);
        let report = rx.try_recv().unwrap();
        assert!(report.get("invalid pdu").is_some());
    }
}
