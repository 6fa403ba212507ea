// Clause 21.5.2

use core::fmt;

use tetra_core::{BitBuffer, TdmaTime, freqs::FreqInfo, pdu_parse_error::PduParseErr};


/// Table 21.80: allocation type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanAllocType {
    Replace,
    Additional,
    QuitAndGo,
    ReplaceWithCarrierSignalling,
}

impl ChanAllocType {
    pub fn from_raw(raw: u64) -> Self {
        match raw & 0b11 {
            0 => ChanAllocType::Replace,
            1 => ChanAllocType::Additional,
            2 => ChanAllocType::QuitAndGo,
            _ => ChanAllocType::ReplaceWithCarrierSignalling,
        }
    }
}

/// Table 21.82: up/downlink assigned. Augmented means the allocation continues with
/// the augmented channel allocation part
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UlDlAssignment {
    Augmented,
    Dl,
    Ul,
    Both,
}

impl UlDlAssignment {
    pub fn from_raw(raw: u64) -> Self {
        match raw & 0b11 {
            0 => UlDlAssignment::Augmented,
            1 => UlDlAssignment::Dl,
            2 => UlDlAssignment::Ul,
            _ => UlDlAssignment::Both,
        }
    }
}

/// Extended carrier numbering (band, offset, duplex spacing, reverse operation)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtCarrier {
    // 4
    pub freq_band: u8,
    // 2
    pub offset: u8,
    // 3
    pub duplex_spacing: u8,
    // 1
    pub reverse_operation: bool,
}

/// Augmented channel allocation, present when ul_dl_assigned is Augmented
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AugmentedChanAlloc {
    // 2
    pub ul_dl_assigned: u8,
    // 3
    pub bandwidth: u8,
    // 3
    pub modulation_mode: u8,
    // 3
    pub max_ul_qam_modulation_level: u8,
    // 3 reserved
    // 3
    pub conforming_channel_status: u8,
    // 4
    pub bs_link_imbalance: u8,
    // 5
    pub bs_transmit_power_relative_to_main_carrier: u8,
    // 2
    pub napping_status: u8,
    // 11 opt, present if napping_status == 1
    pub napping_information: Option<u16>,
    // 4 reserved
    // 1 + 16 opt
    pub conditional_element_a: Option<u16>,
    // 1 + 16 opt
    pub conditional_element_b: Option<u16>,
    // 1
    pub further_augmentation_flag: bool,
}

impl AugmentedChanAlloc {
    fn from_bitbuf(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let ul_dl_assigned = buf.read_field(2, "aug_ul_dl_assigned")? as u8;
        let bandwidth = buf.read_field(3, "bandwidth")? as u8;
        let modulation_mode = buf.read_field(3, "modulation_mode")? as u8;
        let max_ul_qam_modulation_level = buf.read_field(3, "max_ul_qam_modulation_level")? as u8;
        buf.read_field(3, "reserved")?;
        let conforming_channel_status = buf.read_field(3, "conforming_channel_status")? as u8;
        let bs_link_imbalance = buf.read_field(4, "bs_link_imbalance")? as u8;
        let bs_transmit_power_relative_to_main_carrier = buf.read_field(5, "bs_transmit_power_rel")? as u8;
        let napping_status = buf.read_field(2, "napping_status")? as u8;
        let napping_information = if napping_status == 1 {
            Some(buf.read_field(11, "napping_information")? as u16)
        } else {
            None
        };
        buf.read_field(4, "reserved")?;
        let conditional_element_a = if buf.read_flag("conditional_element_a_flag")? {
            Some(buf.read_field(16, "conditional_element_a")? as u16)
        } else {
            None
        };
        let conditional_element_b = if buf.read_flag("conditional_element_b_flag")? {
            Some(buf.read_field(16, "conditional_element_b")? as u16)
        } else {
            None
        };
        let further_augmentation_flag = buf.read_flag("further_augmentation_flag")?;

        Ok(AugmentedChanAlloc {
            ul_dl_assigned,
            bandwidth,
            modulation_mode,
            max_ul_qam_modulation_level,
            conforming_channel_status,
            bs_link_imbalance,
            bs_transmit_power_relative_to_main_carrier,
            napping_status,
            napping_information,
            conditional_element_a,
            conditional_element_b,
            further_augmentation_flag,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChanAllocElement {
    // 2
    pub alloc_type: ChanAllocType,
    // 4-bit field, each bit represents a timeslot (TS1 to TS4)
    pub ts_assigned: [bool; 4],
    // 2
    pub ul_dl_assigned: UlDlAssignment,
    // 1
    pub clch_permission: bool,
    // 1
    pub cell_change_flag: bool,
    // 12
    pub carrier_num: u16,
    // 1 + 10 opt
    pub ext: Option<ExtCarrier>,
    // 2
    pub mon_pattern: u8,
    // 2 opt
    pub frame18_mon_pattern: Option<u8>,
    pub augmented: Option<AugmentedChanAlloc>,
}


impl ChanAllocElement {
    pub fn from_bitbuf(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {

        let alloc_type = ChanAllocType::from_raw(buf.read_field(2, "alloc_type")?);

        let bitmap = buf.read_field(4, "ts_assigned")? as u8;
        let ts_assigned = [
            (bitmap & 0b1000) != 0,
            (bitmap & 0b0100) != 0,
            (bitmap & 0b0010) != 0,
            (bitmap & 0b0001) != 0,
        ];

        let ul_dl_assigned = UlDlAssignment::from_raw(buf.read_field(2, "ul_dl_assigned")?);
        let clch_permission = buf.read_flag("clch_permission")?;
        let cell_change_flag = buf.read_flag("cell_change_flag")?;
        let carrier_num = buf.read_field(12, "carrier_num")? as u16;

        let ext = if buf.read_flag("ext_carrier_num_flag")? {
            Some(ExtCarrier {
                freq_band: buf.read_field(4, "ext_freq_band")? as u8,
                offset: buf.read_field(2, "ext_offset")? as u8,
                duplex_spacing: buf.read_field(3, "ext_duplex_spacing")? as u8,
                reverse_operation: buf.read_flag("ext_reverse_operation")?,
            })
        } else {
            None
        };

        let mon_pattern = buf.read_field(2, "mon_pattern")? as u8;
        let frame18_mon_pattern = match mon_pattern {
            0 => Some(buf.read_field(2, "frame18_mon_pattern")? as u8),
            _ => None,
        };

        let augmented = if ul_dl_assigned == UlDlAssignment::Augmented {
            Some(AugmentedChanAlloc::from_bitbuf(buf)?)
        } else {
            None
        };

        Ok(ChanAllocElement {
            alloc_type,
            ts_assigned,
            ul_dl_assigned,
            clch_permission,
            cell_change_flag,
            carrier_num,
            ext,
            mon_pattern,
            frame18_mon_pattern,
            augmented,
        })
    }

    /// Downlink frequency of the allocated carrier in Hz, if the element carries an extended carrier
    /// number. Without one, the carrier lives in the band of the serving cell.
    pub fn ext_dl_freq(&self) -> Option<i64> {
        let ext = self.ext.as_ref()?;
        FreqInfo::from_sysinfo_fields(ext.freq_band, self.carrier_num, ext.offset, ext.duplex_spacing, ext.reverse_operation)
            .ok()
            .map(|f| f.dl_freq())
    }

    /// Bitmap of assigned timeslots as transported on the air, TS1 in the msb
    pub fn ts_bitmap(&self) -> u8 {
        self.ts_assigned.iter().fold(0, |acc, &b| (acc << 1) | b as u8)
    }

    /// True if the allocation includes the timeslot of `time`
    pub fn covers(&self, time: TdmaTime) -> bool {
        (1..=4).contains(&time.t) && self.ts_assigned[(time.t - 1) as usize]
    }
}

impl fmt::Display for ChanAllocElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChanAllocElement {{ alloc_type: {:?} ts: {:04b} ul_dl: {:?} carrier: {}",
            self.alloc_type, self.ts_bitmap(), self.ul_dl_assigned, self.carrier_num)?;
        if let Some(ext) = &self.ext {
            write!(f, " ext: {:?}", ext)?;
        }
        if self.augmented.is_some() {
            write!(f, " augmented")?;
        }
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain() {
        // replace, TS2, both, clch, no cell change, carrier 1528, no ext, mon 1
        let mut buf = BitBuffer::from_bitstr("00 0100 11 1 0 010111111000 0 01");
        let e = ChanAllocElement::from_bitbuf(&mut buf).unwrap();
        assert_eq!(e.alloc_type, ChanAllocType::Replace);
        assert_eq!(e.ts_assigned, [false, true, false, false]);
        assert_eq!(e.ul_dl_assigned, UlDlAssignment::Both);
        assert_eq!(e.carrier_num, 1528);
        assert_eq!(e.frame18_mon_pattern, None);
        assert_eq!(buf.get_len_remaining(), 0);
        assert!(e.covers(TdmaTime { t: 2, f: 1, m: 1 }));
    }

    #[test]
    fn test_ext_and_augmented() {
        let mut buf = BitBuffer::from_bitstr(concat!(
            "01 1111 00 0 1 000000000100",  // additional, all slots, augmented, carrier 4
            "1 0100 00 000 0",              // ext: band 4, offset 0, duplex 0
            "00 01",                        // mon pattern 0, frame 18 pattern 1
            "11 000 000 000 000 000 0000 00000", // augmented fixed part
            "01 00000000111",               // napping status 1 + info
            "0000",                         // reserved
            "1 1010101010101010",           // conditional element a
            "0",                            // no conditional element b
            "0",                            // no further augmentation
            "1"
        ));
        let e = ChanAllocElement::from_bitbuf(&mut buf).unwrap();
        assert_eq!(e.ext.as_ref().unwrap().freq_band, 4);
        assert_eq!(e.frame18_mon_pattern, Some(1));
        let aug = e.augmented.as_ref().unwrap();
        assert_eq!(aug.ul_dl_assigned, 3);
        assert_eq!(aug.napping_information, Some(7));
        assert_eq!(aug.conditional_element_a, Some(0xAAAA));
        assert_eq!(aug.conditional_element_b, None);
        assert_eq!(buf.get_len_remaining(), 1);
        assert_eq!(e.ext_dl_freq(), Some(400_000_000 + 4 * 25_000));
    }
}
