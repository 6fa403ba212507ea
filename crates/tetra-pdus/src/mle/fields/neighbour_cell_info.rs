use core::fmt;

use tetra_core::typed_pdu_fields::{delimiters, typed};
use tetra_core::{BitBuffer, pdu_parse_error::PduParseErr};

/// Clause 18.5.17 Neighbour cell information element, as carried in D-NWRK-BROADCAST.
/// The element has no p-bit of its own, it is repeated "number of neighbour cells" times.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeighbourCellInfo {
    /// 5 bits
    pub cell_identifier: u8,
    /// 2 bits
    pub reselection_types_supported: u8,
    /// 1 bit
    pub neighbour_cell_synchronized: bool,
    /// 2 bits
    pub cell_service_level: u8,
    /// 12 bits
    pub main_carrier_number: u16,
    pub main_carrier_number_extension: Option<u16>,
    pub mcc: Option<u16>,
    pub mnc: Option<u16>,
    pub location_area: Option<u16>,
    pub max_ms_tx_power: Option<u8>,
    pub min_rx_access_level: Option<u8>,
    pub subscriber_class: Option<u16>,
    pub bs_service_details: Option<u16>,
    pub timeshare_or_security: Option<u8>,
    pub tdma_frame_offset: Option<u8>,
}

impl NeighbourCellInfo {
    pub fn from_bitbuf(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let cell_identifier = buf.read_field(5, "cell_identifier")? as u8;
        let reselection_types_supported = buf.read_field(2, "reselection_types_supported")? as u8;
        let neighbour_cell_synchronized = buf.read_flag("neighbour_cell_synchronized")?;
        let cell_service_level = buf.read_field(2, "cell_service_level")? as u8;
        let main_carrier_number = buf.read_field(12, "main_carrier_number")? as u16;

        let obit = delimiters::read_obit(buf)?;
        let mut t2 = |bits, name| typed::parse_type2_generic(obit, buf, bits, name);

        Ok(NeighbourCellInfo {
            cell_identifier,
            reselection_types_supported,
            neighbour_cell_synchronized,
            cell_service_level,
            main_carrier_number,
            main_carrier_number_extension: t2(10, "main_carrier_number_extension")?.map(|v| v as u16),
            mcc: t2(10, "mcc")?.map(|v| v as u16),
            mnc: t2(14, "mnc")?.map(|v| v as u16),
            location_area: t2(14, "location_area")?.map(|v| v as u16),
            max_ms_tx_power: t2(3, "max_ms_tx_power")?.map(|v| v as u8),
            min_rx_access_level: t2(4, "min_rx_access_level")?.map(|v| v as u8),
            subscriber_class: t2(16, "subscriber_class")?.map(|v| v as u16),
            bs_service_details: t2(12, "bs_service_details")?.map(|v| v as u16),
            timeshare_or_security: t2(5, "timeshare_or_security")?.map(|v| v as u8),
            tdma_frame_offset: t2(6, "tdma_frame_offset")?.map(|v| v as u8),
        })
    }
}

impl fmt::Display for NeighbourCellInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NeighbourCellInfo {{ id: {} carrier: {} sync: {} service_level: {} mcc: {:?} mnc: {:?} la: {:?} }}",
            self.cell_identifier,
            self.main_carrier_number,
            self.neighbour_cell_synchronized,
            self.cell_service_level,
            self.mcc,
            self.mnc,
            self.location_area,
        )
    }
}
