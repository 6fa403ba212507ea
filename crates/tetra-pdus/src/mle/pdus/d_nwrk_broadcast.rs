use core::fmt;

use tetra_core::typed_pdu_fields::*;
use tetra_core::{BitBuffer, expect_pdu_type, pdu_parse_error::PduParseErr};

use crate::mle::enums::mle_pdu_type_dl::MlePduTypeDl;
use crate::mle::fields::neighbour_cell_info::NeighbourCellInfo;

/// Representation of the D-NWRK-BROADCAST PDU (Clause 18.4.1.4.1).
/// Informs the MS about the serving cell and its neighbour cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DNwrkBroadcast {
    /// Type1, 16 bits
    pub cell_re_select_parameters: u16,
    /// Type1, 2 bits
    pub cell_service_level: u8,
    /// Type2, 48 bits
    pub tetra_network_time: Option<u64>,
    /// Type2, 3 bits
    pub number_of_neighbour_cells: Option<u8>,
    /// Conditional, present `number_of_neighbour_cells` times without p-bit
    pub neighbour_cells: Vec<NeighbourCellInfo>,
}

impl DNwrkBroadcast {
    pub fn from_bitbuf(buffer: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let pdu_type = buffer.read_field(3, "pdu_type")?;
        expect_pdu_type!(pdu_type, MlePduTypeDl::DNwrkBroadcast)?;

        let cell_re_select_parameters = buffer.read_field(16, "cell_re_select_parameters")? as u16;
        let cell_service_level = buffer.read_field(2, "cell_service_level")? as u8;

        let obit = delimiters::read_obit(buffer)?;
        let tetra_network_time = typed::parse_type2_generic(obit, buffer, 48, "tetra_network_time")?;
        let number_of_neighbour_cells =
            typed::parse_type2_generic(obit, buffer, 3, "number_of_neighbour_cells")?.map(|v| v as u8);

        let count = number_of_neighbour_cells.unwrap_or(0) as usize;
        let mut neighbour_cells = Vec::with_capacity(count);
        for _ in 0..count {
            neighbour_cells.push(NeighbourCellInfo::from_bitbuf(buffer)?);
        }

        Ok(DNwrkBroadcast {
            cell_re_select_parameters,
            cell_service_level,
            tetra_network_time,
            number_of_neighbour_cells,
            neighbour_cells,
        })
    }
}

impl fmt::Display for DNwrkBroadcast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DNwrkBroadcast {{ cell_re_select_parameters: {:#06x} cell_service_level: {} tetra_network_time: {:?} neighbour_cells: {:?} }}",
            self.cell_re_select_parameters, self.cell_service_level, self.tetra_network_time, self.number_of_neighbour_cells,
        )
    }
}
