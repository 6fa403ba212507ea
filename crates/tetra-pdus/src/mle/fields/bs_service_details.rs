use core::fmt;

use tetra_core::{BitBuffer, assert_warn, pdu_parse_error::PduParseErr};

/// Clause 18.5.2 BS service details information element, 12 bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BsServiceDetails {
    pub registration: bool,
    pub deregistration: bool,
    pub priority_cell: bool,
    pub no_minimum_mode: bool,
    pub migration: bool,
    pub system_wide_services: bool,
    pub voice_service: bool,
    pub circuit_mode_data_service: bool,
    pub sndcp_service: bool,
    pub aie_service: bool,
    pub advanced_link: bool,
}

impl BsServiceDetails {
    pub const LEN_BITS: usize = 12;

    pub fn from_bitbuf(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let raw = buf.read_field(Self::LEN_BITS, "bs_service_details")?;
        Ok(Self::from_raw(raw as u16))
    }

    pub fn from_raw(raw: u16) -> Self {
        let bit = |n: u16| (raw >> (11 - n)) & 1 == 1;
        assert_warn!(!bit(8), "reserved bit in BS service details should be 0");
        BsServiceDetails {
            registration: bit(0),
            deregistration: bit(1),
            priority_cell: bit(2),
            no_minimum_mode: bit(3),
            migration: bit(4),
            system_wide_services: bit(5),
            voice_service: bit(6),
            circuit_mode_data_service: bit(7),
            sndcp_service: bit(9),
            aie_service: bit(10),
            advanced_link: bit(11),
        }
    }

    pub fn raw(&self) -> u16 {
        [
            self.registration,
            self.deregistration,
            self.priority_cell,
            self.no_minimum_mode,
            self.migration,
            self.system_wide_services,
            self.voice_service,
            self.circuit_mode_data_service,
            false,
            self.sndcp_service,
            self.aie_service,
            self.advanced_link,
        ]
        .iter()
        .fold(0u16, |acc, &b| (acc << 1) | b as u16)
    }
}

impl fmt::Display for BsServiceDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BsServiceDetails {{ registration: {} deregistration: {} priority_cell: {} no_minimum_mode: {} migration: {} system_wide_services: {} voice: {} circuit_data: {} sndcp: {} aie: {} advanced_link: {} }}",
            self.registration,
            self.deregistration,
            self.priority_cell,
            self.no_minimum_mode,
            self.migration,
            self.system_wide_services,
            self.voice_service,
            self.circuit_mode_data_service,
            self.sndcp_service,
            self.aie_service,
            self.advanced_link
        )
    }
}
