use core::fmt;

use tetra_core::{BitBuffer, pdu_parse_error::PduParseErr};

use crate::mle::fields::bs_service_details::BsServiceDetails;

/// Clause 18.4.2.2 D-MLE-SYSINFO, the TM-SDU of the BNCH SYSINFO PDU
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DMleSysinfo {
    // 14
    pub location_area: u16,
    // 16
    pub subscriber_class: u16,
    // 12
    pub bs_service_details: BsServiceDetails,
}

impl DMleSysinfo {
    pub const LEN_BITS: usize = 42;

    pub fn from_bitbuf(buf: &mut BitBuffer) -> Result<Self, PduParseErr> {
        let location_area = buf.read_field(14, "location_area")? as u16;
        let subscriber_class = buf.read_field(16, "subscriber_class")? as u16;
        let bs_service_details = BsServiceDetails::from_bitbuf(buf)?;

        Ok(DMleSysinfo {
            location_area,
            subscriber_class,
            bs_service_details,
        })
    }
}

impl fmt::Display for DMleSysinfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "d_mle_sysinfo {{")?;
        writeln!(f, "  location_area: {}", self.location_area)?;
        writeln!(f, "  subscriber_class: {:#x}", self.subscriber_class)?;
        writeln!(f, "  bs_service_details: {}", self.bs_service_details)?;
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let mut buf = BitBuffer::from_bitstr("00000000000010 1111111111111111 110000110101");
        let pdu = DMleSysinfo::from_bitbuf(&mut buf).unwrap();
        assert_eq!(pdu.location_area, 2);
        assert_eq!(pdu.subscriber_class, 0xffff);
        assert_eq!(pdu.bs_service_details.raw(), 0b1100_0011_0101);
        assert_eq!(buf.get_len_remaining(), 0);
    }

    #[test]
    fn test_truncated() {
        let mut buf = BitBuffer::from_bitstr("00000000000010 11111111");
        assert_eq!(
            DMleSysinfo::from_bitbuf(&mut buf),
            Err(PduParseErr::BufferEnded { field: Some("subscriber_class") })
        );
    }
}
