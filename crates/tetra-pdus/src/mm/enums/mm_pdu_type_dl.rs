/// Clause 16.10.39 MM PDU types, downlink direction
/// Bits: 4
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MmPduTypeDl {
    DOtar,
    DAuthentication,
    DCkChangeDemand,
    DDisable,
    DEnable,
    DLocationUpdateAccept,
    DLocationUpdateCommand,
    DLocationUpdateReject,
    DLocationUpdateProceeding,
    DAttachDetachGroupIdentity,
    DAttachDetachGroupIdentityAcknowledgement,
    DMmStatus,
    MmPduFunctionNotSupported,
    /// 8, 13 and 14
    Reserved(u8),
}

impl MmPduTypeDl {
    pub fn from_raw(x: u64) -> Self {
        match x & 0xf {
            0 => MmPduTypeDl::DOtar,
            1 => MmPduTypeDl::DAuthentication,
            2 => MmPduTypeDl::DCkChangeDemand,
            3 => MmPduTypeDl::DDisable,
            4 => MmPduTypeDl::DEnable,
            5 => MmPduTypeDl::DLocationUpdateAccept,
            6 => MmPduTypeDl::DLocationUpdateCommand,
            7 => MmPduTypeDl::DLocationUpdateReject,
            9 => MmPduTypeDl::DLocationUpdateProceeding,
            10 => MmPduTypeDl::DAttachDetachGroupIdentity,
            11 => MmPduTypeDl::DAttachDetachGroupIdentityAcknowledgement,
            12 => MmPduTypeDl::DMmStatus,
            15 => MmPduTypeDl::MmPduFunctionNotSupported,
            other => MmPduTypeDl::Reserved(other as u8),
        }
    }

    pub fn into_raw(self) -> u64 {
        match self {
            MmPduTypeDl::DOtar => 0,
            MmPduTypeDl::DAuthentication => 1,
            MmPduTypeDl::DCkChangeDemand => 2,
            MmPduTypeDl::DDisable => 3,
            MmPduTypeDl::DEnable => 4,
            MmPduTypeDl::DLocationUpdateAccept => 5,
            MmPduTypeDl::DLocationUpdateCommand => 6,
            MmPduTypeDl::DLocationUpdateReject => 7,
            MmPduTypeDl::DLocationUpdateProceeding => 9,
            MmPduTypeDl::DAttachDetachGroupIdentity => 10,
            MmPduTypeDl::DAttachDetachGroupIdentityAcknowledgement => 11,
            MmPduTypeDl::DMmStatus => 12,
            MmPduTypeDl::MmPduFunctionNotSupported => 15,
            MmPduTypeDl::Reserved(x) => x as u64,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MmPduTypeDl::DOtar => "D-OTAR",
            MmPduTypeDl::DAuthentication => "D-AUTHENTICATION",
            MmPduTypeDl::DCkChangeDemand => "D-CK CHANGE DEMAND",
            MmPduTypeDl::DDisable => "D-DISABLE",
            MmPduTypeDl::DEnable => "D-ENABLE",
            MmPduTypeDl::DLocationUpdateAccept => "D-LOCATION UPDATE ACCEPT",
            MmPduTypeDl::DLocationUpdateCommand => "D-LOCATION UPDATE COMMAND",
            MmPduTypeDl::DLocationUpdateReject => "D-LOCATION UPDATE REJECT",
            MmPduTypeDl::DLocationUpdateProceeding => "D-LOCATION UPDATE PROCEEDING",
            MmPduTypeDl::DAttachDetachGroupIdentity => "D-ATTACH/DETACH GROUP IDENTITY",
            MmPduTypeDl::DAttachDetachGroupIdentityAcknowledgement => "D-ATTACH/DETACH GROUP IDENTITY ACK",
            MmPduTypeDl::DMmStatus => "D-MM STATUS",
            MmPduTypeDl::MmPduFunctionNotSupported => "MM PDU/FUNCTION NOT SUPPORTED",
            MmPduTypeDl::Reserved(_) => "reserved",
        }
    }
}

impl From<MmPduTypeDl> for u64 {
    fn from(e: MmPduTypeDl) -> Self {
        e.into_raw()
    }
}

impl core::fmt::Display for MmPduTypeDl {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_values_map() {
        for raw in 0..16u64 {
            assert_eq!(MmPduTypeDl::from_raw(raw).into_raw(), raw);
        }
        assert_eq!(MmPduTypeDl::from_raw(8), MmPduTypeDl::Reserved(8));
        assert_eq!(MmPduTypeDl::from_raw(5).name(), "D-LOCATION UPDATE ACCEPT");
    }
}
