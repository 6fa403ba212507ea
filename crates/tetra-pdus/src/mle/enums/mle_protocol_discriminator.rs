/// Clause 18.5.21 Protocol discriminator
/// Bits: 3
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MleProtocolDiscriminator {
    Mm,
    Cmce,
    Sndcp,
    Mle,
    /// 0, 3, 6 and 7 are not routed on the downlink
    Reserved(u8),
}

impl MleProtocolDiscriminator {
    pub fn from_raw(x: u64) -> Self {
        match x & 0b111 {
            1 => MleProtocolDiscriminator::Mm,
            2 => MleProtocolDiscriminator::Cmce,
            4 => MleProtocolDiscriminator::Sndcp,
            5 => MleProtocolDiscriminator::Mle,
            other => MleProtocolDiscriminator::Reserved(other as u8),
        }
    }

    pub fn into_raw(self) -> u64 {
        match self {
            MleProtocolDiscriminator::Mm => 1,
            MleProtocolDiscriminator::Cmce => 2,
            MleProtocolDiscriminator::Sndcp => 4,
            MleProtocolDiscriminator::Mle => 5,
            MleProtocolDiscriminator::Reserved(x) => x as u64,
        }
    }
}

impl From<MleProtocolDiscriminator> for u64 {
    fn from(e: MleProtocolDiscriminator) -> Self {
        e.into_raw()
    }
}

impl core::fmt::Display for MleProtocolDiscriminator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MleProtocolDiscriminator::Mm => write!(f, "MM"),
            MleProtocolDiscriminator::Cmce => write!(f, "CMCE"),
            MleProtocolDiscriminator::Sndcp => write!(f, "SNDCP"),
            MleProtocolDiscriminator::Mle => write!(f, "MLE subsystem"),
            MleProtocolDiscriminator::Reserved(x) => write!(f, "reserved ({})", x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discriminators() {
        assert_eq!(MleProtocolDiscriminator::from_raw(2), MleProtocolDiscriminator::Cmce);
        assert_eq!(MleProtocolDiscriminator::from_raw(6), MleProtocolDiscriminator::Reserved(6));
        assert_eq!(MleProtocolDiscriminator::from_raw(5).into_raw(), 5);
    }
}
