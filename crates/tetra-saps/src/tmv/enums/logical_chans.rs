/// Downlink logical channels as defined in the standard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalChannel {
    /// Access Assignment CHannel
    Aach,
    /// Broadcast Synchronization Channel
    Bsch,
    /// Broadcast Network Channel
    Bnch,
    /// Signalling Channel (full slot)
    SchF,
    /// Signalling Channel (half slot)
    SchHd,
    /// STealing Channel (half slot)
    Stch,
    /// Traffic Channel (speech, full slot)
    TchS,
    /// Traffic Channel (other, half slot)
    Tch,
}

impl LogicalChannel {
    pub fn is_traffic(self) -> bool {
        matches!(self, LogicalChannel::TchS | LogicalChannel::Tch)
    }

    /// True for the channels that carry MAC signalling PDUs (MAC-RESOURCE, MAC-FRAG, ...)
    pub fn is_signalling(self) -> bool {
        matches!(self, LogicalChannel::Bnch | LogicalChannel::SchF | LogicalChannel::SchHd | LogicalChannel::Stch)
    }

    pub fn name(self) -> &'static str {
        match self {
            LogicalChannel::Aach => "AACH",
            LogicalChannel::Bsch => "BSCH",
            LogicalChannel::Bnch => "BNCH",
            LogicalChannel::SchF => "SCH_F",
            LogicalChannel::SchHd => "SCH_HD",
            LogicalChannel::Stch => "STCH",
            LogicalChannel::TchS => "TCH_S",
            LogicalChannel::Tch => "TCH",
        }
    }
}

impl core::fmt::Display for LogicalChannel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.name())
    }
}
