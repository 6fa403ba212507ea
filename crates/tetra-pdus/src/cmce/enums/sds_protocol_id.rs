/// Clause 29.4.3.9 / Annex J SDS protocol identifier (first octet of user defined data 4)
/// Bits: 8
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdsProtocolId {
    Otak,
    SimpleTextMessaging,
    SimpleLocationSystem,
    WirelessDatagramProtocol,
    WirelessControlMessageProtocol,
    MDmo,
    PinAuthentication,
    EteeMessage,
    SimpleImmediateTextMessaging,
    LocationInformationProtocol,
    NetAssistProtocol,
    ConcatenatedSdsMessage,
    Dotam,
    TextMessagingSdsTl,
    LocationSystemSdsTl,
    WirelessDatagramProtocolSdsTl,
    WirelessControlMessageProtocolSdsTl,
    MDmoSdsTl,
    EteeMessageSdsTl,
    ImmediateTextMessagingSdsTl,
    MessageWithUserDataHeader,
    ConcatenatedSdsMessageSdsTl,
    /// Any value without a dedicated decoder
    Other(u8),
}

impl SdsProtocolId {
    pub fn from_raw(x: u64) -> Self {
        match x & 0xff {
            1 => SdsProtocolId::Otak,
            2 => SdsProtocolId::SimpleTextMessaging,
            3 => SdsProtocolId::SimpleLocationSystem,
            4 => SdsProtocolId::WirelessDatagramProtocol,
            5 => SdsProtocolId::WirelessControlMessageProtocol,
            6 => SdsProtocolId::MDmo,
            7 => SdsProtocolId::PinAuthentication,
            8 => SdsProtocolId::EteeMessage,
            9 => SdsProtocolId::SimpleImmediateTextMessaging,
            10 => SdsProtocolId::LocationInformationProtocol,
            11 => SdsProtocolId::NetAssistProtocol,
            12 => SdsProtocolId::ConcatenatedSdsMessage,
            13 => SdsProtocolId::Dotam,
            130 => SdsProtocolId::TextMessagingSdsTl,
            131 => SdsProtocolId::LocationSystemSdsTl,
            132 => SdsProtocolId::WirelessDatagramProtocolSdsTl,
            133 => SdsProtocolId::WirelessControlMessageProtocolSdsTl,
            134 => SdsProtocolId::MDmoSdsTl,
            136 => SdsProtocolId::EteeMessageSdsTl,
            137 => SdsProtocolId::ImmediateTextMessagingSdsTl,
            138 => SdsProtocolId::MessageWithUserDataHeader,
            140 => SdsProtocolId::ConcatenatedSdsMessageSdsTl,
            other => SdsProtocolId::Other(other as u8),
        }
    }

    pub fn into_raw(self) -> u64 {
        match self {
            SdsProtocolId::Otak => 1,
            SdsProtocolId::SimpleTextMessaging => 2,
            SdsProtocolId::SimpleLocationSystem => 3,
            SdsProtocolId::WirelessDatagramProtocol => 4,
            SdsProtocolId::WirelessControlMessageProtocol => 5,
            SdsProtocolId::MDmo => 6,
            SdsProtocolId::PinAuthentication => 7,
            SdsProtocolId::EteeMessage => 8,
            SdsProtocolId::SimpleImmediateTextMessaging => 9,
            SdsProtocolId::LocationInformationProtocol => 10,
            SdsProtocolId::NetAssistProtocol => 11,
            SdsProtocolId::ConcatenatedSdsMessage => 12,
            SdsProtocolId::Dotam => 13,
            SdsProtocolId::TextMessagingSdsTl => 130,
            SdsProtocolId::LocationSystemSdsTl => 131,
            SdsProtocolId::WirelessDatagramProtocolSdsTl => 132,
            SdsProtocolId::WirelessControlMessageProtocolSdsTl => 133,
            SdsProtocolId::MDmoSdsTl => 134,
            SdsProtocolId::EteeMessageSdsTl => 136,
            SdsProtocolId::ImmediateTextMessagingSdsTl => 137,
            SdsProtocolId::MessageWithUserDataHeader => 138,
            SdsProtocolId::ConcatenatedSdsMessageSdsTl => 140,
            SdsProtocolId::Other(x) => x as u64,
        }
    }

    /// Values from 128 upwards carry an SDS-TL header
    pub fn uses_sds_tl(self) -> bool {
        self.into_raw() >= 0x80
    }

    /// Description of the protocol, None for SDS-TL values outside the named set
    pub fn info(self) -> Option<&'static str> {
        let s = match self {
            SdsProtocolId::Otak => "OTAK",
            SdsProtocolId::SimpleTextMessaging => "simple text messaging",
            SdsProtocolId::SimpleLocationSystem => "simple location system",
            SdsProtocolId::WirelessDatagramProtocol => "wireless datagram protocol",
            SdsProtocolId::WirelessControlMessageProtocol => "wireless control message protocol",
            SdsProtocolId::MDmo => "M-DMO",
            SdsProtocolId::PinAuthentication => "pin authentification",
            SdsProtocolId::EteeMessage => "end-to-end encrypted message",
            SdsProtocolId::SimpleImmediateTextMessaging => "simple intermediated text messaging",
            SdsProtocolId::LocationInformationProtocol => "location information protocol",
            SdsProtocolId::NetAssistProtocol => "net assist protocol",
            SdsProtocolId::ConcatenatedSdsMessage => "concatenated sds message",
            SdsProtocolId::Dotam => "DOTAM",
            SdsProtocolId::TextMessagingSdsTl => "text messaging (SDS-TL)",
            SdsProtocolId::LocationSystemSdsTl => "location system (SDS-TL)",
            SdsProtocolId::WirelessDatagramProtocolSdsTl => "WAP (SDS-TL)",
            SdsProtocolId::WirelessControlMessageProtocolSdsTl => "WCMP (SDS-TL)",
            SdsProtocolId::MDmoSdsTl => "M-DMO (SDS-TL)",
            SdsProtocolId::EteeMessageSdsTl => "end-to-end encrypted message (SDS-TL)",
            SdsProtocolId::ImmediateTextMessagingSdsTl => "immediate text messaging (SDS-TL)",
            SdsProtocolId::MessageWithUserDataHeader => "message with user-data header",
            SdsProtocolId::ConcatenatedSdsMessageSdsTl => "concatenated sds message (SDS-TL)",
            SdsProtocolId::Other(0) => "reserved",
            SdsProtocolId::Other(x) if x <= 0x3f => "reserved for future standard definition",
            SdsProtocolId::Other(x) if x <= 0x7e => "available for user application definition",
            SdsProtocolId::Other(0x7f) => "reserved for extension",
            SdsProtocolId::Other(_) => return None,
        };
        Some(s)
    }
}

impl From<SdsProtocolId> for u64 {
    fn from(e: SdsProtocolId) -> Self {
        e.into_raw()
    }
}

impl core::fmt::Display for SdsProtocolId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.info() {
            Some(info) => write!(f, "{}", info),
            None => write!(f, "protocol {}", self.into_raw()),
        }
    }
}
