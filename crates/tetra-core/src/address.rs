/// Address type of a MAC-RESOURCE PDU (clause 21.4.3.1)
#[derive(Copy, Debug, Clone, PartialEq, Eq, Default)]
pub enum MacAddressType {
    /// Null PDU, nothing follows
    #[default]
    Null,
    Ssi,
    EventLabel,
    Ussi,
    Smi,
    /// Event label assignment
    SsiEventLabel,
    /// Usage marker assignment
    SsiUsageMarker,
    /// Event label assignment
    SmiEventLabel,
}

impl MacAddressType {
    pub fn from_raw(raw: u64) -> Self {
        match raw & 0b111 {
            0b000 => MacAddressType::Null,
            0b001 => MacAddressType::Ssi,
            0b010 => MacAddressType::EventLabel,
            0b011 => MacAddressType::Ussi,
            0b100 => MacAddressType::Smi,
            0b101 => MacAddressType::SsiEventLabel,
            0b110 => MacAddressType::SsiUsageMarker,
            _ => MacAddressType::SmiEventLabel,
        }
    }

    pub fn into_raw(self) -> u64 {
        match self {
            MacAddressType::Null => 0b000,
            MacAddressType::Ssi => 0b001,
            MacAddressType::EventLabel => 0b010,
            MacAddressType::Ussi => 0b011,
            MacAddressType::Smi => 0b100,
            MacAddressType::SsiEventLabel => 0b101,
            MacAddressType::SsiUsageMarker => 0b110,
            MacAddressType::SmiEventLabel => 0b111,
        }
    }
}

impl core::fmt::Display for MacAddressType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            MacAddressType::Null => "null",
            MacAddressType::Ssi => "SSI",
            MacAddressType::EventLabel => "event label",
            MacAddressType::Ussi => "USSI",
            MacAddressType::Smi => "SMI",
            MacAddressType::SsiEventLabel => "SSI + event label",
            MacAddressType::SsiUsageMarker => "SSI + usage marker",
            MacAddressType::SmiEventLabel => "SMI + event label",
        };
        write!(f, "{}", s)
    }
}

/// Addressing context of the most recent MAC-RESOURCE.
///
/// The UMAC overwrites it with every MAC-RESOURCE; primitives carry a copy taken when
/// their MAC PDU was parsed.
#[derive(Copy, Debug, Clone, PartialEq, Eq, Default)]
pub struct MacAddress {
    pub address_type: MacAddressType,
    pub ssi: u32,
    pub ussi: u32,
    pub smi: u32,
    pub event_label: u16,
    pub usage_marker: u8,
    pub encryption_mode: u8,
}

impl core::fmt::Display for MacAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.address_type {
            MacAddressType::Null => write!(f, "null"),
            MacAddressType::Ussi => write!(f, "USSI:{}", self.ussi),
            MacAddressType::Smi => write!(f, "SMI:{}", self.smi),
            MacAddressType::EventLabel => write!(f, "EL:{}", self.event_label),
            MacAddressType::SmiEventLabel => write!(f, "SMI:{}/EL:{}", self.smi, self.event_label),
            MacAddressType::SsiEventLabel => write!(f, "SSI:{}/EL:{}", self.ssi, self.event_label),
            MacAddressType::SsiUsageMarker => write!(f, "SSI:{}/UM:{}", self.ssi, self.usage_marker),
            MacAddressType::Ssi => write!(f, "SSI:{}", self.ssi),
        }
    }
}
