/// ETSI TS 100 392-15 V1.5.1 (2011-02), clause 6: Duplex spacing in kHz, indexed [duplex_setting][band]
const TETRA_DUPLEX_SPACING: [[Option<u32>; 16]; 8] = [
    [ None,    Some(1600), Some(10000), Some(10000), Some(10000), Some(10000), Some(10000), None,        None,        None,        None,    None,    None,    None,    None,    None ],
    [ None,    Some(4500), None,        Some(36000), Some(7000),  None,        None,        None,        Some(45000), Some(45000), None,    None,    None,    None,    None,    None ],
    [ Some(0), Some(0),    Some(0),     Some(0),     Some(0),     Some(0),     Some(0),     Some(0),     Some(0),     Some(0),     Some(0), Some(0), Some(0), Some(0), Some(0), Some(0)],
    [ None,    None,       None,        Some(8000),  Some(8000),  None,        None,        None,        Some(18000), Some(18000), None,    None,    None,    None,    None,    None ],
    [ None,    None,       None,        Some(18000), Some(5000),  None,        Some(30000), Some(30000), None,        Some(39000), None,    None,    None,    None,    None,    None ],
    [ None,    None,       None,        None,        Some(9500),  None,        None,        None,        None,        None,        None,    None,    None,    None,    None,    None ],
    [ None,    None,       None,        None,        None,        None,        None,        None,        None,        None,        None,    None,    None,    None,    None,    None ],
    [ None,    None,       None,        None,        None,        None,        None,        None,        None,        None,        None,    None,    None,    None,    None,    None ],
];

/// Carrier description as broadcast in SYSINFO or an extended channel allocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreqInfo {
    /// Frequency band in 100MHz increments
    pub band: u8,
    /// Carrier number, 0-4095
    pub carrier: u16,
    /// Frequency offset from 25 kHz aligned carrier. In Hz: 0, 6250, -6250 or 12500
    pub freq_offset_hz: i32,
    /// Duplex spacing setting (index in duplex spacing table)
    pub duplex_spacing_id: u8,
    /// Duplex spacing in Hz, None if the table has no entry for this band
    pub duplex_spacing_val: Option<u32>,
    /// Reverse operation flag, if true, UL is above DL frequency
    pub reverse_operation: bool,
}

impl FreqInfo {
    pub fn freq_offset_id_to_hz(offset_index: u8) -> Option<i32> {
        match offset_index {
            0 => Some(0),
            1 => Some(6250),
            2 => Some(-6250),
            3 => Some(12500),
            _ => None,
        }
    }

    /// Build from the raw SYSINFO field values.
    pub fn from_sysinfo_fields(band: u8, carrier: u16, offset_id: u8, duplex_id: u8, reverse_operation: bool) -> Result<Self, String> {
        if band > 15 {
            return Err(format!("Invalid frequency band {}", band));
        }
        let freq_offset_hz = Self::freq_offset_id_to_hz(offset_id)
            .ok_or_else(|| format!("Invalid frequency offset index {}", offset_id))?;
        if duplex_id > 7 {
            return Err(format!("Invalid duplex setting {}", duplex_id));
        }

        Ok(Self {
            band,
            carrier,
            freq_offset_hz,
            duplex_spacing_id: duplex_id,
            duplex_spacing_val: Self::get_default_duplex_spacing(band, duplex_id),
            reverse_operation,
        })
    }

    /// Get the standardized duplex spacing in Hz for a band and duplex spacing table index
    pub fn get_default_duplex_spacing(band: u8, duplex_setting: u8) -> Option<u32> {
        TETRA_DUPLEX_SPACING
            .get(duplex_setting as usize)?
            .get(band as usize)
            .copied()
            .flatten()
            .map(|v| v * 1000)
    }

    /// Downlink frequency in Hz
    pub fn dl_freq(&self) -> i64 {
        100_000_000 * self.band as i64 + self.carrier as i64 * 25_000 + self.freq_offset_hz as i64
    }

    /// Uplink frequency in Hz, if the duplex spacing is known
    pub fn ul_freq(&self) -> Option<i64> {
        let spacing = self.duplex_spacing_val? as i64;
        let dl = self.dl_freq();
        Some(if self.reverse_operation { dl + spacing } else { dl - spacing })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freqinfo_from_sysinfo_fields() {
        let f = FreqInfo::from_sysinfo_fields(4, 1001, 0, 0, false).unwrap();
        assert_eq!(f.dl_freq(), 400_000_000 + 1001 * 25_000);
        assert_eq!(f.duplex_spacing_val, Some(10_000_000));
        assert_eq!(f.ul_freq(), Some(400_000_000 + 1001 * 25_000 - 10_000_000));
    }

    #[test]
    fn test_offset_and_reverse() {
        let f = FreqInfo::from_sysinfo_fields(3, 2000, 2, 1, true).unwrap();
        assert_eq!(f.dl_freq(), 300_000_000 + 2000 * 25_000 - 6250);
        assert_eq!(f.ul_freq(), Some(f.dl_freq() + 36_000_000));
    }

    #[test]
    fn test_unknown_duplex_spacing() {
        let f = FreqInfo::from_sysinfo_fields(7, 10, 0, 0, false).unwrap();
        assert_eq!(f.ul_freq(), None);
        assert!(FreqInfo::from_sysinfo_fields(4, 10, 4, 0, false).is_err());
    }
}
