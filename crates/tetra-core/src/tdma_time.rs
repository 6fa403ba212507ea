use core::fmt;

/// Downlink TDMA position, advanced once per processed burst.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TdmaTime {
    /// Timeslot, from 1 to 4
    pub t: u8,
    /// Frame number, from 1 to 18
    pub f: u8,
    /// Multiframe number, from 1 to 60
    pub m: u8,
}

impl Default for TdmaTime {
    /// Returns the default TdmaTime of 1/1/1
    fn default() -> TdmaTime {
        TdmaTime { t: 1, f: 1, m: 1 }
    }
}

impl TdmaTime {
    pub fn is_valid(self) -> bool {
        (1..=4).contains(&self.t) && (1..=18).contains(&self.f) && (1..=60).contains(&self.m)
    }

    /// Next timeslot, wrapping tn into fn into mn.
    pub fn increment(self) -> TdmaTime {
        let mut next = self;
        next.t += 1;
        if next.t > 4 {
            next.t = 1;
            next.f += 1;
        }
        if next.f > 18 {
            next.f = 1;
            next.m += 1;
        }
        if next.m > 60 {
            next.m = 1;
        }
        next
    }

    /// Frame 18 is reserved for control signalling
    pub fn is_control_frame(&self) -> bool {
        self.f == 18
    }

    /// Returns true if the second half of this downlink slot carries the BNCH
    pub fn is_bnch_slot(&self) -> bool {
        self.f == 18 && (self.m as u16 + self.t as u16) % 4 == 1
    }

    /// Returns true if this downlink slot carries the mandatory BSCH (SYNC) block
    pub fn is_bsch_slot(&self) -> bool {
        self.f == 18 && (self.m as u16 + self.t as u16) % 4 == 3
    }
}

impl fmt::Display for TdmaTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{:02}/{:02}", self.t, self.f, self.m)
    }
}

impl fmt::Debug for TdmaTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{:02}/{:02}", self.t, self.f, self.m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_wraps() {
        let t = TdmaTime { t: 4, f: 18, m: 60 }.increment();
        assert_eq!(t, TdmaTime { t: 1, f: 1, m: 1 });
        let t = TdmaTime { t: 4, f: 18, m: 59 }.increment();
        assert_eq!(t, TdmaTime { t: 1, f: 1, m: 60 });
        let t = TdmaTime { t: 4, f: 3, m: 7 }.increment();
        assert_eq!(t, TdmaTime { t: 1, f: 4, m: 7 });
    }

    #[test]
    fn test_full_hyperframe_cycle() {
        let start = TdmaTime::default();
        let mut t = start;
        for i in 1..=(4 * 18 * 60) {
            t = t.increment();
            assert!(t.is_valid());
            assert_eq!(t == start, i == 4 * 18 * 60);
        }
    }

    #[test]
    fn test_broadcast_slots() {
        let t = TdmaTime { t: 1, f: 18, m: 4 };
        assert!(t.is_bnch_slot());
        assert!(!t.is_bsch_slot());
        let t = TdmaTime { t: 3, f: 18, m: 4 };
        assert!(t.is_bsch_slot());
        let t = TdmaTime { t: 3, f: 17, m: 4 };
        assert!(!t.is_bsch_slot());
    }
}
