use tetra_core::{BURST_LEN_BITS, BurstType, TrainingSequence};

use crate::phy::components::train_consts::*;

/// Number of consecutive frames that may go missing before synchronization is declared lost
pub const MAX_MISSING_FRAMES: i32 = 50;

/// A burst-aligned window of 510 bits handed out by the synchronizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncedFrame {
    pub bits: Vec<u8>,
    /// True if the frame edges matched training sequence 3, false when coasting
    pub pattern_found: bool,
}

/// Number of bits in `data` at `offset` differing from `pattern`
pub fn pattern_score(data: &[u8], pattern: &[u8], offset: usize) -> usize {
    let Some(window) = data.get(offset..offset + pattern.len()) else {
        return pattern.len();
    };
    window.iter().zip(pattern).filter(|(a, b)| (**a ^ **b) & 1 != 0).count()
}

/// Training sequence in the middle of a synchronized burst.
/// Ties are resolved in the order sync, normal 1, normal 2.
pub fn classify(bits: &[u8]) -> (TrainingSequence, usize) {
    let candidates = [
        (TrainingSequence::SyncTrainSeq, pattern_score(bits, &SEQ_SYNC, SEQ_SYNC_OFFSET)),
        (TrainingSequence::NormalTrainSeq1, pattern_score(bits, &SEQ_NORM1, SEQ_NORM_DL_OFFSET)),
        (TrainingSequence::NormalTrainSeq2, pattern_score(bits, &SEQ_NORM2, SEQ_NORM_DL_OFFSET)),
    ];

    let mut best = candidates[0];
    for cand in &candidates[1..] {
        if cand.1 < best.1 {
            best = *cand;
        }
    }
    best
}

/// Maximum number of training sequence bit errors for a burst to be accepted
pub const MAX_TRAIN_SEQ_ERRORS: usize = 5;

/// Burst type of a synchronized frame, None if no training sequence is close enough
pub fn burst_type_of(bits: &[u8]) -> Option<BurstType> {
    let (seq, score) = classify(bits);
    if score > MAX_TRAIN_SEQ_ERRORS {
        tracing::debug!("burst dropped, best training sequence {:?} has {} errors", seq, score);
        return None;
    }
    seq.burst_type()
}

/// Sliding window synchronizer over the demodulated bit stream.
///
/// A frame is accepted when the two halves of training sequence 3 appear at the burst edges.
/// Afterwards, frames keep being cut every 510 bits for up to 50 frames without a match.
pub struct BurstSync {
    frame: Vec<u8>,
    is_synchronized: bool,
    /// Remaining bits before synchronization is lost
    sync_bit_counter: i32,
}

impl Default for BurstSync {
    fn default() -> Self {
        Self::new()
    }
}

impl BurstSync {
    pub fn new() -> Self {
        Self {
            frame: Vec::with_capacity(BURST_LEN_BITS + 1),
            is_synchronized: false,
            sync_bit_counter: 0,
        }
    }

    pub fn is_synchronized(&self) -> bool {
        self.is_synchronized
    }

    fn reset_synchronizer(&mut self) {
        if !self.is_synchronized {
            tracing::info!("synchronization acquired");
        }
        self.is_synchronized = true;
        self.sync_bit_counter = BURST_LEN_BITS as i32 * MAX_MISSING_FRAMES;
    }

    /// Feed one demodulated bit. Returns a frame when one is cut from the stream.
    pub fn rx_symbol(&mut self, sym: u8) -> Option<SyncedFrame> {
        self.frame.push(sym & 1);
        if self.frame.len() < BURST_LEN_BITS {
            return None;
        }

        let score_begin = pattern_score(&self.frame, &SEQ_NORM3_BEGIN, SEQ_BEGIN_OFFSET);
        let score_end = pattern_score(&self.frame, &SEQ_NORM3_END, SEQ_END_OFFSET);
        let pattern_found = score_begin == 0 && score_end < 2;
        if pattern_found {
            self.reset_synchronizer();
        }

        let coasting = self.is_synchronized && self.sync_bit_counter % BURST_LEN_BITS as i32 == 0;
        let result = if pattern_found || coasting {
            let bits = std::mem::replace(&mut self.frame, Vec::with_capacity(BURST_LEN_BITS + 1));
            Some(SyncedFrame { bits, pattern_found })
        } else {
            None
        };

        self.sync_bit_counter -= 1;
        if self.sync_bit_counter <= 0 {
            if self.is_synchronized {
                tracing::warn!("synchronization lost");
            }
            self.is_synchronized = false;
            self.sync_bit_counter = 0;
        }

        if result.is_none() {
            self.frame.remove(0);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Random-looking filler that never contains the frame edges
    fn filler(len: usize) -> Vec<u8> {
        (0..len).map(|i| ((i * 7 + i / 3) % 5 == 0) as u8).collect()
    }

    /// A frame with training sequence 3 at its edges and `mid` at `mid_offset`
    fn build_frame(mid: &[u8], mid_offset: usize) -> Vec<u8> {
        let mut frame = filler(BURST_LEN_BITS);
        frame[SEQ_BEGIN_OFFSET..SEQ_BEGIN_OFFSET + 12].copy_from_slice(&SEQ_NORM3_BEGIN);
        frame[SEQ_END_OFFSET..SEQ_END_OFFSET + 10].copy_from_slice(&SEQ_NORM3_END);
        frame[mid_offset..mid_offset + mid.len()].copy_from_slice(mid);
        frame
    }

    #[test]
    fn test_pattern_score() {
        let data = [1, 0, 1, 1, 0];
        assert_eq!(pattern_score(&data, &[0, 1, 1], 1), 0);
        assert_eq!(pattern_score(&data, &[1, 1, 1], 1), 1);
        // Pattern overrunning the data counts as fully mismatched
        assert_eq!(pattern_score(&data, &[1, 1, 1], 4), 3);
    }

    #[test]
    fn test_classify_burst_types() {
        let sb = build_frame(&SEQ_SYNC, SEQ_SYNC_OFFSET);
        assert_eq!(burst_type_of(&sb), Some(BurstType::Sb));

        let ndb = build_frame(&SEQ_NORM1, SEQ_NORM_DL_OFFSET);
        assert_eq!(burst_type_of(&ndb), Some(BurstType::Ndb));

        let ndb_sf = build_frame(&SEQ_NORM2, SEQ_NORM_DL_OFFSET);
        assert_eq!(burst_type_of(&ndb_sf), Some(BurstType::NdbSf));
    }

    #[test]
    fn test_classify_tolerates_few_errors() {
        let mut ndb = build_frame(&SEQ_NORM1, SEQ_NORM_DL_OFFSET);
        for i in 0..5 {
            ndb[SEQ_NORM_DL_OFFSET + i * 4] ^= 1;
        }
        assert_eq!(classify(&ndb), (TrainingSequence::NormalTrainSeq1, 5));
        assert_eq!(burst_type_of(&ndb), Some(BurstType::Ndb));
    }

    #[test]
    fn test_classify_rejects_noise() {
        let zeros = vec![0u8; BURST_LEN_BITS];
        let ones = vec![1u8; BURST_LEN_BITS];
        for bits in [zeros, ones] {
            let (_, score) = classify(&bits);
            assert!(score > MAX_TRAIN_SEQ_ERRORS);
            assert_eq!(burst_type_of(&bits), None);
        }
    }

    #[test]
    fn test_finds_frame_after_garbage() {
        let mut sync = BurstSync::new();
        let frame = build_frame(&SEQ_NORM1, SEQ_NORM_DL_OFFSET);

        let mut found = Vec::new();
        for &b in filler(333).iter().chain(frame.iter()) {
            if let Some(f) = sync.rx_symbol(b) {
                found.push(f);
            }
        }
        assert_eq!(found.len(), 1);
        assert!(found[0].pattern_found);
        assert_eq!(found[0].bits, frame);
        assert!(sync.is_synchronized());
    }

    #[test]
    fn test_consecutive_frames() {
        let mut sync = BurstSync::new();
        let frame = build_frame(&SEQ_SYNC, SEQ_SYNC_OFFSET);
        let mut count = 0;
        for _ in 0..4 {
            for &b in &frame {
                if let Some(f) = sync.rx_symbol(b) {
                    assert!(f.pattern_found);
                    count += 1;
                }
            }
        }
        assert_eq!(count, 4);
    }

    #[test]
    fn test_coasting_and_loss() {
        let mut sync = BurstSync::new();
        for &b in &build_frame(&SEQ_NORM1, SEQ_NORM_DL_OFFSET) {
            sync.rx_symbol(b);
        }
        assert!(sync.is_synchronized());

        // Without any further training sequence, frames keep being cut until the budget runs out
        let mut coasted = 0;
        let junk = vec![0u8; BURST_LEN_BITS * 2 * (MAX_MISSING_FRAMES as usize + 1)];
        for &b in &junk {
            if let Some(f) = sync.rx_symbol(b) {
                assert!(!f.pattern_found);
                coasted += 1;
            }
        }
        // The budget is checked before the decrement, so the last frame is never cut
        assert_eq!(coasted, MAX_MISSING_FRAMES as usize - 1);
        assert!(!sync.is_synchronized());

        // Once lost, nothing is produced until the next match
        for &b in &junk[..BURST_LEN_BITS * 2] {
            assert_eq!(sync.rx_symbol(b), None);
        }
    }
}
