use tetra_core::{BitBuffer, MacAddress, TdmaTime};

const DEFRAG_BUF_INITIAL_LEN: usize = 512;

/// Reassembly of a TM-SDU sent as MAC-RESOURCE, MAC-FRAG ... MAC-END.
///
/// A single buffer is kept for the whole downlink. Any inconsistency aborts the reassembly in
/// progress; nothing is forwarded until the next MAC-RESOURCE starts a new one.
pub struct DefragBuffer {
    /// Addressing of the MAC-RESOURCE that started the reassembly
    pub addr: MacAddress,
    pub t_first: TdmaTime,
    pub num_frags: usize,
    stopped: bool,
    buffer: BitBuffer,
}

impl Default for DefragBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DefragBuffer {
    pub fn new() -> Self {
        Self {
            addr: MacAddress::default(),
            t_first: TdmaTime::default(),
            num_frags: 0,
            stopped: true,
            buffer: BitBuffer::new_autoexpand(DEFRAG_BUF_INITIAL_LEN),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.stopped
    }

    /// Starts a new reassembly, discarding any unfinished one
    pub fn start(&mut self, addr: MacAddress, time: TdmaTime) {
        if self.buffer.get_len_written() > 0 {
            tracing::warn!(
                "defrag start: previous reassembly for ssi {} from {} not finished, {} bits discarded",
                self.addr.ssi,
                self.t_first,
                self.buffer.get_len_written()
            );
        }
        self.buffer = BitBuffer::new_autoexpand(DEFRAG_BUF_INITIAL_LEN);
        self.addr = addr;
        self.t_first = time;
        self.num_frags = 0;
        self.stopped = false;
    }

    /// Appends the remainder of `sdu` if it belongs to the reassembly in progress
    pub fn append(&mut self, sdu: &BitBuffer, addr: &MacAddress) {
        if self.stopped {
            tracing::warn!("defrag append: no reassembly in progress, fragment dropped");
            return;
        }
        if addr.ssi != self.addr.ssi {
            tracing::warn!("defrag append: fragment for ssi {} while reassembling for ssi {}, aborted", addr.ssi, self.addr.ssi);
            self.stop();
            return;
        }
        let len = sdu.get_len_remaining();
        self.buffer.append(sdu);
        self.num_frags += 1;
        tracing::debug!("defrag append: fragment {} with {} bits, {} bits total", self.num_frags, len, self.buffer.get_len_written());
    }

    /// The reassembled TM-SDU, empty if the reassembly was aborted
    pub fn get_sdu(&self) -> BitBuffer {
        if self.stopped {
            return BitBuffer::new(0);
        }
        BitBuffer::from_bitbuffer(&self.buffer)
    }

    pub fn stop(&mut self) {
        self.stopped = true;
        self.num_frags = 0;
        self.buffer = BitBuffer::new_autoexpand(DEFRAG_BUF_INITIAL_LEN);
    }
}
