use tetra_config::CfgDecoder;

use crate::cmce::cmce_dl::CmceDl;
use crate::context::DecoderContext;
use crate::llc::llc_dl::LlcDl;
use crate::lmac::lmac_dl::LmacDl;
use crate::messagerouter::MessageRouter;
use crate::mle::mle_dl::MleDl;
use crate::mm::mm_dl::MmDl;
use crate::phy::phy_dl::PhyDl;
use crate::report::ReportSink;
use crate::sndcp::sndcp_dl::SndcpDl;
use crate::umac::umac_dl::UmacDl;
use crate::uplane::uplane_dl::UplaneDl;

/// Complete downlink decoder stack, from demodulated bits to reports.
///
/// Symbols are processed synchronously: when `rx_symbol` returns, every report caused
/// by that symbol has been handed to the sink.
pub struct TetraDecoder {
    phy: PhyDl,
    router: MessageRouter,
}

impl TetraDecoder {
    pub fn new(config: CfgDecoder, sink: Box<dyn ReportSink>) -> Self {
        let mut router = MessageRouter::new(DecoderContext::new(config, sink));
        router.register_entity(Box::new(LmacDl::new()));
        router.register_entity(Box::new(UmacDl::new()));
        router.register_entity(Box::new(LlcDl::new()));
        router.register_entity(Box::new(MleDl::new()));
        router.register_entity(Box::new(MmDl::new()));
        router.register_entity(Box::new(CmceDl::new()));
        router.register_entity(Box::new(SndcpDl::new()));
        router.register_entity(Box::new(UplaneDl::new()));
        Self { phy: PhyDl::new(), router }
    }

    /// Feeds one hard bit (0 or 1). Returns true if the bit completed a frame whose
    /// training sequence edges were found.
    pub fn rx_symbol(&mut self, sym: u8) -> bool {
        let Some(frame) = self.phy.rx_symbol(sym) else {
            return false;
        };

        let (ctx, queue) = self.router.parts_mut();
        self.phy.process_frame(ctx, queue, &frame);
        self.router.tick_start();
        self.router.deliver_all_messages();
        frame.pattern_found
    }

    /// Feeds a sequence of bits, one byte per bit. Returns the number of frames found.
    pub fn rx_symbols(&mut self, syms: &[u8]) -> usize {
        syms.iter().filter(|&&sym| self.rx_symbol(sym)).count()
    }

    pub fn is_synchronized(&self) -> bool {
        self.phy.is_synchronized()
    }

    /// Bursts handed to the LMAC so far
    pub fn num_bursts(&self) -> u64 {
        self.phy.num_bursts()
    }

    pub fn ctx(&self) -> &DecoderContext {
        self.router.ctx()
    }

    pub fn ctx_mut(&mut self) -> &mut DecoderContext {
        self.router.ctx_mut()
    }

    pub fn flush(&mut self) {
        self.router.ctx_mut().flush_sink();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::NullSink;

    #[test]
    fn test_noise_does_not_synchronize() {
        let mut decoder = TetraDecoder::new(CfgDecoder::default(), Box::new(NullSink));
        let bits: Vec<u8> = (0..5000u32).map(|i| ((i * 7 + i / 3) % 2) as u8).collect();
        assert_eq!(decoder.rx_symbols(&bits), 0);
        assert!(!decoder.is_synchronized());
        assert_eq!(decoder.num_bursts(), 0);
    }
}
