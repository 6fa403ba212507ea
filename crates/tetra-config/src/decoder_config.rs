use serde::Deserialize;
use std::sync::Arc;

/// Default UDP address on which demodulated bits are received
pub const DEFAULT_UDP_BIND: &str = "127.0.0.1:42000";
/// Default UDP address to which JSON reports are sent
pub const DEFAULT_REPORT_TARGET: &str = "127.0.0.1:42100";

/// Where demodulated symbols (one byte per bit) come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum InputSource {
    Udp,
    File,
    Stdin,
}

/// Where the JSON reports are delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ReportSinkKind {
    Udp,
    Tcp,
    File,
    Stdout,
    None,
}

#[derive(Debug, Clone)]
pub struct CfgInput {
    pub source: InputSource,
    /// Local address to bind to for `InputSource::Udp`
    pub udp_bind: String,
    /// Path for `InputSource::File`
    pub file: Option<String>,
}

impl Default for CfgInput {
    fn default() -> Self {
        Self {
            source: InputSource::Udp,
            udp_bind: DEFAULT_UDP_BIND.to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CfgOutput {
    pub sink: ReportSinkKind,
    pub udp_target: String,
    pub tcp_target: String,
    /// Path for `ReportSinkKind::File`
    pub file: Option<String>,
}

impl Default for CfgOutput {
    fn default() -> Self {
        Self {
            sink: ReportSinkKind::Udp,
            udp_target: DEFAULT_REPORT_TARGET.to_string(),
            tcp_target: DEFAULT_REPORT_TARGET.to_string(),
            file: None,
        }
    }
}

/// Options changing the behaviour of the decoding entities
#[derive(Debug, Clone)]
pub struct CfgDecoder {
    /// If set, the AACH RM(30,14) block gets single bit error correction.
    /// Otherwise the first 14 bits of the codeword are taken as-is.
    pub rm_single_error_correction: bool,
    /// Log every coded block dropped because of a CRC failure
    pub report_crc_failures: bool,
    /// Include the compressed TCH/S frame in UPLANE reports
    pub uplane_frames: bool,
}

impl Default for CfgDecoder {
    fn default() -> Self {
        Self {
            rm_single_error_correction: false,
            report_crc_failures: false,
            uplane_frames: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DecoderConfig {
    /// If set, a verbose log is written to this file
    pub debug_log: Option<String>,
    pub input: CfgInput,
    pub output: CfgOutput,
    pub decoder: CfgDecoder,
}

impl DecoderConfig {
    /// Validate that the selected input and output have the settings they need.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.input.source == InputSource::File && self.input.file.is_none() {
            return Err("input.file must be provided for File input");
        }
        if self.input.source == InputSource::Udp && self.input.udp_bind.is_empty() {
            return Err("input.udp_bind must not be empty for Udp input");
        }
        match self.output.sink {
            ReportSinkKind::File if self.output.file.is_none() => {
                return Err("output.file must be provided for File sink");
            }
            ReportSinkKind::Udp if self.output.udp_target.is_empty() => {
                return Err("output.udp_target must not be empty for Udp sink");
            }
            ReportSinkKind::Tcp if self.output.tcp_target.is_empty() => {
                return Err("output.tcp_target must not be empty for Tcp sink");
            }
            _ => {}
        }
        Ok(())
    }
}

/// Cheaply cloneable handle to the immutable decoder configuration.
#[derive(Clone, Debug)]
pub struct SharedConfig {
    cfg: Arc<DecoderConfig>,
}

impl SharedConfig {
    /// Wraps a configuration. The caller is responsible for having validated it.
    pub fn from_config(cfg: DecoderConfig) -> Self {
        Self { cfg: Arc::new(cfg) }
    }

    /// Access immutable config.
    pub fn config(&self) -> Arc<DecoderConfig> {
        Arc::clone(&self.cfg)
    }
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self::from_config(DecoderConfig::default())
    }
}
