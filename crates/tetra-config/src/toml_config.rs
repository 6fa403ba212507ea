use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use toml::Value;

use super::decoder_config::{CfgDecoder, CfgInput, CfgOutput, DecoderConfig, InputSource, ReportSinkKind, SharedConfig};

/// Build `SharedConfig` from a TOML configuration file
pub fn from_toml_str(toml_str: &str) -> Result<SharedConfig, Box<dyn std::error::Error>> {
    let root: TomlConfigRoot = toml::from_str(toml_str)?;

    let expected_config_version = "0.1";
    if !root.config_version.eq(expected_config_version) {
        return Err(format!(
            "Unrecognized config_version: {}, expect {}",
            root.config_version, expected_config_version
        )
        .into());
    }
    if !root.extra.is_empty() {
        return Err(format!("Unrecognized top-level fields: {:?}", sorted_keys(&root.extra)).into());
    }
    if let Some(ref input) = root.input {
        if !input.extra.is_empty() {
            return Err(format!("Unrecognized fields: input::{:?}", sorted_keys(&input.extra)).into());
        }
    }
    if let Some(ref output) = root.output {
        if !output.extra.is_empty() {
            return Err(format!("Unrecognized fields: output::{:?}", sorted_keys(&output.extra)).into());
        }
    }
    if let Some(ref dec) = root.decoder {
        if !dec.extra.is_empty() {
            return Err(format!("Unrecognized fields: decoder::{:?}", sorted_keys(&dec.extra)).into());
        }
    }

    let mut cfg = DecoderConfig {
        debug_log: root.debug_log,
        ..Default::default()
    };

    if let Some(input) = root.input {
        apply_input_patch(&mut cfg.input, input);
    }
    if let Some(output) = root.output {
        apply_output_patch(&mut cfg.output, output);
    }
    if let Some(dec) = root.decoder {
        apply_decoder_patch(&mut cfg.decoder, dec);
    }

    cfg.validate()?;
    Ok(SharedConfig::from_config(cfg))
}

/// Build `SharedConfig` from any reader.
pub fn from_reader<R: Read>(reader: R) -> Result<SharedConfig, Box<dyn std::error::Error>> {
    let mut contents = String::new();
    let mut reader = BufReader::new(reader);
    reader.read_to_string(&mut contents)?;
    from_toml_str(&contents)
}

/// Build `SharedConfig` from a file path.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<SharedConfig, Box<dyn std::error::Error>> {
    let f = File::open(path)?;
    let r = BufReader::new(f);
    let cfg = from_reader(r)?;
    Ok(cfg)
}

fn apply_input_patch(dst: &mut CfgInput, src: InputDto) {
    if let Some(v) = src.source {
        dst.source = v;
    }
    if let Some(v) = src.udp_bind {
        dst.udp_bind = v;
    }
    dst.file = src.file;
}

fn apply_output_patch(dst: &mut CfgOutput, src: OutputDto) {
    if let Some(v) = src.sink {
        dst.sink = v;
    }
    if let Some(v) = src.udp_target {
        dst.udp_target = v;
    }
    if let Some(v) = src.tcp_target {
        dst.tcp_target = v;
    }
    dst.file = src.file;
}

fn apply_decoder_patch(dst: &mut CfgDecoder, src: DecoderDto) {
    if let Some(v) = src.rm_single_error_correction {
        dst.rm_single_error_correction = v;
    }
    if let Some(v) = src.report_crc_failures {
        dst.report_crc_failures = v;
    }
    if let Some(v) = src.uplane_frames {
        dst.uplane_frames = v;
    }
}

fn sorted_keys(map: &HashMap<String, Value>) -> Vec<&str> {
    let mut v: Vec<&str> = map.keys().map(|s| s.as_str()).collect();
    v.sort_unstable();
    v
}

/// ----------------------- DTOs for input shape -----------------------

#[derive(Deserialize)]
struct TomlConfigRoot {
    config_version: String,
    debug_log: Option<String>,

    #[serde(default)]
    input: Option<InputDto>,

    #[serde(default)]
    output: Option<OutputDto>,

    #[serde(default)]
    decoder: Option<DecoderDto>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[derive(Deserialize)]
struct InputDto {
    source: Option<InputSource>,
    udp_bind: Option<String>,
    file: Option<String>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[derive(Deserialize)]
struct OutputDto {
    sink: Option<ReportSinkKind>,
    udp_target: Option<String>,
    tcp_target: Option<String>,
    file: Option<String>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

#[derive(Deserialize)]
struct DecoderDto {
    rm_single_error_correction: Option<bool>,
    report_crc_failures: Option<bool>,
    uplane_frames: Option<bool>,

    #[serde(flatten)]
    extra: HashMap<String, Value>,
}
