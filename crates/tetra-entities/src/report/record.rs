use std::io::Write;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use serde::ser::{Serialize, SerializeMap, Serializer};
use tetra_core::{BitBuffer, TdmaTime};

/// Value of a report field
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum ReportValue {
    Str(String),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F64(f64),
    /// Binary data rendered as "0a 1b ..."
    Hex(String),
}

impl ReportValue {
    pub fn hex(buf: &BitBuffer) -> Self {
        ReportValue::Hex(buf.dump_hex())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ReportValue::Str(s) | ReportValue::Hex(s) => Some(s),
            _ => None,
        }
    }

    /// Integer value, whatever its width
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            ReportValue::U8(v) => Some(v as u64),
            ReportValue::U16(v) => Some(v as u64),
            ReportValue::U32(v) => Some(v as u64),
            ReportValue::U64(v) => Some(v),
            _ => None,
        }
    }
}

impl From<&str> for ReportValue {
    fn from(v: &str) -> Self {
        ReportValue::Str(v.to_string())
    }
}

impl From<String> for ReportValue {
    fn from(v: String) -> Self {
        ReportValue::Str(v)
    }
}

impl From<u8> for ReportValue {
    fn from(v: u8) -> Self {
        ReportValue::U8(v)
    }
}

impl From<u16> for ReportValue {
    fn from(v: u16) -> Self {
        ReportValue::U16(v)
    }
}

impl From<u32> for ReportValue {
    fn from(v: u32) -> Self {
        ReportValue::U32(v)
    }
}

impl From<u64> for ReportValue {
    fn from(v: u64) -> Self {
        ReportValue::U64(v)
    }
}

impl From<f64> for ReportValue {
    fn from(v: f64) -> Self {
        ReportValue::F64(v)
    }
}

/// Fields every report starts with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportHeader {
    pub time: TdmaTime,
    pub ssi: u32,
    pub usage_marker: u8,
}

/// Structured result of parsing one PDU, sent to the report sink.
/// Fields keep their insertion order; adding an existing field replaces its value.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    fields: Vec<(String, ReportValue)>,
}

impl Report {
    pub fn new(service: &str, pdu: &str, header: &ReportHeader) -> Self {
        let mut report = Self { fields: Vec::with_capacity(16) };
        report.add("service", service);
        report.add("pdu", pdu);
        report.add("tn", header.time.t);
        report.add("fn", header.time.f);
        report.add("mn", header.time.m);
        report.add("ssi", header.ssi);
        report.add("usage marker", header.usage_marker);
        report
    }

    pub fn add(&mut self, field: &str, value: impl Into<ReportValue>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| name == field) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((field.to_string(), value)),
        }
    }

    pub fn add_hex(&mut self, field: &str, buf: &BitBuffer) {
        self.add(field, ReportValue::hex(buf));
    }

    /// Add binary data as zlib compressed, base64 encoded string, preceded by
    /// the "uzsize" and "zsize" fields
    pub fn add_compressed(&mut self, field: &str, data: &[u8]) {
        let mut encoder = ZlibEncoder::new(Vec::with_capacity(data.len()), Compression::default());
        let compressed = match encoder.write_all(data).and_then(|_| encoder.finish()) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("report_add_compressed: zlib failed for {}: {}", field, e);
                return;
            }
        };
        self.add("uzsize", data.len() as u32);
        self.add("zsize", compressed.len() as u32);
        self.add(field, BASE64.encode(&compressed));
    }

    pub fn get(&self, field: &str) -> Option<&ReportValue> {
        self.fields.iter().find(|(name, _)| name == field).map(|(_, v)| v)
    }

    pub fn fields(&self) -> &[(String, ReportValue)] {
        &self.fields
    }

    pub fn service(&self) -> &str {
        self.get("service").and_then(ReportValue::as_str).unwrap_or("")
    }

    pub fn pdu(&self) -> &str {
        self.get("pdu").and_then(ReportValue::as_str).unwrap_or("")
    }

    /// One JSON object followed by a newline
    pub fn to_json_line(&self) -> String {
        match serde_json::to_string(self) {
            Ok(mut s) => {
                s.push('\n');
                s
            }
            Err(e) => {
                tracing::error!("failed to serialize report {}/{}: {}", self.service(), self.pdu(), e);
                String::new()
            }
        }
    }
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
