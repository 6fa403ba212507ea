use std::io::{self, Write};
use std::net::{TcpStream, ToSocketAddrs, UdpSocket};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, unbounded};

use super::record::Report;

/// Destination of the reports produced by the decoder
pub trait ReportSink: Send {
    fn send(&mut self, report: &Report);

    /// Push out anything buffered
    fn flush(&mut self) {}
}

/// Drops every report
pub struct NullSink;

impl ReportSink for NullSink {
    fn send(&mut self, _report: &Report) {}
}

/// One datagram per report
pub struct UdpSink {
    socket: UdpSocket,
}

impl UdpSink {
    pub fn new<A: ToSocketAddrs>(target: A) -> io::Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        socket.connect(target)?;
        Ok(Self { socket })
    }
}

impl ReportSink for UdpSink {
    fn send(&mut self, report: &Report) {
        if let Err(e) = self.socket.send(report.to_json_line().as_bytes()) {
            tracing::warn!("UdpSink: failed to send report: {}", e);
        }
    }
}

/// Newline separated reports on a TCP stream
pub struct TcpSink {
    stream: TcpStream,
}

impl TcpSink {
    pub fn connect<A: ToSocketAddrs>(target: A) -> io::Result<Self> {
        let stream = TcpStream::connect(target)?;
        stream.set_nodelay(true)?;
        Ok(Self { stream })
    }
}

impl ReportSink for TcpSink {
    fn send(&mut self, report: &Report) {
        if let Err(e) = self.stream.write_all(report.to_json_line().as_bytes()) {
            tracing::warn!("TcpSink: failed to send report: {}", e);
        }
    }

    fn flush(&mut self) {
        let _ = self.stream.flush();
    }
}

/// Newline separated reports on any writer, such as a file or stdout
pub struct WriteSink<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> WriteSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> ReportSink for WriteSink<W> {
    fn send(&mut self, report: &Report) {
        if let Err(e) = self.writer.write_all(report.to_json_line().as_bytes()) {
            tracing::warn!("WriteSink: failed to write report: {}", e);
        }
    }

    fn flush(&mut self) {
        if let Err(e) = self.writer.flush() {
            tracing::warn!("WriteSink: flush failed: {}", e);
        }
    }
}

/// Hands reports over to a channel. Used by tests and by the writer thread.
pub struct ChannelSink {
    tx: Sender<Report>,
}

impl ChannelSink {
    pub fn new() -> (Self, Receiver<Report>) {
        let (tx, rx) = unbounded();
        (Self { tx }, rx)
    }
}

impl ReportSink for ChannelSink {
    fn send(&mut self, report: &Report) {
        if self.tx.send(report.clone()).is_err() {
            tracing::warn!("ChannelSink: receiver gone, report dropped");
        }
    }
}

/// Moves serialization and output to a separate thread. The thread ends, after flushing
/// `sink`, once the returned ChannelSink is dropped.
pub fn spawn_writer_thread(mut sink: Box<dyn ReportSink>) -> io::Result<(ChannelSink, JoinHandle<()>)> {
    let (channel, rx) = ChannelSink::new();
    let handle = thread::Builder::new().name("report-writer".to_string()).spawn(move || {
        for report in rx.iter() {
            sink.send(&report);
        }
        sink.flush();
        tracing::debug!("report writer finished");
    })?;
    Ok((channel, handle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportHeader;
    use tetra_core::TdmaTime;

    fn report(pdu: &str) -> Report {
        let hdr = ReportHeader { time: TdmaTime::default(), ssi: 0, usage_marker: 0 };
        Report::new("MM", pdu, &hdr)
    }

    #[test]
    fn test_write_sink_lines() {
        let mut sink = WriteSink::new(Vec::new());
        sink.send(&report("D-LOCATION-UPDATE-ACCEPT"));
        sink.send(&report("D-AUTHENTICATION"));
        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("\"pdu\":\"D-AUTHENTICATION\""));
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn test_writer_thread_forwards_and_finishes() {
        let (inner, rx) = ChannelSink::new();
        let (mut front, handle) = spawn_writer_thread(Box::new(inner)).unwrap();
        front.send(&report("D-ATTACH-DETACH-GROUP-IDENTITY"));
        drop(front);
        handle.join().unwrap();
        let got: Vec<Report> = rx.try_iter().collect();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].pdu(), "D-ATTACH-DETACH-GROUP-IDENTITY");
    }

    #[test]
    fn test_udp_sink_datagram() {
        let server = UdpSocket::bind("127.0.0.1:0").unwrap();
        let mut sink = UdpSink::new(server.local_addr().unwrap()).unwrap();
        sink.send(&report("D-MM-STATUS"));
        let mut buf = [0u8; 512];
        let n = server.recv(&mut buf).unwrap();
        let text = std::str::from_utf8(&buf[..n]).unwrap();
        assert!(text.starts_with("{\"service\":\"MM\""));
        assert!(text.ends_with("}\n"));
    }
}
