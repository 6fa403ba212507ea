use clap::Parser;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, ErrorKind, Read};
use std::net::UdpSocket;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tetra_config::{DecoderConfig, InputSource, ReportSinkKind, SharedConfig, toml_config};
use tetra_core::debug;
use tetra_entities::TetraDecoder;
use tetra_entities::report::{NullSink, ReportSink, TcpSink, UdpSink, WriteSink, spawn_writer_thread};

/// Largest datagram accepted on the UDP symbol input
const UDP_RECV_BUF: usize = 65536;
/// How often a blocking UDP receive wakes up to check for Ctrl+C
const UDP_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Load configuration file
fn load_config_from_toml(cfg_path: &str) -> SharedConfig {
    match toml_config::from_file(cfg_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration from {}: {}", cfg_path, e);
            std::process::exit(1);
        }
    }
}

/// Config file values, overridden by any command line flags
fn build_config(args: &Args) -> SharedConfig {
    let base = match &args.config {
        Some(path) => load_config_from_toml(path).config(),
        None => Arc::new(DecoderConfig::default()),
    };

    let mut cfg = DecoderConfig::clone(&base);
    if let Some(input) = &args.input {
        cfg.input.source = if input == "-" { InputSource::Stdin } else { InputSource::File };
        cfg.input.file = Some(input.clone());
    }
    if let Some(output) = &args.output {
        if output == "-" {
            cfg.output.sink = ReportSinkKind::Stdout;
        } else {
            cfg.output.sink = ReportSinkKind::File;
            cfg.output.file = Some(output.clone());
        }
    }
    if let Err(e) = cfg.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }
    SharedConfig::from_config(cfg)
}

fn open_sink(cfg: &DecoderConfig) -> io::Result<Box<dyn ReportSink>> {
    let output = &cfg.output;
    let sink: Box<dyn ReportSink> = match output.sink {
        ReportSinkKind::Udp => Box::new(UdpSink::new(output.udp_target.as_str())?),
        ReportSinkKind::Tcp => Box::new(TcpSink::connect(output.tcp_target.as_str())?),
        ReportSinkKind::File => {
            let path = output.file.as_deref().unwrap_or_default();
            let file = File::options().create(true).append(true).open(path)?;
            Box::new(WriteSink::new(BufWriter::new(file)))
        }
        ReportSinkKind::Stdout => Box::new(WriteSink::new(io::stdout())),
        ReportSinkKind::None => Box::new(NullSink),
    };
    Ok(sink)
}

/// Feeds every byte of `reader` to the decoder, until end of stream or Ctrl+C
fn run_reader<R: Read>(decoder: &mut TetraDecoder, mut reader: R, running: &AtomicBool) -> io::Result<()> {
    let mut buf = [0u8; 4096];
    while running.load(Ordering::SeqCst) {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        decoder.rx_symbols(&buf[..n]);
    }
    Ok(())
}

/// Feeds every received datagram to the decoder, until Ctrl+C
fn run_udp(decoder: &mut TetraDecoder, bind: &str, running: &AtomicBool) -> io::Result<()> {
    let socket = UdpSocket::bind(bind)?;
    socket.set_read_timeout(Some(UDP_POLL_INTERVAL))?;
    tracing::info!("listening for symbols on udp {}", bind);

    let mut buf = vec![0u8; UDP_RECV_BUF];
    while running.load(Ordering::SeqCst) {
        match socket.recv(&mut buf) {
            Ok(n) => {
                decoder.rx_symbols(&buf[..n]);
            }
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut | ErrorKind::Interrupted) => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

fn run_input(decoder: &mut TetraDecoder, cfg: &DecoderConfig, running: &AtomicBool) -> io::Result<()> {
    match cfg.input.source {
        InputSource::Udp => run_udp(decoder, &cfg.input.udp_bind, running),
        InputSource::File => {
            let path = cfg.input.file.as_deref().unwrap_or_default();
            tracing::info!("reading symbols from {}", path);
            run_reader(decoder, BufReader::new(File::open(path)?), running)
        }
        InputSource::Stdin => run_reader(decoder, io::stdin().lock(), running),
    }
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "TETRA downlink decoder",
    long_about = "Decodes a demodulated TETRA downlink bit stream (one byte per bit) into JSON reports"
)]
struct Args {
    /// TOML config with input, output and decoder settings
    #[arg(short, long)]
    config: Option<String>,

    /// Read symbols from this file instead of the configured input ("-" for stdin)
    #[arg(short, long)]
    input: Option<String>,

    /// Append reports to this file instead of the configured sink ("-" for stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// Log everything down to trace level
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    eprintln!("░▀█▀░█▀▀░▀█▀░█▀▄░█▀█░░░░░█▀▄░█▀▀░█▀▀░█▀█░█▀▄░█▀▀░█▀▄");
    eprintln!("░░█░░█▀▀░░█░░█▀▄░█▀█░▄▄▄░█░█░█▀▀░█░░░█░█░█░█░█▀▀░█▀▄");
    eprintln!("░░▀░░▀▀▀░░▀░░▀░▀░▀░▀░░░░░▀▀░░▀▀▀░▀▀▀░▀▀▀░▀▀░░▀▀▀░▀░▀\n");
    eprintln!("    Wouter Bokslag / Midnight Blue");
    eprintln!(" -> https://midnightblue.nl");
    eprintln!(" -> version {}\n", tetra_core::STACK_VERSION);

    let args = Args::parse();
    let cfg = build_config(&args).config();

    let _log_guard = if args.verbose {
        debug::setup_logging_verbose();
        None
    } else {
        match debug::setup_logging_default(cfg.debug_log.clone()) {
            Ok(guard) => guard,
            Err(e) => {
                eprintln!("Failed to open debug log: {}", e);
                std::process::exit(1);
            }
        }
    };

    let sink = match open_sink(&cfg) {
        Ok(sink) => sink,
        Err(e) => {
            tracing::error!("failed to set up {:?} report sink: {}", cfg.output.sink, e);
            std::process::exit(1);
        }
    };
    let (channel, writer) = match spawn_writer_thread(sink) {
        Ok(w) => w,
        Err(e) => {
            tracing::error!("failed to start report writer: {}", e);
            std::process::exit(1);
        }
    };

    // Set up Ctrl+C handler for graceful shutdown, a second Ctrl+C exits immediately
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        if !r.swap(false, Ordering::SeqCst) {
            std::process::exit(130);
        }
    }) {
        tracing::warn!("failed to set Ctrl+C handler: {}", e);
    }

    let mut decoder = TetraDecoder::new(cfg.decoder.clone(), Box::new(channel));
    let result = run_input(&mut decoder, &cfg, &running);
    tracing::info!("decoded {} bursts", decoder.num_bursts());

    // Dropping the decoder closes the channel, the writer then flushes and exits
    decoder.flush();
    drop(decoder);
    if writer.join().is_err() {
        tracing::error!("report writer panicked");
    }

    if let Err(e) = result {
        tracing::error!("symbol input failed: {}", e);
        std::process::exit(1);
    }
}
