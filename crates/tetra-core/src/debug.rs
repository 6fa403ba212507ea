use core::fmt;
use std::sync::Once;
use std::fs::OpenOptions;
use std::io;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt as tracingfmt, EnvFilter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::fmt::format::{self, FormatEvent, FormatFields};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::registry::LookupSpan;


#[macro_export]
macro_rules! unimplemented_log {
    ( $($arg:tt)* ) => {{
        tracing::warn!(
            "unimplemented: {}",
            format_args!($($arg)*),
        );
    }};
}

/// if `cond` is false, logs a warning with your message.
#[macro_export]
macro_rules! assert_warn {
    ($cond:expr, $($arg:tt)+) => {{
        if !$cond {
            tracing::warn!(
                target: module_path!(),
                "assertion warning: `{}` failed: {} at {}:{}",
                stringify!($cond),
                format_args!($($arg)+),
                file!(),
                line!(),
            );
        }
    }};
}

/// Formats events as "LEVEL ts [crate/module] file:line: message", with messages aligned
struct AlignedFormatter;

/// Width of the location column, the message starts after it
const LOCATION_WIDTH: usize = 64;

/// Visitor to extract the ts field value
struct TsVisitor {
    ts: Option<String>,
}

impl tracing::field::Visit for TsVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "ts" {
            self.ts = Some(format!("{:?}", value));
        }
    }
}

fn level_color(level: &tracing::Level) -> &'static str {
    match *level {
        tracing::Level::ERROR => "\x1b[31m",
        tracing::Level::WARN => "\x1b[33m",
        tracing::Level::INFO => "\x1b[32m",
        tracing::Level::DEBUG => "\x1b[34m",
        tracing::Level::TRACE => "\x1b[35m",
    }
}

/// "crates/tetra-entities/src/cmce/sds/text.rs" becomes "[entities/cmce] text.rs"
fn short_location(file_path: &str) -> String {
    let Some(src_idx) = file_path.find("/src/") else {
        return file_path.to_string();
    };
    let before_src = &file_path[..src_idx];
    let after_src = &file_path[src_idx + 5..];
    let crate_name = match before_src.rfind("tetra-") {
        Some(idx) => &before_src[idx + 6..],
        None => before_src.rsplit('/').next().unwrap_or("unknown"),
    };
    match after_src.rsplit_once('/') {
        Some((module_path, filename)) => {
            let first_module = module_path.split('/').next().unwrap_or("");
            format!("[{}/{}] {}", crate_name, first_module, filename)
        }
        None => format!("[{}] {}", crate_name, after_src),
    }
}

/// Removes the "ts=..." field that fmt rendered into the message
fn strip_ts_field(message: &mut String) {
    if let Some(ts_idx) = message.find("ts=") {
        match message[ts_idx..].find(' ') {
            Some(space_idx) => message.replace_range(ts_idx..ts_idx + space_idx + 1, ""),
            None => message.truncate(ts_idx),
        }
    }
}

impl<S, N> FormatEvent<S, N> for AlignedFormatter
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();

        let mut visitor = TsVisitor { ts: None };
        event.record(&mut visitor);

        let location = format!(
            "{}{:<5}\x1b[0m {:>7} {}:{}:",
            level_color(metadata.level()),
            metadata.level(),
            visitor.ts.as_deref().unwrap_or(""),
            short_location(metadata.file().unwrap_or("unknown")),
            metadata.line().unwrap_or(0)
        );

        let mut message = String::new();
        ctx.field_format().format_fields(format::Writer::new(&mut message), event)?;
        if visitor.ts.is_some() {
            strip_ts_field(&mut message);
        }

        // Primitive traces ("-> ...") are indented slightly less
        let width = if message.starts_with("->") { LOCATION_WIDTH - 3 } else { LOCATION_WIDTH };
        writeln!(writer, "{:<width$} {}", location, message, width = width)
    }
}

static INIT_LOG: Once = Once::new();

/// Sets up logging with maximum verbosity (trace level)
/// Mainly for unit tests and the --verbose flag
pub fn setup_logging_verbose() {
    // Stderr only, cannot fail
    let _ = setup_logging(EnvFilter::new("trace"), None);
}

/// Sets up default logging to stderr and optionally, a verbose log file
/// Returns a guard, that needs to be kept alive for logging to file to work
pub fn setup_logging_default(verbose_logfile: Option<String>) -> io::Result<Option<WorkerGuard>> {
    let logfile_and_filter = verbose_logfile.map(|file| (file, get_default_logfile_filter()));
    setup_logging(get_default_console_filter(), logfile_and_filter)
}

pub fn get_default_console_filter() -> EnvFilter {
    EnvFilter::new(concat!(
        "info",
        // Hide continuous logs from lower layers
        ",tetra_entities::messagerouter=warn",
        ",tetra_core::bitbuffer=warn",
        ",tetra_entities::phy=info",
        ",tetra_entities::lmac=info",
        ",tetra_entities::umac=info",
        ",tetra_entities::llc=info",
        // Higher layers
        ",tetra_entities::mle=debug",
        ",tetra_entities::cmce=debug",
        ",tetra_entities::sndcp=debug",
        ",tetra_entities::mm=debug",
    ))
}

fn get_default_logfile_filter() -> EnvFilter {
    EnvFilter::new("debug")
}

/// Sets up logging to stderr and optionally, a verbose log file
/// If an output file is requested, returns Some<WorkerGuard>. Keep this value alive
/// or logging to file may cease working. If no output file is provided, returns None.
/// Reports may be written to stdout, so the console layer always goes to stderr.
fn setup_logging(console_filter: EnvFilter, outfile: Option<(String, EnvFilter)>) -> io::Result<Option<WorkerGuard>> {
    if let Some((outfile, outfile_filter)) = outfile {
        let file = OpenOptions::new().create(true).append(true).open(outfile)?;
        let (file_writer, guard) = tracing_appender::non_blocking(file);

        // Setup once
        INIT_LOG.call_once(|| {
            let file_layer = tracingfmt::layer()
                .event_format(AlignedFormatter)
                .with_writer(file_writer)
                .with_ansi(false);

            let console_layer = tracingfmt::layer().event_format(AlignedFormatter).with_writer(io::stderr);

            tracing_subscriber::registry()
                .with(file_layer.with_filter(outfile_filter))
                .with(console_layer.with_filter(console_filter))
                .init();
        });

        Ok(Some(guard))
    } else {
        // Setup once
        INIT_LOG.call_once(|| {
            let console_layer = tracingfmt::layer().event_format(AlignedFormatter).with_writer(io::stderr);

            tracing_subscriber::registry()
                .with(console_layer.with_filter(console_filter))
                .init();
        });
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_location() {
        assert_eq!(short_location("crates/tetra-entities/src/cmce/sds/text.rs"), "[entities/cmce] text.rs");
        assert_eq!(short_location("crates/tetra-core/src/bitbuffer.rs"), "[core] bitbuffer.rs");
        assert_eq!(short_location("main.rs"), "main.rs");
    }

    #[test]
    fn test_strip_ts_field() {
        let mut m = String::from("ts=1/02/03 SYNC cc=1");
        strip_ts_field(&mut m);
        assert_eq!(m, "SYNC cc=1");
    }
}
