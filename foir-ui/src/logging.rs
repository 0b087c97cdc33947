//! Log output for the `foir` binary.
//!
//! Records go to stderr so they never interleave with results on stdout.
//! The level starts from `RUST_LOG` (or [`DEFAULT_FILTER`]) and a log file
//! can be attached once the configuration has been read.

use anyhow::Result;
use chrono::Local;
use std::{
    fs::File,
    io::{self, IsTerminal, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

/// Filter used when `RUST_LOG` is unset and no level is configured.
pub const DEFAULT_FILTER: &str = "warn";

// --- Formatter ---

/// `<local time> <LEVEL> <target> <message and fields>`
struct LineFormat;

fn level_color(level: Level) -> &'static str {
    match level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let stamp = Local::now().format("%H:%M:%S%.3f");

        if writer.has_ansi_escapes() {
            write!(
                writer,
                "\x1b[2m{stamp}\x1b[0m {}{:>5}\x1b[0m \x1b[36m{}\x1b[0m ",
                level_color(*meta.level()),
                meta.level(),
                meta.target()
            )?;
        } else {
            write!(writer, "{stamp} {:>5} {} ", meta.level(), meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// --- Log file ---

/// Writer for the optional log file. Writes are dropped until a file is
/// attached.
#[derive(Clone, Default)]
struct LogFile(Arc<Mutex<Option<File>>>);

impl LogFile {
    fn lock(&self) -> MutexGuard<'_, Option<File>> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

struct LogFileWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for LogFileWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        match &mut *self.0 {
            Some(f) => f.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut *self.0 {
            Some(f) => f.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogFileWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileWriter(self.lock())
    }
}

// --- Control ---

/// Adjusts the installed subscriber after configuration is known.
pub struct LogControl {
    level: reload::Handle<EnvFilter, Registry>,
    file: LogFile,
}

impl LogControl {
    /// Replaces the active filter. Accepts a bare level such as `debug` or
    /// any `EnvFilter` directive such as `foir_ui::session=trace`.
    pub fn set_level(
        &self,
        directives: &str,
    ) -> Result<()> {
        let filter = EnvFilter::try_new(directives)
            .map_err(|e| anyhow::anyhow!("invalid log level '{directives}': {e}"))?;
        self.level
            .reload(filter)
            .map_err(|e| anyhow::anyhow!("cannot change log level: {e}"))
    }

    /// Appends every record to `path` from now on, creating the file if
    /// needed. The directory must already exist.
    pub fn attach_file(
        &self,
        path: &Path,
    ) -> Result<()> {
        let file = File::options()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| anyhow::anyhow!("cannot open log file '{}': {e}", path.display()))?;
        *self.file.lock() = Some(file);
        Ok(())
    }
}

/// Builds the subscriber: one level filter in front of a console layer
/// writing to `console` and a file layer.
fn build<W>(
    filter: EnvFilter,
    console: W,
    ansi: bool,
) -> (impl Subscriber + Send + Sync, LogControl)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let (level_layer, level) = reload::Layer::new(filter);
    let file = LogFile::default();

    let subscriber = tracing_subscriber::registry()
        .with(level_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(LineFormat)
                .with_ansi(ansi)
                .with_writer(console),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(LineFormat)
                .with_ansi(false)
                .with_writer(file.clone()),
        );

    (subscriber, LogControl { level, file })
}

/// Installs the global subscriber. Call once, before anything logs.
///
/// A second call leaves the first subscriber in place; the returned control
/// then has no effect on it.
pub fn init_logging() -> LogControl {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let (subscriber, control) = build(filter, io::stderr, io::stderr().is_terminal());
    let _ = subscriber.try_init();
    control
}
