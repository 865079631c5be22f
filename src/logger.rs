//! C10: the logger. Installs a `tracing_subscriber` layer whose format timer
//! produces `[YYYY-MM-DD HH:MM:SS.mmm]` and whose writer tees every line to
//! stdout and to a log file truncated at start.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use chrono::Local;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::time::FormatTime;

/// Millisecond-precision local-time timestamp, `[YYYY-MM-DD HH:MM:SS.mmm]`.
pub struct MillisLocalTime;

impl FormatTime for MillisLocalTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "[{}]", Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Writes every line to both stdout and a truncated log file.
pub struct DualWriter {
    file: Mutex<File>,
}

impl DualWriter {
    pub fn open(prefix: impl AsRef<Path>) -> io::Result<Self> {
        let path = prefix.as_ref().with_extension("log");
        let file = File::create(path)?;
        Ok(Self { file: Mutex::new(file) })
    }
}

pub struct DualWriterHandle<'a> {
    writer: &'a DualWriter,
}

impl Write for DualWriterHandle<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write_all(buf)?;
        self.writer
            .file
            .lock()
            .expect("log file mutex poisoned")
            .write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()?;
        self.writer.file.lock().expect("log file mutex poisoned").flush()
    }
}

impl<'a> MakeWriter<'a> for DualWriter {
    type Writer = DualWriterHandle<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        DualWriterHandle { writer: self }
    }
}

/// Installs the global subscriber: the mandated console format, verbosity
/// filterable via `RUST_LOG` (`tracing_subscriber::EnvFilter`).
pub fn install(log_prefix: impl AsRef<Path>) -> io::Result<()> {
    let writer = DualWriter::open(log_prefix)?;
    tracing_subscriber::fmt()
        .with_timer(MillisLocalTime)
        .with_writer(writer)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(false)
        .init();
    Ok(())
}
