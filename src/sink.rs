use crate::config::ConfigError;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use tracing::warn;

/// A concrete write destination for formatted lines.
///
/// Sinks are created and attached by the facade. Writes are best-effort:
/// a failed write drops that line and reports on the facade's diagnostic
/// path. Sinks flush on drop, so replacing one releases its resources.
pub struct Sink {
    writer: Box<dyn Write + Send>,
    kind: &'static str,
}

impl Sink {
    /// Console sink writing to standard error.
    pub(crate) fn console() -> Self {
        Self {
            writer: Box::new(io::stderr()),
            kind: "console",
        }
    }

    /// File sink; the file is created or truncated on open.
    pub(crate) fn file(path: &Path) -> Result<Self, ConfigError> {
        let file = File::create(path).map_err(|source| ConfigError::OpenFile {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            writer: Box::new(file),
            kind: "file",
        })
    }

    /// Sink over a caller-supplied writer, e.g. a capture buffer.
    pub(crate) fn from_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer,
            kind: "custom",
        }
    }

    /// Write one formatted line and flush.
    pub(crate) fn write_line(&mut self, line: &str) {
        let result = self
            .writer
            .write_all(line.as_bytes())
            .and_then(|_| self.writer.flush());
        if let Err(e) = result {
            warn!("dropped log line on {} sink: {}", self.kind, e);
        }
    }

    pub(crate) fn flush(&mut self) {
        if let Err(e) = self.writer.flush() {
            warn!("failed to flush {} sink: {}", self.kind, e);
        }
    }
}

impl Drop for Sink {
    fn drop(&mut self) {
        self.flush();
    }
}

impl std::fmt::Debug for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sink").field("kind", &self.kind).finish()
    }
}

/// `log::Log` implementation that swallows every record.
struct DiscardLogger;

impl log::Log for DiscardLogger {
    fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
        false
    }

    fn log(&self, _record: &log::Record<'_>) {}

    fn flush(&self) {}
}

/// Silence the global `log` facade for the rest of the process.
///
/// Installs a discard logger if none is set yet, and forces the global max
/// level to `Off` so `log::info!` and friends become no-ops even when
/// another logger was installed first.
pub(crate) fn suppress_standard_logger() {
    let _ = log::set_boxed_logger(Box::new(DiscardLogger));
    log::set_max_level(log::LevelFilter::Off);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_file_sink_truncates_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sim.log");
        std::fs::write(&path, "leftover from a previous run\n").unwrap();

        let mut sink = Sink::file(&path).unwrap();
        sink.write_line("INFO\tfresh\n");
        drop(sink);

        let mut contents = String::new();
        File::open(&path)
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "INFO\tfresh\n");
    }

    #[test]
    fn test_file_sink_rejects_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("sim.log");

        match Sink::file(&path) {
            Err(ConfigError::OpenFile { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected OpenFile, got {:?}", other),
        }
    }

    /// A failed write drops the line without panicking and reports on the
    /// diagnostic path.
    #[test]
    fn test_write_failure_is_best_effort() {
        use parking_lot::Mutex;
        use std::sync::Arc;

        #[derive(Clone, Default)]
        struct Capture(Arc<Mutex<Vec<u8>>>);

        impl Write for Capture {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let capture = Capture::default();
        let diagnostics = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || diagnostics.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut sink = Sink::from_writer(Box::new(FailingWriter));
            sink.write_line("INFO\tlost\n");
        });

        let report = String::from_utf8_lossy(&capture.0.lock()).into_owned();
        assert!(report.contains("dropped log line"), "got: {}", report);
        assert!(report.contains("disk full"), "got: {}", report);
    }
}
