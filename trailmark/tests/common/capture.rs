use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;
use trailmark::{Hook, LogFormat, Logger, RequestIdHook, Verbosity, all_levels};

/// Collects everything a [`Logger`] writes, for later inspection.
#[derive(Clone, Default)]
pub struct Capture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Capture {
    /// Builds a logger that writes into a fresh capture, with the
    /// [`RequestIdHook`] attached at all levels.
    pub fn logger(verbosity: impl Into<Verbosity>, format: LogFormat) -> (Logger, Capture) {
        Self::logger_with_hooks(
            verbosity,
            format,
            vec![Arc::new(RequestIdHook::new(all_levels())) as Arc<dyn Hook>],
        )
    }

    /// Builds a logger that writes into a fresh capture, with the given hooks.
    pub fn logger_with_hooks(
        verbosity: impl Into<Verbosity>,
        format: LogFormat,
        hooks: Vec<Arc<dyn Hook>>,
    ) -> (Logger, Capture) {
        let capture = Capture::default();
        let logger = Logger::builder()
            .verbosity(verbosity)
            .format(format)
            .hooks(hooks)
            .writer(capture.clone())
            .build();

        (logger, capture)
    }

    /// Returns everything written so far.
    pub fn output(&self) -> String {
        let buffer = self.buffer.lock().unwrap();

        String::from_utf8(buffer.clone()).unwrap()
    }

    /// Returns everything written so far, one entry per line.
    pub fn lines(&self) -> Vec<String> {
        self.output().lines().map(str::to_string).collect()
    }
}

/// A single handle onto the shared capture buffer.
pub struct CaptureWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Capture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter {
            buffer: self.buffer.clone(),
        }
    }
}
