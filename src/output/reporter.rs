//! The result stream.
//!
//! Every line the sweep prints goes through a [`Reporter`]. Each report is
//! rendered into one buffer and written with a single `write_all` under the
//! sink lock, so the answer lines of one address are never interleaved with
//! another worker's output.

use crate::config::ScanConfig;
use crate::types::CidrBlock;
use console::style;
use std::fmt::{self, Write as _};
use std::io::{self, Write};
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

type Sink = Box<dyn Write + Send>;

/// Serialized, line-oriented output sink. Clones share the same sink.
#[derive(Clone)]
pub struct Reporter {
    sink: Arc<Mutex<Sink>>,
}

impl Reporter {
    /// Write to an arbitrary sink.
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            sink: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Write to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Write into an in-memory buffer that can be read back.
    pub fn buffered() -> (Self, SharedBuffer) {
        let buffer = SharedBuffer::default();
        (Self::new(buffer.clone()), buffer)
    }

    fn emit(&self, text: &str) {
        let mut sink = match self.sink.lock() {
            Ok(sink) => sink,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = sink.write_all(text.as_bytes()).and_then(|_| sink.flush()) {
            warn!("failed to write output: {}", e);
        }
    }

    /// Startup banner with the effective configuration.
    pub fn banner(&self, config: &ScanConfig, interactive: bool) {
        let mut text = format!("{}\n", style(config).dim());
        if interactive {
            let _ = writeln!(text, "{}", style("Press Enter to stop scanning...").cyan());
        }
        self.emit(&text);
    }

    /// Announce a block and its address count before it is swept.
    pub fn range_header(&self, block: &CidrBlock) {
        self.emit(&format!("\nCIDR {} ({} IPs)\n", block, block.len()));
    }

    /// One line per answer record, written as a single block.
    pub fn answers(&self, addr: Ipv4Addr, records: &[String]) {
        if records.is_empty() {
            return;
        }
        let mut text = String::new();
        for record in records {
            let _ = writeln!(text, "{} {}", addr, record);
        }
        self.emit(&text);
    }

    /// A negative or failed lookup (verbose mode only).
    pub fn negative(&self, addr: Ipv4Addr, reason: &dyn fmt::Display) {
        self.emit(&format!("{} {}\n", addr, reason));
    }

    /// A free-form status line.
    pub fn line(&self, msg: &str) {
        self.emit(&format!("{}\n", msg));
    }

    /// Total wall-clock time of the run.
    pub fn finished(&self, elapsed: Duration) {
        self.emit(&format!("\nScan completed in {:.2?}\n", elapsed));
    }
}

impl fmt::Debug for Reporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reporter").finish_non_exhaustive()
    }
}

/// Cloneable in-memory writer, used to capture a sweep's output.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn contents(&self) -> String {
        let bytes = match self.bytes.lock() {
            Ok(bytes) => bytes,
            Err(poisoned) => poisoned.into_inner(),
        };
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Non-empty output lines.
    pub fn lines(&self) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut bytes = self
            .bytes
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "buffer lock poisoned"))?;
        bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
