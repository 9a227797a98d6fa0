//! Progress bar and log routing.
//!
//! While the batch runs, tracing output is printed through the active
//! progress bar so warnings do not tear the bar apart.

use std::io::Write;
use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use parking_lot::Mutex;

use crate::types::BatchProgress;

const PROGRESS_TEMPLATE: &str =
    "Progress: [{bar:40}] {pos}/{len} || Elapsed time: {elapsed_precise}";

/// Shared handle to the progress bar currently on screen, if any
#[derive(Clone, Default)]
pub struct ProgressSlot {
    inner: Arc<Mutex<Option<ProgressBar>>>,
}

impl ProgressSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route log output through `bar` until [`ProgressSlot::clear`] is called
    pub fn set(&self, bar: ProgressBar) {
        *self.inner.lock() = Some(bar);
    }

    pub fn clear(&self) {
        *self.inner.lock() = None;
    }

    pub fn get(&self) -> Option<ProgressBar> {
        self.inner.lock().clone()
    }

    /// Print a line above the bar, or to stderr when no bar is active
    pub fn println(&self, line: &str) {
        match self.get() {
            Some(bar) => bar.println(line),
            None => eprintln!("{}", line),
        }
    }
}

/// Progress bar for `total` candidates
pub fn batch_progress_bar(total: usize) -> ProgressBar {
    let style = ProgressStyle::with_template(PROGRESS_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    let bar = ProgressBar::new(total as u64);
    bar.set_style(style);
    bar
}

/// Move the bar to the reported position
pub fn update_progress(bar: &ProgressBar, progress: &BatchProgress) {
    bar.set_position(progress.current as u64);
}

/// Line-buffered writer that forwards complete lines to a [`ProgressSlot`]
pub struct ProgressWriter {
    slot: ProgressSlot,
    buffer: Vec<u8>,
}

impl ProgressWriter {
    pub fn new(slot: ProgressSlot) -> Self {
        Self {
            slot,
            buffer: Vec::new(),
        }
    }

    fn emit(&self, bytes: &[u8]) {
        let line = String::from_utf8_lossy(bytes);
        let line = line.trim_end_matches(&['\n', '\r'][..]);
        if !line.is_empty() {
            self.slot.println(line);
        }
    }
}

impl Write for ProgressWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        while let Some(newline_pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline_pos).collect();
            self.emit(&line);
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if !self.buffer.is_empty() {
            let rest = std::mem::take(&mut self.buffer);
            self.emit(&rest);
        }
        Ok(())
    }
}

impl Drop for ProgressWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for ProgressSlot {
    type Writer = ProgressWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ProgressWriter::new(self.clone())
    }
}
