use super::{Record, Recorder};

/// Buffered recorder.
///
/// Keeps every written record in order, e.g. the per-step snapshots of an agent.
#[derive(Debug, Default)]
pub struct BufferedRecorder {
    buf: Vec<Record>,
}

impl BufferedRecorder {
    /// Construct the recorder.
    pub fn new() -> Self {
        Self { buf: Vec::default() }
    }
}

impl Recorder for BufferedRecorder {
    /// Write a [`Record`] to the buffer.
    fn write(&mut self, record: Record) {
        self.buf.push(record);
    }

    fn records(&self) -> &[Record] {
        &self.buf
    }

    fn clear(&mut self) {
        self.buf.clear();
    }
}
