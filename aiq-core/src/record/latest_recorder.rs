use super::{Record, Recorder};

/// A recorder keeping only the last written record.
#[derive(Debug, Default)]
pub struct LatestRecorder {
    latest: Option<Record>,
}

impl LatestRecorder {
    /// Construct the recorder.
    pub fn new() -> Self {
        Self { latest: None }
    }
}

impl Recorder for LatestRecorder {
    /// Overwrite the held record.
    fn write(&mut self, record: Record) {
        self.latest = Some(record);
    }

    fn records(&self) -> &[Record] {
        self.latest.as_slice()
    }

    fn clear(&mut self) {
        self.latest = None;
    }
}
