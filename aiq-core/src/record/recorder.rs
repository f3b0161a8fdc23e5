use super::{BufferedRecorder, LatestRecorder, NullRecorder, Record};
use crate::util::timestamped_path;
use anyhow::Result;
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};

/// Sink of the records emitted by an agent.
pub trait Recorder {
    /// Writes a record to the [`Recorder`].
    fn write(&mut self, record: Record);

    /// Records currently held by the recorder, oldest first.
    fn records(&self) -> &[Record];

    /// Discards all held records.
    fn clear(&mut self);

    /// Writes the held records as a pretty-printed JSON array to `path`.
    fn save_json(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self.records())?;
        info!("Save {} records into {}", self.records().len(), path.display());
        Ok(())
    }

    /// Writes the held records into `dir` with a file name made of `name` and the current time.
    ///
    /// The directory is created if it does not exist. Returns the path of the written file.
    fn dump(&self, dir: &Path, name: &str) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = timestamped_path(dir, name, "json");
        self.save_json(&path)?;
        Ok(path)
    }
}

/// Selects the [`Recorder`] an agent is built with.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
pub enum RecordPolicy {
    /// Records are discarded.
    #[default]
    Disabled,

    /// Every record is appended to an ordered log.
    AppendLog,

    /// Only the most recent record is kept.
    LatestOnly,
}

impl RecordPolicy {
    /// Builds the recorder implementing this policy.
    pub fn build(&self) -> Box<dyn Recorder> {
        match self {
            Self::Disabled => Box::new(NullRecorder {}),
            Self::AppendLog => Box::new(BufferedRecorder::new()),
            Self::LatestOnly => Box::new(LatestRecorder::new()),
        }
    }
}
