//! Records and recorders.
//!
//! Agents report what happens inside a step through a [`Recorder`], the injectable
//! logging sink of this library. A [`Record`] is a set of named values; the recorder
//! decides what is kept:
//!
//! * [`NullRecorder`] - discards everything. The default of all agents.
//! * [`BufferedRecorder`] - keeps every record in order.
//! * [`LatestRecorder`] - keeps only the most recent record.
//!
//! [`RecordPolicy`] selects one of them from a configuration file. Whatever a recorder
//! holds can be written to a JSON file with [`Recorder::dump`].
//!
//! ```rust
//! use aiq_core::record::{Record, RecordValue, BufferedRecorder, Recorder};
//!
//! let mut recorder = BufferedRecorder::new();
//! let mut record = Record::empty();
//! record.insert("Q_value", RecordValue::Scalar(0.5));
//! record.insert("state", RecordValue::Integer(3));
//! recorder.write(record);
//!
//! assert_eq!(recorder.records().len(), 1);
//! assert_eq!(recorder.records()[0].get_integer("state").unwrap(), 3);
//! ```
mod base;
mod buffered_recorder;
mod latest_recorder;
mod null_recorder;
mod recorder;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use latest_recorder::LatestRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::{RecordPolicy, Recorder};
