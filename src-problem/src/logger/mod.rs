//! Observers notified by a problem after every accepted evaluation.
//!
//! A problem holds its logger as an `Arc<dyn Logger>` it does not own: the
//! caller keeps a handle to read results back. Loggers therefore take `&self`
//! and keep their records behind a lock.

mod csv_logger;
mod store;
mod triggers;

pub use csv_logger::CsvLogger;
pub use store::{RunKey, Store};
pub use triggers::{All, Always, Any, At, Each, OnImprovement, Trigger};

use serde::{Deserialize, Serialize};

use crate::structures::{MetaData, Solution};

/// Snapshot handed to a logger once per accepted evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogInfo {
	pub evaluations: usize,
	/// Raw objective value of the latest call, before objective transforms
	pub raw_y: f64,
	pub raw_y_best: f64,
	/// After objective transforms, before constraint penalties
	pub transformed_y: f64,
	pub transformed_y_best: f64,
	/// Value returned to the caller
	pub y: f64,
	pub y_best: f64,
	/// Latest candidate as passed by the caller
	pub x: Vec<f64>,
	pub violation: f64,
	pub penalty: f64,
	pub optimum: Solution<f64>,
	pub has_improved: bool,
}

/// One row kept by the file and memory loggers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
	pub evaluations: usize,
	pub raw_y: f64,
	pub y: f64,
	pub y_best: f64,
	pub x: Vec<f64>,
}

impl From<&LogInfo> for LogRecord {
	fn from(info: &LogInfo) -> Self {
		Self { evaluations: info.evaluations, raw_y: info.raw_y, y: info.y, y_best: info.y_best, x: info.x.clone() }
	}
}

pub trait Logger: Send + Sync {
	/// Called when the logger is attached to a problem.
	fn attach(&self, meta_data: &MetaData);
	fn log(&self, info: &LogInfo);
	/// Called when the problem starts a new run.
	fn reset(&self);

	/// Called when the logger is detached.
	fn flush(&self) {}
}
