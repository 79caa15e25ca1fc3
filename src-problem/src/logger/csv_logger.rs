//! CSV file logger.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{Always, LogInfo, LogRecord, Logger, Trigger};
use crate::error::ProblemError;
use crate::structures::MetaData;

struct Inner {
	meta_data: Option<MetaData>,
	path: Option<PathBuf>,
	buffer: Vec<LogRecord>,
}

/// Buffers triggered records and writes them to
/// `<dir>/<name>_i<instance>_d<dimension>.csv`.
///
/// The file is created with its header when the logger is attached; records
/// are appended on [`CsvLogger::write_pending`], on detach, on problem reset and on drop.
pub struct CsvLogger {
	directory: PathBuf,
	trigger: Box<dyn Trigger>,
	inner: Mutex<Inner>,
}

impl CsvLogger {
	/// Logger writing below `directory`, or below `$IOH_OUTPUT_DIR/logs` when `None`.
	pub fn new(directory: Option<&Path>, trigger: Box<dyn Trigger>) -> Result<Self, ProblemError> {
		let directory = iohbench_env::resolve_logs_dir(directory)?;
		log::debug!("csv logger writing to {}", directory.display());
		Ok(Self { directory, trigger, inner: Mutex::new(Inner { meta_data: None, path: None, buffer: Vec::new() }) })
	}

	/// Logger recording every evaluation.
	pub fn every_evaluation(directory: Option<&Path>) -> Result<Self, ProblemError> {
		Self::new(directory, Box::new(Always))
	}

	pub fn directory(&self) -> &Path {
		&self.directory
	}

	/// Path of the file for the attached problem.
	pub fn path(&self) -> Option<PathBuf> {
		self.lock().path.clone()
	}

	/// Writes buffered records; returns the number written.
	pub fn write_pending(&self) -> Result<usize, ProblemError> {
		let mut inner = self.lock();
		let Some(path) = inner.path.clone() else {
			return Ok(0);
		};
		if inner.buffer.is_empty() {
			return Ok(0);
		}
		let file = OpenOptions::new().append(true).open(&path)?;
		let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
		for record in &inner.buffer {
			let mut row = vec![
				record.evaluations.to_string(),
				format!("{:.16}", record.raw_y),
				format!("{:.16}", record.y),
				format!("{:.16}", record.y_best),
			];
			row.extend(record.x.iter().map(|xi| format!("{:.16}", xi)));
			writer.write_record(&row)?;
		}
		writer.flush()?;
		let written = inner.buffer.len();
		inner.buffer.clear();
		Ok(written)
	}

	fn create_file(&self, meta_data: &MetaData) -> Result<PathBuf, ProblemError> {
		let path = self.directory.join(format!(
			"{}_i{}_d{}.csv",
			meta_data.name(),
			meta_data.instance(),
			meta_data.n_variables()
		));
		let mut writer = csv::Writer::from_writer(File::create(&path)?);
		let mut header = vec!["evaluations".to_string(), "raw_y".to_string(), "y".to_string(), "y_best".to_string()];
		header.extend((0..meta_data.n_variables()).map(|i| format!("x{}", i)));
		writer.write_record(&header)?;
		writer.flush()?;
		Ok(path)
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
		self.inner.lock().unwrap_or_else(|e| e.into_inner())
	}
}

impl Logger for CsvLogger {
	fn attach(&self, meta_data: &MetaData) {
		Logger::flush(self);
		let path = match self.create_file(meta_data) {
			Ok(path) => Some(path),
			Err(e) => {
				log::error!("failed to create csv log for {}: {}", meta_data, e);
				None
			}
		};
		let mut inner = self.lock();
		inner.meta_data = Some(meta_data.clone());
		inner.path = path;
		inner.buffer.clear();
		self.trigger.reset();
	}

	/// Records are dropped while no file is open (not attached, or creation failed).
	fn log(&self, info: &LogInfo) {
		let mut inner = self.lock();
		if inner.path.is_none() {
			return;
		}
		let fired = match inner.meta_data.as_ref() {
			Some(meta_data) => self.trigger.fire(info, meta_data),
			None => return,
		};
		if fired {
			inner.buffer.push(LogRecord::from(info));
		}
	}

	fn reset(&self) {
		Logger::flush(self);
		self.trigger.reset();
	}

	fn flush(&self) {
		if let Err(e) = self.write_pending() {
			log::error!("failed to flush csv records: {}", e);
		}
	}
}

impl Drop for CsvLogger {
	fn drop(&mut self) {
		Logger::flush(self);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::logger::OnImprovement;
	use crate::structures::{OptimizationType, Solution};

	fn info(evaluations: usize, y: f64) -> LogInfo {
		LogInfo {
			evaluations,
			raw_y: y - 1.0,
			raw_y_best: y - 1.0,
			transformed_y: y,
			transformed_y_best: y,
			y,
			y_best: y,
			x: vec![0.25, -0.5],
			violation: 0.0,
			penalty: 0.0,
			optimum: Solution::new(vec![0.0, 0.0], 0.0),
			has_improved: true,
		}
	}

	#[test]
	fn test_writes_header_and_rows() {
		let tmp = tempfile::tempdir().unwrap();
		let logger = CsvLogger::every_evaluation(Some(tmp.path())).unwrap();
		let meta = MetaData::new(1, 2, "Sphere", 2, OptimizationType::Minimization).unwrap();
		logger.attach(&meta);
		logger.log(&info(1, 3.0));
		logger.log(&info(2, 2.0));
		assert_eq!(logger.write_pending().unwrap(), 2);

		let path = logger.path().unwrap();
		assert!(path.ends_with("Sphere_i2_d2.csv"));
		let content = std::fs::read_to_string(&path).unwrap();
		let lines: Vec<&str> = content.lines().collect();
		assert_eq!(lines[0], "evaluations,raw_y,y,y_best,x0,x1");
		assert_eq!(lines.len(), 3);
		assert!(lines[1].starts_with("1,2.0000000000000000,3.0000000000000000"));
	}

	#[test]
	fn test_trigger_and_reset_flush() {
		let tmp = tempfile::tempdir().unwrap();
		let logger = CsvLogger::new(Some(tmp.path()), Box::new(OnImprovement::new())).unwrap();
		let meta = MetaData::new(1, 1, "Sphere", 2, OptimizationType::Minimization).unwrap();
		logger.attach(&meta);
		logger.log(&info(1, 3.0));
		logger.log(&info(2, 4.0));
		logger.log(&info(3, 1.0));
		logger.reset();
		assert_eq!(logger.write_pending().unwrap(), 0);

		let content = std::fs::read_to_string(logger.path().unwrap()).unwrap();
		assert_eq!(content.lines().count(), 3);
	}

	#[test]
	fn test_missing_directory_does_not_buffer() {
		let tmp = tempfile::tempdir().unwrap();
		let directory = tmp.path().join("gone");
		std::fs::create_dir(&directory).unwrap();
		let logger = CsvLogger::every_evaluation(Some(directory.as_path())).unwrap();
		std::fs::remove_dir(&directory).unwrap();

		let meta = MetaData::new(1, 1, "Sphere", 2, OptimizationType::Minimization).unwrap();
		logger.attach(&meta);
		assert!(logger.path().is_none());
		for evaluations in 1..=1000 {
			logger.log(&info(evaluations, 1.0));
			logger.reset();
		}
		assert_eq!(logger.lock().buffer.len(), 0);
		assert_eq!(logger.write_pending().unwrap(), 0);
	}
}
