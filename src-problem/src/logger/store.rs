//! In-memory logger.

use std::collections::BTreeMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use super::{Always, LogInfo, LogRecord, Logger, Trigger};
use crate::structures::MetaData;

/// Identifies one run: attaching the logger or resetting the problem starts a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RunKey {
	pub problem_id: i32,
	pub instance: i32,
	pub dimension: usize,
	pub run: usize,
}

#[derive(Default)]
struct Inner {
	meta_data: Option<MetaData>,
	current: Option<RunKey>,
	data: BTreeMap<RunKey, Vec<LogRecord>>,
}

impl Inner {
	fn next_run(&self, meta_data: &MetaData) -> RunKey {
		let run = self
			.data
			.keys()
			.filter(|k| k.problem_id == meta_data.problem_id() && k.instance == meta_data.instance())
			.filter(|k| k.dimension == meta_data.n_variables())
			.count();
		RunKey {
			problem_id: meta_data.problem_id(),
			instance: meta_data.instance(),
			dimension: meta_data.n_variables(),
			run,
		}
	}
}

/// Keeps every triggered record, grouped by run.
pub struct Store {
	trigger: Box<dyn Trigger>,
	inner: Mutex<Inner>,
}

impl Default for Store {
	fn default() -> Self {
		Self::new(Box::new(Always))
	}
}

impl Store {
	pub fn new(trigger: Box<dyn Trigger>) -> Self {
		Self { trigger, inner: Mutex::new(Inner::default()) }
	}

	pub fn runs(&self) -> Vec<RunKey> {
		self.lock().data.keys().copied().collect()
	}

	pub fn records(&self, key: &RunKey) -> Vec<LogRecord> {
		self.lock().data.get(key).cloned().unwrap_or_default()
	}

	/// Records of the run currently being written, if any.
	pub fn current_records(&self) -> Vec<LogRecord> {
		let inner = self.lock();
		inner.current.and_then(|k| inner.data.get(&k).cloned()).unwrap_or_default()
	}

	pub fn len(&self) -> usize {
		self.lock().data.values().map(Vec::len).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn to_json(&self) -> serde_json::Result<String> {
		let inner = self.lock();
		let runs: Vec<(&RunKey, &Vec<LogRecord>)> = inner.data.iter().collect();
		serde_json::to_string(&runs)
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
		self.inner.lock().unwrap_or_else(|e| e.into_inner())
	}
}

impl Logger for Store {
	fn attach(&self, meta_data: &MetaData) {
		let mut inner = self.lock();
		inner.meta_data = Some(meta_data.clone());
		inner.current = None;
		self.trigger.reset();
	}

	fn log(&self, info: &LogInfo) {
		let mut inner = self.lock();
		let Some(meta_data) = inner.meta_data.clone() else {
			log::warn!("store logger received a record before being attached");
			return;
		};
		if !self.trigger.fire(info, &meta_data) {
			return;
		}
		let key = match inner.current {
			Some(key) => key,
			None => {
				let key = inner.next_run(&meta_data);
				inner.current = Some(key);
				key
			}
		};
		inner.data.entry(key).or_default().push(LogRecord::from(info));
	}

	fn reset(&self) {
		self.lock().current = None;
		self.trigger.reset();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::logger::Each;
	use crate::structures::{OptimizationType, Solution};

	fn info(evaluations: usize) -> LogInfo {
		LogInfo {
			evaluations,
			raw_y: 1.0,
			raw_y_best: 1.0,
			transformed_y: 1.0,
			transformed_y_best: 1.0,
			y: 1.0,
			y_best: 1.0,
			x: vec![0.5, 0.5],
			violation: 0.0,
			penalty: 0.0,
			optimum: Solution::new(vec![0.0, 0.0], 0.0),
			has_improved: false,
		}
	}

	#[test]
	fn test_runs_are_split_on_reset() {
		let store = Store::default();
		let meta = MetaData::new(3, 2, "Test", 2, OptimizationType::Minimization).unwrap();
		store.attach(&meta);
		store.log(&info(1));
		store.log(&info(2));
		store.reset();
		store.log(&info(1));

		let runs = store.runs();
		assert_eq!(runs.len(), 2);
		assert_eq!(runs[0].run, 0);
		assert_eq!(runs[1].run, 1);
		assert_eq!(store.records(&runs[0]).len(), 2);
		assert_eq!(store.current_records().len(), 1);
		assert!(store.to_json().unwrap().contains("\"problem_id\":3"));
	}

	#[test]
	fn test_trigger_filters_records() {
		let store = Store::new(Box::new(Each::new(2, 2)));
		let meta = MetaData::new(1, 1, "Test", 2, OptimizationType::Minimization).unwrap();
		store.attach(&meta);
		for e in 1..=6 {
			store.log(&info(e));
		}
		let evaluations: Vec<usize> = store.current_records().iter().map(|r| r.evaluations).collect();
		assert_eq!(evaluations, vec![2, 4, 6]);
	}

	#[test]
	fn test_unattached_store_ignores_records() {
		let store = Store::default();
		store.log(&info(1));
		assert!(store.is_empty());
	}
}
