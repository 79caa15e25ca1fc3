//! Conditions deciding whether a logger records an evaluation.

use std::collections::BTreeSet;
use std::sync::Mutex;

use super::LogInfo;
use crate::structures::MetaData;

pub trait Trigger: Send + Sync {
	fn fire(&self, info: &LogInfo, meta_data: &MetaData) -> bool;

	/// Forget any memory of the previous run.
	fn reset(&self) {}
}

/// Fires on every evaluation.
#[derive(Debug, Default, Clone, Copy)]
pub struct Always;

impl Trigger for Always {
	fn fire(&self, _info: &LogInfo, _meta_data: &MetaData) -> bool {
		true
	}
}

/// Fires when the reported value strictly improves on what this trigger has seen.
#[derive(Debug, Default)]
pub struct OnImprovement {
	best: Mutex<Option<f64>>,
}

impl OnImprovement {
	pub fn new() -> Self {
		Self::default()
	}
}

impl Trigger for OnImprovement {
	fn fire(&self, info: &LogInfo, meta_data: &MetaData) -> bool {
		let mut best = self.best.lock().unwrap_or_else(|e| e.into_inner());
		let improved = match *best {
			Some(b) => meta_data.optimization_type().is_better(info.y, b),
			None => !info.y.is_nan(),
		};
		if improved {
			*best = Some(info.y);
		}
		improved
	}

	fn reset(&self) {
		*self.best.lock().unwrap_or_else(|e| e.into_inner()) = None;
	}
}

/// Fires every `interval` evaluations from `starting_at` on.
#[derive(Debug, Clone, Copy)]
pub struct Each {
	pub interval: usize,
	pub starting_at: usize,
}

impl Each {
	pub fn new(interval: usize, starting_at: usize) -> Self {
		Self { interval: interval.max(1), starting_at }
	}
}

impl Trigger for Each {
	fn fire(&self, info: &LogInfo, _meta_data: &MetaData) -> bool {
		info.evaluations >= self.starting_at && (info.evaluations - self.starting_at) % self.interval == 0
	}
}

/// Fires at a fixed set of evaluation counts.
#[derive(Debug, Clone)]
pub struct At {
	pub evaluations: BTreeSet<usize>,
}

impl At {
	pub fn new<I: IntoIterator<Item = usize>>(evaluations: I) -> Self {
		Self { evaluations: evaluations.into_iter().collect() }
	}
}

impl Trigger for At {
	fn fire(&self, info: &LogInfo, _meta_data: &MetaData) -> bool {
		self.evaluations.contains(&info.evaluations)
	}
}

/// Fires when at least one inner trigger fires. Every inner trigger is
/// consulted so stateful ones stay in sync.
pub struct Any(pub Vec<Box<dyn Trigger>>);

impl Trigger for Any {
	fn fire(&self, info: &LogInfo, meta_data: &MetaData) -> bool {
		self.0.iter().fold(false, |fired, t| t.fire(info, meta_data) || fired)
	}

	fn reset(&self) {
		self.0.iter().for_each(|t| t.reset());
	}
}

/// Fires when every inner trigger fires; empty means always.
pub struct All(pub Vec<Box<dyn Trigger>>);

impl Trigger for All {
	fn fire(&self, info: &LogInfo, meta_data: &MetaData) -> bool {
		self.0.iter().fold(true, |fired, t| t.fire(info, meta_data) && fired)
	}

	fn reset(&self) {
		self.0.iter().for_each(|t| t.reset());
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::structures::{OptimizationType, Solution};

	fn info(evaluations: usize, y: f64) -> LogInfo {
		LogInfo {
			evaluations,
			raw_y: y,
			raw_y_best: y,
			transformed_y: y,
			transformed_y_best: y,
			y,
			y_best: y,
			x: vec![0.0],
			violation: 0.0,
			penalty: 0.0,
			optimum: Solution::new(vec![0.0], 0.0),
			has_improved: false,
		}
	}

	fn meta(optimization_type: OptimizationType) -> MetaData {
		MetaData::new(1, 1, "Test", 1, optimization_type).unwrap()
	}

	#[test]
	fn test_on_improvement_respects_direction() {
		let min = meta(OptimizationType::Minimization);
		let t = OnImprovement::new();
		assert!(t.fire(&info(1, 5.0), &min));
		assert!(!t.fire(&info(2, 5.0), &min));
		assert!(t.fire(&info(3, 4.0), &min));
		t.reset();
		assert!(t.fire(&info(4, 9.0), &min));

		let max = meta(OptimizationType::Maximization);
		let t = OnImprovement::new();
		assert!(t.fire(&info(1, 5.0), &max));
		assert!(!t.fire(&info(2, 4.0), &max));
	}

	#[test]
	fn test_each_and_at() {
		let m = meta(OptimizationType::Minimization);
		let each = Each::new(3, 2);
		let fired: Vec<usize> = (1..=9).filter(|&e| each.fire(&info(e, 0.0), &m)).collect();
		assert_eq!(fired, vec![2, 5, 8]);

		let at = At::new([1, 10, 100]);
		assert!(at.fire(&info(10, 0.0), &m));
		assert!(!at.fire(&info(11, 0.0), &m));
	}

	#[test]
	fn test_combinators() {
		let m = meta(OptimizationType::Minimization);
		let any = Any(vec![Box::new(At::new([2])), Box::new(Each::new(5, 5))]);
		assert!(any.fire(&info(2, 0.0), &m));
		assert!(any.fire(&info(10, 0.0), &m));
		assert!(!any.fire(&info(3, 0.0), &m));

		let all = All(vec![Box::new(Always), Box::new(Each::new(2, 0))]);
		assert!(all.fire(&info(4, 0.0), &m));
		assert!(!all.fire(&info(3, 0.0), &m));
		assert!(All(vec![]).fire(&info(1, 0.0), &m));
	}
}
