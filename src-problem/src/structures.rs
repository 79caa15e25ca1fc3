//! Plain data carried through the evaluation pipeline: meta data, candidate
//! solutions and the per-run state.

use std::fmt;
use std::fmt::Debug;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProblemError;

/// Element type of a search space (real-valued or integer problems).
pub trait Variable: Copy + PartialOrd + Debug + Send + Sync + Serialize + 'static {
	fn to_f64(self) -> f64;
	/// Integers are always finite; floats reject NaN and infinities.
	fn is_finite_value(self) -> bool;
}

impl Variable for f64 {
	fn to_f64(self) -> f64 {
		self
	}
	fn is_finite_value(self) -> bool {
		self.is_finite()
	}
}

impl Variable for i32 {
	fn to_f64(self) -> f64 {
		self as f64
	}
	fn is_finite_value(self) -> bool {
		true
	}
}

/// Direction of optimization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptimizationType {
	Minimization,
	Maximization,
}

impl OptimizationType {
	/// The worst possible objective value for this direction.
	pub fn initial_value(self) -> f64 {
		match self {
			OptimizationType::Minimization => f64::INFINITY,
			OptimizationType::Maximization => f64::NEG_INFINITY,
		}
	}

	/// Strict comparison: `true` when `a` is better than `b`.
	pub fn is_better(self, a: f64, b: f64) -> bool {
		match self {
			OptimizationType::Minimization => a < b,
			OptimizationType::Maximization => a > b,
		}
	}
}

impl fmt::Display for OptimizationType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OptimizationType::Minimization => write!(f, "MIN"),
			OptimizationType::Maximization => write!(f, "MAX"),
		}
	}
}

impl FromStr for OptimizationType {
	type Err = String;
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"min" | "minimization" | "minimize" => Ok(OptimizationType::Minimization),
			"max" | "maximization" | "maximize" => Ok(OptimizationType::Maximization),
			_ => Err(format!("unknown optimization type: {}", s)),
		}
	}
}

/// Identity of a problem instance. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaData {
	problem_id: i32,
	instance: i32,
	name: String,
	n_variables: usize,
	optimization_type: OptimizationType,
}

impl MetaData {
	pub fn new(
		problem_id: i32,
		instance: i32,
		name: &str,
		n_variables: usize,
		optimization_type: OptimizationType,
	) -> Result<Self, ProblemError> {
		if n_variables == 0 {
			return Err(ProblemError::InvalidDimension(n_variables));
		}
		if instance < 1 {
			return Err(ProblemError::InvalidInstance(instance));
		}
		Ok(Self { problem_id, instance, name: name.to_string(), n_variables, optimization_type })
	}

	pub fn problem_id(&self) -> i32 {
		self.problem_id
	}
	pub fn instance(&self) -> i32 {
		self.instance
	}
	pub fn name(&self) -> &str {
		&self.name
	}
	pub fn n_variables(&self) -> usize {
		self.n_variables
	}
	pub fn optimization_type(&self) -> OptimizationType {
		self.optimization_type
	}
	pub fn initial_objective_value(&self) -> f64 {
		self.optimization_type.initial_value()
	}
}

impl fmt::Display for MetaData {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"<MetaData: {} id: {} iid: {} dim: {} {}>",
			self.name, self.problem_id, self.instance, self.n_variables, self.optimization_type
		)
	}
}

/// A candidate `x` together with its objective value `y`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution<T> {
	pub x: Vec<T>,
	pub y: f64,
}

impl<T: Variable> Solution<T> {
	pub fn new(x: Vec<T>, y: f64) -> Self {
		Self { x, y }
	}

	/// Placeholder holding no point and the worst value for `optimization_type`.
	pub fn initial(optimization_type: OptimizationType) -> Self {
		Self { x: Vec::new(), y: optimization_type.initial_value() }
	}

	pub fn as_f64(&self) -> Solution<f64> {
		Solution { x: self.x.iter().map(|v| v.to_f64()).collect(), y: self.y }
	}
}

/// Mutable run state of a problem. Cleared by `reset`, never regenerated
/// from the instance.
#[derive(Debug, Clone)]
pub struct State<T> {
	/// Accepted evaluations since the last reset
	pub evaluations: usize,
	/// Set once a call reproduced the known optimum value exactly
	pub optimum_found: bool,
	/// Best point in transformed space together with its raw objective value
	pub current_best_internal: Solution<T>,
	/// Best point as passed by the caller, with the reported value
	pub current_best: Solution<T>,
	/// Latest point in transformed space with its raw objective value
	pub current_internal: Solution<T>,
	/// Latest point as passed by the caller, with the reported value
	pub current: Solution<T>,
	/// Latest value after objective transforms, before constraint penalties
	pub y_unconstrained: f64,
	pub y_unconstrained_best: f64,
	/// Whether the latest call improved `current_best`
	pub has_improved: bool,
	initial: Solution<T>,
}

impl<T: Variable> State<T> {
	pub fn new(optimization_type: OptimizationType) -> Self {
		let initial = Solution::initial(optimization_type);
		Self {
			evaluations: 0,
			optimum_found: false,
			current_best_internal: initial.clone(),
			current_best: initial.clone(),
			current_internal: initial.clone(),
			current: initial.clone(),
			y_unconstrained: initial.y,
			y_unconstrained_best: initial.y,
			has_improved: false,
			initial,
		}
	}

	pub fn reset(&mut self) {
		self.evaluations = 0;
		self.optimum_found = false;
		self.current_best_internal = self.initial.clone();
		self.current_best = self.initial.clone();
		self.current_internal = self.initial.clone();
		self.current = self.initial.clone();
		self.y_unconstrained = self.initial.y;
		self.y_unconstrained_best = self.initial.y;
		self.has_improved = false;
	}

	/// Account for one accepted call whose `current*` fields are already set.
	pub fn update(&mut self, optimization_type: OptimizationType, optimum: &Solution<T>) {
		self.evaluations += 1;
		self.has_improved = optimization_type.is_better(self.current.y, self.current_best.y);
		if self.has_improved {
			self.y_unconstrained_best = self.y_unconstrained;
			self.current_best_internal = self.current_internal.clone();
			self.current_best = self.current.clone();
		}
		if self.current.y == optimum.y {
			self.optimum_found = true;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_meta_data_validation() {
		assert!(matches!(
			MetaData::new(1, 1, "Sphere", 0, OptimizationType::Minimization),
			Err(ProblemError::InvalidDimension(0))
		));
		assert!(matches!(
			MetaData::new(1, 0, "Sphere", 2, OptimizationType::Minimization),
			Err(ProblemError::InvalidInstance(0))
		));
		let m = MetaData::new(1, 3, "Sphere", 2, OptimizationType::Minimization).unwrap();
		assert_eq!(m.initial_objective_value(), f64::INFINITY);
		assert_eq!(m, m.clone());
	}

	#[test]
	fn test_optimization_type_parsing() {
		assert_eq!("MIN".parse::<OptimizationType>().unwrap(), OptimizationType::Minimization);
		assert_eq!("maximize".parse::<OptimizationType>().unwrap(), OptimizationType::Maximization);
		assert!("sideways".parse::<OptimizationType>().is_err());
	}

	#[test]
	fn test_state_update_is_strict() {
		let optimum = Solution::new(vec![0.0], 0.0);
		let mut state: State<f64> = State::new(OptimizationType::Minimization);

		state.current = Solution::new(vec![1.0], 5.0);
		state.update(OptimizationType::Minimization, &optimum);
		assert!(state.has_improved);
		assert_eq!(state.current_best.y, 5.0);

		state.current = Solution::new(vec![2.0], 5.0);
		state.update(OptimizationType::Minimization, &optimum);
		assert!(!state.has_improved);
		assert_eq!(state.current_best.x, vec![1.0]);
		assert_eq!(state.evaluations, 2);

		state.current = Solution::new(vec![0.0], 0.0);
		state.update(OptimizationType::Minimization, &optimum);
		assert!(state.optimum_found);

		state.reset();
		assert_eq!(state.evaluations, 0);
		assert!(!state.optimum_found);
		assert_eq!(state.current_best.y, f64::INFINITY);
	}

	#[test]
	fn test_tie_with_optimum_sets_found() {
		let optimum = Solution::new(vec![1], 3.0);
		let mut state: State<i32> = State::new(OptimizationType::Maximization);
		state.current = Solution::new(vec![1], 3.0);
		state.update(OptimizationType::Maximization, &optimum);
		state.optimum_found = false;
		// same value again: no improvement, but the optimum is reproduced
		state.update(OptimizationType::Maximization, &optimum);
		assert!(!state.has_improved);
		assert!(state.optimum_found);
	}
}
