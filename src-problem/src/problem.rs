//! The evaluation pipeline shared by every benchmark problem.
//!
//! A call validates the candidate, checks hard constraints, transforms the
//! variables, evaluates the raw objective, transforms the objective, applies
//! soft penalties, updates the run state and finally notifies the attached
//! logger. Each concrete function only supplies the three
//! [`BenchmarkFunction`] hooks.

use std::fmt;
use std::sync::Arc;

use log::{debug, trace, warn};
use rayon::prelude::*;

use crate::constraints::{BOUNDS_NAME, BoxConstraint, Bounds, Constraint, ConstraintSet, Enforced, Penalty};
use crate::error::{ProblemError, Rejection};
use crate::logger::{LogInfo, Logger};
use crate::structures::{MetaData, Solution, State, Variable};

/// The three hooks a concrete benchmark plugs into the pipeline.
pub trait BenchmarkFunction<T>: Send + Sync {
	/// Raw objective of already transformed variables.
	fn evaluate(&self, x: &[T]) -> f64;

	fn transform_variables(&self, x: Vec<T>) -> Vec<T> {
		x
	}

	/// `raw_x` is the candidate as passed by the caller, for penalties
	/// computed on the untransformed point.
	fn transform_objectives(&self, y: f64, _raw_x: &[T]) -> f64 {
		y
	}
}

/// How the optimum of a new problem is obtained.
#[derive(Debug, Clone)]
pub enum Optimum<T> {
	/// Known location; the value is computed by running the pipeline on it.
	At(Vec<T>),
	/// Known location (possibly empty) and value, already transformed.
	Known(Solution<T>),
	/// Nothing is known; the value is NaN so it is never reproduced.
	Unknown,
}

/// Output of the pure part of the pipeline.
#[derive(Debug, Clone)]
struct Evaluated<T> {
	internal_x: Vec<T>,
	raw_y: f64,
	y: f64,
}

fn run_pipeline<T: Variable>(function: &dyn BenchmarkFunction<T>, x: &[T]) -> Evaluated<T> {
	let internal_x = function.transform_variables(x.to_vec());
	let raw_y = function.evaluate(&internal_x);
	let y = function.transform_objectives(raw_y, x);
	Evaluated { internal_x, raw_y, y }
}

pub struct Problem<T: Variable> {
	meta_data: MetaData,
	bounds: Bounds<T>,
	constraints: ConstraintSet<T>,
	optimum: Solution<T>,
	state: State<T>,
	function: Box<dyn BenchmarkFunction<T>>,
	logger: Option<Arc<dyn Logger>>,
}

pub type RealProblem = Problem<f64>;
pub type IntegerProblem = Problem<i32>;

impl<T: Variable> Problem<T> {
	pub fn new(
		meta_data: MetaData,
		bounds: Bounds<T>,
		function: Box<dyn BenchmarkFunction<T>>,
		optimum: Optimum<T>,
	) -> Result<Self, ProblemError> {
		if bounds.len() != meta_data.n_variables() {
			return Err(ProblemError::BoundsLength { expected: meta_data.n_variables(), got: bounds.len() });
		}
		let optimum = match optimum {
			Optimum::At(x) => {
				if x.len() != meta_data.n_variables() {
					return Err(ProblemError::Unexpected(format!(
						"optimum of {} has {} coordinates",
						meta_data.name(),
						x.len()
					)));
				}
				let y = run_pipeline(&*function, &x).y;
				Solution::new(x, y)
			}
			Optimum::Known(solution) => solution,
			Optimum::Unknown => Solution::new(Vec::new(), f64::NAN),
		};
		debug!("built {} with optimum value {}", meta_data, optimum.y);
		let state = State::new(meta_data.optimization_type());
		Ok(Self { meta_data, bounds, constraints: ConstraintSet::new(), optimum, state, function, logger: None })
	}

	/// Evaluates `x`. Malformed candidates yield NaN and leave the state untouched.
	pub fn call(&mut self, x: &[T]) -> f64 {
		if let Err(rejection) = self.check_input(x) {
			warn!("{}: rejected candidate: {}", self.meta_data.name(), rejection);
			return f64::NAN;
		}
		let outcome = if self.constraints.hard_violation(x) { None } else { Some(run_pipeline(&*self.function, x)) };
		self.apply(x, outcome)
	}

	/// Evaluates a batch. Transforms and raw evaluations run in parallel;
	/// state updates and logging happen in input order, so the result is the
	/// same as calling [`Problem::call`] on each candidate in turn.
	pub fn evaluate_batch(&mut self, xs: &[Vec<T>]) -> Vec<f64> {
		let accepted: Vec<bool> = xs
			.iter()
			.map(|x| match self.check_input(x) {
				Ok(()) => true,
				Err(rejection) => {
					warn!("{}: rejected candidate: {}", self.meta_data.name(), rejection);
					false
				}
			})
			.collect();
		let hard: Vec<bool> =
			xs.iter().zip(&accepted).map(|(x, &ok)| ok && self.constraints.hard_violation(x)).collect();

		let function = &*self.function;
		let outcomes: Vec<Option<Evaluated<T>>> = xs
			.par_iter()
			.zip(accepted.par_iter().zip(hard.par_iter()))
			.map(|(x, (&ok, &h))| if ok && !h { Some(run_pipeline(function, x)) } else { None })
			.collect();

		let mut ys = Vec::with_capacity(xs.len());
		for ((x, outcome), &ok) in xs.iter().zip(outcomes).zip(&accepted) {
			if !ok {
				ys.push(f64::NAN);
				continue;
			}
			if outcome.is_none() {
				// restore the violations of this candidate
				self.constraints.hard_violation(x);
			}
			ys.push(self.apply(x, outcome));
		}
		ys
	}

	fn apply(&mut self, x: &[T], outcome: Option<Evaluated<T>>) -> f64 {
		self.state.current.x = x.to_vec();
		match outcome {
			None => {
				let y = self.constraints.penalize(self.meta_data.initial_objective_value());
				self.state.current_internal = Solution::new(x.to_vec(), y);
				self.state.y_unconstrained = y;
				self.state.current.y = y;
			}
			Some(evaluated) => {
				self.state.current_internal = Solution::new(evaluated.internal_x, evaluated.raw_y);
				self.state.y_unconstrained = evaluated.y;
				self.state.current.y = self.constraints.penalize_at(x, evaluated.y);
			}
		}
		self.state.update(self.meta_data.optimization_type(), &self.optimum);
		trace!("{} evaluation {}: {}", self.meta_data.name(), self.state.evaluations, self.state.current.y);

		if let Some(logger) = &self.logger {
			logger.log(&self.log_info());
		}
		self.state.current.y
	}

	/// Why `x` would be rejected, if it would.
	pub fn check_input(&self, x: &[T]) -> Result<(), Rejection> {
		if x.is_empty() {
			return Err(Rejection::Empty);
		}
		if x.len() != self.meta_data.n_variables() {
			return Err(Rejection::WrongLength { expected: self.meta_data.n_variables(), got: x.len() });
		}
		match x.iter().position(|v| !v.is_finite_value()) {
			Some(index) => Err(Rejection::NotFinite { index }),
			None => Ok(()),
		}
	}

	/// Starts a new run on the same landscape.
	pub fn reset(&mut self) {
		self.state.reset();
		if let Some(logger) = &self.logger {
			logger.reset();
		}
	}

	pub fn log_info(&self) -> LogInfo {
		let state = &self.state;
		LogInfo {
			evaluations: state.evaluations,
			raw_y: state.current_internal.y,
			raw_y_best: state.current_best_internal.y,
			transformed_y: state.y_unconstrained,
			transformed_y_best: state.y_unconstrained_best,
			y: state.current.y,
			y_best: state.current_best.y,
			x: state.current.x.iter().map(|v| v.to_f64()).collect(),
			violation: self.constraints.violation(),
			penalty: self.constraints.penalty(),
			optimum: self.optimum.as_f64(),
			has_improved: state.has_improved,
		}
	}

	pub fn attach_logger(&mut self, logger: Arc<dyn Logger>) {
		debug!("attaching logger to {}", self.meta_data);
		logger.attach(&self.meta_data);
		self.logger = Some(logger);
	}

	/// Detaches and flushes the current logger.
	pub fn detach_logger(&mut self) -> Option<Arc<dyn Logger>> {
		let logger = self.logger.take();
		if let Some(logger) = &logger {
			logger.flush();
		}
		logger
	}

	pub fn add_constraint(&mut self, constraint: Box<dyn Constraint<T>>) {
		self.constraints.add(constraint);
	}

	pub fn remove_constraint(&mut self, name: &str) -> bool {
		self.constraints.remove(name)
	}

	/// Turns the problem bounds into a constraint enforced as `how`.
	pub fn enforce_bounds(&mut self, weight: f64, how: Enforced, exponent: f64) {
		let penalty = Penalty::new(how, weight, exponent);
		match self.constraints.config_mut(BOUNDS_NAME) {
			Some(config) => *config = penalty,
			None => self.constraints.add(Box::new(BoxConstraint::new(self.bounds.clone(), penalty))),
		}
	}

	pub fn meta_data(&self) -> &MetaData {
		&self.meta_data
	}

	pub fn bounds(&self) -> &Bounds<T> {
		&self.bounds
	}

	pub fn constraints(&self) -> &ConstraintSet<T> {
		&self.constraints
	}

	pub fn optimum(&self) -> &Solution<T> {
		&self.optimum
	}

	pub fn state(&self) -> &State<T> {
		&self.state
	}

	pub fn has_logger(&self) -> bool {
		self.logger.is_some()
	}
}

impl<T: Variable> fmt::Debug for Problem<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Problem")
			.field("meta_data", &self.meta_data)
			.field("constraints", &self.constraints)
			.field("optimum", &self.optimum)
			.field("evaluations", &self.state.evaluations)
			.finish()
	}
}

impl<T: Variable> fmt::Display for Problem<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} evaluations: {} best: {}", self.meta_data, self.state.evaluations, self.state.current_best.y)
	}
}
