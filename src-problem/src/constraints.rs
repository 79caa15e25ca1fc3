//! Bounds and constraints applied on top of a problem's objective.
//!
//! A constraint reports a violation for a candidate; how that violation
//! changes the reported value depends on its [`Enforced`] mode. The penalty of
//! a violated constraint is `weight * violation^exponent`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ProblemError;
use crate::structures::Variable;

/// Name under which the problem bounds are registered in a [`ConstraintSet`].
pub const BOUNDS_NAME: &str = "bounds";

/// How a constraint acts on the reported objective value.
///
/// Variants are ordered: every mode from `Soft` on penalizes, every mode from
/// `Hard` on short-circuits the evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Enforced {
	/// Ignored entirely
	NotEnforced,
	/// Violation is computed and reported, never penalized
	Hidden,
	/// `y + penalty`, summed over all soft constraints
	Soft,
	/// A violation replaces `y` by this constraint's penalty
	Hard,
	/// A violation replaces `y` by this constraint's own `penalize(y)`
	Override,
}

/// Penalty configuration shared by every constraint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Penalty {
	pub enforced: Enforced,
	pub weight: f64,
	pub exponent: f64,
}

impl Penalty {
	pub fn new(enforced: Enforced, weight: f64, exponent: f64) -> Self {
		Self { enforced, weight, exponent }
	}

	pub fn value(&self, violation: f64) -> f64 {
		self.weight * violation.powf(self.exponent)
	}
}

impl Default for Penalty {
	fn default() -> Self {
		Self { enforced: Enforced::NotEnforced, weight: 1.0, exponent: 1.0 }
	}
}

/// A single constraint on candidates (and possibly on their objective value).
pub trait Constraint<T>: Send + Sync {
	fn name(&self) -> &str;
	fn penalty_config(&self) -> &Penalty;
	fn penalty_config_mut(&mut self) -> &mut Penalty;

	/// Violation of `x` with objective value `y`; `y` is NaN when the check
	/// runs before evaluation.
	fn compute_violation(&self, x: &[T], y: f64) -> f64;

	fn is_violated(&self, violation: f64) -> bool {
		violation > 0.0
	}

	/// Value reported when an `Override` constraint is violated.
	fn penalize(&self, y: f64, violation: f64) -> f64 {
		y + self.penalty_config().value(violation)
	}
}

/// Lower and upper bounds of a search space, one entry per variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds<T> {
	pub lb: Vec<T>,
	pub ub: Vec<T>,
}

impl<T: Variable> Bounds<T> {
	/// Bounds from vectors of length 1 (broadcast) or exactly `n_variables`.
	pub fn new(lb: Vec<T>, ub: Vec<T>, n_variables: usize) -> Result<Self, ProblemError> {
		Ok(Self { lb: broadcast(lb, n_variables)?, ub: broadcast(ub, n_variables)? })
	}

	pub fn uniform(n_variables: usize, lb: T, ub: T) -> Self {
		Self { lb: vec![lb; n_variables], ub: vec![ub; n_variables] }
	}

	pub fn len(&self) -> usize {
		self.lb.len()
	}

	pub fn is_empty(&self) -> bool {
		self.lb.is_empty()
	}

	pub fn contains(&self, x: &[T]) -> bool {
		x.iter().zip(self.lb.iter().zip(&self.ub)).all(|(v, (l, u))| v >= l && v <= u)
	}

	/// Sum of squared distances of `x` to the box.
	pub fn squared_violation(&self, x: &[T]) -> f64 {
		x.iter()
			.zip(self.lb.iter().zip(&self.ub))
			.map(|(&v, (&l, &u))| {
				let d = if v > u {
					v.to_f64() - u.to_f64()
				} else if v < l {
					l.to_f64() - v.to_f64()
				} else {
					0.0
				};
				d * d
			})
			.sum()
	}
}

fn broadcast<T: Variable>(v: Vec<T>, n: usize) -> Result<Vec<T>, ProblemError> {
	match v.len() {
		1 => Ok(vec![v[0]; n]),
		len if len == n => Ok(v),
		len => Err(ProblemError::BoundsLength { expected: n, got: len }),
	}
}

/// The problem bounds seen as a constraint.
#[derive(Debug, Clone)]
pub struct BoxConstraint<T> {
	bounds: Bounds<T>,
	penalty: Penalty,
}

impl<T: Variable> BoxConstraint<T> {
	pub fn new(bounds: Bounds<T>, penalty: Penalty) -> Self {
		Self { bounds, penalty }
	}

	pub fn bounds(&self) -> &Bounds<T> {
		&self.bounds
	}
}

impl<T: Variable> Constraint<T> for BoxConstraint<T> {
	fn name(&self) -> &str {
		BOUNDS_NAME
	}
	fn penalty_config(&self) -> &Penalty {
		&self.penalty
	}
	fn penalty_config_mut(&mut self) -> &mut Penalty {
		&mut self.penalty
	}
	fn compute_violation(&self, x: &[T], _y: f64) -> f64 {
		self.bounds.squared_violation(x)
	}
}

type ViolationFn<T> = Box<dyn Fn(&[T], f64) -> f64 + Send + Sync>;

/// Constraint defined by a user function `(x, y) -> violation`.
pub struct FunctionalConstraint<T> {
	name: String,
	penalty: Penalty,
	function: ViolationFn<T>,
}

impl<T: Variable> FunctionalConstraint<T> {
	pub fn new<F>(function: F, weight: f64, enforced: Enforced, name: &str) -> Self
	where
		F: Fn(&[T], f64) -> f64 + Send + Sync + 'static,
	{
		Self { name: name.to_string(), penalty: Penalty::new(enforced, weight, 1.0), function: Box::new(function) }
	}

	pub fn with_exponent(mut self, exponent: f64) -> Self {
		self.penalty.exponent = exponent;
		self
	}
}

impl<T> fmt::Debug for FunctionalConstraint<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FunctionalConstraint").field("name", &self.name).field("penalty", &self.penalty).finish()
	}
}

impl<T: Variable> Constraint<T> for FunctionalConstraint<T> {
	fn name(&self) -> &str {
		&self.name
	}
	fn penalty_config(&self) -> &Penalty {
		&self.penalty
	}
	fn penalty_config_mut(&mut self) -> &mut Penalty {
		&mut self.penalty
	}
	fn compute_violation(&self, x: &[T], y: f64) -> f64 {
		(self.function)(x, y)
	}
	fn is_violated(&self, violation: f64) -> bool {
		violation.abs() > 0.0
	}
}

/// A constraint together with the outcome of its latest check.
pub struct ConstraintEntry<T> {
	constraint: Box<dyn Constraint<T>>,
	violation: f64,
	feasible: bool,
}

impl<T: Variable> ConstraintEntry<T> {
	fn new(constraint: Box<dyn Constraint<T>>) -> Self {
		Self { constraint, violation: 0.0, feasible: true }
	}

	pub fn name(&self) -> &str {
		self.constraint.name()
	}

	pub fn enforced(&self) -> Enforced {
		self.constraint.penalty_config().enforced
	}

	/// Violation found by the latest check (0 when not enforced).
	pub fn violation(&self) -> f64 {
		self.violation
	}

	pub fn penalty(&self) -> f64 {
		self.constraint.penalty_config().value(self.violation)
	}

	pub fn is_feasible(&self) -> bool {
		self.feasible
	}

	/// Re-checks the constraint; `Hidden` constraints always count as satisfied.
	fn check(&mut self, x: &[T], y: f64) -> bool {
		self.violation = 0.0;
		if self.enforced() == Enforced::NotEnforced {
			self.feasible = true;
			return true;
		}
		self.violation = self.constraint.compute_violation(x, y);
		self.feasible = !self.constraint.is_violated(self.violation);
		self.enforced() == Enforced::Hidden || self.feasible
	}
}

impl<T: Variable> fmt::Debug for ConstraintEntry<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ConstraintEntry")
			.field("name", &self.name())
			.field("enforced", &self.enforced())
			.field("violation", &self.violation)
			.finish()
	}
}

/// Ordered collection of constraints attached to a problem.
pub struct ConstraintSet<T> {
	entries: Vec<ConstraintEntry<T>>,
}

impl<T: Variable> fmt::Debug for ConstraintSet<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.entries.iter()).finish()
	}
}

impl<T: Variable> Default for ConstraintSet<T> {
	fn default() -> Self {
		Self { entries: Vec::new() }
	}
}

impl<T: Variable> ConstraintSet<T> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a constraint; a constraint with the same name replaces the old one.
	pub fn add(&mut self, constraint: Box<dyn Constraint<T>>) {
		match self.entries.iter_mut().find(|e| e.name() == constraint.name()) {
			Some(entry) => *entry = ConstraintEntry::new(constraint),
			None => self.entries.push(ConstraintEntry::new(constraint)),
		}
	}

	/// Removes every constraint called `name`; returns whether one was found.
	pub fn remove(&mut self, name: &str) -> bool {
		let before = self.entries.len();
		self.entries.retain(|e| e.name() != name);
		before != self.entries.len()
	}

	pub fn n(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn get(&self, index: usize) -> Option<&ConstraintEntry<T>> {
		self.entries.get(index)
	}

	pub fn by_name(&self, name: &str) -> Option<&ConstraintEntry<T>> {
		self.entries.iter().find(|e| e.name() == name)
	}

	pub fn iter(&self) -> impl Iterator<Item = &ConstraintEntry<T>> {
		self.entries.iter()
	}

	pub(crate) fn config_mut(&mut self, name: &str) -> Option<&mut Penalty> {
		self.entries.iter_mut().find(|e| e.name() == name).map(|e| e.constraint.penalty_config_mut())
	}

	/// Checks every constraint before evaluation and reports whether a
	/// `Hard`/`Override` one is violated.
	pub fn hard_violation(&mut self, x: &[T]) -> bool {
		let mut violated = false;
		for entry in &mut self.entries {
			let ok = entry.check(x, f64::NAN);
			violated = (!ok && entry.enforced() >= Enforced::Hard) || violated;
		}
		violated
	}

	/// Re-checks every constraint against `(x, y)` and returns the penalized value.
	pub fn penalize_at(&mut self, x: &[T], y: f64) -> f64 {
		for entry in &mut self.entries {
			entry.check(x, y);
		}
		self.penalize(y)
	}

	/// Penalized value of `y` given the outcome of the latest checks.
	pub fn penalize(&self, y: f64) -> f64 {
		for entry in self.entries.iter().filter(|e| !e.feasible) {
			match entry.enforced() {
				Enforced::Hard => return entry.penalty(),
				Enforced::Override => return entry.constraint.penalize(y, entry.violation),
				_ => {}
			}
		}
		y + self.penalty()
	}

	/// Sum of penalties of violated constraints enforced at least softly.
	pub fn penalty(&self) -> f64 {
		self.entries
			.iter()
			.filter(|e| !e.feasible && e.enforced() >= Enforced::Soft)
			.map(|e| e.penalty())
			.sum()
	}

	pub fn violation(&self) -> f64 {
		self.entries.iter().map(|e| e.violation).sum()
	}
}
