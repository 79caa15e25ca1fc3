//! The 24 noiseless BBOB functions.
//!
//! Every function is minimised on `[-5, 5]^n`. Its instance data (optimum
//! location and value, rotations, conditioning) is derived from
//! `(problem_id, instance, n_variables)` through the bbob2009 random stream,
//! so two constructions of the same triple are identical.

mod ill_conditioned;
mod moderate;
mod multimodal;
mod separable;
mod weak_structure;

pub use ill_conditioned::{BentCigar, DifferentPowers, Discus, EllipsoidRotated, SharpRidge};
pub use moderate::{AttractiveSector, Rosenbrock, RosenbrockRotated, StepEllipsoid};
pub use multimodal::{GriewankRosenbrock, RastriginRotated, Schaffers, Weierstrass};
pub use separable::{BuecheRastrigin, Ellipsoid, LinearSlope, Rastrigin, Sphere};
pub use weak_structure::{Gallagher, Katsuura, LunacekBiRastrigin, Schwefel};

use crate::constraints::Bounds;
use crate::error::ProblemError;
use crate::problem::{BenchmarkFunction, Optimum, Problem, RealProblem};
use crate::random;
use crate::structures::{MetaData, OptimizationType};
use crate::transformation::TransformationState;

pub const LOWER_BOUND: f64 = -5.0;
pub const UPPER_BOUND: f64 = 5.0;

/// Instance data shared by every BBOB function.
#[derive(Debug, Clone)]
pub struct BbobBase {
	pub state: TransformationState,
	pub xopt: Vec<f64>,
	pub yopt: f64,
}

impl BbobBase {
	pub fn new(problem_id: i32, instance: i32, n_variables: usize, condition: f64) -> Result<Self, ProblemError> {
		let state = TransformationState::new(problem_id, instance, n_variables, condition)?;
		let (xopt, yopt) = default_optimum(problem_id, state.seed, n_variables);
		Ok(Self { state, xopt, yopt })
	}

	pub fn n_variables(&self) -> usize {
		self.xopt.len()
	}
}

/// Optimum location on a `1e-4` grid in `[-4, 4]` and a value in `[-1000, 1000]`
/// rounded to two decimals.
pub fn default_optimum(problem_id: i32, seed: i64, n_variables: usize) -> (Vec<f64>, f64) {
	let offset = if problem_id == 12 { 1_000_000 } else { 0 };
	let xopt = random::bbob2009::uniform(n_variables, seed + offset)
		.into_iter()
		.map(|u| {
			let x = 8.0 * (1e4 * u).floor() / 1e4 - 4.0;
			if x == 0.0 { -1e-5 } else { x }
		})
		.collect();

	let g1 = random::bbob2009::normal(1, seed)[0];
	let g2 = random::bbob2009::normal(1, seed + 1)[0];
	let yopt = ((100.0 * 100.0 * g1 / g2 + 0.5).floor() / 100.0).clamp(-1000.0, 1000.0);
	(xopt, yopt)
}

/// Validates the identity, builds the instance data and wires the pipeline.
/// `make` returns the function and the location of its optimum.
pub(crate) fn create<F, B>(
	problem_id: i32,
	instance: i32,
	n_variables: usize,
	name: &str,
	condition: f64,
	make: F,
) -> Result<RealProblem, ProblemError>
where
	F: FnOnce(BbobBase) -> (B, Vec<f64>),
	B: BenchmarkFunction<f64> + 'static,
{
	let meta_data = MetaData::new(problem_id, instance, name, n_variables, OptimizationType::Minimization)?;
	let base = BbobBase::new(problem_id, instance, n_variables, condition)?;
	let (function, optimum) = make(base);
	Problem::new(
		meta_data,
		Bounds::uniform(n_variables, LOWER_BOUND, UPPER_BOUND),
		Box::new(function),
		Optimum::At(optimum),
	)
}

pub(crate) fn default_condition() -> f64 {
	10f64.sqrt()
}

/// Ill-conditioned quadratic: `x0^2 + sum 1e6^(i/(n-1)) x_i^2`.
pub(crate) fn ellipsoid(x: &[f64]) -> f64 {
	let n_eff = x.len() as f64 - 1.0;
	let rest: f64 = x.iter().enumerate().skip(1).map(|(i, v)| 1e6f64.powf(i as f64 / n_eff) * (v * v)).sum();
	x[0] * x[0] + rest
}

pub(crate) fn rastrigin(x: &[f64]) -> f64 {
	let n = x.len() as f64;
	let cosines: f64 = x.iter().map(|v| (2.0 * std::f64::consts::PI * v).cos()).sum();
	let squares: f64 = x.iter().map(|v| v * v).sum();
	10.0 * (n - cosines) + squares
}

pub(crate) fn rosenbrock(x: &[f64]) -> f64 {
	x.windows(2).map(|w| 100.0 * (w[0] * w[0] - w[1]).powi(2) + (w[0] - 1.0).powi(2)).sum()
}

/// Rosenbrock scaling: `max(1, sqrt(n)/8)`.
pub(crate) fn rosenbrock_factor(n_variables: usize) -> f64 {
	((n_variables as f64).sqrt() / 8.0).max(1.0)
}

/// Sign pattern of a bbob2009 draw: `-1` where the draw is below one half.
pub(crate) fn random_signs(n_variables: usize, seed: i64) -> Vec<f64> {
	random::bbob2009::uniform(n_variables, seed).into_iter().map(|u| if u < 0.5 { -1.0 } else { 1.0 }).collect()
}

/// Builds any of the 24 functions from its id.
pub fn create_by_id(problem_id: i32, instance: i32, n_variables: usize) -> Result<RealProblem, ProblemError> {
	match problem_id {
		1 => Sphere::create(instance, n_variables),
		2 => Ellipsoid::create(instance, n_variables),
		3 => Rastrigin::create(instance, n_variables),
		4 => BuecheRastrigin::create(instance, n_variables),
		5 => LinearSlope::create(instance, n_variables),
		6 => AttractiveSector::create(instance, n_variables),
		7 => StepEllipsoid::create(instance, n_variables),
		8 => Rosenbrock::create(instance, n_variables),
		9 => RosenbrockRotated::create(instance, n_variables),
		10 => EllipsoidRotated::create(instance, n_variables),
		11 => Discus::create(instance, n_variables),
		12 => BentCigar::create(instance, n_variables),
		13 => SharpRidge::create(instance, n_variables),
		14 => DifferentPowers::create(instance, n_variables),
		15 => RastriginRotated::create(instance, n_variables),
		16 => Weierstrass::create(instance, n_variables),
		17 => Schaffers::create_10(instance, n_variables),
		18 => Schaffers::create_1000(instance, n_variables),
		19 => GriewankRosenbrock::create(instance, n_variables),
		20 => Schwefel::create(instance, n_variables),
		21 => Gallagher::create_101(instance, n_variables),
		22 => Gallagher::create_21(instance, n_variables),
		23 => Katsuura::create(instance, n_variables),
		24 => LunacekBiRastrigin::create(instance, n_variables),
		_ => Err(ProblemError::NotFound(format!("bbob function {}", problem_id))),
	}
}

/// `(id, name)` of the 24 functions, in id order.
pub const FUNCTIONS: [(i32, &str); 24] = [
	(1, "Sphere"),
	(2, "Ellipsoid"),
	(3, "Rastrigin"),
	(4, "BuecheRastrigin"),
	(5, "LinearSlope"),
	(6, "AttractiveSector"),
	(7, "StepEllipsoid"),
	(8, "Rosenbrock"),
	(9, "RosenbrockRotated"),
	(10, "EllipsoidRotated"),
	(11, "Discus"),
	(12, "BentCigar"),
	(13, "SharpRidge"),
	(14, "DifferentPowers"),
	(15, "RastriginRotated"),
	(16, "Weierstrass"),
	(17, "Schaffers10"),
	(18, "Schaffers1000"),
	(19, "GriewankRosenbrock"),
	(20, "Schwefel"),
	(21, "Gallagher101"),
	(22, "Gallagher21"),
	(23, "Katsuura"),
	(24, "LunacekBiRastrigin"),
];
