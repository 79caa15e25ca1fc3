//! The 25 pseudo-Boolean optimisation (PBO) functions.
//!
//! Every function is maximised over bit strings (`[0, 1]^n` as `i32`).
//! Instances 2 to 50 XOR the candidate with a seeded mask, instances 51 to
//! 100 permute it, and every instance above 1 scales and shifts the
//! objective with factors drawn from the instance number.

mod combinatorial;
mod lattice;
mod leading_ones;
mod one_max;
pub mod utils;

pub use combinatorial::{ConcatenatedTrap, Labs, Linear, Mis, NKLandscapes, NQueens};
pub use lattice::{IsingRing, IsingTorus, IsingTriangular};
pub use leading_ones::{
	LeadingOnes, LeadingOnesDummy1, LeadingOnesDummy2, LeadingOnesEpistasis, LeadingOnesNeutrality,
	LeadingOnesRuggedness1, LeadingOnesRuggedness2, LeadingOnesRuggedness3,
};
pub use one_max::{
	OneMax, OneMaxDummy1, OneMaxDummy2, OneMaxEpistasis, OneMaxNeutrality, OneMaxRuggedness1, OneMaxRuggedness2,
	OneMaxRuggedness3,
};

use crate::constraints::Bounds;
use crate::error::ProblemError;
use crate::problem::{BenchmarkFunction, IntegerProblem, Optimum, Problem};
use crate::structures::{MetaData, OptimizationType, Solution};
use crate::transformation::{objective, variables};

pub const LOWER_BOUND: i32 = 0;
pub const UPPER_BOUND: i32 = 1;

/// Instance transforms shared by every PBO function.
#[derive(Debug, Clone, Copy)]
pub struct PboBase {
	instance: i32,
}

impl PboBase {
	pub fn new(instance: i32) -> Self {
		Self { instance }
	}

	pub fn instance(&self) -> i32 {
		self.instance
	}

	pub fn transform_variables(&self, mut x: Vec<i32>) -> Vec<i32> {
		match self.instance {
			2..=50 => variables::random_flip(&mut x, self.instance as i64),
			51..=100 => variables::random_reorder(&mut x, self.instance as i64),
			_ => {}
		}
		x
	}

	pub fn transform_objectives(&self, y: f64) -> f64 {
		if self.instance > 1 {
			let seed = self.instance as i64;
			objective::uniform_shift(objective::uniform_scale(y, seed), seed)
		} else {
			y
		}
	}

	/// Maps a point of the untransformed landscape back to caller space.
	pub fn external(&self, mut internal: Vec<i32>) -> Vec<i32> {
		match self.instance {
			// XOR with the same mask is its own inverse
			2..=50 => {
				variables::random_flip(&mut internal, self.instance as i64);
				internal
			}
			51..=100 => variables::random_reorder_reset(&internal, self.instance as i64),
			_ => internal,
		}
	}
}

/// What is known about the optimum of the untransformed function.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Target {
	/// An optimal point of the untransformed function.
	At(Vec<i32>),
	/// Only the raw optimal value is known.
	Value(f64),
	Unknown,
}

/// A raw objective wired to the instance transforms.
pub(crate) struct PboFunction<F> {
	base: PboBase,
	objective: F,
}

impl<F> BenchmarkFunction<i32> for PboFunction<F>
where
	F: Fn(&[i32]) -> f64 + Send + Sync,
{
	fn evaluate(&self, x: &[i32]) -> f64 {
		(self.objective)(x)
	}

	fn transform_variables(&self, x: Vec<i32>) -> Vec<i32> {
		self.base.transform_variables(x)
	}

	fn transform_objectives(&self, y: f64, _raw_x: &[i32]) -> f64 {
		self.base.transform_objectives(y)
	}
}

pub(crate) fn create<F>(
	problem_id: i32,
	instance: i32,
	n_variables: usize,
	name: &str,
	target: Target,
	objective: F,
) -> Result<IntegerProblem, ProblemError>
where
	F: Fn(&[i32]) -> f64 + Send + Sync + 'static,
{
	let meta_data = MetaData::new(problem_id, instance, name, n_variables, OptimizationType::Maximization)?;
	let base = PboBase::new(instance);
	let optimum = match target {
		Target::At(x) => Optimum::At(base.external(x)),
		Target::Value(y) => Optimum::Known(Solution::new(Vec::new(), base.transform_objectives(y))),
		Target::Unknown => Optimum::Unknown,
	};
	Problem::new(
		meta_data,
		Bounds::uniform(n_variables, LOWER_BOUND, UPPER_BOUND),
		Box::new(PboFunction { base, objective }),
		optimum,
	)
}

/// Side of the square lattice laid over `n_variables` bits.
pub(crate) fn square_side(name: &str, n_variables: usize) -> Result<usize, ProblemError> {
	let side = (n_variables as f64).sqrt().round() as usize;
	if side * side != n_variables {
		return Err(ProblemError::UnsupportedDimension {
			name: name.to_string(),
			n_variables,
			reason: "the number of variables must be a perfect square".to_string(),
		});
	}
	Ok(side)
}

/// Builds any of the 25 functions from its id.
pub fn create_by_id(problem_id: i32, instance: i32, n_variables: usize) -> Result<IntegerProblem, ProblemError> {
	match problem_id {
		1 => OneMax::create(instance, n_variables),
		2 => LeadingOnes::create(instance, n_variables),
		3 => Linear::create(instance, n_variables),
		4 => OneMaxDummy1::create(instance, n_variables),
		5 => OneMaxDummy2::create(instance, n_variables),
		6 => OneMaxNeutrality::create(instance, n_variables),
		7 => OneMaxEpistasis::create(instance, n_variables),
		8 => OneMaxRuggedness1::create(instance, n_variables),
		9 => OneMaxRuggedness2::create(instance, n_variables),
		10 => OneMaxRuggedness3::create(instance, n_variables),
		11 => LeadingOnesDummy1::create(instance, n_variables),
		12 => LeadingOnesDummy2::create(instance, n_variables),
		13 => LeadingOnesNeutrality::create(instance, n_variables),
		14 => LeadingOnesEpistasis::create(instance, n_variables),
		15 => LeadingOnesRuggedness1::create(instance, n_variables),
		16 => LeadingOnesRuggedness2::create(instance, n_variables),
		17 => LeadingOnesRuggedness3::create(instance, n_variables),
		18 => Labs::create(instance, n_variables),
		19 => IsingRing::create(instance, n_variables),
		20 => IsingTorus::create(instance, n_variables),
		21 => IsingTriangular::create(instance, n_variables),
		22 => Mis::create(instance, n_variables),
		23 => NQueens::create(instance, n_variables),
		24 => ConcatenatedTrap::create(instance, n_variables),
		25 => NKLandscapes::create(instance, n_variables),
		_ => Err(ProblemError::NotFound(format!("pbo function {}", problem_id))),
	}
}

/// `(id, name)` of the 25 functions, in id order.
pub const FUNCTIONS: [(i32, &str); 25] = [
	(1, "OneMax"),
	(2, "LeadingOnes"),
	(3, "Linear"),
	(4, "OneMaxDummy1"),
	(5, "OneMaxDummy2"),
	(6, "OneMaxNeutrality"),
	(7, "OneMaxEpistasis"),
	(8, "OneMaxRuggedness1"),
	(9, "OneMaxRuggedness2"),
	(10, "OneMaxRuggedness3"),
	(11, "LeadingOnesDummy1"),
	(12, "LeadingOnesDummy2"),
	(13, "LeadingOnesNeutrality"),
	(14, "LeadingOnesEpistasis"),
	(15, "LeadingOnesRuggedness1"),
	(16, "LeadingOnesRuggedness2"),
	(17, "LeadingOnesRuggedness3"),
	(18, "LABS"),
	(19, "IsingRing"),
	(20, "IsingTorus"),
	(21, "IsingTriangular"),
	(22, "MIS"),
	(23, "NQueens"),
	(24, "ConcatenatedTrap"),
	(25, "NKLandscapes"),
];

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_external_point_maps_back_to_internal() {
		let internal = vec![1, 0, 0, 1, 1, 1, 0, 1, 0, 0, 1, 1];
		for instance in [1, 2, 17, 50, 51, 77, 100, 101] {
			let base = PboBase::new(instance);
			let external = base.external(internal.clone());
			assert_eq!(base.transform_variables(external), internal, "instance {}", instance);
		}
	}

	#[test]
	fn test_objective_transform_only_above_first_instance() {
		assert_eq!(PboBase::new(1).transform_objectives(7.0), 7.0);
		let warped = PboBase::new(3).transform_objectives(7.0);
		assert_ne!(warped, 7.0);
		assert!(warped.is_finite());
	}

	#[test]
	fn test_square_side() {
		assert_eq!(square_side("IsingTorus", 16).unwrap(), 4);
		assert!(matches!(square_side("NQueens", 10), Err(ProblemError::UnsupportedDimension { n_variables: 10, .. })));
	}

	#[test]
	fn test_every_function_builds() {
		for (id, name) in FUNCTIONS {
			let problem = create_by_id(id, 1, 16).unwrap();
			assert_eq!(problem.meta_data().name(), name);
			assert_eq!(problem.meta_data().problem_id(), id);
			assert_eq!(problem.meta_data().optimization_type(), OptimizationType::Maximization);
		}
		assert!(matches!(create_by_id(26, 1, 16), Err(ProblemError::NotFound(_))));
	}

	#[test]
	fn test_optimum_is_reached_at_every_instance_kind() {
		for instance in [1, 5, 60] {
			let mut problem = OneMax::create(instance, 10).unwrap();
			let optimum = problem.optimum().clone();
			assert_eq!(problem.call(&optimum.x), optimum.y);
			assert!(problem.state().optimum_found);
		}
	}
}
