//! LeadingOnes and its layered variants (ids 2 and 11 to 17).

use super::utils::{self, DUMMY_SEED};
use super::{Target, create};
use crate::error::ProblemError;
use crate::problem::IntegerProblem;

/// Length of the leading run of ones.
pub struct LeadingOnes;

impl LeadingOnes {
	pub fn create(instance: i32, n_variables: usize) -> Result<IntegerProblem, ProblemError> {
		create(2, instance, n_variables, "LeadingOnes", Target::At(vec![1; n_variables]), utils::leading_ones)
	}
}

pub struct LeadingOnesDummy1;

impl LeadingOnesDummy1 {
	pub fn create(instance: i32, n_variables: usize) -> Result<IntegerProblem, ProblemError> {
		dummy_variant(11, instance, n_variables, "LeadingOnesDummy1", 0.5)
	}
}

pub struct LeadingOnesDummy2;

impl LeadingOnesDummy2 {
	pub fn create(instance: i32, n_variables: usize) -> Result<IntegerProblem, ProblemError> {
		dummy_variant(12, instance, n_variables, "LeadingOnesDummy2", 0.9)
	}
}

fn dummy_variant(
	problem_id: i32,
	instance: i32,
	n_variables: usize,
	name: &str,
	rate: f64,
) -> Result<IntegerProblem, ProblemError> {
	let indices = utils::dummy(n_variables, rate, DUMMY_SEED);
	create(problem_id, instance, n_variables, name, Target::At(vec![1; n_variables]), move |x| {
		utils::leading_ones(&utils::select(x, &indices))
	})
}

pub struct LeadingOnesNeutrality;

impl LeadingOnesNeutrality {
	pub fn create(instance: i32, n_variables: usize) -> Result<IntegerProblem, ProblemError> {
		create(13, instance, n_variables, "LeadingOnesNeutrality", Target::At(vec![1; n_variables]), |x| {
			utils::leading_ones(&utils::neutrality(x, 3))
		})
	}
}

pub struct LeadingOnesEpistasis;

impl LeadingOnesEpistasis {
	pub fn create(instance: i32, n_variables: usize) -> Result<IntegerProblem, ProblemError> {
		let optimum = utils::epistasis_preimage_of_ones(n_variables, 4);
		create(14, instance, n_variables, "LeadingOnesEpistasis", Target::At(optimum), |x| {
			utils::leading_ones(&utils::epistasis(x, 4))
		})
	}
}

pub struct LeadingOnesRuggedness1;

impl LeadingOnesRuggedness1 {
	pub fn create(instance: i32, n_variables: usize) -> Result<IntegerProblem, ProblemError> {
		create(15, instance, n_variables, "LeadingOnesRuggedness1", Target::At(vec![1; n_variables]), move |x| {
			utils::ruggedness1(utils::leading_ones(x), n_variables)
		})
	}
}

pub struct LeadingOnesRuggedness2;

impl LeadingOnesRuggedness2 {
	pub fn create(instance: i32, n_variables: usize) -> Result<IntegerProblem, ProblemError> {
		create(16, instance, n_variables, "LeadingOnesRuggedness2", Target::At(vec![1; n_variables]), move |x| {
			utils::ruggedness2(utils::leading_ones(x), n_variables)
		})
	}
}

pub struct LeadingOnesRuggedness3;

impl LeadingOnesRuggedness3 {
	pub fn create(instance: i32, n_variables: usize) -> Result<IntegerProblem, ProblemError> {
		let table = utils::ruggedness3(n_variables);
		create(17, instance, n_variables, "LeadingOnesRuggedness3", Target::At(vec![1; n_variables]), move |x| {
			// a run of ones never exceeds n
			table[utils::leading_ones(x) as usize]
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const X: [i32; 9] = [1, 1, 0, 1, 0, 0, 0, 1, 1];

	#[test]
	fn test_reference_values() {
		let cases: [(fn(i32, usize) -> Result<IntegerProblem, ProblemError>, f64); 8] = [
			(LeadingOnes::create, 2.0),
			(LeadingOnesDummy1::create, 3.0),
			(LeadingOnesDummy2::create, 2.0),
			(LeadingOnesNeutrality::create, 1.0),
			(LeadingOnesEpistasis::create, 0.0),
			(LeadingOnesRuggedness1::create, 2.0),
			(LeadingOnesRuggedness2::create, 1.0),
			(LeadingOnesRuggedness3::create, 1.0),
		];
		for (make, expected) in cases {
			let mut problem = make(1, 9).unwrap();
			assert_eq!(problem.call(&X), expected, "{}", problem.meta_data().name());
		}
	}

	#[test]
	fn test_optimum_on_transformed_instance() {
		let mut problem = LeadingOnesEpistasis::create(12, 10).unwrap();
		let optimum = problem.optimum().clone();
		assert_eq!(problem.call(&optimum.x), optimum.y);
		assert!(problem.state().optimum_found);
	}

	#[test]
	fn test_neutrality_counts_blocks() {
		let problem = LeadingOnesNeutrality::create(1, 9).unwrap();
		assert_eq!(problem.optimum().y, 3.0);
	}
}
