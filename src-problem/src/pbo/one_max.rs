//! OneMax and its layered variants (ids 1 and 4 to 10).

use super::utils::{self, DUMMY_SEED};
use super::{Target, create};
use crate::error::ProblemError;
use crate::problem::IntegerProblem;

/// Number of ones.
pub struct OneMax;

impl OneMax {
	pub fn create(instance: i32, n_variables: usize) -> Result<IntegerProblem, ProblemError> {
		create(1, instance, n_variables, "OneMax", Target::At(vec![1; n_variables]), utils::one_max)
	}
}

/// OneMax over half of the variables.
pub struct OneMaxDummy1;

impl OneMaxDummy1 {
	pub fn create(instance: i32, n_variables: usize) -> Result<IntegerProblem, ProblemError> {
		dummy_variant(4, instance, n_variables, "OneMaxDummy1", 0.5)
	}
}

/// OneMax over 90% of the variables.
pub struct OneMaxDummy2;

impl OneMaxDummy2 {
	pub fn create(instance: i32, n_variables: usize) -> Result<IntegerProblem, ProblemError> {
		dummy_variant(5, instance, n_variables, "OneMaxDummy2", 0.9)
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
		utils::one_max(&utils::select(x, &indices))
	})
}

pub struct OneMaxNeutrality;

impl OneMaxNeutrality {
	pub fn create(instance: i32, n_variables: usize) -> Result<IntegerProblem, ProblemError> {
		create(6, instance, n_variables, "OneMaxNeutrality", Target::At(vec![1; n_variables]), |x| {
			utils::one_max(&utils::neutrality(x, 3))
		})
	}
}

pub struct OneMaxEpistasis;

impl OneMaxEpistasis {
	pub fn create(instance: i32, n_variables: usize) -> Result<IntegerProblem, ProblemError> {
		let optimum = utils::epistasis_preimage_of_ones(n_variables, 4);
		create(7, instance, n_variables, "OneMaxEpistasis", Target::At(optimum), |x| {
			utils::one_max(&utils::epistasis(x, 4))
		})
	}
}

pub struct OneMaxRuggedness1;

impl OneMaxRuggedness1 {
	pub fn create(instance: i32, n_variables: usize) -> Result<IntegerProblem, ProblemError> {
		create(8, instance, n_variables, "OneMaxRuggedness1", Target::At(vec![1; n_variables]), move |x| {
			utils::ruggedness1(utils::one_max(x), n_variables)
		})
	}
}

pub struct OneMaxRuggedness2;

impl OneMaxRuggedness2 {
	pub fn create(instance: i32, n_variables: usize) -> Result<IntegerProblem, ProblemError> {
		create(9, instance, n_variables, "OneMaxRuggedness2", Target::At(vec![1; n_variables]), move |x| {
			utils::ruggedness2(utils::one_max(x), n_variables)
		})
	}
}

pub struct OneMaxRuggedness3;

impl OneMaxRuggedness3 {
	pub fn create(instance: i32, n_variables: usize) -> Result<IntegerProblem, ProblemError> {
		let table = utils::ruggedness3(n_variables);
		create(10, instance, n_variables, "OneMaxRuggedness3", Target::At(vec![1; n_variables]), move |x| {
			// out-of-range inputs have no table entry
			table.get(utils::one_max(x) as usize).copied().unwrap_or(f64::NAN)
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
			(OneMax::create, 5.0),
			(OneMaxDummy1::create, 3.0),
			(OneMaxDummy2::create, 4.0),
			(OneMaxNeutrality::create, 2.0),
			(OneMaxEpistasis::create, 6.0),
			(OneMaxRuggedness1::create, 4.0),
			(OneMaxRuggedness2::create, 6.0),
			(OneMaxRuggedness3::create, 7.0),
		];
		for (make, expected) in cases {
			let mut problem = make(1, 9).unwrap();
			assert_eq!(problem.call(&X), expected, "{}", problem.meta_data().name());
		}
	}

	#[test]
	fn test_optimum_value() {
		let one_max = OneMax::create(1, 9).unwrap();
		assert_eq!(one_max.optimum().y, 9.0);
		let epistasis = OneMaxEpistasis::create(1, 9).unwrap();
		assert_eq!(epistasis.optimum().y, 9.0);
		let rugged = OneMaxRuggedness1::create(1, 9).unwrap();
		assert_eq!(rugged.optimum().y, 6.0);
	}

	#[test]
	fn test_optimum_beats_everything_on_small_instances() {
		let mut problem = OneMaxRuggedness3::create(1, 6).unwrap();
		let best = problem.optimum().y;
		for mask in 0..64u32 {
			let x: Vec<i32> = (0..6).map(|b| ((mask >> b) & 1) as i32).collect();
			assert!(problem.call(&x) <= best);
		}
	}
}
