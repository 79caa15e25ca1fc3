//! Multimodal functions with adequate global structure (ids 15 to 19).

use std::f64::consts::PI;

use ndarray::Array2;

use super::moderate::scaled_rotation;
use super::{BbobBase, LOWER_BOUND, UPPER_BOUND, create, default_condition, rastrigin};
use crate::error::ProblemError;
use crate::problem::{BenchmarkFunction, RealProblem};
use crate::transformation::{objective, variables};

pub struct RastriginRotated {
	base: BbobBase,
}

impl RastriginRotated {
	pub fn create(instance: i32, n_variables: usize) -> Result<RealProblem, ProblemError> {
		create(15, instance, n_variables, "RastriginRotated", default_condition(), |base| {
			let xopt = base.xopt.clone();
			(RastriginRotated { base }, xopt)
		})
	}
}

impl BenchmarkFunction<f64> for RastriginRotated {
	fn evaluate(&self, x: &[f64]) -> f64 {
		rastrigin(x)
	}

	fn transform_variables(&self, mut x: Vec<f64>) -> Vec<f64> {
		let state = &self.base.state;
		variables::subtract(&mut x, &self.base.xopt);
		variables::affine(&mut x, &state.transformation_matrix, &state.transformation_base);
		variables::oscillate(&mut x);
		variables::asymmetric(&mut x, 0.2);
		variables::rotate(&mut x, &state.second_transformation_matrix);
		x
	}

	fn transform_objectives(&self, y: f64, _raw_x: &[f64]) -> f64 {
		objective::shift(y, self.base.yopt)
	}
}

const WEIERSTRASS_TERMS: i32 = 12;

pub struct Weierstrass {
	base: BbobBase,
	/// Value of the inner sum at zero
	f0: f64,
}

impl Weierstrass {
	pub fn create(instance: i32, n_variables: usize) -> Result<RealProblem, ProblemError> {
		create(16, instance, n_variables, "Weierstrass", 1.0 / 100f64.sqrt(), |base| {
			let xopt = base.xopt.clone();
			let f0 = (0..WEIERSTRASS_TERMS).map(|k| 0.5f64.powi(k) * (PI * 3f64.powi(k)).cos()).sum();
			(Weierstrass { base, f0 }, xopt)
		})
	}
}

impl BenchmarkFunction<f64> for Weierstrass {
	fn evaluate(&self, x: &[f64]) -> f64 {
		let n = x.len() as f64;
		let total: f64 = x
			.iter()
			.map(|v| {
				(0..WEIERSTRASS_TERMS)
					.map(|k| 0.5f64.powi(k) * (2.0 * PI * 3f64.powi(k) * (v + 0.5)).cos())
					.sum::<f64>()
			})
			.sum();
		10.0 * (total / n - self.f0).powi(3)
	}

	fn transform_variables(&self, mut x: Vec<f64>) -> Vec<f64> {
		let state = &self.base.state;
		variables::subtract(&mut x, &self.base.xopt);
		variables::affine(&mut x, &state.transformation_matrix, &state.transformation_base);
		variables::oscillate(&mut x);
		variables::rotate(&mut x, &state.second_transformation_matrix);
		x
	}

	fn transform_objectives(&self, y: f64, raw_x: &[f64]) -> f64 {
		let factor = 10.0 / raw_x.len() as f64;
		objective::penalize(raw_x, LOWER_BOUND, UPPER_BOUND, factor, objective::shift(y, self.base.yopt))
	}
}

/// Schaffers F7 with conditioning 10 (id 17) or 1000 (id 18).
pub struct Schaffers {
	base: BbobBase,
	conditioned_rotation: Array2<f64>,
}

impl Schaffers {
	const PENALTY_FACTOR: f64 = 10.0;

	pub fn create_10(instance: i32, n_variables: usize) -> Result<RealProblem, ProblemError> {
		Self::create(17, "Schaffers10", 10.0, instance, n_variables)
	}

	pub fn create_1000(instance: i32, n_variables: usize) -> Result<RealProblem, ProblemError> {
		Self::create(18, "Schaffers1000", 1000.0, instance, n_variables)
	}

	fn create(
		problem_id: i32,
		name: &str,
		condition: f64,
		instance: i32,
		n_variables: usize,
	) -> Result<RealProblem, ProblemError> {
		create(problem_id, instance, n_variables, name, default_condition(), |base| {
			let state = &base.state;
			let conditioned_rotation = Array2::from_shape_fn((n_variables, n_variables), |(i, j)| {
				state.second_rotation[[i, j]] * condition.sqrt().powf(state.exponents[i])
			});
			let xopt = base.xopt.clone();
			(Schaffers { base, conditioned_rotation }, xopt)
		})
	}
}

impl BenchmarkFunction<f64> for Schaffers {
	fn evaluate(&self, x: &[f64]) -> f64 {
		let n_eff = x.len() as f64 - 1.0;
		let total: f64 = x
			.windows(2)
			.map(|w| {
				let t = w[0] * w[0] + w[1] * w[1];
				t.powf(0.25) * (1.0 + (50.0 * t.powf(0.1)).sin().powi(2))
			})
			.sum();
		(total / n_eff).powi(2)
	}

	fn transform_variables(&self, mut x: Vec<f64>) -> Vec<f64> {
		let state = &self.base.state;
		variables::subtract(&mut x, &self.base.xopt);
		variables::affine(&mut x, &state.transformation_matrix, &state.transformation_base);
		variables::asymmetric(&mut x, 0.5);
		variables::rotate(&mut x, &self.conditioned_rotation);
		x
	}

	fn transform_objectives(&self, y: f64, raw_x: &[f64]) -> f64 {
		let y = objective::shift(y, self.base.yopt);
		objective::penalize(raw_x, LOWER_BOUND, UPPER_BOUND, Self::PENALTY_FACTOR, y)
	}
}

/// Composite Griewank-Rosenbrock F8F2.
pub struct GriewankRosenbrock {
	base: BbobBase,
}

impl GriewankRosenbrock {
	pub fn create(instance: i32, n_variables: usize) -> Result<RealProblem, ProblemError> {
		create(19, instance, n_variables, "GriewankRosenbrock", default_condition(), |mut base| {
			let xopt = scaled_rotation(&mut base);
			(GriewankRosenbrock { base }, xopt)
		})
	}
}

impl BenchmarkFunction<f64> for GriewankRosenbrock {
	fn evaluate(&self, x: &[f64]) -> f64 {
		let n_eff = x.len() as f64 - 1.0;
		let total: f64 = x
			.windows(2)
			.map(|w| {
				let t = 100.0 * (w[0] * w[0] - w[1]).powi(2) + (1.0 - w[0]).powi(2);
				t / 4000.0 - t.cos()
			})
			.sum();
		10.0 + 10.0 * total / n_eff
	}

	fn transform_variables(&self, mut x: Vec<f64>) -> Vec<f64> {
		let state = &self.base.state;
		variables::affine(&mut x, &state.transformation_matrix, &state.transformation_base);
		x
	}

	fn transform_objectives(&self, y: f64, _raw_x: &[f64]) -> f64 {
		objective::shift(y, self.base.yopt)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_weierstrass_vanishes_at_optimum() {
		let mut p = Weierstrass::create(1, 5).unwrap();
		let x = p.optimum().x.clone();
		let base = BbobBase::new(16, 1, 5, 0.1).unwrap();
		assert!((p.call(&x) - base.yopt).abs() < 1e-8);
	}

	#[test]
	fn test_schaffers_share_a_seed_family() {
		let a = Schaffers::create_10(1, 4).unwrap();
		let b = Schaffers::create_1000(1, 4).unwrap();
		assert_eq!(a.optimum().x, b.optimum().x);
		assert_eq!(a.meta_data().problem_id(), 17);
		assert_eq!(b.meta_data().problem_id(), 18);
	}

	#[test]
	fn test_griewank_rosenbrock_minimum() {
		let mut p = GriewankRosenbrock::create(3, 6).unwrap();
		let x = p.optimum().x.clone();
		let base = BbobBase::new(19, 3, 6, default_condition()).unwrap();
		assert!((p.call(&x) - base.yopt).abs() < 1e-8);
	}
}
