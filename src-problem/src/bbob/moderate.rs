//! Functions with low or moderate conditioning (ids 6 to 9).

use ndarray::Array2;

use super::{BbobBase, LOWER_BOUND, UPPER_BOUND, create, default_condition, rosenbrock, rosenbrock_factor};
use crate::error::ProblemError;
use crate::problem::{BenchmarkFunction, RealProblem};
use crate::transformation::{objective, variables};

/// Highly asymmetric quadratic: one orthant around the optimum is 1e4 times steeper.
pub struct AttractiveSector {
	base: BbobBase,
}

impl AttractiveSector {
	pub fn create(instance: i32, n_variables: usize) -> Result<RealProblem, ProblemError> {
		create(6, instance, n_variables, "AttractiveSector", default_condition(), |base| {
			let xopt = base.xopt.clone();
			(AttractiveSector { base }, xopt)
		})
	}
}

impl BenchmarkFunction<f64> for AttractiveSector {
	fn evaluate(&self, x: &[f64]) -> f64 {
		x.iter()
			.zip(&self.base.xopt)
			.map(|(&v, &o)| if o * v > 0.0 { 1e4 * v * v } else { v * v })
			.sum()
	}

	fn transform_variables(&self, mut x: Vec<f64>) -> Vec<f64> {
		variables::subtract(&mut x, &self.base.xopt);
		variables::rotate(&mut x, &self.base.state.second_transformation_matrix);
		x
	}

	fn transform_objectives(&self, y: f64, _raw_x: &[f64]) -> f64 {
		let y = objective::power(objective::oscillate(y), 0.9);
		objective::shift(y, self.base.yopt)
	}
}

/// Piecewise constant ellipsoid. The rounding works on the raw candidate, so
/// the whole computation happens in `evaluate`.
pub struct StepEllipsoid {
	base: BbobBase,
}

impl StepEllipsoid {
	pub fn create(instance: i32, n_variables: usize) -> Result<RealProblem, ProblemError> {
		create(7, instance, n_variables, "StepEllipsoid", default_condition(), |base| {
			let xopt = base.xopt.clone();
			(StepEllipsoid { base }, xopt)
		})
	}
}

impl BenchmarkFunction<f64> for StepEllipsoid {
	fn evaluate(&self, x: &[f64]) -> f64 {
		let n = x.len();
		let state = &self.base.state;
		let mut z: Vec<f64> = (0..n)
			.map(|i| {
				let scale = 10f64.powf(state.exponents[i]).sqrt();
				(0..n).map(|j| scale * state.second_rotation[[i, j]] * (x[j] - self.base.xopt[j])).sum()
			})
			.collect();
		let first = z[0];

		for zi in z.iter_mut() {
			*zi = if zi.abs() > 0.5 { (*zi + 0.5).floor() } else { (10.0 * *zi + 0.5).floor() / 10.0 };
		}
		variables::rotate(&mut z, &state.first_rotation);

		let weighted: f64 = z.iter().enumerate().map(|(i, v)| 100f64.powf(state.exponents[i]) * (v * v)).sum();
		0.1 * (first.abs() * 1e-4).max(weighted)
	}

	fn transform_objectives(&self, y: f64, raw_x: &[f64]) -> f64 {
		let y = objective::penalize(raw_x, LOWER_BOUND, UPPER_BOUND, 1.0, y);
		objective::shift(y, self.base.yopt)
	}
}

/// Original Rosenbrock, shifted so the optimum is at `0.75 * xopt`.
pub struct Rosenbrock {
	base: BbobBase,
	factor: f64,
}

impl Rosenbrock {
	pub fn create(instance: i32, n_variables: usize) -> Result<RealProblem, ProblemError> {
		create(8, instance, n_variables, "Rosenbrock", default_condition(), |mut base| {
			for xi in base.xopt.iter_mut() {
				*xi *= 0.75;
			}
			let xopt = base.xopt.clone();
			(Rosenbrock { base, factor: rosenbrock_factor(n_variables) }, xopt)
		})
	}
}

impl BenchmarkFunction<f64> for Rosenbrock {
	fn evaluate(&self, x: &[f64]) -> f64 {
		rosenbrock(x)
	}

	fn transform_variables(&self, mut x: Vec<f64>) -> Vec<f64> {
		variables::subtract(&mut x, &self.base.xopt);
		variables::scale(&mut x, self.factor);
		variables::shift(&mut x, 1.0);
		x
	}

	fn transform_objectives(&self, y: f64, _raw_x: &[f64]) -> f64 {
		objective::shift(y, self.base.yopt)
	}
}

/// Scaled rotation `factor * R` with offset 0.5, stored as the main affine
/// transformation of the state. Shared with Griewank-Rosenbrock.
pub(crate) fn scaled_rotation(base: &mut BbobBase) -> Vec<f64> {
	let n = base.n_variables();
	let factor = rosenbrock_factor(n);
	let state = &mut base.state;
	state.transformation_matrix = state.second_rotation.mapv(|v| factor * v);
	state.transformation_base = vec![0.5; n];
	optimum_of_scaled_rotation(&state.second_rotation, factor)
}

/// `R^T . 0.5 / factor`: the point mapped to all ones.
fn optimum_of_scaled_rotation(rotation: &Array2<f64>, factor: f64) -> Vec<f64> {
	let n = rotation.nrows();
	(0..n).map(|j| (0..n).map(|i| rotation[[i, j]] * 0.5 / factor).sum()).collect()
}

pub struct RosenbrockRotated {
	base: BbobBase,
}

impl RosenbrockRotated {
	pub fn create(instance: i32, n_variables: usize) -> Result<RealProblem, ProblemError> {
		create(9, instance, n_variables, "RosenbrockRotated", default_condition(), |mut base| {
			let xopt = scaled_rotation(&mut base);
			(RosenbrockRotated { base }, xopt)
		})
	}
}

impl BenchmarkFunction<f64> for RosenbrockRotated {
	fn evaluate(&self, x: &[f64]) -> f64 {
		rosenbrock(x)
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
