//! Separable functions (ids 1 to 5).

use super::{BbobBase, LOWER_BOUND, UPPER_BOUND, create, default_condition, ellipsoid, rastrigin};
use crate::error::ProblemError;
use crate::problem::{BenchmarkFunction, RealProblem};
use crate::transformation::{objective, variables};

pub struct Sphere {
	base: BbobBase,
}

impl Sphere {
	pub fn create(instance: i32, n_variables: usize) -> Result<RealProblem, ProblemError> {
		create(1, instance, n_variables, "Sphere", default_condition(), |base| {
			let xopt = base.xopt.clone();
			(Sphere { base }, xopt)
		})
	}
}

impl BenchmarkFunction<f64> for Sphere {
	fn evaluate(&self, x: &[f64]) -> f64 {
		x.iter().map(|v| v * v).sum()
	}

	fn transform_variables(&self, mut x: Vec<f64>) -> Vec<f64> {
		variables::subtract(&mut x, &self.base.xopt);
		x
	}

	fn transform_objectives(&self, y: f64, _raw_x: &[f64]) -> f64 {
		objective::shift(y, self.base.yopt)
	}
}

pub struct Ellipsoid {
	base: BbobBase,
}

impl Ellipsoid {
	pub fn create(instance: i32, n_variables: usize) -> Result<RealProblem, ProblemError> {
		create(2, instance, n_variables, "Ellipsoid", default_condition(), |base| {
			let xopt = base.xopt.clone();
			(Ellipsoid { base }, xopt)
		})
	}
}

impl BenchmarkFunction<f64> for Ellipsoid {
	fn evaluate(&self, x: &[f64]) -> f64 {
		ellipsoid(x)
	}

	fn transform_variables(&self, mut x: Vec<f64>) -> Vec<f64> {
		variables::subtract(&mut x, &self.base.xopt);
		variables::oscillate(&mut x);
		x
	}

	fn transform_objectives(&self, y: f64, _raw_x: &[f64]) -> f64 {
		objective::shift(y, self.base.yopt)
	}
}

pub struct Rastrigin {
	base: BbobBase,
}

impl Rastrigin {
	pub fn create(instance: i32, n_variables: usize) -> Result<RealProblem, ProblemError> {
		create(3, instance, n_variables, "Rastrigin", default_condition(), |base| {
			let xopt = base.xopt.clone();
			(Rastrigin { base }, xopt)
		})
	}
}

impl BenchmarkFunction<f64> for Rastrigin {
	fn evaluate(&self, x: &[f64]) -> f64 {
		rastrigin(x)
	}

	fn transform_variables(&self, mut x: Vec<f64>) -> Vec<f64> {
		variables::subtract(&mut x, &self.base.xopt);
		variables::oscillate(&mut x);
		variables::asymmetric(&mut x, 0.2);
		variables::conditioning(&mut x, 10.0);
		x
	}

	fn transform_objectives(&self, y: f64, _raw_x: &[f64]) -> f64 {
		objective::shift(y, self.base.yopt)
	}
}

/// Rastrigin with a skew favouring positive even coordinates; the optimum
/// lies in the positive orthant of those coordinates.
pub struct BuecheRastrigin {
	base: BbobBase,
}

impl BuecheRastrigin {
	const PENALTY_FACTOR: f64 = 100.0;

	pub fn create(instance: i32, n_variables: usize) -> Result<RealProblem, ProblemError> {
		create(4, instance, n_variables, "BuecheRastrigin", default_condition(), |mut base| {
			for xi in base.xopt.iter_mut().step_by(2) {
				*xi = xi.abs();
			}
			let xopt = base.xopt.clone();
			(BuecheRastrigin { base }, xopt)
		})
	}
}

impl BenchmarkFunction<f64> for BuecheRastrigin {
	fn evaluate(&self, x: &[f64]) -> f64 {
		rastrigin(x)
	}

	fn transform_variables(&self, mut x: Vec<f64>) -> Vec<f64> {
		variables::subtract(&mut x, &self.base.xopt);
		variables::oscillate(&mut x);
		variables::brs(&mut x);
		x
	}

	fn transform_objectives(&self, y: f64, raw_x: &[f64]) -> f64 {
		let y = objective::shift(y, self.base.yopt);
		objective::penalize(raw_x, LOWER_BOUND, UPPER_BOUND, Self::PENALTY_FACTOR, y)
	}
}

/// Linear function whose optimum sits on a corner of the box.
pub struct LinearSlope {
	base: BbobBase,
}

impl LinearSlope {
	pub fn create(instance: i32, n_variables: usize) -> Result<RealProblem, ProblemError> {
		create(5, instance, n_variables, "LinearSlope", default_condition(), |mut base| {
			for xi in base.xopt.iter_mut() {
				*xi = if *xi < 0.0 { LOWER_BOUND } else { UPPER_BOUND };
			}
			let xopt = base.xopt.clone();
			(LinearSlope { base }, xopt)
		})
	}
}

impl BenchmarkFunction<f64> for LinearSlope {
	fn evaluate(&self, x: &[f64]) -> f64 {
		let xopt = &self.base.xopt;
		let mut result = 0.0;
		for (i, (&xi, &oi)) in x.iter().zip(xopt).enumerate() {
			let slope = 100f64.sqrt().powf(self.base.state.exponents[i]);
			let si = if oi > 0.0 { slope } else { -slope };
			result += if xi * oi < UPPER_BOUND * UPPER_BOUND {
				5.0 * si.abs() - si * xi
			} else {
				5.0 * si.abs() - si * oi
			};
		}
		result
	}

	fn transform_objectives(&self, y: f64, _raw_x: &[f64]) -> f64 {
		objective::shift(y, self.base.yopt)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_sphere_regression() {
		let mut p = Sphere::create(1, 1).unwrap();
		assert!((p.call(&[10.0]) - 174.48792).abs() < 1e-4);
		let x = p.optimum().x.clone();
		assert_eq!(p.call(&x), p.optimum().y);
		assert!(p.state().optimum_found);
	}

	#[test]
	fn test_bueche_rastrigin_optimum() {
		let mut p = BuecheRastrigin::create(1, 2).unwrap();
		assert!(p.optimum().x.iter().step_by(2).all(|&x| x >= 0.0));
		let x = p.optimum().x.clone();
		assert_eq!(p.call(&x), p.optimum().y);
	}

	#[test]
	fn test_linear_slope_is_flat_beyond_the_corner() {
		let mut p = LinearSlope::create(3, 3).unwrap();
		let corner = p.optimum().x.clone();
		let beyond: Vec<f64> = corner.iter().map(|v| v * 1.2).collect();
		assert_eq!(p.call(&corner), p.call(&beyond));
		assert!(corner.iter().all(|v| v.abs() == 5.0));
	}
}
