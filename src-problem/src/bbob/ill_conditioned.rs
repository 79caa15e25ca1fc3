//! Unimodal functions with high conditioning (ids 10 to 14).

use super::{BbobBase, create, default_condition, ellipsoid};
use crate::error::ProblemError;
use crate::problem::{BenchmarkFunction, RealProblem};
use crate::transformation::{objective, variables};

pub struct EllipsoidRotated {
	base: BbobBase,
}

impl EllipsoidRotated {
	pub fn create(instance: i32, n_variables: usize) -> Result<RealProblem, ProblemError> {
		create(10, instance, n_variables, "EllipsoidRotated", default_condition(), |base| {
			let xopt = base.xopt.clone();
			(EllipsoidRotated { base }, xopt)
		})
	}
}

impl BenchmarkFunction<f64> for EllipsoidRotated {
	fn evaluate(&self, x: &[f64]) -> f64 {
		ellipsoid(x)
	}

	fn transform_variables(&self, mut x: Vec<f64>) -> Vec<f64> {
		let state = &self.base.state;
		variables::subtract(&mut x, &self.base.xopt);
		variables::affine(&mut x, &state.transformation_matrix, &state.transformation_base);
		variables::oscillate(&mut x);
		x
	}

	fn transform_objectives(&self, y: f64, _raw_x: &[f64]) -> f64 {
		objective::shift(y, self.base.yopt)
	}
}

/// One direction a million times more sensitive than the others.
pub struct Discus {
	base: BbobBase,
}

impl Discus {
	pub fn create(instance: i32, n_variables: usize) -> Result<RealProblem, ProblemError> {
		create(11, instance, n_variables, "Discus", default_condition(), |base| {
			let xopt = base.xopt.clone();
			(Discus { base }, xopt)
		})
	}
}

impl BenchmarkFunction<f64> for Discus {
	fn evaluate(&self, x: &[f64]) -> f64 {
		let rest: f64 = x[1..].iter().map(|v| v * v).sum();
		1e6 * (x[0] * x[0]) + rest
	}

	fn transform_variables(&self, mut x: Vec<f64>) -> Vec<f64> {
		let state = &self.base.state;
		variables::subtract(&mut x, &self.base.xopt);
		variables::affine(&mut x, &state.transformation_matrix, &state.transformation_base);
		variables::oscillate(&mut x);
		x
	}

	fn transform_objectives(&self, y: f64, _raw_x: &[f64]) -> f64 {
		objective::shift(y, self.base.yopt)
	}
}

/// A narrow ridge: every direction but one is a million times more sensitive.
pub struct BentCigar {
	base: BbobBase,
}

impl BentCigar {
	pub fn create(instance: i32, n_variables: usize) -> Result<RealProblem, ProblemError> {
		create(12, instance, n_variables, "BentCigar", default_condition(), |base| {
			let xopt = base.xopt.clone();
			(BentCigar { base }, xopt)
		})
	}
}

impl BenchmarkFunction<f64> for BentCigar {
	fn evaluate(&self, x: &[f64]) -> f64 {
		let rest: f64 = x[1..].iter().map(|v| v * v).sum();
		x[0] * x[0] + 1e6 * rest
	}

	fn transform_variables(&self, mut x: Vec<f64>) -> Vec<f64> {
		let state = &self.base.state;
		variables::subtract(&mut x, &self.base.xopt);
		variables::affine(&mut x, &state.transformation_matrix, &state.transformation_base);
		variables::asymmetric(&mut x, 0.5);
		variables::affine(&mut x, &state.transformation_matrix, &state.transformation_base);
		x
	}

	fn transform_objectives(&self, y: f64, _raw_x: &[f64]) -> f64 {
		objective::shift(y, self.base.yopt)
	}
}

pub struct SharpRidge {
	base: BbobBase,
}

impl SharpRidge {
	pub fn create(instance: i32, n_variables: usize) -> Result<RealProblem, ProblemError> {
		create(13, instance, n_variables, "SharpRidge", default_condition(), |base| {
			let xopt = base.xopt.clone();
			(SharpRidge { base }, xopt)
		})
	}
}

impl BenchmarkFunction<f64> for SharpRidge {
	fn evaluate(&self, x: &[f64]) -> f64 {
		let rest: f64 = x[1..].iter().map(|v| v * v).sum();
		100.0 * rest.sqrt() + x[0] * x[0]
	}

	fn transform_variables(&self, mut x: Vec<f64>) -> Vec<f64> {
		variables::subtract(&mut x, &self.base.xopt);
		variables::rotate(&mut x, &self.base.state.second_transformation_matrix);
		x
	}

	fn transform_objectives(&self, y: f64, _raw_x: &[f64]) -> f64 {
		objective::shift(y, self.base.yopt)
	}
}

/// Sum of different powers: sensitivity grows with the coordinate index.
pub struct DifferentPowers {
	base: BbobBase,
}

impl DifferentPowers {
	pub fn create(instance: i32, n_variables: usize) -> Result<RealProblem, ProblemError> {
		create(14, instance, n_variables, "DifferentPowers", default_condition(), |base| {
			let xopt = base.xopt.clone();
			(DifferentPowers { base }, xopt)
		})
	}
}

impl BenchmarkFunction<f64> for DifferentPowers {
	fn evaluate(&self, x: &[f64]) -> f64 {
		let n_eff = x.len() as f64 - 1.0;
		x.iter()
			.enumerate()
			.map(|(i, v)| v.abs().powf(2.0 + 4.0 * i as f64 / n_eff))
			.sum::<f64>()
			.sqrt()
	}

	fn transform_variables(&self, mut x: Vec<f64>) -> Vec<f64> {
		let state = &self.base.state;
		variables::subtract(&mut x, &self.base.xopt);
		variables::affine(&mut x, &state.transformation_matrix, &state.transformation_base);
		x
	}

	fn transform_objectives(&self, y: f64, _raw_x: &[f64]) -> f64 {
		objective::shift(y, self.base.yopt)
	}
}
