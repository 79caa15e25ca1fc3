//! Multimodal functions with weak global structure (ids 20 to 24).

use std::cmp::Ordering;
use std::f64::consts::PI;

use ndarray::Array2;

use super::{BbobBase, LOWER_BOUND, UPPER_BOUND, create, default_condition, random_signs};
use crate::error::ProblemError;
use crate::problem::{BenchmarkFunction, RealProblem};
use crate::random;
use crate::transformation::{objective, variables};

/// Indices that sort `values` ascending (stable).
fn argsort(values: &[f64]) -> Vec<usize> {
	let mut index: Vec<usize> = (0..values.len()).collect();
	index.sort_by(|&a, &b| values[a].partial_cmp(&values[b]).unwrap_or(Ordering::Equal));
	index
}

const SCHWEFEL_OPTIMUM: f64 = 4.2096874637;
const SCHWEFEL_CONSTANT: f64 = 418.9828872724339;

pub struct Schwefel {
	base: BbobBase,
	/// `2 |xopt|`, the offset removed around the conditioning
	doubled_abs_optimum: Vec<f64>,
}

impl Schwefel {
	pub fn create(instance: i32, n_variables: usize) -> Result<RealProblem, ProblemError> {
		create(20, instance, n_variables, "Schwefel", default_condition(), |mut base| {
			base.xopt = random_signs(n_variables, base.state.seed)
				.into_iter()
				.map(|s| s * 0.5 * SCHWEFEL_OPTIMUM)
				.collect();
			let doubled_abs_optimum = base.xopt.iter().map(|v| 2.0 * v.abs()).collect();
			let xopt = base.xopt.clone();
			(Schwefel { base, doubled_abs_optimum }, xopt)
		})
	}
}

impl BenchmarkFunction<f64> for Schwefel {
	fn evaluate(&self, x: &[f64]) -> f64 {
		let n = x.len() as f64;
		let penalty: f64 = x.iter().filter(|v| v.abs() > 500.0).map(|v| (v.abs() - 500.0).powi(2)).sum();
		let total: f64 = x.iter().map(|v| v * v.abs().sqrt().sin()).sum();
		0.01 * (penalty + SCHWEFEL_CONSTANT - total / n)
	}

	fn transform_variables(&self, mut x: Vec<f64>) -> Vec<f64> {
		variables::random_sign_flip(&mut x, self.base.state.seed);
		variables::scale(&mut x, 2.0);
		variables::z_hat(&mut x, &self.base.xopt);
		variables::subtract(&mut x, &self.doubled_abs_optimum);
		variables::conditioning(&mut x, 10.0);
		variables::add(&mut x, &self.doubled_abs_optimum);
		variables::scale(&mut x, 100.0);
		x
	}

	fn transform_objectives(&self, y: f64, _raw_x: &[f64]) -> f64 {
		objective::shift(y, self.base.yopt)
	}
}

/// Gallagher's Gaussian peaks: 101 (id 21) or 21 (id 22) local optima with
/// random positions, heights and conditioning.
pub struct Gallagher {
	base: BbobBase,
	peak_values: Vec<f64>,
	/// `scales[[peak, coordinate]]`
	scales: Array2<f64>,
	/// `local_optima[[coordinate, peak]]`, already rotated
	local_optima: Array2<f64>,
}

impl Gallagher {
	pub fn create_101(instance: i32, n_variables: usize) -> Result<RealProblem, ProblemError> {
		Self::create(21, "Gallagher101", 101, 10.0, 5.0, instance, n_variables)
	}

	pub fn create_21(instance: i32, n_variables: usize) -> Result<RealProblem, ProblemError> {
		Self::create(22, "Gallagher21", 21, 9.8, 4.9, instance, n_variables)
	}

	fn create(
		problem_id: i32,
		name: &str,
		n_peaks: usize,
		spread: f64,
		center: f64,
		instance: i32,
		n_variables: usize,
	) -> Result<RealProblem, ProblemError> {
		create(problem_id, instance, n_variables, name, default_condition(), |mut base| {
			let n = n_variables;
			let seed = base.state.seed;
			let n_eff = n as f64 - 1.0;

			let peak_order = argsort(&random::bbob2009::uniform(n_peaks - 1, seed));
			let conditions: Vec<f64> = std::iter::once(1000.0)
				.chain(peak_order.iter().map(|&r| 1000f64.powf(r as f64 / (n_peaks as f64 - 2.0))))
				.collect();
			let peak_values: Vec<f64> = std::iter::once(10.0)
				.chain((1..n_peaks).map(|i| (i - 1) as f64 / (n_peaks as f64 - 2.0) * 8.0 + 1.1))
				.collect();

			let mut scales = Array2::<f64>::zeros((n_peaks, n));
			for (i, condition) in conditions.iter().enumerate() {
				let order = argsort(&random::bbob2009::uniform(n, seed + 1000 * i as i64));
				for j in 0..n {
					scales[[i, j]] = condition.powf(order[j] as f64 / n_eff - 0.5);
				}
			}

			let u = random::bbob2009::uniform(n * n_peaks, seed);
			let rotation = &base.state.second_rotation;
			let mut local_optima = Array2::<f64>::zeros((n, n_peaks));
			for i in 0..n {
				for j in 0..n_peaks {
					local_optima[[i, j]] = (0..n).map(|k| rotation[[i, k]] * (spread * u[j * n + k] - center)).sum();
					if j == 0 {
						local_optima[[i, j]] *= 0.8;
					}
				}
			}

			base.xopt = u[..n].iter().map(|v| 0.8 * (spread * v - center)).collect();
			let xopt = base.xopt.clone();
			(Gallagher { base, peak_values, scales, local_optima }, xopt)
		})
	}
}

impl BenchmarkFunction<f64> for Gallagher {
	fn evaluate(&self, x: &[f64]) -> f64 {
		let n = x.len();
		let mut best = 0.0f64;
		for (i, peak) in self.peak_values.iter().enumerate() {
			let distance: f64 =
				(0..n).map(|j| self.scales[[i, j]] * (x[j] - self.local_optima[[j, i]]).powi(2)).sum();
			best = best.max(peak * (-0.5 / n as f64 * distance).exp());
		}
		let y = objective::oscillate(10.0 - best);
		y * y
	}

	fn transform_variables(&self, mut x: Vec<f64>) -> Vec<f64> {
		variables::rotate(&mut x, &self.base.state.second_rotation);
		x
	}

	fn transform_objectives(&self, y: f64, raw_x: &[f64]) -> f64 {
		let y = objective::penalize(raw_x, LOWER_BOUND, UPPER_BOUND, 1.0, y);
		objective::shift(y, self.base.yopt)
	}
}

pub struct Katsuura {
	base: BbobBase,
}

impl Katsuura {
	pub fn create(instance: i32, n_variables: usize) -> Result<RealProblem, ProblemError> {
		create(23, instance, n_variables, "Katsuura", 100f64.sqrt(), |base| {
			let xopt = base.xopt.clone();
			(Katsuura { base }, xopt)
		})
	}
}

impl BenchmarkFunction<f64> for Katsuura {
	fn evaluate(&self, x: &[f64]) -> f64 {
		let n = x.len() as f64;
		let exponent = 10.0 / n.powf(1.2);
		let product = x.iter().enumerate().fold(1.0, |acc, (i, &v)| {
			let roughness: f64 = (1..=32)
				.map(|j| {
					let p = 2f64.powi(j);
					(p * v - (p * v + 0.5).floor()).abs() / p
				})
				.sum();
			acc * (1.0 + (i + 1) as f64 * roughness).powf(exponent)
		});
		10.0 / n / n * (product - 1.0)
	}

	fn transform_variables(&self, mut x: Vec<f64>) -> Vec<f64> {
		variables::subtract(&mut x, &self.base.xopt);
		variables::rotate(&mut x, &self.base.state.second_transformation_matrix);
		x
	}

	fn transform_objectives(&self, y: f64, raw_x: &[f64]) -> f64 {
		let y = objective::shift(y, self.base.yopt);
		objective::penalize(raw_x, LOWER_BOUND, UPPER_BOUND, 1.0, y)
	}
}

/// Double-funnel Rastrigin. The variable transform only mirrors and doubles
/// the candidate; both funnels and the rotated Rastrigin term are computed
/// in `evaluate`.
pub struct LunacekBiRastrigin {
	base: BbobBase,
	mu0: f64,
	mu1: f64,
	s: f64,
}

impl LunacekBiRastrigin {
	const D: f64 = 1.0;
	const PENALTY_FACTOR: f64 = 1e4;

	pub fn create(instance: i32, n_variables: usize) -> Result<RealProblem, ProblemError> {
		create(24, instance, n_variables, "LunacekBiRastrigin", 100f64.sqrt(), |mut base| {
			base.xopt = random::bbob2009::normal(n_variables, base.state.seed)
				.into_iter()
				.map(|g| if g < 0.0 { -1.25 } else { 1.25 })
				.collect();
			let mu0 = 2.5;
			let s = 1.0 - 0.5 / ((n_variables as f64 + 20.0).sqrt() - 4.1);
			let mu1 = -((mu0 * mu0 - Self::D) / s).sqrt();
			let xopt = base.xopt.clone();
			(LunacekBiRastrigin { base, mu0, mu1, s }, xopt)
		})
	}
}

impl BenchmarkFunction<f64> for LunacekBiRastrigin {
	fn evaluate(&self, x: &[f64]) -> f64 {
		let n = x.len();
		let state = &self.base.state;
		let mut z: Vec<f64> = (0..n)
			.map(|i| {
				(0..n).map(|j| state.conditions[i] * state.second_rotation[[i, j]] * (x[j] - self.mu0)).sum()
			})
			.collect();
		variables::rotate(&mut z, &state.first_rotation);

		let first_funnel: f64 = x.iter().map(|v| (v - self.mu0).powi(2)).sum();
		let second_funnel: f64 = x.iter().map(|v| (v - self.mu1).powi(2)).sum();
		let cosines: f64 = z.iter().map(|v| (2.0 * PI * v).cos()).sum();
		first_funnel.min(Self::D * n as f64 + self.s * second_funnel) + 10.0 * (n as f64 - cosines)
	}

	fn transform_variables(&self, mut x: Vec<f64>) -> Vec<f64> {
		for (xi, oi) in x.iter_mut().zip(&self.base.xopt) {
			*xi = if *oi < 0.0 { -2.0 * *xi } else { 2.0 * *xi };
		}
		x
	}

	fn transform_objectives(&self, y: f64, raw_x: &[f64]) -> f64 {
		let y = objective::penalize(raw_x, LOWER_BOUND, UPPER_BOUND, Self::PENALTY_FACTOR, y);
		objective::shift(y, self.base.yopt)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_argsort_is_stable() {
		assert_eq!(argsort(&[0.3, 0.1, 0.2, 0.1]), vec![1, 3, 2, 0]);
	}

	#[test]
	fn test_gallagher_global_peak() {
		for mut p in [Gallagher::create_101(1, 5).unwrap(), Gallagher::create_21(1, 5).unwrap()] {
			let base = BbobBase::new(p.meta_data().problem_id(), 1, 5, default_condition()).unwrap();
			let x = p.optimum().x.clone();
			assert!((p.call(&x) - base.yopt).abs() < 1e-8);
		}
	}

	#[test]
	fn test_lunacek_optimum_is_exact() {
		let mut p = LunacekBiRastrigin::create(1, 4).unwrap();
		assert!(p.optimum().x.iter().all(|v| v.abs() == 1.25));
		let base = BbobBase::new(24, 1, 4, 10.0).unwrap();
		let x = p.optimum().x.clone();
		assert_eq!(p.call(&x), base.yopt);
	}

	#[test]
	fn test_schwefel_optimum_pattern() {
		let p = Schwefel::create(1, 6).unwrap();
		assert!(p.optimum().x.iter().all(|v| (v.abs() - 0.5 * SCHWEFEL_OPTIMUM).abs() < 1e-15));
	}
}
