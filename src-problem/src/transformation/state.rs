//! Per-instance transformation data shared by the BBOB functions.

use ndarray::Array2;

use crate::error::ProblemError;
use crate::random;

/// Everything an instance derives from `(problem_id, instance, n_variables)`.
///
/// Built once at construction and never regenerated: `reset` on a problem
/// keeps the same landscape.
#[derive(Debug, Clone)]
pub struct TransformationState {
	pub seed: i64,
	/// `i / (n - 1)`; NaN for a single variable
	pub exponents: Vec<f64>,
	/// `condition^exponents[i]`
	pub conditions: Vec<f64>,
	pub first_rotation: Array2<f64>,
	pub second_rotation: Array2<f64>,
	/// Main affine matrix; the first rotation unless a function replaces it
	pub transformation_matrix: Array2<f64>,
	/// Offset of the main affine transformation
	pub transformation_base: Vec<f64>,
	/// `first_rotation . diag(conditions) . second_rotation`
	pub second_transformation_matrix: Array2<f64>,
}

impl TransformationState {
	pub fn new(problem_id: i32, instance: i32, n_variables: usize, condition: f64) -> Result<Self, ProblemError> {
		let seed = instance_seed(problem_id, instance);
		let exponents: Vec<f64> = (0..n_variables).map(|i| i as f64 / (n_variables as f64 - 1.0)).collect();
		let conditions: Vec<f64> = exponents.iter().map(|&e| condition.powf(e)).collect();
		let first_rotation = rotation(n_variables, seed + 1_000_000)?;
		let second_rotation = rotation(n_variables, seed)?;

		let mut second_transformation_matrix = Array2::<f64>::zeros((n_variables, n_variables));
		for i in 0..n_variables {
			for j in 0..n_variables {
				for k in 0..n_variables {
					second_transformation_matrix[[i, j]] +=
						first_rotation[[i, k]] * conditions[k] * second_rotation[[k, j]];
				}
			}
		}

		Ok(Self {
			seed,
			exponents,
			conditions,
			transformation_matrix: first_rotation.clone(),
			transformation_base: vec![0.0; n_variables],
			first_rotation,
			second_rotation,
			second_transformation_matrix,
		})
	}

	/// Default conditioning of sqrt(10).
	pub fn with_default_condition(problem_id: i32, instance: i32, n_variables: usize) -> Result<Self, ProblemError> {
		Self::new(problem_id, instance, n_variables, 10f64.sqrt())
	}

	pub fn n_variables(&self) -> usize {
		self.exponents.len()
	}
}

/// Problems 4 and 18 reuse the seed family of their predecessor.
pub fn instance_seed(problem_id: i32, instance: i32) -> i64 {
	let base = if problem_id == 4 || problem_id == 18 { problem_id - 1 } else { problem_id };
	base as i64 + 10_000 * instance as i64
}

/// Orthonormal `n x n` matrix: modified Gram-Schmidt on the columns of a
/// Gaussian matrix filled column-major from the bbob2009 stream.
pub fn rotation(n: usize, seed: i64) -> Result<Array2<f64>, ProblemError> {
	if n == 0 {
		return Err(ProblemError::InvalidDimension(0));
	}
	let gauss = random::bbob2009::normal(n * n, seed);
	let mut m = Array2::<f64>::from_shape_fn((n, n), |(i, j)| gauss[j * n + i]);

	for i in 0..n {
		for j in 0..i {
			let prod: f64 = (0..n).map(|k| m[[k, i]] * m[[k, j]]).sum();
			for k in 0..n {
				m[[k, i]] -= prod * m[[k, j]];
			}
		}
		let norm = (0..n).map(|k| m[[k, i]] * m[[k, i]]).sum::<f64>().sqrt();
		for k in 0..n {
			m[[k, i]] /= norm;
		}
	}
	Ok(m)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn assert_orthonormal(m: &Array2<f64>) {
		let product = m.t().dot(m);
		let n = m.nrows();
		for i in 0..n {
			for j in 0..n {
				let expected = if i == j { 1.0 } else { 0.0 };
				assert!((product[[i, j]] - expected).abs() < 1e-12, "({}, {}) = {}", i, j, product[[i, j]]);
			}
		}
	}

	#[test]
	fn test_rotations_are_orthonormal() {
		for n in [1, 2, 5, 20, 40] {
			assert_orthonormal(&rotation(n, 10001).unwrap());
			assert_orthonormal(&rotation(n, 1_010_015).unwrap());
		}
	}

	#[test]
	fn test_seed_special_cases() {
		assert_eq!(instance_seed(4, 1), 10003);
		assert_eq!(instance_seed(18, 2), 20017);
		assert_eq!(instance_seed(5, 3), 30005);
	}

	#[test]
	fn test_state_layout() {
		let state = TransformationState::with_default_condition(1, 1, 4).unwrap();
		assert_eq!(state.seed, 10001);
		assert_eq!(state.exponents, vec![0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0]);
		assert_eq!(state.transformation_matrix, state.first_rotation);
		assert_eq!(state.transformation_base, vec![0.0; 4]);
		assert!((state.conditions[3] - 10f64.sqrt()).abs() < 1e-15);
		assert_ne!(state.first_rotation, state.second_rotation);
	}

	#[test]
	fn test_unit_condition_gives_product_of_rotations() {
		let state = TransformationState::new(3, 2, 6, 1.0).unwrap();
		let product = state.first_rotation.dot(&state.second_rotation);
		for (a, b) in product.iter().zip(state.second_transformation_matrix.iter()) {
			assert!((a - b).abs() < 1e-12);
		}
	}

	#[test]
	fn test_zero_dimension_is_rejected() {
		assert!(matches!(rotation(0, 10001), Err(ProblemError::InvalidDimension(0))));
		assert!(matches!(TransformationState::new(1, 1, 0, 10.0), Err(ProblemError::InvalidDimension(0))));
	}
}
