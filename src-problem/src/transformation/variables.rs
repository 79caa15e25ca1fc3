//! Transformations applied to a candidate before the raw objective sees it.
//!
//! Every function works in place on a slice owned by the caller. Functions
//! that read neighbouring or all coordinates (`affine`, `z_hat`,
//! `random_reorder`) copy the input first so no output overwrites an input
//! still to be read.

use ndarray::{Array2, ArrayView1};

use super::objective;
use crate::random;

pub fn subtract(x: &mut [f64], offset: &[f64]) {
	for (xi, oi) in x.iter_mut().zip(offset) {
		*xi -= oi;
	}
}

pub fn add(x: &mut [f64], offset: &[f64]) {
	for (xi, oi) in x.iter_mut().zip(offset) {
		*xi += oi;
	}
}

/// Adds a constant to every coordinate.
pub fn shift(x: &mut [f64], offset: f64) {
	for xi in x.iter_mut() {
		*xi += offset;
	}
}

/// `x <- m . x + b`
pub fn affine(x: &mut [f64], m: &Array2<f64>, b: &[f64]) {
	let product = m.dot(&ArrayView1::from(&*x));
	for ((xi, pi), bi) in x.iter_mut().zip(product.iter()).zip(b) {
		*xi = pi + bi;
	}
}

/// `x <- m . x`
pub fn rotate(x: &mut [f64], m: &Array2<f64>) {
	let product = m.dot(&ArrayView1::from(&*x));
	for (xi, pi) in x.iter_mut().zip(product.iter()) {
		*xi = *pi;
	}
}

pub fn scale(x: &mut [f64], factor: f64) {
	for xi in x.iter_mut() {
		*xi *= factor;
	}
}

/// Elementwise scaling by `factors`.
pub fn scale_each(x: &mut [f64], factors: &[f64]) {
	for (xi, fi) in x.iter_mut().zip(factors) {
		*xi *= fi;
	}
}

pub fn oscillate(x: &mut [f64]) {
	for xi in x.iter_mut() {
		*xi = objective::oscillate(*xi);
	}
}

/// Raises positive coordinates to `1 + beta * i/(n-1) * sqrt(x_i)`.
pub fn asymmetric(x: &mut [f64], beta: f64) {
	let n_eff = x.len() as f64 - 1.0;
	for (i, xi) in x.iter_mut().enumerate() {
		if *xi > 0.0 {
			*xi = xi.powf(1.0 + beta * i as f64 / n_eff * xi.sqrt());
		}
	}
}

/// Scales coordinate `i` by `alpha^(0.5 * i/(n-1))`.
pub fn conditioning(x: &mut [f64], alpha: f64) {
	let n_eff = x.len() as f64 - 1.0;
	for (i, xi) in x.iter_mut().enumerate() {
		*xi *= alpha.powf(0.5 * i as f64 / n_eff);
	}
}

/// Bueche-Rastrigin skew: conditioning by sqrt(10), even positive entries x10.
pub fn brs(x: &mut [f64]) {
	let n_eff = x.len() as f64 - 1.0;
	for (i, xi) in x.iter_mut().enumerate() {
		let mut factor = 10f64.sqrt().powf(i as f64 / n_eff);
		if *xi > 0.0 && i % 2 == 0 {
			factor *= 10.0;
		}
		*xi *= factor;
	}
}

/// Couples each coordinate with its predecessor's distance to the optimum.
pub fn z_hat(x: &mut [f64], xopt: &[f64]) {
	let previous = x.to_vec();
	for i in 1..x.len() {
		x[i] = previous[i] + 0.25 * (previous[i - 1] - 2.0 * xopt[i - 1].abs());
	}
}

/// Negates the coordinates whose bbob2009 draw falls below one half.
pub fn random_sign_flip(x: &mut [f64], seed: i64) {
	let u = random::bbob2009::uniform(x.len(), seed);
	for (xi, ui) in x.iter_mut().zip(u) {
		if ui < 0.5 {
			*xi = -*xi;
		}
	}
}

/// XORs every bit with a bit drawn from the pbo stream.
pub fn random_flip(x: &mut [i32], seed: i64) {
	let u = random::pbo::uniform(x.len(), seed, 0.0, 1.0);
	for (xi, ui) in x.iter_mut().zip(u) {
		*xi = objective::exclusive_or(*xi, (2.0 * (1e4 * ui).floor() / 1e4) as i32);
	}
}

fn reorder_index(n: usize, seed: i64) -> Vec<usize> {
	let u = random::pbo::uniform(n, seed, 0.0, 1.0);
	let mut index: Vec<usize> = (0..n).collect();
	for ui in u {
		let t = (ui * n as f64).floor() as usize;
		index.swap(0, t);
	}
	index
}

/// Permutes `x` with a permutation drawn from the pbo stream.
pub fn random_reorder(x: &mut [i32], seed: i64) {
	let index = reorder_index(x.len(), seed);
	let copy = x.to_vec();
	for (xi, &j) in x.iter_mut().zip(&index) {
		*xi = copy[j];
	}
}

/// Inverse of [`random_reorder`] for the same seed.
pub fn random_reorder_reset(reordered: &[i32], seed: i64) -> Vec<i32> {
	let index = reorder_index(reordered.len(), seed);
	let mut x = vec![0; reordered.len()];
	for (i, &j) in index.iter().enumerate() {
		x[j] = reordered[i];
	}
	x
}

#[cfg(test)]
mod tests {
	use super::*;
	use ndarray::array;

	#[test]
	fn test_affine_reads_the_old_vector() {
		let m = array![[0.0, 1.0], [1.0, 0.0]];
		let mut x = vec![1.0, 2.0];
		affine(&mut x, &m, &[10.0, 20.0]);
		assert_eq!(x, vec![12.0, 21.0]);
	}

	#[test]
	fn test_rotate_matches_affine_without_offset() {
		let m = array![[1.0, 2.0], [3.0, 4.0]];
		let mut a = vec![0.5, -1.0];
		let mut b = a.clone();
		rotate(&mut a, &m);
		affine(&mut b, &m, &[0.0, 0.0]);
		assert_eq!(a, b);
	}

	#[test]
	fn test_asymmetric_leaves_non_positive() {
		let mut x = vec![-1.0, 0.0, 4.0];
		asymmetric(&mut x, 0.5);
		assert_eq!(x[0], -1.0);
		assert_eq!(x[1], 0.0);
		assert_eq!(x[2], 4f64.powf(1.0 + 0.5 * 2.0));
	}

	#[test]
	fn test_conditioning_ramp() {
		let mut x = vec![1.0, 1.0, 1.0];
		conditioning(&mut x, 100.0);
		assert_eq!(x[0], 1.0);
		assert!((x[2] - 10.0).abs() < 1e-12);
	}

	#[test]
	fn test_scale_each_matches_conditioning() {
		let mut ramp = vec![2.0, -1.0, 0.5];
		conditioning(&mut ramp, 100.0);
		let mut scaled = vec![2.0, -1.0, 0.5];
		scale_each(&mut scaled, &[1.0, 100f64.powf(0.25), 10.0]);
		for (a, b) in ramp.iter().zip(&scaled) {
			assert!((a - b).abs() < 1e-12);
		}
	}

	#[test]
	fn test_z_hat_uses_previous_values() {
		let mut x = vec![1.0, 1.0, 1.0];
		z_hat(&mut x, &[0.5, 0.5, 0.5]);
		assert_eq!(x, vec![1.0, 1.0, 1.0]);
		let mut x = vec![2.0, 0.0, 0.0];
		z_hat(&mut x, &[0.0, 0.0, 0.0]);
		assert_eq!(x, vec![2.0, 0.5, 0.0]);
	}

	#[test]
	fn test_reorder_reset_inverts() {
		let x: Vec<i32> = (0..17).collect();
		let mut y = x.clone();
		random_reorder(&mut y, 57);
		assert_eq!(random_reorder_reset(&y, 57), x);
	}

	#[test]
	fn test_random_flip_is_an_involution() {
		let x = vec![1, 0, 1, 1, 0, 0, 1, 0];
		let mut y = x.clone();
		random_flip(&mut y, 2);
		random_flip(&mut y, 2);
		assert_eq!(x, y);
	}
}
