//! Transformations applied to a raw objective value.

use crate::random;

pub fn shift(y: f64, offset: f64) -> f64 {
	y + offset
}

pub fn scale(y: f64, factor: f64) -> f64 {
	y * factor
}

pub fn power(y: f64, exponent: f64) -> f64 {
	y.powf(exponent)
}

/// Sign preserving ripple in log space; zero stays zero.
pub fn oscillate(y: f64) -> f64 {
	oscillate_with(y, 0.1)
}

pub fn oscillate_with(y: f64, factor: f64) -> f64 {
	if y == 0.0 {
		return y;
	}
	let t = y.abs().ln() / factor;
	if y > 0.0 {
		(t + 0.49 * (t.sin() + (0.79 * t).sin())).exp().powf(factor)
	} else {
		-(t + 0.49 * ((0.55 * t).sin() + (0.31 * t).sin())).exp().powf(factor)
	}
}

/// Multiply by a factor in `[0.2, 5)` drawn from the pbo stream.
pub fn uniform_scale(y: f64, seed: i64) -> f64 {
	scale(y, random::pbo::uniform(1, seed, 0.2, 5.0)[0])
}

/// Add an offset in `[-1000, 1000)` drawn from the pbo stream.
pub fn uniform_shift(y: f64, seed: i64) -> f64 {
	shift(y, random::pbo::uniform(1, seed, -1e3, 1e3)[0])
}

/// Sum of squared distances of `x` outside `[lb, ub]`.
pub fn box_violation(x: &[f64], lb: f64, ub: f64) -> f64 {
	x.iter()
		.map(|&xi| {
			if xi > ub {
				(xi - ub).powi(2)
			} else if xi < lb {
				(lb - xi).powi(2)
			} else {
				0.0
			}
		})
		.sum()
}

/// Exterior quadratic penalty: `y + factor * box_violation(x)`.
pub fn penalize(x: &[f64], lb: f64, ub: f64, factor: f64, y: f64) -> f64 {
	y + factor * box_violation(x, lb, ub)
}

/// XOR on 0/1 integers.
pub fn exclusive_or(a: i32, b: i32) -> i32 {
	(a != b) as i32
}
