//! Ising models on a ring, a square torus and a triangular torus (ids 19 to 21).
//!
//! Each edge whose endpoints agree contributes one, so both constant strings
//! are optimal.

use super::{Target, create, square_side};
use crate::error::ProblemError;
use crate::problem::IntegerProblem;

fn agreement(a: i32, b: i32) -> f64 {
	(a * b + (1 - a) * (1 - b)) as f64
}

fn ring(x: &[i32]) -> f64 {
	let n = x.len();
	(0..n).map(|i| agreement(x[i], x[(i + n - 1) % n])).sum()
}

fn torus(x: &[i32], side: usize, diagonal: bool) -> f64 {
	let at = |i: usize, j: usize| x[i * side + j];
	let mut total = 0.0;
	for i in 0..side {
		for j in 0..side {
			let centre = at(i, j);
			let down = (i + 1) % side;
			let right = (j + 1) % side;
			total += agreement(centre, at(down, j)) + agreement(centre, at(i, right));
			if diagonal {
				total += agreement(centre, at(down, right));
			}
		}
	}
	total
}

pub struct IsingRing;

impl IsingRing {
	pub fn create(instance: i32, n_variables: usize) -> Result<IntegerProblem, ProblemError> {
		create(19, instance, n_variables, "IsingRing", Target::At(vec![1; n_variables]), ring)
	}
}

/// Requires a square number of variables.
pub struct IsingTorus;

impl IsingTorus {
	pub fn create(instance: i32, n_variables: usize) -> Result<IntegerProblem, ProblemError> {
		let side = square_side("IsingTorus", n_variables)?;
		create(20, instance, n_variables, "IsingTorus", Target::At(vec![1; n_variables]), move |x| {
			torus(x, side, false)
		})
	}
}

/// Square torus with one diagonal added to every cell. Requires a square
/// number of variables.
pub struct IsingTriangular;

impl IsingTriangular {
	pub fn create(instance: i32, n_variables: usize) -> Result<IntegerProblem, ProblemError> {
		let side = square_side("IsingTriangular", n_variables)?;
		create(21, instance, n_variables, "IsingTriangular", Target::At(vec![1; n_variables]), move |x| {
			torus(x, side, true)
		})
	}
}
