//! Linear, LABS, MIS, N-queens, concatenated trap and NK landscapes
//! (ids 3, 18 and 22 to 25).

use super::{Target, create, square_side};
use crate::error::ProblemError;
use crate::problem::IntegerProblem;
use crate::random;

/// `sum (i + 1) x_i`.
pub struct Linear;

impl Linear {
	pub fn create(instance: i32, n_variables: usize) -> Result<IntegerProblem, ProblemError> {
		create(3, instance, n_variables, "Linear", Target::At(vec![1; n_variables]), |x| {
			x.iter().enumerate().map(|(i, &v)| (i + 1) as f64 * v as f64).sum()
		})
	}
}

/// Merit factor of the `+-1` sequence: `n^2 / (2 * sum_k C_k^2)` with
/// `C_k` the aperiodic autocorrelation at lag `k`.
pub struct Labs;

fn merit_factor(x: &[i32]) -> f64 {
	let n = x.len();
	let s: Vec<f64> = x.iter().map(|&v| if v == 1 { 1.0 } else { -1.0 }).collect();
	let energy: f64 = (1..n)
		.map(|k| {
			let c: f64 = (0..n - k).map(|i| s[i] * s[i + k]).sum();
			c * c
		})
		.sum();
	(n * n) as f64 / 2.0 / energy
}

impl Labs {
	pub fn create(instance: i32, n_variables: usize) -> Result<IntegerProblem, ProblemError> {
		create(18, instance, n_variables, "LABS", Target::Unknown, merit_factor)
	}
}

/// Maximum independent set on a fixed graph over the first even number of
/// vertices. Each edge inside the set costs that number of points.
pub struct Mis;

fn is_edge(i: usize, j: usize, n: usize) -> bool {
	let half = n / 2;
	(i != half && j == i + 1) || (i < half && j == i + half + 1) || (i >= 2 && i <= half && j == i + half - 1)
}

fn independent_set(x: &[i32]) -> f64 {
	let n = if x.len() % 2 == 1 { x.len() - 1 } else { x.len() };
	let members: Vec<usize> = (0..n).filter(|&i| x[i] == 1).collect();
	let mut edges = 0usize;
	for (a, &u) in members.iter().enumerate() {
		for &v in &members[a + 1..] {
			if is_edge(u + 1, v + 1, n) {
				edges += 1;
			}
		}
	}
	members.len() as f64 - (n * edges) as f64
}

impl Mis {
	pub fn create(instance: i32, n_variables: usize) -> Result<IntegerProblem, ProblemError> {
		let n = if n_variables % 2 == 1 { n_variables - 1 } else { n_variables };
		let best = if n % 4 == 0 { n / 2 } else { n / 2 + 1 };
		create(22, instance, n_variables, "MIS", Target::Value(best as f64), independent_set)
	}
}

/// Queens on an `N x N` board, penalised by `N` for every extra queen on a
/// row, column or diagonal. Requires a square number of variables.
pub struct NQueens;

fn excess(count: i32) -> f64 {
	(count - 1).max(0) as f64
}

fn queens(x: &[i32], side: usize) -> f64 {
	let n = side as i64;
	let at = |i: i64, j: i64| x[(i * n + j) as usize];
	let queens: f64 = x.iter().map(|&v| v as f64).sum();
	let penalty = side as f64;

	let rows: f64 = (0..n).map(|i| excess((0..n).map(|j| at(i, j)).sum())).sum();
	let columns: f64 = (0..n).map(|j| excess((0..n).map(|i| at(i, j)).sum())).sum();
	// diagonals j - i = k and anti-diagonals i + j = l
	let diagonals: f64 = (2 - n..=n - 2)
		.map(|k| excess((0..n).filter(|i| (0..n).contains(&(i + k))).map(|i| at(i, i + k)).sum()))
		.sum();
	let anti_diagonals: f64 = (1..=2 * n - 3)
		.map(|l| excess((0..n).filter(|i| (0..n).contains(&(l - i))).map(|i| at(i, l - i)).sum()))
		.sum();

	queens - penalty * rows - penalty * columns - penalty * diagonals - penalty * anti_diagonals
}

impl NQueens {
	pub fn create(instance: i32, n_variables: usize) -> Result<IntegerProblem, ProblemError> {
		let side = square_side("NQueens", n_variables)?;
		create(23, instance, n_variables, "NQueens", Target::Value(side as f64), move |x| queens(x, side))
	}
}

/// Deceptive traps over blocks of five bits plus one shorter trailing block.
pub struct ConcatenatedTrap;

const TRAP_SIZE: usize = 5;

fn trap(block: &[i32]) -> f64 {
	let k = block.len() as f64;
	let ones: f64 = block.iter().map(|&v| v as f64).sum();
	if ones == k { 1.0 } else { (k - 1.0 - ones) / k }
}

impl ConcatenatedTrap {
	pub fn create(instance: i32, n_variables: usize) -> Result<IntegerProblem, ProblemError> {
		create(24, instance, n_variables, "ConcatenatedTrap", Target::At(vec![1; n_variables]), |x| {
			x.chunks(TRAP_SIZE).map(trap).sum()
		})
	}
}

/// NK landscape with `k = 1`: every bit interacts with one other bit and
/// looks up its contribution in a random table.
pub struct NKLandscapes;

const NK_K: usize = 1;

fn bit(v: i32) -> usize {
	v.clamp(0, 1) as usize
}

struct NkTables {
	neighbours: Vec<Vec<usize>>,
	contributions: Vec<Vec<f64>>,
}

impl NkTables {
	fn new(n: usize, k: usize) -> Self {
		let mut neighbours = Vec::with_capacity(n);
		for i in 0..n {
			let draws = random::pbo::uniform(k, (k * (i + 1)) as i64, 0.0, 1.0);
			let mut population: Vec<usize> = (0..n).collect();
			let mut sampled = Vec::with_capacity(k);
			// partial Fisher-Yates from the back
			for p in (1..n).rev() {
				let pos = (draws[n - 1 - p] * (p + 1) as f64).floor() as usize;
				population.swap(p, pos);
				sampled.push(population[p]);
				if n - p - 1 == k - 1 {
					break;
				}
			}
			if n == k {
				sampled.push(population[0]);
			}
			neighbours.push(sampled);
		}
		let contributions =
			(0..n).map(|i| random::pbo::uniform(1 << (k + 1), (k * (i + 1) * 2) as i64, 0.0, 1.0)).collect();
		Self { neighbours, contributions }
	}

	fn evaluate(&self, x: &[i32]) -> f64 {
		let total: f64 = self
			.neighbours
			.iter()
			.zip(&self.contributions)
			.enumerate()
			.map(|(i, (links, table))| {
				let index = links.iter().enumerate().fold(bit(x[i]), |acc, (j, &e)| acc + (bit(x[e]) << (j + 1)));
				table[index]
			})
			.sum();
		-total / x.len() as f64
	}
}

impl NKLandscapes {
	pub fn create(instance: i32, n_variables: usize) -> Result<IntegerProblem, ProblemError> {
		if n_variables == 0 {
			return Err(ProblemError::InvalidDimension(n_variables));
		}
		let tables = NkTables::new(n_variables, NK_K.min(n_variables));
		create(25, instance, n_variables, "NKLandscapes", Target::Unknown, move |x| tables.evaluate(x))
	}
}
