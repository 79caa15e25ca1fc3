//! Layers that turn OneMax and LeadingOnes into harder variants: dummy
//! variables, neutrality, epistasis and three kinds of ruggedness.

use crate::random;

/// Seed of the dummy variable selection, identical for every instance.
pub const DUMMY_SEED: i64 = 10000;

pub fn one_max(x: &[i32]) -> f64 {
	x.iter().map(|&v| v as f64).sum()
}

/// Length of the leading run of ones.
pub fn leading_ones(x: &[i32]) -> f64 {
	x.iter().take_while(|&&v| v == 1).count() as f64
}

/// Sorted indices of the `floor(n * rate)` variables that count; the rest are dummies.
pub fn dummy(n_variables: usize, rate: f64, seed: i64) -> Vec<usize> {
	let selected = (n_variables as f64 * rate).floor() as usize;
	let draws = random::pbo::uniform(selected, seed, 0.0, 1.0);
	let mut positions: Vec<usize> = (0..n_variables).collect();
	for (i, r) in draws.into_iter().enumerate() {
		let j = (r * 1e4 / 1e4 * n_variables as f64).floor() as usize;
		positions.swap(i, j);
	}
	positions.truncate(selected);
	positions.sort_unstable();
	positions
}

pub fn select(x: &[i32], indices: &[usize]) -> Vec<i32> {
	indices.iter().map(|&i| x[i]).collect()
}

/// Majority vote over consecutive blocks of `mu` bits. A trailing partial
/// block is dropped.
pub fn neutrality(x: &[i32], mu: usize) -> Vec<i32> {
	let threshold = mu as f64 / 2.0;
	x.chunks_exact(mu).map(|block| (one_max(block) >= threshold) as i32).collect()
}

fn epistasis_block(x: &[i32], start: usize, size: usize, out: &mut Vec<i32>) {
	for i in 0..size {
		// truncating remainder, negative for the last bit of the block
		let skipped = (size as i64 - i as i64 - 2) % 4;
		let mut result = -1;
		for j in 0..size {
			if (size - j - 1) as i64 != skipped {
				let bit = x[start + j];
				result = if result == -1 { bit } else { (result != bit) as i32 };
			}
		}
		out.push(result);
	}
}

/// Replaces each block of `nu` bits by XORs over all but one bit of the block.
pub fn epistasis(x: &[i32], nu: usize) -> Vec<i32> {
	let n = x.len();
	let mut out = Vec::with_capacity(n);
	let mut start = 0;
	while start + nu <= n {
		epistasis_block(x, start, nu, &mut out);
		start += nu;
	}
	if n > start {
		epistasis_block(x, start, n - start, &mut out);
	}
	out
}

/// Moves every value up to a plateau of width two.
pub fn ruggedness1(y: f64, n_variables: usize) -> f64 {
	let n = n_variables as f64;
	if y == n {
		(y / 2.0).ceil() + 1.0
	} else if y < n && n_variables % 2 == 0 {
		(y / 2.0).floor() + 1.0
	} else if y < n {
		(y / 2.0).ceil() + 1.0
	} else {
		y
	}
}

/// Swaps neighbouring values, keeping the optimum in place.
pub fn ruggedness2(y: f64, n_variables: usize) -> f64 {
	let rounded = (y + 0.5) as i64;
	let n = n_variables as i64;
	if rounded == n {
		y
	} else if rounded % 2 == 0 && n % 2 == 0 {
		y + 1.0
	} else if rounded % 2 == 0 || n % 2 == 0 {
		(y - 1.0).max(0.0)
	} else {
		y + 1.0
	}
}

/// A point whose [`epistasis`] image is all ones. Each block map is a
/// bijection on at most 16 patterns, so the preimage is found by search.
pub fn epistasis_preimage_of_ones(n_variables: usize, nu: usize) -> Vec<i32> {
	let mut x = Vec::with_capacity(n_variables);
	let mut start = 0;
	while start < n_variables {
		let size = nu.min(n_variables - start);
		let block = (0..1u32 << size)
			.map(|mask| (0..size).map(|b| ((mask >> b) & 1) as i32).collect::<Vec<_>>())
			.find(|bits| {
				let mut out = Vec::with_capacity(size);
				epistasis_block(bits, 0, size, &mut out);
				out.iter().all(|&v| v == 1)
			})
			.unwrap_or_else(|| vec![1; size]);
		x.extend(block);
		start += size;
	}
	x
}

/// Lookup table reversing the order of values within blocks of five.
/// Entry `n` stays `n`, so the optimum is preserved.
pub fn ruggedness3(n_variables: usize) -> Vec<f64> {
	let n = n_variables;
	let mut table = vec![0.0; n + 1];
	for j in 1..=n / 5 {
		for k in 0..5 {
			table[n - 5 * j + k] = (n - 5 * j + (4 - k)) as f64;
		}
	}
	let rest = n - (n / 5) * 5;
	for k in 0..rest {
		table[k] = (rest - 1 - k) as f64;
	}
	table[n] = n as f64;
	table
}

#[cfg(test)]
mod tests {
	use super::*;

	const X: [i32; 9] = [1, 1, 0, 1, 0, 0, 0, 1, 1];

	#[test]
	fn test_counts() {
		assert_eq!(one_max(&X), 5.0);
		assert_eq!(leading_ones(&X), 2.0);
		assert_eq!(leading_ones(&[0, 1, 1]), 0.0);
	}

	#[test]
	fn test_dummy_selection() {
		let d = dummy(9, 0.5, DUMMY_SEED);
		assert_eq!(d.len(), 4);
		assert!(d.windows(2).all(|w| w[0] < w[1]));
		assert!(d.iter().all(|&i| i < 9));
		assert_eq!(dummy(9, 0.9, DUMMY_SEED).len(), 8);
		assert!(dummy(1, 0.5, DUMMY_SEED).is_empty());
	}

	#[test]
	fn test_neutrality_majority() {
		assert_eq!(neutrality(&X, 3), vec![1, 0, 1]);
		assert_eq!(neutrality(&[1, 1, 0, 1], 3), vec![1]);
	}

	#[test]
	fn test_epistasis_blocks() {
		// the last output of a full block XORs all four bits
		assert_eq!(epistasis(&[1, 1, 1, 1], 4), vec![1, 1, 1, 0]);
		assert_eq!(epistasis(&X, 4).len(), 9);
		assert_eq!(epistasis(&X, 4).iter().sum::<i32>(), 6);
		// a lone trailing bit is copied
		assert_eq!(epistasis(&[0, 0, 0, 0, 1], 4)[4], 1);
	}

	#[test]
	fn test_epistasis_preimage() {
		for n in [1, 2, 3, 4, 7, 9, 16] {
			let x = epistasis_preimage_of_ones(n, 4);
			assert_eq!(x.len(), n);
			assert_eq!(epistasis(&x, 4), vec![1; n], "n = {}", n);
		}
	}

	#[test]
	fn test_ruggedness() {
		assert_eq!(ruggedness1(5.0, 9), 4.0);
		assert_eq!(ruggedness1(9.0, 9), 6.0);
		assert_eq!(ruggedness1(4.0, 10), 3.0);
		assert_eq!(ruggedness2(5.0, 9), 6.0);
		assert_eq!(ruggedness2(9.0, 9), 9.0);
		assert_eq!(ruggedness2(0.0, 9), 0.0);
		let table = ruggedness3(9);
		assert_eq!(table[5], 7.0);
		assert_eq!(table[9], 9.0);
		assert_eq!(table[0], 3.0);
	}
}
