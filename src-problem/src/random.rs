//! Deterministic random streams used to build problem instances.
//!
//! Both flavours share the same Park-Miller linear congruential generator
//! (multiplier 16807, modulus 2^31 - 1, Schrage decomposition) and a table of
//! 32 held-back states filled during a 40 step warm-up. For a seed of at least
//! one their uniform streams are identical; they differ in seed handling
//! (`bbob2009` raises seeds below 1, `pbo::normal` takes `|seed|`) and in the
//! output range of `pbo::uniform`. Values must match the reference generators
//! bit for bit: a different stream silently moves every optimum.

const MULTIPLIER: i64 = 16807;
const MODULUS: i64 = 2147483647;
const MODULUS_DIV: i64 = 127773;
const MOD_MULTIPLIER: i64 = 2836;
const TABLE_SIZE: usize = 32;
const WARM_UP: usize = 40;
const SLOT_DIVISOR: f64 = 67108865.0;
const NORMALIZER: f64 = 2.147483647e9;

/// Smallest value emitted in place of an exact zero (keeps `ln` finite).
pub const TINY: f64 = 1e-99;

/// One step of the generator.
pub fn lcg(seed: i64) -> i64 {
	let seed_mod = (seed as f64 / MODULUS_DIV as f64).floor() as i64;
	let next = MULTIPLIER * (seed - seed_mod * MODULUS_DIV) - MOD_MULTIPLIER * seed_mod;
	if next < 0 { next + MODULUS } else { next }
}

fn warm_up(mut seed: i64) -> (i64, [i64; TABLE_SIZE]) {
	let mut table = [0i64; TABLE_SIZE];
	for i in (0..WARM_UP).rev() {
		seed = lcg(seed);
		if i < TABLE_SIZE {
			table[i] = seed;
		}
	}
	(seed, table)
}

fn non_zero(v: f64) -> f64 {
	if v == 0.0 { TINY } else { v }
}

fn box_muller(u: &[f64], n: usize) -> Vec<f64> {
	(0..n)
		.map(|i| non_zero((-2.0 * u[i].ln()).sqrt() * (2.0 * std::f64::consts::PI * u[n + i]).cos()))
		.collect()
}

/// Generator used by the BBOB suite (COCO `bbob2009` flavour).
pub mod bbob2009 {
	use super::*;

	/// `n` uniform numbers in (0, 1]; seeds below 1 are raised to 1.
	pub fn uniform(n: usize, seed: i64) -> Vec<f64> {
		let (mut seed, mut table) = warm_up(seed.max(1));
		let mut random_number = table[0] as f64;
		let mut out = Vec::with_capacity(n);
		for _ in 0..n {
			let index = (random_number / SLOT_DIVISOR).floor() as usize;
			seed = lcg(seed);
			random_number = table[index] as f64;
			table[index] = seed;
			out.push(non_zero(random_number / NORMALIZER));
		}
		out
	}

	/// `n` standard normal numbers from `2n` uniforms (Box-Muller).
	pub fn normal(n: usize, seed: i64) -> Vec<f64> {
		let u = uniform(2 * n, seed);
		box_muller(&u, n)
	}
}

/// Generator used by the pseudo-Boolean suite and its instance transforms.
pub mod pbo {
	use super::*;

	/// `n` uniform numbers mapped to `[lb, ub)`.
	pub fn uniform(n: usize, seed: i64, lb: f64, ub: f64) -> Vec<f64> {
		let (mut seed, mut table) = warm_up(seed);
		let mut out = Vec::with_capacity(n);
		for _ in 0..n {
			let next = lcg(seed);
			let index = (seed as f64 / SLOT_DIVISOR).floor() as usize;
			seed = table[index];
			table[index] = next;
			out.push(non_zero(seed as f64 / NORMALIZER) * (ub - lb) + lb);
		}
		out
	}

	/// `n` standard normal numbers; the seed is taken as `max(1, |seed|)`.
	pub fn normal(n: usize, seed: i64) -> Vec<f64> {
		let u = uniform(2 * n, seed.abs().max(1), 0.0, 1.0);
		box_muller(&u, n)
	}
}
