use iohbench_problem::bbob;
use iohbench_problem::random;

fn assert_rel(got: f64, expected: f64, tol: f64, what: &str) {
	let scale = expected.abs().max(1.0);
	assert!((got - expected).abs() <= tol * scale, "{}: got {}, expected {}", what, got, expected);
}

const DIM5: [f64; 24] = [
	161.17445568,
	12653420.412225708,
	-97.06158297486468,
	8845.53524810093,
	121.9133638725643,
	423021.00682286796,
	278.3290201933729,
	4315.032550201522,
	95168.253629631741,
	969025.0451803299,
	20911310.769634742,
	187251637.66430587,
	2198.7155122256763,
	261.60997479957,
	1103.1553337856833,
	273.87870697835791,
	35.410739487431208,
	107.64134358767826,
	-40.269198932753994,
	49739.05388887795,
	116.29585727504872,
	-914.902473409051,
	18.635078550302751,
	1782.2733296400438,
];

const DIM4: [f64; 24] = [
	85.33385982387925,
	4670466.71111546,
	-351.73198427229823,
	-377.5169936628651,
	75.49771827575657,
	38905.144584783826,
	180.63391212950944,
	3990.2020718986137,
	2734.3341719439823,
	4272872.087202691,
	633536.4944789623,
	43065603.720016934,
	1304.6099751510485,
	-28.664731548059482,
	1880.5481327833145,
	192.2601540531933,
	-3.893153450087416,
	39.415222378200454,
	-92.22246905638573,
	6135.250833623908,
	100.68975834932274,
	-924.8833174327183,
	21.700453264385484,
	177.9892661923062,
];

#[test]
fn test_dimension_5_reference_values() {
	let x = [0.1, 1.0, 2.0, 4.0, 5.4];
	for (id, name) in bbob::FUNCTIONS {
		let mut problem = bbob::create_by_id(id, 1, 5).unwrap();
		assert_rel(problem.call(&x), DIM5[(id - 1) as usize], 1e-8, name);
	}
}

#[test]
fn test_dimension_4_reference_values() {
	let x = random::pbo::normal(4, 42);
	for (id, name) in bbob::FUNCTIONS {
		let mut problem = bbob::create_by_id(id, 1, 4).unwrap();
		assert_rel(problem.call(&x), DIM4[(id - 1) as usize], 1e-8, name);
	}
}

#[test]
fn test_optimum_round_trip() {
	for (id, name) in bbob::FUNCTIONS {
		for instance in 1..=4 {
			let mut problem = bbob::create_by_id(id, instance, 16).unwrap();
			let optimum = problem.optimum().clone();
			assert_eq!(optimum.x.len(), 16);
			assert!(optimum.x.iter().all(|v| (-5.0..=5.0).contains(v)), "{} optimum out of bounds", name);
			assert_eq!(problem.call(&optimum.x), optimum.y, "{} instance {}", name, instance);
			assert!(problem.state().optimum_found);
		}
	}
}

#[test]
fn test_instances_are_reproducible_and_distinct() {
	let a = bbob::create_by_id(15, 3, 10).unwrap();
	let b = bbob::create_by_id(15, 3, 10).unwrap();
	let c = bbob::create_by_id(15, 4, 10).unwrap();
	assert_eq!(a.optimum(), b.optimum());
	assert_ne!(a.optimum(), c.optimum());
}

#[test]
fn test_optimum_is_locally_best() {
	// a small step away from the optimum never improves on it
	for (id, name) in bbob::FUNCTIONS {
		let mut problem = bbob::create_by_id(id, 1, 6).unwrap();
		let optimum = problem.optimum().clone();
		for i in 0..6 {
			let mut x = optimum.x.clone();
			x[i] += 1e-3;
			assert!(problem.call(&x) >= optimum.y - 1e-9, "{} improved by moving coordinate {}", name, i);
		}
	}
}
