use std::sync::Arc;

use iohbench_problem::bbob::{self, AttractiveSector, Sphere};
use iohbench_problem::constraints::Bounds;
use iohbench_problem::logger::Store;
use iohbench_problem::problem::{BenchmarkFunction, Optimum, Problem};
use iohbench_problem::structures::{MetaData, OptimizationType};

#[test]
fn test_rejected_candidates_leave_state_untouched() {
	let mut problem = Sphere::create(1, 3).unwrap();
	assert!(problem.call(&[]).is_nan());
	assert!(problem.call(&[1.0, 2.0]).is_nan());
	assert!(problem.call(&[1.0, f64::NAN, 0.0]).is_nan());
	assert!(problem.call(&[1.0, f64::INFINITY, 0.0]).is_nan());
	assert_eq!(problem.state().evaluations, 0);
	assert_eq!(problem.state().current_best.y, f64::INFINITY);
}

#[test]
fn test_state_tracks_best_and_reset_clears_it() {
	let mut problem = Sphere::create(2, 2).unwrap();
	let a = problem.call(&[3.0, 3.0]);
	let b = problem.call(&[-4.0, 4.0]);
	let best = a.min(b);
	assert_eq!(problem.state().evaluations, 2);
	assert_eq!(problem.state().current_best.y, best);
	assert_eq!(problem.state().current.x, vec![-4.0, 4.0]);

	problem.reset();
	assert_eq!(problem.state().evaluations, 0);
	assert!(!problem.state().optimum_found);
	assert_eq!(problem.state().current_best.y, f64::INFINITY);
	// the landscape is unchanged by a reset
	assert_eq!(problem.call(&[3.0, 3.0]), a);
}

#[test]
fn test_internal_and_external_views() {
	let mut problem = Sphere::create(1, 2).unwrap();
	let optimum = problem.optimum().clone();
	problem.call(&optimum.x);
	let state = problem.state();
	// the transformed point of the optimum is the origin and its raw value zero
	assert!(state.current_internal.x.iter().all(|v| v.abs() < 1e-12));
	assert_eq!(state.current_internal.y, 0.0);
	assert_eq!(state.current.x, optimum.x);
	assert_eq!(state.current.y, optimum.y);
}

#[test]
fn test_batch_evaluation_matches_sequential_calls() {
	let points: Vec<Vec<f64>> =
		(0..32).map(|k| (0..6).map(|i| ((k * 6 + i) as f64 * 0.37).sin() * 4.5).collect()).collect();
	let mut sequential = AttractiveSector::create(4, 6).unwrap();
	let mut batched = AttractiveSector::create(4, 6).unwrap();
	let expected: Vec<f64> = points.iter().map(|x| sequential.call(x)).collect();

	let store = Arc::new(Store::default());
	batched.attach_logger(store.clone());
	assert_eq!(batched.evaluate_batch(&points), expected);
	assert_eq!(batched.state().evaluations, 32);
	assert_eq!(batched.state().current_best, sequential.state().current_best);

	// records arrive in input order
	let logged: Vec<f64> = store.current_records().iter().map(|r| r.y).collect();
	assert_eq!(logged, expected);
}

#[test]
fn test_batch_skips_rejected_points() {
	let mut problem = Sphere::create(1, 2).unwrap();
	let ys = problem.evaluate_batch(&[vec![0.0, 0.0], vec![1.0], vec![1.0, 1.0]]);
	assert!(ys[1].is_nan());
	assert!(ys[0].is_finite() && ys[2].is_finite());
	assert_eq!(problem.state().evaluations, 2);
}

#[test]
fn test_log_info_snapshot() {
	let mut problem = bbob::create_by_id(5, 1, 3).unwrap();
	problem.call(&[0.0, 1.0, -1.0]);
	let info = problem.log_info();
	assert_eq!(info.evaluations, 1);
	assert_eq!(info.x, vec![0.0, 1.0, -1.0]);
	assert_eq!(info.y, info.transformed_y);
	assert_ne!(info.raw_y, info.y);
	assert_eq!(info.optimum.y, problem.optimum().y);
	assert!(info.has_improved);
}

struct Cube;

impl BenchmarkFunction<f64> for Cube {
	fn evaluate(&self, x: &[f64]) -> f64 {
		x.iter().map(|v| v * v * v).sum()
	}
}

#[test]
fn test_custom_function_with_unknown_optimum() {
	let meta = MetaData::new(900, 1, "Cube", 2, OptimizationType::Maximization).unwrap();
	let mut problem = Problem::new(meta, Bounds::uniform(2, -1.0, 1.0), Box::new(Cube), Optimum::Unknown).unwrap();
	assert!(problem.optimum().y.is_nan());
	assert!(problem.optimum().x.is_empty());
	assert_eq!(problem.call(&[1.0, 1.0]), 2.0);
	assert!(!problem.state().optimum_found);
	assert_eq!(problem.state().current_best.y, 2.0);
	assert_eq!(problem.call(&[0.5, 0.5]), 0.25);
	assert_eq!(problem.state().current_best.y, 2.0);
}

#[test]
fn test_problem_rejects_mismatched_bounds() {
	let meta = MetaData::new(900, 1, "Cube", 3, OptimizationType::Maximization).unwrap();
	assert!(Problem::new(meta, Bounds::uniform(2, -1.0, 1.0), Box::new(Cube), Optimum::Unknown).is_err());
}
