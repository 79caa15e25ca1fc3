//! evaluate_problem: build a benchmark problem and evaluate points on it
//!
//! Points come from `--point` (comma separated) or are sampled uniformly in
//! the problem bounds. With `--output-dir` every evaluation is also written
//! to a CSV trajectory.

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use iohbench_problem::constraints::Enforced;
use iohbench_problem::logger::{Always, CsvLogger, OnImprovement, Trigger};
use iohbench_problem::{Problem, ProblemKey, Variable, bbob_registry, pbo_registry};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Suite {
	Bbob,
	Pbo,
}

/// CLI arguments for evaluate_problem
#[derive(Parser, Debug)]
#[command(author, about = "Evaluate points on a BBOB or PBO benchmark problem")]
struct Args {
	/// Problem suite (case-insensitive)
	#[arg(long, value_enum, ignore_case = true, default_value_t = Suite::Bbob)]
	suite: Suite,

	/// Problem name or numeric id (e.g. Sphere or 1)
	#[arg(short, long, default_value = "1")]
	problem: String,

	/// Instance number
	#[arg(short, long, default_value_t = 1)]
	instance: i32,

	/// Number of variables
	#[arg(short, long, default_value_t = 5)]
	dimension: usize,

	/// Explicit point to evaluate, comma separated; may be repeated
	#[arg(long)]
	point: Vec<String>,

	/// Number of uniformly sampled points when no --point is given
	#[arg(long, default_value_t = 10)]
	samples: usize,

	/// Seed of the sampler (random when absent)
	#[arg(long)]
	seed: Option<u64>,

	/// Penalise points outside the bounds with this weight
	#[arg(long)]
	bounds_weight: Option<f64>,

	/// Write a CSV trajectory below this directory
	#[arg(short, long)]
	output_dir: Option<PathBuf>,

	/// Only log improving evaluations to the CSV file
	#[arg(long, default_value_t = false)]
	improvements_only: bool,

	/// Print the result as JSON
	#[arg(long, default_value_t = false)]
	json: bool,

	/// List the problems of the suite and exit
	#[arg(long, default_value_t = false)]
	list: bool,
}

#[derive(Debug, Serialize)]
struct Report<T> {
	problem: String,
	instance: i32,
	dimension: usize,
	evaluations: usize,
	values: Vec<f64>,
	best_x: Vec<T>,
	best_y: f64,
	optimum_y: f64,
	optimum_found: bool,
}

fn problem_key(raw: &str) -> ProblemKey {
	match raw.parse::<i32>() {
		Ok(id) => ProblemKey::Id(id),
		Err(_) => ProblemKey::Name(raw.to_string()),
	}
}

fn parse_point<T: std::str::FromStr>(raw: &str) -> Result<Vec<T>, String> {
	raw.split(',')
		.map(|v| v.trim().parse::<T>().map_err(|_| format!("invalid coordinate '{}' in '{}'", v, raw)))
		.collect()
}

fn run<T, S>(mut problem: Problem<T>, args: &Args, sample: S) -> Result<(), Box<dyn Error>>
where
	T: Variable + std::str::FromStr,
	S: Fn(&mut StdRng, T, T) -> T,
{
	if let Some(weight) = args.bounds_weight {
		problem.enforce_bounds(weight, Enforced::Soft, 1.0);
	}
	let csv_logger = match &args.output_dir {
		Some(dir) => {
			let trigger: Box<dyn Trigger> =
				if args.improvements_only { Box::new(OnImprovement::new()) } else { Box::new(Always) };
			let logger = Arc::new(CsvLogger::new(Some(dir.as_path()), trigger)?);
			problem.attach_logger(logger.clone());
			Some(logger)
		}
		None => None,
	};

	let points: Vec<Vec<T>> = if args.point.is_empty() {
		let mut rng: StdRng = match args.seed {
			Some(s) => StdRng::seed_from_u64(s),
			None => StdRng::from_rng(&mut rand::rng()),
		};
		let bounds = problem.bounds().clone();
		(0..args.samples)
			.map(|_| bounds.lb.iter().zip(&bounds.ub).map(|(&l, &u)| sample(&mut rng, l, u)).collect())
			.collect()
	} else {
		args.point.iter().map(|p| parse_point(p)).collect::<Result<_, _>>()?
	};

	let values = problem.evaluate_batch(&points);
	if let Some(logger) = &csv_logger {
		let written = logger.write_pending()?;
		log::info!("wrote {} rows to {:?}", written, logger.path());
	}

	let state = problem.state();
	let report = Report {
		problem: problem.meta_data().name().to_string(),
		instance: problem.meta_data().instance(),
		dimension: problem.meta_data().n_variables(),
		evaluations: state.evaluations,
		values,
		best_x: state.current_best.x.clone(),
		best_y: state.current_best.y,
		optimum_y: problem.optimum().y,
		optimum_found: state.optimum_found,
	};

	if args.json {
		println!("{}", serde_json::to_string_pretty(&report)?);
	} else {
		println!("{}", problem);
		for (point, y) in points.iter().zip(&report.values) {
			println!("  f({:?}) = {}", point, y);
		}
		println!("best: {} at {:?}", report.best_y, report.best_x);
		println!("optimum: {} (found: {})", report.optimum_y, report.optimum_found);
	}
	Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let args = Args::parse();

	match args.suite {
		Suite::Bbob => {
			let registry = bbob_registry();
			if args.list {
				for (id, name) in registry.ids().iter().zip(registry.names()) {
					println!("{:>3} {}", id, name);
				}
				return Ok(());
			}
			let problem = registry.create(problem_key(&args.problem), args.instance, args.dimension)?;
			run(problem, &args, |rng, l: f64, u: f64| rng.random_range(l..=u))
		}
		Suite::Pbo => {
			let registry = pbo_registry();
			if args.list {
				for (id, name) in registry.ids().iter().zip(registry.names()) {
					println!("{:>3} {}", id, name);
				}
				return Ok(());
			}
			let problem = registry.create(problem_key(&args.problem), args.instance, args.dimension)?;
			run(problem, &args, |rng, l: i32, u: i32| rng.random_range(l..=u))
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_problem_key() {
		assert_eq!(problem_key("7"), ProblemKey::Id(7));
		assert_eq!(problem_key("Sphere"), ProblemKey::Name("Sphere".to_string()));
	}

	#[test]
	fn test_parse_point() {
		assert_eq!(parse_point::<f64>("1, 2.5,-3").unwrap(), vec![1.0, 2.5, -3.0]);
		assert_eq!(parse_point::<i32>("1,0,1").unwrap(), vec![1, 0, 1]);
		assert!(parse_point::<i32>("1,x").is_err());
	}

	#[test]
	fn test_suite_ignores_case() {
		let args = Args::try_parse_from(["evaluate_problem", "--suite", "BBOB", "--list"]).unwrap();
		assert_eq!(args.suite, Suite::Bbob);
		let args = Args::try_parse_from(["evaluate_problem", "--suite", "Pbo"]).unwrap();
		assert_eq!(args.suite, Suite::Pbo);
		assert!(Args::try_parse_from(["evaluate_problem", "--suite", "cec"]).is_err());
	}
}
