//! iohbench - reproducible benchmark problems for black-box optimisation
//!
//! This library provides:
//! - A single evaluation pipeline ([`problem::Problem`]) shared by every benchmark
//! - Deterministic instance transformations driven by seeded random streams
//! - The 24 noiseless BBOB functions and the 25 pseudo-Boolean (PBO) functions
//! - Box and functional constraints with penalty or rejection semantics
//! - Loggers (in-memory store, CSV trajectories) fired by composable triggers
//!
//! # Example
//!
//! ```rust
//! use iohbench_problem::bbob::Sphere;
//!
//! let mut sphere = Sphere::create(1, 5).unwrap();
//! let optimum = sphere.optimum().clone();
//! assert_eq!(sphere.call(&optimum.x), optimum.y);
//! assert!(sphere.state().optimum_found);
//! ```

/// The 24 noiseless BBOB functions
pub mod bbob;
/// Box and functional constraints
pub mod constraints;
/// Error types
pub mod error;
/// Observers of the evaluation stream
pub mod logger;
/// The 25 pseudo-Boolean functions
pub mod pbo;
/// The evaluation pipeline
pub mod problem;
/// Seeded random streams
pub mod random;
/// Name and id lookup of problem factories
pub mod registry;
/// Meta data, solutions and run state
pub mod structures;
/// Variable and objective transformations
pub mod transformation;

pub use constraints::{Bounds, Constraint, Enforced, FunctionalConstraint};
pub use error::{ProblemError, Rejection};
pub use logger::{LogInfo, Logger};
pub use problem::{BenchmarkFunction, IntegerProblem, Optimum, Problem, RealProblem};
pub use registry::{ProblemKey, Registry, bbob_registry, pbo_registry};
pub use structures::{MetaData, OptimizationType, Solution, State, Variable};
