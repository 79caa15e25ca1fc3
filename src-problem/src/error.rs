use std::fmt;

use iohbench_env::EnvError;

/// Errors raised while building problems, registries or loggers.
///
/// Evaluating a malformed candidate is not an error: the call returns NaN
/// and the reason is reported as a [`Rejection`].
#[derive(Debug, thiserror::Error)]
pub enum ProblemError {
	#[error("number of variables must be positive, got {0}")]
	InvalidDimension(usize),

	#[error("instance must be at least 1, got {0}")]
	InvalidInstance(i32),

	#[error("bound vector has length {got}, expected 1 or {expected}")]
	BoundsLength { expected: usize, got: usize },

	#[error("{name} cannot be built with {n_variables} variables: {reason}")]
	UnsupportedDimension { name: String, n_variables: usize, reason: String },

	#[error("no problem registered under {0}")]
	NotFound(String),

	#[error("a problem named {0} is already registered")]
	DuplicateName(String),

	#[error("unexpected internal state: {0}")]
	Unexpected(String),

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("CSV error: {0}")]
	Csv(#[from] csv::Error),

	#[error(transparent)]
	Env(#[from] EnvError),
}

/// Reason a candidate solution was rejected without being evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
	Empty,
	WrongLength { expected: usize, got: usize },
	NotFinite { index: usize },
}

impl fmt::Display for Rejection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Rejection::Empty => write!(f, "empty candidate"),
			Rejection::WrongLength { expected, got } => {
				write!(f, "candidate has {} variables, expected {}", got, expected)
			}
			Rejection::NotFinite { index } => write!(f, "candidate coordinate {} is not finite", index),
		}
	}
}
