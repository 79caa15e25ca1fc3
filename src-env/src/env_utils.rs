//! Environment variable utilities for iohbench
//!
//! File based loggers write below the directory named by `IOH_OUTPUT_DIR`.
//! Callers may always bypass the variable by passing an explicit directory.

use crate::constants::{LOGS_DIR, OUTPUT_DIR_VAR};
use std::env;
use std::path::{Path, PathBuf};

/// Error type for environment variable issues
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error(
        "IOH_OUTPUT_DIR environment variable is not set. Please set it to a writable directory (e.g., export IOH_OUTPUT_DIR=/tmp/ioh)"
    )]
    OutputDirNotSet,

    #[error("IOH_OUTPUT_DIR points to a non-existent directory: {0}")]
    OutputDirNotFound(PathBuf),

    #[error("Failed to create log directory {path}: {source}")]
    LogDirCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Get the IOH_OUTPUT_DIR environment variable and validate it exists
///
/// # Errors
///
/// Returns an error if:
/// - IOH_OUTPUT_DIR is not set
/// - IOH_OUTPUT_DIR points to a non-existent directory
///
/// # Example
///
/// ```no_run
/// use iohbench_env::get_output_dir;
///
/// let root = get_output_dir()?;
/// println!("output directory: {}", root.display());
/// # Ok::<(), iohbench_env::EnvError>(())
/// ```
pub fn get_output_dir() -> Result<PathBuf, EnvError> {
    let root = env::var(OUTPUT_DIR_VAR).map_err(|_| EnvError::OutputDirNotSet)?;

    let path = PathBuf::from(root);

    if !path.exists() {
        return Err(EnvError::OutputDirNotFound(path));
    }

    Ok(path)
}

/// Get the path to the logs directory, creating it if necessary
///
/// # Errors
///
/// Returns an error if IOH_OUTPUT_DIR is not set or invalid, or if the
/// `logs` subdirectory cannot be created.
pub fn get_logs_dir() -> Result<PathBuf, EnvError> {
    let root = get_output_dir()?;
    ensure_dir(&root.join(LOGS_DIR))
}

/// Resolve the directory a logger should write to.
///
/// An explicit directory wins and is created when missing; otherwise the
/// logs directory below IOH_OUTPUT_DIR is used.
pub fn resolve_logs_dir(explicit: Option<&Path>) -> Result<PathBuf, EnvError> {
    match explicit {
        Some(dir) => ensure_dir(dir),
        None => get_logs_dir(),
    }
}

fn ensure_dir(path: &Path) -> Result<PathBuf, EnvError> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|source| EnvError::LogDirCreationFailed {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(path.to_path_buf())
}

/// Check if IOH_OUTPUT_DIR is properly configured and print helpful information
///
/// # Example
///
/// ```no_run
/// use iohbench_env::check_ioh_env;
///
/// if let Err(e) = check_ioh_env() {
///     eprintln!("Environment setup error: {}", e);
///     std::process::exit(1);
/// }
/// ```
pub fn check_ioh_env() -> Result<(), EnvError> {
    let root = get_output_dir()?;
    let logs = get_logs_dir()?;

    println!("✓ IOH_OUTPUT_DIR: {}", root.display());
    println!("✓ Logs directory: {}", logs.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // env vars are process wide
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn with_var<F: FnOnce()>(value: Option<&str>, f: F) {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let original = env::var(OUTPUT_DIR_VAR).ok();
        unsafe {
            match value {
                Some(v) => env::set_var(OUTPUT_DIR_VAR, v),
                None => env::remove_var(OUTPUT_DIR_VAR),
            }
        }
        f();
        unsafe {
            match original {
                Some(v) => env::set_var(OUTPUT_DIR_VAR, v),
                None => env::remove_var(OUTPUT_DIR_VAR),
            }
        }
    }

    #[test]
    fn test_output_dir_not_set() {
        with_var(None, || {
            let result = get_output_dir();
            assert!(matches!(result, Err(EnvError::OutputDirNotSet)));
        });
    }

    #[test]
    fn test_output_dir_nonexistent() {
        with_var(Some("/this/path/should/not/exist"), || {
            let result = get_output_dir();
            assert!(matches!(result, Err(EnvError::OutputDirNotFound(_))));
        });
    }

    #[test]
    fn test_logs_dir_is_created() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().to_str().unwrap().to_string();
        with_var(Some(&root), || {
            let logs = get_logs_dir().unwrap();
            assert!(logs.ends_with(LOGS_DIR));
            assert!(logs.is_dir());
        });
    }

    #[test]
    fn test_explicit_dir_bypasses_env() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("nested").join("runs");
        with_var(None, || {
            let dir = resolve_logs_dir(Some(&target)).unwrap();
            assert_eq!(dir, target);
            assert!(target.is_dir());
        });
    }
}
