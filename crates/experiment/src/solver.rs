// standard library
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

// internal modules
use crate::error::{Error, Result};

// external crates
use log::{debug, info, trace, warn};

/// Name of the results file written by the engine
pub const TALLIES_OUT: &str = "tallies.out";

/// Something that can run a transport model
///
/// The model input files have already been written to `dir`. Implementations
/// block until the run completes and return the path of the `tallies.out`
/// results file.
pub trait Solver {
    fn run(&self, dir: &Path) -> Result<PathBuf>;
}

/// The OpenMC executable, run as a blocking subprocess
///
/// Standard error is inherited so that the engine's own diagnostics reach the
/// user untouched. Standard output is captured and logged at `trace` level.
///
/// ```rust, no_run
/// # use shieldrun_experiment::{Experiment, Openmc};
/// let openmc = Openmc::default().with_threads(8);
/// let summary = Experiment::default().run(&openmc, None).unwrap();
/// println!("{}", summary.sum);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Openmc {
    /// Executable name or path
    pub program: PathBuf,
    /// OpenMP threads, the engine default if `None`
    pub threads: Option<u32>,
}

impl Default for Openmc {
    fn default() -> Self {
        Self {
            program: PathBuf::from("openmc"),
            threads: None,
        }
    }
}

impl Openmc {
    /// Use a specific executable
    pub fn new<P: Into<PathBuf>>(program: P) -> Self {
        Self {
            program: program.into(),
            threads: None,
        }
    }

    /// Set the number of OpenMP threads
    pub fn with_threads(mut self, threads: u32) -> Self {
        self.threads = Some(threads);
        self
    }

    fn command(&self, dir: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());

        if let Some(threads) = self.threads {
            command.arg("--threads").arg(threads.to_string());
        }
        command
    }
}

impl Solver for Openmc {
    fn run(&self, dir: &Path) -> Result<PathBuf> {
        // results left over from an earlier run in a kept directory
        let path = dir.join(TALLIES_OUT);
        if path.is_file() {
            warn!("Removing old results {}", path.display());
            std::fs::remove_file(&path)?;
        }

        let mut command = self.command(dir);
        info!("Running {} in {}", self.program.display(), dir.display());
        debug!("Command = {command:?}");

        let output = command.output().map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::SolverNotFound {
                program: self.program.clone(),
            },
            _ => Error::Io(e),
        })?;

        for line in String::from_utf8_lossy(&output.stdout).lines() {
            trace!("{line}");
        }

        if !output.status.success() {
            return Err(Error::SolverFailed {
                program: self.program.clone(),
                status: output.status.code(),
            });
        }

        match path.is_file() {
            true => Ok(path),
            false => Err(Error::MissingResults { path }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threads_argument() {
        let openmc = Openmc::new("/opt/openmc/bin/openmc").with_threads(4);
        let command = openmc.command(Path::new("."));
        let args = command.get_args().collect::<Vec<_>>();
        assert_eq!(args, vec!["--threads", "4"]);
        assert_eq!(command.get_program(), "/opt/openmc/bin/openmc");
    }

    #[test]
    fn no_arguments_by_default() {
        let command = Openmc::default().command(Path::new("."));
        assert_eq!(command.get_args().count(), 0);
    }

    #[test]
    fn missing_program() {
        let dir = tempfile::tempdir().unwrap();
        let openmc = Openmc::new("shieldrun-no-such-solver");
        assert!(matches!(
            openmc.run(dir.path()),
            Err(Error::SolverNotFound { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn failed_run() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Openmc::new("false").run(dir.path()),
            Err(Error::SolverFailed { status: Some(1), .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn run_without_results() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Openmc::new("true").run(dir.path()),
            Err(Error::MissingResults { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn old_results_are_not_reused() {
        let dir = tempfile::tempdir().unwrap();
        let stale = dir.path().join(TALLIES_OUT);
        std::fs::write(&stale, "stale").unwrap();

        assert!(matches!(
            Openmc::new("true").run(dir.path()),
            Err(Error::MissingResults { .. })
        ));
        assert!(!stale.exists());
    }
}
