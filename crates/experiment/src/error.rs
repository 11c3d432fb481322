//! Result and Error types for the experiment module

use std::path::PathBuf;

/// Type alias for `Result<T, experiment::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `shieldrun-experiment`
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    Io(#[from] std::io::Error),

    /// Experiment file is not valid TOML or has unknown fields
    #[error("invalid experiment file")]
    Toml(#[from] toml::de::Error),

    /// Failed to assemble or write the model
    #[error("invalid model")]
    Model(#[from] shieldrun_model::Error),

    /// Failed to load dose coefficients
    #[error("unable to load dose coefficients")]
    Dose(#[from] shieldrun_dose::Error),

    /// Failed to read the results file
    #[error("unable to read results")]
    Tallies(#[from] shieldrun_tallies::Error),

    /// Parameter outside of its physical range
    #[error("invalid {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Solver executable could not be started
    #[error("solver \"{}\" not found, check it is installed and on the PATH", .program.display())]
    SolverNotFound { program: PathBuf },

    /// Solver ran but exited with a failure
    #[error(
        "solver \"{}\" failed with exit status {}",
        .program.display(),
        .status.map_or("unknown".to_string(), |s| s.to_string())
    )]
    SolverFailed {
        program: PathBuf,
        status: Option<i32>,
    },

    /// Solver finished without writing the results file
    #[error("results file {} was not written", .path.display())]
    MissingResults { path: PathBuf },

    /// Results file has no tally with the requested name
    #[error("no tally named \"{name}\" in the results")]
    TallyNotFound { name: String },
}
