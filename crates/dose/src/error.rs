//! Result and Error types for the dose coefficient module

use crate::common::{IrradiationGeometry, Particle};

/// Type alias for `Result<T, dose::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `shieldrun-dose`
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    Io(#[from] std::io::Error),

    /// Failed to read or deserialise a CSV table
    #[error("failed CSV operation")]
    Csv(#[from] csv::Error),

    /// Failure in one of the float slice operations
    #[error("invalid tabulated values")]
    Utils(#[from] shieldrun_utils::Error),

    /// No coefficients are available for this combination
    #[error("no dose coefficients for {particle} in the {geometry} geometry")]
    MissingData {
        particle: Particle,
        geometry: IrradiationGeometry,
    },

    /// The table has no column for the requested data
    #[error("dose table has no \"{column}\" column")]
    MissingColumn { column: String },

    /// Energies must be strictly ascending for the response function
    #[error("energies not ascending at row {row}")]
    UnsortedEnergies { row: usize },

    /// Tables need at least two points to interpolate between
    #[error("dose table has {found} rows, at least 2 required")]
    TooFewRows { found: usize },
}
