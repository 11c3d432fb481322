//! Result and Error types for the model module

/// Type alias for `Result<T, model::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `shieldrun-model`
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    Io(#[from] std::io::Error),

    /// No natural abundance data for the element
    #[error("no natural isotopes known for element \"{symbol}\"")]
    UnknownElement { symbol: String },

    /// Enrichment target is not an isotope of the element
    #[error("\"{target}\" is not a natural isotope of {element}")]
    InvalidEnrichmentTarget { element: String, target: String },

    /// Enrichment must be a percentage that the other isotopes can balance
    #[error("invalid enrichment of {percent}% for {target}")]
    InvalidEnrichment { target: String, percent: f64 },

    /// Fractions must be finite and non-negative
    #[error("invalid fraction {fraction} for {symbol}")]
    InvalidFraction { symbol: String, fraction: f64 },

    /// Atomic and weight fractions are not interchangeable
    #[error("material {id} mixes atomic and weight percent types")]
    MixedPercentTypes { id: u32 },

    /// Material has nothing in it
    #[error("material {id} has no constituents")]
    EmptyMaterial { id: u32 },

    /// Densities must be positive and finite
    #[error("material {id} has an invalid density of {density}")]
    InvalidDensity { id: u32, density: f64 },

    /// Identifiers must be unique within their kind
    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: u32 },

    /// A cell is filled with a material that is not defined
    #[error("cell {cell} is filled with undefined material {material}")]
    UndefinedMaterial { cell: u32, material: u32 },

    /// A cell filter refers to a cell that is not in the geometry
    #[error("filter {filter} refers to undefined cell {cell}")]
    UndefinedCell { filter: u32, cell: u32 },

    /// A tally refers to a filter more than once with different bins
    #[error("filter {id} is defined more than once with different bins")]
    ConflictingFilter { id: u32 },

    /// Tallies need at least one score
    #[error("tally {id} has no scores")]
    NoScores { id: u32 },

    /// Discrete distributions need matching, non-empty, positive weights
    #[error("invalid discrete distribution: {reason}")]
    InvalidDistribution { reason: String },

    /// Batch and particle counts that the engine would reject
    #[error("invalid settings: {reason}")]
    InvalidSettings { reason: String },

    /// Radii must be finite and non-negative
    #[error("surface {id} has an invalid radius of {radius}")]
    InvalidRadius { id: u32, radius: f64 },
}
