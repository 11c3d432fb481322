//! Result and Error type
use derive_more::From;

/// Type alias for `Result<T, tallies::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for `shieldrun-tallies`
#[derive(Debug, From)]
pub enum Error {
    /// Reader has reached the end of the file
    EndOfFile,

    /// Errors from std::io
    #[from]
    Io(std::io::Error),

    /// Raw nom crate errors
    Nom(String),

    /// Results were found before any tally header
    NoTallyInitialised { line: usize },

    /// A score line with no nuclide label above it
    MissingNuclide { tally: u32, line: usize },

    /// The same tally id appears twice in one file
    DuplicateTally { id: u32 },
}

// Anyone using the library is a developer and will only care about the debug
// form anyway. Applications should add readable, high-level context.
impl core::fmt::Display for Error {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}

impl From<nom::Err<nom::error::Error<&str>>> for Error {
    fn from(err: nom::Err<nom::error::Error<&str>>) -> Self {
        Self::Nom(format!("{err:?}"))
    }
}
