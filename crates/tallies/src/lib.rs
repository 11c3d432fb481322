//! Module for reading OpenMC `tallies.out` files
//!
//! The `tallies.out` file is the human-readable summary of every tally at the
//! end of a run.
//!
//! - [TalliesOut] - Primary data structure containing the parsed file data
//! - [Tally] - Results for one tally, found by id or name
//! - [TallyRow] - A single filter bin, nuclide and score combination
//!
//! Filter bins are nested by indentation in the file, so every row carries
//! the labels of all the filter bins it belongs to.
//!
//! # Quickstart example
//!
//! Suppose there is a tally named `tally` with a cell filter and an energy
//! function filter, scoring `current`.
//!
//! ```rust, no_run
//! # use shieldrun_tallies::TalliesOut;
//! // Read all file data into the core data structure
//! let output = TalliesOut::from_file("/path/to/tallies.out").unwrap();
//!
//! // Names are upper-cased by OpenMC, so the lookup ignores case
//! let tally = output.get_tally_by_name("tally").expect("Tally not found");
//!
//! // Sum of the mean column over every row
//! println!("{}", tally.sum_mean());
//! ```

mod core;
mod error;
mod parsers;
mod reader;

// flatten public API and inline the documentation
#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use crate::core::{TalliesOut, Tally, TallyRow};
