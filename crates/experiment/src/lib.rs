//! The PbLi spherical shell dose experiment
//!
//! One parametrised scenario, run end to end:
//!
//! 1. build a [Model](shieldrun_model::Model) from the [Experiment]
//!    parameters
//! 2. write the engine input files
//! 3. run a [Solver], normally [Openmc]
//! 4. read `tallies.out` and sum the dose tally into a [DoseSummary]
//!
//! ## Quickstart example
//!
//! ```rust, no_run
//! # use shieldrun_experiment::{Experiment, Openmc};
//! // Default scenario with a fixed seed
//! let experiment = Experiment {
//!     seed: Some(1),
//!     ..Default::default()
//! };
//!
//! // Runs `openmc` from the PATH in a temporary directory
//! let summary = experiment.run(&Openmc::default(), None).unwrap();
//! println!("{}", summary.sum);
//! ```

mod error;
mod experiment;
mod solver;

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use experiment::{ids, DoseSummary, Experiment};

#[doc(inline)]
pub use solver::{Openmc, Solver, TALLIES_OUT};
