//! Dose conversion coefficients for tally response functions
//!
//! Fluence-to-effective-dose coefficients from ICRP Publication 116, in the
//! form used for an energy function filter on a tally. Weighting a current or
//! flux tally by these gives a dose-equivalent proxy for the scored particles.
//!
//! - [dose_coefficients()] - bundled ICRP-116 data
//! - [DoseTable] - a single coefficient table, optionally read from CSV
//!
//! ## Quickstart example
//!
//! ```rust
//! # use shieldrun_dose::{dose_coefficients, IrradiationGeometry, Particle};
//! // Neutron coefficients for the antero-posterior geometry
//! let table = dose_coefficients(Particle::Neutron, IrradiationGeometry::AP).unwrap();
//!
//! // Energies in eV, coefficients in pSv cm2
//! assert!((table.energies()[0] - 1.0e-3).abs() < 1.0e-15);
//! assert_eq!(table.coefficients()[0], 3.09);
//! ```

mod common;
mod error;
mod load;
mod table;

#[doc(inline)]
pub use common::{IrradiationGeometry, Particle};

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use load::dose_coefficients;

#[doc(inline)]
pub use table::DoseTable;
