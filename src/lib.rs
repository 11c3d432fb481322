//! `shieldrun` estimates the neutron dose through a lithium-lead shell by
//! driving a single OpenMC fixed-source run
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]

// Re-exports of the workspace crates.
#[doc(inline)]
pub use shieldrun_dose as dose;

#[doc(inline)]
pub use shieldrun_experiment as experiment;

#[doc(inline)]
pub use shieldrun_model as model;

#[doc(inline)]
pub use shieldrun_tallies as tallies;

#[doc(inline)]
pub use shieldrun_utils as utils;
