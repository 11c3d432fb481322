//! Typed transport model for the OpenMC engine
//!
//! Builds a complete fixed-source model in memory and writes it out as the
//! engine's XML input files.
//!
//! | Component    | Description                                              |
//! | ------------ | -------------------------------------------------------- |
//! | [Material]   | element compositions, enrichment and density             |
//! | [Geometry]   | cells bounded by half-spaces of spherical surfaces       |
//! | [Settings]   | run mode, particles, batches and external [Source]s      |
//! | [Tally]      | scores with cell and energy function [Filter]s           |
//! | [Model]      | all of the above, validated and exported together        |
//!
//! ## Quickstart example
//!
//! ```rust
//! # use shieldrun_model::*;
//! // A void sphere inside an iron shell
//! let mut iron = Material::new(1, "Iron");
//! iron.add_element("Fe", 100.0, PercentType::Atomic).unwrap();
//! iron.set_density(7.874);
//!
//! let inner = Sphere::new(1, 10.0);
//! let outer = Sphere::new(2, 20.0).with_boundary(BoundaryType::Vacuum);
//!
//! let geometry = Geometry::new(vec![
//!     Cell::new(1, -&inner),
//!     Cell::new(2, inner.positive() & outer.negative()).with_material(1),
//! ]);
//!
//! let model = Model {
//!     materials: vec![iron],
//!     geometry,
//!     settings: Settings::fixed_source(1000, 2, Source::point([0.0; 3], 14.0e6)),
//!     tallies: vec![Tally::new(1, "flux").with_score("flux")],
//! };
//!
//! assert!(model.validate().is_ok());
//! ```

mod element;
mod error;
mod geometry;
mod material;
mod model;
mod settings;
mod source;
mod tally;
mod xml;

#[doc(inline)]
pub use element::{natural_isotopes, Isotope};

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use geometry::{BoundaryType, Cell, Fill, Geometry, Point, Region, Side, Sphere, Universe};

#[doc(inline)]
pub use material::{
    Constituent, DensityUnits, Enrichment, Material, NuclideFraction, PercentType,
};

#[doc(inline)]
pub use model::Model;

#[doc(inline)]
pub use settings::{RunMode, Settings};

#[doc(inline)]
pub use source::{Angle, Discrete, Source, SourceSite, Space};

#[doc(inline)]
pub use tally::{Filter, Interpolation, Tally};

#[doc(inline)]
pub use xml::{write_geometry, write_materials, write_settings, write_tallies};
