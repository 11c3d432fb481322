// standard library
use std::fmt::Display;

// internal modules
use crate::element::{natural_isotopes, Isotope};
use crate::error::{Error, Result};

// external crates
use log::trace;
use serde::{Deserialize, Serialize};

/// How a fraction is to be interpreted
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PercentType {
    /// Atomic percent
    #[default]
    #[serde(rename = "ao")]
    Atomic,
    /// Weight percent
    #[serde(rename = "wo")]
    Weight,
}

impl PercentType {
    /// Attribute name used in the engine input
    pub fn tag(&self) -> &'static str {
        match self {
            PercentType::Atomic => "ao",
            PercentType::Weight => "wo",
        }
    }
}

impl Display for PercentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Units for a material density
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DensityUnits {
    #[default]
    #[serde(rename = "g/cm3")]
    GramsPerCm3,
    #[serde(rename = "kg/m3")]
    KilogramsPerM3,
    #[serde(rename = "atom/b-cm")]
    AtomsPerBarnCm,
    #[serde(rename = "atom/cm3")]
    AtomsPerCm3,
}

impl DensityUnits {
    /// Units string used in the engine input
    pub fn tag(&self) -> &'static str {
        match self {
            DensityUnits::GramsPerCm3 => "g/cm3",
            DensityUnits::KilogramsPerM3 => "kg/m3",
            DensityUnits::AtomsPerBarnCm => "atom/b-cm",
            DensityUnits::AtomsPerCm3 => "atom/cm3",
        }
    }
}

/// Isotopic enrichment of one isotope within an element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrichment {
    /// Enriched isotope (e.g. `Li6`)
    pub target: String,
    /// Percentage of the target isotope within the element
    pub percent: f64,
    /// Whether `percent` is atomic or weight
    #[serde(default)]
    pub kind: PercentType,
}

impl Enrichment {
    /// Atomic enrichment of `target` to `percent`
    pub fn atomic(target: impl Into<String>, percent: f64) -> Self {
        Self {
            target: target.into(),
            percent,
            kind: PercentType::Atomic,
        }
    }
}

/// An element in a material, with the fraction it was declared with
#[derive(Debug, Clone, PartialEq)]
pub struct Constituent {
    /// Chemical symbol
    pub symbol: String,
    /// Percentage of the material
    pub percent: f64,
    /// Interpretation of `percent`
    pub percent_type: PercentType,
    /// Optional isotopic enrichment
    pub enrichment: Option<Enrichment>,
}

/// Nuclide and fraction pair ready for the engine input
#[derive(Debug, Clone, PartialEq)]
pub struct NuclideFraction {
    pub name: String,
    pub percent: f64,
}

/// Material composition
///
/// Elements are added with a percentage and a percent type. The engine only
/// understands nuclides, so [Material::nuclides()] expands every element to
/// its natural isotopes, applying any enrichment on the way.
///
/// ```rust
/// # use shieldrun_model::{Enrichment, Material, PercentType};
/// let mut pbli = Material::new(1, "PbLi");
/// pbli.add_element("Pb", 84.2, PercentType::Atomic).unwrap();
/// pbli.add_enriched_element("Li", 15.8, PercentType::Atomic, Enrichment::atomic("Li6", 7.0))
///     .unwrap();
/// pbli.set_density(11.0);
///
/// assert!((pbli.total_percent() - 100.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Unique material id
    pub id: u32,
    /// Descriptive name
    pub name: String,
    /// Bulk density
    pub density: f64,
    /// Units of `density`
    pub density_units: DensityUnits,
    constituents: Vec<Constituent>,
}

impl Material {
    /// New empty material, the density must still be set
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            density: 0.0,
            density_units: DensityUnits::default(),
            constituents: Vec::new(),
        }
    }

    /// Add an element at natural isotopic abundance
    pub fn add_element(
        &mut self,
        symbol: &str,
        percent: f64,
        percent_type: PercentType,
    ) -> Result<&mut Self> {
        self.push(symbol, percent, percent_type, None)
    }

    /// Add an element with one isotope enriched
    ///
    /// The remaining isotopes keep their natural proportions to one another.
    pub fn add_enriched_element(
        &mut self,
        symbol: &str,
        percent: f64,
        percent_type: PercentType,
        enrichment: Enrichment,
    ) -> Result<&mut Self> {
        let isotopes = lookup(symbol)?;
        if !isotopes
            .iter()
            .any(|i| i.name.eq_ignore_ascii_case(&enrichment.target))
        {
            return Err(Error::InvalidEnrichmentTarget {
                element: symbol.to_string(),
                target: enrichment.target,
            });
        }

        // catches out of range values before the expansion does
        enriched_atom_fractions(isotopes, &enrichment)?;
        self.push(symbol, percent, percent_type, Some(enrichment))
    }

    /// Set the density in g/cm3
    pub fn set_density(&mut self, density: f64) -> &mut Self {
        self.set_density_with_units(density, DensityUnits::GramsPerCm3)
    }

    /// Set the density in any supported units
    pub fn set_density_with_units(&mut self, density: f64, units: DensityUnits) -> &mut Self {
        self.density = density;
        self.density_units = units;
        self
    }

    /// Elements in the order they were added
    pub fn constituents(&self) -> &[Constituent] {
        &self.constituents
    }

    /// Sum of the declared element percentages
    pub fn total_percent(&self) -> f64 {
        self.constituents.iter().map(|c| c.percent).sum()
    }

    /// The single percent type used by every constituent
    pub fn percent_type(&self) -> Result<PercentType> {
        let first = self
            .constituents
            .first()
            .ok_or(Error::EmptyMaterial { id: self.id })?
            .percent_type;

        match self.constituents.iter().all(|c| c.percent_type == first) {
            true => Ok(first),
            false => Err(Error::MixedPercentTypes { id: self.id }),
        }
    }

    /// Check the material is complete and self-consistent
    pub fn validate(&self) -> Result<()> {
        self.percent_type()?;
        if !self.density.is_finite() || self.density <= 0.0 {
            return Err(Error::InvalidDensity {
                id: self.id,
                density: self.density,
            });
        }
        Ok(())
    }

    /// Expand every element into nuclide fractions
    ///
    /// Fractions are percentages of the whole material in the material's
    /// [PercentType]. Nuclides that appear through more than one element entry
    /// are merged, and zero fractions are dropped.
    ///
    /// ```rust
    /// # use shieldrun_model::{Enrichment, Material, PercentType};
    /// let mut lithium = Material::new(1, "Li");
    /// lithium
    ///     .add_enriched_element("Li", 100.0, PercentType::Atomic, Enrichment::atomic("Li6", 90.0))
    ///     .unwrap();
    ///
    /// let nuclides = lithium.nuclides().unwrap();
    /// assert_eq!(nuclides[0].name, "Li6");
    /// assert!((nuclides[0].percent - 90.0).abs() < 1e-9);
    /// assert!((nuclides[1].percent - 10.0).abs() < 1e-9);
    /// ```
    pub fn nuclides(&self) -> Result<Vec<NuclideFraction>> {
        let percent_type = self.percent_type()?;
        let mut nuclides: Vec<NuclideFraction> = Vec::new();

        for constituent in &self.constituents {
            let isotopes = lookup(&constituent.symbol)?;
            let atom_fractions = match &constituent.enrichment {
                Some(enrichment) => enriched_atom_fractions(isotopes, enrichment)?,
                None => isotopes.iter().map(|i| i.abundance).collect(),
            };

            let fractions = match percent_type {
                PercentType::Atomic => atom_fractions,
                PercentType::Weight => to_weight_fractions(isotopes, &atom_fractions),
            };

            for (isotope, fraction) in isotopes.iter().zip(fractions) {
                let percent = constituent.percent * fraction;
                if percent == 0.0 {
                    continue;
                }
                match nuclides.iter_mut().find(|n| n.name == isotope.name) {
                    Some(existing) => existing.percent += percent,
                    None => nuclides.push(NuclideFraction {
                        name: isotope.name.to_string(),
                        percent,
                    }),
                }
            }
        }

        trace!("Material {} nuclides = {:?}", self.id, nuclides);
        Ok(nuclides)
    }

    fn push(
        &mut self,
        symbol: &str,
        percent: f64,
        percent_type: PercentType,
        enrichment: Option<Enrichment>,
    ) -> Result<&mut Self> {
        lookup(symbol)?;
        if !percent.is_finite() || percent < 0.0 {
            return Err(Error::InvalidFraction {
                symbol: symbol.to_string(),
                fraction: percent,
            });
        }

        self.constituents.push(Constituent {
            symbol: symbol.to_string(),
            percent,
            percent_type,
            enrichment,
        });
        Ok(self)
    }
}

fn lookup(symbol: &str) -> Result<&'static [Isotope]> {
    natural_isotopes(symbol).ok_or_else(|| Error::UnknownElement {
        symbol: symbol.to_string(),
    })
}

/// Atom fractions of each isotope after enrichment
fn enriched_atom_fractions(isotopes: &[Isotope], enrichment: &Enrichment) -> Result<Vec<f64>> {
    let invalid = || Error::InvalidEnrichment {
        target: enrichment.target.clone(),
        percent: enrichment.percent,
    };

    if !(0.0..=100.0).contains(&enrichment.percent) {
        return Err(invalid());
    }

    let is_target = |i: &Isotope| i.name.eq_ignore_ascii_case(&enrichment.target);
    let target = enrichment.percent / 100.0;

    // relative weight of every other isotope, keeping natural proportions
    let weight = |i: &Isotope| match enrichment.kind {
        PercentType::Atomic => i.abundance,
        PercentType::Weight => i.abundance * i.mass,
    };
    let others: f64 = isotopes.iter().filter(|&i| !is_target(i)).map(weight).sum();
    if others == 0.0 && target < 1.0 {
        return Err(invalid());
    }

    let fractions: Vec<f64> = isotopes
        .iter()
        .map(|i| match is_target(i) {
            true => target,
            false => (1.0 - target) * weight(i) / others,
        })
        .collect();

    Ok(match enrichment.kind {
        PercentType::Atomic => fractions,
        PercentType::Weight => to_atom_fractions(isotopes, &fractions),
    })
}

/// Convert isotope atom fractions to weight fractions
fn to_weight_fractions(isotopes: &[Isotope], atom_fractions: &[f64]) -> Vec<f64> {
    let masses: Vec<f64> = isotopes
        .iter()
        .zip(atom_fractions)
        .map(|(i, a)| i.mass * a)
        .collect();
    let total: f64 = masses.iter().sum();
    masses.into_iter().map(|m| m / total).collect()
}

/// Convert isotope weight fractions to atom fractions
fn to_atom_fractions(isotopes: &[Isotope], weight_fractions: &[f64]) -> Vec<f64> {
    let moles: Vec<f64> = isotopes
        .iter()
        .zip(weight_fractions)
        .map(|(i, w)| w / i.mass)
        .collect();
    let total: f64 = moles.iter().sum();
    moles.into_iter().map(|n| n / total).collect()
}
