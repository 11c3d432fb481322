// internal modules
use crate::error::{Error, Result};

// external crates
use shieldrun_dose::DoseTable;

/// Interpolation used between the points of an energy function
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    #[default]
    LinearLinear,
    LogLog,
}

impl Interpolation {
    /// Interpolation name used in the engine input
    pub fn tag(&self) -> &'static str {
        match self {
            Interpolation::LinearLinear => "linear-linear",
            Interpolation::LogLog => "log-log",
        }
    }
}

/// Tally filters
///
/// Filters restrict which events score to a tally, or re-weight them.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Events inside any of the listed cells, one bin per cell
    Cell { id: u32, cells: Vec<u32> },
    /// Events weighted by a tabulated function of energy
    EnergyFunction {
        id: u32,
        energies: Vec<f64>,
        values: Vec<f64>,
        interpolation: Interpolation,
    },
}

impl Filter {
    /// Filter on a list of cell ids
    pub fn cell(id: u32, cells: Vec<u32>) -> Self {
        Filter::Cell { id, cells }
    }

    /// Response function from tabulated dose coefficients
    ///
    /// ```rust
    /// # use shieldrun_dose::{dose_coefficients, IrradiationGeometry, Particle};
    /// # use shieldrun_model::Filter;
    /// let table = dose_coefficients(Particle::Neutron, IrradiationGeometry::AP).unwrap();
    /// let filter = Filter::energy_function(2, &table);
    /// assert_eq!(filter.n_bins(), 1);
    /// ```
    pub fn energy_function(id: u32, table: &DoseTable) -> Self {
        Filter::EnergyFunction {
            id,
            energies: table.energies().to_vec(),
            values: table.coefficients().to_vec(),
            interpolation: Interpolation::LinearLinear,
        }
    }

    /// Unique filter id
    pub fn id(&self) -> u32 {
        match self {
            Filter::Cell { id, .. } | Filter::EnergyFunction { id, .. } => *id,
        }
    }

    /// Filter type name used in the engine input
    pub fn kind(&self) -> &'static str {
        match self {
            Filter::Cell { .. } => "cell",
            Filter::EnergyFunction { .. } => "energyfunction",
        }
    }

    /// Number of bins the filter contributes to a tally
    pub fn n_bins(&self) -> usize {
        match self {
            Filter::Cell { cells, .. } => cells.len(),
            Filter::EnergyFunction { .. } => 1,
        }
    }
}

/// A named tally request
#[derive(Debug, Clone, PartialEq)]
pub struct Tally {
    /// Unique tally id
    pub id: u32,
    /// Name used to find the tally in the results
    pub name: String,
    /// Filters applied, in order
    pub filters: Vec<Filter>,
    /// Scored quantities (e.g. `flux`, `current`)
    pub scores: Vec<String>,
}

impl Tally {
    /// New tally with no filters or scores
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            filters: Vec::new(),
            scores: Vec::new(),
        }
    }

    /// Add a filter
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Add a score
    pub fn with_score(mut self, score: impl Into<String>) -> Self {
        self.scores.push(score.into());
        self
    }

    /// Number of result rows the engine will report for the total material
    pub fn n_rows(&self) -> usize {
        self.filters.iter().map(Filter::n_bins).product::<usize>() * self.scores.len()
    }

    /// Check the tally can be scored
    pub fn validate(&self) -> Result<()> {
        if self.scores.is_empty() {
            return Err(Error::NoScores { id: self.id });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_rows() {
        let tally = Tally::new(1, "dose")
            .with_filter(Filter::cell(1, vec![2, 3]))
            .with_filter(Filter::EnergyFunction {
                id: 2,
                energies: vec![1.0, 2.0],
                values: vec![1.0, 1.0],
                interpolation: Interpolation::LogLog,
            })
            .with_score("current")
            .with_score("flux");
        assert_eq!(tally.n_rows(), 4);
        assert!(tally.validate().is_ok());
    }

    #[test]
    fn scores_are_required() {
        assert!(matches!(
            Tally::new(5, "empty").validate(),
            Err(Error::NoScores { id: 5 })
        ));
    }
}
