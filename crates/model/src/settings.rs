// internal modules
use crate::error::{Error, Result};
use crate::source::Source;

// external crates
use serde::{Deserialize, Serialize};

/// Transport engine run modes
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunMode {
    /// Particles are tracked from an external source
    #[default]
    FixedSource,
    /// Criticality calculation with fission source iteration
    Eigenvalue,
}

impl RunMode {
    /// Run mode name used in the engine input
    pub fn tag(&self) -> &'static str {
        match self {
            RunMode::FixedSource => "fixed source",
            RunMode::Eigenvalue => "eigenvalue",
        }
    }
}

/// Run configuration for the transport engine
///
/// The `tallies.out` text output is always requested, since that is the
/// results artifact read back after the run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Fixed source or eigenvalue
    pub run_mode: RunMode,
    /// Particles simulated per batch
    pub particles: u64,
    /// Total number of batches
    pub batches: u32,
    /// Batches discarded before tallies accumulate
    pub inactive: u32,
    /// External sources
    pub sources: Vec<Source>,
    /// Random number seed, the engine default if `None`
    pub seed: Option<u64>,
}

impl Settings {
    /// Fixed source settings with a single source
    pub fn fixed_source(particles: u64, batches: u32, source: Source) -> Self {
        Self {
            run_mode: RunMode::FixedSource,
            particles,
            batches,
            inactive: 0,
            sources: vec![source],
            seed: None,
        }
    }

    /// Check the counts are something the engine will run
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| Err(Error::InvalidSettings { reason });

        if self.particles == 0 {
            return invalid("at least one particle per batch is required".into());
        }
        if self.batches == 0 {
            return invalid("at least one batch is required".into());
        }
        if self.inactive >= self.batches {
            return invalid(format!(
                "{} inactive batches leaves none of the {} batches active",
                self.inactive, self.batches
            ));
        }
        if self.run_mode == RunMode::FixedSource && self.sources.is_empty() {
            return invalid("fixed source runs need a source".into());
        }
        if self.sources.iter().any(|s| !s.strength.is_finite() || s.strength <= 0.0) {
            return invalid("source strengths must be positive".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings::fixed_source(50_000, 2, Source::point([0.0; 3], 14.0e6))
    }

    #[test]
    fn valid_fixed_source() {
        let settings = settings();
        assert_eq!(settings.run_mode.tag(), "fixed source");
        assert_eq!(settings.inactive, 0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn invalid_counts() {
        let mut s = settings();
        s.particles = 0;
        assert!(s.validate().is_err());

        let mut s = settings();
        s.inactive = 2;
        assert!(matches!(s.validate(), Err(Error::InvalidSettings { .. })));

        let mut s = settings();
        s.sources.clear();
        assert!(s.validate().is_err());

        let mut s = settings();
        s.sources[0].strength = 0.0;
        assert!(s.validate().is_err());
    }
}
