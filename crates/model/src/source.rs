//! External source definitions
//!
//! A [Source] is the combination of independent spatial, angular and energy
//! distributions. Sampling is provided so the distributions can be checked
//! without running the transport engine.

// internal modules
use crate::error::{Error, Result};
use crate::geometry::Point;

// external crates
use rand::Rng;
use shieldrun_dose::Particle;

/// Spatial distribution of source sites
#[derive(Debug, Clone, PartialEq)]
pub enum Space {
    /// Every particle starts at the same point
    Point(Point),
}

impl Space {
    /// Sample a starting position
    pub fn sample<R: Rng + ?Sized>(&self, _rng: &mut R) -> Point {
        match self {
            Space::Point(point) => *point,
        }
    }
}

/// Angular distribution of source particles
#[derive(Debug, Clone, PartialEq)]
pub enum Angle {
    /// Uniform over the unit sphere
    Isotropic,
    /// Every particle travels along the same unit vector
    Monodirectional(Point),
}

impl Angle {
    /// Sample a unit direction vector
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        match self {
            Angle::Isotropic => {
                let mu: f64 = 2.0 * rng.gen::<f64>() - 1.0;
                let phi: f64 = 2.0 * std::f64::consts::PI * rng.gen::<f64>();
                let s = (1.0 - mu * mu).sqrt();
                [s * phi.cos(), s * phi.sin(), mu]
            }
            Angle::Monodirectional(uvw) => *uvw,
        }
    }
}

/// Discrete energy distribution
///
/// A set of energies (eV) with relative probabilities. A single energy with
/// a weight of 1 is a monoenergetic source.
///
/// ```rust
/// # use shieldrun_model::Discrete;
/// let dd = Discrete::monoenergetic(14.0e6);
/// assert_eq!(dd.values(), &[14.0e6]);
/// assert_eq!(dd.probabilities(), &[1.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Discrete {
    values: Vec<f64>,
    probabilities: Vec<f64>,
}

impl Discrete {
    /// Distribution of `values` with relative `probabilities`
    pub fn new(values: Vec<f64>, probabilities: Vec<f64>) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidDistribution {
            reason: reason.to_string(),
        };

        if values.is_empty() {
            return Err(invalid("no values"));
        }
        if values.len() != probabilities.len() {
            return Err(invalid("values and probabilities differ in length"));
        }
        if probabilities.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(invalid("probabilities must be finite and non-negative"));
        }
        if probabilities.iter().sum::<f64>() <= 0.0 {
            return Err(invalid("probabilities sum to zero"));
        }

        Ok(Self {
            values,
            probabilities,
        })
    }

    /// A single energy with probability 1
    pub fn monoenergetic(energy: f64) -> Self {
        Self {
            values: vec![energy],
            probabilities: vec![1.0],
        }
    }

    /// Possible values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Relative probability of each value
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Sample a value in proportion to the probabilities
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let total: f64 = self.probabilities.iter().sum();
        let xi = rng.gen::<f64>() * total;

        let mut cumulative = 0.0;
        for (value, p) in self.values.iter().zip(&self.probabilities) {
            cumulative += p;
            if xi < cumulative {
                return *value;
            }
        }

        // only reachable through rounding in the cumulative sum
        self.values[self.values.len() - 1]
    }
}

/// A sampled source particle
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSite {
    /// Starting position (cm)
    pub position: Point,
    /// Unit direction of travel
    pub direction: Point,
    /// Kinetic energy (eV)
    pub energy: f64,
}

/// External particle source
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    /// Spatial distribution
    pub space: Space,
    /// Angular distribution
    pub angle: Angle,
    /// Energy distribution
    pub energy: Discrete,
    /// Emitted particle type
    pub particle: Particle,
    /// Relative strength when there are several sources
    pub strength: f64,
}

impl Source {
    /// Isotropic monoenergetic point source of neutrons
    ///
    /// ```rust
    /// # use shieldrun_model::{Angle, Source, Space};
    /// let source = Source::point([0.0, 0.0, 0.0], 14.0e6);
    /// assert_eq!(source.space, Space::Point([0.0; 3]));
    /// assert_eq!(source.angle, Angle::Isotropic);
    /// ```
    pub fn point(position: Point, energy: f64) -> Self {
        Self {
            space: Space::Point(position),
            angle: Angle::Isotropic,
            energy: Discrete::monoenergetic(energy),
            particle: Particle::Neutron,
            strength: 1.0,
        }
    }

    /// Sample a source particle
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SourceSite {
        SourceSite {
            position: self.space.sample(rng),
            direction: self.angle.sample(rng),
            energy: self.energy.sample(rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn discrete_sampling_follows_weights() {
        let mut rng = StdRng::seed_from_u64(42);
        let dd = Discrete::new(vec![1.0, 2.0], vec![3.0, 1.0]).unwrap();

        let n = 40_000;
        let ones = (0..n).filter(|_| dd.sample(&mut rng) == 1.0).count();
        let fraction = ones as f64 / n as f64;
        assert!((fraction - 0.75).abs() < 0.02, "fraction = {fraction}");
    }

    #[test]
    fn zero_weights_are_never_sampled() {
        let mut rng = StdRng::seed_from_u64(7);
        let dd = Discrete::new(vec![1.0, 2.0, 3.0], vec![0.0, 1.0, 0.0]).unwrap();
        assert!((0..1000).all(|_| dd.sample(&mut rng) == 2.0));
    }

    #[test]
    fn point_source_is_monoenergetic() {
        let mut rng = StdRng::seed_from_u64(14);
        let source = Source::point([0.0; 3], 14.0e6);
        assert_eq!(source.energy.values(), &[14.0e6]);
        assert_eq!(source.energy.probabilities(), &[1.0]);

        for _ in 0..100_000 {
            let site = source.sample(&mut rng);
            assert_eq!(site.energy, 14.0e6);
            assert_eq!(site.position, [0.0; 3]);
        }
    }

    #[test]
    fn invalid_distributions() {
        assert!(Discrete::new(vec![], vec![]).is_err());
        assert!(Discrete::new(vec![1.0], vec![1.0, 2.0]).is_err());
        assert!(Discrete::new(vec![1.0], vec![-1.0]).is_err());
        assert!(Discrete::new(vec![1.0], vec![0.0]).is_err());
    }

    #[test]
    fn isotropic_directions_are_unit_vectors() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut mean_mu = 0.0;
        let n = 10_000;
        for _ in 0..n {
            let [u, v, w] = Angle::Isotropic.sample(&mut rng);
            assert!(((u * u + v * v + w * w) - 1.0).abs() < 1.0e-12);
            mean_mu += w / n as f64;
        }
        assert!(mean_mu.abs() < 0.05);
    }
}
