// standard library
use std::path::{Path, PathBuf};

// internal modules
use crate::error::{Error, Result};
use crate::solver::Solver;

// external crates
use log::{debug, info};
use serde::{Deserialize, Serialize};
use shieldrun_dose::{dose_coefficients, DoseTable, IrradiationGeometry, Particle};
use shieldrun_model::{
    BoundaryType, Cell, Enrichment, Filter, Geometry, Material, Model, PercentType, Settings,
    Source, Sphere, Tally,
};
use shieldrun_tallies::{TalliesOut, Tally as TallyResults};
use tempfile::TempDir;

/// Ids used in the generated model
pub mod ids {
    /// PbLi material
    pub const MATERIAL: u32 = 1;
    /// Inner sphere surface
    pub const INNER_SPHERE: u32 = 1;
    /// Outer sphere surface, vacuum boundary
    pub const OUTER_SPHERE: u32 = 2;
    /// Void cell inside the inner sphere
    pub const VOID_CELL: u32 = 1;
    /// PbLi shell cell
    pub const SHELL_CELL: u32 = 2;
    /// Cell filter on the shell
    pub const CELL_FILTER: u32 = 1;
    /// Dose coefficient energy function filter
    pub const DOSE_FILTER: u32 = 2;
    /// Dose tally
    pub const TALLY: u32 = 1;
}

/// Parameters of the spherical shell dose experiment
///
/// A monoenergetic isotropic point source of neutrons sits at the origin
/// inside a void sphere, surrounded by a shell of lithium-lead. The outer
/// surface of the shell is a vacuum boundary. A `current` tally on the shell
/// cell is weighted by dose conversion coefficients.
///
/// Every field has a default, so a TOML file only needs the values that
/// change.
///
/// ```rust
/// # use shieldrun_experiment::Experiment;
/// let experiment = Experiment::from_toml_str("outer_radius = 100.0").unwrap();
///
/// assert_eq!(experiment.inner_radius, 50.0);
/// assert_eq!(experiment.outer_radius, 100.0);
/// assert_eq!(experiment.particles, 50_000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Experiment {
    /// Radius of the void sphere around the source (cm)
    pub inner_radius: f64,
    /// Outer radius of the shell, a vacuum boundary (cm)
    pub outer_radius: f64,
    /// Shell density (g/cm3)
    pub density: f64,
    /// Lead content (atom %)
    pub lead_percent: f64,
    /// Lithium content (atom %)
    pub lithium_percent: f64,
    /// Li6 enrichment of the lithium (atom %)
    pub li6_enrichment: f64,
    /// Particles per batch
    pub particles: u64,
    /// Number of batches
    pub batches: u32,
    /// Number of inactive batches
    pub inactive: u32,
    /// Source energy (eV)
    pub energy: f64,
    /// Random number seed
    pub seed: Option<u64>,
    /// Name of the dose tally
    pub tally_name: String,
    /// Irradiation geometry of the dose coefficients
    pub dose_geometry: IrradiationGeometry,
    /// Coefficients from a CSV file instead of the bundled table
    pub dose_table: Option<PathBuf>,
}

impl Default for Experiment {
    fn default() -> Self {
        Self {
            inner_radius: 50.0,
            outer_radius: 80.0,
            density: 11.0,
            lead_percent: 84.2,
            lithium_percent: 15.8,
            li6_enrichment: 7.0,
            particles: 50_000,
            batches: 2,
            inactive: 0,
            energy: 14.0e6,
            seed: None,
            tally_name: "tally".to_string(),
            dose_geometry: IrradiationGeometry::AP,
            dose_table: None,
        }
    }
}

/// Summary of the dose tally
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DoseSummary {
    /// Sum of the `mean` column
    pub sum: f64,
    /// Standard deviation of the sum, rows treated as independent
    pub std_dev: f64,
    /// Number of rows summed
    pub rows: usize,
}

impl From<&TallyResults> for DoseSummary {
    fn from(tally: &TallyResults) -> Self {
        Self {
            sum: tally.sum_mean(),
            std_dev: tally.sum_std_dev(),
            rows: tally.len(),
        }
    }
}

impl Experiment {
    /// Read parameters from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        debug!("Reading experiment {}", path.as_ref().display());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Read parameters from TOML text, unset fields take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Check parameters are physically sensible
    ///
    /// Equal radii are allowed, and give a shell with no volume.
    pub fn validate(&self) -> Result<()> {
        let invalid =
            |name: &'static str, reason: String| Err(Error::InvalidParameter { name, reason });

        if !self.inner_radius.is_finite() || self.inner_radius < 0.0 {
            return invalid("inner_radius", format!("{} cm", self.inner_radius));
        }
        if !self.outer_radius.is_finite() || self.outer_radius < self.inner_radius {
            return invalid(
                "outer_radius",
                format!(
                    "{} cm is inside the inner radius of {} cm",
                    self.outer_radius, self.inner_radius
                ),
            );
        }
        if !self.energy.is_finite() || self.energy <= 0.0 {
            return invalid("energy", format!("{} eV", self.energy));
        }
        if self.tally_name.trim().is_empty() {
            return invalid("tally_name", "name is empty".to_string());
        }
        Ok(())
    }

    /// Shell volume (cm3)
    pub fn shell_volume(&self) -> f64 {
        let inner = Sphere::new(ids::INNER_SPHERE, self.inner_radius);
        let outer = Sphere::new(ids::OUTER_SPHERE, self.outer_radius);
        outer.volume() - inner.volume()
    }

    /// Dose coefficients, bundled unless a CSV table is given
    pub fn dose_table(&self) -> Result<DoseTable> {
        let table = match &self.dose_table {
            Some(path) => DoseTable::from_csv(path, Particle::Neutron, self.dose_geometry)?,
            None => dose_coefficients(Particle::Neutron, self.dose_geometry)?,
        };
        Ok(table)
    }

    /// Lithium-lead shell material
    pub fn material(&self) -> Result<Material> {
        let mut pbli = Material::new(ids::MATERIAL, "PbLi");
        pbli.add_element("Pb", self.lead_percent, PercentType::Atomic)?
            .add_enriched_element(
                "Li",
                self.lithium_percent,
                PercentType::Atomic,
                Enrichment::atomic("Li6", self.li6_enrichment),
            )?
            .set_density(self.density);
        Ok(pbli)
    }

    /// Void sphere inside a PbLi shell with a vacuum boundary
    pub fn geometry(&self) -> Geometry {
        let inner = Sphere::new(ids::INNER_SPHERE, self.inner_radius);
        let outer = Sphere::new(ids::OUTER_SPHERE, self.outer_radius)
            .with_boundary(BoundaryType::Vacuum);

        Geometry::new(vec![
            Cell::new(ids::VOID_CELL, -&inner).with_name("void"),
            Cell::new(ids::SHELL_CELL, inner.positive() & -&outer)
                .with_name("shell")
                .with_material(ids::MATERIAL),
        ])
    }

    /// Fixed source run of an isotropic point source at the origin
    pub fn settings(&self) -> Settings {
        let source = Source::point([0.0; 3], self.energy);
        let mut settings = Settings::fixed_source(self.particles, self.batches, source);
        settings.inactive = self.inactive;
        settings.seed = self.seed;
        settings
    }

    /// Dose weighted `current` on the shell cell
    pub fn tally(&self) -> Result<Tally> {
        let table = self.dose_table()?;
        Ok(Tally::new(ids::TALLY, self.tally_name.as_str())
            .with_filter(Filter::cell(ids::CELL_FILTER, vec![ids::SHELL_CELL]))
            .with_filter(Filter::energy_function(ids::DOSE_FILTER, &table))
            .with_score("current"))
    }

    /// Assemble and validate the complete model
    pub fn build_model(&self) -> Result<Model> {
        self.validate()?;

        let model = Model {
            materials: vec![self.material()?],
            geometry: self.geometry(),
            settings: self.settings(),
            tallies: vec![self.tally()?],
        };

        model.validate()?;
        Ok(model)
    }

    /// Run the experiment and summarise the dose tally
    ///
    /// Input files are written to `run_dir`, or to a temporary directory
    /// that is removed once the results are read.
    pub fn run<S: Solver + ?Sized>(
        &self,
        solver: &S,
        run_dir: Option<&Path>,
    ) -> Result<DoseSummary> {
        let model = self.build_model()?;
        info!(
            "PbLi shell {} - {} cm, {} particles x {} batches",
            self.inner_radius, self.outer_radius, self.particles, self.batches
        );

        let dir = RunDir::new(run_dir)?;
        model.export_to_xml(dir.path())?;

        let results = solver.run(dir.path())?;
        let output = TalliesOut::from_file(&results)?;

        let tally = output
            .get_tally_by_name(&self.tally_name)
            .ok_or_else(|| Error::TallyNotFound {
                name: self.tally_name.clone(),
            })?;

        let summary = DoseSummary::from(tally);
        debug!("Dose summary = {summary:?}");
        Ok(summary)
    }
}

/// Where the engine input and output files live during a run
enum RunDir {
    Kept(PathBuf),
    Temporary(TempDir),
}

impl RunDir {
    fn new(dir: Option<&Path>) -> Result<Self> {
        match dir {
            Some(dir) => Ok(Self::Kept(dir.to_path_buf())),
            None => Ok(Self::Temporary(
                tempfile::Builder::new().prefix("shieldrun-").tempdir()?,
            )),
        }
    }

    fn path(&self) -> &Path {
        match self {
            Self::Kept(path) => path,
            Self::Temporary(dir) => dir.path(),
        }
    }
}
