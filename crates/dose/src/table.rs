// standard library
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

// internal modules
use crate::common::{IrradiationGeometry, Particle};
use crate::error::{Error, Result};

// external crates
use log::{debug, trace};
use shieldrun_utils::SliceExt;

/// Header of the energy column in tabulated data (MeV)
const ENERGY_COLUMN: &str = "energy_mev";

/// Tabulated dose conversion coefficients for one particle and geometry
///
/// Energies are stored in eV and coefficients in pSv cm2. These are the
/// units the transport engine expects for an energy function filter, so the
/// table can be passed straight through as a response function.
///
/// Tables are read from CSV with an `energy_mev` column followed by one
/// column per irradiation geometry label:
///
/// ```text
/// energy_mev,AP,PA
/// 1.00E-09,3.09,1.85
/// 1.00E-08,3.55,2.11
/// ...
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DoseTable {
    /// Particle type the coefficients apply to
    pub particle: Particle,
    /// Irradiation geometry convention
    pub geometry: IrradiationGeometry,
    energies: Vec<f64>,
    coefficients: Vec<f64>,
}

impl DoseTable {
    /// Units of the coefficients
    pub const UNITS: &'static str = "pSv cm2";

    /// Read the column for `geometry` from a CSV file
    ///
    /// ```rust, no_run
    /// # use shieldrun_dose::{DoseTable, IrradiationGeometry, Particle};
    /// let table = DoseTable::from_csv(
    ///     "path/to/coefficients.csv",
    ///     Particle::Neutron,
    ///     IrradiationGeometry::ISO,
    /// )
    /// .unwrap();
    /// ```
    pub fn from_csv<P: AsRef<Path>>(
        path: P,
        particle: Particle,
        geometry: IrradiationGeometry,
    ) -> Result<Self> {
        debug!("Reading dose table {:?}", path.as_ref());
        Self::from_reader(File::open(path)?, particle, geometry)
    }

    /// Read the column for `geometry` from anything implementing [Read]
    pub fn from_reader<R: Read>(
        reader: R,
        particle: Particle,
        geometry: IrradiationGeometry,
    ) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        // check the columns exist up front for a better error message
        let headers = reader.headers()?.clone();
        for column in [ENERGY_COLUMN, geometry.label()] {
            if !headers.iter().any(|h| h == column) {
                return Err(Error::MissingColumn {
                    column: column.to_string(),
                });
            }
        }

        let mut energies = Vec::new();
        let mut coefficients = Vec::new();
        for row in reader.deserialize::<HashMap<String, f64>>() {
            let row = row?;
            // both keys were checked against the headers
            energies.push(row[ENERGY_COLUMN] * 1.0e6);
            coefficients.push(row[geometry.label()]);
        }

        Self::new(particle, geometry, energies, coefficients)
    }

    /// Build a table from energies (eV) and coefficients (pSv cm2)
    ///
    /// Energies must be strictly ascending, with at least two points.
    pub fn new(
        particle: Particle,
        geometry: IrradiationGeometry,
        energies: Vec<f64>,
        coefficients: Vec<f64>,
    ) -> Result<Self> {
        if energies.len() != coefficients.len() {
            return Err(shieldrun_utils::Error::MismatchedSliceLengths {
                x: energies.len(),
                y: coefficients.len(),
            }
            .into());
        }

        if energies.len() < 2 {
            return Err(Error::TooFewRows {
                found: energies.len(),
            });
        }

        if let Some(row) = energies.windows(2).position(|pair| pair[0] >= pair[1]) {
            return Err(Error::UnsortedEnergies { row: row + 1 });
        }

        // reject NaN and infinities in either column
        let (lowest, highest) = (energies.try_min()?, energies.try_max()?);
        let peak = coefficients.try_max()?;
        debug!("Dose table {lowest:e} - {highest:e} eV, peak {peak} pSv cm2");

        trace!("Energies     = {:?}", energies);
        trace!("Coefficients = {:?}", coefficients);

        Ok(Self {
            particle,
            geometry,
            energies,
            coefficients,
        })
    }

    /// Tabulated energies (eV)
    pub fn energies(&self) -> &[f64] {
        &self.energies
    }

    /// Tabulated coefficients (pSv cm2)
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Number of tabulated points
    pub fn len(&self) -> usize {
        self.energies.len()
    }

    /// Whether the table holds no points, never true once constructed
    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }

    /// Response at `energy` (eV)
    ///
    /// Uses linear-linear interpolation, and anything outside of the tabulated
    /// range has no response at all.
    ///
    /// ```rust
    /// # use shieldrun_dose::{dose_coefficients, IrradiationGeometry, Particle};
    /// let table = dose_coefficients(Particle::Neutron, IrradiationGeometry::AP).unwrap();
    ///
    /// // 14 MeV is a tabulated point
    /// assert_eq!(table.evaluate(14.0e6), 495.0);
    ///
    /// // nothing above 10 GeV
    /// assert_eq!(table.evaluate(2.0e10), 0.0);
    /// ```
    pub fn evaluate(&self, energy: f64) -> f64 {
        self.energies
            .interpolate(&self.coefficients, energy)
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "energy_mev, AP, ISO\n1.0, 10.0, 1.0\n2.0, 20.0, 2.0\n";

    #[test]
    fn read_selected_column() {
        let table = DoseTable::from_reader(
            TABLE.as_bytes(),
            Particle::Photon,
            IrradiationGeometry::ISO,
        )
        .unwrap();
        assert_eq!(table.energies(), &[1.0e6, 2.0e6]);
        assert_eq!(table.coefficients(), &[1.0, 2.0]);
        assert_eq!(table.particle, Particle::Photon);
    }

    #[test]
    fn missing_column() {
        let result =
            DoseTable::from_reader(TABLE.as_bytes(), Particle::Neutron, IrradiationGeometry::PA);
        assert!(matches!(result, Err(Error::MissingColumn { column }) if column == "PA"));
    }

    #[test]
    fn reject_bad_tables() {
        let n = Particle::Neutron;
        let g = IrradiationGeometry::AP;
        assert!(matches!(
            DoseTable::new(n, g, vec![1.0], vec![1.0]),
            Err(Error::TooFewRows { found: 1 })
        ));
        assert!(matches!(
            DoseTable::new(n, g, vec![1.0, 3.0, 2.0], vec![1.0, 1.0, 1.0]),
            Err(Error::UnsortedEnergies { row: 2 })
        ));
        assert!(matches!(
            DoseTable::new(n, g, vec![1.0, 2.0], vec![1.0, f64::NAN]),
            Err(Error::Utils(_))
        ));
        assert!(matches!(
            DoseTable::new(n, g, vec![1.0, f64::INFINITY], vec![1.0, 1.0]),
            Err(Error::Utils(_))
        ));
        assert!(matches!(
            DoseTable::new(n, g, vec![1.0, 2.0], vec![1.0, f64::INFINITY]),
            Err(Error::Utils(_))
        ));
        assert!(matches!(
            DoseTable::new(n, g, vec![1.0, 2.0], vec![1.0]),
            Err(Error::Utils(_))
        ));
    }

    #[test]
    fn evaluate_between_points() {
        let table = DoseTable::new(
            Particle::Neutron,
            IrradiationGeometry::AP,
            vec![1.0, 3.0],
            vec![2.0, 6.0],
        )
        .unwrap();
        assert_eq!(table.evaluate(2.0), 4.0);
        assert_eq!(table.evaluate(0.5), 0.0);
        assert_eq!(table.evaluate(3.5), 0.0);
    }
}
