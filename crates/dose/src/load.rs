// internal modules
use crate::common::{IrradiationGeometry, Particle};
use crate::error::{Error, Result};
use crate::table::DoseTable;

// external crates
use log::debug;

/// ICRP-116 Table A.5, neutron fluence to effective dose
const ICRP116_NEUTRON: &str = include_str!("../data/icrp116_neutron.csv");

/// Tabulated ICRP-116 effective dose coefficients
///
/// Returns the coefficients for `particle` in the requested irradiation
/// `geometry` as a [DoseTable] of energies (eV) and coefficients (pSv cm2).
///
/// Only the neutron antero-posterior data are bundled. Anything else is
/// [Error::MissingData], and should be loaded from a user supplied table with
/// [DoseTable::from_csv()] instead.
///
/// ```rust
/// # use shieldrun_dose::{dose_coefficients, IrradiationGeometry, Particle};
/// let table = dose_coefficients(Particle::Neutron, IrradiationGeometry::AP).unwrap();
/// assert_eq!(table.len(), 68);
///
/// // not bundled
/// assert!(dose_coefficients(Particle::Photon, IrradiationGeometry::AP).is_err());
/// ```
pub fn dose_coefficients(particle: Particle, geometry: IrradiationGeometry) -> Result<DoseTable> {
    debug!("Loading ICRP-116 coefficients for {particle} ({geometry})");

    let data = match particle {
        Particle::Neutron => ICRP116_NEUTRON,
        _ => return Err(Error::MissingData { particle, geometry }),
    };

    match DoseTable::from_reader(data.as_bytes(), particle, geometry) {
        Err(Error::MissingColumn { .. }) => Err(Error::MissingData { particle, geometry }),
        result => result,
    }
}
