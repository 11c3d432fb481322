use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Particle types with tabulated ICRP-116 coefficients
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Particle {
    #[default]
    Neutron,
    Photon,
    Electron,
    Positron,
}

impl Particle {
    /// Name used by the transport engine input files
    pub fn name(&self) -> &'static str {
        match self {
            Particle::Neutron => "neutron",
            Particle::Photon => "photon",
            Particle::Electron => "electron",
            Particle::Positron => "positron",
        }
    }
}

impl Display for Particle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Particle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "neutron" | "n" => Ok(Particle::Neutron),
            "photon" | "p" | "gamma" => Ok(Particle::Photon),
            "electron" | "e" | "e-" => Ok(Particle::Electron),
            "positron" | "e+" => Ok(Particle::Positron),
            _ => Err(format!("unknown particle \"{s}\"")),
        }
    }
}

/// Irradiation geometry conventions from ICRP-116
///
/// | Variant | Description                 |
/// | ------- | --------------------------- |
/// | AP      | antero-posterior            |
/// | PA      | postero-anterior            |
/// | LLAT    | left lateral                |
/// | RLAT    | right lateral               |
/// | ROT     | rotational                  |
/// | ISO     | isotropic                   |
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[allow(clippy::upper_case_acronyms)]
pub enum IrradiationGeometry {
    #[default]
    AP,
    PA,
    LLAT,
    RLAT,
    ROT,
    ISO,
}

impl IrradiationGeometry {
    /// Column label used in the tabulated data
    pub fn label(&self) -> &'static str {
        match self {
            IrradiationGeometry::AP => "AP",
            IrradiationGeometry::PA => "PA",
            IrradiationGeometry::LLAT => "LLAT",
            IrradiationGeometry::RLAT => "RLAT",
            IrradiationGeometry::ROT => "ROT",
            IrradiationGeometry::ISO => "ISO",
        }
    }
}

impl Display for IrradiationGeometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for IrradiationGeometry {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AP" => Ok(IrradiationGeometry::AP),
            "PA" => Ok(IrradiationGeometry::PA),
            "LLAT" => Ok(IrradiationGeometry::LLAT),
            "RLAT" => Ok(IrradiationGeometry::RLAT),
            "ROT" => Ok(IrradiationGeometry::ROT),
            "ISO" => Ok(IrradiationGeometry::ISO),
            _ => Err(format!("unknown irradiation geometry \"{s}\"")),
        }
    }
}
