//! Integration tests for bundled and user supplied coefficient tables

use shieldrun_dose::{dose_coefficients, DoseTable, Error, IrradiationGeometry, Particle};

use rstest::{fixture, rstest};
use std::io::Write;

#[fixture]
fn neutron_ap() -> DoseTable {
    dose_coefficients(Particle::Neutron, IrradiationGeometry::AP).unwrap()
}

#[rstest]
fn bundled_table_shape(neutron_ap: DoseTable) {
    assert_eq!(neutron_ap.len(), 68);
    assert_eq!(neutron_ap.particle, Particle::Neutron);
    assert_eq!(neutron_ap.geometry, IrradiationGeometry::AP);

    // 1 meV up to 10 GeV, given in eV
    let energies = neutron_ap.energies();
    assert!((energies[0] - 1.0e-3).abs() < 1.0e-15);
    assert!((energies[67] - 1.0e10).abs() < 1.0);
}

#[rstest]
#[case(1.0e6, 301.0)] // case 1
#[case(2.0e6, 407.0)] // case 2
#[case(1.0e7, 500.0)] // case 3
#[case(1.4e7, 495.0)] // case 4
#[case(2.0e7, 477.0)] // case 5
fn bundled_table_values(neutron_ap: DoseTable, #[case] energy: f64, #[case] expected: f64) {
    assert!((neutron_ap.evaluate(energy) - expected).abs() < 1.0e-9);
}

#[rstest]
fn bundled_table_interpolates(neutron_ap: DoseTable) {
    // halfway between 12 MeV (499) and 14 MeV (495)
    assert!((neutron_ap.evaluate(1.3e7) - 497.0).abs() < 1.0e-9);
    // outside the tabulated range there is no response
    assert_eq!(neutron_ap.evaluate(1.0e-5), 0.0);
    assert_eq!(neutron_ap.evaluate(2.0e10), 0.0);
}

#[rstest]
#[case(Particle::Photon, IrradiationGeometry::AP)] // case 1
#[case(Particle::Electron, IrradiationGeometry::ISO)] // case 2
#[case(Particle::Neutron, IrradiationGeometry::ROT)] // case 3
fn missing_bundled_data(#[case] particle: Particle, #[case] geometry: IrradiationGeometry) {
    let result = dose_coefficients(particle, geometry);
    assert!(matches!(result, Err(Error::MissingData { .. })));
}

#[test]
fn user_supplied_table() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "energy_mev,AP,ROT").unwrap();
    writeln!(file, "1.0,100.0,80.0").unwrap();
    writeln!(file, "10.0,500.0,400.0").unwrap();
    file.flush().unwrap();

    let table =
        DoseTable::from_csv(file.path(), Particle::Neutron, IrradiationGeometry::ROT).unwrap();
    assert_eq!(table.energies(), &[1.0e6, 1.0e7]);
    assert_eq!(table.coefficients(), &[80.0, 400.0]);
}
