//! End-to-end runs of the experiment with a stand-in solver

use shieldrun_experiment::{ids, Error, Experiment, Result, Solver, TALLIES_OUT};
use shieldrun_model::Fill;

use rstest::{fixture, rstest};
use std::path::{Path, PathBuf};

/// Writes a canned `tallies.out` instead of running a transport engine
struct FakeSolver {
    output: String,
}

impl FakeSolver {
    fn new(output: &str) -> Self {
        Self {
            output: output.to_string(),
        }
    }
}

impl Solver for FakeSolver {
    fn run(&self, dir: &Path) -> Result<PathBuf> {
        for name in ["materials.xml", "geometry.xml", "settings.xml", "tallies.xml"] {
            assert!(dir.join(name).is_file(), "{name} was not written");
        }
        let path = dir.join(TALLIES_OUT);
        std::fs::write(&path, &self.output)?;
        Ok(path)
    }
}

/// Solver that fails the way a crashed engine would
struct BrokenSolver;

impl Solver for BrokenSolver {
    fn run(&self, _: &Path) -> Result<PathBuf> {
        Err(Error::SolverFailed {
            program: PathBuf::from("openmc"),
            status: Some(255),
        })
    }
}

const SHELL_DOSE: &str = "
 ========================>     TALLY 1: TALLY     <=========================

 Cell 2
   Energy Function f([ 0.001, ..., 1e+10], [3.09, ..., 933])
     Total Material
       current                              0.0253317 +/- 0.000392128
";

const ZERO_DOSE: &str = "
 ========================>     TALLY 1: TALLY     <=========================

 Cell 2
   Energy Function f([ 0.001, ..., 1e+10], [3.09, ..., 933])
     Total Material
       current                              0 +/- 0
";

const EMPTY_TALLY: &str = "
 ========================>     TALLY 1: TALLY     <=========================

";

#[fixture]
fn experiment() -> Experiment {
    Experiment {
        seed: Some(1),
        ..Default::default()
    }
}

#[rstest]
fn sum_of_dose_tally(experiment: Experiment) {
    let summary = experiment.run(&FakeSolver::new(SHELL_DOSE), None).unwrap();
    assert_eq!(summary.rows, 1);
    assert_eq!(summary.sum, 0.0253317);
    assert!(summary.sum >= 0.0);
}

#[rstest]
fn empty_tally_sums_to_zero(experiment: Experiment) {
    let summary = experiment.run(&FakeSolver::new(EMPTY_TALLY), None).unwrap();
    assert_eq!(summary.rows, 0);
    assert_eq!(summary.sum, 0.0);
}

#[rstest]
fn missing_named_tally(mut experiment: Experiment) {
    experiment.tally_name = "dose".to_string();
    let result = experiment.run(&FakeSolver::new(SHELL_DOSE), None);
    assert!(matches!(result, Err(Error::TallyNotFound { name }) if name == "dose"));
}

#[rstest]
fn solver_failure_is_fatal(experiment: Experiment) {
    assert!(matches!(
        experiment.run(&BrokenSolver, None),
        Err(Error::SolverFailed {
            status: Some(255),
            ..
        })
    ));
}

#[rstest]
fn kept_run_directory(experiment: Experiment) {
    let dir = tempfile::tempdir().unwrap();
    let solver: &dyn Solver = &FakeSolver::new(SHELL_DOSE);
    experiment.run(solver, Some(dir.path())).unwrap();

    assert!(dir.path().join(TALLIES_OUT).is_file());
    let settings = std::fs::read_to_string(dir.path().join("settings.xml")).unwrap();
    assert!(settings.contains("<seed>1</seed>"));
    assert!(settings.contains("<particles>50000</particles>"));
    assert!(settings.contains("<inactive>0</inactive>"));
}

#[rstest]
fn scenario_model(experiment: Experiment) {
    let model = experiment.build_model().unwrap();

    let shell = model.geometry.cell(ids::SHELL_CELL).unwrap();
    assert_eq!(shell.fill, Fill::Material(ids::MATERIAL));
    assert!(shell.contains([0.0, 65.0, 0.0]));
    assert!(!shell.contains([0.0, 0.0, 0.0]));

    assert_eq!(model.materials[0].density, 11.0);
    assert_eq!(model.settings.sources[0].energy.values(), &[14.0e6]);
    assert_eq!(model.tallies[0].name, "tally");
    assert_eq!(model.tallies[0].scores, vec!["current"]);
}

#[rstest]
fn degenerate_shell(mut experiment: Experiment) {
    experiment.outer_radius = experiment.inner_radius;
    assert_eq!(experiment.shell_volume(), 0.0);

    let model = experiment.build_model().unwrap();
    let shell = model.geometry.cell(ids::SHELL_CELL).unwrap();
    assert!(!shell.contains([50.0, 0.0, 0.0]));

    // nothing can score in an empty shell
    let summary = experiment.run(&FakeSolver::new(ZERO_DOSE), None).unwrap();
    assert_eq!(summary.rows, 1);
    assert_eq!(summary.sum, 0.0);
    assert_eq!(summary.std_dev, 0.0);
}

#[rstest]
#[case("inner_radius = 60.0\nouter_radius = 55.0")] // case 1
#[case("energy = 0.0")] // case 2
#[case("tally_name = \"  \"")] // case 3
fn invalid_parameters(#[case] toml: &str) {
    let experiment = Experiment::from_toml_str(toml).unwrap();
    assert!(matches!(
        experiment.build_model(),
        Err(Error::InvalidParameter { .. })
    ));
}

#[rstest]
fn experiment_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("experiment.toml");
    std::fs::write(&path, "particles = 200\nbatches = 5\ninactive = 1\n").unwrap();

    let experiment = Experiment::from_toml_file(&path).unwrap();
    assert_eq!(experiment.particles, 200);
    assert_eq!(experiment.batches, 5);
    assert_eq!(experiment.inactive, 1);
    assert_eq!(experiment.outer_radius, 80.0);
}

#[rstest]
fn missing_dose_table(mut experiment: Experiment) {
    experiment.dose_table = Some(PathBuf::from("./no_such_table.csv"));
    assert!(matches!(experiment.build_model(), Err(Error::Dose(_))));
}
