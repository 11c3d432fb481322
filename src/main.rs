//! Command line tool for the PbLi shell dose experiment

// standard library
use std::path::PathBuf;

// shieldrun crates
use shieldrun::experiment::{Experiment, Openmc};

// external crates
use clap::Parser;
use log::{debug, error, info};

/// Run the PbLi spherical shell dose experiment through OpenMC
///
/// Builds the OpenMC model for a 14 MeV point neutron source inside a
/// lithium-lead shell, runs OpenMC, and prints the sum of the dose weighted
/// `current` tally as a single number.
///
/// Examples
/// --------
///
///  Run the default experiment:
///     $ shieldrun
///
///  Reproducible run with parameters from a file:
///     $ shieldrun --config experiment.toml --seed 1
///
///  Keep the input and output files for inspection:
///     $ shieldrun --run-dir ./run
///
/// Notes
/// -----
///
/// The result goes to stdout as a single line. Only warnings and errors are
/// logged to stderr unless -v is given. Any failure exits with a non-zero
/// status.
#[derive(Parser, Debug)]
#[command(
    version,
    verbatim_doc_comment,
    after_help("Typical use: shieldrun --seed 1 -v\n\nNOTE: --help shows more than -h")
)]
struct Cli {
    /// Experiment parameters from a TOML file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// OpenMC executable
    #[arg(long, value_name = "PATH", default_value = "openmc")]
    openmc: PathBuf,

    /// Keep input and output files in this directory
    #[arg(long, value_name = "PATH")]
    run_dir: Option<PathBuf>,

    /// Random number seed
    #[arg(long)]
    seed: Option<u64>,

    /// Number of OpenMP threads for OpenMC
    #[arg(long, value_name = "NUM")]
    threads: Option<u32>,

    // * Flags
    /// Verbose logging (-v, -vv, -vvv)
    ///
    /// If specified, the default log level of WARN is increased to INFO (-v),
    /// DEBUG (-vv) or TRACE (-vvv). Errors and Warnings are always logged
    /// unless in quiet (-q) mode.
    #[arg(short, long)]
    #[arg(action = clap::ArgAction::Count)]
    verbose: u8,

    /// Supress all log output (overrules --verbose)
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    logging_init(&cli);

    match run(&cli) {
        Ok(sum) => println!("{sum}"),
        Err(e) => {
            error!("{e}");
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                error!("  caused by: {cause}");
                source = cause.source();
            }
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> shieldrun::experiment::Result<f64> {
    let mut experiment = match &cli.config {
        Some(path) => Experiment::from_toml_file(path)?,
        None => Experiment::default(),
    };

    if cli.seed.is_some() {
        experiment.seed = cli.seed;
    }
    debug!("{experiment:#?}");

    let mut openmc = Openmc::new(&cli.openmc);
    openmc.threads = cli.threads;

    let summary = experiment.run(&openmc, cli.run_dir.as_deref())?;
    info!(
        "Summed {} rows, standard deviation {:.4e}",
        summary.rows, summary.std_dev
    );
    Ok(summary.sum)
}

/// Sets up logging at runtime to allow for multiple verbosity levels
fn logging_init(cli: &Cli) {
    let result = stderrlog::new()
        .modules(vec![
            module_path!(),
            "shieldrun_dose",
            "shieldrun_experiment",
            "shieldrun_model",
            "shieldrun_tallies",
        ])
        .quiet(cli.quiet)
        .verbosity(verbosity(cli))
        .show_level(true)
        .color(stderrlog::ColorChoice::Never)
        .timestamp(stderrlog::Timestamp::Off)
        .init();

    if let Err(e) = result {
        eprintln!("Unable to initialise logging: {e}");
    }
}

/// stderrlog level, WARN unless raised with -v
fn verbosity(cli: &Cli) -> usize {
    cli.verbose as usize + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_only_by_default() {
        let cli = Cli::try_parse_from(["shieldrun"]).unwrap();
        assert_eq!(verbosity(&cli), 1);
        assert!(!cli.quiet);
    }

    #[test]
    fn verbose_flags_raise_level() {
        let cli = Cli::try_parse_from(["shieldrun", "-v"]).unwrap();
        assert_eq!(verbosity(&cli), 2);

        let cli = Cli::try_parse_from(["shieldrun", "-vvv"]).unwrap();
        assert_eq!(verbosity(&cli), 4);
    }
}
