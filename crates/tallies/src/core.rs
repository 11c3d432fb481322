// standard library
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

// crate modules
use crate::error::Result;
use crate::reader::Reader;

// external crates
use log::info;

/// Data structure to store `tallies.out` content
///
/// OpenMC writes this human-readable summary of every tally at the end of a
/// run when the `<tallies>` output option is on. Each tally block is a
/// header, a nest of filter bin labels, a nuclide label, and finally the
/// score results.
///
/// ```text
///  ========================>     TALLY 1: TALLY     <=========================
///
///  Cell 2
///    Energy Function f([ 0.001, ..., 1e+10], [3.09, ..., 933])
///      Total Material
///        current                              0.0253317 +/- 0.000392128
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TalliesOut {
    /// Every tally in the order written
    pub tallies: Vec<Tally>,
}

impl TalliesOut {
    /// Read a `tallies.out` file
    ///
    /// ```rust, no_run
    /// # use shieldrun_tallies::TalliesOut;
    /// let output = TalliesOut::from_file("path/to/tallies.out").unwrap();
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        info!("Reading {}", path.as_ref().display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Read `tallies.out` content from any buffered reader
    ///
    /// ```rust
    /// # use shieldrun_tallies::TalliesOut;
    /// let text = "\
    ///  ========================>     TALLY 7: FLUX     <==========================
    ///
    ///  Total Material
    ///    flux                                 2.5 +/- 0.1
    /// ";
    /// let output = TalliesOut::from_reader(text.as_bytes()).unwrap();
    /// assert_eq!(output.get_tally(7).unwrap().sum_mean(), 2.5);
    /// ```
    pub fn from_reader<B: BufRead>(reader: B) -> Result<Self> {
        Reader::new(reader).read()
    }

    /// Find a tally by id
    pub fn get_tally(&self, id: u32) -> Option<&Tally> {
        self.tallies.iter().find(|t| t.id == id)
    }

    /// Find a tally by name, ignoring case
    ///
    /// Names are upper-cased in the file, so `"tally"` will find a tally
    /// written as `TALLY`. The first match is returned if names are reused.
    pub fn get_tally_by_name(&self, name: &str) -> Option<&Tally> {
        self.tallies.iter().find(|t| {
            t.name
                .as_deref()
                .is_some_and(|n| n.eq_ignore_ascii_case(name.trim()))
        })
    }

    /// Number of tallies read
    pub fn len(&self) -> usize {
        self.tallies.len()
    }

    /// True if no tallies were found
    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }
}

/// Results for a single tally
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Tally {
    /// Tally id
    pub id: u32,
    /// Upper-cased tally name, if one was given
    pub name: Option<String>,
    /// Internal tallies are listed without any results
    pub internal: bool,
    /// Derivative description for differential tallies
    pub derivative: Option<String>,
    /// One row per filter bin combination, nuclide and score
    pub rows: Vec<TallyRow>,
}

impl Tally {
    /// Sum of the `mean` column
    ///
    /// Zero when there are no rows.
    pub fn sum_mean(&self) -> f64 {
        self.rows.iter().map(|r| r.mean).sum()
    }

    /// Standard deviation of [Tally::sum_mean()]
    ///
    /// Treats the rows as independent and adds their deviations in
    /// quadrature.
    pub fn sum_std_dev(&self) -> f64 {
        self.rows
            .iter()
            .map(|r| r.std_dev * r.std_dev)
            .sum::<f64>()
            .sqrt()
    }

    /// Rows for a single score, matched ignoring case
    pub fn rows_for_score<'a>(&'a self, score: &'a str) -> impl Iterator<Item = &'a TallyRow> {
        self.rows
            .iter()
            .filter(move |r| r.score.eq_ignore_ascii_case(score))
    }

    /// Number of result rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if there are no result rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A single result from a tally
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TallyRow {
    /// Filter bin labels, outermost filter first (e.g. `Cell 2`)
    pub bins: Vec<String>,
    /// Nuclide label (e.g. `Total Material`)
    pub nuclide: String,
    /// Score name (e.g. `current`)
    pub score: String,
    /// Mean value
    pub mean: f64,
    /// Standard deviation of the mean
    pub std_dev: f64,
}

impl TallyRow {
    /// Relative error of the mean, zero for a zero mean
    pub fn relative_error(&self) -> f64 {
        match self.mean == 0.0 {
            true => 0.0,
            false => (self.std_dev / self.mean).abs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(mean: f64, std_dev: f64, score: &str) -> TallyRow {
        TallyRow {
            score: score.to_string(),
            mean,
            std_dev,
            ..Default::default()
        }
    }

    #[test]
    fn empty_tally_sums_to_zero() {
        let tally = Tally::default();
        assert_eq!(tally.sum_mean(), 0.0);
        assert_eq!(tally.sum_std_dev(), 0.0);
        assert!(tally.is_empty());
    }

    #[test]
    fn sums_over_rows() {
        let tally = Tally {
            rows: vec![row(1.5, 0.3, "flux"), row(2.5, 0.4, "Current")],
            ..Default::default()
        };
        assert_eq!(tally.sum_mean(), 4.0);
        assert!((tally.sum_std_dev() - 0.5).abs() < 1e-12);
        assert_eq!(tally.rows_for_score("current").count(), 1);
    }

    #[test]
    fn relative_errors() {
        assert_eq!(row(0.0, 1.0, "flux").relative_error(), 0.0);
        assert_eq!(row(-2.0, 1.0, "flux").relative_error(), 0.5);
    }

    #[test]
    fn find_by_name_ignores_case() {
        let output = TalliesOut {
            tallies: vec![
                Tally {
                    id: 1,
                    ..Default::default()
                },
                Tally {
                    id: 4,
                    name: Some("DOSE".to_string()),
                    ..Default::default()
                },
            ],
        };
        assert_eq!(output.get_tally_by_name("dose").map(|t| t.id), Some(4));
        assert_eq!(output.get_tally_by_name("Dose ").map(|t| t.id), Some(4));
        assert!(output.get_tally_by_name("flux").is_none());
        assert!(output.get_tally(2).is_none());
    }
}
