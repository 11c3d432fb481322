use std::io::{BufRead, Lines};

use log::{debug, trace, warn};

use crate::core::{TalliesOut, Tally, TallyRow};
use crate::error::{Error, Result};
use crate::parsers::{line, Line, ScoreResult, TallyHeader};

/// Internal reader for the tallies.out file
pub(crate) struct Reader<B: BufRead> {
    output: TalliesOut,
    lines: Lines<B>,
    cached_line: String,
    line_number: usize,
    /// Labels above the current line as (indent, text), outermost first
    labels: Vec<(usize, String)>,
}

// ! Internal API
impl<B: BufRead> Reader<B> {
    /// Create a new reader over the lines of `reader`
    pub(crate) fn new(reader: B) -> Self {
        Self {
            output: TalliesOut::default(),
            lines: reader.lines(),
            cached_line: String::new(),
            line_number: 0,
            labels: Vec::new(),
        }
    }

    // Advances to the next line, saving it to the cache and returning a ref
    fn next_line(&mut self) -> Result<&str> {
        self.cached_line = self.lines.next().ok_or(Error::EndOfFile)??;
        self.line_number += 1;
        Ok(self.cached_line.as_str())
    }

    fn last_tally_mut(&mut self) -> Result<&mut Tally> {
        self.output
            .tallies
            .last_mut()
            .ok_or(Error::NoTallyInitialised {
                line: self.line_number,
            })
    }

    /// Parse every tally block in the file
    pub(crate) fn read(mut self) -> Result<TalliesOut> {
        loop {
            match self.next_line() {
                Ok(_) => (),
                Err(Error::EndOfFile) => break,
                Err(e) => return Err(e),
            }

            let text = std::mem::take(&mut self.cached_line);
            let (_, kind) = line(&text)?;
            match kind {
                Line::Blank => (),
                Line::Header(header) => self.start_tally(header)?,
                Line::Label { indent, text } => self.add_label(indent, text)?,
                Line::Result(result) => self.add_row(result)?,
            }
        }

        debug!("Found {} tallies", self.output.tallies.len());
        Ok(self.output)
    }

    fn start_tally(&mut self, header: TallyHeader) -> Result<()> {
        if self.output.get_tally(header.id).is_some() {
            return Err(Error::DuplicateTally { id: header.id });
        }

        trace!("Tally {} name = {:?}", header.id, header.name);
        self.labels.clear();
        self.output.tallies.push(Tally {
            id: header.id,
            name: header.name,
            ..Default::default()
        });
        Ok(())
    }

    fn add_label(&mut self, indent: usize, text: &str) -> Result<()> {
        if self.output.tallies.is_empty() {
            // nothing before the first tally block is of interest
            trace!("Skipping line {}: {text}", self.line_number);
            return Ok(());
        }

        let opening = self.labels.is_empty();
        let tally = self.last_tally_mut()?;

        if opening && tally.rows.is_empty() {
            if text == "Internal" {
                tally.internal = true;
                return Ok(());
            }
            if text.contains("derivative") {
                tally.derivative = Some(text.to_string());
                return Ok(());
            }
        }

        // a label replaces any at the same or deeper nesting
        self.labels.retain(|(i, _)| *i < indent);
        self.labels.push((indent, text.to_string()));
        Ok(())
    }

    fn add_row(&mut self, result: ScoreResult) -> Result<()> {
        let line = self.line_number;
        let mut labels = self
            .labels
            .iter()
            .filter(|(i, _)| *i < result.indent)
            .map(|(_, text)| text.clone())
            .collect::<Vec<String>>();

        let tally = self.last_tally_mut()?;
        let nuclide = labels.pop().ok_or(Error::MissingNuclide {
            tally: tally.id,
            line,
        })?;

        if tally.internal {
            warn!("Tally {} is internal but has results", tally.id);
        }

        let row = TallyRow {
            bins: labels,
            nuclide,
            score: result.score.to_string(),
            mean: result.mean,
            std_dev: result.std_dev,
        };
        trace!("Tally {} row = {:?}", tally.id, row);
        tally.rows.push(row);
        Ok(())
    }
}
