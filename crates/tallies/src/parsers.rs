// nom parser combinators
use nom::bytes::complete::{tag, tag_no_case, take_until};
use nom::character::complete::{self, char, space0, space1};
use nom::combinator::all_consuming;
use nom::error::{Error, ErrorKind};
use nom::multi::many1_count;
use nom::number::complete::double;
use nom::sequence::{preceded, tuple};
use nom::IResult;

/// Kinds of line found in a tallies.out file
#[derive(Debug, PartialEq)]
pub(crate) enum Line<'a> {
    Blank,
    Header(TallyHeader),
    Result(ScoreResult<'a>),
    Label { indent: usize, text: &'a str },
}

/// Tally id and name from a block header
#[derive(Debug, PartialEq)]
pub(crate) struct TallyHeader {
    pub id: u32,
    pub name: Option<String>,
}

/// A `<score> <mean> +/- <std_dev>` line
#[derive(Debug, PartialEq)]
pub(crate) struct ScoreResult<'a> {
    pub indent: usize,
    pub score: &'a str,
    pub mean: f64,
    pub std_dev: f64,
}

/// More convenient error creation for nom
fn cause(s: &str) -> nom::Err<Error<&str>> {
    nom::Err::Error(Error::new(s, ErrorKind::Fail))
}

/// Work out what a line holds
///
/// Anything that is not blank, a tally header, or a result is a label for a
/// filter bin, nuclide, or other tally metadata.
pub(crate) fn line(i: &str) -> IResult<&str, Line> {
    if i.trim().is_empty() {
        Ok((i, Line::Blank))
    } else if let Ok((i, header)) = tally_header(i) {
        Ok((i, Line::Header(header)))
    } else if i.contains("+/-") {
        let (i, result) = score_result(i)?;
        Ok((i, Line::Result(result)))
    } else {
        let (text, indent) = indentation(i)?;
        Ok(("", Line::Label {
            indent,
            text: text.trim_end(),
        }))
    }
}

/// Number of leading spaces
pub(crate) fn indentation(i: &str) -> IResult<&str, usize> {
    let (i, spaces) = space0(i)?;
    Ok((i, spaces.len()))
}

/// Parse a block header like ` ====>     TALLY 1: NAME     <====`
pub(crate) fn tally_header(i: &str) -> IResult<&str, TallyHeader> {
    let (i, _) = preceded(space0, many1_count(char('=')))(i)?;
    let (i, _) = tuple((char('>'), space1, tag_no_case("tally"), space1))(i)?;
    let (i, id) = complete::u32(i)?;
    let (i, name) = header_name(i)?;
    Ok((i, TallyHeader { id, name }))
}

/// Optional `: NAME` between the id and the closing marker
///
/// Names are free text, so the closing `<====` is stripped from the end
/// rather than searched for.
fn header_name(i: &str) -> IResult<&str, Option<String>> {
    let inner = i
        .trim_end()
        .trim_end_matches('=')
        .strip_suffix('<')
        .ok_or_else(|| cause("missing closing marker on tally header"))?
        .trim();

    if inner.is_empty() {
        return Ok(("", None));
    }

    let (name, _) = char(':')(inner)?;
    let name = name.trim();
    match name.is_empty() {
        true => Ok(("", None)),
        false => Ok(("", Some(name.to_string()))),
    }
}

/// Parse a score line into the score name, mean and standard deviation
///
/// Score names are left justified and padded, so the mean is the last word
/// before the `+/-` separator.
pub(crate) fn score_result(i: &str) -> IResult<&str, ScoreResult> {
    let (i, indent) = indentation(i)?;
    let (i, text) = take_until("+/-")(i)?;
    let (i, std_dev) = preceded(tuple((tag("+/-"), space0)), double)(i)?;

    let (score, mean) = text
        .trim_end()
        .rsplit_once(|c: char| c.is_whitespace())
        .ok_or_else(|| cause("score line is missing a mean value"))?;
    let (_, mean) = all_consuming(double)(mean)?;

    let score = score.trim_end();
    if score.is_empty() {
        return Err(cause("score line is missing a score name"));
    }

    Ok((
        i.trim_end(),
        ScoreResult {
            indent,
            score,
            mean,
            std_dev,
        },
    ))
}
