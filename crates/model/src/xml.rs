//! Writers for the engine's XML input files
//!
//! Each writer takes anything implementing [Write] so that the output can go
//! to a file or be checked in memory. Every real number is written in the
//! same scientific format.

// standard library
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

// internal modules
use crate::error::Result;
use crate::geometry::{BoundaryType, Fill, Geometry};
use crate::material::Material;
use crate::settings::Settings;
use crate::source::{Angle, Source, Space};
use crate::tally::{Filter, Tally};

// external crates
use itertools::Itertools;
use log::trace;
use shieldrun_utils::ValueExt;

const HEADER: &str = "<?xml version='1.0' encoding='utf-8'?>";

/// Write `materials.xml` content
pub fn write_materials<W: Write>(writer: &mut W, materials: &[Material]) -> Result<()> {
    writeln!(writer, "{HEADER}")?;
    writeln!(writer, "<materials>")?;
    for material in materials {
        trace!("Writing material {}", material.id);
        writeln!(
            writer,
            "  <material id=\"{}\" name=\"{}\">",
            material.id,
            escape(&material.name)
        )?;
        writeln!(
            writer,
            "    <density units=\"{}\" value=\"{}\"/>",
            material.density_units.tag(),
            real(material.density)
        )?;

        let percent_type = material.percent_type()?;
        for nuclide in material.nuclides()? {
            writeln!(
                writer,
                "    <nuclide name=\"{}\" {}=\"{}\"/>",
                nuclide.name,
                percent_type.tag(),
                real(nuclide.percent)
            )?;
        }
        writeln!(writer, "  </material>")?;
    }
    writeln!(writer, "</materials>")?;
    Ok(())
}

/// Write `geometry.xml` content
///
/// Cells go first, then every unique surface sorted by id.
pub fn write_geometry<W: Write>(writer: &mut W, geometry: &Geometry) -> Result<()> {
    writeln!(writer, "{HEADER}")?;
    writeln!(writer, "<geometry>")?;

    for cell in geometry.cells() {
        write!(writer, "  <cell id=\"{}\"", cell.id)?;
        match cell.fill {
            Fill::Void => write!(writer, " material=\"void\"")?,
            Fill::Material(id) => write!(writer, " material=\"{id}\"")?,
        }
        if !cell.name.is_empty() {
            write!(writer, " name=\"{}\"", escape(&cell.name))?;
        }
        if let Some(region) = &cell.region {
            write!(writer, " region=\"{}\"", escape(&region.to_string()))?;
        }
        writeln!(writer, " universe=\"{}\"/>", geometry.root.id)?;
    }

    for sphere in geometry.surfaces() {
        let coeffs = sphere
            .origin
            .iter()
            .chain(std::iter::once(&sphere.radius))
            .map(|v| real(*v))
            .join(" ");
        write!(
            writer,
            "  <surface coeffs=\"{coeffs}\" id=\"{}\" type=\"sphere\"",
            sphere.id
        )?;
        if sphere.boundary != BoundaryType::Transmission {
            write!(writer, " boundary=\"{}\"", sphere.boundary.tag())?;
        }
        writeln!(writer, "/>")?;
    }

    writeln!(writer, "</geometry>")?;
    Ok(())
}

/// Write `settings.xml` content
pub fn write_settings<W: Write>(writer: &mut W, settings: &Settings) -> Result<()> {
    writeln!(writer, "{HEADER}")?;
    writeln!(writer, "<settings>")?;
    writeln!(writer, "  <run_mode>{}</run_mode>", settings.run_mode.tag())?;
    writeln!(writer, "  <particles>{}</particles>", settings.particles)?;
    writeln!(writer, "  <batches>{}</batches>", settings.batches)?;
    writeln!(writer, "  <inactive>{}</inactive>", settings.inactive)?;
    if let Some(seed) = settings.seed {
        writeln!(writer, "  <seed>{seed}</seed>")?;
    }
    for source in &settings.sources {
        write_source(writer, source)?;
    }
    writeln!(writer, "  <output>")?;
    writeln!(writer, "    <tallies>true</tallies>")?;
    writeln!(writer, "  </output>")?;
    writeln!(writer, "</settings>")?;
    Ok(())
}

fn write_source<W: Write>(writer: &mut W, source: &Source) -> Result<()> {
    writeln!(
        writer,
        "  <source particle=\"{}\" strength=\"{}\">",
        source.particle.name(),
        real(source.strength)
    )?;

    match &source.space {
        Space::Point(point) => {
            writeln!(writer, "    <space type=\"point\">")?;
            writeln!(writer, "      <parameters>{}</parameters>", reals(point))?;
            writeln!(writer, "    </space>")?;
        }
    }

    match &source.angle {
        Angle::Isotropic => writeln!(writer, "    <angle type=\"isotropic\"/>")?,
        Angle::Monodirectional(uvw) => {
            writeln!(writer, "    <angle type=\"monodirectional\">")?;
            writeln!(writer, "      <reference_uvw>{}</reference_uvw>", reals(uvw))?;
            writeln!(writer, "    </angle>")?;
        }
    }

    // values first, then their probabilities
    let energy = &source.energy;
    writeln!(writer, "    <energy type=\"discrete\">")?;
    writeln!(
        writer,
        "      <parameters>{} {}</parameters>",
        reals(energy.values()),
        reals(energy.probabilities())
    )?;
    writeln!(writer, "    </energy>")?;
    writeln!(writer, "  </source>")?;
    Ok(())
}

/// Write `tallies.xml` content
///
/// Filters are shared between tallies by id, so each is written only once.
pub fn write_tallies<W: Write>(writer: &mut W, tallies: &[Tally]) -> Result<()> {
    writeln!(writer, "{HEADER}")?;
    writeln!(writer, "<tallies>")?;

    let filters = tallies
        .iter()
        .flat_map(|t| &t.filters)
        .unique_by(|f| f.id())
        .sorted_by_key(|f| f.id());

    for filter in filters {
        write_filter(writer, filter)?;
    }

    for tally in tallies {
        writeln!(
            writer,
            "  <tally id=\"{}\" name=\"{}\">",
            tally.id,
            escape(&tally.name)
        )?;
        if !tally.filters.is_empty() {
            let ids = tally.filters.iter().map(|f| f.id()).join(" ");
            writeln!(writer, "    <filters>{ids}</filters>")?;
        }
        writeln!(writer, "    <scores>{}</scores>", tally.scores.join(" "))?;
        writeln!(writer, "  </tally>")?;
    }

    writeln!(writer, "</tallies>")?;
    Ok(())
}

fn write_filter<W: Write>(writer: &mut W, filter: &Filter) -> Result<()> {
    writeln!(
        writer,
        "  <filter id=\"{}\" type=\"{}\">",
        filter.id(),
        filter.kind()
    )?;
    match filter {
        Filter::Cell { cells, .. } => {
            writeln!(writer, "    <bins>{}</bins>", cells.iter().join(" "))?;
        }
        Filter::EnergyFunction {
            energies,
            values,
            interpolation,
            ..
        } => {
            writeln!(writer, "    <energy>{}</energy>", reals(energies))?;
            writeln!(writer, "    <y>{}</y>", reals(values))?;
            writeln!(
                writer,
                "    <interpolation>{}</interpolation>",
                interpolation.tag()
            )?;
        }
    }
    writeln!(writer, "  </filter>")?;
    Ok(())
}

/// Open a buffered writer to a new file
pub(crate) fn init_writer<P: AsRef<Path>>(path: P) -> Result<BufWriter<File>> {
    let file = File::create(path)?;
    Ok(BufWriter::new(file))
}

fn real(value: f64) -> String {
    value.sci(8, 2)
}

fn reals(values: &[f64]) -> String {
    values.iter().map(|v| real(*v)).join(" ")
}

/// Escape the characters that may not appear in attribute values
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Cell, Sphere};
    use crate::material::PercentType;

    fn to_string<F>(write: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut buffer = Vec::new();
        write(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn escaped_attributes() {
        assert_eq!(escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn material_block() {
        let mut iron = Material::new(3, "Iron");
        iron.add_element("Fe", 100.0, PercentType::Weight).unwrap();
        iron.set_density(7.874);

        let xml = to_string(|w| write_materials(w, &[iron]));
        assert!(xml.contains("<material id=\"3\" name=\"Iron\">"));
        assert!(xml.contains("<density units=\"g/cm3\" value=\"7.87400000e+00\"/>"));
        assert!(xml.contains("<nuclide name=\"Fe56\" wo=\""));
        assert_eq!(xml.matches("<nuclide").count(), 4);
    }

    #[test]
    fn geometry_block() {
        let sphere = Sphere::new(1, 50.0).with_boundary(BoundaryType::Vacuum);
        let geometry = Geometry::new(vec![
            Cell::new(1, sphere.negative()),
            Cell::new(2, sphere.positive()).with_material(4),
        ]);

        let xml = to_string(|w| write_geometry(w, &geometry));
        assert!(xml.contains("<cell id=\"1\" material=\"void\" region=\"-1\" universe=\"1\"/>"));
        assert!(xml.contains("<cell id=\"2\" material=\"4\" region=\"1\" universe=\"1\"/>"));
        assert!(xml.contains(
            "coeffs=\"0.00000000e+00 0.00000000e+00 0.00000000e+00 5.00000000e+01\" id=\"1\" type=\"sphere\" boundary=\"vacuum\"/>"
        ));
        assert_eq!(xml.matches("<surface").count(), 1);
    }

    #[test]
    fn settings_block() {
        let mut settings = Settings::fixed_source(100, 2, Source::point([0.0; 3], 14.0e6));
        settings.seed = Some(7);

        let xml = to_string(|w| write_settings(w, &settings));
        assert!(xml.contains("<run_mode>fixed source</run_mode>"));
        assert!(xml.contains("<particles>100</particles>"));
        assert!(xml.contains("<seed>7</seed>"));
        assert!(xml.contains("<source particle=\"neutron\" strength=\"1.00000000e+00\">"));
        assert!(xml.contains("<angle type=\"isotropic\"/>"));
        assert!(xml.contains("<parameters>1.40000000e+07 1.00000000e+00</parameters>"));
        assert!(xml.contains("<tallies>true</tallies>"));
    }

    #[test]
    fn shared_filters_written_once() {
        let cells = Filter::cell(1, vec![2]);
        let tallies = vec![
            Tally::new(1, "a").with_filter(cells.clone()).with_score("flux"),
            Tally::new(2, "b").with_filter(cells).with_score("current"),
        ];

        let xml = to_string(|w| write_tallies(w, &tallies));
        assert_eq!(xml.matches("<filter ").count(), 1);
        assert!(xml.contains("<bins>2</bins>"));
        assert!(xml.contains("<tally id=\"2\" name=\"b\">"));
        assert!(xml.contains("<scores>current</scores>"));
    }
}
