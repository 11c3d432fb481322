// standard library
use std::collections::HashSet;
use std::path::{Path, PathBuf};

// internal modules
use crate::error::{Error, Result};
use crate::geometry::{Fill, Geometry};
use crate::material::Material;
use crate::settings::Settings;
use crate::tally::{Filter, Tally};
use crate::xml;

// external crates
use log::{debug, trace};

/// Complete transport model
///
/// Everything the engine needs to run: materials, geometry, settings and
/// tallies. The model is checked for consistency before it is exported, so
/// problems surface here rather than as an engine failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub materials: Vec<Material>,
    pub geometry: Geometry,
    pub settings: Settings,
    pub tallies: Vec<Tally>,
}

impl Model {
    /// File names written by [Model::export_to_xml()]
    pub const FILES: [&'static str; 4] =
        ["materials.xml", "geometry.xml", "settings.xml", "tallies.xml"];

    /// Check the model is internally consistent
    ///
    /// - ids are unique for materials, tallies, cells and surfaces
    /// - materials have constituents, one percent type and a density
    /// - cells are filled with defined materials
    /// - cell filters only refer to defined cells
    /// - filters shared by id are identical
    /// - tallies have at least one score
    /// - run settings are usable
    pub fn validate(&self) -> Result<()> {
        let mut material_ids = HashSet::new();
        for material in &self.materials {
            if !material_ids.insert(material.id) {
                return Err(Error::DuplicateId {
                    kind: "material",
                    id: material.id,
                });
            }
            material.validate()?;
        }

        self.geometry.validate()?;
        for cell in self.geometry.cells() {
            if let Fill::Material(material) = cell.fill {
                if !material_ids.contains(&material) {
                    return Err(Error::UndefinedMaterial {
                        cell: cell.id,
                        material,
                    });
                }
            }
        }

        let mut tally_ids = HashSet::new();
        let mut filters: Vec<&Filter> = Vec::new();
        for tally in &self.tallies {
            if !tally_ids.insert(tally.id) {
                return Err(Error::DuplicateId {
                    kind: "tally",
                    id: tally.id,
                });
            }
            tally.validate()?;

            for filter in &tally.filters {
                match filters.iter().find(|f| f.id() == filter.id()) {
                    Some(existing) if *existing != filter => {
                        return Err(Error::ConflictingFilter { id: filter.id() })
                    }
                    Some(_) => continue,
                    None => filters.push(filter),
                }
                self.check_filter_cells(filter)?;
            }
        }

        self.settings.validate()
    }

    /// Write the engine input files into `dir`
    ///
    /// The model is validated first and nothing is written if it is
    /// inconsistent. Returns the paths of the files written.
    ///
    /// ```no_run
    /// # use shieldrun_model::Model;
    /// # fn export(model: &Model) -> shieldrun_model::Result<()> {
    /// let files = model.export_to_xml("./run")?;
    /// assert_eq!(files.len(), 4);
    /// # Ok(())
    /// # }
    /// ```
    pub fn export_to_xml<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<PathBuf>> {
        self.validate()?;

        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        debug!("Writing model files to {}", dir.display());

        let paths = Self::FILES.map(|name| dir.join(name));
        let [materials, geometry, settings, tallies] = &paths;

        let mut writer = xml::init_writer(materials)?;
        xml::write_materials(&mut writer, &self.materials)?;
        Self::finish(writer, materials)?;

        let mut writer = xml::init_writer(geometry)?;
        xml::write_geometry(&mut writer, &self.geometry)?;
        Self::finish(writer, geometry)?;

        let mut writer = xml::init_writer(settings)?;
        xml::write_settings(&mut writer, &self.settings)?;
        Self::finish(writer, settings)?;

        let mut writer = xml::init_writer(tallies)?;
        xml::write_tallies(&mut writer, &self.tallies)?;
        Self::finish(writer, tallies)?;

        Ok(paths.to_vec())
    }

    fn check_filter_cells(&self, filter: &Filter) -> Result<()> {
        if let Filter::Cell { id, cells } = filter {
            if let Some(cell) = cells.iter().find(|c| self.geometry.cell(**c).is_none()) {
                return Err(Error::UndefinedCell {
                    filter: *id,
                    cell: *cell,
                });
            }
        }
        Ok(())
    }

    fn finish<W: std::io::Write>(mut writer: W, path: &Path) -> Result<()> {
        writer.flush()?;
        trace!("Wrote {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Cell, Sphere};
    use crate::material::PercentType;
    use crate::source::Source;

    fn model() -> Model {
        let mut lithium = Material::new(1, "Li");
        lithium.add_element("Li", 100.0, PercentType::Atomic).unwrap();
        lithium.set_density(0.534);

        let sphere = Sphere::new(1, 10.0);
        Model {
            materials: vec![lithium],
            geometry: Geometry::new(vec![
                Cell::new(1, sphere.negative()).with_material(1),
                Cell::new(2, sphere.positive()),
            ]),
            settings: Settings::fixed_source(10, 1, Source::point([0.0; 3], 1.0e6)),
            tallies: vec![Tally::new(1, "cells")
                .with_filter(Filter::cell(1, vec![1, 2]))
                .with_score("flux")],
        }
    }

    #[test]
    fn consistent_model() {
        assert!(model().validate().is_ok());
    }

    #[test]
    fn undefined_material() {
        let mut model = model();
        model.materials[0].id = 9;
        assert!(matches!(
            model.validate(),
            Err(Error::UndefinedMaterial {
                cell: 1,
                material: 1
            })
        ));
    }

    #[test]
    fn undefined_cell() {
        let mut model = model();
        model.tallies[0].filters[0] = Filter::cell(1, vec![1, 3]);
        assert!(matches!(
            model.validate(),
            Err(Error::UndefinedCell { filter: 1, cell: 3 })
        ));
    }

    #[test]
    fn conflicting_filters() {
        let mut model = model();
        model.tallies.push(
            Tally::new(2, "other")
                .with_filter(Filter::cell(1, vec![2]))
                .with_score("current"),
        );
        assert!(matches!(
            model.validate(),
            Err(Error::ConflictingFilter { id: 1 })
        ));
    }

    #[test]
    fn duplicate_ids() {
        let mut model = model();
        model.materials.push(model.materials[0].clone());
        assert!(matches!(
            model.validate(),
            Err(Error::DuplicateId {
                kind: "material",
                id: 1
            })
        ));

        let mut model = self::model();
        model.tallies.push(model.tallies[0].clone());
        assert!(matches!(
            model.validate(),
            Err(Error::DuplicateId { kind: "tally", .. })
        ));
    }
}
