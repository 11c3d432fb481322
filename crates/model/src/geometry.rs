//! Constructive solid geometry built from spherical surfaces
//!
//! Surfaces split space into half-spaces, and half-spaces are combined with
//! the usual set operations to build the [Region] of a [Cell]:
//!
//! | Operation    | Method               | Operator |
//! | ------------ | -------------------- | -------- |
//! | inside       | `sphere.negative()`  | `-&s`    |
//! | outside      | `sphere.positive()`  |          |
//! | intersection | `Region::intersect`  | `a & b`  |
//! | union        | `Region::union`      | `a \| b` |
//! | complement   | `Region::complement` | `!a`     |
//!
//! For example, a spherical shell between two concentric spheres:
//!
//! ```rust
//! # use shieldrun_model::{BoundaryType, Sphere};
//! let inner = Sphere::new(1, 50.0);
//! let outer = Sphere::new(2, 80.0).with_boundary(BoundaryType::Vacuum);
//!
//! let shell = inner.positive() & -&outer;
//! assert_eq!(shell.to_string(), "(1 -2)");
//!
//! assert!(shell.contains([60.0, 0.0, 0.0]));
//! assert!(!shell.contains([0.0, 0.0, 10.0]));
//! ```

// standard library
use std::collections::HashSet;
use std::fmt::Display;
use std::ops::{BitAnd, BitOr, Neg, Not};

// internal modules
use crate::error::{Error, Result};

// external crates
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Cartesian coordinates (cm)
pub type Point = [f64; 3];

/// What happens to particles crossing a surface
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryType {
    /// Particles pass through
    #[default]
    Transmission,
    /// Particles leaving through the surface are killed
    Vacuum,
    /// Particles are specularly reflected
    Reflective,
    /// Particles are diffusely reflected
    White,
}

impl BoundaryType {
    /// Boundary name used in the engine input
    pub fn tag(&self) -> &'static str {
        match self {
            BoundaryType::Transmission => "transmission",
            BoundaryType::Vacuum => "vacuum",
            BoundaryType::Reflective => "reflective",
            BoundaryType::White => "white",
        }
    }
}

/// Spherical surface `(x-x0)^2 + (y-y0)^2 + (z-z0)^2 - r^2 = 0`
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    /// Unique surface id
    pub id: u32,
    /// Centre of the sphere (cm)
    pub origin: Point,
    /// Radius (cm)
    pub radius: f64,
    /// Boundary condition
    pub boundary: BoundaryType,
}

impl Sphere {
    /// Sphere of radius `r` centred on the origin
    pub fn new(id: u32, radius: f64) -> Self {
        Self {
            id,
            origin: [0.0; 3],
            radius,
            boundary: BoundaryType::default(),
        }
    }

    /// Move the centre of the sphere
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Change the boundary condition
    pub fn with_boundary(mut self, boundary: BoundaryType) -> Self {
        self.boundary = boundary;
        self
    }

    /// Value of the surface equation at `point`
    pub fn evaluate(&self, point: Point) -> f64 {
        let [x, y, z] = point;
        let [x0, y0, z0] = self.origin;
        (x - x0).powi(2) + (y - y0).powi(2) + (z - z0).powi(2) - self.radius.powi(2)
    }

    /// Enclosed volume (cm3)
    pub fn volume(&self) -> f64 {
        4.0 / 3.0 * std::f64::consts::PI * self.radius.powi(3)
    }

    /// Half-space inside the sphere
    pub fn negative(&self) -> Region {
        Region::Halfspace {
            surface: self.clone(),
            side: Side::Negative,
        }
    }

    /// Half-space outside the sphere
    pub fn positive(&self) -> Region {
        Region::Halfspace {
            surface: self.clone(),
            side: Side::Positive,
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(Error::InvalidRadius {
                id: self.id,
                radius: self.radius,
            });
        }
        Ok(())
    }
}

impl Neg for &Sphere {
    type Output = Region;

    fn neg(self) -> Region {
        self.negative()
    }
}

/// Which side of a surface a half-space covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Surface equation is negative
    Negative,
    /// Surface equation is zero or positive
    Positive,
}

/// Region of space as a tree of set operations on half-spaces
///
/// Points exactly on a surface belong to its positive side, so a negative
/// and positive half-space of the same surface never overlap and never leave
/// a gap.
#[derive(Debug, Clone, PartialEq)]
pub enum Region {
    Halfspace { surface: Sphere, side: Side },
    Intersection(Vec<Region>),
    Union(Vec<Region>),
    Complement(Box<Region>),
}

impl Region {
    /// Intersection of two regions, flattening nested intersections
    pub fn intersect(self, other: Region) -> Region {
        let mut nodes = match self {
            Region::Intersection(nodes) => nodes,
            region => vec![region],
        };
        match other {
            Region::Intersection(others) => nodes.extend(others),
            region => nodes.push(region),
        }
        Region::Intersection(nodes)
    }

    /// Union of two regions, flattening nested unions
    pub fn union(self, other: Region) -> Region {
        let mut nodes = match self {
            Region::Union(nodes) => nodes,
            region => vec![region],
        };
        match other {
            Region::Union(others) => nodes.extend(others),
            region => nodes.push(region),
        }
        Region::Union(nodes)
    }

    /// Everything not in this region
    ///
    /// The complement of a half-space is just the opposite half-space.
    pub fn complement(self) -> Region {
        match self {
            Region::Halfspace { surface, side } => Region::Halfspace {
                surface,
                side: match side {
                    Side::Negative => Side::Positive,
                    Side::Positive => Side::Negative,
                },
            },
            Region::Complement(region) => *region,
            region => Region::Complement(Box::new(region)),
        }
    }

    /// Whether `point` is inside the region
    pub fn contains(&self, point: Point) -> bool {
        match self {
            Region::Halfspace { surface, side } => {
                let value = surface.evaluate(point);
                match side {
                    Side::Negative => value < 0.0,
                    Side::Positive => value >= 0.0,
                }
            }
            Region::Intersection(nodes) => nodes.iter().all(|n| n.contains(point)),
            Region::Union(nodes) => nodes.iter().any(|n| n.contains(point)),
            Region::Complement(region) => !region.contains(point),
        }
    }

    /// Every surface referenced by the region, in order of appearance
    pub fn surfaces(&self) -> Vec<&Sphere> {
        let mut surfaces = Vec::new();
        self.collect_surfaces(&mut surfaces);
        surfaces
    }

    fn collect_surfaces<'a>(&'a self, surfaces: &mut Vec<&'a Sphere>) {
        match self {
            Region::Halfspace { surface, .. } => surfaces.push(surface),
            Region::Intersection(nodes) | Region::Union(nodes) => {
                nodes.iter().for_each(|n| n.collect_surfaces(surfaces))
            }
            Region::Complement(region) => region.collect_surfaces(surfaces),
        }
    }
}

/// Region expression in the engine's syntax
impl Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Region::Halfspace { surface, side } => match side {
                Side::Negative => write!(f, "-{}", surface.id),
                Side::Positive => write!(f, "{}", surface.id),
            },
            Region::Intersection(nodes) => write!(f, "({})", nodes.iter().join(" ")),
            Region::Union(nodes) => write!(f, "({})", nodes.iter().join(" | ")),
            Region::Complement(region) => write!(f, "~{region}"),
        }
    }
}

impl BitAnd for Region {
    type Output = Region;

    fn bitand(self, rhs: Region) -> Region {
        self.intersect(rhs)
    }
}

impl BitOr for Region {
    type Output = Region;

    fn bitor(self, rhs: Region) -> Region {
        self.union(rhs)
    }
}

impl Not for Region {
    type Output = Region;

    fn not(self) -> Region {
        self.complement()
    }
}

/// What a cell is filled with
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// Nothing at all
    #[default]
    Void,
    /// Material by id
    Material(u32),
}

/// A region of space with a single fill
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Unique cell id
    pub id: u32,
    /// Descriptive name
    pub name: String,
    /// Bounding region, `None` for all of space
    pub region: Option<Region>,
    /// Cell contents
    pub fill: Fill,
}

impl Cell {
    /// New void cell bounded by `region`
    pub fn new(id: u32, region: Region) -> Self {
        Self {
            id,
            name: String::new(),
            region: Some(region),
            fill: Fill::Void,
        }
    }

    /// Give the cell a name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Fill the cell with a material
    pub fn with_material(mut self, material: u32) -> Self {
        self.fill = Fill::Material(material);
        self
    }

    /// Whether `point` is inside the cell
    pub fn contains(&self, point: Point) -> bool {
        self.region.as_ref().map_or(true, |r| r.contains(point))
    }
}

/// Collection of cells that together fill space
#[derive(Debug, Clone, PartialEq)]
pub struct Universe {
    /// Unique universe id
    pub id: u32,
    /// Cells in the universe
    pub cells: Vec<Cell>,
}

/// Complete problem geometry
///
/// Only a single root universe is supported, which is all a nested-shell
/// problem needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    /// Root universe
    pub root: Universe,
}

impl Geometry {
    /// Id given to the root universe
    pub const ROOT_UNIVERSE: u32 = 1;

    /// Geometry from the cells of the root universe
    pub fn new(cells: Vec<Cell>) -> Self {
        Self {
            root: Universe {
                id: Self::ROOT_UNIVERSE,
                cells,
            },
        }
    }

    /// All cells in the root universe
    pub fn cells(&self) -> &[Cell] {
        &self.root.cells
    }

    /// Find a cell by id
    pub fn cell(&self, id: u32) -> Option<&Cell> {
        self.root.cells.iter().find(|c| c.id == id)
    }

    /// Every unique surface, sorted by id
    pub fn surfaces(&self) -> Vec<&Sphere> {
        self.root
            .cells
            .iter()
            .filter_map(|c| c.region.as_ref())
            .flat_map(|r| r.surfaces())
            .unique_by(|s| s.id)
            .sorted_by_key(|s| s.id)
            .collect()
    }

    /// Every cell containing `point`
    ///
    /// A valid geometry has exactly one cell for any point inside the problem
    /// boundary, and none outside of it.
    pub fn cells_containing(&self, point: Point) -> Vec<&Cell> {
        self.root
            .cells
            .iter()
            .filter(|c| c.contains(point))
            .collect()
    }

    /// First cell containing `point`
    pub fn find_cell(&self, point: Point) -> Option<&Cell> {
        self.root.cells.iter().find(|c| c.contains(point))
    }

    /// Check ids are unique and surface definitions are consistent
    pub fn validate(&self) -> Result<()> {
        let mut cell_ids = HashSet::new();
        for cell in &self.root.cells {
            if !cell_ids.insert(cell.id) {
                return Err(Error::DuplicateId {
                    kind: "cell",
                    id: cell.id,
                });
            }
        }

        // the same id must always mean the same surface
        let mut seen: Vec<&Sphere> = Vec::new();
        for surface in self
            .root
            .cells
            .iter()
            .filter_map(|c| c.region.as_ref())
            .flat_map(|r| r.surfaces())
        {
            surface.validate()?;
            match seen.iter().find(|s| s.id == surface.id) {
                Some(existing) if *existing != surface => {
                    return Err(Error::DuplicateId {
                        kind: "surface",
                        id: surface.id,
                    })
                }
                Some(_) => (),
                None => seen.push(surface),
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell() -> (Sphere, Sphere) {
        let inner = Sphere::new(1, 50.0);
        let outer = Sphere::new(2, 80.0).with_boundary(BoundaryType::Vacuum);
        (inner, outer)
    }

    #[test]
    fn region_expressions() {
        let (inner, outer) = shell();
        assert_eq!((-&inner).to_string(), "-1");
        assert_eq!(inner.positive().to_string(), "1");
        assert_eq!((inner.positive() & -&outer).to_string(), "(1 -2)");
        assert_eq!((-&inner | outer.positive()).to_string(), "(-1 | 2)");
        assert_eq!((!(inner.positive() & -&outer)).to_string(), "~(1 -2)");
        assert_eq!(!(-&inner), inner.positive());
    }

    #[test]
    fn nested_operations_flatten() {
        let (inner, outer) = shell();
        let third = Sphere::new(3, 90.0);
        let region = inner.positive() & -&outer & -&third;
        assert_eq!(region.to_string(), "(1 -2 -3)");
        assert_eq!(!!region.clone(), region);
    }

    #[test]
    fn points_on_surfaces_belong_to_the_positive_side() {
        let (inner, outer) = shell();
        let on_inner = [50.0, 0.0, 0.0];
        assert!(!(-&inner).contains(on_inner));
        assert!(inner.positive().contains(on_inner));

        let on_outer = [0.0, 80.0, 0.0];
        assert!(!(inner.positive() & -&outer).contains(on_outer));
    }

    #[test]
    fn shifted_sphere() {
        let sphere = Sphere::new(1, 1.0).with_origin([10.0, 0.0, 0.0]);
        assert!(sphere.negative().contains([10.5, 0.0, 0.0]));
        assert!(!sphere.negative().contains([0.0, 0.0, 0.0]));
    }

    #[test]
    fn surfaces_are_unique() {
        let (inner, outer) = shell();
        let geometry = Geometry::new(vec![
            Cell::new(1, -&inner),
            Cell::new(2, inner.positive() & -&outer).with_material(1),
        ]);
        let ids: Vec<u32> = geometry.surfaces().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(geometry.validate().is_ok());
    }

    #[test]
    fn conflicting_definitions() {
        let (inner, outer) = shell();
        let geometry = Geometry::new(vec![Cell::new(1, -&inner), Cell::new(1, -&outer)]);
        assert!(matches!(
            geometry.validate(),
            Err(Error::DuplicateId { kind: "cell", id: 1 })
        ));

        let imposter = Sphere::new(1, 20.0);
        let geometry = Geometry::new(vec![Cell::new(1, -&inner), Cell::new(2, imposter.positive())]);
        assert!(matches!(
            geometry.validate(),
            Err(Error::DuplicateId { kind: "surface", id: 1 })
        ));

        let negative = Sphere::new(4, -1.0);
        let geometry = Geometry::new(vec![Cell::new(1, -&negative)]);
        assert!(matches!(
            geometry.validate(),
            Err(Error::InvalidRadius { id: 4, .. })
        ));
    }
}
