//! Per-grid vertical coordinate parameters.

use crate::error::{GridError, Result};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Scheme table shipped with the crate.
const BUILTIN_SCHEMES: &str = include_str!("../../config/grid_schemes.yaml");

/// Side of the grid, in the S, E, N, W order ROMS uses for open boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Southern edge (row 0).
    South,
    /// Eastern edge (last column).
    East,
    /// Northern edge (last row).
    North,
    /// Western edge (column 0).
    West,
}

impl Side {
    /// All sides in S, E, N, W order.
    pub const ALL: [Side; 4] = [Side::South, Side::East, Side::North, Side::West];

    /// One-letter label.
    pub fn label(self) -> &'static str {
        match self {
            Side::South => "S",
            Side::East => "E",
            Side::North => "N",
            Side::West => "W",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Open/closed state of the four grid edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct OpenBoundaries {
    /// Southern edge is open.
    #[serde(default)]
    pub south: bool,
    /// Eastern edge is open.
    #[serde(default)]
    pub east: bool,
    /// Northern edge is open.
    #[serde(default)]
    pub north: bool,
    /// Western edge is open.
    #[serde(default)]
    pub west: bool,
}

impl OpenBoundaries {
    /// Whether `side` is open.
    pub fn is_open(&self, side: Side) -> bool {
        match side {
            Side::South => self.south,
            Side::East => self.east,
            Side::North => self.north,
            Side::West => self.west,
        }
    }

    /// `(open, side)` pairs in S, E, N, W order.
    pub fn obcs(&self) -> [(bool, Side); 4] {
        Side::ALL.map(|side| (self.is_open(side), side))
    }
}

/// Vertical coordinate parameters of one grid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VerticalScheme {
    /// Surface stretching parameter.
    pub theta_s: f64,
    /// Bottom stretching parameter.
    pub theta_b: f64,
    /// Critical depth (m).
    pub hc: f64,
    /// Number of vertical levels.
    pub n: usize,
    /// Stretching scheme version tag.
    pub scoord: u8,
    /// Open boundaries.
    #[serde(default)]
    pub open_boundaries: OpenBoundaries,
}

#[derive(Debug, Deserialize)]
struct SchemeFile {
    grids: Vec<SchemeEntry>,
}

#[derive(Debug, Deserialize)]
struct SchemeEntry {
    name: String,
    #[serde(flatten)]
    scheme: VerticalScheme,
}

/// Registry of vertical schemes keyed by grid file basename.
#[derive(Debug, Clone, Default)]
pub struct SchemeRegistry {
    entries: Vec<(String, VerticalScheme)>,
}

impl SchemeRegistry {
    /// The table of grids known to this crate.
    pub fn builtin() -> Result<Self> {
        Self::from_yaml_str(BUILTIN_SCHEMES)
    }

    /// Load a scheme table from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        let registry = Self::from_yaml_str(&contents)?;
        info!(
            path = %path.as_ref().display(),
            grids = registry.len(),
            "Grid scheme table loaded"
        );
        Ok(registry)
    }

    /// Parse a scheme table from YAML text.
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let file: SchemeFile = serde_yaml::from_str(contents)?;
        let mut registry = Self::default();
        for entry in file.grids {
            registry.insert(entry.name, entry.scheme)?;
        }
        Ok(registry)
    }

    /// Register a scheme. Names must be unique.
    pub fn insert(&mut self, name: impl Into<String>, scheme: VerticalScheme) -> Result<()> {
        let name = name.into();
        if self.entries.iter().any(|(n, _)| *n == name) {
            return Err(GridError::DuplicateGrid { name });
        }
        self.entries.push((name, scheme));
        Ok(())
    }

    /// Find the scheme for a grid file basename.
    ///
    /// An exact name match wins; otherwise the first registered name that
    /// contains `basename` is used.
    pub fn lookup(&self, basename: &str) -> Result<&VerticalScheme> {
        if let Some((_, scheme)) = self.entries.iter().find(|(n, _)| n == basename) {
            return Ok(scheme);
        }

        if !basename.is_empty() {
            if let Some((name, scheme)) = self.entries.iter().find(|(n, _)| n.contains(basename)) {
                debug!(grid = basename, entry = %name, "Scheme matched by substring");
                return Ok(scheme);
            }
        }

        Err(GridError::unknown_grid(basename))
    }

    /// Registered grid names, in table order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Number of registered grids.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"
grids:
  - name: grd_test_2km.nc
    theta_s: 5.0
    theta_b: 0.4
    hc: 50.0
    n: 20
    scoord: 1
    open_boundaries: { south: true, west: true }
  - name: grd_other.nc
    theta_s: 7.0
    theta_b: 2.0
    hc: 250.0
    n: 35
    scoord: 2
"#;

    #[test]
    fn parses_table() {
        let registry = SchemeRegistry::from_yaml_str(TABLE).unwrap();
        assert_eq!(registry.len(), 2);

        let scheme = registry.lookup("grd_test_2km.nc").unwrap();
        assert_eq!(scheme.n, 20);
        assert_eq!(scheme.scoord, 1);
        assert_eq!(
            scheme.open_boundaries.obcs(),
            [
                (true, Side::South),
                (false, Side::East),
                (false, Side::North),
                (true, Side::West)
            ]
        );

        let other = registry.lookup("grd_other.nc").unwrap();
        assert_eq!(other.open_boundaries, OpenBoundaries::default());
    }

    #[test]
    fn unknown_grid_is_an_error() {
        let registry = SchemeRegistry::from_yaml_str(TABLE).unwrap();
        let err = registry.lookup("grd_nowhere.nc").unwrap_err();
        assert!(matches!(err, GridError::UnknownGrid { ref name } if name == "grd_nowhere.nc"));
        assert!(err.to_string().contains("add a new entry"));
    }

    #[test]
    fn substring_match() {
        let registry = SchemeRegistry::from_yaml_str(TABLE).unwrap();
        assert_eq!(registry.lookup("test_2km").unwrap().n, 20);
        assert!(registry.lookup("").is_err());
    }

    #[test]
    fn duplicates_rejected() {
        let doubled = format!("{}{}", TABLE, TABLE.replace("grids:\n", ""));
        let err = SchemeRegistry::from_yaml_str(&doubled).unwrap_err();
        assert!(matches!(err, GridError::DuplicateGrid { .. }));
    }

    #[test]
    fn builtin_table_loads() {
        let registry = SchemeRegistry::builtin().unwrap();
        assert_eq!(registry.len(), 12);
        assert!(registry.names().any(|n| n == "grd_MedSea5.nc"));

        let atl = registry.lookup("grd_ATL_15km.nc").unwrap();
        assert_eq!(atl.theta_s, 10.0);
        assert_eq!(atl.hc, 400.0);
        assert_eq!(atl.n, 40);
        assert!(!atl.open_boundaries.is_open(Side::West));

        assert_eq!(registry.lookup("roms_grd_CanBas_smooth_bnd.nc").unwrap().scoord, 1);
    }
}
