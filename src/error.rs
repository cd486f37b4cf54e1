//! Error types for roms-grid.
//!
//! This module provides a unified error handling approach using `thiserror`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors that can occur while loading or querying a grid.
#[derive(Debug, Error)]
pub enum GridError {
    /// The grid file could not be opened directly or under the root directory.
    #[error("No grid file at {} or at {}", path.display(), fallback.display())]
    GridNotFound { path: PathBuf, fallback: PathBuf },

    /// No vertical scheme is registered for this grid file.
    #[error(
        "Grid '{name}' has no vertical scheme entry; add a new entry with its \
         theta_s, theta_b, hc, n, scoord and open boundaries to the grid scheme table"
    )]
    UnknownGrid { name: String },

    /// The same grid name appears twice in a scheme table.
    #[error("Grid '{name}' is registered more than once")]
    DuplicateGrid { name: String },

    /// Vertical coordinate version the stretching transform does not implement.
    #[error("Unsupported vertical coordinate scheme version: {version}")]
    UnsupportedScheme { version: u8 },

    /// Arrays passed to an element-wise operation disagree in shape.
    #[error("Shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    /// A required variable is missing from the grid file.
    #[error("Variable '{name}' not found in grid file")]
    MissingVariable { name: String },

    /// A global attribute is missing from the grid file.
    #[error("Attribute '{name}' not found in grid file")]
    MissingAttribute { name: String },

    /// A variable exists but cannot be used as a grid field.
    #[error("Variable '{name}': {reason}")]
    InvalidVariable { name: String, reason: String },

    /// The bounding box contains no rho points.
    #[error("No grid points inside lon [{lonmin}, {lonmax}], lat [{latmin}, {latmax}]")]
    EmptyDomain {
        lonmin: f64,
        lonmax: f64,
        latmin: f64,
        latmax: f64,
    },

    /// Subgrid indices do not describe a rectangle inside the view.
    #[error("Invalid subgrid: {0}")]
    InvalidSubgrid(String),

    /// Index window bounds are inverted.
    #[error("Invalid index window: {0}")]
    InvalidWindow(String),

    /// Failed to read NetCDF file.
    #[error("NetCDF error: {0}")]
    NetCDF(String),

    /// Failed to parse a grid scheme table.
    #[error("Scheme table error: {0}")]
    SchemeConfig(#[from] serde_yaml::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GridError {
    /// Create a GridNotFound error.
    pub fn grid_not_found(path: impl Into<PathBuf>, fallback: impl Into<PathBuf>) -> Self {
        Self::GridNotFound {
            path: path.into(),
            fallback: fallback.into(),
        }
    }

    /// Create an UnknownGrid error.
    pub fn unknown_grid(name: impl Into<String>) -> Self {
        Self::UnknownGrid { name: name.into() }
    }

    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(expected: &[usize], found: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            found: found.to_vec(),
        }
    }

    /// Create a MissingVariable error.
    pub fn missing_variable(name: impl Into<String>) -> Self {
        Self::MissingVariable { name: name.into() }
    }

    /// Create an InvalidVariable error.
    pub fn invalid_variable(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidVariable {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

impl From<netcdf::Error> for GridError {
    fn from(err: netcdf::Error) -> Self {
        Self::NetCDF(err.to_string())
    }
}
