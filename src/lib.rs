//! roms-grid - read-only access to ROMS curvilinear grids.
//!
//! The crate loads a ROMS grid file once and derives the geometry that eddy
//! detection and diagnostics need, all seen through a single index window:
//!
//! - Staggered u/v/psi land/sea masks
//! - Terrain-following level depths and cell thicknesses
//! - Boundary perimeters and polygons
//! - Mean grid resolution
//! - Rotation of grid-relative vectors to east/north
//! - Transects between two points
//!
//! # Example
//!
//! ```ignore
//! use roms_grid::{Grid, GridConfig, SchemeRegistry};
//! use roms_grid::vertical::Surface;
//!
//! let registry = SchemeRegistry::builtin()?;
//! let config = GridConfig::new("grd_NA2011_7pt5km.nc").with_root("/data/runs");
//! let grid = Grid::open(&config, &registry)?;
//!
//! let z_w = grid.scoord2z_w(Surface::default())?;
//! println!("{} levels over a {:?} view", z_w.dim().0, grid.shape());
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod config;
pub mod data;
pub mod error;
pub mod geo;
pub mod grid;
pub mod vertical;

pub use config::{BoundingBox, GridConfig};
pub use error::{GridError, Result};
pub use grid::{Grid, Subgrid};
pub use vertical::{SchemeRegistry, VerticalScheme};
