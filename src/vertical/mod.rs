//! Terrain-following vertical coordinates.
//!
//! [`SchemeRegistry`] maps grid files to their [`VerticalScheme`];
//! [`to_depth`] turns a scheme and a bottom-depth field into level depths.

mod scheme;
mod transform;

pub use scheme::{OpenBoundaries, SchemeRegistry, Side, VerticalScheme};
pub use transform::{dz, sigma_levels, stretching, to_depth, PointKind, ScoordVersion, Surface};
