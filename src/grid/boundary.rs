//! Perimeter of a (sub)grid in lon/lat space.

use crate::error::{GridError, Result};
use geo::{Contains, Coord, LineString, Point, Polygon};
use ndarray::ArrayView2;

/// Index bounds of a subgrid within the analysis view.
///
/// Negative indices count from the end, so `-1` is the last row or column.
/// The default covers the whole view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subgrid {
    /// Western column.
    pub imin: isize,
    /// Eastern column.
    pub imax: isize,
    /// Southern row.
    pub jmin: isize,
    /// Northern row.
    pub jmax: isize,
}

impl Default for Subgrid {
    fn default() -> Self {
        Self::new(0, -1, 0, -1)
    }
}

impl Subgrid {
    /// Create subgrid bounds.
    pub fn new(imin: isize, imax: isize, jmin: isize, jmax: isize) -> Self {
        Self {
            imin,
            imax,
            jmin,
            jmax,
        }
    }

    /// Resolve to `(imin, imax, jmin, jmax)` for an array of `(rows, cols)`.
    fn resolve(&self, (rows, cols): (usize, usize)) -> Result<(usize, usize, usize, usize)> {
        let imin = resolve_index(self.imin, cols, "imin")?;
        let imax = resolve_index(self.imax, cols, "imax")?;
        let jmin = resolve_index(self.jmin, rows, "jmin")?;
        let jmax = resolve_index(self.jmax, rows, "jmax")?;

        if imin >= imax || jmin >= jmax {
            return Err(GridError::InvalidSubgrid(format!(
                "columns {}..={} and rows {}..={} do not enclose an area",
                imin, imax, jmin, jmax
            )));
        }
        Ok((imin, imax, jmin, jmax))
    }
}

fn resolve_index(index: isize, len: usize, name: &str) -> Result<usize> {
    let resolved = if index < 0 {
        len.checked_sub(index.unsigned_abs())
    } else {
        Some(index as usize).filter(|&i| i < len)
    };
    resolved.ok_or_else(|| {
        GridError::InvalidSubgrid(format!("{} = {} is outside 0..{}", name, index, len))
    })
}

/// Ring of `(row, col)` indices: south edge west to east, east edge south to
/// north, north edge east to west, west edge north to south. Corners appear
/// once and the ring is not explicitly closed.
fn ring_indices(imin: usize, imax: usize, jmin: usize, jmax: usize) -> Vec<(usize, usize)> {
    let south = (imin..imax).map(|i| (jmin, i));
    let east = (jmin..jmax).map(|j| (j, imax));
    let north = (imin + 1..=imax).rev().map(|i| (jmax, i));
    let west = (jmin + 1..=jmax).rev().map(|j| (j, imin));
    south.chain(east).chain(north).chain(west).collect()
}

/// Longitudes and latitudes around the subgrid perimeter.
pub fn boundary(
    lon: ArrayView2<'_, f64>,
    lat: ArrayView2<'_, f64>,
    subgrid: Subgrid,
) -> Result<(Vec<f64>, Vec<f64>)> {
    if lon.dim() != lat.dim() {
        return Err(GridError::shape_mismatch(lon.shape(), lat.shape()));
    }
    let (imin, imax, jmin, jmax) = subgrid.resolve(lon.dim())?;

    Ok(ring_indices(imin, imax, jmin, jmax)
        .into_iter()
        .map(|idx| (lon[idx], lat[idx]))
        .unzip())
}

/// Closed polygon built from a boundary ring.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryPath {
    polygon: Polygon<f64>,
}

impl BoundaryPath {
    /// Build a path from matching longitude and latitude sequences.
    pub fn new(lon: &[f64], lat: &[f64]) -> Result<Self> {
        if lon.len() != lat.len() {
            return Err(GridError::shape_mismatch(&[lon.len()], &[lat.len()]));
        }
        let ring: Vec<Coord<f64>> = lon
            .iter()
            .zip(lat.iter())
            .map(|(&x, &y)| Coord { x, y })
            .collect();
        Ok(Self {
            polygon: Polygon::new(LineString::from(ring), vec![]),
        })
    }

    /// The closed lon/lat polygon.
    pub fn polygon(&self) -> &Polygon<f64> {
        &self.polygon
    }

    /// Vertices in ring order, without the closing point.
    pub fn vertices(&self) -> &[Coord<f64>] {
        &self.polygon.exterior().0[..self.len()]
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.polygon.exterior().0.len().saturating_sub(1)
    }

    /// Whether the path has no vertices.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `(lon, lat)` lies strictly inside the path.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        self.polygon.contains(&Point::new(lon, lat))
    }
}
