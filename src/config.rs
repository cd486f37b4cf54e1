//! Grid construction parameters.

use std::path::PathBuf;

/// Default index padding around the analysis domain, in grid cells.
pub const DEFAULT_PADDING: usize = 2;

/// Longitude/latitude box selecting the analysis domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Western limit (degrees east).
    pub lonmin: f64,
    /// Eastern limit (degrees east).
    pub lonmax: f64,
    /// Southern limit (degrees north).
    pub latmin: f64,
    /// Northern limit (degrees north).
    pub latmax: f64,
}

impl BoundingBox {
    /// Create a bounding box.
    pub fn new(lonmin: f64, lonmax: f64, latmin: f64, latmax: f64) -> Self {
        Self {
            lonmin,
            lonmax,
            latmin,
            latmax,
        }
    }

    /// Box covering every longitude and latitude.
    pub fn global() -> Self {
        Self::new(-360.0, 360.0, -90.0, 90.0)
    }

    /// Whether the point lies inside the box, edges included.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.lonmin && lon <= self.lonmax && lat >= self.latmin && lat <= self.latmax
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::global()
    }
}

/// Parameters for opening a [`Grid`](crate::grid::Grid).
#[derive(Debug, Clone)]
pub struct GridConfig {
    /// Grid file, absolute or relative to `root_dir`.
    pub grid_file: PathBuf,
    /// Directory tried when `grid_file` cannot be opened as given.
    pub root_dir: Option<PathBuf>,
    /// Name of the physical domain.
    pub domain: String,
    /// Product tag.
    pub product: String,
    /// Analysis domain.
    pub bbox: BoundingBox,
    /// Fill value used by downstream products.
    pub fill_value: f64,
    /// Whether derived fields carry an index padding.
    pub with_pad: bool,
    /// Padding width in cells when `with_pad` is set.
    pub padding: usize,
}

impl GridConfig {
    /// Configuration for `grid_file` over the whole grid, padded.
    pub fn new(grid_file: impl Into<PathBuf>) -> Self {
        Self {
            grid_file: grid_file.into(),
            root_dir: None,
            domain: String::from("Regional"),
            product: String::from("ROMS"),
            bbox: BoundingBox::global(),
            fill_value: -9999.0,
            with_pad: true,
            padding: DEFAULT_PADDING,
        }
    }

    /// Set the fallback root directory.
    pub fn with_root(mut self, root_dir: impl Into<PathBuf>) -> Self {
        self.root_dir = Some(root_dir.into());
        self
    }

    /// Set the analysis domain.
    pub fn with_bbox(mut self, bbox: BoundingBox) -> Self {
        self.bbox = bbox;
        self
    }

    /// Enable or disable padding.
    pub fn with_pad(mut self, with_pad: bool) -> Self {
        self.with_pad = with_pad;
        self
    }

    /// Padding actually applied to the window.
    pub fn effective_padding(&self) -> usize {
        if self.with_pad {
            self.padding
        } else {
            0
        }
    }
}
