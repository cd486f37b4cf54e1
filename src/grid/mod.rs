//! The ROMS grid and its windowed accessors.
//!
//! A [`Grid`] is loaded once from a grid file and never modified. Raw fields
//! are only reachable through accessors that slice them with the grid's
//! [`IndexWindow`]: `lon` and `lat` use the unpadded view, everything else
//! the padded one.

mod boundary;
mod mask;
mod rotation;
mod window;

pub use boundary::{boundary, BoundaryPath, Subgrid};
pub use mask::StaggeredMasks;
pub use rotation::{rotate, unrotate};
pub use window::{IndexWindow, Rect};

use crate::config::{BoundingBox, GridConfig};
use crate::data::{GridFields, GridReader};
use crate::error::{GridError, Result};
use crate::geo::{self, Transect};
use crate::vertical::{self, PointKind, SchemeRegistry, Surface, VerticalScheme};
use ndarray::{Array2, Array3, ArrayView2};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Gravitational acceleration (m/s²).
pub const GRAVITY: f64 = 9.81;

/// A ROMS grid restricted to an analysis window.
#[derive(Debug, Clone)]
pub struct Grid {
    path: PathBuf,
    domain: String,
    product: String,
    bbox: BoundingBox,
    fill_value: f64,
    fields: GridFields,
    gof: Array2<f64>,
    masks: StaggeredMasks,
    window: IndexWindow,
    scheme: VerticalScheme,
}

impl Grid {
    /// Resolve, read and window the grid file named in `config`.
    pub fn open(config: &GridConfig, registry: &SchemeRegistry) -> Result<Self> {
        let path = GridReader::resolve(&config.grid_file, config.root_dir.as_deref())?;

        let basename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let scheme = registry.lookup(&basename)?.clone();

        let fields = GridReader::read_fields(&path)?;
        Self::from_fields(path, fields, config, scheme)
    }

    /// Build a grid from fields already in memory.
    pub fn from_fields(
        path: PathBuf,
        fields: GridFields,
        config: &GridConfig,
        scheme: VerticalScheme,
    ) -> Result<Self> {
        fields.check_shapes()?;
        let shape = fields.shape();

        let bbox = config.bbox;
        let view = Rect::covering_bbox(fields.lon.view(), fields.lat.view(), &bbox).ok_or(
            GridError::EmptyDomain {
                lonmin: bbox.lonmin,
                lonmax: bbox.lonmax,
                latmin: bbox.latmin,
                latmax: bbox.latmax,
            },
        )?;
        let window = IndexWindow::new(view, config.effective_padding(), shape)?;
        debug!(
            view = ?window.view(),
            view_padding = ?window.view_padding(),
            "Index window configured"
        );

        let masks = StaggeredMasks::derive(fields.mask.view());
        let gof = fields.f.mapv(|f| GRAVITY / f);

        info!(
            path = %path.display(),
            rows = shape.0,
            cols = shape.1,
            levels = scheme.n,
            scoord = scheme.scoord,
            "ROMS grid loaded"
        );

        Ok(Self {
            path,
            domain: config.domain.clone(),
            product: config.product.clone(),
            bbox,
            fill_value: config.fill_value,
            fields,
            gof,
            masks,
            window,
            scheme,
        })
    }

    /// Resolved grid file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Physical domain name.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Product tag.
    pub fn product(&self) -> &str {
        &self.product
    }

    /// Configured bounding box.
    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    /// Fill value for downstream products.
    pub fn fill_value(&self) -> f64 {
        self.fill_value
    }

    /// Shape of the raw (unwindowed) arrays.
    pub fn raw_shape(&self) -> (usize, usize) {
        self.fields.shape()
    }

    /// Shape of the unpadded view.
    pub fn shape(&self) -> (usize, usize) {
        self.window.view().shape()
    }

    /// The index window.
    pub fn window(&self) -> &IndexWindow {
        &self.window
    }

    /// Vertical scheme for this grid.
    pub fn scheme(&self) -> &VerticalScheme {
        &self.scheme
    }

    fn padded<'a, T>(&self, a: &'a Array2<T>) -> ArrayView2<'a, T> {
        self.window.view_padding().slice(a)
    }

    /// Longitudes over the unpadded view.
    pub fn lon(&self) -> ArrayView2<'_, f64> {
        self.window.view().slice(&self.fields.lon)
    }

    /// Latitudes over the unpadded view.
    pub fn lat(&self) -> ArrayView2<'_, f64> {
        self.window.view().slice(&self.fields.lat)
    }

    /// Longitudes over the padded view.
    pub fn lon_pad(&self) -> ArrayView2<'_, f64> {
        self.padded(&self.fields.lon)
    }

    /// Latitudes over the padded view.
    pub fn lat_pad(&self) -> ArrayView2<'_, f64> {
        self.padded(&self.fields.lat)
    }

    /// Inverse grid spacing along xi.
    pub fn p_m(&self) -> ArrayView2<'_, f64> {
        self.padded(&self.fields.pm)
    }

    /// Inverse grid spacing along eta.
    pub fn p_n(&self) -> ArrayView2<'_, f64> {
        self.padded(&self.fields.pn)
    }

    /// Rho-point land/sea mask.
    pub fn mask(&self) -> ArrayView2<'_, u8> {
        self.padded(&self.fields.mask)
    }

    /// Grid rotation angle (radians).
    pub fn angle(&self) -> ArrayView2<'_, f64> {
        self.padded(&self.fields.angle)
    }

    /// Bottom depth.
    pub fn h(&self) -> ArrayView2<'_, f64> {
        self.padded(&self.fields.h)
    }

    /// Unsmoothed bottom depth.
    pub fn hraw(&self) -> ArrayView2<'_, f64> {
        self.padded(&self.fields.hraw)
    }

    /// Coriolis parameter.
    pub fn f_coriolis(&self) -> ArrayView2<'_, f64> {
        self.padded(&self.fields.f)
    }

    /// Gravity over Coriolis, `g / f`.
    pub fn gof(&self) -> ArrayView2<'_, f64> {
        self.padded(&self.gof)
    }

    /// u-point mask.
    pub fn umask(&self) -> ArrayView2<'_, u8> {
        self.window.view_padding().slice_staggered(&self.masks.u, 0, 1)
    }

    /// v-point mask.
    pub fn vmask(&self) -> ArrayView2<'_, u8> {
        self.window.view_padding().slice_staggered(&self.masks.v, 1, 0)
    }

    /// psi-point mask.
    pub fn psimask(&self) -> ArrayView2<'_, u8> {
        self.window.view_padding().slice_staggered(&self.masks.psi, 1, 1)
    }

    /// Perimeter of a subgrid of the unpadded view.
    pub fn boundary(&self, subgrid: Subgrid) -> Result<(Vec<f64>, Vec<f64>)> {
        boundary(self.lon(), self.lat(), subgrid)
    }

    /// Perimeter of a subgrid as a polygon.
    pub fn brypath(&self, subgrid: Subgrid) -> Result<BoundaryPath> {
        let (lon, lat) = self.boundary(subgrid)?;
        BoundaryPath::new(&lon, &lat)
    }

    /// Mean resolution in degrees; see [`geo::resolution`] for `meters`.
    pub fn resolution(&self, meters: Option<f64>) -> Result<f64> {
        geo::resolution(self.p_m(), self.p_n(), meters)
    }

    /// Depths at rho points, `(n, rows, cols)` over the padded view.
    pub fn scoord2z_r(&self, surface: Surface) -> Result<Array3<f64>> {
        vertical::to_depth(self.h(), &self.scheme, PointKind::Rho, surface)
    }

    /// Depths at w points, `(n + 1, rows, cols)` over the padded view.
    pub fn scoord2z_w(&self, surface: Surface) -> Result<Array3<f64>> {
        vertical::to_depth(self.h(), &self.scheme, PointKind::W, surface)
    }

    /// Cell thicknesses at rest, `(n, rows, cols)`.
    pub fn dz(&self) -> Result<Array3<f64>> {
        let zw = self.scoord2z_w(Surface::default())?;
        Ok(vertical::dz(zw.view()))
    }

    /// Rotate grid-relative components to east/north.
    pub fn rotate_vec(
        &self,
        u: ArrayView2<'_, f64>,
        v: ArrayView2<'_, f64>,
    ) -> Result<(Array2<f64>, Array2<f64>)> {
        rotate(u, v, self.angle())
    }

    /// Rotate east/north components to grid-relative.
    pub fn unrotate_vec(
        &self,
        east: ArrayView2<'_, f64>,
        north: ArrayView2<'_, f64>,
    ) -> Result<(Array2<f64>, Array2<f64>)> {
        unrotate(east, north, self.angle())
    }

    /// Stations between two points; see [`geo::transect`].
    pub fn transect(
        &self,
        lon1: f64,
        lat1: f64,
        lon2: f64,
        lat2: f64,
        spacing_km: f64,
    ) -> Transect {
        geo::transect(lon1, lat1, lon2, lat2, spacing_km)
    }

    /// The `title` global attribute.
    pub fn title(&self) -> Result<String> {
        GridReader::global_attribute(&self.path, "title")
    }

    /// The `VertCoordType` global attribute.
    pub fn vert_coord_type(&self) -> Result<String> {
        GridReader::global_attribute(&self.path, "VertCoordType")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vertical::OpenBoundaries;

    fn fields(rows: usize, cols: usize) -> GridFields {
        let lon = Array2::from_shape_fn((rows, cols), |(_, i)| -20.0 + 0.1 * i as f64);
        let lat = Array2::from_shape_fn((rows, cols), |(j, _)| 30.0 + 0.1 * j as f64);
        let mut mask = Array2::ones((rows, cols));
        mask[[0, 0]] = 0;
        mask[[rows - 1, cols - 1]] = 0;
        GridFields {
            lon,
            lat,
            pm: Array2::from_elem((rows, cols), 1.0 / 2000.0),
            pn: Array2::from_elem((rows, cols), 1.0 / 2000.0),
            f: Array2::from_elem((rows, cols), 1e-4),
            angle: Array2::from_elem((rows, cols), 0.3),
            mask,
            h: Array2::from_shape_fn((rows, cols), |(j, i)| 50.0 + 10.0 * (i + j) as f64),
            hraw: Array2::from_elem((rows, cols), 75.0),
        }
    }

    fn scheme() -> VerticalScheme {
        VerticalScheme {
            theta_s: 6.0,
            theta_b: 0.0,
            hc: 120.0,
            n: 10,
            scoord: 2,
            open_boundaries: OpenBoundaries::default(),
        }
    }

    fn grid(config: &GridConfig) -> Grid {
        Grid::from_fields(PathBuf::from("grd_test.nc"), fields(12, 16), config, scheme()).unwrap()
    }

    #[test]
    fn accessors_follow_their_window() {
        let bbox = BoundingBox::new(-19.55, -19.05, 30.35, 30.75);
        let g = grid(&GridConfig::new("grd_test.nc").with_bbox(bbox));

        assert_eq!(g.window().view(), Rect::new(4, 8, 5, 10));
        assert_eq!(g.window().view_padding(), Rect::new(2, 10, 3, 12));

        assert_eq!(g.shape(), (4, 5));
        assert_eq!(g.lon().dim(), (4, 5));
        assert_eq!(g.lon_pad().dim(), (8, 9));
        for padded in [g.p_m(), g.p_n(), g.angle(), g.h(), g.hraw(), g.f_coriolis(), g.gof()] {
            assert_eq!(padded.dim(), (8, 9));
        }
        assert_eq!(g.mask().dim(), (8, 9));
        assert_eq!(g.umask().dim(), (8, 8));
        assert_eq!(g.vmask().dim(), (7, 9));
        assert_eq!(g.psimask().dim(), (7, 8));

        assert!((g.lon()[[0, 0]] - -19.5).abs() < 1e-12);
        assert!((g.lat_pad()[[0, 0]] - 30.2).abs() < 1e-12);
        assert!((g.gof()[[0, 0]] - GRAVITY / 1e-4).abs() < 1e-6);
    }

    #[test]
    fn without_padding_views_coincide() {
        let g = grid(&GridConfig::new("grd_test.nc").with_pad(false));
        assert_eq!(g.window().view(), g.window().view_padding());
        assert_eq!(g.lon().dim(), g.p_m().dim());
        assert_eq!(g.umask()[[0, 0]], 0);
        assert_eq!(g.psimask()[[10, 14]], 0);
        assert_eq!(g.psimask()[[5, 5]], 1);
    }

    #[test]
    fn empty_domain_rejected() {
        let bbox = BoundingBox::new(100.0, 110.0, 0.0, 5.0);
        let config = GridConfig::new("grd_test.nc").with_bbox(bbox);
        let err = Grid::from_fields(PathBuf::from("grd_test.nc"), fields(4, 4), &config, scheme())
            .unwrap_err();
        assert!(matches!(err, GridError::EmptyDomain { .. }));
    }

    #[test]
    fn vertical_levels_over_padded_view() {
        let g = grid(&GridConfig::new("grd_test.nc"));
        let zr = g.scoord2z_r(Surface::default()).unwrap();
        let zw = g.scoord2z_w(Surface::default()).unwrap();
        let dz = g.dz().unwrap();
        assert_eq!(zr.dim(), (10, 12, 16));
        assert_eq!(zw.dim(), (11, 12, 16));
        assert_eq!(dz.dim(), (10, 12, 16));

        let h = g.h();
        let total = dz.sum_axis(ndarray::Axis(0));
        for ((j, i), &hij) in h.indexed_iter() {
            assert!((total[[j, i]] - hij).abs() < 1e-9);
        }
    }

    #[test]
    fn rotation_uses_padded_angle() {
        let g = grid(&GridConfig::new("grd_test.nc"));
        let u = Array2::from_elem(g.angle().dim(), 1.0);
        let v = Array2::zeros(g.angle().dim());
        let (east, north) = g.rotate_vec(u.view(), v.view()).unwrap();
        assert!((east[[0, 0]] - 0.3f64.cos()).abs() < 1e-12);
        assert!((north[[0, 0]] + 0.3f64.sin()).abs() < 1e-12);

        let wrong = Array2::zeros((2, 2));
        assert!(g.rotate_vec(wrong.view(), wrong.view()).is_err());
    }

    #[test]
    fn resolution_of_two_km_grid() {
        let g = grid(&GridConfig::new("grd_test.nc"));
        let res = g.resolution(None).unwrap();
        assert!((res - 2000.0 / geo::meters_per_degree()).abs() < 1e-12);
    }

    #[test]
    fn brypath_covers_view() {
        let g = grid(&GridConfig::new("grd_test.nc"));
        let path = g.brypath(Subgrid::default()).unwrap();
        assert_eq!(path.len(), 2 * 15 + 2 * 11);
        assert!(path.contains(-19.0, 30.5));
        assert!(!path.contains(-25.0, 30.5));
    }
}
