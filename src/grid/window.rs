//! Index windows over the raw grid arrays.
//!
//! A [`Rect`] is a half-open `(rows, cols)` range in raw index space. An
//! [`IndexWindow`] holds the analysis view and its padded counterpart; every
//! windowed accessor on [`Grid`](super::Grid) slices through one of them.

use crate::config::BoundingBox;
use crate::error::{GridError, Result};
use ndarray::{s, Array2, ArrayView2};

/// Half-open index rectangle `[j0, j1) x [i0, i1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// First row.
    pub j0: usize,
    /// One past the last row.
    pub j1: usize,
    /// First column.
    pub i0: usize,
    /// One past the last column.
    pub i1: usize,
}

impl Rect {
    /// Create a rectangle from row and column bounds.
    pub fn new(j0: usize, j1: usize, i0: usize, i1: usize) -> Self {
        Self { j0, j1, i0, i1 }
    }

    /// Rectangle covering an array of the given shape.
    pub fn full((rows, cols): (usize, usize)) -> Self {
        Self::new(0, rows, 0, cols)
    }

    /// Smallest rectangle enclosing every point of `lon`/`lat` inside `bbox`.
    pub fn covering_bbox(
        lon: ArrayView2<'_, f64>,
        lat: ArrayView2<'_, f64>,
        bbox: &BoundingBox,
    ) -> Option<Self> {
        let mut found: Option<Self> = None;
        for ((j, i), &x) in lon.indexed_iter() {
            if !bbox.contains(x, lat[[j, i]]) {
                continue;
            }
            found = Some(match found {
                None => Self::new(j, j + 1, i, i + 1),
                Some(r) => Self::new(r.j0.min(j), r.j1.max(j + 1), r.i0.min(i), r.i1.max(i + 1)),
            });
        }
        found
    }

    /// `(rows, cols)` of the rectangle; zero along an inverted axis.
    pub fn shape(&self) -> (usize, usize) {
        (self.j1.saturating_sub(self.j0), self.i1.saturating_sub(self.i0))
    }

    /// Whether the start of each axis is past its end.
    pub fn is_inverted(&self) -> bool {
        self.j0 > self.j1 || self.i0 > self.i1
    }

    /// Whether `other` lies inside this rectangle.
    pub fn contains(&self, other: &Rect) -> bool {
        self.j0 <= other.j0 && other.j1 <= self.j1 && self.i0 <= other.i0 && other.i1 <= self.i1
    }

    /// Grow by `pad` on every side, clamped to an array of shape `(rows, cols)`.
    pub fn expand(&self, pad: usize, (rows, cols): (usize, usize)) -> Self {
        Self::new(
            self.j0.saturating_sub(pad),
            (self.j1 + pad).min(rows),
            self.i0.saturating_sub(pad),
            (self.i1 + pad).min(cols),
        )
    }

    /// View of `a` through this rectangle.
    pub fn slice<'a, T>(&self, a: &'a Array2<T>) -> ArrayView2<'a, T> {
        self.slice_staggered(a, 0, 0)
    }

    /// View of a staggered array, which has `dj` fewer rows and `di` fewer
    /// columns than the rho grid.
    pub fn slice_staggered<'a, T>(
        &self,
        a: &'a Array2<T>,
        dj: usize,
        di: usize,
    ) -> ArrayView2<'a, T> {
        let (rows, cols) = a.dim();
        let j1 = self.j1.saturating_sub(dj).min(rows);
        let i1 = self.i1.saturating_sub(di).min(cols);
        a.slice(s![self.j0.min(j1)..j1, self.i0.min(i1)..i1])
    }
}

/// The analysis view and its padded counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexWindow {
    view: Rect,
    view_padding: Rect,
    padding: usize,
}

impl IndexWindow {
    /// Build both windows for a grid of shape `(rows, cols)`.
    ///
    /// The view is clamped to the grid; an inverted view is rejected.
    pub fn new(view: Rect, padding: usize, shape: (usize, usize)) -> Result<Self> {
        if view.is_inverted() {
            return Err(GridError::InvalidWindow(format!(
                "rows {}..{} and columns {}..{} are inverted",
                view.j0, view.j1, view.i0, view.i1
            )));
        }
        let view = Rect::new(
            view.j0.min(shape.0),
            view.j1.min(shape.0),
            view.i0.min(shape.1),
            view.i1.min(shape.1),
        );
        Ok(Self {
            view,
            view_padding: view.expand(padding, shape),
            padding,
        })
    }

    /// Unpadded analysis view.
    pub fn view(&self) -> Rect {
        self.view
    }

    /// Padded view.
    pub fn view_padding(&self) -> Rect {
        self.view_padding
    }

    /// Requested padding, before clamping.
    pub fn padding(&self) -> usize {
        self.padding
    }
}
