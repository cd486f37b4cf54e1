//! Land/sea masks at staggered points.

use ndarray::{s, Array2, ArrayView2};

/// Masks at u, v and psi points derived from the rho mask.
///
/// A staggered point is sea (1) only when every rho point around it is sea.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaggeredMasks {
    /// u-point mask, `(Mp, Lp - 1)`.
    pub u: Array2<u8>,
    /// v-point mask, `(Mp - 1, Lp)`.
    pub v: Array2<u8>,
    /// psi-point mask, `(Mp - 1, Lp - 1)`.
    pub psi: Array2<u8>,
}

impl StaggeredMasks {
    /// Derive the staggered masks from a 0/1 rho mask.
    pub fn derive(rho: ArrayView2<'_, u8>) -> Self {
        let (mp, lp) = rho.dim();
        let m = mp.saturating_sub(1);
        let l = lp.saturating_sub(1);

        let u = &rho.slice(s![.., ..l]) * &rho.slice(s![.., lp - l..]);
        let v = &rho.slice(s![..m, ..]) * &rho.slice(s![mp - m.., ..]);
        let psi = &u.slice(s![..m, ..]) * &u.slice(s![mp - m.., ..]);

        Self { u, v, psi }
    }
}
