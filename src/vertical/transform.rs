//! Sigma to depth transform for terrain-following coordinates.
//!
//! Levels are ordered bottom to surface along axis 0. At w points there are
//! `n + 1` levels with `s_k = (k - n) / n`; at rho points there are `n`
//! levels with `s_k = (k - n + 0.5) / n`.
//!
//! # Stretching functions
//!
//! Version 1, Song & Haidvogel (1994):
//!
//! ```text
//! C(s) = (1 - θb) sinh(θs s) / sinh(θs) + θb [tanh(θs (s + ½)) / (2 tanh(θs / 2)) - ½]
//! z    = ζ (1 + s) + hc s + (h - hc) C(s)
//! ```
//!
//! Version 2, Shchepetkin (2005), ROMS `Vtransform = 2`, `Vstretching = 4`:
//!
//! ```text
//! Csur = (1 - cosh(θs s)) / (cosh θs - 1)
//! C(s) = (exp(θb Csur) - 1) / (1 - exp(-θb))
//! z    = ζ + (ζ + h) (hc s + h C(s)) / (hc + h)
//! ```
//!
//! Both map `s = 0` to the free surface and `s = -1` to `-h`.

use super::VerticalScheme;
use crate::error::{GridError, Result};
use ndarray::{s, Array3, ArrayView2, ArrayView3};

/// Vertical position of the levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointKind {
    /// Cell centres, `n` levels.
    Rho,
    /// Cell interfaces, `n + 1` levels.
    W,
}

impl PointKind {
    /// Number of levels for a scheme with `n` cells.
    pub fn levels(self, n: usize) -> usize {
        match self {
            PointKind::Rho => n,
            PointKind::W => n + 1,
        }
    }
}

/// Supported stretching schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoordVersion {
    /// Song & Haidvogel (1994).
    SongHaidvogel,
    /// Shchepetkin (2005).
    Shchepetkin,
}

impl TryFrom<u8> for ScoordVersion {
    type Error = GridError;

    fn try_from(version: u8) -> Result<Self> {
        match version {
            1 => Ok(ScoordVersion::SongHaidvogel),
            2 => Ok(ScoordVersion::Shchepetkin),
            version => Err(GridError::UnsupportedScheme { version }),
        }
    }
}

/// Free surface used by the transform.
///
/// The effective surface height is `zeta + alpha + beta * h`: `alpha` shifts
/// it uniformly and `beta` in proportion to the local depth.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Surface {
    /// Free-surface elevation (m).
    pub zeta: f64,
    /// Uniform perturbation (m).
    pub alpha: f64,
    /// Depth-proportional perturbation.
    pub beta: f64,
}

impl Surface {
    /// Surface at elevation `zeta` with no perturbation.
    pub fn at(zeta: f64) -> Self {
        Self {
            zeta,
            ..Self::default()
        }
    }

    fn height(&self, h: f64) -> f64 {
        self.zeta + self.alpha + self.beta * h
    }
}

/// Unstretched sigma values, bottom first.
pub fn sigma_levels(n: usize, kind: PointKind) -> Vec<f64> {
    let nf = n as f64;
    match kind {
        PointKind::W => (0..=n).map(|k| (k as f64 - nf) / nf).collect(),
        PointKind::Rho => (0..n).map(|k| (k as f64 - nf + 0.5) / nf).collect(),
    }
}

/// Stretching function `C(s)` of the given scheme.
pub fn stretching(s: f64, theta_s: f64, theta_b: f64, version: ScoordVersion) -> f64 {
    match version {
        ScoordVersion::SongHaidvogel => {
            if theta_s <= 0.0 {
                return s;
            }
            let surface = (theta_s * s).sinh() / theta_s.sinh();
            let bottom =
                (theta_s * (s + 0.5)).tanh() / (2.0 * (0.5 * theta_s).tanh()) - 0.5;
            (1.0 - theta_b) * surface + theta_b * bottom
        }
        ScoordVersion::Shchepetkin => {
            let csur = if theta_s > 0.0 {
                (1.0 - (theta_s * s).cosh()) / (theta_s.cosh() - 1.0)
            } else {
                -s * s
            };
            if theta_b > 0.0 {
                ((theta_b * csur).exp() - 1.0) / (1.0 - (-theta_b).exp())
            } else {
                csur
            }
        }
    }
}

/// Depths of the vertical levels over the bottom-depth field `h`.
///
/// Returns an array shaped `(levels, rows, cols)` with negative values below
/// the surface.
pub fn to_depth(
    h: ArrayView2<'_, f64>,
    scheme: &VerticalScheme,
    kind: PointKind,
    surface: Surface,
) -> Result<Array3<f64>> {
    let version = ScoordVersion::try_from(scheme.scoord)?;
    if scheme.n == 0 {
        return Err(GridError::invalid_variable(
            "n",
            "a vertical scheme needs at least one level",
        ));
    }

    let hc = scheme.hc;
    let sc = sigma_levels(scheme.n, kind);
    let cs: Vec<f64> = sc
        .iter()
        .map(|&s| stretching(s, scheme.theta_s, scheme.theta_b, version))
        .collect();

    let (rows, cols) = h.dim();
    let mut z = Array3::<f64>::zeros((sc.len(), rows, cols));

    for (k, (&s, &c)) in sc.iter().zip(cs.iter()).enumerate() {
        let mut level = z.index_axis_mut(ndarray::Axis(0), k);
        level.zip_mut_with(&h, |zk, &hij| {
            let zeta = surface.height(hij);
            *zk = match version {
                ScoordVersion::SongHaidvogel => zeta * (1.0 + s) + hc * s + (hij - hc) * c,
                ScoordVersion::Shchepetkin => {
                    zeta + (zeta + hij) * (hc * s + hij * c) / (hc + hij)
                }
            };
        });
    }

    Ok(z)
}

/// Layer thicknesses from interface depths: first difference along axis 0.
pub fn dz(zw: ArrayView3<'_, f64>) -> Array3<f64> {
    &zw.slice(s![1.., .., ..]) - &zw.slice(s![..-1, .., ..])
}
