//! Rotation between grid-relative and east/north vector components.

use crate::error::{GridError, Result};
use ndarray::{Array2, ArrayView2, Zip};

fn check_shapes(
    u: &ArrayView2<'_, f64>,
    v: &ArrayView2<'_, f64>,
    angle: &ArrayView2<'_, f64>,
) -> Result<()> {
    for field in [u.view(), v.view()] {
        if field.dim() != angle.dim() {
            return Err(GridError::shape_mismatch(angle.shape(), field.shape()));
        }
    }
    Ok(())
}

/// Rotate grid-relative `(u, v)` by the grid angle into east/north components.
pub fn rotate(
    u: ArrayView2<'_, f64>,
    v: ArrayView2<'_, f64>,
    angle: ArrayView2<'_, f64>,
) -> Result<(Array2<f64>, Array2<f64>)> {
    apply(u, v, angle, 1.0)
}

/// Inverse of [`rotate`]: east/north components back to grid-relative ones.
pub fn unrotate(
    east: ArrayView2<'_, f64>,
    north: ArrayView2<'_, f64>,
    angle: ArrayView2<'_, f64>,
) -> Result<(Array2<f64>, Array2<f64>)> {
    apply(east, north, angle, -1.0)
}

fn apply(
    u: ArrayView2<'_, f64>,
    v: ArrayView2<'_, f64>,
    angle: ArrayView2<'_, f64>,
    sign: f64,
) -> Result<(Array2<f64>, Array2<f64>)> {
    check_shapes(&u, &v, &angle)?;

    let mut ur = Array2::zeros(angle.dim());
    let mut vr = Array2::zeros(angle.dim());
    Zip::from(&mut ur)
        .and(&mut vr)
        .and(&u)
        .and(&v)
        .and(&angle)
        .for_each(|ur, vr, &u, &v, &a| {
            let (sina, cosa) = (sign * a).sin_cos();
            *ur = u * cosa + v * sina;
            *vr = v * cosa - u * sina;
        });

    Ok((ur, vr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn quarter_turn() {
        let angle = Array2::from_elem((2, 2), FRAC_PI_2);
        let u = Array2::from_elem((2, 2), 1.0);
        let v = Array2::zeros((2, 2));
        let (east, north) = rotate(u.view(), v.view(), angle.view()).unwrap();
        assert!(east.iter().all(|&x| x.abs() < 1e-12));
        assert!(north.iter().all(|&y| (y + 1.0).abs() < 1e-12));
    }

    #[test]
    fn round_trip_restores_components() {
        let angle = Array2::from_shape_fn((4, 5), |(j, i)| -1.2 + 0.13 * (j * 5 + i) as f64);
        let u = Array2::from_shape_fn((4, 5), |(j, i)| (j as f64 - 1.5) * 0.3 + i as f64);
        let v = Array2::from_shape_fn((4, 5), |(j, i)| 2.0 - (i * j) as f64 * 0.1);

        let (east, north) = rotate(u.view(), v.view(), angle.view()).unwrap();
        let (u2, v2) = unrotate(east.view(), north.view(), angle.view()).unwrap();

        for (a, b) in u.iter().zip(u2.iter()).chain(v.iter().zip(v2.iter())) {
            assert!((a - b).abs() < 1e-12);
        }
        // magnitude is preserved
        for idx in [(0, 0), (3, 4), (2, 1)] {
            let before = u[idx].hypot(v[idx]);
            let after = east[idx].hypot(north[idx]);
            assert!((before - after).abs() < 1e-12);
        }
    }

    #[test]
    fn mismatched_shapes_rejected() {
        let angle = Array2::zeros((3, 3));
        let u = Array2::zeros((3, 3));
        let v = Array2::zeros((3, 2));
        let err = rotate(u.view(), v.view(), angle.view()).unwrap_err();
        assert!(matches!(err, GridError::ShapeMismatch { .. }));
    }
}
