//! Raw rho-point fields as stored in the grid file.

use crate::error::{GridError, Result};
use ndarray::Array2;

/// Unwindowed rho-point fields of a ROMS grid, all of shape `(Mp, Lp)`.
#[derive(Debug, Clone)]
pub struct GridFields {
    /// `lon_rho`.
    pub lon: Array2<f64>,
    /// `lat_rho`.
    pub lat: Array2<f64>,
    /// `p_m`, inverse grid spacing along xi (1/m).
    pub pm: Array2<f64>,
    /// `p_n`, inverse grid spacing along eta (1/m).
    pub pn: Array2<f64>,
    /// `f_coriolis` (1/s).
    pub f: Array2<f64>,
    /// `angle` between the xi axis and true east (radians).
    pub angle: Array2<f64>,
    /// `mask_rho`, 1 = sea, 0 = land.
    pub mask: Array2<u8>,
    /// Bottom depth (m, positive).
    pub h: Array2<f64>,
    /// Unsmoothed bottom depth (m, positive).
    pub hraw: Array2<f64>,
}

impl GridFields {
    /// Shape shared by every field.
    pub fn shape(&self) -> (usize, usize) {
        self.lon.dim()
    }

    /// Check that every field has the shape of `lon`.
    pub fn check_shapes(&self) -> Result<()> {
        let expected = self.lon.shape();
        let others: [(&str, &[usize]); 8] = [
            ("lat_rho", self.lat.shape()),
            ("p_m", self.pm.shape()),
            ("p_n", self.pn.shape()),
            ("f_coriolis", self.f.shape()),
            ("angle", self.angle.shape()),
            ("mask_rho", self.mask.shape()),
            ("h", self.h.shape()),
            ("hraw", self.hraw.shape()),
        ];
        for (name, shape) in others {
            if shape != expected {
                return Err(GridError::invalid_variable(
                    name,
                    format!("shape {:?} differs from lon_rho {:?}", shape, expected),
                ));
            }
        }
        Ok(())
    }
}
