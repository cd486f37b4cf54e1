//! Helpers that write small ROMS grid files for the integration tests.

#![allow(dead_code)]

use ndarray::Array2;
use std::path::{Path, PathBuf};

pub const ROWS: usize = 8;
pub const COLS: usize = 10;

pub const SCHEMES: &str = r#"
grids:
  - name: grd_fixture.nc
    theta_s: 6.0
    theta_b: 2.0
    hc: 120.0
    n: 12
    scoord: 2
    open_boundaries: { south: true, east: false, north: true, west: true }
  - name: grd_fixture_v1.nc
    theta_s: 5.0
    theta_b: 0.4
    hc: 50.0
    n: 8
    scoord: 1
"#;

/// How the unsmoothed depth is stored in a fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hraw {
    Missing,
    Flat,
    Records,
}

pub fn lon() -> Array2<f64> {
    Array2::from_shape_fn((ROWS, COLS), |(j, i)| -15.0 + 0.25 * i as f64 + 0.01 * j as f64)
}

pub fn lat() -> Array2<f64> {
    Array2::from_shape_fn((ROWS, COLS), |(j, i)| 28.0 + 0.25 * j as f64 - 0.01 * i as f64)
}

pub fn depth() -> Array2<f64> {
    Array2::from_shape_fn((ROWS, COLS), |(j, i)| 20.0 + 150.0 * (i + j) as f64)
}

pub fn mask() -> Array2<f64> {
    Array2::from_shape_fn((ROWS, COLS), |(j, i)| if i + j < 2 { 0.0 } else { 1.0 })
}

fn put(file: &mut netcdf::FileMut, name: &str, dims: &[&str], data: &[f64]) {
    let mut var = file.add_variable::<f64>(name, dims).unwrap();
    var.put_values(data, ..).unwrap();
}

/// Write a grid file named `name` inside `dir`.
pub fn write_grid(dir: &Path, name: &str, hraw: Hraw, with_vct: bool) -> PathBuf {
    let path = dir.join(name);
    let mut file = netcdf::create(&path).unwrap();
    file.add_dimension("eta_rho", ROWS).unwrap();
    file.add_dimension("xi_rho", COLS).unwrap();
    file.add_dimension("bath", 2).unwrap();
    file.add_attribute("title", "Fixture grid").unwrap();
    if with_vct {
        file.add_attribute("VertCoordType", "NEW").unwrap();
    }

    let dims = ["eta_rho", "xi_rho"];
    let n = ROWS * COLS;
    put(&mut file, "lon_rho", &dims, lon().as_slice().unwrap());
    put(&mut file, "lat_rho", &dims, lat().as_slice().unwrap());
    put(&mut file, "p_m", &dims, &vec![1.0 / 5000.0; n]);
    put(&mut file, "p_n", &dims, &vec![1.0 / 5000.0; n]);
    put(&mut file, "f_coriolis", &dims, &vec![7e-5; n]);
    put(&mut file, "angle", &dims, &vec![0.1; n]);
    put(&mut file, "mask_rho", &dims, mask().as_slice().unwrap());
    put(&mut file, "h", &dims, depth().as_slice().unwrap());

    match hraw {
        Hraw::Missing => {}
        Hraw::Flat => put(&mut file, "hraw", &dims, &vec![500.0; n]),
        Hraw::Records => {
            let mut records = vec![100.0; n];
            records.extend(vec![300.0; n]);
            put(&mut file, "hraw", &["bath", "eta_rho", "xi_rho"], &records);
        }
    }

    path
}

/// Write a scheme table next to the grids and return its path.
pub fn write_schemes(dir: &Path) -> PathBuf {
    let path = dir.join("schemes.yaml");
    std::fs::write(&path, SCHEMES).unwrap();
    path
}
