//! Grid file resolution and reading.

use super::{read_field, GridFields};
use crate::error::{GridError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// NetCDF grid file reader.
///
/// Every method opens the file, reads what it needs and drops the handle
/// before returning, so no handle outlives a single query.
#[derive(Debug)]
pub struct GridReader;

impl GridReader {
    /// Locate a grid file, trying `path` first and then `root_dir/path`.
    pub fn resolve(path: &Path, root_dir: Option<&Path>) -> Result<PathBuf> {
        if Self::probe(path) {
            return Ok(path.to_path_buf());
        }

        let fallback = match root_dir {
            Some(root) => root.join(path),
            None => path.to_path_buf(),
        };
        if fallback != path && Self::probe(&fallback) {
            debug!(path = %fallback.display(), "Grid file resolved under root directory");
            return Ok(fallback);
        }

        Err(GridError::grid_not_found(path, fallback))
    }

    fn probe(path: &Path) -> bool {
        netcdf::open(path).is_ok()
    }

    /// Read the raw rho-point fields of a ROMS grid.
    pub fn read_fields(path: &Path) -> Result<GridFields> {
        let file = netcdf::open(path)?;

        let h = read_field(&file, "h")?;
        let hraw = match read_field(&file, "hraw") {
            Ok(hraw) => hraw,
            Err(GridError::MissingVariable { .. }) => {
                debug!("No 'hraw' variable, using 'h' as unsmoothed depth");
                h.clone()
            }
            Err(e) => return Err(e),
        };

        let fields = GridFields {
            lon: read_field(&file, "lon_rho")?,
            lat: read_field(&file, "lat_rho")?,
            pm: read_field(&file, "p_m")?,
            pn: read_field(&file, "p_n")?,
            f: read_field(&file, "f_coriolis")?,
            angle: read_field(&file, "angle")?,
            mask: read_field(&file, "mask_rho")?.mapv(|v| u8::from(v != 0.0)),
            h,
            hraw,
        };
        fields.check_shapes()?;

        Ok(fields)
    }

    /// Read a global attribute as a string.
    pub fn global_attribute(path: &Path, name: &str) -> Result<String> {
        let file = netcdf::open(path)?;
        let attr = file
            .attribute(name)
            .ok_or_else(|| GridError::MissingAttribute {
                name: name.to_string(),
            })?;
        Ok(Self::attr_value_to_string(&attr))
    }

    fn attr_value_to_string(attr: &netcdf::Attribute<'_>) -> String {
        use netcdf::AttributeValue;

        match attr.value() {
            Ok(AttributeValue::Str(v)) => v,
            Ok(AttributeValue::Strs(v)) => v.join(", "),
            Ok(AttributeValue::Int(v)) => format!("{}", v),
            Ok(AttributeValue::Short(v)) => format!("{}", v),
            Ok(AttributeValue::Float(v)) => format!("{}", v),
            Ok(AttributeValue::Double(v)) => format!("{}", v),
            Ok(AttributeValue::Ints(v)) => format!("{:?}", v),
            Ok(AttributeValue::Floats(v)) => format!("{:?}", v),
            Ok(AttributeValue::Doubles(v)) => format!("{:?}", v),
            Ok(other) => format!("{:?}", other),
            Err(_) => format!("{:?}", attr),
        }
    }
}
