//! Variable data reading.

use crate::error::{GridError, Result};
use ndarray::{Array2, ArrayD, Axis, Ix2, IxDyn};
use netcdf::types::{FloatType, IntType, NcTypeDescriptor, NcVariableType};

/// Read a named variable from an open grid file as a 2-D `f64` field.
///
/// 3-D variables (ROMS stores `hraw` as `(bath, eta_rho, xi_rho)`) are
/// reduced to their last record along the leading axis.
pub fn read_field(file: &netcdf::File, name: &str) -> Result<Array2<f64>> {
    let var = file
        .variable(name)
        .ok_or_else(|| GridError::missing_variable(name))?;

    let data = read_variable_array(&var, name)?;

    match data.ndim() {
        2 => data
            .into_dimensionality::<Ix2>()
            .map_err(|e| GridError::invalid_variable(name, e.to_string())),
        3 => {
            let last = data.shape()[0].checked_sub(1).ok_or_else(|| {
                GridError::invalid_variable(name, "leading dimension is empty")
            })?;
            data.index_axis(Axis(0), last)
                .to_owned()
                .into_dimensionality::<Ix2>()
                .map_err(|e| GridError::invalid_variable(name, e.to_string()))
        }
        n => Err(GridError::invalid_variable(
            name,
            format!("expected 2 or 3 dimensions, found {}", n),
        )),
    }
}

/// Read a variable into an `f64` array, applying CF `scale_factor` / `add_offset`.
fn read_variable_array(var: &netcdf::Variable<'_>, name: &str) -> Result<ArrayD<f64>> {
    let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();

    let values = match var.vartype() {
        NcVariableType::Float(FloatType::F64) => values_as_f64(var, name, |x: f64| x)?,
        NcVariableType::Float(FloatType::F32) => values_as_f64(var, name, |x: f32| x as f64)?,
        NcVariableType::Int(IntType::I64) => values_as_f64(var, name, |x: i64| x as f64)?,
        NcVariableType::Int(IntType::I32) => values_as_f64(var, name, |x: i32| x as f64)?,
        NcVariableType::Int(IntType::I16) => values_as_f64(var, name, |x: i16| x as f64)?,
        NcVariableType::Int(IntType::I8) => values_as_f64(var, name, |x: i8| x as f64)?,
        NcVariableType::Int(IntType::U8) => values_as_f64(var, name, |x: u8| x as f64)?,
        other => {
            return Err(GridError::invalid_variable(
                name,
                format!("unsupported variable type {:?}", other),
            ))
        }
    };

    let mut data = ArrayD::from_shape_vec(IxDyn(&shape), values)
        .map_err(|e| GridError::invalid_variable(name, format!("invalid shape/data size: {}", e)))?;

    let scale_factor = numeric_attribute(var, "scale_factor").unwrap_or(1.0);
    let add_offset = numeric_attribute(var, "add_offset").unwrap_or(0.0);
    if scale_factor != 1.0 || add_offset != 0.0 {
        data.mapv_inplace(|v| v * scale_factor + add_offset);
    }

    Ok(data)
}

fn values_as_f64<T>(
    var: &netcdf::Variable<'_>,
    name: &str,
    convert: fn(T) -> f64,
) -> Result<Vec<f64>>
where
    T: NcTypeDescriptor + Copy,
{
    let values: Vec<T> = var
        .get_values(..)
        .map_err(|e| GridError::NetCDF(format!("Failed to read '{}': {}", name, e)))?;
    Ok(values.into_iter().map(convert).collect())
}

fn numeric_attribute(var: &netcdf::Variable<'_>, name: &str) -> Option<f64> {
    use netcdf::AttributeValue;

    match var.attribute(name)?.value().ok()? {
        AttributeValue::Double(v) => Some(v),
        AttributeValue::Float(v) => Some(v as f64),
        AttributeValue::Int(v) => Some(v as f64),
        AttributeValue::Short(v) => Some(v as f64),
        _ => None,
    }
}
