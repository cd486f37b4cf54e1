//! Grid file access.
//!
//! This module resolves grid file paths and reads the raw rho-point fields
//! and global attributes out of NetCDF grid files.

mod fields;
mod reader;
mod variable_data;

pub use fields::GridFields;
pub use reader::GridReader;
pub use variable_data::read_field;
