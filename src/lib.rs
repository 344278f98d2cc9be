#![doc = include_str!("../README.md")]

pub mod grid;
pub mod load;
pub mod mapping;
pub mod prelude;
pub mod source;
mod traits;
mod utils;
pub mod write_vtk;

pub use grid::UGrid;
pub use load::{load_dataset, IndexBase};
#[cfg(feature = "netcdf")]
pub use load::{load_from_varnames, load_with_options};
pub use mapping::{AttributeCheck, AxisOrder, FaceCoordinateNames, LoadOptions, NamesMapping, Role};
pub use source::{MemoryDataset, Precision, SourceDataset, Variable, VariableData};
#[cfg(feature = "netcdf")]
pub use source::NetcdfDataset;
pub use traits::Numeric;
pub use write_vtk::{write_vtu, write_vtu_file, Encoding};

pub use ndarray;

/// general purpose error enumeration for possible causes of failure.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("this does not appear to be a valid file: global attribute `{attribute}` should be `{expected}`, found {}", .found.as_deref().unwrap_or("nothing"))]
    FormatMismatch {
        attribute: String,
        expected: String,
        found: Option<String>,
    },
    #[error("the names mapping has no entry for the required key `{0}`")]
    MissingKey(Role),
    #[error("variable `{variable}` (mapped as `{role}`) is not present in the source")]
    MissingVariable { role: Role, variable: String },
    #[error("variable `{variable}` has a minimum index of {minimum}; only zero and one based indexing is recognized")]
    UnrecognizedIndexBase { variable: String, minimum: i64 },
    #[error("variable `{variable}` has shape {shape:?}, expected {expected}")]
    MalformedShape {
        variable: String,
        shape: Vec<usize>,
        expected: String,
    },
    #[error("variable `{variable}` holds indices but contains the non-integral value {value}")]
    NonIntegralIndex { variable: String, value: f64 },
    #[error("variable `{variable}` has element type {element_type}, which is not numeric")]
    UnsupportedType {
        variable: String,
        element_type: String,
    },
    #[error("`{role}` references index {index}, but only {len} entries exist")]
    IndexOutOfRange { role: Role, index: i64, len: usize },
    #[error("An io error occured: `{0}`")]
    Io(#[from] std::io::Error),
    #[error("Could not write XML data: `{0}`")]
    XmlWrite(#[from] quick_xml::Error),
    #[cfg(feature = "netcdf")]
    #[error("netcdf access failed: `{0}`")]
    Netcdf(#[from] netcdf::error::Error),
}

impl Error {
    pub(crate) fn malformed<E: Into<String>>(variable: &str, shape: &[usize], expected: E) -> Self {
        Error::MalformedShape {
            variable: variable.to_string(),
            shape: shape.to_vec(),
            expected: expected.into(),
        }
    }
}
