//! # Source datasets
//!
//! The loader only needs two things from a file: named n-dimensional numeric
//! variables and named global attributes. [`SourceDataset`] is that seam.
//! [`MemoryDataset`] keeps everything in memory and is what tests and callers
//! with data already at hand use; `NetcdfDataset` (feature `netcdf`) reads
//! netCDF files and OPeNDAP urls through libnetcdf.
//!
//! Every variable handed out is an owned copy, so normalizing indices never
//! writes through to a buffer the source still holds.

mod memory;
#[cfg(feature = "netcdf")]
mod nc;

pub use memory::MemoryDataset;
#[cfg(feature = "netcdf")]
pub use nc::NetcdfDataset;

use crate::Error;
use derive_more::Display;
use ndarray::{Array, ArrayD, Dimension};

/// Read access to a dataset of named variables and global attributes.
pub trait SourceDataset {
    /// The global attribute `name` rendered as text, or `None` when the source
    /// has no such attribute.
    fn global_attribute(&self, name: &str) -> Result<Option<String>, Error>;

    /// Read the whole variable `name` into memory, or `None` when the source has
    /// no such variable.
    fn read_variable(&self, name: &str) -> Result<Option<Variable>, Error>;
}

impl<T: SourceDataset + ?Sized> SourceDataset for &T {
    fn global_attribute(&self, name: &str) -> Result<Option<String>, Error> {
        (**self).global_attribute(name)
    }

    fn read_variable(&self, name: &str) -> Result<Option<Variable>, Error> {
        (**self).read_variable(name)
    }
}

/// Floating point width of coordinate data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Precision {
    #[display(fmt = "Float32")]
    Float32,
    #[display(fmt = "Float64")]
    Float64,
}

/// The values of a variable. Integer variables of any width are widened to
/// `i64`.
#[derive(Debug, Clone, PartialEq)]
pub enum VariableData {
    Float32(ArrayD<f32>),
    Float64(ArrayD<f64>),
    Int(ArrayD<i64>),
}

impl VariableData {
    pub fn shape(&self) -> &[usize] {
        match self {
            Self::Float32(arr) => arr.shape(),
            Self::Float64(arr) => arr.shape(),
            Self::Int(arr) => arr.shape(),
        }
    }

    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    pub fn len(&self) -> usize {
        self.shape().iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// the precision coordinates read from this data keep. Integers are
    /// reported as `Float64` since that is what they are converted to.
    pub fn precision(&self) -> Precision {
        match self {
            Self::Float32(_) => Precision::Float32,
            Self::Float64(_) | Self::Int(_) => Precision::Float64,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Float32(_) => "f32",
            Self::Float64(_) => "f64",
            Self::Int(_) => "i64",
        }
    }
}

impl<D: Dimension> From<Array<f32, D>> for VariableData {
    fn from(arr: Array<f32, D>) -> Self {
        Self::Float32(arr.into_dyn())
    }
}

impl<D: Dimension> From<Array<f64, D>> for VariableData {
    fn from(arr: Array<f64, D>) -> Self {
        Self::Float64(arr.into_dyn())
    }
}

impl<D: Dimension> From<Array<i64, D>> for VariableData {
    fn from(arr: Array<i64, D>) -> Self {
        Self::Int(arr.into_dyn())
    }
}

impl<D: Dimension> From<Array<i32, D>> for VariableData {
    fn from(arr: Array<i32, D>) -> Self {
        Self::Int(arr.mapv(i64::from).into_dyn())
    }
}

/// A named variable read from a [`SourceDataset`].
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    name: String,
    data: VariableData,
}

impl Variable {
    pub fn new<N: Into<String>, D: Into<VariableData>>(name: N, data: D) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &VariableData {
        &self.data
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    pub fn precision(&self) -> Precision {
        self.data.precision()
    }

    /// the values as `f64`, whatever the stored type
    pub fn to_f64(&self) -> ArrayD<f64> {
        match &self.data {
            VariableData::Float32(arr) => arr.mapv(f64::from),
            VariableData::Float64(arr) => arr.clone(),
            VariableData::Int(arr) => arr.mapv(|v| v as f64),
        }
    }

    /// The values as indices. Some producers store connectivity as floating
    /// point; that is accepted as long as every value is a whole number.
    pub fn to_indices(&self) -> Result<ArrayD<i64>, Error> {
        match &self.data {
            VariableData::Int(arr) => Ok(arr.clone()),
            VariableData::Float32(arr) => float_indices(&self.name, arr.mapv(f64::from)),
            VariableData::Float64(arr) => float_indices(&self.name, arr.clone()),
        }
    }
}

fn float_indices(name: &str, arr: ArrayD<f64>) -> Result<ArrayD<i64>, Error> {
    if let Some(value) = arr.iter().find(|v| v.fract() != 0.0 || !v.is_finite()) {
        return Err(Error::NonIntegralIndex {
            variable: name.to_string(),
            value: *value,
        });
    }

    let mut out = ArrayD::zeros(arr.raw_dim());
    for (slot, value) in out.iter_mut().zip(arr.iter()) {
        *slot = num_traits::cast::<f64, i64>(*value).ok_or_else(|| Error::NonIntegralIndex {
            variable: name.to_string(),
            value: *value,
        })?;
    }

    Ok(out)
}
