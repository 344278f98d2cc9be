use super::{SourceDataset, Variable, VariableData};
use crate::Error;

use netcdf::types::{BasicType, VariableType};
use netcdf::AttributeValue;
use std::path::Path;

/// A netCDF file (or OPeNDAP url) opened read-only.
///
/// The file is closed when this value is dropped.
pub struct NetcdfDataset {
    file: netcdf::File,
}

impl NetcdfDataset {
    /// open a local file or a remote url, the access layer decides which
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        log::debug!("opening netcdf source {}", path.display());
        let file = netcdf::open(path)?;
        Ok(Self { file })
    }
}

impl SourceDataset for NetcdfDataset {
    fn global_attribute(&self, name: &str) -> Result<Option<String>, Error> {
        let attribute = match self.file.attribute(name) {
            Some(attribute) => attribute,
            None => return Ok(None),
        };

        let text = match attribute.value()? {
            AttributeValue::Str(value) => value,
            AttributeValue::Strs(values) => values.join(","),
            AttributeValue::Short(value) => value.to_string(),
            AttributeValue::Int(value) => value.to_string(),
            AttributeValue::Longlong(value) => value.to_string(),
            AttributeValue::Float(value) => value.to_string(),
            AttributeValue::Double(value) => value.to_string(),
            other => {
                log::debug!("global attribute `{}` is not a scalar: {:?}", name, other);
                return Ok(None);
            }
        };

        Ok(Some(text))
    }

    fn read_variable(&self, name: &str) -> Result<Option<Variable>, Error> {
        let var = match self.file.variable(name) {
            Some(var) => var,
            None => return Ok(None),
        };

        // libnetcdf converts to the requested type on read
        let data = match var.vartype() {
            VariableType::Basic(BasicType::Char) => {
                return Err(Error::UnsupportedType {
                    variable: name.to_string(),
                    element_type: "char".to_string(),
                })
            }
            VariableType::Basic(BasicType::Float) => {
                VariableData::Float32(var.values_arr::<f32, _>(..)?)
            }
            VariableType::Basic(BasicType::Double) => VariableData::Float64(var.values_arr::<f64, _>(..)?),
            VariableType::Basic(_) => VariableData::Int(var.values_arr::<i64, _>(..)?),
            other => {
                return Err(Error::UnsupportedType {
                    variable: name.to_string(),
                    element_type: format!("{:?}", other),
                })
            }
        };

        log::debug!("read netcdf variable `{}` with shape {:?}", name, data.shape());

        Ok(Some(Variable::new(name, data)))
    }
}
