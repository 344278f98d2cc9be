use super::fetch;
use crate::mapping::{NamesMapping, Role};
use crate::source::{Precision, SourceDataset, Variable};
use crate::utils;
use crate::Error;

use ndarray::{Array1, Array2, Ix1};

/// Read the node coordinates into an `N × 2` (lon, lat) array. The precision
/// reported is the one of the longitude variable.
pub(crate) fn resolve<S>(source: &S, names: &NamesMapping) -> Result<(Array2<f64>, Precision), Error>
where
    S: SourceDataset + ?Sized,
{
    let lon = fetch(source, Role::NodesLon, &names.nodes_lon)?;
    let lat = fetch(source, Role::NodesLat, &names.nodes_lat)?;

    let precision = lon.precision();
    let lon_values = one_dimensional(&lon)?;
    let lat_values = one_dimensional(&lat)?;

    if lat_values.len() != lon_values.len() {
        return Err(Error::malformed(
            lat.name(),
            lat.shape(),
            format!("[{}] to match `{}`", lon_values.len(), lon.name()),
        ));
    }

    Ok((utils::stack_columns(&lon_values, &lat_values), precision))
}

/// the values of a variable that must be one-dimensional
pub(crate) fn one_dimensional(var: &Variable) -> Result<Array1<f64>, Error> {
    var.to_f64()
        .into_dimensionality::<Ix1>()
        .map_err(|_| Error::malformed(var.name(), var.shape(), "a one-dimensional array"))
}
