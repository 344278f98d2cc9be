//! Resolvers for the components a mapping may leave out. Each one only runs
//! when its names are mapped, and none of them detects an index base of its
//! own: the one found on the face array is applied.

use super::faces::{orient, two_dimensional_indices, IndexBase};
use super::fetch;
use super::nodes::one_dimensional;
use crate::mapping::{AxisOrder, FaceCoordinateNames, Role};
use crate::source::SourceDataset;
use crate::utils;
use crate::Error;

use ndarray::{s, Array2};

/// Neighboring faces of every face, oriented like the face array.
pub(crate) fn face_face_connectivity<S>(
    source: &S,
    name: &str,
    axis_order: AxisOrder,
    index_base: IndexBase,
) -> Result<Array2<i64>, Error>
where
    S: SourceDataset + ?Sized,
{
    let var = fetch(source, Role::FaceFaceConnectivity, name)?;
    let mut connectivity = orient(two_dimensional_indices(&var)?, axis_order, var.name());
    index_base.normalize(&mut connectivity);

    Ok(connectivity)
}

/// Face centers packed into an `F × 2` (lon, lat) array.
pub(crate) fn face_coordinates<S>(
    source: &S,
    names: &FaceCoordinateNames,
    num_faces: usize,
) -> Result<Array2<f64>, Error>
where
    S: SourceDataset + ?Sized,
{
    let lon = fetch(source, Role::FaceCoordinatesLon, &names.lon)?;
    let lat = fetch(source, Role::FaceCoordinatesLat, &names.lat)?;

    let lon_values = one_dimensional(&lon)?;
    let lat_values = one_dimensional(&lat)?;

    for (var, len) in [(&lon, lon_values.len()), (&lat, lat_values.len())] {
        if len != num_faces {
            return Err(Error::malformed(
                var.name(),
                var.shape(),
                format!("[{}], one value per face", num_faces),
            ));
        }
    }

    Ok(utils::stack_columns(&lon_values, &lat_values))
}

/// Boundary edges as vertex index pairs.
///
/// Some producers store more than two columns per boundary edge. What the
/// extra columns mean is not known, so only the first two are kept and the loss
/// is logged.
pub(crate) fn boundaries<S>(source: &S, name: &str, index_base: IndexBase) -> Result<Array2<i64>, Error>
where
    S: SourceDataset + ?Sized,
{
    let var = fetch(source, Role::Boundaries, name)?;
    let all_columns = two_dimensional_indices(&var)?;

    if all_columns.ncols() < 2 {
        return Err(Error::malformed(var.name(), var.shape(), "(edges, 2) or wider"));
    }

    if all_columns.ncols() > 2 {
        log::warn!(
            "`{}` has {} columns, dropping the {} after the vertex pair",
            var.name(),
            all_columns.ncols(),
            all_columns.ncols() - 2
        );
    }

    let mut boundaries = all_columns.slice(s![.., ..2]).to_owned();
    index_base.normalize(&mut boundaries);

    Ok(boundaries)
}
