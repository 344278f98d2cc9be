use super::fetch;
use crate::mapping::{AxisOrder, Role};
use crate::source::{SourceDataset, Variable};
use crate::Error;

use derive_more::Display;
use ndarray::{Array2, Ix2};

/// vertices per face of a triangular grid
pub(crate) const FACE_ARITY: usize = 3;

/// Whether the indices of a source start at zero or at one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum IndexBase {
    #[display(fmt = "zero-indexed")]
    Zero,
    #[display(fmt = "one-indexed")]
    One,
}

impl IndexBase {
    /// Judge the index base from the smallest index of the face array. Only a
    /// minimum of exactly 0 or 1 is recognized.
    pub fn from_minimum(minimum: i64) -> Option<IndexBase> {
        match minimum {
            0 => Some(IndexBase::Zero),
            1 => Some(IndexBase::One),
            _ => None,
        }
    }

    pub fn offset(&self) -> i64 {
        match self {
            IndexBase::Zero => 0,
            IndexBase::One => 1,
        }
    }

    /// Shift `indices` in place so they start at zero. Saturates at
    /// `i64::MIN` so negative sentinels stay negative.
    pub fn normalize(&self, indices: &mut Array2<i64>) {
        let offset = self.offset();
        if offset != 0 {
            indices.mapv_inplace(|index| index.saturating_sub(offset));
        }
    }
}

/// Read the face array, put it in `(faces, 3)` order and make it zero based.
/// The index base found is returned so later index arrays can be shifted the
/// same way.
pub(crate) fn resolve<S>(source: &S, name: &str, axis_order: AxisOrder) -> Result<(Array2<i64>, IndexBase), Error>
where
    S: SourceDataset + ?Sized,
{
    let var = fetch(source, Role::Faces, name)?;
    let mut faces = orient(two_dimensional_indices(&var)?, axis_order, var.name());

    if faces.ncols() != FACE_ARITY {
        return Err(Error::malformed(
            var.name(),
            var.shape(),
            format!(
                "(faces, {0}) or ({0}, faces); set the axis order explicitly for grids of {0} faces or fewer",
                FACE_ARITY
            ),
        ));
    }

    let minimum = faces
        .iter()
        .copied()
        .min()
        .ok_or_else(|| Error::malformed(var.name(), var.shape(), "at least one face"))?;

    let index_base = IndexBase::from_minimum(minimum).ok_or_else(|| Error::UnrecognizedIndexBase {
        variable: var.name().to_string(),
        minimum,
    })?;

    index_base.normalize(&mut faces);

    Ok((faces, index_base))
}

/// Transpose `indices` when it is stored one column per element.
pub(crate) fn orient(indices: Array2<i64>, axis_order: AxisOrder, name: &str) -> Array2<i64> {
    let transpose = match axis_order {
        AxisOrder::Detect => indices.nrows() <= indices.ncols(),
        AxisOrder::CountFirst => false,
        AxisOrder::ArityFirst => true,
    };

    if transpose {
        log::debug!("`{}` is stored {:?}, transposing", name, indices.shape());
        indices.reversed_axes().as_standard_layout().into_owned()
    } else {
        indices
    }
}

/// the values of an index variable that must be two-dimensional
pub(crate) fn two_dimensional_indices(var: &Variable) -> Result<Array2<i64>, Error> {
    if var.ndim() != 2 {
        return Err(Error::malformed(var.name(), var.shape(), "a two-dimensional array"));
    }

    var.to_indices()?
        .into_dimensionality::<Ix2>()
        .map_err(|_| Error::malformed(var.name(), var.shape(), "a two-dimensional array"))
}
