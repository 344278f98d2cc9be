//! # Loading a grid
//!
//! [`load_dataset`] runs the whole pipeline against one source:
//!
//! 1. the global attributes in [`LoadOptions::attribute_check`] are verified,
//! 2. node longitude and latitude are read into an `N × 2` array,
//! 3. the face array is read, put in `(faces, 3)` order and shifted to zero
//!    based indexing. The [`IndexBase`] found here is reused for every other
//!    index array,
//! 4. face-face connectivity, face coordinates and boundaries are read when the
//!    [`NamesMapping`] names them,
//! 5. everything is assembled into a [`UGrid`] and its invariants checked.
//!
//! Any failure aborts the load, there is no partial grid.
//!
//! ## Axis order
//!
//! Connectivity arrays are found stored both as `(faces, 3)` and `(3, faces)`.
//! Unless [`AxisOrder`](crate::AxisOrder) says otherwise, an array whose first
//! axis is not longer than its second is assumed to be `(3, faces)` and is
//! transposed. Grids with three faces or fewer defeat this guess and need an
//! explicit axis order.

mod assemble;
mod attributes;
pub(crate) mod faces;
mod nodes;
mod optional;

pub use faces::IndexBase;

use crate::mapping::{LoadOptions, NamesMapping, Role};
use crate::source::{SourceDataset, Variable};
use crate::{Error, UGrid};

#[cfg(feature = "netcdf")]
use crate::mapping::AttributeCheck;
#[cfg(feature = "netcdf")]
use std::path::Path;

/// Build a [`UGrid`] from an already opened source.
///
/// The source is only borrowed; closing it stays with the caller.
pub fn load_dataset<S>(source: &S, names: &NamesMapping, options: &LoadOptions) -> Result<UGrid, Error>
where
    S: SourceDataset + ?Sized,
{
    attributes::validate(source, &options.attribute_check)?;

    let (nodes, precision) = nodes::resolve(source, names)?;
    log::debug!("resolved {} nodes ({})", nodes.nrows(), precision);

    let (faces, index_base) = faces::resolve(source, &names.faces, options.axis_order)?;
    log::debug!("resolved {} faces, source is {}", faces.nrows(), index_base);

    let face_face_connectivity = match &names.face_face_connectivity {
        Some(name) => Some(optional::face_face_connectivity(
            source,
            name,
            options.axis_order,
            index_base,
        )?),
        None => None,
    };

    let face_coordinates = match &names.face_coordinates {
        Some(coordinates) => Some(optional::face_coordinates(source, coordinates, faces.nrows())?),
        None => None,
    };

    let boundaries = match &names.boundaries {
        Some(name) => Some(optional::boundaries(source, name, index_base)?),
        None => None,
    };

    assemble::assemble(assemble::Resolved {
        nodes,
        precision,
        faces,
        face_face_connectivity,
        face_coordinates,
        boundaries,
    })
}

/// Open `path` (a file or an OPeNDAP url) and load a [`UGrid`] from it,
/// checking `attribute_check` first.
///
/// ```no_run
/// use ugrid::{AttributeCheck, NamesMapping};
///
/// let names = NamesMapping::new("lon", "lat", "nv")
///     .with_face_face_connectivity("nbe")
///     .with_face_coordinates("lonc", "latc")
///     .with_boundaries("bnd");
/// let check = AttributeCheck::new().with("grid_type", "triangular");
///
/// let grid = ugrid::load_from_varnames("small_trigrid_example.nc", &names, check)?;
/// println!("{}", grid);
/// # Ok::<(), ugrid::Error>(())
/// ```
#[cfg(feature = "netcdf")]
pub fn load_from_varnames<P: AsRef<Path>>(
    path: P,
    names: &NamesMapping,
    attribute_check: AttributeCheck,
) -> Result<UGrid, Error> {
    load_with_options(path, names, &LoadOptions::from(attribute_check))
}

/// Like [`load_from_varnames`] with full control over the [`LoadOptions`].
///
/// The file is closed before this returns, whether loading succeeded or not.
#[cfg(feature = "netcdf")]
pub fn load_with_options<P: AsRef<Path>>(
    path: P,
    names: &NamesMapping,
    options: &LoadOptions,
) -> Result<UGrid, Error> {
    let source = crate::source::NetcdfDataset::open(path)?;
    load_dataset(&source, names, options)
}

/// read the variable `name` mapped as `role`, failing when it does not exist
pub(crate) fn fetch<S>(source: &S, role: Role, name: &str) -> Result<Variable, Error>
where
    S: SourceDataset + ?Sized,
{
    source
        .read_variable(name)?
        .ok_or_else(|| Error::MissingVariable {
            role,
            variable: name.to_string(),
        })
}
