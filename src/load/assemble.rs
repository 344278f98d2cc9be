use crate::source::Precision;
use crate::{Error, UGrid};

use ndarray::Array2;

/// Everything the resolvers produced, already normalized.
pub(crate) struct Resolved {
    pub nodes: Array2<f64>,
    pub precision: Precision,
    pub faces: Array2<i64>,
    pub face_face_connectivity: Option<Array2<i64>>,
    pub face_coordinates: Option<Array2<f64>>,
    pub boundaries: Option<Array2<i64>>,
}

/// Fill a fresh grid with the resolved arrays and check that they agree.
pub(crate) fn assemble(resolved: Resolved) -> Result<UGrid, Error> {
    let mut grid = UGrid::new();

    grid.nodes = resolved.nodes;
    grid.precision = resolved.precision;
    grid.faces = resolved.faces;
    grid.face_face_connectivity = resolved.face_face_connectivity;
    grid.face_coordinates = resolved.face_coordinates;
    grid.boundaries = resolved.boundaries;

    grid.check_invariants()?;

    Ok(grid)
}
