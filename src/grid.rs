//! # Unstructured grid
//!
//! [`UGrid`] is the canonical form every source is loaded into: one row per
//! node, one row per face, and zero-based indices throughout. The optional
//! components are `None` when the mapping did not name them.
//!
//! Fields are public so a grid can be built or edited by hand. After doing so,
//! [`UGrid::check_invariants`] verifies that the arrays still agree with each
//! other; the loader runs the same check before handing out a grid.

use crate::load::faces::FACE_ARITY;
use crate::mapping::Role;
use crate::source::Precision;
use crate::Error;

use ndarray::{Array2, ArrayView2};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct UGrid {
    /// `N × 2` (lon, lat) vertex positions
    pub nodes: Array2<f64>,
    /// precision of the coordinates in the source they were read from
    pub precision: Precision,
    /// `F × 3` vertex indices of every face
    pub faces: Array2<i64>,
    /// `F × k` indices of neighboring faces, negative where there is none
    pub face_face_connectivity: Option<Array2<i64>>,
    /// `F × 2` (lon, lat) face centers
    pub face_coordinates: Option<Array2<f64>>,
    /// `B × 2` vertex index pairs of boundary edges
    pub boundaries: Option<Array2<i64>>,
}

impl Default for UGrid {
    fn default() -> Self {
        Self {
            nodes: Array2::zeros((0, 2)),
            precision: Precision::Float64,
            faces: Array2::zeros((0, FACE_ARITY)),
            face_face_connectivity: None,
            face_coordinates: None,
            boundaries: None,
        }
    }
}

impl UGrid {
    /// an empty grid, without nodes or faces
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.nrows()
    }

    pub fn num_faces(&self) -> usize {
        self.faces.nrows()
    }

    pub fn num_boundaries(&self) -> usize {
        self.boundaries.as_ref().map(|b| b.nrows()).unwrap_or(0)
    }

    /// (lon, lat) of node `index`
    pub fn node(&self, index: usize) -> Option<(f64, f64)> {
        (index < self.num_nodes()).then(|| (self.nodes[[index, 0]], self.nodes[[index, 1]]))
    }

    /// the vertex indices of face `index`
    pub fn face(&self, index: usize) -> Option<[usize; 3]> {
        if index >= self.num_faces() || self.faces.ncols() != FACE_ARITY {
            return None;
        }

        let row = self.faces.row(index);
        let mut vertices = [0; FACE_ARITY];
        for (slot, vertex) in vertices.iter_mut().zip(row.iter()) {
            *slot = usize::try_from(*vertex).ok()?;
        }
        Some(vertices)
    }

    /// Neighbors of face `index`, one entry per edge, `None` where the edge is
    /// on the boundary. `None` overall when there is no connectivity.
    pub fn neighbors(&self, index: usize) -> Option<Vec<Option<usize>>> {
        let connectivity = self.face_face_connectivity.as_ref()?;
        if index >= connectivity.nrows() {
            return None;
        }

        let neighbors = connectivity
            .row(index)
            .iter()
            .map(|&face| usize::try_from(face).ok())
            .collect();
        Some(neighbors)
    }

    /// the vertex index pair of boundary edge `index`
    pub fn boundary(&self, index: usize) -> Option<[usize; 2]> {
        let boundaries = self.boundaries.as_ref()?;
        if index >= boundaries.nrows() {
            return None;
        }

        let first = usize::try_from(boundaries[[index, 0]]).ok()?;
        let second = usize::try_from(boundaries[[index, 1]]).ok()?;
        Some([first, second])
    }

    pub fn has_face_face_connectivity(&self) -> bool {
        self.face_face_connectivity.is_some()
    }

    pub fn has_face_coordinates(&self) -> bool {
        self.face_coordinates.is_some()
    }

    pub fn has_boundaries(&self) -> bool {
        self.boundaries.is_some()
    }

    /// Verify that the arrays agree with each other:
    ///
    /// - `nodes` and `face_coordinates` have two columns, `faces` three and
    ///   `boundaries` two,
    /// - every face and boundary vertex index is within `0..num_nodes()`,
    /// - `face_face_connectivity` and `face_coordinates` have one row per
    ///   face, and every neighbor index is below `num_faces()`.
    pub fn check_invariants(&self) -> Result<(), Error> {
        let num_nodes = self.num_nodes();
        let num_faces = self.num_faces();

        expect_columns("nodes", &self.nodes, 2)?;
        expect_columns(&Role::Faces.to_string(), &self.faces, FACE_ARITY)?;
        indices_within(Role::Faces, self.faces.view(), num_nodes)?;

        if let Some(connectivity) = &self.face_face_connectivity {
            expect_rows(&Role::FaceFaceConnectivity.to_string(), connectivity, num_faces)?;
            // negative entries mark a missing neighbor
            if let Some(&index) = connectivity.iter().find(|&&face| face >= num_faces as i64) {
                return Err(Error::IndexOutOfRange {
                    role: Role::FaceFaceConnectivity,
                    index,
                    len: num_faces,
                });
            }
        }

        if let Some(coordinates) = &self.face_coordinates {
            expect_columns("face_coordinates", coordinates, 2)?;
            expect_rows("face_coordinates", coordinates, num_faces)?;
        }

        if let Some(boundaries) = &self.boundaries {
            expect_columns(&Role::Boundaries.to_string(), boundaries, 2)?;
            indices_within(Role::Boundaries, boundaries.view(), num_nodes)?;
        }

        Ok(())
    }
}

fn expect_columns<T>(name: &str, arr: &Array2<T>, columns: usize) -> Result<(), Error> {
    if arr.ncols() != columns {
        return Err(Error::malformed(name, arr.shape(), format!("(_, {})", columns)));
    }
    Ok(())
}

fn expect_rows<T>(name: &str, arr: &Array2<T>, rows: usize) -> Result<(), Error> {
    if arr.nrows() != rows {
        return Err(Error::malformed(name, arr.shape(), format!("({}, _), one row per face", rows)));
    }
    Ok(())
}

fn indices_within(role: Role, indices: ArrayView2<i64>, len: usize) -> Result<(), Error> {
    match indices.iter().find(|&&index| index < 0 || index >= len as i64) {
        Some(&index) => Err(Error::IndexOutOfRange { role, index, len }),
        None => Ok(()),
    }
}

impl fmt::Display for UGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "UGrid object:")?;
        writeln!(f, "Number of nodes: {} ({})", self.num_nodes(), self.precision)?;
        write!(f, "Number of faces: {}", self.num_faces())?;

        if let Some(connectivity) = &self.face_face_connectivity {
            write!(f, "\nFace-face connectivity: {} neighbors per face", connectivity.ncols())?;
        }
        if self.has_face_coordinates() {
            write!(f, "\nFace coordinates: present")?;
        }
        if self.has_boundaries() {
            write!(f, "\nNumber of boundary edges: {}", self.num_boundaries())?;
        }

        Ok(())
    }
}
