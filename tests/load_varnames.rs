use std::cell::RefCell;

use ndarray::{arr1, arr2, Array1, Array2};
use ugrid::prelude::*;

/// six nodes in two rows, four triangles between them
fn nodes() -> (Array1<f64>, Array1<f64>) {
    (
        arr1(&[0.0, 1.0, 2.0, 0.0, 1.0, 2.0]),
        arr1(&[0.0, 0.0, 0.0, 1.0, 1.0, 1.0]),
    )
}

fn faces() -> Array2<i64> {
    arr2(&[[0, 1, 4], [0, 4, 3], [1, 2, 5], [1, 5, 4]])
}

fn neighbors() -> Array2<i64> {
    arr2(&[[3, 1, -1], [-1, -1, 0], [-1, 3, -1], [2, -1, 0]])
}

fn boundary_edges() -> Array2<i64> {
    arr2(&[[0, 1], [1, 2], [2, 5], [5, 4], [4, 3], [3, 0]])
}

/// A source laid out the way a producer might write it: indices shifted by
/// `offset`, connectivity stored `(3, faces)` when `arity_first` is set, and
/// two extra columns on the boundary array.
fn producer_source(offset: i64, arity_first: bool) -> MemoryDataset {
    let (lon, lat) = nodes();

    let layout = |arr: Array2<i64>| {
        let shifted = arr + offset;
        if arity_first {
            shifted.reversed_axes().as_standard_layout().into_owned()
        } else {
            shifted
        }
    };

    let edges = boundary_edges() + offset;
    let mut bnd = Array2::<i64>::zeros((edges.nrows(), 4));
    bnd.slice_mut(ndarray::s![.., ..2]).assign(&edges);
    bnd.column_mut(2).fill(7);

    MemoryDataset::new()
        .with_attribute("grid_type", "Triangular")
        .with_variable("lon", lon)
        .with_variable("lat", lat)
        .with_variable("nv", layout(faces()))
        .with_variable("nbe", layout(neighbors()))
        .with_variable("lonc", arr1(&[0.7, 0.3, 1.7, 1.3]))
        .with_variable("latc", arr1(&[0.3, 0.7, 0.3, 0.7]))
        .with_variable("bnd", bnd)
}

fn full_mapping() -> NamesMapping {
    NamesMapping::new("lon", "lat", "nv")
        .with_face_face_connectivity("nbe")
        .with_face_coordinates("lonc", "latc")
        .with_boundaries("bnd")
}

#[test]
fn zero_indexed_faces_round_trip() {
    let source = producer_source(0, false);
    let grid = load_dataset(&source, &NamesMapping::new("lon", "lat", "nv"), &LoadOptions::default()).unwrap();

    assert_eq!(grid.faces, faces());
    assert_eq!(grid.nodes.column(0), nodes().0);
    assert_eq!(grid.nodes.column(1), nodes().1);
}

#[test]
fn arity_first_faces_are_transposed() {
    let source = producer_source(0, true);
    let grid = load_dataset(&source, &full_mapping(), &LoadOptions::default()).unwrap();

    assert_eq!(grid.faces.shape(), &[4, 3]);
    assert_eq!(grid.faces, faces());
    assert_eq!(grid.face_face_connectivity, Some(neighbors()));
}

#[test]
fn one_indexed_source_is_shifted_everywhere() {
    let source = producer_source(1, true);
    let grid = load_dataset(&source, &full_mapping(), &LoadOptions::default()).unwrap();

    assert_eq!(grid.faces, faces());
    // the "no neighbor" sentinel was stored as 0 and comes out as -1
    assert_eq!(grid.face_face_connectivity, Some(neighbors()));
    assert_eq!(grid.boundaries, Some(boundary_edges()));
    assert_eq!(grid.neighbors(1), Some(vec![None, None, Some(0)]));
}

#[test]
fn required_keys_only() {
    let source = producer_source(1, false);
    let grid = load_dataset(&source, &NamesMapping::new("lon", "lat", "nv"), &LoadOptions::default()).unwrap();

    assert_eq!(grid.num_faces(), 4);
    assert!(grid.face_face_connectivity.is_none());
    assert!(grid.face_coordinates.is_none());
    assert!(grid.boundaries.is_none());
}

#[test]
fn face_coordinates_are_packed_per_face() {
    let source = producer_source(0, false);
    let grid = load_dataset(&source, &full_mapping(), &LoadOptions::default()).unwrap();

    let centers = grid.face_coordinates.unwrap();
    assert_eq!(centers.shape(), &[4, 2]);
    assert_eq!(centers.row(2).to_vec(), vec![1.7, 0.3]);
}

#[test]
fn attribute_gate() {
    let names = NamesMapping::new("lon", "lat", "nv");
    let options = LoadOptions::default().with_check("grid_type", "triangular");

    let triangular = producer_source(0, false);
    load_dataset(&triangular, &names, &options).unwrap();

    let quad = producer_source(0, false).with_attribute("grid_type", "Quad");
    let err = load_dataset(&quad, &names, &options).unwrap_err();
    assert!(matches!(err, Error::FormatMismatch { ref attribute, .. } if attribute == "grid_type"));
    assert!(err.to_string().contains("grid_type"));
}

/// wraps a source and remembers which variables were asked for
struct RecordingSource {
    inner: MemoryDataset,
    requested: RefCell<Vec<String>>,
}

impl SourceDataset for RecordingSource {
    fn global_attribute(&self, name: &str) -> Result<Option<String>, Error> {
        self.inner.global_attribute(name)
    }

    fn read_variable(&self, name: &str) -> Result<Option<Variable>, Error> {
        self.requested.borrow_mut().push(name.to_string());
        self.inner.read_variable(name)
    }
}

#[test]
fn missing_latitude_fails_before_faces_are_read() {
    let source = RecordingSource {
        inner: producer_source(0, false),
        requested: RefCell::new(Vec::new()),
    };
    let names = NamesMapping::new("lon", "latitude", "nv");

    let err = load_dataset(&source, &names, &LoadOptions::default()).unwrap_err();

    match &err {
        Error::MissingVariable { role, variable } => {
            assert_eq!(*role, Role::NodesLat);
            assert_eq!(variable, "latitude");
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert!(err.to_string().contains("latitude"));
    assert!(!source.requested.borrow().iter().any(|name| name == "nv"));
}

#[test]
fn mapped_optional_variable_must_exist() {
    let mut source = producer_source(0, false);
    source.remove_variable("nbe");

    let err = load_dataset(&source, &full_mapping(), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, Error::MissingVariable { role: Role::FaceFaceConnectivity, .. }));
}

#[test]
fn unrecognized_index_base() {
    let source = producer_source(2, false);
    let err = load_dataset(&source, &full_mapping(), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, Error::UnrecognizedIndexBase { minimum: 2, .. }));
}

#[test]
fn legacy_string_mapping() {
    let names = NamesMapping::from_pairs([
        ("attribute_check", "grid_type"),
        ("nodes_lon", "lon"),
        ("nodes_lat", "lat"),
        ("faces", "nv"),
        ("face_face_connectivity", "nbe"),
        ("face_coordinates_lon", "lonc"),
        ("face_coordinates_lat", "latc"),
        ("boundaries", "bnd"),
    ])
    .unwrap();
    assert_eq!(names, full_mapping());

    let grid = load_dataset(&producer_source(1, true), &names, &LoadOptions::default()).unwrap();
    assert_eq!(grid.num_boundaries(), 6);
}

#[test]
fn lone_face_coordinate_key_is_ignored() {
    let names = NamesMapping::from_pairs([
        ("nodes_lon", "lon"),
        ("nodes_lat", "lat"),
        ("faces", "nv"),
        ("face_coordinates_lon", "lonc"),
    ])
    .unwrap();

    let grid = load_dataset(&producer_source(0, false), &names, &LoadOptions::default()).unwrap();
    assert!(grid.face_coordinates.is_none());
}

#[test]
fn explicit_axis_order_for_tiny_grids() {
    // two faces stored (faces, 3) are mistaken for (3, faces) by the heuristic
    let source = MemoryDataset::new()
        .with_variable("lon", arr1(&[0.0_f32, 1.0, 1.0, 0.0]))
        .with_variable("lat", arr1(&[0.0_f32, 0.0, 1.0, 1.0]))
        .with_variable("nv", arr2(&[[1_i32, 2, 3], [1, 3, 4]]));
    let names = NamesMapping::new("lon", "lat", "nv");

    let err = load_dataset(&source, &names, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, Error::MalformedShape { .. }));

    let options = LoadOptions::default().with_axis_order(AxisOrder::CountFirst);
    let grid = load_dataset(&source, &names, &options).unwrap();
    assert_eq!(grid.faces, arr2(&[[0, 1, 2], [0, 2, 3]]));
    assert_eq!(grid.precision, Precision::Float32);
}

#[test]
fn faces_referencing_missing_nodes_are_rejected() {
    let source = producer_source(0, false).with_variable("nv", arr2(&[[0_i64, 1, 4], [0, 4, 3], [1, 2, 5], [1, 6, 4]]));
    let err = load_dataset(&source, &NamesMapping::new("lon", "lat", "nv"), &LoadOptions::default()).unwrap_err();

    assert!(matches!(
        err,
        Error::IndexOutOfRange { role: Role::Faces, index: 6, len: 6 }
    ));
}

#[test]
fn loaded_grid_can_be_written() {
    let grid = load_dataset(&producer_source(1, true), &full_mapping(), &LoadOptions::default()).unwrap();

    let mut output = Vec::new();
    ugrid::write_vtu(&mut output, &grid, Encoding::Base64).unwrap();
    let document = String::from_utf8(output).unwrap();

    assert!(document.contains(r#"NumberOfPoints="6" NumberOfCells="4""#));
    assert!(document.contains("face_face_connectivity"));
    assert!(grid.to_string().contains("Number of boundary edges: 6"));
}
