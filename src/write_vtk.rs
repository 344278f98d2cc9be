//! # Writing grids to VTK
//!
//! A [`UGrid`] can be written as a VTK XML unstructured grid (`.vtu`) to look at
//! it in ParaView or similar tools. Nodes become points with a zero third
//! coordinate, faces become triangle cells, and face-face connectivity and face
//! coordinates are written as cell data when present. Boundary edges have no
//! place in the format and are not written.
//!
//! ```
//! use ugrid::{Encoding, UGrid};
//!
//! let grid = UGrid {
//!     nodes: ndarray::arr2(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]),
//!     faces: ndarray::arr2(&[[0, 1, 2]]),
//!     ..UGrid::default()
//! };
//!
//! let mut output = Vec::new();
//! ugrid::write_vtu(&mut output, &grid, Encoding::Ascii).unwrap();
//! assert!(String::from_utf8(output).unwrap().contains(r#"NumberOfCells="1""#));
//! ```

use crate::source::Precision;
use crate::traits::Numeric;
use crate::Error;
use crate::UGrid;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;
use std::path::Path;

/// VTK cell type of a triangle
const VTK_TRIANGLE: u8 = 5;

/// the encoding to use when writing an inline dataarray
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Ascii,
    Base64,
}

impl Encoding {
    fn to_str(self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::Base64 => "binary",
        }
    }
}

/// Write `grid` as a `.vtu` document to `writer`.
///
/// The grid's invariants are checked first so that a broken grid never makes
/// it into a file.
pub fn write_vtu<W: Write>(writer: W, grid: &UGrid, encoding: Encoding) -> Result<(), Error> {
    grid.check_invariants()?;

    let mut writer = Writer::new_with_indent(writer, b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new("VTKFile").with_attributes([
        ("type", "UnstructuredGrid"),
        ("version", "1.0"),
        ("byte_order", "LittleEndian"),
        ("header_type", "UInt64"),
    ])))?;
    writer.write_event(Event::Start(BytesStart::new("UnstructuredGrid")))?;

    let num_points = grid.num_nodes().to_string();
    let num_cells = grid.num_faces().to_string();
    writer.write_event(Event::Start(BytesStart::new("Piece").with_attributes([
        ("NumberOfPoints", num_points.as_str()),
        ("NumberOfCells", num_cells.as_str()),
    ])))?;

    write_points(&mut writer, grid, encoding)?;
    write_cells(&mut writer, grid, encoding)?;
    write_cell_data(&mut writer, grid, encoding)?;

    close_element(&mut writer, "Piece")?;
    close_element(&mut writer, "UnstructuredGrid")?;
    close_element(&mut writer, "VTKFile")?;

    Ok(())
}

/// Write `grid` to a new file at `path`, see [`write_vtu`].
pub fn write_vtu_file<P: AsRef<Path>>(path: P, grid: &UGrid, encoding: Encoding) -> Result<(), Error> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    let mut buf_writer = std::io::BufWriter::new(file);

    write_vtu(&mut buf_writer, grid, encoding)?;
    buf_writer.flush()?;

    log::debug!("wrote grid to {}", path.display());
    Ok(())
}

fn write_points<W: Write>(writer: &mut Writer<W>, grid: &UGrid, encoding: Encoding) -> Result<(), Error> {
    writer.write_event(Event::Start(BytesStart::new("Points")))?;

    // VTK points are always three dimensional
    let points: Vec<f64> = grid
        .nodes
        .rows()
        .into_iter()
        .flat_map(|row| [row[0], row[1], 0.0])
        .collect();
    write_coordinates(writer, "Points", 3, &points, grid.precision, encoding)?;

    close_element(writer, "Points")
}

fn write_cells<W: Write>(writer: &mut Writer<W>, grid: &UGrid, encoding: Encoding) -> Result<(), Error> {
    writer.write_event(Event::Start(BytesStart::new("Cells")))?;

    let arity = grid.faces.ncols() as i64;
    let connectivity: Vec<i64> = grid.faces.iter().copied().collect();
    let offsets: Vec<i64> = (1..=grid.num_faces() as i64).map(|face| face * arity).collect();
    let types = vec![VTK_TRIANGLE; grid.num_faces()];

    write_dataarray(writer, "connectivity", 1, &connectivity, encoding)?;
    write_dataarray(writer, "offsets", 1, &offsets, encoding)?;
    write_dataarray(writer, "types", 1, &types, encoding)?;

    close_element(writer, "Cells")
}

fn write_cell_data<W: Write>(writer: &mut Writer<W>, grid: &UGrid, encoding: Encoding) -> Result<(), Error> {
    if !grid.has_face_face_connectivity() && !grid.has_face_coordinates() {
        return Ok(());
    }

    writer.write_event(Event::Start(BytesStart::new("CellData")))?;

    if let Some(connectivity) = &grid.face_face_connectivity {
        let values: Vec<i64> = connectivity.iter().copied().collect();
        write_dataarray(
            writer,
            "face_face_connectivity",
            connectivity.ncols(),
            &values,
            encoding,
        )?;
    }

    if let Some(coordinates) = &grid.face_coordinates {
        let values: Vec<f64> = coordinates.iter().copied().collect();
        write_coordinates(writer, "face_coordinates", 2, &values, grid.precision, encoding)?;
    }

    close_element(writer, "CellData")
}

/// write floating point values with the precision they were loaded with
fn write_coordinates<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    components: usize,
    values: &[f64],
    precision: Precision,
    encoding: Encoding,
) -> Result<(), Error> {
    match precision {
        Precision::Float64 => write_dataarray(writer, name, components, values, encoding),
        Precision::Float32 => {
            let narrowed: Vec<f32> = values
                .iter()
                .map(|&value| num_traits::cast::<f64, f32>(value).unwrap_or(f32::NAN))
                .collect();
            write_dataarray(writer, name, components, &narrowed, encoding)
        }
    }
}

/// write a single inline `DataArray` element
pub fn write_dataarray<W: Write, T: Numeric>(
    writer: &mut Writer<W>,
    name: &str,
    components: usize,
    values: &[T],
    encoding: Encoding,
) -> Result<(), Error> {
    let components = components.to_string();
    writer.write_event(Event::Start(BytesStart::new("DataArray").with_attributes([
        ("type", T::VTK_TYPE),
        ("Name", name),
        ("NumberOfComponents", components.as_str()),
        ("format", encoding.to_str()),
    ])))?;

    let data = match encoding {
        Encoding::Ascii => encode_ascii(values),
        Encoding::Base64 => encode_base64(values),
    };
    writer.write_event(Event::Text(BytesText::new(&data)))?;

    close_element(writer, "DataArray")
}

fn close_element<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<(), Error> {
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn encode_ascii<T: Numeric>(values: &[T]) -> String {
    let mut data = String::new();
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            data.push(' ');
        }
        value.push_ascii(&mut data);
    }
    data
}

/// Inline binary data is the number of data bytes as a `UInt64` (the
/// `header_type` of the file) followed by the data, base64 encoded together.
fn encode_base64<T: Numeric>(values: &[T]) -> String {
    let data_len = values.len() * T::SIZE;
    let mut byte_data: Vec<u8> = Vec::with_capacity(data_len + 8);

    byte_data.extend_from_slice(&(data_len as u64).to_le_bytes());
    values
        .iter()
        .for_each(|value| value.extend_le_bytes(&mut byte_data));

    base64::encode(byte_data.as_slice())
}
