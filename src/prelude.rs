//! Common traits and types that are useful for working with `ugrid`
pub use crate::grid::UGrid;
pub use crate::load::{load_dataset, IndexBase};
pub use crate::mapping::{AttributeCheck, AxisOrder, LoadOptions, NamesMapping, Role};
pub use crate::source::{MemoryDataset, Precision, SourceDataset, Variable, VariableData};
pub use crate::write_vtk::{write_vtu, Encoding};
pub use crate::Error;
