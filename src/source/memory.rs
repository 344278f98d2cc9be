use super::{SourceDataset, Variable, VariableData};
use crate::Error;

use std::collections::HashMap;

/// A [`SourceDataset`] held entirely in memory.
///
/// ```
/// use ugrid::{MemoryDataset, SourceDataset};
///
/// let dataset = MemoryDataset::new()
///     .with_attribute("grid_type", "Triangular")
///     .with_variable("lon", ndarray::arr1(&[0.0_f32, 1.0, 0.0]));
///
/// let lon = dataset.read_variable("lon").unwrap().unwrap();
/// assert_eq!(lon.shape(), &[3]);
/// assert!(dataset.read_variable("lat").unwrap().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryDataset {
    attributes: HashMap<String, String>,
    variables: HashMap<String, VariableData>,
}

impl MemoryDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute<N: Into<String>, V: Into<String>>(mut self, name: N, value: V) -> Self {
        self.insert_attribute(name, value);
        self
    }

    pub fn with_variable<N: Into<String>, D: Into<VariableData>>(mut self, name: N, data: D) -> Self {
        self.insert_variable(name, data);
        self
    }

    pub fn insert_attribute<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) {
        self.attributes.insert(name.into(), value.into());
    }

    /// add a variable, replacing any previous variable of the same name
    pub fn insert_variable<N: Into<String>, D: Into<VariableData>>(&mut self, name: N, data: D) {
        self.variables.insert(name.into(), data.into());
    }

    pub fn remove_variable(&mut self, name: &str) -> Option<VariableData> {
        self.variables.remove(name)
    }

    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }
}

impl SourceDataset for MemoryDataset {
    fn global_attribute(&self, name: &str) -> Result<Option<String>, Error> {
        Ok(self.attributes.get(name).cloned())
    }

    fn read_variable(&self, name: &str) -> Result<Option<Variable>, Error> {
        Ok(self
            .variables
            .get(name)
            .map(|data| Variable::new(name, data.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn read_returns_owned_copy() {
        let dataset = MemoryDataset::new().with_variable("nv", arr2(&[[1_i64, 2, 3]]));

        let var = dataset.read_variable("nv").unwrap().unwrap();
        let mut indices = var.to_indices().unwrap();
        indices -= 1;

        let again = dataset.read_variable("nv").unwrap().unwrap();
        assert_eq!(again.to_indices().unwrap(), arr2(&[[1_i64, 2, 3]]).into_dyn());
    }

    #[test]
    fn variable_names_follow_inserts_and_removals() {
        let mut dataset = MemoryDataset::new()
            .with_variable("lon", arr2(&[[0.0]]))
            .with_variable("lat", arr2(&[[0.0]]));
        dataset.remove_variable("lon");

        let mut names: Vec<&str> = dataset.variable_names().collect();
        names.sort_unstable();
        assert_eq!(names, vec!["lat"]);
    }

    #[test]
    fn attributes_are_looked_up_by_exact_name() {
        let dataset = MemoryDataset::new().with_attribute("grid_type", "Triangular");
        assert_eq!(
            dataset.global_attribute("grid_type").unwrap().as_deref(),
            Some("Triangular")
        );
        assert_eq!(dataset.global_attribute("GRID_TYPE").unwrap(), None);
    }
}
