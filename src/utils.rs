use ndarray::{Array1, Array2};

/// Pack two columns side by side into an `N × 2` array. Callers check that
/// both have the same length.
pub(crate) fn stack_columns(first: &Array1<f64>, second: &Array1<f64>) -> Array2<f64> {
    let mut packed = Array2::zeros((first.len(), 2));
    packed.column_mut(0).assign(first);
    packed.column_mut(1).assign(second);
    packed
}
