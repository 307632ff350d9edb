//! Chart-facing dataset shapes.
//!
//! The rendering layer polls these as opaque data sources; the analyzer's
//! only obligation is to keep scales and values mutually consistent.

use ndarray::{Array1, Array2};
use serde_derive::*;

/// A 2D dataset: axis scales plus a grid of values.
///
/// `values` has shape `(y_scale.len(), x_scale.len())`, indexed
/// `[[y, x]]`.
#[derive(Serialize, Clone, Debug)]
pub struct GridDataset {
    pub x_scale: Array1<f64>,
    pub y_scale: Array1<f64>,
    pub values: Array2<f64>,
}

impl GridDataset {
    /// All-zero dataset of the given shape.
    pub fn new(x_len: usize, y_len: usize) -> Self {
        GridDataset {
            x_scale: Array1::zeros(x_len),
            y_scale: Array1::zeros(y_len),
            values: Array2::zeros((y_len, x_len)),
        }
    }
}

/// Scale holding the pixel indices `0, 1, .., len-1`.
pub fn index_scale(len: usize) -> Array1<f64> {
    Array1::from_shape_fn(len, |i| i as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_is_consistent() {
        let d = GridDataset::new(3, 2);
        assert_eq!(d.values.dim(), (2, 3));
        assert_eq!(d.x_scale.len(), 3);
        assert_eq!(d.y_scale.len(), 2);
    }

    #[test]
    fn index_scales_count_pixels() {
        assert_eq!(index_scale(4).as_slice().unwrap(), &[0.0, 1.0, 2.0, 3.0]);
        assert_eq!(index_scale(0).len(), 0);
    }
}
