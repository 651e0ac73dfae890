use serde::{Deserialize, Serialize};

use crate::errors::{MedscanError, MedscanResult};

/// A decoded, preprocessed image in row-major order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageTensor {
    pub shape: Vec<usize>,
    pub data: Vec<f32>,
}

impl ImageTensor {
    /// Build a tensor, checking that `data` fills `shape` exactly.
    pub fn new(shape: Vec<usize>, data: Vec<f32>) -> MedscanResult<Self> {
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(MedscanError::InvalidImage {
                reason: format!("shape {shape:?} needs {expected} values, got {}", data.len()),
            });
        }
        Ok(Self { shape, data })
    }

    pub fn zeros(shape: Vec<usize>) -> Self {
        let len = shape.iter().product();
        Self {
            shape,
            data: vec![0.0; len],
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Spatial weighting over the input, as produced by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaliencyMap {
    pub width: usize,
    pub height: usize,
    pub values: Vec<f32>,
}
