//! Per-feature standardization.

use ndarray::{Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{VisionError, VisionResult};

/// Zero-mean, unit-variance scaling fitted on training data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Array1<f32>,
    scale: Array1<f32>,
}

impl StandardScaler {
    /// Fit on the rows of `samples`.
    ///
    /// Constant features get a scale of 1 so they map to 0 instead of NaN.
    pub fn fit(samples: &Array2<f32>) -> VisionResult<Self> {
        let mean = samples.mean_axis(Axis(0)).ok_or(VisionError::NoTrainingData)?;
        let scale = samples
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s > f32::EPSILON { s } else { 1.0 });
        Ok(Self { mean, scale })
    }

    pub fn dimension(&self) -> usize {
        self.mean.len()
    }

    /// Standardize every row in place.
    pub fn transform_inplace(&self, samples: &mut Array2<f32>) -> VisionResult<()> {
        if samples.ncols() != self.dimension() {
            return Err(VisionError::dimension_mismatch(self.dimension(), samples.ncols()));
        }
        for mut row in samples.rows_mut() {
            row -= &self.mean;
            row /= &self.scale;
        }
        Ok(())
    }

    /// Standardize one sample.
    pub fn transform(&self, sample: ArrayView1<f32>) -> VisionResult<Array1<f32>> {
        if sample.len() != self.dimension() {
            return Err(VisionError::dimension_mismatch(self.dimension(), sample.len()));
        }
        Ok((&sample - &self.mean) / &self.scale)
    }
}
