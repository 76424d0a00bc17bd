//! Per-frame feature extraction.
//!
//! A frame is reduced to a square grayscale image and described by three
//! concatenated blocks:
//!
//! 1. Histogram of oriented gradients (unsigned, overlapping L2-normalized blocks)
//! 2. Binary Canny edge map with thresholds around the median intensity, one
//!    value per pixel
//! 3. Normalized intensity histogram

use image::imageops::FilterType;
use image::{DynamicImage, GrayImage};
use imageproc::edges::canny;
use imageproc::hog::{hog, HogOptions};
use serde::{Deserialize, Serialize};

use super::config::FeatureConfig;
use crate::error::{VisionError, VisionResult};

/// A fixed-length numeric description of one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector(Vec<f32>);

impl FeatureVector {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }
}

impl From<Vec<f32>> for FeatureVector {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

/// Computes [`FeatureVector`]s with a fixed layout.
#[derive(Debug, Clone, Default)]
pub struct FeatureExtractor {
    config: FeatureConfig,
}

impl FeatureExtractor {
    pub fn new(config: FeatureConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Length of every vector this extractor produces.
    pub fn dimension(&self) -> usize {
        self.config.feature_len()
    }

    /// Describe one frame.
    ///
    /// Either the whole vector is produced or an error is returned; partial
    /// vectors never escape.
    pub fn extract_features(&self, frame: &DynamicImage) -> VisionResult<FeatureVector> {
        self.validate()?;
        if frame.width() == 0 || frame.height() == 0 {
            return Err(VisionError::feature_extraction("frame has no pixels"));
        }

        let side = self.config.resize;
        let gray = frame.resize_exact(side, side, FilterType::Triangle).to_luma8();

        let mut features = Vec::with_capacity(self.dimension());
        features.extend(self.gradient_histogram(&gray)?);
        features.extend(self.edge_map(&gray));
        features.extend(self.intensity_histogram(&gray));

        if features.len() != self.dimension() {
            return Err(VisionError::dimension_mismatch(self.dimension(), features.len()));
        }
        Ok(FeatureVector(features))
    }

    fn validate(&self) -> VisionResult<()> {
        let c = &self.config;
        if c.resize == 0 || c.cell_size == 0 || c.orientation_bins == 0 || c.intensity_bins == 0 {
            return Err(VisionError::feature_extraction("feature sizes must be non-zero"));
        }
        if c.resize % c.cell_size != 0 {
            return Err(VisionError::feature_extraction("resize must be a multiple of the cell size"));
        }
        if c.block_size % c.cell_size != 0 || c.block_stride % c.cell_size != 0 || c.block_stride == 0 {
            return Err(VisionError::feature_extraction(
                "block size and stride must be non-zero multiples of the cell size",
            ));
        }
        if c.resize < c.block_size {
            return Err(VisionError::feature_extraction("resize is smaller than one block"));
        }
        if (c.resize - c.block_size) % c.block_stride != 0 {
            return Err(VisionError::feature_extraction("blocks must tile the resized frame exactly"));
        }
        if !(0.0..=1.0).contains(&c.edge_sigma) {
            return Err(VisionError::feature_extraction("edge sigma must lie in [0, 1]"));
        }
        Ok(())
    }

    fn gradient_histogram(&self, gray: &GrayImage) -> VisionResult<Vec<f32>> {
        let c = &self.config;
        let options = HogOptions::new(
            c.orientation_bins,
            false,
            c.cell_size as usize,
            (c.block_size / c.cell_size) as usize,
            (c.block_stride / c.cell_size) as usize,
        );
        let mut descriptor = hog(gray, options).map_err(VisionError::feature_extraction)?;

        // A block without gradients has no norm.
        for value in descriptor.iter_mut().filter(|v| !v.is_finite()) {
            *value = 0.0;
        }
        Ok(descriptor)
    }

    fn edge_map(&self, gray: &GrayImage) -> Vec<f32> {
        let median = median_intensity(gray);
        let low = ((1.0 - self.config.edge_sigma) * median).max(0.0);
        let high = ((1.0 + self.config.edge_sigma) * median).min(255.0).max(low);

        canny(gray, low, high)
            .as_raw()
            .iter()
            .map(|&v| if v > 0 { 1.0 } else { 0.0 })
            .collect()
    }

    fn intensity_histogram(&self, gray: &GrayImage) -> Vec<f32> {
        let bins = self.config.intensity_bins;
        let mut hist = vec![0f32; bins];
        for &value in gray.as_raw() {
            hist[value as usize * bins / 256] += 1.0;
        }
        let total: f32 = hist.iter().sum();
        if total > 0.0 {
            hist.iter_mut().for_each(|v| *v /= total);
        }
        hist
    }
}

fn median_intensity(gray: &GrayImage) -> f32 {
    let raw = gray.as_raw();
    if raw.is_empty() {
        return 0.0;
    }
    let mut counts = [0usize; 256];
    for &v in raw {
        counts[v as usize] += 1;
    }

    // Mean of the two middle values for even counts.
    let n = raw.len();
    let nth = |k: usize| {
        let mut seen = 0;
        for (value, &count) in counts.iter().enumerate() {
            seen += count;
            if seen > k {
                return value as f32;
            }
        }
        255.0
    };
    if n % 2 == 1 {
        nth(n / 2)
    } else {
        (nth(n / 2 - 1) + nth(n / 2)) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, RgbImage};

    fn solid(w: u32, h: u32, value: u8) -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(w, h, Luma([value])))
    }

    fn split(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_fn(w, h, |x, _| {
            if x < w / 2 {
                Luma([30])
            } else {
                Luma([220])
            }
        }))
    }

    #[test]
    fn test_dimension_is_constant() {
        let extractor = FeatureExtractor::default();
        let small = extractor.extract_features(&split(40, 30)).unwrap();
        let large = extractor
            .extract_features(&DynamicImage::ImageRgb8(RgbImage::new(320, 240)))
            .unwrap();
        assert_eq!(small.len(), extractor.dimension());
        assert_eq!(large.len(), extractor.dimension());
    }

    #[test]
    fn test_empty_frame_is_an_error() {
        let extractor = FeatureExtractor::default();
        let empty = DynamicImage::ImageLuma8(GrayImage::new(0, 0));
        assert!(matches!(
            extractor.extract_features(&empty),
            Err(VisionError::FeatureExtraction(_))
        ));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let config = FeatureConfig {
            cell_size: 6,
            ..FeatureConfig::default()
        };
        let extractor = FeatureExtractor::new(config);
        assert!(extractor.extract_features(&solid(16, 16, 10)).is_err());
    }

    #[test]
    fn test_solid_frame_has_no_gradients_or_edges() {
        let extractor = FeatureExtractor::default();
        let features = extractor.extract_features(&solid(64, 64, 128)).unwrap();
        let config = extractor.config();
        let hog_len = config.hog_len();
        let side = config.resize as usize;

        assert!(features.as_slice()[..hog_len].iter().all(|&v| v == 0.0));
        assert!(features.as_slice()[hog_len..hog_len + side * side].iter().all(|&v| v == 0.0));

        let hist = &features.as_slice()[hog_len + side * side..];
        assert_eq!(hist[128 * 32 / 256], 1.0);
        assert!((hist.iter().sum::<f32>() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_step_edge_is_detected() {
        let extractor = FeatureExtractor::default();
        let features = extractor.extract_features(&split(128, 128)).unwrap();
        let config = extractor.config();
        let hog_len = config.hog_len();
        let side = config.resize as usize;

        let edges = &features.as_slice()[hog_len..hog_len + side * side];
        assert!(edges.iter().all(|&v| v == 0.0 || v == 1.0));
        assert!(edges.iter().any(|&v| v == 1.0));
        assert!(features.as_slice()[..hog_len].iter().any(|&v| v > 0.0));
    }

    #[test]
    fn test_blocks_must_tile_the_frame() {
        let config = FeatureConfig {
            resize: 136,
            block_stride: 16,
            ..FeatureConfig::default()
        };
        let extractor = FeatureExtractor::new(config);
        assert!(matches!(
            extractor.extract_features(&split(64, 64)),
            Err(VisionError::FeatureExtraction(_))
        ));
    }

    #[test]
    fn test_gradient_histogram_length_matches_config() {
        let extractor = FeatureExtractor::default();
        let gray = split(128, 128).to_luma8();
        let hog = extractor.gradient_histogram(&gray).unwrap();
        assert_eq!(hog.len(), extractor.config().hog_len());
        assert!(hog.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_median_intensity() {
        let img = GrayImage::from_raw(2, 2, vec![10, 20, 30, 200]).unwrap();
        assert_eq!(median_intensity(&img), 25.0);
    }
}
