//! Configuration for shot classification.

use serde::{Deserialize, Serialize};

/// Per-frame feature extraction parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureConfig {
    /// Side of the square grayscale image features are computed on (default: 128)
    pub resize: u32,

    // === Gradient histogram ===
    pub cell_size: u32,
    pub block_size: u32,
    pub block_stride: u32,
    pub orientation_bins: usize,

    /// Intensity histogram bins (default: 32)
    pub intensity_bins: usize,

    /// Relative spread of the hysteresis thresholds around the median intensity (default: 0.33)
    pub edge_sigma: f32,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            resize: 128,
            cell_size: 8,
            block_size: 16,
            block_stride: 8,
            orientation_bins: 9,
            intensity_bins: 32,
            edge_sigma: 0.33,
        }
    }
}

impl FeatureConfig {
    /// Number of gradient histogram values.
    pub fn hog_len(&self) -> usize {
        let cells_per_block = (self.block_size / self.cell_size) as usize;
        let blocks = self.blocks_per_side();
        blocks * blocks * cells_per_block * cells_per_block * self.orientation_bins
    }

    pub(crate) fn blocks_per_side(&self) -> usize {
        if self.resize < self.block_size || self.block_stride == 0 {
            return 0;
        }
        ((self.resize - self.block_size) / self.block_stride + 1) as usize
    }

    /// Total feature vector length: gradient histogram, edge map, intensity histogram.
    pub fn feature_len(&self) -> usize {
        let side = self.resize as usize;
        self.hog_len() + side * side + self.intensity_bins
    }
}

/// Random forest hyperparameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees (default: 100)
    pub n_trees: usize,

    /// Seed for bootstrap sampling and feature subsets (default: 42)
    pub seed: u64,

    /// Maximum tree depth, unlimited when `None`
    pub max_depth: Option<usize>,

    /// Smallest node that may still be split (default: 2)
    pub min_samples_split: usize,

    /// Features tried per split; `None` means the square root of the dimension
    pub max_features: Option<usize>,

    /// Candidate thresholds tried per feature (default: 16)
    pub max_thresholds: usize,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            seed: 42,
            max_depth: None,
            min_samples_split: 2,
            max_features: None,
            max_thresholds: 16,
        }
    }
}

impl ForestConfig {
    pub fn with_trees(mut self, n_trees: usize) -> Self {
        self.n_trees = n_trees.max(1);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub(crate) fn features_per_split(&self, dimension: usize) -> usize {
        self.max_features
            .unwrap_or_else(|| (dimension as f64).sqrt().round() as usize)
            .clamp(1, dimension.max(1))
    }
}

/// Template matching parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Side of the square grayscale templates and resized input frames (default: 64)
    pub side: u32,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self { side: 64 }
    }
}

/// Top-level classifier configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShotClassifierConfig {
    pub features: FeatureConfig,
    pub forest: ForestConfig,
    pub templates: TemplateConfig,
}

impl ShotClassifierConfig {
    pub fn with_forest(mut self, forest: ForestConfig) -> Self {
        self.forest = forest;
        self
    }

    pub fn with_features(mut self, features: FeatureConfig) -> Self {
        self.features = features;
        self
    }
}
