//! Reference-image matching used when no trained model is available.

use std::path::Path;

use crease_models::{ShotLabel, ShotPrediction};
use image::imageops::FilterType;
use image::{DynamicImage, GrayImage};
use imageproc::template_matching::{match_template, MatchTemplateMethod};
use tracing::{debug, warn};

use super::config::TemplateConfig;
use crate::error::{VisionError, VisionResult};

/// File names looked up by [`TemplateLibrary::load_dir`].
pub const TEMPLATE_FILES: [(ShotLabel, &str); 5] = [
    (ShotLabel::PullShot, "pull.gif"),
    (ShotLabel::CoverDrive, "cover.gif"),
    (ShotLabel::FlickShot, "flick.gif"),
    (ShotLabel::SweepShot, "sweep.gif"),
    (ShotLabel::HelicopterShot, "helicopter.gif"),
];

/// Grayscale reference images, one per stroke.
#[derive(Debug, Clone, Default)]
pub struct TemplateLibrary {
    config: TemplateConfig,
    templates: Vec<(ShotLabel, GrayImage)>,
}

impl TemplateLibrary {
    pub fn new(config: TemplateConfig) -> Self {
        Self {
            config,
            templates: Vec::new(),
        }
    }

    /// Load the known template files from `dir`.
    ///
    /// Missing or undecodable files are logged and skipped, so the result may
    /// be empty.
    pub fn load_dir(dir: impl AsRef<Path>, config: TemplateConfig) -> Self {
        let dir = dir.as_ref();
        let mut library = Self::new(config);

        for (label, file) in TEMPLATE_FILES {
            let path = dir.join(file);
            if !path.is_file() {
                warn!(path = %path.display(), shot = %label, "Template file not found");
                continue;
            }
            if let Err(e) = library.load_file(label, &path) {
                warn!(error = %e, shot = %label, "Skipping template");
            }
        }

        debug!(dir = %dir.display(), loaded = library.len(), "Templates loaded");
        library
    }

    /// Load one template image for `label`.
    pub fn load_file(&mut self, label: ShotLabel, path: impl AsRef<Path>) -> VisionResult<()> {
        let path = path.as_ref();
        // The first frame of an animated template is the reference.
        let image = image::open(path).map_err(|e| VisionError::template_load(path, e.to_string()))?;
        self.insert(label, &image);
        Ok(())
    }

    /// Add or replace the template for `label`.
    pub fn insert(&mut self, label: ShotLabel, image: &DynamicImage) {
        let prepared = self.prepare(image);
        match self.templates.iter_mut().find(|(l, _)| *l == label) {
            Some(slot) => slot.1 = prepared,
            None => self.templates.push((label, prepared)),
        }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = ShotLabel> + '_ {
        self.templates.iter().map(|(label, _)| *label)
    }

    /// Best match over all frames and templates.
    ///
    /// Only a strictly better similarity than the current best (starting at
    /// zero) is taken, so no positive correlation anywhere means unknown.
    pub fn classify(&self, frames: &[DynamicImage]) -> ShotPrediction {
        let mut best = ShotPrediction::unknown();
        if self.templates.is_empty() {
            return best;
        }

        for frame in frames {
            if frame.width() == 0 || frame.height() == 0 {
                continue;
            }
            let candidate = self.prepare(frame);
            for (label, template) in &self.templates {
                let similarity = normalized_correlation(&candidate, template);
                if similarity > best.confidence {
                    best = ShotPrediction::new(*label, similarity);
                }
            }
        }
        best
    }

    fn prepare(&self, image: &DynamicImage) -> GrayImage {
        let side = self.config.side.max(1);
        image.resize_exact(side, side, FilterType::Triangle).to_luma8()
    }
}

/// Zero-mean normalized cross-correlation of two equally sized images.
///
/// The cross term comes from template matching at the single aligned
/// offset; the per-image sums are exact. A flat image has no defined
/// correlation and scores 0.
pub fn normalized_correlation(a: &GrayImage, b: &GrayImage) -> f64 {
    if a.dimensions() != b.dimensions() || a.as_raw().is_empty() {
        return 0.0;
    }
    let n = a.as_raw().len() as f64;

    let cross = match_template(a, b, MatchTemplateMethod::CrossCorrelation).get_pixel(0, 0)[0] as f64;
    let (sum_a, sq_a) = sums(a);
    let (sum_b, sq_b) = sums(b);

    let num = cross - sum_a * sum_b / n;
    let var_a = sq_a - sum_a * sum_a / n;
    let var_b = sq_b - sum_b * sum_b / n;

    let den = (var_a * var_b).sqrt();
    if den <= f64::EPSILON {
        0.0
    } else {
        (num / den).clamp(-1.0, 1.0)
    }
}

fn sums(image: &GrayImage) -> (f64, f64) {
    let (sum, sq) = image.as_raw().iter().fold((0u64, 0u64), |(s, q), &v| {
        let v = v as u64;
        (s + v, q + v * v)
    });
    (sum as f64, sq as f64)
}
