//! Offline classifier training from a labeled image directory.
//!
//! The dataset layout is `<dir>/<label>/*.{jpg,jpeg,png}`, with label
//! directories named like the stroke (`cover_drive`, `pull`, ...).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crease_models::ShotLabel;
use crease_vision::{ShotClassifier, ShotClassifierConfig};
use image::DynamicImage;
use tracing::{debug, info, warn};

use crate::error::{WorkerError, WorkerResult};

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Read every labeled image under `dir`.
///
/// Directories that do not name a stroke and images that fail to decode are
/// logged and skipped.
pub fn load_dataset(dir: impl AsRef<Path>) -> WorkerResult<BTreeMap<ShotLabel, Vec<DynamicImage>>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(WorkerError::invalid_input(format!(
            "dataset directory not found: {}",
            dir.display()
        )));
    }

    let mut dataset: BTreeMap<ShotLabel, Vec<DynamicImage>> = BTreeMap::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        let label: ShotLabel = match name.parse() {
            Ok(label) => label,
            Err(_) => {
                warn!(dir = %path.display(), "Skipping directory that names no stroke");
                continue;
            }
        };

        let mut files: Vec<_> = fs::read_dir(&path)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| has_image_extension(p))
            .collect();
        files.sort();

        let images = dataset.entry(label).or_default();
        for file in files {
            match image::open(&file) {
                Ok(image) => images.push(image),
                Err(e) => warn!(path = %file.display(), error = %e, "Skipping unreadable image"),
            }
        }
        debug!(shot = %label, images = images.len(), "Label loaded");
    }

    dataset.retain(|_, images| !images.is_empty());
    Ok(dataset)
}

/// Train a classifier on the dataset under `dataset_dir` and save it to `model_path`.
///
/// Returns the number of training samples.
pub fn train_from_dir(
    dataset_dir: impl AsRef<Path>,
    model_path: impl AsRef<Path>,
    config: ShotClassifierConfig,
) -> WorkerResult<usize> {
    let dataset = load_dataset(&dataset_dir)?;
    info!(
        labels = dataset.len(),
        images = dataset.values().map(Vec::len).sum::<usize>(),
        "Training dataset loaded"
    );

    let mut classifier = ShotClassifier::new(config);
    let samples = classifier.train(&dataset)?;
    classifier.save_model(&model_path)?;
    Ok(samples)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crease_vision::ForestConfig;
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    fn write_image(path: &Path, shade: u8) {
        let image = RgbImage::from_fn(32, 32, |x, _| if x < 16 { Rgb([shade; 3]) } else { Rgb([255 - shade; 3]) });
        image.save(path).unwrap();
    }

    #[test]
    fn test_load_dataset_reads_labeled_dirs() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("pull_shot")).unwrap();
        fs::create_dir(tmp.path().join("cover")).unwrap();
        fs::create_dir(tmp.path().join("not_a_shot")).unwrap();
        write_image(&tmp.path().join("pull_shot/a.png"), 10);
        write_image(&tmp.path().join("pull_shot/b.png"), 20);
        write_image(&tmp.path().join("cover/a.png"), 200);
        write_image(&tmp.path().join("not_a_shot/a.png"), 100);
        fs::write(tmp.path().join("pull_shot/notes.txt"), "ignored").unwrap();

        let dataset = load_dataset(tmp.path()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset[&ShotLabel::PullShot].len(), 2);
        assert_eq!(dataset[&ShotLabel::CoverDrive].len(), 1);
    }

    #[test]
    fn test_missing_dataset_dir() {
        let tmp = TempDir::new().unwrap();
        let err = load_dataset(tmp.path().join("nope")).unwrap_err();
        assert!(matches!(err, WorkerError::InvalidInput(_)));
    }

    #[test]
    fn test_train_from_dir_saves_model() {
        let tmp = TempDir::new().unwrap();
        for (label, shade) in [("pull_shot", 10u8), ("sweep_shot", 220u8)] {
            fs::create_dir(tmp.path().join(label)).unwrap();
            for i in 0..3 {
                write_image(&tmp.path().join(label).join(format!("{i}.png")), shade + i);
            }
        }
        let model = tmp.path().join("model.json");
        let config = ShotClassifierConfig::default().with_forest(ForestConfig::default().with_trees(5));

        let samples = train_from_dir(tmp.path(), &model, config).unwrap();
        assert_eq!(samples, 6);
        assert!(model.is_file());

        let mut reloaded = ShotClassifier::default();
        reloaded.load_model(&model).unwrap();
        assert!(reloaded.is_trained());
    }

    #[test]
    fn test_empty_dataset_fails_training() {
        let tmp = TempDir::new().unwrap();
        let err = train_from_dir(tmp.path(), tmp.path().join("model.json"), ShotClassifierConfig::default())
            .unwrap_err();
        assert!(matches!(err, WorkerError::Vision(_)));
    }
}
