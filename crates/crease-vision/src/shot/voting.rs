//! Combining per-frame predictions into one label.

use crease_models::{ShotLabel, ShotPrediction};

/// Weighted vote over per-frame `(label, confidence)` predictions.
///
/// Each label scores `(votes / total) * mean_confidence`; the top score wins
/// and is also the reported confidence. Ties go to the label seen first.
pub fn aggregate_votes(predictions: &[(ShotLabel, f64)]) -> ShotPrediction {
    if predictions.is_empty() {
        return ShotPrediction::unknown();
    }

    // (label, votes, confidence sum) in first-seen order
    let mut tally: Vec<(ShotLabel, usize, f64)> = Vec::new();
    for &(label, confidence) in predictions {
        match tally.iter_mut().find(|(l, _, _)| *l == label) {
            Some(entry) => {
                entry.1 += 1;
                entry.2 += confidence;
            }
            None => tally.push((label, 1, confidence)),
        }
    }

    let total = predictions.len() as f64;
    let mut best = ShotPrediction::unknown();
    let mut best_score = f64::NEG_INFINITY;
    for (label, votes, sum) in tally {
        let score = (votes as f64 / total) * (sum / votes as f64);
        if score > best_score {
            best_score = score;
            best = ShotPrediction::new(label, score);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_beats_single_high_confidence() {
        let votes = [
            (ShotLabel::CoverDrive, 0.9),
            (ShotLabel::CoverDrive, 0.9),
            (ShotLabel::PullShot, 0.99),
        ];
        let result = aggregate_votes(&votes);
        assert_eq!(result.label, ShotLabel::CoverDrive);
        assert!((result.confidence - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_empty_is_unknown() {
        assert_eq!(aggregate_votes(&[]), ShotPrediction::unknown());
    }

    #[test]
    fn test_tie_keeps_first_seen() {
        let votes = [(ShotLabel::SweepShot, 0.5), (ShotLabel::FlickShot, 0.5)];
        assert_eq!(aggregate_votes(&votes).label, ShotLabel::SweepShot);
    }
}
