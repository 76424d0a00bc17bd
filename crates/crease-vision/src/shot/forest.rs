//! Bagged ensemble of Gini decision trees.
//!
//! Each tree is grown on a bootstrap sample with a random feature subset
//! tried at every split. Tree seeds derive from the configured seed, so a
//! given dataset and config always produce the same forest regardless of
//! how rayon schedules the work.

use ndarray::{Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::ForestConfig;
use crate::error::{VisionError, VisionResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum Node {
    Leaf {
        /// Class probabilities at this leaf.
        distribution: Vec<f32>,
    },
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    fn distribution(&self, sample: ArrayView1<f32>) -> &[f32] {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf { distribution } => return distribution,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if sample[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

/// Shared, read-only state while growing one tree.
struct Grower<'a> {
    samples: &'a Array2<f32>,
    labels: &'a [usize],
    n_classes: usize,
    config: &'a ForestConfig,
    features_per_split: usize,
}

impl Grower<'_> {
    fn grow(&self, rng: &mut StdRng) -> DecisionTree {
        let n = self.samples.nrows();
        let mut indices: Vec<usize> = (0..n).map(|_| rng.random_range(0..n)).collect();
        let mut nodes = Vec::new();
        self.build(&mut indices, 0, rng, &mut nodes);
        DecisionTree { nodes }
    }

    /// Append the subtree for `indices` and return its root.
    fn build(&self, indices: &mut [usize], depth: usize, rng: &mut StdRng, nodes: &mut Vec<Node>) -> usize {
        let counts = self.class_counts(indices);
        let id = nodes.len();

        let pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
        let too_deep = self.config.max_depth.is_some_and(|max| depth >= max);
        let too_small = indices.len() < self.config.min_samples_split;

        let split = if pure || too_deep || too_small {
            None
        } else {
            self.best_split(indices, &counts, rng)
        };

        let Some((feature, threshold)) = split else {
            nodes.push(leaf(&counts));
            return id;
        };

        // A midpoint rounded onto a neighbouring value can leave one side empty.
        let mid = partition(indices, |&i| self.samples[[i, feature]] <= threshold);
        if mid == 0 || mid == indices.len() {
            nodes.push(leaf(&counts));
            return id;
        }

        // Placeholder until both children are known.
        nodes.push(Node::Leaf {
            distribution: Vec::new(),
        });

        let (left_indices, right_indices) = indices.split_at_mut(mid);
        let left = self.build(left_indices, depth + 1, rng, nodes);
        let right = self.build(right_indices, depth + 1, rng, nodes);

        nodes[id] = Node::Split {
            feature,
            threshold,
            left,
            right,
        };
        id
    }

    fn class_counts(&self, indices: &[usize]) -> Vec<usize> {
        let mut counts = vec![0; self.n_classes];
        for &i in indices {
            counts[self.labels[i]] += 1;
        }
        counts
    }

    fn best_split(&self, indices: &[usize], counts: &[usize], rng: &mut StdRng) -> Option<(usize, f32)> {
        let n_features = self.samples.ncols();
        let parent = gini(counts, indices.len());
        let mut best: Option<(usize, f32, f32)> = None;

        let candidates = rand::seq::index::sample(rng, n_features, self.features_per_split);
        let mut values: Vec<(f32, usize)> = Vec::with_capacity(indices.len());

        for feature in candidates.iter() {
            values.clear();
            values.extend(indices.iter().map(|&i| (self.samples[[i, feature]], self.labels[i])));
            values.sort_by(|a, b| a.0.total_cmp(&b.0));

            let lo = values[0].0;
            let hi = values[values.len() - 1].0;
            if lo == hi {
                continue;
            }

            // Evenly spaced cut points over the sorted values.
            let n = values.len();
            let steps = self.config.max_thresholds.max(1).min(n - 1);
            let mut left_counts = vec![0usize; self.n_classes];
            let mut taken = 0;

            for step in 1..=steps {
                let cut = step * n / (steps + 1);
                let cut = cut.clamp(1, n - 1);
                while taken < cut {
                    left_counts[values[taken].1] += 1;
                    taken += 1;
                }
                // Advance past ties so the threshold separates distinct values.
                while taken < n && values[taken].0 == values[taken - 1].0 {
                    left_counts[values[taken].1] += 1;
                    taken += 1;
                }
                if taken >= n {
                    break;
                }

                let right_counts: Vec<usize> =
                    counts.iter().zip(&left_counts).map(|(t, l)| t - l).collect();
                let n_left = taken;
                let n_right = n - taken;
                let weighted = (n_left as f32 * gini(&left_counts, n_left)
                    + n_right as f32 * gini(&right_counts, n_right))
                    / n as f32;
                let gain = parent - weighted;

                if gain > 0.0 && best.map_or(true, |(_, _, g)| gain > g) {
                    let threshold = (values[taken - 1].0 + values[taken].0) / 2.0;
                    best = Some((feature, threshold, gain));
                }
            }
        }

        best.map(|(feature, threshold, _)| (feature, threshold))
    }
}

fn gini(counts: &[usize], total: usize) -> f32 {
    if total == 0 {
        return 0.0;
    }
    let total = total as f32;
    1.0 - counts.iter().map(|&c| (c as f32 / total).powi(2)).sum::<f32>()
}

fn leaf(counts: &[usize]) -> Node {
    let total: usize = counts.iter().sum();
    let distribution = counts
        .iter()
        .map(|&c| if total > 0 { c as f32 / total as f32 } else { 0.0 })
        .collect();
    Node::Leaf { distribution }
}

/// Reorder so matching items come first; returns how many matched.
fn partition<T, F: Fn(&T) -> bool>(items: &mut [T], pred: F) -> usize {
    let mut next = 0;
    for i in 0..items.len() {
        if pred(&items[i]) {
            items.swap(i, next);
            next += 1;
        }
    }
    next
}

/// A trained random forest classifier over dense `f32` features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    n_classes: usize,
    n_features: usize,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Fit on `samples` (one row per sample) with class indices `labels`.
    pub fn fit(
        samples: &Array2<f32>,
        labels: &[usize],
        n_classes: usize,
        config: &ForestConfig,
    ) -> VisionResult<Self> {
        if samples.nrows() == 0 || samples.ncols() == 0 || n_classes == 0 {
            return Err(VisionError::NoTrainingData);
        }
        if labels.len() != samples.nrows() {
            return Err(VisionError::dimension_mismatch(samples.nrows(), labels.len()));
        }
        if let Some(&bad) = labels.iter().find(|&&l| l >= n_classes) {
            return Err(VisionError::feature_extraction(format!(
                "label index {} out of range for {} classes",
                bad, n_classes
            )));
        }

        let grower = Grower {
            samples,
            labels,
            n_classes,
            config,
            features_per_split: config.features_per_split(samples.ncols()),
        };

        let trees: Vec<DecisionTree> = (0..config.n_trees.max(1))
            .into_par_iter()
            .map(|i| {
                let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(i as u64));
                grower.grow(&mut rng)
            })
            .collect();

        debug!(
            trees = trees.len(),
            samples = samples.nrows(),
            features = samples.ncols(),
            "Random forest fitted"
        );

        Ok(Self {
            n_classes,
            n_features: samples.ncols(),
            trees,
        })
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Mean class probabilities across trees.
    pub fn predict_proba(&self, sample: ArrayView1<f32>) -> VisionResult<Vec<f32>> {
        if sample.len() != self.n_features {
            return Err(VisionError::dimension_mismatch(self.n_features, sample.len()));
        }
        let mut proba = vec![0f32; self.n_classes];
        for tree in &self.trees {
            for (p, d) in proba.iter_mut().zip(tree.distribution(sample)) {
                *p += d;
            }
        }
        let n = self.trees.len().max(1) as f32;
        proba.iter_mut().for_each(|p| *p /= n);
        Ok(proba)
    }

    /// Most probable class and its probability. Ties go to the lower index.
    pub fn predict(&self, sample: ArrayView1<f32>) -> VisionResult<(usize, f32)> {
        let proba = self.predict_proba(sample)?;
        let best = proba
            .iter()
            .enumerate()
            .fold((0, f32::MIN), |best, (i, &p)| if p > best.1 { (i, p) } else { best });
        Ok(best)
    }
}
