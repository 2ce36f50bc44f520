//! Balanced Forest - bagged decision trees
//!
//! Each tree is fit on a class-balanced bootstrap: half the draws come from
//! failure rows, half from healthy rows, both with replacement. The failure
//! probability is the mean of the trees' class-1 leaf probabilities.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::tree::decision_tree_classifier::{
    DecisionTreeClassifier, DecisionTreeClassifierParameters, SplitCriterion,
};

use crate::logic::features::{FeatureRow, FeatureVector, FEATURE_COUNT};
use super::classifier::{checked_probability, FailureClassifier, ModelError, ModelMetadata, TrainingError};

type Tree = DecisionTreeClassifier<f64, u32, DenseMatrix<f64>, Vec<u32>>;

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestConfig {
    pub n_trees: u16,
    /// Unlimited when None
    pub max_depth: Option<u16>,
    pub min_samples_leaf: usize,
    pub min_samples_split: usize,
    /// Base seed; tree `i` draws with `seed + i`
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: crate::constants::DEFAULT_FOREST_TREES,
            max_depth: None,
            min_samples_leaf: 1,
            min_samples_split: 2,
            seed: crate::constants::DEFAULT_MODEL_SEED,
        }
    }
}

impl ForestConfig {
    fn tree_parameters(&self, tree: u64) -> DecisionTreeClassifierParameters {
        DecisionTreeClassifierParameters {
            criterion: SplitCriterion::Gini,
            max_depth: self.max_depth,
            min_samples_leaf: self.min_samples_leaf.max(1),
            min_samples_split: self.min_samples_split.max(2),
            seed: Some(self.seed.wrapping_add(tree)),
        }
    }
}

// ============================================================================
// FOREST
// ============================================================================

pub struct BalancedForest {
    trees: Vec<Tree>,
    metadata: ModelMetadata,
}

impl std::fmt::Debug for BalancedForest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BalancedForest")
            .field("trees", &self.trees.len())
            .field("metadata", &self.metadata)
            .finish()
    }
}

impl BalancedForest {
    /// Fit on feature rows, predicting `failed`
    pub fn fit(rows: &[FeatureRow], config: &ForestConfig) -> Result<Self, TrainingError> {
        if rows.is_empty() {
            return Err(TrainingError::EmptyTrainingSet);
        }

        let samples: Vec<Vec<f64>> = rows.iter().map(|r| FeatureVector::from_row(r).as_slice().to_vec()).collect();
        let labels: Vec<u32> = rows.iter().map(FeatureRow::label).collect();
        Self::fit_samples(&samples, &labels, config)
    }

    /// Fit on raw vectors and 0/1 labels
    pub fn fit_samples(samples: &[Vec<f64>], labels: &[u32], config: &ForestConfig) -> Result<Self, TrainingError> {
        if samples.is_empty() || samples.len() != labels.len() {
            return Err(TrainingError::EmptyTrainingSet);
        }

        let positives: Vec<usize> = (0..labels.len()).filter(|&i| labels[i] == 1).collect();
        let negatives: Vec<usize> = (0..labels.len()).filter(|&i| labels[i] != 1).collect();
        if positives.is_empty() || negatives.is_empty() {
            return Err(TrainingError::DegenerateLabels {
                positives: positives.len(),
                negatives: negatives.len(),
            });
        }

        let per_class = (samples.len() / 2).max(1);
        let n_trees = config.n_trees.max(1);
        let mut trees = Vec::with_capacity(n_trees as usize);

        for t in 0..n_trees as u64 {
            let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(t));
            let mut x = Vec::with_capacity(per_class * 2);
            let mut y = Vec::with_capacity(per_class * 2);

            for (class, pool) in [(0u32, &negatives), (1u32, &positives)] {
                for _ in 0..per_class {
                    let i = pool[rng.gen_range(0..pool.len())];
                    x.push(samples[i].clone());
                    y.push(class);
                }
            }

            let matrix = DenseMatrix::from_2d_vec(&x).map_err(|e| TrainingError::Fit(e.to_string()))?;
            let tree = Tree::fit(&matrix, &y, config.tree_parameters(t))
                .map_err(|e| TrainingError::Fit(e.to_string()))?;
            trees.push(tree);
        }

        log::debug!(
            "Fitted {} trees on {} rows ({} failures, {} per class per bootstrap)",
            trees.len(),
            samples.len(),
            positives.len(),
            per_class
        );

        Ok(Self {
            trees,
            metadata: ModelMetadata {
                model_type: "balanced_forest".to_string(),
                n_trees: n_trees as usize,
                features: FEATURE_COUNT,
                layout_hash: crate::logic::features::layout_hash(),
                training_rows: samples.len(),
                positives: positives.len(),
                trained_at: chrono::Utc::now(),
            },
        })
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Mean class-1 probability over all trees for one raw sample
    pub fn probability_for(&self, sample: &[f64]) -> Result<f64, ModelError> {
        let matrix = DenseMatrix::from_2d_vec(&vec![sample.to_vec()])
            .map_err(|e| ModelError::Prediction(e.to_string()))?;

        let mut total = 0.0;
        for tree in &self.trees {
            let proba = tree
                .predict_proba(&matrix)
                .map_err(|e| ModelError::Prediction(e.to_string()))?;
            let (_, classes) = proba.shape();
            if classes < 2 {
                return Err(ModelError::Prediction(format!("tree saw {} class(es)", classes)));
            }
            total += *proba.get((0, 1));
        }

        checked_probability(total / self.trees.len().max(1) as f64)
    }
}

impl FailureClassifier for BalancedForest {
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        if !features.is_compatible() || features.layout_hash != self.metadata.layout_hash {
            return Err(ModelError::IncompatibleLayout {
                version: features.version,
                hash: features.layout_hash,
            });
        }
        self.probability_for(features.as_slice())
    }
}
