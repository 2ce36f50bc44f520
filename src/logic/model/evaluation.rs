//! Holdout Evaluation
//!
//! Failure-class metrics on the held-out split. A row counts as predicted
//! failing when its probability exceeds 0.5. Undefined ratios are 0.

use serde::{Deserialize, Serialize};

use crate::logic::features::{FeatureRow, FeatureVector};
use super::classifier::{FailureClassifier, ModelError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoldoutMetrics {
    pub test_rows: usize,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Failure rows in the test split
    pub support: usize,
}

impl HoldoutMetrics {
    pub fn summary(&self) -> String {
        format!(
            "accuracy={:.3} precision={:.3} recall={:.3} f1={:.3} support={}/{}",
            self.accuracy, self.precision, self.recall, self.f1, self.support, self.test_rows
        )
    }
}

pub fn evaluate_holdout<C: FailureClassifier>(model: &C, test: &[FeatureRow]) -> Result<HoldoutMetrics, ModelError> {
    let (mut tp, mut fp, mut tn, mut fn_) = (0usize, 0usize, 0usize, 0usize);

    for row in test {
        let p = model.predict_probability(&FeatureVector::from_row(row))?;
        match (p > 0.5, row.failed) {
            (true, true) => tp += 1,
            (true, false) => fp += 1,
            (false, false) => tn += 1,
            (false, true) => fn_ += 1,
        }
    }

    let ratio = |num: usize, den: usize| if den == 0 { 0.0 } else { num as f64 / den as f64 };
    let precision = ratio(tp, tp + fp);
    let recall = ratio(tp, tp + fn_);
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    Ok(HoldoutMetrics {
        test_rows: test.len(),
        accuracy: ratio(tp + tn, test.len()),
        precision,
        recall,
        f1,
        support: tp + fn_,
    })
}
