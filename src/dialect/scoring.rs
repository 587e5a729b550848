//! Cosine scoring of i-vectors against dialect models.
use log::info;
use rayon::prelude::*;
use serde::Serialize;

use super::enrollment::DialectModel;
use super::ivector::LabelledIVector;
use crate::error::Error;

/// Cosine similarity of two vectors of the same dimension.
///
/// Zero vectors have a similarity of 0 with anything.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let (dot, norm_a, norm_b) = a
        .iter()
        .zip(b)
        .fold((0.0, 0.0, 0.0), |(dot, na, nb), (x, y)| {
            (dot + x * y, na + x * x, nb + y * y)
        });

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

impl DialectModel {
    /// Dialect whose model is the most similar to `ivector`, with its similarity.
    ///
    /// Returns `Ok(None)` if the model is empty.
    pub fn predict(&self, ivector: &[f64]) -> Result<Option<(&str, f64)>, Error> {
        let mut best: Option<(&str, f64)> = None;
        for (dialect, model) in self.models() {
            if model.len() != ivector.len() {
                return Err(Error::DimensionMismatch {
                    expected: model.len(),
                    found: ivector.len(),
                });
            }
            let score = cosine_similarity(model, ivector);
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((dialect.as_str(), score));
            }
        }
        Ok(best)
    }
}

/// A scored test utterance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub utterance_id: String,
    pub dialect: String,
    pub predicted: String,
    pub score: f64,
}

impl Prediction {
    pub fn is_correct(&self) -> bool {
        self.dialect == self.predicted
    }
}

/// Predictions over a labelled test set.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub predictions: Vec<Prediction>,
}

impl Evaluation {
    pub fn correct(&self) -> usize {
        self.predictions.iter().filter(|p| p.is_correct()).count()
    }

    /// Share of correct predictions. 0 on an empty test set.
    pub fn accuracy(&self) -> f64 {
        if self.predictions.is_empty() {
            return 0.0;
        }
        self.correct() as f64 / self.predictions.len() as f64
    }
}

/// Predict the dialect of every test i-vector, in parallel.
pub fn evaluate(model: &DialectModel, test: &[LabelledIVector]) -> Result<Evaluation, Error> {
    if model.is_empty() {
        return Err(Error::Custom("cannot score against an empty model".to_string()));
    }

    let predictions = test
        .par_iter()
        .map(|ivec| -> Result<Prediction, Error> {
            let (predicted, score) = model
                .predict(&ivec.ivector)?
                .ok_or_else(|| Error::Custom("empty model".to_string()))?;
            Ok(Prediction {
                utterance_id: ivec.utterance_id.clone(),
                dialect: ivec.dialect.clone(),
                predicted: predicted.to_string(),
                score,
            })
        })
        .collect::<Result<Vec<Prediction>, Error>>()?;

    let evaluation = Evaluation { predictions };
    info!(
        "{}/{} correct predictions (accuracy {:.4})",
        evaluation.correct(),
        evaluation.predictions.len(),
        evaluation.accuracy()
    );
    Ok(evaluation)
}
