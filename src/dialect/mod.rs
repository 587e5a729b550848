/*! Dialect identification from i-vectors.

Each dialect is enrolled as the mean i-vector of its training utterances, interpolated with the mean of its development utterances.
Test utterances are labelled with the dialect whose model is the closest in cosine similarity.
!*/
mod enrollment;
mod ivector;
mod scoring;

pub use enrollment::{interpolate, mean, DialectModel, INTERPOLATION};
pub use ivector::{parse_ivector_line, read_ivector_set, read_ivectors, LabelledIVector, DIALECTS};
pub use scoring::{cosine_similarity, evaluate, Evaluation, Prediction};
