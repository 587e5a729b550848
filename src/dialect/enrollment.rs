//! Dialect enrollment.
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

use itertools::Itertools;
use log::{debug, info};

use super::ivector::LabelledIVector;
use crate::error::Error;

/// Weight of the development model in the interpolation.
pub const INTERPOLATION: f64 = 0.83;

/// Component-wise mean of equally sized vectors.
pub fn mean<'a, I>(vectors: I) -> Option<Result<Vec<f64>, Error>>
where
    I: IntoIterator<Item = &'a [f64]>,
{
    let mut vectors = vectors.into_iter();
    let mut sum = vectors.next()?.to_vec();
    let mut count = 1usize;

    for v in vectors {
        if v.len() != sum.len() {
            return Some(Err(Error::DimensionMismatch {
                expected: sum.len(),
                found: v.len(),
            }));
        }
        sum.iter_mut().zip(v).for_each(|(s, x)| *s += x);
        count += 1;
    }

    let count = count as f64;
    sum.iter_mut().for_each(|s| *s /= count);
    Some(Ok(sum))
}

/// `(1 - lambda) * train + lambda * dev`
pub fn interpolate(train: &[f64], dev: &[f64], lambda: f64) -> Result<Vec<f64>, Error> {
    if train.len() != dev.len() {
        return Err(Error::DimensionMismatch {
            expected: train.len(),
            found: dev.len(),
        });
    }
    Ok(train
        .iter()
        .zip(dev)
        .map(|(t, d)| (1.0 - lambda) * t + lambda * d)
        .collect())
}

fn dialect_mean(ivectors: &[LabelledIVector], dialect: &str) -> Result<Vec<f64>, Error> {
    mean(
        ivectors
            .iter()
            .filter(|v| v.dialect == dialect)
            .map(|v| v.ivector.as_slice()),
    )
    .unwrap_or_else(|| Err(Error::EmptyDialect(dialect.to_string())))
}

/// One model i-vector per dialect.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DialectModel {
    models: BTreeMap<String, Vec<f64>>,
}

impl DialectModel {
    /// Enroll each of `dialects` from training and development i-vectors.
    ///
    /// Every dialect needs at least one i-vector in each set.
    pub fn enroll<S: AsRef<str>>(
        train: &[LabelledIVector],
        dev: &[LabelledIVector],
        dialects: &[S],
        lambda: f64,
    ) -> Result<Self, Error> {
        let mut models = BTreeMap::new();
        for dialect in dialects {
            let dialect = dialect.as_ref();
            let train_model = dialect_mean(train, dialect)?;
            let dev_model = dialect_mean(dev, dialect)?;
            debug!("[{}] interpolating models (lambda = {})", dialect, lambda);
            models.insert(dialect.to_string(), interpolate(&train_model, &dev_model, lambda)?);
        }
        info!("enrolled {} dialects", models.len());
        Ok(Self { models })
    }

    pub fn get(&self, dialect: &str) -> Option<&[f64]> {
        self.models.get(dialect).map(Vec::as_slice)
    }

    pub fn dialects(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    pub(crate) fn models(&self) -> &BTreeMap<String, Vec<f64>> {
        &self.models
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// `<dialect> v1 v2 ...`, one dialect per line.
    pub fn write<W: Write>(&self, dst: &mut W) -> Result<(), Error> {
        for (dialect, model) in &self.models {
            writeln!(dst, "{} {}", dialect, model.iter().join(" "))?;
        }
        dst.flush()?;
        Ok(())
    }

    /// Read a model written by [DialectModel::write].
    pub fn read<R: BufRead>(src: R) -> Result<Self, Error> {
        let mut models = BTreeMap::new();
        for (idx, line) in src.lines().enumerate() {
            if let Some((dialect, model)) = super::parse_ivector_line(&line?, idx + 1)? {
                models.insert(dialect, model);
            }
        }
        Ok(Self { models })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ivec(dialect: &str, ivector: &[f64]) -> LabelledIVector {
        LabelledIVector {
            utterance_id: format!("{}_utt", dialect),
            dialect: dialect.to_string(),
            ivector: ivector.to_vec(),
        }
    }

    #[test]
    fn mean_of_vectors() {
        let a = [1.0, 2.0];
        let b = [3.0, 6.0];
        let m = mean(vec![&a[..], &b[..]]).unwrap().unwrap();
        assert_eq!(m, vec![2.0, 4.0]);

        assert!(mean(Vec::<&[f64]>::new()).is_none());
        let c = [1.0];
        assert!(matches!(
            mean(vec![&a[..], &c[..]]),
            Some(Err(Error::DimensionMismatch { expected: 2, found: 1 }))
        ));
    }

    #[test]
    fn interpolation() {
        let v = interpolate(&[0.0, 1.0], &[1.0, 1.0], 0.25).unwrap();
        assert_eq!(v, vec![0.25, 1.0]);
        assert!(interpolate(&[0.0], &[1.0, 1.0], 0.5).is_err());
    }

    #[test]
    fn enroll() {
        let train = vec![ivec("EGY", &[1.0, 0.0]), ivec("EGY", &[3.0, 0.0]), ivec("MSA", &[0.0, 1.0])];
        let dev = vec![ivec("EGY", &[0.0, 0.0]), ivec("MSA", &[0.0, 3.0])];
        let model = DialectModel::enroll(&train, &dev, &["EGY", "MSA"], 0.5).unwrap();

        assert_eq!(model.len(), 2);
        assert_eq!(model.get("EGY").unwrap(), &[1.0, 0.0]);
        assert_eq!(model.get("MSA").unwrap(), &[0.0, 2.0]);
        assert_eq!(model.dialects().collect::<Vec<_>>(), vec!["EGY", "MSA"]);
    }

    #[test]
    fn enroll_missing_dialect() {
        let train = vec![ivec("EGY", &[1.0])];
        let dev = vec![ivec("EGY", &[1.0])];
        let result = DialectModel::enroll(&train, &dev, &["EGY", "LAV"], INTERPOLATION);
        assert!(matches!(result, Err(Error::EmptyDialect(d)) if d == "LAV"));
    }

    #[test]
    fn write_then_read() {
        let train = vec![ivec("GLF", &[0.5, -1.5])];
        let model = DialectModel::enroll(&train, &train, &["GLF"], 0.5).unwrap();

        let mut out = Vec::new();
        model.write(&mut out).unwrap();
        assert_eq!(String::from_utf8(out.clone()).unwrap(), "GLF 0.5 -1.5\n");
        assert_eq!(DialectModel::read(out.as_slice()).unwrap(), model);
    }
}
