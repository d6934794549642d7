//! Scoring parameters.
//!
//! `theta` is the exponent on the normalized motif metric and `lambda[s]` the
//! weight of size-`s` motif participation in the correction term. All values
//! live in [0, 1].

use crate::error::{Error, Result};
use crate::motif::MIN_MOTIF_SIZE;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// `theta` plus one `lambda` per clique size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterVector {
    /// Exponent applied to the normalized motif degree / strength.
    pub theta: f64,
    /// Per-size participation weight, keyed by clique size.
    pub lambda: BTreeMap<usize, f64>,
}

impl ParameterVector {
    /// Validated constructor.
    ///
    /// # Errors
    ///
    /// `Error::InvalidParameter` if any value is outside [0, 1] (or NaN) or any
    /// size is outside `[3, max_clique]`.
    pub fn new(theta: f64, lambda: BTreeMap<usize, f64>, max_clique: usize) -> Result<Self> {
        check_unit("theta", theta)?;
        for (&size, &value) in &lambda {
            if size < MIN_MOTIF_SIZE || size > max_clique {
                return Err(Error::InvalidParameter(format!(
                    "lambda size {size} outside [{MIN_MOTIF_SIZE}, {max_clique}]"
                )));
            }
            check_unit(&format!("lambda[{size}]"), value)?;
        }
        Ok(Self { theta, lambda })
    }

    /// The default: theta = 1 and lambda = 1 for every size in `[3, max_clique]`.
    #[must_use]
    pub fn uniform(max_clique: usize) -> Self {
        Self {
            theta: 1.0,
            lambda: (MIN_MOTIF_SIZE..=max_clique).map(|s| (s, 1.0)).collect(),
        }
    }

    /// Number of free coordinates for a given `max_clique`: theta plus one per size.
    #[must_use]
    pub fn dimensions(max_clique: usize) -> usize {
        1 + max_clique.saturating_sub(MIN_MOTIF_SIZE - 1)
    }

    /// Map a point of the unit cube to parameters.
    ///
    /// Coordinate 0 is theta; coordinate `i` is `lambda[i + 2]`. Values are
    /// clamped to [0, 1].
    ///
    /// # Errors
    ///
    /// `Error::InvalidParameter` if `point` has the wrong length.
    pub fn from_point(point: &[f64], max_clique: usize) -> Result<Self> {
        let dims = Self::dimensions(max_clique);
        if point.len() != dims {
            return Err(Error::InvalidParameter(format!(
                "expected {dims} coordinates, got {}",
                point.len()
            )));
        }
        let lambda = point[1..]
            .iter()
            .enumerate()
            .map(|(i, &v)| (i + MIN_MOTIF_SIZE, v.clamp(0.0, 1.0)))
            .collect();
        Ok(Self {
            theta: point[0].clamp(0.0, 1.0),
            lambda,
        })
    }

    /// Inverse of [`from_point`](Self::from_point). Missing sizes map to 0.
    #[must_use]
    pub fn to_point(&self, max_clique: usize) -> Vec<f64> {
        std::iter::once(self.theta)
            .chain((MIN_MOTIF_SIZE..=max_clique).map(|s| self.lambda(s)))
            .collect()
    }

    /// `lambda[size]`, or 0 when the size has no coefficient.
    pub fn lambda(&self, size: usize) -> f64 {
        self.lambda.get(&size).copied().unwrap_or(0.0)
    }
}

impl fmt::Display for ParameterVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "theta={:.4}", self.theta)?;
        for (size, value) in &self.lambda {
            write!(f, " lambda_{size}={value:.4}")?;
        }
        Ok(())
    }
}

fn check_unit(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidParameter(format!(
            "{name} = {value} outside [0, 1]"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_default() {
        let p = ParameterVector::uniform(5);
        assert_eq!(p.theta, 1.0);
        assert_eq!(p.lambda.keys().copied().collect::<Vec<_>>(), vec![3, 4, 5]);
        assert!(p.lambda.values().all(|&v| v == 1.0));
    }

    #[test]
    fn test_uniform_without_motif_sizes() {
        let p = ParameterVector::uniform(2);
        assert!(p.lambda.is_empty());
        assert_eq!(ParameterVector::dimensions(2), 1);
        assert_eq!(ParameterVector::dimensions(0), 1);
    }

    #[test]
    fn test_validation() {
        let ok = ParameterVector::new(0.5, BTreeMap::from([(3, 0.2)]), 4);
        assert!(ok.is_ok());

        let bad_theta = ParameterVector::new(1.5, BTreeMap::new(), 4);
        assert!(matches!(bad_theta, Err(Error::InvalidParameter(_))));

        let bad_size = ParameterVector::new(0.5, BTreeMap::from([(5, 0.2)]), 4);
        assert!(matches!(bad_size, Err(Error::InvalidParameter(_))));

        let nan = ParameterVector::new(0.5, BTreeMap::from([(3, f64::NAN)]), 4);
        assert!(nan.is_err());
    }

    #[test]
    fn test_point_mapping() {
        let p = ParameterVector::from_point(&[0.25, 0.5, 0.75], 4).unwrap();
        assert_eq!(p.theta, 0.25);
        assert_eq!(p.lambda(3), 0.5);
        assert_eq!(p.lambda(4), 0.75);
        assert_eq!(p.lambda(7), 0.0);
        assert_eq!(p.to_point(4), vec![0.25, 0.5, 0.75]);

        assert!(ParameterVector::from_point(&[0.1], 4).is_err());
    }

    #[test]
    fn test_serde_and_display() {
        let p = ParameterVector::uniform(3);
        let json = serde_json::to_string(&p).unwrap();
        let back: ParameterVector = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
        assert_eq!(p.to_string(), "theta=1.0000 lambda_3=1.0000");
    }
}
