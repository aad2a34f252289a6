//! Random portfolio-weight generation under two constraint regimes.
//!
//! Both regimes guarantee that generated weights sum to 1:
//!
//! - **ShortsAllowed**: the first N−1 weights are uniform on [−1, 1] and the
//!   last weight balances the sum. The balancing weight is intentionally
//!   unbounded and may fall outside [−1, 1].
//! - **LongOnly**: N weights uniform on [0, 1], normalized by their sum, so
//!   every weight is non-negative.
//!
//! Draws are strictly sequential per call, so a batch is bit-for-bit
//! reproducible from its seed.

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Tolerance on the sum-to-1 invariant.
const SUM_TOLERANCE: f64 = 1e-9;

/// Sum below which a long-only draw cannot be normalized.
const DEGENERATE_SUM: f64 = 1e-12;

/// Errors raised during weight generation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeightError {
    /// A portfolio needs at least one asset.
    #[error("cannot generate weights for zero assets")]
    NoAssets,

    /// All long-only draws were ~0, so the weights cannot be normalized.
    #[error("degenerate long-only draw: weight sum {sum} is too close to zero")]
    DegenerateDraw {
        /// Sum of the raw draws
        sum: f64,
    },

    /// Raw components handed to [`WeightVector::new`] do not sum to 1.
    #[error("weights sum to {sum}, expected 1 within tolerance")]
    UnnormalizedSum {
        /// Sum of the supplied components
        sum: f64,
    },
}

/// Constraint regime for a batch of generated weight vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Weights are unconstrained in sign; short positions allowed.
    ShortsAllowed,
    /// All weights are non-negative.
    LongOnly,
}

impl Regime {
    /// Stable label used in exported datasets.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ShortsAllowed => "shorts_allowed",
            Self::LongOnly => "long_only",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A portfolio allocation whose components always sum to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightVector(Array1<f64>);

impl WeightVector {
    /// Wrap raw components, enforcing the sum-to-1 invariant.
    ///
    /// # Errors
    /// Returns [`WeightError::NoAssets`] for an empty vector and
    /// [`WeightError::UnnormalizedSum`] if the components do not sum to 1
    /// within tolerance.
    pub fn new(components: Array1<f64>) -> Result<Self, WeightError> {
        if components.is_empty() {
            return Err(WeightError::NoAssets);
        }
        let sum = components.sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(WeightError::UnnormalizedSum { sum });
        }
        Ok(Self(components))
    }

    /// Number of assets.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the vector has no components.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// View of the underlying components.
    pub const fn as_array(&self) -> &Array1<f64> {
        &self.0
    }

    /// Sum of components (1 within floating-point tolerance).
    pub fn sum(&self) -> f64 {
        self.0.sum()
    }

    /// True iff any component is ≤ 0.
    pub fn has_short(&self) -> bool {
        self.0.iter().any(|&w| w <= 0.0)
    }
}

/// Generate `count` weight vectors of `n_assets` components under `regime`.
///
/// Reproducible for identical `(count, n_assets, regime, seed)`; the draws
/// consume a [`StdRng`] seeded from `seed` and nothing else.
///
/// # Errors
/// Returns [`WeightError::NoAssets`] for `n_assets == 0`, and
/// [`WeightError::DegenerateDraw`] if a long-only draw sums to ~0
/// (probability ≈ 0; propagated rather than retried).
pub fn generate(
    count: usize,
    n_assets: usize,
    regime: Regime,
    seed: u64,
) -> Result<Vec<WeightVector>, WeightError> {
    if n_assets == 0 {
        return Err(WeightError::NoAssets);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut vectors = Vec::with_capacity(count);
    for _ in 0..count {
        let vector = match regime {
            Regime::ShortsAllowed => draw_shorts_allowed(&mut rng, n_assets),
            Regime::LongOnly => draw_long_only(&mut rng, n_assets)?,
        };
        vectors.push(vector);
    }
    Ok(vectors)
}

/// First N−1 components uniform on [−1, 1]; the last balances the sum to 1.
fn draw_shorts_allowed(rng: &mut StdRng, n_assets: usize) -> WeightVector {
    let mut weights = Array1::<f64>::zeros(n_assets);
    let mut partial = 0.0;
    for i in 0..n_assets - 1 {
        let w = rng.gen_range(-1.0..=1.0);
        weights[i] = w;
        partial += w;
    }
    weights[n_assets - 1] = 1.0 - partial;
    WeightVector(weights)
}

/// N components uniform on [0, 1], normalized by their sum.
fn draw_long_only(rng: &mut StdRng, n_assets: usize) -> Result<WeightVector, WeightError> {
    let mut weights = Array1::<f64>::zeros(n_assets);
    for w in weights.iter_mut() {
        *w = rng.gen_range(0.0..=1.0);
    }
    let sum = weights.sum();
    if sum < DEGENERATE_SUM {
        return Err(WeightError::DegenerateDraw { sum });
    }
    weights.mapv_inplace(|w| w / sum);
    Ok(WeightVector(weights))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rstest::rstest;

    #[rstest]
    #[case(Regime::ShortsAllowed)]
    #[case(Regime::LongOnly)]
    fn test_weights_sum_to_one(#[case] regime: Regime) {
        let vectors = generate(500, 4, regime, 9999).unwrap();
        assert_eq!(vectors.len(), 500);
        for v in &vectors {
            assert!((v.sum() - 1.0).abs() < 1e-9, "sum was {}", v.sum());
        }
    }

    #[test]
    fn test_long_only_is_non_negative() {
        for v in generate(500, 4, Regime::LongOnly, 1234).unwrap() {
            assert!(v.as_array().iter().all(|&w| w >= 0.0));
            assert!(!v.has_short());
        }
    }

    #[test]
    fn test_shorts_allowed_balancing_weight_is_unbounded() {
        // The 4th component balances three uniforms on [-1, 1]; over 500
        // draws it lands outside [-1, 1] with near certainty, and some
        // vectors contain negative components. Neither is an error.
        let vectors = generate(500, 4, Regime::ShortsAllowed, 7).unwrap();
        assert!(vectors.iter().any(|v| v.as_array()[3] > 1.0));
        assert!(
            vectors
                .iter()
                .any(|v| v.as_array().iter().any(|&w| w < 0.0))
        );
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = generate(50, 4, Regime::ShortsAllowed, 42).unwrap();
        let b = generate(50, 4, Regime::ShortsAllowed, 42).unwrap();
        assert_eq!(a, b);

        let c = generate(50, 4, Regime::ShortsAllowed, 43).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_regimes_use_independent_streams() {
        let shorts = generate(10, 4, Regime::ShortsAllowed, 42).unwrap();
        let long_only = generate(10, 4, Regime::LongOnly, 42).unwrap();
        assert_ne!(shorts, long_only);
    }

    #[test]
    fn test_zero_assets_rejected() {
        assert_eq!(
            generate(10, 0, Regime::LongOnly, 1).unwrap_err(),
            WeightError::NoAssets
        );
    }

    #[test]
    fn test_has_short_is_exact_sign_check() {
        let zero_weight = WeightVector::new(array![0.0, 0.4, 0.6]).unwrap();
        assert!(zero_weight.has_short());

        let negative = WeightVector::new(array![-0.2, 0.6, 0.6]).unwrap();
        assert!(negative.has_short());

        let long_only = WeightVector::new(array![0.2, 0.3, 0.5]).unwrap();
        assert!(!long_only.has_short());
    }

    #[test]
    fn test_new_rejects_unnormalized_components() {
        assert!(matches!(
            WeightVector::new(array![0.5, 0.6]),
            Err(WeightError::UnnormalizedSum { .. })
        ));
        assert!(matches!(
            WeightVector::new(Array1::<f64>::zeros(0)),
            Err(WeightError::NoAssets)
        ));
    }

    #[test]
    fn test_regime_labels() {
        assert_eq!(Regime::ShortsAllowed.label(), "shorts_allowed");
        assert_eq!(Regime::LongOnly.to_string(), "long_only");
    }
}
