//! End-to-end tests for the simulation pipeline.

use frontier::{
    DistributionParameters, ParameterError, Regime, SimulationConfig, runner, weights,
};
use ndarray::array;

fn reference_parameters() -> DistributionParameters {
    DistributionParameters::new(
        array![0.02, 0.07, 0.15, 0.20],
        array![0.05, 0.12, 0.17, 0.25],
        array![
            [1.00, 0.62, 0.58, 0.47],
            [0.62, 1.00, 0.54, 0.46],
            [0.58, 0.54, 1.00, 0.52],
            [0.47, 0.46, 0.52, 1.00],
        ],
    )
    .unwrap()
}

#[test]
fn reference_run_is_bit_for_bit_reproducible() {
    let params = reference_parameters();
    let config = SimulationConfig {
        sample_size: 700,
        weight_count: 700,
        sample_seed: 1111,
        shorts_seed: 9999,
        long_only_seed: 9999,
    };

    let first = runner::run(&params, &config).unwrap();
    let second = runner::run(&params, &config).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 1400);
}

#[test]
fn every_row_satisfies_the_weight_invariants() {
    let params = reference_parameters();
    let dataset = runner::run(&params, &SimulationConfig::default()).unwrap();

    for row in &dataset {
        let weights = row.weights();
        assert!((weights.sum() - 1.0).abs() < 1e-9);
        assert_eq!(
            row.has_short(),
            weights.as_array().iter().any(|&w| w <= 0.0)
        );
        assert!(row.return_std_dev() >= 0.0);
        assert!(row.mean_return().is_finite());

        if row.regime() == Regime::LongOnly {
            assert!(weights.as_array().iter().all(|&w| w >= 0.0));
        }
    }
}

#[test]
fn covariance_diagonal_is_exact_variance() {
    let params = reference_parameters();
    assert_eq!(params.covariance()[[0, 0]], 0.0025);
}

#[test]
fn single_draw_sample_still_produces_results() {
    let params = reference_parameters();
    let config = SimulationConfig {
        sample_size: 1,
        weight_count: 10,
        ..SimulationConfig::default()
    };

    let dataset = runner::run(&params, &config).unwrap();
    assert_eq!(dataset.len(), 20);
    for row in &dataset {
        assert!(row.mean_return().is_finite());
        assert_eq!(row.return_std_dev(), 0.0);
    }
}

#[test]
fn degenerate_zero_volatility_parameters_are_rejected() {
    let result = DistributionParameters::new(
        array![0.10, 0.10],
        array![0.0, 0.0],
        array![[1.0, 0.0], [0.0, 1.0]],
    );
    assert!(matches!(
        result,
        Err(ParameterError::NonPositiveStdDev { .. })
    ));
}

#[test]
fn shorts_allowed_fourth_component_escapes_the_unit_interval() {
    let vectors = weights::generate(700, 4, Regime::ShortsAllowed, 9999).unwrap();
    assert!(
        vectors
            .iter()
            .any(|v| v.as_array()[3] < -1.0 || v.as_array()[3] > 1.0)
    );
}
