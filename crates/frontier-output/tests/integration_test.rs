//! Integration tests for dataset export and summary reporting.

use frontier::{DistributionParameters, SimulationConfig, runner};
use frontier_output::{ExportFormat, Exporter, PortfolioRecord, generate_summary};
use ndarray::array;

fn simulate() -> frontier::ResultDataset {
    let params = DistributionParameters::new(
        array![0.02, 0.07, 0.15, 0.20],
        array![0.05, 0.12, 0.17, 0.25],
        array![
            [1.00, 0.62, 0.58, 0.47],
            [0.62, 1.00, 0.54, 0.46],
            [0.58, 0.54, 1.00, 0.52],
            [0.47, 0.46, 0.52, 1.00],
        ],
    )
    .unwrap();
    let config = SimulationConfig {
        sample_size: 100,
        weight_count: 50,
        sample_seed: 1111,
        shorts_seed: 9999,
        long_only_seed: 9999,
    };
    runner::run(&params, &config).unwrap()
}

#[test]
fn test_full_export_workflow() {
    let dataset = simulate();

    // CSV: header plus one row per portfolio, four weight columns
    let csv_text = dataset.export_to_string(ExportFormat::Csv).unwrap();
    let mut lines = csv_text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "w1,w2,w3,w4,has_short,mean_return,return_std_dev,regime"
    );
    assert_eq!(csv_text.lines().count(), 1 + dataset.len());

    // JSON re-parses to the same number of records with the same schema
    let json = dataset.export_to_string(ExportFormat::Json).unwrap();
    let records: Vec<PortfolioRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(records.len(), dataset.len());
    for (record, row) in records.iter().zip(dataset.iter()) {
        assert_eq!(record.weights.len(), 4);
        assert_eq!(record.has_short, row.has_short());
        assert_eq!(record.mean_return, row.mean_return());
        assert_eq!(record.return_std_dev, row.return_std_dev());
        assert_eq!(record.regime, row.regime().label());
    }
}

#[test]
fn test_summary_reflects_exported_rows() {
    let dataset = simulate();
    let summaries = generate_summary(&dataset);

    assert_eq!(summaries.len(), 2);
    let total: usize = summaries.iter().map(|s| s.count).sum();
    assert_eq!(total, dataset.len());

    // Every shorts-allowed portfolio with a non-positive weight is counted
    let shorts = &summaries[0];
    let counted = dataset
        .by_regime(frontier::Regime::ShortsAllowed)
        .filter(|r| r.has_short())
        .count();
    assert_eq!(shorts.short_count, counted);
}
