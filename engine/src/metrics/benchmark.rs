// Comparison against industry reference values.
use shared::dashboard::{BenchmarkComparison, BenchmarkDirection, BenchmarkMetric};

use super::CampaignTotals;
use crate::config::settings::{BenchmarkSettings, BenchmarkValues};

/// Signed distance from `reference`, positive when `own` is the better value.
/// Rates count upwards, costs count downwards.
pub fn benchmark_delta(metric: BenchmarkMetric, own: f64, reference: f64) -> f64 {
    match metric.direction() {
        BenchmarkDirection::HigherIsBetter => own - reference,
        BenchmarkDirection::LowerIsBetter => reference - own,
    }
}

pub fn compare(metric: BenchmarkMetric, own: f64, reference: BenchmarkValues) -> BenchmarkComparison {
    let delta_vs_average = benchmark_delta(metric, own, reference.industry_average);
    BenchmarkComparison {
        metric,
        direction: metric.direction(),
        own,
        industry_average: reference.industry_average,
        top_performer: reference.top_performer,
        delta_vs_average,
        delta_vs_top: benchmark_delta(metric, own, reference.top_performer),
        outperforms_average: delta_vs_average > 0.0,
    }
}

fn reference_for(settings: &BenchmarkSettings, metric: BenchmarkMetric) -> BenchmarkValues {
    match metric {
        BenchmarkMetric::Ctr => settings.ctr,
        BenchmarkMetric::Cpc => settings.cpc,
        BenchmarkMetric::ConversionRate => settings.conversion_rate,
        BenchmarkMetric::CostPerConversion => settings.cost_per_conversion,
    }
}

fn own_value(totals: &CampaignTotals, metric: BenchmarkMetric) -> f64 {
    match metric {
        BenchmarkMetric::Ctr => totals.ctr(),
        BenchmarkMetric::Cpc => totals.cpc(),
        BenchmarkMetric::ConversionRate => totals.conversion_rate(),
        BenchmarkMetric::CostPerConversion => totals.cost_per_conversion(),
    }
}

pub fn compare_all(totals: &CampaignTotals, settings: &BenchmarkSettings) -> Vec<BenchmarkComparison> {
    BenchmarkMetric::ALL
        .iter()
        .map(|&metric| compare(metric, own_value(totals, metric), reference_for(settings, metric)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_rate_delta_is_own_minus_reference() {
        assert!(approx(benchmark_delta(BenchmarkMetric::Ctr, 2.0, 1.5), 0.5));
        assert!(approx(benchmark_delta(BenchmarkMetric::ConversionRate, 0.0, 1.5), -1.5));
    }

    #[test]
    fn test_cost_delta_is_inverted() {
        // Cheaper than the market is better.
        assert!(approx(benchmark_delta(BenchmarkMetric::Cpc, 2.0, 2.5), 0.5));
        assert!(approx(benchmark_delta(BenchmarkMetric::CostPerConversion, 2500.0, 100.0), -2400.0));
    }

    #[test]
    fn test_same_gap_opposite_sign_per_direction() {
        let rate = benchmark_delta(BenchmarkMetric::Ctr, 3.0, 2.0);
        let cost = benchmark_delta(BenchmarkMetric::Cpc, 3.0, 2.0);
        assert!(approx(rate, -cost));
    }

    #[test]
    fn test_compare_all_uses_each_reference() {
        let totals = CampaignTotals { impressions: 50000.0, clicks: 1000.0, cost: 2500.0, conversions: 0.0 };
        let rows = compare_all(&totals, &BenchmarkSettings::default());
        assert_eq!(rows.len(), 4);

        let ctr = &rows[0];
        assert_eq!(ctr.metric, BenchmarkMetric::Ctr);
        assert!(approx(ctr.delta_vs_average, 0.5));
        assert!(ctr.outperforms_average);
        assert!(approx(ctr.delta_vs_top, -1.0));

        let cpc = &rows[1];
        assert_eq!(cpc.direction, BenchmarkDirection::LowerIsBetter);
        assert!(approx(cpc.delta_vs_average, 0.0));
        assert!(!cpc.outperforms_average);
        assert!(approx(cpc.delta_vs_top, -1.0));

        let cost_per_conversion = &rows[3];
        assert_eq!(cost_per_conversion.own, 2500.0);
        assert!(!cost_per_conversion.outperforms_average);
    }
}
