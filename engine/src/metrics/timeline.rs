// Two-period approximation of the campaign timeline.
//
// The export has no dated rows, so the totals are divided between two labeled
// periods by a fixed share. The result is an approximation and is marked so in
// every period; it must never be presented as measured data.
use shared::dashboard::{SyntheticPeriod, Timeline};

use super::CampaignTotals;
use crate::config::settings::TimelineSettings;

/// Splits the totals `split` / `1 - split` between the two configured labels.
/// The caller picks which impressions total is spread.
pub fn approximate_period_split(totals: &CampaignTotals, settings: &TimelineSettings) -> Vec<SyntheticPeriod> {
    let split = settings.split.clamp(0.0, 1.0);
    tracing::warn!(
        split,
        "Timeline is approximated from campaign totals, not from dated records"
    );
    let overall_cpc = totals.cpc();

    settings
        .labels
        .iter()
        .zip([split, 1.0 - split])
        .map(|(label, share)| SyntheticPeriod {
            label: label.clone(),
            share,
            clicks: totals.clicks * share,
            cost: totals.cost * share,
            impressions: totals.impressions * share,
            cpc: overall_cpc,
            click_goal: totals.clicks * share * settings.click_goal_multiplier,
            approximate: true,
        })
        .collect()
}

pub fn summarize(periods: Vec<SyntheticPeriod>) -> Timeline {
    let active: Vec<&SyntheticPeriod> = periods.iter().filter(|p| p.clicks > 0.0).collect();
    let average_clicks = if active.is_empty() {
        0.0
    } else {
        active.iter().map(|p| p.clicks).sum::<f64>() / active.len() as f64
    };
    let peak_clicks = active.iter().map(|p| p.clicks).fold(0.0, f64::max);
    let active_periods = active.len();

    Timeline {
        periods,
        active_periods,
        average_clicks,
        peak_clicks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn totals() -> CampaignTotals {
        CampaignTotals { impressions: 50000.0, clicks: 1000.0, cost: 2500.0, conversions: 0.0 }
    }

    #[test]
    fn test_split_is_labeled_and_flagged() {
        let periods = approximate_period_split(&totals(), &TimelineSettings::default());
        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0].label, "Julho - Set");
        assert_eq!(periods[1].label, "Outubro");
        assert!(periods.iter().all(|p| p.approximate));

        assert!(approx(periods[0].clicks, 700.0));
        assert!(approx(periods[1].clicks, 300.0));
        assert!(approx(periods[0].cost, 1750.0));
        assert!(approx(periods[1].impressions, 15000.0));
        assert!(approx(periods[0].cpc, 2.5));
        assert!(approx(periods[1].cpc, 2.5));
        assert!(approx(periods[0].click_goal, 840.0));
    }

    #[test]
    fn test_periods_add_back_to_totals() {
        let periods = approximate_period_split(&totals(), &TimelineSettings::default());
        let clicks: f64 = periods.iter().map(|p| p.clicks).sum();
        let cost: f64 = periods.iter().map(|p| p.cost).sum();
        assert!(approx(clicks, 1000.0));
        assert!(approx(cost, 2500.0));
    }

    #[test]
    fn test_summary_counts_active_periods() {
        let timeline = summarize(approximate_period_split(&totals(), &TimelineSettings::default()));
        assert_eq!(timeline.active_periods, 2);
        assert!(approx(timeline.average_clicks, 500.0));
        assert!(approx(timeline.peak_clicks, 700.0));

        let idle = summarize(approximate_period_split(&CampaignTotals::default(), &TimelineSettings::default()));
        assert_eq!(idle.active_periods, 0);
        assert_eq!(idle.average_clicks, 0.0);
        assert_eq!(idle.peak_clicks, 0.0);
        // No clicks: CPC falls back to the (zero) spend.
        assert_eq!(idle.periods[0].cpc, 0.0);
    }
}
