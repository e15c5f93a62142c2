// Derived campaign metrics.
//
// Every function here is total: a zero denominator or an empty collection has
// an explicit neutral result, so a render pass can always show a number.
pub mod benchmark;
pub mod demographics;
pub mod devices;
pub mod funnel;
pub mod keywords;
pub mod projections;
pub mod ranking;
pub mod schedule;
pub mod timeline;

use serde::Serialize;
use shared::dashboard::Overview;
use shared::models::ReportSet;

/// What a ratio reports when its denominator is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ZeroDenominator {
    /// Report 0.
    Zero,
    /// Report the numerator itself, so spend stays visible without clicks or
    /// conversions.
    Numerator,
}

// Rates fall back to zero, costs fall back to the spend.
pub const CTR_FALLBACK: ZeroDenominator = ZeroDenominator::Zero;
pub const CPC_FALLBACK: ZeroDenominator = ZeroDenominator::Numerator;
pub const CONVERSION_RATE_FALLBACK: ZeroDenominator = ZeroDenominator::Zero;
pub const COST_PER_CONVERSION_FALLBACK: ZeroDenominator = ZeroDenominator::Numerator;
pub const SHARE_FALLBACK: ZeroDenominator = ZeroDenominator::Zero;

pub fn ratio(numerator: f64, denominator: f64, fallback: ZeroDenominator) -> f64 {
    if denominator == 0.0 {
        match fallback {
            ZeroDenominator::Zero => 0.0,
            ZeroDenominator::Numerator => numerator,
        }
    } else {
        numerator / denominator
    }
}

pub fn ctr(clicks: f64, impressions: f64) -> f64 {
    if impressions == 0.0 {
        return ratio(clicks, impressions, CTR_FALLBACK);
    }
    clicks / impressions * 100.0
}

pub fn cpc(cost: f64, clicks: f64) -> f64 {
    ratio(cost, clicks, CPC_FALLBACK)
}

pub fn conversion_rate(conversions: f64, clicks: f64) -> f64 {
    if clicks == 0.0 {
        return ratio(conversions, clicks, CONVERSION_RATE_FALLBACK);
    }
    conversions / clicks * 100.0
}

pub fn cost_per_conversion(cost: f64, conversions: f64) -> f64 {
    ratio(cost, conversions, COST_PER_CONVERSION_FALLBACK)
}

/// `part` as a percentage of `whole`.
pub fn share_of(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        return ratio(part, whole, SHARE_FALLBACK);
    }
    part / whole * 100.0
}

/// Campaign-wide totals, each taken from the report that carries it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CampaignTotals {
    pub impressions: f64,
    pub clicks: f64,
    pub cost: f64,
    pub conversions: f64,
}

impl CampaignTotals {
    /// Impressions come from the day-of-week report, clicks and cost from the
    /// campaigns report, conversions from the search terms report.
    pub fn from_reports(reports: &ReportSet) -> Self {
        CampaignTotals {
            impressions: reports.days.iter().map(|d| d.impressions).sum(),
            clicks: reports.campaigns.iter().map(|c| c.clicks).sum(),
            cost: reports.campaigns.iter().map(|c| c.cost).sum(),
            conversions: reports.search_terms.iter().map(|s| s.conversions).sum(),
        }
    }

    pub fn ctr(&self) -> f64 {
        ctr(self.clicks, self.impressions)
    }

    pub fn cpc(&self) -> f64 {
        cpc(self.cost, self.clicks)
    }

    pub fn conversion_rate(&self) -> f64 {
        conversion_rate(self.conversions, self.clicks)
    }

    pub fn cost_per_conversion(&self) -> f64 {
        cost_per_conversion(self.cost, self.conversions)
    }

    pub fn overview(&self) -> Overview {
        Overview {
            impressions: self.impressions,
            clicks: self.clicks,
            cost: self.cost,
            conversions: self.conversions,
            ctr: self.ctr(),
            cpc: self.cpc(),
            conversion_rate: self.conversion_rate(),
            cost_per_conversion: self.cost_per_conversion(),
            conversions_tracked: self.conversions > 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{CampaignRecord, DayRecord, SearchTermRecord};

    #[test]
    fn test_ctr_zero_impressions() {
        assert_eq!(ctr(0.0, 0.0), 0.0);
        assert_eq!(ctr(15.0, 0.0), 0.0);
    }

    #[test]
    fn test_ctr_is_exact_ratio() {
        for (clicks, impressions) in [(1000.0, 50000.0), (3.0, 7.0), (120.0, 100.0)] {
            assert_eq!(ctr(clicks, impressions), clicks / impressions * 100.0);
        }
    }

    #[test]
    fn test_cpc_falls_back_to_cost() {
        assert_eq!(cpc(37.5, 0.0), 37.5);
        assert_eq!(cpc(0.0, 0.0), 0.0);
        assert_eq!(cpc(2500.0, 1000.0), 2.5);
    }

    #[test]
    fn test_conversion_rate_and_cost_per_conversion() {
        assert_eq!(conversion_rate(5.0, 0.0), 0.0);
        assert_eq!(conversion_rate(5.0, 200.0), 2.5);
        assert_eq!(cost_per_conversion(2500.0, 0.0), 2500.0);
        assert_eq!(cost_per_conversion(2500.0, 25.0), 100.0);
    }

    #[test]
    fn test_fallback_policies_are_named() {
        assert_eq!(CTR_FALLBACK, ZeroDenominator::Zero);
        assert_eq!(CONVERSION_RATE_FALLBACK, ZeroDenominator::Zero);
        assert_eq!(CPC_FALLBACK, ZeroDenominator::Numerator);
        assert_eq!(COST_PER_CONVERSION_FALLBACK, ZeroDenominator::Numerator);
        assert_eq!(ratio(9.0, 0.0, ZeroDenominator::Zero), 0.0);
        assert_eq!(ratio(9.0, 0.0, ZeroDenominator::Numerator), 9.0);
    }

    #[test]
    fn test_share_of() {
        assert_eq!(share_of(1.0, 0.0), 0.0);
        assert_eq!(share_of(25.0, 200.0), 12.5);
    }

    #[test]
    fn test_totals_from_reports() {
        let reports = ReportSet {
            campaigns: vec![
                CampaignRecord { name: "a".into(), cost: 1500.0, clicks: 600.0, ctr: 2.0 },
                CampaignRecord { name: "b".into(), cost: 1000.0, clicks: 400.0, ctr: 2.0 },
            ],
            days: vec![
                DayRecord { day: "Domingo".into(), impressions: 20000.0 },
                DayRecord { day: "Segunda-feira".into(), impressions: 30000.0 },
            ],
            search_terms: vec![SearchTermRecord {
                term: "casa".into(),
                cost: 1.0,
                clicks: 1.0,
                impressions: 1.0,
                conversions: 0.0,
            }],
            ..ReportSet::default()
        };
        let totals = CampaignTotals::from_reports(&reports);
        assert_eq!(totals.impressions, 50000.0);
        assert_eq!(totals.clicks, 1000.0);
        assert_eq!(totals.cost, 2500.0);
        assert_eq!(totals.conversions, 0.0);
    }

    #[test]
    fn test_overview_of_empty_reports_is_neutral() {
        let overview = CampaignTotals::from_reports(&ReportSet::default()).overview();
        assert_eq!(overview.ctr, 0.0);
        assert_eq!(overview.cpc, 0.0);
        assert_eq!(overview.conversion_rate, 0.0);
        assert_eq!(overview.cost_per_conversion, 0.0);
        assert!(!overview.conversions_tracked);
    }
}
