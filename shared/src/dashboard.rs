// Values derived by one render pass. A front end only reads these; nothing
// here is recomputed or updated after the snapshot is built.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    DayRecord, DemographicRecord, HourRecord, KeywordRecord, ReportingPeriod, SearchTermRecord,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub period: Option<ReportingPeriod>,
    pub overview: Overview,
    pub timeline: Timeline,
    pub schedule: ScheduleView,
    pub audience: AudienceView,
    pub keywords: KeywordView,
    pub devices: DeviceView,
    pub conversions: ConversionView,
    pub benchmarks: Vec<BenchmarkComparison>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub impressions: f64,
    pub clicks: f64,
    pub cost: f64,
    pub conversions: f64,
    pub ctr: f64,
    pub cpc: f64,
    pub conversion_rate: f64,
    pub cost_per_conversion: f64,
    /// False when no conversion was recorded, i.e. tracking is likely absent.
    pub conversions_tracked: bool,
}

/// A share of the campaign totals standing in for dated records, which the
/// export does not contain. Never a measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticPeriod {
    pub label: String,
    pub share: f64,
    pub clicks: f64,
    pub cost: f64,
    pub impressions: f64,
    pub cpc: f64,
    pub click_goal: f64,
    pub approximate: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub periods: Vec<SyntheticPeriod>,
    pub active_periods: usize,
    pub average_clicks: f64,
    pub peak_clicks: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heatmap {
    /// Row labels in weekday order.
    pub days: Vec<String>,
    /// One row of 24 hourly impression totals per entry of `days`.
    pub cells: Vec<Vec<f64>>,
    /// Records whose day or hour could not be placed on the grid.
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleView {
    pub days: Vec<DayRecord>,
    pub peak_day: Option<DayRecord>,
    pub hours: Vec<HourRecord>,
    pub peak_hour: Option<HourRecord>,
    pub heatmap: Heatmap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudienceView {
    pub age: Vec<DemographicRecord>,
    pub sex: Vec<DemographicRecord>,
    pub sex_age: Vec<DemographicRecord>,
    pub top_age: Option<DemographicRecord>,
    pub top_sex: Option<DemographicRecord>,
    pub top_segment: Option<DemographicRecord>,
    pub focus_bands: Vec<String>,
    pub focus_impressions: f64,
    pub focus_share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyPoint {
    pub label: String,
    pub cpc: f64,
    pub ctr: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordView {
    pub total: usize,
    pub with_clicks: usize,
    pub without_clicks: usize,
    /// Keywords that cost money without producing a single click.
    pub wasted: Vec<KeywordRecord>,
    pub wasted_cost: f64,
    pub top_by_ctr: Vec<KeywordRecord>,
    pub top_by_clicks: Vec<KeywordRecord>,
    pub efficiency: Vec<EfficiencyPoint>,
    pub top_search_terms: Vec<SearchTermRecord>,
    /// CPC and CTR of each entry of `top_search_terms`, same order.
    pub search_term_efficiency: Vec<EfficiencyPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceEfficiency {
    pub device: String,
    pub impressions: f64,
    pub clicks: f64,
    pub cost: f64,
    pub ctr: f64,
    pub cpc: f64,
    pub cost_share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceInsight {
    pub device: String,
    pub impressions: f64,
    pub impression_share: f64,
    pub cost: f64,
    pub cost_share: f64,
    pub ctr: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceView {
    pub devices: Vec<DeviceEfficiency>,
    pub efficiency: Vec<EfficiencyPoint>,
    pub primary: Option<DeviceInsight>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FunnelStageKind {
    Impressions,
    Clicks,
    Conversions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelStage {
    pub stage: FunnelStageKind,
    pub count: f64,
    /// Percentage relative to the previous stage; the first stage is 100.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Funnel {
    pub stages: Vec<FunnelStage>,
}

impl Funnel {
    pub fn counts(&self) -> Vec<f64> {
        self.stages.iter().map(|s| s.count).collect()
    }

    pub fn percentages(&self) -> Vec<f64> {
        self.stages.iter().map(|s| s.percentage).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadProjection {
    pub scenario: String,
    pub rate: f64,
    pub leads: f64,
    pub cost_per_lead: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionView {
    pub funnel: Funnel,
    pub expected_leads: LeadRange,
    pub scenarios: Vec<LeadProjection>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BenchmarkMetric {
    Ctr,
    Cpc,
    ConversionRate,
    CostPerConversion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BenchmarkDirection {
    HigherIsBetter,
    LowerIsBetter,
}

impl BenchmarkMetric {
    pub const ALL: [BenchmarkMetric; 4] = [
        BenchmarkMetric::Ctr,
        BenchmarkMetric::Cpc,
        BenchmarkMetric::ConversionRate,
        BenchmarkMetric::CostPerConversion,
    ];

    /// Rates improve upwards, costs improve downwards.
    pub fn direction(self) -> BenchmarkDirection {
        match self {
            BenchmarkMetric::Ctr | BenchmarkMetric::ConversionRate => {
                BenchmarkDirection::HigherIsBetter
            }
            BenchmarkMetric::Cpc | BenchmarkMetric::CostPerConversion => {
                BenchmarkDirection::LowerIsBetter
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkComparison {
    pub metric: BenchmarkMetric,
    pub direction: BenchmarkDirection,
    pub own: f64,
    pub industry_average: f64,
    pub top_performer: f64,
    /// Positive means better than the reference, whatever the direction.
    pub delta_vs_average: f64,
    pub delta_vs_top: f64,
    pub outperforms_average: bool,
}
