// One render pass: load (or reuse) the reports, then derive every dashboard value.
use chrono::Utc;
use shared::dashboard::{ConversionView, DashboardSnapshot};
use shared::models::ReportSet;
use shared::utils::brazilian_format::format_currency;

use crate::config::settings::DashboardSettings;
use crate::data::csv_parser::ReportCsvParser;
use crate::data::report_cache::{ReportCache, ReportSources};
use crate::error::DashboardError;
use crate::metrics::{
    benchmark, demographics, devices, funnel, keywords, projections, schedule, timeline, CampaignTotals,
};

pub struct DashboardService {
    settings: DashboardSettings,
    sources: ReportSources,
    parser: ReportCsvParser,
    cache: ReportCache,
}

impl DashboardService {
    pub fn new(settings: DashboardSettings) -> Self {
        let sources = ReportSources::from_settings(&settings);
        let parser = ReportCsvParser::new(settings.delimiter_byte());
        DashboardService {
            settings,
            sources,
            parser,
            cache: ReportCache::new(),
        }
    }

    pub fn cache(&self) -> &ReportCache {
        &self.cache
    }

    pub fn render(&mut self) -> Result<DashboardSnapshot, DashboardError> {
        tracing::info!(
            data_dir = %self.settings.data_dir.display(),
            cached = self.cache.is_loaded(),
            "Starting render pass"
        );
        let reports = self
            .cache
            .get_or_load(&self.sources, &self.parser)
            .map_err(DashboardError::from_load_error)?;
        let snapshot = build_snapshot(&reports, &self.settings);
        tracing::info!(
            impressions = snapshot.overview.impressions,
            clicks = snapshot.overview.clicks,
            cost = %format_currency(snapshot.overview.cost),
            conversions = snapshot.overview.conversions,
            loads = self.cache.load_count(),
            "Render pass complete"
        );
        Ok(snapshot)
    }
}

/// Derives the whole snapshot from already loaded reports. Pure apart from the
/// timestamp and log lines.
pub fn build_snapshot(reports: &ReportSet, settings: &DashboardSettings) -> DashboardSnapshot {
    let totals = CampaignTotals::from_reports(reports);
    let overview = totals.overview();
    if !overview.conversions_tracked {
        tracing::warn!("No conversions recorded; conversion tracking may be missing");
    }
    // The period split spreads the devices report's impressions, not the
    // day-of-week total used by the overview.
    let timeline_base = CampaignTotals {
        impressions: devices::total_impressions(&reports.devices),
        ..totals
    };

    DashboardSnapshot {
        generated_at: Utc::now(),
        period: reports.period,
        overview,
        timeline: timeline::summarize(timeline::approximate_period_split(&timeline_base, &settings.timeline)),
        schedule: schedule::summarize(&reports.days, &reports.hours, &reports.day_hours),
        audience: demographics::summarize(
            &reports.age,
            &reports.sex,
            &reports.sex_age,
            &settings.focus_age_bands,
        ),
        keywords: keywords::summarize(&reports.keywords, &reports.search_terms, settings.top_n),
        devices: devices::summarize(&reports.devices, &settings.primary_device, &totals),
        conversions: ConversionView {
            funnel: funnel::build_funnel(totals.impressions, totals.clicks, totals.conversions),
            expected_leads: projections::expected_lead_range(totals.clicks, settings.expected_lead_rates),
            scenarios: projections::project_all(totals.clicks, totals.cost, &settings.lead_scenarios),
        },
        benchmarks: benchmark::compare_all(&totals, &settings.benchmarks),
    }
}
