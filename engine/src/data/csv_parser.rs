use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::{Reader, ReaderBuilder, StringRecord};
use shared::models::{
    CampaignRecord, DayHourRecord, DayRecord, DemographicRecord, DeviceRecord, HourRecord,
    KeywordRecord, ReportSet, ReportingPeriod, SearchTermRecord,
};
use shared::utils::brazilian_format::{parse_currency, parse_grouped_number, parse_percentage};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::report_cache::ReportSources;
use crate::error::DashboardError;

// Column headers as written by the ads platform export (pt-BR).
const COL_CAMPAIGN: &str = "Campanha";
const COL_COST: &str = "Custo";
const COL_CLICKS: &str = "Cliques";
const COL_CTR: &str = "CTR";
const COL_IMPRESSIONS: &str = "Impressões";
const COL_CONVERSIONS: &str = "Conversões";
const COL_DEVICE: &str = "Dispositivo";
const COL_AGE: &str = "Faixa de idade";
const COL_SEX: &str = "Sexo";
const COL_SHARE_OF_KNOWN: &str = "Porcentagem do total conhecido";
const COL_KEYWORD: &str = "Palavra-chave da rede de pesquisa";
const COL_SEARCH_TERM: &[&str] = &["Palavra", "Pesquisar"];
const COL_DAY: &str = "Dia";
const COL_HOUR: &str = "Hora de início";

type RowReader<T> = Box<dyn Fn(&StringRecord) -> T>;

/// Header row of one report, resolved once so rows can be read by index.
struct ReportHeaders<'a> {
    report: &'static str,
    path: &'a Path,
    names: Vec<String>,
}

impl<'a> ReportHeaders<'a> {
    fn read(rdr: &mut Reader<BufReader<File>>, report: &'static str, path: &'a Path) -> Result<Self> {
        let names = rdr
            .headers()
            .with_context(|| format!("Failed to read {} header in '{}'", report, path.display()))?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();
        Ok(ReportHeaders { report, path, names })
    }

    fn optional(&self, candidates: &[&str]) -> Option<usize> {
        candidates
            .iter()
            .find_map(|name| self.names.iter().position(|header| header == name))
    }

    fn require(&self, name: &str) -> Result<usize> {
        self.require_any(&[name])
    }

    fn require_any(&self, candidates: &[&str]) -> Result<usize> {
        self.optional(candidates).ok_or_else(|| {
            DashboardError::CsvDataFormatError(format!(
                "Missing '{}' column in {} report '{}'",
                candidates.join("' / '"),
                self.report,
                self.path.display()
            ))
            .into()
        })
    }
}

fn text(record: &StringRecord, column: Option<usize>) -> String {
    column
        .and_then(|idx| record.get(idx))
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn optional_text(record: &StringRecord, column: usize) -> Option<String> {
    record.get(column).map(|s| s.trim().to_string())
}

/// A CTR cell as a percentage in [0, 100]. Anything outside that range is
/// treated like a malformed cell and becomes 0.0.
fn parse_ctr(raw: Option<&str>) -> f64 {
    let ctr = parse_percentage(raw);
    if (0.0..=100.0).contains(&ctr) {
        ctr
    } else {
        0.0
    }
}

/// Reads the exported reports into typed records. Cells go through the
/// Brazilian number parsers, so a malformed value becomes 0.0 instead of an
/// error; only a structurally broken file or a missing column fails.
pub struct ReportCsvParser {
    delimiter: u8,
}

impl ReportCsvParser {
    pub fn new(delimiter: u8) -> Self {
        ReportCsvParser { delimiter }
    }

    // A missing file yields None: the dashboard renders with an empty report.
    fn open(&self, path: &Path, report: &'static str) -> Result<Option<Reader<BufReader<File>>>> {
        if !path.exists() {
            tracing::warn!(report, path = %path.display(), "Report file not found, using an empty report");
            return Ok(None);
        }
        let file = File::open(path)
            .with_context(|| format!("Failed to open {} report '{}'", report, path.display()))?;
        Ok(Some(
            ReaderBuilder::new()
                .delimiter(self.delimiter)
                .has_headers(true)
                .flexible(true)
                .from_reader(BufReader::new(file)),
        ))
    }

    fn read_rows<T>(
        &self,
        path: &Path,
        report: &'static str,
        build: impl FnOnce(&ReportHeaders) -> Result<RowReader<T>>,
    ) -> Result<Vec<T>> {
        let Some(mut rdr) = self.open(path, report)? else {
            return Ok(Vec::new());
        };
        let headers = ReportHeaders::read(&mut rdr, report, path)?;
        let row_to_record = build(&headers)?;

        let mut records = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let record = result.with_context(|| {
                format!("Error reading {} record at line {} of '{}'", report, idx + 2, path.display())
            })?;
            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }
            records.push(row_to_record(&record));
        }
        tracing::debug!(report, rows = records.len(), path = %path.display(), "Loaded report");
        Ok(records)
    }

    pub fn load_campaigns(&self, path: &Path) -> Result<Vec<CampaignRecord>> {
        self.read_rows(path, "campaigns", |h| {
            let name = h.optional(&[COL_CAMPAIGN]);
            let cost = h.require(COL_COST)?;
            let clicks = h.require(COL_CLICKS)?;
            let ctr = h.require(COL_CTR)?;
            let reader: RowReader<CampaignRecord> = Box::new(move |r: &StringRecord| CampaignRecord {
                name: text(r, name),
                cost: parse_currency(r.get(cost)),
                clicks: parse_grouped_number(r.get(clicks)),
                ctr: parse_ctr(r.get(ctr)),
            });
            Ok(reader)
        })
    }

    pub fn load_devices(&self, path: &Path) -> Result<Vec<DeviceRecord>> {
        self.read_rows(path, "devices", |h| {
            let device = h.require(COL_DEVICE)?;
            let cost = h.require(COL_COST)?;
            let impressions = h.require(COL_IMPRESSIONS)?;
            let clicks = h.require(COL_CLICKS)?;
            let reader: RowReader<DeviceRecord> = Box::new(move |r: &StringRecord| DeviceRecord {
                device: text(r, Some(device)),
                cost: parse_currency(r.get(cost)),
                impressions: parse_grouped_number(r.get(impressions)),
                clicks: parse_grouped_number(r.get(clicks)),
            });
            Ok(reader)
        })
    }

    /// Age, sex and sex-by-age reports share one layout; `with_sex` and
    /// `with_age` say which label columns the report must carry.
    pub fn load_demographics(
        &self,
        path: &Path,
        report: &'static str,
        with_sex: bool,
        with_age: bool,
    ) -> Result<Vec<DemographicRecord>> {
        self.read_rows(path, report, |h| {
            let sex = if with_sex { Some(h.require(COL_SEX)?) } else { None };
            let age = if with_age { Some(h.require(COL_AGE)?) } else { None };
            let impressions = h.require(COL_IMPRESSIONS)?;
            let share = h.require(COL_SHARE_OF_KNOWN)?;
            let reader: RowReader<DemographicRecord> = Box::new(move |r: &StringRecord| DemographicRecord {
                sex: sex.and_then(|idx| optional_text(r, idx)),
                age_band: age.and_then(|idx| optional_text(r, idx)),
                impressions: parse_grouped_number(r.get(impressions)),
                share_of_known: parse_percentage(r.get(share)),
            });
            Ok(reader)
        })
    }

    pub fn load_keywords(&self, path: &Path) -> Result<Vec<KeywordRecord>> {
        self.read_rows(path, "keywords", |h| {
            let keyword = h.require(COL_KEYWORD)?;
            let cost = h.require(COL_COST)?;
            let clicks = h.require(COL_CLICKS)?;
            let ctr = h.require(COL_CTR)?;
            let reader: RowReader<KeywordRecord> = Box::new(move |r: &StringRecord| KeywordRecord {
                keyword: text(r, Some(keyword)),
                cost: parse_currency(r.get(cost)),
                clicks: parse_grouped_number(r.get(clicks)),
                ctr: parse_ctr(r.get(ctr)),
            });
            Ok(reader)
        })
    }

    pub fn load_search_terms(&self, path: &Path) -> Result<Vec<SearchTermRecord>> {
        self.read_rows(path, "search_terms", |h| {
            let term = h.require_any(COL_SEARCH_TERM)?;
            let cost = h.require(COL_COST)?;
            let clicks = h.require(COL_CLICKS)?;
            let impressions = h.require(COL_IMPRESSIONS)?;
            let conversions = h.require(COL_CONVERSIONS)?;
            let reader: RowReader<SearchTermRecord> = Box::new(move |r: &StringRecord| SearchTermRecord {
                term: text(r, Some(term)),
                cost: parse_currency(r.get(cost)),
                clicks: parse_grouped_number(r.get(clicks)),
                impressions: parse_grouped_number(r.get(impressions)),
                conversions: parse_grouped_number(r.get(conversions)),
            });
            Ok(reader)
        })
    }

    pub fn load_days(&self, path: &Path) -> Result<Vec<DayRecord>> {
        self.read_rows(path, "days", |h| {
            let day = h.require(COL_DAY)?;
            let impressions = h.require(COL_IMPRESSIONS)?;
            let reader: RowReader<DayRecord> = Box::new(move |r: &StringRecord| DayRecord {
                day: text(r, Some(day)),
                impressions: parse_grouped_number(r.get(impressions)),
            });
            Ok(reader)
        })
    }

    pub fn load_hours(&self, path: &Path) -> Result<Vec<HourRecord>> {
        self.read_rows(path, "hours", |h| {
            let hour = h.require(COL_HOUR)?;
            let impressions = h.require(COL_IMPRESSIONS)?;
            let reader: RowReader<HourRecord> = Box::new(move |r: &StringRecord| HourRecord {
                hour: text(r, Some(hour)),
                impressions: parse_grouped_number(r.get(impressions)),
            });
            Ok(reader)
        })
    }

    pub fn load_day_hours(&self, path: &Path) -> Result<Vec<DayHourRecord>> {
        self.read_rows(path, "day_hours", |h| {
            let day = h.require(COL_DAY)?;
            let hour = h.require(COL_HOUR)?;
            let impressions = h.require(COL_IMPRESSIONS)?;
            let reader: RowReader<DayHourRecord> = Box::new(move |r: &StringRecord| DayHourRecord {
                day: text(r, Some(day)),
                hour: text(r, Some(hour)),
                impressions: parse_grouped_number(r.get(impressions)),
            });
            Ok(reader)
        })
    }

    pub fn load_report_set(&self, sources: &ReportSources) -> Result<ReportSet> {
        Ok(ReportSet {
            period: reporting_period(&sources.campaigns),
            campaigns: self.load_campaigns(&sources.campaigns)?,
            devices: self.load_devices(&sources.devices)?,
            age: self.load_demographics(&sources.age, "age", false, true)?,
            sex: self.load_demographics(&sources.sex, "sex", true, false)?,
            sex_age: self.load_demographics(&sources.sex_age, "sex_age", true, true)?,
            keywords: self.load_keywords(&sources.keywords)?,
            search_terms: self.load_search_terms(&sources.search_terms)?,
            days: self.load_days(&sources.days)?,
            hours: self.load_hours(&sources.hours)?,
            day_hours: self.load_day_hours(&sources.day_hours)?,
        })
    }
}

/// Reads the "(2025.07.08-2025.10.17)" range the export puts in file names.
/// A prefix such as "Idade_" inside the parentheses is skipped.
pub fn reporting_period(path: &Path) -> Option<ReportingPeriod> {
    let name = path.file_name()?.to_str()?;
    let open = name.rfind('(')?;
    let close = open + name[open..].find(')')?;
    let range = name[open + 1..close].rsplit('_').next()?;
    let (start, end) = range.split_once('-')?;
    let start = NaiveDate::parse_from_str(start, "%Y.%m.%d").ok()?;
    let end = NaiveDate::parse_from_str(end, "%Y.%m.%d").ok()?;
    (start <= end).then_some(ReportingPeriod { start, end })
}
