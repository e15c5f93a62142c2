// Load-once cache for the exported reports.
use anyhow::Result;
use shared::models::ReportSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::csv_parser::ReportCsvParser;
use crate::config::settings::DashboardSettings;

/// Resolved path of every report file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSources {
    pub campaigns: PathBuf,
    pub devices: PathBuf,
    pub age: PathBuf,
    pub sex: PathBuf,
    pub sex_age: PathBuf,
    pub keywords: PathBuf,
    pub search_terms: PathBuf,
    pub days: PathBuf,
    pub hours: PathBuf,
    pub day_hours: PathBuf,
}

impl ReportSources {
    pub fn from_settings(settings: &DashboardSettings) -> Self {
        let dir = &settings.data_dir;
        let files = &settings.files;
        ReportSources {
            campaigns: dir.join(&files.campaigns),
            devices: dir.join(&files.devices),
            age: dir.join(&files.age),
            sex: dir.join(&files.sex),
            sex_age: dir.join(&files.sex_age),
            keywords: dir.join(&files.keywords),
            search_terms: dir.join(&files.search_terms),
            days: dir.join(&files.days),
            hours: dir.join(&files.hours),
            day_hours: dir.join(&files.day_hours),
        }
    }

    pub fn paths(&self) -> [&Path; 10] {
        [
            self.campaigns.as_path(),
            self.devices.as_path(),
            self.age.as_path(),
            self.sex.as_path(),
            self.sex_age.as_path(),
            self.keywords.as_path(),
            self.search_terms.as_path(),
            self.days.as_path(),
            self.hours.as_path(),
            self.day_hours.as_path(),
        ]
    }

    pub fn signature(&self) -> SourceSignature {
        SourceSignature(self.paths().iter().map(|p| SourceStamp::of(p)).collect())
    }
}

/// Modification time and size of one source; both `None` for a missing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceStamp {
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
    pub len: Option<u64>,
}

impl SourceStamp {
    fn of(path: &Path) -> Self {
        let metadata = std::fs::metadata(path).ok();
        SourceStamp {
            path: path.to_path_buf(),
            modified: metadata.as_ref().and_then(|m| m.modified().ok()),
            len: metadata.as_ref().map(|m| m.len()),
        }
    }
}

/// Cache key: the source file set plus each file's modification stamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSignature(pub Vec<SourceStamp>);

struct CachedReports {
    signature: SourceSignature,
    reports: Arc<ReportSet>,
}

/// Holds the last loaded report set. Any change to the sources, including a
/// different file set, replaces it with a full reload; there is no partial
/// refresh and no other eviction.
#[derive(Default)]
pub struct ReportCache {
    entry: Option<CachedReports>,
    loads: usize,
}

impl ReportCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(&mut self, sources: &ReportSources, parser: &ReportCsvParser) -> Result<Arc<ReportSet>> {
        let signature = sources.signature();
        if let Some(cached) = &self.entry {
            if cached.signature == signature {
                tracing::debug!("Report cache hit");
                return Ok(Arc::clone(&cached.reports));
            }
            tracing::info!("Report sources changed, reloading");
        }

        let reports = Arc::new(parser.load_report_set(sources)?);
        self.loads += 1;
        self.entry = Some(CachedReports {
            signature,
            reports: Arc::clone(&reports),
        });
        Ok(reports)
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.entry.is_some()
    }

    /// Number of full loads performed so far.
    pub fn load_count(&self) -> usize {
        self.loads
    }
}
