use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// Typed rows of the exported reports. Every numeric field has already been
// through `utils::brazilian_format`, so counts are kept as f64 like the rest.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRecord {
    pub name: String,
    pub cost: f64,
    pub clicks: f64,
    pub ctr: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub device: String,
    pub cost: f64,
    pub impressions: f64,
    pub clicks: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRecord {
    pub keyword: String,
    pub cost: f64,
    pub clicks: f64,
    pub ctr: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchTermRecord {
    pub term: String,
    pub cost: f64,
    pub clicks: f64,
    pub impressions: f64,
    pub conversions: f64,
}

/// One audience segment. The age report fills `age_band`, the sex report fills
/// `sex`, the combined report fills both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemographicRecord {
    pub sex: Option<String>,
    pub age_band: Option<String>,
    pub impressions: f64,
    /// Share of the known audience; the unknown residual is not included, so
    /// shares of a report need not add up to 100.
    pub share_of_known: f64,
}

impl DemographicRecord {
    pub fn label(&self) -> String {
        match (&self.sex, &self.age_band) {
            (Some(sex), Some(age)) => format!("{} {}", sex, age),
            (Some(sex), None) => sex.clone(),
            (None, Some(age)) => age.clone(),
            (None, None) => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    pub day: String,
    pub impressions: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourRecord {
    pub hour: String,
    pub impressions: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayHourRecord {
    pub day: String,
    pub hour: String,
    pub impressions: f64,
}

/// Date range covered by an export, taken from its file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportingPeriod {
    /// Both ends inclusive.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// All reports of one export, loaded together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSet {
    pub period: Option<ReportingPeriod>,
    pub campaigns: Vec<CampaignRecord>,
    pub devices: Vec<DeviceRecord>,
    pub age: Vec<DemographicRecord>,
    pub sex: Vec<DemographicRecord>,
    pub sex_age: Vec<DemographicRecord>,
    pub keywords: Vec<KeywordRecord>,
    pub search_terms: Vec<SearchTermRecord>,
    pub days: Vec<DayRecord>,
    pub hours: Vec<HourRecord>,
    pub day_hours: Vec<DayHourRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demographic_label_combines_present_parts() {
        let mut record = DemographicRecord {
            sex: Some("Feminino".to_string()),
            age_band: Some("35 a 44".to_string()),
            impressions: 10.0,
            share_of_known: 5.0,
        };
        assert_eq!(record.label(), "Feminino 35 a 44");
        record.sex = None;
        assert_eq!(record.label(), "35 a 44");
    }

    #[test]
    fn reporting_period_counts_both_ends() {
        let period = ReportingPeriod {
            start: NaiveDate::from_ymd_opt(2025, 7, 8).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 10, 17).unwrap(),
        };
        assert_eq!(period.days(), 102);
    }

    #[test]
    fn report_set_serializes_to_json() {
        let set = ReportSet {
            days: vec![DayRecord { day: "Domingo".to_string(), impressions: 3.0 }],
            ..ReportSet::default()
        };
        let json = serde_json::to_string(&set).unwrap();
        assert!(json.contains("\"Domingo\""));
        assert!(json.contains("\"period\":null"));
    }
}
