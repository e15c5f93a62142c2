// Dashboard settings, loaded from a JSON file or taken from the defaults below.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::DashboardError;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DashboardSettings {
    pub data_dir: PathBuf,
    pub delimiter: char,
    pub files: ReportFiles,
    pub top_n: usize,
    pub focus_age_bands: Vec<String>,
    pub primary_device: String,
    pub benchmarks: BenchmarkSettings,
    pub lead_scenarios: Vec<LeadScenario>,
    pub expected_lead_rates: LeadRates,
    pub timeline: TimelineSettings,
}

/// File name of each report inside `data_dir`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ReportFiles {
    pub campaigns: String,
    pub devices: String,
    pub age: String,
    pub sex: String,
    pub sex_age: String,
    pub keywords: String,
    pub search_terms: String,
    pub days: String,
    pub hours: String,
    pub day_hours: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct BenchmarkValues {
    pub industry_average: f64,
    pub top_performer: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BenchmarkSettings {
    pub ctr: BenchmarkValues,
    pub cpc: BenchmarkValues,
    pub conversion_rate: BenchmarkValues,
    pub cost_per_conversion: BenchmarkValues,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LeadScenario {
    pub name: String,
    /// Fraction of clicks expected to turn into leads, 0.015 for 1.5%.
    pub rate: f64,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct LeadRates {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TimelineSettings {
    pub split: f64,
    pub labels: [String; 2],
    pub click_goal_multiplier: f64,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        DashboardSettings {
            data_dir: PathBuf::from("."),
            delimiter: ',',
            files: ReportFiles::default(),
            top_n: 10,
            focus_age_bands: vec!["25 a 34".to_string(), "35 a 44".to_string()],
            primary_device: "Smartphones".to_string(),
            benchmarks: BenchmarkSettings::default(),
            lead_scenarios: vec![
                LeadScenario { name: "Conservador".to_string(), rate: 0.005 },
                LeadScenario { name: "Realista".to_string(), rate: 0.015 },
                LeadScenario { name: "Otimista".to_string(), rate: 0.03 },
            ],
            expected_lead_rates: LeadRates { min: 0.005, max: 0.03 },
            timeline: TimelineSettings::default(),
        }
    }
}

impl Default for ReportFiles {
    fn default() -> Self {
        // Names as produced by the ads platform export for the 2025 campaign.
        ReportFiles {
            campaigns: "Campanhas(2025.07.08-2025.10.17).csv".to_string(),
            devices: "Dispositivos(2025.07.08-2025.10.17).csv".to_string(),
            age: "Informações_demográficas(Idade_2025.07.08-2025.10.17).csv".to_string(),
            sex: "Informações_demográficas(Sexo_2025.07.08-2025.10.17).csv".to_string(),
            sex_age: "Informações_demográficas(Sexo_Idade_2025.07.08-2025.10.17).csv".to_string(),
            keywords: "Palavras-chave_de_pesquisa(2025.07.08-2025.10.17).csv".to_string(),
            search_terms: "Pesquisas(Palavra_2025.07.08-2025.10.17).csv".to_string(),
            days: "Dia_e_hora(Dia_2025.07.08-2025.10.17).csv".to_string(),
            hours: "Dia_e_hora(Hora_2025.07.08-2025.10.17).csv".to_string(),
            day_hours: "Dia_e_hora(Dia_Hora_2025.07.08-2025.10.17).csv".to_string(),
        }
    }
}

impl Default for BenchmarkSettings {
    fn default() -> Self {
        // Real-estate search campaigns.
        BenchmarkSettings {
            ctr: BenchmarkValues { industry_average: 1.5, top_performer: 3.0 },
            cpc: BenchmarkValues { industry_average: 2.50, top_performer: 1.50 },
            conversion_rate: BenchmarkValues { industry_average: 1.5, top_performer: 4.0 },
            cost_per_conversion: BenchmarkValues { industry_average: 100.0, top_performer: 50.0 },
        }
    }
}

impl Default for TimelineSettings {
    fn default() -> Self {
        TimelineSettings {
            split: 0.7,
            labels: ["Julho - Set".to_string(), "Outubro".to_string()],
            click_goal_multiplier: 1.2,
        }
    }
}

impl DashboardSettings {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, DashboardError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DashboardError::ConfigError(format!("Failed to read settings '{}': {}", path.display(), e))
        })?;
        let settings: DashboardSettings = serde_json::from_str(&content).map_err(|e| {
            DashboardError::ConfigError(format!("Invalid settings in '{}': {}", path.display(), e))
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), DashboardError> {
        if !(0.0..=1.0).contains(&self.timeline.split) {
            return Err(DashboardError::ConfigError(format!(
                "timeline.split must be within [0, 1], got {}",
                self.timeline.split
            )));
        }
        if !(self.timeline.click_goal_multiplier > 0.0) {
            return Err(DashboardError::ConfigError(format!(
                "timeline.click_goal_multiplier must be positive, got {}",
                self.timeline.click_goal_multiplier
            )));
        }
        for scenario in &self.lead_scenarios {
            check_rate(&format!("lead_scenarios '{}'", scenario.name), scenario.rate)?;
        }
        check_rate("expected_lead_rates.min", self.expected_lead_rates.min)?;
        check_rate("expected_lead_rates.max", self.expected_lead_rates.max)?;
        if self.expected_lead_rates.min > self.expected_lead_rates.max {
            return Err(DashboardError::ConfigError(format!(
                "expected_lead_rates.min ({}) exceeds max ({})",
                self.expected_lead_rates.min, self.expected_lead_rates.max
            )));
        }
        if !self.delimiter.is_ascii() {
            return Err(DashboardError::ConfigError(format!(
                "delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            )));
        }
        Ok(())
    }

    /// The delimiter as the byte the CSV reader expects. Checked by `validate`.
    pub fn delimiter_byte(&self) -> u8 {
        if self.delimiter.is_ascii() {
            self.delimiter as u8
        } else {
            b','
        }
    }
}

// Lead rates are fractions of clicks: finite and not negative.
fn check_rate(name: &str, rate: f64) -> Result<(), DashboardError> {
    if rate.is_finite() && rate >= 0.0 {
        Ok(())
    } else {
        Err(DashboardError::ConfigError(format!(
            "{} rate must be a non-negative number, got {}",
            name, rate
        )))
    }
}
