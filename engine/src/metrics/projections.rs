// Lead projections at industry conversion rates.
use shared::dashboard::{LeadProjection, LeadRange};

use super::{ratio, COST_PER_CONVERSION_FALLBACK};
use crate::config::settings::{LeadRates, LeadScenario};

/// Leads the current traffic would yield at `scenario.rate`, and the cost per
/// lead that implies. With no expected leads the CPL is the whole spend.
pub fn project_leads(clicks: f64, cost: f64, scenario: &LeadScenario) -> LeadProjection {
    let leads = clicks * scenario.rate;
    LeadProjection {
        scenario: scenario.name.clone(),
        rate: scenario.rate,
        leads,
        cost_per_lead: ratio(cost, leads, COST_PER_CONVERSION_FALLBACK),
    }
}

pub fn project_all(clicks: f64, cost: f64, scenarios: &[LeadScenario]) -> Vec<LeadProjection> {
    scenarios.iter().map(|s| project_leads(clicks, cost, s)).collect()
}

pub fn expected_lead_range(clicks: f64, rates: LeadRates) -> LeadRange {
    LeadRange {
        min: clicks * rates.min,
        max: clicks * rates.max,
    }
}
