// Device efficiency
use shared::dashboard::{DeviceEfficiency, DeviceInsight, DeviceView, EfficiencyPoint};
use shared::models::DeviceRecord;

use super::{cpc, ctr, share_of, CampaignTotals};

pub fn device_efficiency(devices: &[DeviceRecord], total_cost: f64) -> Vec<DeviceEfficiency> {
    devices
        .iter()
        .map(|d| DeviceEfficiency {
            device: d.device.clone(),
            impressions: d.impressions,
            clicks: d.clicks,
            cost: d.cost,
            ctr: ctr(d.clicks, d.impressions),
            cpc: cpc(d.cost, d.clicks),
            cost_share: share_of(d.cost, total_cost),
        })
        .collect()
}

pub fn total_impressions(devices: &[DeviceRecord]) -> f64 {
    devices.iter().map(|d| d.impressions).sum()
}

/// Scatter points for devices that got clicks.
pub fn efficiency_points(devices: &[DeviceRecord]) -> Vec<EfficiencyPoint> {
    devices
        .iter()
        .filter(|d| d.clicks > 0.0)
        .map(|d| EfficiencyPoint {
            label: d.device.clone(),
            cpc: cpc(d.cost, d.clicks),
            ctr: ctr(d.clicks, d.impressions),
        })
        .collect()
}

/// Headline numbers for one device class, measured against campaign totals.
/// `None` when the device does not appear in the report.
pub fn device_insight(devices: &[DeviceRecord], device: &str, totals: &CampaignTotals) -> Option<DeviceInsight> {
    let row = devices.iter().find(|d| d.device.trim() == device.trim())?;
    Some(DeviceInsight {
        device: row.device.clone(),
        impressions: row.impressions,
        impression_share: share_of(row.impressions, totals.impressions),
        cost: row.cost,
        cost_share: share_of(row.cost, totals.cost),
        ctr: ctr(row.clicks, row.impressions),
    })
}

pub fn summarize(devices: &[DeviceRecord], primary_device: &str, totals: &CampaignTotals) -> DeviceView {
    let primary = device_insight(devices, primary_device, totals);
    if primary.is_none() && !devices.is_empty() {
        tracing::warn!(device = primary_device, "Primary device not found in the devices report");
    }
    DeviceView {
        devices: device_efficiency(devices, totals.cost),
        efficiency: efficiency_points(devices),
        primary,
    }
}
