// Impressions -> clicks -> conversions funnel
use shared::dashboard::{Funnel, FunnelStage, FunnelStageKind};

use super::{conversion_rate, ctr};

/// Builds the three-stage funnel. Each percentage is relative to the previous
/// stage: 100 for impressions, CTR for clicks, conversion rate for conversions.
pub fn build_funnel(impressions: f64, clicks: f64, conversions: f64) -> Funnel {
    Funnel {
        stages: vec![
            FunnelStage {
                stage: FunnelStageKind::Impressions,
                count: impressions,
                percentage: 100.0,
            },
            FunnelStage {
                stage: FunnelStageKind::Clicks,
                count: clicks,
                percentage: ctr(clicks, impressions),
            },
            FunnelStage {
                stage: FunnelStageKind::Conversions,
                count: conversions,
                percentage: conversion_rate(conversions, clicks),
            },
        ],
    }
}
