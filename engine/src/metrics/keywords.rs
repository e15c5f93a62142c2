// Keyword and search term analysis
use shared::dashboard::{EfficiencyPoint, KeywordView};
use shared::models::{KeywordRecord, SearchTermRecord};

use super::ranking::top_n;
use super::{cpc, ctr};

/// Keywords that cost money without a single click ("wasted spend").
pub fn zero_click_spend(keywords: &[KeywordRecord]) -> Vec<KeywordRecord> {
    keywords
        .iter()
        .filter(|k| k.cost > 0.0 && k.clicks == 0.0)
        .cloned()
        .collect()
}

pub fn total_cost(keywords: &[KeywordRecord]) -> f64 {
    keywords.iter().map(|k| k.cost).sum()
}

/// Cost per click against the exported CTR, for keywords that got clicks.
pub fn efficiency_points(keywords: &[KeywordRecord]) -> Vec<EfficiencyPoint> {
    keywords
        .iter()
        .filter(|k| k.clicks > 0.0)
        .map(|k| EfficiencyPoint {
            label: k.keyword.clone(),
            cpc: cpc(k.cost, k.clicks),
            ctr: k.ctr,
        })
        .collect()
}

pub fn top_search_terms(terms: &[SearchTermRecord], n: usize) -> Vec<SearchTermRecord> {
    top_n(terms, n, |t| t.clicks)
}

/// CTR of a search term computed from its own clicks and impressions.
pub fn search_term_ctr(term: &SearchTermRecord) -> f64 {
    ctr(term.clicks, term.impressions)
}

/// Scatter points for search terms. CTR comes from the term's own clicks and
/// impressions since the search terms report has no CTR column.
pub fn search_term_points(terms: &[SearchTermRecord]) -> Vec<EfficiencyPoint> {
    terms
        .iter()
        .map(|t| EfficiencyPoint {
            label: t.term.clone(),
            cpc: cpc(t.cost, t.clicks),
            ctr: search_term_ctr(t),
        })
        .collect()
}

pub fn summarize(keywords: &[KeywordRecord], terms: &[SearchTermRecord], top: usize) -> KeywordView {
    let active: Vec<KeywordRecord> = keywords.iter().filter(|k| k.clicks > 0.0).cloned().collect();
    let wasted = zero_click_spend(keywords);
    let wasted_cost = total_cost(&wasted);
    let top_terms = top_search_terms(terms, top);

    KeywordView {
        total: keywords.len(),
        with_clicks: active.len(),
        without_clicks: keywords.iter().filter(|k| k.clicks == 0.0).count(),
        wasted,
        wasted_cost,
        top_by_ctr: top_n(&active, top, |k| k.ctr),
        top_by_clicks: top_n(&active, top, |k| k.clicks),
        efficiency: efficiency_points(&active),
        search_term_efficiency: search_term_points(&top_terms),
        top_search_terms: top_terms,
    }
}
