// Audience breakdowns: dominant segments and the share held by focus age bands.
use shared::dashboard::AudienceView;
use shared::models::DemographicRecord;

use super::ranking::dominant;
use super::share_of;

/// Segment with the most impressions; the first one wins a tie.
pub fn dominant_segment(records: &[DemographicRecord]) -> Option<DemographicRecord> {
    dominant(records, |r| r.impressions).cloned()
}

/// Impressions of the age bands listed in `bands`, matched on the trimmed label.
pub fn focus_impressions(age: &[DemographicRecord], bands: &[String]) -> f64 {
    age.iter()
        .filter(|r| {
            r.age_band
                .as_deref()
                .is_some_and(|band| bands.iter().any(|b| b.trim() == band.trim()))
        })
        .map(|r| r.impressions)
        .sum()
}

pub fn focus_share(age: &[DemographicRecord], bands: &[String]) -> f64 {
    let total: f64 = age.iter().map(|r| r.impressions).sum();
    share_of(focus_impressions(age, bands), total)
}

pub fn summarize(
    age: &[DemographicRecord],
    sex: &[DemographicRecord],
    sex_age: &[DemographicRecord],
    focus_bands: &[String],
) -> AudienceView {
    AudienceView {
        age: age.to_vec(),
        sex: sex.to_vec(),
        sex_age: sex_age.to_vec(),
        top_age: dominant_segment(age),
        top_sex: dominant_segment(sex),
        top_segment: dominant_segment(sex_age),
        focus_bands: focus_bands.to_vec(),
        focus_impressions: focus_impressions(age, focus_bands),
        focus_share: focus_share(age, focus_bands),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn age(band: &str, impressions: f64, share: f64) -> DemographicRecord {
        DemographicRecord {
            sex: None,
            age_band: Some(band.to_string()),
            impressions,
            share_of_known: share,
        }
    }

    fn segment(sex: &str, band: &str, impressions: f64) -> DemographicRecord {
        DemographicRecord {
            sex: Some(sex.to_string()),
            age_band: Some(band.to_string()),
            impressions,
            share_of_known: 0.0,
        }
    }

    fn focus() -> Vec<String> {
        vec!["25 a 34".to_string(), "35 a 44".to_string()]
    }

    #[test]
    fn test_dominant_segment_first_occurrence_on_tie() {
        let rows = vec![
            segment("Feminino", "35 a 44", 500.0),
            segment("Masculino", "35 a 44", 500.0),
            segment("Feminino", "25 a 34", 100.0),
        ];
        let top = dominant_segment(&rows).unwrap();
        assert_eq!(top.label(), "Feminino 35 a 44");
        assert_eq!(dominant_segment(&[]), None);
    }

    #[test]
    fn test_focus_share() {
        let rows = vec![
            age("18 a 24", 100.0, 10.0),
            age("25 a 34", 300.0, 30.0),
            age("35 a 44", 400.0, 40.0),
            age("65+", 200.0, 20.0),
        ];
        assert_eq!(focus_impressions(&rows, &focus()), 700.0);
        assert_eq!(focus_share(&rows, &focus()), 70.0);
    }

    #[test]
    fn test_focus_share_without_impressions_is_zero() {
        assert_eq!(focus_share(&[], &focus()), 0.0);
        let rows = vec![age("25 a 34", 0.0, 0.0)];
        assert_eq!(focus_share(&rows, &focus()), 0.0);
    }

    #[test]
    fn test_summary_picks_each_breakdown() {
        let ages = vec![age("25 a 34", 10.0, 40.0), age("35 a 44", 15.0, 60.0)];
        let sexes = vec![
            DemographicRecord { sex: Some("Masculino".into()), age_band: None, impressions: 9.0, share_of_known: 36.0 },
            DemographicRecord { sex: Some("Feminino".into()), age_band: None, impressions: 16.0, share_of_known: 64.0 },
        ];
        let view = summarize(&ages, &sexes, &[], &focus());
        assert_eq!(view.top_age.unwrap().age_band.as_deref(), Some("35 a 44"));
        assert_eq!(view.top_sex.unwrap().sex.as_deref(), Some("Feminino"));
        assert_eq!(view.top_segment, None);
        assert_eq!(view.focus_share, 100.0);
    }
}
