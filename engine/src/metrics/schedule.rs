// Day-of-week and hour-of-day distribution of impressions.
use chrono::Weekday;
use shared::dashboard::{Heatmap, ScheduleView};
use shared::models::{DayHourRecord, DayRecord, HourRecord};

use super::ranking::dominant;

/// Row labels of the day charts, Sunday first as in the export.
pub const WEEKDAY_LABELS: [&str; 7] = [
    "Domingo",
    "Segunda-feira",
    "Terça-feira",
    "Quarta-feira",
    "Quinta-feira",
    "Sexta-feira",
    "Sábado",
];

const HOURS_PER_DAY: usize = 24;

/// Resolves a day label such as "Terça-feira", "terca" or "Tuesday".
pub fn weekday_from_label(label: &str) -> Option<Weekday> {
    let folded: String = label
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' => 'a',
            'ç' => 'c',
            'é' | 'ê' => 'e',
            other => other,
        })
        .collect();
    let stem = folded.strip_suffix("-feira").unwrap_or(&folded).trim();

    match stem {
        "domingo" | "dom" => Some(Weekday::Sun),
        "segunda" | "seg" => Some(Weekday::Mon),
        "terca" | "ter" => Some(Weekday::Tue),
        "quarta" | "qua" => Some(Weekday::Wed),
        "quinta" | "qui" => Some(Weekday::Thu),
        "sexta" | "sex" => Some(Weekday::Fri),
        "sabado" | "sab" => Some(Weekday::Sat),
        other => other.parse::<Weekday>().ok(),
    }
}

/// Position of a day in the Sunday-first week.
pub fn weekday_position(label: &str) -> Option<usize> {
    weekday_from_label(label).map(|d| d.num_days_from_sunday() as usize)
}

/// Reads the starting hour of labels such as "0", "13" or "13:00".
pub fn hour_from_label(label: &str) -> Option<usize> {
    let digits: String = label.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse::<usize>().ok().filter(|h| *h < HOURS_PER_DAY)
}

/// Day records in Sunday..Saturday order. Labels that are not a weekday keep
/// their input order after Saturday. Absent days are not filled in.
pub fn order_weekdays(days: &[DayRecord]) -> Vec<DayRecord> {
    let mut ordered = days.to_vec();
    ordered.sort_by_key(|d| weekday_position(&d.day).unwrap_or(WEEKDAY_LABELS.len()));
    ordered
}

/// Day with the most impressions, ties going to the earlier weekday.
pub fn peak_day(days: &[DayRecord]) -> Option<DayRecord> {
    dominant(&order_weekdays(days), |d| d.impressions).cloned()
}

pub fn order_hours(hours: &[HourRecord]) -> Vec<HourRecord> {
    let mut ordered = hours.to_vec();
    ordered.sort_by_key(|h| hour_from_label(&h.hour).unwrap_or(HOURS_PER_DAY));
    ordered
}

pub fn peak_hour(hours: &[HourRecord]) -> Option<HourRecord> {
    dominant(&order_hours(hours), |h| h.impressions).cloned()
}

/// 7x24 impressions grid, Sunday first. Repeated cells are summed.
pub fn heatmap(day_hours: &[DayHourRecord]) -> Heatmap {
    let mut cells = vec![vec![0.0; HOURS_PER_DAY]; WEEKDAY_LABELS.len()];
    let mut skipped = 0;
    for record in day_hours {
        match (weekday_position(&record.day), hour_from_label(&record.hour)) {
            (Some(day), Some(hour)) => cells[day][hour] += record.impressions,
            _ => skipped += 1,
        }
    }
    if skipped > 0 {
        tracing::debug!(skipped, "Day/hour records outside the weekly grid");
    }
    Heatmap {
        days: WEEKDAY_LABELS.iter().map(|d| d.to_string()).collect(),
        cells,
        skipped,
    }
}

pub fn summarize(days: &[DayRecord], hours: &[HourRecord], day_hours: &[DayHourRecord]) -> ScheduleView {
    ScheduleView {
        days: order_weekdays(days),
        peak_day: peak_day(days),
        hours: order_hours(hours),
        peak_hour: peak_hour(hours),
        heatmap: heatmap(day_hours),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(label: &str, impressions: f64) -> DayRecord {
        DayRecord { day: label.to_string(), impressions }
    }

    #[test]
    fn test_weekday_labels_resolve() {
        assert_eq!(weekday_from_label("Domingo"), Some(Weekday::Sun));
        assert_eq!(weekday_from_label("Terça-feira"), Some(Weekday::Tue));
        assert_eq!(weekday_from_label("terca-feira"), Some(Weekday::Tue));
        assert_eq!(weekday_from_label(" SÁBADO "), Some(Weekday::Sat));
        assert_eq!(weekday_from_label("Friday"), Some(Weekday::Fri));
        assert_eq!(weekday_from_label("Feriado"), None);
        for (idx, label) in WEEKDAY_LABELS.iter().enumerate() {
            assert_eq!(weekday_position(label), Some(idx));
        }
    }

    #[test]
    fn test_order_weekdays_is_not_lexical() {
        let input = vec![
            day("Sábado", 7.0),
            day("Quarta-feira", 4.0),
            day("Domingo", 1.0),
            day("Sexta-feira", 6.0),
            day("Segunda-feira", 2.0),
            day("Quinta-feira", 5.0),
            day("Terça-feira", 3.0),
        ];
        let ordered = order_weekdays(&input);
        let labels: Vec<&str> = ordered.iter().map(|d| d.day.as_str()).collect();
        assert_eq!(labels, WEEKDAY_LABELS.to_vec());
    }

    #[test]
    fn test_order_weekdays_keeps_unknown_labels_last() {
        let input = vec![day("Total", 99.0), day("Sábado", 1.0), day("Domingo", 2.0)];
        let ordered = order_weekdays(&input);
        let labels: Vec<&str> = ordered.iter().map(|d| d.day.as_str()).collect();
        assert_eq!(labels, vec!["Domingo", "Sábado", "Total"]);
    }

    #[test]
    fn test_peak_day_uses_weekday_order_for_ties() {
        let input = vec![day("Sábado", 10.0), day("Segunda-feira", 10.0), day("Domingo", 3.0)];
        assert_eq!(peak_day(&input).unwrap().day, "Segunda-feira");
        assert_eq!(peak_day(&[]), None);
    }

    #[test]
    fn test_hours_sort_numerically() {
        let hours = vec![
            HourRecord { hour: "10".into(), impressions: 5.0 },
            HourRecord { hour: "2".into(), impressions: 9.0 },
            HourRecord { hour: "n/d".into(), impressions: 1.0 },
            HourRecord { hour: "0".into(), impressions: 9.0 },
        ];
        let ordered = order_hours(&hours);
        let labels: Vec<&str> = ordered.iter().map(|h| h.hour.as_str()).collect();
        assert_eq!(labels, vec!["0", "2", "10", "n/d"]);
        assert_eq!(peak_hour(&hours).unwrap().hour, "0");
        assert_eq!(hour_from_label("13:00"), Some(13));
        assert_eq!(hour_from_label("24"), None);
    }

    #[test]
    fn test_heatmap_grid() {
        let records = vec![
            DayHourRecord { day: "Domingo".into(), hour: "0".into(), impressions: 4.0 },
            DayHourRecord { day: "Domingo".into(), hour: "0".into(), impressions: 1.0 },
            DayHourRecord { day: "Sábado".into(), hour: "23".into(), impressions: 7.0 },
            DayHourRecord { day: "Feriado".into(), hour: "1".into(), impressions: 7.0 },
            DayHourRecord { day: "Segunda-feira".into(), hour: "99".into(), impressions: 7.0 },
        ];
        let grid = heatmap(&records);
        assert_eq!(grid.days.len(), 7);
        assert!(grid.cells.iter().all(|row| row.len() == 24));
        assert_eq!(grid.cells[0][0], 5.0);
        assert_eq!(grid.cells[6][23], 7.0);
        assert_eq!(grid.skipped, 2);
    }
}
