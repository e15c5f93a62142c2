// Ranking helpers shared by the keyword, search term and demographic views.
use std::cmp::Ordering;

/// The `n` records with the largest `key`, largest first. Equal keys keep
/// their input order. NaN keys rank below every number.
pub fn top_n<T: Clone>(records: &[T], n: usize, key: impl Fn(&T) -> f64) -> Vec<T> {
    let mut ranked: Vec<(f64, &T)> = records.iter().map(|r| (key(r), r)).collect();
    // sort_by is stable, so ties stay in input order.
    ranked.sort_by(|a, b| descending(a.0, b.0));
    ranked.into_iter().take(n).map(|(_, r)| r.clone()).collect()
}

/// The record with the largest `key`; the first one wins a tie.
pub fn dominant<T>(records: &[T], key: impl Fn(&T) -> f64) -> Option<&T> {
    let mut best: Option<(f64, &T)> = None;
    for record in records {
        let value = key(record);
        let replaces = match best {
            None => true,
            Some((best_value, _)) => value > best_value || (best_value.is_nan() && !value.is_nan()),
        };
        if replaces {
            best = Some((value, record));
        }
    }
    best.map(|(_, record)| record)
}

fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(&'static str, f64);

    fn rows() -> Vec<Row> {
        vec![Row("a", 3.0), Row("b", 9.0), Row("c", 3.0), Row("d", 1.0), Row("e", 9.0)]
    }

    #[test]
    fn test_top_n_orders_descending_with_stable_ties() {
        let top = top_n(&rows(), 3, |r| r.1);
        assert_eq!(top, vec![Row("b", 9.0), Row("e", 9.0), Row("a", 3.0)]);
    }

    #[test]
    fn test_top_n_larger_than_collection_returns_everything() {
        let top = top_n(&rows(), 50, |r| r.1);
        assert_eq!(top.len(), 5);
        assert!(top.windows(2).all(|w| w[0].1 >= w[1].1));
        assert_eq!(top[2], Row("a", 3.0));
        assert_eq!(top[3], Row("c", 3.0));
    }

    #[test]
    fn test_top_n_lengths() {
        assert!(top_n(&rows(), 0, |r| r.1).is_empty());
        assert!(top_n::<Row>(&[], 10, |r| r.1).is_empty());
        assert_eq!(top_n(&rows(), 2, |r| r.1).len(), 2);
    }

    #[test]
    fn test_top_n_puts_nan_last() {
        let data = vec![Row("nan", f64::NAN), Row("one", 1.0)];
        let top = top_n(&data, 2, |r| r.1);
        assert_eq!(top[0].0, "one");
        assert_eq!(top[1].0, "nan");
    }

    #[test]
    fn test_dominant_first_occurrence_wins() {
        assert_eq!(dominant(&rows(), |r| r.1), Some(&Row("b", 9.0)));
        assert_eq!(dominant::<Row>(&[], |r| r.1), None);
    }

    #[test]
    fn test_dominant_skips_nan_when_numbers_exist() {
        let data = vec![Row("nan", f64::NAN), Row("two", 2.0), Row("one", 1.0)];
        assert_eq!(dominant(&data, |r| r.1).map(|r| r.0), Some("two"));
    }
}
