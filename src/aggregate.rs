//! Pure aggregations over acquired score records.
//!
//! These never mutate their input and keep no state between calls.

use std::collections::HashMap;

use crate::{ChartSeries, CountryAverage, ScoreRecord};

/// Mean score of `country`, matched case-insensitively.
///
/// Surrounding whitespace in the query is ignored. Returns `None` when the
/// query is blank or no record matches, which is distinct from a mean of
/// `0.0`. The value is not rounded.
pub fn average_for(records: &[ScoreRecord], country: &str) -> Option<f64> {
    let query = country.trim();
    if query.is_empty() {
        return None;
    }
    let query = query.to_lowercase();

    let (sum, count) = records
        .iter()
        .filter(|record| record.country.to_lowercase() == query)
        .fold((0.0_f64, 0_usize), |(sum, count), record| {
            (sum + record.score as f64, count + 1)
        });

    (count > 0).then(|| sum / count as f64)
}

/// Mean score per exact (case-sensitive) country name.
///
/// Output follows the order in which each country first appears.
pub fn grouped_averages(records: &[ScoreRecord]) -> Vec<CountryAverage> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, f64, usize)> = Vec::new();

    for record in records {
        let slot = *index.entry(record.country.as_str()).or_insert_with(|| {
            groups.push((record.country.as_str(), 0.0, 0));
            groups.len() - 1
        });
        let group = &mut groups[slot];
        group.1 += record.score as f64;
        group.2 += 1;
    }

    groups
        .into_iter()
        .map(|(country, sum, count)| CountryAverage {
            country: country.to_owned(),
            average: sum / count as f64,
        })
        .collect()
}

/// [`grouped_averages`] as parallel label/value arrays for a line chart.
pub fn chart_series(records: &[ScoreRecord]) -> ChartSeries {
    let (labels, values) = grouped_averages(records)
        .into_iter()
        .map(|entry| (entry.country, entry.average))
        .unzip();
    ChartSeries { labels, values }
}
