//! Grouped aggregation over a [`Dataset`]
//!
//! Rows are grouped by a key (year, season, month) into a `BTreeMap`, so
//! results always come out in the natural order of the key domain even
//! though grouping itself does not depend on record order.

use std::collections::BTreeMap;
use std::fmt::Debug;

use serde::Serialize;

use crate::dataset::{Dataset, Metric, Season, WeatherRecord};

/// Running sum/count/min/max for one group
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupAccumulator {
    pub sum: f64,
    pub count: usize,
    pub min: f64,
    pub max: f64,
}

impl Default for GroupAccumulator {
    fn default() -> Self {
        GroupAccumulator {
            sum: 0.0,
            count: 0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl GroupAccumulator {
    pub fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Arithmetic mean, `None` for an empty group.
    ///
    /// Kept within `[min, max]`; summing equal values can otherwise round
    /// the quotient one ulp past them.
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        // not `f64::clamp`, which panics when NaN inputs leave min > max
        let mean = self.sum / self.count as f64;
        Some(if mean > self.max {
            self.max
        } else if mean < self.min {
            self.min
        } else {
            mean
        })
    }

    /// Summary statistics, `None` for an empty group
    pub fn stats(&self) -> Option<SeasonStats> {
        self.mean().map(|mean| SeasonStats {
            mean,
            min: self.min,
            max: self.max,
            count: self.count,
        })
    }
}

/// Row indices of a dataset grouped by key
#[derive(Debug)]
pub struct GroupBy<'a, K>
where
    K: Debug + Ord + Clone,
{
    /// Row indices per key
    groups: BTreeMap<K, Vec<usize>>,

    /// Source table
    source: &'a Dataset,
}

impl<'a, K> GroupBy<'a, K>
where
    K: Debug + Ord + Clone,
{
    /// Group the rows of `source` by the key returned from `key_fn`
    pub fn new<F>(source: &'a Dataset, key_fn: F) -> Self
    where
        F: Fn(&WeatherRecord) -> K,
    {
        let mut groups: BTreeMap<K, Vec<usize>> = BTreeMap::new();
        for (i, record) in source.iter().enumerate() {
            groups.entry(key_fn(record)).or_default().push(i);
        }

        GroupBy { groups, source }
    }

    /// Number of non-empty groups
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Row count of each group
    pub fn size(&self) -> BTreeMap<K, usize> {
        self.groups
            .iter()
            .map(|(k, indices)| (k.clone(), indices.len()))
            .collect()
    }

    /// Reduce each group's `metric` values into an accumulator
    pub fn aggregate(&self, metric: Metric) -> BTreeMap<K, GroupAccumulator> {
        let records = self.source.records();
        self.groups
            .iter()
            .map(|(key, indices)| {
                let mut acc = GroupAccumulator::default();
                for &i in indices {
                    acc.push(records[i].value(metric));
                }
                (key.clone(), acc)
            })
            .collect()
    }

    /// Mean of `metric` per group
    pub fn mean(&self, metric: Metric) -> BTreeMap<K, f64> {
        self.aggregate(metric)
            .into_iter()
            .filter_map(|(key, acc)| acc.mean().map(|mean| (key, mean)))
            .collect()
    }
}

/// One aggregate value per calendar year, ascending by year
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct YearlySeries {
    points: BTreeMap<i32, f64>,
}

impl YearlySeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the value for `year`
    pub fn insert(&mut self, year: i32, value: f64) {
        self.points.insert(year, value);
    }

    pub fn get(&self, year: i32) -> Option<f64> {
        self.points.get(&year).copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `(year, value)` pairs in ascending year order
    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.points.iter().map(|(&year, &value)| (year, value))
    }

    pub fn years(&self) -> Vec<i32> {
        self.points.keys().copied().collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.values().copied().collect()
    }

    pub fn last_year(&self) -> Option<i32> {
        self.points.keys().next_back().copied()
    }
}

impl FromIterator<(i32, f64)> for YearlySeries {
    fn from_iter<I: IntoIterator<Item = (i32, f64)>>(iter: I) -> Self {
        YearlySeries {
            points: iter.into_iter().collect(),
        }
    }
}

/// Mean/min/max of a metric within one season
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeasonStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Number of records in the season
    pub count: usize,
}

/// Per-season statistics in the fixed season order.
///
/// Seasons without any record are absent rather than filled with NaN.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeasonalSummary {
    seasons: BTreeMap<Season, SeasonStats>,
}

impl SeasonalSummary {
    pub fn get(&self, season: Season) -> Option<&SeasonStats> {
        self.seasons.get(&season)
    }

    pub fn contains(&self, season: Season) -> bool {
        self.seasons.contains_key(&season)
    }

    pub fn len(&self) -> usize {
        self.seasons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seasons.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Season, &SeasonStats)> + '_ {
        self.seasons.iter().map(|(&season, stats)| (season, stats))
    }
}

/// Mean of `metric` for every year present in `dataset`
pub fn yearly_average(dataset: &Dataset, metric: Metric) -> YearlySeries {
    GroupBy::new(dataset, WeatherRecord::year)
        .mean(metric)
        .into_iter()
        .collect()
}

/// Mean/min/max of `metric` for every season present in `dataset`
pub fn seasonal_stats(dataset: &Dataset, metric: Metric) -> SeasonalSummary {
    let seasons = GroupBy::new(dataset, |r: &WeatherRecord| r.season)
        .aggregate(metric)
        .into_iter()
        .filter_map(|(season, acc)| acc.stats().map(|stats| (season, stats)))
        .collect();

    SeasonalSummary { seasons }
}

/// Mean of `metric` per calendar month (1-12) across all years
pub fn monthly_average(dataset: &Dataset, metric: Metric) -> BTreeMap<u32, f64> {
    GroupBy::new(dataset, WeatherRecord::month).mean(metric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(y: i32, m: u32, temp: f64, season: Season) -> WeatherRecord {
        WeatherRecord::new(NaiveDate::from_ymd_opt(y, m, 1).unwrap(), temp, 0.0, 50.0, season)
    }

    #[test]
    fn test_accumulator() {
        let mut acc = GroupAccumulator::default();
        assert_eq!(acc.mean(), None);
        assert!(acc.stats().is_none());

        for v in [4.0, -2.0, 7.0] {
            acc.push(v);
        }
        assert_eq!(acc.count, 3);
        assert_eq!(acc.mean(), Some(3.0));
        assert_eq!(acc.min, -2.0);
        assert_eq!(acc.max, 7.0);
    }

    #[test]
    fn test_mean_of_equal_values_stays_in_range() {
        let mut acc = GroupAccumulator::default();
        for _ in 0..3 {
            acc.push(0.1);
        }
        // 0.1 + 0.1 + 0.1 == 0.30000000000000004
        assert_eq!(acc.mean(), Some(0.1));

        let stats = acc.stats().unwrap();
        assert!(stats.min <= stats.mean && stats.mean <= stats.max);
    }

    #[test]
    fn test_groupby_size_and_order() {
        let dataset = Dataset::new(vec![
            record(2022, 1, 1.0, Season::Winter),
            record(2020, 1, 2.0, Season::Winter),
            record(2022, 2, 3.0, Season::Winter),
        ]);
        let grouped = GroupBy::new(&dataset, WeatherRecord::year);

        assert_eq!(grouped.group_count(), 2);
        let sizes: Vec<_> = grouped.size().into_iter().collect();
        assert_eq!(sizes, vec![(2020, 1), (2022, 2)]);
    }

    #[test]
    fn test_monthly_average() {
        let dataset = Dataset::new(vec![
            record(2020, 1, 2.0, Season::Winter),
            record(2021, 1, 4.0, Season::Winter),
            record(2021, 7, 20.0, Season::Summer),
        ]);
        let monthly = monthly_average(&dataset, Metric::Temperature);
        assert_eq!(monthly.get(&1), Some(&3.0));
        assert_eq!(monthly.get(&7), Some(&20.0));
        assert_eq!(monthly.len(), 2);
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::default();
        assert!(yearly_average(&dataset, Metric::Rainfall).is_empty());
        assert!(seasonal_stats(&dataset, Metric::Rainfall).is_empty());
    }
}
