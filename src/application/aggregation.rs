//! Pure recompute functions behind the dashboard.
//!
//! Everything here is a function of the immutable [`Dataset`] and an explicit
//! [`SelectionState`]; nothing reads ambient state, so each piece can be tested
//! without an HTTP layer.

use crate::domain::chart::SeriesPoint;
use crate::domain::dashboard::{DerivedView, Kpis, RegionAverage};
use crate::domain::unemployment::{Dataset, SelectionState};
use crate::infrastructure::config::NationalAggregation;
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// Combine every region's rate per date into one national series, ascending by date.
pub fn compute_national_series(dataset: &Dataset, method: NationalAggregation) -> Vec<SeriesPoint> {
    let mut by_date: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    for record in dataset.records() {
        by_date
            .entry(record.date)
            .or_default()
            .push(record.unemployment_rate);
    }

    by_date
        .into_iter()
        .filter_map(|(date, mut rates)| {
            let value = match method {
                NationalAggregation::Mean => mean(&rates),
                NationalAggregation::Median => median(&mut rates),
            }?;
            Some(SeriesPoint::new(date, value))
        })
        .collect()
}

/// Records matching the selection, sorted by date ascending.
///
/// For [`SelectionState::All`] every record contributes a point. A region with
/// no records yields an empty series.
pub fn compute_filtered_series(dataset: &Dataset, selection: &SelectionState) -> Vec<SeriesPoint> {
    let mut series: Vec<SeriesPoint> = dataset
        .records()
        .iter()
        .filter(|r| selection.matches(&r.region))
        .map(|r| SeriesPoint::new(r.date, r.unemployment_rate))
        .collect();

    series.sort_by_key(|p| p.date);
    series
}

pub fn compute_kpis(series: &[SeriesPoint]) -> Kpis {
    let rates: Vec<f64> = series.iter().map(|p| p.rate).collect();
    Kpis {
        avg: mean(&rates),
        peak: rates.iter().copied().reduce(f64::max),
    }
}

/// Mean rate per region, highest first; ties ordered by region name.
pub fn compute_region_averages(dataset: &Dataset) -> Vec<RegionAverage> {
    let mut totals: HashMap<&str, (f64, usize)> = HashMap::new();
    for record in dataset.records() {
        let entry = totals.entry(record.region.as_str()).or_insert((0.0, 0));
        entry.0 += record.unemployment_rate;
        entry.1 += 1;
    }

    let mut averages: Vec<RegionAverage> = totals
        .into_iter()
        .map(|(region, (sum, count))| RegionAverage {
            region: region.to_string(),
            average_rate: sum / count as f64,
            record_count: count,
        })
        .collect();

    averages.sort_by(|a, b| {
        b.average_rate
            .total_cmp(&a.average_rate)
            .then_with(|| a.region.cmp(&b.region))
    });
    averages
}

/// Assemble the per-selection view from the cached, selection-independent parts.
pub fn derive_view(
    dataset: &Dataset,
    selection: &SelectionState,
    national_series: &[SeriesPoint],
    region_averages: &[RegionAverage],
) -> DerivedView {
    let selected = compute_filtered_series(dataset, selection);
    let kpis = compute_kpis(&selected);

    // The "All" trend line is the national series; KPIs still cover every record.
    let filtered_series = match selection {
        SelectionState::All => national_series.to_vec(),
        SelectionState::Region(_) => selected,
    };

    DerivedView {
        selection: selection.label().to_string(),
        filtered_series,
        national_series: national_series.to_vec(),
        kpis,
        region_averages: region_averages.to_vec(),
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{date, sample_dataset};
    use crate::domain::unemployment::UnemploymentRecord;

    fn west_bengal() -> SelectionState {
        SelectionState::Region("West Bengal".to_string())
    }

    #[test]
    fn test_filtered_series_only_contains_region_sorted() {
        let dataset = Dataset::new(vec![
            UnemploymentRecord::new("Kerala", date(2020, 4, 1), 6.0),
            UnemploymentRecord::new("West Bengal", date(2020, 4, 1), 9.0),
            UnemploymentRecord::new("Kerala", date(2020, 1, 1), 7.0),
            UnemploymentRecord::new("Kerala", date(2020, 2, 1), 8.5),
        ]);

        let series = compute_filtered_series(&dataset, &SelectionState::Region("Kerala".to_string()));

        assert_eq!(
            series,
            vec![
                SeriesPoint::new(date(2020, 1, 1), 7.0),
                SeriesPoint::new(date(2020, 2, 1), 8.5),
                SeriesPoint::new(date(2020, 4, 1), 6.0),
            ]
        );
    }

    #[test]
    fn test_filtered_series_for_every_region() {
        let dataset = sample_dataset();
        for region in dataset.regions() {
            let selection = SelectionState::Region(region.clone());
            let series = compute_filtered_series(&dataset, &selection);
            let expected = dataset.records().iter().filter(|r| &r.region == region).count();

            assert_eq!(series.len(), expected);
            assert!(series.windows(2).all(|w| w[0].date <= w[1].date));
        }
    }

    #[test]
    fn test_filtered_series_unknown_region_is_empty() {
        let series = compute_filtered_series(&sample_dataset(), &SelectionState::Region("Goa".to_string()));
        assert!(series.is_empty());
    }

    #[test]
    fn test_kpis_mean_and_peak() {
        let series = compute_filtered_series(&sample_dataset(), &west_bengal());
        let kpis = compute_kpis(&series);

        assert_eq!(kpis.avg, Some(7.0));
        assert_eq!(kpis.peak, Some(9.0));
    }

    #[test]
    fn test_kpis_empty_series() {
        let kpis = compute_kpis(&[]);
        assert_eq!(kpis.avg, None);
        assert_eq!(kpis.peak, None);
    }

    #[test]
    fn test_region_averages_order() {
        let averages = compute_region_averages(&sample_dataset());

        assert_eq!(averages.len(), 2);
        assert_eq!(averages[0].region, "West Bengal");
        assert_eq!(averages[0].average_rate, 7.0);
        assert_eq!(averages[1].region, "Kerala");
        assert_eq!(averages[1].average_rate, 6.5);
    }

    #[test]
    fn test_region_averages_ties_break_on_name() {
        let dataset = Dataset::new(vec![
            UnemploymentRecord::new("Tripura", date(2020, 1, 1), 4.0),
            UnemploymentRecord::new("Assam", date(2020, 1, 1), 4.0),
            UnemploymentRecord::new("Haryana", date(2020, 1, 1), 20.0),
        ]);

        let regions: Vec<String> = compute_region_averages(&dataset)
            .into_iter()
            .map(|a| a.region)
            .collect();
        assert_eq!(regions, vec!["Haryana", "Assam", "Tripura"]);
    }

    #[test]
    fn test_region_averages_reconstruct_overall_mean() {
        let dataset = Dataset::new(vec![
            UnemploymentRecord::new("Assam", date(2020, 1, 1), 4.0),
            UnemploymentRecord::new("Assam", date(2020, 2, 1), 5.5),
            UnemploymentRecord::new("Assam", date(2020, 3, 1), 11.0),
            UnemploymentRecord::new("Bihar", date(2020, 1, 1), 10.0),
            UnemploymentRecord::new("Goa", date(2020, 2, 1), 2.5),
            UnemploymentRecord::new("Goa", date(2020, 5, 1), 13.0),
        ]);

        let averages = compute_region_averages(&dataset);
        assert_eq!(averages.len(), dataset.regions().len());

        let weighted: f64 = averages
            .iter()
            .map(|a| a.average_rate * a.record_count as f64)
            .sum();
        let total: usize = averages.iter().map(|a| a.record_count).sum();
        let overall = dataset.overall_mean().unwrap();

        assert!((weighted / total as f64 - overall).abs() < 1e-9);
    }

    #[test]
    fn test_national_series_mean_per_date() {
        let national = compute_national_series(&sample_dataset(), NationalAggregation::Mean);

        assert_eq!(
            national,
            vec![
                SeriesPoint::new(date(2020, 1, 1), 6.0),
                SeriesPoint::new(date(2020, 4, 1), 7.5),
            ]
        );
    }

    #[test]
    fn test_national_series_median() {
        let dataset = Dataset::new(vec![
            UnemploymentRecord::new("Assam", date(2020, 1, 1), 4.0),
            UnemploymentRecord::new("Bihar", date(2020, 1, 1), 10.0),
            UnemploymentRecord::new("Goa", date(2020, 1, 1), 30.0),
            UnemploymentRecord::new("Goa", date(2020, 2, 1), 3.0),
            UnemploymentRecord::new("Bihar", date(2020, 2, 1), 5.0),
        ]);

        let national = compute_national_series(&dataset, NationalAggregation::Median);
        assert_eq!(
            national,
            vec![
                SeriesPoint::new(date(2020, 1, 1), 10.0),
                SeriesPoint::new(date(2020, 2, 1), 4.0),
            ]
        );
    }

    #[test]
    fn test_national_series_independent_of_selection() {
        let dataset = sample_dataset();
        let national = compute_national_series(&dataset, NationalAggregation::Mean);
        let averages = compute_region_averages(&dataset);

        let all = derive_view(&dataset, &SelectionState::All, &national, &averages);
        let wb = derive_view(&dataset, &west_bengal(), &national, &averages);

        assert_eq!(all.national_series, wb.national_series);
        assert_eq!(all.region_averages, wb.region_averages);
    }

    #[test]
    fn test_all_selection_uses_every_record_for_kpis() {
        let dataset = sample_dataset();
        let national = compute_national_series(&dataset, NationalAggregation::Mean);
        let view = derive_view(&dataset, &SelectionState::All, &national, &[]);

        assert_eq!(view.filtered_series, national);
        assert_eq!(view.kpis.avg, Some(6.75));
        assert_eq!(view.kpis.peak, Some(9.0));
    }
}
