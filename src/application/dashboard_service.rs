// Dashboard service - Projects (dataset, selection) into a rendered dashboard
use crate::application::aggregation::{
    compute_national_series, compute_region_averages, derive_view,
};
use crate::application::dataset_source::DatasetSource;
use crate::domain::chart::{
    BarChartData, BarData, LineChartData, Marker, SeriesData, SeriesPoint, TileData,
};
use crate::domain::dashboard::{Dashboard, DerivedView, RegionAverage};
use crate::domain::error::{DataLoadError, InvalidRegionError};
use crate::domain::unemployment::{ALL_REGIONS, Dataset, SelectionState};
use crate::infrastructure::config::DashboardSettings;
use std::sync::Arc;

const SELECTION_COLOR: &str = "#1f77b4";
const NATIONAL_COLOR: &str = "#7f7f7f";

#[derive(Clone)]
pub struct DashboardService {
    dataset: Arc<Dataset>,
    national_series: Arc<Vec<SeriesPoint>>,
    region_averages: Arc<Vec<RegionAverage>>,
    settings: DashboardSettings,
}

impl DashboardService {
    /// Load the dataset from `source` and precompute the selection-independent aggregates.
    pub async fn bootstrap(
        source: Arc<dyn DatasetSource>,
        settings: DashboardSettings,
    ) -> Result<Self, DataLoadError> {
        tracing::info!("Loading unemployment data from {}", source.describe());
        let dataset = source.load().await?;
        Ok(Self::new(Arc::new(dataset), settings))
    }

    pub fn new(dataset: Arc<Dataset>, settings: DashboardSettings) -> Self {
        let national_series = compute_national_series(&dataset, settings.national_aggregation);
        let region_averages = compute_region_averages(&dataset);

        tracing::info!(
            records = dataset.len(),
            regions = dataset.regions().len(),
            national_points = national_series.len(),
            "Dataset ready"
        );

        Self {
            dataset,
            national_series: Arc::new(national_series),
            region_averages: Arc::new(region_averages),
            settings,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Selector values: the sentinel first, then every region by name.
    pub fn selectable_regions(&self) -> Vec<String> {
        std::iter::once(ALL_REGIONS.to_string())
            .chain(self.dataset.regions().iter().cloned())
            .collect()
    }

    pub fn resolve_selection(&self, region: &str) -> Result<SelectionState, InvalidRegionError> {
        let region = region.trim();
        if region == ALL_REGIONS {
            Ok(SelectionState::All)
        } else if self.dataset.contains_region(region) {
            Ok(SelectionState::Region(region.to_string()))
        } else {
            Err(InvalidRegionError(region.to_string()))
        }
    }

    pub fn derive(&self, selection: &SelectionState) -> DerivedView {
        derive_view(
            &self.dataset,
            selection,
            &self.national_series,
            &self.region_averages,
        )
    }

    pub fn render(&self, selection: &SelectionState) -> Dashboard {
        let view = self.derive(selection);

        let tiles = vec![
            TileData::new("avg", "Average Unemployment Rate", "%", view.kpis.avg, 2),
            TileData::new("peak", "Peak Unemployment Rate", "%", view.kpis.peak, 2),
        ];

        let trend_chart = self.build_trend_chart(&view);
        let region_chart = Self::build_region_chart(&view);

        Dashboard::new(
            self.settings.title.clone(),
            view.selection,
            tiles,
            trend_chart,
            region_chart,
        )
    }

    fn build_trend_chart(&self, view: &DerivedView) -> LineChartData {
        let mut series = vec![SeriesData::new(
            "selection",
            &view.selection,
            Some(SELECTION_COLOR),
            view.filtered_series.clone(),
        )];

        // The national line would duplicate the selection when "All" is picked
        if view.selection != ALL_REGIONS {
            series.push(SeriesData::new(
                "national",
                "National",
                Some(NATIONAL_COLOR),
                view.national_series.clone(),
            ));
        }

        LineChartData {
            id: "trend".to_string(),
            title: format!("Unemployment Trend – {}", view.selection),
            unit: "%".to_string(),
            series,
            marker: Marker {
                date: self.settings.lockdown_date,
                label: self.settings.lockdown_label.clone(),
            },
        }
    }

    fn build_region_chart(view: &DerivedView) -> BarChartData {
        let bars = view
            .region_averages
            .iter()
            .map(|a| BarData {
                label: a.region.clone(),
                value: a.average_rate,
            })
            .collect();

        BarChartData {
            id: "region_averages".to_string(),
            title: "Average Unemployment Rate per Region".to_string(),
            unit: "%".to_string(),
            bars,
        }
    }
}
