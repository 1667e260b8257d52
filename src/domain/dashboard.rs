// Dashboard domain model
use super::chart::{BarChartData, LineChartData, SeriesPoint, TileData};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Kpis {
    pub avg: Option<f64>,
    pub peak: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionAverage {
    pub region: String,
    pub average_rate: f64,
    pub record_count: usize,
}

/// Everything recomputed for one selection. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedView {
    pub selection: String,
    pub filtered_series: Vec<SeriesPoint>,
    pub national_series: Vec<SeriesPoint>,
    pub kpis: Kpis,
    pub region_averages: Vec<RegionAverage>,
}

/// Rendered output handed to the HTTP layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub selection: String,
    pub tiles: Vec<TileData>,
    pub trend_chart: LineChartData,
    pub region_chart: BarChartData,
}

impl Dashboard {
    pub fn new(
        title: String,
        selection: String,
        tiles: Vec<TileData>,
        trend_chart: LineChartData,
        region_chart: BarChartData,
    ) -> Self {
        Self {
            title,
            selection,
            tiles,
            trend_chart,
            region_chart,
        }
    }
}
