// Chart and tile domain models
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub rate: f64,
}

impl SeriesPoint {
    pub fn new(date: NaiveDate, rate: f64) -> Self {
        Self { date, rate }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileData {
    pub id: String,
    pub title: String,
    pub unit: String,
    pub value: Option<f64>,
    pub precision: usize,
}

impl TileData {
    pub fn new(id: &str, title: &str, unit: &str, value: Option<f64>, precision: usize) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            unit: unit.to_string(),
            value,
            precision,
        }
    }

    /// "7.00%" style display, or "N/A" when the selection has no data.
    pub fn formatted(&self) -> String {
        match self.value {
            Some(value) => format!("{:.*}{}", self.precision, value, self.unit),
            None => "N/A".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesData {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    pub points: Vec<SeriesPoint>,
}

impl SeriesData {
    pub fn new(id: &str, name: &str, color: Option<&str>, points: Vec<SeriesPoint>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            color: color.map(str::to_string),
            points,
        }
    }
}

/// Fixed vertical annotation on a time axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub date: NaiveDate,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChartData {
    pub id: String,
    pub title: String,
    pub unit: String,
    /// First series is the selection, the rest are reference lines.
    pub series: Vec<SeriesData>,
    pub marker: Marker,
}

impl LineChartData {
    pub fn has_selection_data(&self) -> bool {
        self.series.first().is_some_and(|s| !s.points.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarData {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChartData {
    pub id: String,
    pub title: String,
    pub unit: String,
    pub bars: Vec<BarData>,
}
