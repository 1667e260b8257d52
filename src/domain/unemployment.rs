// Unemployment domain model
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Selector value standing for the national view across every region.
pub const ALL_REGIONS: &str = "All";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnemploymentRecord {
    pub region: String,
    pub date: NaiveDate,
    pub unemployment_rate: f64,
}

impl UnemploymentRecord {
    pub fn new(region: impl Into<String>, date: NaiveDate, unemployment_rate: f64) -> Self {
        Self {
            region: region.into(),
            date,
            unemployment_rate,
        }
    }
}

/// Immutable table of records, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<UnemploymentRecord>,
    regions: Vec<String>,
}

impl Dataset {
    pub fn new(records: Vec<UnemploymentRecord>) -> Self {
        let regions = records
            .iter()
            .map(|r| r.region.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();

        Self { records, regions }
    }

    pub fn records(&self) -> &[UnemploymentRecord] {
        &self.records
    }

    /// Distinct regions, sorted by name.
    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    pub fn contains_region(&self, region: &str) -> bool {
        self.regions
            .binary_search_by(|r| r.as_str().cmp(region))
            .is_ok()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn overall_mean(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        let sum: f64 = self.records.iter().map(|r| r.unemployment_rate).sum();
        Some(sum / self.records.len() as f64)
    }
}

/// The region currently picked in the selector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    All,
    Region(String),
}

impl SelectionState {
    pub fn label(&self) -> &str {
        match self {
            SelectionState::All => ALL_REGIONS,
            SelectionState::Region(name) => name,
        }
    }

    pub fn matches(&self, region: &str) -> bool {
        match self {
            SelectionState::All => true,
            SelectionState::Region(name) => name == region,
        }
    }
}

impl fmt::Display for SelectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
