// Shared fixtures for unit tests
use crate::domain::unemployment::{Dataset, UnemploymentRecord};
use chrono::NaiveDate;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Two regions, two dates each.
pub fn sample_dataset() -> Dataset {
    Dataset::new(vec![
        UnemploymentRecord::new("West Bengal", date(2020, 1, 1), 5.0),
        UnemploymentRecord::new("West Bengal", date(2020, 4, 1), 9.0),
        UnemploymentRecord::new("Kerala", date(2020, 1, 1), 7.0),
        UnemploymentRecord::new("Kerala", date(2020, 4, 1), 6.0),
    ])
}
