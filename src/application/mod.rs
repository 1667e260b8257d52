// Application layer - Aggregation, projection and selection handling
pub mod aggregation;
pub mod dashboard_service;
pub mod dataset_source;
pub mod view;

#[cfg(test)]
pub(crate) mod test_support;
