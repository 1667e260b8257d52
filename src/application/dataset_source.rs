// Source trait for the one-shot dataset load
use crate::domain::error::DataLoadError;
use crate::domain::unemployment::Dataset;
use async_trait::async_trait;

#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Human readable location, used in logs
    fn describe(&self) -> String;

    /// Read and clean the whole dataset. Called once at startup.
    async fn load(&self) -> Result<Dataset, DataLoadError>;
}
