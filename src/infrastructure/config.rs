use chrono::NaiveDate;
use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DataSettings {
    pub path: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("Unemployment_Rate_upto_11_2020.csv"),
        }
    }
}

/// How the national trend combines the regions reporting on a date.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NationalAggregation {
    #[default]
    Mean,
    Median,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DashboardSettings {
    pub title: String,
    pub lockdown_date: NaiveDate,
    pub lockdown_label: String,
    pub national_aggregation: NationalAggregation,
    pub default_region: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            title: "India Unemployment Analysis Dashboard".to_string(),
            lockdown_date: NaiveDate::from_ymd_opt(2020, 3, 25).unwrap_or_default(),
            lockdown_label: "Lockdown start".to_string(),
            national_aggregation: NationalAggregation::Mean,
            default_region: crate::domain::unemployment::ALL_REGIONS.to_string(),
        }
    }
}

pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false));

    deserialize(builder)
}

fn deserialize(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<AppConfig> {
    let settings = builder.build()?;
    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    fn from_toml(toml: &str) -> anyhow::Result<AppConfig> {
        deserialize(config::Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    #[test]
    fn test_defaults_without_file() {
        let config = deserialize(config::Config::builder()).unwrap();

        assert_eq!(config.server.port, 8501);
        assert_eq!(config.dashboard.default_region, "All");
        assert_eq!(config.dashboard.national_aggregation, NationalAggregation::Mean);
        assert_eq!(
            config.dashboard.lockdown_date,
            NaiveDate::from_ymd_opt(2020, 3, 25).unwrap()
        );
    }

    #[test]
    fn test_overrides_from_toml() {
        let config = from_toml(
            r#"
            [server]
            port = 9000

            [data]
            path = "data/rates.csv"

            [dashboard]
            lockdown_date = "2020-03-01"
            national_aggregation = "median"
            default_region = "Kerala"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.data.path, PathBuf::from("data/rates.csv"));
        assert_eq!(
            config.dashboard.lockdown_date,
            NaiveDate::from_ymd_opt(2020, 3, 1).unwrap()
        );
        assert_eq!(config.dashboard.national_aggregation, NationalAggregation::Median);
        assert_eq!(config.dashboard.default_region, "Kerala");
        assert_eq!(config.dashboard.lockdown_label, "Lockdown start");
    }

    #[test]
    fn test_rejects_bad_lockdown_date() {
        let result = from_toml(
            r#"
            [dashboard]
            lockdown_date = "25/03/2020"
            "#,
        );
        assert!(result.is_err());
    }
}
