use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct DatadogConfig {
    pub api_key: String,
    #[serde(default)]
    pub application_key: Option<String>,
}

/// Load credentials from `config/datadog.{toml,yaml,json,...}` merged
/// with `DATADOG_API_KEY` / `DATADOG_APPLICATION_KEY` environment
/// variables. The environment wins over the file.
pub fn load_datadog_config() -> anyhow::Result<DatadogConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/datadog").required(false))
        .add_source(config::Environment::with_prefix("DATADOG"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserializes_without_application_key() {
        let config: DatadogConfig = serde_json::from_str(r#"{"api_key": "abc123"}"#).unwrap();
        assert_eq!(config.api_key, "abc123");
        assert!(config.application_key.is_none());
    }
}
