use std::path::Path;

use serde::Deserialize;

/// Component parameters as found under `parameters` in `config.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct Parameters {
    /// Catalog API endpoint URL.
    pub api_url: String,
    /// API access key. The `#` prefix marks the key as encrypted in the
    /// platform's configuration store.
    #[serde(rename = "#api_key")]
    pub api_key: String,
}

/// Run configuration loaded from the component's data directory.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractorConfig {
    pub parameters: Parameters,
}

impl ExtractorConfig {
    /// Load `config.json` from `data_dir`.
    pub fn load(data_dir: &Path) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(
                config::File::from(data_dir.join("config.json"))
                    .format(config::FileFormat::Json),
            )
            .build()?;
        settings.try_deserialize()
    }
}
