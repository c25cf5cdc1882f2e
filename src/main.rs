use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use heureka_extractor::client::HttpCatalogClient;
use heureka_extractor::models::config::ExtractorConfig;
use heureka_extractor::services::extract::run_extraction;

const DEFAULT_DATA_DIR: &str = "/data/";

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::init();

    let data_dir = env::var("KBC_DATADIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));

    let config = match ExtractorConfig::load(&data_dir) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    log::info!("Extracted parameters.");

    let client = match HttpCatalogClient::new(
        config.parameters.api_url.as_str(),
        config.parameters.api_key.as_str(),
    ) {
        Ok(client) => client,
        Err(e) => {
            log::error!("Failed to build catalog client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let out_dir = data_dir.join("out").join("tables");
    if let Err(e) = fs::create_dir_all(&out_dir) {
        log::error!("Failed to create output directory {}: {e}", out_dir.display());
        return ExitCode::FAILURE;
    }

    match run_extraction(&client, &out_dir) {
        Ok(report) => {
            log::info!("Script completed: {report}.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Extraction failed: {e}");
            ExitCode::FAILURE
        }
    }
}
