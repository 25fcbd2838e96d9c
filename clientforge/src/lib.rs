//! Runs client generation for the `clientforge.toml` nearest to the current
//! directory.

pub use clientforge_core::{
    ClientforgeConfig, ClientforgeError, GenerateClientOptions, GenerationReport, Result,
};

use clientforge_core::generate_client;
use tracing::{debug, error, info};

/// Loads the configuration, generates the client and returns the report.
pub fn run() -> Result<GenerationReport> {
    let config = match ClientforgeConfig::new() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };
    run_with_config(&config)
}

pub fn run_with_config(config: &ClientforgeConfig) -> Result<GenerationReport> {
    info!(
        output = %config.output_dir().display(),
        dmmf = %config.dmmf_path().display(),
        "Generating client"
    );
    let options = GenerateClientOptions::from_config(config)?;
    let report = generate_client(&options)?;

    for file in &report.files {
        debug!(path = %file.path.display(), bytes = file.bytes_written, "Generated");
    }
    info!(
        "Generated {} files ({} models, {} enums, {} input types)",
        report.files.len(),
        report.models,
        report.enums,
        report.input_types
    );
    Ok(report)
}
