//! Subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod output;
pub mod parse;
pub mod process;
pub mod store;

use std::path::Path;

use tracing::debug;

use vocr_core::models::config::{OcrConfig, ProviderKind, VocrConfig};
use vocr_core::{OcrProvider, SidecarTextProvider, TesseractProvider};

/// Load the configuration from `config_path`, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<VocrConfig> {
    if let Some(path) = config_path {
        return Ok(VocrConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using config from {}", default_path.display());
        Ok(VocrConfig::from_file(&default_path)?)
    } else {
        Ok(VocrConfig::default())
    }
}

/// Build the OCR provider selected in the configuration.
pub fn build_provider(config: &OcrConfig) -> Box<dyn OcrProvider> {
    match config.provider {
        ProviderKind::Sidecar => Box::new(SidecarTextProvider::new(config.sidecar_extension.as_str())),
        ProviderKind::Tesseract => Box::new(TesseractProvider::new(
            config.tesseract_bin.clone(),
            config.language.as_str(),
        )),
    }
}

/// Print extraction warnings to stderr.
pub fn report_warnings(source: &str, warnings: &[String]) {
    if warnings.is_empty() {
        return;
    }

    eprintln!("{} {}", console::style("Extraction warnings:").yellow(), source);
    for warning in warnings {
        eprintln!("  - {}", warning);
    }
}
