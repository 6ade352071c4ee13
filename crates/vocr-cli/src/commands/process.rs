//! Process command - OCR and extract a single voucher image.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use vocr_core::models::config::{ProviderKind, VocrConfig};
use vocr_core::{
    crop_image, CropBox, ExtractionResult, JsonFileStore, NewVoucher, OcrMode, RuleBasedParser,
    VoucherExtractor, VoucherStore,
};

use super::output::{format_record, OutputFormat};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input voucher image
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// OCR mode (default, printed, handwritten)
    #[arg(short, long, value_parser = OcrMode::from_str)]
    mode: Option<OcrMode>,

    /// Crop region applied before OCR, as x,y,w,h
    #[arg(long, value_parser = CropBox::from_str)]
    crop: Option<CropBox>,

    /// Save the extracted voucher to the store
    #[arg(long)]
    save: bool,

    /// Voucher store file (overrides config)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Validate extracted data
    #[arg(long)]
    validate: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    let mode = args.mode.unwrap_or(config.ocr.mode);
    let crop = args.crop.filter(|c| {
        if !c.is_valid() {
            warn!("Ignoring empty crop {}", c);
        }
        c.is_valid()
    });

    let result = extract_voucher(&args.input, mode, crop, &config, &pb)?;

    pb.finish_and_clear();

    if config.extraction.report_warnings {
        super::report_warnings(&args.input.display().to_string(), &result.warnings);
    }

    if args.validate {
        let issues = result.record.validate();
        if !issues.is_empty() {
            eprintln!("{}", style("Validation issues:").yellow());
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
        }
    }

    let output = format_record(&result.record, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.save {
        let store_path = args.store.clone().unwrap_or_else(|| config.storage.path.clone());
        let store = JsonFileStore::new(store_path);
        let stored = store.insert(NewVoucher {
            file_name: file_name(&args.input),
            raw_ocr: result.raw_text,
            parsed: result.record,
            crop,
        })?;

        println!(
            "{} Saved voucher {} to {}",
            style("✓").green(),
            stored.id,
            store.path().display()
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// OCR `input` with the configured provider and parse the text.
///
/// A crop is applied only for providers that read pixels.
pub fn extract_voucher(
    input: &Path,
    mode: OcrMode,
    crop: Option<CropBox>,
    config: &VocrConfig,
    pb: &ProgressBar,
) -> anyhow::Result<ExtractionResult> {
    let provider = super::build_provider(&config.ocr);

    let cropped = match (crop, config.ocr.provider) {
        (Some(c), ProviderKind::Tesseract) => {
            pb.set_message("Cropping image...");
            pb.set_position(10);
            Some(crop_image(input, c)?)
        }
        (Some(c), ProviderKind::Sidecar) => {
            warn!("Crop {} has no effect on sidecar transcriptions", c);
            None
        }
        (None, _) => None,
    };
    let ocr_input = cropped.as_ref().map(|f| f.path()).unwrap_or(input);

    pb.set_message(format!("Running OCR ({}, {})...", provider.name(), mode));
    pb.set_position(30);

    let result = RuleBasedParser::new().extract(provider.as_ref(), ocr_input, mode)?;

    if result.raw_text.trim().is_empty() {
        warn!("No text detected in {}", input.display());
    }

    pb.set_position(100);

    debug!(
        "Extracted {} items from {} in {}ms",
        result.record.items.len(),
        input.display(),
        result.processing_time_ms
    );

    Ok(result)
}

/// File name as stored with the voucher.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
