//! Parse command - extract fields from OCR text.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use vocr_core::{JsonFileStore, NewVoucher, RuleBasedParser, VoucherParser, VoucherStore};

use super::output::{format_record, OutputFormat};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Text file with OCR output ("-" or omitted reads stdin)
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Validate extracted data
    #[arg(long)]
    validate: bool,

    /// Save the text and extracted voucher to the store
    #[arg(long, requires = "file_name")]
    save: bool,

    /// Image file name the text belongs to (required with --save)
    #[arg(long, value_name = "IMAGE")]
    file_name: Option<String>,

    /// Voucher store file (overrides config)
    #[arg(long)]
    store: Option<PathBuf>,
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    let (source, text) = match &args.input {
        Some(path) if path.as_os_str() != "-" => {
            if !path.exists() {
                anyhow::bail!("Input file not found: {}", path.display());
            }
            (path.display().to_string(), fs::read_to_string(path)?)
        }
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            ("<stdin>".to_string(), buf)
        }
    };

    info!("Parsing {}", source);

    let result = RuleBasedParser::new().parse(&text);

    if config.extraction.report_warnings {
        super::report_warnings(&source, &result.warnings);
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
        let Some(file_name) = args.file_name else {
            anyhow::bail!("--save needs --file-name");
        };
        let store_path = args.store.unwrap_or(config.storage.path);
        let store = JsonFileStore::new(store_path);
        let stored = store.insert(NewVoucher {
            file_name,
            raw_ocr: text,
            parsed: result.record,
            crop: None,
        })?;
        println!(
            "{} Saved voucher {} to {}",
            style("✓").green(),
            stored.id,
            store.path().display()
        );
    }

    Ok(())
}
