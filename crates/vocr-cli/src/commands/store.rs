//! Store command - inspect and clear saved vouchers.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use vocr_core::{JsonFileStore, StoredVoucher, VoucherStore};

/// Arguments for the store command.
#[derive(Args)]
pub struct StoreArgs {
    /// Voucher store file (overrides config)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: StoreCommand,
}

#[derive(Subcommand)]
enum StoreCommand {
    /// List saved vouchers, newest first
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one saved voucher
    Show {
        /// Voucher id
        id: u64,
    },

    /// Delete every saved voucher
    Clear,
}

pub async fn run(args: StoreArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let store = JsonFileStore::new(args.store.unwrap_or(config.storage.path));

    match args.command {
        StoreCommand::List { json } => list_vouchers(&store, json),
        StoreCommand::Show { id } => show_voucher(&store, id),
        StoreCommand::Clear => clear_vouchers(&store),
    }
}

fn list_vouchers(store: &JsonFileStore, json: bool) -> anyhow::Result<()> {
    let vouchers = store.list()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&vouchers)?);
        return Ok(());
    }

    if vouchers.is_empty() {
        println!("{} No saved vouchers in {}", style("ℹ").blue(), store.path().display());
        return Ok(());
    }

    println!(
        "{}",
        style(format!(
            "{:>5}  {:<19}  {:<24}  {:<10}  {:<10}  {:<8}  {:>10}",
            "ID", "SAVED", "FILE", "VOUCHER", "DATE", "SUPPLIER", "NET"
        ))
        .bold()
    );
    for voucher in &vouchers {
        println!("{}", list_row(voucher));
    }

    Ok(())
}

fn list_row(voucher: &StoredVoucher) -> String {
    format!(
        "{:>5}  {:<19}  {:<24}  {:<10}  {:<10}  {:<8}  {:>10}",
        voucher.id,
        voucher.created_at.format("%Y-%m-%d %H:%M:%S"),
        voucher.file_name,
        voucher.voucher_no.as_deref().unwrap_or("-"),
        voucher.voucher_date.as_deref().unwrap_or("-"),
        voucher.supplier_code,
        voucher
            .parsed
            .net_total
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string()),
    )
}

fn show_voucher(store: &JsonFileStore, id: u64) -> anyhow::Result<()> {
    let voucher = store
        .get(id)?
        .ok_or_else(|| anyhow::anyhow!("No voucher with id {}", id))?;

    println!("{}", serde_json::to_string_pretty(&voucher)?);

    Ok(())
}

fn clear_vouchers(store: &JsonFileStore) -> anyhow::Result<()> {
    let removed = store.delete_all()?;

    println!(
        "{} Deleted {} vouchers from {}",
        style("✓").green(),
        removed,
        store.path().display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use vocr_core::{parse_receipt_text, NewVoucher};

    #[test]
    fn test_list_row() {
        let voucher = StoredVoucher::from_new(
            7,
            NewVoucher {
                file_name: "v.jpg".to_string(),
                raw_ocr: String::new(),
                parsed: parse_receipt_text(Some("Voucher No: 42\nNet Total: 9.50")),
                crop: None,
            },
            Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        );

        let row = list_row(&voucher);
        assert!(row.starts_with("    7  2024-01-02 03:04:05  v.jpg"));
        assert!(row.contains(" 42 "));
        assert!(row.trim_end().ends_with("9.50"));
    }
}
