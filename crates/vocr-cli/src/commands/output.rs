//! Rendering extracted records as JSON, CSV or text.

use vocr_core::ExtractedRecord;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension used for per-file outputs.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn format_record(record: &ExtractedRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn or_empty<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn format_csv(record: &ExtractedRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "voucher_no",
        "voucher_date",
        "supplier_code",
        "total_qty",
        "item_count",
        "gross_total",
        "total_deductions",
        "net_total",
    ])?;

    wtr.write_record([
        record.voucher_no.clone().unwrap_or_default(),
        record.voucher_date_text().unwrap_or_default(),
        record.supplier_code.clone(),
        record.total_qty.to_string(),
        record.items.len().to_string(),
        or_empty(record.gross_total),
        or_empty(record.total_deductions),
        or_empty(record.net_total),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &ExtractedRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("Voucher: {}\n", or_dash(record.voucher_no.as_deref())));
    output.push_str(&format!("Date: {}\n", or_dash(record.voucher_date_text())));
    output.push_str(&format!("Supplier: {}\n", record.supplier_code));
    output.push('\n');

    if !record.items.is_empty() {
        output.push_str("Items:\n");
        for item in &record.items {
            output.push_str(&format!(
                "  {} x {} = {}\n",
                item.quantity, item.unit_price, item.amount
            ));
        }
        output.push('\n');
    }

    output.push_str("Summary:\n");
    output.push_str(&format!("  Quantity:   {}\n", record.total_qty));
    output.push_str(&format!("  Gross:      {}\n", or_dash(record.gross_total)));
    output.push_str(&format!("  Deductions: {}\n", or_dash(record.total_deductions)));
    output.push_str(&format!("  Net:        {}\n", or_dash(record.net_total)));

    output
}
