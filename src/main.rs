mod config;
mod endpoint;
mod enrich;
mod error;
mod snapshot;
#[cfg(test)]
mod test_utils;
mod writer;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use endpoint::VendorTable;
use snapshot::{ENRICHED_DIR, Snapshot, report_failures};
use writer::{CSV_FILE, OutputFormat};

#[derive(Parser)]
#[command(name = "arp-device-classifier")]
#[command(about = "Infer device types for ARP endpoints from collected switch tables")]
struct Cli {
    /// OUI dataset of `prefix,vendor` lines
    oui: Option<PathBuf>,

    /// Collector snapshot directory
    #[arg(long, default_value = "cli_out")]
    input: PathBuf,

    /// Output file [default: <input>/_enriched/arp_device_types.csv]
    #[arg(long)]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// TOML file overriding the classification token tables
    #[arg(long)]
    rules: Option<PathBuf>,
}

impl Cli {
    fn output_path(&self) -> PathBuf {
        if let Some(path) = &self.output {
            return path.clone();
        }
        let path = self.input.join(ENRICHED_DIR).join(CSV_FILE);
        match self.format {
            OutputFormat::Csv => path,
            OutputFormat::Json => path.with_extension("json"),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new("arp_device_classifier=info")
                }),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let rules = config::load_rules(cli.rules.as_deref()).context("Failed to load rules")?;

    let vendors = cli
        .oui
        .as_deref()
        .map(VendorTable::load)
        .unwrap_or_default();
    if vendors.is_empty() {
        tracing::info!("Vendor table is empty, vendor hints disabled");
    }

    let snapshot = Snapshot::load(&cli.input)
        .with_context(|| format!("Failed to read snapshot {}", cli.input.display()))?;
    tracing::info!(
        "Loaded {} devices ({} ARP entries) from {}",
        snapshot.devices.len(),
        snapshot.arp_entry_count(),
        snapshot.root.display()
    );
    if let Some(statuses) = &snapshot.statuses {
        let failed = report_failures(statuses);
        if failed > 0 {
            tracing::warn!("{} of {} devices failed collection", failed, statuses.len());
        }
    }

    let results = enrich::enrich(&snapshot, &rules, &vendors);
    for (device_type, count) in enrich::tally_by_type(&results) {
        tracing::info!("{}: {}", device_type, count);
    }

    let output = cli.output_path();
    writer::write_results(&output, &results, cli.format)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("wrote {} rows -> {}", results.len(), output.display());
    Ok(())
}
