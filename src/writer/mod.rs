use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::endpoint::ClassificationResult;
use crate::error::WriteError;

/// Joins reasons in the CSV `reasons` column
pub const REASON_DELIMITER: &str = "|";

/// Name of the CSV written into the enriched directory
pub const CSV_FILE: &str = "arp_device_types.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

/// Flat CSV row; reasons collapsed into one column
#[derive(Serialize)]
struct CsvRow<'a> {
    device_id: &'a str,
    ip: &'a str,
    mac: &'a str,
    vendor: &'a str,
    platform_hint: &'a str,
    device_type: &'static str,
    confidence: u8,
    reasons: String,
}

impl<'a> From<&'a ClassificationResult> for CsvRow<'a> {
    fn from(r: &'a ClassificationResult) -> Self {
        CsvRow {
            device_id: &r.device_id,
            ip: &r.ip,
            mac: &r.mac,
            vendor: &r.vendor,
            platform_hint: &r.platform_hint,
            device_type: r.device_type.as_str(),
            confidence: r.confidence,
            reasons: r.reasons.join(REASON_DELIMITER),
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    total: usize,
    results: &'a [ClassificationResult],
}

fn ensure_parent(path: &Path) -> Result<(), WriteError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|source| WriteError::Io {
                path: parent.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

/// Encode results as CSV. The header is written even when there are no rows.
pub fn to_csv<W: std::io::Write>(
    out: W,
    results: &[ClassificationResult],
) -> Result<(), WriteError> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    writer.write_record([
        "device_id",
        "ip",
        "mac",
        "vendor",
        "platform_hint",
        "device_type",
        "confidence",
        "reasons",
    ])?;
    for result in results {
        writer.serialize(CsvRow::from(result))?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn to_json<W: std::io::Write>(
    out: W,
    results: &[ClassificationResult],
) -> Result<(), WriteError> {
    let report = JsonReport {
        generated_at: Utc::now(),
        total: results.len(),
        results,
    };
    serde_json::to_writer_pretty(out, &report)?;
    Ok(())
}

/// Write results to `path`, creating its directory if needed.
pub fn write_results(
    path: &Path,
    results: &[ClassificationResult],
    format: OutputFormat,
) -> Result<(), WriteError> {
    ensure_parent(path)?;
    let file = fs::File::create(path).map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let out = std::io::BufWriter::new(file);
    match format {
        OutputFormat::Csv => to_csv(out, results),
        OutputFormat::Json => to_json(out, results),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::DeviceType;

    fn sample() -> Vec<ClassificationResult> {
        vec![
            ClassificationResult {
                device_id: "idf1_10.0.0.11".to_string(),
                ip: "10.1.10.21".to_string(),
                mac: "00:04:f2:aa:00:01".to_string(),
                vendor: "Polycom".to_string(),
                platform_hint: "Polycom VVX 450".to_string(),
                device_type: DeviceType::IpPhone,
                confidence: 90,
                reasons: vec![
                    "vendor->ip_phone".to_string(),
                    "platform->ip_phone".to_string(),
                    "voice_vlan".to_string(),
                ],
            },
            ClassificationResult {
                device_id: "idf1_10.0.0.11".to_string(),
                ip: "10.1.10.30".to_string(),
                mac: "aa:bb:cc:00:00:30".to_string(),
                vendor: "Acme, Inc".to_string(),
                platform_hint: String::new(),
                device_type: DeviceType::Unknown,
                confidence: 25,
                reasons: vec![],
            },
        ]
    }

    #[test]
    fn test_csv_layout() {
        let mut buf = Vec::new();
        to_csv(&mut buf, &sample()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "device_id,ip,mac,vendor,platform_hint,device_type,confidence,reasons"
        );
        assert_eq!(
            lines[1],
            "idf1_10.0.0.11,10.1.10.21,00:04:f2:aa:00:01,Polycom,Polycom VVX 450,ip_phone,90,vendor->ip_phone|platform->ip_phone|voice_vlan"
        );
        // Vendor with a comma is quoted, empty reasons stay empty
        assert_eq!(
            lines[2],
            "idf1_10.0.0.11,10.1.10.30,aa:bb:cc:00:00:30,\"Acme, Inc\",,unknown,25,"
        );
    }

    #[test]
    fn test_csv_header_without_rows() {
        let mut buf = Vec::new();
        to_csv(&mut buf, &[]).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap().trim_end(),
            "device_id,ip,mac,vendor,platform_hint,device_type,confidence,reasons"
        );
    }

    #[test]
    fn test_json_report() {
        let mut buf = Vec::new();
        to_json(&mut buf, &sample()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["total"], 2);
        assert!(value["generated_at"].is_string());
        assert_eq!(value["results"][0]["device_type"], "ip_phone");
        assert_eq!(value["results"][0]["confidence"], 90);
        assert_eq!(value["results"][0]["reasons"][2], "voice_vlan");
        assert_eq!(value["results"][1]["reasons"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn test_write_results_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_enriched").join(CSV_FILE);
        write_results(&path, &sample(), OutputFormat::Csv).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.records().count(), 2);
    }
}
