//! MAC OUI vendor lookup. Loads a `prefix,vendor` dataset once and resolves the first
//! three octets of any MAC notation (colon, hyphen, Cisco dotted, bare hex) to a vendor.

use std::collections::HashMap;
use std::path::Path;

/// Number of hex digits in a full MAC address
const MAC_HEX_DIGITS: usize = 12;

/// Length of an "XX:XX:XX" OUI key
const OUI_KEY_LEN: usize = 8;

/// Normalize a MAC to lowercase colon-separated byte pairs ("aa:bb:cc:dd:ee:ff").
/// Separators are dropped and the first 12 remaining characters are regrouped; a short
/// or malformed MAC comes back short rather than failing.
pub fn normalize_mac(mac: &str) -> String {
    let digits: Vec<char> = mac
        .chars()
        .filter(|c| !matches!(c, '.' | ':' | '-') && !c.is_whitespace())
        .flat_map(|c| c.to_lowercase())
        .take(MAC_HEX_DIGITS)
        .collect();

    digits
        .chunks(2)
        .map(|pair| pair.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(":")
}

/// Uppercase "XX:XX:XX" OUI key of a MAC in any notation.
pub fn mac_prefix(mac: &str) -> String {
    normalize_mac(mac)
        .to_uppercase()
        .chars()
        .take(OUI_KEY_LEN)
        .collect()
}

/// Normalize a dataset prefix the way entries are keyed: uppercase, hyphens to colons.
fn normalize_prefix(prefix: &str) -> String {
    prefix.trim().to_uppercase().replace('-', ":")
}

/// Read-only OUI prefix -> vendor name table.
#[derive(Debug, Clone, Default)]
pub struct VendorTable {
    entries: HashMap<String, String>,
}

impl VendorTable {
    /// Load the dataset at `path`. A missing or unreadable file yields an empty table so
    /// classification proceeds without vendor hints.
    pub fn load(path: &Path) -> Self {
        match std::fs::read(path) {
            Ok(bytes) => {
                let table = Self::parse(&String::from_utf8_lossy(&bytes));
                tracing::info!(
                    "Loaded {} vendor prefixes from {}",
                    table.len(),
                    path.display()
                );
                table
            }
            Err(e) => {
                tracing::warn!(
                    "Vendor dataset {} unavailable ({}), continuing without vendor hints",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Parse `prefix,vendor[,...]` lines. Blank lines, `#` comments and lines with
    /// fewer than two fields are skipped; a repeated prefix keeps the last vendor.
    pub fn parse(content: &str) -> Self {
        let mut entries = HashMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if fields.len() < 2 {
                continue;
            }
            entries.insert(normalize_prefix(fields[0]), fields[1].to_string());
        }
        VendorTable { entries }
    }

    /// Vendor for the MAC's OUI, or "" when the prefix is not in the table.
    pub fn lookup(&self, mac: &str) -> &str {
        self.entries
            .get(&mac_prefix(mac))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
