//! Collector snapshot directory: one subdirectory per polled device holding its ARP,
//! neighbor and VLAN tables.

mod index;
mod summary;
mod tables;

use std::path::{Path, PathBuf};

pub use index::SignalIndex;
pub use summary::{CollectorStatus, read_summary, report_failures};
pub use tables::{ArpEntry, NeighborRecord, VlanRecord};

use crate::error::SnapshotError;
use tables::{ARP_FILE, CDP_FILE, LLDP_FILE, VLAN_FILE};

/// Directory the enriched output is written to, inside the snapshot root
pub const ENRICHED_DIR: &str = "_enriched";

/// All tables collected from one device. `None` means the table file was absent
/// or could not be read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceTables {
    pub device_id: String,
    pub arp: Option<Vec<ArpEntry>>,
    pub lldp: Option<Vec<NeighborRecord>>,
    pub cdp: Option<Vec<NeighborRecord>>,
    pub vlans: Option<Vec<VlanRecord>>,
}

/// Log and drop a table that failed to load, so one bad file never aborts the batch
fn tolerate<T>(result: Result<Option<T>, SnapshotError>) -> Option<T> {
    match result {
        Ok(table) => table,
        Err(e) => {
            tracing::warn!("Skipping table: {}", e);
            None
        }
    }
}

impl DeviceTables {
    /// Load every table found in `dir`. The directory name is the device id.
    pub fn load(dir: &Path, device_id: &str) -> Self {
        let tables = DeviceTables {
            device_id: device_id.to_string(),
            arp: tolerate(tables::read_arp(&dir.join(ARP_FILE), device_id)),
            lldp: tolerate(tables::read_neighbors(&dir.join(LLDP_FILE), device_id)),
            cdp: tolerate(tables::read_neighbors(&dir.join(CDP_FILE), device_id)),
            vlans: tolerate(tables::read_vlans(&dir.join(VLAN_FILE), device_id)),
        };
        tracing::debug!(
            "{}: {} arp, {} lldp, {} cdp, {} vlan rows",
            device_id,
            tables.arp.as_ref().map_or(0, Vec::len),
            tables.lldp.as_ref().map_or(0, Vec::len),
            tables.cdp.as_ref().map_or(0, Vec::len),
            tables.vlans.as_ref().map_or(0, Vec::len),
        );
        tables
    }

    /// Neighbor records in override order: LLDP first, then CDP.
    pub fn neighbors(&self) -> impl Iterator<Item = &NeighborRecord> {
        self.lldp.iter().flatten().chain(self.cdp.iter().flatten())
    }
}

/// A full collector run loaded into memory.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub root: PathBuf,
    /// Devices sorted by device id
    pub devices: Vec<DeviceTables>,
    pub statuses: Option<Vec<CollectorStatus>>,
}

impl Snapshot {
    /// Load every device directory under `root`. Entries whose name starts with `_`
    /// (summary, enriched output) are not devices.
    pub fn load(root: &Path) -> Result<Self, SnapshotError> {
        let io_err = |source| SnapshotError::Io {
            path: root.to_path_buf(),
            source,
        };

        let mut device_dirs = Vec::new();
        for entry in std::fs::read_dir(root).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('_') || !entry.path().is_dir() {
                continue;
            }
            device_dirs.push((name, entry.path()));
        }
        device_dirs.sort();

        let devices = device_dirs
            .iter()
            .map(|(name, path)| DeviceTables::load(path, name))
            .collect();

        let statuses = tolerate(read_summary(&root.join(summary::SUMMARY_FILE)));

        Ok(Snapshot {
            root: root.to_path_buf(),
            devices,
            statuses,
        })
    }

    pub fn arp_entry_count(&self) -> usize {
        self.devices
            .iter()
            .map(|d| d.arp.as_ref().map_or(0, Vec::len))
            .sum()
    }
}
