use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Builder for collector snapshot directories used in tests
pub struct SnapshotFixture {
    dir: TempDir,
}

impl SnapshotFixture {
    pub fn new() -> Self {
        SnapshotFixture {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Create (or reuse) a device directory
    pub fn device(&self, name: &str) -> DeviceFixture {
        let path = self.dir.path().join(name);
        fs::create_dir_all(&path).unwrap();
        DeviceFixture { path }
    }

    pub fn summary(&self, json: &str) {
        fs::write(self.dir.path().join("_summary.json"), json).unwrap();
    }
}

/// One device directory inside a [`SnapshotFixture`]
pub struct DeviceFixture {
    path: PathBuf,
}

impl DeviceFixture {
    fn write_csv(&self, name: &str, headers: &[&str], rows: &[Vec<&str>]) {
        let mut writer = csv::Writer::from_path(self.path.join(name)).unwrap();
        writer.write_record(headers).unwrap();
        for row in rows {
            writer.write_record(row).unwrap();
        }
        writer.flush().unwrap();
    }

    /// Rows of (ip, mac, iface)
    pub fn arp(&self, rows: &[(&str, &str, &str)]) {
        let rows: Vec<Vec<&str>> = rows.iter().map(|(a, b, c)| vec![*a, *b, *c]).collect();
        self.write_csv("arp.csv", &["ip", "mac", "iface"], &rows);
    }

    /// Rows of (local_intf, platform)
    pub fn cdp(&self, rows: &[(&str, &str)]) {
        self.neighbors("neighbors_cdp.csv", rows);
    }

    /// Rows of (local_intf, platform)
    pub fn lldp(&self, rows: &[(&str, &str)]) {
        self.neighbors("neighbors_lldp.csv", rows);
    }

    fn neighbors(&self, name: &str, rows: &[(&str, &str)]) {
        let rows: Vec<Vec<&str>> = rows
            .iter()
            .map(|(iface, platform)| vec!["neighbor", *iface, *platform])
            .collect();
        self.write_csv(name, &["destination_host", "local_intf", "platform"], &rows);
    }

    /// Rows of (vlan_id, name, comma-separated ports)
    pub fn vlans(&self, rows: &[(&str, &str, &str)]) {
        let rows: Vec<Vec<&str>> = rows
            .iter()
            .map(|(id, name, ports)| vec![*id, *name, "active", *ports])
            .collect();
        self.write_csv("vlans.csv", &["vlan_id", "name", "status", "ports"], &rows);
    }

    /// Write a file verbatim
    pub fn raw(&self, name: &str, content: impl AsRef<[u8]>) {
        fs::write(self.path.join(name), content).unwrap();
    }
}
