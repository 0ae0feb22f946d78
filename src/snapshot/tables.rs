//! Per-device CSV tables written by the collector. Columns are looked up by header name,
//! accepting both the collector's own names and the TextFSM field names it passes through.

use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::SnapshotError;

pub(crate) const ARP_FILE: &str = "arp.csv";
pub(crate) const LLDP_FILE: &str = "neighbors_lldp.csv";
pub(crate) const CDP_FILE: &str = "neighbors_cdp.csv";
pub(crate) const VLAN_FILE: &str = "vlans.csv";

const ARP_IP_COLUMNS: &[&str] = &["ip", "address"];
const ARP_MAC_COLUMNS: &[&str] = &["mac", "mac_address"];
const ARP_IFACE_COLUMNS: &[&str] = &["iface", "interface"];
const NEIGHBOR_LOCAL_COLUMNS: &[&str] = &["local_intf", "local_interface", "local_port"];
const NEIGHBOR_PLATFORM_COLUMNS: &[&str] = &["platform", "system_description"];
const VLAN_ID_COLUMNS: &[&str] = &["vlan_id"];
const VLAN_NAME_COLUMNS: &[&str] = &["name", "vlan_name"];
const VLAN_PORTS_COLUMNS: &[&str] = &["ports", "member_ports", "interfaces"];

/// An IP/MAC binding seen in a device's ARP cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArpEntry {
    pub device_id: String,
    pub ip: String,
    /// MAC as reported by the device, not normalized
    pub mac: String,
    pub source_interface: String,
}

/// A CDP or LLDP neighbor learned on a local interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborRecord {
    pub device_id: String,
    pub local_interface: String,
    pub platform: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VlanRecord {
    pub device_id: String,
    pub vlan_id: String,
    pub name: String,
    pub member_ports: Vec<String>,
}

/// Split a comma-separated port list, dropping blanks
pub(crate) fn split_ports(ports: &str) -> Vec<String> {
    ports
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Header positions resolved against a list of accepted names per field
struct Columns {
    headers: StringRecord,
}

impl Columns {
    fn find(&self, candidates: &[&str]) -> Option<usize> {
        candidates.iter().find_map(|name| {
            self.headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
        })
    }

    fn require(
        &self,
        path: &Path,
        candidates: &'static [&'static str],
    ) -> Result<usize, SnapshotError> {
        self.find(candidates)
            .ok_or_else(|| SnapshotError::MissingColumn {
                path: path.to_path_buf(),
                column: candidates[0],
            })
    }
}

fn cell(record: &StringRecord, index: Option<usize>) -> String {
    index
        .and_then(|i| record.get(i))
        .unwrap_or("")
        .to_string()
}

/// Read every record of a CSV table. `Ok(None)` when the file does not exist.
fn read_records(path: &Path) -> Result<Option<(Columns, Vec<StringRecord>)>, SnapshotError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(SnapshotError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let csv_err = |source| SnapshotError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(file);
    // Device output is not guaranteed to be UTF-8; decode lossily per row
    let headers = reader.byte_headers().map_err(csv_err)?.clone();
    let headers = StringRecord::from_byte_record_lossy(headers);
    let records = reader
        .byte_records()
        .map(|record| record.map(StringRecord::from_byte_record_lossy))
        .collect::<Result<Vec<_>, _>>()
        .map_err(csv_err)?;

    Ok(Some((Columns { headers }, records)))
}

/// Load `arp.csv`. The IP and MAC columns are required; the interface defaults to "".
pub fn read_arp(path: &Path, device_id: &str) -> Result<Option<Vec<ArpEntry>>, SnapshotError> {
    let Some((columns, records)) = read_records(path)? else {
        return Ok(None);
    };
    let ip = Some(columns.require(path, ARP_IP_COLUMNS)?);
    let mac = Some(columns.require(path, ARP_MAC_COLUMNS)?);
    let iface = columns.find(ARP_IFACE_COLUMNS);

    Ok(Some(
        records
            .iter()
            .map(|r| ArpEntry {
                device_id: device_id.to_string(),
                ip: cell(r, ip),
                mac: cell(r, mac),
                source_interface: cell(r, iface),
            })
            .collect(),
    ))
}

/// Load a CDP or LLDP neighbor table.
pub fn read_neighbors(
    path: &Path,
    device_id: &str,
) -> Result<Option<Vec<NeighborRecord>>, SnapshotError> {
    let Some((columns, records)) = read_records(path)? else {
        return Ok(None);
    };
    let local = columns.find(NEIGHBOR_LOCAL_COLUMNS);
    let platform = columns.find(NEIGHBOR_PLATFORM_COLUMNS);

    Ok(Some(
        records
            .iter()
            .map(|r| NeighborRecord {
                device_id: device_id.to_string(),
                local_interface: cell(r, local),
                platform: cell(r, platform),
            })
            .collect(),
    ))
}

/// Load `vlans.csv`.
pub fn read_vlans(path: &Path, device_id: &str) -> Result<Option<Vec<VlanRecord>>, SnapshotError> {
    let Some((columns, records)) = read_records(path)? else {
        return Ok(None);
    };
    let vlan_id = columns.find(VLAN_ID_COLUMNS);
    let name = columns.find(VLAN_NAME_COLUMNS);
    let ports = columns.find(VLAN_PORTS_COLUMNS);

    Ok(Some(
        records
            .iter()
            .map(|r| VlanRecord {
                device_id: device_id.to_string(),
                vlan_id: cell(r, vlan_id),
                name: cell(r, name),
                member_ports: split_ports(&cell(r, ports)),
            })
            .collect(),
    ))
}
