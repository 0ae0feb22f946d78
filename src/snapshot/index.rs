//! Cross-device signal lookups built once per run: the neighbor platform seen on each
//! local interface, and the ports belonging to voice VLANs.

use std::collections::{HashMap, HashSet};

use super::DeviceTables;
use crate::endpoint::RuleSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignalIndex {
    /// device_id -> local interface -> platform
    platforms: HashMap<String, HashMap<String, String>>,
    /// device_id -> ports in a voice VLAN
    voice_ports: HashMap<String, HashSet<String>>,
}

impl SignalIndex {
    /// Index every device. Later neighbor records replace earlier ones for the same
    /// interface, and CDP is scanned after LLDP.
    pub fn build(devices: &[DeviceTables], rules: &RuleSet) -> Self {
        let mut index = SignalIndex::default();

        for device in devices {
            for neighbor in device.neighbors() {
                index
                    .platforms
                    .entry(device.device_id.clone())
                    .or_default()
                    .insert(neighbor.local_interface.clone(), neighbor.platform.clone());
            }

            for vlan in device.vlans.iter().flatten() {
                if !rules.is_voice_vlan(&vlan.name) {
                    continue;
                }
                index
                    .voice_ports
                    .entry(device.device_id.clone())
                    .or_default()
                    .extend(vlan.member_ports.iter().cloned());
            }
        }

        index
    }

    /// Platform of the neighbor on `interface`, or "" when none was seen.
    pub fn platform(&self, device_id: &str, interface: &str) -> &str {
        self.platforms
            .get(device_id)
            .and_then(|by_iface| by_iface.get(interface))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn in_voice_vlan(&self, device_id: &str, port: &str) -> bool {
        self.voice_ports
            .get(device_id)
            .is_some_and(|ports| ports.contains(port))
    }

    pub fn platform_count(&self) -> usize {
        self.platforms.values().map(HashMap::len).sum()
    }

    pub fn voice_port_count(&self) -> usize {
        self.voice_ports.values().map(HashSet::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{NeighborRecord, VlanRecord};

    fn neighbor(device: &str, iface: &str, platform: &str) -> NeighborRecord {
        NeighborRecord {
            device_id: device.to_string(),
            local_interface: iface.to_string(),
            platform: platform.to_string(),
        }
    }

    fn vlan(device: &str, name: &str, ports: &[&str]) -> VlanRecord {
        VlanRecord {
            device_id: device.to_string(),
            vlan_id: "100".to_string(),
            name: name.to_string(),
            member_ports: ports.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn test_cdp_overrides_lldp_for_same_interface() {
        let devices = vec![DeviceTables {
            device_id: "sw1".to_string(),
            lldp: Some(vec![
                neighbor("sw1", "Gi1/0/1", "lldp phone"),
                neighbor("sw1", "Gi1/0/2", "lldp only"),
            ]),
            cdp: Some(vec![neighbor("sw1", "Gi1/0/1", "cdp phone")]),
            ..Default::default()
        }];
        let index = SignalIndex::build(&devices, &RuleSet::default());
        assert_eq!(index.platform("sw1", "Gi1/0/1"), "cdp phone");
        assert_eq!(index.platform("sw1", "Gi1/0/2"), "lldp only");
        assert_eq!(index.platform_count(), 2);
    }

    #[test]
    fn test_last_record_in_file_wins() {
        let devices = vec![DeviceTables {
            device_id: "sw1".to_string(),
            cdp: Some(vec![
                neighbor("sw1", "Gi1/0/1", "first"),
                neighbor("sw1", "Gi1/0/1", "second"),
            ]),
            ..Default::default()
        }];
        let index = SignalIndex::build(&devices, &RuleSet::default());
        assert_eq!(index.platform("sw1", "Gi1/0/1"), "second");
    }

    #[test]
    fn test_keys_are_scoped_per_device() {
        let devices = vec![
            DeviceTables {
                device_id: "sw1".to_string(),
                cdp: Some(vec![neighbor("sw1", "Gi1/0/1", "Cisco IP Phone 8841")]),
                vlans: Some(vec![vlan("sw1", "VOICE", &["Gi1/0/1"])]),
                ..Default::default()
            },
            DeviceTables {
                device_id: "sw2".to_string(),
                ..Default::default()
            },
        ];
        let index = SignalIndex::build(&devices, &RuleSet::default());
        assert_eq!(index.platform("sw2", "Gi1/0/1"), "");
        assert!(index.in_voice_vlan("sw1", "Gi1/0/1"));
        assert!(!index.in_voice_vlan("sw2", "Gi1/0/1"));
    }

    #[test]
    fn test_voice_membership_by_vlan_name() {
        let devices = vec![DeviceTables {
            device_id: "sw1".to_string(),
            vlans: Some(vec![
                vlan("sw1", "DATA", &["Gi1/0/1", "Gi1/0/2"]),
                vlan("sw1", "Floor3_Voice", &["Gi1/0/2", "Gi1/0/3"]),
            ]),
            ..Default::default()
        }];
        let index = SignalIndex::build(&devices, &RuleSet::default());
        assert!(!index.in_voice_vlan("sw1", "Gi1/0/1"));
        assert!(index.in_voice_vlan("sw1", "Gi1/0/2"));
        assert!(index.in_voice_vlan("sw1", "Gi1/0/3"));
        assert_eq!(index.voice_port_count(), 2);
    }

    #[test]
    fn test_devices_without_tables_contribute_nothing() {
        let devices = vec![DeviceTables {
            device_id: "sw1".to_string(),
            ..Default::default()
        }];
        let index = SignalIndex::build(&devices, &RuleSet::default());
        assert_eq!(index, SignalIndex::default());
    }
}
