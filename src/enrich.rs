//! Batch enrichment: one classification result for every ARP row of every device,
//! in device order then file order.

use std::collections::BTreeMap;

use crate::endpoint::{
    ClassificationResult, DeviceType, RuleSet, VendorTable, classify, normalize_mac,
};
use crate::snapshot::{ArpEntry, SignalIndex, Snapshot};

/// Read-only lookups shared by every ARP row of a run.
pub struct Enricher<'a> {
    rules: &'a RuleSet,
    vendors: &'a VendorTable,
    signals: SignalIndex,
}

impl<'a> Enricher<'a> {
    pub fn new(snapshot: &Snapshot, rules: &'a RuleSet, vendors: &'a VendorTable) -> Self {
        let signals = SignalIndex::build(&snapshot.devices, rules);
        tracing::info!(
            "Indexed {} neighbor interfaces and {} voice VLAN ports",
            signals.platform_count(),
            signals.voice_port_count()
        );
        Enricher {
            rules,
            vendors,
            signals,
        }
    }

    pub fn classify_entry(&self, entry: &ArpEntry) -> ClassificationResult {
        let mac = normalize_mac(&entry.mac);
        let vendor = self.vendors.lookup(&mac);
        let platform = self
            .signals
            .platform(&entry.device_id, &entry.source_interface);
        let in_voice = self
            .signals
            .in_voice_vlan(&entry.device_id, &entry.source_interface);

        let verdict = classify(self.rules, platform, vendor, in_voice);
        tracing::debug!(
            "{} {} {} -> {} (score {})",
            entry.device_id,
            entry.ip,
            mac,
            verdict.device_type,
            verdict.score
        );

        ClassificationResult {
            device_id: entry.device_id.clone(),
            ip: entry.ip.clone(),
            mac,
            vendor: vendor.to_string(),
            platform_hint: platform.to_string(),
            device_type: verdict.device_type,
            confidence: verdict.confidence.percent(),
            reasons: verdict.reasons,
        }
    }

    pub fn run(&self, snapshot: &Snapshot) -> Vec<ClassificationResult> {
        snapshot
            .devices
            .iter()
            .filter_map(|device| device.arp.as_ref())
            .flatten()
            .map(|entry| self.classify_entry(entry))
            .collect()
    }
}

/// Classify every ARP entry in the snapshot.
pub fn enrich(
    snapshot: &Snapshot,
    rules: &RuleSet,
    vendors: &VendorTable,
) -> Vec<ClassificationResult> {
    Enricher::new(snapshot, rules, vendors).run(snapshot)
}

/// Count results per device type
pub fn tally_by_type(results: &[ClassificationResult]) -> BTreeMap<DeviceType, usize> {
    let mut counts = BTreeMap::new();
    for result in results {
        *counts.entry(result.device_type).or_insert(0) += 1;
    }
    counts
}
