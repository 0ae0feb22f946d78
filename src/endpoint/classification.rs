//! Endpoint scoring. Combines the OUI vendor, the CDP/LLDP platform seen on the ingress
//! port and voice-VLAN membership into a device type, a confidence band and reasons.

use super::patterns::REASON_VOICE_VLAN;
use super::rules::{Precedence, Rule, RuleSet};
use super::types::{Confidence, DeviceType, Verdict};

/// Mutable scoring state for one classification pass
#[derive(Default)]
struct Tally {
    device_type: DeviceType,
    score: u32,
    reasons: Vec<String>,
}

impl Tally {
    fn apply(&mut self, rule: &Rule) {
        self.score += rule.weight;
        self.reasons.push(rule.reason());
        match rule.precedence {
            Precedence::Override => self.device_type = rule.assigns,
            Precedence::Fill if self.device_type == DeviceType::Unknown => {
                self.device_type = rule.assigns
            }
            Precedence::Fill => {}
        }
    }

    fn into_verdict(self) -> Verdict {
        Verdict {
            device_type: self.device_type,
            score: self.score,
            confidence: Confidence::from_score(self.score),
            reasons: self.reasons,
        }
    }
}

/// Classify one endpoint. Every matching rule contributes its weight; vendor rules run
/// first, then platform rules, then the voice-VLAN rule.
pub fn classify(rules: &RuleSet, platform: &str, vendor: &str, in_voice_vlan: bool) -> Verdict {
    let platform = platform.to_lowercase();
    let vendor = vendor.to_lowercase();
    let mut tally = Tally::default();

    for rule in &rules.vendor_rules {
        if rule.matches(&vendor) {
            tally.apply(rule);
        }
    }

    for rule in &rules.platform_rules {
        if rule.matches(&platform) {
            tally.apply(rule);
        }
    }

    if in_voice_vlan {
        tally.score += rules.voice_weight;
        tally.reasons.push(REASON_VOICE_VLAN.to_string());
        if tally.device_type == DeviceType::Unknown {
            tally.device_type = DeviceType::IpPhone;
        }
    }

    tally.into_verdict()
}
