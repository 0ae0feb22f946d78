//! Ordered rule list driving the classifier. Each rule pairs a category with its
//! trigger substrings, a weight and a precedence tier.

use std::collections::HashSet;

use super::patterns::{
    CATEGORY_CAMERA, CATEGORY_IP_PHONE, CATEGORY_PRINTER, CATEGORY_ROUTER, CATEGORY_SWITCH,
    CATEGORY_WIRELESS_AP, PLATFORM_TOKEN_WEIGHT, PLATFORM_TOKENS, VENDOR_HINT_WEIGHT,
    VENDOR_HINTS, VOICE_VLAN_MARKER, VOICE_VLAN_WEIGHT,
};
use super::types::DeviceType;
use crate::error::ConfigError;

/// Which input string a rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Vendor,
    Platform,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Vendor => "vendor",
            RuleKind::Platform => "platform",
        }
    }

    fn section(&self) -> &'static str {
        match self {
            RuleKind::Vendor => "vendor_hints",
            RuleKind::Platform => "platform_tokens",
        }
    }

    fn weight(&self) -> u32 {
        match self {
            RuleKind::Vendor => VENDOR_HINT_WEIGHT,
            RuleKind::Platform => PLATFORM_TOKEN_WEIGHT,
        }
    }
}

/// How a matching rule treats a device type set by an earlier rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precedence {
    /// Assign only while the device type is still unknown.
    Fill,
    /// Always assign, replacing any earlier guess.
    Override,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub kind: RuleKind,
    pub category: String,
    pub assigns: DeviceType,
    /// Lowercased trigger substrings.
    pub tokens: Vec<String>,
    pub weight: u32,
    pub precedence: Precedence,
}

impl Rule {
    fn new(kind: RuleKind, category: &str, tokens: &[String]) -> Result<Self, ConfigError> {
        let assigns =
            category_device_type(category).ok_or_else(|| ConfigError::UnknownCategory {
                section: kind.section(),
                category: category.to_string(),
            })?;

        let mut seen = HashSet::new();
        let mut lowered = Vec::with_capacity(tokens.len());
        for token in tokens {
            // An empty substring matches every input
            if token.trim().is_empty() {
                return Err(ConfigError::EmptyToken {
                    section: kind.section(),
                    category: category.to_string(),
                });
            }
            let token = token.to_lowercase();
            if !seen.insert(token.clone()) {
                return Err(ConfigError::DuplicateToken {
                    section: kind.section(),
                    category: category.to_string(),
                    token,
                });
            }
            lowered.push(token);
        }

        // Platform evidence for endpoint categories outranks a vendor-only guess
        let precedence = match (kind, assigns) {
            (
                RuleKind::Platform,
                DeviceType::IpPhone | DeviceType::Camera | DeviceType::Printer,
            ) => Precedence::Override,
            _ => Precedence::Fill,
        };

        Ok(Rule {
            kind,
            category: category.to_string(),
            assigns,
            tokens: lowered,
            weight: kind.weight(),
            precedence,
        })
    }

    /// `haystack` must already be lowercased.
    pub fn matches(&self, haystack: &str) -> bool {
        matches_pattern(haystack, self.tokens.as_slice())
    }

    pub fn reason(&self) -> String {
        format!("{}->{}", self.kind.as_str(), self.category)
    }
}

/// Check if the haystack contains any of the patterns
pub(crate) fn matches_pattern<S: AsRef<str>>(haystack: &str, patterns: &[S]) -> bool {
    patterns.iter().any(|p| haystack.contains(p.as_ref()))
}

/// Map a rule category name to the device type it assigns.
/// A switch platform match means the endpoint hangs off an access switch.
pub(crate) fn category_device_type(category: &str) -> Option<DeviceType> {
    match category {
        CATEGORY_IP_PHONE => Some(DeviceType::IpPhone),
        CATEGORY_CAMERA => Some(DeviceType::Camera),
        CATEGORY_PRINTER => Some(DeviceType::Printer),
        CATEGORY_WIRELESS_AP => Some(DeviceType::WirelessAp),
        CATEGORY_SWITCH => Some(DeviceType::AccessSwitch),
        CATEGORY_ROUTER => Some(DeviceType::Router),
        _ => None,
    }
}

/// The full, ordered classifier rule set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    pub vendor_rules: Vec<Rule>,
    pub platform_rules: Vec<Rule>,
    pub voice_weight: u32,
    /// Lowercased VLAN-name substring marking a voice VLAN.
    pub voice_vlan_marker: String,
}

impl RuleSet {
    /// Build a rule set from (category, tokens) tables in evaluation order.
    pub fn from_tables(
        vendor_hints: &[(String, Vec<String>)],
        platform_tokens: &[(String, Vec<String>)],
        voice_vlan_marker: &str,
    ) -> Result<Self, ConfigError> {
        let voice_vlan_marker = voice_vlan_marker.trim().to_lowercase();
        if voice_vlan_marker.is_empty() {
            return Err(ConfigError::EmptyVoiceMarker);
        }

        let build = |kind: RuleKind, tables: &[(String, Vec<String>)]| {
            tables
                .iter()
                .map(|(category, tokens)| Rule::new(kind, category, tokens))
                .collect::<Result<Vec<_>, _>>()
        };

        Ok(RuleSet {
            vendor_rules: build(RuleKind::Vendor, vendor_hints)?,
            platform_rules: build(RuleKind::Platform, platform_tokens)?,
            voice_weight: VOICE_VLAN_WEIGHT,
            voice_vlan_marker,
        })
    }

    pub fn is_voice_vlan(&self, vlan_name: &str) -> bool {
        vlan_name.to_lowercase().contains(&self.voice_vlan_marker)
    }
}

/// Convert a static pattern table into owned (category, tokens) pairs.
pub(crate) fn owned_table(table: &[(&str, &[&str])]) -> Vec<(String, Vec<String>)> {
    table
        .iter()
        .map(|(category, tokens)| {
            (
                category.to_string(),
                tokens.iter().map(|t| t.to_string()).collect(),
            )
        })
        .collect()
}

impl Default for RuleSet {
    fn default() -> Self {
        let vendor_rules = owned_table(VENDOR_HINTS)
            .iter()
            .filter_map(|(c, t)| Rule::new(RuleKind::Vendor, c, t).ok())
            .collect();
        let platform_rules = owned_table(PLATFORM_TOKENS)
            .iter()
            .filter_map(|(c, t)| Rule::new(RuleKind::Platform, c, t).ok())
            .collect();
        RuleSet {
            vendor_rules,
            platform_rules,
            voice_weight: VOICE_VLAN_WEIGHT,
            voice_vlan_marker: VOICE_VLAN_MARKER.to_string(),
        }
    }
}
