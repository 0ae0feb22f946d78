//! Optional TOML rules file. Replaces the compiled-in token tables per section; any
//! section left out keeps its default.
//!
//! ```toml
//! voice_vlan_marker = "voice"
//!
//! [[vendor_hints]]
//! category = "ip_phone"
//! tokens = ["POLY", "CISCO", "YEALINK"]
//!
//! [[platform_tokens]]
//! category = "switch"
//! tokens = ["catalyst 93", "nexus", "switch"]
//! ```
//!
//! Tables are evaluated in file order.

use std::path::Path;

use serde::Deserialize;

use crate::endpoint::{PLATFORM_TOKENS, RuleSet, VENDOR_HINTS, VOICE_VLAN_MARKER, owned_table};
use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RulesFile {
    pub voice_vlan_marker: Option<String>,
    pub vendor_hints: Option<Vec<CategoryTokens>>,
    pub platform_tokens: Option<Vec<CategoryTokens>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryTokens {
    pub category: String,
    pub tokens: Vec<String>,
}

fn to_table(
    entries: Option<Vec<CategoryTokens>>,
    default: &[(&str, &[&str])],
) -> Vec<(String, Vec<String>)> {
    match entries {
        Some(entries) => entries
            .into_iter()
            .map(|e| (e.category, e.tokens))
            .collect(),
        None => owned_table(default),
    }
}

impl RulesFile {
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Merge over the defaults and validate.
    pub fn into_rules(self) -> Result<RuleSet, ConfigError> {
        let marker = self
            .voice_vlan_marker
            .unwrap_or_else(|| VOICE_VLAN_MARKER.to_string());
        RuleSet::from_tables(
            &to_table(self.vendor_hints, VENDOR_HINTS),
            &to_table(self.platform_tokens, PLATFORM_TOKENS),
            &marker,
        )
    }
}

/// Load the rule set from `path`, or the defaults when no file is given.
pub fn load_rules(path: Option<&Path>) -> Result<RuleSet, ConfigError> {
    let Some(path) = path else {
        return Ok(RuleSet::default());
    };
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rules = RulesFile::parse(&content, path)?.into_rules()?;
    tracing::info!(
        "Loaded {} vendor and {} platform rules from {}",
        rules.vendor_rules.len(),
        rules.platform_rules.len(),
        path.display()
    );
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::{DeviceType, classify};

    fn parse(content: &str) -> Result<RuleSet, ConfigError> {
        RulesFile::parse(content, Path::new("rules.toml"))?.into_rules()
    }

    #[test]
    fn test_no_file_gives_defaults() {
        assert_eq!(load_rules(None).unwrap(), RuleSet::default());
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        assert_eq!(parse("").unwrap(), RuleSet::default());
    }

    #[test]
    fn test_section_replaces_defaults() {
        let rules = parse(
            r#"
voice_vlan_marker = "VOIP"

[[vendor_hints]]
category = "camera"
tokens = ["Verkada"]
"#,
        )
        .unwrap();
        assert_eq!(rules.vendor_rules.len(), 1);
        assert_eq!(rules.platform_rules, RuleSet::default().platform_rules);
        assert!(rules.is_voice_vlan("Floor2-VoIP"));
        assert!(!rules.is_voice_vlan("VOICE"));

        let v = classify(&rules, "", "Verkada Inc", false);
        assert_eq!(v.device_type, DeviceType::Camera);
        // Polycom no longer hints a phone
        let v = classify(&rules, "", "Polycom", false);
        assert_eq!(v.device_type, DeviceType::Unknown);
    }

    #[test]
    fn test_file_order_is_evaluation_order() {
        let rules = parse(
            r#"
[[platform_tokens]]
category = "router"
tokens = ["edge"]

[[platform_tokens]]
category = "switch"
tokens = ["edge"]
"#,
        )
        .unwrap();
        let v = classify(&rules, "EdgeRouter X", "", false);
        assert_eq!(v.device_type, DeviceType::Router);
        assert_eq!(v.reasons, ["platform->router", "platform->switch"]);
    }

    #[test]
    fn test_unknown_category() {
        let err = parse(
            r#"
[[vendor_hints]]
category = "toaster"
tokens = ["acme"]
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownCategory { section: "vendor_hints", .. }));
    }

    #[test]
    fn test_empty_token_rejected() {
        let err = parse(
            r#"
[[platform_tokens]]
category = "router"
tokens = [""]
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::EmptyToken { section: "platform_tokens", .. }));

        let err = parse(
            r#"
[[vendor_hints]]
category = "printer"
tokens = ["brother", "   "]
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::EmptyToken { section: "vendor_hints", .. }));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = parse("voice_marker = \"voice\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.toml");
        std::fs::write(&path, "voice_vlan_marker = \"tel\"\n").unwrap();
        let rules = load_rules(Some(path.as_path())).unwrap();
        assert_eq!(rules.voice_vlan_marker, "tel");

        let missing = load_rules(Some(dir.path().join("nope.toml").as_path())).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
    }
}
