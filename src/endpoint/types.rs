use serde::{Deserialize, Serialize};

/// Device category inferred for an ARP endpoint.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    #[default]
    Unknown,
    IpPhone,
    Camera,
    Printer,
    WirelessAp,
    AccessSwitch,
    Router,
}

impl DeviceType {
    #[cfg(test)]
    pub const ALL: [DeviceType; 7] = [
        DeviceType::Unknown,
        DeviceType::IpPhone,
        DeviceType::Camera,
        DeviceType::Printer,
        DeviceType::WirelessAp,
        DeviceType::AccessSwitch,
        DeviceType::Router,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Unknown => "unknown",
            DeviceType::IpPhone => "ip_phone",
            DeviceType::Camera => "camera",
            DeviceType::Printer => "printer",
            DeviceType::WirelessAp => "wireless_ap",
            DeviceType::AccessSwitch => "access_switch",
            DeviceType::Router => "router",
        }
    }
}

impl std::fmt::Display for DeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Discrete confidence level derived from the accumulated rule score.
/// Thresholds: >= 70 High, >= 40 Medium, otherwise Low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Confidence {
    Low = 25,
    Medium = 60,
    High = 90,
}

impl Confidence {
    pub fn from_score(score: u32) -> Self {
        if score >= 70 {
            Confidence::High
        } else if score >= 40 {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }

    pub fn percent(&self) -> u8 {
        *self as u8
    }
}

/// Output of a single classifier call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub device_type: DeviceType,
    pub score: u32,
    pub confidence: Confidence,
    /// Rule-trigger tags in evaluation order, e.g. `vendor->camera`.
    pub reasons: Vec<String>,
}

/// One enriched ARP row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub device_id: String,
    pub ip: String,
    pub mac: String,
    pub vendor: String,
    pub platform_hint: String,
    pub device_type: DeviceType,
    pub confidence: u8,
    pub reasons: Vec<String>,
}
