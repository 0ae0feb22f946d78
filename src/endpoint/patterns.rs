//! Classification token tables. Vendor-name hints and CDP/LLDP platform-description
//! tokens for each rule category, listed in evaluation order.

// Rule category names, used in reason tags and in the rules file
pub(crate) const CATEGORY_IP_PHONE: &str = "ip_phone";
pub(crate) const CATEGORY_CAMERA: &str = "camera";
pub(crate) const CATEGORY_PRINTER: &str = "printer";
pub(crate) const CATEGORY_WIRELESS_AP: &str = "wireless_ap";
pub(crate) const CATEGORY_SWITCH: &str = "switch";
pub(crate) const CATEGORY_ROUTER: &str = "router";

pub(crate) const REASON_VOICE_VLAN: &str = "voice_vlan";

pub(crate) const VENDOR_HINT_WEIGHT: u32 = 25;
pub(crate) const PLATFORM_TOKEN_WEIGHT: u32 = 30;
pub(crate) const VOICE_VLAN_WEIGHT: u32 = 20;

/// Substring that marks a VLAN name as a voice VLAN (case-insensitive)
pub(crate) const VOICE_VLAN_MARKER: &str = "voice";

/// Vendor-name substrings per category. Matched case-insensitively against the OUI vendor.
pub(crate) const VENDOR_HINTS: &[(&str, &[&str])] = &[
    (
        CATEGORY_IP_PHONE,
        &["POLY", "POLYCOM", "CISCO", "AVAYA", "YEALINK", "MITEL"],
    ),
    (
        CATEGORY_CAMERA,
        &["AXIS", "HIKVISION", "HANWHA", "AVIGILON", "DAHUA"],
    ),
    (
        CATEGORY_PRINTER,
        &["HP", "HEWLETT", "BROTHER", "XEROX", "RICOH", "KYOCERA", "CANON"],
    ),
];

/// Platform-description substrings per category. Matched case-insensitively against
/// the neighbor platform string.
pub(crate) const PLATFORM_TOKENS: &[(&str, &[&str])] = &[
    (
        CATEGORY_IP_PHONE,
        &[
            "ip phone",
            "telephone",
            "sip",
            "lldp-med",
            "poly",
            "polycom",
            "cisco ip phone",
            "avaya",
        ],
    ),
    (
        CATEGORY_CAMERA,
        &["axis", "hikvision", "hanwha", "onvif", "rtsp", "camera"],
    ),
    (
        CATEGORY_PRINTER,
        &[
            "printer", "hp inc", "hewlett", "brother", "xerox", "ricoh", "kyocera", "canon",
        ],
    ),
    (
        CATEGORY_WIRELESS_AP,
        // "catalyst 91" covers the C91xx access points without matching C9200/C9300 switches
        &[
            "aironet",
            "catalyst 91",
            "meraki",
            "aruba ap",
            "ruckus",
            "access point",
            "ap-",
        ],
    ),
    (CATEGORY_SWITCH, &["cisco catalyst", "nexus", "switch"]),
    (CATEGORY_ROUTER, &["asr", "isr", "router"]),
];
