mod classification;
mod patterns;
mod rules;
mod types;
mod vendor;

pub use classification::classify;
pub(crate) use patterns::{PLATFORM_TOKENS, VENDOR_HINTS, VOICE_VLAN_MARKER};
pub use rules::RuleSet;
pub(crate) use rules::owned_table;
pub use types::{ClassificationResult, DeviceType};
pub use vendor::{VendorTable, normalize_mac};
