//! Domain types for the Equinix Metal API surface
//!
//! These structs mirror the provider's JSON payloads directly; serde does the
//! wire decoding. Fields the provider may omit (`created_by`, `tags`) are
//! optional or defaulted rather than treated as a decode fault.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a device.
///
/// The provider has more states than these (provisioning, queued, ...);
/// everything that is not `active` or `inactive` decodes as `Other` and is
/// excluded from inventory reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceState {
    Active,
    Inactive,
    #[serde(other)]
    Other,
}

impl DeviceState {
    /// True for the states the inventory report covers: `active` (running)
    /// and `inactive` (stopped).
    pub fn is_reportable(&self) -> bool {
        matches!(self, DeviceState::Active | DeviceState::Inactive)
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceState::Active => write!(f, "active"),
            DeviceState::Inactive => write!(f, "inactive"),
            DeviceState::Other => write!(f, "other"),
        }
    }
}

/// The account that created a device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceOwner {
    pub full_name: String,
}

/// A provisioned device (VM) in a project's inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    pub hostname: String,
    pub state: DeviceState,
    pub created_by: Option<DeviceOwner>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Device {
    /// Owner display name, or a placeholder when the provider omitted it.
    pub fn owner_name(&self) -> &str {
        self.created_by
            .as_ref()
            .map(|o| o.full_name.as_str())
            .unwrap_or("-")
    }
}

/// A billing line item attributing a cost amount to a named resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageRecord {
    pub name: String,
    pub total: f64,
}

/// Result of a single delete request.
///
/// Deliberately not a `Result`: one device's failed delete is an outcome to
/// report, never an error that stops the sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DeleteOutcome {
    /// Provider returned 204 and the device is gone.
    Deleted,
    /// Provider returned 404: the device was already gone.
    NotFound,
    /// Any other status or a transport fault; carries a description.
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_state_decodes_unknown_as_other() {
        let state: DeviceState = serde_json::from_str("\"provisioning\"").unwrap();
        assert_eq!(state, DeviceState::Other);
        assert!(!state.is_reportable());
    }

    #[test]
    fn test_device_state_reportable() {
        assert!(DeviceState::Active.is_reportable());
        assert!(DeviceState::Inactive.is_reportable());
        assert!(!DeviceState::Other.is_reportable());
    }

    #[test]
    fn test_device_decodes_without_tags() {
        let json = r#"{
            "id": "d1",
            "hostname": "vm-a",
            "state": "active",
            "created_by": {"full_name": "Alice Example"}
        }"#;
        let device: Device = serde_json::from_str(json).unwrap();
        assert!(device.tags.is_empty());
        assert_eq!(device.owner_name(), "Alice Example");
    }

    #[test]
    fn test_device_decodes_without_owner() {
        let json = r#"{"id": "d2", "hostname": "vm-b", "state": "inactive", "tags": ["x"]}"#;
        let device: Device = serde_json::from_str(json).unwrap();
        assert_eq!(device.owner_name(), "-");
        assert_eq!(device.tags, vec!["x".to_string()]);
    }
}
