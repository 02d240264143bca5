//! Tag-based retention policy
//!
//! A device carrying the literal `DO_NOT_DELETE` tag is exempt from
//! deletion when the caller opts to respect protection. The check is a pure
//! predicate: exact string match, case-sensitive, order-independent.

use crate::types::Device;

/// The protection marker recognized on device tag sets.
pub const PROTECTED_TAG: &str = "DO_NOT_DELETE";

/// Whether a device may be deleted.
///
/// Returns false iff `skip_protected` is set and the device carries
/// [`PROTECTED_TAG`]; true otherwise, including for an empty tag set.
pub fn eligible_for_deletion(device: &Device, skip_protected: bool) -> bool {
    !(skip_protected && device.tags.iter().any(|t| t == PROTECTED_TAG))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DeviceState;

    fn device_with_tags(tags: &[&str]) -> Device {
        Device {
            id: "d1".to_string(),
            hostname: "vm-a".to_string(),
            state: DeviceState::Active,
            created_by: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_protected_tag_blocks_deletion() {
        let device = device_with_tags(&["DO_NOT_DELETE"]);
        assert!(!eligible_for_deletion(&device, true));
    }

    #[test]
    fn test_flag_off_ignores_protection() {
        let device = device_with_tags(&["DO_NOT_DELETE"]);
        assert!(eligible_for_deletion(&device, false));
    }

    #[test]
    fn test_empty_tags_are_eligible() {
        let device = device_with_tags(&[]);
        assert!(eligible_for_deletion(&device, true));
        assert!(eligible_for_deletion(&device, false));
    }

    #[test]
    fn test_tag_match_is_case_sensitive() {
        let device = device_with_tags(&["do_not_delete"]);
        assert!(eligible_for_deletion(&device, true));
    }

    #[test]
    fn test_tag_position_is_irrelevant() {
        let device = device_with_tags(&["prod", "DO_NOT_DELETE", "gpu"]);
        assert!(!eligible_for_deletion(&device, true));
    }
}
