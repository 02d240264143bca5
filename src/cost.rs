//! Cost aggregation over project usage records
//!
//! A device's accrued cost is the sum of every usage record whose `name`
//! equals the device's hostname. Matching is exact: hostnames are canonical
//! strings at the provider, so no case or whitespace normalization is
//! applied. The cost window is "all returned usage records"; the payload
//! carries no period fields to narrow it.

use crate::client::MetalClient;
use crate::types::UsageRecord;
use tracing::warn;

/// Sum the usage totals attributable to one hostname.
pub fn sum_for_host(records: &[UsageRecord], hostname: &str) -> f64 {
    records
        .iter()
        .filter(|r| r.name == hostname)
        .map(|r| r.total)
        .sum()
}

/// Accrued cost for one device, best-effort.
///
/// A failed usage fetch degrades to 0.0 with a warning; cost lookup must
/// never block inventory reporting.
pub async fn device_cost(client: &MetalClient, project_id: &str, hostname: &str) -> f64 {
    match client.list_usages(project_id).await {
        Ok(usages) => sum_for_host(&usages, hostname),
        Err(e) => {
            warn!("Cost lookup failed for {}: {}", hostname, e);
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, total: f64) -> UsageRecord {
        UsageRecord {
            name: name.to_string(),
            total,
        }
    }

    #[test]
    fn test_sum_for_host_sums_matching_records() {
        let records = vec![
            record("vm-a", 5.0),
            record("vm-b", 1.0),
            record("vm-a", 2.5),
        ];
        assert_eq!(sum_for_host(&records, "vm-a"), 7.5);
        assert_eq!(sum_for_host(&records, "vm-b"), 1.0);
    }

    #[test]
    fn test_sum_for_host_no_matches_is_zero() {
        let records = vec![record("vm-a", 5.0)];
        assert_eq!(sum_for_host(&records, "vm-z"), 0.0);
        assert_eq!(sum_for_host(&[], "vm-a"), 0.0);
    }

    #[test]
    fn test_sum_for_host_is_case_sensitive() {
        let records = vec![record("VM-A", 5.0)];
        assert_eq!(sum_for_host(&records, "vm-a"), 0.0);
        assert_eq!(sum_for_host(&records, "VM-A"), 5.0);
    }

    #[test]
    fn test_sum_for_host_exact_match_no_trimming() {
        let records = vec![record("vm-a ", 5.0)];
        assert_eq!(sum_for_host(&records, "vm-a"), 0.0);
    }
}
