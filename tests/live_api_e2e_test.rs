//! E2E smoke tests against the live Equinix Metal API
//!
//! Read-only: these only list devices and usages, never delete.
//!
//! Run with: `METALCTL_E2E=1 METAL_AUTH_TOKEN=... METALCTL_E2E_PROJECT=<project-id> \
//!     cargo test --test live_api_e2e_test --features e2e -- --ignored`

#![cfg(feature = "e2e")]

use metalctl::client::MetalClient;
use metalctl::config::DEFAULT_BASE_URL;
use std::env;
use std::time::Duration;

fn should_run_e2e() -> bool {
    env::var("METALCTL_E2E").is_ok()
}

macro_rules! require_e2e {
    () => {
        if !should_run_e2e() {
            eprintln!("Skipping E2E test. Set METALCTL_E2E=1 to run");
            return;
        }
    };
}

fn live_client() -> MetalClient {
    let token = env::var("METAL_AUTH_TOKEN").expect("METAL_AUTH_TOKEN must be set for e2e tests");
    MetalClient::new(&token, DEFAULT_BASE_URL, Duration::from_secs(10)).unwrap()
}

fn project_id() -> String {
    env::var("METALCTL_E2E_PROJECT").expect("METALCTL_E2E_PROJECT must be set for e2e tests")
}

#[tokio::test]
#[ignore]
async fn test_live_list_devices() {
    require_e2e!();

    let client = live_client();
    let devices = client.list_devices(&project_id()).await.unwrap();

    for device in &devices {
        assert!(!device.id.is_empty());
        assert!(!device.hostname.is_empty());
    }
}

#[tokio::test]
#[ignore]
async fn test_live_list_usages() {
    require_e2e!();

    let client = live_client();
    let usages = client.list_usages(&project_id()).await.unwrap();

    for usage in &usages {
        assert!(usage.total >= 0.0, "usage totals are non-negative");
    }
}
