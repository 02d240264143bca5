//! Inventory pipeline over a project's device fleet
//!
//! One project run walks four steps: fetch the device list, filter it down
//! to reportable states, build the cost report, and (for sweeps) delete the
//! devices the retention policy allows. Steps are strictly sequential; one
//! device's failure never stops the rest. Only a failed device fetch ends a
//! project's run, and even that leaves the other projects of a multi-project
//! sweep untouched.

use crate::client::MetalClient;
use crate::config::{Config, ProjectRef};
use crate::cost;
use crate::error::Result;
use crate::exit_codes::codes;
use crate::policy;
use crate::report;
use crate::types::{DeleteOutcome, Device};
use clap::Subcommand;
use serde::Serialize;
use tracing::info;

#[derive(Subcommand, Clone)]
pub enum DeviceCommands {
    /// Report devices and accrued cost for a project
    List {
        /// Project name (from the config table); all projects when omitted
        #[arg(long)]
        project: Option<String>,
    },
    /// Report devices, then delete the ones not protected by tag
    Sweep {
        /// Project name (from the config table); all projects when omitted
        #[arg(long)]
        project: Option<String>,
        /// Show the deletion plan without deleting anything
        #[arg(long)]
        dry_run: bool,
        /// Delete devices even if they carry the DO_NOT_DELETE tag
        #[arg(long)]
        ignore_protected: bool,
    },
}

/// What a run does after reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    ListOnly,
    Sweep {
        dry_run: bool,
        skip_protected: bool,
    },
}

/// One line of the inventory report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub device: Device,
    pub cost: f64,
}

/// Per-device result of the deletion phase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SweepOutcome {
    Deleted,
    NotFound,
    Failed(String),
    /// Protection tag respected; no delete attempted.
    SkippedProtected,
    /// Dry run; the device would have been deleted.
    WouldDelete,
}

impl From<DeleteOutcome> for SweepOutcome {
    fn from(outcome: DeleteOutcome) -> Self {
        match outcome {
            DeleteOutcome::Deleted => SweepOutcome::Deleted,
            DeleteOutcome::NotFound => SweepOutcome::NotFound,
            DeleteOutcome::Failed(reason) => SweepOutcome::Failed(reason),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SweepRecord {
    pub device_id: String,
    pub hostname: String,
    pub outcome: SweepOutcome,
}

/// Everything one project run produced.
#[derive(Debug, Serialize)]
pub struct ProjectRun {
    pub project_name: String,
    pub project_id: String,
    pub rows: Vec<ReportRow>,
    pub outcomes: Vec<SweepRecord>,
}

/// Keep only devices in reportable states, preserving provider order.
pub fn filter_reportable(devices: Vec<Device>) -> Vec<Device> {
    devices
        .into_iter()
        .filter(|d| d.state.is_reportable())
        .collect()
}

/// Deletion phase: walk the reported devices in order, apply the retention
/// policy, and record one outcome per device. Attempts are independent.
pub async fn sweep_devices(
    client: &MetalClient,
    rows: &[ReportRow],
    dry_run: bool,
    skip_protected: bool,
) -> Vec<SweepRecord> {
    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        let device = &row.device;
        let outcome = if !policy::eligible_for_deletion(device, skip_protected) {
            SweepOutcome::SkippedProtected
        } else if dry_run {
            SweepOutcome::WouldDelete
        } else {
            client.delete_device(&device.id).await.into()
        };
        records.push(SweepRecord {
            device_id: device.id.clone(),
            hostname: device.hostname.clone(),
            outcome,
        });
    }
    records
}

/// Run the pipeline for one project: fetch, filter, report, optional sweep.
///
/// The report is rendered before any delete is issued; deletion walks the
/// already-reported rows. An empty (or fully filtered) device list is a
/// normal terminal state, not a fault. A fetch failure propagates to the
/// caller. In JSON mode nothing prints until the run is complete, then the
/// whole run is emitted as one document.
pub async fn run_project(
    client: &MetalClient,
    project: &ProjectRef,
    mode: RunMode,
    output_format: &str,
) -> Result<ProjectRun> {
    let devices = client.list_devices(&project.id).await?;
    let devices = filter_reportable(devices);
    info!(
        "{} reportable devices in project {}",
        devices.len(),
        project.name
    );

    // Rows are batched before any rendering so the table can size its
    // columns from the full set.
    let mut rows = Vec::with_capacity(devices.len());
    for device in devices {
        let cost = cost::device_cost(client, &project.id, &device.hostname).await;
        rows.push(ReportRow { device, cost });
    }

    let text = output_format != "json";
    if text {
        report::render_inventory(&project.name, &project.id, &rows);
    }

    let outcomes = match mode {
        RunMode::ListOnly => Vec::new(),
        RunMode::Sweep {
            dry_run,
            skip_protected,
        } => sweep_devices(client, &rows, dry_run, skip_protected).await,
    };

    if text {
        report::render_outcomes(&outcomes);
    }

    let run = ProjectRun {
        project_name: project.name.clone(),
        project_id: project.id.clone(),
        rows,
        outcomes,
    };

    if !text {
        report::render_run_json(&run)?;
    }

    Ok(run)
}

/// CLI entry point for the `devices` subcommands.
///
/// Returns the process exit code: 0 for a completed run regardless of
/// per-device outcomes, SYSTEM_ERROR when any project's device fetch
/// failed. Configuration problems surface as `Err` before any project is
/// touched.
pub async fn handle_command(
    cmd: DeviceCommands,
    config: &Config,
    token_override: Option<&str>,
    output_format: &str,
) -> Result<i32> {
    let (project, mode) = match cmd {
        DeviceCommands::List { project } => (project, RunMode::ListOnly),
        DeviceCommands::Sweep {
            project,
            dry_run,
            ignore_protected,
        } => (
            project,
            RunMode::Sweep {
                dry_run,
                skip_protected: !ignore_protected,
            },
        ),
    };

    let client = MetalClient::from_config(config, token_override)?;

    let projects = match project {
        Some(name) => vec![config.resolve_project(&name)?],
        None => config.all_projects(),
    };

    if projects.is_empty() {
        println!("No projects configured. Run 'metalctl init' and fill in the project table.");
        return Ok(codes::SUCCESS);
    }

    let mut exit_code = codes::SUCCESS;
    for project in &projects {
        if let Err(e) = run_project(&client, project, mode, output_format).await {
            // One project's fetch failure must not stop the others,
            // but the process still exits non-zero.
            eprintln!("Error fetching devices for project {}: {}", project.name, e);
            exit_code = codes::SYSTEM_ERROR;
        }
    }

    Ok(exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DeviceState;

    fn device(id: &str, state: DeviceState) -> Device {
        Device {
            id: id.to_string(),
            hostname: format!("vm-{}", id),
            state,
            created_by: None,
            tags: Vec::new(),
        }
    }

    #[test]
    fn test_filter_keeps_active_and_inactive_in_order() {
        let devices = vec![
            device("1", DeviceState::Active),
            device("2", DeviceState::Other),
            device("3", DeviceState::Inactive),
            device("4", DeviceState::Active),
        ];
        let filtered = filter_reportable(devices);
        let ids: Vec<&str> = filtered.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3", "4"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let devices = vec![
            device("1", DeviceState::Active),
            device("2", DeviceState::Inactive),
        ];
        let once = filter_reportable(devices);
        let ids_once: Vec<String> = once.iter().map(|d| d.id.clone()).collect();
        let twice = filter_reportable(once);
        let ids_twice: Vec<String> = twice.iter().map(|d| d.id.clone()).collect();
        assert_eq!(ids_once, ids_twice);
    }

    #[test]
    fn test_sweep_outcome_from_delete_outcome() {
        assert_eq!(
            SweepOutcome::from(DeleteOutcome::Deleted),
            SweepOutcome::Deleted
        );
        assert_eq!(
            SweepOutcome::from(DeleteOutcome::NotFound),
            SweepOutcome::NotFound
        );
        assert_eq!(
            SweepOutcome::from(DeleteOutcome::Failed("boom".to_string())),
            SweepOutcome::Failed("boom".to_string())
        );
    }
}
