//! Report rendering
//!
//! Stateless formatting of a project run: the inventory table (rows batched,
//! column widths computed by comfy-table over the full set), line-oriented
//! deletion outcomes, and a JSON mode for scripting.

use crate::error::Result;
use crate::fleet::{ProjectRun, ReportRow, SweepOutcome, SweepRecord};
use crate::types::DeviceState;
use comfy_table::{Cell, Table};
use console::Style;

/// Build the inventory table for one project's rows.
pub fn report_table(rows: &[ReportRow]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Hostname", "ID", "State", "Owner", "Tags", "Cost"]);

    for row in rows {
        let state_cell = match row.device.state {
            DeviceState::Active => {
                Cell::new(row.device.state.to_string()).fg(comfy_table::Color::Green)
            }
            DeviceState::Inactive => {
                Cell::new(row.device.state.to_string()).fg(comfy_table::Color::Yellow)
            }
            DeviceState::Other => Cell::new(row.device.state.to_string()),
        };

        table.add_row(vec![
            Cell::new(&row.device.hostname),
            Cell::new(&row.device.id),
            state_cell,
            Cell::new(row.device.owner_name()),
            Cell::new(row.device.tags.join(", ")),
            Cell::new(format!("${:.2}", row.cost)),
        ]);
    }

    table
}

/// One human-readable line per sweep outcome.
pub fn outcome_line(record: &SweepRecord) -> String {
    match &record.outcome {
        SweepOutcome::Deleted => {
            format!("Deleted {} (ID: {})", record.hostname, record.device_id)
        }
        SweepOutcome::NotFound => format!(
            "Device {} (ID: {}) not found, already gone",
            record.hostname, record.device_id
        ),
        SweepOutcome::Failed(reason) => format!(
            "Failed to delete {} (ID: {}): {}",
            record.hostname, record.device_id, reason
        ),
        SweepOutcome::SkippedProtected => format!(
            "Skipping {} (ID: {}): protected by DO_NOT_DELETE tag",
            record.hostname, record.device_id
        ),
        SweepOutcome::WouldDelete => format!(
            "Would delete {} (ID: {})",
            record.hostname, record.device_id
        ),
    }
}

/// Print the configured project name -> ID table.
pub fn render_projects(config: &crate::config::Config, output_format: &str) -> Result<()> {
    if output_format == "json" {
        println!("{}", serde_json::to_string_pretty(&config.projects)?);
        return Ok(());
    }

    if config.projects.is_empty() {
        println!("No projects configured. Run 'metalctl init' and fill in the project table.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Name", "Project ID"]);
    for project in config.all_projects() {
        table.add_row(vec![Cell::new(&project.name), Cell::new(&project.id)]);
    }
    println!("{}", table);
    Ok(())
}

/// Print one project's inventory: header, device count notice, table.
pub fn render_inventory(project_name: &str, project_id: &str, rows: &[ReportRow]) {
    let header_style = Style::new().bold().cyan();
    println!(
        "\n{}",
        header_style.apply_to(format!("Project {} ({})", project_name, project_id))
    );

    if rows.is_empty() {
        println!("No devices found with states running|stopped");
        return;
    }

    println!("Found {} devices with states running|stopped", rows.len());
    println!("{}", report_table(rows));
}

/// Print the per-device sweep outcomes, one line each.
pub fn render_outcomes(records: &[SweepRecord]) {
    for record in records {
        println!("{}", outcome_line(record));
    }
}

/// Emit a whole project run as one JSON document.
pub fn render_run_json(run: &ProjectRun) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(run)?);
    Ok(())
}
