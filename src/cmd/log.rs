//! `logbook log` subcommands: build an entry from flags and create a record.

use anyhow::Result;

use logbook::operations::{self, CreateOptions};
use logbook::record::{AirValidation, ChemicalPreparation, Entry, Report, UtilityReading};

use super::calc::{find_in_catalog, resolve_air_inputs};
use super::ui::{render, Output};
use super::Workspace;
use crate::cli::{LogCommands, LogOptions};

fn build_entry(ws: &Workspace, command: &LogCommands) -> Result<Entry> {
    let config = &ws.config;
    let entry = match command {
        LogCommands::Utility {
            equipment_type,
            equipment,
            t1,
            t2,
            p1,
            p2,
            flow_rate,
            ..
        } => {
            if !config.equipment.has(*equipment_type, equipment) {
                anyhow::bail!(
                    "Unknown {} '{}'. Configured: {}",
                    equipment_type,
                    equipment,
                    config.equipment.ids_for(*equipment_type).join(", ")
                );
            }
            Entry::Utility(UtilityReading {
                equipment_type: *equipment_type,
                equipment_id: equipment.clone(),
                t1: *t1,
                t2: *t2,
                p1: *p1,
                p2: *p2,
                flow_rate: *flow_rate,
            })
        }
        LogCommands::Chemical {
            chemical,
            equipment,
            target,
            volume,
            ..
        } => {
            if !config.equipment.has_reactor(equipment) {
                anyhow::bail!(
                    "Unknown reactor '{}'. Configured: {}",
                    equipment,
                    config.equipment.reactors.join(", ")
                );
            }
            let chemical = find_in_catalog(&config.chemicals, chemical)?;
            Entry::Chemical(ChemicalPreparation::new(chemical, equipment, *target, *volume)?)
        }
        LogCommands::Air { air, .. } => {
            if air.room.is_none() {
                anyhow::bail!("--room is required when logging a validation");
            }
            let inputs = resolve_air_inputs(Some(config), air)?;
            Entry::AirValidation(AirValidation::new(
                &inputs.room_name,
                inputs.iso_class,
                inputs.room_volume,
                inputs.air_path,
                inputs.readings,
            )?)
        }
        LogCommands::Report {
            report_type, title, ..
        } => Entry::Report(Report {
            report_type: *report_type,
            title: title.trim().to_string(),
        }),
    };
    Ok(entry)
}

fn log_options(command: &LogCommands) -> &LogOptions {
    match command {
        LogCommands::Utility { options, .. }
        | LogCommands::Chemical { options, .. }
        | LogCommands::Air { options, .. }
        | LogCommands::Report { options, .. } => options,
    }
}

pub fn cmd_log(out: &Output, ws: &Workspace, user: Option<&str>, command: &LogCommands) -> Result<()> {
    let actor = ws.actor(user)?;
    let entry = build_entry(ws, command)?;
    let options = log_options(command);

    let record = operations::create_record(
        &ws.repo,
        &ws.config.site.id,
        &actor,
        entry,
        CreateOptions {
            notes: options.notes.clone(),
            submit: options.submit,
            at: None,
        },
    )?;

    out.success(&format!("Logged {} ({})", record.id, record.status()));
    render::emit_record(out, &record)
}
