//! Calculator commands: run the pure calculators without touching records.

use anyhow::{Context, Result};
use serde_json::json;
use std::path::Path;

use logbook::calc::airflow::{self, AirPath, IsoClass, ValidationResult};
use logbook::calc::concentration::{self, Chemical};
use logbook::config::Config;
use logbook::paths::CONFIG_PATH;

use super::ui::Output;
use crate::cli::AirArgs;

/// Fully resolved inputs for an airflow evaluation.
pub struct AirInputs {
    pub room_name: String,
    pub iso_class: IsoClass,
    pub room_volume: f64,
    pub air_path: AirPath,
    pub readings: Vec<f64>,
}

/// Combine a configured room with command-line overrides.
pub fn resolve_air_inputs(config: Option<&Config>, args: &AirArgs) -> Result<AirInputs> {
    let room = match (&args.room, config) {
        (Some(name), Some(config)) => Some(
            config
                .find_room(name)
                .with_context(|| format!("Unknown room '{}'", name))?,
        ),
        (Some(name), None) => {
            anyhow::bail!("Room '{}' given but no {} found", name, CONFIG_PATH)
        }
        (None, _) => None,
    };

    let iso_class = match (args.iso_class, room) {
        (Some(n), _) => IsoClass::try_from(n)?,
        (None, Some(room)) => room.iso_class,
        (None, None) => anyhow::bail!("--iso-class is required without --room"),
    };
    let room_volume = args
        .volume
        .or(room.map(|r| r.volume))
        .context("--volume is required without --room")?;
    let filter_area_sqft = args
        .filter_area
        .or(room.map(|r| r.filter_area_sqft))
        .context("--filter-area is required without --room")?;
    let filter_count = args
        .filter_count
        .or(room.map(|r| r.filter_count))
        .context("--filter-count is required without --room")?;

    Ok(AirInputs {
        room_name: room.map(|r| r.name.clone()).unwrap_or_default(),
        iso_class,
        room_volume,
        air_path: AirPath {
            filter_area_sqft,
            filter_count,
        },
        readings: args.readings.clone(),
    })
}

/// Config if the project is initialized. Calculators work without one.
fn optional_config() -> Result<Option<Config>> {
    if Path::new(CONFIG_PATH).exists() {
        Config::load().map(Some)
    } else {
        Ok(None)
    }
}

pub fn cmd_calc_chemical(
    out: &Output,
    chemical: Option<&str>,
    stock: Option<f64>,
    target: f64,
    volume: f64,
) -> Result<()> {
    let chemical = match (chemical, stock) {
        (_, Some(stock)) => Chemical::new("custom", "-", stock),
        (Some(query), None) => {
            let catalog = optional_config()?
                .map(|c| c.chemicals)
                .unwrap_or_else(concentration::default_catalog);
            find_in_catalog(&catalog, query).cloned()?
        }
        (None, None) => anyhow::bail!("Pass --chemical or --stock"),
    };

    let quantity = concentration::compute_for(&chemical, target, volume)?;

    out.data(
        &format!(
            "{:.2} L of {} ({}% stock) in {} L for a {}% solution",
            quantity, chemical.formula, chemical.stock_concentration, volume, target
        ),
        &json!({
            "chemical": chemical.name,
            "formula": chemical.formula,
            "stock_concentration": chemical.stock_concentration,
            "target_concentration": target,
            "solution_volume": volume,
            "chemical_quantity": quantity,
        }),
    );
    Ok(())
}

pub fn find_in_catalog<'a>(catalog: &'a [Chemical], query: &str) -> Result<&'a Chemical> {
    catalog.iter().find(|c| c.matches(query)).with_context(|| {
        format!(
            "Unknown chemical '{}'. Known: {}",
            query,
            catalog
                .iter()
                .map(|c| c.formula.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    })
}

pub fn cmd_calc_air(out: &Output, args: &AirArgs) -> Result<()> {
    let config = optional_config()?;
    let inputs = resolve_air_inputs(config.as_ref(), args)?;
    let result = airflow::evaluate(
        inputs.iso_class,
        inputs.room_volume,
        &inputs.readings,
        &inputs.air_path,
    )?;
    print_validation(out, inputs.iso_class, &result)
}

pub fn print_validation(out: &Output, iso_class: IsoClass, result: &ValidationResult) -> Result<()> {
    let mut value = serde_json::to_value(result)?;
    value["iso_class"] = json!(iso_class.number());
    out.data(
        &format!("{}: {:.2} ACH, {}", iso_class, result.ach, result.result),
        &value,
    );
    out.field("Average velocity", &format!("{:.2} ft/min", result.average_velocity));
    out.field("Flow rate", &format!("{:.2} CFM", result.flow_rate_cfm));
    out.field("Total airflow", &format!("{:.2} CFM", result.total_cfm));
    out.field("Design spec", &format!("{} ACH", result.design_spec));
    Ok(())
}
