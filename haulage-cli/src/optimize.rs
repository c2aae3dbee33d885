//! Optimize command implementation for the haulage CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use haulage_allocator::FirstFitAllocator;
use haulage_core::{AllocationReport, Allocator};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::fleet_file::{load_registry, save_registry};
use crate::{
    ARG_OPTIMIZE_FORMAT, ARG_OPTIMIZE_SAVE, ARG_OPTIMIZE_SNAPSHOT, CliError,
    ENV_OPTIMIZE_SNAPSHOT, write_json,
};

/// Output encodings for the allocation report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ReportFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// Statistics and per-vehicle rows as CSV.
    Csv,
}

/// CLI arguments for the `optimize` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Recompute the whole cargo assignment of a snapshot: VIP \
                 clients first, heaviest first, each placed on the first \
                 vehicle already in use that has room, opening the next \
                 unused vehicle only when none has. Options can come from CLI \
                 flags, configuration files, or environment variables.",
    about = "Distribute client cargo across the fleet"
)]
#[ortho_config(prefix = "HAULAGE")]
pub(crate) struct OptimizeArgs {
    /// Snapshot file holding the fleet.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) snapshot: Option<Utf8PathBuf>,
    /// Report encoding (defaults to JSON).
    #[arg(long = ARG_OPTIMIZE_FORMAT, value_enum, value_name = "format")]
    #[serde(default)]
    pub(crate) format: Option<ReportFormat>,
    /// Write the new assignment back to the snapshot.
    #[arg(long = ARG_OPTIMIZE_SAVE)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) save: bool,
}

impl OptimizeArgs {
    pub(crate) fn into_config(self) -> Result<OptimizeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        OptimizeConfig::try_from(merged)
    }
}

/// Resolved `optimize` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OptimizeConfig {
    /// Snapshot to allocate.
    pub(crate) snapshot: Utf8PathBuf,
    /// Report encoding.
    pub(crate) format: ReportFormat,
    /// Whether to persist the new assignment.
    pub(crate) save: bool,
}

impl TryFrom<OptimizeArgs> for OptimizeConfig {
    type Error = CliError;

    fn try_from(args: OptimizeArgs) -> Result<Self, Self::Error> {
        let snapshot = args.snapshot.ok_or(CliError::MissingArgument {
            field: ARG_OPTIMIZE_SNAPSHOT,
            env: ENV_OPTIMIZE_SNAPSHOT,
        })?;
        Ok(Self {
            snapshot,
            format: args.format.unwrap_or_default(),
            save: args.save,
        })
    }
}

pub(crate) fn run_optimize(args: OptimizeArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    run_optimize_with(args, &FirstFitAllocator::new(), writer)
}

pub(crate) fn run_optimize_with(
    args: OptimizeArgs,
    allocator: &dyn Allocator,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let report = execute_optimize(&config, allocator)?;
    match config.format {
        ReportFormat::Json => write_json(writer, &report),
        ReportFormat::Csv => write_csv(writer, &report),
    }
}

fn execute_optimize(
    config: &OptimizeConfig,
    allocator: &dyn Allocator,
) -> Result<AllocationReport, CliError> {
    let mut registry = load_registry(&config.snapshot)?;
    let outcome = allocator.allocate(&mut registry);
    let report = AllocationReport::new(&registry, &outcome);
    if config.save {
        save_registry(&config.snapshot, &registry)?;
    }
    Ok(report)
}

fn percent(fraction: f64) -> String {
    format!("{:.1}", fraction * 100.0)
}

fn tonnes(value: f64) -> String {
    format!("{value:.1}")
}

/// Render `report` as two CSV sections: fleet statistics, then one row per
/// opened vehicle followed by one row per unallocated client.
pub(crate) fn write_csv(writer: &mut dyn Write, report: &AllocationReport) -> Result<(), CliError> {
    let mut out = csv::WriterBuilder::new().flexible(true).from_writer(writer);
    let stats = &report.statistics;
    let rows = [
        ("company_name", stats.company_name.clone()),
        ("client_count", stats.client_count.to_string()),
        ("vip_clients", stats.vip_clients.to_string()),
        ("opened_vehicles", report.opened_vehicles.len().to_string()),
        ("total_capacity", tonnes(stats.total_capacity)),
        ("total_load", tonnes(stats.total_load)),
        ("load_percent", percent(stats.load_fraction)),
        ("clients_loaded", stats.clients_loaded.to_string()),
        ("clients_unloaded", stats.clients_unloaded.to_string()),
    ];
    out.write_record(["metric", "value"])
        .map_err(CliError::WriteCsv)?;
    for (metric, value) in &rows {
        out.write_record([*metric, value.as_str()])
            .map_err(CliError::WriteCsv)?;
    }
    out.write_record([
        "vehicle",
        "kind",
        "capacity",
        "current_load",
        "load_percent",
        "clients",
    ])
    .map_err(CliError::WriteCsv)?;
    for vehicle in &report.distribution {
        let capacity = tonnes(vehicle.capacity);
        let load = tonnes(vehicle.current_load);
        let share = percent(vehicle.load_fraction);
        let clients = vehicle.clients.join("; ");
        out.write_record([
            vehicle.id.as_str(),
            vehicle.kind,
            capacity.as_str(),
            load.as_str(),
            share.as_str(),
            clients.as_str(),
        ])
        .map_err(CliError::WriteCsv)?;
    }
    for name in &report.unallocated {
        out.write_record(["unallocated", name.as_str()])
            .map_err(CliError::WriteCsv)?;
    }
    out.flush().map_err(CliError::WriteOutput)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<OptimizeConfig, CliError> {
    let merged = OptimizeArgs::merge_from_layers(layers).map_err(CliError::from)?;
    OptimizeConfig::try_from(merged)
}
