//! Command-line interface for managing a fleet snapshot and distributing
//! client cargo across its vehicles.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::filter::LevelFilter;

mod demo;
mod edit;
mod error;
mod fleet_file;
mod optimize;

pub use error::CliError;

use edit::{
    AddClientArgs, AddVehicleArgs, InitArgs, ListArgs, LoadArgs, RemoveClientArgs,
    RemoveVehicleArgs, StatsArgs, UnloadArgs, run_add_client, run_add_vehicle, run_init,
    run_list, run_load, run_remove_client, run_remove_vehicle, run_stats, run_unload,
};
use optimize::{OptimizeArgs, run_optimize};

pub(crate) const ARG_OPTIMIZE_SNAPSHOT: &str = "snapshot";
pub(crate) const ARG_OPTIMIZE_FORMAT: &str = "format";
pub(crate) const ARG_OPTIMIZE_SAVE: &str = "save";
pub(crate) const ENV_OPTIMIZE_SNAPSHOT: &str = "HAULAGE_CMDS_OPTIMIZE_SNAPSHOT";

/// Run the haulage CLI with the current process arguments and environment.
///
/// Help and version requests print to stdout and exit the process directly.
pub fn run() -> Result<(), CliError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => return Err(CliError::ArgumentParsing(err)),
    };
    init_logging(cli.verbose);
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &mut stdout)
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let installed = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .try_init();
    if installed.is_err() {
        log::debug!("a global logger is already installed");
    }
}

fn dispatch(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Init(args) => run_init(args, writer),
        Command::AddClient(args) => run_add_client(args, writer),
        Command::RemoveClient(args) => run_remove_client(args, writer),
        Command::AddVehicle(args) => run_add_vehicle(args, writer),
        Command::RemoveVehicle(args) => run_remove_vehicle(args, writer),
        Command::Load(args) => run_load(args, writer),
        Command::Unload(args) => run_unload(args, writer),
        Command::List(args) => run_list(args, writer),
        Command::Stats(args) => run_stats(args, writer),
        Command::Optimize(args) => run_optimize(args, writer),
    }
}

/// Write `value` as pretty-printed JSON followed by a newline.
pub(crate) fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseReport)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[derive(Debug, Parser)]
#[command(
    name = "haulage",
    about = "Fleet bookkeeping and cargo distribution",
    version
)]
struct Cli {
    /// Log engine activity at debug level on stderr.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a new fleet snapshot.
    Init(InitArgs),
    /// Register a client.
    AddClient(AddClientArgs),
    /// Remove a client, unloading its cargo first.
    RemoveClient(RemoveClientArgs),
    /// Commission a vehicle and print its generated id.
    AddVehicle(AddVehicleArgs),
    /// Remove a vehicle; its clients stay registered.
    RemoveVehicle(RemoveVehicleArgs),
    /// Load one client's cargo onto a vehicle.
    Load(LoadArgs),
    /// Unload one client, or everything, from a vehicle.
    Unload(UnloadArgs),
    /// Print every client and vehicle as JSON.
    List(ListArgs),
    /// Print fleet statistics as JSON.
    Stats(StatsArgs),
    /// Distribute client cargo across the fleet.
    Optimize(OptimizeArgs),
}

#[cfg(test)]
mod tests;
