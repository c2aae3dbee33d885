//! Commands that create, inspect and edit a snapshot.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use haulage_core::{CargoUnit, FleetRegistry, RandomIds, TransportUnit, VehicleKind};
use log::info;

use crate::demo::demo_fleet;
use crate::fleet_file::{load_registry, save_registry, snapshot_exists};
use crate::{CliError, write_json};

/// CLI arguments for the `init` subcommand.
#[derive(Debug, Clone, Parser)]
pub(crate) struct InitArgs {
    /// Snapshot file to create.
    #[arg(value_name = "path")]
    pub(crate) snapshot: Utf8PathBuf,
    /// Company name for the new fleet.
    #[arg(long)]
    pub(crate) name: String,
    /// Seed the fleet with sample clients and vehicles.
    #[arg(long)]
    pub(crate) demo: bool,
    /// Replace an existing snapshot.
    #[arg(long)]
    pub(crate) force: bool,
    /// Seed for reproducible demo vehicle ids.
    #[arg(long, value_name = "n", requires = "demo")]
    pub(crate) seed: Option<u64>,
}

/// CLI arguments for the `add-client` subcommand.
#[derive(Debug, Clone, Parser)]
pub(crate) struct AddClientArgs {
    /// Snapshot file to update.
    #[arg(value_name = "path")]
    pub(crate) snapshot: Utf8PathBuf,
    /// Unique client name.
    #[arg(long)]
    pub(crate) name: String,
    /// Cargo weight in tonnes.
    #[arg(long)]
    pub(crate) weight: f64,
    /// Serve the client before regular clients.
    #[arg(long)]
    pub(crate) vip: bool,
}

/// CLI arguments for the `remove-client` subcommand.
#[derive(Debug, Clone, Parser)]
pub(crate) struct RemoveClientArgs {
    /// Snapshot file to update.
    #[arg(value_name = "path")]
    pub(crate) snapshot: Utf8PathBuf,
    /// Name of the client to remove.
    pub(crate) name: String,
}

/// CLI arguments for the `add-vehicle` subcommand.
#[derive(Debug, Clone, Parser)]
pub(crate) struct AddVehicleArgs {
    /// Snapshot file to update.
    #[arg(value_name = "path")]
    pub(crate) snapshot: Utf8PathBuf,
    /// Maximum load in tonnes.
    #[arg(long)]
    pub(crate) capacity: f64,
    /// Register a train with this many cars.
    #[arg(long, value_name = "n", conflicts_with = "max_altitude")]
    pub(crate) cars: Option<u32>,
    /// Register an airplane with this altitude ceiling in metres.
    #[arg(long, value_name = "metres")]
    pub(crate) max_altitude: Option<f64>,
    /// Seed for a reproducible vehicle id.
    #[arg(long, value_name = "n")]
    pub(crate) seed: Option<u64>,
}

impl AddVehicleArgs {
    fn kind(&self) -> Result<VehicleKind, CliError> {
        Ok(match (self.cars, self.max_altitude) {
            (Some(cars), _) => VehicleKind::train(cars)?,
            (None, Some(altitude)) => VehicleKind::airplane(altitude)?,
            (None, None) => VehicleKind::Plain,
        })
    }
}

/// CLI arguments for the `remove-vehicle` subcommand.
#[derive(Debug, Clone, Parser)]
pub(crate) struct RemoveVehicleArgs {
    /// Snapshot file to update.
    #[arg(value_name = "path")]
    pub(crate) snapshot: Utf8PathBuf,
    /// Id of the vehicle to remove.
    pub(crate) id: String,
}

/// CLI arguments for the `load` subcommand.
#[derive(Debug, Clone, Parser)]
pub(crate) struct LoadArgs {
    /// Snapshot file to update.
    #[arg(value_name = "path")]
    pub(crate) snapshot: Utf8PathBuf,
    /// Id of the receiving vehicle.
    pub(crate) vehicle: String,
    /// Name of the client whose cargo is loaded.
    pub(crate) client: String,
}

/// CLI arguments for the `unload` subcommand.
#[derive(Debug, Clone, Parser)]
pub(crate) struct UnloadArgs {
    /// Snapshot file to update.
    #[arg(value_name = "path")]
    pub(crate) snapshot: Utf8PathBuf,
    /// Id of the vehicle to unload.
    pub(crate) vehicle: String,
    /// Client to unload; the whole vehicle is emptied when omitted.
    pub(crate) client: Option<String>,
}

/// CLI arguments for the `list` subcommand.
#[derive(Debug, Clone, Parser)]
pub(crate) struct ListArgs {
    /// Snapshot file to list.
    #[arg(value_name = "path")]
    pub(crate) snapshot: Utf8PathBuf,
}

/// CLI arguments for the `stats` subcommand.
#[derive(Debug, Clone, Parser)]
pub(crate) struct StatsArgs {
    /// Snapshot file to summarise.
    #[arg(value_name = "path")]
    pub(crate) snapshot: Utf8PathBuf,
}

fn id_source(seed: Option<u64>) -> RandomIds {
    seed.map_or_else(RandomIds::from_entropy, RandomIds::seeded)
}

fn say(writer: &mut dyn Write, line: &str) -> Result<(), CliError> {
    writeln!(writer, "{line}").map_err(CliError::WriteOutput)
}

pub(crate) fn run_init(args: InitArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    if !args.force && snapshot_exists(&args.snapshot)? {
        return Err(CliError::SnapshotExists {
            path: args.snapshot,
        });
    }
    let registry = if args.demo {
        let mut ids = id_source(args.seed);
        demo_fleet(&args.name, &mut ids)?
    } else {
        FleetRegistry::new(args.name.as_str())?
    };
    save_registry(&args.snapshot, &registry)?;
    info!("initialised fleet '{}' at {}", registry.name(), args.snapshot);
    say(
        writer,
        &format!(
            "created {} with {} client(s) and {} vehicle(s)",
            args.snapshot,
            registry.clients().len(),
            registry.vehicles().len()
        ),
    )
}

pub(crate) fn run_add_client(args: AddClientArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let mut registry = load_registry(&args.snapshot)?;
    let client = CargoUnit::new(args.name, args.weight, args.vip)?;
    let name = client.name().to_owned();
    registry.add_client(client)?;
    save_registry(&args.snapshot, &registry)?;
    say(writer, &format!("added client {name}"))
}

pub(crate) fn run_remove_client(
    args: RemoveClientArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let mut registry = load_registry(&args.snapshot)?;
    let removed = registry.remove_client(&args.name)?;
    save_registry(&args.snapshot, &registry)?;
    say(writer, &format!("removed client {}", removed.name()))
}

pub(crate) fn run_add_vehicle(args: AddVehicleArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let kind = args.kind()?;
    let mut registry = load_registry(&args.snapshot)?;
    let mut ids = id_source(args.seed);
    let vehicle = TransportUnit::with_generated_id(&mut ids, args.capacity, kind)?;
    let id = vehicle.id().clone();
    registry.add_vehicle(vehicle)?;
    save_registry(&args.snapshot, &registry)?;
    say(writer, id.as_str())
}

pub(crate) fn run_remove_vehicle(
    args: RemoveVehicleArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let mut registry = load_registry(&args.snapshot)?;
    let vehicle = registry.remove_vehicle(&args.id)?;
    save_registry(&args.snapshot, &registry)?;
    say(writer, &format!("removed vehicle {}", vehicle.id()))
}

pub(crate) fn run_load(args: LoadArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let mut registry = load_registry(&args.snapshot)?;
    registry.load(&args.vehicle, &args.client)?;
    save_registry(&args.snapshot, &registry)?;
    say(
        writer,
        &format!("loaded {} onto {}", args.client.trim(), args.vehicle),
    )
}

pub(crate) fn run_unload(args: UnloadArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let mut registry = load_registry(&args.snapshot)?;
    let released = registry.unload(&args.vehicle, args.client.as_deref())?;
    if released.is_empty() {
        return say(writer, &format!("nothing unloaded from {}", args.vehicle));
    }
    save_registry(&args.snapshot, &registry)?;
    for client in &released {
        say(
            writer,
            &format!("unloaded {} from {}", client.name(), args.vehicle),
        )?;
    }
    Ok(())
}

pub(crate) fn run_list(args: ListArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let registry = load_registry(&args.snapshot)?;
    write_json(writer, &registry.listing())
}

pub(crate) fn run_stats(args: StatsArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let registry = load_registry(&args.snapshot)?;
    write_json(writer, &registry.statistics())
}
