//! Snapshot file IO built on `cap-std` and `camino`.

use std::io::{self, BufReader};

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};
use haulage_core::{FleetRegistry, FleetSnapshot};
use log::debug;

use crate::CliError;

/// Load a registry, replaying the stored manifests through the ledger.
pub(crate) fn load_registry(path: &Utf8Path) -> Result<FleetRegistry, CliError> {
    let file = fs_utf8::File::open_ambient(path, ambient_authority()).map_err(|source| {
        CliError::OpenSnapshot {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let snapshot: FleetSnapshot =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            CliError::ParseSnapshot {
                path: path.to_path_buf(),
                source,
            }
        })?;
    let registry = snapshot
        .restore()
        .map_err(|source| CliError::InvalidSnapshot {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(
        "loaded {} client(s) and {} vehicle(s) from {path}",
        registry.clients().len(),
        registry.vehicles().len()
    );
    Ok(registry)
}

/// Write `registry` to `path`, creating parent directories as needed.
pub(crate) fn save_registry(path: &Utf8Path, registry: &FleetRegistry) -> Result<(), CliError> {
    let mut payload = FleetSnapshot::capture(registry)
        .to_json()
        .map_err(CliError::SerialiseSnapshot)?;
    payload.push('\n');
    let write_error = |source| CliError::WriteSnapshot {
        path: path.to_path_buf(),
        source,
    };
    let (dir, name) = open_parent(path, true).map_err(write_error)?;
    dir.write(name, payload).map_err(write_error)?;
    debug!("saved snapshot to {path}");
    Ok(())
}

/// Whether a file already exists at `path`.
pub(crate) fn snapshot_exists(path: &Utf8Path) -> Result<bool, CliError> {
    let inspect_error = |source| CliError::OpenSnapshot {
        path: path.to_path_buf(),
        source,
    };
    let (dir, name) = match open_parent(path, false) {
        Ok(found) => found,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(inspect_error(err)),
    };
    match dir.metadata(name) {
        Ok(_) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(inspect_error(err)),
    }
}

fn open_parent(path: &Utf8Path, create: bool) -> io::Result<(fs_utf8::Dir, &str)> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other("snapshot path should include a file name"))?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    if create {
        fs_utf8::Dir::create_ambient_dir_all(parent, ambient_authority())?;
    }
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name))
}
